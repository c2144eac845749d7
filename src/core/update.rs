use crate::{
    core::{
        cmd::Cmd,
        msg::{livestream::LivestreamMsg, Msg},
        state::AppState,
    },
    domain::{channel::STREAMER_CHANNEL_ID, route::ResolvedRoute, screen::Screen},
    infrastructure::video::LIVESTREAM_CALL_TYPE,
};

/// Elm-like update function
/// Returns new state and list of commands from current state and message
pub fn update(msg: Msg, mut state: AppState) -> (AppState, Vec<Cmd>) {
    match msg {
        Msg::System(system_msg) => {
            let commands = state.system.update(system_msg);
            (state, commands)
        }

        Msg::Nav(command) => {
            let before = state.nav.current_route().cloned();
            let mut commands = state.nav.update(command);
            let after = state.nav.current_route().cloned();
            if before != after {
                commands.extend(on_route_changed(&mut state, before.as_ref(), after.as_ref()));
            }
            (state, commands)
        }

        Msg::Channels(channels_msg) => {
            let commands = state.channels.update(channels_msg);
            (state, commands)
        }

        Msg::Livestream(LivestreamMsg::Joined(call))
            if !state
                .current_route()
                .is_some_and(|route| hosts_call(route.screen())) =>
        {
            // The screen that asked for the call is gone; its leave follows.
            log::debug!("Update: ignoring join of {} off the livestream screen", call.cid());
            (state, vec![])
        }

        Msg::Livestream(livestream_msg) => {
            let commands = state.livestream.update(livestream_msg);
            (state, commands)
        }

        Msg::Rewards(rewards_msg) => {
            let commands = state.rewards.update(rewards_msg);
            (state, commands)
        }
    }
}

/// Commands to run once when the app starts at its current route.
pub fn init(state: &mut AppState) -> Vec<Cmd> {
    let current = state.nav.current_route().cloned();
    let mut commands = vec![Cmd::LoadChannels];
    commands.extend(
        on_route_changed(state, None, current.as_ref())
            .into_iter()
            .filter(|cmd| *cmd != Cmd::LoadChannels),
    );
    commands
}

fn hosts_call(screen: Screen) -> bool {
    matches!(
        screen,
        Screen::LivestreamWatcher | Screen::LivestreamStreamer
    )
}

/// Screen lifecycle: entering a livestream joins its call, leaving it ends
/// the call, and coming back to the list refreshes it.
fn on_route_changed(
    state: &mut AppState,
    from: Option<&ResolvedRoute>,
    to: Option<&ResolvedRoute>,
) -> Vec<Cmd> {
    let was_live = from.is_some_and(|route| hosts_call(route.screen()));
    let is_live = to.is_some_and(|route| hosts_call(route.screen()));
    let mut commands = Vec::new();

    if is_live {
        if !was_live {
            state.livestream = Default::default();
        }
        commands.push(Cmd::JoinCall {
            call_type: LIVESTREAM_CALL_TYPE.to_string(),
            call_id: STREAMER_CHANNEL_ID.to_string(),
        });
    } else if was_live {
        commands.push(Cmd::LeaveCall);
    }

    if from.map(ResolvedRoute::channel_id) != to.map(ResolvedRoute::channel_id) {
        state.rewards.show_panel = false;
    }

    if to.is_some_and(|route| route.screen() == Screen::Channels) {
        commands.push(Cmd::LoadChannels);
    }

    commands
}
