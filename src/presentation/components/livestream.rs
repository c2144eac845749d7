//! Livestream component
//!
//! Shared by the watcher and broadcaster screens: the call state on top and
//! the channel chat below it.

use ratatui::{prelude::*, widgets::*};

use crate::{
    core::{
        msg::{rewards::RewardsMsg, system::SystemMsg, Msg},
        navigator::{NavOptions, Navigator},
        state::{AppState, LivestreamUiState},
    },
    domain::screen::Screen,
    presentation::{
        components::messages::MessagesComponent, composer::LivestreamScreen, config::Action,
    },
};

#[derive(Debug, Clone, Default)]
pub struct LivestreamComponent {
    messages: MessagesComponent,
}

impl LivestreamComponent {
    pub fn new() -> Self {
        Self {
            messages: MessagesComponent::new(),
        }
    }

    pub fn view(
        &self,
        state: &AppState,
        screen: &LivestreamScreen,
        is_host: bool,
        frame: &mut Frame,
        area: Rect,
    ) {
        let area = self
            .messages
            .rewards_panel(state, &screen.messages.channel_id, frame, area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let call = &screen.livestream;
        let title = if is_host {
            format!("Broadcasting {}:{}", call.call_type, call.call_id)
        } else {
            format!("Watching {}:{}", call.call_type, call.call_id)
        };
        let status = match &state.livestream.ui_state {
            LivestreamUiState::Loading => {
                Span::styled("Joining call...", Style::default().fg(Color::Yellow))
            }
            LivestreamUiState::Success(handle) => Span::styled(
                format!("Live on {}", handle.cid()),
                Style::default().fg(Color::Green).bold(),
            ),
            LivestreamUiState::Error => {
                Span::styled("Unable to join the call", Style::default().fg(Color::Red))
            }
        };
        frame.render_widget(
            Paragraph::new(status).block(Block::default().borders(Borders::ALL).title(title)),
            chunks[0],
        );

        self.messages.chat(&screen.messages, frame, chunks[1]);
    }

    pub fn handle_action(
        &self,
        action: Action,
        screen: &LivestreamScreen,
        navigator: &dyn Navigator,
    ) -> Vec<Msg> {
        match action {
            Action::ToggleRewards => vec![Msg::Rewards(RewardsMsg::TogglePanel)],
            Action::OpenMessages => {
                match Screen::Messages.create_route(&screen.messages.channel_id) {
                    Ok(route) => {
                        navigator.navigate(route, NavOptions::single_top());
                        vec![]
                    }
                    Err(e) => vec![Msg::System(SystemMsg::ShowError(e.to_string()))],
                }
            }
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::{
        core::{
            msg::livestream::LivestreamMsg,
            navigator::{AppNavigator, NavCommand},
            state::BackStackEntry,
        },
        infrastructure::video::CallHandle,
        presentation::composer::{ComposedScreen, ScreenComposer},
    };

    fn livestream_screen(screen: Screen) -> LivestreamScreen {
        let entry = BackStackEntry {
            id: 1,
            route: screen.create_route("livestream:streamer").unwrap(),
        };
        match ScreenComposer::default().compose(&entry) {
            Some(ComposedScreen::LivestreamWatcher(live))
            | Some(ComposedScreen::LivestreamStreamer(live)) => live,
            other => panic!("expected a livestream screen, got {other:?}"),
        }
    }

    fn rendered(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_open_messages_from_watcher() {
        let (navigator, mut host) = AppNavigator::new();
        LivestreamComponent::new().handle_action(
            Action::OpenMessages,
            &livestream_screen(Screen::LivestreamWatcher),
            &navigator,
        );
        assert_eq!(
            host.drain(),
            vec![NavCommand::NavigateTo {
                route: Screen::Messages.create_route("livestream:streamer").unwrap(),
                options: NavOptions::single_top(),
            }]
        );
    }

    #[test]
    fn test_view_follows_call_state() {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        let component = LivestreamComponent::new();
        let screen = livestream_screen(Screen::LivestreamStreamer);

        let mut state = AppState::default();
        terminal
            .draw(|f| component.view(&state, &screen, true, f, f.area()))
            .unwrap();
        let text = rendered(&terminal);
        assert!(text.contains("Broadcasting livestream:streamer"));
        assert!(text.contains("Joining call..."));

        state.livestream.update(LivestreamMsg::Joined(CallHandle::new(
            "livestream",
            "streamer",
        )));
        terminal
            .draw(|f| component.view(&state, &screen, false, f, f.area()))
            .unwrap();
        let text = rendered(&terminal);
        assert!(text.contains("Watching livestream:streamer"));
        assert!(text.contains("Live on livestream:streamer"));
    }
}
