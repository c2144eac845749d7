use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    core::{
        msg::{system::SystemMsg, Msg},
        navigator::Navigator,
        raw_msg::RawMsg,
        state::AppState,
    },
    presentation::components::Components,
};

/// What key handling needs besides the state: the screens that interpret
/// actions and the navigator they dispatch through.
pub struct TranslateContext<'a> {
    pub components: &'a Components,
    pub navigator: &'a dyn Navigator,
}

/// Translates raw external events into domain messages
///
/// Navigation requests raised by a key are dispatched through the navigator
/// in the context rather than returned as messages.
pub fn translate_raw_to_domain(raw: RawMsg, state: &AppState, ctx: &TranslateContext) -> Vec<Msg> {
    match raw {
        // System events - direct mapping
        RawMsg::Quit => vec![Msg::System(SystemMsg::Quit)],
        RawMsg::Resize(width, height) => vec![Msg::System(SystemMsg::Resize(width, height))],

        // User input - translate based on the visible screen and key bindings
        RawMsg::Key(key) => translate_key_event(key, state, ctx),

        RawMsg::SystemMessage(msg) => vec![Msg::System(SystemMsg::UpdateStatusMessage(msg))],
        RawMsg::Error(error) => vec![Msg::System(SystemMsg::ShowError(error))],

        // Ignore frequent system events in domain layer
        RawMsg::Tick | RawMsg::Render => vec![],
    }
}

fn translate_key_event(key: KeyEvent, state: &AppState, ctx: &TranslateContext) -> Vec<Msg> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }

    if let KeyEvent {
        code: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
        ..
    } = key
    {
        return vec![Msg::System(SystemMsg::Quit)];
    }

    match state.config.config.keybindings.action_for(&key) {
        Some(action) => {
            log::debug!("Key {key:?} -> {action}");
            ctx.components.handle_action(action, state, ctx.navigator)
        }
        None => vec![],
    }
}
