//! Screen components
//!
//! Components are stateless renderers that receive state as parameters. The
//! screen shown in the body is whatever the composer builds for the top of
//! the back stack.

use ratatui::{prelude::*, widgets::*};

use crate::{
    core::{
        msg::{system::SystemMsg, Msg},
        navigator::Navigator,
        state::AppState,
    },
    presentation::{
        composer::{ComposedScreen, ScreenComposer},
        config::Action,
        transition::Slide,
    },
};

pub mod channels;
pub mod livestream;
pub mod messages;
pub mod status_bar;

pub use channels::ChannelsComponent;
pub use livestream::LivestreamComponent;
pub use messages::MessagesComponent;
pub use status_bar::StatusBarComponent;

/// Collection of all components
#[derive(Debug, Clone, Default)]
pub struct Components {
    pub composer: ScreenComposer,
    pub channels: ChannelsComponent,
    pub messages: MessagesComponent,
    pub livestream: LivestreamComponent,
    pub status_bar: StatusBarComponent,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Components whose screens are built by `composer`.
    pub fn with_composer(composer: ScreenComposer) -> Self {
        Self {
            composer,
            ..Self::default()
        }
    }

    /// Screen bound to the top of the back stack.
    pub fn current_screen(&self, state: &AppState) -> Option<ComposedScreen> {
        state
            .nav
            .current_entry()
            .and_then(|entry| self.composer.compose(entry))
    }

    /// Main rendering entry point; `slide` is the enter animation being played.
    pub fn render(&self, frame: &mut Frame, state: &AppState, slide: Option<Slide>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Body
                Constraint::Length(2), // Status bar
            ])
            .split(frame.area());

        let body = slide.map_or(layout[0], |slide| slide.area(layout[0]));
        if body != layout[0] {
            frame.render_widget(Clear, layout[0]);
        }
        if body.width > 0 {
            match self.current_screen(state) {
                Some(screen) => self.view_screen(&screen, state, frame, body),
                None => frame.render_widget(Clear, body),
            }
        }

        self.status_bar.view(state, frame, layout[1]);
    }

    fn view_screen(&self, screen: &ComposedScreen, state: &AppState, frame: &mut Frame, area: Rect) {
        match screen {
            ComposedScreen::Channels(view_model) => {
                self.channels.view(state, view_model, frame, area)
            }
            ComposedScreen::Messages(messages) => self.messages.view(state, messages, frame, area),
            ComposedScreen::LivestreamWatcher(live) => {
                self.livestream.view(state, live, false, frame, area)
            }
            ComposedScreen::LivestreamStreamer(live) => {
                self.livestream.view(state, live, true, frame, area)
            }
        }
    }

    /// Routes a keybinding action to the visible screen.
    ///
    /// Quitting and navigating up work on every screen.
    pub fn handle_action(
        &self,
        action: Action,
        state: &AppState,
        navigator: &dyn Navigator,
    ) -> Vec<Msg> {
        match action {
            Action::Quit => return vec![Msg::System(SystemMsg::Quit)],
            Action::NavigateUp => {
                navigator.navigate_up();
                return vec![Msg::System(SystemMsg::ClearStatusMessage)];
            }
            _ => {}
        }

        match self.current_screen(state) {
            Some(ComposedScreen::Channels(_)) => {
                self.channels.handle_action(action, state, navigator)
            }
            Some(ComposedScreen::Messages(messages)) => {
                self.messages.handle_action(action, &messages, navigator)
            }
            Some(
                ComposedScreen::LivestreamWatcher(live) | ComposedScreen::LivestreamStreamer(live),
            ) => self.livestream.handle_action(action, &live, navigator),
            None => vec![],
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
            msg::rewards::RewardsMsg,
            navigator::{AppNavigator, NavCommand},
        },
        domain::{
            screen::Screen,
            transition::{Animation, SlideDirection},
        },
    };

    fn at(screen: Screen) -> AppState {
        AppState::default().with_start_route(screen.create_route("livestream:a").unwrap())
    }

    #[test]
    fn test_navigate_up_is_global() {
        let (navigator, mut host) = AppNavigator::new();
        Components::new().handle_action(
            Action::NavigateUp,
            &at(Screen::LivestreamWatcher),
            &navigator,
        );
        assert_eq!(host.drain(), vec![NavCommand::NavigateUp]);
    }

    #[test]
    fn test_quit_is_global() {
        let (navigator, _host) = AppNavigator::new();
        let msgs = Components::new().handle_action(Action::Quit, &at(Screen::Messages), &navigator);
        assert_eq!(msgs, vec![Msg::System(SystemMsg::Quit)]);
    }

    #[test]
    fn test_actions_go_to_visible_screen() {
        let (navigator, _host) = AppNavigator::new();
        let components = Components::new();

        let msgs = components.handle_action(Action::ToggleRewards, &at(Screen::Messages), &navigator);
        assert_eq!(msgs, vec![Msg::Rewards(RewardsMsg::TogglePanel)]);

        // The channel list has no rewards panel.
        let msgs = components.handle_action(Action::ToggleRewards, &AppState::default(), &navigator);
        assert!(msgs.is_empty());
    }

    #[test]
    fn test_render_composes_top_entry() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let state = at(Screen::LivestreamStreamer);

        terminal
            .draw(|f| Components::new().render(f, &state, None))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Broadcasting livestream:streamer"));
        assert!(text.contains("channels > livestream_host/livestream:a"));
    }

    #[test]
    fn test_render_slide_clips_body() {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        let state = at(Screen::Messages);
        let slide = Slide {
            animation: Animation::SlideIn(SlideDirection::Left),
            progress: 0.5,
        };

        terminal
            .draw(|f| Components::new().render(f, &state, Some(slide)))
            .unwrap();

        let buffer = terminal.backend().buffer();
        // Left half of the body is still empty, the chat border starts halfway.
        assert_eq!(buffer[(0, 0)].symbol(), " ");
        assert_eq!(buffer[(20, 0)].symbol(), "┌");
    }
}
