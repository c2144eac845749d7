//! Messages component
//!
//! Chat of a single channel, with the rewards panel on the right when open.
//! The message list itself is drawn by the chat client; this component only
//! shows which view-models are bound.

use ratatui::{prelude::*, widgets::*};

use crate::{
    core::{
        msg::{rewards::RewardsMsg, system::SystemMsg, Msg},
        navigator::{NavOptions, Navigator},
        state::AppState,
    },
    domain::screen::Screen,
    presentation::{
        composer::MessagesScreen, config::Action, widgets::reward_list::RewardListWidget,
    },
};

const REWARDS_PANEL_WIDTH: u16 = 32;

#[derive(Debug, Clone, Default)]
pub struct MessagesComponent;

impl MessagesComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, state: &AppState, screen: &MessagesScreen, frame: &mut Frame, area: Rect) {
        let chat_area = self.rewards_panel(state, &screen.channel_id, frame, area);
        self.chat(screen, frame, chat_area);
    }

    /// Draws the chat placeholder of `screen` into `area`.
    pub fn chat(&self, screen: &MessagesScreen, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let list = &screen.list;
        let mut lines = vec![Line::from(format!("Messages of {}", list.channel_id))];
        if list.show_system_messages {
            lines.push(Line::styled(
                "System messages shown",
                Style::default().fg(Color::Gray),
            ));
        }
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Chat")),
            chunks[0],
        );

        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("Send a message to {}", screen.composer.channel_id),
                Style::default().fg(Color::DarkGray).italic(),
            ))
            .block(Block::default().borders(Borders::ALL)),
            chunks[1],
        );
    }

    /// Draws the rewards panel when it is open and returns the area left for the chat.
    pub fn rewards_panel(
        &self,
        state: &AppState,
        channel_id: &str,
        frame: &mut Frame,
        area: Rect,
    ) -> Rect {
        if !state.rewards.show_panel {
            return area;
        }
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(REWARDS_PANEL_WIDTH)])
            .split(area);

        let points_name = state
            .channels
            .channels
            .iter()
            .find(|channel| channel.cid() == channel_id)
            .and_then(|channel| channel.extras.points_name.as_deref());
        frame.render_widget(RewardListWidget::new(&state.rewards, points_name), chunks[1]);
        chunks[0]
    }

    pub fn handle_action(
        &self,
        action: Action,
        screen: &MessagesScreen,
        navigator: &dyn Navigator,
    ) -> Vec<Msg> {
        match action {
            Action::ToggleRewards => vec![Msg::Rewards(RewardsMsg::TogglePanel)],
            Action::WatchLivestream => {
                match Screen::LivestreamWatcher.create_route(&screen.channel_id) {
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
            navigator::{AppNavigator, NavCommand},
            state::BackStackEntry,
        },
        presentation::composer::{ComposedScreen, ScreenComposer},
    };

    fn messages_screen(channel_id: &str) -> MessagesScreen {
        let entry = BackStackEntry {
            id: 1,
            route: Screen::Messages.create_route(channel_id).unwrap(),
        };
        match ScreenComposer::default().compose(&entry) {
            Some(ComposedScreen::Messages(screen)) => screen,
            other => panic!("expected the messages screen, got {other:?}"),
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
    fn test_toggle_rewards() {
        let (navigator, mut host) = AppNavigator::new();
        let msgs = MessagesComponent::new().handle_action(
            Action::ToggleRewards,
            &messages_screen("livestream:a"),
            &navigator,
        );
        assert_eq!(msgs, vec![Msg::Rewards(RewardsMsg::TogglePanel)]);
        assert!(host.drain().is_empty());
    }

    #[test]
    fn test_watch_from_messages_opens_same_channel() {
        let (navigator, mut host) = AppNavigator::new();
        MessagesComponent::new().handle_action(
            Action::WatchLivestream,
            &messages_screen("livestream:a"),
            &navigator,
        );
        assert_eq!(
            host.drain(),
            vec![NavCommand::NavigateTo {
                route: Screen::LivestreamWatcher
                    .create_route("livestream:a")
                    .unwrap(),
                options: NavOptions::single_top(),
            }]
        );
    }

    #[test]
    fn test_view_with_and_without_rewards_panel() {
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        let component = MessagesComponent::new();
        let screen = messages_screen("livestream:a");

        let mut state = AppState::default();
        terminal
            .draw(|f| component.view(&state, &screen, f, f.area()))
            .unwrap();
        let text = rendered(&terminal);
        assert!(text.contains("Messages of livestream:a"));
        assert!(!text.contains("Rewards"));

        state.rewards.show_panel = true;
        state.rewards.is_loading = true;
        terminal
            .draw(|f| component.view(&state, &screen, f, f.area()))
            .unwrap();
        assert!(rendered(&terminal).contains("Loading rewards..."));
    }
}
