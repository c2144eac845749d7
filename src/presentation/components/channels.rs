//! Channel list component
//!
//! Home screen listing live channels. Opening a channel or its stream goes
//! through the injected navigator.

use ratatui::{prelude::*, widgets::*};

use crate::{
    core::{
        msg::{channels::ChannelsMsg, system::SystemMsg, Msg},
        navigator::{NavOptions, Navigator},
        state::AppState,
    },
    domain::screen::Screen,
    presentation::{
        config::Action, view_models::ChannelListViewModel,
        widgets::channel_list::ChannelListWidget,
    },
};

#[derive(Debug, Clone, Default)]
pub struct ChannelsComponent;

impl ChannelsComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn view(
        &self,
        state: &AppState,
        view_model: &ChannelListViewModel,
        frame: &mut Frame,
        area: Rect,
    ) {
        let channels = &state.channels;
        if channels.is_loading && channels.channels.is_empty() {
            frame.render_widget(Paragraph::new("Loading channels..."), area);
            return;
        }
        if let Some(error) = &channels.error {
            let paragraph = Paragraph::new(format!("Failed to load channels: {error}"))
                .style(Style::default().fg(Color::Red));
            frame.render_widget(paragraph, area);
            return;
        }

        log::trace!(
            "Channels: rendering {} `{}` channels",
            channels.channels.len(),
            view_model.query.channel_type
        );
        frame.render_widget(
            ChannelListWidget::new(&channels.channels, channels.selected_index),
            area,
        );
    }

    pub fn handle_action(
        &self,
        action: Action,
        state: &AppState,
        navigator: &dyn Navigator,
    ) -> Vec<Msg> {
        match action {
            Action::SelectNext => vec![Msg::Channels(ChannelsMsg::SelectNext)],
            Action::SelectPrevious => vec![Msg::Channels(ChannelsMsg::SelectPrevious)],
            Action::GoLive => vec![
                Msg::System(SystemMsg::UpdateStatusMessage("Going live...".to_string())),
                Msg::Channels(ChannelsMsg::GoLive),
            ],
            Action::OpenMessages => self.open_selected(Screen::Messages, state, navigator),
            Action::WatchLivestream => {
                self.open_selected(Screen::LivestreamWatcher, state, navigator)
            }
            _ => vec![],
        }
    }

    fn open_selected(
        &self,
        screen: Screen,
        state: &AppState,
        navigator: &dyn Navigator,
    ) -> Vec<Msg> {
        let Some(channel) = state.channels.selected() else {
            return vec![Msg::System(SystemMsg::UpdateStatusMessage(
                "No channel selected".to_string(),
            ))];
        };
        match screen.create_route(&channel.cid()) {
            Ok(route) => {
                navigator.navigate(route, NavOptions::single_top());
                vec![Msg::System(SystemMsg::ClearStatusMessage)]
            }
            Err(e) => vec![Msg::System(SystemMsg::ShowError(e.to_string()))],
        }
    }
}
