//! Binds back-stack entries to the view-models of their screen
//!
//! The composer matches every destination exhaustively. Arguments are read
//! from the resolved route of the entry; an entry whose route lacks a
//! required argument composes to nothing. View-models come from the
//! [`ViewModelFactory`] the composer is built with.

use std::sync::Arc;

use crate::{
    core::state::BackStackEntry,
    domain::screen::{Screen, CHANNEL_ID},
    presentation::view_models::{
        ChannelListViewModel, ClientViewModels, LivestreamViewModel, MessageComposerViewModel,
        MessageListViewModel, MessagesViewModelFactory, ViewModelFactory,
    },
};

/// Message list and composer of one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagesScreen {
    pub channel_id: String,
    pub list: MessageListViewModel,
    pub composer: MessageComposerViewModel,
}

impl MessagesScreen {
    fn new(factory: &MessagesViewModelFactory) -> Self {
        Self {
            channel_id: factory.channel_id.clone(),
            list: factory.list_view_model(),
            composer: factory.composer_view_model(),
        }
    }
}

/// Video call plus the chat of the channel it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivestreamScreen {
    pub messages: MessagesScreen,
    pub livestream: LivestreamViewModel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposedScreen {
    Channels(ChannelListViewModel),
    Messages(MessagesScreen),
    LivestreamWatcher(LivestreamScreen),
    LivestreamStreamer(LivestreamScreen),
}

impl ComposedScreen {
    pub fn screen(&self) -> Screen {
        match self {
            ComposedScreen::Channels(_) => Screen::Channels,
            ComposedScreen::Messages(_) => Screen::Messages,
            ComposedScreen::LivestreamWatcher(_) => Screen::LivestreamWatcher,
            ComposedScreen::LivestreamStreamer(_) => Screen::LivestreamStreamer,
        }
    }

    /// Channel the screen is bound to, if any.
    pub fn channel_id(&self) -> Option<&str> {
        match self {
            ComposedScreen::Channels(_) => None,
            ComposedScreen::Messages(messages) => Some(&messages.channel_id),
            ComposedScreen::LivestreamWatcher(live) | ComposedScreen::LivestreamStreamer(live) => {
                Some(&live.messages.channel_id)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScreenComposer {
    view_models: Arc<dyn ViewModelFactory>,
}

impl Default for ScreenComposer {
    fn default() -> Self {
        Self::new(Arc::new(ClientViewModels))
    }
}

impl ScreenComposer {
    pub fn new(view_models: Arc<dyn ViewModelFactory>) -> Self {
        Self { view_models }
    }

    /// Builds the screen for `entry`, or `None` when its route is missing an
    /// argument the screen needs.
    pub fn compose(&self, entry: &BackStackEntry) -> Option<ComposedScreen> {
        let screen = entry.screen();
        let composed = match screen {
            Screen::Channels => ComposedScreen::Channels(self.view_models.channel_list()),
            Screen::Messages => {
                let channel_id = self.channel_id(entry)?;
                ComposedScreen::Messages(MessagesScreen::new(&self.view_models.messages(channel_id)))
            }
            Screen::LivestreamWatcher => {
                ComposedScreen::LivestreamWatcher(self.livestream(entry)?)
            }
            Screen::LivestreamStreamer => {
                ComposedScreen::LivestreamStreamer(self.livestream(entry)?)
            }
        };
        Some(composed)
    }

    fn channel_id<'a>(&self, entry: &'a BackStackEntry) -> Option<&'a str> {
        let channel_id = entry.route.arg(CHANNEL_ID);
        if channel_id.is_none() {
            log::warn!(
                "Composer: {} (entry {}) has no {CHANNEL_ID} argument",
                entry.route.path(),
                entry.id
            );
        }
        channel_id
    }

    fn livestream(&self, entry: &BackStackEntry) -> Option<LivestreamScreen> {
        let channel_id = self.channel_id(entry)?;
        Some(LivestreamScreen {
            messages: MessagesScreen::new(&self.view_models.messages(channel_id)),
            livestream: self.view_models.livestream(channel_id),
        })
    }
}
