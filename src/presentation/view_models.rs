//! View-model descriptors bound to screens by the composer
//!
//! These carry the parameters the chat and video clients need to back a
//! screen. They hold no client state of their own.

use std::fmt;

use crate::{
    domain::channel::STREAMER_CHANNEL_ID,
    infrastructure::{chat::ChannelQuery, video::LIVESTREAM_CALL_TYPE},
};

/// Source of the view-models the composer binds to screens.
pub trait ViewModelFactory: fmt::Debug + Send + Sync {
    fn channel_list(&self) -> ChannelListViewModel;

    fn messages(&self, channel_id: &str) -> MessagesViewModelFactory;

    fn livestream(&self, channel_id: &str) -> LivestreamViewModel;
}

/// View-models for the chat and video clients the app ships with.
///
/// Every livestream screen joins the streamer's call whatever its channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientViewModels;

impl ViewModelFactory for ClientViewModels {
    fn channel_list(&self) -> ChannelListViewModel {
        ChannelListViewModel::default()
    }

    fn messages(&self, channel_id: &str) -> MessagesViewModelFactory {
        MessagesViewModelFactory::new(channel_id)
    }

    fn livestream(&self, _channel_id: &str) -> LivestreamViewModel {
        LivestreamViewModel::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelListViewModel {
    pub query: ChannelQuery,
}

impl Default for ChannelListViewModel {
    fn default() -> Self {
        Self {
            query: ChannelQuery::livestreams(),
        }
    }
}

/// Builds the message list and composer view-models of one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagesViewModelFactory {
    pub channel_id: String,
    pub show_date_separator_in_empty_thread: bool,
    pub show_system_messages: bool,
}

impl MessagesViewModelFactory {
    pub fn new(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            show_date_separator_in_empty_thread: false,
            show_system_messages: false,
        }
    }

    pub fn list_view_model(&self) -> MessageListViewModel {
        MessageListViewModel {
            channel_id: self.channel_id.clone(),
            show_date_separator_in_empty_thread: self.show_date_separator_in_empty_thread,
            show_system_messages: self.show_system_messages,
        }
    }

    pub fn composer_view_model(&self) -> MessageComposerViewModel {
        MessageComposerViewModel {
            channel_id: self.channel_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageListViewModel {
    pub channel_id: String,
    pub show_date_separator_in_empty_thread: bool,
    pub show_system_messages: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageComposerViewModel {
    pub channel_id: String,
}

/// Video call joined by the livestream screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivestreamViewModel {
    pub call_type: String,
    pub call_id: String,
}

impl Default for LivestreamViewModel {
    fn default() -> Self {
        Self {
            call_type: LIVESTREAM_CALL_TYPE.to_string(),
            call_id: STREAMER_CHANNEL_ID.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_messages_factory_defaults() {
        let factory = MessagesViewModelFactory::new("livestream:abc");
        let list = factory.list_view_model();
        assert_eq!(list.channel_id, "livestream:abc");
        assert!(!list.show_date_separator_in_empty_thread);
        assert!(!list.show_system_messages);
        assert_eq!(factory.composer_view_model().channel_id, "livestream:abc");
    }

    #[test]
    fn test_client_view_models_join_streamer_call() {
        let live = ClientViewModels.livestream("livestream:livestream1");
        assert_eq!(live.call_type, "livestream");
        assert_eq!(live.call_id, "streamer");
    }
}
