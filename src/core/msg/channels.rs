use serde::{Deserialize, Serialize};

use crate::domain::channel::Channel;

/// Messages for the channel list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChannelsMsg {
    Loaded(Vec<Channel>),
    LoadFailed(String),
    SelectNext,
    SelectPrevious,
    /// Create the broadcaster's channel and open the host screen
    GoLive,
    /// The broadcaster's channel exists and the host screen was requested
    WentLive(Channel),
}
