use serde::{Deserialize, Serialize};

pub mod channels;
pub mod livestream;
pub mod rewards;
pub mod system;

use crate::core::navigator::NavCommand;
use channels::ChannelsMsg;
use livestream::LivestreamMsg;
use rewards::RewardsMsg;
use system::SystemMsg;

/// Domain messages representing application intent
/// These are processed by the update function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Msg {
    // System operations (delegated to SystemState)
    System(SystemMsg),

    // Back stack requests dispatched through a Navigator (delegated to NavState)
    Nav(NavCommand),

    // Channel list (delegated to ChannelsState)
    Channels(ChannelsMsg),

    // Video call lifecycle (delegated to LivestreamState)
    Livestream(LivestreamMsg),

    // Channel point rewards (delegated to RewardsState)
    Rewards(RewardsMsg),
}

impl Msg {
    /// Helper to exclude frequent messages during debugging
    pub fn is_frequent(&self) -> bool {
        match self {
            Msg::System(msg) => msg.is_frequent(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msg_frequent_detection() {
        assert!(!Msg::System(SystemMsg::Quit).is_frequent());
        assert!(Msg::System(SystemMsg::Resize(1, 1)).is_frequent());
        assert!(!Msg::Nav(NavCommand::NavigateUp).is_frequent());
    }

    #[test]
    fn test_msg_equality() {
        assert_eq!(Msg::Nav(NavCommand::NavigateUp), Msg::Nav(NavCommand::NavigateUp));
        assert_ne!(
            Msg::Rewards(RewardsMsg::TogglePanel),
            Msg::Channels(ChannelsMsg::SelectNext)
        );
    }

    #[test]
    fn test_msg_serialization() {
        let msg = Msg::System(SystemMsg::UpdateStatusMessage("test".to_string()));
        let serialized = serde_json::to_string(&msg).unwrap();
        let deserialized: Msg = serde_json::from_str(&serialized).unwrap();
        assert_eq!(msg, deserialized);
    }
}
