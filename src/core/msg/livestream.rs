use serde::{Deserialize, Serialize};

use crate::infrastructure::video::CallHandle;

/// Results of the video client reported back to the livestream screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LivestreamMsg {
    Joined(CallHandle),
    JoinFailed(String),
    Left,
}
