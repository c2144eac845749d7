use serde::{Deserialize, Serialize};

use crate::domain::reward::Reward;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardsMsg {
    Loaded(Vec<Reward>),
    LoadFailed(String),
    TogglePanel,
}
