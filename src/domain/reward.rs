use std::ops::Range;

use serde::{Deserialize, Serialize};
use thousands::Separable;

/// A channel point reward viewers can redeem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub name: String,
    /// Background colour as `#RRGGBB`.
    pub color: String,
    pub icon: String,
    pub token_amount: u32,
}

impl Reward {
    pub fn formatted_amount(&self) -> String {
        self.token_amount.separate_with_commas()
    }

    /// Parses [`Reward::color`]; `None` when it is not a `#RRGGBB` value.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |range: Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
        Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}
