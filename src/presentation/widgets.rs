//! Reusable UI widgets

pub mod channel_list;
pub mod reward_list;
pub mod status_bar;
