//! Domain logic
//!
//! This module contains the navigation model and the data the screens show:
//! - Destinations, route building and transition policy
//! - Livestream channels and channel point rewards

pub mod channel;
pub mod reward;
pub mod route;
pub mod screen;
pub mod transition;
