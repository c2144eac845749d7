//! Integration of the Elm runtime with the terminal
//!
//! - Runtime: message queues, update cycle and navigator wiring
//! - AppRunner: event loop driving a `TuiLike` backend

pub mod app_runner;
pub mod coalescer;
pub mod runtime;
