//! Core Elm Architecture implementation
//!
//! This module contains the core components of the Elm architecture:
//! - Messages and raw messages
//! - Application state management, including the navigation engine
//! - Update logic and command execution
//! - The injectable navigator handle

pub mod cmd;
pub mod cmd_executor;
pub mod msg;
pub mod navigator;
pub mod raw_msg;
pub mod state;
pub mod translator;
pub mod update;
