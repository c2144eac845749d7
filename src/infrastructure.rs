//! Infrastructure layer
//!
//! This module handles external integrations and services:
//! - TUI foundation
//! - CLI argument processing and configuration
//! - Chat and video client boundaries
//! - Rewards service and local cache

pub mod chat;
pub mod cli;
pub mod config;
pub mod rewards;
pub mod tui;
pub mod video;
