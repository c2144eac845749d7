//! Presentation layer
//!
//! This module contains UI components and widgets:
//! - The screen composer binding back-stack entries to view-models
//! - Stateless screen components and reusable widgets
//! - Keybinding configuration

pub mod components;
pub mod composer;
pub mod config;
pub mod transition;
pub mod view_models;
pub mod widgets;
