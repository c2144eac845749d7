//! # Twitch Clone TUI
//!
//! A terminal client for livestreams with chat, built around a typed
//! navigation core. This library implements an Elm-like architecture for
//! predictable state management.
//!
//! ## Architecture Overview
//!
//! - **Model** (`core::state`): Application state, including the back stack
//! - **Message** (`core::msg`): Events that can change the state
//! - **Update** (`core::update`): Pure functions that transform state
//! - **Command** (`core::cmd`): Side effects (chat, video, rewards)
//! - **View** (`presentation::components`): Rendering of the composed screen
//!
//! Screens never touch the back stack. They receive a
//! [`core::navigator::Navigator`] and dispatch requests through it; the
//! runtime applies them and plays the destination's transition.
//!
//! ## Example Usage
//!
//! ```rust
//! use twitchclone::{
//!     core::{msg::Msg, navigator::{NavCommand, NavOptions}, state::AppState, update::update},
//!     domain::screen::Screen,
//! };
//!
//! let route = Screen::Messages.create_route("livestream:streamer").unwrap();
//! let (state, _commands) = update(
//!     Msg::Nav(NavCommand::NavigateTo { route, options: NavOptions::single_top() }),
//!     AppState::default(),
//! );
//!
//! assert_eq!(state.nav.depth(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`domain`] - Screens, routes, transitions and the chat/rewards models
//! - [`core`] - Elm state machine and the navigator
//! - [`presentation`] - Screen composer, components and widgets
//! - [`infrastructure`] - Clients, configuration and the terminal
//! - [`integration`] - Runtime and app runner

#![deny(warnings)]

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod integration;
pub mod presentation;
pub mod utils;

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
