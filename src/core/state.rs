pub mod channels;
pub mod livestream;
pub mod nav;
pub mod rewards;
pub mod system;

pub use channels::ChannelsState;
pub use livestream::{LivestreamState, LivestreamUiState};
pub use nav::{BackStackEntry, NavState, TransitionEvent};
pub use rewards::RewardsState;
pub use system::SystemState;

use crate::{
    core::navigator::NavCommand,
    domain::{route::ResolvedRoute, screen::Screen},
    infrastructure::config::Config,
};

/// Unified application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub nav: NavState,
    pub channels: ChannelsState,
    pub livestream: LivestreamState,
    pub rewards: RewardsState,
    pub system: SystemState,
    pub config: ConfigState,
}

/// Configuration state - holds all user-configurable settings
#[derive(Debug, Clone, Default)]
pub struct ConfigState {
    /// Current configuration loaded from file
    pub config: Config,
}

impl AppState {
    pub fn new_with_config(config: Config) -> Self {
        Self {
            config: ConfigState { config },
            ..Default::default()
        }
    }

    /// Opens the app at `route`, keeping the channel list underneath it.
    pub fn with_start_route(mut self, route: ResolvedRoute) -> Self {
        if route.screen() != Screen::Channels {
            self.nav.apply(NavCommand::NavigateTo {
                route,
                options: Default::default(),
            });
        }
        self
    }

    pub fn current_route(&self) -> Option<&ResolvedRoute> {
        self.nav.current_route()
    }
}
