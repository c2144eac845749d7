use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};

use crate::domain::{route::ResolvedRoute, screen::Screen};

/// Pop entries off the back stack down to the most recent entry of `screen`
/// before pushing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopUpTo {
    pub screen: Screen,
    pub inclusive: bool,
}

/// Flags attached to a forward navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavOptions {
    pub pop_up_to: Option<PopUpTo>,
    /// Skip the push when the top entry already shows the same route.
    pub launch_single_top: bool,
}

impl NavOptions {
    pub fn single_top() -> Self {
        Self {
            launch_single_top: true,
            ..Default::default()
        }
    }

    pub fn pop_up_to(screen: Screen, inclusive: bool) -> Self {
        Self {
            pop_up_to: Some(PopUpTo { screen, inclusive }),
            ..Default::default()
        }
    }
}

/// A request against the back stack, consumed by the navigation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavCommand {
    NavigateTo {
        route: ResolvedRoute,
        options: NavOptions,
    },
    NavigateUp,
}

/// Handle screens use to move between destinations.
///
/// Implementations only dispatch requests; the back stack itself belongs to
/// the navigation engine.
pub trait Navigator {
    fn navigate(&self, route: ResolvedRoute, options: NavOptions);

    /// Pops the most recent entry. Does nothing when only the root is left.
    fn navigate_up(&self);

    fn current_route(&self) -> Option<ResolvedRoute>;

    /// Replaces the current entry with `route`.
    fn replace(&self, route: ResolvedRoute) {
        let options = match self.current_route() {
            Some(current) => NavOptions::pop_up_to(current.screen(), true),
            None => NavOptions::default(),
        };
        self.navigate(route, options);
    }
}

/// Engine side of an [`AppNavigator`]: receives its commands and publishes
/// the active route back to it.
pub struct NavigatorHost {
    pub commands: mpsc::UnboundedReceiver<NavCommand>,
    pub current: watch::Sender<Option<ResolvedRoute>>,
}

impl NavigatorHost {
    /// Takes every command dispatched since the last call, oldest first.
    pub fn drain(&mut self) -> Vec<NavCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = self.commands.try_recv() {
            commands.push(command);
        }
        commands
    }

    pub fn publish(&self, route: Option<ResolvedRoute>) {
        self.current.send_if_modified(|current| {
            if *current == route {
                false
            } else {
                *current = route;
                true
            }
        });
    }
}

/// Channel-backed [`Navigator`] injected into screens and command executors.
#[derive(Debug, Clone)]
pub struct AppNavigator {
    commands: mpsc::UnboundedSender<NavCommand>,
    current: watch::Receiver<Option<ResolvedRoute>>,
}

impl AppNavigator {
    pub fn new() -> (Self, NavigatorHost) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (current_tx, current_rx) = watch::channel(None);
        (
            Self {
                commands: command_tx,
                current: current_rx,
            },
            NavigatorHost {
                commands: command_rx,
                current: current_tx,
            },
        )
    }

    fn dispatch(&self, command: NavCommand) {
        log::debug!("Navigator: dispatching {command:?}");
        if let Err(e) = self.commands.send(command) {
            log::warn!("Navigator: navigation engine is gone, dropping {:?}", e.0);
        }
    }
}

impl Navigator for AppNavigator {
    fn navigate(&self, route: ResolvedRoute, options: NavOptions) {
        self.dispatch(NavCommand::NavigateTo { route, options });
    }

    fn navigate_up(&self) {
        self.dispatch(NavCommand::NavigateUp);
    }

    fn current_route(&self) -> Option<ResolvedRoute> {
        self.current.borrow().clone()
    }
}
