use crate::{
    core::{
        cmd::Cmd,
        navigator::{NavCommand, NavOptions},
    },
    domain::{
        route::{build_route, ResolvedRoute, RouteParams},
        screen::Screen,
        transition::{NavDirection, TransitionPolicy},
    },
};

/// One entry of the back stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackStackEntry {
    pub id: u64,
    pub route: ResolvedRoute,
}

impl BackStackEntry {
    pub fn screen(&self) -> Screen {
        self.route.screen()
    }
}

/// A change of the visible destination, with the animation to play for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEvent {
    pub from: Option<ResolvedRoute>,
    pub to: ResolvedRoute,
    pub direction: NavDirection,
    /// `None` when the responsible screen uses the default (unanimated) transition.
    pub policy: Option<TransitionPolicy>,
}

/// Navigation engine state: the back stack, most recent entry last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    back_stack: Vec<BackStackEntry>,
    next_id: u64,
    last_transition: Option<TransitionEvent>,
    transition_count: u64,
}

impl Default for NavState {
    fn default() -> Self {
        let start = build_route(Screen::Channels, &RouteParams::new())
            .unwrap_or_else(|e| unreachable!("channels route takes no arguments: {e}"));
        Self::new(start)
    }
}

impl NavState {
    pub fn new(start: ResolvedRoute) -> Self {
        Self {
            back_stack: vec![BackStackEntry {
                id: 0,
                route: start,
            }],
            next_id: 1,
            last_transition: None,
            transition_count: 0,
        }
    }

    pub fn back_stack(&self) -> &[BackStackEntry] {
        &self.back_stack
    }

    pub fn depth(&self) -> usize {
        self.back_stack.len()
    }

    pub fn current_entry(&self) -> Option<&BackStackEntry> {
        self.back_stack.last()
    }

    pub fn current_route(&self) -> Option<&ResolvedRoute> {
        self.current_entry().map(|entry| &entry.route)
    }

    pub fn current_screen(&self) -> Option<Screen> {
        self.current_entry().map(BackStackEntry::screen)
    }

    pub fn can_navigate_up(&self) -> bool {
        self.back_stack.len() > 1
    }

    pub fn last_transition(&self) -> Option<&TransitionEvent> {
        self.last_transition.as_ref()
    }

    /// Number of transitions applied so far.
    pub fn transition_count(&self) -> u64 {
        self.transition_count
    }

    pub fn update(&mut self, command: NavCommand) -> Vec<Cmd> {
        match self.apply(command) {
            Some(_) => vec![Cmd::RequestRender],
            None => vec![],
        }
    }

    /// Applies a command to the back stack.
    ///
    /// Returns the transition that happened, or `None` when the stack is unchanged.
    pub fn apply(&mut self, command: NavCommand) -> Option<TransitionEvent> {
        let event = match command {
            NavCommand::NavigateTo { route, options } => self.push(route, options),
            NavCommand::NavigateUp => self.pop(),
        };
        if let Some(event) = &event {
            log::info!(
                "Navigation: {} -> {} ({:?})",
                event
                    .from
                    .as_ref()
                    .map(ResolvedRoute::path)
                    .unwrap_or("<none>"),
                event.to.path(),
                event.direction
            );
            self.last_transition = Some(event.clone());
            self.transition_count += 1;
        }
        event
    }

    fn push(&mut self, route: ResolvedRoute, options: NavOptions) -> Option<TransitionEvent> {
        let from = self.current_route().cloned();
        let depth_before = self.back_stack.len();

        if let Some(pop_up_to) = options.pop_up_to {
            if let Some(index) = self
                .back_stack
                .iter()
                .rposition(|entry| entry.screen() == pop_up_to.screen)
            {
                let keep = if pop_up_to.inclusive { index } else { index + 1 };
                self.back_stack.truncate(keep);
            } else {
                log::debug!(
                    "Navigation: pop_up_to {} is not on the back stack",
                    pop_up_to.screen
                );
            }
        }

        let same_top = self
            .current_route()
            .is_some_and(|top| top.path() == route.path());
        if options.launch_single_top && same_top {
            log::debug!("Navigation: {} is already on top", route.path());
            let popped_any = self.back_stack.len() != depth_before;
            return if !popped_any && from.as_ref() == Some(&route) {
                None
            } else {
                Some(TransitionEvent {
                    from,
                    policy: route.screen().transition(),
                    to: route,
                    direction: NavDirection::Push,
                })
            };
        }

        let id = self.next_id;
        self.next_id += 1;
        self.back_stack.push(BackStackEntry {
            id,
            route: route.clone(),
        });

        Some(TransitionEvent {
            from,
            policy: route.screen().transition(),
            to: route,
            direction: NavDirection::Push,
        })
    }

    fn pop(&mut self) -> Option<TransitionEvent> {
        if !self.can_navigate_up() {
            log::debug!("Navigation: already at the root, ignoring navigate up");
            return None;
        }
        let popped = self.back_stack.pop()?;
        let to = self.current_route()?.clone();
        Some(TransitionEvent {
            policy: popped.screen().transition(),
            from: Some(popped.route),
            to,
            direction: NavDirection::Pop,
        })
    }
}
