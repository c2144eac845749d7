use std::{collections::VecDeque, sync::Arc};

use tokio::sync::mpsc;

use crate::{
    core::{
        cmd::Cmd,
        cmd_executor::{CmdExecutor, Services},
        msg::Msg,
        navigator::{AppNavigator, NavigatorHost},
        raw_msg::RawMsg,
        state::AppState,
        translator::{translate_raw_to_domain, TranslateContext},
        update::{init, update},
    },
    presentation::{
        components::Components, composer::ScreenComposer, view_models::ViewModelFactory,
    },
};

/// Drives the Elm loop: raw events in, state transitions, commands out.
///
/// The runtime also hosts the navigation engine. Commands dispatched through
/// [`AppNavigator`] handles are folded into the message stream as
/// [`Msg::Nav`], and the resulting route is published back to the handles.
pub struct Runtime {
    state: AppState,
    msg_queue: VecDeque<Msg>,
    raw_msg_queue: VecDeque<RawMsg>,
    cmd_queue: VecDeque<Cmd>,
    msg_tx: mpsc::UnboundedSender<Msg>,
    msg_rx: mpsc::UnboundedReceiver<Msg>,
    navigator: AppNavigator,
    nav_host: NavigatorHost,
    components: Components,
    cmd_executor: Option<CmdExecutor>,
}

impl Runtime {
    /// Create a runtime without side effects; commands are only queued.
    pub fn new(initial_state: AppState) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (navigator, nav_host) = AppNavigator::new();
        nav_host.publish(initial_state.current_route().cloned());

        Self {
            state: initial_state,
            msg_queue: VecDeque::new(),
            raw_msg_queue: VecDeque::new(),
            cmd_queue: VecDeque::new(),
            msg_tx,
            msg_rx,
            navigator,
            nav_host,
            components: Components::new(),
            cmd_executor: None,
        }
    }

    /// Create a runtime whose commands run against `services`.
    pub fn new_with_executor(initial_state: AppState, services: Services) -> Self {
        let mut runtime = Self::new(initial_state);
        runtime.cmd_executor = Some(CmdExecutor::new(
            runtime.msg_tx.clone(),
            runtime.navigator.clone(),
            services,
        ));
        runtime
    }

    /// Builds the screens from `view_models` instead of the client defaults.
    pub fn with_view_models(mut self, view_models: Arc<dyn ViewModelFactory>) -> Self {
        self.components = Components::with_composer(ScreenComposer::new(view_models));
        self
    }

    /// Add render request sender for orchestrated rendering in AppRunner
    pub fn add_render_request_sender(
        &mut self,
        render_sender: mpsc::UnboundedSender<()>,
    ) -> Result<(), String> {
        match &mut self.cmd_executor {
            Some(executor) => {
                executor.set_render_request_sender(render_sender);
                Ok(())
            }
            None => Err("No executor available. Use new_with_executor() first.".to_string()),
        }
    }

    /// Queues the startup commands for the initial route.
    pub fn init(&mut self) -> Vec<Cmd> {
        let commands = init(&mut self.state);
        self.cmd_queue.extend(commands.iter().cloned());
        commands
    }

    /// Get sender for message transmission
    pub fn get_sender(&self) -> mpsc::UnboundedSender<Msg> {
        self.msg_tx.clone()
    }

    /// Navigator handle bound to this runtime.
    pub fn navigator(&self) -> AppNavigator {
        self.navigator.clone()
    }

    pub fn components(&self) -> &Components {
        &self.components
    }

    /// Get current state (read-only)
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Send message directly (for testing)
    pub fn send_msg(&mut self, msg: Msg) {
        self.msg_queue.push_back(msg);
    }

    /// Send raw message (for integration with external systems)
    pub fn send_raw_msg(&mut self, raw_msg: RawMsg) {
        self.raw_msg_queue.push_back(raw_msg);
    }

    /// Get pending commands
    pub fn pending_commands(&mut self) -> Vec<Cmd> {
        self.cmd_queue.drain(..).collect()
    }

    /// Execute all pending commands using the command executor
    pub fn execute_pending_commands(&mut self) -> Result<Vec<String>, String> {
        let commands = self.pending_commands();
        let Some(executor) = &self.cmd_executor else {
            return Err(
                "No command executor available. Use new_with_executor() to configure.".to_string(),
            );
        };
        if commands.is_empty() {
            return Ok(vec![]);
        }

        executor
            .execute_commands(&commands)
            .map_err(|e| format!("Command execution failed: {e}"))
    }

    /// Process a single message
    pub fn process_message(&mut self, msg: Msg) -> Vec<Cmd> {
        if !msg.is_frequent() {
            log::debug!("Runtime: {msg:?}");
        }
        let (new_state, commands) = update(msg, self.state.clone());
        self.state = new_state;

        self.cmd_queue.extend(commands.iter().cloned());
        commands
    }

    /// Process all messages in queue
    ///
    /// Each raw event is translated against the state left by the previous
    /// one. Navigation dispatched while handling a message is applied in the
    /// same call, so the published route is current when this returns.
    pub fn process_all_messages(&mut self) -> Vec<Cmd> {
        let mut all_commands = Vec::new();

        while let Some(raw_msg) = self.raw_msg_queue.pop_front() {
            let ctx = TranslateContext {
                components: &self.components,
                navigator: &self.navigator,
            };
            let domain_msgs = translate_raw_to_domain(raw_msg, &self.state, &ctx);
            self.msg_queue.extend(domain_msgs);
            all_commands.extend(self.drain_messages());
        }

        all_commands.extend(self.drain_messages());
        all_commands
    }

    /// Processes queued, navigation and external messages until none is left.
    fn drain_messages(&mut self) -> Vec<Cmd> {
        let mut all_commands = Vec::new();

        loop {
            // Navigation requests, in dispatch order
            self.msg_queue
                .extend(self.nav_host.drain().into_iter().map(Msg::Nav));

            // Process domain messages from external sources
            while let Ok(msg) = self.msg_rx.try_recv() {
                self.msg_queue.push_back(msg);
            }

            if self.msg_queue.is_empty() {
                break;
            }

            while let Some(msg) = self.msg_queue.pop_front() {
                let commands = self.process_message(msg);
                all_commands.extend(commands);
            }
        }

        self.nav_host.publish(self.state.current_route().cloned());
        all_commands
    }

    /// Process all messages and execute commands in one step
    pub fn run_update_cycle(&mut self) -> Result<Vec<String>, String> {
        self.process_all_messages();
        if self.cmd_executor.is_none() {
            return Ok(vec![]);
        }
        self.execute_pending_commands()
    }
}
