use std::{sync::Arc, time::Instant};

use color_eyre::eyre::Result;
use ratatui::prelude::Rect;
use tokio::sync::{mpsc, Mutex};

use crate::{
    core::{cmd_executor::Services, raw_msg::RawMsg, state::AppState},
    domain::route::ResolvedRoute,
    infrastructure::{
        config::Config,
        tui::{self, real::RealTui, TuiLike},
    },
    integration::{coalescer::Coalescer, runtime::Runtime},
    presentation::transition::ActiveTransition,
};

/// Drives the Elm runtime from terminal events and renders the visible
/// screen, playing the enter animation of every navigation.
pub struct AppRunner {
    runtime: Runtime,
    tui: Arc<Mutex<dyn TuiLike + Send>>,
    render_req_rx: mpsc::UnboundedReceiver<()>,
    pending_renders: usize,
    last_size: Option<(u16, u16)>,
    transition: Option<ActiveTransition>,
    seen_transitions: u64,
}

impl AppRunner {
    /// Runner on the real terminal, opened at `start_route` when given.
    pub fn new_with_real(
        config: Config,
        tui: RealTui,
        start_route: Option<ResolvedRoute>,
    ) -> Self {
        let services = Services::from_config(&config);
        Self::new_with_services(config, services, Arc::new(Mutex::new(tui)), start_route)
    }

    pub fn new_with_services(
        config: Config,
        services: Services,
        tui: Arc<Mutex<dyn TuiLike + Send>>,
        start_route: Option<ResolvedRoute>,
    ) -> Self {
        let mut state = AppState::new_with_config(config);
        if let Some(route) = start_route {
            state = state.with_start_route(route);
        }

        let mut runtime = Runtime::new_with_executor(state, services);
        let (render_req_tx, render_req_rx) = mpsc::unbounded_channel();
        if let Err(e) = runtime.add_render_request_sender(render_req_tx) {
            log::error!("AppRunner: {e}");
        }

        Self {
            runtime,
            tui,
            render_req_rx,
            pending_renders: 0,
            last_size: None,
            transition: None,
            seen_transitions: 0,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    pub fn transition(&self) -> Option<&ActiveTransition> {
        self.transition.as_ref()
    }

    /// Run the main loop until the state asks to quit or the event source
    /// closes.
    pub async fn run(&mut self) -> Result<()> {
        self.tui.lock().await.enter()?;
        self.runtime.init();
        self.seen_transitions = self.runtime.state().nav.transition_count();

        let result = self.run_loop().await;

        self.tui.lock().await.exit()?;
        result
    }

    async fn run_loop(&mut self) -> Result<()> {
        loop {
            let event = {
                let mut terminal = self.tui.lock().await;
                terminal.next().await
            };

            let mut frame_due = false;
            let mut force_render = false;
            let mut resizes = Vec::new();
            match event {
                Some(tui::Event::Init) => force_render = true,
                Some(tui::Event::Quit) | Some(tui::Event::Closed) | None => {
                    self.runtime.send_raw_msg(RawMsg::Quit);
                }
                Some(tui::Event::Tick) => self.runtime.send_raw_msg(RawMsg::Tick),
                Some(tui::Event::Render) => frame_due = true,
                Some(tui::Event::Resize(w, h)) => {
                    resizes.push((w, h));
                    self.runtime.send_raw_msg(RawMsg::Resize(w, h));
                }
                Some(tui::Event::Key(key)) => self.runtime.send_raw_msg(RawMsg::Key(key)),
                Some(tui::Event::Error) => self
                    .runtime
                    .send_raw_msg(RawMsg::Error("Terminal input error".to_string())),
                Some(
                    tui::Event::FocusGained
                    | tui::Event::FocusLost
                    | tui::Event::Paste(_)
                    | tui::Event::Mouse(_),
                ) => {}
            }

            // Process Elm update cycle and execute commands
            if let Err(e) = self.runtime.run_update_cycle() {
                log::error!("Runtime error: {e}");
                self.runtime
                    .send_raw_msg(RawMsg::Error(format!("Runtime error: {e}")));
            }

            let now = Instant::now();
            self.track_transition(now);

            while self.render_req_rx.try_recv().is_ok() {
                self.pending_renders += 1;
            }

            if let Some((w, h)) = Coalescer::decide_resize(None, &resizes) {
                if self.last_size != Some((w, h)) {
                    self.last_size = Some((w, h));
                    self.tui.lock().await.resize(Rect::new(0, 0, w, h))?;
                    force_render = true;
                }
            }

            let animating = self.transition.is_some();
            let wants_frame = Coalescer::decide_render(self.pending_renders, animating);
            if force_render || (frame_due && wants_frame) {
                self.render(now).await?;
            }

            if self.runtime.state().system.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Starts the animation of a navigation the runtime just applied and drops
    /// the one that finished.
    fn track_transition(&mut self, now: Instant) {
        let nav = &self.runtime.state().nav;
        if nav.transition_count() != self.seen_transitions {
            self.seen_transitions = nav.transition_count();
            self.transition = nav
                .last_transition()
                .cloned()
                .map(|event| ActiveTransition::new(event, now));
            self.pending_renders += 1;
        }

        if self
            .transition
            .as_ref()
            .is_some_and(|transition| transition.progress(now).is_none())
        {
            self.transition = None;
            // Final frame without clipping.
            self.pending_renders += 1;
        }
    }

    /// Draws one frame of the current state.
    pub async fn render(&mut self, now: Instant) -> Result<()> {
        let slide = self
            .transition
            .as_ref()
            .and_then(|transition| transition.slide(now));
        let state = self.runtime.state();
        let components = self.runtime.components();

        let mut terminal = self.tui.lock().await;
        terminal.draw(&mut |f: &mut tui::Frame<'_>| components.render(f, state, slide))?;
        self.pending_renders = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;
    use tokio::time::timeout;

    use super::*;
    use crate::{
        core::{msg::Msg, navigator::NavCommand},
        domain::screen::Screen,
        infrastructure::{
            chat::InMemoryChatClient,
            rewards::{HttpRewardsService, InMemoryRewardStore, RewardRepository},
            tui::test::TestTui,
            video::LocalVideoClient,
        },
    };

    fn services() -> Services {
        Services {
            chat: Arc::new(InMemoryChatClient::new(Some("viewer".to_string()))),
            video: Arc::new(LocalVideoClient::new()),
            rewards: RewardRepository::new(
                Arc::new(HttpRewardsService::new("http://127.0.0.1:9/")),
                Arc::new(InMemoryRewardStore::default()),
            ),
            mock_channels: false,
        }
    }

    fn runner(
        events: Vec<tui::Event>,
        start_route: Option<ResolvedRoute>,
    ) -> (AppRunner, Arc<Mutex<TestTui>>) {
        let tui = Arc::new(Mutex::new(TestTui::with_events(60, 12, events).unwrap()));
        let runner = AppRunner::new_with_services(
            Config::default_config().unwrap(),
            services(),
            Arc::<Mutex<TestTui>>::clone(&tui),
            start_route,
        );
        (runner, tui)
    }

    fn key(code: KeyCode) -> tui::Event {
        tui::Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn test_quit_key_ends_loop() {
        let (mut runner, tui) = runner(vec![tui::Event::Init, key(KeyCode::Char('q'))], None);

        let res = timeout(Duration::from_secs(1), runner.run()).await;

        assert!(res.is_ok());
        assert!(runner.runtime().state().system.should_quit);
        assert_eq!(tui.lock().await.draw_count(), 1);
    }

    #[tokio::test]
    async fn test_exhausted_event_source_quits() {
        let (mut runner, _tui) = runner(vec![], None);
        timeout(Duration::from_secs(1), runner.run())
            .await
            .unwrap()
            .unwrap();
        assert!(runner.runtime().state().system.should_quit);
    }

    #[tokio::test]
    async fn test_start_route_opens_screen_above_channels() {
        let route = Screen::LivestreamWatcher
            .create_route("livestream:livestream1")
            .unwrap();
        let (mut runner, tui) = runner(vec![tui::Event::Init], Some(route));

        runner.run().await.unwrap();

        assert_eq!(runner.runtime().state().nav.depth(), 2);
        let rows = tui.lock().await.rows().join("\n");
        assert!(rows.contains("Watching livestream:streamer"));
    }

    #[tokio::test]
    async fn test_navigation_starts_transition_and_renders_slide() {
        let route = Screen::Messages.create_route("livestream:a").unwrap();
        let (mut runner, tui) = runner(vec![], None);

        runner.runtime_mut().send_msg(Msg::Nav(NavCommand::NavigateTo {
            route,
            options: Default::default(),
        }));
        runner.runtime_mut().run_update_cycle().unwrap();

        let started = Instant::now();
        runner.track_transition(started);
        assert!(runner.transition().is_some());

        // Halfway through the push, the messages screen covers the right half.
        runner
            .render(started + Duration::from_millis(250))
            .await
            .unwrap();
        {
            let tui = tui.lock().await;
            let rows = tui.rows();
            assert_eq!(rows[0].chars().nth(29), Some(' '));
            assert_eq!(rows[0].chars().nth(30), Some('┌'));
        }

        // Once the animation has played, the slide is dropped.
        runner.track_transition(started + Duration::from_millis(600));
        assert!(runner.transition().is_none());
    }
}
