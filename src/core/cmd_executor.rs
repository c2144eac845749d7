use std::{
    future::Future,
    sync::{Arc, OnceLock},
};

use color_eyre::eyre::Result;
use tokio::sync::mpsc;

use crate::{
    core::{
        cmd::Cmd,
        msg::{
            channels::ChannelsMsg, livestream::LivestreamMsg, rewards::RewardsMsg,
            system::SystemMsg, Msg,
        },
        navigator::{AppNavigator, NavOptions, Navigator},
    },
    domain::screen::Screen,
    infrastructure::{
        chat::{
            create_mock_channels, create_streamer_channel, ChannelQuery, ChatClient,
            InMemoryChatClient,
        },
        config::Config,
        rewards::{FileRewardStore, HttpRewardsService, RewardRepository},
        video::{join_call, LocalVideoClient, VideoClient},
    },
};

const REWARDS_CACHE_FILE: &str = "rewards.json";

/// Clients the executor runs side effects against.
#[derive(Clone)]
pub struct Services {
    pub chat: Arc<dyn ChatClient>,
    pub video: Arc<dyn VideoClient>,
    pub rewards: RewardRepository,
    /// Create demo channels when the channel list comes back empty.
    pub mock_channels: bool,
}

impl Services {
    /// Local chat and video clients, rewards fetched over HTTP and cached in
    /// the data directory.
    pub fn from_config(config: &Config) -> Self {
        let rewards = RewardRepository::new(
            Arc::new(HttpRewardsService::new(config.rewards_base_url.clone())),
            Arc::new(FileRewardStore::new(
                config.config._data_dir.join(REWARDS_CACHE_FILE),
            )),
        );
        Self {
            chat: Arc::new(InMemoryChatClient::new(config.user_id.clone())),
            video: Arc::new(LocalVideoClient::new()),
            rewards,
            mock_channels: config.experimental.mock_channels,
        }
    }
}

/// Video call operation, applied by the call worker in the order issued.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CallOp {
    Join { call_type: String, call_id: String },
    Leave,
}

/// Command executor that runs Elm commands against the clients and reports
/// their outcome back as messages
#[derive(Clone)]
pub struct CmdExecutor {
    msg_sender: mpsc::UnboundedSender<Msg>,
    navigator: AppNavigator,
    services: Services,
    render_req_sender: Option<mpsc::UnboundedSender<()>>,
    call_ops: Arc<OnceLock<mpsc::UnboundedSender<CallOp>>>,
}

impl CmdExecutor {
    pub fn new(
        msg_sender: mpsc::UnboundedSender<Msg>,
        navigator: AppNavigator,
        services: Services,
    ) -> Self {
        Self {
            msg_sender,
            navigator,
            services,
            render_req_sender: None,
            call_ops: Arc::new(OnceLock::new()),
        }
    }

    /// Inject render request sender for AppRunner-orchestrated rendering.
    pub fn set_render_request_sender(&mut self, sender: mpsc::UnboundedSender<()>) {
        self.render_req_sender = Some(sender);
    }

    /// Execute a single command. Commands needing I/O run on a tokio task.
    pub fn execute_command(&self, cmd: &Cmd) -> Result<()> {
        match cmd {
            Cmd::None => {}

            Cmd::LoadChannels => {
                let chat = Arc::clone(&self.services.chat);
                self.spawn(async move {
                    let msg = match chat.query_channels(&ChannelQuery::livestreams()).await {
                        Ok(channels) => ChannelsMsg::Loaded(channels),
                        Err(e) => ChannelsMsg::LoadFailed(e.to_string()),
                    };
                    vec![Msg::Channels(msg)]
                });
            }

            Cmd::CreateMockChannels => {
                if !self.services.mock_channels {
                    log::info!("CmdExecutor: mock channels are disabled");
                    return Ok(());
                }
                let chat = Arc::clone(&self.services.chat);
                self.spawn(async move {
                    let result = match create_mock_channels(chat.as_ref()).await {
                        Ok(created) => {
                            log::info!("CmdExecutor: created {} mock channels", created.len());
                            chat.query_channels(&ChannelQuery::livestreams()).await
                        }
                        Err(e) => Err(e),
                    };
                    let msg = match result {
                        Ok(channels) => ChannelsMsg::Loaded(channels),
                        Err(e) => ChannelsMsg::LoadFailed(e.to_string()),
                    };
                    vec![Msg::Channels(msg)]
                });
            }

            Cmd::GoLive => {
                let chat = Arc::clone(&self.services.chat);
                let navigator = self.navigator.clone();
                self.spawn(async move {
                    let channel = match create_streamer_channel(chat.as_ref()).await {
                        Ok(channel) => channel,
                        Err(e) => {
                            return vec![Msg::System(SystemMsg::ShowError(format!(
                                "Unable to go live: {e}"
                            )))]
                        }
                    };
                    match Screen::LivestreamStreamer.create_route(&channel.cid()) {
                        Ok(route) => {
                            navigator.navigate(route, NavOptions::single_top());
                            vec![
                                Msg::System(SystemMsg::ClearStatusMessage),
                                Msg::Channels(ChannelsMsg::WentLive(channel)),
                            ]
                        }
                        Err(e) => vec![Msg::System(SystemMsg::ShowError(e.to_string()))],
                    }
                });
            }

            Cmd::JoinCall { call_type, call_id } => self.send_call_op(CallOp::Join {
                call_type: call_type.clone(),
                call_id: call_id.clone(),
            }),

            Cmd::LeaveCall => self.send_call_op(CallOp::Leave),

            Cmd::LoadRewards => {
                let rewards = self.services.rewards.clone();
                self.spawn(async move {
                    let msg = match rewards.reward_stream().await {
                        Ok(rewards) => RewardsMsg::Loaded(rewards),
                        Err(e) => RewardsMsg::LoadFailed(e.to_string()),
                    };
                    vec![Msg::Rewards(msg)]
                });
            }

            Cmd::RequestRender => {
                if let Some(tx) = &self.render_req_sender {
                    let _ = tx.send(());
                } else {
                    log::debug!("CmdExecutor: no render sender configured, dropping render request");
                }
            }

            Cmd::LogError { message } => {
                log::error!("Elm command error: {message}");
            }

            Cmd::LogInfo { message } => {
                log::info!("Elm command info: {message}");
            }

            Cmd::Batch(commands) => {
                for cmd in commands {
                    self.execute_command(cmd)?;
                }
            }
        }

        Ok(())
    }

    /// Execute multiple commands
    pub fn execute_commands(&self, commands: &[Cmd]) -> Result<Vec<String>> {
        let mut execution_log = Vec::new();

        for cmd in commands {
            match self.execute_command(cmd) {
                Ok(()) => {
                    execution_log.push(format!("✓ Executed: {}", cmd.name()));
                }
                Err(e) => {
                    let error_msg = format!("✗ Failed to execute {}: {e}", cmd.name());
                    log::error!("{error_msg}");
                    execution_log.push(error_msg);
                }
            }
        }

        Ok(execution_log)
    }

    /// Queues `op` on the call worker, starting the worker on first use.
    ///
    /// Joins and leaves run one at a time in the order they were issued, so a
    /// leave issued while a join is in flight ends the call that join opens.
    fn send_call_op(&self, op: CallOp) {
        let ops = self.call_ops.get_or_init(|| {
            let (tx, rx) = mpsc::unbounded_channel();
            tokio::spawn(run_call_ops(
                rx,
                Arc::clone(&self.services.video),
                self.msg_sender.clone(),
            ));
            tx
        });
        if ops.send(op).is_err() {
            log::warn!("CmdExecutor: call worker is gone, dropping call operation");
        }
    }

    /// Runs `task` in the background and feeds the messages it yields back
    /// into the runtime.
    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = Vec<Msg>> + Send + 'static,
    {
        let tx = self.msg_sender.clone();
        tokio::spawn(async move {
            for msg in task.await {
                if tx.send(msg).is_err() {
                    log::warn!("CmdExecutor: runtime is gone, dropping result");
                    break;
                }
            }
        });
    }
}

async fn run_call_ops(
    mut ops: mpsc::UnboundedReceiver<CallOp>,
    video: Arc<dyn VideoClient>,
    msg_sender: mpsc::UnboundedSender<Msg>,
) {
    while let Some(op) = ops.recv().await {
        let msg = match op {
            CallOp::Join { call_type, call_id } => {
                match join_call(video.as_ref(), &call_type, &call_id).await {
                    Ok(call) => Some(LivestreamMsg::Joined(call)),
                    Err(e) => Some(LivestreamMsg::JoinFailed(e.to_string())),
                }
            }
            CallOp::Leave => match video.active_call().await {
                Some(call) => {
                    log::info!("CmdExecutor: leaving {}", call.cid());
                    video.leave(&call).await;
                    Some(LivestreamMsg::Left)
                }
                None => None,
            },
        };
        if let Some(msg) = msg {
            if msg_sender.send(Msg::Livestream(msg)).is_err() {
                log::warn!("CmdExecutor: runtime is gone, dropping call result");
            }
        }
    }
}
