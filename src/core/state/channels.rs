use crate::{
    core::{cmd::Cmd, msg::channels::ChannelsMsg},
    domain::channel::Channel,
};

/// Channel list shown on the home screen
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelsState {
    pub channels: Vec<Channel>,
    pub is_loading: bool,
    pub selected_index: usize,
    pub error: Option<String>,
    /// Mock channels are created at most once per session
    pub mock_requested: bool,
}

impl Default for ChannelsState {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
            is_loading: true,
            selected_index: 0,
            error: None,
            mock_requested: false,
        }
    }
}

impl ChannelsState {
    pub fn selected(&self) -> Option<&Channel> {
        self.channels.get(self.selected_index)
    }

    pub fn update(&mut self, msg: ChannelsMsg) -> Vec<Cmd> {
        match msg {
            ChannelsMsg::Loaded(channels) => {
                self.is_loading = false;
                self.error = None;
                self.channels = channels;
                self.selected_index = self
                    .selected_index
                    .min(self.channels.len().saturating_sub(1));

                if self.channels.is_empty() && !self.mock_requested {
                    self.mock_requested = true;
                    vec![Cmd::CreateMockChannels, Cmd::RequestRender]
                } else {
                    vec![Cmd::RequestRender]
                }
            }

            ChannelsMsg::LoadFailed(error) => {
                self.is_loading = false;
                self.error = Some(error.clone());
                vec![
                    Cmd::LogError {
                        message: format!("Failed to load channels: {error}"),
                    },
                    Cmd::RequestRender,
                ]
            }

            ChannelsMsg::SelectNext => {
                if self.selected_index + 1 < self.channels.len() {
                    self.selected_index += 1;
                }
                vec![Cmd::RequestRender]
            }

            ChannelsMsg::SelectPrevious => {
                self.selected_index = self.selected_index.saturating_sub(1);
                vec![Cmd::RequestRender]
            }

            ChannelsMsg::GoLive => vec![Cmd::GoLive],

            ChannelsMsg::WentLive(channel) => {
                match self
                    .channels
                    .iter_mut()
                    .find(|existing| existing.cid() == channel.cid())
                {
                    Some(existing) => *existing = channel,
                    None => self.channels.insert(0, channel),
                }
                vec![Cmd::RequestRender]
            }
        }
    }
}
