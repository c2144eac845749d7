use crate::{
    core::{cmd::Cmd, msg::livestream::LivestreamMsg},
    infrastructure::video::CallHandle,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LivestreamUiState {
    #[default]
    Loading,
    Success(CallHandle),
    Error,
}

/// Video call state shared by the watcher and broadcaster screens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LivestreamState {
    pub ui_state: LivestreamUiState,
}

impl LivestreamState {
    pub fn active_call(&self) -> Option<&CallHandle> {
        match &self.ui_state {
            LivestreamUiState::Success(call) => Some(call),
            _ => None,
        }
    }

    pub fn update(&mut self, msg: LivestreamMsg) -> Vec<Cmd> {
        match msg {
            LivestreamMsg::Joined(call) => {
                self.ui_state = LivestreamUiState::Success(call);
                vec![Cmd::RequestRender]
            }
            LivestreamMsg::JoinFailed(error) => {
                self.ui_state = LivestreamUiState::Error;
                vec![
                    Cmd::LogError {
                        message: format!("Joining the livestream failed: {error}"),
                    },
                    Cmd::RequestRender,
                ]
            }
            LivestreamMsg::Left => {
                self.ui_state = LivestreamUiState::Loading;
                vec![Cmd::RequestRender]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_lifecycle() {
        let mut state = LivestreamState::default();
        assert_eq!(state.ui_state, LivestreamUiState::Loading);

        let call = CallHandle::new("livestream", "streamer");
        state.update(LivestreamMsg::Joined(call.clone()));
        assert_eq!(state.active_call(), Some(&call));

        state.update(LivestreamMsg::Left);
        assert_eq!(state.active_call(), None);

        state.update(LivestreamMsg::JoinFailed("denied".to_string()));
        assert_eq!(state.ui_state, LivestreamUiState::Error);
    }
}
