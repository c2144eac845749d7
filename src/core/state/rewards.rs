use crate::{
    core::{cmd::Cmd, msg::rewards::RewardsMsg},
    domain::reward::Reward,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardsState {
    pub rewards: Vec<Reward>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub show_panel: bool,
}

impl RewardsState {
    pub fn update(&mut self, msg: RewardsMsg) -> Vec<Cmd> {
        match msg {
            RewardsMsg::Loaded(rewards) => {
                self.rewards = rewards;
                self.is_loading = false;
                self.error = None;
                vec![Cmd::RequestRender]
            }
            RewardsMsg::LoadFailed(error) => {
                self.is_loading = false;
                self.error = Some(error);
                vec![Cmd::RequestRender]
            }
            RewardsMsg::TogglePanel => {
                self.show_panel = !self.show_panel;
                let mut cmds = vec![Cmd::RequestRender];
                if let Some(load) = self.load() {
                    cmds.insert(0, load);
                }
                cmds
            }
        }
    }

    /// Starts loading unless rewards are present or already on their way.
    pub fn load(&mut self) -> Option<Cmd> {
        if !self.show_panel || self.is_loading || !self.rewards.is_empty() {
            return None;
        }
        self.is_loading = true;
        Some(Cmd::LoadRewards)
    }
}
