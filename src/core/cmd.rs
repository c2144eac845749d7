use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// Elm-like command definitions
/// Represents side effects (chat/video client calls, network, rendering)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
pub enum Cmd {
    // Chat client commands
    LoadChannels,
    CreateMockChannels,
    /// Create the broadcaster's channel, then open its host screen
    GoLive,

    // Video client commands
    JoinCall {
        call_type: String,
        call_id: String,
    },
    LeaveCall,

    // Rewards data
    LoadRewards,

    /// Request a render; coalesced by the runner
    RequestRender,

    // Logging related
    LogError {
        message: String,
    },
    LogInfo {
        message: String,
    },

    // Batch command (execute multiple commands together)
    Batch(Vec<Cmd>),

    // Do nothing (for testing)
    None,
}

impl Cmd {
    /// Combine multiple commands into one
    pub fn batch(commands: Vec<Cmd>) -> Cmd {
        let mut commands = commands;
        match commands.len() {
            0 => Cmd::None,
            1 => commands.pop().unwrap_or(Cmd::None),
            _ => Cmd::Batch(commands),
        }
    }

    /// Whether the command requires asynchronous processing
    pub fn is_async(&self) -> bool {
        match self {
            Cmd::LoadChannels
            | Cmd::CreateMockChannels
            | Cmd::GoLive
            | Cmd::JoinCall { .. }
            | Cmd::LeaveCall
            | Cmd::LoadRewards => true,

            Cmd::RequestRender | Cmd::LogError { .. } | Cmd::LogInfo { .. } | Cmd::None => false,

            Cmd::Batch(cmds) => cmds.iter().any(|cmd| cmd.is_async()),
        }
    }

    /// Get command priority (smaller numbers = higher priority)
    pub fn priority(&self) -> u8 {
        match self {
            Cmd::RequestRender => 0,

            // Leaving a call before joining the next one keeps a single active call
            Cmd::LeaveCall => 1,
            Cmd::GoLive | Cmd::JoinCall { .. } => 2,

            Cmd::LoadChannels | Cmd::CreateMockChannels | Cmd::LoadRewards => 3,

            Cmd::LogError { .. } | Cmd::LogInfo { .. } => 4,

            // Batch takes highest priority of contained commands
            Cmd::Batch(cmds) => cmds.iter().map(|cmd| cmd.priority()).min().unwrap_or(255),

            Cmd::None => 255,
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Flattens batches into a priority-ordered list, dropping `Cmd::None`.
    pub fn flatten(commands: Vec<Cmd>) -> Vec<Cmd> {
        let mut flat = Vec::new();
        let mut stack = commands;
        stack.reverse();
        while let Some(cmd) = stack.pop() {
            match cmd {
                Cmd::Batch(inner) => stack.extend(inner.into_iter().rev()),
                Cmd::None => {}
                other => flat.push(other),
            }
        }
        flat.sort_by_key(Cmd::priority);
        flat
    }
}
