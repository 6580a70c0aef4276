use crate::{constants::LAZYGIT, task::Task};
use std::time::Duration;

/// Full-screen programs that take over the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalTool {
    Lazygit,
}

impl ExternalTool {
    pub fn program(self) -> &'static str {
        match self {
            ExternalTool::Lazygit => LAZYGIT,
        }
    }
}

/// Side effects requested by the controller. The UI layer carries them out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run a task on a background thread and report back with `TaskFinished`.
    Spawn(Task),
    /// Read a fresh status snapshot and report it as `StatusLoaded { seq }`.
    RefreshStatus { seq: u64 },
    /// Send `ClearMessage { seq }` after `after` has elapsed.
    ScheduleMessageClear { seq: u64, after: Duration },
    /// Suspend the UI and hand the terminal to a tool.
    RunExternal(ExternalTool),
    Quit,
}
