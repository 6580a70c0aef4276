use crate::{git::RepositoryStatus, task::TaskOutcome};

/// Events that arrive asynchronously from background threads.
/// These get merged into the main event loop alongside keyboard input.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A fresh repository snapshot, answering `RefreshStatus { seq }`
    StatusLoaded { seq: u64, status: RepositoryStatus },

    /// The single in-flight task finished
    TaskFinished(TaskOutcome),

    /// A message timer fired; only clears the message it was scheduled for
    ClearMessage { seq: u64 },

    /// A full-screen tool returned control to gitty
    ExternalToolExited(Result<(), String>),
}
