use super::{FlowStep, KeyContext, error_message};
use crate::{
    action::Action,
    task::{Task, TaskOutcome},
};

/// The two irreversible history operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardKind {
    /// `git reset --hard`
    Reset,
    /// `git reset --hard HEAD^`
    Rollback,
}

impl DiscardKind {
    pub fn title(self) -> &'static str {
        match self {
            DiscardKind::Reset => "Reset",
            DiscardKind::Rollback => "Rollback",
        }
    }

    pub fn warning(self) -> &'static str {
        match self {
            DiscardKind::Reset => "This will discard ALL uncommitted changes.",
            DiscardKind::Rollback => "This will remove the last commit and its changes.",
        }
    }

    fn task(self) -> Task {
        match self {
            DiscardKind::Reset => Task::ResetHard,
            DiscardKind::Rollback => Task::Rollback,
        }
    }

    fn done_message(self) -> &'static str {
        match self {
            DiscardKind::Reset => "Reset complete",
            DiscardKind::Rollback => "Rollback successful",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardPhase {
    Confirm,
    Working,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscardFlow {
    pub kind: DiscardKind,
    pub phase: DiscardPhase,
}

impl DiscardFlow {
    pub fn new(kind: DiscardKind) -> Self {
        Self {
            kind,
            phase: DiscardPhase::Confirm,
        }
    }

    pub fn key_context(&self) -> KeyContext {
        match self.phase {
            DiscardPhase::Confirm => KeyContext::Confirm { editable: false },
            DiscardPhase::Working => KeyContext::Busy,
            DiscardPhase::Error(_) => KeyContext::Acknowledge,
        }
    }

    pub fn handle_action(&mut self, action: Action) -> FlowStep {
        match &self.phase {
            DiscardPhase::Confirm => match action {
                // Only an explicit yes runs the reset
                Action::Confirm => {
                    self.phase = DiscardPhase::Working;
                    FlowStep::Run(self.kind.task())
                }
                Action::Decline | Action::Cancel | Action::Submit => {
                    FlowStep::info(format!("{} cancelled", self.kind.title()))
                }
                _ => FlowStep::Stay,
            },
            DiscardPhase::Error(error) => match action {
                Action::Submit | Action::Cancel | Action::Confirm => {
                    FlowStep::error(error_message(error))
                }
                _ => FlowStep::Stay,
            },
            DiscardPhase::Working => FlowStep::Stay,
        }
    }

    pub fn handle_outcome(&mut self, outcome: TaskOutcome) -> FlowStep {
        match outcome {
            TaskOutcome::Completed { .. } => FlowStep::success(self.kind.done_message()),
            TaskOutcome::Failed { error } => {
                self.phase = DiscardPhase::Error(error);
                FlowStep::Stay
            }
            outcome => {
                log::warn!("{:?} flow ignoring {outcome:?}", self.kind);
                FlowStep::Stay
            }
        }
    }
}
