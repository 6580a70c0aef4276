//! Modal sub-flows. Each one is a small linear state machine that consumes
//! [`Action`]s and [`TaskOutcome`]s and answers with a [`FlowStep`] telling the
//! controller whether to wait, run a task, or hand control back to the menu.

pub mod commit;
pub mod discard;
pub mod publish;
pub mod release;

pub use commit::{CommitField, CommitFlow, CommitPhase, compose_message, split_message};
pub use discard::{DiscardFlow, DiscardKind, DiscardPhase};
pub use publish::{PublishDefaults, PublishField, PublishFlow, PublishPhase};
pub use release::{ReleaseField, ReleaseFlow, ReleasePhase};

use crate::{
    action::Action,
    input::TextField,
    menu::MenuAction,
    state::Severity,
    task::{Task, TaskOutcome},
};

/// What the controller should do after a sub-flow handled something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowStep {
    Stay,
    Run(Task),
    /// Return to the menu, optionally leaving a status message behind.
    Exit(Option<(Severity, String)>),
}

impl FlowStep {
    pub fn info(text: impl Into<String>) -> Self {
        FlowStep::Exit(Some((Severity::Info, text.into())))
    }

    pub fn success(text: impl Into<String>) -> Self {
        FlowStep::Exit(Some((Severity::Success, text.into())))
    }

    pub fn error(text: impl Into<String>) -> Self {
        FlowStep::Exit(Some((Severity::Error, text.into())))
    }
}

/// How keys should be interpreted for whatever currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Menu,
    /// A direct menu action is running; only quitting is possible.
    Loading,
    /// A sub-flow task is in flight; every key is ignored.
    Busy,
    TextInput { multiline: bool, toggle: bool },
    Confirm { editable: bool },
    /// An error or notice waiting to be dismissed.
    Acknowledge,
}

/// The active sub-flow. Owned by the controller's mode and dropped on exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubFlow {
    Commit(CommitFlow),
    Discard(DiscardFlow),
    Release(ReleaseFlow),
    Publish(PublishFlow),
}

impl SubFlow {
    /// Start the sub-flow behind a menu action. Direct actions return `None`.
    pub fn start(action: MenuAction, defaults: &PublishDefaults) -> Option<(Self, FlowStep)> {
        let started = match action {
            MenuAction::Commit => {
                let (flow, step) = CommitFlow::start(false);
                (SubFlow::Commit(flow), step)
            }
            MenuAction::AiCommit => {
                let (flow, step) = CommitFlow::start(true);
                (SubFlow::Commit(flow), step)
            }
            MenuAction::Reset => (
                SubFlow::Discard(DiscardFlow::new(DiscardKind::Reset)),
                FlowStep::Stay,
            ),
            MenuAction::Rollback => (
                SubFlow::Discard(DiscardFlow::new(DiscardKind::Rollback)),
                FlowStep::Stay,
            ),
            MenuAction::Release => (SubFlow::Release(ReleaseFlow::new()), FlowStep::Stay),
            MenuAction::Publish => {
                let (flow, step) = PublishFlow::start(defaults);
                (SubFlow::Publish(flow), step)
            }
            _ => return None,
        };
        Some(started)
    }

    pub fn handle_action(&mut self, action: Action) -> FlowStep {
        if self.is_busy() {
            return FlowStep::Stay;
        }
        match self {
            SubFlow::Commit(flow) => flow.handle_action(action),
            SubFlow::Discard(flow) => flow.handle_action(action),
            SubFlow::Release(flow) => flow.handle_action(action),
            SubFlow::Publish(flow) => flow.handle_action(action),
        }
    }

    pub fn handle_outcome(&mut self, outcome: TaskOutcome) -> FlowStep {
        if !self.is_busy() {
            log::warn!("ignoring task outcome while idle: {outcome:?}");
            return FlowStep::Stay;
        }
        match self {
            SubFlow::Commit(flow) => flow.handle_outcome(outcome),
            SubFlow::Discard(flow) => flow.handle_outcome(outcome),
            SubFlow::Release(flow) => flow.handle_outcome(outcome),
            SubFlow::Publish(flow) => flow.handle_outcome(outcome),
        }
    }

    /// Whether a task is in flight for this flow.
    pub fn is_busy(&self) -> bool {
        match self {
            SubFlow::Commit(flow) => flow.is_busy(),
            SubFlow::Discard(flow) => flow.phase == DiscardPhase::Working,
            SubFlow::Release(flow) => flow.phase == ReleasePhase::Working,
            SubFlow::Publish(flow) => flow.is_busy(),
        }
    }

    pub fn key_context(&self) -> KeyContext {
        if self.is_busy() {
            return KeyContext::Busy;
        }
        match self {
            SubFlow::Commit(flow) => flow.key_context(),
            SubFlow::Discard(flow) => flow.key_context(),
            SubFlow::Release(flow) => flow.key_context(),
            SubFlow::Publish(flow) => flow.key_context(),
        }
    }
}

/// Apply a text-editing action to `field`. Returns false for anything that
/// isn't an edit. Newlines are only inserted when `multiline` is set.
pub(crate) fn apply_edit(field: &mut TextField, action: Action, multiline: bool) -> bool {
    match action {
        Action::InsertChar(c) => field.insert_char(c),
        Action::InsertNewline if multiline => field.insert_char('\n'),
        Action::Backspace => {
            field.backspace();
        }
        Action::DeleteWord => field.delete_word(),
        Action::CursorLeft => field.cursor_left(),
        Action::CursorRight => field.cursor_right(),
        Action::CursorStart => field.cursor_start(),
        Action::CursorEnd => field.cursor_end(),
        _ => return false,
    }
    true
}

/// Message shown after an error has been acknowledged.
pub(crate) fn error_message(error: &str) -> String {
    format!("Error: {error}")
}
