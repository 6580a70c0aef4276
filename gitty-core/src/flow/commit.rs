use super::{FlowStep, KeyContext, apply_edit, error_message};
use crate::{
    action::Action,
    input::TextField,
    task::{Task, TaskOutcome},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitField {
    Title,
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitPhase {
    /// Waiting to hear whether anything is staged
    Checking,
    NoChanges,
    Generating,
    Input,
    /// Reviewing a generated message
    Confirm,
    Working,
    Error(String),
}

/// Manual and AI-assisted commit. Both start by checking the index; the AI
/// variant then generates a message and asks for confirmation, with `e`
/// dropping into the same form the manual variant uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitFlow {
    pub ai: bool,
    pub phase: CommitPhase,
    pub focus: CommitField,
    pub title: TextField,
    pub body: TextField,
    pub generated: String,
    pub validation: Option<String>,
}

impl CommitFlow {
    pub fn start(ai: bool) -> (Self, FlowStep) {
        let flow = Self {
            ai,
            phase: CommitPhase::Checking,
            focus: CommitField::Title,
            title: TextField::default(),
            body: TextField::default(),
            generated: String::new(),
            validation: None,
        };
        (flow, FlowStep::Run(Task::CheckStaged { with_diff: ai }))
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            CommitPhase::Checking | CommitPhase::Generating | CommitPhase::Working
        )
    }

    pub fn key_context(&self) -> KeyContext {
        match self.phase {
            CommitPhase::Input => KeyContext::TextInput {
                multiline: self.focus == CommitField::Body,
                toggle: false,
            },
            CommitPhase::Confirm => KeyContext::Confirm { editable: true },
            CommitPhase::NoChanges | CommitPhase::Error(_) => KeyContext::Acknowledge,
            CommitPhase::Checking | CommitPhase::Generating | CommitPhase::Working => {
                KeyContext::Busy
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) -> FlowStep {
        match &self.phase {
            CommitPhase::Input => self.handle_input(action),
            CommitPhase::Confirm => match action {
                Action::Confirm | Action::Submit => self.commit(self.generated.clone()),
                Action::Decline => FlowStep::info("Commit cancelled"),
                Action::Cancel => FlowStep::Exit(None),
                Action::Edit => {
                    let (title, body) = split_message(&self.generated);
                    self.title.set(&title);
                    self.body.set(&body);
                    self.focus = CommitField::Title;
                    self.phase = CommitPhase::Input;
                    FlowStep::Stay
                }
                _ => FlowStep::Stay,
            },
            CommitPhase::NoChanges => match action {
                Action::Submit | Action::Cancel | Action::Confirm => {
                    FlowStep::info("No staged changes to commit")
                }
                _ => FlowStep::Stay,
            },
            CommitPhase::Error(error) => match action {
                Action::Submit | Action::Cancel | Action::Confirm => {
                    FlowStep::error(error_message(error))
                }
                _ => FlowStep::Stay,
            },
            CommitPhase::Checking | CommitPhase::Generating | CommitPhase::Working => {
                FlowStep::Stay
            }
        }
    }

    fn handle_input(&mut self, action: Action) -> FlowStep {
        match action {
            Action::Cancel => FlowStep::Exit(None),
            Action::NextField | Action::PrevField => {
                self.focus = match self.focus {
                    CommitField::Title => CommitField::Body,
                    CommitField::Body => CommitField::Title,
                };
                FlowStep::Stay
            }
            Action::Submit => {
                if self.title.is_blank() {
                    self.validation = Some("Title is required".to_string());
                    return FlowStep::Stay;
                }
                self.commit(compose_message(self.title.value(), self.body.value()))
            }
            action => {
                let multiline = self.focus == CommitField::Body;
                let field = match self.focus {
                    CommitField::Title => &mut self.title,
                    CommitField::Body => &mut self.body,
                };
                if apply_edit(field, action, multiline) {
                    self.validation = None;
                }
                FlowStep::Stay
            }
        }
    }

    fn commit(&mut self, message: String) -> FlowStep {
        self.validation = None;
        self.phase = CommitPhase::Working;
        FlowStep::Run(Task::Commit { message })
    }

    pub fn handle_outcome(&mut self, outcome: TaskOutcome) -> FlowStep {
        match outcome {
            TaskOutcome::Failed { error } => {
                self.phase = CommitPhase::Error(error);
                FlowStep::Stay
            }
            TaskOutcome::NoStagedChanges if self.phase == CommitPhase::Checking => {
                self.phase = CommitPhase::NoChanges;
                FlowStep::Stay
            }
            TaskOutcome::StagedChanges { diff } if self.phase == CommitPhase::Checking => {
                if self.ai {
                    self.phase = CommitPhase::Generating;
                    FlowStep::Run(Task::GenerateMessage { diff })
                } else {
                    self.phase = CommitPhase::Input;
                    FlowStep::Stay
                }
            }
            TaskOutcome::MessageGenerated { message } if self.phase == CommitPhase::Generating => {
                self.generated = message;
                self.phase = CommitPhase::Confirm;
                FlowStep::Stay
            }
            TaskOutcome::Completed { .. } if self.phase == CommitPhase::Working => {
                FlowStep::success("Commit successful!")
            }
            outcome => {
                log::warn!("commit flow in {:?} ignoring {outcome:?}", self.phase);
                FlowStep::Stay
            }
        }
    }
}

/// `title`, then a blank line and the trimmed body if there is one.
pub fn compose_message(title: &str, body: &str) -> String {
    let title = title.trim();
    let body = body.trim();
    if body.is_empty() {
        title.to_string()
    } else {
        format!("{title}\n\n{body}")
    }
}

/// Split a full commit message back into title and body: on the first blank
/// line, else the first newline, else it is all title.
pub fn split_message(message: &str) -> (String, String) {
    let message = message.trim();
    let (title, body) = message
        .split_once("\n\n")
        .or_else(|| message.split_once('\n'))
        .unwrap_or((message, ""));
    (title.trim().to_string(), body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(flow: &mut CommitFlow, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                flow.handle_action(Action::InsertNewline);
            } else {
                flow.handle_action(Action::InsertChar(c));
            }
        }
    }

    fn staged(flow: &mut CommitFlow) -> FlowStep {
        flow.handle_outcome(TaskOutcome::StagedChanges {
            diff: "+x".into(),
        })
    }

    #[test]
    fn test_compose_message() {
        assert_eq!(compose_message("fix bug", "- detail"), "fix bug\n\n- detail");
        assert_eq!(compose_message("fix bug", ""), "fix bug");
        assert_eq!(compose_message(" fix bug ", "  \n "), "fix bug");
    }

    #[test]
    fn test_split_message() {
        assert_eq!(
            split_message("fix bug\n\n- detail"),
            ("fix bug".to_string(), "- detail".to_string())
        );
        assert_eq!(
            split_message("fix bug\n- detail"),
            ("fix bug".to_string(), "- detail".to_string())
        );
        assert_eq!(split_message("fix bug"), ("fix bug".to_string(), String::new()));
        assert_eq!(
            split_message("feat: x\n\n- a\n\n- b"),
            ("feat: x".to_string(), "- a\n\n- b".to_string())
        );
    }

    #[test]
    fn test_split_inverts_compose() {
        let (title, body) = split_message(&compose_message("fix bug", "- detail"));
        assert_eq!((title.as_str(), body.as_str()), ("fix bug", "- detail"));
    }

    #[test]
    fn test_manual_commit_happy_path() {
        let (mut flow, step) = CommitFlow::start(false);
        assert_eq!(step, FlowStep::Run(Task::CheckStaged { with_diff: false }));
        assert_eq!(staged(&mut flow), FlowStep::Stay);
        assert_eq!(flow.phase, CommitPhase::Input);

        type_text(&mut flow, "fix bug");
        flow.handle_action(Action::NextField);
        assert_eq!(
            flow.key_context(),
            KeyContext::TextInput {
                multiline: true,
                toggle: false
            }
        );
        type_text(&mut flow, "- one\n- two");

        let step = flow.handle_action(Action::Submit);
        assert_eq!(
            step,
            FlowStep::Run(Task::Commit {
                message: "fix bug\n\n- one\n- two".into()
            })
        );
        assert!(flow.is_busy());

        let step = flow.handle_outcome(TaskOutcome::Completed { detail: None });
        assert_eq!(step, FlowStep::success("Commit successful!"));
    }

    #[test]
    fn test_title_newline_is_ignored() {
        let (mut flow, _) = CommitFlow::start(false);
        staged(&mut flow);
        type_text(&mut flow, "a\nb");
        assert_eq!(flow.title.value(), "ab");
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let (mut flow, _) = CommitFlow::start(false);
        staged(&mut flow);
        type_text(&mut flow, "   ");
        assert_eq!(flow.handle_action(Action::Submit), FlowStep::Stay);
        assert_eq!(flow.phase, CommitPhase::Input);
        assert_eq!(flow.validation.as_deref(), Some("Title is required"));

        type_text(&mut flow, "x");
        assert!(flow.validation.is_none());
    }

    #[test]
    fn test_no_staged_changes() {
        let (mut flow, _) = CommitFlow::start(true);
        assert_eq!(
            flow.handle_outcome(TaskOutcome::NoStagedChanges),
            FlowStep::Stay
        );
        assert_eq!(flow.key_context(), KeyContext::Acknowledge);
        assert_eq!(
            flow.handle_action(Action::Submit),
            FlowStep::info("No staged changes to commit")
        );
    }

    #[test]
    fn test_escape_exits_silently() {
        let (mut flow, _) = CommitFlow::start(false);
        staged(&mut flow);
        assert_eq!(flow.handle_action(Action::Cancel), FlowStep::Exit(None));
    }

    #[test]
    fn test_ai_commit_confirm() {
        let (mut flow, step) = CommitFlow::start(true);
        assert_eq!(step, FlowStep::Run(Task::CheckStaged { with_diff: true }));
        assert_eq!(
            staged(&mut flow),
            FlowStep::Run(Task::GenerateMessage { diff: "+x".into() })
        );
        assert_eq!(flow.phase, CommitPhase::Generating);

        flow.handle_outcome(TaskOutcome::MessageGenerated {
            message: "feat: x\n\n- y".into(),
        });
        assert_eq!(flow.key_context(), KeyContext::Confirm { editable: true });
        assert_eq!(
            flow.handle_action(Action::Confirm),
            FlowStep::Run(Task::Commit {
                message: "feat: x\n\n- y".into()
            })
        );
    }

    #[test]
    fn test_ai_commit_decline() {
        let (mut flow, _) = CommitFlow::start(true);
        staged(&mut flow);
        flow.handle_outcome(TaskOutcome::MessageGenerated {
            message: "feat: x".into(),
        });
        assert_eq!(
            flow.handle_action(Action::Decline),
            FlowStep::info("Commit cancelled")
        );
    }

    #[test]
    fn test_ai_commit_edit_prefills_form() {
        let (mut flow, _) = CommitFlow::start(true);
        staged(&mut flow);
        flow.handle_outcome(TaskOutcome::MessageGenerated {
            message: "feat: x\n\n- y".into(),
        });
        assert_eq!(flow.handle_action(Action::Edit), FlowStep::Stay);
        assert_eq!(flow.phase, CommitPhase::Input);
        assert_eq!(flow.title.value(), "feat: x");
        assert_eq!(flow.body.value(), "- y");

        type_text(&mut flow, "!");
        assert_eq!(
            flow.handle_action(Action::Submit),
            FlowStep::Run(Task::Commit {
                message: "feat: x!\n\n- y".into()
            })
        );
    }

    #[test]
    fn test_generation_failure_is_acknowledged() {
        let (mut flow, _) = CommitFlow::start(true);
        staged(&mut flow);
        flow.handle_outcome(TaskOutcome::Failed {
            error: "API key not configured".into(),
        });
        assert_eq!(flow.phase, CommitPhase::Error("API key not configured".into()));
        assert_eq!(flow.handle_action(Action::InsertChar('x')), FlowStep::Stay);
        assert_eq!(
            flow.handle_action(Action::Cancel),
            FlowStep::error("Error: API key not configured")
        );
    }

    #[test]
    fn test_commit_failure() {
        let (mut flow, _) = CommitFlow::start(false);
        staged(&mut flow);
        type_text(&mut flow, "x");
        flow.handle_action(Action::Submit);
        flow.handle_outcome(TaskOutcome::Failed {
            error: "nothing to commit".into(),
        });
        assert_eq!(
            flow.handle_action(Action::Submit),
            FlowStep::error("Error: nothing to commit")
        );
    }
}
