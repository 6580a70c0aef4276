use super::{FlowStep, KeyContext, apply_edit, error_message};
use crate::{
    action::Action,
    input::TextField,
    task::{Task, TaskOutcome},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseField {
    Tag,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleasePhase {
    Input,
    Confirm,
    Working,
    Error(String),
}

/// Tag the current commit and push tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseFlow {
    pub phase: ReleasePhase,
    pub focus: ReleaseField,
    pub tag: TextField,
    pub message: TextField,
    pub validation: Option<String>,
}

impl Default for ReleaseFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseFlow {
    pub fn new() -> Self {
        Self {
            phase: ReleasePhase::Input,
            focus: ReleaseField::Tag,
            tag: TextField::default(),
            message: TextField::default(),
            validation: None,
        }
    }

    pub fn tag_name(&self) -> &str {
        self.tag.value().trim()
    }

    /// Annotation message, if one was given.
    pub fn annotation(&self) -> Option<String> {
        let message = self.message.value().trim();
        (!message.is_empty()).then(|| message.to_string())
    }

    pub fn key_context(&self) -> KeyContext {
        match self.phase {
            ReleasePhase::Input => KeyContext::TextInput {
                multiline: false,
                toggle: false,
            },
            ReleasePhase::Confirm => KeyContext::Confirm { editable: false },
            ReleasePhase::Working => KeyContext::Busy,
            ReleasePhase::Error(_) => KeyContext::Acknowledge,
        }
    }

    pub fn handle_action(&mut self, action: Action) -> FlowStep {
        match &self.phase {
            ReleasePhase::Input => self.handle_input(action),
            ReleasePhase::Confirm => match action {
                Action::Confirm => {
                    self.phase = ReleasePhase::Working;
                    FlowStep::Run(Task::Release {
                        tag: self.tag_name().to_string(),
                        message: self.annotation(),
                    })
                }
                Action::Decline | Action::Cancel | Action::Submit => {
                    FlowStep::info("Release cancelled")
                }
                _ => FlowStep::Stay,
            },
            ReleasePhase::Error(error) => match action {
                Action::Submit | Action::Cancel | Action::Confirm => {
                    FlowStep::error(error_message(error))
                }
                _ => FlowStep::Stay,
            },
            ReleasePhase::Working => FlowStep::Stay,
        }
    }

    fn handle_input(&mut self, action: Action) -> FlowStep {
        match action {
            Action::Cancel => FlowStep::info("Release cancelled"),
            Action::NextField | Action::PrevField => {
                self.focus = match self.focus {
                    ReleaseField::Tag => ReleaseField::Message,
                    ReleaseField::Message => ReleaseField::Tag,
                };
                FlowStep::Stay
            }
            Action::Submit => {
                if self.tag.is_blank() {
                    self.validation = Some("Tag name is required".to_string());
                } else {
                    self.validation = None;
                    self.phase = ReleasePhase::Confirm;
                }
                FlowStep::Stay
            }
            action => {
                let field = match self.focus {
                    ReleaseField::Tag => &mut self.tag,
                    ReleaseField::Message => &mut self.message,
                };
                if apply_edit(field, action, false) {
                    self.validation = None;
                }
                FlowStep::Stay
            }
        }
    }

    pub fn handle_outcome(&mut self, outcome: TaskOutcome) -> FlowStep {
        match outcome {
            TaskOutcome::Completed { .. } => {
                FlowStep::success(format!("Release {} created and pushed", self.tag_name()))
            }
            TaskOutcome::Failed { error } => {
                self.phase = ReleasePhase::Error(error);
                FlowStep::Stay
            }
            outcome => {
                log::warn!("release flow ignoring {outcome:?}");
                FlowStep::Stay
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(flow: &mut ReleaseFlow, text: &str) {
        for c in text.chars() {
            flow.handle_action(Action::InsertChar(c));
        }
    }

    #[test]
    fn test_empty_tag_is_rejected_inline() {
        let mut flow = ReleaseFlow::new();
        assert_eq!(flow.handle_action(Action::Submit), FlowStep::Stay);
        assert_eq!(flow.phase, ReleasePhase::Input);
        assert_eq!(flow.validation.as_deref(), Some("Tag name is required"));
    }

    #[test]
    fn test_annotated_release() {
        let mut flow = ReleaseFlow::new();
        type_text(&mut flow, "v1.2.0");
        flow.handle_action(Action::NextField);
        type_text(&mut flow, "Second release");
        flow.handle_action(Action::Submit);
        assert_eq!(flow.phase, ReleasePhase::Confirm);

        assert_eq!(
            flow.handle_action(Action::Confirm),
            FlowStep::Run(Task::Release {
                tag: "v1.2.0".into(),
                message: Some("Second release".into()),
            })
        );
        assert_eq!(
            flow.handle_outcome(TaskOutcome::Completed { detail: None }),
            FlowStep::success("Release v1.2.0 created and pushed")
        );
    }

    #[test]
    fn test_lightweight_release_without_message() {
        let mut flow = ReleaseFlow::new();
        type_text(&mut flow, "v1");
        flow.handle_action(Action::Submit);
        assert_eq!(
            flow.handle_action(Action::Confirm),
            FlowStep::Run(Task::Release {
                tag: "v1".into(),
                message: None,
            })
        );
    }

    #[test]
    fn test_cancel_from_form_and_confirm() {
        let mut flow = ReleaseFlow::new();
        assert_eq!(
            flow.handle_action(Action::Cancel),
            FlowStep::info("Release cancelled")
        );

        let mut flow = ReleaseFlow::new();
        type_text(&mut flow, "v1");
        flow.handle_action(Action::Submit);
        assert_eq!(
            flow.handle_action(Action::Decline),
            FlowStep::info("Release cancelled")
        );
    }

    #[test]
    fn test_submit_on_confirm_does_not_tag() {
        let mut flow = ReleaseFlow::new();
        type_text(&mut flow, "v1");
        flow.handle_action(Action::Submit);
        assert_eq!(flow.phase, ReleasePhase::Confirm);
        assert_eq!(
            flow.handle_action(Action::Submit),
            FlowStep::info("Release cancelled")
        );
    }

    #[test]
    fn test_tag_failure_message() {
        let mut flow = ReleaseFlow::new();
        type_text(&mut flow, "v1");
        flow.handle_action(Action::Submit);
        flow.handle_action(Action::Confirm);
        flow.handle_outcome(TaskOutcome::Failed {
            error: "failed to create tag: fatal: tag 'v1' already exists".into(),
        });
        assert_eq!(
            flow.handle_action(Action::Cancel),
            FlowStep::error("Error: failed to create tag: fatal: tag 'v1' already exists")
        );
    }
}
