use super::{FlowStep, KeyContext, apply_edit, error_message};
use crate::{
    action::Action,
    config::Visibility,
    constants::INITIAL_COMMIT_MESSAGE,
    input::TextField,
    task::{PublishRequest, Task, TaskOutcome},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishField {
    Name,
    Description,
    Visibility,
    Message,
    Tag,
}

impl PublishField {
    pub const ALL: [PublishField; 5] = [
        PublishField::Name,
        PublishField::Description,
        PublishField::Visibility,
        PublishField::Message,
        PublishField::Tag,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PublishField::Name => "Repository name",
            PublishField::Description => "Description (optional)",
            PublishField::Visibility => "Visibility",
            PublishField::Message => "Commit message",
            PublishField::Tag => "Version tag (optional)",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishPhase {
    /// Looking for a repository and an `origin` remote
    Inspecting,
    Input,
    Confirm,
    Working,
    Error(String),
}

/// Form defaults that depend on where gitty was started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishDefaults {
    pub name: String,
    pub visibility: Visibility,
}

/// Push to an existing `origin`, or create the GitHub repository first when
/// there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishFlow {
    pub phase: PublishPhase,
    pub focus: PublishField,
    pub name: TextField,
    pub description: TextField,
    pub visibility: Visibility,
    pub message: TextField,
    pub tag: TextField,
    pub branch: String,
    pub has_remote: bool,
    pub validation: Option<String>,
}

impl PublishFlow {
    pub fn start(defaults: &PublishDefaults) -> (Self, FlowStep) {
        let flow = Self {
            phase: PublishPhase::Inspecting,
            focus: PublishField::Name,
            name: TextField::new(&defaults.name),
            description: TextField::default(),
            visibility: defaults.visibility,
            message: TextField::new(INITIAL_COMMIT_MESSAGE),
            tag: TextField::default(),
            branch: String::new(),
            has_remote: false,
            validation: None,
        };
        (flow, FlowStep::Run(Task::InspectRepository))
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, PublishPhase::Inspecting | PublishPhase::Working)
    }

    pub fn key_context(&self) -> KeyContext {
        match self.phase {
            PublishPhase::Input => KeyContext::TextInput {
                multiline: false,
                toggle: self.focus == PublishField::Visibility,
            },
            PublishPhase::Confirm => KeyContext::Confirm { editable: true },
            PublishPhase::Error(_) => KeyContext::Acknowledge,
            PublishPhase::Inspecting | PublishPhase::Working => KeyContext::Busy,
        }
    }

    pub fn request(&self) -> PublishRequest {
        let message = self.message.value().trim();
        let tag = self.tag.value().trim();
        PublishRequest {
            name: self.name.value().trim().to_string(),
            description: self.description.value().trim().to_string(),
            visibility: self.visibility,
            commit_message: if message.is_empty() {
                INITIAL_COMMIT_MESSAGE.to_string()
            } else {
                message.to_string()
            },
            tag: (!tag.is_empty()).then(|| tag.to_string()),
        }
    }

    pub fn handle_action(&mut self, action: Action) -> FlowStep {
        match &self.phase {
            PublishPhase::Input => self.handle_input(action),
            PublishPhase::Confirm => match action {
                Action::Confirm | Action::Submit => {
                    self.phase = PublishPhase::Working;
                    FlowStep::Run(Task::PublishNew(self.request()))
                }
                Action::Edit => {
                    self.phase = PublishPhase::Input;
                    FlowStep::Stay
                }
                Action::Decline | Action::Cancel => FlowStep::info("Publish cancelled"),
                _ => FlowStep::Stay,
            },
            PublishPhase::Error(error) => match action {
                Action::Submit | Action::Cancel | Action::Confirm => {
                    FlowStep::error(error_message(error))
                }
                _ => FlowStep::Stay,
            },
            PublishPhase::Inspecting | PublishPhase::Working => FlowStep::Stay,
        }
    }

    fn handle_input(&mut self, action: Action) -> FlowStep {
        match action {
            Action::Cancel => FlowStep::info("Publish cancelled"),
            Action::NextField => {
                self.focus = self.focus.next();
                FlowStep::Stay
            }
            Action::PrevField => {
                self.focus = self.focus.prev();
                FlowStep::Stay
            }
            Action::Toggle if self.focus == PublishField::Visibility => {
                self.visibility = self.visibility.toggled();
                FlowStep::Stay
            }
            Action::Submit => {
                if self.name.is_blank() {
                    self.validation = Some("Repository name is required".to_string());
                } else {
                    self.validation = None;
                    self.phase = PublishPhase::Confirm;
                }
                FlowStep::Stay
            }
            action => {
                let field = match self.focus {
                    PublishField::Name => &mut self.name,
                    PublishField::Description => &mut self.description,
                    PublishField::Message => &mut self.message,
                    PublishField::Tag => &mut self.tag,
                    PublishField::Visibility => return FlowStep::Stay,
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
            TaskOutcome::Failed { error } => {
                self.phase = PublishPhase::Error(error);
                FlowStep::Stay
            }
            TaskOutcome::RepositoryInspected { branch, has_remote }
                if self.phase == PublishPhase::Inspecting =>
            {
                self.has_remote = has_remote;
                self.branch.clone_from(&branch);
                if has_remote {
                    self.phase = PublishPhase::Working;
                    FlowStep::Run(Task::PushExisting { branch })
                } else {
                    self.phase = PublishPhase::Input;
                    FlowStep::Stay
                }
            }
            TaskOutcome::Published { url, warning } if self.phase == PublishPhase::Working => {
                match warning {
                    Some(warning) => FlowStep::success(format!("Published to {url} ({warning})")),
                    None => FlowStep::success(format!("Published to {url}")),
                }
            }
            outcome => {
                log::warn!("publish flow in {:?} ignoring {outcome:?}", self.phase);
                FlowStep::Stay
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> PublishDefaults {
        PublishDefaults {
            name: "demo".into(),
            visibility: Visibility::Public,
        }
    }

    fn inspected(flow: &mut PublishFlow, has_remote: bool) -> FlowStep {
        flow.handle_outcome(TaskOutcome::RepositoryInspected {
            branch: "main".into(),
            has_remote,
        })
    }

    #[test]
    fn test_existing_remote_skips_form() {
        let (mut flow, step) = PublishFlow::start(&defaults());
        assert_eq!(step, FlowStep::Run(Task::InspectRepository));
        assert_eq!(
            inspected(&mut flow, true),
            FlowStep::Run(Task::PushExisting {
                branch: "main".into()
            })
        );
        assert_eq!(flow.phase, PublishPhase::Working);
        assert_eq!(
            flow.handle_outcome(TaskOutcome::Published {
                url: "https://github.com/octo/demo".into(),
                warning: None,
            }),
            FlowStep::success("Published to https://github.com/octo/demo")
        );
    }

    #[test]
    fn test_new_repository_requires_form_then_confirm() {
        let (mut flow, _) = PublishFlow::start(&defaults());
        assert_eq!(inspected(&mut flow, false), FlowStep::Stay);
        assert_eq!(flow.phase, PublishPhase::Input);
        assert_eq!(flow.name.value(), "demo");
        assert_eq!(flow.message.value(), "Initial commit");

        flow.handle_action(Action::NextField);
        for c in "A demo".chars() {
            flow.handle_action(Action::InsertChar(c));
        }
        flow.handle_action(Action::NextField);
        assert_eq!(
            flow.key_context(),
            KeyContext::TextInput {
                multiline: false,
                toggle: true
            }
        );
        flow.handle_action(Action::Toggle);
        assert_eq!(flow.visibility, Visibility::Private);
        flow.handle_action(Action::InsertChar('x'));

        flow.handle_action(Action::PrevField);
        flow.handle_action(Action::PrevField);
        flow.handle_action(Action::PrevField);
        assert_eq!(flow.focus, PublishField::Tag);
        for c in "v0.1.0".chars() {
            flow.handle_action(Action::InsertChar(c));
        }

        assert_eq!(flow.handle_action(Action::Submit), FlowStep::Stay);
        assert_eq!(flow.phase, PublishPhase::Confirm);
        assert_eq!(
            flow.handle_action(Action::Confirm),
            FlowStep::Run(Task::PublishNew(PublishRequest {
                name: "demo".into(),
                description: "A demo".into(),
                visibility: Visibility::Private,
                commit_message: "Initial commit".into(),
                tag: Some("v0.1.0".into()),
            }))
        );
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let (mut flow, _) = PublishFlow::start(&PublishDefaults::default());
        inspected(&mut flow, false);
        assert_eq!(flow.handle_action(Action::Submit), FlowStep::Stay);
        assert_eq!(flow.phase, PublishPhase::Input);
        assert_eq!(
            flow.validation.as_deref(),
            Some("Repository name is required")
        );
    }

    #[test]
    fn test_cancel_and_edit() {
        let (mut flow, _) = PublishFlow::start(&defaults());
        inspected(&mut flow, false);
        flow.handle_action(Action::Submit);
        assert_eq!(flow.handle_action(Action::Edit), FlowStep::Stay);
        assert_eq!(flow.phase, PublishPhase::Input);
        assert_eq!(
            flow.handle_action(Action::Cancel),
            FlowStep::info("Publish cancelled")
        );
    }

    #[test]
    fn test_success_carries_tag_warning() {
        let (mut flow, _) = PublishFlow::start(&defaults());
        inspected(&mut flow, false);
        flow.handle_action(Action::Submit);
        flow.handle_action(Action::Confirm);
        assert_eq!(
            flow.handle_outcome(TaskOutcome::Published {
                url: "https://github.com/octo/demo".into(),
                warning: Some("tag bad was not created".into()),
            }),
            FlowStep::success("Published to https://github.com/octo/demo (tag bad was not created)")
        );
    }

    #[test]
    fn test_gh_failure_waits_for_acknowledgement() {
        let (mut flow, _) = PublishFlow::start(&defaults());
        inspected(&mut flow, false);
        flow.handle_action(Action::Submit);
        flow.handle_action(Action::Confirm);
        flow.handle_outcome(TaskOutcome::Failed {
            error: "not logged in (run `gh auth login` to authenticate)".into(),
        });
        assert_eq!(flow.key_context(), KeyContext::Acknowledge);
        assert_eq!(
            flow.handle_action(Action::Submit),
            FlowStep::error("Error: not logged in (run `gh auth login` to authenticate)")
        );
    }

    #[test]
    fn test_field_cycle_wraps() {
        assert_eq!(PublishField::Tag.next(), PublishField::Name);
        assert_eq!(PublishField::Name.prev(), PublishField::Tag);
    }
}
