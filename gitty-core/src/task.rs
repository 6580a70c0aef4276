//! Background work, described as data. The UI runs each [`Task`] on its own
//! thread and feeds the single [`TaskOutcome`] back into the controller.

use crate::{
    ai,
    config::{Config, Visibility},
    constants::UPDATE_COMMIT_MESSAGE,
    git::{Git, RepositoryStatus, hosting},
};
use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
    pub commit_message: String,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    StageAll,
    Push,
    Pull,
    OpenInBrowser,
    ListBranches,
    /// Check the index for staged changes, optionally returning the diff.
    CheckStaged { with_diff: bool },
    GenerateMessage { diff: String },
    Commit { message: String },
    ResetHard,
    Rollback,
    Release { tag: String, message: Option<String> },
    /// Make sure we're in a repository and find out whether it has `origin`.
    InspectRepository,
    /// Commit anything pending and push to the existing `origin`.
    PushExisting { branch: String },
    PublishNew(PublishRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Completed { detail: Option<String> },
    Failed { error: String },
    StagedChanges { diff: String },
    NoStagedChanges,
    MessageGenerated { message: String },
    RepositoryInspected { branch: String, has_remote: bool },
    Published { url: String, warning: Option<String> },
}

impl TaskOutcome {
    fn done() -> Self {
        TaskOutcome::Completed { detail: None }
    }

    fn from_result(result: Result<TaskOutcome>) -> Self {
        result.unwrap_or_else(|e| TaskOutcome::Failed {
            error: format!("{e:#}"),
        })
    }
}

/// Everything a task needs; cheap to clone into a worker thread.
#[derive(Clone)]
pub struct TaskContext {
    pub git: Git,
    pub config: Config,
    /// Value of `GITHUB_USER`, used to guess the URL of a new repository.
    pub github_user: Option<String>,
}

pub fn read_status(ctx: &TaskContext) -> RepositoryStatus {
    ctx.git.status()
}

pub fn execute(ctx: &TaskContext, task: Task) -> TaskOutcome {
    log::debug!("executing {task:?}");
    let outcome = TaskOutcome::from_result(run(ctx, task));
    if let TaskOutcome::Failed { error } = &outcome {
        log::warn!("task failed: {error}");
    }
    outcome
}

fn run(ctx: &TaskContext, task: Task) -> Result<TaskOutcome> {
    let git = &ctx.git;
    match task {
        Task::StageAll => git.stage_all().map(|()| TaskOutcome::done()),
        Task::Push => git.push().map(|()| TaskOutcome::done()),
        Task::Pull => git.pull().map(|()| TaskOutcome::done()),
        Task::OpenInBrowser => {
            let url = git.web_url()?;
            open::that(&url).with_context(|| format!("failed to open {url}"))?;
            Ok(TaskOutcome::Completed { detail: Some(url) })
        }
        Task::ListBranches => {
            let branches = git.branches()?;
            Ok(TaskOutcome::Completed {
                detail: Some(branches.join(", ")),
            })
        }
        Task::CheckStaged { with_diff } => {
            if !git.has_staged_changes()? {
                return Ok(TaskOutcome::NoStagedChanges);
            }
            let diff = if with_diff {
                git.staged_diff()?
            } else {
                String::new()
            };
            Ok(TaskOutcome::StagedChanges { diff })
        }
        Task::GenerateMessage { diff } => {
            let message = ai::generate_commit_message(&diff, &ctx.config.ai)?;
            Ok(TaskOutcome::MessageGenerated { message })
        }
        Task::Commit { message } => git
            .commit(&message, ctx.config.commit_identity().as_ref())
            .map(|()| TaskOutcome::done()),
        Task::ResetHard => git.reset_hard().map(|()| TaskOutcome::done()),
        Task::Rollback => git.rollback().map(|()| TaskOutcome::done()),
        Task::Release { tag, message } => {
            git.tag(&tag, message.as_deref())
                .context("failed to create tag")?;
            git.push_tags().context("failed to push tags")?;
            Ok(TaskOutcome::done())
        }
        Task::InspectRepository => {
            if !git.is_repository() {
                log::info!("initialising repository before publish");
                git.init().context("failed to initialise repository")?;
            }
            let branch = git
                .attached_branch()
                .context("check out a branch before publishing")?;
            Ok(TaskOutcome::RepositoryInspected {
                branch,
                has_remote: git.has_remote(),
            })
        }
        Task::PushExisting { branch } => push_existing(ctx, &branch),
        Task::PublishNew(request) => publish_new(ctx, &request),
    }
}

fn push_existing(ctx: &TaskContext, branch: &str) -> Result<TaskOutcome> {
    let git = &ctx.git;
    if !git.status().is_clean() {
        git.stage_all().context("failed to stage changes")?;
        git.commit(UPDATE_COMMIT_MESSAGE, ctx.config.commit_identity().as_ref())
            .context("failed to commit")?;
    }
    git.push_with_upstream(branch).context("failed to push")?;

    let url = git
        .web_url()
        .or_else(|_| git.remote_url())
        .ok()
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| format!("origin/{branch}"));
    Ok(TaskOutcome::Published { url, warning: None })
}

fn publish_new(ctx: &TaskContext, request: &PublishRequest) -> Result<TaskOutcome> {
    let git = &ctx.git;

    if let Some(identity) = ctx.config.identity() {
        git.set_user(&identity)?;
    }

    git.stage_all().context("failed to stage changes")?;
    if git.has_staged_changes()? {
        git.commit(&request.commit_message, ctx.config.commit_identity().as_ref())
            .context("failed to commit")?;
    }

    let warning = match request.tag.as_deref() {
        Some(tag) => tag_warning(git.tag(tag, None), tag),
        None => None,
    };

    hosting::create_repository(
        git.runner().as_ref(),
        &request.name,
        &request.description,
        request.visibility,
    )?;

    let url = git
        .web_url()
        .unwrap_or_else(|_| hosting::fallback_repo_url(ctx.github_user.as_deref(), &request.name));
    Ok(TaskOutcome::Published { url, warning })
}

/// Tag failures never block a publish. An existing tag is fine; anything else
/// is reported alongside the success message.
fn tag_warning(result: Result<()>, tag: &str) -> Option<String> {
    match result {
        Ok(()) => None,
        Err(e) if e.to_string().contains("already exists") => {
            log::info!("tag {tag} already exists, skipping");
            None
        }
        Err(e) => Some(format!("tag {tag} was not created: {e:#}")),
    }
}
