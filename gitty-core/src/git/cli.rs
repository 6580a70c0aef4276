use super::{
    github_web_url, parse_ahead_behind, parse_branches, parse_status_porcelain,
    repo::{Identity, RepositoryStatus},
};
use crate::{constants::DEFAULT_BRANCH, exec::CommandRunner};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Every git invocation gitty makes, expressed over a [`CommandRunner`].
#[derive(Clone)]
pub struct Git {
    runner: Arc<dyn CommandRunner>,
}

impl Git {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &Arc<dyn CommandRunner> {
        &self.runner
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        self.runner.run("git", args).into_result()
    }

    pub fn is_repository(&self) -> bool {
        let output = self.runner.run("git", &["rev-parse", "--is-inside-work-tree"]);
        output.success && output.stdout.trim() == "true"
    }

    /// Branch name, or `main` when git reports none (unborn or detached HEAD).
    pub fn current_branch(&self) -> String {
        match self.run(&["branch", "--show-current"]) {
            Ok(branch) if !branch.is_empty() => branch,
            _ => DEFAULT_BRANCH.to_string(),
        }
    }

    /// Branch HEAD points at, unborn or not. Fails on a detached HEAD, where
    /// there is no branch to push.
    pub fn attached_branch(&self) -> Result<String> {
        let output = self.runner.run("git", &["symbolic-ref", "--short", "-q", "HEAD"]);
        if !output.success {
            anyhow::bail!("HEAD is detached");
        }
        let branch = output.stdout.trim();
        Ok(if branch.is_empty() {
            DEFAULT_BRANCH.to_string()
        } else {
            branch.to_string()
        })
    }

    pub fn status(&self) -> RepositoryStatus {
        if !self.is_repository() {
            return RepositoryStatus::default();
        }

        let porcelain = self.runner.run("git", &["status", "--porcelain"]);
        if !porcelain.success {
            log::warn!("git status failed: {}", porcelain.combined());
        }
        let entries = parse_status_porcelain(&porcelain.stdout);

        // No upstream is the common case for new branches, not an error.
        let counts = self.runner.run(
            "git",
            &["rev-list", "--left-right", "--count", "HEAD...@{upstream}"],
        );
        let (ahead, behind) = if counts.success {
            parse_ahead_behind(&counts.stdout)
        } else {
            (0, 0)
        };

        RepositoryStatus {
            is_repository: true,
            branch: self.current_branch(),
            staged_files: entries.staged,
            modified_files: entries.modified,
            untracked_files: entries.untracked,
            ahead,
            behind,
        }
    }

    pub fn remote_url(&self) -> Result<String> {
        self.run(&["remote", "get-url", "origin"])
    }

    pub fn has_remote(&self) -> bool {
        self.remote_url().is_ok_and(|url| !url.is_empty())
    }

    pub fn web_url(&self) -> Result<String> {
        github_web_url(&self.remote_url()?)
    }

    pub fn branches(&self) -> Result<Vec<String>> {
        Ok(parse_branches(&self.run(&["branch", "-a"])?))
    }

    pub fn init(&self) -> Result<()> {
        self.run(&["init"]).map(drop)
    }

    pub fn stage_all(&self) -> Result<()> {
        self.run(&["add", "."]).map(drop)
    }

    /// Commit the index. With an identity, author and committer are overridden
    /// for this commit only.
    pub fn commit(&self, message: &str, identity: Option<&Identity>) -> Result<()> {
        let name_arg;
        let email_arg;
        let mut args: Vec<&str> = Vec::new();
        if let Some(identity) = identity {
            name_arg = format!("user.name={}", identity.name);
            email_arg = format!("user.email={}", identity.email);
            args.extend(["-c", name_arg.as_str(), "-c", email_arg.as_str()]);
        }
        args.extend(["commit", "-m", message]);
        self.run(&args).map(drop)
    }

    /// `git diff --cached --quiet` exits 1 when the index differs from HEAD.
    pub fn has_staged_changes(&self) -> Result<bool> {
        let output = self.runner.run("git", &["diff", "--cached", "--quiet"]);
        if output.success {
            return Ok(false);
        }
        if output.combined().is_empty() {
            return Ok(true);
        }
        anyhow::bail!("{}", output.combined())
    }

    pub fn staged_diff(&self) -> Result<String> {
        self.run(&["diff", "--cached"])
    }

    pub fn push(&self) -> Result<()> {
        self.run(&["push"]).map(drop)
    }

    pub fn push_with_upstream(&self, branch: &str) -> Result<()> {
        self.run(&["push", "-u", "origin", branch]).map(drop)
    }

    pub fn pull(&self) -> Result<()> {
        self.run(&["pull"]).map(drop)
    }

    pub fn reset_hard(&self) -> Result<()> {
        self.run(&["reset", "--hard"]).map(drop)
    }

    pub fn rollback(&self) -> Result<()> {
        self.run(&["reset", "--hard", "HEAD^"]).map(drop)
    }

    /// Create a tag; annotated when a message is given.
    pub fn tag(&self, name: &str, message: Option<&str>) -> Result<()> {
        match message {
            Some(message) => self.run(&["tag", "-a", name, "-m", message]),
            None => self.run(&["tag", name]),
        }
        .map(drop)
    }

    pub fn push_tags(&self) -> Result<()> {
        self.run(&["push", "--tags"]).map(drop)
    }

    /// Set the repository-local author identity.
    pub fn set_user(&self, identity: &Identity) -> Result<()> {
        self.run(&["config", "user.name", &identity.name])
            .context("failed to set user.name")?;
        self.run(&["config", "user.email", &identity.email])
            .context("failed to set user.email")?;
        Ok(())
    }
}
