//! `gh` invocations used when publishing a repository to GitHub.

use crate::{config::Visibility, exec::CommandRunner};
use anyhow::Result;

const AUTH_HINT: &str = "run `gh auth login` to authenticate";

pub fn repo_create_args(name: &str, description: &str, visibility: Visibility) -> Vec<String> {
    let mut args = vec![
        "repo".to_string(),
        "create".to_string(),
        name.to_string(),
        format!("--{}", visibility.as_str()),
        "--source=.".to_string(),
        "--remote=origin".to_string(),
        "--push".to_string(),
    ];
    if !description.trim().is_empty() {
        args.push(format!("--description={}", description.trim()));
    }
    args
}

/// Create the GitHub repository, wire it up as `origin` and push.
pub fn create_repository(
    runner: &dyn CommandRunner,
    name: &str,
    description: &str,
    visibility: Visibility,
) -> Result<()> {
    let args = repo_create_args(name, description, visibility);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = runner.run("gh", &args);
    if output.success {
        return Ok(());
    }
    anyhow::bail!("{}", with_auth_hint(&output.combined()))
}

/// Append a login hint when `gh` output looks like an authentication problem.
pub fn with_auth_hint(text: &str) -> String {
    let lower = text.to_lowercase();
    if ["authenticat", "credentials", "401", "not logged", "gh auth login"]
        .iter()
        .any(|needle| lower.contains(needle))
    {
        format!("{text} ({AUTH_HINT})")
    } else {
        text.to_string()
    }
}

/// Best-guess URL when `origin` can't be turned into a web URL.
pub fn fallback_repo_url(user: Option<&str>, name: &str) -> String {
    let user = user.filter(|u| !u.is_empty()).unwrap_or("user");
    format!("https://github.com/{user}/{name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::{CommandOutput, mock::MockRunner};

    #[test]
    fn test_repo_create_args_public_with_description() {
        let args = repo_create_args("demo", " A demo ", Visibility::Public);
        assert_eq!(
            args,
            vec![
                "repo",
                "create",
                "demo",
                "--public",
                "--source=.",
                "--remote=origin",
                "--push",
                "--description=A demo",
            ]
        );
    }

    #[test]
    fn test_repo_create_args_private_without_description() {
        let args = repo_create_args("demo", "  ", Visibility::Private);
        assert!(args.contains(&"--private".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("--description")));
    }

    #[test]
    fn test_create_repository_failure_adds_auth_hint() {
        let runner = MockRunner::new().with(
            "gh repo create demo --public --source=. --remote=origin --push",
            CommandOutput::failed("You are not logged into any GitHub hosts."),
        );
        let err = create_repository(&runner, "demo", "", Visibility::Public).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("You are not logged into any GitHub hosts."));
        assert!(message.contains("gh auth login"));
    }

    #[test]
    fn test_create_repository_plain_failure_is_verbatim() {
        let runner = MockRunner::new().with(
            "gh repo create demo --public --source=. --remote=origin --push",
            CommandOutput::failed("GraphQL: Name already exists on this account"),
        );
        let err = create_repository(&runner, "demo", "", Visibility::Public).unwrap_err();
        assert_eq!(err.to_string(), "GraphQL: Name already exists on this account");
    }

    #[test]
    fn test_auth_hint_matches_gh_auth_failures() {
        for text in [
            "HTTP 401: Bad credentials (https://api.github.com/graphql)",
            "error connecting to api.github.com: authentication required",
            "To get started with GitHub CLI, please run:  gh auth login",
        ] {
            assert!(with_auth_hint(text).ends_with(&format!("({AUTH_HINT})")), "{text}");
        }
    }

    #[test]
    fn test_auth_hint_ignores_author_errors() {
        let text = "fatal: unable to auto-detect email address (author identity unknown)";
        assert_eq!(with_auth_hint(text), text);
    }

    #[test]
    fn test_fallback_repo_url() {
        assert_eq!(
            fallback_repo_url(Some("octo"), "demo"),
            "https://github.com/octo/demo"
        );
        assert_eq!(fallback_repo_url(None, "demo"), "https://github.com/user/demo");
        assert_eq!(fallback_repo_url(Some(""), "demo"), "https://github.com/user/demo");
    }
}
