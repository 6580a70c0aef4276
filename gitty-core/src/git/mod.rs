pub mod cli;
pub mod hosting;
pub mod repo;

pub use cli::Git;
pub use repo::{Identity, RepositoryStatus};

/// Files grouped by porcelain status code.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StatusEntries {
    pub staged: Vec<String>,
    pub modified: Vec<String>,
    pub untracked: Vec<String>,
}

/// Parse `git status --porcelain` output. Each record is a two-character code
/// (index, worktree), a space, then the path. A record can be both staged and
/// modified.
pub fn parse_status_porcelain(output: &str) -> StatusEntries {
    let mut entries = StatusEntries::default();

    for line in output.lines() {
        let bytes = line.as_bytes();
        if bytes.len() < 3 {
            continue;
        }
        let Some(path) = line.get(3..).map(str::trim) else {
            continue;
        };
        let (index, worktree) = (bytes[0], bytes[1]);

        if index == b'?' && worktree == b'?' {
            entries.untracked.push(path.to_string());
            continue;
        }
        if index != b' ' && index != b'?' {
            entries.staged.push(path.to_string());
        }
        if worktree != b' ' && worktree != b'?' {
            entries.modified.push(path.to_string());
        }
    }

    entries
}

/// Parse `git rev-list --left-right --count HEAD...@{upstream}` into
/// `(ahead, behind)`. Anything unparsable counts as zero.
pub fn parse_ahead_behind(output: &str) -> (usize, usize) {
    let mut counts = output.split_whitespace().map(str::parse::<usize>);
    match (counts.next(), counts.next()) {
        (Some(Ok(ahead)), Some(Ok(behind))) => (ahead, behind),
        _ => (0, 0),
    }
}

/// Parse `git branch -a` into bare branch names.
pub fn parse_branches(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.trim_start_matches('*').trim())
        .filter(|line| !line.is_empty() && !line.contains("->"))
        .map(String::from)
        .collect()
}

/// Turn an `origin` URL into the repository's GitHub web page.
pub fn github_web_url(remote: &str) -> anyhow::Result<String> {
    let remote = remote.trim();
    let mut url = if let Some(rest) = remote.strip_prefix("ssh://git@") {
        format!("https://{rest}")
    } else if let Some(rest) = remote.strip_prefix("git@") {
        format!("https://{}", rest.replacen(':', "/", 1))
    } else {
        remote.to_string()
    };

    if let Some(stripped) = url.strip_suffix(".git") {
        url = stripped.to_string();
    }

    if !url.contains("github.com") {
        anyhow::bail!("not a GitHub repository: {remote}");
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_classification() {
        let output = "M  staged.rs\n M modified.rs\nMM both.rs\n?? new.rs\nA  added.rs\n D gone.rs\n";
        let entries = parse_status_porcelain(output);
        assert_eq!(entries.staged, vec!["staged.rs", "both.rs", "added.rs"]);
        assert_eq!(entries.modified, vec!["modified.rs", "both.rs", "gone.rs"]);
        assert_eq!(entries.untracked, vec!["new.rs"]);
    }

    #[test]
    fn test_parse_status_code_grid() {
        let codes = [' ', '?', 'M'];
        for index in codes {
            for worktree in codes {
                let line = format!("{index}{worktree} file.txt");
                let entries = parse_status_porcelain(&line);
                let untracked = index == '?' && worktree == '?';
                assert_eq!(entries.untracked.len(), usize::from(untracked), "{line:?}");
                assert_eq!(
                    entries.staged.len(),
                    usize::from(!untracked && index == 'M'),
                    "{line:?}"
                );
                assert_eq!(
                    entries.modified.len(),
                    usize::from(!untracked && worktree == 'M'),
                    "{line:?}"
                );
            }
        }
    }

    #[test]
    fn test_parse_status_skips_short_lines() {
        let entries = parse_status_porcelain("M\n\n??\n");
        assert_eq!(entries, StatusEntries::default());
    }

    #[test]
    fn test_parse_status_path_with_spaces() {
        let entries = parse_status_porcelain("?? my file.txt\n");
        assert_eq!(entries.untracked, vec!["my file.txt"]);
    }

    #[test]
    fn test_parse_ahead_behind() {
        assert_eq!(parse_ahead_behind("3\t1\n"), (3, 1));
        assert_eq!(parse_ahead_behind("0\t0"), (0, 0));
        assert_eq!(parse_ahead_behind(""), (0, 0));
        assert_eq!(
            parse_ahead_behind("fatal: no upstream configured for branch 'main'"),
            (0, 0)
        );
    }

    #[test]
    fn test_parse_branches() {
        let output = "  feature\n* main\n  remotes/origin/HEAD -> origin/main\n  remotes/origin/main\n";
        assert_eq!(
            parse_branches(output),
            vec!["feature", "main", "remotes/origin/main"]
        );
    }

    #[test]
    fn test_github_web_url_ssh() {
        assert_eq!(
            github_web_url("git@github.com:octo/repo.git\n").unwrap(),
            "https://github.com/octo/repo"
        );
        assert_eq!(
            github_web_url("ssh://git@github.com/octo/repo.git").unwrap(),
            "https://github.com/octo/repo"
        );
    }

    #[test]
    fn test_github_web_url_https() {
        assert_eq!(
            github_web_url("https://github.com/octo/repo.git").unwrap(),
            "https://github.com/octo/repo"
        );
        assert_eq!(
            github_web_url("https://github.com/octo/repo").unwrap(),
            "https://github.com/octo/repo"
        );
    }

    #[test]
    fn test_github_web_url_rejects_other_hosts() {
        let err = github_web_url("git@gitlab.com:octo/repo.git").unwrap_err();
        assert!(err.to_string().contains("not a GitHub repository"));
    }
}
