use std::time::Duration;

/// Branch name reported when git has none (unborn or detached HEAD).
pub const DEFAULT_BRANCH: &str = "main";

/// How long a status message stays in the header.
pub const MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Commit message used when publishing pending changes to an existing remote.
pub const UPDATE_COMMIT_MESSAGE: &str = "Update";

pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

pub const LAZYGIT: &str = "lazygit";
pub const GH: &str = "gh";
pub const GIT: &str = "git";
