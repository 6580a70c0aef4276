use anyhow::Result;

/// Captured result of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Stdout followed by stderr, trimmed.
    pub fn combined(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (true, _) => stderr.to_string(),
            (false, true) => stdout.to_string(),
            (false, false) => format!("{stdout}\n{stderr}"),
        }
    }

    /// Trimmed stdout on success, the combined text as an error otherwise.
    pub fn into_result(self) -> Result<String> {
        if self.success {
            Ok(self.stdout.trim().to_string())
        } else {
            anyhow::bail!("{}", self.combined())
        }
    }
}

pub trait CommandRunner: Send + Sync {
    /// Run `program` to completion and capture its output. Failure to spawn is
    /// reported as an unsuccessful output, never as a panic.
    fn run(&self, program: &str, args: &[&str]) -> CommandOutput;

    /// Run `program` attached to the current terminal.
    fn run_interactive(&self, program: &str, args: &[&str]) -> Result<()>;
}
