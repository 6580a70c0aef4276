use super::provider::{CommandOutput, CommandRunner};
use anyhow::Result;
use std::{collections::HashMap, sync::Mutex};

/// Scripted runner for tests. Responses are keyed by the full command line
/// (`"git push --tags"`); anything unscripted succeeds with empty output.
#[derive(Default)]
pub struct MockRunner {
    pub responses: Mutex<HashMap<String, CommandOutput>>,
    pub calls: Mutex<Vec<String>>,
    pub interactive_result: Mutex<Option<Result<()>>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(self, command_line: &str, output: CommandOutput) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(command_line.to_string(), output);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_called(&self, command_line: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|c| c == command_line)
    }

    fn key(program: &str, args: &[&str]) -> String {
        if args.is_empty() {
            program.to_string()
        } else {
            format!("{program} {}", args.join(" "))
        }
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str]) -> CommandOutput {
        let key = Self::key(program, args);
        self.calls.lock().unwrap().push(key.clone());
        self.responses
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| CommandOutput::ok(""))
    }

    fn run_interactive(&self, program: &str, args: &[&str]) -> Result<()> {
        self.calls.lock().unwrap().push(Self::key(program, args));
        self.interactive_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Ok(()))
    }
}
