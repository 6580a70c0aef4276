pub mod cli;
pub mod mock;
pub mod provider;

pub use cli::{ProcessRunner, is_installed};
pub use provider::{CommandOutput, CommandRunner};
