pub mod action;
pub mod ai;
pub mod config;
pub mod constants;
pub mod controller;
pub mod effect;
pub mod event;
pub mod exec;
pub mod flow;
pub mod git;
pub mod input;
pub mod menu;
pub mod state;
pub mod task;

// Re-export commonly used types at crate root
pub use action::Action;
pub use config::Config;
pub use effect::{Effect, ExternalTool};
pub use event::AppEvent;
pub use exec::{CommandRunner, ProcessRunner};
pub use flow::SubFlow;
pub use git::{Git, RepositoryStatus};
pub use menu::{MENU_ENTRIES, MenuAction};
pub use state::{AppState, Mode, Severity};
pub use task::{Task, TaskContext, TaskOutcome};
