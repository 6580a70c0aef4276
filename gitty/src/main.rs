mod logging;

use anyhow::Result;
use clap::Parser;
use gitty_core::{
    config::{self, Config},
    constants::{GH, GIT, LAZYGIT},
    exec::{ProcessRunner, is_installed},
    flow::PublishDefaults,
    git::Git,
    state::AppState,
    task::TaskContext,
};
use gitty_tui::Theme;
use std::{path::PathBuf, process::ExitCode, sync::Arc};

#[derive(Parser)]
#[command(
    version,
    about = "Menu-driven terminal front-end for git, gh and lazygit with AI commit messages"
)]
struct Cli {
    /// Override path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, default_value = logging::DEFAULT_LOG_LEVEL)]
    log_level: log::LevelFilter,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::setup_logging(cli.log_level) {
        eprintln!("warning: logging disabled: {e}");
    }

    if !is_installed(GIT) {
        eprintln!("gitty requires git, but it was not found on PATH");
        log::error!("git not found on PATH");
        return ExitCode::from(1);
    }
    for tool in [GH, LAZYGIT] {
        if !is_installed(tool) {
            log::warn!("{tool} not found on PATH; related menu actions will fail");
        }
    }

    let config = config::load_or_default(cli.config.as_deref());

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Name the publish form suggests: the directory gitty was started in.
fn default_repo_name() -> String {
    std::env::current_dir()
        .ok()
        .and_then(|dir| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_default()
}

fn run(config: Config) -> Result<()> {
    let theme = Theme::from_config(&config.ui);
    let mut state = AppState::new(PublishDefaults {
        name: default_repo_name(),
        visibility: config.github.default_visibility,
    });
    let ctx = TaskContext {
        git: Git::new(Arc::new(ProcessRunner::new())),
        github_user: std::env::var("GITHUB_USER").ok().filter(|u| !u.is_empty()),
        config,
    };

    let mut terminal = ratatui::init();
    let result = gitty_tui::run(&mut terminal, &mut state, &ctx, &theme);
    ratatui::restore();
    result
}
