use std::path::PathBuf;

const APP_NAME: &str = "gitty";
const LOG_FILE_NAME: &str = "gitty.log";

pub const DEFAULT_LOG_LEVEL: &str = "warn";

pub fn cache_dir() -> PathBuf {
    #[cfg(unix)]
    {
        if let Ok(xdg_cache_home) = std::env::var("XDG_CACHE_HOME")
            && !xdg_cache_home.is_empty()
        {
            return PathBuf::from(xdg_cache_home).join(APP_NAME);
        }
        dirs::home_dir()
            .expect("Unable to find home directory")
            .join(".cache")
            .join(APP_NAME)
    }
    #[cfg(windows)]
    {
        dirs::cache_dir().map_or_else(|| std::env::temp_dir().join(APP_NAME), |c| c.join(APP_NAME))
    }
}

pub fn default_log_file() -> PathBuf {
    cache_dir().join(LOG_FILE_NAME)
}

/// Send all `log` output to a rotating file so nothing reaches the terminal
/// while the TUI owns it.
pub fn setup_logging(level: log::LevelFilter) -> anyhow::Result<PathBuf> {
    let log_file = default_log_file();
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    simple_log::file(log_file.to_string_lossy().into_owned(), level, 10, 10)
        .map_err(|e| anyhow::anyhow!(e))?;
    log::info!("gitty {} started (log level {level})", env!("CARGO_PKG_VERSION"));
    Ok(log_file)
}
