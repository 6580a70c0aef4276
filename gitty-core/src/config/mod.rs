use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::git::Identity;

pub const APP_NAME: &str = "gitty";

pub fn config_dir() -> PathBuf {
    // Use ~/.config on both Linux and macOS (not ~/Library/Application Support)
    #[cfg(unix)]
    {
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config_home.is_empty()
        {
            return PathBuf::from(xdg_config_home).join(APP_NAME);
        }
        dirs::home_dir()
            .expect("Unable to find home directory")
            .join(".config")
            .join(APP_NAME)
    }
    #[cfg(windows)]
    {
        dirs::config_dir()
            .expect("Unable to find config directory")
            .join(APP_NAME)
    }
}

pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub git: GitConfig,
    pub ai: AiConfig,
    pub ui: UiConfig,
    pub github: GithubConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    pub user_name: String,
    pub user_email: String,
    pub editor: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            user_email: String::new(),
            editor: "vim".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    OpenAi,
    Anthropic,
}

impl AiProvider {
    /// Environment variable consulted when no key is configured.
    pub fn api_key_env(self) -> &'static str {
        match self {
            AiProvider::OpenAi => "OPENAI_API_KEY",
            AiProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub provider: AiProvider,
    pub model: String,
    pub api_key: String,
    /// Diffs longer than this many bytes are truncated before being sent.
    pub max_diff_size: usize,
    pub temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::OpenAi,
            model: "gpt-4o-mini".to_string(),
            api_key: String::new(),
            max_diff_size: 4000,
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Charm,
    Dracula,
    Catppuccin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: ThemeName,
    pub show_icons: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeName::Charm,
            show_icons: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Visibility::Public => Visibility::Private,
            Visibility::Private => Visibility::Public,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub default_visibility: Visibility,
    /// Apply `[git]` user_name/user_email to commits gitty makes.
    pub normalize_author: bool,
}

impl Config {
    /// The configured identity, when both name and email are set.
    pub fn identity(&self) -> Option<Identity> {
        let name = self.git.user_name.trim();
        let email = self.git.user_email.trim();
        (!name.is_empty() && !email.is_empty()).then(|| Identity {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    /// Identity to force on commits, if `normalize_author` asks for it.
    pub fn commit_identity(&self) -> Option<Identity> {
        if self.github.normalize_author {
            self.identity()
        } else {
            None
        }
    }

    /// Fill a blank API key from the provider's environment variable. The
    /// result only lives in memory and is never written back.
    fn apply_env_api_key(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.ai.api_key.trim().is_empty()
            && let Some(key) = lookup(self.ai.provider.api_key_env())
        {
            self.ai.api_key = key;
        }
    }
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    let config: Config = toml::from_str(s)?;
    Ok(config)
}

pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Load the config file, writing a default one first if none exists.
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    let path = config_override.map_or_else(config_file, Path::to_path_buf);
    if !path.exists() {
        log::info!("no config at {}, writing defaults", path.display());
        save_config(&Config::default(), &path)?;
    }
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut config = load_config_from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    config.apply_env_api_key(|name| std::env::var(name).ok().filter(|v| !v.is_empty()));
    Ok(config)
}

/// Like [`load_config`], but a broken config never stops the program.
pub fn load_or_default(config_override: Option<&Path>) -> Config {
    match load_config(config_override) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("using default config: {e:#}");
            let mut config = Config::default();
            config.apply_env_api_key(|name| std::env::var(name).ok().filter(|v| !v.is_empty()));
            config
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.git.editor, "vim");
        assert_eq!(config.ai.provider, AiProvider::OpenAi);
        assert_eq!(config.ai.model, "gpt-4o-mini");
        assert_eq!(config.ai.max_diff_size, 4000);
        assert!((config.ai.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.ui.theme, ThemeName::Charm);
        assert!(config.ui.show_icons);
        assert_eq!(config.github.default_visibility, Visibility::Public);
        assert!(!config.github.normalize_author);
    }

    #[test]
    fn test_partial_sections() {
        let config = load_config_from_str(
            r#"
[ai]
provider = "anthropic"
model = "claude-3-5-haiku-latest"

[ui]
theme = "dracula"
show_icons = false

[github]
default_visibility = "private"
"#,
        )
        .unwrap();
        assert_eq!(config.ai.provider, AiProvider::Anthropic);
        assert_eq!(config.ai.model, "claude-3-5-haiku-latest");
        assert_eq!(config.ai.max_diff_size, 4000);
        assert_eq!(config.ui.theme, ThemeName::Dracula);
        assert!(!config.ui.show_icons);
        assert_eq!(config.github.default_visibility, Visibility::Private);
        assert_eq!(config.git.editor, "vim");
    }

    #[test]
    fn test_invalid_enum_rejected() {
        let result = load_config_from_str("[ui]\ntheme = \"neon\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = load_config(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(config.ui, UiConfig::default());

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(load_config_from_str(&written).unwrap().git, GitConfig::default());
    }

    #[test]
    fn test_unparsable_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ai\nmodel = ").unwrap();
        assert!(load_config(Some(&path)).is_err());
        let config = load_or_default(Some(&path));
        assert_eq!(config.ai.model, "gpt-4o-mini");
    }

    #[test]
    fn test_env_api_key_fills_blank_key_only() {
        let mut config = Config::default();
        config.apply_env_api_key(|name| (name == "OPENAI_API_KEY").then(|| "sk-env".to_string()));
        assert_eq!(config.ai.api_key, "sk-env");

        let mut config = Config::default();
        config.ai.api_key = "sk-file".into();
        config.apply_env_api_key(|_| Some("sk-env".to_string()));
        assert_eq!(config.ai.api_key, "sk-file");

        let mut config = Config::default();
        config.ai.provider = AiProvider::Anthropic;
        config.apply_env_api_key(|name| (name == "ANTHROPIC_API_KEY").then(|| "ak".to_string()));
        assert_eq!(config.ai.api_key, "ak");
    }

    #[test]
    fn test_identity_requires_name_and_email() {
        let mut config = Config::default();
        assert!(config.identity().is_none());
        config.git.user_name = "Someone".into();
        assert!(config.identity().is_none());
        config.git.user_email = "someone@example.com".into();
        assert_eq!(config.identity().unwrap().name, "Someone");
        assert!(config.commit_identity().is_none());
        config.github.normalize_author = true;
        assert!(config.commit_identity().is_some());
    }

    #[test]
    fn test_config_dir_respects_xdg_override() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("custom-config");

        unsafe { std::env::set_var("XDG_CONFIG_HOME", &custom) };
        let result = config_file();
        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };

        assert_eq!(result, custom.join(APP_NAME).join("config.toml"));
    }
}
