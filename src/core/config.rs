//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.ignite-feed/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::feed::{Author, DEFAULT_LINK_HOST, Post, seed_posts};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
    /// Replaces the built-in feed when non-empty.
    #[serde(default)]
    pub posts: Vec<Post>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub link_host: Option<String>,
    pub refresh_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ProfileConfig {
    pub name: Option<String>,
    pub role: Option<String>,
    pub avatar_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

/// How often the feed is redrawn while idle, so relative times stay fresh.
pub const DEFAULT_REFRESH_SECS: u64 = 30;
pub const DEFAULT_PROFILE_NAME: &str = "Leonardo Barrocal";
pub const DEFAULT_PROFILE_ROLE: &str = "Web Developer";
pub const DEFAULT_PROFILE_AVATAR: &str = "https://github.com/leohb07.png";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub link_host: String,
    pub refresh_secs: u64,
    /// Signed-in user: sidebar profile and author of new comments.
    pub profile: Author,
    pub posts: Vec<Post>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.ignite-feed/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ignite-feed").join("config.toml"))
}

/// Load config from the default location.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FeedConfig::default()`.
pub fn load_config() -> Result<FeedConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path, true),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(FeedConfig::default())
        }
    }
}

/// Load config from an explicit path.
///
/// A missing file yields defaults; `generate` controls whether the template
/// is written in its place. A malformed file returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path, generate: bool) -> Result<FeedConfig, ConfigError> {
    if !path.exists() {
        if generate {
            info!("No config file found, generating default at {}", path.display());
            generate_default_config(path);
        } else {
            warn!("Config file {} not found, using defaults", path.display());
        }
        return Ok(FeedConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: FeedConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Ignite Feed Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# link_host = "github.com"           # Or set IGNITE_FEED_LINK_HOST
# refresh_secs = 30                  # Idle redraw interval for relative times

# [profile]
# name = "Leonardo Barrocal"         # Or set IGNITE_FEED_PROFILE_NAME
# role = "Web Developer"             # Or set IGNITE_FEED_PROFILE_ROLE
# avatar_url = "https://github.com/leohb07.png"

# Replace the built-in feed with your own posts:
# [[posts]]
# id = 1
# published_at = "2022-09-10T09:00:00"
# link_url = "leohb07"
# author = { name = "Leonardo Barrocal", role = "Desenvolvedor", avatar_url = "https://github.com/leohb07.png" }
# content = [
#     { type = "paragraph", content = "Fala galeraa 👋" },
#     { type = "link", content = "github/leohb07" },
# ]
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_link_host` comes from the `--link-host` flag (None = not specified).
pub fn resolve(config: &FeedConfig, cli_link_host: Option<&str>) -> ResolvedConfig {
    resolve_with_env(config, cli_link_host, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with environment lookups supplied by the caller.
pub fn resolve_with_env(
    config: &FeedConfig,
    cli_link_host: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Link host: CLI → env → config → default
    let link_host = cli_link_host
        .map(|s| s.to_string())
        .or_else(|| env("IGNITE_FEED_LINK_HOST"))
        .or_else(|| config.general.link_host.clone())
        .unwrap_or_else(|| DEFAULT_LINK_HOST.to_string());

    // Profile fields: env → config → default
    let profile = Author {
        name: env("IGNITE_FEED_PROFILE_NAME")
            .or_else(|| config.profile.name.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE_NAME.to_string()),
        role: env("IGNITE_FEED_PROFILE_ROLE")
            .or_else(|| config.profile.role.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE_ROLE.to_string()),
        avatar_url: config
            .profile
            .avatar_url
            .clone()
            .unwrap_or_else(|| DEFAULT_PROFILE_AVATAR.to_string()),
    };

    let posts = if config.posts.is_empty() {
        seed_posts()
    } else {
        config.posts.clone()
    };

    ResolvedConfig {
        link_host,
        refresh_secs: config
            .general
            .refresh_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REFRESH_SECS),
        profile,
        posts,
    }
}
