//! Configuration file parsing and settings resolution.
//!
//! Settings are layered, lowest precedence first: built-in defaults,
//! discovered config files, `WHOIS_CLI_*` environment variables, and
//! finally whatever the CLI applies on top. A missing or malformed file is
//! never an error for the invocation; it just contributes nothing.

use crate::error::WhoisError;
use crate::types::{Language, OutputMode, DEFAULT_TIMEOUT};
use crate::utils::parse_duration;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration loaded from a TOML file.
///
/// ```toml
/// [defaults]
/// lang = "ja"
/// output = "table"
/// color = true
/// timeout = "8s"
/// follow = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Display language code ("en", "ja")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    /// Output mode ("raw", "labeled", "conventional", "table")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Colorize terminal output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    /// Per-query timeout (as string, e.g., "5s", "2m", "1m30s")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Follow registrar referrals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow: Option<bool>,
}

/// Flat `config.json` layout kept for existing installs.
#[derive(Debug, Clone, Deserialize, Default)]
struct LegacyJsonConfig {
    lang: Option<String>,
    default_output: Option<String>,
    color: Option<bool>,
}

impl From<LegacyJsonConfig> for FileConfig {
    fn from(legacy: LegacyJsonConfig) -> Self {
        FileConfig {
            defaults: Some(DefaultsConfig {
                lang: legacy.lang,
                output: legacy.default_output,
                color: legacy.color,
                timeout: None,
                follow: None,
            }),
        }
    }
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub language: Language,
    pub output: OutputMode,
    pub color: bool,
    pub timeout: Duration,
    pub follow_referral: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::English,
            output: OutputMode::Labeled,
            color: true,
            timeout: DEFAULT_TIMEOUT,
            follow_referral: true,
        }
    }
}

impl Settings {
    /// Overlay file defaults. Unparseable values are skipped.
    pub fn apply_file(mut self, config: &FileConfig) -> Self {
        let Some(defaults) = &config.defaults else {
            return self;
        };

        if let Some(lang) = &defaults.lang {
            self.language = Language::from_code(lang);
        }
        if let Some(mode) = defaults.output.as_deref().and_then(OutputMode::from_name) {
            self.output = mode;
        }
        if let Some(color) = defaults.color {
            self.color = color;
        }
        if let Some(timeout) = defaults.timeout.as_deref().and_then(parse_duration) {
            self.timeout = timeout;
        }
        if let Some(follow) = defaults.follow {
            self.follow_referral = follow;
        }
        self
    }

    /// Overlay environment settings.
    pub fn apply_env(mut self, env_config: &EnvConfig) -> Self {
        if let Some(language) = env_config.language {
            self.language = language;
        }
        if let Some(output) = env_config.output {
            self.output = output;
        }
        if let Some(color) = env_config.color {
            self.color = color;
        }
        if let Some(timeout) = env_config.timeout {
            self.timeout = timeout;
        }
        if let Some(follow) = env_config.follow {
            self.follow_referral = follow;
        }
        self
    }
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Log which files were picked up
    pub verbose: bool,
}

impl ConfigManager {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    ///
    /// Files ending in `.json` are read in the flat legacy layout; anything
    /// else is TOML.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, WhoisError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(WhoisError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            WhoisError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            serde_json::from_str::<LegacyJsonConfig>(&content)?.into()
        } else {
            toml::from_str::<FileConfig>(&content)?
        };

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// Unreadable or malformed files are skipped with a warning.
    pub fn discover_and_load(&self) -> FileConfig {
        let mut merged = FileConfig::default();

        let candidates = [
            self.get_legacy_config_path(),
            self.get_xdg_config_path(),
            self.get_global_config_path(),
            self.get_local_config_path(),
        ];

        for path in candidates.into_iter().flatten() {
            match self.load_file(&path) {
                Ok(config) => {
                    if self.verbose {
                        debug!("loaded config file {}", path.display());
                    }
                    merged = merge_configs(merged, config);
                }
                Err(e) => warn!("ignoring config file {}: {}", path.display(), e),
            }
        }

        merged
    }

    /// Resolve settings for this invocation.
    ///
    /// An explicit path replaces discovery. Either way, failures fall back
    /// to defaults rather than aborting.
    pub fn resolve(&self, explicit: Option<&Path>) -> Settings {
        self.resolve_with_env(explicit, &load_env_config())
    }

    fn resolve_with_env(&self, explicit: Option<&Path>, env_config: &EnvConfig) -> Settings {
        let file_config = match explicit {
            Some(path) => self.load_file(path).unwrap_or_else(|e| {
                warn!("ignoring config file {}: {}", path.display(), e);
                FileConfig::default()
            }),
            None => self.discover_and_load(),
        };

        Settings::default()
            .apply_file(&file_config)
            .apply_env(env_config)
    }

    fn get_legacy_config_path(&self) -> Option<PathBuf> {
        existing(PathBuf::from("config.json"))
    }

    /// Looks for configuration files in the current directory.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        ["./whois-cli.toml", "./.whois-cli.toml"]
            .iter()
            .find_map(|candidate| existing(PathBuf::from(candidate)))
    }

    /// Looks for configuration files in the user's home directory.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        let home = env::var_os("HOME")?;
        [".whois-cli.toml", "whois-cli.toml"]
            .iter()
            .find_map(|candidate| existing(Path::new(&home).join(candidate)))
    }

    /// Follows the XDG Base Directory Specification.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        existing(config_dir.join("whois-cli").join("config.toml"))
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Merge two configurations. Values from `higher` win.
fn merge_configs(lower: FileConfig, higher: FileConfig) -> FileConfig {
    let defaults = match (lower.defaults, higher.defaults) {
        (Some(lower), Some(higher)) => Some(DefaultsConfig {
            lang: higher.lang.or(lower.lang),
            output: higher.output.or(lower.output),
            color: higher.color.or(lower.color),
            timeout: higher.timeout.or(lower.timeout),
            follow: higher.follow.or(lower.follow),
        }),
        (lower, higher) => higher.or(lower),
    };

    FileConfig { defaults }
}

/// Settings taken from `WHOIS_CLI_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub language: Option<Language>,
    pub output: Option<OutputMode>,
    pub color: Option<bool>,
    pub timeout: Option<Duration>,
    pub follow: Option<bool>,
}

/// Load configuration from environment variables.
///
/// Invalid values are logged and ignored. `NO_COLOR` (any non-empty value)
/// disables color unless `WHOIS_CLI_COLOR` says otherwise.
pub fn load_env_config() -> EnvConfig {
    env_config_from(|name| env::var(name).ok())
}

fn env_config_from<F: Fn(&str) -> Option<String>>(var: F) -> EnvConfig {
    let mut env_config = EnvConfig::default();

    if let Some(lang) = var("WHOIS_CLI_LANG").filter(|v| !v.trim().is_empty()) {
        env_config.language = Some(Language::from_code(&lang));
    }

    if let Some(output) = var("WHOIS_CLI_OUTPUT") {
        match OutputMode::from_name(&output) {
            Some(mode) => env_config.output = Some(mode),
            None => warn!("invalid WHOIS_CLI_OUTPUT='{}', use raw/labeled/table", output),
        }
    }

    if var("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        env_config.color = Some(false);
    }
    if let Some(color) = var("WHOIS_CLI_COLOR") {
        match parse_bool(&color) {
            Some(enabled) => env_config.color = Some(enabled),
            None => warn!("invalid WHOIS_CLI_COLOR='{}', use true/false", color),
        }
    }

    if let Some(timeout) = var("WHOIS_CLI_TIMEOUT") {
        match parse_duration(&timeout) {
            Some(duration) => env_config.timeout = Some(duration),
            None => warn!(
                "invalid WHOIS_CLI_TIMEOUT='{}', use format like '5s', '2m'",
                timeout
            ),
        }
    }

    if let Some(follow) = var("WHOIS_CLI_FOLLOW") {
        match parse_bool(&follow) {
            Some(enabled) => env_config.follow = Some(enabled),
            None => warn!("invalid WHOIS_CLI_FOLLOW='{}', use true/false", follow),
        }
    }

    env_config
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
