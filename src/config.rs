//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/hackmyresume/hackmyresume.toml`
//! 3. Local config: `<dir>/.hackmyresume.toml` (usually the working directory)
//! 4. Environment variables: `HMR_*` prefix
//!
//! Command-line flags override all of these; see [`Settings::default_options`].

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, CssMode, Options, ResumeFormat};

/// Unified configuration for hackmyresume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Default theme for build (default: modern)
    pub theme: String,
    /// Default format for new (default: FRESH)
    pub format: ResumeFormat,
    /// Default stylesheet handling for build (default: embed)
    pub css: CssMode,
    /// Prettify generated HTML unless --nopretty (default: true)
    pub prettify: bool,
    /// Start every run silent (default: false)
    pub silent: bool,
    /// Manual page shown by --help instead of the built-in one
    pub help_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        let options = Options::default();
        Self {
            theme: options.theme,
            format: options.format,
            css: options.css,
            prettify: options.prettify,
            silent: options.silent,
            help_file: None,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub theme: Option<String>,
    pub format: Option<ResumeFormat>,
    pub css: Option<CssMode>,
    pub prettify: Option<bool>,
    pub silent: Option<bool>,
    pub help_file: Option<PathBuf>,
}

/// Get the XDG config directory for hackmyresume.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "hackmyresume").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("hackmyresume.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".hackmyresume.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Options every invocation starts from before flags are applied.
    pub fn default_options(&self) -> Options {
        Options {
            theme: self.theme.clone(),
            format: self.format,
            prettify: self.prettify,
            silent: self.silent,
            css: self.css,
            help: false,
            version: false,
        }
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(path) = &self.help_file {
            let expanded = expand_env_vars(path.to_string_lossy().as_ref());
            self.help_file = Some(PathBuf::from(expanded));
        }
    }

    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            theme: overlay.theme.clone().unwrap_or_else(|| self.theme.clone()),
            format: overlay.format.unwrap_or(self.format),
            css: overlay.css.unwrap_or(self.css),
            prettify: overlay.prettify.unwrap_or(self.prettify),
            silent: overlay.silent.unwrap_or(self.silent),
            help_file: overlay
                .help_file
                .clone()
                .or_else(|| self.help_file.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.hackmyresume.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), local_dir)
    }

    /// Load settings from an explicit global config path.
    ///
    /// Missing files are skipped; malformed files are errors.
    pub fn load_layers(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("local config: {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply HMR_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("HMR"))
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value::<String>(&config, "theme")? {
            settings.theme = val;
        }
        if let Some(val) = env_value::<String>(&config, "format")? {
            settings.format = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("HMR_FORMAT: {e}"),
            })?;
        }
        if let Some(val) = env_value::<String>(&config, "css")? {
            settings.css = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("HMR_CSS: {e}"),
            })?;
        }
        if let Some(val) = env_value::<bool>(&config, "prettify")? {
            settings.prettify = val;
        }
        if let Some(val) = env_value::<bool>(&config, "silent")? {
            settings.silent = val;
        }
        if let Some(val) = env_value::<String>(&config, "help_file")? {
            settings.help_file = Some(PathBuf::from(val));
        }

        Ok(settings)
    }
}

/// Unset variables are `None`; set but unparsable ones are errors.
fn env_value<T: DeserializeOwned>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("HMR_{}: {e}", key.to_uppercase()),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
