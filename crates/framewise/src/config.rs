//! Layered configuration for framewise.
//!
//! Sources, lowest precedence first:
//! - Bundled defaults (include_str! from framewise.toml)
//! - `~/.config/framewise/framewise.toml`
//! - `./framewise.toml`
//! - `FRAMEWISE_<SECTION>__<KEY>` environment variables
//!
//! Command line flags are applied last through [`ConfigOverrides`].

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use framewise_error::{ConfigError, FramewiseResult};
use framewise_retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../framewise.toml");

/// `[analysis]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(deny_unknown_fields)]
pub struct AnalysisSettings {
    /// Seconds between sampled frames
    interval_seconds: f64,
    /// Prior narrations sent with each frame (K)
    context_window: usize,
    /// Base system prompt
    #[serde(default)]
    system_prompt: Option<String>,
    /// Extracted frame directory
    frames_dir: PathBuf,
    /// Report directory
    output_dir: PathBuf,
    /// Task description directory
    tasks_dir: PathBuf,
}

impl AnalysisSettings {
    /// The system prompt, treating an empty string as none.
    pub fn base_system_prompt(&self) -> Option<&str> {
        self.system_prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// `[provider]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(deny_unknown_fields)]
pub struct ProviderSettings {
    /// Vision model name
    model: String,
    /// Chat completions endpoint
    endpoint: String,
    /// Environment variable holding the API key
    api_key_env: String,
}

impl ProviderSettings {
    /// Read the API key from the configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or blank.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::new(format!("{} not set", self.api_key_env)))
    }
}

/// Complete framewise configuration.
///
/// # Examples
///
/// ```
/// use framewise::FramewiseConfig;
///
/// let config = FramewiseConfig::from_toml_str("[analysis]\ncontext_window = 3\n").unwrap();
/// assert_eq!(*config.analysis().context_window(), 3);
/// assert_eq!(*config.analysis().interval_seconds(), 2.0);
/// assert_eq!(config.provider().model(), "gpt-4o-mini");
/// ```
///
/// Unknown keys are rejected inside each section. At the top level they are
/// ignored, since every `FRAMEWISE_*` variable in the environment lands there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct FramewiseConfig {
    /// Sampling and chaining settings
    analysis: AnalysisSettings,
    /// Retry budget and backoff
    retry: RetryPolicy,
    /// Inference provider settings
    provider: ProviderSettings,
}

impl FramewiseConfig {
    /// Load configuration from every source, then validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or a value is out of range.
    pub fn load() -> FramewiseResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/framewise/framewise.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("framewise").required(false))
            .add_source(Self::environment());

        Self::finish(builder)
    }

    /// Load bundled defaults overlaid with the `FRAMEWISE_*` entries of `vars`.
    ///
    /// Reads `vars` in place of the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be parsed or fails validation.
    pub fn from_env_vars<I, K, V>(vars: I) -> FramewiseResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let builder = Self::defaults().add_source(Self::environment().source(Some(vars)));
        Self::finish(builder)
    }

    /// Load bundled defaults overlaid with a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, malformed, or fails validation.
    pub fn from_file(path: impl AsRef<Path>) -> FramewiseResult<Self> {
        let builder = Self::defaults().add_source(File::from(path.as_ref()).required(true));
        Self::finish(builder)
    }

    /// Load bundled defaults overlaid with TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is malformed or fails validation.
    pub fn from_toml_str(toml: &str) -> FramewiseResult<Self> {
        let builder = Self::defaults().add_source(File::from_str(toml, FileFormat::Toml));
        Self::finish(builder)
    }

    fn environment() -> Environment {
        Environment::with_prefix("FRAMEWISE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> FramewiseResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// - `analysis.interval_seconds` must be finite and above zero
    /// - `analysis.context_window` must be at least 1
    /// - `retry.max_attempts` must be at least 1
    /// - `provider.model` and `provider.api_key_env` must not be empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let interval = self.analysis.interval_seconds;
        if !interval.is_finite() || interval <= 0.0 {
            return Err(ConfigError::new(format!(
                "analysis.interval_seconds must be above zero, got {}",
                interval
            )));
        }
        if self.analysis.context_window == 0 {
            return Err(ConfigError::new("analysis.context_window must be at least 1"));
        }
        self.retry.validate()?;
        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::new("provider.model must not be empty"));
        }
        if self.provider.api_key_env.trim().is_empty() {
            return Err(ConfigError::new("provider.api_key_env must not be empty"));
        }
        Ok(())
    }

    /// Apply command line overrides and re-validate.
    ///
    /// # Errors
    ///
    /// Returns an error if an override puts a value out of range.
    pub fn apply(&mut self, overrides: ConfigOverrides) -> Result<(), ConfigError> {
        if let Some(interval) = overrides.interval_seconds {
            self.analysis.interval_seconds = interval;
        }
        if let Some(window) = overrides.context_window {
            self.analysis.context_window = window;
        }
        if let Some(prompt) = overrides.system_prompt {
            self.analysis.system_prompt = Some(prompt);
        }
        if let Some(dir) = overrides.frames_dir {
            self.analysis.frames_dir = dir;
        }
        if let Some(dir) = overrides.output_dir {
            self.analysis.output_dir = dir;
        }
        if let Some(model) = overrides.model {
            self.provider.model = model;
        }
        if let Some(attempts) = overrides.max_attempts {
            self.retry = RetryPolicy::builder()
                .max_attempts(attempts)
                .base_delay_ms(*self.retry.base_delay_ms())
                .jitter(*self.retry.jitter())
                .build();
        }
        self.validate()
    }
}

/// Values supplied on the command line, each replacing its configured counterpart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// `--interval`
    pub interval_seconds: Option<f64>,
    /// `--context-window`
    pub context_window: Option<usize>,
    /// `--system-prompt`
    pub system_prompt: Option<String>,
    /// `--frames-dir`
    pub frames_dir: Option<PathBuf>,
    /// `--output-dir`
    pub output_dir: Option<PathBuf>,
    /// `--model`
    pub model: Option<String>,
    /// `--max-attempts`
    pub max_attempts: Option<u32>,
}
