//! Console configuration.

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use pagecast_cache::PostCacheConfig;
use pagecast_core::Objective;
use pagecast_error::{ConfigError, PagecastError, PagecastResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../pagecast.toml");

/// Where the publishing service lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix
    #[setters(into)]
    base_url: String,
    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    /// Page the user is sent to when the session is rejected
    #[serde(default = "default_login_url")]
    #[setters(into)]
    login_url: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_login_url() -> String {
    "/login".to_string()
}

impl ApiConfig {
    /// Service at `base_url` with default timeout and login page.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout_secs(),
            login_url: default_login_url(),
        }
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Absolute URL of `route` (which starts with `/`).
    pub fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), route)
    }
}

/// Publish progress indicator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PublishConfig {
    /// Delay between progress ticks (milliseconds)
    #[serde(default = "default_tick_ms")]
    progress_tick_ms: u64,
    /// Highest value reached before the response arrives
    #[serde(default = "default_progress_cap")]
    progress_cap: u8,
}

fn default_tick_ms() -> u64 {
    500
}

fn default_progress_cap() -> u8 {
    90
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            progress_tick_ms: default_tick_ms(),
            progress_cap: default_progress_cap(),
        }
    }
}

/// Highest `progress_cap`; 100 is only shown once the response arrives.
const MAX_PROGRESS_CAP: u8 = 99;

impl PublishConfig {
    /// Delay between progress ticks.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms)
    }

    /// Reject a zero tick or a cap that would reach 100 early.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.progress_tick_ms == 0 {
            return Err(ConfigError::invalid_value(
                "publish.progress_tick_ms",
                "must be at least 1",
            ));
        }
        if self.progress_cap > MAX_PROGRESS_CAP {
            return Err(ConfigError::invalid_value(
                "publish.progress_cap",
                format!("must be at most {}, got {}", MAX_PROGRESS_CAP, self.progress_cap),
            ));
        }
        Ok(())
    }
}

/// Values pre-filled in the boost form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters)]
pub struct BoostDefaults {
    #[serde(default)]
    objective: Objective,
    #[serde(default = "default_daily_budget")]
    daily_budget: f64,
    #[serde(default = "default_duration_days")]
    duration_days: u32,
}

fn default_daily_budget() -> f64 {
    20.0
}

fn default_duration_days() -> u32 {
    7
}

impl Default for BoostDefaults {
    fn default() -> Self {
        Self {
            objective: Objective::default(),
            daily_budget: default_daily_budget(),
            duration_days: default_duration_days(),
        }
    }
}

/// Whether stale cached data may stand in for a failed fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct FallbackConfig {
    #[serde(default)]
    enabled: bool,
}

/// Complete console configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct PagecastConfig {
    api: ApiConfig,
    #[serde(default)]
    cache: PostCacheConfig,
    #[serde(default)]
    publish: PublishConfig,
    #[serde(default)]
    boost: BoostDefaults,
    #[serde(default)]
    fallback: FallbackConfig,
}

impl PagecastConfig {
    /// Configuration pointing at `api` with every other section defaulted.
    pub fn new(api: ApiConfig) -> Self {
        Self {
            api,
            cache: PostCacheConfig::default(),
            publish: PublishConfig::default(),
            boost: BoostDefaults::default(),
            fallback: FallbackConfig::default(),
        }
    }

    fn validated(self) -> PagecastResult<Self> {
        self.publish.validate()?;
        Ok(self)
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a value
    /// is out of range.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> PagecastResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                PagecastError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize::<Self>()
            .map_err(|e| {
                PagecastError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?
            .validated()
    }

    /// Load configuration with precedence: environment > current dir > home dir > bundled defaults.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (pagecast.toml shipped with the crate)
    /// 2. User config in home directory (~/.config/pagecast/pagecast.toml)
    /// 3. User config in current directory (./pagecast.toml)
    /// 4. `PAGECAST_*` environment variables, `__` separating sections
    ///    (e.g. `PAGECAST_API__BASE_URL`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pagecast_client::PagecastConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = PagecastConfig::load()?;
    /// println!("Service at {}", config.api().base_url());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> PagecastResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/pagecast/pagecast.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("pagecast").required(false))
            .add_source(
                Environment::with_prefix("PAGECAST")
                    .prefix_separator("_")
                    .separator("__"),
            );

        builder
            .build()
            .map_err(|e| {
                PagecastError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize::<Self>()
            .map_err(|e| {
                PagecastError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?
            .validated()
    }
}
