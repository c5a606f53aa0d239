//! Configuration structures and loading.

use anigen_error::{AnigenResult, ConfigError};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../anigen.toml");

/// Base URLs of the three remote services.
///
/// # Example
///
/// ```toml
/// [services]
/// parser_url = "http://localhost:5001"
/// speech_url = "http://localhost:5002"
/// renderer_url = "http://localhost:5003"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, derive_getters::Getters)]
pub struct ServicesConfig {
    /// Script parser, serving `POST /parse`
    parser_url: String,
    /// Speech synthesizer, serving `POST /generate_tts`
    speech_url: String,
    /// Video renderer, serving `POST /render`
    renderer_url: String,
}

/// Where and how the session is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, derive_getters::Getters)]
pub struct StorageConfig {
    /// Session directory; the platform data directory when unset
    #[serde(default)]
    session_dir: Option<PathBuf>,
    /// Schema version; raising it wipes every stored slot
    schema_version: u32,
}

impl StorageConfig {
    /// Session directory to open, resolving the platform default.
    pub fn resolved_session_dir(&self) -> PathBuf {
        match &self.session_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .map(|d| d.join("anigen").join("session"))
                .unwrap_or_else(|| PathBuf::from(".anigen")),
        }
    }
}

/// Speech generation pacing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, derive_getters::Getters)]
pub struct SpeechConfig {
    /// Requests issued concurrently per group
    batch_size: usize,
    /// Pause between groups, in milliseconds
    batch_pause_ms: u64,
    /// How long to wait for a stored clip to become readable, in milliseconds
    clip_ready_timeout_ms: u64,
}

impl SpeechConfig {
    /// Pause between groups.
    pub fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause_ms)
    }

    /// Clip readiness timeout.
    pub fn clip_ready_timeout(&self) -> Duration {
        Duration::from_millis(self.clip_ready_timeout_ms)
    }
}

/// Upload size limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, derive_getters::Getters)]
pub struct UploadsConfig {
    /// Largest accepted character or background image
    max_image_bytes: u64,
    /// Largest accepted BGM track
    max_bgm_bytes: u64,
}

/// Top-level Anigen configuration.
///
/// # Example
///
/// ```no_run
/// use anigen_config::AnigenConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = AnigenConfig::load(None)?;
/// println!("Parser at {}", config.services().parser_url());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, derive_getters::Getters)]
pub struct AnigenConfig {
    /// Remote service endpoints
    services: ServicesConfig,
    /// Session persistence
    storage: StorageConfig,
    /// Speech generation pacing
    speech: SpeechConfig,
    /// Upload limits
    uploads: UploadsConfig,
}

impl AnigenConfig {
    /// Bundled defaults only, ignoring user files and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file is malformed.
    pub fn bundled() -> AnigenResult<Self> {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        Self::finish(builder)
    }

    /// Load configuration from a specific file layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> AnigenResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    /// Load configuration with full precedence.
    ///
    /// `explicit` replaces the `./anigen.toml` lookup and must exist. User
    /// files are otherwise optional and skipped when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if any present source is malformed or a value is
    /// out of range.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> AnigenResult<Self> {
        debug!("Loading configuration with precedence: env > file > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/anigen/anigen.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = match explicit {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("anigen").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("ANIGEN")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> AnigenResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the wizard cannot run with.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the offending key.
    pub fn validate(&self) -> AnigenResult<()> {
        if self.speech.batch_size == 0 {
            return Err(ConfigError::invalid_value("speech.batch_size", "must be at least 1").into());
        }
        if self.uploads.max_image_bytes == 0 {
            return Err(
                ConfigError::invalid_value("uploads.max_image_bytes", "must be positive").into(),
            );
        }
        if self.uploads.max_bgm_bytes == 0 {
            return Err(
                ConfigError::invalid_value("uploads.max_bgm_bytes", "must be positive").into(),
            );
        }
        for (key, url) in [
            ("services.parser_url", &self.services.parser_url),
            ("services.speech_url", &self.services.speech_url),
            ("services.renderer_url", &self.services.renderer_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::invalid_value(key, format!("'{}' is not an http(s) URL", url)).into());
            }
        }
        Ok(())
    }

    /// Same configuration with every service pointed at `base_url`.
    ///
    /// Used to aim the clients at a local stand-in server.
    pub fn with_service_base(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        self.services = ServicesConfig {
            parser_url: base.clone(),
            speech_url: base.clone(),
            renderer_url: base,
        };
        self
    }

    /// Same configuration persisting to `dir`.
    pub fn with_session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage.session_dir = Some(dir.into());
        self
    }
}
