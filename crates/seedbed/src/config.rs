use ::config::{Config, Environment, File};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Largest template a registry accepts unless configured otherwise.
pub const DEFAULT_MAX_TEMPLATE_SLOTS: usize = 16;

/// Failures of [`load_config`] and [`RegistryConfig::validate`].
#[seedbed_derive::seedbed_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: ::config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Invalid config{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Registry settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Templates with more slots are rejected with `SeedError::InvalidTemplate`.
    pub max_template_slots: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { max_template_slots: DEFAULT_MAX_TEMPLATE_SLOTS }
    }
}

impl RegistryConfig {
    /// Loads and checks a registry config with [`load_config`].
    ///
    /// # Errors
    /// Returns [`ConfigError::Config`] when loading fails and [`ConfigError::Invalid`]
    /// when `max_template_slots` is zero.
    pub fn load(path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        let config: Self = load_config(path)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns [`ConfigError::Invalid`] when `max_template_slots` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_template_slots == 0 {
            return Err(ConfigError::Invalid {
                message: "max_template_slots must be at least 1".into(),
                context: None,
            });
        }
        Ok(())
    }
}

/// Loads `T` from a config file, then applies `SEEDBED__` environment overrides.
///
/// Without a path the file `seedbed` (any supported extension) in the working
/// directory is read. `SEEDBED__MAX_TEMPLATE_SLOTS=8` overrides
/// `max_template_slots`.
///
/// # Errors
/// Returns [`ConfigError::Config`] when the file is missing or unreadable, or its
/// content does not deserialize into `T`.
///
/// # Example
/// ```rust
/// use seedbed::{RegistryConfig, load_config};
///
/// let cfg: RegistryConfig = load_config(Some("config/seedbed")).unwrap_or_default();
/// assert!(cfg.max_template_slots > 0);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from("seedbed"), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix("SEEDBED")
                .separator("__")
                .try_parsing(true),
        );

    info!(path = %effective_path.display(), "Loading registry config");

    let config = builder
        .build()
        .context("Reading config sources")?
        .try_deserialize::<T>()
        .context("Decoding config")?;

    Ok(config)
}
