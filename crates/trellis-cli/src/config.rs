//! Configuration discovery for the CLI.
//!
//! The first configuration found wins:
//!
//! 1. the file given with `--config`, which must exist;
//! 2. `trellis/config.toml` under the working directory;
//! 3. `config.toml` in the platform config directory;
//! 4. built-in defaults.
//!
//! A file that is found but cannot be read, parsed or validated is an error;
//! the search never falls through to the next location.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use trellis::{TrellisError, config::AppConfig};

const LOCAL_CONFIG: &str = "trellis/config.toml";

/// Failures while loading a configuration file. Every variant names the file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file `{}` does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse `{}`: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("`{}` holds an unusable value: {message}", path.display())]
    Validation { path: PathBuf, message: String },
}

impl From<ConfigError> for TrellisError {
    fn from(err: ConfigError) -> Self {
        TrellisError::Config(err.to_string())
    }
}

/// Where the active configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    Explicit(PathBuf),
    Local(PathBuf),
    System(PathBuf),
    Default,
}

impl ConfigOrigin {
    /// Returns the file to load, or `None` for the built-in defaults.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Local(path) | Self::System(path) => Some(path),
            Self::Default => None,
        }
    }
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) => write!(f, "{} (--config)", path.display()),
            Self::Local(path) => write!(f, "{} (working directory)", path.display()),
            Self::System(path) => write!(f, "{} (platform config dir)", path.display()),
            Self::Default => f.write_str("built-in defaults"),
        }
    }
}

/// Picks the configuration source without reading it.
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] if `explicit_path` does not exist.
pub fn locate_config(explicit_path: Option<&Path>) -> Result<ConfigOrigin, ConfigError> {
    if let Some(path) = explicit_path {
        if !path.is_file() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        return Ok(ConfigOrigin::Explicit(path.to_path_buf()));
    }

    let local = Path::new(LOCAL_CONFIG);
    if local.is_file() {
        return Ok(ConfigOrigin::Local(local.to_path_buf()));
    }

    match ProjectDirs::from("com", "trellis", "trellis") {
        Some(dirs) => {
            let system = dirs.config_dir().join("config.toml");
            if system.is_file() {
                return Ok(ConfigOrigin::System(system));
            }
            debug!(path = system.display().to_string(); "No platform configuration file");
        }
        None => debug!("Could not determine platform-specific config directory"),
    }

    Ok(ConfigOrigin::Default)
}

/// Locates, reads and validates the configuration.
///
/// # Errors
///
/// Returns [`TrellisError::Config`] if the explicit path is missing, or if
/// the chosen file cannot be read, parsed or validated.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TrellisError> {
    let origin = locate_config(explicit_path.as_ref().map(|path| path.as_ref()))?;
    info!(origin:%; "Loading configuration");

    match origin.path() {
        Some(path) => Ok(load_config_file(path)?),
        None => Ok(AppConfig::default()),
    }
}

fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config: AppConfig = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.message().to_string(),
    })?;

    config.validate().map_err(|err| ConfigError::Validation {
        path: path.to_path_buf(),
        message: match err {
            TrellisError::Config(message) => message,
            other => other.to_string(),
        },
    })?;

    Ok(config)
}
