//! Configuration for figman
//!
//! Settings come from `<config dir>/figman/config.toml`; a missing default
//! file means defaults, while a missing file passed explicitly is an error.

pub mod settings;

pub use settings::{BorderAdjust, Settings};

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid setting {0}")]
    Invalid(String),
}

/// Default location of the config file
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("figman")
        .join("config.toml")
}

/// Loads settings from `path`, or from the default location when `None`
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (default_config_path(), false),
    };

    if !explicit && !path.exists() {
        log::debug!("No config file found at {:?}, using defaults", path);
        return Ok(Settings::default());
    }

    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;

    let settings = Settings::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    settings.validate()?;

    log::info!("Loaded config from {:?}", path);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("figman-does-not-exist").join("config.toml");
        assert!(matches!(
            load_settings(Some(path.as_path())),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn loads_and_validates_file() {
        let dir = std::env::temp_dir().join(format!("figman-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let good = dir.join("good.toml");
        std::fs::write(&good, "settle_delay_ms = 20\n").unwrap();
        assert_eq!(load_settings(Some(good.as_path())).unwrap().settle_delay_ms, 20);

        let bad = dir.join("bad.toml");
        std::fs::write(&bad, "screen = [0, 0, -1, 10]\n").unwrap();
        assert!(matches!(load_settings(Some(bad.as_path())), Err(ConfigError::Invalid(_))));

        let broken = dir.join("broken.toml");
        std::fs::write(&broken, "screen = [").unwrap();
        assert!(matches!(load_settings(Some(broken.as_path())), Err(ConfigError::Parse { .. })));

        std::fs::remove_dir_all(&dir).ok();
    }
}
