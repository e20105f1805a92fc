//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::PhonebookConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding the listener port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, value } => write!(f, "Invalid {} value: {:?}", var, value),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load the configuration: file (or defaults), then environment, then validation.
pub fn load_config(path: Option<&Path>) -> Result<PhonebookConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => PhonebookConfig::default(),
    };

    apply_port_override(&mut config, std::env::var(PORT_ENV).ok().as_deref())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply a `PORT` value to the listener. Empty values are ignored.
pub fn apply_port_override(config: &mut PhonebookConfig, port: Option<&str>) -> Result<(), ConfigError> {
    let Some(raw) = port.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(());
    };

    config.listener.port = raw.parse().map_err(|_| ConfigError::Env {
        var: PORT_ENV,
        value: raw.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_override() {
        let mut config = PhonebookConfig::default();
        apply_port_override(&mut config, Some("8080")).unwrap();
        assert_eq!(config.listener.port, 8080);

        apply_port_override(&mut config, None).unwrap();
        apply_port_override(&mut config, Some("")).unwrap();
        assert_eq!(config.listener.port, 8080);
    }

    #[test]
    fn test_bad_port() {
        let mut config = PhonebookConfig::default();
        let err = apply_port_override(&mut config, Some("http")).unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "PORT", .. }));
        assert!(apply_port_override(&mut config, Some("70000")).is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phonebook.toml");
        fs::write(&path, "[storage]\nsnapshot_path = \"data.json\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.storage.snapshot_path.as_deref(), Some("data.json"));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phonebook.toml");

        fs::write(&path, "[listener\n").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Parse(_))));

        fs::write(&path, "[security]\nmax_body_size = 0\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("max_body_size"));

        assert!(matches!(load_config(Some(&dir.path().join("absent.toml"))), Err(ConfigError::Io(_))));
    }
}
