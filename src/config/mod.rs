pub mod settings;

pub use settings::{Config, DebugLogRotation};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Failed to get config directory")?
        .join("compareason");

    fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

    Ok(config_dir.join("config.toml"))
}

/// Load configuration from the default location, creating it if missing
pub fn load_or_create_config() -> Result<Config> {
    load_or_create_config_at(&config_path()?)
}

/// Load configuration from `path`, writing defaults there first if it does not exist
pub fn load_or_create_config_at(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    } else {
        let config = Config::default();
        save_config_to(&config, path)?;
        tracing::info!(path = %path.display(), "created default config");
        Ok(config)
    }
}

pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_default_config_when_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_or_create_config_at(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("base_url = \"http://localhost:8000\""));
        assert!(written.contains("default_query = \"Samsung Galaxy M14\""));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = \"http://compare.internal:9000\"\ndebug = true\n").unwrap();

        let config = load_or_create_config_at(&path).unwrap();

        assert_eq!(config.base_url, "http://compare.internal:9000");
        assert_eq!(config.default_query, "Samsung Galaxy M14");
        assert!(config.debug);
        assert_eq!(config.debug_log_rotation, None);
    }

    #[test]
    fn test_saved_config_loads_back_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            base_url: "http://compare.internal:9000".to_string(),
            debug: true,
            debug_log_rotation: Some(DebugLogRotation::Daily),
            debug_log_keep: Some(3),
            ..Config::default()
        };

        save_config_to(&config, &path).unwrap();

        assert_eq!(load_or_create_config_at(&path).unwrap(), config);
    }

    #[test]
    fn test_rotation_parses_lowercase() {
        let config: Config = toml::from_str("debug_log_rotation = \"daily\"\n").unwrap();
        assert_eq!(config.debug_log_rotation, Some(DebugLogRotation::Daily));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "debug = \"maybe\"").unwrap();

        let err = load_or_create_config_at(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_base_url_override() {
        let config = Config::default().with_base_url(Some(" http://10.0.0.2:8000 ".to_string()));
        assert_eq!(config.base_url, "http://10.0.0.2:8000");

        let config = Config::default().with_base_url(Some("   ".to_string()));
        assert_eq!(config.base_url, "http://localhost:8000");

        let config = Config::default().with_base_url(None);
        assert_eq!(config.base_url, "http://localhost:8000");
    }
}
