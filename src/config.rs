//! YAML-file configuration plumbing. Content access and (de)serialization
//! sit behind small traits so tests can swap the file system out.

use std::io::ErrorKind;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

pub trait ConfigContentProvider {
    /// `Ok(None)` means "no config stored yet"; callers fall back to
    /// defaults.
    fn get_config_content(&self) -> Result<Option<String>, String>;
    fn set_config_content(&self, content: &str) -> Result<(), String>;
}

pub struct FileContentConfigProvider {
    file_path: String,
}

impl FileContentConfigProvider {
    pub fn new(file_path: String) -> Self {
        Self { file_path }
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(self.file_path.as_str()) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("Failed to read config file: {}", err)),
        }
    }

    fn set_config_content(&self, content: &str) -> Result<(), String> {
        std::fs::write(self.file_path.as_str(), content)
            .map_err(|e| format!("Failed to write config file: {}", e))
    }
}

/// Validated, cached YAML config. Missing content yields `TConfig::default()`.
pub struct ConfigManager<TProvider, TConfig>
where
    TProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    provider: TProvider,
    cached: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(FileContentConfigProvider::new(file_path.to_string()))
    }
}

impl<TProvider, TConfig> ConfigManager<TProvider, TConfig>
where
    TProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn new(provider: TProvider) -> Self {
        Self {
            provider,
            cached: Arc::new(Mutex::new(None)),
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut cached = self.cached.lock().unwrap();
        if let Some(config) = cached.as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config: TConfig = serde_yaml_ng::from_str(&content)
            .map_err(|e| format!("Failed to deserialize config: {}", e))?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *cached = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized = serde_yaml_ng::to_string(config)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        self.provider.set_config_content(&serialized)?;

        *self.cached.lock().unwrap() = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectator::SpectatorConfig;

    struct InMemoryProvider {
        content: Mutex<Option<String>>,
    }

    impl InMemoryProvider {
        fn new(content: Option<&str>) -> Self {
            Self {
                content: Mutex::new(content.map(str::to_string)),
            }
        }
    }

    impl ConfigContentProvider for InMemoryProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            Ok(self.content.lock().unwrap().clone())
        }

        fn set_config_content(&self, content: &str) -> Result<(), String> {
            *self.content.lock().unwrap() = Some(content.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_missing_content_yields_defaults() {
        let manager: ConfigManager<_, SpectatorConfig> =
            ConfigManager::new(InMemoryProvider::new(None));
        let config = manager.get_config().unwrap();
        assert_eq!(config, SpectatorConfig::default());
    }

    #[test]
    fn test_roundtrip_through_yaml() {
        let manager: ConfigManager<_, SpectatorConfig> =
            ConfigManager::new(InMemoryProvider::new(None));

        let config = SpectatorConfig {
            tick_interval_ms: 200,
            turn_probability: 0.25,
        };
        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);
    }

    #[test]
    fn test_invalid_stored_config_is_rejected() {
        let manager: ConfigManager<_, SpectatorConfig> = ConfigManager::new(
            InMemoryProvider::new(Some("tick_interval_ms: 5\nturn_probability: 0.1\n")),
        );
        assert!(manager.get_config().is_err());
    }

    #[test]
    fn test_set_config_validates_first() {
        let manager: ConfigManager<_, SpectatorConfig> =
            ConfigManager::new(InMemoryProvider::new(None));
        let bad = SpectatorConfig {
            tick_interval_ms: 150,
            turn_probability: 2.0,
        };
        assert!(manager.set_config(&bad).is_err());
    }
}
