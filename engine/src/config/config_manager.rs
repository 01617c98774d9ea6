use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

pub struct ConfigManager<TProvider, TConfig, TSerializer = YamlConfigSerializer>
where
    TProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TSerializer: ConfigSerializer<TConfig>,
{
    serializer: TSerializer,
    provider: TProvider,
    cached: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path.to_string()),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TProvider, TConfig, TSerializer> ConfigManager<TProvider, TConfig, TSerializer>
where
    TProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(provider: TProvider, serializer: TSerializer) -> Self {
        Self {
            serializer,
            provider,
            cached: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the cached value, loading it on first access. A missing
    /// source yields `TConfig::default()`.
    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self.cached.lock().unwrap();

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        if let Some(content) = self.provider.get_config_content()? {
            let config = self.serializer.deserialize(&content)?;

            config
                .validate()
                .map_err(|e| format!("Settings validation error: {}", e))?;

            *current = Some(config.clone());
            return Ok(config);
        }

        Ok(TConfig::default())
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Settings validation error: {}", e))?;

        let content = self.serializer.serialize(config)?;
        self.provider.set_config_content(&content)?;

        *self.cached.lock().unwrap() = Some(config.clone());
        Ok(())
    }
}
