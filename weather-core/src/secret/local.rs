use async_trait::async_trait;
use std::collections::HashMap;

use crate::config::Config;

use super::{SecretError, SecretStore};

/// [`SecretStore`] serving secret strings kept in the local config file.
#[derive(Debug, Clone, Default)]
pub struct LocalSecretStore {
    secrets: HashMap<String, String>,
}

impl LocalSecretStore {
    pub fn new(secrets: HashMap<String, String>) -> Self {
        Self { secrets }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.secrets.clone())
    }
}

#[async_trait]
impl SecretStore for LocalSecretStore {
    async fn secret_string(&self, secret_id: &str) -> Result<String, SecretError> {
        self.secrets
            .get(secret_id)
            .cloned()
            .ok_or_else(|| SecretError::NotFound {
                secret_id: secret_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secret::WEATHER_API_KEY_SECRET;

    #[tokio::test]
    async fn serves_secrets_from_config() {
        let mut cfg = Config::default();
        cfg.set_api_key("LOCAL_KEY");

        let store = LocalSecretStore::from_config(&cfg);
        let raw = store.secret_string(WEATHER_API_KEY_SECRET).await.unwrap();

        assert_eq!(raw, r#"{"WeatherApiKey":"LOCAL_KEY"}"#);
    }
}
