use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt::Debug;
use thiserror::Error;

pub mod aws;
pub mod local;

pub use aws::SecretsManagerStore;
pub use local::LocalSecretStore;

/// Identifier of the secret holding the weather API key. The secret string is
/// a JSON object with a field of the same name.
pub const WEATHER_API_KEY_SECRET: &str = "WeatherApiKey";

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("failed to fetch secret '{secret_id}'")]
    Fetch {
        secret_id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("secret '{secret_id}' has no string value")]
    NotFound { secret_id: String },

    #[error("secret '{secret_id}' is not a JSON object")]
    Malformed {
        secret_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("secret '{secret_id}' has no usable '{secret_id}' field")]
    MissingField { secret_id: String },
}

#[async_trait]
pub trait SecretStore: Send + Sync + Debug {
    /// Raw secret string, fetched fresh on every call.
    async fn secret_string(&self, secret_id: &str) -> Result<String, SecretError>;
}

/// Fetch `secret_id` and pull the same-named field out of its JSON object.
pub async fn fetch_api_key(
    store: &dyn SecretStore,
    secret_id: &str,
) -> Result<String, SecretError> {
    let raw = store.secret_string(secret_id).await?;

    let object: Map<String, Value> =
        serde_json::from_str(&raw).map_err(|source| SecretError::Malformed {
            secret_id: secret_id.to_string(),
            source,
        })?;

    object
        .get(secret_id)
        .and_then(scalar_as_string)
        .ok_or_else(|| SecretError::MissingField {
            secret_id: secret_id.to_string(),
        })
}

/// Textual form of a JSON string, number or boolean. A one-element array
/// stands for its element; `null`, objects and other arrays have none.
pub(crate) fn scalar_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) if items.len() == 1 => scalar_as_string(&items[0]),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
