use async_trait::async_trait;
use aws_sdk_secretsmanager::{Client, config::Region};
use tracing::debug;

use super::{SecretError, SecretStore};

/// [`SecretStore`] backed by AWS Secrets Manager.
#[derive(Debug, Clone)]
pub struct SecretsManagerStore {
    client: Client,
}

impl SecretsManagerStore {
    /// Build a client for `region` from the default AWS credential chain.
    pub async fn new(region: &str) -> Self {
        let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        debug!(region, "Initialized Secrets Manager client");

        Self::from_client(Client::new(&aws_config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretStore for SecretsManagerStore {
    async fn secret_string(&self, secret_id: &str) -> Result<String, SecretError> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|err| SecretError::Fetch {
                secret_id: secret_id.to_string(),
                source: Box::new(aws_sdk_secretsmanager::Error::from(err)),
            })?;

        output
            .secret_string()
            .map(str::to_owned)
            .ok_or_else(|| SecretError::NotFound {
                secret_id: secret_id.to_string(),
            })
    }
}
