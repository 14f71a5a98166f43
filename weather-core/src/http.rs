use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

use crate::{error::NetworkError, model::UpstreamResponse};

#[async_trait]
pub trait HttpCaller: Send + Sync + Debug {
    /// Issue a single GET, no retries.
    async fn get(&self, url: &str) -> Result<UpstreamResponse, NetworkError>;
}

/// [`HttpCaller`] backed by one shared `reqwest` client with default timeouts.
#[derive(Debug, Clone, Default)]
pub struct ReqwestCaller {
    http: Client,
}

impl ReqwestCaller {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

#[async_trait]
impl HttpCaller for ReqwestCaller {
    async fn get(&self, url: &str) -> Result<UpstreamResponse, NetworkError> {
        // The URL carries the API key, keep it out of errors.
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| NetworkError::new(e.without_url()))?;

        let status = res.status();
        let body = match res.text().await {
            Ok(body) => Some(body).filter(|b| !b.is_empty()),
            Err(err) if status.is_success() => return Err(NetworkError::new(err.without_url())),
            // The status alone decides a failed response.
            Err(_) => None,
        };

        Ok(UpstreamResponse {
            status: status.as_u16(),
            body,
        })
    }
}
