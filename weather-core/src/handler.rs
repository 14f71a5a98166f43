use anyhow::{Context, anyhow};
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::{
    error::HandlerError,
    http::HttpCaller,
    model::{IncomingRequest, OutgoingResponse},
    secret::{self, SecretStore, WEATHER_API_KEY_SECRET, scalar_as_string},
};

pub const BASE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline/";

/// Maps one inbound request to one response: validate, fetch the API key,
/// query the weather API.
#[derive(Debug)]
pub struct WeatherHandler {
    http: Box<dyn HttpCaller>,
    secrets: Box<dyn SecretStore>,
}

impl WeatherHandler {
    pub fn new(http: Box<dyn HttpCaller>, secrets: Box<dyn SecretStore>) -> Self {
        Self { http, secrets }
    }

    /// Every failure is turned into a response here; nothing escapes.
    pub async fn handle(&self, request: &IncomingRequest) -> OutgoingResponse {
        match self.try_handle(request).await {
            Ok(body) => OutgoingResponse::ok(body),
            Err(err) if err.is_client_error() => {
                warn!("Rejected request: {err}");
                err.into()
            }
            Err(err) => {
                let response = OutgoingResponse::new(err.status_code(), err.public_message());
                error!("Request failed: {:#}", anyhow::Error::from(err));
                response
            }
        }
    }

    async fn try_handle(&self, request: &IncomingRequest) -> Result<String, HandlerError> {
        let city = parse_city(request.body.as_deref())?;
        debug!(%city, "Looking up weather");

        let api_key = secret::fetch_api_key(self.secrets.as_ref(), WEATHER_API_KEY_SECRET)
            .await
            .context("Failed to fetch weather API key")?;

        let url = forecast_url(&city, &api_key);
        reqwest::Url::parse(&url)
            .with_context(|| format!("Weather API URL for city '{city}' is not a valid URL"))?;

        let response = self.http.get(&url).await?;

        if !response.is_success() {
            if let Some(body) = &response.body {
                warn!(
                    status = response.status,
                    body = %truncate_body(body),
                    "Weather API error body"
                );
            }
            return Err(HandlerError::Upstream {
                status: response.status,
            });
        }

        let body = response.body.ok_or(HandlerError::Upstream {
            status: response.status,
        })?;
        info!("Response body: {body}");

        Ok(body)
    }
}

/// Extract `city` from a raw request body.
///
/// An absent, blank or `null` body counts as a missing city, anything else
/// that isn't a JSON object is invalid.
pub fn parse_city(body: Option<&str>) -> Result<String, HandlerError> {
    let Some(body) = body.filter(|b| !b.trim().is_empty()) else {
        return Err(HandlerError::MissingCity);
    };

    let object: Option<Map<String, Value>> = serde_json::from_str(body)?;
    let city = object
        .as_ref()
        .and_then(|o| o.get("city"))
        .ok_or(HandlerError::MissingCity)?;

    scalar_as_string(city).ok_or_else(|| anyhow!("`city` is not a scalar value: {city}").into())
}

/// Timeline URL for today's forecast. `city` goes into the path as-is.
pub fn forecast_url(city: &str, api_key: &str) -> String {
    format!(
        "{BASE_URL}{city}/today?unitGroup=metric&include=days&key={api_key}&contentType=json"
    )
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
