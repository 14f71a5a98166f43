//! Lambda entry point: API Gateway proxy events in, proxy responses out.
//!
//! The HTTP and Secrets Manager clients are built once per cold start and
//! shared by every invocation the runtime hands us.

use lambda_runtime::{Error, service_fn};
use tracing_subscriber::EnvFilter;
use weather_core::{Config, ReqwestCaller, SecretsManagerStore, WeatherHandler};

mod function;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // CloudWatch stamps every line itself.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .init();

    let config = Config::from_env();
    let secrets = SecretsManagerStore::new(config.region()).await;
    let handler = WeatherHandler::new(Box::new(ReqwestCaller::new()), Box::new(secrets));

    tracing::info!(region = config.region(), "weather-lambda ready");

    let handler = &handler;
    lambda_runtime::run(service_fn(move |event| function::function_handler(handler, event))).await
}
