//! Core library for the weather lookup function.
//!
//! This crate defines:
//! - The request handler mapping one request to one response
//! - Seams over the weather API call and the secret store, with their
//!   production implementations
//! - Configuration and the error taxonomy
//!
//! It is used by `weather-lambda` and `weather-cli`.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod model;
pub mod secret;

pub use config::Config;
pub use error::{HandlerError, NetworkError};
pub use handler::WeatherHandler;
pub use http::{HttpCaller, ReqwestCaller};
pub use model::{IncomingRequest, OutgoingResponse, UpstreamResponse};
pub use secret::{LocalSecretStore, SecretError, SecretStore, SecretsManagerStore};
