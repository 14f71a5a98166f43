use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use weather_core::{
    Config, IncomingRequest, LocalSecretStore, ReqwestCaller, SecretStore, SecretsManagerStore,
    WeatherHandler,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Run the weather lookup function locally")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where `invoke` reads the API key from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SecretSource {
    /// The key stored by `weather configure`.
    Local,
    /// AWS Secrets Manager, like the deployed function.
    Aws,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the Visual Crossing API key for local runs.
    Configure {
        /// Secrets Manager region used with `--secrets aws`.
        #[arg(long)]
        region: Option<String>,
    },

    /// Run the handler once and print its response.
    Invoke {
        /// City to look up.
        #[arg(required_unless_present = "body", conflicts_with = "body")]
        city: Option<String>,

        /// Raw request body, passed through untouched.
        #[arg(long)]
        body: Option<String>,

        #[arg(long, value_enum, default_value_t = SecretSource::Local)]
        secrets: SecretSource,
    },

    /// Print the config file location.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { region } => configure(region),
            Command::Invoke { city, body, secrets } => {
                invoke(request_body(city, body), secrets).await
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

fn configure(region: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("Visual Crossing API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key);
    if region.is_some() {
        config.region = region;
    }
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn invoke(body: String, source: SecretSource) -> anyhow::Result<()> {
    let config = Config::load()?;

    let secrets: Box<dyn SecretStore> = match source {
        SecretSource::Local => {
            if !config.is_api_key_configured() {
                tracing::warn!("No local API key stored. Hint: run `weather configure` first.");
            }
            Box::new(LocalSecretStore::from_config(&config))
        }
        SecretSource::Aws => Box::new(SecretsManagerStore::new(config.region()).await),
    };

    let handler = WeatherHandler::new(Box::new(ReqwestCaller::new()), secrets);
    let response = handler.handle(&IncomingRequest::with_body(body)).await;

    println!("HTTP {}", response.status_code);
    println!("{}", response.body);
    Ok(())
}

/// Request body for `invoke`: the raw `--body`, or a minimal `{"city": ...}`.
fn request_body(city: Option<String>, body: Option<String>) -> String {
    match (body, city) {
        (Some(body), _) => body,
        (None, city) => serde_json::json!({ "city": city }).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn invoke_with_city_defaults_to_local_secrets() {
        let cli = Cli::try_parse_from(["weather", "invoke", "Stockholm"]).unwrap();

        match cli.command {
            Command::Invoke { city, body, secrets } => {
                assert_eq!(city.as_deref(), Some("Stockholm"));
                assert_eq!(body, None);
                assert_eq!(secrets, SecretSource::Local);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn invoke_with_raw_body_and_aws() {
        let cli =
            Cli::try_parse_from(["weather", "invoke", "--body", "{}", "--secrets", "aws"]).unwrap();

        match cli.command {
            Command::Invoke { city, body, secrets } => {
                assert_eq!(city, None);
                assert_eq!(body.as_deref(), Some("{}"));
                assert_eq!(secrets, SecretSource::Aws);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn invoke_needs_city_or_body() {
        assert!(Cli::try_parse_from(["weather", "invoke"]).is_err());
        assert!(Cli::try_parse_from(["weather", "invoke", "Oslo", "--body", "{}"]).is_err());
    }

    #[test]
    fn request_body_from_city() {
        let body = request_body(Some("New York".into()), None);
        assert_eq!(body, r#"{"city":"New York"}"#);
    }

    #[test]
    fn raw_body_is_passed_through() {
        let body = request_body(None, Some("Invalid JSON".into()));
        assert_eq!(body, "Invalid JSON");
    }
}
