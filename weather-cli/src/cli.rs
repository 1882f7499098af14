use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, InquireError, Password, Select};
use weather_core::{City, Config, Selection, WeatherQueryResult, WeatherService};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for a fixed list of cities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// List the supported cities.
    Cities,

    /// Show current weather for a city.
    Show {
        /// City name; if absent, pick one interactively.
        city: Option<String>,

        /// Print the result as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Cities => {
                for city in City::all() {
                    println!("{city}");
                }
            }
            Command::Show { city, json } => {
                // Fail before any prompt if there is no key.
                let config = Config::load()?;
                let provider = config.provider()?;
                tracing::debug!(endpoint = provider.endpoint(), "provider configured");
                let service = WeatherService::new(Box::new(provider));

                match city {
                    Some(name) => {
                        tracing::debug!(city = %name, "city given on command line");
                        let result = match Selection::try_from(name.as_str()) {
                            Ok(selection) => service.fetch_weather(selection).await,
                            Err(err) => WeatherQueryResult::Failure { message: err.to_string() },
                        };
                        print_result(&result, json)?;
                    }
                    None => interactive(&service, json).await?,
                }
            }
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("Get one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key);
    let path = config.save()?;
    tracing::info!(path = %path.display(), "API key stored");

    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn interactive(service: &WeatherService, json: bool) -> anyhow::Result<()> {
    loop {
        let selection = match Select::new("City:", Selection::options()).with_page_size(14).prompt() {
            Ok(selection) => selection,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(());
            }
            Err(err) => return Err(err).context("Failed to read city selection"),
        };

        tracing::debug!(%selection, "city selected");
        let result = service.fetch_weather(selection).await;
        if !result.is_success() {
            tracing::info!(%selection, "lookup did not succeed");
        }
        print_result(&result, json)?;

        let again = Confirm::new("Check another city?").with_default(true).prompt();
        match again {
            Ok(true) => continue,
            Ok(false) | Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(());
            }
            Err(err) => return Err(err).context("Failed to read answer"),
        }
    }
}

fn print_result(result: &WeatherQueryResult, json: bool) -> anyhow::Result<()> {
    if json {
        let text =
            serde_json::to_string_pretty(result).context("Failed to serialize weather result")?;
        println!("{text}");
    } else {
        println!("{}", render::screen(result, chrono::Local::now()));
    }

    Ok(())
}
