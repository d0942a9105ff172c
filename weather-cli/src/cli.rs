use anyhow::{Context, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use tracing::info;
use weather_core::{
    Config, ProviderId, WeatherFetcher, WeatherView,
    provider::{default_fetcher_from_config, fetcher_from_config},
    view::DEFAULT_CITY,
};

use crate::{app, render::render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Single-screen weather display")]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug). `RUST_LOG` overrides this.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Defaults to `run` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive weather screen.
    Run {
        /// City shown on startup; falls back to the configured default city.
        #[arg(long)]
        city: Option<String>,

        /// Provider short name, e.g. "openweather" or "simulated".
        #[arg(long)]
        provider: Option<String>,
    },

    /// Fetch the weather for one city, print it and exit.
    Show {
        /// City name.
        city: String,

        /// Provider short name, e.g. "openweather" or "simulated".
        #[arg(long)]
        provider: Option<String>,

        /// Print the reading as JSON instead of drawing the screen.
        #[arg(long)]
        json: bool,
    },

    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, e.g. "openweather" or "simulated".
        provider: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let command = self.command.unwrap_or(Command::Run {
            city: None,
            provider: None,
        });

        match command {
            Command::Run { city, provider } => {
                let config = Config::load()?;
                let fetcher = resolve_fetcher(&config, provider.as_deref())?;
                let city = city.or(config.default_city.clone());
                app::run_interactive(fetcher.as_ref(), city.as_deref().unwrap_or(DEFAULT_CITY))
                    .await
            }
            Command::Show { city, provider, json } => {
                let config = Config::load()?;
                let fetcher = resolve_fetcher(&config, provider.as_deref())?;
                show(fetcher.as_ref(), &city, json).await
            }
            Command::Configure { provider } => configure(&provider),
        }
    }
}

fn resolve_fetcher(
    config: &Config,
    provider: Option<&str>,
) -> anyhow::Result<Box<dyn WeatherFetcher>> {
    match provider {
        Some(name) => fetcher_from_config(ProviderId::try_from(name)?, config),
        None => default_fetcher_from_config(config),
    }
}

async fn show(fetcher: &dyn WeatherFetcher, city: &str, json: bool) -> anyhow::Result<()> {
    let (mut view, ticket) = WeatherView::start(city);
    let outcome = fetcher.fetch(&ticket.city).await;

    if json {
        let reading = outcome.map_err(|e| anyhow!(e.user_message()))?;
        println!(
            "{}",
            serde_json::to_string_pretty(&reading).context("Failed to serialize reading")?
        );
        return Ok(());
    }

    view.resolve(ticket.id, outcome);
    print!("{}", render(view.state()));

    match &view.state().error {
        Some(message) => Err(anyhow!(message.clone())),
        None => Ok(()),
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load_file()?;

    if id.needs_api_key() {
        let api_key = Password::new(&format!("API key for {id}:"))
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?;

        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(anyhow!("API key must not be empty"));
        }
        config.upsert_provider_api_key(id, api_key);
    }

    config.set_default_provider(id);
    let path = config.save()?;
    info!(provider = %id, path = %path.display(), "configuration saved");
    println!("Saved {id} as the default provider in {}", path.display());

    Ok(())
}
