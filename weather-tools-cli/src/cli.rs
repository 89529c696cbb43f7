use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Select, Text};
use serde_json::json;

use weather_tools_core::tools::{GET_FORECAST, GET_WEATHER};
use weather_tools_core::{Config, Dispatcher, tool_specs};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-tools", version, about = "Open-Meteo weather tools client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the endpoint config file so it can be edited.
    Init,

    /// List the available tools and their input schemas.
    Tools,

    /// Show the last 7 days of weather for a city.
    Weather {
        /// City name, e.g. "London".
        city: String,
    },

    /// Show the 7-day forecast for a city.
    Forecast {
        /// City name, e.g. "London".
        city: String,
    },

    /// Prompt for a city and a mode, then show the report.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;

        match self.command.unwrap_or(Command::Interactive) {
            Command::Init => {
                // Persists the loaded values, so re-running keeps any edits.
                config.save()?;
                println!("Wrote {}", Config::config_file_path()?.display());
            }
            Command::Tools => {
                for spec in tool_specs() {
                    println!("{}", spec.name);
                    println!("  {}", spec.description);
                    println!("  {}", serde_json::to_string(&spec.input_schema)?);
                }
            }
            Command::Weather { city } => call_tool(&config, GET_WEATHER, &city).await?,
            Command::Forecast { city } => call_tool(&config, GET_FORECAST, &city).await?,
            Command::Interactive => interactive(&config).await?,
        }

        Ok(())
    }
}

async fn call_tool(config: &Config, tool: &str, city: &str) -> Result<()> {
    let mut dispatcher = Dispatcher::from_config(config)?;

    // Tool errors come back as replies, not process failures.
    let reply = dispatcher.dispatch(tool, &json!({ "city": city })).await;
    println!("{}", reply.text);

    Ok(())
}

const PAST_CHOICE: &str = "Last 7 days (historical)";
const FUTURE_CHOICE: &str = "Next 7 days (forecast)";

async fn interactive(config: &Config) -> Result<()> {
    let mut dispatcher = Dispatcher::from_config(config)?;

    loop {
        let city = Text::new("City name:")
            .with_placeholder("London, Paris, Tokyo ...")
            .prompt()?;

        let choice = Select::new("Which report?", vec![PAST_CHOICE, FUTURE_CHOICE]).prompt()?;
        let tool = if choice == PAST_CHOICE { GET_WEATHER } else { GET_FORECAST };

        let reply = dispatcher.dispatch(tool, &json!({ "city": city })).await;
        println!("\n{}", reply.text);

        if !Confirm::new("Query another city?").with_default(true).prompt()? {
            break;
        }
    }

    Ok(())
}
