use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use smartroute_agents::Agents;
use smartroute_core::geocode::{DEFAULT_NEARBY_KIND, DEFAULT_NEARBY_RADIUS_METERS};
use smartroute_core::route::NO_ROUTE_FOUND;
use smartroute_core::{
    AppConfig, CommandContext, Coordinate, Language, Location, Lookup, RouteResponse,
};
use smartroute_observability::{init_tracing, AppMetrics};

#[derive(Debug, Parser)]
#[command(name = "smartroute")]
#[command(about = "SmartRoute Buddy command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send one command through the assistant.
    Ask {
        command: String,
        /// JSON object forwarded as the command context.
        #[arg(long)]
        context: Option<String>,
    },
    Chat,
    Route {
        /// Origin as LAT,LNG.
        #[arg(long = "from", allow_hyphen_values = true)]
        origin: String,
        /// Destination as LAT,LNG.
        #[arg(long = "to", allow_hyphen_values = true)]
        destination: String,
        #[arg(long)]
        reroute: bool,
    },
    Geocode {
        query: String,
    },
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long, default_value = DEFAULT_NEARBY_KIND)]
        kind: String,
        #[arg(long, default_value_t = DEFAULT_NEARBY_RADIUS_METERS)]
        radius: u32,
    },
    Translate {
        text: String,
        #[arg(long, default_value = "telugu")]
        to: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("smartroute_cli");
    let cli = Cli::parse();

    let config = AppConfig::from_env().context("invalid SMARTROUTE_* configuration")?;
    let agents = Agents::from_config(&config, AppMetrics::shared())?;

    match cli.command {
        Command::Ask { command, context } => {
            let context = parse_context(context.as_deref())?;
            let reply = agents.assistant.process(&command, &context).await?;
            println!("{reply}");
        }
        Command::Chat => run_chat(&agents).await?,
        Command::Route {
            origin,
            destination,
            reroute,
        } => {
            let origin = parse_location(&origin, "--from")?;
            let destination = parse_location(&destination, "--to")?;
            let outcome = if reroute {
                agents.navigation.reroute(&origin, &destination).await?
            } else {
                agents.navigation.route(&origin, &destination).await?
            };
            match outcome {
                Lookup::Found(summary) => println!(
                    "{}",
                    serde_json::to_string_pretty(&RouteResponse::from(summary))?
                ),
                Lookup::NotFound => bail!(NO_ROUTE_FOUND),
            }
        }
        Command::Geocode { query } => {
            let places = agents.navigation.geocode(&query).await?;
            println!("{}", serde_json::to_string_pretty(&places)?);
        }
        Command::Nearby {
            lat,
            lng,
            kind,
            radius,
        } => {
            let places = agents
                .navigation
                .nearby(Coordinate::new(lat, lng), &kind, radius)
                .await?;
            println!("{}", serde_json::to_string_pretty(&places)?);
        }
        Command::Translate { text, to } => {
            let target = Language::parse(&to).context("--to must be telugu or english")?;
            println!("{}", agents.assistant.translate(&text, target));
        }
    }

    Ok(())
}

async fn run_chat(agents: &Agents) -> Result<()> {
    println!("SmartRoute Buddy chat mode. type 'exit' to quit.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        if message.is_empty() {
            continue;
        }

        match agents
            .assistant
            .process(message, &CommandContext::new())
            .await
        {
            Ok(reply) => println!("\n{reply}\n"),
            Err(error) => println!("\nSorry, I encountered an error: {error}\n"),
        }
    }

    Ok(())
}

fn parse_context(raw: Option<&str>) -> Result<CommandContext> {
    let Some(raw) = raw else {
        return Ok(CommandContext::new());
    };
    let value: serde_json::Value =
        serde_json::from_str(raw).context("--context must be a JSON object")?;
    if !value.is_object() {
        bail!("--context must be a JSON object");
    }
    Ok(CommandContext::from_value(value))
}

fn parse_location(raw: &str, flag: &str) -> Result<Location> {
    let coordinate =
        Coordinate::parse(raw).with_context(|| format!("{flag} must be LAT,LNG, got {raw:?}"))?;
    Ok(Location::coordinates(coordinate.lat, coordinate.lng))
}
