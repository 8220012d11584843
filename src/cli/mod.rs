use crate::{api, PlannerConfig, TripPlanner, TripRequest, Vibe};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn build_command() -> Command {
    Command::new("vaca-planner")
        .version("0.1.0")
        .about("Plan a vacation with a chain of LLM calls, over HTTP or from the terminal")
        .subcommand_required(true)
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .global(true)
                .help("The chat model to use (or set MODEL env var)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .global(true)
                .help("OpenAI API key (or set OPENAI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .global(true)
                .help("OpenAI-compatible base URL (or set OPENAI_BASE_URL env var)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .global(true)
                .value_parser(value_parser!(u64))
                .help("Per-call request timeout in seconds"),
        )
        .subcommand(
            Command::new("serve")
                .about("Run the HTTP service")
                .arg(
                    Arg::new("host")
                        .long("host")
                        .value_name("HOST")
                        .help("Bind host (or set HOST env var)"),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .value_parser(value_parser!(u16))
                        .help("Bind port (or set PORT env var)"),
                ),
        )
        .subcommand(
            Command::new("plan")
                .about("Plan a single trip and print the result")
                .arg(
                    Arg::new("budget")
                        .short('b')
                        .long("budget")
                        .value_name("USD")
                        .required(true)
                        .value_parser(value_parser!(u64))
                        .help("Total budget in USD"),
                )
                .arg(
                    Arg::new("length")
                        .short('l')
                        .long("length")
                        .value_name("DAYS")
                        .required(true)
                        .value_parser(value_parser!(u32))
                        .help("Trip length in days (1-30)"),
                )
                .arg(
                    Arg::new("vibe")
                        .short('v')
                        .long("vibe")
                        .value_name("VIBE")
                        .required(true)
                        .value_parser(Vibe::ALL.map(|vibe| vibe.as_str()))
                        .help("Trip vibe"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the JSON response body instead of a trace"),
                ),
        )
}

/// Apply global flags (propagated into every subcommand) on top of a base
/// configuration. Flags win over the environment.
fn apply_overrides(matches: &ArgMatches, mut config: PlannerConfig) -> PlannerConfig {
    if let Some(api_key) = matches.get_one::<String>("api-key") {
        config = config.with_api_key(api_key.clone());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model(model.clone());
    }
    if let Some(seconds) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(Duration::from_secs(*seconds));
    }
    config
}

fn resolve_config(matches: &ArgMatches) -> Result<PlannerConfig, Box<dyn std::error::Error>> {
    Ok(apply_overrides(matches, PlannerConfig::from_env()?))
}

/// CLI entry point for the vaca-planner tool
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = build_command().get_matches();
    let Some((name, sub)) = matches.subcommand() else {
        return Err("a subcommand is required".into());
    };
    let config = resolve_config(sub)?;

    match name {
        "serve" => {
            let host = sub
                .get_one::<String>("host")
                .cloned()
                .unwrap_or_else(|| config.host.clone());
            let port = sub.get_one::<u16>("port").copied().unwrap_or(config.port);
            let config = config.with_bind(host, port);

            info!("Using model: {}", config.model);
            info!("Base URL: {}", config.base_url);
            api::serve(config).await?;
        }
        "plan" => {
            let budget = sub.get_one::<u64>("budget").copied().unwrap_or_default();
            let length = sub.get_one::<u32>("length").copied().unwrap_or_default();
            let vibe = sub
                .get_one::<String>("vibe")
                .map(String::as_str)
                .unwrap_or_default()
                .parse::<Vibe>()?;
            let request = TripRequest::new(budget, length, vibe)?;

            let planner = TripPlanner::from_config(&config)?;
            info!("Using model: {}", config.model);

            match planner.plan(&request).await {
                Ok(plan) => {
                    if sub.get_flag("json") {
                        println!("{}", serde_json::to_string_pretty(&plan)?);
                    } else {
                        println!("\n{}", plan.replay());
                    }
                    info!("Trip planning completed");
                }
                Err(e) => {
                    error!("Trip planning failed: {}", e);
                    return Err(e.into());
                }
            }
        }
        other => return Err(format!("unknown subcommand: {other}").into()),
    }

    Ok(())
}
