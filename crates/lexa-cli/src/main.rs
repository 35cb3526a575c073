use clap::Parser;

use lexa_core::errors::CoreError;

mod cli;
mod commands;
mod context;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report(&error);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = lexa_config::LexaConfig::load_with_dotenv()?;
    let flags = cli.global_flags(&config)?;
    let ctx = context::AppContext::init(config, &flags).await?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

/// Engine failures print their structured reason as JSON on stderr.
/// Anything else prints the error chain.
fn report(error: &anyhow::Error) {
    let core = error.chain().find_map(|e| e.downcast_ref::<CoreError>());
    match core.map(|e| serde_json::to_string_pretty(&e.reason())) {
        Some(Ok(json)) => eprintln!("{json}"),
        _ => eprintln!("lexa error: {error:#}"),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("LEXA_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
