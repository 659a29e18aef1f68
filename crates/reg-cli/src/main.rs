use anyhow::Context;
use clap::Parser;
use reg_config::RegistrarConfig;

mod cli;
mod commands;
mod context;
mod exit;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("reg error: {error:#}");
        std::process::exit(exit::exit_code(&error));
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();

    if let cli::Commands::Schema(args) = &cli.command {
        return commands::schema::handle(args, &flags);
    }

    let config = RegistrarConfig::load_with_dotenv().context("failed to load registrar config")?;
    let ctx = context::AppContext::init(config, flags.db.as_deref())
        .await
        .context("failed to initialize registrar application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("REGISTRAR_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
