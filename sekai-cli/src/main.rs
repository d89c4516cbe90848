use clap::Parser;
use eyre::WrapErr;

use sekai_cli::cli::RootArgs;
use sekai_cli::commands;
use sekai_cli::config::AppConfig;

fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = RootArgs::parse();
    let config = AppConfig::from_env_and_args(&args).wrap_err("load config")?;

    let output = commands::run(args.command, &config)?;
    let json = serde_json::to_string_pretty(&output).wrap_err("serialize json")?;
    println!("{json}");

    Ok(())
}

fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
