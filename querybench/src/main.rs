use clap::Parser;
use querybench::config::{Cli, RunConfig};
use querybench::run;
use reqwest::Client;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("querybench=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match RunConfig::from_cli(cli) {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration");
            return ExitCode::from(run::EXIT_FATAL);
        }
    };

    let client = Client::new();
    ExitCode::from(run::run(&client, &config).await)
}
