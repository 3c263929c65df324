use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use good_feeder::cli::{commands, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Diagnostics go to stderr; stdout carries only records.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let env_auth = Cli::env_auth();

    let status = commands::run(
        &cli,
        env_auth.as_deref(),
        &mut io::stdout(),
        &mut io::stderr(),
    )
    .await?;

    Ok(ExitCode::from(status))
}
