//! Casebook CLI
//!
//! Command-line front end for browsing and extracting case studies.

use clap::Parser;

use casebook_cli::Cli;
use casebook_cli::commands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays pipeable
    let default_filter = if cli.verbose {
        "warn,casebook_core=debug,casebook_content=debug,casebook_client=debug,casebook_viewer=debug,casebook_cli=debug,casebook=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(command = ?cli.command, "Starting casebook");

    let output = commands::run(cli).await?;
    print!("{output}");
    if !output.is_empty() && !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
