//! Tableau CLI binary.
//!
//! This binary provides command-line access to the pipeline:
//! - Generate characters and scenes from a script
//! - Inspect progress without contacting the backend
//! - Reset progress

use clap::Parser;
use tableau::{LoggingConfig, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, reset_progress, resolve_output, run_script, show_status};

    // Load environment variables (MJ_API_SECRET, RUST_LOG)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut logging = LoggingConfig::new().with_json_logs(cli.json_logs);
    if cli.verbose {
        logging = logging.with_log_level("debug");
    }
    init_logging(&logging)?;

    match cli.command {
        Commands::Run {
            script,
            output,
            config,
        } => {
            run_script(&script, output, config.as_deref()).await?;
        }

        Commands::Status {
            script,
            output,
            config,
        } => {
            let output = resolve_output(output.as_deref(), config.as_deref())?;
            show_status(&script, &output).await?;
        }

        Commands::Reset { output, config } => {
            let output = resolve_output(output.as_deref(), config.as_deref())?;
            reset_progress(&output).await?;
        }
    }

    Ok(())
}
