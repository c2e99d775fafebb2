mod cli;
mod initialization;
mod logging;

extern crate dotenv;

use crate::cli::Cli;
use clap::Parser;
use dotenv::dotenv;
use reelbot_common::Settings;
use reelbot_release::PipelineState;
use tracing::{error, info};

const EXIT_SUCCESS: i32 = 0;
const EXIT_STARTUP_FAILURE: i32 = 1;
const EXIT_CONFIG_ERROR: i32 = 3;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Usage errors exit with status 2 here, before anything touches the network.
    let cli = Cli::parse();
    let code = run(cli).await;
    std::process::exit(code);
}

// Everything that must be dropped (the log writer guard in particular) lives in here so it is
// flushed before the process exits.
async fn run(cli: Cli) -> i32 {
    dotenv().ok();

    let settings = match Settings::from_env(!cli.dry_run) {
        Ok(s) => s,
        Err(e) => {
            logging::init_fallback_tracing();
            error!(error_kind = "ConfigError", error = %e, "Invalid configuration.");
            return EXIT_CONFIG_ERROR;
        }
    };

    let _guard = match logging::init_tracing(&settings.log, settings.tmdb.debug) {
        Ok(g) => g,
        Err(e) => {
            logging::init_fallback_tracing();
            error!(error_kind = "ConfigError", error = ?e, "Failed to set up logging.");
            return EXIT_CONFIG_ERROR;
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        language = %settings.tmdb.language,
        dry_run = cli.dry_run,
        "Starting reelbot."
    );

    let pipeline = match initialization::build_pipeline(&settings, cli.dry_run) {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to initialize reelbot.");
            return EXIT_STARTUP_FAILURE;
        }
    };

    match pipeline.run(&cli.release_parameters()).await {
        Ok(message) => {
            if cli.dry_run {
                println!("{}", message.plain);
            }
            info!(state = ?PipelineState::Done, "Finished.");
            EXIT_SUCCESS
        }
        Err(e) => {
            info!(state = ?PipelineState::Failed, error_kind = e.kind(), "Finished.");
            e.exit_code()
        }
    }
}
