//! Likes Exporter - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use likes_exporter::{
    api::TwitterApi,
    auth::ConsoleVerifier,
    cli::Args,
    config::{validate_config, Config},
    error::{exit_codes, Result},
    export::run_export,
    output::{
        print_banner, print_config_summary, print_error, print_info, print_summary, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    args.merge_into_config(&mut config);
    validate_config(&config)?;

    print_config_summary(
        &config.storage.cache_path.display().to_string(),
        &config.storage.media_dir.display().to_string(),
        config.options.parallel_downloads,
        config.options.resume_cursor,
    );

    let api = TwitterApi::new(&config.api)?;
    let summary = run_export(&api, &config, &ConsoleVerifier).await?;

    print_summary(&summary);

    // Recoverable failures are reported but do not fail the run.
    if summary.is_partial() {
        print_warning("Export finished with errors, see above");
    }

    Ok(())
}
