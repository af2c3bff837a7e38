use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use truststore_cleaner::{config::Config, pki::CertificateCleaner, telemetry};

#[derive(Debug, Parser)]
#[command(
    name = "truststore-cleaner",
    about = "Remove expired certificates from a PEM trust store",
    version
)]
struct Cli {
    /// PEM trust store, rewritten in place
    trust_store: PathBuf,
}

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    telemetry::init_tracing();

    let cli = Cli::parse();
    let config = Config::load()?;
    tracing::debug!("Loaded configuration: {:?}", config);

    let cleaner = CertificateCleaner::new(config.output);
    match cleaner.clean_file(&cli.trust_store, Utc::now()) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            tracing::error!("{e}");
            Ok(e.exit_code().map_or(ExitCode::FAILURE, ExitCode::from))
        }
    }
}
