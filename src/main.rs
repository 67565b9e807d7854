use std::env;
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use swaprisk::configuration::Configuration;

const DEFAULT_VALUATION_FILE: &str = "data/sample_valuation.json";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_VALUATION_FILE.to_owned());
    let config = match Configuration::from_reader(&config_path) {
        Ok(config) => config,
        Err(err) => {
            error!(path = %config_path, "{err}");
            return ExitCode::FAILURE;
        }
    };

    match config.risk_engine().run() {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        },
        Err(err) => {
            error!(swap = config.swap().id(), "valuation aborted: {err}");
            ExitCode::FAILURE
        }
    }
}
