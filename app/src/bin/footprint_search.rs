//! `footprint-search <identifier> <api_key>`: multi-engine footprint search.

use clap::Parser;
use footprint_app::cli::{is_informational, SearchCli};
use footprint_app::commands::search::search_with_api_key;
use footprint_app::{init_tracing, load_config, search_exit_status, to_json, EXIT_FAILURE};
use footprint_core::SearchEnvelope;
use footprint_search::FootprintHit;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match SearchCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if is_informational(&e) {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_FAILURE)
            };
        }
    };

    init_tracing(cli.verbose);

    let (Some(identifier), Some(api_key)) = (cli.identifier, cli.api_key) else {
        eprintln!("Usage: footprint-search <email_or_identifier> <api_key>");
        return ExitCode::from(EXIT_FAILURE);
    };

    let envelope = match load_config(cli.config.as_deref()) {
        Ok(config) => search_with_api_key(&identifier, &api_key, &config.search).await,
        Err(e) => {
            tracing::error!("{:#}", e);
            SearchEnvelope::<FootprintHit>::failure(identifier.trim(), e.to_string())
        }
    };

    match to_json(&envelope, true) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!("failed to serialize result: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    }

    ExitCode::from(search_exit_status(&envelope))
}
