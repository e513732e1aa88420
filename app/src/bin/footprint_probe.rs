//! `footprint-probe <email>`: account enumeration through an external tool.

use clap::Parser;
use footprint_app::cli::{probe_argument_failure, ProbeCli};
use footprint_app::commands::probe::{internal_failure, run_probe};
use footprint_app::{init_tracing, load_config, probe_exit_status, to_json, EXIT_FAILURE};
use footprint_core::ProbeEnvelope;
use footprint_probe::{ProbeOrchestrator, ProcessExecutor};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match ProbeCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match probe_argument_failure(&e) {
                Some(envelope) => emit(&envelope),
                None => ExitCode::SUCCESS,
            };
        }
    };

    init_tracing(cli.verbose);

    let envelope = match load_config(cli.config.as_deref()) {
        Ok(config) => {
            let orchestrator =
                ProbeOrchestrator::from_config(Arc::new(ProcessExecutor), &config.probe);
            run_probe(&cli.args, &orchestrator).await
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            internal_failure()
        }
    };

    emit(&envelope)
}

fn emit(envelope: &ProbeEnvelope) -> ExitCode {
    match to_json(envelope, false) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!("failed to serialize result: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    }
    ExitCode::from(probe_exit_status(envelope))
}
