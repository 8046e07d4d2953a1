use std::process::ExitCode;

use configs::{AppConfig, LogFormat};
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> ExitCode {
    dotenv().ok();

    // Logging is not up yet, so config errors go to stderr.
    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    common::utils::logging::init_logging(cfg.logging.format == LogFormat::Json);
    info!(service = "landparcel", event = "logger_init", "tracing subscriber initialized");

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "landparcel", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "landparcel", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "landparcel",
        event = "start",
        %service_id,
        pid,
        version,
        bind = %cfg.server.bind_addr(),
        threads = worker_threads.unwrap_or_default(),
        "land parcel service starting"
    );

    // server::run returns after Ctrl+C once in-flight requests have drained
    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(service = "landparcel", event = "stop", %service_id, pid, "land parcel service stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "landparcel", event = "run_failed", error = %e, "server::run returned error");
            ExitCode::FAILURE
        }
    }
}
