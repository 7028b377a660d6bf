use std::process::ExitCode;

use configs::AppConfig;
use tokio::runtime::Runtime;
use tracing::{error, info};
use uuid::Uuid;

fn build_runtime(worker_threads: Option<usize>) -> std::io::Result<Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }
    builder.build()
}

/// Serve until the server fails or Ctrl+C arrives.
async fn serve(cfg: AppConfig, instance: Uuid) -> ExitCode {
    let server_task = tokio::spawn(server::run(cfg));
    tokio::select! {
        joined = server_task => match joined {
            Ok(Ok(())) => {
                info!(event = "stop", %instance, "server stopped");
                ExitCode::SUCCESS
            }
            Ok(Err(e)) => {
                error!(event = "run_failed", %instance, error = %format!("{e:#}"), "server exited with error");
                ExitCode::FAILURE
            }
            Err(e) => {
                error!(event = "task_join_error", %instance, error = %e, "server task aborted");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            // completed mutations are already on disk; an in-flight rewrite
            // lands via rename or not at all
            info!(event = "shutdown_signal", %instance, "received Ctrl+C, shutting down");
            ExitCode::SUCCESS
        }
    }
}

fn main() -> ExitCode {
    // .env first so RUST_LOG / LOG_FORMAT take effect
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let instance = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |panic| {
        error!(event = "panic", %instance, pid = std::process::id(), message = %panic, "unhandled panic");
    }));

    // no API secret, no server
    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(event = "config_invalid", error = %format!("{e:#}"), "configuration rejected");
            return ExitCode::FAILURE;
        }
    };

    let rt = match build_runtime(cfg.server.worker_threads) {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        event = "start",
        %instance,
        pid = std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
        workers = cfg.server.worker_threads.unwrap_or_default(),
        bind = %cfg.server.bind_addr(),
        "reservation server starting"
    );
    rt.block_on(serve(cfg, instance))
}
