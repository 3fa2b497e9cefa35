//! The `schedule` command: run the scan on a cron schedule until interrupted.

use std::sync::Arc;

use anyhow::Context;
use tgscan_core::AppConfig;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::scan::{self, ScanArgs, ScanSettings};

/// Every two hours, on the hour (UTC).
pub(crate) const DEFAULT_CRON: &str = "0 0 */2 * * *";

/// Handler for `tgscan schedule`.
///
/// A failed pass is logged and the schedule keeps running. A tick that fires
/// while the previous pass is still going is skipped.
///
/// # Errors
///
/// Returns an error if the scan settings are invalid, the cron expression
/// is rejected, or the scheduler cannot be started or stopped.
pub(crate) async fn run_schedule(
    config: AppConfig,
    args: ScanArgs,
    cron: &str,
    run_now: bool,
) -> anyhow::Result<()> {
    ScanSettings::resolve(&config, &args).context("invalid scan settings")?;

    let config = Arc::new(config);
    let args = Arc::new(args);
    let running = Arc::new(Mutex::new(()));

    let mut scheduler = JobScheduler::new()
        .await
        .context("failed to create scheduler")?;

    let job = {
        let config = Arc::clone(&config);
        let args = Arc::clone(&args);
        let running = Arc::clone(&running);
        Job::new_async(cron, move |_uuid, _lock| {
            let config = Arc::clone(&config);
            let args = Arc::clone(&args);
            let running = Arc::clone(&running);
            Box::pin(async move {
                run_guarded(&running, &config, &args).await;
            })
        })
        .with_context(|| format!("invalid cron expression: {cron}"))?
    };
    scheduler.add(job).await.context("failed to register scan job")?;
    scheduler.start().await.context("failed to start scheduler")?;
    tracing::info!(cron, "scheduler started");

    if run_now {
        run_guarded(&running, &config, &args).await;
    }

    shutdown_signal().await;
    scheduler
        .shutdown()
        .await
        .context("failed to stop scheduler")?;
    tracing::info!("scheduler stopped");
    Ok(())
}

async fn run_guarded(running: &Mutex<()>, config: &AppConfig, args: &ScanArgs) {
    let Ok(_guard) = running.try_lock() else {
        tracing::warn!("scheduler: previous scan still running; skipping this tick");
        return;
    };

    tracing::info!("scheduler: starting scan");
    match scan::run_scan(config, args).await {
        Ok(()) => tracing::info!("scheduler: scan complete"),
        Err(e) => tracing::error!(error = %e, "scheduler: scan failed"),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping scheduler");
}
