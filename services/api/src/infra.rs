use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Resolves once the process receives Ctrl-C or, on Unix, SIGTERM, SIGHUP, SIGUSR1 or SIGUSR2.
pub(crate) async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let other = async {
        use tokio::signal::unix::SignalKind;

        tokio::select! {
            _ = unix_signal(SignalKind::terminate(), "SIGTERM") => {},
            _ = unix_signal(SignalKind::hangup(), "SIGHUP") => {},
            _ = unix_signal(SignalKind::user_defined1(), "SIGUSR1") => {},
            _ = unix_signal(SignalKind::user_defined2(), "SIGUSR2") => {},
        }
    };

    #[cfg(not(unix))]
    let other = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = other => {},
    }
}

#[cfg(unix)]
async fn unix_signal(kind: tokio::signal::unix::SignalKind, name: &'static str) {
    match tokio::signal::unix::signal(kind) {
        Ok(mut signal) => {
            signal.recv().await;
            tracing::info!(signal = name, "shutdown signal received");
        }
        Err(err) => {
            tracing::error!(error = %err, signal = name, "failed to listen for signal");
            std::future::pending::<()>().await;
        }
    }
}
