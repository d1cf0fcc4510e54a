//! Telemetry helpers for structured logging.

/// Initialize tracing for embedding applications that have not installed a
/// subscriber of their own. Filtering follows `RUST_LOG`.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
