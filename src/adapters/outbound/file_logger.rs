use crate::domains::logger::DomainLogger;
use chrono::Utc;
use std::sync::Arc;

struct FastLogBridge;

impl DomainLogger for FastLogBridge {
    fn info(&self, msg: &str) {
        log::info!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn warn(&self, msg: &str) {
        log::warn!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn error(&self, msg: &str) {
        log::error!("{} - {}", Utc::now().to_rfc3339(), msg);
    }
}

/// Install `fast_log` writing to `path` and return a logger that feeds it.
/// `fast_log` owns the global `log` facade, so this can succeed once per process.
pub fn init_file_logger(path: &str) -> Result<Arc<dyn DomainLogger>, String> {
    fast_log::init(
        fast_log::config::Config::new()
            .file(path)
            .level(log::LevelFilter::Info),
    )
    .map_err(|e| format!("Failed to initialize fast_log: {}", e))?;
    Ok(Arc::new(FastLogBridge))
}
