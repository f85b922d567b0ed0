use crate::domains::logger::DomainLogger;
use std::sync::Arc;

/// Forwards domain log lines to the process-wide `tracing` subscriber.
struct TracingBridge {
    target: &'static str,
}

impl DomainLogger for TracingBridge {
    fn info(&self, msg: &str) {
        tracing::info!(target: "fieldroute", component = self.target, "{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!(target: "fieldroute", component = self.target, "{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "fieldroute", component = self.target, "{}", msg);
    }
}

/// Console logger backed by `tracing`; the subscriber decides the format.
pub fn init_console_logger(component: &'static str) -> Arc<dyn DomainLogger> {
    Arc::new(TracingBridge { target: component })
}
