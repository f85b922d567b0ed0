use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;

/// Fans every message out to each attached logger in order.
pub struct MultiLogger {
    sinks: Vec<DynLogger>,
}

impl MultiLogger {
    pub fn new(sinks: Vec<DynLogger>) -> Self {
        Self { sinks }
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.info(msg));
    }

    fn warn(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.warn(msg));
    }

    fn error(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.error(msg));
    }
}

/// Console logger, plus a file logger when `file_path` is set and can be opened.
pub fn init_combined_logger(file_path: Option<&str>) -> DynLogger {
    let console = crate::adapters::outbound::init_console_logger("session");
    let Some(path) = file_path else {
        return console;
    };
    match crate::adapters::outbound::init_file_logger(path) {
        Ok(file) => Arc::new(MultiLogger::new(vec![console, file])),
        Err(e) => {
            console.warn(&format!("File logging disabled: {}", e));
            console
        }
    }
}
