use crate::domains::logger::{DomainLogger, DynLogger};
use log::{Level, LevelFilter};
use std::sync::Arc;

/// Fans each message out to every attached sink whose threshold admits it.
/// With no sinks attached it discards everything.
#[derive(Default)]
pub struct MultiLogger {
    sinks: Vec<(DynLogger, LevelFilter)>,
}

impl MultiLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `sink`; it receives messages at `threshold` or more severe.
    pub fn with(mut self, sink: DynLogger, threshold: LevelFilter) -> Self {
        self.sinks.push((sink, threshold));
        self
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    fn dispatch(&self, level: Level, msg: &str) {
        for (sink, _) in self.sinks.iter().filter(|(_, threshold)| level <= *threshold) {
            match level {
                Level::Error => sink.error(msg),
                Level::Warn => sink.warn(msg),
                _ => sink.info(msg),
            }
        }
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.dispatch(Level::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.dispatch(Level::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.dispatch(Level::Error, msg);
    }
}

/// File log at `path` plus console output, both filtered at `level`.
/// Falls back to console only when the file logger cannot be installed.
pub fn init_combined_logger(path: &str, level: LevelFilter) -> DynLogger {
    let console = super::init_console_logger();
    let logger = match super::init_file_logger(path, level) {
        Ok(file_logger) => MultiLogger::new().with(file_logger, level),
        Err(e) => {
            console.warn(&e);
            MultiLogger::new()
        }
    };
    Arc::new(logger.with(console, level))
}

/// A logger with no sinks; the default in tests.
pub fn init_noop_logger() -> DynLogger {
    Arc::new(MultiLogger::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Capture {
        lines: Mutex<Vec<String>>,
    }

    impl DomainLogger for Capture {
        fn info(&self, msg: &str) { self.lines.lock().unwrap().push(format!("INFO:{}", msg)); }
        fn warn(&self, msg: &str) { self.lines.lock().unwrap().push(format!("WARN:{}", msg)); }
        fn error(&self, msg: &str) { self.lines.lock().unwrap().push(format!("ERR:{}", msg)); }
    }

    #[test]
    fn forwards_to_every_sink() {
        let first = Arc::new(Capture::default());
        let second = Arc::new(Capture::default());
        let multi = MultiLogger::new()
            .with(first.clone(), LevelFilter::Info)
            .with(second.clone(), LevelFilter::Info);

        multi.info("planned");
        multi.error("store down");

        for capture in [&first, &second] {
            let lines = capture.lines.lock().unwrap();
            assert_eq!(*lines, vec!["INFO:planned".to_string(), "ERR:store down".to_string()]);
        }
    }

    #[test]
    fn each_sink_applies_its_own_threshold() {
        let verbose = Arc::new(Capture::default());
        let quiet = Arc::new(Capture::default());
        let multi = MultiLogger::new()
            .with(verbose.clone(), LevelFilter::Debug)
            .with(quiet.clone(), LevelFilter::Warn);

        multi.info("Incoming request: GET /");
        multi.warn("Rejected plan request");
        multi.error("store down");

        assert_eq!(verbose.lines.lock().unwrap().len(), 3);
        assert_eq!(
            *quiet.lines.lock().unwrap(),
            vec!["WARN:Rejected plan request".to_string(), "ERR:store down".to_string()]
        );
    }

    #[test]
    fn off_threshold_silences_a_sink() {
        let muted = Arc::new(Capture::default());
        let multi = MultiLogger::new().with(muted.clone(), LevelFilter::Off);
        multi.error("store down");
        assert!(muted.lines.lock().unwrap().is_empty());
    }

    #[test]
    fn noop_logger_has_no_sinks() {
        let empty = MultiLogger::new();
        assert_eq!(empty.sink_count(), 0);
        empty.info("nobody listens");

        let logger = init_noop_logger();
        logger.warn("nobody listens");
        logger.error("nobody listens");
    }
}
