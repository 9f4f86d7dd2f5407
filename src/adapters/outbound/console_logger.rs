use crate::domains::logger::DomainLogger;
use chrono::Utc;
use std::sync::Arc;

struct ConsoleBridge;

impl ConsoleBridge {
    fn line(level: &str, msg: &str) -> String {
        format!("{} - {} - {}", Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"), level, msg)
    }
}

impl DomainLogger for ConsoleBridge {
    fn info(&self, msg: &str) { println!("{}", Self::line("INFO", msg)); }
    fn warn(&self, msg: &str) { println!("{}", Self::line("WARNING", msg)); }
    fn error(&self, msg: &str) { eprintln!("{}", Self::line("ERROR", msg)); }
}

/// Console-backed DomainLogger, also the fallback when the file logger cannot start.
pub fn init_console_logger() -> Arc<dyn DomainLogger> {
    Arc::new(ConsoleBridge {})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_line_carries_level_and_message() {
        let line = ConsoleBridge::line("INFO", "Incoming request: GET /");
        assert!(line.ends_with(" - INFO - Incoming request: GET /"));
    }
}
