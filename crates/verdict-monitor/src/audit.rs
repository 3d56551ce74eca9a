//! Per-request audit events.

use std::fmt::Display;
use std::time::{Duration, Instant};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

/// Tracks one pipeline run from request to outcome.
///
/// Every event emitted through [`AuditRecord::span`] carries the request id.
#[derive(Debug)]
pub struct AuditRecord {
    request_id: Uuid,
    symbol: String,
    started: Instant,
    span: Span,
}

impl AuditRecord {
    /// Stamp a new request for a symbol.
    pub fn start(symbol: &str) -> Self {
        let request_id = Uuid::new_v4();
        let span = info_span!("analysis", request_id = %request_id, symbol);
        span.in_scope(|| info!("request received"));

        Self {
            request_id,
            symbol: symbol.to_string(),
            started: Instant::now(),
            span,
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Span to enter while the request is processed.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Emit the outcome event and return the elapsed time.
    pub fn finish<T, E: Display>(self, result: &Result<T, E>) -> Duration {
        let elapsed = self.started.elapsed();
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;

        self.span.in_scope(|| match result {
            Ok(_) => info!(elapsed_ms, outcome = "ok", "request completed"),
            Err(e) => error!(elapsed_ms, outcome = "error", error = %e, "request failed"),
        });

        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        let a = AuditRecord::start("AAPL");
        let b = AuditRecord::start("AAPL");

        assert_ne!(a.request_id(), b.request_id());
        assert_eq!(a.symbol(), "AAPL");
    }

    #[test]
    fn test_finish_reports_elapsed() {
        let record = AuditRecord::start("MSFT");
        std::thread::sleep(Duration::from_millis(2));

        let ok: Result<(), String> = Ok(());
        assert!(record.finish(&ok) >= Duration::from_millis(2));

        let failed: Result<(), String> = Err("no data".to_string());
        let elapsed = AuditRecord::start("MSFT").finish(&failed);
        assert!(elapsed < Duration::from_secs(5));
    }
}
