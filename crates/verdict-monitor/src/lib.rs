//! Logging setup and request auditing.

mod audit;
mod logging;

pub use audit::AuditRecord;
pub use logging::setup_logging;
pub use tracing_appender::non_blocking::WorkerGuard;
