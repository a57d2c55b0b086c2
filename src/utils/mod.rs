// Mon Oct 19 2026 - Alex

pub mod logging;

pub use logging::{init_logger, scoped_timer, LoggingUtils, ScopedTimer};
