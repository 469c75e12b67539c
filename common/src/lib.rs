pub mod logging;

pub use logging::{LogArgs, LogFormat, LoggingError, init_logging};
