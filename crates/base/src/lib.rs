pub mod logging;
pub use logging::{StderrLogger, init_stderr_logger, init_stderr_logger_with_level};

mod vec2;
pub use vec2::*;
