pub mod logging;
pub mod simple_logger;
