mod guard;
mod keyspace;
mod stress;

pub use guard::*;
pub use keyspace::*;
use log::LevelFilter;
use std::env;
pub use stress::*;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}
