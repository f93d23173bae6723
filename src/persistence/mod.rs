pub mod files;
pub mod log_store;

pub use log_store::{LogStore, DEFAULT_LOG_FILE};
