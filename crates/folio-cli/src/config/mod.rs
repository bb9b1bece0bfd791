//! Configuration: the config file and the resolved settings.

pub mod storage;
mod types;

pub use types::{FileConfig, Settings};
