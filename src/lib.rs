// Library for tests to access modules

pub mod config;
pub mod error;
pub mod models;
pub mod monitor;
pub mod platform;
pub mod sampler;
pub mod snapshot;
pub mod version;

pub use platform::{available_memory_gib, count_cores, kernel_version, total_memory_gib};
