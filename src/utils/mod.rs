pub mod config;

pub use config::ScanConfig;
