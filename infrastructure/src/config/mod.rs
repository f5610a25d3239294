//! Configuration: raw TOML data types and the multi-source loader.

pub mod file_config;
pub mod loader;

pub use file_config::FileConfig;
pub use loader::ConfigLoader;
