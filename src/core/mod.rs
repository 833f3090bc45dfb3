pub mod config;
pub mod options;

pub use config::ValidationConfig;
pub use options::BuildOptions;
