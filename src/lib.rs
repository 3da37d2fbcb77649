pub mod bootstrap;
pub mod config;
pub mod delegate;
pub mod environment;
pub mod error;
pub mod logging;
pub mod network;
pub mod package_manager;
pub mod paths;
pub mod project;
pub mod report;
pub mod request;
pub mod scripts;

// Re-export commonly used types
pub use config::Config;
pub use environment::Environment;
pub use error::BootstrapError;
pub use request::{InvocationOptions, InvocationRequest};
