pub mod app;
pub mod audit;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod description;
pub mod error;
pub mod linker;
pub mod reconcile;
pub mod registry;
pub mod report;
pub mod schema;
pub mod test_utils;

pub use error::{CatalogError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
