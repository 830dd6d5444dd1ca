pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LocalStorage, TomlConfig};

pub use crate::core::{engine::ReportEngine, pipeline::MarkPipeline};
pub use domain::model::{MarkKind, MarkRecord, Neighbor, OutputFormat, ReportSummary};
pub use utils::error::{MarkError, Result};
