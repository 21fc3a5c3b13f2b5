pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod service;

pub use config::{AppConfig, DuplicatePolicy, GroupingConfig, RefMode};
pub use error::GroupError;
pub use service::{aggregate_line_items, GrouperService};
