pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod fetch;
pub mod manifest;
pub mod plan;

pub use config::Config;
pub use error::RelMirrorError;
pub use plan::{PlanEntry, SyncPlanner};
