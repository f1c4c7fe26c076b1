mod planner;
mod types;

pub use planner::SyncPlanner;
pub use types::PlanEntry;
