mod args;
mod dry_run;
mod params;
mod resolved_command;
mod sync;

pub use args::{Args, Command, parse_args, try_parse_args_from};
pub use dry_run::{run_dry_run, write_plan};
pub use params::SyncParams;
pub use resolved_command::{ResolvedCommand, resolve_command};
pub use sync::{run_sync, run_sync_with};
