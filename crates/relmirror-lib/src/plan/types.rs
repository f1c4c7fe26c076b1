use serde::Serialize;
use std::path::PathBuf;

/// The sync decision for a single manifest line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanEntry {
    /// The object already exists under the local root.
    AlreadyPresent { local_path: PathBuf },
    /// The object is missing locally and must be downloaded.
    Fetch {
        remote_url: String,
        local_path: PathBuf,
    },
    /// The line does not name a repository object.
    Ignored { raw_line: String },
}
