use crate::cli::SyncParams;
use crate::error::RelMirrorError;
use crate::plan::SyncPlanner;
use std::io::{BufWriter, Write};

pub async fn run_dry_run(params: SyncParams) -> Result<(), RelMirrorError> {
    let stdout = std::io::stdout();
    let entries = write_plan(&params, stdout.lock())?;

    tracing::info!("Planned {} entries, nothing was fetched", entries);
    Ok(())
}

/// Writes one JSON object per plan entry and returns the number of entries.
pub fn write_plan<W: Write>(params: &SyncParams, writer: W) -> Result<usize, RelMirrorError> {
    let planner = SyncPlanner::new(params.local_root.as_str(), params.remote_base_url.as_str());
    let mut writer = BufWriter::new(writer);

    let mut count = 0;
    for entry in planner.plan(params.manifest.lines()) {
        serde_json::to_writer(&mut writer, &entry)?;
        writeln!(writer)?;
        count += 1;
    }
    writer.flush()?;

    Ok(count)
}
