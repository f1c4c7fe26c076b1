use crate::cli::SyncParams;
use crate::error::RelMirrorError;
use crate::executor::{SyncSummary, execute};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::plan::SyncPlanner;
use tracing;

pub async fn run_sync(params: SyncParams) -> Result<SyncSummary, RelMirrorError> {
    let fetcher = HttpFetcher::new()?;
    run_sync_with(params, &fetcher).await
}

pub async fn run_sync_with<F: Fetcher>(
    params: SyncParams,
    fetcher: &F,
) -> Result<SyncSummary, RelMirrorError> {
    let SyncParams {
        local_root,
        manifest,
        remote_base_url,
    } = params;

    tracing::info!("Mirroring {} into {}", remote_base_url, local_root);
    let planner = SyncPlanner::new(local_root, remote_base_url);

    // Planning is lazy, so each existence check sees the fetches made for earlier lines.
    let summary = execute(planner.plan(manifest.lines()), fetcher).await;

    tracing::info!(
        fetched = summary.fetched,
        present = summary.present,
        ignored = summary.ignored,
        failed = summary.failed,
        "Sync finished"
    );
    if summary.failed > 0 {
        tracing::warn!(
            "{} files could not be fetched. Run the sync again to pick them up.",
            summary.failed
        );
    }

    Ok(summary)
}
