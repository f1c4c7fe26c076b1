use crate::fetch::Fetcher;
use crate::plan::PlanEntry;
use tracing::{info, warn};

/// Outcome counts of one sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub present: usize,
    pub fetched: usize,
    pub failed: usize,
    pub ignored: usize,
}

/// Carries out a plan one entry at a time.
///
/// Failed fetches are logged and counted; they never stop the run.
pub async fn execute<I, F>(entries: I, fetcher: &F) -> SyncSummary
where
    I: IntoIterator<Item = PlanEntry>,
    F: Fetcher,
{
    let mut summary = SyncSummary::default();

    for entry in entries {
        match entry {
            PlanEntry::AlreadyPresent { local_path } => {
                info!(path = %local_path.display(), "{} already exists", local_path.display());
                summary.present += 1;
            }
            PlanEntry::Ignored { raw_line } => {
                info!("Ignoring line {}", raw_line);
                summary.ignored += 1;
            }
            PlanEntry::Fetch {
                remote_url,
                local_path,
            } => {
                info!(url = %remote_url, path = %local_path.display(), "Fetching");
                match fetcher.fetch(&remote_url, &local_path).await {
                    Ok(()) => summary.fetched += 1,
                    Err(err) => {
                        warn!(url = %remote_url, path = %local_path.display(), "Fetch failed: {:#}", err);
                        summary.failed += 1;
                    }
                }
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingFetcher {
        calls: Mutex<Vec<(String, PathBuf)>>,
        failing_url: Option<String>,
    }

    impl RecordingFetcher {
        fn calls(&self) -> Vec<(String, PathBuf)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Fetcher for RecordingFetcher {
        async fn fetch(&self, remote_url: &str, local_path: &Path) -> Result<(), FetchError> {
            self.calls
                .lock()
                .unwrap()
                .push((remote_url.to_string(), local_path.to_path_buf()));

            if self.failing_url.as_deref() == Some(remote_url) {
                return Err(FetchError::Write {
                    path: local_path.to_path_buf(),
                    source: std::io::Error::other("disk full"),
                });
            }
            Ok(())
        }
    }

    fn fetch(url: &str, path: &str) -> PlanEntry {
        PlanEntry::Fetch {
            remote_url: url.to_string(),
            local_path: PathBuf::from(path),
        }
    }

    #[tokio::test]
    async fn test_only_fetch_entries_reach_fetcher() {
        let fetcher = RecordingFetcher::default();
        let entries = vec![
            PlanEntry::Ignored {
                raw_line: "PRE x/".to_string(),
            },
            fetch("http://r.test/repo/a.jar", "/m/a.jar"),
            PlanEntry::AlreadyPresent {
                local_path: PathBuf::from("/m/b.jar"),
            },
            fetch("http://r.test/repo/c.jar", "/m/c.jar"),
        ];

        let summary = execute(entries, &fetcher).await;

        assert_eq!(
            fetcher.calls(),
            vec![
                ("http://r.test/repo/a.jar".to_string(), PathBuf::from("/m/a.jar")),
                ("http://r.test/repo/c.jar".to_string(), PathBuf::from("/m/c.jar")),
            ]
        );
        assert_eq!(
            summary,
            SyncSummary {
                present: 1,
                fetched: 2,
                failed: 0,
                ignored: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_failed_fetch_does_not_stop_run() {
        let fetcher = RecordingFetcher {
            failing_url: Some("http://r.test/repo/a.jar".to_string()),
            ..Default::default()
        };
        let entries = vec![
            fetch("http://r.test/repo/a.jar", "/m/a.jar"),
            fetch("http://r.test/repo/b.jar", "/m/b.jar"),
        ];

        let summary = execute(entries, &fetcher).await;

        assert_eq!(fetcher.calls().len(), 2);
        assert_eq!(summary.fetched, 1);
        assert_eq!(summary.failed, 1);
    }

    #[tokio::test]
    async fn test_empty_plan() {
        let fetcher = RecordingFetcher::default();

        let summary = execute(Vec::<PlanEntry>::new(), &fetcher).await;

        assert_eq!(summary, SyncSummary::default());
        assert!(fetcher.calls().is_empty());
    }
}
