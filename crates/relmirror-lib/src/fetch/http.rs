use super::types::{FetchError, Fetcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::Instant;

const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Downloads objects over HTTP(S), one request per object and no retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("relmirror/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn download_to(
        &self,
        remote_url: &str,
        mut response: reqwest::Response,
        output_path: &Path,
    ) -> Result<(), FetchError> {
        let write_error = |source| FetchError::Write {
            path: output_path.to_path_buf(),
            source,
        };

        let total = response.content_length();
        let file = tokio::fs::File::create(output_path)
            .await
            .map_err(write_error)?;
        let mut writer = tokio::io::BufWriter::new(file);

        let mut received: u64 = 0;
        let mut last_report: Option<Instant> = None;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|source| FetchError::Request {
                url: remote_url.to_string(),
                source,
            })?
        {
            tokio::io::AsyncWriteExt::write_all(&mut writer, &chunk)
                .await
                .map_err(write_error)?;

            received += chunk.len() as u64;
            // First chunk, then at most once per interval.
            if last_report.is_none_or(|at| at.elapsed() >= PROGRESS_INTERVAL) {
                last_report = Some(Instant::now());
                report_progress(remote_url, received, total);
            }
        }

        tokio::io::AsyncWriteExt::flush(&mut writer)
            .await
            .map_err(write_error)?;
        tracing::info!(url = %remote_url, received, "Downloaded {} bytes", received);
        Ok(())
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, remote_url: &str, local_path: &Path) -> Result<(), FetchError> {
        if let Some(parent) = local_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| FetchError::CreateDirectory {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let response = self
            .client
            .get(remote_url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: remote_url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: remote_url.to_string(),
                status,
            });
        }

        // Bytes land in a sibling file first so an interrupted transfer never
        // shows up as an existing object on the next run.
        let part_path = part_path_for(local_path);
        if let Err(err) = self.download_to(remote_url, response, &part_path).await {
            if let Err(remove_err) = tokio::fs::remove_file(&part_path).await {
                tracing::debug!(path = %part_path.display(), "Failed to remove partial file: {}", remove_err);
            }
            return Err(err);
        }

        tokio::fs::rename(&part_path, local_path)
            .await
            .map_err(|source| FetchError::Write {
                path: local_path.to_path_buf(),
                source,
            })
    }
}

fn report_progress(remote_url: &str, received: u64, total: Option<u64>) {
    match total {
        Some(total) if total > 0 => tracing::info!(
            url = %remote_url,
            received,
            total,
            "Downloading... {}%",
            received.min(total) * 100 / total
        ),
        _ => tracing::info!(url = %remote_url, received, "Downloading... {} bytes", received),
    }
}

fn part_path_for(local_path: &Path) -> PathBuf {
    let mut part: OsString = local_path.as_os_str().to_owned();
    part.push(".part");
    PathBuf::from(part)
}
