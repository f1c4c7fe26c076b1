mod loader;
mod model;

pub use loader::{ENV_PREFIX, load_config};
pub use model::{Config, DEFAULT_REMOTE_BASE_URL};

use crate::error::RelMirrorError;

/// Rejects base URLs that are not absolute `http`/`https` URLs.
///
/// The value itself is used verbatim afterwards; this only guards against typos.
pub fn validate_remote_base_url(remote_base_url: &str) -> Result<(), RelMirrorError> {
    let url = url::Url::parse(remote_base_url).map_err(|e| {
        RelMirrorError::CliArgumentValidation {
            details: format!("Invalid remote base URL {remote_base_url}: {e}"),
        }
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(RelMirrorError::CliArgumentValidation {
            details: format!(
                "Unsupported scheme {scheme} in remote base URL {remote_base_url}. Use http or https."
            ),
        }),
    }
}
