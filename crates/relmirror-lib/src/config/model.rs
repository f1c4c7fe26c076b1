use serde::{Deserialize, Serialize};

pub const DEFAULT_REMOTE_BASE_URL: &str = "http://releases.example.org/";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Prepended verbatim to each object key to form its download URL.
    pub remote_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote_base_url: DEFAULT_REMOTE_BASE_URL.to_string(),
        }
    }
}
