mod http;
mod types;

pub use http::HttpFetcher;
pub use types::{FetchError, Fetcher};
