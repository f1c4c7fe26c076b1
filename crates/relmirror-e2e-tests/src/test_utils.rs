use eyre::Result;
use relmirror_lib::fetch::HttpFetcher;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

pub fn setup_test_environment() -> Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    std::fs::create_dir_all(temp_dir.path().join("mirror"))?;
    Ok(temp_dir)
}

pub fn write_manifest(dir: &Path, lines: &[&str]) -> Result<PathBuf> {
    let manifest_path = dir.join("filelist.txt");
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(&manifest_path, content)?;
    Ok(manifest_path)
}

pub fn write_config(dir: &Path, remote_base_url: &str) -> Result<PathBuf> {
    let config_path = dir.join("config.json");
    let config = serde_json::json!({ "remote_base_url": remote_base_url });
    std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    Ok(config_path)
}

/// An HTTP fetcher that ignores proxy settings from the environment, so
/// requests always reach the loopback server.
pub fn loopback_fetcher() -> Result<HttpFetcher> {
    let client = reqwest::Client::builder().no_proxy().build()?;
    Ok(HttpFetcher::with_client(client))
}

/// What the test server sends back for a path.
#[derive(Debug, Clone)]
pub enum Route {
    File(Vec<u8>),
    /// Declares `declared_length` bytes but closes after sending `body`.
    Truncated { declared_length: usize, body: Vec<u8> },
}

/// Minimal HTTP/1.1 server that answers GET requests from a fixed set of
/// routes and 404s everything else. Each connection serves one request.
pub struct StaticHttpServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl StaticHttpServer {
    pub async fn start(files: HashMap<String, Vec<u8>>) -> Result<Self> {
        let routes = files
            .into_iter()
            .map(|(path, body)| (path, Route::File(body)))
            .collect();
        Self::start_with_routes(routes).await
    }

    pub async fn start_with_routes(routes: HashMap<String, Route>) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let routes = Arc::new(routes);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handle = tokio::spawn({
            let requests = requests.clone();
            async move {
                while let Ok((stream, _)) = listener.accept().await {
                    let routes = routes.clone();
                    let requests = requests.clone();
                    tokio::spawn(async move {
                        if let Err(err) = serve_connection(stream, &routes, &requests).await {
                            tracing::debug!("Test server connection failed: {}", err);
                        }
                    });
                }
            }
        });

        Ok(Self {
            base_url: format!("http://{addr}/"),
            requests,
            handle,
        })
    }

    /// Request paths in arrival order.
    pub fn requested_paths(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for StaticHttpServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve_connection(
    mut stream: TcpStream,
    routes: &HashMap<String, Route>,
    requests: &Mutex<Vec<String>>,
) -> std::io::Result<()> {
    let mut request = Vec::new();
    let mut buffer = [0u8; 1024];
    loop {
        let bytes_read = stream.read(&mut buffer).await?;
        if bytes_read == 0 {
            break;
        }
        request.extend_from_slice(&buffer[..bytes_read]);
        if request.windows(4).any(|window| window == b"\r\n\r\n") {
            break;
        }
    }

    let request = String::from_utf8_lossy(&request);
    let path = request
        .lines()
        .next()
        .and_then(|request_line| request_line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    requests.lock().unwrap().push(path.clone());

    let response = match routes.get(&path) {
        Some(Route::File(body)) => ok_response(body.len(), body),
        Some(Route::Truncated {
            declared_length,
            body,
        }) => ok_response(*declared_length, body),
        None => b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_vec(),
    };

    stream.write_all(&response).await?;
    stream.shutdown().await
}

fn ok_response(declared_length: usize, body: &[u8]) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {declared_length}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n"
    )
    .into_bytes();
    response.extend_from_slice(body);
    response
}

/// A `tracing` layer that keeps the level and message of every event.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<(Level, String)>>>,
}

impl EventRecorder {
    pub fn events(&self) -> Vec<(Level, String)> {
        self.events.lock().unwrap().clone()
    }
}

impl<S: Subscriber> Layer<S> for EventRecorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.events
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.0));
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}
