//! Local mock relay for HTTP tests.
//!
//! Listens on an ephemeral port, decodes the `url=` parameter of each
//! request, and answers from a route table keyed by substrings of the
//! decoded upstream URL. Every decoded upstream URL is recorded.

use std::sync::{Arc, Mutex};

use percent_encoding::percent_decode_str;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::relay::Relay;

type Route = (String, u16, String);

pub(crate) struct MockRelay {
    port: u16,
    hits: Arc<Mutex<Vec<String>>>,
    handle: tokio::task::JoinHandle<()>,
}

impl MockRelay {
    /// Starts a relay answering `(needle, status, body)` routes.
    ///
    /// The first route whose needle occurs in the upstream URL wins;
    /// unmatched requests get a 404.
    pub(crate) async fn start(routes: Vec<(&str, u16, &str)>) -> Self {
        let routes: Arc<Vec<Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(n, s, b)| (n.to_string(), s, b.to_string()))
                .collect(),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let hits = Arc::new(Mutex::new(Vec::new()));

        let accept_hits = Arc::clone(&hits);
        let handle = tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let hits = Arc::clone(&accept_hits);
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 8192];
                    let n = stream.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]);
                    let upstream = upstream_of(&request);
                    hits.lock().unwrap().push(upstream.clone());

                    let (status, body) = routes
                        .iter()
                        .find(|(needle, _, _)| upstream.contains(needle.as_str()))
                        .map(|(_, s, b)| (*s, b.clone()))
                        .unwrap_or((404, "not found".to_string()));

                    let resp = format!(
                        "HTTP/1.1 {status} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(resp.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self { port, hits, handle }
    }

    /// Relay pointing at this server.
    pub(crate) fn relay(&self) -> Relay {
        Relay::new(format!("http://127.0.0.1:{}/raw?url=", self.port))
    }

    /// Decoded upstream URLs requested so far, in arrival order.
    pub(crate) fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    /// Number of requests whose upstream URL contains `needle`.
    pub(crate) fn hits_matching(&self, needle: &str) -> usize {
        self.hits().iter().filter(|u| u.contains(needle)).count()
    }
}

impl Drop for MockRelay {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Extracts and decodes the `url=` parameter from a raw HTTP request.
fn upstream_of(request: &str) -> String {
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("");
    let encoded = target.split_once("url=").map(|(_, u)| u).unwrap_or(target);
    percent_decode_str(encoded).decode_utf8_lossy().into_owned()
}
