// file: tests/common/mod.rs
// description: single-route HTTP responder that records every request it serves
#![allow(dead_code)]

use image_scout::{Config, Credentials};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub head: String,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<String> {
        let prefix = format!("{}:", name.to_ascii_lowercase());
        self.head.lines().find_map(|line| {
            line.to_ascii_lowercase()
                .starts_with(&prefix)
                .then(|| line[prefix.len()..].trim().to_string())
        })
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

pub struct MockServer {
    url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Answers every request with `status` and `body`.
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let body = body.into();

        let recorded = Arc::clone(&requests);
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                serve(stream, status, &body, &recorded).await;
            }
        });

        Self {
            url,
            requests,
            handle,
        }
    }

    pub async fn json(status: u16, body: serde_json::Value) -> Self {
        Self::start(status, body.to_string()).await
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Reads one request, records it, then writes the canned response.
async fn serve(
    mut stream: TcpStream,
    status: u16,
    body: &str,
    recorded: &Mutex<Vec<RecordedRequest>>,
) -> Option<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let lower = line.to_ascii_lowercase();
            lower
                .strip_prefix("content-length:")
                .and_then(|v| v.trim().parse::<usize>().ok())
        })
        .unwrap_or(0);

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let end = buf.len().min(body_start + content_length);
    let request_body = String::from_utf8_lossy(&buf[body_start..end]).to_string();

    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let target = request_line.next().unwrap_or_default().to_string();

    recorded.lock().unwrap().push(RecordedRequest {
        method,
        target,
        head,
        body: request_body,
    });

    let reason = if (200..300).contains(&status) { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await.ok()?;
    stream.shutdown().await.ok();

    Some(())
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

pub fn test_credentials() -> Credentials {
    Credentials {
        serp_api_key: "test-serp".to_string(),
        openai_api_key: "test-openai".to_string(),
    }
}

/// Default config with both services pointed at local mocks.
pub fn config_for(llm: &MockServer, search: &MockServer) -> Config {
    let mut config = Config::default_config();
    config.llm.endpoint = format!("{}/v1", llm.url());
    config.search.endpoint = search.url().to_string();
    config
}

/// A Responses API body whose structured reply is `{"query": phrase}`.
pub fn responses_body(phrase: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "resp_test",
        "object": "response",
        "status": "completed",
        "model": "gpt-4o-2024-08-06",
        "output": [{
            "type": "message",
            "id": "msg_test",
            "status": "completed",
            "role": "assistant",
            "content": [{
                "type": "output_text",
                "text": serde_json::json!({ "query": phrase }).to_string(),
                "annotations": []
            }]
        }]
    })
}

/// A SerpApi body with `count` numbered image records.
pub fn images_body(count: usize) -> serde_json::Value {
    let records: Vec<_> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "position": i,
                "thumbnail": format!("https://thumbs.example/{}.jpg", i),
                "original": format!("https://images.example/{}.jpg", i)
            })
        })
        .collect();
    serde_json::json!({
        "search_metadata": { "status": "Success" },
        "images_results": records
    })
}
