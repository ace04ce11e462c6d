//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use admin_console_client::{ClientConfig, HttpResourceClient, Record, ResourceClient};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_api {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 生成唯一的测试记录名称
pub fn generate_test_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// 测试上下文 - 封装真实 API 上的一个资源客户端
pub struct TestContext {
    pub client: HttpResourceClient,
    pub key_field: String,
}

impl TestContext {
    /// 从 `ADMIN_API_BASE` / `TEST_RESOURCE` 创建上下文
    pub fn from_env() -> Option<Self> {
        let config = ClientConfig::from_env().ok()?;
        let resource = env::var("TEST_RESOURCE").unwrap_or_else(|_| "roles".to_string());
        let key_field = env::var("TEST_KEY_FIELD").unwrap_or_else(|_| "id".to_string());
        let client = HttpResourceClient::new(&config, resource).ok()?;
        Some(Self { client, key_field })
    }

    /// 查找并清理所有测试记录（任一字段以 _test- 开头）
    pub async fn cleanup_all_test_records(&self) {
        let Ok(records) = self.client.get_all().await else {
            return;
        };
        for record in records {
            let is_test = record
                .as_map()
                .values()
                .any(|v| v.as_str().is_some_and(|s| s.starts_with("_test-")));
            if let (true, Some(key)) = (is_test, record.key_string(&self.key_field)) {
                let _ = self.client.delete(&key).await;
            }
        }
    }
}

/// A captured request seen by [`StubServer`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Single-connection-at-a-time HTTP stub.
///
/// Answers every request with the next canned `(status, body)` pair and
/// reports what it received.
pub struct StubServer {
    pub config: ClientConfig,
    requests: mpsc::UnboundedReceiver<CapturedRequest>,
}

impl StubServer {
    pub async fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            for (status, body) in responses {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let request = read_request(&mut socket).await;
                let _ = tx.send(request);

                let response = format!(
                    "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    reason(status),
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            config: ClientConfig::new(format!("http://{addr}")),
            requests: rx,
        }
    }

    pub fn client(&self, resource: &str) -> HttpResourceClient {
        HttpResourceClient::new(&self.config, resource).unwrap()
    }

    pub async fn next_request(&mut self) -> CapturedRequest {
        self.requests.recv().await.unwrap()
    }
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();
    let body_end = (header_end + content_length).min(buf.len());
    let body = String::from_utf8_lossy(&buf[header_end..body_end]).to_string();

    CapturedRequest { method, path, body }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

/// Build a record from a JSON object literal.
pub fn record(value: Value) -> Record {
    serde_json::from_value(value).unwrap()
}
