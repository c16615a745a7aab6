//! Mock banking API server for testing
//!
//! A small HTTP/1.1 server on a random local port that answers the same
//! routes as the real API and records every request it receives, so tests
//! can assert on headers, query strings and bodies.
//!
//! Default routes:
//! - POST /v1/auth/sign_up and PUT /v1/auth/sign_in grant `mock-token`
//! - GET /v1/users/infos returns a fixed profile
//! - GET /v1/users/bank_accounts/my returns `num_accounts` accounts
//! - GET /v1/users/bank_account_transfers/statements echoes the requested page
//! - POST /v1/users/bank_account_transfers acknowledges the transfer

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::json;

use super::http::endpoints;

/// Expiration granted by the mock auth endpoints (2100-01-01)
pub const MOCK_TOKEN_EXP: i64 = 4_102_444_800;

/// Configuration for the mock server
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Number of accounts returned by the accounts route
    pub num_accounts: usize,
    /// Total transfers reported by the statements route
    pub num_transfers: usize,
    /// Answer 401 on every non-auth route
    pub fail_auth: bool,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            num_accounts: 3,
            num_transfers: 10,
            fail_auth: false,
            delay_ms: 0,
        }
    }
}

/// Canned response overriding a default route
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    /// Header names are lowercased
    pub headers: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers.get(&name.to_lowercase()).cloned()
    }

    pub fn json_body(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// Decoded query pairs in the order they were sent
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Default)]
struct SharedState {
    requests: Mutex<Vec<RecordedRequest>>,
    overrides: Mutex<HashMap<String, MockResponse>>,
}

/// Mock banking API server
pub struct MockBankServer {
    port: u16,
    running: Arc<AtomicBool>,
    state: Arc<SharedState>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl MockBankServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let state = Arc::new(SharedState::default());

        // Non-blocking accept so the loop can observe shutdown
        listener.set_nonblocking(true)?;

        let running_clone = running.clone();
        let state_clone = state.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let state = state_clone.clone();
                        thread::spawn(move || handle_connection(stream, &cfg, &state));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            state,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Replace the response of a route (matched on path, any method)
    pub fn respond(&self, path: &str, response: MockResponse) {
        self.state
            .overrides
            .lock()
            .unwrap()
            .insert(path.to_string(), response);
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Requests received for one path
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockBankServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, state: &SharedState) {
    let _ = stream.set_nonblocking(false);
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));

    let Some(request) = read_request(&mut stream) else {
        send_response(&mut stream, 400, r#"{"error": "Invalid request"}"#);
        return;
    };
    state.requests.lock().unwrap().push(request.clone());

    if config.delay_ms > 0 {
        thread::sleep(Duration::from_millis(config.delay_ms));
    }

    if let Some(canned) = state.overrides.lock().unwrap().get(&request.path).cloned() {
        send_response(&mut stream, canned.status, &canned.body);
        return;
    }

    if config.fail_auth && !endpoints::is_auth_endpoint(&request.path) {
        send_response(&mut stream, 401, r#"{"message": "Unauthorized"}"#);
        return;
    }

    let (status, body) = route(&request, config);
    send_response(&mut stream, status, &body);
}

fn route(request: &RecordedRequest, config: &MockConfig) -> (u16, String) {
    let grant = json!({"success": true, "token": "mock-token", "exp": MOCK_TOKEN_EXP});

    match (request.method.as_str(), request.path.as_str()) {
        ("POST", endpoints::SIGN_UP) | ("PUT", endpoints::SIGN_IN) => (200, grant.to_string()),
        ("GET", endpoints::USER_INFO) => (
            200,
            json!({"user": {
                "uid": "user-1",
                "name": "Ana Souza",
                "email": "ana@example.com",
                "created_at": "2024-01-01T12:00:00Z",
                "updated_at": "2024-01-01T12:00:00Z"
            }})
            .to_string(),
        ),
        ("GET", endpoints::MY_ACCOUNTS) => (
            200,
            json!({"user_bank_accounts": generate_mock_accounts(config.num_accounts)}).to_string(),
        ),
        ("GET", endpoints::TRANSFER_STATEMENTS) => {
            let params: HashMap<String, String> = request.query_pairs().into_iter().collect();
            let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
            let per_page: usize = params
                .get("per_page")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3)
                .max(1);
            (200, generate_mock_page(page, per_page, config.num_transfers).to_string())
        }
        ("POST", endpoints::TRANSFERS) => (
            201,
            json!({"message": "Transferência realizada com sucesso"}).to_string(),
        ),
        (_, path) if path.starts_with("/v1/") => {
            (405, r#"{"error": "Method not allowed"}"#.to_string())
        }
        _ => (404, r#"{"error": "Endpoint not found"}"#.to_string()),
    }
}

/// Read one HTTP/1.1 request, honoring Content-Length
fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut data = Vec::new();
    let mut buffer = [0; 4096];

    let header_end = loop {
        if let Some(pos) = find_subsequence(&data, b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buffer[..n]);
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?;

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
        .collect();

    let content_length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let body_start = header_end + 4;
    while data.len() < body_start + content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);
    }
    let body_end = (body_start + content_length).min(data.len());
    let body = String::from_utf8_lossy(&data[body_start..body_end]).to_string();

    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), Some(q.to_string())),
        None => (target.to_string(), None),
    };

    Some(RecordedRequest {
        method,
        path,
        query,
        authorization: headers.get("authorization").cloned(),
        headers,
        body,
    })
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn send_response(stream: &mut TcpStream, status: u16, body: &str) {
    let status_text = match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        405 => "Method Not Allowed",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn generate_mock_accounts(count: usize) -> Vec<serde_json::Value> {
    let banks = [
        ("Banco Saldo", "001"),
        ("Caixa Econômica", "104"),
        ("Banco Azul", "341"),
    ];

    (0..count)
        .map(|i| {
            let (bank, code) = banks[i % banks.len()];
            json!({
                "id": i + 1,
                "bank_name": bank,
                "bank_code": code,
                "agency_number": "0001",
                "agency_digit": "9",
                "account_number": format!("{:05}", 10_000 + i),
                "account_digit": (i % 10).to_string(),
                "account_type": "checking",
                "document": "123.456.789-00",
                "holder_name": "Ana Souza",
                "created_at": "2024-01-01T12:00:00Z",
                "updated_at": "2024-01-01T12:00:00Z",
                "amount": 1000.0 + (i as f64 * 250.5)
            })
        })
        .collect()
}

fn generate_mock_page(page: usize, per_page: usize, total: usize) -> serde_json::Value {
    let start = (page.saturating_sub(1)) * per_page;
    let transfers: Vec<serde_json::Value> = (start..total.min(start + per_page))
        .map(|i| {
            json!({
                "id": i + 1,
                "was_success": true,
                "transfer_type_text": if i % 2 == 0 { "PIX" } else { "TED" },
                "amount_to_transfer": 10.0 * (i + 1) as f64,
                "created_at": "2024-03-01T10:00:00Z",
                "to_bank_account": {
                    "bank_name": "Banco Azul",
                    "account_number": "20000",
                    "holder_name": "Bruno Lima"
                },
                "from_user_bank_account": {
                    "bank_name": "Banco Saldo",
                    "account_number": "10000",
                    "holder_name": "Ana Souza"
                }
            })
        })
        .collect();

    json!({
        "bank_account_transfers": transfers,
        "current_page": page,
        "per_page": per_page,
        "total_pages": total.div_ceil(per_page),
        "total_records": total
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::{ClientConfig, HttpBankApi};
    use crate::domain::TransferFilters;
    use crate::ports::BankApi;

    #[tokio::test]
    async fn test_mock_server_accounts() {
        let server = MockBankServer::start(MockConfig {
            num_accounts: 5,
            ..Default::default()
        })
        .unwrap();
        let api = HttpBankApi::new(ClientConfig::new(&server.base_url()).unwrap()).unwrap();

        let accounts = api.my_accounts().await.unwrap();
        assert_eq!(accounts.len(), 5);
        assert_eq!(accounts[4].account_number, "10004");
    }

    #[tokio::test]
    async fn test_mock_server_pages() {
        let server = MockBankServer::start(MockConfig {
            num_transfers: 7,
            ..Default::default()
        })
        .unwrap();
        let api = HttpBankApi::new(ClientConfig::new(&server.base_url()).unwrap()).unwrap();

        let last = api
            .transfers(&TransferFilters {
                page: Some(3),
                per_page: Some(3),
                ..TransferFilters::default()
            })
            .await
            .unwrap();
        assert_eq!(last.bank_account_transfers.len(), 1);
        assert_eq!(last.total_pages, 3);
        assert!(!last.has_next());
    }

    #[tokio::test]
    async fn test_mock_server_records_requests() {
        let server = MockBankServer::start(MockConfig::default()).unwrap();
        let api = HttpBankApi::new(ClientConfig::new(&server.base_url()).unwrap()).unwrap();

        api.user_info().await.unwrap();
        api.user_info().await.unwrap();
        assert_eq!(server.requests().len(), 2);
        assert_eq!(server.requests_to(endpoints::USER_INFO)[0].method, "GET");
    }
}
