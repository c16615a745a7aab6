//! Banking API HTTP client
//!
//! One configured reqwest client talks JSON to a fixed base URL. Request and
//! failure handling that depends on session state (attaching the credential,
//! reacting to an expired session) is not baked in: it is supplied as
//! [`Middleware`] values through [`ClientConfig`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Request, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::{
    AuthGrant, BankAccount, NewTransfer, Notification, Severity, SignInRequest, SignUpRequest,
    TransferFilters, TransferPage, TransferReceipt, UserProfile,
};
use crate::i18n::{Locale, Message};
use crate::ports::{BankApi, CredentialProvider, Notifier};

/// API paths
pub mod endpoints {
    pub const SIGN_UP: &str = "/v1/auth/sign_up";
    pub const SIGN_IN: &str = "/v1/auth/sign_in";
    pub const USER_INFO: &str = "/v1/users/infos";
    pub const MY_ACCOUNTS: &str = "/v1/users/bank_accounts/my";
    pub const TRANSFER_STATEMENTS: &str = "/v1/users/bank_account_transfers/statements";
    pub const TRANSFERS: &str = "/v1/users/bank_account_transfers";

    /// Endpoints that establish a session and must never carry one
    pub fn is_auth_endpoint(path: &str) -> bool {
        path.ends_with(SIGN_IN) || path.ends_with(SIGN_UP)
    }
}

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Wire envelopes
// =============================================================================

#[derive(Serialize)]
struct UserEnvelope<'a, T> {
    user: &'a T,
}

#[derive(Deserialize)]
struct ProfileEnvelope {
    user: UserProfile,
}

#[derive(Deserialize)]
struct AccountsEnvelope {
    #[serde(default)]
    user_bank_accounts: Vec<BankAccount>,
}

#[derive(Serialize)]
struct TransferEnvelope<'a> {
    bank_account_transfer: &'a NewTransfer,
}

// =============================================================================
// Middleware
// =============================================================================

/// A failed exchange, as seen by middleware
#[derive(Debug, Clone)]
pub struct HttpFailure {
    pub method: Method,
    /// Endpoint path relative to the base URL
    pub path: String,
    /// `None` when no response was received
    pub status: Option<StatusCode>,
    /// Message extracted from the error payload
    pub message: Option<String>,
}

impl HttpFailure {
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(StatusCode::UNAUTHORIZED)
    }

    fn into_error(self) -> Error {
        match self.status {
            Some(StatusCode::UNAUTHORIZED) => Error::Unauthorized {
                message: self.message,
            },
            Some(status) => Error::Status {
                status: status.as_u16(),
                message: self.message,
            },
            None => Error::Transport(format!("{} {} failed", self.method, self.path)),
        }
    }
}

/// Hook composed around every request of an [`HttpBankApi`]
///
/// Both methods default to doing nothing.
pub trait Middleware: Send + Sync {
    /// Called with the fully built request right before it is sent
    fn on_request(&self, _request: &mut Request) {}

    /// Called when a request fails at the transport level or with a non-2xx
    /// status. The failure is still returned to the caller afterwards.
    fn on_failure(&self, _failure: &HttpFailure) {}
}

/// Attaches the current session token as the `Authorization` header
///
/// Sign-in and sign-up requests are left untouched so a stale credential is
/// never sent on the calls that issue a new one.
pub struct BearerAuth {
    credentials: Arc<dyn CredentialProvider>,
    scheme: Option<String>,
}

impl BearerAuth {
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            credentials,
            scheme: None,
        }
    }

    /// Prefix the token with an auth scheme, e.g. `Bearer`
    pub fn with_scheme(mut self, scheme: Option<String>) -> Self {
        self.scheme = scheme.filter(|s| !s.trim().is_empty());
        self
    }

    fn header_value(&self, token: &str) -> String {
        match &self.scheme {
            Some(scheme) => format!("{} {}", scheme.trim(), token),
            None => token.to_string(),
        }
    }
}

impl Middleware for BearerAuth {
    fn on_request(&self, request: &mut Request) {
        if endpoints::is_auth_endpoint(request.url().path()) {
            return;
        }
        let Some(token) = self.credentials.current_token() else {
            return;
        };
        match HeaderValue::from_str(&self.header_value(&token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(_) => tracing::warn!("Stored token is not a valid header value; sending without it"),
        }
    }
}

/// Ends the session when the server rejects the credential
///
/// On a 401 from any endpoint other than sign-in/sign-up, the session is
/// invalidated and the user is told to sign in again. Other failures pass
/// through untouched.
pub struct SessionExpiry {
    credentials: Arc<dyn CredentialProvider>,
    notifier: Arc<dyn Notifier>,
    locale: Locale,
}

impl SessionExpiry {
    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        notifier: Arc<dyn Notifier>,
        locale: Locale,
    ) -> Self {
        Self {
            credentials,
            notifier,
            locale,
        }
    }
}

impl Middleware for SessionExpiry {
    fn on_failure(&self, failure: &HttpFailure) {
        if !failure.is_unauthorized() || endpoints::is_auth_endpoint(&failure.path) {
            return;
        }
        tracing::info!(path = %failure.path, "credential rejected, ending session");
        self.credentials.invalidate();
        self.notifier.notify(Notification::new(
            Severity::Warning,
            self.locale.title(Severity::Warning),
            self.locale.text(Message::SessionExpired),
        ));
    }
}

// =============================================================================
// Client configuration
// =============================================================================

/// Everything needed to build an [`HttpBankApi`]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl ClientConfig {
    /// Configuration for the given base URL (http or https)
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| Error::config(format!("Invalid API URL '{}': {}", base_url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::config(format!(
                "API URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            middleware: Vec::new(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Append a middleware; middleware runs in insertion order
    pub fn with_middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// =============================================================================
// HTTP client
// =============================================================================

/// [`BankApi`] over HTTP
pub struct HttpBankApi {
    client: Client,
    base_url: String,
    timeout: Duration,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl HttpBankApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url,
            timeout: config.timeout,
            middleware: config.middleware,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        self.send(Method::GET, path, query, None).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<JsonValue>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let mut builder = self.client.request(method.clone(), &url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        let mut request = builder
            .build()
            .map_err(|e| Error::Transport(format!("Failed to build request: {}", e)))?;

        for middleware in &self.middleware {
            middleware.on_request(&mut request);
        }

        tracing::debug!(%method, path, "sending request");

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                let failure = HttpFailure {
                    method,
                    path: path.to_string(),
                    status: None,
                    message: None,
                };
                self.report(&failure);
                return Err(self.map_request_error(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let failure = HttpFailure {
                method,
                path: path.to_string(),
                status: Some(status),
                message: extract_error_message(&text),
            };
            tracing::debug!(status = status.as_u16(), path, "request failed");
            self.report(&failure);
            return Err(failure.into_error());
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::Decode(format!("{} {}: {}", status.as_u16(), path, e)))
    }

    fn report(&self, failure: &HttpFailure) {
        for middleware in &self.middleware {
            middleware.on_failure(failure);
        }
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Transport(format!(
                "Connection timed out after {} seconds",
                self.timeout.as_secs()
            ))
        } else if error.is_connect() {
            Error::Transport("Unable to connect to the banking API".to_string())
        } else {
            Error::Transport(format!("Request failed: {}", error))
        }
    }
}

/// Pull a human message out of an error payload
///
/// Looks at `message`, then `error`, then an `errors` array of strings.
fn extract_error_message(body: &str) -> Option<String> {
    let value: JsonValue = serde_json::from_str(body).ok()?;
    let non_empty = |v: &JsonValue| {
        v.as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if let Some(msg) = value.get("message").and_then(non_empty) {
        return Some(msg);
    }
    if let Some(msg) = value.get("error").and_then(non_empty) {
        return Some(msg);
    }
    let joined: Vec<String> = value
        .get("errors")
        .and_then(|v| v.as_array())
        .map(|errors| errors.iter().filter_map(non_empty).collect())
        .unwrap_or_default();
    if joined.is_empty() {
        None
    } else {
        Some(joined.join("; "))
    }
}

#[async_trait]
impl BankApi for HttpBankApi {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthGrant> {
        let body = serde_json::to_value(UserEnvelope { user: request })?;
        self.send(Method::POST, endpoints::SIGN_UP, &[], Some(body))
            .await
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthGrant> {
        let body = serde_json::to_value(UserEnvelope { user: request })?;
        self.send(Method::PUT, endpoints::SIGN_IN, &[], Some(body))
            .await
    }

    async fn user_info(&self) -> Result<UserProfile> {
        let envelope: ProfileEnvelope = self.get(endpoints::USER_INFO, &[]).await?;
        Ok(envelope.user)
    }

    async fn my_accounts(&self) -> Result<Vec<BankAccount>> {
        let envelope: AccountsEnvelope = self.get(endpoints::MY_ACCOUNTS, &[]).await?;
        Ok(envelope.user_bank_accounts)
    }

    async fn transfers(&self, filters: &TransferFilters) -> Result<TransferPage> {
        self.get(endpoints::TRANSFER_STATEMENTS, &filters.query_params())
            .await
    }

    async fn create_transfer(&self, transfer: &NewTransfer) -> Result<TransferReceipt> {
        let body = serde_json::to_value(TransferEnvelope {
            bank_account_transfer: transfer,
        })?;
        self.send(Method::POST, endpoints::TRANSFERS, &[], Some(body))
            .await
    }
}

// =============================================================================
// Tests
// =============================================================================
