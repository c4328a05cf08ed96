//! Authenticated request dispatch.
//!
//! Every façade method builds a [`RequestSpec`] and hands it to
//! [`Dispatcher::dispatch`], which acquires a session token, signs and sends
//! the request, parses the response envelope and maps failures onto
//! [`PopbillError`].
//!
//! A call moves through `BUILD → TOKEN_READY → SENT` and ends in success or
//! failure. An HTTP 401 on the first attempt invalidates the token and takes
//! one extra `AUTH_RETRY → SENT` round; a second 401 is reported as
//! [`PopbillError::Auth`].

use crate::auth::{AccessToken, Credential, LINKHUB_API_VERSION, Linkhub, Service, TokenKey, body_digest};
use crate::cache::TokenCache;
use crate::clock::Clock;
use crate::error::{PopbillError, Result};
use reqwest::{Client as HttpClient, Request, RequestBuilder, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Version sent in `x-pb-version`.
pub(crate) const POPBILL_API_VERSION: &str = "1.0";

/// Code reported when an HTTP 401 carries no error body.
const UNAUTHORIZED_CODE: i64 = -401;

/// HTTP verb of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// Which host a request is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    /// The Popbill service host.
    Service,
    /// The Linkhub auth host. Paths are relative to the service id, so
    /// `/Point` becomes `/POPBILL/Point`.
    Auth,
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Serialized JSON, sent byte-for-byte as digested.
    Json(Vec<u8>),
    /// Fields sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

/// A single logical API call.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Target host.
    pub host: Host,
    /// Path below the host.
    pub path: String,
    /// Service whose scope the token is issued for.
    pub service: Service,
    /// Member business number; `None` sends the request without a token.
    pub corp_num: Option<String>,
    /// Popbill user id sent as `x-pb-userid`.
    pub user_id: Option<String>,
    /// Query parameters, in order.
    pub query: Vec<(String, String)>,
    /// Request body.
    pub payload: Option<Payload>,
    /// Value for `X-HTTP-Method-Override`.
    pub method_override: Option<String>,
    /// Extra headers.
    pub headers: Vec<(String, String)>,
}

impl RequestSpec {
    /// A request with no token, body or query.
    pub fn new(method: HttpMethod, service: Service, path: impl Into<String>) -> Self {
        Self {
            method,
            host: Host::Service,
            path: path.into(),
            service,
            corp_num: None,
            user_id: None,
            query: Vec::new(),
            payload: None,
            method_override: None,
            headers: Vec::new(),
        }
    }

    /// Shorthand for a `GET` request.
    pub fn get(service: Service, path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, service, path)
    }

    /// Shorthand for a `POST` request.
    pub fn post(service: Service, path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, service, path)
    }

    /// Send to the Linkhub auth host.
    pub fn on_auth_host(mut self) -> Self {
        self.host = Host::Auth;
        self
    }

    /// Act for a member; this makes the request authenticated.
    pub fn corp_num(mut self, corp_num: impl Into<String>) -> Self {
        self.corp_num = Some(corp_num.into());
        self
    }

    /// Set or clear the acting user.
    pub fn user_id(mut self, user_id: Option<&str>) -> Self {
        self.user_id = user_id.filter(|u| !u.is_empty()).map(str::to_string);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Append a query parameter if `value` is present and non-empty.
    pub fn query_opt(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.query(name, v),
            _ => self,
        }
    }

    /// Append a numeric or other parameter if `value` is present.
    pub fn query_some<T: ToString>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.query(name, v),
            None => self,
        }
    }

    /// Append a comma-joined list parameter if `values` is non-empty.
    pub fn query_list<S: AsRef<str>>(self, name: &str, values: &[S]) -> Self {
        if values.is_empty() {
            return self;
        }
        let joined = values.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
        self.query(name, joined)
    }

    /// Set a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| PopbillError::Protocol(format!("failed to encode request body: {e}")))?;
        self.payload = Some(Payload::Json(bytes));
        Ok(self)
    }

    /// Set a form body.
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        let fields = fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        self.payload = Some(Payload::Form(fields));
        self
    }

    /// Ask the server to treat the request as `verb`.
    pub fn method_override(mut self, verb: &str) -> Self {
        self.method_override = Some(verb.to_string());
        self
    }

    /// Append a header.
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    fn token_key(&self, credential: &Credential) -> Option<TokenKey> {
        self.corp_num
            .as_deref()
            .map(|corp_num| TokenKey::new(credential, corp_num, self.service))
    }
}

/// Parsed response.
///
/// Every Popbill response is a JSON value; objects usually carry `code` and
/// `message` alongside their domain fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Result code; `0` when the response has none.
    pub code: i64,
    /// Result message, if any.
    pub message: Option<String>,
    /// The complete response body.
    pub body: Value,
}

impl Envelope {
    /// Deserialize the whole body.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.body)
            .map_err(|e| PopbillError::Protocol(format!("unexpected response shape: {e}")))
    }

    /// Deserialize a single top-level field.
    pub fn field<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self
            .body
            .get(name)
            .ok_or_else(|| PopbillError::Protocol(format!("response has no '{name}' field")))?;
        T::deserialize(value)
            .map_err(|e| PopbillError::Protocol(format!("unexpected '{name}' field: {e}")))
    }
}

/// Reads `code` as a number or a numeric string.
fn code_of(body: &Value) -> Option<i64> {
    match body.get("code")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn message_of(body: &Value) -> Option<String> {
    body.get("message").and_then(Value::as_str).map(str::to_string)
}

/// `(code, message)` from an error body, if it has that shape.
pub(crate) fn error_fields(bytes: &[u8]) -> Option<(i64, String)> {
    let body: Value = serde_json::from_slice(bytes).ok()?;
    Some((code_of(&body)?, message_of(&body).unwrap_or_default()))
}

/// Finish building a request.
///
/// A request that cannot be built (a header value with control characters,
/// an unparsable URL) never reached the network, so it is rejected locally
/// rather than reported as a retryable transport failure.
pub(crate) fn prepare(builder: RequestBuilder) -> Result<Request> {
    builder
        .build()
        .map_err(|e| PopbillError::invalid(format!("Invalid request: {e}")))
}

/// Outcome of one HTTP exchange.
#[derive(Debug)]
enum Reply {
    Accepted(Envelope),
    Unauthorized { code: i64, message: String },
}

fn read_reply(status: StatusCode, bytes: &[u8]) -> Result<Reply> {
    if status == StatusCode::UNAUTHORIZED {
        let (code, message) = error_fields(bytes)
            .unwrap_or_else(|| (UNAUTHORIZED_CODE, "Unauthorized".to_string()));
        return Ok(Reply::Unauthorized { code, message });
    }

    let body: Value = serde_json::from_slice(bytes).map_err(|e| {
        PopbillError::Protocol(format!("malformed response body (HTTP {status}): {e}"))
    })?;
    let code = code_of(&body);
    let message = message_of(&body);

    if !status.is_success() {
        let code = code.ok_or_else(|| {
            PopbillError::Protocol(format!("HTTP {status} without an error code"))
        })?;
        return Err(PopbillError::Api {
            code,
            message: message.unwrap_or_default(),
        });
    }

    match code {
        Some(code) if code < 0 => Err(PopbillError::Api {
            code,
            message: message.unwrap_or_default(),
        }),
        code => Ok(Reply::Accepted(Envelope {
            code: code.unwrap_or(0),
            message,
            body,
        })),
    }
}

/// Signs, sends and interprets API calls for one client.
pub struct Dispatcher {
    http: HttpClient,
    service_url: String,
    linkhub: Linkhub,
    clock: Arc<dyn Clock>,
    tokens: TokenCache,
}

impl Dispatcher {
    pub(crate) fn new(
        http: HttpClient,
        service_url: String,
        linkhub: Linkhub,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            http,
            service_url,
            linkhub,
            clock,
            tokens: TokenCache::new(),
        }
    }

    /// Base URL of the service host.
    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// Base URL of the auth host.
    pub fn auth_url(&self) -> &str {
        self.linkhub.auth_url()
    }

    /// The service id tokens are issued under.
    pub fn service_id(&self) -> &str {
        self.linkhub.service_id()
    }

    /// The token cache of this dispatcher.
    pub fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    /// Execute `spec` as `credential`.
    ///
    /// At most one silent re-authentication happens per call. Transport
    /// failures are never retried.
    #[instrument(
        skip(self, spec, credential),
        fields(method = %spec.method, path = %spec.path, corp_num = spec.corp_num.as_deref())
    )]
    pub async fn dispatch(&self, spec: RequestSpec, credential: &Credential) -> Result<Envelope> {
        if spec.path.is_empty() {
            return Err(PopbillError::invalid("Request path is empty"));
        }

        let key = spec.token_key(credential);
        let token = match &key {
            Some(key) => Some(self.token(key, credential).await?),
            None => None,
        };

        let (code, message) = match self.send(&spec, token.as_ref()).await? {
            Reply::Accepted(envelope) => return Ok(envelope),
            Reply::Unauthorized { code, message } => (code, message),
        };

        let (Some(key), Some(rejected)) = (key, token) else {
            return Err(PopbillError::Auth { code, message });
        };

        warn!(code, "session token rejected, re-issuing once");
        self.tokens.invalidate(&key, &rejected).await;
        let fresh = self.token(&key, credential).await?;

        match self.send(&spec, Some(&fresh)).await? {
            Reply::Accepted(envelope) => Ok(envelope),
            Reply::Unauthorized { code, message } => Err(PopbillError::Auth { code, message }),
        }
    }

    async fn token(&self, key: &TokenKey, credential: &Credential) -> Result<AccessToken> {
        let now = self.clock.now().await?;
        let scopes = key_scopes(key);
        self.tokens
            .get_or_issue(key, now, || {
                self.linkhub
                    .issue_token(credential, &key.access_id, &scopes, now)
            })
            .await
    }

    async fn send(&self, spec: &RequestSpec, token: Option<&AccessToken>) -> Result<Reply> {
        let url = match spec.host {
            Host::Service => format!("{}{}", self.service_url, spec.path),
            Host::Auth => format!(
                "{}/{}{}",
                self.linkhub.auth_url(),
                self.linkhub.service_id(),
                spec.path
            ),
        };

        let mut request = match spec.method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
        };

        request = match spec.host {
            Host::Service => request.header("x-pb-version", POPBILL_API_VERSION),
            Host::Auth => request.header("x-lh-version", LINKHUB_API_VERSION),
        };
        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token.value));
        }
        if let Some(user_id) = &spec.user_id {
            request = request.header("x-pb-userid", user_id);
        }
        if let Some(verb) = &spec.method_override {
            request = request.header("X-HTTP-Method-Override", verb);
        }
        for (name, value) in &spec.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        match &spec.payload {
            Some(Payload::Json(bytes)) => {
                request = request
                    .header(header::CONTENT_TYPE, "application/json; charset=utf8")
                    .header("x-pb-message-digest", body_digest(bytes))
                    .body(bytes.clone());
            }
            Some(Payload::Form(fields)) => {
                request = request.form(fields);
            }
            None => {}
        }

        debug!(url = %url, authenticated = token.is_some(), "sending request");
        let response = self.http.execute(prepare(request)?).await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = %status, len = bytes.len(), "received response");

        read_reply(status, &bytes)
    }
}

fn key_scopes(key: &TokenKey) -> Vec<&str> {
    key.scope.split(',').collect()
}
