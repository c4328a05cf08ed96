//! Linkhub authentication.
//!
//! Popbill API calls carry a short-lived session token issued by the Linkhub
//! auth host. Token requests are signed with HMAC-SHA256 over a canonical
//! digest target built from the request, keyed by the partner's secret key.

use crate::error::{PopbillError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use reqwest::{Client as HttpClient, header};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Version sent in `x-lh-version` and included in the signature.
pub(crate) const LINKHUB_API_VERSION: &str = "2.0";

/// Partner credentials issued by Linkhub.
///
/// The secret key is decoded once here, so a credential that exists is
/// always usable for signing.
#[derive(Clone)]
pub struct Credential {
    link_id: String,
    secret_key: Vec<u8>,
}

impl Credential {
    /// Create a credential from a link id and a base64 secret key.
    pub fn new(link_id: impl Into<String>, secret_key: &str) -> Result<Self> {
        let link_id = link_id.into();
        if link_id.is_empty() {
            return Err(PopbillError::Config("link id is empty".to_string()));
        }
        let secret_key = BASE64
            .decode(secret_key.trim())
            .map_err(|e| PopbillError::Config(format!("secret key is not valid base64: {e}")))?;
        if secret_key.is_empty() {
            return Err(PopbillError::Config("secret key is empty".to_string()));
        }
        Ok(Self {
            link_id,
            secret_key,
        })
    }

    /// The partner link id.
    pub fn link_id(&self) -> &str {
        &self.link_id
    }

    pub(crate) fn secret_key(&self) -> &[u8] {
        &self.secret_key
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("link_id", &self.link_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// A Popbill service, which determines the token scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Cash receipts.
    Cashbill,
    /// Bank transaction collection.
    EasyFinBank,
}

impl Service {
    /// Scopes requested when issuing a token for this service.
    pub fn scopes(self) -> [&'static str; 2] {
        match self {
            Service::Cashbill => ["member", "140"],
            Service::EasyFinBank => ["member", "180"],
        }
    }

    /// Scopes joined into the form used as a cache key.
    pub fn scope_key(self) -> String {
        self.scopes().join(",")
    }
}

/// A session token issued by Linkhub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Bearer value.
    pub value: String,
    /// Instant after which the token is no longer accepted.
    pub expires_at: DateTime<Utc>,
    /// Scopes the token was issued for, comma-joined.
    pub scope: String,
}

impl AccessToken {
    /// Returns true once `now` has reached the expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Identity of a cached token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenKey {
    /// Partner link id.
    pub link_id: String,
    /// Member business number the token acts for.
    pub access_id: String,
    /// Comma-joined scopes.
    pub scope: String,
}

impl TokenKey {
    /// Key for `access_id` acting on `service` under `credential`.
    pub fn new(credential: &Credential, access_id: &str, service: Service) -> Self {
        Self {
            link_id: credential.link_id().to_string(),
            access_id: access_id.to_string(),
            scope: service.scope_key(),
        }
    }
}

/// Base64 SHA-256 of a request body.
pub(crate) fn body_digest(body: &[u8]) -> String {
    BASE64.encode(Sha256::digest(body))
}

/// Canonical text covered by the Linkhub signature.
pub(crate) fn digest_target(
    method: &str,
    body: Option<&[u8]>,
    date: &str,
    forwarded_ip: Option<&str>,
    uri: &str,
) -> String {
    let mut lines: Vec<String> = vec![method.to_string()];
    if let Some(body) = body {
        lines.push(body_digest(body));
    }
    lines.push(date.to_string());
    if let Some(ip) = forwarded_ip {
        lines.push(ip.to_string());
    }
    lines.push(LINKHUB_API_VERSION.to_string());
    lines.push(uri.to_string());
    lines.join("\n")
}

/// HMAC-SHA256 of `target` under `secret_key`, base64 encoded.
pub(crate) fn sign(secret_key: &[u8], target: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret_key)
        .map_err(|e| PopbillError::Config(format!("unusable secret key: {e}")))?;
    mac.update(target.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Format an instant the way `x-lh-date` expects.
pub(crate) fn lh_date(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Client for the Linkhub auth host.
#[derive(Clone)]
pub(crate) struct Linkhub {
    http: HttpClient,
    auth_url: String,
    service_id: &'static str,
    forwarded_ip: Option<String>,
}

impl Linkhub {
    pub(crate) fn new(
        http: HttpClient,
        auth_url: String,
        service_id: &'static str,
        ip_restrict: bool,
    ) -> Self {
        Self {
            http,
            auth_url,
            service_id,
            forwarded_ip: (!ip_restrict).then(|| "*".to_string()),
        }
    }

    pub(crate) fn auth_url(&self) -> &str {
        &self.auth_url
    }

    pub(crate) fn service_id(&self) -> &'static str {
        self.service_id
    }

    /// Issue a session token for `access_id` with the given scopes.
    pub(crate) async fn issue_token(
        &self,
        credential: &Credential,
        access_id: &str,
        scopes: &[&str],
        now: DateTime<Utc>,
    ) -> Result<AccessToken> {
        #[derive(Serialize)]
        struct Request<'a> {
            access_id: &'a str,
            scope: &'a [&'a str],
        }

        #[derive(Deserialize)]
        struct Response {
            session_token: String,
            expiration: String,
            #[serde(default)]
            scope: Vec<String>,
        }

        let uri = format!("/{}/Token", self.service_id);
        let body = serde_json::to_vec(&Request {
            access_id,
            scope: scopes,
        })
        .map_err(|e| PopbillError::Protocol(format!("failed to encode token request: {e}")))?;

        let date = lh_date(now);
        let target = digest_target(
            "POST",
            Some(&body),
            &date,
            self.forwarded_ip.as_deref(),
            &uri,
        );
        let signature = sign(credential.secret_key(), &target)?;

        let mut request = self
            .http
            .post(format!("{}{}", self.auth_url, uri))
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-lh-date", &date)
            .header("x-lh-version", LINKHUB_API_VERSION)
            .header(
                header::AUTHORIZATION,
                format!("LINKHUB {} {}", credential.link_id(), signature),
            );
        if let Some(ip) = &self.forwarded_ip {
            request = request.header("x-lh-forwarded", ip);
        }

        debug!(access_id, service_id = self.service_id, "issuing session token");
        let response = self
            .http
            .execute(crate::dispatch::prepare(request.body(body))?)
            .await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let (code, message) = crate::dispatch::error_fields(&bytes).ok_or_else(|| {
                PopbillError::Protocol(format!("token request failed with HTTP {status}"))
            })?;
            return Err(match status.as_u16() {
                401 | 403 => PopbillError::Auth { code, message },
                _ => PopbillError::Api { code, message },
            });
        }

        let token: Response = serde_json::from_slice(&bytes)
            .map_err(|e| PopbillError::Protocol(format!("invalid token response: {e}")))?;
        let expires_at = DateTime::parse_from_rfc3339(&token.expiration)
            .map_err(|e| {
                PopbillError::Protocol(format!(
                    "invalid token expiration '{}': {e}",
                    token.expiration
                ))
            })?
            .with_timezone(&Utc);

        let scope = if token.scope.is_empty() {
            scopes.join(",")
        } else {
            token.scope.join(",")
        };

        Ok(AccessToken {
            value: token.session_token,
            expires_at,
            scope,
        })
    }

    /// Current time according to the auth host.
    pub(crate) async fn server_time(&self) -> Result<DateTime<Utc>> {
        let request = crate::dispatch::prepare(
            self.http
                .get(format!("{}/{}/Time", self.auth_url, self.service_id)),
        )?;
        let response = self.http.execute(request).await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(PopbillError::Protocol(format!(
                "time request failed with HTTP {status}"
            )));
        }

        DateTime::parse_from_rfc3339(text.trim().trim_matches('"'))
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| PopbillError::Protocol(format!("invalid server time '{text}': {e}")))
    }
}
