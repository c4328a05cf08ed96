//! Popbill API client.
//!
//! The main entry point for interacting with the Popbill API.

use crate::auth::{AccessToken, Credential, Linkhub, Service, TokenKey};
use crate::cashbill::CashbillClient;
use crate::clock::{Clock, LinkhubClock, LocalClock};
use crate::dispatch::{Dispatcher, Envelope, RequestSpec};
use crate::easyfinbank::EasyFinBankClient;
use crate::error::{PopbillError, Result};
use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const SERVICE_URL: &str = "https://popbill.linkhub.co.kr";
const SERVICE_URL_TEST: &str = "https://popbill-test.linkhub.co.kr";
const SERVICE_URL_STATIC: &str = "https://static-popbill.linkhub.co.kr";
const SERVICE_URL_STATIC_TEST: &str = "https://static-popbill-test.linkhub.co.kr";
const SERVICE_URL_GA: &str = "https://ga-popbill.linkhub.co.kr";
const SERVICE_URL_GA_TEST: &str = "https://ga-popbill-test.linkhub.co.kr";

const AUTH_URL: &str = "https://auth.linkhub.co.kr";
const AUTH_URL_STATIC: &str = "https://static-auth.linkhub.co.kr";
const AUTH_URL_GA: &str = "https://ga-auth.linkhub.co.kr";

const SERVICE_ID: &str = "POPBILL";
const SERVICE_ID_TEST: &str = "POPBILL_TEST";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Popbill API client.
///
/// Cloning is cheap; clones share the HTTP connection pool and the session
/// token cache. Independently constructed clients never share tokens.
///
/// # Example
///
/// ```rust,no_run
/// use popbill::Client;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Client::new("TESTER", "SwWxqU+0TErBXy/9TVjIPEnI0VTUMMSQZtJf3Ed8q3I=")?;
///
///     let balance = client.cashbill().point().get_balance("1234567890").await?;
///     println!("Remaining points: {}", balance);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    pub(crate) dispatcher: Arc<Dispatcher>,
    pub(crate) credential: Arc<Credential>,
}

/// Configuration options for the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Use the test environment (default: false).
    pub is_test: bool,
    /// Use the fixed-IP hosts (default: false).
    pub use_static_ip: bool,
    /// Use the GA hosts (default: false). Takes precedence over `use_static_ip`.
    pub use_ga_ip: bool,
    /// Bind issued tokens to the caller's IP (default: true).
    ///
    /// Linkhub then only honours a token from the address it was issued to.
    /// When off, token requests send `x-lh-forwarded: *` and the token is
    /// usable from any address.
    pub ip_restrict: bool,
    /// Check token expiry against the local clock (default: true).
    ///
    /// When off, the auth host's clock is queried before each call.
    pub use_local_time: bool,
    /// Request timeout for every HTTP call (default: 30 seconds).
    pub timeout: Option<Duration>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// Override for the service host, e.g. a staging server.
    pub service_url: Option<String>,
    /// Override for the auth host.
    pub auth_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            is_test: false,
            use_static_ip: false,
            use_ga_ip: false,
            ip_restrict: true,
            use_local_time: true,
            timeout: None,
            user_agent: None,
            service_url: None,
            auth_url: None,
        }
    }
}

impl ClientConfig {
    /// Build a configuration from `POPBILL_*` environment variables.
    ///
    /// Reads `POPBILL_IS_TEST`, `POPBILL_USE_STATIC_IP`, `POPBILL_USE_GA_IP`,
    /// `POPBILL_IP_RESTRICT` and `POPBILL_USE_LOCAL_TIME`. Unset variables
    /// keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            is_test: env_flag("POPBILL_IS_TEST").unwrap_or(defaults.is_test),
            use_static_ip: env_flag("POPBILL_USE_STATIC_IP").unwrap_or(defaults.use_static_ip),
            use_ga_ip: env_flag("POPBILL_USE_GA_IP").unwrap_or(defaults.use_ga_ip),
            ip_restrict: env_flag("POPBILL_IP_RESTRICT").unwrap_or(defaults.ip_restrict),
            use_local_time: env_flag("POPBILL_USE_LOCAL_TIME").unwrap_or(defaults.use_local_time),
            ..defaults
        }
    }

    fn resolved_service_url(&self) -> String {
        if let Some(url) = &self.service_url {
            return url.trim_end_matches('/').to_string();
        }
        let url = match (self.use_ga_ip, self.use_static_ip, self.is_test) {
            (true, _, true) => SERVICE_URL_GA_TEST,
            (true, _, false) => SERVICE_URL_GA,
            (false, true, true) => SERVICE_URL_STATIC_TEST,
            (false, true, false) => SERVICE_URL_STATIC,
            (false, false, true) => SERVICE_URL_TEST,
            (false, false, false) => SERVICE_URL,
        };
        url.to_string()
    }

    fn resolved_auth_url(&self) -> String {
        if let Some(url) = &self.auth_url {
            return url.trim_end_matches('/').to_string();
        }
        let url = if self.use_ga_ip {
            AUTH_URL_GA
        } else if self.use_static_ip {
            AUTH_URL_STATIC
        } else {
            AUTH_URL
        };
        url.to_string()
    }

    fn service_id(&self) -> &'static str {
        if self.is_test {
            SERVICE_ID_TEST
        } else {
            SERVICE_ID
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

impl Client {
    /// Create a production client with default configuration.
    ///
    /// # Arguments
    ///
    /// * `link_id` - Partner link id issued by Linkhub
    /// * `secret_key` - Base64 secret key issued with the link id
    pub fn new(link_id: impl Into<String>, secret_key: &str) -> Result<Self> {
        Self::with_config(link_id, secret_key, ClientConfig::default())
    }

    /// Create a client with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use popbill::{Client, ClientConfig};
    /// use std::time::Duration;
    ///
    /// let client = Client::with_config(
    ///     "TESTER",
    ///     "SwWxqU+0TErBXy/9TVjIPEnI0VTUMMSQZtJf3Ed8q3I=",
    ///     ClientConfig {
    ///         is_test: true,
    ///         timeout: Some(Duration::from_secs(10)),
    ///         ..Default::default()
    ///     },
    /// )?;
    /// # Ok::<(), popbill::PopbillError>(())
    /// ```
    pub fn with_config(
        link_id: impl Into<String>,
        secret_key: &str,
        config: ClientConfig,
    ) -> Result<Self> {
        let credential = Credential::new(link_id, secret_key)?;

        let timeout = config
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("popbill-rust/{}", env!("CARGO_PKG_VERSION")));

        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| PopbillError::Config(format!("failed to create HTTP client: {e}")))?;

        let service_url = config.resolved_service_url();
        let linkhub = Linkhub::new(
            http.clone(),
            config.resolved_auth_url(),
            config.service_id(),
            config.ip_restrict,
        );
        let clock: Arc<dyn Clock> = if config.use_local_time {
            Arc::new(LocalClock)
        } else {
            Arc::new(LinkhubClock::new(linkhub.clone()))
        };

        debug!(
            link_id = credential.link_id(),
            service_url = %service_url,
            auth_url = linkhub.auth_url(),
            "popbill client configured"
        );

        Ok(Self {
            dispatcher: Arc::new(Dispatcher::new(http, service_url, linkhub, clock)),
            credential: Arc::new(credential),
        })
    }

    /// Create a client from environment variables.
    ///
    /// Requires `POPBILL_LINK_ID` and `POPBILL_SECRET_KEY`; other settings
    /// come from [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        let link_id = std::env::var("POPBILL_LINK_ID")
            .map_err(|_| PopbillError::Config("POPBILL_LINK_ID is not set".to_string()))?;
        let secret_key = std::env::var("POPBILL_SECRET_KEY")
            .map_err(|_| PopbillError::Config("POPBILL_SECRET_KEY is not set".to_string()))?;
        Self::with_config(link_id, &secret_key, ClientConfig::from_env())
    }

    /// Get the base URL of the service host.
    pub fn service_url(&self) -> &str {
        self.dispatcher.service_url()
    }

    /// Get the base URL of the auth host.
    pub fn auth_url(&self) -> &str {
        self.dispatcher.auth_url()
    }

    /// Get the partner link id.
    pub fn link_id(&self) -> &str {
        self.credential.link_id()
    }

    /// Get the cash receipt client.
    pub fn cashbill(&self) -> CashbillClient {
        CashbillClient::new(self.clone())
    }

    /// Get the bank transaction collection client.
    pub fn easyfinbank(&self) -> EasyFinBankClient {
        EasyFinBankClient::new(self.clone())
    }

    /// Execute a raw request.
    ///
    /// Useful for endpoints this crate has no typed wrapper for.
    pub async fn dispatch(&self, spec: RequestSpec) -> Result<Envelope> {
        self.dispatcher.dispatch(spec, &self.credential).await
    }

    /// The cached session token for a member on a service, if any.
    pub async fn cached_token(&self, service: Service, corp_num: &str) -> Option<AccessToken> {
        let key = TokenKey::new(&self.credential, corp_num, service);
        self.dispatcher.tokens().get(&key).await
    }

    /// Drop all cached session tokens.
    pub fn clear_tokens(&self) {
        self.dispatcher.tokens().clear();
    }
}

/// Reject an empty required argument the way Popbill does.
pub(crate) fn require(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(PopbillError::invalid(format!("{what} is required")))
    } else {
        Ok(())
    }
}
