//! Time sources for token expiry and request dating.

use crate::auth::Linkhub;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Source of the current time.
#[async_trait]
pub(crate) trait Clock: Send + Sync {
    async fn now(&self) -> Result<DateTime<Utc>>;
}

/// The local system clock.
pub(crate) struct LocalClock;

#[async_trait]
impl Clock for LocalClock {
    async fn now(&self) -> Result<DateTime<Utc>> {
        Ok(Utc::now())
    }
}

/// Time reported by the Linkhub auth host.
///
/// Used when the local clock cannot be trusted to agree with the server's
/// view of token expiry.
pub(crate) struct LinkhubClock {
    linkhub: Linkhub,
}

impl LinkhubClock {
    pub(crate) fn new(linkhub: Linkhub) -> Self {
        Self { linkhub }
    }
}

#[async_trait]
impl Clock for LinkhubClock {
    async fn now(&self) -> Result<DateTime<Utc>> {
        self.linkhub.server_time().await
    }
}
