//! Type definitions for the Popbill SDK.
//!
//! Request and response shapes for every service. Field names follow the
//! wire format, which mixes `camelCase` with upper-case acronyms
//! (`tradeDT`, `smssendYN`), so several fields carry explicit renames.

pub mod cashbill;
pub mod common;
pub mod easyfinbank;

pub use cashbill::*;
pub use common::*;
pub use easyfinbank::*;

/// Deserializers tolerant of numbers sent as strings.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        Float(f64),
        String(String),
    }

    /// An `i64` written either as a JSON number or a numeric string.
    /// Empty strings and `null` read as zero.
    pub(crate) fn i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(0),
            Some(NumberOrString::Number(n)) => Ok(n),
            Some(NumberOrString::Float(f)) => Ok(f as i64),
            Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(0),
            Some(NumberOrString::String(s)) => s.trim().parse().map_err(D::Error::custom),
        }
    }

    /// An `f64` written either as a JSON number or a numeric string.
    pub(crate) fn f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(0.0),
            Some(NumberOrString::Number(n)) => Ok(n as f64),
            Some(NumberOrString::Float(f)) => Ok(f),
            Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(0.0),
            Some(NumberOrString::String(s)) => s.trim().parse().map_err(D::Error::custom),
        }
    }

}
