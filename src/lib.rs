//! # Popbill Rust SDK
//!
//! Rust SDK for the Popbill API.
//!
//! Popbill issues electronic cash receipts, collects bank transactions and
//! manages the prepaid points and member accounts behind them. Every call is
//! authorized with a session token issued by Linkhub; the client signs token
//! requests with your secret key, caches tokens per member and service, and
//! re-issues them when they expire or are rejected.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use popbill::{Client, ClientConfig, types::{Cashbill, RegistIssueOptions}};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a client with your link id and secret key
//!     let client = Client::with_config(
//!         "TESTER",
//!         "SwWxqU+0TErBXy/9TVjIPEnI0VTUMMSQZtJf3Ed8q3I=",
//!         ClientConfig { is_test: true, ..Default::default() },
//!     )?;
//!
//!     // Issue a cash receipt
//!     let issued = client.cashbill().regist_issue("1234567890", &Cashbill {
//!         mgt_key: "20250101-001".to_string(),
//!         trade_usage: "소득공제용".to_string(),
//!         total_amount: "11000".to_string(),
//!         supply_cost: "10000".to_string(),
//!         tax: "1000".to_string(),
//!         identity_num: "01011112222".to_string(),
//!         item_name: "Coffee".to_string(),
//!         ..Default::default()
//!     }, RegistIssueOptions::default()).await?;
//!
//!     println!("Confirm number: {}", issued.confirm_num);
//!
//!     // Check the remaining points
//!     let balance = client.cashbill().point().get_balance("1234567890").await?;
//!     println!("Balance: {}", balance);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Cash receipts**: issue, cancel, bulk submit, search, view and resend
//! - **Bank collection**: register accounts, run collection jobs, read transactions
//! - **Points**: balance, payment and refund requests, usage history
//! - **Members**: join, company info, user accounts
//! - **Tokens**: per-member token cache with single-flight issuance
//!
//! ## Error Handling
//!
//! All operations return `Result<T, PopbillError>`:
//!
//! ```rust,no_run
//! use popbill::{Client, PopbillError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), PopbillError> {
//!     let client = Client::from_env()?;
//!
//!     match client.cashbill().get_info("1234567890", "20250101-001", None).await {
//!         Ok(info) => println!("State: {}", info.state_code),
//!         Err(PopbillError::Api { code, message }) => println!("Rejected [{code}]: {message}"),
//!         Err(e) if e.is_retryable() => println!("Network problem, retry later: {e}"),
//!         Err(e) => println!("Error: {}", e),
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cache;
pub mod cashbill;
pub mod client;
mod clock;
pub mod dispatch;
pub mod easyfinbank;
pub mod error;
pub mod member;
pub mod point;
pub mod types;

// Re-export main types at the crate root
pub use auth::{AccessToken, Credential, Service, TokenKey};
pub use cache::TokenCache;
pub use cashbill::CashbillClient;
pub use client::{Client, ClientConfig};
pub use dispatch::{Dispatcher, Envelope, Host, HttpMethod, Payload, RequestSpec};
pub use easyfinbank::EasyFinBankClient;
pub use error::{CLIENT_ERROR_CODE, ErrorKind, PopbillError, Result};
pub use member::MemberClient;
pub use point::PointClient;

// Re-export types module for easy access
pub use types::{
    BankAccount, BankAccountForm, BankSearch, BankSearchResult, BankSummary, BankTransaction,
    BulkCashbillIssueResult, BulkCashbillResult, BulkResponse, Cashbill, CashbillDetail,
    CashbillInfo, CashbillSearch, CashbillSearchResult, ChargeInfo, ContactInfo, CorpInfo,
    EmailSendConfig, FlatRateState, IssueResponse, JobState, JoinForm, PaymentForm,
    PaymentHistory, PaymentHistoryResult, PaymentResponse, RefundForm, RefundHistory,
    RefundHistoryResult, RefundResponse, RegistIssueOptions, Response, RevokeIssueOptions,
    UpdateBankAccountForm, UseHistory, UseHistoryResult,
};
