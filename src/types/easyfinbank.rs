//! Bank transaction collection types.

use super::lenient;
use serde::{Deserialize, Serialize};

/// A registered bank account.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BankAccount {
    /// Account number.
    pub account_number: String,
    /// Bank code (4 digits).
    pub bank_code: String,
    /// Account alias.
    pub account_name: String,
    /// "법인" (corporate) or "개인" (personal).
    pub account_type: String,
    /// Registration state.
    pub state: i64,
    /// Registration time.
    #[serde(rename = "regDT")]
    pub reg_dt: String,
    /// Contract time.
    #[serde(rename = "contractDT")]
    pub contract_dt: String,
    /// Last day of use.
    pub use_end_date: String,
    /// Day of month the contract renews.
    pub base_date: i64,
    /// Contract state.
    pub contract_state: i64,
    /// Whether closure has been requested.
    #[serde(rename = "closeRequestYN")]
    pub close_request_yn: bool,
    /// Whether use is restricted.
    #[serde(rename = "useRestrictYN")]
    pub use_restrict_yn: bool,
    /// Whether the account closes when the contract expires.
    pub close_on_expired: bool,
    /// Whether the account has unpaid fees.
    #[serde(rename = "unPaidYN")]
    pub un_paid_yn: bool,
    /// Memo.
    pub memo: String,
}

/// Registration of a new bank account.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BankAccountForm {
    /// Bank code (4 digits).
    #[serde(rename = "BankCode")]
    pub bank_code: String,
    /// Account number, digits only.
    #[serde(rename = "AccountNumber")]
    pub account_number: String,
    /// Account password.
    #[serde(rename = "AccountPWD")]
    pub account_pwd: String,
    /// "법인" (corporate) or "개인" (personal).
    #[serde(rename = "AccountType")]
    pub account_type: String,
    /// Account alias.
    #[serde(rename = "AccountName", skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    /// Business number for corporate accounts, birth date for personal ones.
    #[serde(rename = "IdentityNumber")]
    pub identity_number: String,
    /// Internet banking id, required by some banks.
    #[serde(rename = "BankID", skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<String>,
    /// Quick inquiry id.
    #[serde(rename = "FastID", skip_serializing_if = "Option::is_none")]
    pub fast_id: Option<String>,
    /// Quick inquiry password.
    #[serde(rename = "FastPWD", skip_serializing_if = "Option::is_none")]
    pub fast_pwd: Option<String>,
    /// Contract period in months; sent as a query parameter.
    #[serde(skip)]
    pub use_period: Option<u32>,
    /// Memo.
    #[serde(rename = "Memo", skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Changes to a registered bank account.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateBankAccountForm {
    /// Account password.
    #[serde(rename = "AccountPWD")]
    pub account_pwd: String,
    /// Account alias.
    #[serde(rename = "AccountName", skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    /// Internet banking id.
    #[serde(rename = "BankID", skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<String>,
    /// Quick inquiry id.
    #[serde(rename = "FastID", skip_serializing_if = "Option::is_none")]
    pub fast_id: Option<String>,
    /// Quick inquiry password.
    #[serde(rename = "FastPWD", skip_serializing_if = "Option::is_none")]
    pub fast_pwd: Option<String>,
    /// Memo.
    #[serde(rename = "Memo", skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// State of a collection job.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobState {
    /// Job id (18 characters).
    #[serde(rename = "jobID")]
    pub job_id: String,
    /// 1 waiting, 2 running, 3 done.
    #[serde(deserialize_with = "lenient::i64")]
    pub job_state: i64,
    /// Start of the collected range.
    pub start_date: String,
    /// End of the collected range.
    pub end_date: String,
    /// Error code, 1 on success.
    #[serde(deserialize_with = "lenient::i64")]
    pub error_code: i64,
    /// Error reason.
    pub error_reason: String,
    /// Job start time.
    #[serde(rename = "jobStartDT")]
    pub job_start_dt: String,
    /// Job end time.
    #[serde(rename = "jobEndDT")]
    pub job_end_dt: String,
    /// Request time.
    #[serde(rename = "regDT")]
    pub reg_dt: String,
}

/// A page of collected transactions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BankSearchResult {
    /// Result code.
    #[serde(deserialize_with = "lenient::i64")]
    pub code: i64,
    /// Result message.
    pub message: String,
    /// Total matching transactions.
    pub total: i64,
    /// Page size.
    pub per_page: i64,
    /// Current page number.
    pub page_num: i64,
    /// Number of pages.
    pub page_count: i64,
    /// Time of the last successful collection.
    #[serde(rename = "lastScrapDT")]
    pub last_scrap_dt: String,
    /// Account balance at collection time.
    pub balance: String,
    /// Transactions on this page.
    pub list: Vec<BankTransaction>,
}

/// A collected transaction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BankTransaction {
    /// Transaction id, used by memo updates.
    pub tid: String,
    /// Transaction time.
    pub trdt: String,
    /// Amount.
    pub tram: String,
    /// "I" deposit or "O" withdrawal.
    pub trtype: String,
    /// Counterparty account name.
    pub acctname: String,
    /// Counterparty account number.
    pub acctnum: String,
    /// Memo.
    pub memo: String,
    /// Bank remark 1.
    pub remark1: String,
    /// Bank remark 2.
    pub remark2: String,
    /// Bank remark 3.
    pub remark3: String,
}

/// Totals over a collection job.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BankSummary {
    /// Number of transactions.
    pub count: i64,
    /// Number of deposits.
    pub cnt_acc_in: i64,
    /// Number of withdrawals.
    pub cnt_acc_out: i64,
    /// Total deposited.
    #[serde(deserialize_with = "lenient::f64")]
    pub total_acc_in: f64,
    /// Total withdrawn.
    #[serde(deserialize_with = "lenient::f64")]
    pub total_acc_out: f64,
}

/// Filters for transaction search and summary.
#[derive(Debug, Clone, Default)]
pub struct BankSearch {
    /// `I` deposits, `O` withdrawals; empty for both.
    pub trade_type: Vec<String>,
    /// Text matched against counterparty and remarks.
    pub search_string: Option<String>,
    /// Page number, from 1.
    pub page: Option<u32>,
    /// Page size, up to 1000.
    pub per_page: Option<u32>,
    /// `D` newest first (default) or `A`.
    pub order: Option<String>,
}
