//! Point and member management types shared by every service.

use super::lenient;
use serde::{Deserialize, Serialize};

/// Generic result of a state-changing call.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Response {
    /// Result code; positive on success.
    #[serde(deserialize_with = "lenient::i64")]
    pub code: i64,
    /// Result message.
    pub message: String,
}

/// Bank transfer point purchase request.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentForm {
    /// Depositor name.
    pub settler_name: String,
    /// Depositor email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settler_email: Option<String>,
    /// Mobile number notified when the deposit is confirmed.
    #[serde(rename = "notifyHP", skip_serializing_if = "Option::is_none")]
    pub notify_hp: Option<String>,
    /// Payment method, e.g. bank transfer.
    pub payment_method: String,
    /// Contract course.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_course: Option<String>,
    /// Amount deposited.
    pub settle_cost: String,
}

/// Result of [`PaymentForm`] submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentResponse {
    /// Result code.
    #[serde(deserialize_with = "lenient::i64")]
    pub code: i64,
    /// Result message.
    pub message: String,
    /// Code identifying the payment request.
    pub settle_code: String,
}

/// A point purchase.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentHistory {
    /// Product type.
    pub product_type: String,
    /// Product name.
    pub product_name: String,
    /// Settlement type.
    pub settle_type: String,
    /// Depositor name.
    pub settler_name: String,
    /// Depositor email.
    pub settler_email: String,
    /// Amount paid.
    pub settle_cost: String,
    /// Points credited.
    pub settle_point: String,
    /// Settlement state.
    pub settle_state: i64,
    /// Registration time (`yyyyMMddHHmmss`).
    #[serde(rename = "regDT")]
    pub reg_dt: String,
    /// Last state change time.
    #[serde(rename = "stateDT")]
    pub state_dt: String,
}

/// A page of [`PaymentHistory`] entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentHistoryResult {
    /// Result code.
    #[serde(deserialize_with = "lenient::i64")]
    pub code: i64,
    /// Total matching entries.
    pub total: i64,
    /// Page size.
    pub per_page: i64,
    /// Current page number.
    pub page_num: i64,
    /// Number of pages.
    pub page_count: i64,
    /// Entries on this page.
    pub list: Vec<PaymentHistory>,
}

/// A point deduction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UseHistory {
    /// Document type charged.
    pub doctype: String,
    /// Document number.
    pub docnum: String,
    /// Document date.
    pub docdate: String,
    /// Points used.
    pub usage_amount: String,
    /// Points remaining afterwards.
    pub remain_point: String,
}

/// A page of [`UseHistory`] entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UseHistoryResult {
    /// Result code.
    #[serde(deserialize_with = "lenient::i64")]
    pub code: i64,
    /// Total matching entries.
    pub total: i64,
    /// Page size.
    pub per_page: i64,
    /// Current page number.
    pub page_num: i64,
    /// Number of pages.
    pub page_count: i64,
    /// Entries on this page.
    pub list: Vec<UseHistory>,
}

/// Point refund request.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundForm {
    /// Contact name.
    pub contact_name: String,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    /// Contact phone number.
    #[serde(rename = "contactTEL", skip_serializing_if = "Option::is_none")]
    pub contact_tel: Option<String>,
    /// Points to refund.
    pub request_point: String,
    /// Bank of the refund account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_bank: Option<String>,
    /// Refund account number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_num: Option<String>,
    /// Refund account holder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    /// Reason for the refund.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Result of a [`RefundForm`] submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RefundResponse {
    /// Result code.
    #[serde(deserialize_with = "lenient::i64")]
    pub code: i64,
    /// Result message.
    pub message: String,
    /// Code identifying the refund request.
    pub refund_code: String,
}

/// A refund request and its state.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RefundHistory {
    /// Request time.
    #[serde(rename = "reqDT")]
    pub req_dt: String,
    /// Points requested.
    pub request_point: String,
    /// Bank of the refund account.
    pub account_bank: String,
    /// Refund account number.
    pub account_num: String,
    /// Refund account holder.
    pub account_name: String,
    /// Processing state.
    pub state: i64,
    /// Reason given.
    pub reason: String,
}

/// A page of [`RefundHistory`] entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RefundHistoryResult {
    /// Result code.
    #[serde(deserialize_with = "lenient::i64")]
    pub code: i64,
    /// Total matching entries.
    pub total: i64,
    /// Page size.
    pub per_page: i64,
    /// Current page number.
    pub page_num: i64,
    /// Number of pages.
    pub page_count: i64,
    /// Entries on this page.
    pub list: Vec<RefundHistory>,
}

/// Flat-rate contract state.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlatRateState {
    /// Whether a contract exists.
    #[serde(rename = "contractYN")]
    pub contract_yn: bool,
    /// Contract state.
    pub contract_state: i64,
    /// Last day of use (`yyyyMMdd`).
    pub use_end_date: String,
    /// Day of month the contract renews.
    pub base_date: i64,
}

/// How a member is charged for a service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChargeInfo {
    /// Cost per use.
    pub unit_cost: String,
    /// Charging method.
    pub charge_method: String,
    /// Rate system.
    pub rate_system: String,
}

/// New member registration.
///
/// `link_id` may be left empty; the client fills in its own link id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JoinForm {
    /// Partner link id.
    #[serde(rename = "LinkID")]
    pub link_id: String,
    /// Business registration number.
    #[serde(rename = "CorpNum")]
    pub corp_num: String,
    /// Representative name.
    #[serde(rename = "CEOName")]
    pub ceo_name: String,
    /// Company name.
    #[serde(rename = "CorpName")]
    pub corp_name: String,
    /// Address.
    #[serde(rename = "Addr")]
    pub addr: String,
    /// Business type.
    #[serde(rename = "BizType")]
    pub biz_type: String,
    /// Business class.
    #[serde(rename = "BizClass")]
    pub biz_class: String,
    /// Contact name.
    #[serde(rename = "ContactName")]
    pub contact_name: String,
    /// Contact email.
    #[serde(rename = "ContactEmail")]
    pub contact_email: String,
    /// Contact phone number.
    #[serde(rename = "ContactTEL", skip_serializing_if = "Option::is_none")]
    pub contact_tel: Option<String>,
    /// Login id.
    #[serde(rename = "ID")]
    pub id: String,
    /// Login password.
    #[serde(rename = "PWD")]
    pub pwd: String,
}

/// Company information.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CorpInfo {
    /// Representative name.
    pub ceoname: String,
    /// Company name.
    pub corp_name: String,
    /// Address.
    pub addr: String,
    /// Business type.
    pub biz_type: String,
    /// Business class.
    pub biz_class: String,
}

/// A user account under a member.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactInfo {
    /// Login id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Person name.
    pub person_name: String,
    /// Phone number.
    pub tel: String,
    /// Email.
    pub email: String,
    /// Registration time.
    #[serde(rename = "regDT", skip_serializing_if = "Option::is_none")]
    pub reg_dt: Option<String>,
    /// Search permission: 1 own, 2 department, 3 company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_role: Option<i64>,
    /// Whether the user is an administrator.
    #[serde(rename = "mgrYN", skip_serializing_if = "Option::is_none")]
    pub mgr_yn: Option<bool>,
    /// Account state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<i64>,
}
