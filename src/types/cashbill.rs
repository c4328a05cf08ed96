//! Cash receipt types.

use super::lenient;
use serde::{Deserialize, Serialize};

/// A cash receipt to issue.
///
/// Amounts are decimal strings, as the API expects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Cashbill {
    /// Caller-assigned document key, unique per member.
    pub mgt_key: String,
    /// Trade date (`yyyyMMdd`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_date: Option<String>,
    /// Trade time (`yyyyMMddHHmmss`), for backdated issuance.
    #[serde(rename = "tradeDT", skip_serializing_if = "Option::is_none")]
    pub trade_dt: Option<String>,
    /// "승인거래" (approval) or "취소거래" (cancellation).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_type: Option<String>,
    /// "소득공제용" (income deduction) or "지출증빙용" (expense proof).
    pub trade_usage: String,
    /// Trade option, e.g. "일반", "도서공연", "대중교통".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_opt: Option<String>,
    /// "과세" (taxable) or "비과세" (tax-free).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxation_type: Option<String>,
    /// Total amount.
    pub total_amount: String,
    /// Supply cost.
    pub supply_cost: String,
    /// Tax.
    pub tax: String,
    /// Service fee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_fee: Option<String>,
    /// Franchise business number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub franchise_corp_num: Option<String>,
    /// Franchise sub-business registration id.
    #[serde(rename = "franchiseTaxRegID", skip_serializing_if = "Option::is_none")]
    pub franchise_tax_reg_id: Option<String>,
    /// Franchise name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub franchise_corp_name: Option<String>,
    /// Franchise representative.
    #[serde(rename = "franchiseCEOName", skip_serializing_if = "Option::is_none")]
    pub franchise_ceo_name: Option<String>,
    /// Franchise address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub franchise_addr: Option<String>,
    /// Franchise phone number.
    #[serde(rename = "franchiseTEL", skip_serializing_if = "Option::is_none")]
    pub franchise_tel: Option<String>,
    /// Buyer identity: phone, card or business number.
    pub identity_num: String,
    /// Buyer name.
    pub customer_name: String,
    /// Item name.
    pub item_name: String,
    /// Order number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    /// Buyer email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Buyer mobile number.
    pub hp: String,
    /// Notify the buyer by SMS on issuance.
    #[serde(rename = "smssendYN", skip_serializing_if = "Option::is_none")]
    pub smssend_yn: Option<bool>,
    /// Fax number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    /// Memo recorded with the issuance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Subject of the notification email sent to the buyer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_subject: Option<String>,
    /// Confirmation number of the original receipt (cancellations).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_confirm_num: Option<String>,
    /// Trade date of the original receipt (cancellations).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_trade_date: Option<String>,
    /// Partial cancellation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_part_cancel: Option<bool>,
    /// Cancellation reason: 1 cancelled trade, 2 wrong issuance, 3 other.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_type: Option<i64>,
}

/// Result of an issuance.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueResponse {
    /// Result code.
    #[serde(deserialize_with = "lenient::i64")]
    pub code: i64,
    /// Result message.
    pub message: String,
    /// National Tax Service confirmation number.
    pub confirm_num: String,
    /// Trade date assigned.
    pub trade_date: String,
    /// Trade time assigned.
    #[serde(rename = "tradeDT")]
    pub trade_dt: String,
}

/// Acknowledgement of a bulk submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BulkResponse {
    /// Result code.
    #[serde(deserialize_with = "lenient::i64")]
    pub code: i64,
    /// Result message.
    pub message: String,
    /// Receipt id of the submission.
    #[serde(rename = "receiptID")]
    pub receipt_id: String,
}

/// Processing state of a bulk submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BulkCashbillResult {
    /// Result code.
    #[serde(deserialize_with = "lenient::i64")]
    pub code: i64,
    /// Result message.
    pub message: String,
    /// Submission id chosen by the caller.
    #[serde(rename = "submitID")]
    pub submit_id: String,
    /// Receipts submitted.
    pub submit_count: i64,
    /// Receipts issued.
    pub success_count: i64,
    /// Receipts rejected.
    pub fail_count: i64,
    /// Processing state: 1 received, 2 processing, 3 done.
    pub tx_state: i64,
    /// Processing result code.
    pub tx_result_code: i64,
    /// Processing start time.
    #[serde(rename = "txStartDT")]
    pub tx_start_dt: String,
    /// Processing end time.
    #[serde(rename = "txEndDT")]
    pub tx_end_dt: String,
    /// Submission receipt time.
    #[serde(rename = "receiptDT")]
    pub receipt_dt: String,
    /// Receipt id of the submission.
    #[serde(rename = "receiptID")]
    pub receipt_id: String,
    /// Per-receipt outcomes.
    pub issue_result: Vec<BulkCashbillIssueResult>,
}

/// Outcome of one receipt in a bulk submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BulkCashbillIssueResult {
    /// Document key.
    pub mgt_key: String,
    /// Result code.
    #[serde(deserialize_with = "lenient::i64")]
    pub code: i64,
    /// Result message.
    pub message: String,
    /// Confirmation number, when issued.
    pub confirm_num: Option<String>,
    /// Trade date, when issued.
    pub trade_date: Option<String>,
    /// Trade time, when issued.
    #[serde(rename = "tradeDT")]
    pub trade_dt: Option<String>,
}

/// State and summary of a receipt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CashbillInfo {
    /// Popbill item key.
    pub item_key: String,
    /// Document key.
    pub mgt_key: String,
    /// Trade date.
    pub trade_date: String,
    /// Trade time.
    #[serde(rename = "tradeDT")]
    pub trade_dt: String,
    /// Trade type.
    pub trade_type: String,
    /// Trade usage.
    pub trade_usage: String,
    /// Trade option.
    pub trade_opt: String,
    /// Taxation type.
    pub taxation_type: String,
    /// Total amount.
    pub total_amount: String,
    /// Supply cost.
    pub supply_cost: String,
    /// Tax.
    pub tax: String,
    /// Service fee.
    pub service_fee: String,
    /// Issue time.
    #[serde(rename = "issueDT")]
    pub issue_dt: String,
    /// Registration time.
    #[serde(rename = "regDT")]
    pub reg_dt: String,
    /// Memo attached to the last state change.
    pub state_memo: String,
    /// State code.
    pub state_code: i64,
    /// Last state change time.
    #[serde(rename = "stateDT")]
    pub state_dt: String,
    /// Buyer identity.
    pub identity_num: String,
    /// Item name.
    pub item_name: String,
    /// Order number.
    pub order_number: String,
    /// Buyer email.
    pub email: String,
    /// Buyer mobile number.
    pub hp: String,
    /// Buyer name.
    pub customer_name: String,
    /// Confirmation number.
    pub confirm_num: String,
    /// Confirmation number of the original receipt.
    pub org_confirm_num: Option<String>,
    /// Trade date of the original receipt.
    pub org_trade_date: Option<String>,
    /// Time sent to the National Tax Service.
    #[serde(rename = "ntssendDT")]
    pub ntssend_dt: String,
    /// Time the National Tax Service replied.
    #[serde(rename = "ntsresultDT")]
    pub ntsresult_dt: String,
    /// National Tax Service result code.
    pub ntsresult_code: String,
    /// National Tax Service result message.
    pub ntsresult_message: String,
    /// Whether the receipt was printed.
    #[serde(rename = "printYN")]
    pub print_yn: bool,
    /// Whether the receipt was issued by another partner.
    #[serde(rename = "interOPYN")]
    pub inter_op_yn: bool,
}

/// Full contents of a receipt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CashbillDetail {
    /// Document key.
    pub mgt_key: String,
    /// Confirmation number.
    pub confirm_num: String,
    /// Confirmation number of the original receipt.
    pub org_confirm_num: Option<String>,
    /// Trade date of the original receipt.
    pub org_trade_date: Option<String>,
    /// Trade date.
    pub trade_date: String,
    /// Trade time.
    #[serde(rename = "tradeDT")]
    pub trade_dt: String,
    /// Trade type.
    pub trade_type: String,
    /// Trade usage.
    pub trade_usage: String,
    /// Trade option.
    pub trade_opt: String,
    /// Taxation type.
    pub taxation_type: String,
    /// Total amount.
    pub total_amount: String,
    /// Supply cost.
    pub supply_cost: String,
    /// Tax.
    pub tax: String,
    /// Service fee.
    pub service_fee: String,
    /// Franchise business number.
    pub franchise_corp_num: String,
    /// Franchise sub-business registration id.
    #[serde(rename = "franchiseTaxRegID")]
    pub franchise_tax_reg_id: String,
    /// Franchise name.
    pub franchise_corp_name: String,
    /// Franchise representative.
    #[serde(rename = "franchiseCEOName")]
    pub franchise_ceo_name: String,
    /// Franchise address.
    pub franchise_addr: String,
    /// Franchise phone number.
    #[serde(rename = "franchiseTEL")]
    pub franchise_tel: String,
    /// Buyer identity.
    pub identity_num: String,
    /// Buyer name.
    pub customer_name: String,
    /// Item name.
    pub item_name: String,
    /// Order number.
    pub order_number: String,
    /// Buyer email.
    pub email: String,
    /// Buyer mobile number.
    pub hp: String,
    /// SMS notification flag.
    #[serde(rename = "smssendYN")]
    pub smssend_yn: bool,
    /// Cancellation reason.
    pub cancel_type: Option<i64>,
}

/// A page of search results.
///
/// The API sends the paging counters as strings on some versions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CashbillSearchResult {
    /// Result code.
    #[serde(deserialize_with = "lenient::i64")]
    pub code: i64,
    /// Result message.
    pub message: String,
    /// Total matching receipts.
    #[serde(deserialize_with = "lenient::i64")]
    pub total: i64,
    /// Page size.
    #[serde(deserialize_with = "lenient::i64")]
    pub per_page: i64,
    /// Current page number.
    #[serde(deserialize_with = "lenient::i64")]
    pub page_num: i64,
    /// Number of pages.
    #[serde(deserialize_with = "lenient::i64")]
    pub page_count: i64,
    /// Receipts on this page.
    pub list: Vec<CashbillInfo>,
}

/// Whether a notification email type is sent.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct EmailSendConfig {
    /// Email type code, e.g. `CSH_ISSUE`.
    pub email_type: String,
    /// Whether it is sent.
    #[serde(rename = "sendYN")]
    pub send_yn: bool,
}

/// Optional arguments of an issuance.
#[derive(Debug, Clone, Default)]
pub struct RegistIssueOptions {
    /// Memo recorded with the issuance.
    pub memo: Option<String>,
    /// Acting Popbill user.
    pub user_id: Option<String>,
    /// Subject of the notification email.
    pub email_subject: Option<String>,
}

/// Optional arguments of a cancellation issuance.
///
/// Leave the amounts unset for a full cancellation.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeIssueOptions {
    /// Notify the buyer by SMS.
    #[serde(rename = "smssendYN", skip_serializing_if = "Option::is_none")]
    pub smssend_yn: Option<bool>,
    /// Memo recorded with the issuance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Partial cancellation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_part_cancel: Option<bool>,
    /// Cancellation reason: 1 cancelled trade, 2 wrong issuance, 3 other.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_type: Option<i64>,
    /// Supply cost cancelled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supply_cost: Option<String>,
    /// Tax cancelled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<String>,
    /// Service fee cancelled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_fee: Option<String>,
    /// Total amount cancelled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<String>,
    /// Subject of the notification email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_subject: Option<String>,
    /// Trade time of the cancellation.
    #[serde(rename = "tradeDT", skip_serializing_if = "Option::is_none")]
    pub trade_dt: Option<String>,
    /// Acting Popbill user.
    #[serde(skip)]
    pub user_id: Option<String>,
}

/// Search filters for [`CashbillClient::search`](crate::CashbillClient::search).
///
/// List filters are sent comma-joined; empty lists are omitted.
#[derive(Debug, Clone, Default)]
pub struct CashbillSearch {
    /// Date type: `T` trade date, `R` registration, `I` issue.
    pub dtype: String,
    /// Start date (`yyyyMMdd`).
    pub s_date: String,
    /// End date (`yyyyMMdd`).
    pub e_date: String,
    /// State codes; `*` wildcards allowed, e.g. `3**`.
    pub state: Vec<String>,
    /// Trade types.
    pub trade_type: Vec<String>,
    /// Trade usages.
    pub trade_usage: Vec<String>,
    /// Trade options.
    pub trade_opt: Vec<String>,
    /// Taxation types.
    pub taxation_type: Vec<String>,
    /// Buyer identity number to match.
    pub q_string: Option<String>,
    /// `D` newest first (default) or `A`.
    pub order: Option<String>,
    /// Page number, from 1.
    pub page: Option<u32>,
    /// Page size, up to 1000.
    pub per_page: Option<u32>,
    /// Franchise sub-business registration id.
    pub franchise_tax_reg_id: Option<String>,
}
