//! Cash receipt operations.
//!
//! This module provides the CashbillClient for issuing and cancelling cash
//! receipts, looking them up, and the view, resend and billing helpers.

use crate::auth::Service;
use crate::client::{Client, require};
use crate::dispatch::RequestSpec;
use crate::error::{PopbillError, Result};
use crate::member::MemberClient;
use crate::point::PointClient;
use crate::types::lenient;
use crate::types::{
    BulkCashbillResult, BulkResponse, Cashbill, CashbillDetail, CashbillInfo, CashbillSearch,
    CashbillSearchResult, ChargeInfo, EmailSendConfig, IssueResponse, RegistIssueOptions,
    Response, RevokeIssueOptions,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

const SERVICE: Service = Service::Cashbill;

/// Reported when a document key has never been used.
const MGT_KEY_NOT_FOUND: i64 = -14000003;

/// Client for cash receipt operations.
///
/// Access via `client.cashbill()`.
#[derive(Clone)]
pub struct CashbillClient {
    client: Client,
}

impl CashbillClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Point operations authorized with the cash receipt scope.
    pub fn point(&self) -> PointClient {
        PointClient::new(self.client.clone(), SERVICE)
    }

    /// Member operations authorized with the cash receipt scope.
    pub fn member(&self) -> MemberClient {
        MemberClient::new(self.client.clone(), SERVICE)
    }

    /// Issue a cash receipt immediately.
    ///
    /// # Arguments
    ///
    /// * `corp_num` - Business number of the issuing member
    /// * `cashbill` - Receipt contents
    /// * `options` - Memo, acting user and email subject
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use popbill::{Client, types::{Cashbill, RegistIssueOptions}};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::from_env()?;
    ///
    ///     let cashbill = Cashbill {
    ///         mgt_key: "20250101-001".to_string(),
    ///         trade_type: Some("승인거래".to_string()),
    ///         trade_usage: "소득공제용".to_string(),
    ///         total_amount: "11000".to_string(),
    ///         supply_cost: "10000".to_string(),
    ///         tax: "1000".to_string(),
    ///         identity_num: "01011112222".to_string(),
    ///         item_name: "Coffee".to_string(),
    ///         ..Default::default()
    ///     };
    ///
    ///     let issued = client
    ///         .cashbill()
    ///         .regist_issue("1234567890", &cashbill, RegistIssueOptions::default())
    ///         .await?;
    ///     println!("confirm number: {}", issued.confirm_num);
    ///     Ok(())
    /// }
    /// ```
    pub async fn regist_issue(
        &self,
        corp_num: &str,
        cashbill: &Cashbill,
        options: RegistIssueOptions,
    ) -> Result<IssueResponse> {
        require(corp_num, "Business number")?;
        require(&cashbill.mgt_key, "Document key")?;

        let mut body = cashbill.clone();
        if options.memo.is_some() {
            body.memo = options.memo;
        }
        if options.email_subject.is_some() {
            body.email_subject = options.email_subject;
        }

        let spec = RequestSpec::post(SERVICE, "/Cashbill")
            .corp_num(corp_num)
            .user_id(options.user_id.as_deref())
            .method_override("ISSUE")
            .json(&body)?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// Issue a cancellation of a previously issued receipt.
    ///
    /// Without amounts in `options` the whole receipt is cancelled.
    pub async fn revoke_regist_issue(
        &self,
        corp_num: &str,
        mgt_key: &str,
        org_confirm_num: &str,
        org_trade_date: &str,
        options: &RevokeIssueOptions,
    ) -> Result<IssueResponse> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct RevokeRequest<'a> {
            mgt_key: &'a str,
            org_confirm_num: &'a str,
            org_trade_date: &'a str,
            #[serde(flatten)]
            options: &'a RevokeIssueOptions,
        }

        require(corp_num, "Business number")?;
        require(mgt_key, "Document key")?;
        require(org_confirm_num, "Original confirmation number")?;
        require(org_trade_date, "Original trade date")?;

        let spec = RequestSpec::post(SERVICE, "/Cashbill")
            .corp_num(corp_num)
            .user_id(options.user_id.as_deref())
            .method_override("REVOKEISSUE")
            .json(&RevokeRequest {
                mgt_key,
                org_confirm_num,
                org_trade_date,
                options,
            })?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// Submit up to 100 receipts for asynchronous issuance.
    ///
    /// `submit_id` identifies the batch for [`get_bulk_result`](Self::get_bulk_result).
    pub async fn bulk_submit(
        &self,
        corp_num: &str,
        submit_id: &str,
        cashbills: &[Cashbill],
        user_id: Option<&str>,
    ) -> Result<BulkResponse> {
        #[derive(Serialize)]
        struct BulkRequest<'a> {
            cashbills: &'a [Cashbill],
        }

        require(corp_num, "Business number")?;
        require(submit_id, "Submission id")?;
        if cashbills.is_empty() {
            return Err(PopbillError::invalid("At least one cash receipt is required"));
        }

        debug!(submit_id, count = cashbills.len(), "submitting cash receipts");
        let spec = RequestSpec::post(SERVICE, "/Cashbill")
            .corp_num(corp_num)
            .user_id(user_id)
            .method_override("BULKISSUE")
            .header("x-pb-submit-id", submit_id)
            .json(&BulkRequest { cashbills })?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// Get the processing state of a bulk submission.
    pub async fn get_bulk_result(
        &self,
        corp_num: &str,
        submit_id: &str,
        user_id: Option<&str>,
    ) -> Result<BulkCashbillResult> {
        require(corp_num, "Business number")?;
        require(submit_id, "Submission id")?;
        let spec = RequestSpec::get(SERVICE, format!("/Cashbill/BULK/{submit_id}/State"))
            .corp_num(corp_num)
            .user_id(user_id);
        self.client.dispatch(spec).await?.into_data()
    }

    /// Delete a receipt that was never sent to the tax service.
    pub async fn delete(
        &self,
        corp_num: &str,
        mgt_key: &str,
        user_id: Option<&str>,
    ) -> Result<Response> {
        require(corp_num, "Business number")?;
        require(mgt_key, "Document key")?;
        let spec = RequestSpec::post(SERVICE, format!("/Cashbill/{mgt_key}"))
            .corp_num(corp_num)
            .user_id(user_id)
            .method_override("DELETE");
        self.client.dispatch(spec).await?.into_data()
    }

    /// Get the state of a receipt.
    pub async fn get_info(
        &self,
        corp_num: &str,
        mgt_key: &str,
        user_id: Option<&str>,
    ) -> Result<CashbillInfo> {
        require(corp_num, "Business number")?;
        require(mgt_key, "Document key")?;
        let spec = RequestSpec::get(SERVICE, format!("/Cashbill/{mgt_key}"))
            .corp_num(corp_num)
            .user_id(user_id);
        self.client.dispatch(spec).await?.into_data()
    }

    /// Get the state of up to 1000 receipts at once.
    pub async fn get_infos(
        &self,
        corp_num: &str,
        mgt_keys: &[&str],
        user_id: Option<&str>,
    ) -> Result<Vec<CashbillInfo>> {
        require(corp_num, "Business number")?;
        if mgt_keys.is_empty() {
            return Err(PopbillError::invalid("Document keys are required"));
        }
        let spec = RequestSpec::post(SERVICE, "/Cashbill/States")
            .corp_num(corp_num)
            .user_id(user_id)
            .json(mgt_keys)?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// Get the full contents of a receipt.
    pub async fn get_detail_info(
        &self,
        corp_num: &str,
        mgt_key: &str,
        user_id: Option<&str>,
    ) -> Result<CashbillDetail> {
        require(corp_num, "Business number")?;
        require(mgt_key, "Document key")?;
        let spec = RequestSpec::get(SERVICE, format!("/Cashbill/{mgt_key}"))
            .corp_num(corp_num)
            .user_id(user_id)
            .query("Detail", "");
        self.client.dispatch(spec).await?.into_data()
    }

    /// Whether a document key has already been used by this member.
    pub async fn check_mgt_key_in_use(
        &self,
        corp_num: &str,
        mgt_key: &str,
        user_id: Option<&str>,
    ) -> Result<bool> {
        match self.get_info(corp_num, mgt_key, user_id).await {
            Ok(info) => Ok(!info.item_key.is_empty()),
            Err(PopbillError::Api { code, .. }) if code == MGT_KEY_NOT_FOUND => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Search receipts.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use popbill::{Client, types::CashbillSearch};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::from_env()?;
    ///
    ///     let page = client.cashbill().search("1234567890", &CashbillSearch {
    ///         dtype: "T".to_string(),
    ///         s_date: "20250101".to_string(),
    ///         e_date: "20250131".to_string(),
    ///         state: vec!["3**".to_string()],
    ///         ..Default::default()
    ///     }, None).await?;
    ///
    ///     for info in &page.list {
    ///         println!("{} {}", info.mgt_key, info.total_amount);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn search(
        &self,
        corp_num: &str,
        search: &CashbillSearch,
        user_id: Option<&str>,
    ) -> Result<CashbillSearchResult> {
        require(corp_num, "Business number")?;
        require(&search.dtype, "Date type")?;
        require(&search.s_date, "Start date")?;
        require(&search.e_date, "End date")?;

        let spec = RequestSpec::get(SERVICE, "/Cashbill/Search")
            .corp_num(corp_num)
            .user_id(user_id)
            .query("DType", &search.dtype)
            .query("SDate", &search.s_date)
            .query("EDate", &search.e_date)
            .query_list("State", &search.state)
            .query_list("TradeType", &search.trade_type)
            .query_list("TradeUsage", &search.trade_usage)
            .query_list("TradeOpt", &search.trade_opt)
            .query_list("TaxationType", &search.taxation_type)
            .query_opt("QString", search.q_string.as_deref())
            .query_opt("Order", search.order.as_deref())
            .query_some("Page", search.page)
            .query_some("PerPage", search.per_page)
            .query_opt("FranchiseTaxRegID", search.franchise_tax_reg_id.as_deref());
        self.client.dispatch(spec).await?.into_data()
    }

    /// Get a document box popup URL, e.g. `togo = "TBOX"` or `"PBOX"`.
    pub async fn get_url(&self, corp_num: &str, togo: &str, user_id: Option<&str>) -> Result<String> {
        require(corp_num, "Business number")?;
        require(togo, "Popup type")?;
        let spec = RequestSpec::get(SERVICE, "/Cashbill")
            .corp_num(corp_num)
            .user_id(user_id)
            .query("TG", togo);
        self.client.dispatch(spec).await?.field("url")
    }

    /// Get the receipt popup URL.
    pub async fn get_popup_url(
        &self,
        corp_num: &str,
        mgt_key: &str,
        user_id: Option<&str>,
    ) -> Result<String> {
        self.document_url(corp_num, mgt_key, "POPUP", user_id).await
    }

    /// Get the receipt view URL, without menus.
    pub async fn get_view_url(
        &self,
        corp_num: &str,
        mgt_key: &str,
        user_id: Option<&str>,
    ) -> Result<String> {
        self.document_url(corp_num, mgt_key, "VIEW", user_id).await
    }

    /// Get the print popup URL.
    pub async fn get_print_url(
        &self,
        corp_num: &str,
        mgt_key: &str,
        user_id: Option<&str>,
    ) -> Result<String> {
        self.document_url(corp_num, mgt_key, "PRINT", user_id).await
    }

    /// Get the buyer's mail link URL.
    pub async fn get_mail_url(
        &self,
        corp_num: &str,
        mgt_key: &str,
        user_id: Option<&str>,
    ) -> Result<String> {
        self.document_url(corp_num, mgt_key, "MAIL", user_id).await
    }

    /// Get the PDF download URL.
    pub async fn get_pdf_url(
        &self,
        corp_num: &str,
        mgt_key: &str,
        user_id: Option<&str>,
    ) -> Result<String> {
        self.document_url(corp_num, mgt_key, "PDF", user_id).await
    }

    async fn document_url(
        &self,
        corp_num: &str,
        mgt_key: &str,
        togo: &str,
        user_id: Option<&str>,
    ) -> Result<String> {
        require(corp_num, "Business number")?;
        require(mgt_key, "Document key")?;
        let spec = RequestSpec::get(SERVICE, format!("/Cashbill/{mgt_key}"))
            .corp_num(corp_num)
            .user_id(user_id)
            .query("TG", togo);
        self.client.dispatch(spec).await?.field("url")
    }

    /// Get a popup URL printing several receipts at once.
    pub async fn get_mass_print_url(
        &self,
        corp_num: &str,
        mgt_keys: &[&str],
        user_id: Option<&str>,
    ) -> Result<String> {
        require(corp_num, "Business number")?;
        if mgt_keys.is_empty() {
            return Err(PopbillError::invalid("Document keys are required"));
        }
        let spec = RequestSpec::post(SERVICE, "/Cashbill/Prints")
            .corp_num(corp_num)
            .user_id(user_id)
            .json(mgt_keys)?;
        self.client.dispatch(spec).await?.field("url")
    }

    /// Resend the issuance email.
    pub async fn send_email(
        &self,
        corp_num: &str,
        mgt_key: &str,
        receiver: &str,
        user_id: Option<&str>,
    ) -> Result<Response> {
        #[derive(Serialize)]
        struct EmailRequest<'a> {
            receiver: &'a str,
        }

        require(corp_num, "Business number")?;
        require(mgt_key, "Document key")?;
        let spec = RequestSpec::post(SERVICE, format!("/Cashbill/{mgt_key}"))
            .corp_num(corp_num)
            .user_id(user_id)
            .method_override("EMAIL")
            .json(&EmailRequest { receiver })?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// Send a notification SMS (charged per message).
    pub async fn send_sms(
        &self,
        corp_num: &str,
        mgt_key: &str,
        sender: &str,
        receiver: &str,
        contents: &str,
        user_id: Option<&str>,
    ) -> Result<Response> {
        #[derive(Serialize)]
        struct SmsRequest<'a> {
            sender: &'a str,
            receiver: &'a str,
            contents: &'a str,
        }

        require(corp_num, "Business number")?;
        require(mgt_key, "Document key")?;
        let spec = RequestSpec::post(SERVICE, format!("/Cashbill/{mgt_key}"))
            .corp_num(corp_num)
            .user_id(user_id)
            .method_override("SMS")
            .json(&SmsRequest {
                sender,
                receiver,
                contents,
            })?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// Fax the receipt (charged per page).
    pub async fn send_fax(
        &self,
        corp_num: &str,
        mgt_key: &str,
        sender: &str,
        receiver: &str,
        user_id: Option<&str>,
    ) -> Result<Response> {
        #[derive(Serialize)]
        struct FaxRequest<'a> {
            sender: &'a str,
            receiver: &'a str,
        }

        require(corp_num, "Business number")?;
        require(mgt_key, "Document key")?;
        let spec = RequestSpec::post(SERVICE, format!("/Cashbill/{mgt_key}"))
            .corp_num(corp_num)
            .user_id(user_id)
            .method_override("FAX")
            .json(&FaxRequest { sender, receiver })?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// Give a document key to a receipt issued from the Popbill site.
    pub async fn assign_mgt_key(
        &self,
        corp_num: &str,
        item_key: &str,
        mgt_key: &str,
        user_id: Option<&str>,
    ) -> Result<Response> {
        require(corp_num, "Business number")?;
        require(item_key, "Item key")?;
        require(mgt_key, "Document key")?;
        let spec = RequestSpec::post(SERVICE, format!("/Cashbill/{item_key}"))
            .corp_num(corp_num)
            .user_id(user_id)
            .form(&[("MgtKey", mgt_key)]);
        self.client.dispatch(spec).await?.into_data()
    }

    /// List notification email settings.
    pub async fn list_email_config(
        &self,
        corp_num: &str,
        user_id: Option<&str>,
    ) -> Result<Vec<EmailSendConfig>> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(SERVICE, "/Cashbill/EmailSendConfig")
            .corp_num(corp_num)
            .user_id(user_id);
        self.client.dispatch(spec).await?.into_data()
    }

    /// Turn a notification email type on or off.
    pub async fn update_email_config(
        &self,
        corp_num: &str,
        email_type: &str,
        send_yn: bool,
        user_id: Option<&str>,
    ) -> Result<Response> {
        require(corp_num, "Business number")?;
        require(email_type, "Email type")?;
        let spec = RequestSpec::post(SERVICE, "/Cashbill/EmailSendConfig")
            .corp_num(corp_num)
            .user_id(user_id)
            .query("EmailType", email_type)
            .query("SendYN", send_yn);
        self.client.dispatch(spec).await?.into_data()
    }

    /// Get the price of one issuance in points.
    pub async fn get_unit_cost(&self, corp_num: &str) -> Result<f64> {
        #[derive(Deserialize)]
        struct UnitCost {
            #[serde(rename = "unitCost", deserialize_with = "lenient::f64")]
            unit_cost: f64,
        }

        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(SERVICE, "/Cashbill")
            .corp_num(corp_num)
            .query("cfg", "UNITCOST");
        let cost: UnitCost = self.client.dispatch(spec).await?.into_data()?;
        Ok(cost.unit_cost)
    }

    /// Get how the member is charged for cash receipts.
    pub async fn get_charge_info(
        &self,
        corp_num: &str,
        user_id: Option<&str>,
    ) -> Result<ChargeInfo> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(SERVICE, "/Cashbill/ChargeInfo")
            .corp_num(corp_num)
            .user_id(user_id);
        self.client.dispatch(spec).await?.into_data()
    }
}
