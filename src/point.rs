//! Point (prepaid balance) operations.
//!
//! Points are shared by every Popbill service, but each call is authorized
//! with the scope of the service the client was obtained from.

use crate::auth::Service;
use crate::client::{Client, require};
use crate::dispatch::RequestSpec;
use crate::error::Result;
use crate::types::lenient;
use crate::types::{
    PaymentForm, PaymentHistory, PaymentHistoryResult, PaymentResponse, RefundForm,
    RefundHistory, RefundHistoryResult, RefundResponse, UseHistoryResult,
};
use serde::Deserialize;

/// Client for point balance, payment and refund operations.
///
/// Access via `client.cashbill().point()` or `client.easyfinbank().point()`.
#[derive(Clone)]
pub struct PointClient {
    client: Client,
    service: Service,
}

#[derive(Deserialize)]
struct Balance {
    #[serde(rename = "remainPoint", deserialize_with = "lenient::f64")]
    remain_point: f64,
}

impl PointClient {
    pub(crate) fn new(client: Client, service: Service) -> Self {
        Self { client, service }
    }

    /// Get the member's remaining points.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use popbill::Client;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::from_env()?;
    ///     let balance = client.cashbill().point().get_balance("1234567890").await?;
    ///     println!("{balance} points left");
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_balance(&self, corp_num: &str) -> Result<f64> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(self.service, "/Point")
            .on_auth_host()
            .corp_num(corp_num);
        let balance: Balance = self.client.dispatch(spec).await?.into_data()?;
        Ok(balance.remain_point)
    }

    /// Get the partner's remaining points.
    pub async fn get_partner_balance(&self, corp_num: &str) -> Result<f64> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(self.service, "/PartnerPoint")
            .on_auth_host()
            .corp_num(corp_num);
        let balance: Balance = self.client.dispatch(spec).await?.into_data()?;
        Ok(balance.remain_point)
    }

    /// Get a partner popup URL, e.g. `togo = "CHRG"` for the charge page.
    pub async fn get_partner_url(&self, corp_num: &str, togo: &str) -> Result<String> {
        require(corp_num, "Business number")?;
        require(togo, "Popup type")?;
        let spec = RequestSpec::get(self.service, "/URL")
            .on_auth_host()
            .corp_num(corp_num)
            .query("TG", togo);
        self.client.dispatch(spec).await?.field("url")
    }

    /// Get the point charge popup URL (valid for 30 seconds).
    pub async fn get_charge_url(&self, corp_num: &str, user_id: Option<&str>) -> Result<String> {
        self.member_url(corp_num, "CHRG", user_id).await
    }

    /// Get the payment history popup URL.
    pub async fn get_payment_url(&self, corp_num: &str, user_id: Option<&str>) -> Result<String> {
        self.member_url(corp_num, "PAYMENT", user_id).await
    }

    /// Get the usage history popup URL.
    pub async fn get_use_history_url(
        &self,
        corp_num: &str,
        user_id: Option<&str>,
    ) -> Result<String> {
        self.member_url(corp_num, "USEHISTORY", user_id).await
    }

    async fn member_url(&self, corp_num: &str, togo: &str, user_id: Option<&str>) -> Result<String> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(self.service, "/Member")
            .corp_num(corp_num)
            .user_id(user_id)
            .query("TG", togo);
        self.client.dispatch(spec).await?.field("url")
    }

    /// Request a bank transfer point purchase.
    pub async fn payment_request(
        &self,
        corp_num: &str,
        form: &PaymentForm,
        user_id: Option<&str>,
    ) -> Result<PaymentResponse> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::post(self.service, "/Payment")
            .corp_num(corp_num)
            .user_id(user_id)
            .json(form)?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// Get the state of a payment request.
    pub async fn get_settle_result(
        &self,
        corp_num: &str,
        settle_code: &str,
        user_id: Option<&str>,
    ) -> Result<PaymentHistory> {
        require(corp_num, "Business number")?;
        require(settle_code, "Settle code")?;
        let spec = RequestSpec::get(self.service, format!("/Payment/{settle_code}"))
            .corp_num(corp_num)
            .user_id(user_id);
        self.client.dispatch(spec).await?.into_data()
    }

    /// List point purchases between two dates (`yyyyMMdd`).
    pub async fn get_payment_history(
        &self,
        corp_num: &str,
        s_date: &str,
        e_date: &str,
        page: Option<u32>,
        per_page: Option<u32>,
        user_id: Option<&str>,
    ) -> Result<PaymentHistoryResult> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(self.service, "/PaymentHistory")
            .corp_num(corp_num)
            .user_id(user_id)
            .query("SDate", s_date)
            .query("EDate", e_date)
            .query_some("Page", page)
            .query_some("PerPage", per_page);
        self.client.dispatch(spec).await?.into_data()
    }

    /// List point deductions between two dates (`yyyyMMdd`).
    ///
    /// `order` is `"D"` (newest first) or `"A"`.
    #[allow(clippy::too_many_arguments)]
    pub async fn get_use_history(
        &self,
        corp_num: &str,
        s_date: &str,
        e_date: &str,
        page: Option<u32>,
        per_page: Option<u32>,
        order: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<UseHistoryResult> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(self.service, "/UseHistory")
            .corp_num(corp_num)
            .user_id(user_id)
            .query("SDate", s_date)
            .query("EDate", e_date)
            .query_some("Page", page)
            .query_some("PerPage", per_page)
            .query_opt("Order", order);
        self.client.dispatch(spec).await?.into_data()
    }

    /// Request a refund of unused points.
    pub async fn refund(
        &self,
        corp_num: &str,
        form: &RefundForm,
        user_id: Option<&str>,
    ) -> Result<RefundResponse> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::post(self.service, "/Refund")
            .corp_num(corp_num)
            .user_id(user_id)
            .json(form)?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// List refund requests.
    pub async fn get_refund_history(
        &self,
        corp_num: &str,
        page: Option<u32>,
        per_page: Option<u32>,
        user_id: Option<&str>,
    ) -> Result<RefundHistoryResult> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(self.service, "/RefundHistory")
            .corp_num(corp_num)
            .user_id(user_id)
            .query_some("Page", page)
            .query_some("PerPage", per_page);
        self.client.dispatch(spec).await?.into_data()
    }

    /// Get the state of a refund request.
    pub async fn get_refund_info(
        &self,
        corp_num: &str,
        refund_code: &str,
        user_id: Option<&str>,
    ) -> Result<RefundHistory> {
        require(corp_num, "Business number")?;
        require(refund_code, "Refund code")?;
        let spec = RequestSpec::get(self.service, format!("/Refund/{refund_code}"))
            .corp_num(corp_num)
            .user_id(user_id);
        self.client.dispatch(spec).await?.into_data()
    }

    /// Get the points that can still be refunded.
    pub async fn get_refundable_balance(
        &self,
        corp_num: &str,
        user_id: Option<&str>,
    ) -> Result<f64> {
        #[derive(Deserialize)]
        struct Refundable {
            #[serde(rename = "refundableBalance", deserialize_with = "lenient::f64")]
            refundable_balance: f64,
        }

        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(self.service, "/RefundPoint")
            .corp_num(corp_num)
            .user_id(user_id);
        let refundable: Refundable = self.client.dispatch(spec).await?.into_data()?;
        Ok(refundable.refundable_balance)
    }
}
