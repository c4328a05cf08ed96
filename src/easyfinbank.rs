//! Bank transaction collection.
//!
//! Accounts are registered once; transactions are then collected by
//! requesting a job for a date range, polling its state, and reading the
//! results with [`EasyFinBankClient::search`] and [`EasyFinBankClient::summary`].

use crate::auth::Service;
use crate::client::{Client, require};
use crate::dispatch::RequestSpec;
use crate::error::{PopbillError, Result};
use crate::member::MemberClient;
use crate::point::PointClient;
use crate::types::{
    BankAccount, BankAccountForm, BankSearch, BankSearchResult, BankSummary, ChargeInfo,
    FlatRateState, JobState, Response, UpdateBankAccountForm,
};
use serde::Serialize;

const SERVICE: Service = Service::EasyFinBank;

const JOB_ID_LEN: usize = 18;

/// Client for bank transaction collection.
///
/// Access via `client.easyfinbank()`.
#[derive(Clone)]
pub struct EasyFinBankClient {
    client: Client,
}

fn require_account(bank_code: &str, account_number: &str) -> Result<()> {
    require(bank_code, "Bank code")?;
    require(account_number, "Account number")
}

fn require_job_id(job_id: &str) -> Result<()> {
    if job_id.chars().count() != JOB_ID_LEN {
        return Err(PopbillError::invalid("Job id must be 18 characters"));
    }
    Ok(())
}

impl EasyFinBankClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Point operations authorized with the bank collection scope.
    pub fn point(&self) -> PointClient {
        PointClient::new(self.client.clone(), SERVICE)
    }

    /// Member operations authorized with the bank collection scope.
    pub fn member(&self) -> MemberClient {
        MemberClient::new(self.client.clone(), SERVICE)
    }

    /// Register a bank account for collection.
    pub async fn regist_bank_account(
        &self,
        corp_num: &str,
        form: &BankAccountForm,
        user_id: Option<&str>,
    ) -> Result<Response> {
        require(corp_num, "Business number")?;
        require_account(&form.bank_code, &form.account_number)?;
        let spec = RequestSpec::post(SERVICE, "/EasyFin/Bank/BankAccount/Regist")
            .corp_num(corp_num)
            .user_id(user_id)
            .query_some("UsePeriod", form.use_period)
            .json(form)?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// Update the credentials or alias of a registered account.
    pub async fn update_bank_account(
        &self,
        corp_num: &str,
        bank_code: &str,
        account_number: &str,
        form: &UpdateBankAccountForm,
        user_id: Option<&str>,
    ) -> Result<Response> {
        require(corp_num, "Business number")?;
        require_account(bank_code, account_number)?;
        let path = format!("/EasyFin/Bank/BankAccount/{bank_code}/{account_number}/Update");
        let spec = RequestSpec::post(SERVICE, path)
            .corp_num(corp_num)
            .user_id(user_id)
            .json(form)?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// Get a registered account.
    pub async fn get_bank_account_info(
        &self,
        corp_num: &str,
        bank_code: &str,
        account_number: &str,
        user_id: Option<&str>,
    ) -> Result<BankAccount> {
        require(corp_num, "Business number")?;
        require_account(bank_code, account_number)?;
        let path = format!("/EasyFin/Bank/BankAccount/{bank_code}/{account_number}");
        let spec = RequestSpec::get(SERVICE, path)
            .corp_num(corp_num)
            .user_id(user_id);
        self.client.dispatch(spec).await?.into_data()
    }

    /// List registered accounts.
    pub async fn list_bank_account(
        &self,
        corp_num: &str,
        user_id: Option<&str>,
    ) -> Result<Vec<BankAccount>> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(SERVICE, "/EasyFin/Bank/ListBankAccount")
            .corp_num(corp_num)
            .user_id(user_id);
        self.client.dispatch(spec).await?.into_data()
    }

    /// Get the account management popup URL.
    pub async fn get_bank_account_mgt_url(
        &self,
        corp_num: &str,
        user_id: Option<&str>,
    ) -> Result<String> {
        self.popup_url(corp_num, "BankAccount", user_id).await
    }

    /// Request closure of an account's flat-rate contract.
    ///
    /// `close_type` is `"일반"` (at expiry) or `"중도"` (immediately).
    pub async fn close_bank_account(
        &self,
        corp_num: &str,
        bank_code: &str,
        account_number: &str,
        close_type: &str,
        user_id: Option<&str>,
    ) -> Result<Response> {
        require(corp_num, "Business number")?;
        require_account(bank_code, account_number)?;
        require(close_type, "Close type")?;
        let spec = RequestSpec::post(SERVICE, "/EasyFin/Bank/BankAccount/Close")
            .corp_num(corp_num)
            .user_id(user_id)
            .query("BankCode", bank_code)
            .query("AccountNumber", account_number)
            .query("CloseType", close_type);
        self.client.dispatch(spec).await?.into_data()
    }

    /// Withdraw a pending closure request.
    pub async fn revoke_close_bank_account(
        &self,
        corp_num: &str,
        bank_code: &str,
        account_number: &str,
        user_id: Option<&str>,
    ) -> Result<Response> {
        require(corp_num, "Business number")?;
        require_account(bank_code, account_number)?;
        let spec = RequestSpec::post(SERVICE, "/EasyFin/Bank/BankAccount/RevokeClose")
            .corp_num(corp_num)
            .user_id(user_id)
            .query("BankCode", bank_code)
            .query("AccountNumber", account_number);
        self.client.dispatch(spec).await?.into_data()
    }

    /// Delete an account that has no active contract.
    pub async fn delete_bank_account(
        &self,
        corp_num: &str,
        bank_code: &str,
        account_number: &str,
        user_id: Option<&str>,
    ) -> Result<Response> {
        #[derive(Serialize)]
        struct DeleteRequest<'a> {
            #[serde(rename = "BankCode")]
            bank_code: &'a str,
            #[serde(rename = "AccountNumber")]
            account_number: &'a str,
        }

        require(corp_num, "Business number")?;
        require_account(bank_code, account_number)?;
        let spec = RequestSpec::post(SERVICE, "/EasyFin/Bank/BankAccount/Delete")
            .corp_num(corp_num)
            .user_id(user_id)
            .json(&DeleteRequest {
                bank_code,
                account_number,
            })?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// Get how the member is charged for bank collection.
    pub async fn get_charge_info(
        &self,
        corp_num: &str,
        user_id: Option<&str>,
    ) -> Result<ChargeInfo> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(SERVICE, "/EasyFin/Bank/ChargeInfo")
            .corp_num(corp_num)
            .user_id(user_id);
        self.client.dispatch(spec).await?.into_data()
    }

    /// Start collecting an account's transactions between two dates
    /// (`yyyyMMdd`). Returns the job id.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use popbill::Client;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::from_env()?;
    ///     let bank = client.easyfinbank();
    ///
    ///     let job_id = bank
    ///         .request_job("1234567890", "0004", "12345678901234", "20250101", "20250131", None)
    ///         .await?;
    ///     let state = bank.get_job_state("1234567890", &job_id, None).await?;
    ///     println!("job {} is in state {}", job_id, state.job_state);
    ///     Ok(())
    /// }
    /// ```
    pub async fn request_job(
        &self,
        corp_num: &str,
        bank_code: &str,
        account_number: &str,
        s_date: &str,
        e_date: &str,
        user_id: Option<&str>,
    ) -> Result<String> {
        require(corp_num, "Business number")?;
        require_account(bank_code, account_number)?;
        require(s_date, "Start date")?;
        require(e_date, "End date")?;
        let spec = RequestSpec::post(SERVICE, "/EasyFin/Bank/BankAccount")
            .corp_num(corp_num)
            .user_id(user_id)
            .query("BankCode", bank_code)
            .query("AccountNumber", account_number)
            .query("SDate", s_date)
            .query("EDate", e_date);
        self.client.dispatch(spec).await?.field("jobID")
    }

    /// Get the state of a collection job.
    pub async fn get_job_state(
        &self,
        corp_num: &str,
        job_id: &str,
        user_id: Option<&str>,
    ) -> Result<JobState> {
        require(corp_num, "Business number")?;
        require_job_id(job_id)?;
        let spec = RequestSpec::get(SERVICE, format!("/EasyFin/Bank/{job_id}/State"))
            .corp_num(corp_num)
            .user_id(user_id);
        self.client.dispatch(spec).await?.into_data()
    }

    /// List the jobs requested in the last hour.
    pub async fn list_active_job(
        &self,
        corp_num: &str,
        user_id: Option<&str>,
    ) -> Result<Vec<JobState>> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(SERVICE, "/EasyFin/Bank/JobList")
            .corp_num(corp_num)
            .user_id(user_id);
        self.client.dispatch(spec).await?.into_data()
    }

    /// Read the transactions collected by a finished job.
    pub async fn search(
        &self,
        corp_num: &str,
        job_id: &str,
        search: &BankSearch,
        user_id: Option<&str>,
    ) -> Result<BankSearchResult> {
        require(corp_num, "Business number")?;
        require_job_id(job_id)?;
        let spec = RequestSpec::get(SERVICE, format!("/EasyFin/Bank/{job_id}"))
            .corp_num(corp_num)
            .user_id(user_id)
            .query_list("TradeType", &search.trade_type)
            .query_opt("SearchString", search.search_string.as_deref())
            .query_some("Page", search.page)
            .query_some("PerPage", search.per_page)
            .query_opt("Order", search.order.as_deref());
        self.client.dispatch(spec).await?.into_data()
    }

    /// Totals over the transactions of a finished job.
    ///
    /// Paging and order in `search` are ignored.
    pub async fn summary(
        &self,
        corp_num: &str,
        job_id: &str,
        search: &BankSearch,
        user_id: Option<&str>,
    ) -> Result<BankSummary> {
        require(corp_num, "Business number")?;
        require_job_id(job_id)?;
        let spec = RequestSpec::get(SERVICE, format!("/EasyFin/Bank/{job_id}/Summary"))
            .corp_num(corp_num)
            .user_id(user_id)
            .query_list("TradeType", &search.trade_type)
            .query_opt("SearchString", search.search_string.as_deref());
        self.client.dispatch(spec).await?.into_data()
    }

    /// Attach a memo to a collected transaction.
    pub async fn save_memo(
        &self,
        corp_num: &str,
        tid: &str,
        memo: &str,
        user_id: Option<&str>,
    ) -> Result<Response> {
        require(corp_num, "Business number")?;
        require(tid, "Transaction id")?;
        let spec = RequestSpec::post(SERVICE, "/EasyFin/Bank/SaveMemo")
            .corp_num(corp_num)
            .user_id(user_id)
            .query("TID", tid)
            .query("Memo", memo);
        self.client.dispatch(spec).await?.into_data()
    }

    /// Get the flat-rate contract popup URL.
    pub async fn get_flat_rate_popup_url(
        &self,
        corp_num: &str,
        user_id: Option<&str>,
    ) -> Result<String> {
        self.popup_url(corp_num, "CHRG", user_id).await
    }

    /// Get the flat-rate contract state of an account.
    pub async fn get_flat_rate_state(
        &self,
        corp_num: &str,
        bank_code: &str,
        account_number: &str,
        user_id: Option<&str>,
    ) -> Result<FlatRateState> {
        require(corp_num, "Business number")?;
        require_account(bank_code, account_number)?;
        let path = format!("/EasyFin/Bank/Contract/{bank_code}/{account_number}");
        let spec = RequestSpec::get(SERVICE, path)
            .corp_num(corp_num)
            .user_id(user_id);
        self.client.dispatch(spec).await?.into_data()
    }

    async fn popup_url(&self, corp_num: &str, togo: &str, user_id: Option<&str>) -> Result<String> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(SERVICE, "/EasyFin/Bank")
            .corp_num(corp_num)
            .user_id(user_id)
            .query("TG", togo);
        self.client.dispatch(spec).await?.field("url")
    }
}
