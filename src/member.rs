//! Member and contact management.

use crate::auth::Service;
use crate::client::{Client, require};
use crate::dispatch::RequestSpec;
use crate::error::Result;
use crate::types::{ContactInfo, CorpInfo, JoinForm, Response};
use serde::Serialize;

/// Client for member registration, company info and contacts.
///
/// Access via `client.cashbill().member()` or `client.easyfinbank().member()`.
#[derive(Clone)]
pub struct MemberClient {
    client: Client,
    service: Service,
}

impl MemberClient {
    pub(crate) fn new(client: Client, service: Service) -> Self {
        Self { client, service }
    }

    /// Check whether a business is registered under this partner.
    ///
    /// Sent without a session token. A `code` of 1 means registered.
    pub async fn check_is_member(&self, corp_num: &str) -> Result<Response> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(self.service, "/Join")
            .query("CorpNum", corp_num)
            .query("LID", self.client.link_id());
        self.client.dispatch(spec).await?.into_data()
    }

    /// Check whether a login id is already taken.
    pub async fn check_id(&self, id: &str) -> Result<Response> {
        require(id, "Login id")?;
        let spec = RequestSpec::get(self.service, "/IDCheck").query("ID", id);
        self.client.dispatch(spec).await?.into_data()
    }

    /// Register a new member under this partner.
    ///
    /// An empty `link_id` in the form is filled with the client's link id.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use popbill::{Client, types::JoinForm};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::from_env()?;
    ///
    ///     let response = client.cashbill().member().join_member(JoinForm {
    ///         corp_num: "1234567890".to_string(),
    ///         ceo_name: "Hong Gildong".to_string(),
    ///         corp_name: "Example Co.".to_string(),
    ///         id: "example01".to_string(),
    ///         pwd: "change-me-123!".to_string(),
    ///         ..Default::default()
    ///     }).await?;
    ///     println!("joined: {}", response.message);
    ///     Ok(())
    /// }
    /// ```
    pub async fn join_member(&self, mut form: JoinForm) -> Result<Response> {
        require(&form.corp_num, "Business number")?;
        if form.link_id.is_empty() {
            form.link_id = self.client.link_id().to_string();
        }
        let spec = RequestSpec::post(self.service, "/Join").json(&form)?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// Leave Popbill.
    pub async fn quit_member(
        &self,
        corp_num: &str,
        quit_reason: &str,
        user_id: Option<&str>,
    ) -> Result<Response> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct QuitRequest<'a> {
            quit_reason: &'a str,
        }

        require(corp_num, "Business number")?;
        let spec = RequestSpec::post(self.service, "/QuitRequest")
            .corp_num(corp_num)
            .user_id(user_id)
            .json(&QuitRequest { quit_reason })?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// Get company information.
    pub async fn get_corp_info(&self, corp_num: &str, user_id: Option<&str>) -> Result<CorpInfo> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(self.service, "/CorpInfo")
            .corp_num(corp_num)
            .user_id(user_id);
        self.client.dispatch(spec).await?.into_data()
    }

    /// Update company information.
    pub async fn update_corp_info(
        &self,
        corp_num: &str,
        corp_info: &CorpInfo,
        user_id: Option<&str>,
    ) -> Result<Response> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::post(self.service, "/CorpInfo")
            .corp_num(corp_num)
            .user_id(user_id)
            .json(corp_info)?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// Add a user account.
    pub async fn regist_contact(
        &self,
        corp_num: &str,
        contact: &ContactInfo,
        user_id: Option<&str>,
    ) -> Result<Response> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::post(self.service, "/IDs/New")
            .corp_num(corp_num)
            .user_id(user_id)
            .json(contact)?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// Get a user account by login id.
    pub async fn get_contact_info(
        &self,
        corp_num: &str,
        contact_id: &str,
        user_id: Option<&str>,
    ) -> Result<ContactInfo> {
        #[derive(Serialize)]
        struct ContactQuery<'a> {
            id: &'a str,
        }

        require(corp_num, "Business number")?;
        require(contact_id, "Contact id")?;
        let spec = RequestSpec::post(self.service, "/Contact")
            .corp_num(corp_num)
            .user_id(user_id)
            .json(&ContactQuery { id: contact_id })?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// List user accounts.
    pub async fn list_contact(
        &self,
        corp_num: &str,
        user_id: Option<&str>,
    ) -> Result<Vec<ContactInfo>> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(self.service, "/IDs")
            .corp_num(corp_num)
            .user_id(user_id);
        self.client.dispatch(spec).await?.into_data()
    }

    /// Update a user account.
    pub async fn update_contact(
        &self,
        corp_num: &str,
        contact: &ContactInfo,
        user_id: Option<&str>,
    ) -> Result<Response> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::post(self.service, "/IDs")
            .corp_num(corp_num)
            .user_id(user_id)
            .json(contact)?;
        self.client.dispatch(spec).await?.into_data()
    }

    /// Delete a user account.
    ///
    /// `user_id` must be an administrator of the member.
    pub async fn delete_contact(
        &self,
        corp_num: &str,
        target_user_id: &str,
        user_id: &str,
    ) -> Result<Response> {
        require(corp_num, "Business number")?;
        require(target_user_id, "Contact id")?;
        require(user_id, "User id")?;
        let spec = RequestSpec::post(self.service, "/Contact/Delete")
            .corp_num(corp_num)
            .user_id(Some(user_id))
            .query("ContactID", target_user_id);
        self.client.dispatch(spec).await?.into_data()
    }

    /// Get the Popbill login popup URL (valid for 30 seconds).
    pub async fn get_access_url(&self, corp_num: &str, user_id: Option<&str>) -> Result<String> {
        require(corp_num, "Business number")?;
        let spec = RequestSpec::get(self.service, "/Member")
            .corp_num(corp_num)
            .user_id(user_id)
            .query("TG", "LOGIN");
        self.client.dispatch(spec).await?.field("url")
    }
}
