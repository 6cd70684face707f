//! Organization operations.

use crate::client::ForgeClient;
use crate::errors::ForgeResult;
use crate::pagination::{Page, PageRequest};
use crate::types::{Organization, User};
use serde::Serialize;

/// Service for organization operations.
pub struct OrganizationsService<'a> {
    client: &'a ForgeClient,
}

impl<'a> OrganizationsService<'a> {
    /// Creates a new organizations service.
    pub fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// Lists all organizations for the authenticated user.
    pub async fn list_for_authenticated_user(&self) -> ForgeResult<Vec<Organization>> {
        self.client.get_all("/user/orgs").await
    }

    /// Lists a page window of organizations for the authenticated user.
    pub async fn list_for_authenticated_user_page(
        &self,
        page: &PageRequest,
    ) -> ForgeResult<Page<Organization>> {
        self.client.get_page("/user/orgs", page).await
    }

    /// Lists all public organizations for a user.
    pub async fn list_for_user(&self, username: &str) -> ForgeResult<Vec<Organization>> {
        self.client
            .get_all(&format!("/users/{}/orgs", username))
            .await
    }

    /// Lists a page window of public organizations for a user.
    pub async fn list_for_user_page(
        &self,
        username: &str,
        page: &PageRequest,
    ) -> ForgeResult<Page<Organization>> {
        self.client
            .get_page(&format!("/users/{}/orgs", username), page)
            .await
    }

    /// Gets an organization.
    pub async fn get(&self, org: &str) -> ForgeResult<Organization> {
        self.client.get(&format!("/orgs/{}", org)).await
    }

    /// Updates an organization.
    pub async fn update(
        &self,
        org: &str,
        request: &UpdateOrgRequest,
    ) -> ForgeResult<Organization> {
        self.client.patch(&format!("/orgs/{}", org), request).await
    }

    // Members

    /// Lists all members of an organization.
    pub async fn list_members(
        &self,
        org: &str,
        filter: &ListMembersFilter,
    ) -> ForgeResult<Vec<User>> {
        self.client
            .get_all_with_params(&format!("/orgs/{}/members", org), filter)
            .await
    }

    /// Lists a page window of members of an organization.
    pub async fn list_members_page(
        &self,
        org: &str,
        filter: &ListMembersFilter,
        page: &PageRequest,
    ) -> ForgeResult<Page<User>> {
        self.client
            .get_page_with_params(&format!("/orgs/{}/members", org), filter, page)
            .await
    }

    /// Checks whether a user is a member of an organization.
    pub async fn is_member(&self, org: &str, username: &str) -> ForgeResult<bool> {
        let response = self
            .client
            .raw_request(
                reqwest::Method::GET,
                &format!("/orgs/{}/members/{}", org, username),
                Option::<&()>::None,
            )
            .await;

        match response {
            Ok(_) => Ok(true),
            Err(e) if e.status_code() == Some(404) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Removes a member from an organization.
    pub async fn remove_member(&self, org: &str, username: &str) -> ForgeResult<()> {
        self.client
            .delete(&format!("/orgs/{}/members/{}", org, username))
            .await
    }
}

/// Request to update an organization.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateOrgRequest {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Blog URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    /// Location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Filter for listing organization members.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListMembersFilter {
    /// Subset filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<MemberFilter>,
    /// Role filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<MemberRole>,
}

/// Organization member subset filter.
#[derive(Debug, Clone, Serialize)]
pub enum MemberFilter {
    #[serde(rename = "2fa_disabled")]
    TwoFaDisabled,
    #[serde(rename = "all")]
    All,
}

/// Organization member role filter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    All,
    Admin,
    Member,
}
