//! Starring and watching operations.

use super::repositories::SortDirection;
use crate::client::ForgeClient;
use crate::errors::ForgeResult;
use crate::pagination::{Page, PageRequest};
use crate::types::{Repository, Subscription, User};
use serde::Serialize;

/// Service for starring and watching operations.
pub struct ActivityService<'a> {
    client: &'a ForgeClient,
}

impl<'a> ActivityService<'a> {
    /// Creates a new activity service.
    pub fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    // Starring

    /// Lists all users who starred a repository.
    pub async fn list_stargazers(&self, owner: &str, repo: &str) -> ForgeResult<Vec<User>> {
        self.client
            .get_all(&format!("/repos/{}/{}/stargazers", owner, repo))
            .await
    }

    /// Lists a page window of users who starred a repository.
    pub async fn list_stargazers_page(
        &self,
        owner: &str,
        repo: &str,
        page: &PageRequest,
    ) -> ForgeResult<Page<User>> {
        self.client
            .get_page(&format!("/repos/{}/{}/stargazers", owner, repo), page)
            .await
    }

    /// Lists all repositories starred by the authenticated user.
    pub async fn list_starred(&self, filter: &ListStarredFilter) -> ForgeResult<Vec<Repository>> {
        self.client
            .get_all_with_params("/user/starred", filter)
            .await
    }

    /// Lists a page window of repositories starred by the authenticated user.
    pub async fn list_starred_page(
        &self,
        filter: &ListStarredFilter,
        page: &PageRequest,
    ) -> ForgeResult<Page<Repository>> {
        self.client
            .get_page_with_params("/user/starred", filter, page)
            .await
    }

    /// Checks whether the authenticated user starred a repository.
    pub async fn is_starred(&self, owner: &str, repo: &str) -> ForgeResult<bool> {
        let response = self
            .client
            .raw_request(
                reqwest::Method::GET,
                &format!("/user/starred/{}/{}", owner, repo),
                Option::<&()>::None,
            )
            .await;

        match response {
            Ok(_) => Ok(true),
            Err(e) if e.status_code() == Some(404) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Stars a repository.
    pub async fn star(&self, owner: &str, repo: &str) -> ForgeResult<()> {
        self.client
            .put_no_response(&format!("/user/starred/{}/{}", owner, repo), &())
            .await
    }

    /// Unstars a repository.
    pub async fn unstar(&self, owner: &str, repo: &str) -> ForgeResult<()> {
        self.client
            .delete(&format!("/user/starred/{}/{}", owner, repo))
            .await
    }

    // Watching

    /// Lists all users watching a repository.
    pub async fn list_watchers(&self, owner: &str, repo: &str) -> ForgeResult<Vec<User>> {
        self.client
            .get_all(&format!("/repos/{}/{}/subscribers", owner, repo))
            .await
    }

    /// Lists a page window of users watching a repository.
    pub async fn list_watchers_page(
        &self,
        owner: &str,
        repo: &str,
        page: &PageRequest,
    ) -> ForgeResult<Page<User>> {
        self.client
            .get_page(&format!("/repos/{}/{}/subscribers", owner, repo), page)
            .await
    }

    /// Lists all repositories the authenticated user watches.
    pub async fn list_watched(&self) -> ForgeResult<Vec<Repository>> {
        self.client.get_all("/user/subscriptions").await
    }

    /// Lists a page window of repositories the authenticated user watches.
    pub async fn list_watched_page(&self, page: &PageRequest) -> ForgeResult<Page<Repository>> {
        self.client.get_page("/user/subscriptions", page).await
    }

    /// Gets the authenticated user's subscription to a repository.
    ///
    /// Fails with `NotFound` when the user is not subscribed.
    pub async fn get_subscription(&self, owner: &str, repo: &str) -> ForgeResult<Subscription> {
        self.client
            .get(&format!("/repos/{}/{}/subscription", owner, repo))
            .await
    }

    /// Sets the authenticated user's subscription to a repository.
    pub async fn set_subscription(
        &self,
        owner: &str,
        repo: &str,
        subscribed: bool,
        ignored: bool,
    ) -> ForgeResult<Subscription> {
        let request = SetSubscriptionRequest {
            subscribed,
            ignored,
        };
        self.client
            .put(&format!("/repos/{}/{}/subscription", owner, repo), &request)
            .await
    }

    /// Deletes the authenticated user's subscription to a repository.
    pub async fn delete_subscription(&self, owner: &str, repo: &str) -> ForgeResult<()> {
        self.client
            .delete(&format!("/repos/{}/{}/subscription", owner, repo))
            .await
    }
}

/// Filter for listing starred repositories.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListStarredFilter {
    /// Sort field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<StarSort>,
    /// Sort direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
}

/// Starred repository sort field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StarSort {
    Created,
    Updated,
}

#[derive(Debug, Clone, Serialize)]
struct SetSubscriptionRequest {
    subscribed: bool,
    ignored: bool,
}
