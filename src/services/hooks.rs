//! Repository webhook operations.
//!
//! Delivery payload signatures are handled separately by
//! [`WebhookVerifier`](crate::webhooks::WebhookVerifier).

use crate::client::ForgeClient;
use crate::errors::ForgeResult;
use crate::pagination::{Page, PageRequest};
use crate::types::Hook;
use serde::Serialize;

/// Service for repository webhook operations.
pub struct HooksService<'a> {
    client: &'a ForgeClient,
}

impl<'a> HooksService<'a> {
    /// Creates a new hooks service.
    pub fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// Lists all webhooks in a repository.
    pub async fn list(&self, owner: &str, repo: &str) -> ForgeResult<Vec<Hook>> {
        self.client
            .get_all(&format!("/repos/{}/{}/hooks", owner, repo))
            .await
    }

    /// Lists a page window of webhooks in a repository.
    pub async fn list_page(
        &self,
        owner: &str,
        repo: &str,
        page: &PageRequest,
    ) -> ForgeResult<Page<Hook>> {
        self.client
            .get_page(&format!("/repos/{}/{}/hooks", owner, repo), page)
            .await
    }

    /// Gets a webhook.
    pub async fn get(&self, owner: &str, repo: &str, hook_id: u64) -> ForgeResult<Hook> {
        self.client
            .get(&format!("/repos/{}/{}/hooks/{}", owner, repo, hook_id))
            .await
    }

    /// Creates a webhook.
    pub async fn create(
        &self,
        owner: &str,
        repo: &str,
        request: &CreateHookRequest,
    ) -> ForgeResult<Hook> {
        self.client
            .post(&format!("/repos/{}/{}/hooks", owner, repo), request)
            .await
    }

    /// Updates a webhook.
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        hook_id: u64,
        request: &UpdateHookRequest,
    ) -> ForgeResult<Hook> {
        self.client
            .patch(
                &format!("/repos/{}/{}/hooks/{}", owner, repo, hook_id),
                request,
            )
            .await
    }

    /// Deletes a webhook.
    pub async fn delete(&self, owner: &str, repo: &str, hook_id: u64) -> ForgeResult<()> {
        self.client
            .delete(&format!("/repos/{}/{}/hooks/{}", owner, repo, hook_id))
            .await
    }

    /// Sends a ping event to a webhook.
    pub async fn ping(&self, owner: &str, repo: &str, hook_id: u64) -> ForgeResult<()> {
        self.client
            .post_no_response(
                &format!("/repos/{}/{}/hooks/{}/pings", owner, repo, hook_id),
                &(),
            )
            .await
    }

    /// Triggers a test push event for a webhook.
    pub async fn test_push(&self, owner: &str, repo: &str, hook_id: u64) -> ForgeResult<()> {
        self.client
            .post_no_response(
                &format!("/repos/{}/{}/hooks/{}/tests", owner, repo, hook_id),
                &(),
            )
            .await
    }
}

/// Delivery configuration for creating or updating a webhook.
#[derive(Debug, Clone, Serialize)]
pub struct HookConfigParams {
    /// Delivery URL.
    pub url: String,
    /// Content type (json or form).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Shared secret used to sign delivery payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Whether to allow insecure SSL ("0" or "1").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure_ssl: Option<String>,
}

impl HookConfigParams {
    /// Creates a JSON delivery config for a URL.
    pub fn json(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content_type: Some("json".to_string()),
            secret: None,
            insecure_ssl: None,
        }
    }

    /// Sets the shared signing secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// Request to create a webhook.
#[derive(Debug, Clone, Serialize)]
pub struct CreateHookRequest {
    /// Hook name; the only accepted value is "web".
    pub name: String,
    /// Delivery configuration.
    pub config: HookConfigParams,
    /// Events that trigger deliveries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    /// Whether the hook starts active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl CreateHookRequest {
    /// Creates a webhook request for a delivery config.
    pub fn web(config: HookConfigParams) -> Self {
        Self {
            name: "web".to_string(),
            config,
            events: None,
            active: None,
        }
    }
}

/// Request to update a webhook.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateHookRequest {
    /// Delivery configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<HookConfigParams>,
    /// Replacement event list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    /// Events to add to the current list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_events: Option<Vec<String>>,
    /// Events to remove from the current list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_events: Option<Vec<String>>,
    /// Whether the hook is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
