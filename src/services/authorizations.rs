//! OAuth authorization (token management) operations.
//!
//! The forge accepts only basic authentication on these routes; a client
//! built with a token will receive 401 responses from them.

use crate::client::ForgeClient;
use crate::errors::ForgeResult;
use crate::pagination::{Page, PageRequest};
use crate::types::Authorization;
use serde::Serialize;

/// Service for OAuth authorization operations.
pub struct AuthorizationsService<'a> {
    client: &'a ForgeClient,
}

impl<'a> AuthorizationsService<'a> {
    /// Creates a new authorizations service.
    pub fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// Lists all authorizations for the authenticated user.
    pub async fn list(&self) -> ForgeResult<Vec<Authorization>> {
        self.client.get_all("/authorizations").await
    }

    /// Lists a page window of authorizations for the authenticated user.
    pub async fn list_page(&self, page: &PageRequest) -> ForgeResult<Page<Authorization>> {
        self.client.get_page("/authorizations", page).await
    }

    /// Gets an authorization.
    pub async fn get(&self, authorization_id: u64) -> ForgeResult<Authorization> {
        self.client
            .get(&format!("/authorizations/{}", authorization_id))
            .await
    }

    /// Creates an authorization.
    ///
    /// The token value appears only in this response; subsequent reads
    /// return it blanked.
    pub async fn create(&self, request: &CreateAuthorizationRequest) -> ForgeResult<Authorization> {
        self.client.post("/authorizations", request).await
    }

    /// Deletes an authorization.
    pub async fn delete(&self, authorization_id: u64) -> ForgeResult<()> {
        self.client
            .delete(&format!("/authorizations/{}", authorization_id))
            .await
    }
}

/// Request to create an authorization.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateAuthorizationRequest {
    /// Requested scopes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    /// Note identifying the token's purpose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// URL expanding on the note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_url: Option<String>,
    /// OAuth client ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// OAuth client secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    /// Fingerprint distinguishing multiple tokens for one app.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}
