//! User operations.

use crate::client::ForgeClient;
use crate::errors::ForgeResult;
use crate::types::User;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Service for user operations.
pub struct UsersService<'a> {
    client: &'a ForgeClient,
}

impl<'a> UsersService<'a> {
    /// Creates a new users service.
    pub fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// Gets the authenticated user.
    pub async fn get_authenticated(&self) -> ForgeResult<AuthenticatedUser> {
        self.client.get("/user").await
    }

    /// Gets a user by username.
    pub async fn get(&self, username: &str) -> ForgeResult<User> {
        self.client.get(&format!("/users/{}", username)).await
    }
}

/// The authenticated user's full profile.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticatedUser {
    /// User ID.
    pub id: u64,
    /// Node ID.
    pub node_id: String,
    /// Username.
    pub login: String,
    /// Avatar URL.
    pub avatar_url: String,
    /// Name.
    pub name: Option<String>,
    /// Company.
    pub company: Option<String>,
    /// Blog URL.
    pub blog: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Bio.
    pub bio: Option<String>,
    /// Public repos count.
    pub public_repos: u32,
    /// Followers count.
    pub followers: u32,
    /// Following count.
    pub following: u32,
    /// HTML URL.
    pub html_url: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Total private repos (requires a scope that can see them).
    pub total_private_repos: Option<u32>,
    /// Owned private repos.
    pub owned_private_repos: Option<u32>,
    /// Collaborator count.
    pub collaborators: Option<u32>,
    /// Two-factor authentication enabled.
    pub two_factor_authentication: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_user_deserialize() {
        let json = r#"{
            "id": 1,
            "node_id": "MDQ6VXNlcjE=",
            "login": "octocat",
            "avatar_url": "https://forge.example/images/octocat.gif",
            "name": "The Octocat",
            "company": null,
            "blog": null,
            "location": "San Francisco",
            "email": "octocat@forge.example",
            "bio": null,
            "public_repos": 2,
            "followers": 20,
            "following": 0,
            "html_url": "https://forge.example/octocat",
            "created_at": "2008-01-14T04:33:35Z",
            "updated_at": "2008-01-14T04:33:35Z"
        }"#;

        let user: AuthenticatedUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(user.email.as_deref(), Some("octocat@forge.example"));
        assert!(user.total_private_repos.is_none());
    }
}
