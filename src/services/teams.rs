//! Team operations.

use crate::client::ForgeClient;
use crate::errors::ForgeResult;
use crate::pagination::{Page, PageRequest};
use crate::types::{Repository, Team, TeamPrivacy, User};
use serde::{Deserialize, Serialize};

/// Service for team operations.
pub struct TeamsService<'a> {
    client: &'a ForgeClient,
}

impl<'a> TeamsService<'a> {
    /// Creates a new teams service.
    pub fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// Lists all teams in an organization.
    pub async fn list(&self, org: &str) -> ForgeResult<Vec<Team>> {
        self.client.get_all(&format!("/orgs/{}/teams", org)).await
    }

    /// Lists a page window of teams in an organization.
    pub async fn list_page(&self, org: &str, page: &PageRequest) -> ForgeResult<Page<Team>> {
        self.client
            .get_page(&format!("/orgs/{}/teams", org), page)
            .await
    }

    /// Gets a team by slug.
    pub async fn get(&self, org: &str, team_slug: &str) -> ForgeResult<Team> {
        self.client
            .get(&format!("/orgs/{}/teams/{}", org, team_slug))
            .await
    }

    /// Creates a team.
    pub async fn create(&self, org: &str, request: &CreateTeamRequest) -> ForgeResult<Team> {
        self.client
            .post(&format!("/orgs/{}/teams", org), request)
            .await
    }

    /// Updates a team.
    pub async fn update(
        &self,
        org: &str,
        team_slug: &str,
        request: &UpdateTeamRequest,
    ) -> ForgeResult<Team> {
        self.client
            .patch(&format!("/orgs/{}/teams/{}", org, team_slug), request)
            .await
    }

    /// Deletes a team.
    pub async fn delete(&self, org: &str, team_slug: &str) -> ForgeResult<()> {
        self.client
            .delete(&format!("/orgs/{}/teams/{}", org, team_slug))
            .await
    }

    // Members

    /// Lists all members of a team.
    pub async fn list_members(
        &self,
        org: &str,
        team_slug: &str,
        filter: &ListTeamMembersFilter,
    ) -> ForgeResult<Vec<User>> {
        self.client
            .get_all_with_params(&format!("/orgs/{}/teams/{}/members", org, team_slug), filter)
            .await
    }

    /// Lists a page window of members of a team.
    pub async fn list_members_page(
        &self,
        org: &str,
        team_slug: &str,
        filter: &ListTeamMembersFilter,
        page: &PageRequest,
    ) -> ForgeResult<Page<User>> {
        self.client
            .get_page_with_params(
                &format!("/orgs/{}/teams/{}/members", org, team_slug),
                filter,
                page,
            )
            .await
    }

    /// Gets a user's membership in a team.
    pub async fn get_membership(
        &self,
        org: &str,
        team_slug: &str,
        username: &str,
    ) -> ForgeResult<TeamMembership> {
        self.client
            .get(&format!(
                "/orgs/{}/teams/{}/memberships/{}",
                org, team_slug, username
            ))
            .await
    }

    /// Adds or updates a user's membership in a team.
    pub async fn add_membership(
        &self,
        org: &str,
        team_slug: &str,
        username: &str,
        role: Option<TeamRole>,
    ) -> ForgeResult<TeamMembership> {
        let request = AddTeamMembershipRequest { role };
        self.client
            .put(
                &format!("/orgs/{}/teams/{}/memberships/{}", org, team_slug, username),
                &request,
            )
            .await
    }

    /// Removes a user from a team.
    pub async fn remove_membership(
        &self,
        org: &str,
        team_slug: &str,
        username: &str,
    ) -> ForgeResult<()> {
        self.client
            .delete(&format!(
                "/orgs/{}/teams/{}/memberships/{}",
                org, team_slug, username
            ))
            .await
    }

    // Repositories

    /// Lists all repositories a team has access to.
    pub async fn list_repositories(
        &self,
        org: &str,
        team_slug: &str,
    ) -> ForgeResult<Vec<Repository>> {
        self.client
            .get_all(&format!("/orgs/{}/teams/{}/repos", org, team_slug))
            .await
    }

    /// Lists a page window of repositories a team has access to.
    pub async fn list_repositories_page(
        &self,
        org: &str,
        team_slug: &str,
        page: &PageRequest,
    ) -> ForgeResult<Page<Repository>> {
        self.client
            .get_page(&format!("/orgs/{}/teams/{}/repos", org, team_slug), page)
            .await
    }

    /// Grants a team access to a repository.
    pub async fn add_repository(
        &self,
        org: &str,
        team_slug: &str,
        owner: &str,
        repo: &str,
        permission: Option<TeamRepoPermission>,
    ) -> ForgeResult<()> {
        let request = AddTeamRepoRequest { permission };
        self.client
            .put_no_response(
                &format!("/orgs/{}/teams/{}/repos/{}/{}", org, team_slug, owner, repo),
                &request,
            )
            .await
    }

    /// Revokes a team's access to a repository.
    pub async fn remove_repository(
        &self,
        org: &str,
        team_slug: &str,
        owner: &str,
        repo: &str,
    ) -> ForgeResult<()> {
        self.client
            .delete(&format!(
                "/orgs/{}/teams/{}/repos/{}/{}",
                org, team_slug, owner, repo
            ))
            .await
    }
}

/// Request to create a team.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTeamRequest {
    /// Team name.
    pub name: String,
    /// Team description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Privacy level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy: Option<TeamPrivacy>,
    /// Logins of initial maintainers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainers: Option<Vec<String>>,
    /// Full names (`org/repo`) of repositories to grant access to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_names: Option<Vec<String>>,
    /// Parent team ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_team_id: Option<u64>,
}

impl CreateTeamRequest {
    /// Creates a name-only request.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            privacy: None,
            maintainers: None,
            repo_names: None,
            parent_team_id: None,
        }
    }
}

/// Request to update a team.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTeamRequest {
    /// Team name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Team description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Privacy level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy: Option<TeamPrivacy>,
}

/// Filter for listing team members.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListTeamMembersFilter {
    /// Role filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<TeamRoleFilter>,
}

/// Team member role filter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamRoleFilter {
    Member,
    Maintainer,
    All,
}

/// Team membership role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    /// Regular member.
    Member,
    /// Team maintainer.
    Maintainer,
}

/// Team membership state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TeamMembershipState {
    /// Membership is active.
    Active,
    /// Invitation has not been accepted yet.
    Pending,
}

/// A user's membership in a team.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamMembership {
    /// Membership URL.
    pub url: String,
    /// Membership role.
    pub role: TeamRole,
    /// Membership state.
    pub state: TeamMembershipState,
}

/// Permission granted to a team on a repository.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamRepoPermission {
    Pull,
    Triage,
    Push,
    Maintain,
    Admin,
}

#[derive(Debug, Clone, Serialize)]
struct AddTeamMembershipRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<TeamRole>,
}

#[derive(Debug, Clone, Serialize)]
struct AddTeamRepoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    permission: Option<TeamRepoPermission>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_deserialize() {
        let json = r#"{
            "url": "https://api.forge.test/orgs/acme/teams/core/memberships/octocat",
            "role": "maintainer",
            "state": "pending"
        }"#;

        let membership: TeamMembership = serde_json::from_str(json).unwrap();
        assert_eq!(membership.role, TeamRole::Maintainer);
        assert_eq!(membership.state, TeamMembershipState::Pending);
    }

    #[test]
    fn test_add_repo_request_permission() {
        let request = AddTeamRepoRequest {
            permission: Some(TeamRepoPermission::Push),
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"permission":"push"}"#
        );
    }
}
