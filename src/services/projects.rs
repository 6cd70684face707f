//! Project board operations.

use super::issues::StateFilter;
use crate::client::ForgeClient;
use crate::errors::ForgeResult;
use crate::pagination::{Page, PageRequest};
use crate::types::{Project, ProjectCard, ProjectColumn, ProjectState};
use serde::Serialize;

/// Service for project board operations.
pub struct ProjectsService<'a> {
    client: &'a ForgeClient,
}

impl<'a> ProjectsService<'a> {
    /// Creates a new projects service.
    pub fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// Lists all projects in a repository.
    pub async fn list_for_repo(
        &self,
        owner: &str,
        repo: &str,
        filter: &ListProjectsFilter,
    ) -> ForgeResult<Vec<Project>> {
        self.client
            .get_all_with_params(&format!("/repos/{}/{}/projects", owner, repo), filter)
            .await
    }

    /// Lists a page window of projects in a repository.
    pub async fn list_for_repo_page(
        &self,
        owner: &str,
        repo: &str,
        filter: &ListProjectsFilter,
        page: &PageRequest,
    ) -> ForgeResult<Page<Project>> {
        self.client
            .get_page_with_params(&format!("/repos/{}/{}/projects", owner, repo), filter, page)
            .await
    }

    /// Lists all projects in an organization.
    pub async fn list_for_org(
        &self,
        org: &str,
        filter: &ListProjectsFilter,
    ) -> ForgeResult<Vec<Project>> {
        self.client
            .get_all_with_params(&format!("/orgs/{}/projects", org), filter)
            .await
    }

    /// Lists a page window of projects in an organization.
    pub async fn list_for_org_page(
        &self,
        org: &str,
        filter: &ListProjectsFilter,
        page: &PageRequest,
    ) -> ForgeResult<Page<Project>> {
        self.client
            .get_page_with_params(&format!("/orgs/{}/projects", org), filter, page)
            .await
    }

    /// Gets a project.
    pub async fn get(&self, project_id: u64) -> ForgeResult<Project> {
        self.client.get(&format!("/projects/{}", project_id)).await
    }

    /// Creates a project in a repository.
    pub async fn create_for_repo(
        &self,
        owner: &str,
        repo: &str,
        request: &CreateProjectRequest,
    ) -> ForgeResult<Project> {
        self.client
            .post(&format!("/repos/{}/{}/projects", owner, repo), request)
            .await
    }

    /// Creates a project in an organization.
    pub async fn create_for_org(
        &self,
        org: &str,
        request: &CreateProjectRequest,
    ) -> ForgeResult<Project> {
        self.client
            .post(&format!("/orgs/{}/projects", org), request)
            .await
    }

    /// Updates a project.
    pub async fn update(
        &self,
        project_id: u64,
        request: &UpdateProjectRequest,
    ) -> ForgeResult<Project> {
        self.client
            .patch(&format!("/projects/{}", project_id), request)
            .await
    }

    /// Deletes a project.
    pub async fn delete(&self, project_id: u64) -> ForgeResult<()> {
        self.client
            .delete(&format!("/projects/{}", project_id))
            .await
    }

    // Columns

    /// Lists all columns in a project.
    pub async fn list_columns(&self, project_id: u64) -> ForgeResult<Vec<ProjectColumn>> {
        self.client
            .get_all(&format!("/projects/{}/columns", project_id))
            .await
    }

    /// Lists a page window of columns in a project.
    pub async fn list_columns_page(
        &self,
        project_id: u64,
        page: &PageRequest,
    ) -> ForgeResult<Page<ProjectColumn>> {
        self.client
            .get_page(&format!("/projects/{}/columns", project_id), page)
            .await
    }

    /// Gets a column.
    pub async fn get_column(&self, column_id: u64) -> ForgeResult<ProjectColumn> {
        self.client
            .get(&format!("/projects/columns/{}", column_id))
            .await
    }

    /// Creates a column.
    pub async fn create_column(&self, project_id: u64, name: &str) -> ForgeResult<ProjectColumn> {
        let request = ColumnNameRequest {
            name: name.to_string(),
        };
        self.client
            .post(&format!("/projects/{}/columns", project_id), &request)
            .await
    }

    /// Renames a column.
    pub async fn update_column(&self, column_id: u64, name: &str) -> ForgeResult<ProjectColumn> {
        let request = ColumnNameRequest {
            name: name.to_string(),
        };
        self.client
            .patch(&format!("/projects/columns/{}", column_id), &request)
            .await
    }

    /// Deletes a column.
    pub async fn delete_column(&self, column_id: u64) -> ForgeResult<()> {
        self.client
            .delete(&format!("/projects/columns/{}", column_id))
            .await
    }

    // Cards

    /// Lists all cards in a column.
    pub async fn list_cards(
        &self,
        column_id: u64,
        filter: &ListCardsFilter,
    ) -> ForgeResult<Vec<ProjectCard>> {
        self.client
            .get_all_with_params(&format!("/projects/columns/{}/cards", column_id), filter)
            .await
    }

    /// Lists a page window of cards in a column.
    pub async fn list_cards_page(
        &self,
        column_id: u64,
        filter: &ListCardsFilter,
        page: &PageRequest,
    ) -> ForgeResult<Page<ProjectCard>> {
        self.client
            .get_page_with_params(
                &format!("/projects/columns/{}/cards", column_id),
                filter,
                page,
            )
            .await
    }

    /// Gets a card.
    pub async fn get_card(&self, card_id: u64) -> ForgeResult<ProjectCard> {
        self.client
            .get(&format!("/projects/columns/cards/{}", card_id))
            .await
    }

    /// Creates a card.
    pub async fn create_card(
        &self,
        column_id: u64,
        request: &CreateCardRequest,
    ) -> ForgeResult<ProjectCard> {
        self.client
            .post(&format!("/projects/columns/{}/cards", column_id), request)
            .await
    }

    /// Updates a card.
    pub async fn update_card(
        &self,
        card_id: u64,
        request: &UpdateCardRequest,
    ) -> ForgeResult<ProjectCard> {
        self.client
            .patch(&format!("/projects/columns/cards/{}", card_id), request)
            .await
    }

    /// Deletes a card.
    pub async fn delete_card(&self, card_id: u64) -> ForgeResult<()> {
        self.client
            .delete(&format!("/projects/columns/cards/{}", card_id))
            .await
    }

    /// Moves a card within or between columns.
    ///
    /// `position` is `top`, `bottom`, or `after:<card_id>`.
    pub async fn move_card(
        &self,
        card_id: u64,
        position: &str,
        column_id: Option<u64>,
    ) -> ForgeResult<()> {
        let request = MoveCardRequest {
            position: position.to_string(),
            column_id,
        };
        self.client
            .post_no_response(
                &format!("/projects/columns/cards/{}/moves", card_id),
                &request,
            )
            .await
    }
}

/// Filter for listing projects.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListProjectsFilter {
    /// Filter by state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<StateFilter>,
}

/// Request to create a project.
#[derive(Debug, Clone, Serialize)]
pub struct CreateProjectRequest {
    /// Project name.
    pub name: String,
    /// Project body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Request to update a project.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProjectRequest {
    /// Project name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Project body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Project state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ProjectState>,
}

/// Filter for listing cards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListCardsFilter {
    /// Archive filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_state: Option<ArchivedStateFilter>,
}

/// Card archive filter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchivedStateFilter {
    All,
    Archived,
    NotArchived,
}

/// Request to create a card.
///
/// Either a note, or a content reference, never both.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCardRequest {
    /// Card note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// ID of the issue or pull request to link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<u64>,
    /// Content type (`Issue` or `PullRequest`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl CreateCardRequest {
    /// Creates a note card request.
    pub fn note(note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            content_id: None,
            content_type: None,
        }
    }

    /// Creates a request linking an issue by its ID.
    pub fn issue(content_id: u64) -> Self {
        Self {
            note: None,
            content_id: Some(content_id),
            content_type: Some("Issue".to_string()),
        }
    }
}

/// Request to update a card.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCardRequest {
    /// Card note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Whether the card is archived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
struct ColumnNameRequest {
    name: String,
}

#[derive(Debug, Clone, Serialize)]
struct MoveCardRequest {
    position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    column_id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_request_variants() {
        let note = CreateCardRequest::note("triage me");
        assert_eq!(
            serde_json::to_string(&note).unwrap(),
            r#"{"note":"triage me"}"#
        );

        let issue = CreateCardRequest::issue(42);
        assert_eq!(
            serde_json::to_string(&issue).unwrap(),
            r#"{"content_id":42,"content_type":"Issue"}"#
        );
    }

    #[test]
    fn test_cards_filter_query_shape() {
        let filter = ListCardsFilter {
            archived_state: Some(ArchivedStateFilter::NotArchived),
        };
        let query = serde_urlencoded::to_string(&filter).unwrap();
        assert_eq!(query, "archived_state=not_archived");
    }
}
