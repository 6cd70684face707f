//! Milestone operations.

use super::issues::StateFilter;
use super::repositories::SortDirection;
use crate::client::ForgeClient;
use crate::errors::ForgeResult;
use crate::pagination::{Page, PageRequest};
use crate::types::{Milestone, MilestoneState};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Service for milestone operations.
pub struct MilestonesService<'a> {
    client: &'a ForgeClient,
}

impl<'a> MilestonesService<'a> {
    /// Creates a new milestones service.
    pub fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// Lists all milestones in a repository.
    pub async fn list(
        &self,
        owner: &str,
        repo: &str,
        filter: &ListMilestonesFilter,
    ) -> ForgeResult<Vec<Milestone>> {
        self.client
            .get_all_with_params(&format!("/repos/{}/{}/milestones", owner, repo), filter)
            .await
    }

    /// Lists a page window of milestones in a repository.
    pub async fn list_page(
        &self,
        owner: &str,
        repo: &str,
        filter: &ListMilestonesFilter,
        page: &PageRequest,
    ) -> ForgeResult<Page<Milestone>> {
        self.client
            .get_page_with_params(
                &format!("/repos/{}/{}/milestones", owner, repo),
                filter,
                page,
            )
            .await
    }

    /// Gets a milestone.
    pub async fn get(
        &self,
        owner: &str,
        repo: &str,
        milestone_number: u32,
    ) -> ForgeResult<Milestone> {
        self.client
            .get(&format!(
                "/repos/{}/{}/milestones/{}",
                owner, repo, milestone_number
            ))
            .await
    }

    /// Creates a milestone.
    pub async fn create(
        &self,
        owner: &str,
        repo: &str,
        request: &CreateMilestoneRequest,
    ) -> ForgeResult<Milestone> {
        self.client
            .post(&format!("/repos/{}/{}/milestones", owner, repo), request)
            .await
    }

    /// Updates a milestone.
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        milestone_number: u32,
        request: &UpdateMilestoneRequest,
    ) -> ForgeResult<Milestone> {
        self.client
            .patch(
                &format!("/repos/{}/{}/milestones/{}", owner, repo, milestone_number),
                request,
            )
            .await
    }

    /// Deletes a milestone.
    pub async fn delete(
        &self,
        owner: &str,
        repo: &str,
        milestone_number: u32,
    ) -> ForgeResult<()> {
        self.client
            .delete(&format!(
                "/repos/{}/{}/milestones/{}",
                owner, repo, milestone_number
            ))
            .await
    }
}

/// Filter for listing milestones.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListMilestonesFilter {
    /// Filter by state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<StateFilter>,
    /// Sort field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<MilestoneSort>,
    /// Sort direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
}

/// Milestone sort field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneSort {
    DueOn,
    Completeness,
}

/// Request to create a milestone.
#[derive(Debug, Clone, Serialize)]
pub struct CreateMilestoneRequest {
    /// Milestone title.
    pub title: String,
    /// Milestone state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<MilestoneState>,
    /// Milestone description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<DateTime<Utc>>,
}

impl CreateMilestoneRequest {
    /// Creates a title-only request.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            state: None,
            description: None,
            due_on: None,
        }
    }
}

/// Request to update a milestone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateMilestoneRequest {
    /// Milestone title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Milestone state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<MilestoneState>,
    /// Milestone description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_filter_query_shape() {
        let filter = ListMilestonesFilter {
            state: Some(StateFilter::Open),
            sort: Some(MilestoneSort::DueOn),
            direction: Some(SortDirection::Desc),
        };
        let query = serde_urlencoded::to_string(&filter).unwrap();
        assert_eq!(query, "state=open&sort=due_on&direction=desc");
    }

    #[test]
    fn test_create_request_title_only() {
        let request = CreateMilestoneRequest::with_title("v1.0");
        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"title":"v1.0"}"#);
    }
}
