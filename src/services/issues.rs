//! Issue operations.

use super::repositories::SortDirection;
use crate::client::ForgeClient;
use crate::errors::{ForgeError, ForgeResult};
use crate::pagination::{Page, PageRequest};
use crate::types::{Comment, Issue, IssueState, Label};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Service for issue operations.
pub struct IssuesService<'a> {
    client: &'a ForgeClient,
}

impl<'a> IssuesService<'a> {
    /// Creates a new issues service.
    pub fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// Lists all issues in a repository.
    pub async fn list(
        &self,
        owner: &str,
        repo: &str,
        filter: &ListIssuesFilter,
    ) -> ForgeResult<Vec<Issue>> {
        self.client
            .get_all_with_params(&format!("/repos/{}/{}/issues", owner, repo), filter)
            .await
    }

    /// Lists a page window of issues in a repository.
    pub async fn list_page(
        &self,
        owner: &str,
        repo: &str,
        filter: &ListIssuesFilter,
        page: &PageRequest,
    ) -> ForgeResult<Page<Issue>> {
        self.client
            .get_page_with_params(&format!("/repos/{}/{}/issues", owner, repo), filter, page)
            .await
    }

    /// Gets an issue.
    pub async fn get(&self, owner: &str, repo: &str, issue_number: u32) -> ForgeResult<Issue> {
        self.client
            .get(&format!("/repos/{}/{}/issues/{}", owner, repo, issue_number))
            .await
    }

    /// Creates an issue.
    pub async fn create(
        &self,
        owner: &str,
        repo: &str,
        request: &CreateIssueRequest,
    ) -> ForgeResult<Issue> {
        self.client
            .post(&format!("/repos/{}/{}/issues", owner, repo), request)
            .await
    }

    /// Updates an issue.
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u32,
        request: &UpdateIssueRequest,
    ) -> ForgeResult<Issue> {
        self.client
            .patch(
                &format!("/repos/{}/{}/issues/{}", owner, repo, issue_number),
                request,
            )
            .await
    }

    /// Locks an issue.
    pub async fn lock(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u32,
        lock_reason: Option<LockReason>,
    ) -> ForgeResult<()> {
        let body = LockRequest { lock_reason };
        self.client
            .put_no_response(
                &format!("/repos/{}/{}/issues/{}/lock", owner, repo, issue_number),
                &body,
            )
            .await
    }

    /// Unlocks an issue.
    pub async fn unlock(&self, owner: &str, repo: &str, issue_number: u32) -> ForgeResult<()> {
        self.client
            .delete(&format!(
                "/repos/{}/{}/issues/{}/lock",
                owner, repo, issue_number
            ))
            .await
    }

    // Comments

    /// Lists all comments on an issue.
    pub async fn list_comments(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u32,
    ) -> ForgeResult<Vec<Comment>> {
        self.client
            .get_all(&format!(
                "/repos/{}/{}/issues/{}/comments",
                owner, repo, issue_number
            ))
            .await
    }

    /// Lists a page window of comments on an issue.
    pub async fn list_comments_page(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u32,
        page: &PageRequest,
    ) -> ForgeResult<Page<Comment>> {
        self.client
            .get_page(
                &format!("/repos/{}/{}/issues/{}/comments", owner, repo, issue_number),
                page,
            )
            .await
    }

    /// Gets a comment.
    pub async fn get_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: u64,
    ) -> ForgeResult<Comment> {
        self.client
            .get(&format!(
                "/repos/{}/{}/issues/comments/{}",
                owner, repo, comment_id
            ))
            .await
    }

    /// Creates a comment.
    pub async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u32,
        body: &str,
    ) -> ForgeResult<Comment> {
        let request = CommentBody {
            body: body.to_string(),
        };
        self.client
            .post(
                &format!("/repos/{}/{}/issues/{}/comments", owner, repo, issue_number),
                &request,
            )
            .await
    }

    /// Updates a comment.
    pub async fn update_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: u64,
        body: &str,
    ) -> ForgeResult<Comment> {
        let request = CommentBody {
            body: body.to_string(),
        };
        self.client
            .patch(
                &format!("/repos/{}/{}/issues/comments/{}", owner, repo, comment_id),
                &request,
            )
            .await
    }

    /// Deletes a comment.
    pub async fn delete_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: u64,
    ) -> ForgeResult<()> {
        self.client
            .delete(&format!(
                "/repos/{}/{}/issues/comments/{}",
                owner, repo, comment_id
            ))
            .await
    }

    // Labels

    /// Lists all labels in a repository.
    pub async fn list_labels(&self, owner: &str, repo: &str) -> ForgeResult<Vec<Label>> {
        self.client
            .get_all(&format!("/repos/{}/{}/labels", owner, repo))
            .await
    }

    /// Lists a page window of labels in a repository.
    pub async fn list_labels_page(
        &self,
        owner: &str,
        repo: &str,
        page: &PageRequest,
    ) -> ForgeResult<Page<Label>> {
        self.client
            .get_page(&format!("/repos/{}/{}/labels", owner, repo), page)
            .await
    }

    /// Gets a label.
    pub async fn get_label(&self, owner: &str, repo: &str, name: &str) -> ForgeResult<Label> {
        self.client
            .get(&format!("/repos/{}/{}/labels/{}", owner, repo, name))
            .await
    }

    /// Creates a label.
    pub async fn create_label(
        &self,
        owner: &str,
        repo: &str,
        request: &CreateLabelRequest,
    ) -> ForgeResult<Label> {
        self.client
            .post(&format!("/repos/{}/{}/labels", owner, repo), request)
            .await
    }

    /// Updates a label.
    pub async fn update_label(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        request: &UpdateLabelRequest,
    ) -> ForgeResult<Label> {
        self.client
            .patch(&format!("/repos/{}/{}/labels/{}", owner, repo, name), request)
            .await
    }

    /// Deletes a label.
    pub async fn delete_label(&self, owner: &str, repo: &str, name: &str) -> ForgeResult<()> {
        self.client
            .delete(&format!("/repos/{}/{}/labels/{}", owner, repo, name))
            .await
    }

    /// Adds labels to an issue.
    pub async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u32,
        labels: &[String],
    ) -> ForgeResult<Vec<Label>> {
        let request = LabelsRequest {
            labels: labels.to_vec(),
        };
        self.client
            .post(
                &format!("/repos/{}/{}/issues/{}/labels", owner, repo, issue_number),
                &request,
            )
            .await
    }

    /// Replaces all labels on an issue.
    pub async fn set_labels(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u32,
        labels: &[String],
    ) -> ForgeResult<Vec<Label>> {
        let request = LabelsRequest {
            labels: labels.to_vec(),
        };
        self.client
            .put(
                &format!("/repos/{}/{}/issues/{}/labels", owner, repo, issue_number),
                &request,
            )
            .await
    }

    /// Removes a label from an issue.
    pub async fn remove_label(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u32,
        label: &str,
    ) -> ForgeResult<()> {
        self.client
            .delete(&format!(
                "/repos/{}/{}/issues/{}/labels/{}",
                owner, repo, issue_number, label
            ))
            .await
    }

    // Assignees

    /// Adds assignees to an issue.
    pub async fn add_assignees(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u32,
        assignees: &[String],
    ) -> ForgeResult<Issue> {
        let request = AssigneesRequest {
            assignees: assignees.to_vec(),
        };
        self.client
            .post(
                &format!(
                    "/repos/{}/{}/issues/{}/assignees",
                    owner, repo, issue_number
                ),
                &request,
            )
            .await
    }

    /// Removes assignees from an issue.
    pub async fn remove_assignees(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u32,
        assignees: &[String],
    ) -> ForgeResult<Issue> {
        let request = AssigneesRequest {
            assignees: assignees.to_vec(),
        };
        // The forge API uses DELETE with a body here.
        let response = self
            .client
            .raw_request(
                reqwest::Method::DELETE,
                &format!(
                    "/repos/{}/{}/issues/{}/assignees",
                    owner, repo, issue_number
                ),
                Some(&request),
            )
            .await?;
        response.json().await.map_err(|e| {
            ForgeError::deserialization(format!("Failed to deserialize response: {}", e))
        })
    }
}

/// Filter for listing issues.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListIssuesFilter {
    /// Filter by milestone number, `*` (any), or `none`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
    /// Filter by state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<StateFilter>,
    /// Filter by assignee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Filter by creator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    /// Filter by mentioned user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentioned: Option<String>,
    /// Filter by labels (comma-separated).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    /// Sort field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<IssueSort>,
    /// Sort direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
    /// Only issues updated at or after this time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
}

/// State filter for collection listings.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StateFilter {
    Open,
    Closed,
    All,
}

/// Issue sort field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSort {
    Created,
    Updated,
    Comments,
}

/// Request to create an issue.
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssueRequest {
    /// Issue title.
    pub title: String,
    /// Issue body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Assignees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
    /// Milestone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u32>,
    /// Labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl CreateIssueRequest {
    /// Creates a title-only request.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
            assignees: None,
            milestone: None,
            labels: None,
        }
    }
}

/// Request to update an issue.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateIssueRequest {
    /// Issue title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Issue body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Issue state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
    /// State reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_reason: Option<StateReason>,
    /// Assignees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
    /// Milestone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u32>,
    /// Labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

/// State reason for closing an issue.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateReason {
    Completed,
    NotPlanned,
    Reopened,
}

/// Lock reason.
///
/// Wire values are not uniform; two contain separators.
#[derive(Debug, Clone, Serialize)]
pub enum LockReason {
    #[serde(rename = "off-topic")]
    OffTopic,
    #[serde(rename = "too heated")]
    TooHeated,
    #[serde(rename = "resolved")]
    Resolved,
    #[serde(rename = "spam")]
    Spam,
}

#[derive(Debug, Clone, Serialize)]
struct LockRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    lock_reason: Option<LockReason>,
}

#[derive(Debug, Clone, Serialize)]
struct CommentBody {
    body: String,
}

/// Request to create a label.
#[derive(Debug, Clone, Serialize)]
pub struct CreateLabelRequest {
    /// Label name.
    pub name: String,
    /// Label color (hex without #).
    pub color: String,
    /// Label description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request to update a label.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateLabelRequest {
    /// New label name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    /// Label color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Label description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct LabelsRequest {
    labels: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
struct AssigneesRequest {
    assignees: Vec<String>,
}
