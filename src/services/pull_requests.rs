//! Pull request operations.

use super::issues::StateFilter;
use super::repositories::SortDirection;
use crate::client::ForgeClient;
use crate::errors::ForgeResult;
use crate::pagination::{Page, PageRequest};
use crate::types::{PullRequest, PullRequestFile, PullRequestState, RepoCommit};
use serde::{Deserialize, Serialize};

/// Service for pull request operations.
pub struct PullRequestsService<'a> {
    client: &'a ForgeClient,
}

impl<'a> PullRequestsService<'a> {
    /// Creates a new pull requests service.
    pub fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// Lists all pull requests in a repository.
    pub async fn list(
        &self,
        owner: &str,
        repo: &str,
        filter: &ListPullsFilter,
    ) -> ForgeResult<Vec<PullRequest>> {
        self.client
            .get_all_with_params(&format!("/repos/{}/{}/pulls", owner, repo), filter)
            .await
    }

    /// Lists a page window of pull requests in a repository.
    pub async fn list_page(
        &self,
        owner: &str,
        repo: &str,
        filter: &ListPullsFilter,
        page: &PageRequest,
    ) -> ForgeResult<Page<PullRequest>> {
        self.client
            .get_page_with_params(&format!("/repos/{}/{}/pulls", owner, repo), filter, page)
            .await
    }

    /// Gets a pull request.
    pub async fn get(&self, owner: &str, repo: &str, pr_number: u32) -> ForgeResult<PullRequest> {
        self.client
            .get(&format!("/repos/{}/{}/pulls/{}", owner, repo, pr_number))
            .await
    }

    /// Creates a pull request.
    pub async fn create(
        &self,
        owner: &str,
        repo: &str,
        request: &CreatePullRequestRequest,
    ) -> ForgeResult<PullRequest> {
        self.client
            .post(&format!("/repos/{}/{}/pulls", owner, repo), request)
            .await
    }

    /// Updates a pull request.
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u32,
        request: &UpdatePullRequestRequest,
    ) -> ForgeResult<PullRequest> {
        self.client
            .patch(
                &format!("/repos/{}/{}/pulls/{}", owner, repo, pr_number),
                request,
            )
            .await
    }

    /// Checks whether a pull request has been merged.
    pub async fn is_merged(&self, owner: &str, repo: &str, pr_number: u32) -> ForgeResult<bool> {
        let response = self
            .client
            .raw_request(
                reqwest::Method::GET,
                &format!("/repos/{}/{}/pulls/{}/merge", owner, repo, pr_number),
                Option::<&()>::None,
            )
            .await;

        match response {
            Ok(_) => Ok(true),
            Err(e) if e.status_code() == Some(404) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Merges a pull request.
    pub async fn merge(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u32,
        request: &MergePullRequestRequest,
    ) -> ForgeResult<MergeResult> {
        self.client
            .put(
                &format!("/repos/{}/{}/pulls/{}/merge", owner, repo, pr_number),
                request,
            )
            .await
    }

    /// Lists all commits in a pull request.
    pub async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u32,
    ) -> ForgeResult<Vec<RepoCommit>> {
        self.client
            .get_all(&format!(
                "/repos/{}/{}/pulls/{}/commits",
                owner, repo, pr_number
            ))
            .await
    }

    /// Lists a page window of commits in a pull request.
    pub async fn list_commits_page(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u32,
        page: &PageRequest,
    ) -> ForgeResult<Page<RepoCommit>> {
        self.client
            .get_page(
                &format!("/repos/{}/{}/pulls/{}/commits", owner, repo, pr_number),
                page,
            )
            .await
    }

    /// Lists all files changed by a pull request.
    pub async fn list_files(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u32,
    ) -> ForgeResult<Vec<PullRequestFile>> {
        self.client
            .get_all(&format!(
                "/repos/{}/{}/pulls/{}/files",
                owner, repo, pr_number
            ))
            .await
    }

    /// Lists a page window of files changed by a pull request.
    pub async fn list_files_page(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u32,
        page: &PageRequest,
    ) -> ForgeResult<Page<PullRequestFile>> {
        self.client
            .get_page(
                &format!("/repos/{}/{}/pulls/{}/files", owner, repo, pr_number),
                page,
            )
            .await
    }
}

/// Filter for listing pull requests.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListPullsFilter {
    /// Filter by state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<StateFilter>,
    /// Filter by head (`user:branch`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,
    /// Filter by base branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Sort field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<PullSort>,
    /// Sort direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
}

/// Pull request sort field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PullSort {
    Created,
    Updated,
    Popularity,
    LongRunning,
}

/// Request to create a pull request.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePullRequestRequest {
    /// PR title.
    pub title: String,
    /// Head branch.
    pub head: String,
    /// Base branch.
    pub base: String,
    /// PR body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Whether to create as draft.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    /// Whether maintainers can modify.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainer_can_modify: Option<bool>,
}

/// Request to update a pull request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatePullRequestRequest {
    /// PR title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// PR body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// PR state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<PullRequestState>,
    /// Base branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Whether maintainers can modify.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainer_can_modify: Option<bool>,
}

/// Request to merge a pull request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergePullRequestRequest {
    /// Commit title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_title: Option<String>,
    /// Commit message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,
    /// SHA the head must match for the merge to proceed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    /// Merge method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_method: Option<MergeMethod>,
}

/// Merge method.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    Merge,
    Squash,
    Rebase,
}

/// Result of a merge operation.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeResult {
    /// Merge commit SHA.
    pub sha: Option<String>,
    /// Whether the merge succeeded.
    pub merged: bool,
    /// Result message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulls_filter_query_shape() {
        let filter = ListPullsFilter {
            state: Some(StateFilter::Closed),
            base: Some("main".to_string()),
            sort: Some(PullSort::LongRunning),
            ..Default::default()
        };
        let query = serde_urlencoded::to_string(&filter).unwrap();
        assert_eq!(query, "state=closed&base=main&sort=long_running");
    }

    #[test]
    fn test_merge_request_method_wire_value() {
        let request = MergePullRequestRequest {
            merge_method: Some(MergeMethod::Squash),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"merge_method":"squash"}"#
        );
    }
}
