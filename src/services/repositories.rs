//! Repository operations.

use crate::client::ForgeClient;
use crate::errors::{ForgeError, ForgeResult};
use crate::pagination::{Page, PageRequest};
use crate::types::{Branch, Content, Release, Repository};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Service for repository operations.
pub struct RepositoriesService<'a> {
    client: &'a ForgeClient,
}

impl<'a> RepositoriesService<'a> {
    /// Creates a new repositories service.
    pub fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    /// Lists all repositories for a user.
    pub async fn list_for_user(
        &self,
        username: &str,
        filter: &ListReposFilter,
    ) -> ForgeResult<Vec<Repository>> {
        self.client
            .get_all_with_params(&format!("/users/{}/repos", username), filter)
            .await
    }

    /// Lists a page window of repositories for a user.
    pub async fn list_for_user_page(
        &self,
        username: &str,
        filter: &ListReposFilter,
        page: &PageRequest,
    ) -> ForgeResult<Page<Repository>> {
        self.client
            .get_page_with_params(&format!("/users/{}/repos", username), filter, page)
            .await
    }

    /// Lists all repositories for an organization.
    pub async fn list_for_org(
        &self,
        org: &str,
        filter: &ListReposFilter,
    ) -> ForgeResult<Vec<Repository>> {
        self.client
            .get_all_with_params(&format!("/orgs/{}/repos", org), filter)
            .await
    }

    /// Lists a page window of repositories for an organization.
    pub async fn list_for_org_page(
        &self,
        org: &str,
        filter: &ListReposFilter,
        page: &PageRequest,
    ) -> ForgeResult<Page<Repository>> {
        self.client
            .get_page_with_params(&format!("/orgs/{}/repos", org), filter, page)
            .await
    }

    /// Lists all repositories for the authenticated user.
    pub async fn list_for_authenticated_user(&self) -> ForgeResult<Vec<Repository>> {
        self.client.get_all("/user/repos").await
    }

    /// Lists a page window of repositories for the authenticated user.
    pub async fn list_for_authenticated_user_page(
        &self,
        page: &PageRequest,
    ) -> ForgeResult<Page<Repository>> {
        self.client.get_page("/user/repos", page).await
    }

    /// Gets a repository.
    pub async fn get(&self, owner: &str, repo: &str) -> ForgeResult<Repository> {
        self.client.get(&format!("/repos/{}/{}", owner, repo)).await
    }

    /// Creates a repository for the authenticated user.
    pub async fn create(&self, request: &CreateRepoRequest) -> ForgeResult<Repository> {
        self.client.post("/user/repos", request).await
    }

    /// Creates a repository in an organization.
    pub async fn create_for_org(
        &self,
        org: &str,
        request: &CreateRepoRequest,
    ) -> ForgeResult<Repository> {
        self.client
            .post(&format!("/orgs/{}/repos", org), request)
            .await
    }

    /// Updates a repository.
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        request: &UpdateRepoRequest,
    ) -> ForgeResult<Repository> {
        self.client
            .patch(&format!("/repos/{}/{}", owner, repo), request)
            .await
    }

    /// Deletes a repository.
    pub async fn delete(&self, owner: &str, repo: &str) -> ForgeResult<()> {
        self.client
            .delete(&format!("/repos/{}/{}", owner, repo))
            .await
    }

    // Branches

    /// Lists all branches in a repository.
    pub async fn list_branches(
        &self,
        owner: &str,
        repo: &str,
        filter: &ListBranchesFilter,
    ) -> ForgeResult<Vec<Branch>> {
        self.client
            .get_all_with_params(&format!("/repos/{}/{}/branches", owner, repo), filter)
            .await
    }

    /// Lists a page window of branches in a repository.
    pub async fn list_branches_page(
        &self,
        owner: &str,
        repo: &str,
        filter: &ListBranchesFilter,
        page: &PageRequest,
    ) -> ForgeResult<Page<Branch>> {
        self.client
            .get_page_with_params(&format!("/repos/{}/{}/branches", owner, repo), filter, page)
            .await
    }

    /// Gets a branch.
    pub async fn get_branch(&self, owner: &str, repo: &str, branch: &str) -> ForgeResult<Branch> {
        self.client
            .get(&format!("/repos/{}/{}/branches/{}", owner, repo, branch))
            .await
    }

    // Contents

    /// Gets repository contents (file or directory entry).
    pub async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: Option<&str>,
    ) -> ForgeResult<Content> {
        let mut url = format!("/repos/{}/{}/contents/{}", owner, repo, path);
        if let Some(r) = git_ref {
            url = format!("{}?ref={}", url, r);
        }
        self.client.get(&url).await
    }

    /// Gets a file's content decoded to UTF-8 text.
    pub async fn get_file_text(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: Option<&str>,
    ) -> ForgeResult<String> {
        let content = self.get_contents(owner, repo, path, git_ref).await?;
        let encoded = content.content.unwrap_or_default();
        // The server wraps base64 bodies at 60 columns.
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        let raw = BASE64
            .decode(compact)
            .map_err(|e| ForgeError::deserialization(format!("Invalid base64 content: {}", e)))?;
        String::from_utf8(raw)
            .map_err(|e| ForgeError::deserialization(format!("Content is not UTF-8: {}", e)))
    }

    /// Creates or updates a file.
    pub async fn create_or_update_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        request: &CreateOrUpdateFileRequest,
    ) -> ForgeResult<FileCommitResponse> {
        self.client
            .put(
                &format!("/repos/{}/{}/contents/{}", owner, repo, path),
                request,
            )
            .await
    }

    /// Deletes a file.
    pub async fn delete_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        request: &DeleteFileRequest,
    ) -> ForgeResult<FileCommitResponse> {
        // The forge API uses DELETE with a body for this operation.
        let response = self
            .client
            .raw_request(
                reqwest::Method::DELETE,
                &format!("/repos/{}/{}/contents/{}", owner, repo, path),
                Some(request),
            )
            .await?;
        response.json().await.map_err(|e| {
            ForgeError::deserialization(format!("Failed to deserialize response: {}", e))
        })
    }

    /// Gets the README.
    pub async fn get_readme(&self, owner: &str, repo: &str) -> ForgeResult<Content> {
        self.client
            .get(&format!("/repos/{}/{}/readme", owner, repo))
            .await
    }

    // Releases

    /// Lists all releases.
    pub async fn list_releases(&self, owner: &str, repo: &str) -> ForgeResult<Vec<Release>> {
        self.client
            .get_all(&format!("/repos/{}/{}/releases", owner, repo))
            .await
    }

    /// Lists a page window of releases.
    pub async fn list_releases_page(
        &self,
        owner: &str,
        repo: &str,
        page: &PageRequest,
    ) -> ForgeResult<Page<Release>> {
        self.client
            .get_page(&format!("/repos/{}/{}/releases", owner, repo), page)
            .await
    }

    /// Gets a release.
    pub async fn get_release(
        &self,
        owner: &str,
        repo: &str,
        release_id: u64,
    ) -> ForgeResult<Release> {
        self.client
            .get(&format!("/repos/{}/{}/releases/{}", owner, repo, release_id))
            .await
    }

    /// Gets the latest release.
    pub async fn get_latest_release(&self, owner: &str, repo: &str) -> ForgeResult<Release> {
        self.client
            .get(&format!("/repos/{}/{}/releases/latest", owner, repo))
            .await
    }

    /// Gets a release by tag.
    pub async fn get_release_by_tag(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
    ) -> ForgeResult<Release> {
        self.client
            .get(&format!("/repos/{}/{}/releases/tags/{}", owner, repo, tag))
            .await
    }

    /// Creates a release.
    pub async fn create_release(
        &self,
        owner: &str,
        repo: &str,
        request: &CreateReleaseRequest,
    ) -> ForgeResult<Release> {
        self.client
            .post(&format!("/repos/{}/{}/releases", owner, repo), request)
            .await
    }

    /// Updates a release.
    pub async fn update_release(
        &self,
        owner: &str,
        repo: &str,
        release_id: u64,
        request: &UpdateReleaseRequest,
    ) -> ForgeResult<Release> {
        self.client
            .patch(
                &format!("/repos/{}/{}/releases/{}", owner, repo, release_id),
                request,
            )
            .await
    }

    /// Deletes a release.
    pub async fn delete_release(&self, owner: &str, repo: &str, release_id: u64) -> ForgeResult<()> {
        self.client
            .delete(&format!("/repos/{}/{}/releases/{}", owner, repo, release_id))
            .await
    }
}

/// Filter for listing repositories.
///
/// Paging is not part of the filter; pass a
/// [`PageRequest`](crate::pagination::PageRequest) to the `_page` variants.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListReposFilter {
    /// Type filter.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub repo_type: Option<RepoType>,
    /// Sort field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<RepoSort>,
    /// Sort direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
}

/// Repository type filter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoType {
    All,
    Owner,
    Public,
    Private,
    Member,
}

/// Repository sort field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoSort {
    Created,
    Updated,
    Pushed,
    FullName,
}

/// Sort direction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Filter for listing branches.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListBranchesFilter {
    /// Restrict to protected or unprotected branches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
}

/// Request to create a repository.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRepoRequest {
    /// Repository name.
    pub name: String,
    /// Repository description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Homepage URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Whether the repository is private.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    /// Whether issues are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,
    /// Whether projects are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_projects: Option<bool>,
    /// Whether wiki is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,
    /// Auto-initialize with README.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_init: Option<bool>,
    /// Gitignore template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gitignore_template: Option<String>,
    /// License template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_template: Option<String>,
}

impl CreateRepoRequest {
    /// Creates a minimal request with every optional field unset.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            homepage: None,
            private: None,
            has_issues: None,
            has_projects: None,
            has_wiki: None,
            auto_init: None,
            gitignore_template: None,
            license_template: None,
        }
    }
}

/// Request to update a repository.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateRepoRequest {
    /// Repository name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Repository description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Homepage URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Whether the repository is private.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    /// Default branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    /// Whether the repository is archived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

/// Request to create or update a file.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrUpdateFileRequest {
    /// Commit message.
    pub message: String,
    /// File content (base64 encoded).
    pub content: String,
    /// SHA of the file being replaced (for updates).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    /// Branch name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Committer information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committer: Option<CommitAuthor>,
    /// Author information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<CommitAuthor>,
}

impl CreateOrUpdateFileRequest {
    /// Builds a request from plaintext, handling the base64 encoding.
    pub fn from_text(message: impl Into<String>, text: &str) -> Self {
        Self {
            message: message.into(),
            content: BASE64.encode(text.as_bytes()),
            sha: None,
            branch: None,
            committer: None,
            author: None,
        }
    }
}

/// Request to delete a file.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteFileRequest {
    /// Commit message.
    pub message: String,
    /// SHA of the file being deleted.
    pub sha: String,
    /// Branch name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Committer information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committer: Option<CommitAuthor>,
    /// Author information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<CommitAuthor>,
}

/// Commit author information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthor {
    /// Author name.
    pub name: String,
    /// Author email.
    pub email: String,
}

/// Response from file commit operations.
#[derive(Debug, Clone, Deserialize)]
pub struct FileCommitResponse {
    /// The committed content.
    pub content: Option<Content>,
    /// The commit.
    pub commit: FileCommit,
}

/// Commit information from file operations.
#[derive(Debug, Clone, Deserialize)]
pub struct FileCommit {
    /// Commit SHA.
    pub sha: String,
    /// Commit message.
    pub message: String,
    /// Commit URL.
    pub html_url: String,
}

/// Request to create a release.
#[derive(Debug, Clone, Serialize)]
pub struct CreateReleaseRequest {
    /// Tag name.
    pub tag_name: String,
    /// Target commitish.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,
    /// Release name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Release body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Whether it's a draft.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    /// Whether it's a prerelease.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<bool>,
    /// Generate release notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_release_notes: Option<bool>,
}

/// Request to update a release.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateReleaseRequest {
    /// Tag name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    /// Target commitish.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,
    /// Release name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Release body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Whether it's a draft.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    /// Whether it's a prerelease.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<bool>,
}
