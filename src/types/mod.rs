//! Core data types for the forge API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account (minimal representation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: u64,
    /// Username (login).
    pub login: String,
    /// User node ID.
    pub node_id: String,
    /// Avatar URL.
    pub avatar_url: String,
    /// User type (User, Organization, Bot).
    #[serde(rename = "type")]
    pub user_type: String,
    /// Site admin flag.
    pub site_admin: bool,
    /// Profile URL.
    pub html_url: String,
}

/// Repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Repository ID.
    pub id: u64,
    /// Node ID.
    pub node_id: String,
    /// Repository name.
    pub name: String,
    /// Full name (owner/repo).
    pub full_name: String,
    /// Owner information.
    pub owner: User,
    /// Whether the repository is private.
    pub private: bool,
    /// Repository description.
    pub description: Option<String>,
    /// Whether the repository is a fork.
    pub fork: bool,
    /// Repository URL.
    pub url: String,
    /// HTML URL.
    pub html_url: String,
    /// Clone URL.
    pub clone_url: String,
    /// SSH URL.
    pub ssh_url: String,
    /// Default branch.
    pub default_branch: String,
    /// Primary language.
    pub language: Option<String>,
    /// Fork count.
    pub forks_count: u32,
    /// Stargazer count.
    pub stargazers_count: u32,
    /// Watcher count.
    pub watchers_count: u32,
    /// Open issue count.
    pub open_issues_count: u32,
    /// Repository size in KB.
    pub size: u64,
    /// Topics.
    #[serde(default)]
    pub topics: Vec<String>,
    /// Whether issues are enabled.
    #[serde(default = "default_true")]
    pub has_issues: bool,
    /// Whether projects are enabled.
    #[serde(default = "default_true")]
    pub has_projects: bool,
    /// Whether wiki is enabled.
    #[serde(default = "default_true")]
    pub has_wiki: bool,
    /// Whether downloads are enabled.
    #[serde(default = "default_true")]
    pub has_downloads: bool,
    /// Whether the repository is archived.
    #[serde(default)]
    pub archived: bool,
    /// Whether the repository is disabled.
    #[serde(default)]
    pub disabled: bool,
    /// License information.
    pub license: Option<License>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Last push time.
    pub pushed_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Repository license.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    /// License key.
    pub key: String,
    /// License name.
    pub name: String,
    /// SPDX ID.
    pub spdx_id: Option<String>,
    /// License URL.
    pub url: Option<String>,
}

/// Branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    /// Branch name.
    pub name: String,
    /// Commit reference.
    pub commit: BranchCommit,
    /// Whether branch is protected.
    pub protected: bool,
}

/// Branch commit reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchCommit {
    /// Commit SHA.
    pub sha: String,
    /// Commit URL.
    pub url: String,
}

/// Issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Issue ID.
    pub id: u64,
    /// Node ID.
    pub node_id: String,
    /// Issue number.
    pub number: u32,
    /// Issue title.
    pub title: String,
    /// Issue body.
    pub body: Option<String>,
    /// Issue state.
    pub state: IssueState,
    /// Issue author.
    pub user: User,
    /// Labels.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Assignees.
    #[serde(default)]
    pub assignees: Vec<User>,
    /// Milestone.
    pub milestone: Option<Milestone>,
    /// Whether the issue is locked.
    #[serde(default)]
    pub locked: bool,
    /// Lock reason.
    pub active_lock_reason: Option<String>,
    /// Comment count.
    pub comments: u32,
    /// HTML URL.
    pub html_url: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Close time.
    pub closed_at: Option<DateTime<Utc>>,
    /// User who closed the issue.
    pub closed_by: Option<User>,
}

/// Issue state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// Open issue.
    Open,
    /// Closed issue.
    Closed,
}

/// Label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// Label ID.
    pub id: u64,
    /// Node ID.
    pub node_id: String,
    /// Label name.
    pub name: String,
    /// Label description.
    pub description: Option<String>,
    /// Label color (hex, no leading `#`).
    pub color: String,
    /// Default label flag.
    #[serde(default)]
    pub default: bool,
}

/// Milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    /// Milestone ID.
    pub id: u64,
    /// Node ID.
    pub node_id: String,
    /// Milestone number.
    pub number: u32,
    /// Milestone title.
    pub title: String,
    /// Milestone description.
    pub description: Option<String>,
    /// Milestone state.
    pub state: MilestoneState,
    /// Creator.
    pub creator: User,
    /// Open issue count.
    pub open_issues: u32,
    /// Closed issue count.
    pub closed_issues: u32,
    /// Due date.
    pub due_on: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Close time.
    pub closed_at: Option<DateTime<Utc>>,
}

/// Milestone state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    /// Open milestone.
    Open,
    /// Closed milestone.
    Closed,
}

/// Pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR ID.
    pub id: u64,
    /// Node ID.
    pub node_id: String,
    /// PR number.
    pub number: u32,
    /// PR title.
    pub title: String,
    /// PR body.
    pub body: Option<String>,
    /// PR state.
    pub state: PullRequestState,
    /// PR author.
    pub user: User,
    /// Head branch info.
    pub head: PullRequestRef,
    /// Base branch info.
    pub base: PullRequestRef,
    /// Labels.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Assignees.
    #[serde(default)]
    pub assignees: Vec<User>,
    /// Requested reviewers.
    #[serde(default)]
    pub requested_reviewers: Vec<User>,
    /// Milestone.
    pub milestone: Option<Milestone>,
    /// Whether the PR is locked.
    #[serde(default)]
    pub locked: bool,
    /// Whether the PR is a draft.
    #[serde(default)]
    pub draft: bool,
    /// Whether the PR is merged (detail responses only).
    #[serde(default)]
    pub merged: bool,
    /// Merge commit SHA.
    pub merge_commit_sha: Option<String>,
    /// User who merged the PR.
    pub merged_by: Option<User>,
    /// Merged time.
    pub merged_at: Option<DateTime<Utc>>,
    /// Whether the PR is mergeable.
    pub mergeable: Option<bool>,
    /// Comment count.
    #[serde(default)]
    pub comments: u32,
    /// Commit count.
    #[serde(default)]
    pub commits: u32,
    /// Additions.
    #[serde(default)]
    pub additions: u32,
    /// Deletions.
    #[serde(default)]
    pub deletions: u32,
    /// Changed files count.
    #[serde(default)]
    pub changed_files: u32,
    /// HTML URL.
    pub html_url: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Close time.
    pub closed_at: Option<DateTime<Utc>>,
}

/// Pull request state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState {
    /// Open PR.
    Open,
    /// Closed PR.
    Closed,
}

/// Pull request branch reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestRef {
    /// Branch label.
    pub label: String,
    /// Branch name.
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// Commit SHA.
    pub sha: String,
    /// User.
    pub user: User,
    /// Repository.
    pub repo: Option<Repository>,
}

/// Commit as listed on a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoCommit {
    /// Commit SHA.
    pub sha: String,
    /// Node ID.
    pub node_id: String,
    /// Git-level commit details.
    pub commit: CommitDetail,
    /// Commit author account (if resolvable).
    pub author: Option<User>,
    /// Commit committer account (if resolvable).
    pub committer: Option<User>,
    /// HTML URL.
    pub html_url: String,
}

/// Git-level commit details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    /// Commit message.
    pub message: String,
    /// Git author identity.
    pub author: Option<GitActor>,
    /// Git committer identity.
    pub committer: Option<GitActor>,
}

/// Git identity on a commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitActor {
    /// Name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Timestamp.
    pub date: DateTime<Utc>,
}

/// File changed by a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestFile {
    /// Blob SHA.
    pub sha: String,
    /// File path.
    pub filename: String,
    /// Change status (added, modified, removed, renamed).
    pub status: String,
    /// Added lines.
    pub additions: u32,
    /// Removed lines.
    pub deletions: u32,
    /// Total changed lines.
    pub changes: u32,
    /// Blob URL.
    pub blob_url: String,
    /// Raw content URL.
    pub raw_url: String,
    /// Unified diff patch (absent for binary files).
    pub patch: Option<String>,
}

/// Release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// Release ID.
    pub id: u64,
    /// Node ID.
    pub node_id: String,
    /// Tag name.
    pub tag_name: String,
    /// Target commitish.
    pub target_commitish: String,
    /// Release name.
    pub name: Option<String>,
    /// Release body.
    pub body: Option<String>,
    /// Whether it's a draft.
    pub draft: bool,
    /// Whether it's a prerelease.
    pub prerelease: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Publish time.
    pub published_at: Option<DateTime<Utc>>,
    /// Author.
    pub author: User,
    /// Assets.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
    /// HTML URL.
    pub html_url: String,
    /// Tarball URL.
    pub tarball_url: Option<String>,
    /// Zipball URL.
    pub zipball_url: Option<String>,
}

/// Release asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseAsset {
    /// Asset ID.
    pub id: u64,
    /// Node ID.
    pub node_id: String,
    /// Asset name.
    pub name: String,
    /// Asset label.
    pub label: Option<String>,
    /// Content type.
    pub content_type: String,
    /// Asset state.
    pub state: String,
    /// Asset size in bytes.
    pub size: u64,
    /// Download count.
    pub download_count: u64,
    /// Browser download URL.
    pub browser_download_url: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Uploader.
    pub uploader: User,
}

/// Repository content (file or directory entry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Content type.
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Content encoding.
    pub encoding: Option<String>,
    /// Content size.
    pub size: u64,
    /// Content name.
    pub name: String,
    /// Content path.
    pub path: String,
    /// Content (base64 encoded for files).
    pub content: Option<String>,
    /// Git SHA.
    pub sha: String,
    /// Content URL.
    pub url: String,
    /// HTML URL.
    pub html_url: String,
    /// Git URL.
    pub git_url: Option<String>,
    /// Download URL.
    pub download_url: Option<String>,
}

/// Content type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// File content.
    File,
    /// Directory content.
    Dir,
    /// Symbolic link.
    Symlink,
    /// Git submodule.
    Submodule,
}

/// Workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    /// Workflow ID.
    pub id: u64,
    /// Node ID.
    pub node_id: String,
    /// Workflow name.
    pub name: String,
    /// Workflow path.
    pub path: String,
    /// Workflow state.
    pub state: WorkflowState,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// HTML URL.
    pub html_url: String,
    /// Badge URL.
    pub badge_url: String,
}

/// Workflow state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// Active workflow.
    Active,
    /// Deleted workflow.
    Deleted,
    /// Disabled on a fork.
    DisabledFork,
    /// Disabled by inactivity.
    DisabledInactivity,
    /// Disabled manually.
    DisabledManually,
}

/// Workflow run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRun {
    /// Run ID.
    pub id: u64,
    /// Node ID.
    pub node_id: String,
    /// Run name.
    pub name: Option<String>,
    /// Workflow ID.
    pub workflow_id: u64,
    /// Run number.
    pub run_number: u32,
    /// Run attempt.
    pub run_attempt: u32,
    /// Event that triggered the run.
    pub event: String,
    /// Run status.
    pub status: Option<WorkflowRunStatus>,
    /// Run conclusion.
    pub conclusion: Option<WorkflowRunConclusion>,
    /// Head branch.
    pub head_branch: Option<String>,
    /// Head SHA.
    pub head_sha: String,
    /// HTML URL.
    pub html_url: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Run start time.
    pub run_started_at: Option<DateTime<Utc>>,
}

/// Workflow run status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowRunStatus {
    /// Queued.
    Queued,
    /// In progress.
    InProgress,
    /// Completed.
    Completed,
    /// Waiting.
    Waiting,
    /// Requested.
    Requested,
    /// Pending.
    Pending,
}

/// Workflow run conclusion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowRunConclusion {
    /// Success.
    Success,
    /// Failure.
    Failure,
    /// Neutral.
    Neutral,
    /// Cancelled.
    Cancelled,
    /// Skipped.
    Skipped,
    /// Timed out.
    TimedOut,
    /// Action required.
    ActionRequired,
    /// Stale.
    Stale,
}

/// Actions secret (metadata only; values are never returned).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionsSecret {
    /// Secret name.
    pub name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Public key used to seal secrets before upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretsPublicKey {
    /// Key identifier, echoed back when uploading a sealed value.
    pub key_id: String,
    /// Base64-encoded public key.
    pub key: String,
}

/// Organization.
///
/// Collection endpoints return a reduced form; fields absent there are
/// optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Organization ID.
    pub id: u64,
    /// Node ID.
    pub node_id: String,
    /// Organization login.
    pub login: String,
    /// Organization name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Company.
    pub company: Option<String>,
    /// Blog URL.
    pub blog: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Avatar URL.
    pub avatar_url: String,
    /// HTML URL.
    pub html_url: Option<String>,
    /// Public repos count.
    pub public_repos: Option<u32>,
    /// Followers count.
    pub followers: Option<u32>,
    /// Following count.
    pub following: Option<u32>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Team ID.
    pub id: u64,
    /// Node ID.
    pub node_id: String,
    /// Team slug.
    pub slug: String,
    /// Team name.
    pub name: String,
    /// Team description.
    pub description: Option<String>,
    /// Privacy level.
    pub privacy: TeamPrivacy,
    /// Permission level.
    pub permission: String,
    /// HTML URL.
    pub html_url: String,
    /// Members count (detail responses only).
    pub members_count: Option<u32>,
    /// Repos count (detail responses only).
    pub repos_count: Option<u32>,
    /// Parent team.
    pub parent: Option<Box<Team>>,
}

/// Team privacy level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TeamPrivacy {
    /// Secret team.
    Secret,
    /// Closed team.
    Closed,
}

/// Classic project board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project ID.
    pub id: u64,
    /// Node ID.
    pub node_id: String,
    /// Project number.
    pub number: u32,
    /// Project name.
    pub name: String,
    /// Project body.
    pub body: Option<String>,
    /// Project state.
    pub state: ProjectState,
    /// Creator.
    pub creator: User,
    /// HTML URL.
    pub html_url: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Project state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProjectState {
    /// Open project.
    Open,
    /// Closed project.
    Closed,
}

/// Project column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectColumn {
    /// Column ID.
    pub id: u64,
    /// Node ID.
    pub node_id: String,
    /// Column name.
    pub name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Project card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCard {
    /// Card ID.
    pub id: u64,
    /// Node ID.
    pub node_id: String,
    /// Card note (absent for content-backed cards).
    pub note: Option<String>,
    /// Whether the card is archived.
    #[serde(default)]
    pub archived: bool,
    /// URL of the linked content (issue or pull request).
    pub content_url: Option<String>,
    /// Creator.
    pub creator: Option<User>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Repository subscription (watching).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Whether notifications are on.
    pub subscribed: bool,
    /// Whether notifications are suppressed entirely.
    pub ignored: bool,
    /// Subscription reason.
    pub reason: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Subscription URL.
    pub url: String,
    /// Repository URL.
    pub repository_url: String,
}

/// OAuth authorization (classic token management).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Authorization {
    /// Authorization ID.
    pub id: u64,
    /// Authorization URL.
    pub url: String,
    /// Granted scopes.
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Token value; populated only in the creation response.
    #[serde(default)]
    pub token: String,
    /// Last eight characters of the token.
    pub token_last_eight: Option<String>,
    /// SHA-256 hash of the token.
    pub hashed_token: Option<String>,
    /// Application the authorization belongs to.
    pub app: AuthorizationApp,
    /// Note.
    pub note: Option<String>,
    /// Note URL.
    pub note_url: Option<String>,
    /// Fingerprint distinguishing multiple tokens for one app.
    pub fingerprint: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Application associated with an authorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationApp {
    /// App URL.
    pub url: String,
    /// App name.
    pub name: String,
    /// OAuth client ID.
    pub client_id: String,
}

/// Comment (issues and pull requests).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Comment ID.
    pub id: u64,
    /// Node ID.
    pub node_id: String,
    /// Comment body.
    pub body: String,
    /// Comment author.
    pub user: User,
    /// HTML URL.
    pub html_url: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Webhook configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookConfig {
    /// Delivery URL.
    pub url: Option<String>,
    /// Content type (json or form).
    pub content_type: Option<String>,
    /// Secret (redacted in responses).
    pub secret: Option<String>,
    /// Whether to allow insecure SSL ("0" or "1").
    pub insecure_ssl: Option<String>,
}

/// Repository webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hook {
    /// Hook ID.
    pub id: u64,
    /// Hook type.
    #[serde(rename = "type")]
    pub hook_type: String,
    /// Hook name (always "web" for webhooks).
    pub name: String,
    /// Whether the hook is active.
    pub active: bool,
    /// Events that trigger the hook.
    pub events: Vec<String>,
    /// Hook configuration.
    pub config: HookConfig,
    /// Last delivery response.
    pub last_response: Option<HookLastResponse>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Webhook last delivery response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookLastResponse {
    /// Response code.
    pub code: Option<i32>,
    /// Response status.
    pub status: Option<String>,
    /// Response message.
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_user() {
        let json = r#"{
            "id": 1,
            "login": "octocat",
            "node_id": "MDQ6VXNlcjE=",
            "avatar_url": "https://forge.example/images/octocat.gif",
            "type": "User",
            "site_admin": false,
            "html_url": "https://forge.example/octocat"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(user.id, 1);
    }

    #[test]
    fn test_issue_state() {
        assert_eq!(
            serde_json::from_str::<IssueState>(r#""open""#).unwrap(),
            IssueState::Open
        );
        assert_eq!(
            serde_json::from_str::<IssueState>(r#""closed""#).unwrap(),
            IssueState::Closed
        );
    }

    #[test]
    fn test_deserialize_short_form_organization() {
        // Collection endpoints omit profile counts and timestamps.
        let json = r#"{
            "id": 9,
            "node_id": "MDEyOk9yZ2FuaXphdGlvbjk=",
            "login": "forge-org",
            "description": null,
            "avatar_url": "https://forge.example/avatars/9"
        }"#;

        let org: Organization = serde_json::from_str(json).unwrap();
        assert_eq!(org.login, "forge-org");
        assert!(org.public_repos.is_none());
        assert!(org.created_at.is_none());
    }

    #[test]
    fn test_deserialize_authorization_without_token() {
        // List responses blank the token and carry only its last eight.
        let json = r#"{
            "id": 2,
            "url": "https://api.forge.test/authorizations/2",
            "scopes": ["repo"],
            "token_last_eight": "6chYhhgU",
            "hashed_token": "25f94a2a5c7fbaf499c665bc73d67c1c87e496da8985131633ee0a95819db2e8",
            "app": {
                "url": "https://forge.example/settings/tokens",
                "name": "ci-token",
                "client_id": "00000000000000000000"
            },
            "note": "ci",
            "note_url": null,
            "fingerprint": null,
            "created_at": "2024-03-04T18:38:00Z",
            "updated_at": "2024-03-04T18:38:00Z"
        }"#;

        let authorization: Authorization = serde_json::from_str(json).unwrap();
        assert_eq!(authorization.token, "");
        assert_eq!(authorization.token_last_eight.as_deref(), Some("6chYhhgU"));
        assert_eq!(authorization.app.name, "ci-token");
    }
}
