//! Workflow automation (actions) operations.
//!
//! Workflow and secret collections arrive wrapped in `{ total_count, items }`
//! envelopes rather than bare arrays; the listing methods unwrap them and
//! surface the reported total through [`Page::total_count`](crate::pagination::Page::total_count).

use crate::client::ForgeClient;
use crate::errors::{ForgeError, ForgeResult};
use crate::pagination::{Page, PageRequest};
use crate::types::{ActionsSecret, SecretsPublicKey, Workflow, WorkflowRun};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Service for workflow automation operations.
pub struct ActionsService<'a> {
    client: &'a ForgeClient,
}

impl<'a> ActionsService<'a> {
    /// Creates a new actions service.
    pub fn new(client: &'a ForgeClient) -> Self {
        Self { client }
    }

    // Workflows

    /// Lists all workflows in a repository.
    pub async fn list_workflows(&self, owner: &str, repo: &str) -> ForgeResult<Vec<Workflow>> {
        self.client
            .get_all_extract(
                &format!("/repos/{}/{}/actions/workflows", owner, repo),
                Option::<&()>::None,
                |e: WorkflowsEnvelope| (e.workflows, Some(e.total_count)),
            )
            .await
    }

    /// Lists a page window of workflows in a repository.
    pub async fn list_workflows_page(
        &self,
        owner: &str,
        repo: &str,
        page: &PageRequest,
    ) -> ForgeResult<Page<Workflow>> {
        self.client
            .get_page_extract(
                &format!("/repos/{}/{}/actions/workflows", owner, repo),
                Option::<&()>::None,
                page,
                |e: WorkflowsEnvelope| (e.workflows, Some(e.total_count)),
            )
            .await
    }

    /// Gets a workflow.
    pub async fn get_workflow(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: WorkflowId,
    ) -> ForgeResult<Workflow> {
        let id = workflow_id.to_string();
        self.client
            .get(&format!("/repos/{}/{}/actions/workflows/{}", owner, repo, id))
            .await
    }

    /// Disables a workflow.
    pub async fn disable_workflow(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: WorkflowId,
    ) -> ForgeResult<()> {
        let id = workflow_id.to_string();
        self.client
            .put_no_response(
                &format!("/repos/{}/{}/actions/workflows/{}/disable", owner, repo, id),
                &(),
            )
            .await
    }

    /// Enables a workflow.
    pub async fn enable_workflow(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: WorkflowId,
    ) -> ForgeResult<()> {
        let id = workflow_id.to_string();
        self.client
            .put_no_response(
                &format!("/repos/{}/{}/actions/workflows/{}/enable", owner, repo, id),
                &(),
            )
            .await
    }

    /// Triggers a workflow dispatch event.
    pub async fn create_workflow_dispatch(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: WorkflowId,
        request: &WorkflowDispatchRequest,
    ) -> ForgeResult<()> {
        let id = workflow_id.to_string();
        self.client
            .post_no_response(
                &format!(
                    "/repos/{}/{}/actions/workflows/{}/dispatches",
                    owner, repo, id
                ),
                request,
            )
            .await
    }

    // Workflow runs

    /// Lists all workflow runs in a repository.
    pub async fn list_runs(
        &self,
        owner: &str,
        repo: &str,
        filter: &ListRunsFilter,
    ) -> ForgeResult<Vec<WorkflowRun>> {
        self.client
            .get_all_extract(
                &format!("/repos/{}/{}/actions/runs", owner, repo),
                Some(filter),
                |e: WorkflowRunsEnvelope| (e.workflow_runs, Some(e.total_count)),
            )
            .await
    }

    /// Lists a page window of workflow runs in a repository.
    pub async fn list_runs_page(
        &self,
        owner: &str,
        repo: &str,
        filter: &ListRunsFilter,
        page: &PageRequest,
    ) -> ForgeResult<Page<WorkflowRun>> {
        self.client
            .get_page_extract(
                &format!("/repos/{}/{}/actions/runs", owner, repo),
                Some(filter),
                page,
                |e: WorkflowRunsEnvelope| (e.workflow_runs, Some(e.total_count)),
            )
            .await
    }

    /// Lists all runs for a specific workflow.
    pub async fn list_runs_for_workflow(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: WorkflowId,
        filter: &ListRunsFilter,
    ) -> ForgeResult<Vec<WorkflowRun>> {
        let id = workflow_id.to_string();
        self.client
            .get_all_extract(
                &format!("/repos/{}/{}/actions/workflows/{}/runs", owner, repo, id),
                Some(filter),
                |e: WorkflowRunsEnvelope| (e.workflow_runs, Some(e.total_count)),
            )
            .await
    }

    /// Lists a page window of runs for a specific workflow.
    pub async fn list_runs_for_workflow_page(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: WorkflowId,
        filter: &ListRunsFilter,
        page: &PageRequest,
    ) -> ForgeResult<Page<WorkflowRun>> {
        let id = workflow_id.to_string();
        self.client
            .get_page_extract(
                &format!("/repos/{}/{}/actions/workflows/{}/runs", owner, repo, id),
                Some(filter),
                page,
                |e: WorkflowRunsEnvelope| (e.workflow_runs, Some(e.total_count)),
            )
            .await
    }

    /// Gets a workflow run.
    pub async fn get_run(&self, owner: &str, repo: &str, run_id: u64) -> ForgeResult<WorkflowRun> {
        self.client
            .get(&format!("/repos/{}/{}/actions/runs/{}", owner, repo, run_id))
            .await
    }

    /// Cancels a workflow run.
    pub async fn cancel_run(&self, owner: &str, repo: &str, run_id: u64) -> ForgeResult<()> {
        self.client
            .post_no_response(
                &format!("/repos/{}/{}/actions/runs/{}/cancel", owner, repo, run_id),
                &(),
            )
            .await
    }

    /// Re-runs a workflow run.
    pub async fn rerun(&self, owner: &str, repo: &str, run_id: u64) -> ForgeResult<()> {
        self.client
            .post_no_response(
                &format!("/repos/{}/{}/actions/runs/{}/rerun", owner, repo, run_id),
                &(),
            )
            .await
    }

    /// Deletes a workflow run.
    pub async fn delete_run(&self, owner: &str, repo: &str, run_id: u64) -> ForgeResult<()> {
        self.client
            .delete(&format!("/repos/{}/{}/actions/runs/{}", owner, repo, run_id))
            .await
    }

    /// Downloads workflow run logs as a zip archive.
    pub async fn download_run_logs(
        &self,
        owner: &str,
        repo: &str,
        run_id: u64,
    ) -> ForgeResult<bytes::Bytes> {
        self.client
            .get_bytes(&format!(
                "/repos/{}/{}/actions/runs/{}/logs",
                owner, repo, run_id
            ))
            .await
    }

    // Secrets

    /// Lists all secrets in a repository (names only; values are write-only).
    pub async fn list_secrets(&self, owner: &str, repo: &str) -> ForgeResult<Vec<ActionsSecret>> {
        self.client
            .get_all_extract(
                &format!("/repos/{}/{}/actions/secrets", owner, repo),
                Option::<&()>::None,
                |e: SecretsEnvelope| (e.secrets, Some(e.total_count)),
            )
            .await
    }

    /// Lists a page window of secrets in a repository.
    pub async fn list_secrets_page(
        &self,
        owner: &str,
        repo: &str,
        page: &PageRequest,
    ) -> ForgeResult<Page<ActionsSecret>> {
        self.client
            .get_page_extract(
                &format!("/repos/{}/{}/actions/secrets", owner, repo),
                Option::<&()>::None,
                page,
                |e: SecretsEnvelope| (e.secrets, Some(e.total_count)),
            )
            .await
    }

    /// Gets a secret's metadata.
    pub async fn get_secret(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
    ) -> ForgeResult<ActionsSecret> {
        self.client
            .get(&format!("/repos/{}/{}/actions/secrets/{}", owner, repo, name))
            .await
    }

    /// Gets the repository public key used to seal secret values.
    pub async fn get_public_key(&self, owner: &str, repo: &str) -> ForgeResult<SecretsPublicKey> {
        self.client
            .get(&format!(
                "/repos/{}/{}/actions/secrets/public-key",
                owner, repo
            ))
            .await
    }

    /// Creates or updates a secret from an already-sealed value.
    pub async fn create_or_update_secret(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        request: &CreateSecretRequest,
    ) -> ForgeResult<()> {
        self.client
            .put_no_response(
                &format!("/repos/{}/{}/actions/secrets/{}", owner, repo, name),
                request,
            )
            .await
    }

    /// Seals a plaintext value and uploads it as a secret.
    ///
    /// Requires the secret-sealing capability: a
    /// [`SecretSealer`](crate::config::SecretSealer) must be registered on
    /// the client's configuration, otherwise this fails with
    /// [`CapabilityDisabled`](crate::errors::ForgeErrorKind::CapabilityDisabled)
    /// before any network traffic.
    pub async fn put_secret(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        plaintext: &[u8],
    ) -> ForgeResult<()> {
        let sealer = self
            .client
            .capabilities()
            .secret_sealer()
            .ok_or_else(|| ForgeError::capability_disabled("secret_sealer"))?;

        let key = self.get_public_key(owner, repo).await?;
        let encrypted_value = sealer.seal(&key, plaintext).await?;
        let request = CreateSecretRequest {
            encrypted_value,
            key_id: key.key_id,
        };
        self.create_or_update_secret(owner, repo, name, &request)
            .await
    }

    /// Deletes a secret.
    pub async fn delete_secret(&self, owner: &str, repo: &str, name: &str) -> ForgeResult<()> {
        self.client
            .delete(&format!("/repos/{}/{}/actions/secrets/{}", owner, repo, name))
            .await
    }
}

/// Workflow identifier (ID or filename).
#[derive(Debug, Clone)]
pub enum WorkflowId {
    /// Numeric workflow ID.
    Id(u64),
    /// Workflow filename (e.g., "ci.yml").
    Filename(String),
}

impl std::fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowId::Id(id) => write!(f, "{}", id),
            WorkflowId::Filename(name) => write!(f, "{}", name),
        }
    }
}

impl From<u64> for WorkflowId {
    fn from(id: u64) -> Self {
        WorkflowId::Id(id)
    }
}

impl From<&str> for WorkflowId {
    fn from(name: &str) -> Self {
        WorkflowId::Filename(name.to_string())
    }
}

impl From<String> for WorkflowId {
    fn from(name: String) -> Self {
        WorkflowId::Filename(name)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct WorkflowsEnvelope {
    total_count: u64,
    workflows: Vec<Workflow>,
}

#[derive(Debug, Clone, Deserialize)]
struct WorkflowRunsEnvelope {
    total_count: u64,
    workflow_runs: Vec<WorkflowRun>,
}

#[derive(Debug, Clone, Deserialize)]
struct SecretsEnvelope {
    total_count: u64,
    secrets: Vec<ActionsSecret>,
}

/// Filter for listing workflow runs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListRunsFilter {
    /// Filter by the user who triggered the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    /// Filter by branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Filter by trigger event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// Filter by status or conclusion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RunStatusFilter>,
    /// Filter by creation date range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Exclude runs for pull requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_pull_requests: Option<bool>,
    /// Filter by head SHA.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_sha: Option<String>,
}

/// Run status filter; accepts both statuses and conclusions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatusFilter {
    Completed,
    ActionRequired,
    Cancelled,
    Failure,
    Neutral,
    Skipped,
    Stale,
    Success,
    TimedOut,
    InProgress,
    Queued,
    Requested,
    Waiting,
    Pending,
}

/// Request to trigger a workflow dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowDispatchRequest {
    /// Git ref (branch or tag).
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Input parameters for the workflow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<HashMap<String, String>>,
}

impl WorkflowDispatchRequest {
    /// Creates a dispatch request without inputs.
    pub fn for_ref(git_ref: impl Into<String>) -> Self {
        Self {
            git_ref: git_ref.into(),
            inputs: None,
        }
    }
}

/// Request to create or update a secret.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSecretRequest {
    /// Sealed value (base64 encoded).
    pub encrypted_value: String,
    /// ID of the public key the value was sealed with.
    pub key_id: String,
}
