//! Helpers for integration suites that exercise a live forge.
//!
//! The fixture helpers here own the acquire/release discipline: a test body
//! borrows a freshly created repository and the helper deletes it on every
//! exit path, including assertion panics.

use crate::auth::AuthMethod;
use crate::client::ForgeClient;
use crate::config::ForgeConfig;
use crate::errors::{ForgeError, ForgeResult};
use crate::services::CreateRepoRequest;
use crate::types::Repository;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use uuid::Uuid;

/// Generates a collision-free fixture name: `{prefix}-{uuid}`.
pub fn unique_name(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// Runs `body` against a throwaway auto-initialized repository.
///
/// The repository is created under the authenticated account with a
/// [`unique_name`] and deleted when `body` completes, whether it returns,
/// errors, or panics. A panic is resumed after cleanup. If `body` succeeds
/// but the delete fails, the delete error becomes the call's result; if both
/// fail, the body's error wins and the delete failure is logged.
pub async fn with_temp_repository<F, Fut, T>(
    client: &ForgeClient,
    name_prefix: &str,
    body: F,
) -> ForgeResult<T>
where
    F: FnOnce(Repository) -> Fut,
    Fut: Future<Output = ForgeResult<T>>,
{
    let mut request = CreateRepoRequest::with_name(unique_name(name_prefix));
    request.auto_init = Some(true);

    let repository = client.repositories().create(&request).await?;
    let owner = repository.owner.login.clone();
    let name = repository.name.clone();
    tracing::debug!(owner = %owner, repo = %name, "created fixture repository");

    let outcome = AssertUnwindSafe(body(repository)).catch_unwind().await;

    let deleted = client.repositories().delete(&owner, &name).await;

    match outcome {
        Err(panic) => {
            if let Err(e) = deleted {
                tracing::warn!(
                    owner = %owner,
                    repo = %name,
                    error = %e,
                    "failed to delete fixture repository after panic"
                );
            }
            std::panic::resume_unwind(panic)
        }
        Ok(Err(body_err)) => {
            if let Err(e) = deleted {
                tracing::warn!(
                    owner = %owner,
                    repo = %name,
                    error = %e,
                    "failed to delete fixture repository after test error"
                );
            }
            Err(body_err)
        }
        Ok(Ok(value)) => {
            deleted?;
            Ok(value)
        }
    }
}

/// Polls `probe` at a fixed `delay` until it yields a value.
///
/// The probe reports `Ok(None)` to keep waiting; errors propagate
/// immediately. Exhausting `attempts` yields a
/// [`Timeout`](crate::errors::ForgeErrorKind::Timeout) error. Useful for
/// eventually-consistent reads such as a freshly dispatched workflow run.
pub async fn poll_until<F, Fut, T>(attempts: u32, delay: Duration, mut probe: F) -> ForgeResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ForgeResult<Option<T>>>,
{
    for attempt in 0..attempts {
        if attempt > 0 {
            tokio::time::sleep(delay).await;
        }
        if let Some(value) = probe().await? {
            return Ok(value);
        }
    }
    Err(ForgeError::timeout(format!(
        "condition not met after {} attempts",
        attempts
    )))
}

/// Builds a client from `FORGE_TOKEN` and optional `FORGE_BASE_URL`.
///
/// Returns `None` when `FORGE_TOKEN` is unset so live suites can self-skip.
pub fn client_from_env() -> Option<ForgeClient> {
    let token = std::env::var("FORGE_TOKEN").ok()?;

    let mut builder = ForgeConfig::builder().auth(AuthMethod::token(token));
    if let Ok(base_url) = std::env::var("FORGE_BASE_URL") {
        builder = builder.base_url(base_url);
    }

    match builder.build().and_then(ForgeClient::new) {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::warn!(error = %e, "failed to build client from environment");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ForgeErrorKind;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_unique_name_shape() {
        let name = unique_name("fixture");
        assert!(name.starts_with("fixture-"));
        // 32 hex chars in the simple uuid form
        assert_eq!(name.len(), "fixture-".len() + 32);
        assert_ne!(name, unique_name("fixture"));
    }

    #[tokio::test]
    async fn test_poll_until_returns_on_success() {
        let calls = AtomicU32::new(0);
        let value = poll_until(5, Duration::from_millis(1), || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Ok(if n >= 3 { Some(n) } else { None }) }
        })
        .await
        .unwrap();

        assert_eq!(value, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_poll_until_times_out() {
        let err = poll_until(3, Duration::from_millis(1), || async {
            Ok(None::<u32>)
        })
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ForgeErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_poll_until_propagates_probe_error() {
        let calls = AtomicU32::new(0);
        let err = poll_until(5, Duration::from_millis(1), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<Option<u32>, _>(ForgeError::not_found("gone")) }
        })
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ForgeErrorKind::NotFound);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
