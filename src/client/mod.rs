//! Forge API client implementation.

use crate::auth::{AuthManager, AuthMethod};
use crate::config::{Capabilities, ForgeConfig, ForgeConfigBuilder, SecretSealer};
use crate::errors::{FieldError, ForgeError, ForgeResult, RateLimitInfo};
use crate::pagination::{Page, PageLinks, PageRequest};
use crate::services::*;
use chrono::DateTime;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Error response body format.
#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    message: String,
    documentation_url: Option<String>,
    errors: Option<Vec<FieldError>>,
}

/// Identity extractor for endpoints that return a bare JSON array.
fn collection_identity<T>(items: Vec<T>) -> (Vec<T>, Option<u64>) {
    (items, None)
}

/// Forge API client.
///
/// Every call is a stateless request/response round trip; the client holds
/// no mutable state and performs no retries, throttling, or caching.
pub struct ForgeClient {
    /// HTTP client.
    http: Client,
    /// Configuration.
    config: ForgeConfig,
    /// Authentication manager.
    auth: AuthManager,
}

impl ForgeClient {
    /// Creates a new forge client.
    pub fn new(config: ForgeConfig) -> ForgeResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool.max_idle_per_host)
            .pool_idle_timeout(config.pool.idle_timeout)
            .build()
            .map_err(|e| {
                ForgeError::configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        let auth = AuthManager::new(config.auth.clone());

        tracing::debug!(
            base_url = %config.base_url,
            auth = auth.method().map(|m| m.scheme()).unwrap_or("none"),
            secret_sealing = config.capabilities.secret_sealing(),
            "forge client initialized"
        );

        Ok(Self { http, config, auth })
    }

    /// Creates a new client builder.
    pub fn builder() -> ForgeClientBuilder {
        ForgeClientBuilder::new()
    }

    /// Gets the base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Gets the runtime capability set.
    pub fn capabilities(&self) -> &Capabilities {
        &self.config.capabilities
    }

    // Service accessors

    /// Gets the repositories service.
    pub fn repositories(&self) -> RepositoriesService {
        RepositoriesService::new(self)
    }

    /// Gets the issues service.
    pub fn issues(&self) -> IssuesService {
        IssuesService::new(self)
    }

    /// Gets the milestones service.
    pub fn milestones(&self) -> MilestonesService {
        MilestonesService::new(self)
    }

    /// Gets the pull requests service.
    pub fn pull_requests(&self) -> PullRequestsService {
        PullRequestsService::new(self)
    }

    /// Gets the organizations service.
    pub fn organizations(&self) -> OrganizationsService {
        OrganizationsService::new(self)
    }

    /// Gets the teams service.
    pub fn teams(&self) -> TeamsService {
        TeamsService::new(self)
    }

    /// Gets the projects service.
    pub fn projects(&self) -> ProjectsService {
        ProjectsService::new(self)
    }

    /// Gets the actions service.
    pub fn actions(&self) -> ActionsService {
        ActionsService::new(self)
    }

    /// Gets the activity (starring/watching) service.
    pub fn activity(&self) -> ActivityService {
        ActivityService::new(self)
    }

    /// Gets the repository webhooks service.
    pub fn hooks(&self) -> HooksService {
        HooksService::new(self)
    }

    /// Gets the authorizations service.
    pub fn authorizations(&self) -> AuthorizationsService {
        AuthorizationsService::new(self)
    }

    /// Gets the users service.
    pub fn users(&self) -> UsersService {
        UsersService::new(self)
    }

    // HTTP methods

    /// Makes a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ForgeResult<T> {
        self.request(Method::GET, path, Option::<&()>::None).await
    }

    /// Makes a GET request with query parameters.
    pub async fn get_with_params<T: DeserializeOwned, P: Serialize>(
        &self,
        path: &str,
        params: &P,
    ) -> ForgeResult<T> {
        let url = self.url_with_params(path, params)?;
        let response = self
            .execute_request(Method::GET, &url, Option::<&()>::None)
            .await?;
        Self::decode(response).await
    }

    /// Fetches raw bytes (e.g. archived logs); follows redirects.
    pub async fn get_bytes(&self, path: &str) -> ForgeResult<bytes::Bytes> {
        let url = self.build_url(path);
        let response = self
            .execute_request(Method::GET, &url, Option::<&()>::None)
            .await?;
        Ok(response.bytes().await?)
    }

    /// Makes a POST request.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ForgeResult<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Makes a POST request without a response body.
    pub async fn post_no_response<B: Serialize>(&self, path: &str, body: &B) -> ForgeResult<()> {
        self.request_no_response(Method::POST, path, Some(body)).await
    }

    /// Makes a PUT request.
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ForgeResult<T> {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// Makes a PUT request without a response body.
    pub async fn put_no_response<B: Serialize>(&self, path: &str, body: &B) -> ForgeResult<()> {
        self.request_no_response(Method::PUT, path, Some(body)).await
    }

    /// Makes a PATCH request.
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ForgeResult<T> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// Makes a DELETE request.
    pub async fn delete(&self, path: &str) -> ForgeResult<()> {
        self.request_no_response(Method::DELETE, path, Option::<&()>::None)
            .await
    }

    /// Makes a request and returns the raw response.
    pub async fn raw_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ForgeResult<Response> {
        let url = self.build_url(path);
        self.execute_request(method, &url, body).await
    }

    // Paginated listing contract

    /// Fetches a bounded window of a collection endpoint.
    ///
    /// Translates `request` into `page`/`per_page` parameters and issues up
    /// to `page_count` sequential fetches starting at `start_page`,
    /// concatenating the results. Stops early once the server reports no
    /// more data (a short page or no `rel="next"` link). A `start_page`
    /// beyond the collection's end yields an empty page, not an error.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &PageRequest,
    ) -> ForgeResult<Page<T>> {
        self.get_page_extract(path, Option::<&()>::None, request, collection_identity)
            .await
    }

    /// Like [`get_page`](Self::get_page), with filter parameters appended to
    /// the query string.
    pub async fn get_page_with_params<T: DeserializeOwned, P: Serialize>(
        &self,
        path: &str,
        params: &P,
        request: &PageRequest,
    ) -> ForgeResult<Page<T>> {
        self.get_page_extract(path, Some(params), request, collection_identity)
            .await
    }

    /// Fetches an entire collection by following `rel="next"` continuation
    /// cues until exhausted. Fetches are strictly sequential.
    pub async fn get_all<T: DeserializeOwned>(&self, path: &str) -> ForgeResult<Vec<T>> {
        self.get_all_extract(path, Option::<&()>::None, collection_identity)
            .await
    }

    /// Like [`get_all`](Self::get_all), with filter parameters appended to
    /// the query string.
    pub async fn get_all_with_params<T: DeserializeOwned, P: Serialize>(
        &self,
        path: &str,
        params: &P,
    ) -> ForgeResult<Vec<T>> {
        self.get_all_extract(path, Some(params), collection_identity)
            .await
    }

    /// Page-window fetch for endpoints that wrap the collection in an
    /// envelope object; `extract` pulls out the items and the reported
    /// total count.
    pub(crate) async fn get_page_extract<E, T, P, F>(
        &self,
        path: &str,
        params: Option<&P>,
        request: &PageRequest,
        extract: F,
    ) -> ForgeResult<Page<T>>
    where
        E: DeserializeOwned,
        P: Serialize,
        F: Fn(E) -> (Vec<T>, Option<u64>),
    {
        request.validate()?;
        let filter_query = self.encode_params(params)?;

        let mut items: Vec<T> = Vec::new();
        let mut links = PageLinks::default();
        let mut total_count = None;
        let mut pages_fetched = 0u32;

        for page in request.pages() {
            let page_query = serde_urlencoded::to_string(request.query_for(page))
                .map_err(|e| ForgeError::invalid_parameter(e.to_string()))?;
            let url = format!(
                "{}?{}",
                self.build_url(path),
                join_query(&filter_query, &page_query)
            );

            let response = self
                .execute_request(Method::GET, &url, Option::<&()>::None)
                .await?;
            links = PageLinks::from_headers(response.headers());

            let envelope: E = Self::decode(response).await?;
            let (batch, total) = extract(envelope);
            if total.is_some() {
                total_count = total;
            }

            let batch_len = batch.len();
            items.extend(batch);
            pages_fetched += 1;

            if (batch_len as u64) < u64::from(request.page_size()) || !links.has_next() {
                break;
            }
        }

        let mut page = Page::new(items, links)
            .with_start_page(request.start_page())
            .with_page_size(request.page_size())
            .with_pages_fetched(pages_fetched);
        if let Some(total) = total_count {
            page = page.with_total_count(total);
        }
        Ok(page)
    }

    /// Exhaustive fetch for envelope endpoints.
    pub(crate) async fn get_all_extract<E, T, P, F>(
        &self,
        path: &str,
        params: Option<&P>,
        extract: F,
    ) -> ForgeResult<Vec<T>>
    where
        E: DeserializeOwned,
        P: Serialize,
        F: Fn(E) -> (Vec<T>, Option<u64>),
    {
        let filter_query = self.encode_params(params)?;
        let mut url = if filter_query.is_empty() {
            self.build_url(path)
        } else {
            format!("{}?{}", self.build_url(path), filter_query)
        };

        let mut items: Vec<T> = Vec::new();
        loop {
            let response = self
                .execute_request(Method::GET, &url, Option::<&()>::None)
                .await?;
            let links = PageLinks::from_headers(response.headers());

            let envelope: E = Self::decode(response).await?;
            let (batch, _) = extract(envelope);
            items.extend(batch);

            match links.next {
                Some(next) => url = next,
                None => break,
            }
        }
        Ok(items)
    }

    // Internal methods

    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ForgeResult<T> {
        let url = self.build_url(path);
        let response = self.execute_request(method, &url, body).await?;
        Self::decode(response).await
    }

    async fn request_no_response<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ForgeResult<()> {
        let url = self.build_url(path);
        self.execute_request(method, &url, body).await?;
        Ok(())
    }

    async fn execute_request<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> ForgeResult<Response> {
        let auth_header = self.auth.authorization_header()?;
        let started = Instant::now();
        tracing::debug!(%method, url, "sending request");

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", &self.config.api_version);

        if let Some(header) = auth_header {
            request = request.header(AUTHORIZATION, header);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        let status = response.status();
        let elapsed_ms = started.elapsed().as_millis() as u64;
        if !status.is_success() {
            tracing::warn!(
                %method,
                url,
                status = status.as_u16(),
                elapsed_ms,
                "request failed"
            );
            let rate_limit = Self::extract_rate_limit(response.headers());
            return Err(Self::handle_error_response(response, rate_limit).await);
        }

        tracing::debug!(status = status.as_u16(), elapsed_ms, "request completed");
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ForgeResult<T> {
        response.json().await.map_err(|e| {
            ForgeError::deserialization(format!("Failed to deserialize response: {}", e))
        })
    }

    fn build_url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn url_with_params<P: Serialize>(&self, path: &str, params: &P) -> ForgeResult<String> {
        let query = self.encode_params(Some(params))?;
        if query.is_empty() {
            Ok(self.build_url(path))
        } else {
            Ok(format!("{}?{}", self.build_url(path), query))
        }
    }

    fn encode_params<P: Serialize>(&self, params: Option<&P>) -> ForgeResult<String> {
        match params {
            None => Ok(String::new()),
            Some(p) => serde_urlencoded::to_string(p).map_err(|e| {
                ForgeError::invalid_parameter(format!("Failed to serialize parameters: {}", e))
            }),
        }
    }

    fn extract_rate_limit(headers: &HeaderMap) -> Option<RateLimitInfo> {
        let limit = headers
            .get("x-ratelimit-limit")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())?;

        let remaining = headers
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())?;

        let reset_timestamp: i64 = headers
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())?;

        let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

        let retry_after = headers
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let resource = headers
            .get("x-ratelimit-resource")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Some(RateLimitInfo {
            limit,
            remaining,
            reset_at,
            retry_after,
            resource,
        })
    }

    async fn handle_error_response(
        response: Response,
        rate_limit: Option<RateLimitInfo>,
    ) -> ForgeError {
        let status = response.status();
        let request_id = response
            .headers()
            .get("x-github-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        // An exhausted quota arrives as 403 with zeroed rate-limit headers.
        if status == StatusCode::FORBIDDEN {
            if let Some(ref info) = rate_limit {
                if info.remaining == 0 {
                    let mut error = ForgeError::rate_limited(info.clone());
                    if let Some(id) = request_id {
                        error = error.with_request_id(id);
                    }
                    return error;
                }
            }
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            let mut error = ForgeError::from_response(
                status.as_u16(),
                "Rate limit exceeded".to_string(),
                None,
                request_id,
            );
            if let Some(info) = rate_limit {
                error = error.with_rate_limit(info);
            }
            return error;
        }

        let error_body = response.json::<ApiErrorBody>().await.ok();

        let message = error_body
            .as_ref()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| format!("HTTP {} error", status.as_u16()));

        let documentation_url = error_body.as_ref().and_then(|e| e.documentation_url.clone());

        let mut error =
            ForgeError::from_response(status.as_u16(), message, documentation_url, request_id);

        if let Some(field_errors) = error_body.and_then(|e| e.errors) {
            error = error.with_field_errors(field_errors);
        }
        if let Some(info) = rate_limit {
            error = error.with_rate_limit(info);
        }

        error
    }
}

/// Joins two query-string fragments, either of which may be empty.
fn join_query(base: &str, extra: &str) -> String {
    match (base.is_empty(), extra.is_empty()) {
        (true, _) => extra.to_string(),
        (_, true) => base.to_string(),
        (false, false) => format!("{}&{}", base, extra),
    }
}

/// Builder for ForgeClient.
pub struct ForgeClientBuilder {
    config_builder: ForgeConfigBuilder,
}

impl ForgeClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config_builder: ForgeConfig::builder(),
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(url);
        self
    }

    /// Sets the authentication method.
    pub fn auth(mut self, auth: AuthMethod) -> Self {
        self.config_builder = self.config_builder.auth(auth);
        self
    }

    /// Sets an access token.
    pub fn token(self, token: impl Into<String>) -> Self {
        self.auth(AuthMethod::token(token))
    }

    /// Sets basic credentials.
    pub fn basic(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth(AuthMethod::basic(username, password))
    }

    /// Sets the timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(ua);
        self
    }

    /// Sets the API version header.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_version(version);
        self
    }

    /// Registers a secret sealer, enabling the secret-sealing capability.
    pub fn secret_sealer(mut self, sealer: Arc<dyn SecretSealer>) -> Self {
        self.config_builder = self.config_builder.secret_sealer(sealer);
        self
    }

    /// Builds the client.
    pub fn build(self) -> ForgeResult<ForgeClient> {
        let config = self.config_builder.build()?;
        ForgeClient::new(config)
    }
}

impl Default for ForgeClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let config = ForgeConfig::builder()
            .auth(AuthMethod::token("test"))
            .build()
            .unwrap();
        let client = ForgeClient::new(config).unwrap();

        assert_eq!(
            client.build_url("/repos/owner/repo"),
            "https://api.github.com/repos/owner/repo"
        );
        assert_eq!(
            client.build_url("repos/owner/repo"),
            "https://api.github.com/repos/owner/repo"
        );
    }

    #[test]
    fn test_join_query() {
        assert_eq!(join_query("", "page=1"), "page=1");
        assert_eq!(join_query("state=open", ""), "state=open");
        assert_eq!(join_query("state=open", "page=1"), "state=open&page=1");
    }

    #[test]
    fn test_client_builder() {
        let result = ForgeClient::builder()
            .token("tok_xxxx")
            .user_agent("test-client/1.0")
            .build();

        assert!(result.is_ok());
    }

    #[test]
    fn test_unauthenticated_client_allowed() {
        let result = ForgeClient::builder().build();
        assert!(result.is_ok());
    }
}
