//! Integration tests for the error taxonomy: every server failure surfaces
//! verbatim to the caller as a typed kind, with no retries.

mod common;

#[cfg(test)]
mod errors_tests {
    use crate::common::test_client;
    use forgekit::types::Repository;
    use forgekit::ForgeErrorKind;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_not_found_carries_server_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({
                        "message": "Not Found",
                        "documentation_url": "https://docs.forge.test/rest/repos"
                    }))
                    .insert_header("x-github-request-id", "AAAA:1234"),
            )
            .mount(&server)
            .await;
        let client = test_client(&server);

        let err = client
            .repositories()
            .get("octocat", "missing")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ForgeErrorKind::NotFound);
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.request_id(), Some("AAAA:1234"));
        assert_eq!(
            err.documentation_url(),
            Some("https://docs.forge.test/rest/repos")
        );
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "message": "Bad credentials" })),
            )
            .mount(&server)
            .await;
        let client = test_client(&server);

        let err = client.users().get_authenticated().await.unwrap_err();

        assert_eq!(err.kind(), ForgeErrorKind::Unauthorized);
        assert!(err.to_string().contains("Bad credentials"));
    }

    #[tokio::test]
    async fn test_forbidden_with_remaining_quota() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/repos/octocat/hello"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(json!({ "message": "Must have admin rights" }))
                    .insert_header("x-ratelimit-limit", "5000")
                    .insert_header("x-ratelimit-remaining", "4999")
                    .insert_header("x-ratelimit-reset", "1893456000"),
            )
            .mount(&server)
            .await;
        let client = test_client(&server);

        let err = client
            .repositories()
            .delete("octocat", "hello")
            .await
            .unwrap_err();

        // Permission failure, not quota: remaining is nonzero.
        assert_eq!(err.kind(), ForgeErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_exhausted_quota_upgrades_403_to_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(json!({ "message": "API rate limit exceeded" }))
                    .insert_header("x-ratelimit-limit", "60")
                    .insert_header("x-ratelimit-remaining", "0")
                    .insert_header("x-ratelimit-reset", "1893456000")
                    .insert_header("x-ratelimit-resource", "core"),
            )
            .mount(&server)
            .await;
        let client = test_client(&server);

        let err = client
            .repositories()
            .get("octocat", "hello")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ForgeErrorKind::RateLimited);
        assert!(err.is_rate_limited());
        let info = err.rate_limit().unwrap();
        assert_eq!(info.limit, 60);
        assert_eq!(info.remaining, 0);
        assert_eq!(info.resource.as_deref(), Some("core"));
    }

    #[tokio::test]
    async fn test_429_is_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("x-ratelimit-limit", "60")
                    .insert_header("x-ratelimit-remaining", "0")
                    .insert_header("x-ratelimit-reset", "1893456000")
                    .insert_header("retry-after", "30"),
            )
            .mount(&server)
            .await;
        let client = test_client(&server);

        let err = client
            .repositories()
            .get("octocat", "hello")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ForgeErrorKind::RateLimited);
        assert_eq!(err.retry_after(), Some(30));
    }

    #[tokio::test]
    async fn test_validation_failed_carries_field_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/octocat/hello/issues"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "message": "Validation Failed",
                "documentation_url": "https://docs.forge.test/rest/issues",
                "errors": [
                    {
                        "resource": "Issue",
                        "field": "title",
                        "code": "missing_field"
                    }
                ]
            })))
            .mount(&server)
            .await;
        let client = test_client(&server);

        let err = client
            .issues()
            .create(
                "octocat",
                "hello",
                &forgekit::services::CreateIssueRequest::with_title(""),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ForgeErrorKind::ValidationFailed);
        assert_eq!(err.field_errors().len(), 1);
        assert_eq!(err.field_errors()[0].field.as_deref(), Some("title"));
        assert_eq!(
            err.field_errors()[0].code.as_deref(),
            Some("missing_field")
        );
    }

    #[tokio::test]
    async fn test_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;
        let client = test_client(&server);

        let err = client
            .repositories()
            .get("octocat", "hello")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ForgeErrorKind::ServerError);
        assert_eq!(err.status_code(), Some(502));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_deserialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "not-a-number" })))
            .mount(&server)
            .await;
        let client = test_client(&server);

        let err = client
            .repositories()
            .get("octocat", "hello")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ForgeErrorKind::Deserialization);
    }

    #[tokio::test]
    async fn test_error_propagates_through_page_loop() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/repos"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "message": "Bad credentials" })),
            )
            .mount(&server)
            .await;
        let client = test_client(&server);

        let err = client
            .get_page::<Repository>(
                "/users/octocat/repos",
                &forgekit::pagination::PageRequest::new(5),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ForgeErrorKind::Unauthorized);
    }
}
