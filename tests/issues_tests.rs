//! Integration tests for the issues service.

mod common;

#[cfg(test)]
mod issues_tests {
    use crate::common::{issue_json, test_client, user_json};
    use forgekit::services::{
        CreateIssueRequest, IssueSort, ListIssuesFilter, LockReason, StateFilter,
        UpdateIssueRequest,
    };
    use forgekit::types::IssueState;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn comment_json(id: u64, body: &str) -> serde_json::Value {
        json!({
            "id": id,
            "node_id": format!("IC_{}", id),
            "body": body,
            "user": user_json("octocat"),
            "html_url": format!("https://forge.test/octocat/hello/issues/1#issuecomment-{}", id),
            "created_at": "2024-02-02T10:00:00Z",
            "updated_at": "2024-02-02T10:00:00Z"
        })
    }

    fn label_json(name: &str, color: &str) -> serde_json::Value {
        json!({
            "id": 99,
            "node_id": "LA_99",
            "name": name,
            "color": color,
            "description": null,
            "default": false,
            "url": format!("https://api.forge.test/repos/octocat/hello/labels/{}", name)
        })
    }

    #[tokio::test]
    async fn test_list_sends_filter_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello/issues"))
            .and(query_param("state", "all"))
            .and(query_param("labels", "bug,p1"))
            .and(query_param("sort", "created"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([issue_json(1, "First bug")])),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = test_client(&server);

        let filter = ListIssuesFilter {
            state: Some(StateFilter::All),
            labels: Some("bug,p1".to_string()),
            sort: Some(IssueSort::Created),
            ..Default::default()
        };
        let issues = client
            .issues()
            .list("octocat", "hello", &filter)
            .await
            .unwrap();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].title, "First bug");
        assert_eq!(issues[0].state, IssueState::Open);
    }

    #[tokio::test]
    async fn test_create_issue() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/octocat/hello/issues"))
            .and(body_json(json!({
                "title": "Found a bug",
                "labels": ["bug"]
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(issue_json(17, "Found a bug")),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = test_client(&server);

        let mut request = CreateIssueRequest::with_title("Found a bug");
        request.labels = Some(vec!["bug".to_string()]);
        let issue = client
            .issues()
            .create("octocat", "hello", &request)
            .await
            .unwrap();

        assert_eq!(issue.number, 17);
        assert_eq!(issue.title, "Found a bug");
    }

    #[tokio::test]
    async fn test_close_issue_sends_only_state() {
        let server = MockServer::start().await;
        let mut closed = issue_json(17, "Found a bug");
        closed["state"] = json!("closed");
        closed["closed_at"] = json!("2024-02-03T10:00:00Z");

        Mock::given(method("PATCH"))
            .and(path("/repos/octocat/hello/issues/17"))
            .and(body_json(json!({ "state": "closed" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(closed))
            .expect(1)
            .mount(&server)
            .await;
        let client = test_client(&server);

        let request = UpdateIssueRequest {
            state: Some(IssueState::Closed),
            ..Default::default()
        };
        let issue = client
            .issues()
            .update("octocat", "hello", 17, &request)
            .await
            .unwrap();

        assert_eq!(issue.state, IssueState::Closed);
        assert!(issue.closed_at.is_some());
    }

    #[tokio::test]
    async fn test_lock_sends_reason_and_unlock_deletes() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/repos/octocat/hello/issues/17/lock"))
            .and(body_json(json!({ "lock_reason": "too heated" })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/repos/octocat/hello/issues/17/lock"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        let client = test_client(&server);

        client
            .issues()
            .lock("octocat", "hello", 17, Some(LockReason::TooHeated))
            .await
            .unwrap();
        client.issues().unlock("octocat", "hello", 17).await.unwrap();
    }

    #[tokio::test]
    async fn test_comment_create_update_delete() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/octocat/hello/issues/17/comments"))
            .and(body_json(json!({ "body": "Confirmed on main." })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(comment_json(501, "Confirmed on main.")),
            )
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/repos/octocat/hello/issues/comments/501"))
            .and(body_json(json!({ "body": "Confirmed on main and v1.2." })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(comment_json(501, "Confirmed on main and v1.2.")),
            )
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/repos/octocat/hello/issues/comments/501"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        let client = test_client(&server);

        let comment = client
            .issues()
            .create_comment("octocat", "hello", 17, "Confirmed on main.")
            .await
            .unwrap();
        assert_eq!(comment.id, 501);

        let updated = client
            .issues()
            .update_comment("octocat", "hello", 501, "Confirmed on main and v1.2.")
            .await
            .unwrap();
        assert_eq!(updated.body, "Confirmed on main and v1.2.");

        client
            .issues()
            .delete_comment("octocat", "hello", 501)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_add_and_remove_labels() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/octocat/hello/issues/17/labels"))
            .and(body_json(json!({ "labels": ["bug", "p1"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                label_json("bug", "d73a4a"),
                label_json("p1", "b60205")
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/repos/octocat/hello/issues/17/labels/p1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        let client = test_client(&server);

        let labels = client
            .issues()
            .add_labels(
                "octocat",
                "hello",
                17,
                &["bug".to_string(), "p1".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].name, "bug");

        client
            .issues()
            .remove_label("octocat", "hello", 17, "p1")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_remove_assignees_uses_delete_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/repos/octocat/hello/issues/17/assignees"))
            .and(body_partial_json(json!({ "assignees": ["hubot"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(issue_json(17, "Found a bug")))
            .expect(1)
            .mount(&server)
            .await;
        let client = test_client(&server);

        let issue = client
            .issues()
            .remove_assignees("octocat", "hello", 17, &["hubot".to_string()])
            .await
            .unwrap();

        assert_eq!(issue.number, 17);
    }
}
