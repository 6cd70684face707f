//! Integration tests for the milestones service.

mod common;

#[cfg(test)]
mod milestones_tests {
    use crate::common::{test_client, user_json};
    use forgekit::services::{
        CreateMilestoneRequest, ListMilestonesFilter, MilestoneSort, StateFilter,
        UpdateMilestoneRequest,
    };
    use forgekit::types::MilestoneState;
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn milestone_json(number: u32, title: &str, state: &str) -> Value {
        json!({
            "id": 1000 + number as u64,
            "node_id": format!("MI_{}", number),
            "number": number,
            "title": title,
            "description": null,
            "state": state,
            "creator": user_json("octocat"),
            "open_issues": 4,
            "closed_issues": 8,
            "due_on": "2024-10-09T23:39:01Z",
            "created_at": "2024-04-10T20:09:31Z",
            "updated_at": "2024-04-10T20:09:31Z",
            "closed_at": null
        })
    }

    #[tokio::test]
    async fn test_list_sends_state_and_sort() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello/milestones"))
            .and(query_param("state", "open"))
            .and(query_param("sort", "due_on"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([milestone_json(1, "v1.0", "open")])),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = test_client(&server);

        let filter = ListMilestonesFilter {
            state: Some(StateFilter::Open),
            sort: Some(MilestoneSort::DueOn),
            ..Default::default()
        };
        let milestones = client
            .milestones()
            .list("octocat", "hello", &filter)
            .await
            .unwrap();

        assert_eq!(milestones.len(), 1);
        assert_eq!(milestones[0].title, "v1.0");
        assert_eq!(milestones[0].state, MilestoneState::Open);
    }

    #[tokio::test]
    async fn test_create_milestone() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/octocat/hello/milestones"))
            .and(body_json(json!({ "title": "v1.0" })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(milestone_json(1, "v1.0", "open")),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = test_client(&server);

        let milestone = client
            .milestones()
            .create("octocat", "hello", &CreateMilestoneRequest::with_title("v1.0"))
            .await
            .unwrap();

        assert_eq!(milestone.number, 1);
        assert_eq!(milestone.open_issues, 4);
    }

    #[tokio::test]
    async fn test_close_milestone() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/repos/octocat/hello/milestones/1"))
            .and(body_json(json!({ "state": "closed" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(milestone_json(1, "v1.0", "closed")),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = test_client(&server);

        let request = UpdateMilestoneRequest {
            state: Some(MilestoneState::Closed),
            ..Default::default()
        };
        let milestone = client
            .milestones()
            .update("octocat", "hello", 1, &request)
            .await
            .unwrap();

        assert_eq!(milestone.state, MilestoneState::Closed);
    }

    #[tokio::test]
    async fn test_get_and_delete_milestone() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello/milestones/1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(milestone_json(1, "v1.0", "open")),
            )
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/repos/octocat/hello/milestones/1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        let client = test_client(&server);

        let milestone = client
            .milestones()
            .get("octocat", "hello", 1)
            .await
            .unwrap();
        assert_eq!(milestone.title, "v1.0");
        assert!(milestone.due_on.is_some());

        client
            .milestones()
            .delete("octocat", "hello", 1)
            .await
            .unwrap();
    }
}
