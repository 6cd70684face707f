//! Integration tests for the organizations and teams services.

mod common;

#[cfg(test)]
mod teams_orgs_tests {
    use crate::common::{test_client, user_json};
    use forgekit::services::{
        CreateTeamRequest, ListMembersFilter, MemberRole, TeamRepoPermission, TeamRole,
        UpdateTeamRequest,
    };
    use forgekit::types::TeamPrivacy;
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn org_json(login: &str) -> Value {
        json!({
            "id": 100,
            "node_id": "O_100",
            "login": login,
            "name": "Example Org",
            "description": null,
            "avatar_url": format!("https://forge.test/avatars/{}", login),
            "html_url": format!("https://forge.test/{}", login)
        })
    }

    fn team_json(id: u64, slug: &str, privacy: &str) -> Value {
        json!({
            "id": id,
            "node_id": format!("T_{}", id),
            "slug": slug,
            "name": slug,
            "description": null,
            "privacy": privacy,
            "permission": "pull",
            "html_url": format!("https://forge.test/orgs/example/teams/{}", slug),
            "members_count": null,
            "repos_count": null,
            "parent": null
        })
    }

    #[tokio::test]
    async fn test_get_organization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orgs/example"))
            .respond_with(ResponseTemplate::new(200).set_body_json(org_json("example")))
            .mount(&server)
            .await;
        let client = test_client(&server);

        let org = client.organizations().get("example").await.unwrap();

        assert_eq!(org.login, "example");
        assert_eq!(org.name.as_deref(), Some("Example Org"));
    }

    #[tokio::test]
    async fn test_list_members_sends_role_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orgs/example/members"))
            .and(query_param("role", "admin"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_json("octocat")])))
            .expect(1)
            .mount(&server)
            .await;
        let client = test_client(&server);

        let filter = ListMembersFilter {
            role: Some(MemberRole::Admin),
            ..Default::default()
        };
        let members = client
            .organizations()
            .list_members("example", &filter)
            .await
            .unwrap();

        assert_eq!(members.len(), 1);
        assert_eq!(members[0].login, "octocat");
    }

    #[tokio::test]
    async fn test_membership_probe() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orgs/example/members/octocat"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/orgs/example/members/outsider"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let client = test_client(&server);

        assert!(client
            .organizations()
            .is_member("example", "octocat")
            .await
            .unwrap());
        assert!(!client
            .organizations()
            .is_member("example", "outsider")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_create_team() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/orgs/example/teams"))
            .and(body_json(json!({ "name": "platform" })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(team_json(9, "platform", "secret")),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = test_client(&server);

        let team = client
            .teams()
            .create("example", &CreateTeamRequest::with_name("platform"))
            .await
            .unwrap();

        assert_eq!(team.slug, "platform");
        assert_eq!(team.privacy, TeamPrivacy::Secret);
    }

    #[tokio::test]
    async fn test_update_team_privacy() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/orgs/example/teams/platform"))
            .and(body_json(json!({ "privacy": "closed" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(team_json(9, "platform", "closed")),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = test_client(&server);

        let request = UpdateTeamRequest {
            privacy: Some(TeamPrivacy::Closed),
            ..Default::default()
        };
        let team = client
            .teams()
            .update("example", "platform", &request)
            .await
            .unwrap();

        assert_eq!(team.privacy, TeamPrivacy::Closed);
    }

    #[tokio::test]
    async fn test_team_membership_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/orgs/example/teams/platform/memberships/octocat"))
            .and(body_json(json!({ "role": "maintainer" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "url": "https://api.forge.test/orgs/example/teams/platform/memberships/octocat",
                "role": "maintainer",
                "state": "pending"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/orgs/example/teams/platform/memberships/octocat"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        let client = test_client(&server);

        let membership = client
            .teams()
            .add_membership("example", "platform", "octocat", Some(TeamRole::Maintainer))
            .await
            .unwrap();
        assert_eq!(membership.role, TeamRole::Maintainer);

        client
            .teams()
            .remove_membership("example", "platform", "octocat")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_team_repository_access() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/orgs/example/teams/platform/repos/example/hello"))
            .and(body_partial_json(json!({ "permission": "push" })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/orgs/example/teams/platform/repos/example/hello"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        let client = test_client(&server);

        client
            .teams()
            .add_repository(
                "example",
                "platform",
                "example",
                "hello",
                Some(TeamRepoPermission::Push),
            )
            .await
            .unwrap();
        client
            .teams()
            .remove_repository("example", "platform", "example", "hello")
            .await
            .unwrap();
    }
}
