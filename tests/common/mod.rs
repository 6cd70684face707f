//! Shared wiremock helpers for the integration suites.

#![allow(dead_code)]

use forgekit::{AuthMethod, ForgeClient, ForgeConfig};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Builds a client wired to the mock server.
pub fn test_client(server: &MockServer) -> ForgeClient {
    let config = ForgeConfig::builder()
        .base_url(server.uri())
        .auth(AuthMethod::token("tok_test"))
        .build()
        .unwrap();
    ForgeClient::new(config).unwrap()
}

/// Minimal account object accepted by the `User` type.
pub fn user_json(login: &str) -> Value {
    json!({
        "id": 1,
        "login": login,
        "node_id": "MDQ6VXNlcjE=",
        "avatar_url": format!("https://forge.test/avatars/{}", login),
        "type": "User",
        "site_admin": false,
        "html_url": format!("https://forge.test/{}", login)
    })
}

/// Repository object accepted by the `Repository` type.
pub fn repo_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "node_id": format!("R_{}", id),
        "name": name,
        "full_name": format!("octocat/{}", name),
        "owner": user_json("octocat"),
        "private": false,
        "description": null,
        "fork": false,
        "url": format!("https://api.forge.test/repos/octocat/{}", name),
        "html_url": format!("https://forge.test/octocat/{}", name),
        "clone_url": format!("https://forge.test/octocat/{}.git", name),
        "ssh_url": format!("git@forge.test:octocat/{}.git", name),
        "default_branch": "main",
        "language": "Rust",
        "forks_count": 0,
        "stargazers_count": 0,
        "watchers_count": 0,
        "open_issues_count": 0,
        "size": 128,
        "license": null,
        "created_at": "2024-01-10T08:00:00Z",
        "updated_at": "2024-01-12T08:00:00Z",
        "pushed_at": "2024-01-12T08:00:00Z"
    })
}

/// Issue object accepted by the `Issue` type.
pub fn issue_json(number: u32, title: &str) -> Value {
    json!({
        "id": 1000 + u64::from(number),
        "node_id": format!("I_{}", number),
        "number": number,
        "title": title,
        "body": null,
        "state": "open",
        "user": user_json("octocat"),
        "milestone": null,
        "active_lock_reason": null,
        "comments": 0,
        "html_url": format!("https://forge.test/octocat/hello/issues/{}", number),
        "created_at": "2024-02-01T10:00:00Z",
        "updated_at": "2024-02-01T10:00:00Z",
        "closed_at": null,
        "closed_by": null
    })
}

/// Matches requests that carry no `page` query parameter (the first fetch of
/// an exhaustive listing).
pub struct NoPageParam;

impl Match for NoPageParam {
    fn matches(&self, request: &Request) -> bool {
        !request.url.query_pairs().any(|(k, _)| k == "page")
    }
}

/// Mounts a collection endpoint split into `per_page`-sized pages with
/// RFC 5988 `Link` headers. A request without a `page` parameter gets page 1;
/// a request past the last page gets an empty array and no `Link` header.
pub async fn mount_paged_collection(
    server: &MockServer,
    route: &str,
    items: Vec<Value>,
    per_page: usize,
) {
    let total_pages = if items.is_empty() {
        1
    } else {
        (items.len() + per_page - 1) / per_page
    };

    for page in 1..=total_pages {
        let start = (page - 1) * per_page;
        let end = usize::min(start + per_page, items.len());
        let template = page_response(server, route, &items[start..end], page, total_pages, per_page);

        Mock::given(method("GET"))
            .and(path(route))
            .and(query_param("page", page.to_string()))
            .respond_with(template.clone())
            .mount(server)
            .await;

        if page == 1 {
            Mock::given(method("GET"))
                .and(path(route))
                .and(NoPageParam)
                .respond_with(template)
                .mount(server)
                .await;
        }
    }

    // Mounted last, so it only catches page numbers past the end.
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(Vec::new())))
        .mount(server)
        .await;
}

fn page_response(
    server: &MockServer,
    route: &str,
    body: &[Value],
    page: usize,
    total_pages: usize,
    per_page: usize,
) -> ResponseTemplate {
    let mut template = ResponseTemplate::new(200).set_body_json(Value::Array(body.to_vec()));
    if page < total_pages {
        let link = format!(
            r#"<{base}{route}?page={next}&per_page={per_page}>; rel="next", <{base}{route}?page={last}&per_page={per_page}>; rel="last""#,
            base = server.uri(),
            route = route,
            next = page + 1,
            last = total_pages,
            per_page = per_page,
        );
        template = template.insert_header("Link", link.as_str());
    }
    template
}
