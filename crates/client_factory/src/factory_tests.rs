use super::*;

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{credential_store, endpoint, environment, http_client, skip_auth, token};
use credential_resolver::{InMemoryCredentialStore, MapEnvironment};

fn create_test_pem() -> String {
    use rsa::pkcs8::{EncodePrivateKey, LineEnding};
    use rsa::RsaPrivateKey;

    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("Failed to generate a key");
    private_key
        .to_pkcs8_pem(LineEnding::LF)
        .expect("Failed to encode key as PEM")
        .to_string()
}

fn account_json(login: &str) -> serde_json::Value {
    json!({
        "login": login,
        "id": 1,
        "node_id": "MDEyOk9yZ2FuaXphdGlvbjE=",
        "avatar_url": "https://github.com/images/error/octocat_happy.gif",
        "gravatar_id": "",
        "url": format!("https://api.github.com/users/{login}"),
        "html_url": format!("https://github.com/{login}"),
        "followers_url": format!("https://api.github.com/users/{login}/followers"),
        "following_url": format!("https://api.github.com/users/{login}/following{{/other_user}}"),
        "gists_url": format!("https://api.github.com/users/{login}/gists{{/gist_id}}"),
        "starred_url": format!("https://api.github.com/users/{login}/starred{{/owner}}{{/repo}}"),
        "subscriptions_url": format!("https://api.github.com/users/{login}/subscriptions"),
        "organizations_url": format!("https://api.github.com/users/{login}/orgs"),
        "repos_url": format!("https://api.github.com/users/{login}/repos"),
        "events_url": format!("https://api.github.com/users/{login}/events{{/privacy}}"),
        "received_events_url": format!("https://api.github.com/users/{login}/received_events"),
        "type": "Organization",
        "site_admin": false
    })
}

fn installation_json(id: u64, login: &str) -> serde_json::Value {
    json!({
        "id": id,
        "account": account_json(login),
        // octocrab's Installation model requires these fields.
        "permissions": {},
        "events": []
    })
}

fn empty_environment() -> ClientOption {
    environment(Arc::new(MapEnvironment::new()))
}

#[tokio::test]
async fn explicit_token_uses_the_legacy_authorization_scheme() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .and(header("authorization", "token t0k3n"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = new_client(vec![
        token("t0k3n"),
        endpoint(server.uri()),
        empty_environment(),
    ])
    .await
    .expect("client should build");

    let repos: serde_json::Value = client
        .octocrab()
        .get("/user/repos", None::<&()>)
        .await
        .expect("request should succeed");

    assert_eq!(repos, json!([]));
}

#[tokio::test]
async fn explicit_endpoint_normalizes_the_attached_urls() {
    let server = MockServer::start().await;

    let client = new_client(vec![
        token("t0k3n"),
        endpoint(server.uri()),
        empty_environment(),
    ])
    .await
    .expect("client should build");

    assert_eq!(client.base_url().as_str(), format!("{}/", server.uri()));
    let authority = server.uri().replace("http://", "");
    assert_eq!(
        client.upload_url().as_str(),
        format!("https://{authority}/api/uploads/")
    );
}

#[tokio::test]
async fn endpoint_with_a_trailing_slash_is_not_doubled() {
    let server = MockServer::start().await;

    let client = new_client(vec![
        token("t0k3n"),
        endpoint(format!("{}/", server.uri())),
        empty_environment(),
    ])
    .await
    .expect("client should build");

    assert_eq!(client.base_url().as_str(), format!("{}/", server.uri()));
}

#[tokio::test]
async fn unparseable_endpoint_fails_without_building_a_client() {
    let err = new_client(vec![
        token("t0k3n"),
        endpoint("not a url"),
        empty_environment(),
    ])
    .await
    .expect_err("build should fail");

    assert!(matches!(err, Error::UrlParse(_)));
}

#[tokio::test]
async fn resolved_environment_token_reaches_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .and(header("authorization", "token from-env"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let env = MapEnvironment::new()
        .set("GH_TOKEN", "from-env")
        .set("GITHUB_API_URL", server.uri());

    let client = new_client(vec![environment(Arc::new(env))])
        .await
        .expect("client should build");

    let _: serde_json::Value = client
        .octocrab()
        .get("/user/repos", None::<&()>)
        .await
        .expect("request should succeed");

    // The API override also dragged the upload base to the same instance.
    let authority = server.uri().replace("http://", "");
    assert_eq!(
        client.upload_url().as_str(),
        format!("https://{authority}/api/uploads/")
    );
}

#[tokio::test]
async fn stored_session_authenticates_when_no_variables_are_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .and(header("authorization", "token gho_stored"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let env = MapEnvironment::new().set("GITHUB_API_URL", server.uri());
    let store = InMemoryCredentialStore::new().with_token("github.com", "gho_stored");

    let client = new_client(vec![
        environment(Arc::new(env)),
        credential_store(Arc::new(store)),
    ])
    .await
    .expect("client should build");

    let _: serde_json::Value = client
        .octocrab()
        .get("/user/repos", None::<&()>)
        .await
        .expect("request should succeed");
}

#[tokio::test]
async fn skip_auth_sends_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/meta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let env = MapEnvironment::new()
        .set("GH_TOKEN", "should-not-be-sent")
        .set("GITHUB_API_URL", server.uri());

    let client = new_client(vec![skip_auth(true), environment(Arc::new(env))])
        .await
        .expect("client should build");

    let _: serde_json::Value = client
        .octocrab()
        .get("/meta", None::<&()>)
        .await
        .expect("request should succeed");

    let requests = server.received_requests().await.expect("requests recorded");
    assert!(!requests.is_empty());
    assert!(requests
        .iter()
        .all(|request| !request.headers.contains_key("authorization")));
}

#[tokio::test]
async fn missing_credentials_fail_before_any_network_call() {
    let err = new_client(vec![empty_environment()])
        .await
        .expect_err("build should fail");

    match err {
        Error::NoCredentials { source } => {
            assert!(matches!(*source, Error::InsufficientAppCredentials));
        }
        other => panic!("expected NoCredentials, got {other}"),
    }
}

#[tokio::test]
async fn supplied_client_is_used_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/meta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let supplied = octocrab::Octocrab::builder()
        .base_uri(server.uri())
        .expect("mock server URI should parse")
        .build()
        .expect("client should build");

    // No credentials anywhere, yet the build succeeds with the given client.
    let client = new_client(vec![http_client(supplied), empty_environment()])
        .await
        .expect("client should build");

    let _: serde_json::Value = client
        .octocrab()
        .get("/meta", None::<&()>)
        .await
        .expect("request should succeed");
}

#[tokio::test]
async fn app_flow_with_an_explicit_installation_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/installations/2/access_tokens"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "ghs_installation_token",
            "expires_at": "2030-01-01T00:00:00Z",
            "permissions": {}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/myorg/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    // The key loses its newlines on the way in, as CI secret stores do.
    let env = MapEnvironment::new()
        .set("GITHUB_APP_ID", "1")
        .set("GITHUB_APP_INSTALLATION_ID", "2")
        .set("GITHUB_APP_PRIVATE_KEY", create_test_pem().replace('\n', " "))
        .set("GITHUB_API_URL", server.uri());

    let client = new_client(vec![environment(Arc::new(env))])
        .await
        .expect("app flow should succeed");

    let _: serde_json::Value = client
        .octocrab()
        .get("/users/myorg/repos", None::<&()>)
        .await
        .expect("request should succeed");

    let requests = server.received_requests().await.expect("requests recorded");
    let repo_call = requests
        .iter()
        .find(|request| request.url.path() == "/users/myorg/repos")
        .expect("repository call recorded");
    let authorization = repo_call
        .headers
        .get("authorization")
        .expect("authorization header present")
        .to_str()
        .expect("header is valid UTF-8");
    assert!(
        authorization.ends_with("ghs_installation_token"),
        "expected the exchanged installation token, got {authorization:?}"
    );
}

#[tokio::test]
async fn app_flow_discovers_the_installation_via_the_repository() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/myorg/myapp/installation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(installation_json(7, "myorg")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/app/installations/7/access_tokens"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "ghs_discovered_token",
            "expires_at": "2030-01-01T00:00:00Z",
            "permissions": {}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/meta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let env = MapEnvironment::new()
        .set("GITHUB_APP_ID", "1")
        .set("GITHUB_APP_PRIVATE_KEY", create_test_pem())
        .set("GITHUB_REPOSITORY", "myorg/myapp")
        .set("GITHUB_API_URL", server.uri());

    let client = new_client(vec![environment(Arc::new(env))])
        .await
        .expect("app flow should succeed");

    let _: serde_json::Value = client
        .octocrab()
        .get("/meta", None::<&()>)
        .await
        .expect("request should succeed");
}

#[tokio::test]
async fn app_flow_failure_reports_no_credentials_with_its_cause() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/installations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let env = MapEnvironment::new()
        .set("GITHUB_APP_ID", "1")
        .set("GITHUB_APP_PRIVATE_KEY", create_test_pem())
        .set("GITHUB_REPOSITORY_OWNER", "myorg")
        .set("GITHUB_API_URL", server.uri());

    let err = new_client(vec![environment(Arc::new(env))])
        .await
        .expect_err("build should fail");

    match err {
        Error::NoCredentials { source } => {
            assert!(matches!(
                *source,
                Error::InstallationNotFound { account } if account == "myorg"
            ));
        }
        other => panic!("expected NoCredentials, got {other}"),
    }
}

#[tokio::test]
async fn enterprise_host_derives_the_attached_urls() {
    let env = MapEnvironment::new()
        .set("GH_HOST", "git.example.com")
        .set("GH_ENTERPRISE_TOKEN", "ghe-token");

    let client = new_client(vec![environment(Arc::new(env))])
        .await
        .expect("client should build");

    assert_eq!(
        client.base_url().as_str(),
        "https://git.example.com/api/v3/"
    );
    assert_eq!(
        client.upload_url().as_str(),
        "https://git.example.com/api/uploads/"
    );
}
