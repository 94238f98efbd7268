use super::*;

use crate::environment::MapEnvironment;

#[test]
fn public_host_uses_dotcom_defaults() {
    let endpoints = ApiEndpoints::for_host("github.com", &MapEnvironment::new());

    assert_eq!(endpoints.rest, "https://api.github.com");
    assert_eq!(endpoints.upload, "https://uploads.github.com");
    assert_eq!(endpoints.graphql, "https://api.github.com/graphql");
}

#[test]
fn enterprise_host_derives_api_paths() {
    let endpoints = ApiEndpoints::for_host("git.example.com", &MapEnvironment::new());

    assert_eq!(endpoints.rest, "https://git.example.com/api/v3");
    assert_eq!(endpoints.upload, "https://git.example.com/api/uploads");
    assert_eq!(endpoints.graphql, "https://git.example.com/api/graphql");
}

#[test]
fn api_url_override_drags_upload_base_along() {
    let env = MapEnvironment::new().set("GITHUB_API_URL", "https://ghe.example.com/api/v3");

    let endpoints = ApiEndpoints::for_host("github.com", &env);

    assert_eq!(endpoints.rest, "https://ghe.example.com/api/v3");
    assert_eq!(endpoints.upload, "https://ghe.example.com/api/uploads");
    assert_eq!(endpoints.graphql, "https://api.github.com/graphql");
}

#[test]
fn api_url_override_pointing_at_dotcom_keeps_default_upload() {
    let env = MapEnvironment::new().set("GITHUB_API_URL", "https://api.github.com");

    let endpoints = ApiEndpoints::for_host("github.com", &env);

    assert_eq!(endpoints.rest, "https://api.github.com");
    assert_eq!(endpoints.upload, "https://uploads.github.com");
}

#[test]
fn api_url_override_keeps_its_port_in_the_upload_base() {
    let env = MapEnvironment::new().set("GITHUB_API_URL", "http://127.0.0.1:8080");

    let endpoints = ApiEndpoints::for_host("github.com", &env);

    assert_eq!(endpoints.rest, "http://127.0.0.1:8080");
    assert_eq!(endpoints.upload, "https://127.0.0.1:8080/api/uploads");
}

#[test]
fn unparseable_api_url_still_replaces_the_rest_base() {
    let env = MapEnvironment::new().set("GITHUB_API_URL", "not a url");

    let endpoints = ApiEndpoints::for_host("github.com", &env);

    assert_eq!(endpoints.rest, "not a url");
    assert_eq!(endpoints.upload, "https://uploads.github.com");
}

#[test]
fn graphql_override_is_independent_of_the_rest_base() {
    let env = MapEnvironment::new().set("GITHUB_GRAPHQL_URL", "https://graphql.example.com/query");

    let endpoints = ApiEndpoints::for_host("github.com", &env);

    assert_eq!(endpoints.rest, "https://api.github.com");
    assert_eq!(endpoints.upload, "https://uploads.github.com");
    assert_eq!(endpoints.graphql, "https://graphql.example.com/query");
}

#[test]
fn overrides_are_ignored_for_enterprise_hosts() {
    let env = MapEnvironment::new()
        .set("GITHUB_API_URL", "https://elsewhere.example.com")
        .set("GITHUB_GRAPHQL_URL", "https://elsewhere.example.com/graphql");

    let endpoints = ApiEndpoints::for_host("git.example.com", &env);

    assert_eq!(endpoints.rest, "https://git.example.com/api/v3");
    assert_eq!(endpoints.upload, "https://git.example.com/api/uploads");
    assert_eq!(endpoints.graphql, "https://git.example.com/api/graphql");
}
