//! Integration tests for third-party GIF resolution.

mod common;

use common::test_config;
use serde_json::json;
use subreddit_scraper::api::HttpClient;
use subreddit_scraper::config::Config;
use subreddit_scraper::output::EventSink;
use subreddit_scraper::resolve::GifResolver;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOMEPAGE_WITH_TOKEN: &str =
    r#"<html><script>window.__INIT={accessToken:"site-token",user:null}</script></html>"#;

fn resolver(config: &Config) -> GifResolver {
    let http = HttpClient::new(&config.network).expect("client");
    GifResolver::new(http, config, EventSink::tracing_only())
}

async fn mount_homepage(server: &MockServer, body: &str, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/site/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected)
        .mount(server)
        .await;
}

async fn forbid_page_and_mirrors(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/watch/abcdef"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_api_lookup_with_homepage_token() {
    let server = MockServer::start().await;
    let config = test_config(&server.uri());

    mount_homepage(&server, HOMEPAGE_WITH_TOKEN, 1).await;
    Mock::given(method("GET"))
        .and(path("/v2/gifs/abcdef"))
        .and(header("authorization", "Bearer site-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "gif": { "urls": { "sd": "https://media.example/abcdef-sd.mp4",
                               "hd": "https://media.example/abcdef.mp4" } }
        })))
        .expect(1)
        .mount(&server)
        .await;
    forbid_page_and_mirrors(&server).await;

    let page = format!("{}/watch/abcdef", server.uri());
    let url = resolver(&config).resolve_page(&page).await;
    assert_eq!(url.as_deref(), Some("https://media.example/abcdef.mp4"));
}

#[tokio::test]
async fn test_falls_back_to_temporary_token() {
    let server = MockServer::start().await;
    let config = test_config(&server.uri());

    mount_homepage(&server, "<html>no token here</html>", 1).await;
    Mock::given(method("GET"))
        .and(path("/v2/auth/temporary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "temp-token" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/gifs/abcdef"))
        .and(header("authorization", "Bearer temp-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "gif": { "urls": { "mobile": "https://media.example/abcdef-mobile.mp4" } }
        })))
        .expect(1)
        .mount(&server)
        .await;
    forbid_page_and_mirrors(&server).await;

    let page = format!("{}/watch/abcdef", server.uri());
    let url = resolver(&config).resolve_page(&page).await;
    assert_eq!(url.as_deref(), Some("https://media.example/abcdef-mobile.mp4"));
}

#[tokio::test]
async fn test_page_scrape_after_api_failure() {
    let server = MockServer::start().await;
    let config = test_config(&server.uri());

    mount_homepage(&server, HOMEPAGE_WITH_TOKEN, 1).await;
    Mock::given(method("GET"))
        .and(path("/v2/gifs/abcdef"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/watch/abcdef"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<video><source src="https://cdn.example/files/abcdef.mp4" type="video/mp4"></video>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let page = format!("{}/watch/abcdef", server.uri());
    let url = resolver(&config).resolve_page(&page).await;
    assert_eq!(url.as_deref(), Some("https://cdn.example/files/abcdef.mp4"));
}

#[tokio::test]
async fn test_mirrors_checked_last_in_order() {
    let server = MockServer::start().await;
    let config = test_config(&server.uri());

    Mock::given(method("GET"))
        .and(path("/site/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/auth/temporary"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/gifs/abcdef"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/watch/abcdef"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nothing</html>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/mirror-a/abcdef.mp4"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/mirror-b/abcdef.mp4"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let page = format!("{}/watch/abcdef", server.uri());
    let url = resolver(&config).resolve_page(&page).await;
    assert_eq!(url, Some(format!("{}/mirror-b/abcdef.mp4", server.uri())));
}

#[tokio::test]
async fn test_unresolvable_page() {
    let server = MockServer::start().await;
    let config = test_config(&server.uri());

    mount_homepage(&server, HOMEPAGE_WITH_TOKEN, 1).await;
    Mock::given(method("GET"))
        .and(path("/v2/gifs/abcdef"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "gif": { "urls": {} } })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/watch/abcdef"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let page = format!("{}/watch/abcdef", server.uri());
    assert!(resolver(&config).resolve_page(&page).await.is_none());
}

#[tokio::test]
async fn test_page_without_id_makes_no_requests() {
    let server = MockServer::start().await;
    let config = test_config(&server.uri());

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let page = format!("{}/watch/", server.uri());
    assert!(resolver(&config).resolve_page(&page).await.is_none());
}

#[tokio::test]
async fn test_token_reused_across_resolutions() {
    let server = MockServer::start().await;
    let config = test_config(&server.uri());

    mount_homepage(&server, HOMEPAGE_WITH_TOKEN, 1).await;
    for id in ["first", "second"] {
        Mock::given(method("GET"))
            .and(path(format!("/v2/gifs/{}", id)))
            .and(header("authorization", "Bearer site-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "gif": { "urls": { "hd": format!("https://media.example/{}.mp4", id) } }
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let resolver = resolver(&config);
    for id in ["first", "second"] {
        let page = format!("{}/watch/{}", server.uri(), id);
        let url = resolver.resolve_page(&page).await;
        assert_eq!(url, Some(format!("https://media.example/{}.mp4", id)));
    }
}

#[tokio::test]
async fn test_rejected_token_is_refetched() {
    let server = MockServer::start().await;
    let config = test_config(&server.uri());

    mount_homepage(&server, HOMEPAGE_WITH_TOKEN, 2).await;
    Mock::given(method("GET"))
        .and(path("/v2/gifs/abcdef"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/watch/abcdef"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let resolver = resolver(&config);
    let page = format!("{}/watch/abcdef", server.uri());
    assert!(resolver.resolve_page(&page).await.is_none());
    assert!(resolver.resolve_page(&page).await.is_none());
}

#[tokio::test]
async fn test_zero_ttl_fetches_token_every_time() {
    let server = MockServer::start().await;
    let mut config = test_config(&server.uri());
    config.resolver.token_ttl_seconds = 0;

    mount_homepage(&server, HOMEPAGE_WITH_TOKEN, 2).await;
    Mock::given(method("GET"))
        .and(path("/v2/gifs/abcdef"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "gif": { "urls": { "hd": "https://media.example/abcdef.mp4" } }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let resolver = resolver(&config);
    let page = format!("{}/watch/abcdef", server.uri());
    assert!(resolver.resolve_page(&page).await.is_some());
    assert!(resolver.resolve_page(&page).await.is_some());
}
