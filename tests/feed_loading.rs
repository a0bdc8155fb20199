//! Integration tests for loading a feed over HTTP and rendering it.
//!
//! Each test starts its own mock server. Mock servers listen on 127.0.0.1,
//! so the fetch config allows private hosts.

use std::time::Duration;

use rsshtml::feed::{load_document, FeedError, FeedLocation, FetchConfig};
use rsshtml::render::{render_to_string, RenderOptions};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <title>Mock News</title>
  <link>http://news.example</link>
  <description>Served by a mock</description>
  <item><title>Headline</title><link>http://news.example/1</link></item>
</channel></rss>"#;

fn test_config() -> FetchConfig {
    FetchConfig {
        retry_base_delay: Duration::from_millis(5),
        allow_private_hosts: true,
        ..FetchConfig::default()
    }
}

async fn serve(status: u16, body: &str) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss.xml"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&mock_server)
        .await;
    mock_server
}

fn location(server: &MockServer) -> FeedLocation {
    FeedLocation::parse(&format!("{}/rss.xml", server.uri())).unwrap()
}

#[tokio::test]
async fn test_fetch_and_render() {
    let server = serve(200, FEED).await;
    let client = reqwest::Client::new();

    let root = load_document(&location(&server), &client, &test_config())
        .await
        .unwrap();
    let html = render_to_string(&root, &RenderOptions { require_rss2: true }).unwrap();

    assert!(html.contains("<title>Mock News</title>"));
    assert!(html.contains("   <td><a href =http://news.example/1>Headline</a></td>"));
}

#[tokio::test]
async fn test_malformed_feed_is_xml_error() {
    let server = serve(200, "<rss><channel>").await;
    let client = reqwest::Client::new();

    let err = load_document(&location(&server), &client, &test_config())
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::Xml(_)));
}

#[tokio::test]
async fn test_not_found_is_http_error() {
    let server = serve(404, "").await;
    let client = reqwest::Client::new();

    let err = load_document(&location(&server), &client, &test_config())
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::HttpStatus(404)));
}

#[tokio::test]
async fn test_private_host_blocked_by_default() {
    let server = serve(200, FEED).await;
    let client = reqwest::Client::new();

    let err = load_document(&location(&server), &client, &FetchConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::InvalidUrl(_)));
    // Rejected before any request reached the server
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
