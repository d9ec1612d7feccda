//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use crate::support::{crawled_paths, entry, html, link_page, mount, mount_once, test_config};
use std::time::Duration;
use sumi_audit::model::FailureKind;
use sumi_audit::{crawl, AuditError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SITEMAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{base}/</loc></url>
  <url><loc>{base}/orphan</loc></url>
  <url><loc>https://elsewhere.example/page</loc></url>
</urlset>"#;

fn sitemap_for(server: &MockServer) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(SITEMAP.replace("{base}", &server.uri()))
        .insert_header("content-type", "application/xml")
}

#[tokio::test]
async fn test_bfs_order_and_depths() {
    let server = MockServer::start().await;

    mount_once(&server, "/", link_page("Home", &["/a", "/b"])).await;
    mount_once(&server, "/a", link_page("A", &["/c"])).await;
    mount_once(&server, "/b", link_page("B", &["/c"])).await;
    mount_once(&server, "/c", link_page("C", &[])).await;

    let result = crawl(&server.uri(), &test_config(100), None).await.unwrap();

    assert_eq!(crawled_paths(&result, &server), vec!["/", "/a", "/b", "/c"]);
    assert_eq!(entry(&result, &server, "/").depth(), 0);
    assert_eq!(entry(&result, &server, "/a").depth(), 1);
    assert_eq!(entry(&result, &server, "/b").depth(), 1);
    assert_eq!(entry(&result, &server, "/c").depth(), 2);
    assert_eq!(result.fetched_count(), 4);
    assert!(!result.metadata.budget_reached);
}

#[tokio::test]
async fn test_each_url_fetched_at_most_once() {
    let server = MockServer::start().await;

    // Links back to visited pages, duplicate links and fragments
    mount_once(&server, "/", link_page("Home", &["/a", "/a", "/b#top", "/"])).await;
    mount_once(&server, "/a", link_page("A", &["/", "/b", "/a#x"])).await;
    mount_once(&server, "/b", link_page("B", &["/a", "/"])).await;

    let result = crawl(&server.uri(), &test_config(100), None).await.unwrap();

    let mut paths = crawled_paths(&result, &server);
    assert_eq!(paths.len(), 3);
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), 3);
}

#[tokio::test]
async fn test_page_budget_stops_crawl() {
    let server = MockServer::start().await;

    mount(&server, "/", link_page("Home", &["/a", "/b", "/c"])).await;
    mount(&server, "/a", link_page("A", &[])).await;
    mount(&server, "/b", link_page("B", &[])).await;
    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(link_page("C", &[]))
        .expect(0)
        .mount(&server)
        .await;

    let result = crawl(&server.uri(), &test_config(3), None).await.unwrap();

    assert_eq!(result.pages.len(), 3);
    assert!(result.metadata.budget_reached);
}

#[tokio::test]
async fn test_external_and_non_html_links_are_not_fetched() {
    let server = MockServer::start().await;

    mount_once(
        &server,
        "/",
        link_page(
            "Home",
            &[
                "/brochure.pdf",
                "/logo.PNG",
                "https://elsewhere.example/",
                "mailto:team@example.com",
                "/about",
            ],
        ),
    )
    .await;
    mount_once(&server, "/about", link_page("About", &[])).await;
    Mock::given(method("GET"))
        .and(path("/brochure.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = crawl(&server.uri(), &test_config(100), None).await.unwrap();

    assert_eq!(crawled_paths(&result, &server), vec!["/", "/about"]);

    let home = entry(&result, &server, "/").as_fetched().unwrap();
    assert_eq!(home.external_links, vec!["https://elsewhere.example/"]);
    assert_eq!(home.internal_links.len(), 3);
}

#[tokio::test]
async fn test_http_error_status_is_a_fetched_page() {
    let server = MockServer::start().await;

    mount(&server, "/", link_page("Home", &["/gone"])).await;
    mount(
        &server,
        "/gone",
        ResponseTemplate::new(404).set_body_string("<html><body>Not found</body></html>"),
    )
    .await;

    let result = crawl(&server.uri(), &test_config(100), None).await.unwrap();

    let gone = entry(&result, &server, "/gone").as_fetched().unwrap();
    assert_eq!(gone.status_code, 404);
    assert_eq!(result.failed_count(), 0);
}

#[tokio::test]
async fn test_timeout_becomes_failed_entry() {
    let server = MockServer::start().await;

    mount(&server, "/", link_page("Home", &["/slow", "/fast"])).await;
    mount(
        &server,
        "/slow",
        link_page("Slow", &[]).set_delay(Duration::from_millis(1_500)),
    )
    .await;
    mount(&server, "/fast", link_page("Fast", &[])).await;

    let mut config = test_config(100);
    config.crawler.page_timeout_ms = 300;

    let result = crawl(&server.uri(), &config, None).await.unwrap();

    let slow = entry(&result, &server, "/slow").as_failed().unwrap();
    assert_eq!(slow.kind, FailureKind::Timeout);
    assert_eq!(slow.depth, 1);
    assert!(slow.is_unreachable());

    // The crawl carried on past the failure
    assert!(entry(&result, &server, "/fast").as_fetched().is_some());
}

#[tokio::test]
async fn test_redirects_are_followed_and_counted() {
    let server = MockServer::start().await;

    mount(&server, "/", link_page("Home", &["/old"])).await;
    mount(
        &server,
        "/old",
        ResponseTemplate::new(301).insert_header("location", "/mid"),
    )
    .await;
    mount(
        &server,
        "/mid",
        ResponseTemplate::new(302).insert_header("location", "/new"),
    )
    .await;
    mount(&server, "/new", link_page("New", &[])).await;

    let result = crawl(&server.uri(), &test_config(100), None).await.unwrap();

    let old = entry(&result, &server, "/old").as_fetched().unwrap();
    assert_eq!(old.status_code, 200);
    assert_eq!(old.redirect_hops, 2);
    assert!(old.redirected);
    assert_eq!(old.final_url, format!("{}/new", server.uri()));
    assert_eq!(old.title, "New");
}

#[tokio::test]
async fn test_redirect_limit_and_loops_fail_the_page() {
    let server = MockServer::start().await;

    mount(&server, "/", link_page("Home", &["/hop1", "/loop-a"])).await;
    mount(
        &server,
        "/hop1",
        ResponseTemplate::new(301).insert_header("location", "/hop2"),
    )
    .await;
    mount(
        &server,
        "/hop2",
        ResponseTemplate::new(301).insert_header("location", "/hop3"),
    )
    .await;
    mount(&server, "/hop3", link_page("End", &[])).await;
    mount(
        &server,
        "/loop-a",
        ResponseTemplate::new(302).insert_header("location", "/loop-b"),
    )
    .await;
    mount(
        &server,
        "/loop-b",
        ResponseTemplate::new(302).insert_header("location", "/loop-a"),
    )
    .await;

    let mut config = test_config(100);
    config.crawler.max_redirects = 1;

    let result = crawl(&server.uri(), &config, None).await.unwrap();

    let hop = entry(&result, &server, "/hop1").as_failed().unwrap();
    assert_eq!(hop.kind, FailureKind::Redirect);

    let looped = entry(&result, &server, "/loop-a").as_failed().unwrap();
    assert_eq!(looped.kind, FailureKind::Redirect);
}

#[tokio::test]
async fn test_probes_robots_and_sitemap() {
    let server = MockServer::start().await;

    mount_once(
        &server,
        "/robots.txt",
        ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /"),
    )
    .await;
    mount_once(&server, "/sitemap.xml", sitemap_for(&server)).await;
    mount(&server, "/", link_page("Home", &[])).await;

    let result = crawl(&server.uri(), &test_config(100), None).await.unwrap();

    assert_eq!(
        result.metadata.robots_txt.as_deref(),
        Some("User-agent: *\nAllow: /")
    );
    let sitemap = result.metadata.sitemap.as_ref().unwrap();
    assert!(sitemap.found);
    assert_eq!(sitemap.url_count, 3);
    assert_eq!(sitemap.urls[1], format!("{}/orphan", server.uri()));

    // Sitemap URLs are not crawled unless seeding is enabled
    assert_eq!(crawled_paths(&result, &server), vec!["/"]);
}

#[tokio::test]
async fn test_probes_follow_redirects() {
    let server = MockServer::start().await;

    mount(
        &server,
        "/robots.txt",
        ResponseTemplate::new(301).insert_header("location", "/real-robots.txt"),
    )
    .await;
    mount(
        &server,
        "/real-robots.txt",
        ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /"),
    )
    .await;
    mount(
        &server,
        "/sitemap.xml",
        ResponseTemplate::new(301).insert_header("location", "/real-sitemap.xml"),
    )
    .await;
    mount(&server, "/real-sitemap.xml", sitemap_for(&server)).await;
    mount(&server, "/", link_page("Home", &[])).await;

    let result = crawl(&server.uri(), &test_config(100), None).await.unwrap();

    assert_eq!(
        result.metadata.robots_txt.as_deref(),
        Some("User-agent: *\nAllow: /")
    );
    let sitemap = result.metadata.sitemap.as_ref().unwrap();
    assert!(sitemap.found);
    assert_eq!(sitemap.url_count, 3);
}

#[tokio::test]
async fn test_probe_redirect_to_missing_resource_is_absent() {
    let server = MockServer::start().await;

    mount(
        &server,
        "/robots.txt",
        ResponseTemplate::new(302).insert_header("location", "/nowhere"),
    )
    .await;
    mount(&server, "/", link_page("Home", &[])).await;

    let result = crawl(&server.uri(), &test_config(100), None).await.unwrap();

    assert!(result.metadata.robots_txt.is_none());
}

#[tokio::test]
async fn test_missing_probes_leave_metadata_absent() {
    let server = MockServer::start().await;
    mount(&server, "/", link_page("Home", &[])).await;

    let result = crawl(&server.uri(), &test_config(100), None).await.unwrap();

    assert!(result.metadata.robots_txt.is_none());
    assert!(result.metadata.sitemap.is_none());
    assert_eq!(result.fetched_count(), 1);
}

#[tokio::test]
async fn test_sitemap_seeding_adds_unlinked_pages() {
    let server = MockServer::start().await;

    mount(&server, "/sitemap.xml", sitemap_for(&server)).await;
    mount_once(&server, "/", link_page("Home", &[])).await;
    mount_once(&server, "/orphan", link_page("Orphan", &[])).await;

    let mut config = test_config(100);
    config.crawler.seed_from_sitemap = true;

    let result = crawl(&server.uri(), &config, None).await.unwrap();

    assert_eq!(crawled_paths(&result, &server), vec!["/", "/orphan"]);
    assert_eq!(entry(&result, &server, "/orphan").depth(), 1);
}

#[tokio::test]
async fn test_respect_robots_skips_disallowed_urls() {
    let server = MockServer::start().await;

    mount(
        &server,
        "/robots.txt",
        ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private"),
    )
    .await;
    mount(&server, "/", link_page("Home", &["/private/page", "/public"])).await;
    mount(&server, "/public", link_page("Public", &[])).await;
    Mock::given(method("GET"))
        .and(path("/private/page"))
        .respond_with(link_page("Private", &[]))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = test_config(100);
    config.crawler.respect_robots = true;

    let result = crawl(&server.uri(), &config, None).await.unwrap();

    let private = entry(&result, &server, "/private/page").as_failed().unwrap();
    assert_eq!(private.kind, FailureKind::RobotsDisallowed);
    assert!(!private.is_unreachable());
    assert!(entry(&result, &server, "/public").as_fetched().is_some());
}

#[tokio::test]
async fn test_robots_ignored_by_default() {
    let server = MockServer::start().await;

    mount(
        &server,
        "/robots.txt",
        ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /"),
    )
    .await;
    mount_once(&server, "/", link_page("Home", &["/page"])).await;
    mount_once(&server, "/page", link_page("Page", &[])).await;

    let result = crawl(&server.uri(), &test_config(100), None).await.unwrap();

    assert_eq!(result.fetched_count(), 2);
}

#[tokio::test]
async fn test_progress_notifications() {
    let server = MockServer::start().await;

    mount(&server, "/", link_page("Home", &["/a", "/b"])).await;
    mount(&server, "/a", link_page("A", &[])).await;
    mount(&server, "/b", link_page("B", &[])).await;

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let result = crawl(&server.uri(), &test_config(10), Some(tx))
        .await
        .unwrap();

    let mut updates = Vec::new();
    while let Ok(progress) = rx.try_recv() {
        updates.push(progress);
    }

    assert_eq!(updates.len(), result.pages.len());
    assert_eq!(
        updates.iter().map(|p| p.current).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(updates.iter().all(|p| p.total == 10));
    assert_eq!(updates[0].url, format!("{}/", server.uri()));
}

#[tokio::test]
async fn test_page_signals_are_extracted() {
    let server = MockServer::start().await;

    mount(
        &server,
        "/",
        html(
            r#"<!DOCTYPE html>
            <html lang="en">
            <head>
              <meta charset="utf-8">
              <title>Handmade ceramics from our studio</title>
              <meta name="description" content="Bowls and cups">
              <meta name="viewport" content="width=device-width">
              <link rel="canonical" href="/">
            </head>
            <body>
              <h1>Ceramics</h1>
              <h2>Bowls</h2>
              <img src="/bowl.jpg" alt="A bowl" width="100" height="80" loading="lazy">
              <p>Six words of body text here.</p>
            </body>
            </html>"#,
        ),
    )
    .await;

    let result = crawl(&server.uri(), &test_config(10), None).await.unwrap();

    let home = entry(&result, &server, "/").as_fetched().unwrap();
    assert_eq!(home.status_code, 200);
    assert_eq!(home.title, "Handmade ceramics from our studio");
    assert_eq!(home.meta_description, "Bowls and cups");
    assert_eq!(home.lang, "en");
    assert_eq!(home.h1, vec!["Ceramics"]);
    assert_eq!(home.h2_count, 1);
    assert_eq!(home.images.len(), 1);
    assert!(home.content_type.starts_with("text/html"));
    assert!(!home.has_https);
}

#[tokio::test]
async fn test_invalid_base_url_is_a_setup_error() {
    let result = crawl("not a url", &test_config(10), None).await;
    assert!(matches!(result, Err(AuditError::InvalidBaseUrl { .. })));
}
