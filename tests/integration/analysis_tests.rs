//! End-to-end tests of the crawl-then-analyze pipeline

use crate::support::{html, link_page, mount, test_config};
use std::time::Duration;
use sumi_audit::analyzer::IssueSet;
use sumi_audit::{audit, AuditError, IssueKind, Priority, RuleId};
use tempfile::TempDir;
use wiremock::{MockServer, ResponseTemplate};

fn rule_count(issues: &IssueSet, rule: RuleId) -> usize {
    issues.by_rule(rule).len()
}

#[tokio::test]
async fn test_bare_http_page_scores_at_most_40() {
    let server = MockServer::start().await;

    mount(
        &server,
        "/",
        html(
            r#"<html><head><meta name="viewport" content="width=device-width"></head>
            <body><p>Hello</p></body></html>"#,
        ),
    )
    .await;

    let report = audit(&server.uri(), &test_config(10), None).await.unwrap();

    for rule in [RuleId::MissingTitle, RuleId::MissingH1, RuleId::NoHttps] {
        let found = report.issues.by_rule(rule);
        assert_eq!(found.len(), 1, "{} should be reported once", rule);
        assert_eq!(found[0].kind, IssueKind::Error);
        assert_eq!(found[0].priority, Priority::Critical);
    }
    assert_eq!(rule_count(&report.issues, RuleId::MissingViewport), 0);
    assert!(report.score <= 40);
}

#[tokio::test]
async fn test_robots_without_sitemap() {
    let server = MockServer::start().await;

    mount(
        &server,
        "/robots.txt",
        ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /"),
    )
    .await;
    mount(&server, "/", link_page("Home", &[])).await;

    let report = audit(&server.uri(), &test_config(10), None).await.unwrap();

    assert_eq!(rule_count(&report.issues, RuleId::SitemapMissing), 1);
    assert_eq!(rule_count(&report.issues, RuleId::RobotsTxtMissing), 0);
}

#[tokio::test]
async fn test_redirected_robots_and_sitemap_are_present() {
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
    mount(
        &server,
        "/real-sitemap.xml",
        ResponseTemplate::new(200).set_body_string(format!(
            r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"><url><loc>{}/</loc></url></urlset>"#,
            server.uri()
        )),
    )
    .await;
    mount(&server, "/", link_page("Home", &[])).await;

    let report = audit(&server.uri(), &test_config(10), None).await.unwrap();

    assert_eq!(rule_count(&report.issues, RuleId::SitemapMissing), 0);
    assert_eq!(rule_count(&report.issues, RuleId::RobotsTxtMissing), 0);
}

#[tokio::test]
async fn test_duplicate_titles_reported_once() {
    let server = MockServer::start().await;

    mount(&server, "/", link_page("Home", &["/a", "/b"])).await;
    mount(&server, "/a", link_page("Shared title", &[])).await;
    mount(&server, "/b", link_page("Shared title", &[])).await;

    let report = audit(&server.uri(), &test_config(10), None).await.unwrap();

    let duplicates = report.issues.by_rule(RuleId::DuplicateTitle);
    assert_eq!(duplicates.len(), 1);
    assert!(duplicates[0].description.contains('2'));
    assert_eq!(duplicates[0].url, format!("{}/a", server.uri()));
}

#[tokio::test]
async fn test_broken_internal_link_reported_on_linking_page() {
    let server = MockServer::start().await;

    mount(&server, "/", link_page("Home", &["/gone", "/ok"])).await;
    mount(&server, "/ok", link_page("Fine", &[])).await;
    mount(&server, "/gone", ResponseTemplate::new(404)).await;

    let report = audit(&server.uri(), &test_config(10), None).await.unwrap();

    let broken = report.issues.by_rule(RuleId::BrokenLink);
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0].url, format!("{}/", server.uri()));
    assert!(broken[0].description.contains("/gone"));
    assert!(!broken[0].description.contains("/ok"));

    assert_eq!(rule_count(&report.issues, RuleId::Http404), 1);
}

#[tokio::test]
async fn test_sitemap_seeded_page_without_links_is_orphan() {
    let server = MockServer::start().await;

    let sitemap = format!(
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
          <url><loc>{0}/</loc></url>
          <url><loc>{0}/linked</loc></url>
          <url><loc>{0}/orphan</loc></url>
        </urlset>"#,
        server.uri()
    );
    mount(
        &server,
        "/sitemap.xml",
        ResponseTemplate::new(200).set_body_string(sitemap),
    )
    .await;
    mount(&server, "/", link_page("Home", &["/linked"])).await;
    mount(&server, "/linked", link_page("Linked", &[])).await;
    mount(&server, "/orphan", link_page("Orphan", &[])).await;

    let mut config = test_config(10);
    config.crawler.seed_from_sitemap = true;

    let report = audit(&server.uri(), &config, None).await.unwrap();

    let orphans = report.issues.by_rule(RuleId::OrphanPage);
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].url, format!("{}/orphan", server.uri()));
}

#[tokio::test]
async fn test_long_redirect_chain() {
    let server = MockServer::start().await;

    mount(&server, "/", link_page("Home", &["/r1"])).await;
    for (from, to) in [("/r1", "/r2"), ("/r2", "/r3"), ("/r3", "/final")] {
        mount(
            &server,
            from,
            ResponseTemplate::new(301).insert_header("location", to),
        )
        .await;
    }
    mount(&server, "/final", link_page("Final", &[])).await;

    let report = audit(&server.uri(), &test_config(10), None).await.unwrap();

    let chains = report.issues.by_rule(RuleId::RedirectChain);
    assert_eq!(chains.len(), 1);
    assert_eq!(chains[0].url, format!("{}/r1", server.uri()));
}

#[tokio::test]
async fn test_timed_out_page_is_unreachable() {
    let server = MockServer::start().await;

    mount(&server, "/", link_page("Home", &["/slow"])).await;
    mount(
        &server,
        "/slow",
        link_page("Slow", &[]).set_delay(Duration::from_millis(1_500)),
    )
    .await;

    let mut config = test_config(10);
    config.crawler.page_timeout_ms = 300;

    let report = audit(&server.uri(), &config, None).await.unwrap();

    let unreachable = report.issues.by_rule(RuleId::PageUnreachable);
    assert_eq!(unreachable.len(), 1);
    assert_eq!(unreachable[0].url, format!("{}/slow", server.uri()));
    assert_eq!(report.summary.pages_failed, 1);
}

#[tokio::test]
async fn test_no_fetched_page_fails_the_audit() {
    let server = MockServer::start().await;

    mount(
        &server,
        "/",
        link_page("Home", &[]).set_delay(Duration::from_millis(1_500)),
    )
    .await;

    let mut config = test_config(10);
    config.crawler.page_timeout_ms = 300;

    let result = audit(&server.uri(), &config, None).await;
    assert!(matches!(result, Err(AuditError::NoPagesCrawled { .. })));
}

#[tokio::test]
async fn test_analysis_is_deterministic() {
    let server = MockServer::start().await;

    mount(&server, "/", link_page("Home", &["/a", "/b"])).await;
    mount(&server, "/a", link_page("A", &["/missing"])).await;
    mount(&server, "/b", link_page("A", &[])).await;

    let config = test_config(10);
    let first = audit(&server.uri(), &config, None).await.unwrap();
    let second = audit(&server.uri(), &config, None).await.unwrap();

    assert_eq!(first.score, second.score);
    assert_eq!(first.issues, second.issues);
}

#[tokio::test]
async fn test_report_written_as_json() {
    let server = MockServer::start().await;
    mount(&server, "/", link_page("Home", &[])).await;

    let report = audit(&server.uri(), &test_config(10), None)
        .await
        .unwrap()
        .with_config_hash("deadbeef");

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("audit.json");
    report.write_json(&path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["configHash"], "deadbeef");
    assert_eq!(json["score"], report.score);
    assert_eq!(json["summary"]["pagesCrawled"], 1);
    assert_eq!(json["pages"][0]["title"], "Home");
    assert!(json["issues"]["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .any(|i| i["ruleId"] == "sitemap_missing"));
}
