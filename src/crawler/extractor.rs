//! Document extractor
//!
//! Turns one fetched document into a [`PageRecord`]. Parsing is best-effort:
//! malformed markup still yields a record, and any signal that cannot be
//! found is left at its empty default.

use super::fetcher::FetchedDocument;
use crate::model::{HreflangLink, ImageInfo, PageRecord};
use crate::url::{is_same_host, resolve_href};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Elements whose text is never rendered as page content
const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracts every SEO signal from a fetched document
///
/// # Arguments
///
/// * `url` - The crawl key the document was fetched for
/// * `depth` - BFS depth of the crawl key
/// * `fetched` - Fetch output (status, body, final URL, timing)
/// * `base_host` - Hostname of the seed, used to split internal and external links
///
/// # Returns
///
/// A complete page record. Relative links are resolved against the final
/// URL of the fetch, since that is the document the browser would render.
pub fn extract_page(
    url: &Url,
    depth: usize,
    fetched: &FetchedDocument,
    base_host: &str,
) -> PageRecord {
    let document = Html::parse_document(&fetched.body);
    let page_url = &fetched.final_url;

    let text = visible_body_text(&document);
    let (internal_links, external_links) = extract_links(&document, page_url, base_host);

    PageRecord {
        url: url.to_string(),
        status_code: fetched.status_code,
        load_time_ms: fetched.elapsed_ms,
        final_url: fetched.final_url.to_string(),
        depth,
        redirected: fetched.redirected(),
        redirect_hops: fetched.redirect_hops,
        content_type: fetched.content_type.clone(),

        title: first_text(&document, "title"),
        meta_description: meta_content(&document, r#"meta[name="description"]"#),
        meta_keywords: meta_content(&document, r#"meta[name="keywords"]"#),
        meta_robots: meta_content(&document, r#"meta[name="robots"]"#),
        canonical: first_attr(&document, r#"link[rel="canonical"]"#, "href"),

        og_title: meta_content(&document, r#"meta[property="og:title"]"#),
        og_description: meta_content(&document, r#"meta[property="og:description"]"#),
        og_image: meta_content(&document, r#"meta[property="og:image"]"#),
        og_type: meta_content(&document, r#"meta[property="og:type"]"#),

        twitter_card: meta_content(&document, r#"meta[name="twitter:card"]"#),
        twitter_title: meta_content(&document, r#"meta[name="twitter:title"]"#),
        twitter_description: meta_content(&document, r#"meta[name="twitter:description"]"#),

        h1: all_texts(&document, "h1"),
        h2_count: count(&document, "h2"),
        h3_count: count(&document, "h3"),
        h4_count: count(&document, "h4"),

        word_count: text.split_whitespace().count(),
        content_length: text.trim().chars().count(),

        images: extract_images(&document),

        internal_links,
        external_links,

        lang: root_attr(&document, "lang"),
        viewport: meta_content(&document, r#"meta[name="viewport"]"#),
        charset: extract_charset(&document),

        json_ld: extract_json_ld(&document),
        has_schema: count(&document, "[itemtype], [itemscope]") > 0,

        hreflang: extract_hreflang(&document),

        next_page: resolved_link_rel(&document, "next", page_url),
        prev_page: resolved_link_rel(&document, "prev", page_url),

        has_https: url.scheme() == "https",
        has_amp: has_amp(&document),
    }
}

fn select_all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

fn count(document: &Html, css: &str) -> usize {
    select_all(document, css).len()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_text(document: &Html, css: &str) -> String {
    select_all(document, css)
        .into_iter()
        .next()
        .map(element_text)
        .unwrap_or_default()
}

fn all_texts(document: &Html, css: &str) -> Vec<String> {
    select_all(document, css)
        .into_iter()
        .map(element_text)
        .collect()
}

fn first_attr(document: &Html, css: &str, attr: &str) -> String {
    select_all(document, css)
        .into_iter()
        .next()
        .and_then(|el| el.value().attr(attr))
        .unwrap_or("")
        .to_string()
}

fn meta_content(document: &Html, css: &str) -> String {
    first_attr(document, css, "content")
}

fn root_attr(document: &Html, attr: &str) -> String {
    document
        .root_element()
        .value()
        .attr(attr)
        .unwrap_or("")
        .to_string()
}

/// Concatenated text of `<body>`, skipping scripts, styles and templates
fn visible_body_text(document: &Html) -> String {
    let body = select_all(document, "body")
        .into_iter()
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut text = String::new();
    collect_visible_text(body, &mut text);
    text
}

fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !NON_CONTENT_ELEMENTS.contains(&child_element.value().name()) {
                collect_visible_text(child_element, out);
            }
        }
    }
}

/// Splits anchor targets into deduplicated internal and external sets
fn extract_links(document: &Html, page_url: &Url, base_host: &str) -> (Vec<String>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut internal = Vec::new();
    let mut external = Vec::new();

    for anchor in select_all(document, "a[href]") {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(target) = resolve_href(href, page_url) else {
            continue;
        };

        let key = target.to_string();
        if !seen.insert(key.clone()) {
            continue;
        }

        if is_same_host(&target, base_host) {
            internal.push(key);
        } else {
            external.push(key);
        }
    }

    (internal, external)
}

fn extract_images(document: &Html) -> Vec<ImageInfo> {
    select_all(document, "img")
        .into_iter()
        .map(|img| {
            let attr = |name: &str| img.value().attr(name).unwrap_or("").to_string();
            ImageInfo {
                src: attr("src"),
                alt: attr("alt"),
                title: attr("title"),
                width: attr("width"),
                height: attr("height"),
                loading: attr("loading"),
            }
        })
        .collect()
}

/// `<meta charset>` first, then the `Content-Type` http-equiv declaration
fn extract_charset(document: &Html) -> String {
    let charset = first_attr(document, "meta[charset]", "charset");
    if !charset.is_empty() {
        return charset;
    }
    meta_content(document, r#"meta[http-equiv="Content-Type"]"#)
}

/// Parses every JSON-LD block, dropping those that are not valid JSON
fn extract_json_ld(document: &Html) -> Vec<serde_json::Value> {
    select_all(document, r#"script[type="application/ld+json"]"#)
        .into_iter()
        .filter_map(|script| {
            let raw: String = script.text().collect();
            match serde_json::from_str(raw.trim()) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!("Dropping invalid JSON-LD block: {}", e);
                    None
                }
            }
        })
        .collect()
}

fn extract_hreflang(document: &Html) -> Vec<HreflangLink> {
    select_all(document, r#"link[rel="alternate"][hreflang]"#)
        .into_iter()
        .map(|link| HreflangLink {
            lang: link.value().attr("hreflang").unwrap_or("").to_string(),
            href: link.value().attr("href").unwrap_or("").to_string(),
        })
        .collect()
}

fn resolved_link_rel(document: &Html, rel: &str, page_url: &Url) -> String {
    let href = first_attr(document, &format!(r#"link[rel="{}"]"#, rel), "href");
    resolve_href(&href, page_url)
        .map(|url| url.to_string())
        .unwrap_or_default()
}

fn has_amp(document: &Html) -> bool {
    if count(document, r#"link[rel="amphtml"]"#) > 0 {
        return true;
    }
    let root = document.root_element().value();
    root.attr("amp").is_some() || root.attr("⚡").is_some()
}
