//! sitemap.xml parsing
//!
//! Only `<url><loc>` entries of a URL set are collected. Namespaces are
//! matched by local name, so sitemaps with and without the standard
//! `sitemaps.org` namespace parse the same way.

use sxd_document::parser;
use sxd_xpath::{Context, Factory, Value};

const LOC_XPATH: &str = "//*[local-name()='url']/*[local-name()='loc']";

/// Extracts the `<loc>` of every `<url>` entry, in document order
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Trimmed, non-empty locations
/// * `Err(String)` - The document is not well-formed XML
pub fn parse_sitemap(xml: &str) -> Result<Vec<String>, String> {
    let package = parser::parse(xml).map_err(|e| format!("Invalid sitemap XML: {}", e))?;
    let document = package.as_document();

    let factory = Factory::new();
    let xpath = factory
        .build(LOC_XPATH)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "Missing XPath".to_string())?;

    let context = Context::new();
    let value = xpath
        .evaluate(&context, document.root())
        .map_err(|e| e.to_string())?;

    let urls = match value {
        Value::Nodeset(nodes) => nodes
            .document_order()
            .into_iter()
            .map(|node| node.string_value().trim().to_string())
            .filter(|loc| !loc.is_empty())
            .collect(),
        _ => Vec::new(),
    };

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_namespaced_urlset() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/</loc><lastmod>2024-01-01</lastmod></url>
  <url><loc>
    https://example.com/about
  </loc></url>
</urlset>"#;
        assert_eq!(
            parse_sitemap(xml).unwrap(),
            vec!["https://example.com/", "https://example.com/about"]
        );
    }

    #[test]
    fn test_parse_without_namespace() {
        let xml = "<urlset><url><loc>https://example.com/a</loc></url></urlset>";
        assert_eq!(parse_sitemap(xml).unwrap(), vec!["https://example.com/a"]);
    }

    #[test]
    fn test_sitemap_index_has_no_url_entries() {
        let xml = r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://example.com/sitemap-1.xml</loc></sitemap>
</sitemapindex>"#;
        assert!(parse_sitemap(xml).unwrap().is_empty());
    }

    #[test]
    fn test_empty_loc_is_skipped() {
        let xml = "<urlset><url><loc>  </loc></url><url><loc>https://example.com/b</loc></url></urlset>";
        assert_eq!(parse_sitemap(xml).unwrap(), vec!["https://example.com/b"]);
    }

    #[test]
    fn test_invalid_xml() {
        assert!(parse_sitemap("<urlset><url>").is_err());
        assert!(parse_sitemap("<html><body>Not found</body></html").is_err());
    }
}
