use url::Url;

/// File extensions that are never fetched as HTML documents
///
/// Images, office documents, media, archives, stylesheets, scripts and data
/// files. A URL whose path ends with one of these is neither enqueued nor
/// reported as a broken link.
pub const NON_HTML_EXTENSIONS: &[&str] = &[
    // Images
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".ico", ".bmp",
    // Documents
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx",
    // Video
    ".mp4", ".avi", ".mov", ".wmv", ".flv", ".webm", ".mkv",
    // Audio
    ".mp3", ".wav", ".ogg", ".m4a",
    // Archives
    ".zip", ".rar", ".tar", ".gz", ".7z",
    // Styles, scripts and data
    ".css", ".js", ".json", ".xml", ".txt",
];

/// Checks whether the URL path ends with a non-HTML file extension
///
/// Only the path is inspected (case-insensitively), so a query string such as
/// `?download=report.pdf` does not exclude an HTML page.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_audit::url::has_non_html_extension;
///
/// assert!(has_non_html_extension(&Url::parse("https://example.com/logo.PNG").unwrap()));
/// assert!(!has_non_html_extension(&Url::parse("https://example.com/about").unwrap()));
/// ```
pub fn has_non_html_extension(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    NON_HTML_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_images_and_documents_are_excluded() {
        assert!(has_non_html_extension(&url("https://example.com/a/photo.jpeg")));
        assert!(has_non_html_extension(&url("https://example.com/brochure.pdf")));
        assert!(has_non_html_extension(&url("https://example.com/deck.PPTX")));
        assert!(has_non_html_extension(&url("https://example.com/backup.tar")));
    }

    #[test]
    fn test_assets_are_excluded() {
        assert!(has_non_html_extension(&url("https://example.com/app.js")));
        assert!(has_non_html_extension(&url("https://example.com/site.css")));
        assert!(has_non_html_extension(&url("https://example.com/sitemap.xml")));
        assert!(has_non_html_extension(&url("https://example.com/robots.txt")));
    }

    #[test]
    fn test_pages_are_kept() {
        assert!(!has_non_html_extension(&url("https://example.com/")));
        assert!(!has_non_html_extension(&url("https://example.com/services")));
        assert!(!has_non_html_extension(&url("https://example.com/index.html")));
        assert!(!has_non_html_extension(&url("https://example.com/page.php")));
    }

    #[test]
    fn test_query_string_is_ignored() {
        assert!(!has_non_html_extension(&url(
            "https://example.com/download?file=report.pdf"
        )));
        assert!(has_non_html_extension(&url(
            "https://example.com/report.pdf?v=2"
        )));
    }

    #[test]
    fn test_extension_must_be_a_suffix() {
        assert!(!has_non_html_extension(&url("https://example.com/jsonapi")));
        assert!(!has_non_html_extension(&url("https://example.com/gallery.png/view")));
    }
}
