//! Per-page rules
//!
//! Each function inspects one [`PageRecord`] and returns the issue
//! description when the rule fires. Image rules fire at most once per page
//! and report how many images are affected.

use crate::model::{ImageInfo, PageRecord};

const TITLE_MIN: usize = 30;
const TITLE_MAX: usize = 60;
const DESCRIPTION_MIN: usize = 120;
const DESCRIPTION_MAX: usize = 160;
const H1_MAX: usize = 70;
const H2_WORD_THRESHOLD: usize = 300;
const THIN_CONTENT_WORDS: usize = 300;
const VERY_THIN_CONTENT_WORDS: usize = 50;
const ALT_MAX: usize = 125;
const EAGER_IMAGES: usize = 3;
const MAX_LINKS: usize = 100;

/// Markup weight assumed around the text when estimating the text ratio
const ASSUMED_MARKUP_CHARS: f64 = 10_000.0;
const MIN_TEXT_RATIO: f64 = 0.1;

fn chars(s: &str) -> usize {
    s.chars().count()
}

pub fn http_404(page: &PageRecord) -> Option<String> {
    (page.status_code == 404).then(|| "Page not found (404)".to_string())
}

pub fn http_5xx(page: &PageRecord) -> Option<String> {
    (page.status_code >= 500).then(|| format!("Server error (code {})", page.status_code))
}

/// Final status is a redirect that was not followed, e.g. one without `Location`
pub fn http_redirect(page: &PageRecord) -> Option<String> {
    matches!(page.status_code, 301 | 302).then(|| format!("Code {}", page.status_code))
}

pub fn http_unusual(page: &PageRecord) -> Option<String> {
    let code = page.status_code;
    let covered = code == 200 || code == 404 || code >= 500 || code == 301 || code == 302;
    (!covered).then(|| format!("Code {}", code))
}

pub fn missing_title(page: &PageRecord) -> Option<String> {
    page.title
        .is_empty()
        .then(|| "The <title> tag is missing or empty".to_string())
}

pub fn title_too_short(page: &PageRecord) -> Option<String> {
    let len = chars(&page.title);
    (len > 0 && len < TITLE_MIN)
        .then(|| format!("{} characters (recommended minimum: {})", len, TITLE_MIN))
}

pub fn title_too_long(page: &PageRecord) -> Option<String> {
    let len = chars(&page.title);
    (len > TITLE_MAX).then(|| format!("{} characters (recommended maximum: {})", len, TITLE_MAX))
}

pub fn missing_meta_description(page: &PageRecord) -> Option<String> {
    page.meta_description
        .is_empty()
        .then(|| "No meta description defined".to_string())
}

pub fn meta_description_too_short(page: &PageRecord) -> Option<String> {
    let len = chars(&page.meta_description);
    (len > 0 && len < DESCRIPTION_MIN).then(|| {
        format!(
            "{} characters (recommended minimum: {})",
            len, DESCRIPTION_MIN
        )
    })
}

pub fn meta_description_too_long(page: &PageRecord) -> Option<String> {
    let len = chars(&page.meta_description);
    (len > DESCRIPTION_MAX).then(|| {
        format!(
            "{} characters (recommended maximum: {})",
            len, DESCRIPTION_MAX
        )
    })
}

pub fn meta_keywords_present(page: &PageRecord) -> Option<String> {
    (!page.meta_keywords.is_empty())
        .then(|| "The meta keywords tag is obsolete and can be removed".to_string())
}

pub fn missing_canonical(page: &PageRecord) -> Option<String> {
    page.canonical
        .is_empty()
        .then(|| "No canonical link declared".to_string())
}

pub fn missing_og(page: &PageRecord) -> Option<String> {
    let missing: Vec<&str> = [
        ("og:title", &page.og_title),
        ("og:description", &page.og_description),
        ("og:image", &page.og_image),
    ]
    .iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| *name)
    .collect();

    (!missing.is_empty()).then(|| format!("Missing {}", missing.join(", ")))
}

pub fn missing_h1(page: &PageRecord) -> Option<String> {
    page.h1
        .is_empty()
        .then(|| "No <h1> heading found".to_string())
}

pub fn multiple_h1(page: &PageRecord) -> Option<String> {
    (page.h1.len() > 1).then(|| format!("{} <h1> headings (recommended: 1)", page.h1.len()))
}

/// Only checked when the page has exactly one H1
pub fn h1_too_long(page: &PageRecord) -> Option<String> {
    match page.h1.as_slice() {
        [only] if chars(only) > H1_MAX => Some(format!(
            "{} characters (recommended maximum: {})",
            chars(only),
            H1_MAX
        )),
        _ => None,
    }
}

pub fn missing_h2(page: &PageRecord) -> Option<String> {
    (page.h2_count == 0 && page.word_count > H2_WORD_THRESHOLD).then(|| {
        format!(
            "{} words without any <h2> subheading",
            page.word_count
        )
    })
}

pub fn thin_content(page: &PageRecord) -> Option<String> {
    (page.word_count < THIN_CONTENT_WORDS && page.status_code == 200).then(|| {
        format!(
            "{} words (recommended minimum: {})",
            page.word_count, THIN_CONTENT_WORDS
        )
    })
}

pub fn very_thin_content(page: &PageRecord) -> Option<String> {
    (page.word_count < VERY_THIN_CONTENT_WORDS)
        .then(|| format!("Page is nearly empty ({} words)", page.word_count))
}

pub fn low_text_ratio(page: &PageRecord) -> Option<String> {
    let text = page.content_length as f64;
    let ratio = text / (text + ASSUMED_MARKUP_CHARS);
    (ratio < MIN_TEXT_RATIO).then(|| {
        format!(
            "Only {} characters of text for the surrounding markup",
            page.content_length
        )
    })
}

/// Describes how many images (1-based positions) match `predicate`
fn image_finding(
    images: &[ImageInfo],
    predicate: impl Fn(usize, &ImageInfo) -> bool,
    what: &str,
) -> Option<String> {
    let positions: Vec<String> = images
        .iter()
        .enumerate()
        .filter(|(index, image)| predicate(*index, image))
        .map(|(index, _)| (index + 1).to_string())
        .collect();

    match positions.len() {
        0 => None,
        1 => Some(format!("Image {} {}", positions[0], what)),
        n => Some(format!("{} images {} (#{})", n, what, positions.join(", #"))),
    }
}

pub fn missing_alt(page: &PageRecord) -> Option<String> {
    image_finding(
        &page.images,
        |_, image| image.alt.is_empty(),
        "without alt attribute",
    )
}

pub fn alt_too_long(page: &PageRecord) -> Option<String> {
    image_finding(
        &page.images,
        |_, image| chars(&image.alt) > ALT_MAX,
        &format!("with alt text over {} characters", ALT_MAX),
    )
}

pub fn image_missing_dimensions(page: &PageRecord) -> Option<String> {
    image_finding(
        &page.images,
        |_, image| image.width.is_empty() || image.height.is_empty(),
        "without width/height",
    )
}

/// The first three images may load eagerly
pub fn image_no_lazy_load(page: &PageRecord) -> Option<String> {
    image_finding(
        &page.images,
        |index, image| index >= EAGER_IMAGES && image.loading != "lazy",
        "not lazy-loaded",
    )
}

pub fn too_many_links(page: &PageRecord) -> Option<String> {
    let total = page.total_links();
    (total > MAX_LINKS).then(|| format!("{} links (recommended: under {})", total, MAX_LINKS))
}

pub fn missing_viewport(page: &PageRecord) -> Option<String> {
    page.viewport
        .is_empty()
        .then(|| "No viewport meta tag (mobile rendering)".to_string())
}

pub fn missing_lang(page: &PageRecord) -> Option<String> {
    page.lang
        .is_empty()
        .then(|| "No lang attribute on <html>".to_string())
}

pub fn charset_not_utf8(page: &PageRecord) -> Option<String> {
    if page.charset.to_ascii_lowercase().contains("utf-8") {
        return None;
    }
    if page.charset.is_empty() {
        Some("No charset declared".to_string())
    } else {
        Some(format!("Declared charset: {}", page.charset))
    }
}

pub fn no_https(page: &PageRecord) -> Option<String> {
    (!page.has_https).then(|| "Page is served over plain HTTP".to_string())
}

pub fn missing_schema(page: &PageRecord) -> Option<String> {
    (page.json_ld.is_empty() && !page.has_schema)
        .then(|| "No JSON-LD or microdata structured data".to_string())
}
