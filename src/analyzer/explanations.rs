//! Static explanation table, keyed by rule
//!
//! Read-only authoring metadata attached to every issue: what the rule means,
//! why it matters for ranking, and how to fix it.

use super::issue::Priority;
use super::rules::RuleId;
use serde::Serialize;

/// Why a rule matters and how to fix what it reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleExplanation {
    pub title: &'static str,
    pub severity: Priority,
    pub category: &'static str,
    pub description: &'static str,
    pub why: &'static str,
    pub how: &'static str,
    pub example: &'static str,
    pub impact: &'static str,
}

macro_rules! explain {
    (
        $title:expr, $severity:ident, $category:expr,
        $description:expr, $why:expr, $how:expr, $example:expr, $impact:expr $(,)?
    ) => {
        &RuleExplanation {
            title: $title,
            severity: Priority::$severity,
            category: $category,
            description: $description,
            why: $why,
            how: $how,
            example: $example,
            impact: $impact,
        }
    };
}

/// Returns the explanation for `rule`
pub fn explanation(rule: RuleId) -> &'static RuleExplanation {
    match rule {
        RuleId::Http404 => explain!(
            "Page not found (404)",
            Critical,
            "HTTP",
            "The server answers 404 for this URL, so visitors and crawlers land on an error page.",
            "Search engines drop 404 pages from the index and any link equity pointing at them is lost.",
            "Restore the page, or redirect the URL with a 301 to the closest equivalent and update internal links.",
            "Redirect /old-services to /services with a 301",
            "Very high: the page cannot rank and wastes crawl budget",
        ),
        RuleId::Http5xx => explain!(
            "Server error",
            Critical,
            "HTTP",
            "The server failed to produce the page and returned a 5xx status.",
            "Repeated server errors make crawlers slow down and eventually drop the URL from the index.",
            "Check the server and application logs for this URL and fix the underlying failure.",
            "A 500 caused by an uncaught exception in the page template",
            "Very high: the page is unavailable to everyone",
        ),
        RuleId::HttpRedirect => explain!(
            "Redirect",
            Medium,
            "HTTP",
            "The URL answers with a redirect status that could not be followed.",
            "A redirect without a usable target leaves crawlers on an empty response.",
            "Add a valid Location header or serve the content directly.",
            "HTTP/1.1 301 Moved Permanently with Location: https://example.com/new",
            "Medium: the content behind the URL is not reachable",
        ),
        RuleId::HttpUnusual => explain!(
            "Unusual HTTP status",
            Low,
            "HTTP",
            "The page answered with a status other than 200, 301, 302, 404 or 5xx.",
            "Statuses such as 403 or 204 usually mean a page is blocked or empty for crawlers.",
            "Make sure public pages answer 200 and reserve other statuses for their intended purpose.",
            "A 403 returned to bots by an overly strict firewall rule",
            "Low to medium depending on the status",
        ),
        RuleId::MissingTitle => explain!(
            "Missing title",
            Critical,
            "Meta tags",
            "The page has no <title>, which is the headline shown in search results.",
            "Without a title, search engines invent one and the page loses its strongest relevance signal.",
            "Add a unique, descriptive <title> inside <head>.",
            "<title>Roof cleaning in Lyon | Free quote | Acme Roofing</title>",
            "Critical: the page will not display properly in search results",
        ),
        RuleId::TitleTooShort => explain!(
            "Title too short",
            Medium,
            "Meta tags",
            "The title has fewer than 30 characters and does not describe the page well.",
            "Short titles carry few keywords and attract fewer clicks.",
            "Expand the title to 50-60 characters including the main keyword.",
            "Replace \"Home\" with \"Roof cleaning in Lyon | Free quote | Acme Roofing\"",
            "Medium: lower click-through rate",
        ),
        RuleId::TitleTooLong => explain!(
            "Title too long",
            Medium,
            "Meta tags",
            "The title is longer than 60 characters and will be truncated in search results.",
            "Truncated titles hide the end of the message and look unfinished.",
            "Keep the title under 60 characters with the key terms first.",
            "<title>Roof cleaning in Lyon | Acme Roofing</title>",
            "Medium: message cut off in search results",
        ),
        RuleId::MissingMetaDescription => explain!(
            "Missing meta description",
            High,
            "Meta tags",
            "The page has no meta description, the snippet shown under the title in search results.",
            "Search engines then pick arbitrary text from the page, which rarely makes people click.",
            "Add a 120-160 character meta description summarizing the page.",
            "<meta name=\"description\" content=\"Professional roof cleaning in Lyon. Free quote within 24h.\">",
            "High: fewer clicks from search results",
        ),
        RuleId::MetaDescriptionTooShort => explain!(
            "Meta description too short",
            Low,
            "Meta tags",
            "The meta description has fewer than 120 characters.",
            "A short snippet wastes the space search results give the page to convince visitors.",
            "Extend the description to 120-160 characters with a clear call to action.",
            "Add the service area and a benefit such as \"free quote\"",
            "Low: missed click-through opportunity",
        ),
        RuleId::MetaDescriptionTooLong => explain!(
            "Meta description too long",
            Low,
            "Meta tags",
            "The meta description is longer than 160 characters and will be truncated.",
            "The end of the snippet, often the call to action, is cut off.",
            "Shorten the description to 160 characters or fewer.",
            "Move the call to action to the start of the description",
            "Low: truncated snippet",
        ),
        RuleId::MetaKeywordsPresent => explain!(
            "Meta keywords present",
            Low,
            "Meta tags",
            "The page still declares a meta keywords tag.",
            "Search engines ignore this tag, and it reveals your keyword strategy to competitors.",
            "Remove the meta keywords tag.",
            "Delete <meta name=\"keywords\" content=\"...\">",
            "Low: cleanup only",
        ),
        RuleId::MissingCanonical => explain!(
            "Missing canonical",
            Medium,
            "Meta tags",
            "The page does not declare a canonical URL.",
            "Without a canonical, URL variants (parameters, trailing slashes) can be indexed as duplicates.",
            "Add a <link rel=\"canonical\"> pointing at the preferred URL of the page.",
            "<link rel=\"canonical\" href=\"https://example.com/services\">",
            "Medium: risk of duplicate content",
        ),
        RuleId::MissingOg => explain!(
            "Incomplete Open Graph",
            Low,
            "Social",
            "One or more of og:title, og:description and og:image is missing.",
            "Social networks build link previews from these tags; without them shares look bare.",
            "Add og:title, og:description, og:image and og:url meta tags.",
            "<meta property=\"og:title\" content=\"Roof cleaning in Lyon\">",
            "Low: weaker social sharing",
        ),
        RuleId::MissingH1 => explain!(
            "Missing H1",
            Critical,
            "Structure",
            "The page has no <h1>, the main heading that states its topic.",
            "Search engines use the H1 to understand what the page is about.",
            "Add one <h1> at the start of the main content with the page topic.",
            "<h1>Roof cleaning in Lyon</h1>",
            "Very high: weaker ranking on the main keywords",
        ),
        RuleId::MultipleH1 => explain!(
            "Multiple H1",
            Medium,
            "Structure",
            "The page has more than one <h1>.",
            "Several main headings blur the topic of the page.",
            "Keep a single H1 and turn the others into H2 or H3.",
            "Keep <h1>Main title</h1> and change the rest to <h2>",
            "Medium: diluted topic",
        ),
        RuleId::H1TooLong => explain!(
            "H1 too long",
            Low,
            "Structure",
            "The H1 is longer than 70 characters.",
            "Long headings are hard to scan and dilute the main keyword.",
            "Shorten the H1 and move details into the first paragraph.",
            "<h1>Roof cleaning in Lyon</h1>",
            "Low: less focused heading",
        ),
        RuleId::MissingH2 => explain!(
            "No H2 subheadings",
            Medium,
            "Structure",
            "The page has more than 300 words but no <h2>.",
            "Subheadings help readers and crawlers understand how the content is organized.",
            "Split the content into sections introduced by <h2> headings.",
            "<h2>Our roof cleaning process</h2>",
            "Medium: harder to read and to index by section",
        ),
        RuleId::ThinContent => explain!(
            "Thin content",
            Medium,
            "Content",
            "The page has fewer than 300 words.",
            "Pages with little text rarely answer a search query well enough to rank.",
            "Expand the page with useful, original content about its topic.",
            "Describe the service, the area covered, prices and frequently asked questions",
            "Medium: low perceived value",
        ),
        RuleId::VeryThinContent => explain!(
            "Nearly empty page",
            High,
            "Content",
            "The page has fewer than 50 words.",
            "Near-empty pages are treated as low quality and can drag down the whole site.",
            "Add real content, merge the page into another one, or remove it from the index.",
            "A category page listing only two product names",
            "High: the page is unlikely to be indexed",
        ),
        RuleId::LowTextRatio => explain!(
            "Low text to HTML ratio",
            Low,
            "Content",
            "The visible text is small compared to the markup of the page.",
            "Heavy markup with little text slows the page down and leaves little to index.",
            "Add text content or trim unnecessary markup, inline styles and scripts.",
            "Move inline scripts to external files",
            "Low: slower page with little indexable content",
        ),
        RuleId::MissingAlt => explain!(
            "Image without alt",
            Medium,
            "Images",
            "One or more images have no alt attribute.",
            "Alt text is how screen readers and image search understand an image.",
            "Describe each meaningful image in its alt attribute; use alt=\"\" only for decoration.",
            "<img src=\"roof.jpg\" alt=\"Moss-free tiled roof after cleaning\">",
            "Medium: accessibility and image search",
        ),
        RuleId::AltTooLong => explain!(
            "Alt text too long",
            Low,
            "Images",
            "One or more images have alt text longer than 125 characters.",
            "Screen readers cut long alt text and it reads like keyword stuffing.",
            "Keep alt text short and descriptive.",
            "alt=\"Tiled roof after cleaning\"",
            "Low: accessibility",
        ),
        RuleId::ImageMissingDimensions => explain!(
            "Image without dimensions",
            Medium,
            "Performance",
            "One or more images lack a width or height attribute.",
            "The browser cannot reserve space for the image, so the layout shifts as it loads (CLS).",
            "Set width and height on every <img>.",
            "<img src=\"roof.jpg\" width=\"800\" height=\"600\" alt=\"...\">",
            "Medium: worse Core Web Vitals",
        ),
        RuleId::ImageNoLazyLoad => explain!(
            "Image not lazy-loaded",
            Low,
            "Performance",
            "Images beyond the first three are loaded eagerly.",
            "Offscreen images compete with visible content for bandwidth.",
            "Add loading=\"lazy\" to images below the fold.",
            "<img src=\"gallery-4.jpg\" loading=\"lazy\" alt=\"...\">",
            "Low: slower initial load",
        ),
        RuleId::TooManyLinks => explain!(
            "Too many links",
            Low,
            "Links",
            "The page has more than 100 distinct links.",
            "Link equity is split between every link, and crawlers may not follow them all.",
            "Keep navigation focused and remove redundant links.",
            "Replace a full tag cloud with the ten most useful tags",
            "Low: diluted internal linking",
        ),
        RuleId::MissingViewport => explain!(
            "Missing viewport",
            High,
            "Mobile",
            "The page has no viewport meta tag.",
            "Without it mobile browsers render a zoomed-out desktop page, and ranking is mobile-first.",
            "Add a responsive viewport meta tag in <head>.",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
            "High: poor mobile experience",
        ),
        RuleId::MissingLang => explain!(
            "Missing lang attribute",
            Medium,
            "Technical",
            "The <html> element does not declare the page language.",
            "Search engines and screen readers use it to pick the right language handling.",
            "Set the lang attribute on the <html> element.",
            "<html lang=\"en\">",
            "Medium: language targeting and accessibility",
        ),
        RuleId::CharsetNotUtf8 => explain!(
            "Charset not UTF-8",
            Low,
            "Technical",
            "The page does not declare a UTF-8 character set.",
            "Other or missing encodings can garble accented characters in results and on the page.",
            "Declare UTF-8 as the first element of <head> and save files as UTF-8.",
            "<meta charset=\"UTF-8\">",
            "Low: risk of broken characters",
        ),
        RuleId::NoHttps => explain!(
            "No HTTPS",
            Critical,
            "Security",
            "The page is served over plain HTTP.",
            "HTTPS is a ranking signal and browsers flag HTTP pages as not secure.",
            "Install a TLS certificate and redirect every HTTP URL to HTTPS.",
            "https://example.com instead of http://example.com",
            "Critical: ranking penalty and loss of visitor trust",
        ),
        RuleId::MissingSchema => explain!(
            "No structured data",
            Medium,
            "Structured data",
            "The page has neither JSON-LD nor microdata markup.",
            "Structured data makes pages eligible for rich results such as ratings or FAQs.",
            "Add schema.org markup describing the page, ideally as JSON-LD.",
            "<script type=\"application/ld+json\">{\"@context\":\"https://schema.org\",\"@type\":\"LocalBusiness\"}</script>",
            "Medium: missed rich results",
        ),
        RuleId::PageUnreachable => explain!(
            "Page unreachable",
            High,
            "Crawlability",
            "The crawler could not fetch the page: timeout, network failure or broken redirect chain.",
            "Pages crawlers cannot reach are not indexed and may be dropped if the failure persists.",
            "Check DNS, TLS and server availability for the URL and fix any redirect loop.",
            "A redirect from /a to /b that redirects back to /a",
            "High: the page is invisible to search engines",
        ),
        RuleId::DuplicateTitle => explain!(
            "Duplicate title",
            High,
            "Duplication",
            "Several pages share exactly the same title.",
            "Identical titles make pages compete with each other for the same queries.",
            "Make every title unique by adding what is specific to the page.",
            "Use \"Roof cleaning\" and \"Moss removal\" instead of \"Services\" everywhere",
            "High: keyword cannibalization",
        ),
        RuleId::DuplicateMetaDescription => explain!(
            "Duplicate meta description",
            Medium,
            "Duplication",
            "Several pages share the same meta description.",
            "Identical snippets make results look interchangeable and reduce clicks.",
            "Write a unique description for each page.",
            "Describe the specific content of each page",
            "Medium: fewer clicks",
        ),
        RuleId::DuplicateH1 => explain!(
            "Duplicate H1",
            Medium,
            "Duplication",
            "Several pages share the same main heading.",
            "Identical headings blur which page is the best answer for a topic.",
            "Make each H1 specific to its page.",
            "Vary H1 headings according to the context of each page",
            "Medium: topical confusion",
        ),
        RuleId::OrphanPage => explain!(
            "Orphan page",
            Medium,
            "Links",
            "No other crawled page links to this page.",
            "Crawlers find pages through links; orphan pages are discovered late or not at all.",
            "Link to the page from relevant pages or the navigation.",
            "Add the page to the services menu",
            "Medium: poor discoverability",
        ),
        RuleId::BrokenLink => explain!(
            "Broken internal link",
            High,
            "Links",
            "The page links to internal URLs that fail or do not exist.",
            "Broken links frustrate visitors and waste crawl budget on dead ends.",
            "Fix or remove the links, or redirect the missing targets.",
            "Change href=\"/servces\" to href=\"/services\"",
            "High: poor experience and wasted crawl budget",
        ),
        RuleId::RedirectChain => explain!(
            "Redirect chain",
            Medium,
            "Links",
            "The URL goes through more than two redirects before reaching the content.",
            "Every hop adds latency and crawlers may stop following long chains.",
            "Point the original URL, and the links to it, straight at the final destination.",
            "/a -> /b -> /c -> /d becomes /a -> /d",
            "Medium: slower pages and lost link equity",
        ),
        RuleId::ExcessiveDepth => explain!(
            "Page too deep",
            Low,
            "Structure",
            "The page is more than three clicks away from the home page.",
            "Deep pages get crawled less often and are perceived as less important.",
            "Link to important pages from higher levels of the site.",
            "Link the product page from its category landing page",
            "Low: lower crawl priority",
        ),
        RuleId::HreflangIncomplete => explain!(
            "Incomplete hreflang",
            Medium,
            "International",
            "Some pages declare hreflang alternates and others do not.",
            "Inconsistent hreflang confuses language targeting and can show the wrong version.",
            "Declare hreflang on every page that has translations, including a self-reference.",
            "<link rel=\"alternate\" hreflang=\"en\" href=\"https://example.com/en/\">",
            "Medium: wrong language shown to visitors",
        ),
        RuleId::PaginationBroken => explain!(
            "Broken pagination",
            Medium,
            "Links",
            "A rel=next or rel=prev link points to a URL that fails or does not exist.",
            "Broken pagination hides the following pages of a series from crawlers.",
            "Make pagination links point to existing pages of the series.",
            "<link rel=\"next\" href=\"https://example.com/blog?page=2\">",
            "Medium: paginated content not crawled",
        ),
        RuleId::AmpDetected => explain!(
            "AMP detected",
            Low,
            "Technical",
            "Pages declare AMP versions.",
            "AMP no longer brings a ranking advantage and doubles the pages to maintain.",
            "Check that AMP versions stay in sync, or retire them in favor of fast regular pages.",
            "<link rel=\"amphtml\" href=\"https://example.com/amp/page\">",
            "Informational",
        ),
        RuleId::SitemapMissing => explain!(
            "Missing sitemap",
            High,
            "Crawlability",
            "No sitemap.xml was found at the root of the site.",
            "A sitemap tells search engines which pages exist and helps them find new ones quickly.",
            "Generate /sitemap.xml listing every indexable page and reference it in robots.txt.",
            "Sitemap: https://example.com/sitemap.xml",
            "High: slower and less complete indexing",
        ),
        RuleId::SitemapIncomplete => explain!(
            "Incomplete sitemap",
            Medium,
            "Crawlability",
            "The sitemap lists fewer URLs than the crawler found on the site.",
            "Pages missing from the sitemap rely on links alone to be discovered.",
            "Regenerate the sitemap automatically so it lists every indexable page.",
            "Add newly published pages to sitemap.xml",
            "Medium: some pages indexed late",
        ),
        RuleId::RobotsTxtMissing => explain!(
            "Missing robots.txt",
            Medium,
            "Crawlability",
            "No robots.txt was found at the root of the site.",
            "robots.txt tells crawlers what to skip and where the sitemap is.",
            "Create /robots.txt with your crawl rules and a Sitemap line.",
            "User-agent: *\nDisallow: /admin\nSitemap: https://example.com/sitemap.xml",
            "Medium: no crawl guidance",
        ),
    }
}
