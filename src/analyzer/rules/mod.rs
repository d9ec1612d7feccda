//! Rule registry
//!
//! Every rule is a free function registered under a [`RuleId`]. Page rules
//! look at one [`PageRecord`]; site rules look at the whole crawl through a
//! [`SiteContext`]. Adding a rule means adding a variant, a check function
//! and a registry entry; existing rules are untouched.

mod page;
mod site;

pub use site::{SiteContext, TargetState};

use super::explanations::{self, RuleExplanation};
use super::issue::{IssueKind, Priority};
use crate::model::PageRecord;
use serde::{Serialize, Serializer};
use std::fmt;

/// Stable machine key of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleId {
    // HTTP status
    Http404,
    Http5xx,
    HttpRedirect,
    HttpUnusual,
    // Meta tags
    MissingTitle,
    TitleTooShort,
    TitleTooLong,
    MissingMetaDescription,
    MetaDescriptionTooShort,
    MetaDescriptionTooLong,
    MetaKeywordsPresent,
    MissingCanonical,
    MissingOg,
    // Headings
    MissingH1,
    MultipleH1,
    H1TooLong,
    MissingH2,
    // Content
    ThinContent,
    VeryThinContent,
    LowTextRatio,
    // Images
    MissingAlt,
    AltTooLong,
    ImageMissingDimensions,
    ImageNoLazyLoad,
    // Links
    TooManyLinks,
    // Technical
    MissingViewport,
    MissingLang,
    CharsetNotUtf8,
    NoHttps,
    MissingSchema,
    PageUnreachable,
    // Site-wide
    DuplicateTitle,
    DuplicateMetaDescription,
    DuplicateH1,
    OrphanPage,
    BrokenLink,
    RedirectChain,
    ExcessiveDepth,
    HreflangIncomplete,
    PaginationBroken,
    AmpDetected,
    SitemapMissing,
    SitemapIncomplete,
    RobotsTxtMissing,
}

impl RuleId {
    /// Every rule, in evaluation order
    pub const ALL: &'static [RuleId] = &[
        Self::Http404,
        Self::Http5xx,
        Self::HttpRedirect,
        Self::HttpUnusual,
        Self::MissingTitle,
        Self::TitleTooShort,
        Self::TitleTooLong,
        Self::MissingMetaDescription,
        Self::MetaDescriptionTooShort,
        Self::MetaDescriptionTooLong,
        Self::MetaKeywordsPresent,
        Self::MissingCanonical,
        Self::MissingOg,
        Self::MissingH1,
        Self::MultipleH1,
        Self::H1TooLong,
        Self::MissingH2,
        Self::ThinContent,
        Self::VeryThinContent,
        Self::LowTextRatio,
        Self::MissingAlt,
        Self::AltTooLong,
        Self::ImageMissingDimensions,
        Self::ImageNoLazyLoad,
        Self::TooManyLinks,
        Self::MissingViewport,
        Self::MissingLang,
        Self::CharsetNotUtf8,
        Self::NoHttps,
        Self::MissingSchema,
        Self::PageUnreachable,
        Self::DuplicateTitle,
        Self::DuplicateMetaDescription,
        Self::DuplicateH1,
        Self::OrphanPage,
        Self::BrokenLink,
        Self::RedirectChain,
        Self::ExcessiveDepth,
        Self::HreflangIncomplete,
        Self::PaginationBroken,
        Self::AmpDetected,
        Self::SitemapMissing,
        Self::SitemapIncomplete,
        Self::RobotsTxtMissing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http404 => "http_404",
            Self::Http5xx => "http_5xx",
            Self::HttpRedirect => "http_redirect",
            Self::HttpUnusual => "http_unusual",
            Self::MissingTitle => "missing_title",
            Self::TitleTooShort => "title_too_short",
            Self::TitleTooLong => "title_too_long",
            Self::MissingMetaDescription => "missing_meta_description",
            Self::MetaDescriptionTooShort => "meta_description_too_short",
            Self::MetaDescriptionTooLong => "meta_description_too_long",
            Self::MetaKeywordsPresent => "meta_keywords_present",
            Self::MissingCanonical => "missing_canonical",
            Self::MissingOg => "missing_og",
            Self::MissingH1 => "missing_h1",
            Self::MultipleH1 => "multiple_h1",
            Self::H1TooLong => "h1_too_long",
            Self::MissingH2 => "missing_h2",
            Self::ThinContent => "thin_content",
            Self::VeryThinContent => "very_thin_content",
            Self::LowTextRatio => "low_text_ratio",
            Self::MissingAlt => "missing_alt",
            Self::AltTooLong => "alt_too_long",
            Self::ImageMissingDimensions => "image_missing_dimensions",
            Self::ImageNoLazyLoad => "image_no_lazy_load",
            Self::TooManyLinks => "too_many_links",
            Self::MissingViewport => "missing_viewport",
            Self::MissingLang => "missing_lang",
            Self::CharsetNotUtf8 => "charset_not_utf8",
            Self::NoHttps => "no_https",
            Self::MissingSchema => "missing_schema",
            Self::PageUnreachable => "page_unreachable",
            Self::DuplicateTitle => "duplicate_title",
            Self::DuplicateMetaDescription => "duplicate_meta_description",
            Self::DuplicateH1 => "duplicate_h1",
            Self::OrphanPage => "orphan_page",
            Self::BrokenLink => "broken_link",
            Self::RedirectChain => "redirect_chain",
            Self::ExcessiveDepth => "excessive_depth",
            Self::HreflangIncomplete => "hreflang_incomplete",
            Self::PaginationBroken => "pagination_broken",
            Self::AmpDetected => "amp_detected",
            Self::SitemapMissing => "sitemap_missing",
            Self::SitemapIncomplete => "sitemap_incomplete",
            Self::RobotsTxtMissing => "robots_txt_missing",
        }
    }

    /// Short human label used as the issue title
    pub fn title(&self) -> &'static str {
        self.explanation().title
    }

    /// The (kind, priority) pair this rule always reports with
    pub fn classification(&self) -> (IssueKind, Priority) {
        use IssueKind::{Error, Opportunity, Warning};
        use Priority::{Critical, High, Low, Medium};

        match self {
            Self::Http404 | Self::Http5xx => (Error, Critical),
            Self::HttpRedirect => (Warning, Medium),
            Self::HttpUnusual => (Warning, Low),
            Self::MissingTitle => (Error, Critical),
            Self::TitleTooShort | Self::TitleTooLong => (Warning, Medium),
            Self::MissingMetaDescription => (Warning, High),
            Self::MetaDescriptionTooShort | Self::MetaDescriptionTooLong => (Warning, Low),
            Self::MetaKeywordsPresent => (Opportunity, Low),
            Self::MissingCanonical => (Opportunity, Medium),
            Self::MissingOg => (Opportunity, Low),
            Self::MissingH1 => (Error, Critical),
            Self::MultipleH1 => (Warning, Medium),
            Self::H1TooLong => (Warning, Low),
            Self::MissingH2 => (Opportunity, Medium),
            Self::ThinContent => (Warning, Medium),
            Self::VeryThinContent => (Error, High),
            Self::LowTextRatio => (Warning, Low),
            Self::MissingAlt => (Warning, Medium),
            Self::AltTooLong => (Warning, Low),
            Self::ImageMissingDimensions => (Opportunity, Medium),
            Self::ImageNoLazyLoad => (Opportunity, Low),
            Self::TooManyLinks => (Warning, Low),
            Self::MissingViewport => (Error, High),
            Self::MissingLang => (Warning, Medium),
            Self::CharsetNotUtf8 => (Warning, Low),
            Self::NoHttps => (Error, Critical),
            Self::MissingSchema => (Opportunity, Medium),
            Self::PageUnreachable => (Error, High),
            Self::DuplicateTitle => (Warning, High),
            Self::DuplicateMetaDescription | Self::DuplicateH1 => (Warning, Medium),
            Self::OrphanPage => (Warning, Medium),
            Self::BrokenLink => (Error, High),
            Self::RedirectChain => (Warning, Medium),
            Self::ExcessiveDepth => (Warning, Low),
            Self::HreflangIncomplete | Self::PaginationBroken => (Warning, Medium),
            Self::AmpDetected => (Opportunity, Low),
            Self::SitemapMissing => (Warning, High),
            Self::SitemapIncomplete | Self::RobotsTxtMissing => (Warning, Medium),
        }
    }

    /// Static "why / how / example / impact" metadata for this rule
    pub fn explanation(&self) -> &'static RuleExplanation {
        explanations::explanation(*self)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RuleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A check over one fetched page; returns the issue description when it fires
pub struct PageRule {
    pub id: RuleId,
    pub check: fn(&PageRecord) -> Option<String>,
}

/// One finding of a site rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub url: String,
    pub description: String,
}

impl Finding {
    pub fn new(url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: description.into(),
        }
    }
}

/// A check over the whole crawl; may fire for several URLs
pub struct SiteRule {
    pub id: RuleId,
    pub check: fn(&SiteContext<'_>) -> Vec<Finding>,
}

/// Per-page rules, in evaluation order
pub const PAGE_RULES: &[PageRule] = &[
    PageRule {
        id: RuleId::Http404,
        check: page::http_404,
    },
    PageRule {
        id: RuleId::Http5xx,
        check: page::http_5xx,
    },
    PageRule {
        id: RuleId::HttpRedirect,
        check: page::http_redirect,
    },
    PageRule {
        id: RuleId::HttpUnusual,
        check: page::http_unusual,
    },
    PageRule {
        id: RuleId::MissingTitle,
        check: page::missing_title,
    },
    PageRule {
        id: RuleId::TitleTooShort,
        check: page::title_too_short,
    },
    PageRule {
        id: RuleId::TitleTooLong,
        check: page::title_too_long,
    },
    PageRule {
        id: RuleId::MissingMetaDescription,
        check: page::missing_meta_description,
    },
    PageRule {
        id: RuleId::MetaDescriptionTooShort,
        check: page::meta_description_too_short,
    },
    PageRule {
        id: RuleId::MetaDescriptionTooLong,
        check: page::meta_description_too_long,
    },
    PageRule {
        id: RuleId::MetaKeywordsPresent,
        check: page::meta_keywords_present,
    },
    PageRule {
        id: RuleId::MissingCanonical,
        check: page::missing_canonical,
    },
    PageRule {
        id: RuleId::MissingOg,
        check: page::missing_og,
    },
    PageRule {
        id: RuleId::MissingH1,
        check: page::missing_h1,
    },
    PageRule {
        id: RuleId::MultipleH1,
        check: page::multiple_h1,
    },
    PageRule {
        id: RuleId::H1TooLong,
        check: page::h1_too_long,
    },
    PageRule {
        id: RuleId::MissingH2,
        check: page::missing_h2,
    },
    PageRule {
        id: RuleId::ThinContent,
        check: page::thin_content,
    },
    PageRule {
        id: RuleId::VeryThinContent,
        check: page::very_thin_content,
    },
    PageRule {
        id: RuleId::LowTextRatio,
        check: page::low_text_ratio,
    },
    PageRule {
        id: RuleId::MissingAlt,
        check: page::missing_alt,
    },
    PageRule {
        id: RuleId::AltTooLong,
        check: page::alt_too_long,
    },
    PageRule {
        id: RuleId::ImageMissingDimensions,
        check: page::image_missing_dimensions,
    },
    PageRule {
        id: RuleId::ImageNoLazyLoad,
        check: page::image_no_lazy_load,
    },
    PageRule {
        id: RuleId::TooManyLinks,
        check: page::too_many_links,
    },
    PageRule {
        id: RuleId::MissingViewport,
        check: page::missing_viewport,
    },
    PageRule {
        id: RuleId::MissingLang,
        check: page::missing_lang,
    },
    PageRule {
        id: RuleId::CharsetNotUtf8,
        check: page::charset_not_utf8,
    },
    PageRule {
        id: RuleId::NoHttps,
        check: page::no_https,
    },
    PageRule {
        id: RuleId::MissingSchema,
        check: page::missing_schema,
    },
];

/// Site-wide rules, run after every page rule
pub const SITE_RULES: &[SiteRule] = &[
    SiteRule {
        id: RuleId::DuplicateTitle,
        check: site::duplicate_title,
    },
    SiteRule {
        id: RuleId::DuplicateMetaDescription,
        check: site::duplicate_meta_description,
    },
    SiteRule {
        id: RuleId::DuplicateH1,
        check: site::duplicate_h1,
    },
    SiteRule {
        id: RuleId::OrphanPage,
        check: site::orphan_page,
    },
    SiteRule {
        id: RuleId::BrokenLink,
        check: site::broken_link,
    },
    SiteRule {
        id: RuleId::RedirectChain,
        check: site::redirect_chain,
    },
    SiteRule {
        id: RuleId::ExcessiveDepth,
        check: site::excessive_depth,
    },
    SiteRule {
        id: RuleId::HreflangIncomplete,
        check: site::hreflang_incomplete,
    },
    SiteRule {
        id: RuleId::PaginationBroken,
        check: site::pagination_broken,
    },
    SiteRule {
        id: RuleId::AmpDetected,
        check: site::amp_detected,
    },
    SiteRule {
        id: RuleId::SitemapMissing,
        check: site::sitemap_missing,
    },
    SiteRule {
        id: RuleId::SitemapIncomplete,
        check: site::sitemap_incomplete,
    },
    SiteRule {
        id: RuleId::RobotsTxtMissing,
        check: site::robots_txt_missing,
    },
];
