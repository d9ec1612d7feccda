//! URL handling module for Sumi-Audit
//!
//! This module provides seed URL validation, link resolution, same-host
//! classification, and the non-HTML extension filter used by the frontier.

mod domain;
mod filter;
mod resolve;

// Re-export main functions
pub use domain::{extract_domain, is_same_host};
pub use filter::{has_non_html_extension, NON_HTML_EXTENSIONS};
pub use resolve::{parse_base_url, resolve_href};
