//! Integration tests for Sumi-Audit
//!
//! Every test runs against a wiremock server standing in for the audited site.

mod analysis_tests;
mod crawl_tests;
mod support;
