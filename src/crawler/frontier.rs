//! Breadth-first crawl frontier
//!
//! The frontier owns the pending FIFO queue together with the visited and
//! queued sets. A URL is marked visited when it is dequeued, before it is
//! fetched, so each URL is fetched at most once however many pages link to it.

use crate::url::has_non_html_extension;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL waiting to be fetched, paired with its BFS depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: Url,
    pub depth: usize,
}

/// Outcome of offering a URL to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    Queued,
    NonHtml,
    AlreadyVisited,
    AlreadyQueued,
}

/// FIFO queue of pending URLs bounded by a page budget
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    queued: HashSet<String>,
    visited: HashSet<String>,
    max_pages: usize,
}

impl Frontier {
    /// Creates a frontier seeded with `seed` at depth 0
    pub fn new(seed: Url, max_pages: usize) -> Self {
        let mut frontier = Self {
            queue: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
            max_pages,
        };
        frontier.push(seed, 0);
        frontier
    }

    /// Offers a discovered URL at `depth`
    ///
    /// The URL is rejected if its path has a non-HTML extension, or if it
    /// was already visited or is already waiting in the queue. A URL keeps
    /// the depth at which it was first offered.
    pub fn offer(&mut self, url: Url, depth: usize) -> Offer {
        if has_non_html_extension(&url) {
            return Offer::NonHtml;
        }

        let key = url.as_str();
        if self.visited.contains(key) {
            return Offer::AlreadyVisited;
        }
        if self.queued.contains(key) {
            return Offer::AlreadyQueued;
        }

        self.push(url, depth);
        Offer::Queued
    }

    fn push(&mut self, url: Url, depth: usize) {
        self.queued.insert(url.to_string());
        self.queue.push_back(FrontierEntry { url, depth });
    }

    /// Dequeues the next entry and marks it visited
    ///
    /// Returns `None` once the queue is empty or the page budget is spent.
    /// The budget check and the visited mutation happen together here, so
    /// the number of dequeued URLs never exceeds `max_pages`.
    pub fn next(&mut self) -> Option<FrontierEntry> {
        if self.budget_reached() {
            return None;
        }

        while let Some(entry) = self.queue.pop_front() {
            let key = entry.url.to_string();
            self.queued.remove(&key);
            if self.visited.insert(key) {
                return Some(entry);
            }
        }

        None
    }

    /// Returns true if the number of visited URLs reached the budget
    pub fn budget_reached(&self) -> bool {
        self.visited.len() >= self.max_pages
    }

    /// Returns true if the crawl stopped on the budget with work left over
    pub fn truncated(&self) -> bool {
        self.budget_reached() && !self.queue.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }
}
