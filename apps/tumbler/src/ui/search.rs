//! Autocomplete list, keyboard navigation and candidate resolution.

use client_core::Catalog;
use shared::{
    domain::{CatalogEntry, RequestSeq},
    error::ServiceError,
};
use tracing::{debug, warn};

pub const SEARCHING_WEB: &str = "Searching the web for this compound...";
pub const NOT_FOUND_ONLINE: &str = "No information found online.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    ArrowDown,
    ArrowUp,
    Enter,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchResultCard {
    #[default]
    None,
    Local(CatalogEntry),
    Searching {
        query: String,
    },
    Web {
        query: String,
        text: String,
    },
    NotFound,
}

impl SearchResultCard {
    pub fn render(&self) -> String {
        match self {
            SearchResultCard::None => String::new(),
            SearchResultCard::Local(CatalogEntry::Compound { formula, name }) => {
                format!("Compound: {name} ({formula}) [Add to Tumbler]")
            }
            SearchResultCard::Local(CatalogEntry::Element { symbol, name, .. }) => {
                format!("Element: {name} ({symbol}) [Add to Tumbler]")
            }
            SearchResultCard::Searching { .. } => SEARCHING_WEB.to_string(),
            SearchResultCard::Web { query, text } => format!("Web Result for: {query}\n{text}"),
            SearchResultCard::NotFound => NOT_FOUND_ONLINE.to_string(),
        }
    }
}

/// What committing a candidate requires from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Local,
    WebSearch { seq: RequestSeq, query: String },
}

#[derive(Debug, Default, Clone)]
pub struct SearchResolver {
    input: String,
    autocomplete_seq: RequestSeq,
    web_seq: RequestSeq,
    /// Web lookup whose answer may still replace the result card.
    pending_web: Option<RequestSeq>,
    candidates: Vec<String>,
    list_visible: bool,
    highlighted: Option<usize>,
    autocomplete_pending: bool,
    pub result: SearchResultCard,
}

impl SearchResolver {
    /// Handles an input change; returns the prefix to look up, if any.
    pub fn input_changed(&mut self, text: &str) -> Option<(RequestSeq, String)> {
        self.input = text.to_string();
        // Any earlier lookup is superseded, including by an empty input.
        self.autocomplete_seq = self.autocomplete_seq.next();
        if self.pending_web.take().is_some() {
            self.result = SearchResultCard::None;
        }
        let prefix = text.trim();
        if prefix.is_empty() {
            self.candidates.clear();
            self.list_visible = false;
            self.highlighted = None;
            self.result = SearchResultCard::None;
            self.autocomplete_pending = false;
            return None;
        }
        self.autocomplete_pending = true;
        Some((self.autocomplete_seq, prefix.to_string()))
    }

    /// Merges settled lookups, compounds before elements. Failed halves
    /// count as empty. Returns `false` for stale responses.
    pub fn autocomplete_settled(
        &mut self,
        seq: RequestSeq,
        compounds: Result<Vec<String>, ServiceError>,
        elements: Result<Vec<String>, ServiceError>,
    ) -> bool {
        if seq != self.autocomplete_seq {
            debug!(%seq, latest = %self.autocomplete_seq, "discarding stale autocomplete response");
            return false;
        }
        self.autocomplete_pending = false;
        let compounds = compounds.unwrap_or_else(|err| {
            warn!(%err, "compound autocomplete failed");
            Vec::new()
        });
        let elements = elements.unwrap_or_else(|err| {
            warn!(%err, "element autocomplete failed");
            Vec::new()
        });
        self.candidates = compounds.into_iter().chain(elements).collect();
        self.highlighted = None;
        self.list_visible = !self.candidates.is_empty();
        true
    }

    /// Applies a navigation key; returns the candidate to commit on `Enter`.
    pub fn key(&mut self, key: SearchKey) -> Option<String> {
        if !self.list_visible || self.candidates.is_empty() {
            return None;
        }
        let last = self.candidates.len() - 1;
        match key {
            SearchKey::ArrowDown => {
                self.highlighted = Some(self.highlighted.map_or(0, |idx| (idx + 1).min(last)));
                None
            }
            SearchKey::ArrowUp => {
                self.highlighted = Some(self.highlighted.map_or(0, |idx| idx.saturating_sub(1)));
                None
            }
            SearchKey::Enter => self
                .highlighted
                .and_then(|idx| self.candidates.get(idx).cloned()),
        }
    }

    pub fn candidate(&self, index: usize) -> Option<String> {
        if !self.list_visible {
            return None;
        }
        self.candidates.get(index).cloned()
    }

    pub fn dismiss(&mut self) {
        self.list_visible = false;
    }

    /// Resolves a committed candidate, local catalogs first.
    pub fn commit(&mut self, candidate: &str, catalog: &Catalog) -> CommitOutcome {
        self.list_visible = false;
        self.highlighted = None;
        self.input = candidate.to_string();
        self.autocomplete_seq = self.autocomplete_seq.next();
        self.autocomplete_pending = false;
        self.pending_web = None;

        if let Some(entry) = catalog.lookup(candidate) {
            self.result = SearchResultCard::Local(entry.clone());
            return CommitOutcome::Local;
        }

        self.web_seq = self.web_seq.next();
        self.pending_web = Some(self.web_seq);
        self.result = SearchResultCard::Searching {
            query: candidate.to_string(),
        };
        CommitOutcome::WebSearch {
            seq: self.web_seq,
            query: candidate.to_string(),
        }
    }

    pub fn web_search_settled(
        &mut self,
        seq: RequestSeq,
        query: String,
        outcome: Result<Option<String>, ServiceError>,
    ) -> bool {
        if self.pending_web != Some(seq) {
            debug!(%seq, latest = %self.web_seq, "discarding stale web search response");
            return false;
        }
        self.pending_web = None;
        self.result = match outcome {
            Ok(Some(text)) if !text.trim().is_empty() => SearchResultCard::Web { query, text },
            Ok(_) => SearchResultCard::NotFound,
            Err(err) => {
                warn!(%query, %err, "web search failed");
                SearchResultCard::NotFound
            }
        };
        true
    }

    /// Catalog entry offered by the current result card.
    pub fn addable_entry(&self) -> Option<&CatalogEntry> {
        match &self.result {
            SearchResultCard::Local(entry) => Some(entry),
            _ => None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn list_visible(&self) -> bool {
        self.list_visible
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn web_search_pending(&self) -> bool {
        self.pending_web.is_some()
    }

    /// True while the latest lookup has not settled.
    pub fn autocomplete_pending(&self) -> bool {
        self.autocomplete_pending
    }
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
