//! Structural document queries using scraper.

use std::collections::HashSet;

use probe_application::{DocumentError, DocumentQuery};
use scraper::{ElementRef, Html, Selector};

/// CSS-style selector queries over HTML documents.
///
/// Each token of a selector expression is parsed as its own
/// `scraper::Selector`; tokens are chained so every one matches among the
/// descendants of the elements the previous one matched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperDocumentQuery;

impl ScraperDocumentQuery {
    /// Creates a new query engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DocumentQuery for ScraperDocumentQuery {
    type Document = Html;
    type Query = Selector;

    fn parse(&self, source: &str) -> Result<Html, DocumentError> {
        // html5ever recovers from malformed markup instead of failing.
        let document = Html::parse_document(source);
        if !document.errors.is_empty() {
            tracing::trace!(errors = ?document.errors, "recovered from malformed markup");
        }
        Ok(document)
    }

    fn resolve(&self, token: &str) -> Result<Selector, DocumentError> {
        Selector::parse(token).map_err(|e| DocumentError::InvalidSelector {
            token: token.to_string(),
            reason: e.to_string(),
        })
    }

    fn apply(&self, document: &Html, queries: &[Selector]) -> usize {
        let Some((first, rest)) = queries.split_first() else {
            return 0;
        };

        let mut matched: Vec<ElementRef<'_>> = document.select(first).collect();
        for selector in rest {
            if matched.is_empty() {
                break;
            }
            // Nested scopes can reach the same descendant twice.
            let mut seen = HashSet::new();
            matched = matched
                .into_iter()
                .flat_map(|element| element.select(selector))
                .filter(|element| seen.insert((**element).id()))
                .collect();
        }

        matched.len()
    }
}
