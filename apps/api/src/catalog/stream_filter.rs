//! Narrows the catalog to careers in (or next to) the user's stream.
//!
//! Exact stream first, then the fixed related-stream table, then the whole
//! catalog. Never returns zero candidates for a non-empty catalog.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::models::career::canonical_stream;

/// Streams offered to users, in display order.
pub const SELECTABLE_STREAMS: &[&str] = &[
    "CSE", "ECE", "EEE", "CIVIL", "COMMERCE", "ARTS", "SCIENCE", "DESIGN", "ACCOUNTS", "MATHS",
];

const RELATED_STREAMS: &[(&str, &[&str])] = &[
    ("SCIENCE", &["CSE", "ECE", "EEE"]),
    ("MATHS", &["CSE", "ACCOUNTS", "COMMERCE"]),
    ("DESIGN", &["ARTS", "CSE"]),
    ("ACCOUNTS", &["COMMERCE"]),
    ("ARTS", &["DESIGN", "COMMERCE"]),
    ("COMMERCE", &["ACCOUNTS", "MANAGEMENT"]),
    ("CSE", &["ECE"]),
    ("ECE", &["EEE"]),
    ("EEE", &["ECE"]),
    ("CIVIL", &["MECHANICAL"]),
];

/// Which rule produced the candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterTier {
    Exact,
    Related,
    Unconstrained,
}

/// Immutable stream → related-streams table.
#[derive(Debug, Clone)]
pub struct StreamAdjacency {
    related: HashMap<&'static str, &'static [&'static str]>,
}

impl Default for StreamAdjacency {
    fn default() -> Self {
        Self {
            related: RELATED_STREAMS.iter().copied().collect(),
        }
    }
}

impl StreamAdjacency {
    pub fn related(&self, canonical: &str) -> Option<&'static [&'static str]> {
        self.related.get(canonical).copied()
    }

    /// Table entries in a stable order, for display.
    pub fn entries(&self) -> Vec<(&'static str, &'static [&'static str])> {
        RELATED_STREAMS.to_vec()
    }
}

/// Positions of the candidate careers, in catalog order, and the rule that selected them.
pub fn filter(
    catalog: &Catalog,
    adjacency: &StreamAdjacency,
    requested_stream: &str,
) -> (Vec<usize>, FilterTier) {
    let wanted = canonical_stream(requested_stream);

    let exact = positions_where(catalog, |key| key == wanted);
    if !exact.is_empty() {
        debug!(stream = %wanted, count = exact.len(), "exact stream match");
        return (exact, FilterTier::Exact);
    }

    if let Some(related) = adjacency.related(&wanted) {
        let nearby = positions_where(catalog, |key| related.iter().any(|r| *r == key));
        if !nearby.is_empty() {
            debug!(stream = %wanted, count = nearby.len(), "related stream match");
            return (nearby, FilterTier::Related);
        }
    }

    debug!(stream = %wanted, "no stream match, searching the whole catalog");
    ((0..catalog.len()).collect(), FilterTier::Unconstrained)
}

fn positions_where<F>(catalog: &Catalog, predicate: F) -> Vec<usize>
where
    F: Fn(&str) -> bool,
{
    (0..catalog.len())
        .filter(|&p| predicate(catalog.stream_key(p)))
        .collect()
}
