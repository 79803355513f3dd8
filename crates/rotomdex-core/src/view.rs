//! The view engine: a pure projection from canonical list + predicate state
//! to an ordered subsequence.
//!
//! Stage order is fixed: categories, generations, caught status, search,
//! sort. No stage performs I/O and none touches the canonical list; the
//! output is always a fresh copy.

use std::cmp::Reverse;

use crate::entry::Entry;
use crate::filter::{
    CaughtFilter, FilterState, GenerationSelection, SearchMode, SearchState, SortState,
};
use crate::generation::GENERATIONS;

/// A derived view: the surviving entries plus the canonical list length,
/// so consumers can render "N of M" against plain "M".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub entries: Vec<Entry>,
    pub total: usize,
}

impl View {
    pub fn is_filtered(&self) -> bool {
        self.entries.len() != self.total
    }

    pub fn count_label(&self) -> String {
        if self.is_filtered() {
            format!("{} of {}", self.entries.len(), self.total)
        } else {
            self.total.to_string()
        }
    }
}

/// A parsed number-mode query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberQuery {
    Exact(u32),
    /// Inclusive bounds, `low <= high` guaranteed by construction.
    Range(u32, u32),
}

impl NumberQuery {
    /// Parse a number-mode query: a bare integer or `low-high`.
    ///
    /// Anything else returns `None`, which the search stage treats as a
    /// no-op rather than an error.
    pub fn parse(query: &str) -> Option<Self> {
        let q = query.trim();
        if let Ok(n) = q.parse::<u32>() {
            return Some(NumberQuery::Exact(n));
        }
        let (low, high) = q.split_once('-')?;
        let low: u32 = low.trim().parse().ok()?;
        let high: u32 = high.trim().parse().ok()?;
        (low <= high).then_some(NumberQuery::Range(low, high))
    }

    pub fn matches(self, id: u32) -> bool {
        match self {
            NumberQuery::Exact(n) => id == n,
            NumberQuery::Range(low, high) => (low..=high).contains(&id),
        }
    }
}

/// Derive the ordered view for the given predicate state.
///
/// `is_caught` supplies annotation membership so this crate stays free of
/// any store dependency.
pub fn derive_view<F>(
    entries: &[Entry],
    filter: &FilterState,
    search: &SearchState,
    sort: SortState,
    is_caught: F,
) -> View
where
    F: Fn(u32) -> bool,
{
    let total = entries.len();
    let mut out: Vec<Entry> = entries
        .iter()
        .filter(|e| matches_categories(e.id, filter))
        .filter(|e| matches_generations(e.id, &filter.generations))
        .filter(|e| matches_caught(e.id, filter.caught, &is_caught))
        .filter(|e| matches_search(e, search))
        .cloned()
        .collect();
    apply_sort(&mut out, sort);
    View { entries: out, total }
}

fn matches_categories(id: u32, filter: &FilterState) -> bool {
    if filter.categories.is_empty() {
        return true;
    }
    filter.categories.iter().any(|cat| cat.contains(id))
}

fn matches_generations(id: u32, selection: &GenerationSelection) -> bool {
    match selection {
        GenerationSelection::All => true,
        GenerationSelection::Only(numbers) => numbers.iter().any(|&n| {
            GENERATIONS
                .get(n.wrapping_sub(1))
                .is_some_and(|g| id >= g.min && id <= g.max)
        }),
    }
}

fn matches_caught<F>(id: u32, filter: CaughtFilter, is_caught: &F) -> bool
where
    F: Fn(u32) -> bool,
{
    match filter {
        CaughtFilter::Any => true,
        CaughtFilter::CaughtOnly => is_caught(id),
        CaughtFilter::NotCaughtOnly => !is_caught(id),
    }
}

fn matches_search(entry: &Entry, search: &SearchState) -> bool {
    let query = search.query.trim();
    if query.is_empty() {
        return true;
    }
    match search.mode {
        SearchMode::Name => entry.name.to_lowercase().contains(&query.to_lowercase()),
        SearchMode::Number => match NumberQuery::parse(query) {
            Some(q) => q.matches(entry.id),
            // A query that parses as neither form filters nothing out.
            None => true,
        },
    }
}

fn apply_sort(entries: &mut Vec<Entry>, sort: SortState) {
    match sort {
        // Already in catalog order.
        SortState::NumberAscending => {}
        SortState::NameAscending => entries.sort_by_cached_key(|e| e.name.to_lowercase()),
        SortState::NameDescending => entries.sort_by_cached_key(|e| Reverse(e.name.to_lowercase())),
    }
}
