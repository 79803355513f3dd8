//! Filter, search, and sort state consumed by the view engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Multi-dimensional filter predicate state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Selected category tags; empty means no category filtering.
    pub categories: BTreeSet<Category>,
    pub generations: GenerationSelection,
    pub caught: CaughtFilter,
}

impl FilterState {
    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }
}

/// Which generations the view is restricted to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationSelection {
    #[default]
    All,
    /// 1-based generation numbers, combined by union.
    Only(BTreeSet<usize>),
}

/// Annotation-state filter.
///
/// A UI with both the "caught" and "not caught" boxes ticked maps to `Any`:
/// pass-through, same as neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaughtFilter {
    #[default]
    Any,
    CaughtOnly,
    NotCaughtOnly,
}

/// Live search input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub mode: SearchMode,
    pub query: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMode {
    /// Case-insensitive name substring match.
    #[default]
    Name,
    /// Exact id or inclusive `low-high` range.
    Number,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortState {
    /// Catalog order; the canonical list is already ascending by id.
    #[default]
    NumberAscending,
    NameAscending,
    NameDescending,
}
