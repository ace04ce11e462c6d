//! 列表视图状态

use admin_console_client::Record;
use serde::{Deserialize, Serialize};

/// Records per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Active sort key and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: String,
    pub direction: SortDirection,
}

impl SortConfig {
    #[must_use]
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    #[must_use]
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// User-controlled list state.
///
/// `current_page` is 1-based and is re-clamped to `[1, total_pages]` whenever
/// the view is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub search_term: String,
    pub sort: Option<SortConfig>,
    pub current_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort: None,
            current_page: 1,
        }
    }
}

impl ViewState {
    /// Replace the search term. Resets to page 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    /// Sort toggle rule: same key flips direction, a new key starts
    /// ascending. Either way resets to page 1.
    pub fn toggle_sort(&mut self, key: &str) {
        self.sort = Some(match self.sort.take() {
            Some(current) if current.key == key => SortConfig {
                key: current.key,
                direction: current.direction.toggled(),
            },
            _ => SortConfig::asc(key),
        });
        self.current_page = 1;
    }
}

/// One derived page of the filtered, sorted record set.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    /// Records on this page, in display order.
    pub items: Vec<&'a Record>,
    /// Clamped 1-based page number.
    pub current_page: usize,
    /// `max(1, ceil(total_count / page_size))`
    pub total_pages: usize,
    /// Number of records that passed the filter.
    pub total_count: usize,
    pub page_size: usize,
}

impl PageView<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}
