/// Catalog browsing: three independent single-select filters over the catalog.
///
/// Filtering is a pure function of the catalog and a `FilterState`; the same
/// state always yields the same ordered subsequence of records.
use crate::catalog::Catalog;
use crate::error::AppError;
use crate::model::{Difficulty, TutorialRecord};

/// Keyword accepted for "no filter" on either selector.
const ALL: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    /// `None`, blank and "all" mean no filter; anything else must name a difficulty.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::All),
            Some(s) if s.eq_ignore_ascii_case(ALL) => Ok(Self::All),
            Some(s) => Difficulty::parse(s).map(Self::Only),
        }
    }

    pub fn matches(&self, record: &TutorialRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(d) => record.difficulty == *d,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::All => ALL,
            Self::Only(d) => d.key(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `None`, blank and "all" mean no filter. Unknown labels are kept and
    /// simply match nothing.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::All,
            Some(s) if s.eq_ignore_ascii_case(ALL) => Self::All,
            Some(s) => Self::Only(s.to_string()),
        }
    }

    pub fn matches(&self, record: &TutorialRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => record.category == *c,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Only(c) => c,
        }
    }
}

/// Current selections of the tutorial list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub difficulty: DifficultyFilter,
    pub category: CategoryFilter,
    pub query: String,
}

impl FilterState {
    pub fn new(difficulty: DifficultyFilter, category: CategoryFilter, query: impl Into<String>) -> Self {
        Self {
            difficulty,
            category,
            query: query.into(),
        }
    }

    /// Records matching every active filter, in catalog order.
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a TutorialRecord> {
        let needle = self.query.to_lowercase();
        catalog
            .records()
            .iter()
            .filter(|r| self.difficulty.matches(r))
            .filter(|r| self.category.matches(r))
            .filter(|r| matches_query(r, &needle))
            .collect()
    }

    /// Clear all three filters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

// Empty needle matches everything.
fn matches_query(record: &TutorialRecord, needle: &str) -> bool {
    record.title.to_lowercase().contains(needle)
        || record.description.to_lowercase().contains(needle)
}
