//! Search, status and category filtering for list views.
//!
//! Filtering never reorders: results keep the order of the input slice.
//! Sorting is a separate, explicit step.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use conform_model::{Category, MaterialItem, ValidationStatus};

/// A record that list views can search, filter and sort.
pub trait Filterable {
    /// Fields matched by free-text search.
    fn search_fields(&self) -> Vec<&str>;

    /// Value compared against [`StatusFilter::Only`].
    fn status_key(&self) -> &str;

    /// Category of the record, when it has one.
    fn category(&self) -> Option<Category> {
        None
    }

    /// Name used by [`SortBy::Name`].
    fn sort_name(&self) -> &str;

    /// Timestamp used by [`SortBy::LastUpdated`].
    fn last_updated(&self) -> Option<DateTime<Utc>> {
        None
    }
}

impl Filterable for MaterialItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.description, &self.spec_section]
    }

    fn status_key(&self) -> &str {
        self.status.as_str()
    }

    fn sort_name(&self) -> &str {
        &self.name
    }

    fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

/// Status predicate. `All` is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

/// Same spelling rules as the status enum: case, spaces and hyphens are ignored.
fn normalize_status(raw: &str) -> String {
    raw.trim().to_lowercase().replace([' ', '-'], "_")
}

impl StatusFilter {
    fn matches(&self, key: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => normalize_status(wanted) == normalize_status(key),
        }
    }
}

impl From<ValidationStatus> for StatusFilter {
    fn from(status: ValidationStatus) -> Self {
        Self::Only(status.as_str().to_string())
    }
}

impl FromStr for StatusFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_status(s);
        if key.is_empty() || key == "all" {
            Ok(Self::All)
        } else {
            Ok(Self::Only(key))
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => f.write_str(status),
        }
    }
}

/// Active predicates of a list view. All of them must hold.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub search_text: Option<String>,
    pub status: StatusFilter,
    pub category: Option<Category>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = status.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Whether no predicate is active.
    pub fn is_noop(&self) -> bool {
        self.needle().is_none() && self.status == StatusFilter::All && self.category.is_none()
    }

    fn needle(&self) -> Option<String> {
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        if !self.status.matches(item.status_key()) {
            return false;
        }
        // Records without a category are not narrowed by a category filter.
        if let (Some(wanted), Some(actual)) = (self.category, item.category())
            && wanted != actual
        {
            return false;
        }
        match self.needle() {
            None => true,
            Some(needle) => item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle)),
        }
    }
}

/// Keep the items matching `criteria`, in input order.
pub fn filter<'a, T: Filterable>(items: &'a [T], criteria: &FilterCriteria) -> Vec<&'a T> {
    items.iter().filter(|item| criteria.matches(*item)).collect()
}

/// Explicit ordering for list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Most recently updated first; records without a timestamp last.
    #[default]
    LastUpdated,
    /// Case-insensitive name, ascending.
    Name,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "last_updated" | "updated" => Ok(Self::LastUpdated),
            "name" => Ok(Self::Name),
            _ => Err(format!("Unknown sort order: {s}")),
        }
    }
}

/// Stable sort of `items` by `sort`.
pub fn sort_items<T: Filterable>(items: &mut [T], sort: SortBy) {
    match sort {
        SortBy::LastUpdated => items.sort_by_key(|item| Reverse(item.last_updated())),
        SortBy::Name => items.sort_by_cached_key(|item| item.sort_name().to_lowercase()),
    }
}

impl<T: Filterable + ?Sized> Filterable for &T {
    fn search_fields(&self) -> Vec<&str> {
        (**self).search_fields()
    }

    fn status_key(&self) -> &str {
        (**self).status_key()
    }

    fn category(&self) -> Option<Category> {
        (**self).category()
    }

    fn sort_name(&self) -> &str {
        (**self).sort_name()
    }

    fn last_updated(&self) -> Option<DateTime<Utc>> {
        (**self).last_updated()
    }
}
