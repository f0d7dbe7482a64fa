//! Read-only views over a collection: category/search filtering and counts.

use crate::types::{Collection, Item};

/// Category and free-text predicates. Both must match when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    category: Option<String>,
    search: Option<String>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact category match. An empty label clears the predicate.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = (!category.is_empty()).then_some(category);
        self
    }

    /// Case-insensitive substring over name, description and features.
    /// The term is trimmed; a blank term clears the predicate.
    pub fn with_search(mut self, term: impl AsRef<str>) -> Self {
        let term = term.as_ref().trim().to_lowercase();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.search.is_none()
    }

    pub fn matches(&self, item: &Item) -> bool {
        if self.category.as_ref().is_some_and(|c| item.category != *c) {
            return false;
        }
        if let Some(term) = &self.search {
            let hit = item.name.to_lowercase().contains(term)
                || item.description.to_lowercase().contains(term)
                || item
                    .features
                    .iter()
                    .any(|f| f.to_lowercase().contains(term));
            if !hit {
                return false;
            }
        }
        true
    }
}

/// "Found `shown` items (`total` total)".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub shown: usize,
}

impl CatalogStats {
    pub fn is_filtered(&self) -> bool {
        self.shown != self.total
    }
}

impl Collection {
    /// Items matching `filter`, in collection order.
    pub fn filter(&self, filter: &ItemFilter) -> Vec<&Item> {
        self.iter().filter(|item| filter.matches(item)).collect()
    }

    pub fn stats(&self, filter: &ItemFilter) -> CatalogStats {
        CatalogStats {
            total: self.len(),
            shown: self.iter().filter(|item| filter.matches(item)).count(),
        }
    }

    /// Distinct categories in first-seen order, with item counts.
    pub fn categories(&self) -> Vec<(&str, usize)> {
        let mut seen: Vec<(&str, usize)> = Vec::new();
        for item in self {
            match seen.iter_mut().find(|(c, _)| *c == item.category) {
                Some((_, count)) => *count += 1,
                None => seen.push((item.category.as_str(), 1)),
            }
        }
        seen
    }
}
