//! Term dictionary repository.
//!
//! All seven categories are loaded once at startup and are read-only
//! afterwards. A category whose resource cannot be decoded or parsed is
//! replaced by an empty set and reported back as a warning.

use std::collections::HashMap;

use musiterm_core::{Category, ResourceProvider, TermEntry, TermSet};

use crate::error::DictionaryError;

/// Immutable category -> term set mapping.
#[derive(Debug, Clone, Default)]
pub struct DictionaryRepository {
    sets: HashMap<Category, TermSet>,
    empty: TermSet,
}

impl DictionaryRepository {
    /// Load a single category's term set.
    pub fn load(
        provider: &dyn ResourceProvider,
        category: Category,
    ) -> Result<TermSet, DictionaryError> {
        let resource = category.resource_name();
        let unavailable = |reason: String| DictionaryError::ResourceUnavailable {
            category,
            resource,
            reason,
        };

        let bytes = provider
            .decode(resource)
            .map_err(|e| unavailable(format!("{e:#}")))?;
        TermSet::from_json(&bytes).map_err(|e| unavailable(e.to_string()))
    }

    /// Load every category, substituting an empty set for any that fail.
    ///
    /// The returned warnings list the categories that were degraded.
    pub fn load_all(provider: &dyn ResourceProvider) -> (Self, Vec<DictionaryError>) {
        let mut sets = HashMap::new();
        let mut warnings = Vec::new();

        for category in Category::ALL {
            let set = match Self::load(provider, category) {
                Ok(set) => {
                    tracing::debug!(%category, terms = set.len(), "dictionary loaded");
                    set
                }
                Err(e) => {
                    tracing::warn!("{e}; using an empty dictionary");
                    warnings.push(e);
                    TermSet::new()
                }
            };
            sets.insert(category, set);
        }

        (
            Self {
                sets,
                empty: TermSet::new(),
            },
            warnings,
        )
    }

    /// Build a repository from already-parsed sets.
    pub fn from_sets(sets: impl IntoIterator<Item = (Category, TermSet)>) -> Self {
        Self {
            sets: sets.into_iter().collect(),
            empty: TermSet::new(),
        }
    }

    /// The term set for `category`; empty if it was never loaded.
    pub fn get(&self, category: Category) -> &TermSet {
        self.sets.get(&category).unwrap_or(&self.empty)
    }

    pub fn search(&self, category: Category, needle: &str) -> Vec<TermEntry> {
        self.get(category).search(needle)
    }
}
