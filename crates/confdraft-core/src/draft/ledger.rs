// Allocation ledger: the authoritative record of picks, keyed by category.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::pick::Pick;
use super::setup::Category;
use super::DraftError;

/// Picks and availability for a single category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryLedger {
    /// Catalog items in display order.
    catalog: Vec<String>,
    /// Picks in the order they were made.
    picks: Vec<Pick>,
    /// Items already claimed.
    taken: HashSet<String>,
}

impl CategoryLedger {
    fn new(catalog: &[String]) -> Self {
        CategoryLedger {
            catalog: catalog.to_vec(),
            picks: Vec::new(),
            taken: HashSet::new(),
        }
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    pub fn picks(&self) -> &[Pick] {
        &self.picks
    }

    pub fn is_taken(&self, item: &str) -> bool {
        self.taken.contains(item)
    }

    fn pick_for(&self, participant: &str) -> Option<&Pick> {
        self.picks
            .iter()
            .find(|p| p.participant.eq_ignore_ascii_case(participant))
    }
}

/// Per-category pick records for one draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    categories: HashMap<String, CategoryLedger>,
    participant_count: usize,
}

impl Ledger {
    /// Create an empty ledger for the given catalogs.
    pub fn new(categories: &[Category], participant_count: usize) -> Self {
        Ledger {
            categories: categories
                .iter()
                .map(|c| (c.name.clone(), CategoryLedger::new(&c.items)))
                .collect(),
            participant_count,
        }
    }

    pub fn participant_count(&self) -> usize {
        self.participant_count
    }

    /// Record a pick. This is the only way ledger state changes.
    ///
    /// The item must belong to the category's catalog and still be free, and
    /// the participant must not already hold an item from this category. On
    /// failure nothing is recorded.
    pub fn record_pick(
        &mut self,
        category: &str,
        participant: &str,
        item: &str,
    ) -> Result<&Pick, DraftError> {
        let Some(entry) = self.categories.get_mut(category) else {
            return Err(DraftError::InvalidItem {
                category: category.to_string(),
                item: item.to_string(),
            });
        };

        if !entry.catalog.iter().any(|i| i == item) {
            return Err(DraftError::InvalidItem {
                category: category.to_string(),
                item: item.to_string(),
            });
        }
        if entry.taken.contains(item) {
            return Err(DraftError::DuplicateItem {
                category: category.to_string(),
                item: item.to_string(),
            });
        }
        if let Some(existing) = entry.pick_for(participant) {
            return Err(DraftError::DuplicateParticipantPick {
                category: category.to_string(),
                participant: existing.participant.clone(),
            });
        }

        entry.taken.insert(item.to_string());
        entry.picks.push(Pick::new(participant, item, category));
        Ok(&entry.picks[entry.picks.len() - 1])
    }

    /// Whether `item` has already been claimed in `category`.
    pub fn is_taken(&self, category: &str, item: &str) -> bool {
        self.categories
            .get(category)
            .is_some_and(|c| c.is_taken(item))
    }

    /// Picks for `category` in the order they were made.
    pub fn picks_for(&self, category: &str) -> &[Pick] {
        self.categories
            .get(category)
            .map(|c| c.picks())
            .unwrap_or(&[])
    }

    /// The participant's pick in `category`, matched case-insensitively.
    pub fn pick_for(&self, category: &str, participant: &str) -> Option<&Pick> {
        self.categories.get(category)?.pick_for(participant)
    }

    /// Catalog items in `category` that nobody has claimed yet.
    pub fn available_items(&self, category: &str) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|c| {
                c.catalog
                    .iter()
                    .filter(|i| !c.taken.contains(i.as_str()))
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Per-category view, if the category exists.
    pub fn category(&self, category: &str) -> Option<&CategoryLedger> {
        self.categories.get(category)
    }

    /// True when `category` holds exactly one pick per participant.
    pub fn is_category_complete(&self, category: &str) -> bool {
        self.categories
            .get(category)
            .is_some_and(|c| c.picks.len() == self.participant_count)
    }

    /// True when every category is complete.
    pub fn is_complete(&self) -> bool {
        !self.categories.is_empty()
            && self
                .categories
                .values()
                .all(|c| c.picks.len() == self.participant_count)
    }

    /// Total picks recorded across all categories.
    pub fn total_picks(&self) -> usize {
        self.categories.values().map(|c| c.picks.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
