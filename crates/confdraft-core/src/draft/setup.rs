// Draft setup data: participants, category catalogs, and start options.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::DraftError;

/// A named group of items drafted as a unit (e.g. a conference).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// Catalog items in display order.
    pub items: Vec<String>,
}

impl Category {
    pub fn new<I, S>(name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Category {
            name: name.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }
}

/// Everything a draft needs before it can be randomized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSetup {
    pub participants: Vec<String>,
    pub categories: Vec<Category>,
}

impl DraftSetup {
    pub fn new(participants: Vec<String>, categories: Vec<Category>) -> Self {
        DraftSetup {
            participants,
            categories,
        }
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Look up a category by name (exact first, then case-insensitive).
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .or_else(|| self.categories.iter().find(|c| c.name.eq_ignore_ascii_case(name)))
    }

    /// Resolve a participant name to its canonical setup spelling.
    pub fn participant(&self, name: &str) -> Option<&str> {
        let key = name.trim().to_lowercase();
        self.participants
            .iter()
            .find(|p| p.trim().to_lowercase() == key)
            .map(String::as_str)
    }

    /// Check the setup before randomization.
    ///
    /// Participant names must be non-empty and unique ignoring case. There
    /// must be at least one category, every category needs a non-empty
    /// catalog, category names are unique ignoring case, and item names are
    /// unique within their category.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.participants.is_empty() {
            return Err(DraftError::validation("participants", "at least one participant is required"));
        }

        let mut seen = HashSet::new();
        for (idx, name) in self.participants.iter().enumerate() {
            let key = name.trim().to_lowercase();
            if key.is_empty() {
                return Err(DraftError::validation(
                    "participants",
                    format!("participant #{} has an empty name", idx + 1),
                ));
            }
            if !seen.insert(key) {
                return Err(DraftError::validation(
                    "participants",
                    format!("duplicate participant name '{}'", name.trim()),
                ));
            }
        }

        if self.categories.is_empty() {
            return Err(DraftError::validation("categories", "at least one category is required"));
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            let key = category.name.trim().to_lowercase();
            if key.is_empty() {
                return Err(DraftError::validation("categories", "category names must not be empty"));
            }
            if !seen.insert(key) {
                return Err(DraftError::validation(
                    "categories",
                    format!("duplicate category name '{}'", category.name),
                ));
            }
            if category.items.is_empty() {
                return Err(DraftError::validation(
                    "categories",
                    format!("{} has no items", category.name),
                ));
            }
            let mut items = HashSet::new();
            for item in &category.items {
                if !items.insert(item.as_str()) {
                    return Err(DraftError::validation(
                        "categories",
                        format!("{} lists '{}' more than once", category.name, item),
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Options applied when a draft is randomized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartOptions {
    /// Category fixed at the first position; the rest are shuffled.
    pub pinned_first_category: Option<String>,
}

impl StartOptions {
    pub fn pinned(category: impl Into<String>) -> Self {
        StartOptions {
            pinned_first_category: Some(category.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(participants: &[&str], categories: Vec<Category>) -> DraftSetup {
        DraftSetup::new(participants.iter().map(|s| s.to_string()).collect(), categories)
    }

    fn field_of(err: DraftError) -> String {
        match err {
            DraftError::Validation { field, .. } => field,
            other => panic!("expected Validation, got: {other}"),
        }
    }

    #[test]
    fn valid_setup_passes() {
        let s = setup(&["A", "B"], vec![Category::new("X", ["I1", "I2"])]);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn rejects_no_participants() {
        let s = setup(&[], vec![Category::new("X", ["I1"])]);
        assert_eq!(field_of(s.validate().unwrap_err()), "participants");
    }

    #[test]
    fn rejects_blank_participant() {
        let s = setup(&["A", "   "], vec![Category::new("X", ["I1"])]);
        assert_eq!(field_of(s.validate().unwrap_err()), "participants");
    }

    #[test]
    fn rejects_case_insensitive_duplicate_participant() {
        let s = setup(&["Matt", "MATT"], vec![Category::new("X", ["I1", "I2"])]);
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate participant"));
    }

    #[test]
    fn rejects_no_categories() {
        let s = setup(&["A"], vec![]);
        assert_eq!(field_of(s.validate().unwrap_err()), "categories");
    }

    #[test]
    fn rejects_empty_catalog() {
        let s = setup(
            &["A"],
            vec![Category::new("X", ["I1"]), Category::new("Y", Vec::<String>::new())],
        );
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("Y has no items"));
    }

    #[test]
    fn rejects_duplicate_category_names() {
        let s = setup(
            &["A"],
            vec![Category::new("SEC", ["I1"]), Category::new("sec", ["I2"])],
        );
        assert_eq!(field_of(s.validate().unwrap_err()), "categories");
    }

    #[test]
    fn rejects_duplicate_items_within_category() {
        let s = setup(&["A"], vec![Category::new("X", ["I1", "I1"])]);
        assert_eq!(field_of(s.validate().unwrap_err()), "categories");
    }

    #[test]
    fn participant_lookup_is_case_insensitive() {
        let s = setup(&["Matt", "Joe"], vec![Category::new("X", ["I1", "I2"])]);
        assert_eq!(s.participant("joe"), Some("Joe"));
        assert_eq!(s.participant(" MATT "), Some("Matt"));
        assert_eq!(s.participant("Sam"), None);
    }

    #[test]
    fn category_lookup_falls_back_to_case_insensitive() {
        let s = setup(&["A"], vec![Category::new("Big Ten", ["Iowa"])]);
        assert!(s.category("Big Ten").is_some());
        assert!(s.category("big ten").is_some());
        assert!(s.category("SEC").is_none());
    }
}
