// Built-in college football conference catalog.
//
// Used when the operator types in participant names instead of importing a
// sheet. The preset pins the Big Ten as the first conference drafted.

use crate::draft::setup::{Category, DraftSetup, StartOptions};

/// Conference drafted first in the preset.
pub const PINNED_CONFERENCE: &str = "Big Ten";

const BIG_TEN: &[&str] = &[
    "Illinois",
    "Indiana",
    "Iowa",
    "Maryland",
    "Michigan",
    "Michigan State",
    "Minnesota",
    "Nebraska",
    "Northwestern",
    "Ohio State",
    "Oregon",
    "Penn State",
    "Purdue",
    "Rutgers",
    "UCLA",
    "USC",
    "Washington",
    "Wisconsin",
];

const SEC: &[&str] = &[
    "Alabama",
    "Arkansas",
    "Auburn",
    "Florida",
    "Georgia",
    "Kentucky",
    "LSU",
    "Mississippi State",
    "Missouri",
    "Oklahoma",
    "Ole Miss",
    "South Carolina",
    "Tennessee",
    "Texas",
    "Texas A&M",
    "Vanderbilt",
];

const ACC: &[&str] = &[
    "Boston College",
    "California",
    "Clemson",
    "Duke",
    "Florida State",
    "Georgia Tech",
    "Louisville",
    "Miami",
    "NC State",
    "North Carolina",
    "Pittsburgh",
    "SMU",
    "Stanford",
    "Syracuse",
    "Virginia",
    "Virginia Tech",
    "Wake Forest",
];

const BIG_12: &[&str] = &[
    "Arizona",
    "Arizona State",
    "Baylor",
    "BYU",
    "Cincinnati",
    "Colorado",
    "Houston",
    "Iowa State",
    "Kansas",
    "Kansas State",
    "Oklahoma State",
    "TCU",
    "Texas Tech",
    "UCF",
    "Utah",
    "West Virginia",
];

/// The four power conferences and their member teams.
pub fn college_football() -> Vec<Category> {
    vec![
        Category::new("Big Ten", BIG_TEN.iter().copied()),
        Category::new("SEC", SEC.iter().copied()),
        Category::new("ACC", ACC.iter().copied()),
        Category::new("Big 12", BIG_12.iter().copied()),
    ]
}

/// Combine operator-entered names with the preset catalog.
///
/// Names are trimmed and blank entries dropped; duplicates are left for
/// setup validation to report.
pub fn setup_with_participants<I, S>(names: I) -> DraftSetup
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let participants = names
        .into_iter()
        .map(|n| n.as_ref().trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    DraftSetup::new(participants, college_football())
}

/// Start options for the preset: the pinned conference goes first.
pub fn start_options() -> StartOptions {
    StartOptions::pinned(PINNED_CONFERENCE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_catalog_is_valid() {
        let setup = setup_with_participants(["Matt", "Joe", "Sam", "Alex"]);
        setup.validate().unwrap();
        assert_eq!(setup.categories.len(), 4);
        assert!(setup.category(PINNED_CONFERENCE).is_some());
    }

    #[test]
    fn every_conference_covers_a_large_group() {
        for conference in college_football() {
            assert!(
                conference.items.len() >= 16,
                "{} has only {} teams",
                conference.name,
                conference.items.len()
            );
        }
    }

    #[test]
    fn blank_names_are_dropped() {
        let setup = setup_with_participants(vec!["  Matt ", "", "   ", "Joe"]);
        assert_eq!(setup.participants, vec!["Matt", "Joe"]);
    }

    #[test]
    fn start_options_pin_big_ten() {
        assert_eq!(
            start_options().pinned_first_category.as_deref(),
            Some("Big Ten")
        );
    }
}
