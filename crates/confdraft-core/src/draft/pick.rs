// Individual pick representation and the draft cursor.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A recorded draft pick. Created once per (participant, category) pair and
/// never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pick {
    /// Participant who made the pick (canonical setup spelling).
    pub participant: String,
    /// Item claimed from the category's catalog.
    pub item: String,
    /// Category the item belongs to.
    pub category: String,
}

impl Pick {
    pub fn new(
        participant: impl Into<String>,
        item: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Pick {
            participant: participant.into(),
            item: item.into(),
            category: category.into(),
        }
    }
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} selects {} from the {}", self.participant, self.item, self.category)
    }
}

/// Points at the next decision: which category in the category order, and
/// which slot in that category's rotated participant order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub category_position: usize,
    pub turn_position: usize,
}

impl Cursor {
    /// Number of picks made before this cursor position.
    pub fn picks_made(&self, participant_count: usize) -> usize {
        self.category_position * participant_count + self.turn_position
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_reads_like_a_confirmation() {
        let pick = Pick::new("Matt", "Ohio State", "Big Ten");
        assert_eq!(pick.to_string(), "Matt selects Ohio State from the Big Ten");
    }

    #[test]
    fn cursor_counts_completed_picks() {
        let cursor = Cursor {
            category_position: 2,
            turn_position: 1,
        };
        assert_eq!(cursor.picks_made(4), 9);
        assert_eq!(Cursor::default().picks_made(4), 0);
    }
}
