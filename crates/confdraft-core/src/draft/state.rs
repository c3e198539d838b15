// Draft state machine: randomized orders, cursor, and pick sequencing.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::ledger::Ledger;
use super::pick::{Cursor, Pick};
use super::rotation::{picker_at, rotated};
use super::setup::{DraftSetup, StartOptions};
use super::DraftError;

/// Where the draft is in its lifecycle.
///
/// `NotStarted -> Randomized -> InCategory(0) -> CategoryComplete(0) ->
/// InCategory(1) -> ... -> DraftComplete`. Positions index the category
/// order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftPhase {
    #[default]
    NotStarted,
    /// Orders are fixed; no category has been opened yet.
    Randomized,
    /// Picks are being made in the category at this position.
    InCategory(usize),
    /// The category at this position just filled up; the next one has not
    /// been opened yet.
    CategoryComplete(usize),
    DraftComplete,
}

/// Result of a successful pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickOutcome {
    pub pick: Pick,
    /// Position of the pick's category in the category order.
    pub category_position: usize,
    /// Slot within that category's rotated order (0-based).
    pub turn_position: usize,
    /// This pick filled the category.
    pub category_completed: bool,
    /// This pick filled the last category.
    pub draft_completed: bool,
}

/// The complete state of one draft.
#[derive(Debug, Clone, Default)]
pub struct DraftState {
    setup: DraftSetup,
    options: StartOptions,
    /// Participants in randomized pick order.
    pick_order: Vec<String>,
    /// Category names in randomized draft order.
    category_order: Vec<String>,
    ledger: Ledger,
    cursor: Cursor,
    phase: DraftPhase,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl DraftState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the setup, randomize both orders, and open an empty ledger.
    ///
    /// The pick order is a uniform shuffle of the participants. The category
    /// order is a uniform shuffle of the categories, except that a pinned
    /// category (if any) is placed first and only the rest are shuffled.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        setup: DraftSetup,
        options: StartOptions,
        rng: &mut R,
    ) -> Result<(), DraftError> {
        if self.phase != DraftPhase::NotStarted {
            return Err(DraftError::AlreadyStarted);
        }
        setup.validate()?;

        let pinned = match options.pinned_first_category.as_deref() {
            Some(name) => Some(
                setup
                    .category(name)
                    .map(|c| c.name.clone())
                    .ok_or_else(|| {
                        DraftError::validation(
                            "pinned_first_category",
                            format!("no category named '{name}'"),
                        )
                    })?,
            ),
            None => None,
        };

        let mut pick_order = setup.participants.clone();
        pick_order.shuffle(rng);

        let mut category_order: Vec<String> = setup
            .categories
            .iter()
            .map(|c| c.name.clone())
            .filter(|name| Some(name) != pinned.as_ref())
            .collect();
        category_order.shuffle(rng);
        if let Some(name) = pinned {
            category_order.insert(0, name);
        }

        self.install(setup, options, pick_order, category_order);
        Ok(())
    }

    /// Start with caller-supplied orders instead of shuffling.
    ///
    /// Each order must name every participant (or category) exactly once;
    /// names are matched ignoring case and stored in their setup spelling.
    pub fn start_with_orders(
        &mut self,
        setup: DraftSetup,
        pick_order: Vec<String>,
        category_order: Vec<String>,
    ) -> Result<(), DraftError> {
        if self.phase != DraftPhase::NotStarted {
            return Err(DraftError::AlreadyStarted);
        }
        setup.validate()?;

        let pick_order = canonical_permutation(
            "pick_order",
            &pick_order,
            setup.participants.len(),
            |name| setup.participant(name).map(str::to_string),
        )?;
        let category_order = canonical_permutation(
            "category_order",
            &category_order,
            setup.categories.len(),
            |name| setup.category(name).map(|c| c.name.clone()),
        )?;

        self.install(setup, StartOptions::default(), pick_order, category_order);
        Ok(())
    }

    fn install(
        &mut self,
        setup: DraftSetup,
        options: StartOptions,
        pick_order: Vec<String>,
        category_order: Vec<String>,
    ) {
        let n = setup.participants.len();
        for category in &setup.categories {
            if category.items.len() < n {
                warn!(
                    "{} has {} items for {} participants; it cannot be completed",
                    category.name,
                    category.items.len(),
                    n
                );
            }
        }

        info!(
            "Draft randomized: pick order [{}], category order [{}]",
            pick_order.join(", "),
            category_order.join(", ")
        );

        self.ledger = Ledger::new(&setup.categories, n);
        self.setup = setup;
        self.options = options;
        self.pick_order = pick_order;
        self.category_order = category_order;
        self.cursor = Cursor::default();
        self.phase = DraftPhase::Randomized;
        self.started_at = Some(Utc::now());
        self.completed_at = None;
    }

    /// Discard everything and return to `NotStarted` (the "new draft" action).
    pub fn reset(&mut self) {
        if self.phase != DraftPhase::NotStarted {
            info!(
                "Draft reset after {} of {} picks",
                self.ledger.total_picks(),
                self.total_picks()
            );
        }
        *self = DraftState::default();
    }

    /// True between `start` and `DraftComplete`.
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, DraftPhase::NotStarted | DraftPhase::DraftComplete)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == DraftPhase::DraftComplete
    }

    fn ensure_active(&self) -> Result<(), DraftError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(DraftError::NotActive)
        }
    }

    /// The participant whose turn it is.
    pub fn current_picker(&self) -> Result<&str, DraftError> {
        self.ensure_active()?;
        picker_at(
            &self.pick_order,
            self.cursor.category_position,
            self.cursor.turn_position,
        )
        .map(String::as_str)
        .ok_or(DraftError::NotActive)
    }

    /// The category currently being drafted.
    pub fn current_category(&self) -> Result<&str, DraftError> {
        self.ensure_active()?;
        self.category_order
            .get(self.cursor.category_position)
            .map(String::as_str)
            .ok_or(DraftError::NotActive)
    }

    /// Open the pending category.
    ///
    /// `Randomized` opens the first category and `CategoryComplete(c)` opens
    /// `c + 1`. Already being in a category is a no-op. Returns the open
    /// category position.
    pub fn begin_category(&mut self) -> Result<usize, DraftError> {
        match self.phase {
            DraftPhase::NotStarted | DraftPhase::DraftComplete => Err(DraftError::NotActive),
            DraftPhase::InCategory(position) => Ok(position),
            DraftPhase::Randomized | DraftPhase::CategoryComplete(_) => {
                let position = self.cursor.category_position;
                self.phase = DraftPhase::InCategory(position);
                debug!("Opened category {} ({})", position + 1, self.category_order[position]);
                Ok(position)
            }
        }
    }

    /// Record `item` for the current picker in the current category.
    ///
    /// Either the pick is recorded and the cursor advances, or an error is
    /// returned and nothing changes.
    pub fn submit_pick(&mut self, item: &str) -> Result<PickOutcome, DraftError> {
        let category = self.current_category()?.to_string();
        let participant = self.current_picker()?.to_string();

        let pick = match self.ledger.record_pick(&category, &participant, item) {
            Ok(pick) => pick.clone(),
            Err(e) => {
                warn!("Rejected pick by {}: {}", participant, e);
                return Err(e);
            }
        };
        debug!("Pick recorded: {}", pick);

        Ok(self.advance(pick))
    }

    fn advance(&mut self, pick: Pick) -> PickOutcome {
        let n = self.pick_order.len();
        let category_position = self.cursor.category_position;
        let turn_position = self.cursor.turn_position;

        self.cursor.turn_position += 1;
        let mut category_completed = false;
        let mut draft_completed = false;

        if self.cursor.turn_position >= n {
            category_completed = true;
            self.cursor.turn_position = 0;
            self.cursor.category_position += 1;
            info!("{} complete", pick.category);

            if self.cursor.category_position >= self.category_order.len() {
                draft_completed = true;
                self.phase = DraftPhase::DraftComplete;
                self.completed_at = Some(Utc::now());
                info!("Draft complete: {} picks recorded", self.ledger.total_picks());
            } else {
                self.phase = DraftPhase::CategoryComplete(category_position);
            }
        } else {
            self.phase = DraftPhase::InCategory(category_position);
        }

        PickOutcome {
            pick,
            category_position,
            turn_position,
            category_completed,
            draft_completed,
        }
    }

    /// Make one random pick for the current picker from the unclaimed items
    /// of the current category.
    pub fn simulate_next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<PickOutcome, DraftError> {
        let category = self.current_category()?;
        let item = self
            .ledger
            .available_items(category)
            .choose(rng)
            .map(|s| s.to_string());

        match item {
            Some(item) => self.submit_pick(&item),
            None => Err(DraftError::CatalogExhausted {
                category: category.to_string(),
                participant: self.current_picker()?.to_string(),
            }),
        }
    }

    /// Auto-complete: random picks for every remaining turn until the draft
    /// is complete. Picks go through `submit_pick`, so the ledger rules hold.
    pub fn simulate_remaining<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Vec<PickOutcome>, DraftError> {
        self.ensure_active()?;
        let mut outcomes = Vec::new();
        while self.is_active() {
            outcomes.push(self.simulate_next(rng)?);
        }
        Ok(outcomes)
    }

    /// Fraction of all picks made, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let total = self.total_picks();
        if total == 0 {
            return 0.0;
        }
        self.cursor.picks_made(self.pick_order.len()) as f64 / total as f64
    }

    /// Turn order for the category at `category_position`, derived from the
    /// pick order on every call.
    pub fn turn_order(&self, category_position: usize) -> Vec<&str> {
        rotated(&self.pick_order, category_position)
            .map(String::as_str)
            .collect()
    }

    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn setup(&self) -> &DraftSetup {
        &self.setup
    }

    pub fn options(&self) -> &StartOptions {
        &self.options
    }

    pub fn pick_order(&self) -> &[String] {
        &self.pick_order
    }

    pub fn category_order(&self) -> &[String] {
        &self.category_order
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn participant_count(&self) -> usize {
        self.pick_order.len()
    }

    pub fn category_count(&self) -> usize {
        self.category_order.len()
    }

    /// Picks needed to finish the draft.
    pub fn total_picks(&self) -> usize {
        self.participant_count() * self.category_count()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}

/// Check that `order` names each of `expected_len` entries exactly once and
/// map it to canonical spellings.
fn canonical_permutation<F>(
    field: &str,
    order: &[String],
    expected_len: usize,
    resolve: F,
) -> Result<Vec<String>, DraftError>
where
    F: Fn(&str) -> Option<String>,
{
    if order.len() != expected_len {
        return Err(DraftError::validation(
            field,
            format!("expected {expected_len} entries, got {}", order.len()),
        ));
    }
    let mut canonical: Vec<String> = Vec::with_capacity(order.len());
    for name in order {
        let resolved = resolve(name)
            .ok_or_else(|| DraftError::validation(field, format!("unknown entry '{name}'")))?;
        if canonical.contains(&resolved) {
            return Err(DraftError::validation(field, format!("'{name}' appears more than once")));
        }
        canonical.push(resolved);
    }
    Ok(canonical)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::setup::Category;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn two_by_one() -> DraftSetup {
        DraftSetup::new(names(&["A", "B"]), vec![Category::new("X", ["I1", "I2"])])
    }

    fn three_by_two() -> DraftSetup {
        DraftSetup::new(
            names(&["A", "B", "C"]),
            vec![
                Category::new("X", ["X1", "X2", "X3", "X4"]),
                Category::new("Y", ["Y1", "Y2", "Y3"]),
            ],
        )
    }

    fn started(setup: DraftSetup, pick_order: &[&str], category_order: &[&str]) -> DraftState {
        let mut state = DraftState::new();
        state
            .start_with_orders(setup, names(pick_order), names(category_order))
            .unwrap();
        state
    }

    fn sorted(mut v: Vec<String>) -> Vec<String> {
        v.sort();
        v
    }

    // -- lifecycle ----------------------------------------------------------

    #[test]
    fn new_state_is_not_started() {
        let state = DraftState::new();
        assert_eq!(state.phase(), DraftPhase::NotStarted);
        assert_eq!(state.current_picker(), Err(DraftError::NotActive));
        assert_eq!(state.current_category(), Err(DraftError::NotActive));
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn start_randomizes_permutations() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = DraftState::new();
            let setup = three_by_two();
            state.start(setup.clone(), StartOptions::default(), &mut rng).unwrap();

            assert_eq!(state.phase(), DraftPhase::Randomized);
            assert_eq!(sorted(state.pick_order().to_vec()), sorted(setup.participants.clone()));
            assert_eq!(
                sorted(state.category_order().to_vec()),
                names(&["X", "Y"])
            );
            assert_eq!(state.cursor(), Cursor::default());
            assert!(state.started_at().is_some());
        }
    }

    #[test]
    fn start_eventually_produces_different_orders() {
        let mut seen = HashSet::new();
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = DraftState::new();
            state.start(three_by_two(), StartOptions::default(), &mut rng).unwrap();
            seen.insert(state.pick_order().to_vec());
        }
        assert!(seen.len() > 1, "shuffle never changed the pick order");
    }

    #[test]
    fn pinned_category_is_always_first() {
        let setup = DraftSetup::new(
            names(&["A", "B"]),
            vec![
                Category::new("SEC", ["S1", "S2"]),
                Category::new("Big Ten", ["B1", "B2"]),
                Category::new("ACC", ["A1", "A2"]),
                Category::new("Big 12", ["T1", "T2"]),
            ],
        );
        let mut second_positions = HashSet::new();
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = DraftState::new();
            state
                .start(setup.clone(), StartOptions::pinned("big ten"), &mut rng)
                .unwrap();
            assert_eq!(state.category_order()[0], "Big Ten");
            assert_eq!(state.category_order().len(), 4);
            second_positions.insert(state.category_order()[1].clone());
        }
        assert!(second_positions.len() > 1, "unpinned categories were not shuffled");
    }

    #[test]
    fn unknown_pinned_category_is_a_validation_error() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = DraftState::new();
        let err = state
            .start(two_by_one(), StartOptions::pinned("Pac-12"), &mut rng)
            .unwrap_err();
        assert!(matches!(err, DraftError::Validation { ref field, .. } if field == "pinned_first_category"));
        assert_eq!(state.phase(), DraftPhase::NotStarted);
    }

    #[test]
    fn invalid_setup_does_not_start() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = DraftState::new();
        let setup = DraftSetup::new(names(&["A", "a"]), vec![Category::new("X", ["I1", "I2"])]);
        assert!(matches!(
            state.start(setup, StartOptions::default(), &mut rng),
            Err(DraftError::Validation { .. })
        ));
        assert_eq!(state.phase(), DraftPhase::NotStarted);
    }

    #[test]
    fn start_twice_requires_reset() {
        let mut state = started(two_by_one(), &["A", "B"], &["X"]);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            state.start(two_by_one(), StartOptions::default(), &mut rng),
            Err(DraftError::AlreadyStarted)
        );
        state.reset();
        assert_eq!(state.phase(), DraftPhase::NotStarted);
        state.start(two_by_one(), StartOptions::default(), &mut rng).unwrap();
    }

    #[test]
    fn start_with_orders_canonicalizes_and_rejects_bad_orders() {
        let state = started(two_by_one(), &["b", "A"], &["x"]);
        assert_eq!(state.pick_order(), names(&["B", "A"]).as_slice());
        assert_eq!(state.category_order(), names(&["X"]).as_slice());

        let mut state = DraftState::new();
        let err = state
            .start_with_orders(two_by_one(), names(&["A", "A"]), names(&["X"]))
            .unwrap_err();
        assert!(matches!(err, DraftError::Validation { ref field, .. } if field == "pick_order"));

        let err = state
            .start_with_orders(two_by_one(), names(&["A"]), names(&["X"]))
            .unwrap_err();
        assert!(matches!(err, DraftError::Validation { ref field, .. } if field == "pick_order"));

        let err = state
            .start_with_orders(two_by_one(), names(&["A", "B"]), names(&["Z"]))
            .unwrap_err();
        assert!(matches!(err, DraftError::Validation { ref field, .. } if field == "category_order"));
    }

    // -- picking ------------------------------------------------------------

    #[test]
    fn two_participant_scenario() {
        let mut state = started(two_by_one(), &["A", "B"], &["X"]);
        assert_eq!(state.current_picker(), Ok("A"));

        let outcome = state.submit_pick("I1").unwrap();
        assert_eq!(outcome.pick, Pick::new("A", "I1", "X"));
        assert_eq!(outcome.turn_position, 0);
        assert!(!outcome.category_completed);
        assert_eq!(state.phase(), DraftPhase::InCategory(0));
        assert_eq!(state.current_picker(), Ok("B"));

        assert_eq!(
            state.submit_pick("I1"),
            Err(DraftError::DuplicateItem {
                category: "X".into(),
                item: "I1".into()
            })
        );
        assert_eq!(state.current_picker(), Ok("B"));

        let outcome = state.submit_pick("I2").unwrap();
        assert!(outcome.category_completed);
        assert!(outcome.draft_completed);
        assert_eq!(state.phase(), DraftPhase::DraftComplete);
        assert!(state.completed_at().is_some());
        assert_eq!(state.current_picker(), Err(DraftError::NotActive));
        assert_eq!(state.submit_pick("I2"), Err(DraftError::NotActive));
        assert_eq!(state.progress(), 1.0);
    }

    #[test]
    fn second_category_rotates_first_picker() {
        let mut state = started(three_by_two(), &["A", "B", "C"], &["X", "Y"]);
        assert_eq!(state.turn_order(1), vec!["B", "C", "A"]);

        for item in ["X1", "X2", "X3"] {
            state.submit_pick(item).unwrap();
        }
        assert_eq!(state.phase(), DraftPhase::CategoryComplete(0));
        assert_eq!(state.current_category(), Ok("Y"));
        assert_eq!(state.current_picker(), Ok("B"));

        assert_eq!(state.begin_category(), Ok(1));
        assert_eq!(state.phase(), DraftPhase::InCategory(1));

        state.submit_pick("Y3").unwrap();
        assert_eq!(state.current_picker(), Ok("C"));
        assert_eq!(state.ledger().pick_for("Y", "B").unwrap().item, "Y3");
    }

    #[test]
    fn rejected_pick_leaves_cursor_untouched() {
        let mut state = started(three_by_two(), &["A", "B", "C"], &["X", "Y"]);
        state.submit_pick("X1").unwrap();
        let before = state.cursor();
        assert!(matches!(state.submit_pick("Y1"), Err(DraftError::InvalidItem { .. })));
        assert!(matches!(state.submit_pick("X1"), Err(DraftError::DuplicateItem { .. })));
        assert_eq!(state.cursor(), before);
        assert_eq!(state.ledger().total_picks(), 1);
    }

    #[test]
    fn begin_category_transitions() {
        let mut state = DraftState::new();
        assert_eq!(state.begin_category(), Err(DraftError::NotActive));

        let mut state = started(two_by_one(), &["A", "B"], &["X"]);
        assert_eq!(state.begin_category(), Ok(0));
        assert_eq!(state.begin_category(), Ok(0));
        assert_eq!(state.phase(), DraftPhase::InCategory(0));
    }

    #[test]
    fn queries_are_idempotent() {
        let mut state = started(three_by_two(), &["C", "A", "B"], &["Y", "X"]);
        state.submit_pick("Y2").unwrap();
        let picker = state.current_picker().unwrap().to_string();
        let progress = state.progress();
        for _ in 0..5 {
            assert_eq!(state.current_picker().unwrap(), picker);
            assert_eq!(state.progress(), progress);
        }
    }

    #[test]
    fn progress_follows_cursor() {
        let mut state = started(three_by_two(), &["A", "B", "C"], &["X", "Y"]);
        assert_eq!(state.progress(), 0.0);
        state.submit_pick("X1").unwrap();
        assert!((state.progress() - 1.0 / 6.0).abs() < 1e-9);
        state.submit_pick("X2").unwrap();
        state.submit_pick("X3").unwrap();
        assert!((state.progress() - 0.5).abs() < 1e-9);
    }

    // -- auto-complete ------------------------------------------------------

    #[test]
    fn simulate_remaining_completes_from_randomized() {
        for seed in 0..25 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = DraftState::new();
            state.start(three_by_two(), StartOptions::default(), &mut rng).unwrap();
            let outcomes = state.simulate_remaining(&mut rng).unwrap();

            assert_eq!(outcomes.len(), 6);
            assert!(outcomes.last().unwrap().draft_completed);
            assert!(state.is_complete());
            for category in ["X", "Y"] {
                let picks = state.ledger().picks_for(category);
                let items: HashSet<_> = picks.iter().map(|p| p.item.as_str()).collect();
                let people: HashSet<_> = picks.iter().map(|p| p.participant.as_str()).collect();
                assert_eq!(picks.len(), 3);
                assert_eq!(items.len(), 3);
                assert_eq!(people.len(), 3);
            }
        }
    }

    #[test]
    fn simulate_remaining_continues_a_partial_draft() {
        let mut state = started(three_by_two(), &["A", "B", "C"], &["X", "Y"]);
        state.submit_pick("X4").unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let outcomes = state.simulate_remaining(&mut rng).unwrap();
        assert_eq!(outcomes.len(), 5);
        assert_eq!(outcomes[0].pick.participant, "B");
        assert_eq!(state.ledger().pick_for("X", "A").unwrap().item, "X4");
        assert!(state.ledger().is_complete());
    }

    #[test]
    fn simulate_remaining_reports_exhausted_catalog() {
        let setup = DraftSetup::new(names(&["A", "B", "C"]), vec![Category::new("X", ["I1", "I2"])]);
        let mut state = started(setup, &["A", "B", "C"], &["X"]);
        let mut rng = StdRng::seed_from_u64(5);
        let err = state.simulate_remaining(&mut rng).unwrap_err();
        assert_eq!(
            err,
            DraftError::CatalogExhausted {
                category: "X".into(),
                participant: "C".into()
            }
        );
        assert_eq!(state.ledger().picks_for("X").len(), 2);
        assert_eq!(state.current_picker(), Ok("C"));
    }

    #[test]
    fn simulate_requires_an_active_draft() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut state = DraftState::new();
        assert_eq!(state.simulate_remaining(&mut rng), Err(DraftError::NotActive));
    }
}
