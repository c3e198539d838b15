// Draft session: the coordination layer the presentation tier talks to.
//
// Owns a `DraftState`, forwards operations to it, notifies registered
// observers of state transitions, and builds read-only projections (results
// matrix, pick detail, per-category board). Rotation is recomputed from the
// pick order for every projection.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::pick::Pick;
use super::setup::{DraftSetup, StartOptions};
use super::state::{DraftPhase, DraftState, PickOutcome};
use super::DraftError;

// ---------------------------------------------------------------------------
// Events and observers
// ---------------------------------------------------------------------------

/// A state transition reported to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftEvent {
    /// Orders were randomized and the ledger opened.
    Started {
        pick_order: Vec<String>,
        category_order: Vec<String>,
    },
    /// Picking opened in a category.
    CategoryOpened { category: String, position: usize },
    PickRecorded {
        pick: Pick,
        category_position: usize,
        turn_position: usize,
    },
    /// A category received its last pick. `next` is the category drafted
    /// after it, if any.
    CategoryCompleted {
        category: String,
        position: usize,
        next: Option<String>,
    },
    DraftCompleted,
    Reset,
}

/// Receives draft events. Implemented for any `FnMut(&DraftEvent)`.
pub trait DraftObserver {
    fn on_event(&mut self, event: &DraftEvent);
}

impl<F> DraftObserver for F
where
    F: FnMut(&DraftEvent),
{
    fn on_event(&mut self, event: &DraftEvent) {
        self(event)
    }
}

/// Handle returned by [`DraftSession::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(usize);

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

/// One cell of the results matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCell {
    pub category: String,
    pub item: Option<String>,
}

/// One participant's row of the results matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// 1-based position in the pick order.
    pub rank: usize,
    pub participant: String,
    /// Cells in category order.
    pub cells: Vec<ResultCell>,
}

impl ResultRow {
    pub fn item_for(&self, category: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|c| c.category == category)
            .and_then(|c| c.item.as_deref())
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.item.is_some())
    }
}

/// One slot of the pick detail listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickDetailRow {
    pub category: String,
    pub category_position: usize,
    /// Slot in the category's rotated order (0-based).
    pub turn_position: usize,
    pub participant: String,
    pub item: Option<String>,
}

impl PickDetailRow {
    /// 1-based pick number within the category.
    pub fn pick_number(&self) -> usize {
        self.turn_position + 1
    }
}

/// Availability of a catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStatus {
    pub name: String,
    pub taken: bool,
}

/// A participant's slot in a category's rotated order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSlot {
    pub turn_position: usize,
    pub participant: String,
    pub pick: Option<String>,
    /// It is this participant's turn right now.
    pub on_the_clock: bool,
}

/// Everything the presentation layer shows for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBoard {
    pub name: String,
    pub position: usize,
    pub items: Vec<ItemStatus>,
    pub slots: Vec<BoardSlot>,
    pub complete: bool,
}

impl CategoryBoard {
    pub fn available_count(&self) -> usize {
        self.items.iter().filter(|i| !i.taken).count()
    }
}

// ---------------------------------------------------------------------------
// DraftSession
// ---------------------------------------------------------------------------

/// A draft owned by its caller. Sessions are independent of each other.
#[derive(Default)]
pub struct DraftSession {
    state: DraftState,
    observers: Vec<(ObserverId, Box<dyn DraftObserver>)>,
    next_observer: usize,
}

impl DraftSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for all subsequent events.
    pub fn subscribe(&mut self, observer: impl DraftObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    fn emit(&mut self, event: DraftEvent) {
        for (_, observer) in &mut self.observers {
            observer.on_event(&event);
        }
    }

    fn emit_started(&mut self) {
        let event = DraftEvent::Started {
            pick_order: self.state.pick_order().to_vec(),
            category_order: self.state.category_order().to_vec(),
        };
        self.emit(event);
    }

    // -- commands -----------------------------------------------------------

    pub fn start<R: Rng + ?Sized>(
        &mut self,
        setup: DraftSetup,
        options: StartOptions,
        rng: &mut R,
    ) -> Result<(), DraftError> {
        self.state.start(setup, options, rng)?;
        self.emit_started();
        Ok(())
    }

    pub fn start_with_orders(
        &mut self,
        setup: DraftSetup,
        pick_order: Vec<String>,
        category_order: Vec<String>,
    ) -> Result<(), DraftError> {
        self.state.start_with_orders(setup, pick_order, category_order)?;
        self.emit_started();
        Ok(())
    }

    /// Discard the draft (the "new draft" action).
    pub fn reset(&mut self) {
        self.state.reset();
        self.emit(DraftEvent::Reset);
    }

    /// Reset and randomize again with the same setup and options.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), DraftError> {
        if self.state.phase() == DraftPhase::NotStarted {
            return Err(DraftError::NotActive);
        }
        let setup = self.state.setup().clone();
        let options = self.state.options().clone();
        self.reset();
        self.start(setup, options, rng)
    }

    /// Open the pending category (see [`DraftState::begin_category`]).
    pub fn begin_category(&mut self) -> Result<usize, DraftError> {
        let opening = self.is_between_categories();
        let position = self.state.begin_category()?;
        if opening {
            self.emit_opened(position);
        }
        Ok(position)
    }

    /// Record `item` for the current picker. Rejected picks change nothing
    /// and notify nobody.
    pub fn submit_pick(&mut self, item: &str) -> Result<PickOutcome, DraftError> {
        let opening = self.is_between_categories();
        let outcome = self.state.submit_pick(item)?;
        self.emit_outcome(&outcome, opening);
        Ok(outcome)
    }

    /// Auto-complete the rest of the draft with random picks. Returns the
    /// number of picks made. Picks made before a failure stay recorded and
    /// are reported to observers.
    pub fn simulate_remaining<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, DraftError> {
        if !self.state.is_active() {
            return Err(DraftError::NotActive);
        }
        let mut made = 0;
        while self.state.is_active() {
            let opening = self.is_between_categories();
            let outcome = self.state.simulate_next(rng)?;
            self.emit_outcome(&outcome, opening);
            made += 1;
        }
        info!("Auto-completed {} picks", made);
        Ok(made)
    }

    fn is_between_categories(&self) -> bool {
        matches!(
            self.state.phase(),
            DraftPhase::Randomized | DraftPhase::CategoryComplete(_)
        )
    }

    fn emit_opened(&mut self, position: usize) {
        if let Some(category) = self.state.category_order().get(position).cloned() {
            self.emit(DraftEvent::CategoryOpened { category, position });
        }
    }

    fn emit_outcome(&mut self, outcome: &PickOutcome, opened: bool) {
        if opened {
            self.emit_opened(outcome.category_position);
        }
        self.emit(DraftEvent::PickRecorded {
            pick: outcome.pick.clone(),
            category_position: outcome.category_position,
            turn_position: outcome.turn_position,
        });
        if outcome.category_completed {
            let next = self
                .state
                .category_order()
                .get(outcome.category_position + 1)
                .cloned();
            self.emit(DraftEvent::CategoryCompleted {
                category: outcome.pick.category.clone(),
                position: outcome.category_position,
                next,
            });
        }
        if outcome.draft_completed {
            self.emit(DraftEvent::DraftCompleted);
        }
    }

    // -- queries ------------------------------------------------------------

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    pub fn phase(&self) -> DraftPhase {
        self.state.phase()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn current_picker(&self) -> Result<&str, DraftError> {
        self.state.current_picker()
    }

    pub fn current_category(&self) -> Result<&str, DraftError> {
        self.state.current_category()
    }

    pub fn progress(&self) -> f64 {
        self.state.progress()
    }

    pub fn is_taken(&self, category: &str, item: &str) -> bool {
        self.state.ledger().is_taken(category, item)
    }

    /// Rows in pick order, columns in category order. Cells are `None` only
    /// while the draft is unfinished.
    pub fn results_matrix(&self) -> Vec<ResultRow> {
        let ledger = self.state.ledger();
        self.state
            .pick_order()
            .iter()
            .enumerate()
            .map(|(idx, participant)| ResultRow {
                rank: idx + 1,
                participant: participant.clone(),
                cells: self
                    .state
                    .category_order()
                    .iter()
                    .map(|category| ResultCell {
                        category: category.clone(),
                        item: ledger
                            .pick_for(category, participant)
                            .map(|p| p.item.clone()),
                    })
                    .collect(),
            })
            .collect()
    }

    /// One row per (category, rotated slot), categories in draft order.
    pub fn pick_detail(&self) -> Vec<PickDetailRow> {
        let ledger = self.state.ledger();
        let mut rows = Vec::with_capacity(self.state.total_picks());
        for (position, category) in self.state.category_order().iter().enumerate() {
            for (turn, participant) in self.state.turn_order(position).into_iter().enumerate() {
                rows.push(PickDetailRow {
                    category: category.clone(),
                    category_position: position,
                    turn_position: turn,
                    participant: participant.to_string(),
                    item: ledger.pick_for(category, participant).map(|p| p.item.clone()),
                });
            }
        }
        rows
    }

    /// The board for the category at `position` in the category order.
    pub fn category_board(&self, position: usize) -> Option<CategoryBoard> {
        let name = self.state.category_order().get(position)?;
        let ledger = self.state.ledger();
        let entry = ledger.category(name)?;
        let cursor = self.state.cursor();
        let active = self.state.is_active();

        let items = entry
            .catalog()
            .iter()
            .map(|item| ItemStatus {
                name: item.clone(),
                taken: entry.is_taken(item),
            })
            .collect();

        let slots = self
            .state
            .turn_order(position)
            .into_iter()
            .enumerate()
            .map(|(turn, participant)| BoardSlot {
                turn_position: turn,
                participant: participant.to_string(),
                pick: ledger.pick_for(name, participant).map(|p| p.item.clone()),
                on_the_clock: active
                    && cursor.category_position == position
                    && cursor.turn_position == turn,
            })
            .collect();

        Some(CategoryBoard {
            name: name.clone(),
            position,
            items,
            slots,
            complete: ledger.is_category_complete(name),
        })
    }

    /// Board for the category at the cursor, if a draft is active.
    pub fn current_board(&self) -> Option<CategoryBoard> {
        if !self.state.is_active() {
            return None;
        }
        self.category_board(self.state.cursor().category_position)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
