// Per-category turn order derived from the global pick order.
//
// The category at position `p` in the category order is picked in the base
// pick order rotated left by `p mod N`, so the first-pick slot walks through
// every participant before it repeats.

/// Offset of the first picker for the category at `category_position`.
///
/// Returns 0 for an empty order.
pub fn rotation_offset(participant_count: usize, category_position: usize) -> usize {
    if participant_count == 0 {
        0
    } else {
        category_position % participant_count
    }
}

/// Turn order for the category at `category_position`.
///
/// `rotate(order, p) = order[p % n..] ++ order[..p % n]`
pub fn rotate<T: Clone>(order: &[T], category_position: usize) -> Vec<T> {
    rotated(order, category_position).cloned().collect()
}

/// Borrowing form of [`rotate`].
pub fn rotated<T>(order: &[T], category_position: usize) -> impl Iterator<Item = &T> + '_ {
    let offset = rotation_offset(order.len(), category_position);
    order[offset..].iter().chain(order[..offset].iter())
}

/// The participant holding `turn_position` in the category at
/// `category_position`, or `None` when the turn is out of range.
pub fn picker_at<T>(order: &[T], category_position: usize, turn_position: usize) -> Option<&T> {
    if turn_position >= order.len() {
        return None;
    }
    let offset = rotation_offset(order.len(), category_position);
    order.get((offset + turn_position) % order.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
