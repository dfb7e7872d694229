//! Focus state of the carousel.

/// Current focus position over a circular list of `item_count` items.
///
/// The focus index is always kept in `[0, item_count)`; it is `None` only
/// while the list is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusState {
    item_count: usize,
    focus: Option<usize>,
}

impl FocusState {
    /// Create focus state for a list of `item_count` items, focused on the first.
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            focus: (item_count > 0).then_some(0),
        }
    }

    /// Number of items in the ring.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Current focus index, or `None` when the ring is empty.
    pub fn focus_index(&self) -> Option<usize> {
        self.focus
    }

    /// Focus the item at `index` modulo the item count.
    ///
    /// Negative and out-of-range indices are valid requests and are wrapped
    /// with a floor modulo. Does nothing when the ring is empty.
    pub fn set_focus(&mut self, index: i64) {
        self.set_wrapped(i128::from(index));
    }

    /// Move the focus by `delta` positions (any sign, any magnitude).
    pub fn advance(&mut self, delta: i64) {
        if let Some(current) = self.focus {
            self.set_wrapped(current as i128 + i128::from(delta));
        }
    }

    /// Move the focus one position forward.
    pub fn next(&mut self) {
        self.advance(1);
    }

    /// Move the focus one position backward.
    pub fn previous(&mut self) {
        self.advance(-1);
    }

    /// Focus a specific position; same semantics as [`set_focus`](Self::set_focus).
    pub fn jump_to(&mut self, index: i64) {
        self.set_focus(index);
    }

    /// React to the list growing or shrinking.
    ///
    /// An empty list clears the focus. A focus that would fall out of range
    /// is reset to the first item. A list that becomes non-empty starts
    /// focused on the first item.
    pub fn on_item_count_changed(&mut self, new_count: usize) {
        self.item_count = new_count;
        self.focus = match self.focus {
            _ if new_count == 0 => None,
            Some(current) if current < new_count => Some(current),
            _ => Some(0),
        };
    }

    fn set_wrapped(&mut self, index: i128) {
        if self.item_count == 0 {
            return;
        }
        self.focus = Some(index.rem_euclid(self.item_count as i128) as usize);
    }
}
