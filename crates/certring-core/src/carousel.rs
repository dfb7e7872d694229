//! The certificate carousel: items plus focus.

use serde::Serialize;

use crate::certificate::Certificate;
use crate::focus::FocusState;
use crate::offset::resolve_offset;
use crate::role::Role;

/// Placement of one item relative to the focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    /// Index of the item in the current list.
    pub position: usize,
    /// Signed circular distance from the focus.
    pub offset: isize,
    /// Display role derived from the offset.
    pub role: Role,
}

/// A ring of certificates with a single focused card.
///
/// While content is loading the carousel exposes no slots, so front ends
/// render nothing.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    items: Vec<Certificate>,
    focus: FocusState,
    loading: bool,
}

impl Carousel {
    /// Create a carousel that is waiting for content.
    pub fn loading() -> Self {
        Self {
            items: Vec::new(),
            focus: FocusState::default(),
            loading: true,
        }
    }

    /// Create a carousel over `items`, focused on the first.
    pub fn with_items(items: Vec<Certificate>) -> Self {
        let focus = FocusState::new(items.len());
        Self {
            items,
            focus,
            loading: false,
        }
    }

    /// Whether content is still loading.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Mark the carousel as reloading. Current items are kept until replaced.
    pub fn set_loading(&mut self) {
        self.loading = true;
    }

    /// Leave the loading state without touching the current items.
    pub fn cancel_loading(&mut self) {
        self.loading = false;
    }

    /// Replace the item list and re-clamp the focus.
    pub fn replace_items(&mut self, items: Vec<Certificate>) {
        self.items = items;
        self.loading = false;
        self.focus.on_item_count_changed(self.items.len());
    }

    /// All items in ring order.
    pub fn items(&self) -> &[Certificate] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the ring is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current focus state.
    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    /// Index of the focused item.
    pub fn focus_index(&self) -> Option<usize> {
        self.focus.focus_index()
    }

    /// The focused item.
    pub fn focused(&self) -> Option<&Certificate> {
        self.focus_index().and_then(|i| self.items.get(i))
    }

    /// Move focus forward by one.
    pub fn next(&mut self) {
        self.focus.next();
    }

    /// Move focus backward by one.
    pub fn previous(&mut self) {
        self.focus.previous();
    }

    /// Focus the item at `index` modulo the item count.
    pub fn jump_to(&mut self, index: i64) {
        self.focus.jump_to(index);
    }

    /// Move focus by `delta` positions.
    pub fn advance(&mut self, delta: i64) {
        self.focus.advance(delta);
    }

    /// Slot of every item, in list order. Empty while loading.
    pub fn slots(&self) -> Vec<Slot> {
        let Some(focus) = self.focus_index() else {
            return Vec::new();
        };
        if self.loading {
            return Vec::new();
        }
        let count = self.items.len();
        (0..count)
            .filter_map(|position| {
                let offset = resolve_offset(position, focus, count)?;
                Some(Slot {
                    position,
                    offset,
                    role: Role::from_offset(offset),
                })
            })
            .collect()
    }

    /// The item occupying `role`, if any.
    pub fn item_in(&self, role: Role) -> Option<(Slot, &Certificate)> {
        if role == Role::Hidden {
            return None;
        }
        self.slots()
            .into_iter()
            .find(|slot| slot.role == role)
            .map(|slot| (slot, &self.items[slot.position]))
    }

    /// Invoke `on_select` with the front card, if there is one.
    ///
    /// Returns whether the callback ran.
    pub fn activate_front<F>(&self, on_select: F) -> bool
    where
        F: FnOnce(&Certificate),
    {
        match self.item_in(Role::Front) {
            Some((_, certificate)) => {
                on_select(certificate);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(names: &str) -> Vec<Certificate> {
        names
            .chars()
            .map(|c| Certificate::new(c.to_string().as_str(), c.to_string()))
            .collect()
    }

    #[test]
    fn test_loading_has_no_slots() {
        let carousel = Carousel::loading();
        assert!(carousel.is_loading());
        assert!(carousel.slots().is_empty());
        assert!(!carousel.activate_front(|_| panic!("nothing to activate")));
    }

    #[test]
    fn test_reload_hides_slots_until_replaced() {
        let mut carousel = Carousel::with_items(letters("ABC"));
        carousel.set_loading();
        assert!(carousel.slots().is_empty());
        carousel.replace_items(letters("ABCD"));
        assert_eq!(carousel.slots().len(), 4);
    }

    #[test]
    fn test_cancelled_reload_keeps_items() {
        let mut carousel = Carousel::with_items(letters("ABC"));
        carousel.next();
        carousel.set_loading();
        carousel.cancel_loading();
        assert_eq!(carousel.len(), 3);
        assert_eq!(carousel.focus_index(), Some(1));
        assert_eq!(carousel.slots().len(), 3);
    }

    #[test]
    fn test_two_items_have_no_right_neighbor() {
        let carousel = Carousel::with_items(letters("AB"));
        let roles = carousel.slots().iter().map(|s| s.role).collect::<Vec<_>>();
        assert_eq!(roles, vec![Role::Front, Role::LeftNeighbor]);
        assert!(carousel.item_in(Role::RightNeighbor).is_none());
    }

    #[test]
    fn test_activate_front_passes_focused_item() {
        let mut carousel = Carousel::with_items(letters("ABC"));
        carousel.next();
        let mut selected = None;
        assert!(carousel.activate_front(|cert| selected = Some(cert.title.clone())));
        assert_eq!(selected.as_deref(), Some("B"));
    }

    #[test]
    fn test_item_in_hidden_is_none() {
        let carousel = Carousel::with_items(letters("ABCDE"));
        assert!(carousel.item_in(Role::Hidden).is_none());
    }
}
