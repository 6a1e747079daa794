// ── Generalized list state ──
//
// The shared transition vocabulary every synchronized collection speaks:
// keyed upsert and remove, wholesale replace on page load, busy flags,
// and an insertion-ordered selection set. All transitions are pure --
// they borrow the old state and return a new one.

use indexmap::IndexSet;

use crate::model::Keyed;

/// Synchronized state for one keyed collection.
///
/// Owned exclusively by its reducer; mutated only by the transitions
/// below; created with empty defaults and replaced, never patched in
/// place. At most one entry per key at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T: Keyed> {
    /// True strictly between a load-initiating action and its
    /// success/failure counterpart.
    pub loading: bool,
    pub entries: Vec<T>,
    pub total_count: u64,
    pub filtered_count: u64,
    /// Selected keys, in selection order. Only a full reload prunes it.
    pub selection: IndexSet<T::Key>,
}

impl<T: Keyed> Default for ListState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            entries: Vec::new(),
            total_count: 0,
            filtered_count: 0,
            selection: IndexSet::new(),
        }
    }
}

impl<T: Keyed + Clone> ListState<T> {
    // ── Load transitions ─────────────────────────────────────────────

    /// A full-filter load begins: busy, and the list clears for a clean
    /// visual reload.
    pub fn load_started_clearing(&self) -> Self {
        Self {
            loading: true,
            entries: Vec::new(),
            ..self.clone()
        }
    }

    /// An incremental load begins: busy, current entries stay visible.
    pub fn load_started(&self) -> Self {
        Self {
            loading: true,
            ..self.clone()
        }
    }

    /// A load finished: replace the collection and counts wholesale.
    /// The selection is cleared -- it may reference entries the reload
    /// dropped.
    pub fn loaded(&self, entries: Vec<T>, total_count: u64, filtered_count: u64) -> Self {
        Self {
            loading: false,
            entries,
            total_count,
            filtered_count,
            selection: IndexSet::new(),
        }
    }

    /// A load failed: just clear the busy flag. Whatever the list held
    /// stays on screen -- no rollback, no clear.
    pub fn load_failed(&self) -> Self {
        Self {
            loading: false,
            ..self.clone()
        }
    }

    // ── Incremental transitions ──────────────────────────────────────

    /// Upsert: drop any entry with the same key, append the new record.
    /// The whole record is replaced and its position moves to the end,
    /// so entry order reflects last-update order.
    pub fn upserted(&self, entity: T) -> Self {
        let key = entity.key();
        let mut entries: Vec<T> = self
            .entries
            .iter()
            .filter(|e| e.key() != key)
            .cloned()
            .collect();
        entries.push(entity);

        Self {
            entries,
            ..self.clone()
        }
    }

    /// Remove the entry with the matching key; a no-op when absent.
    pub fn removed(&self, key: &T::Key) -> Self {
        if !self.entries.iter().any(|e| e.key() == *key) {
            return self.clone();
        }

        Self {
            entries: self
                .entries
                .iter()
                .filter(|e| e.key() != *key)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    // ── Selection transitions ────────────────────────────────────────

    /// Union the keys into the selection. Re-selecting is idempotent.
    pub fn with_selected(&self, keys: impl IntoIterator<Item = T::Key>) -> Self {
        let mut selection = self.selection.clone();
        selection.extend(keys);

        Self {
            selection,
            ..self.clone()
        }
    }

    /// Difference the keys out of the selection. Deselecting an
    /// unselected key is a no-op.
    pub fn with_deselected<'a>(&self, keys: impl IntoIterator<Item = &'a T::Key>) -> Self
    where
        T::Key: 'a,
    {
        let mut selection = self.selection.clone();
        for key in keys {
            selection.shift_remove(key);
        }

        Self {
            selection,
            ..self.clone()
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// The entry with the given key, if present.
    pub fn by_key(&self, key: &T::Key) -> Option<&T> {
        self.entries.iter().find(|e| e.key() == *key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item {
        key: &'static str,
        version: u32,
    }

    impl Keyed for Item {
        type Key = &'static str;

        fn key(&self) -> &'static str {
            self.key
        }
    }

    fn item(key: &'static str, version: u32) -> Item {
        Item { key, version }
    }

    fn keys(state: &ListState<Item>) -> Vec<&'static str> {
        state.entries.iter().map(|e| e.key).collect()
    }

    #[test]
    fn upserts_with_distinct_keys_accumulate_in_order() {
        let state = ListState::default()
            .upserted(item("a", 1))
            .upserted(item("b", 1))
            .upserted(item("c", 1));

        assert_eq!(keys(&state), vec!["a", "b", "c"]);
        assert_eq!(state.entries.len(), 3);
    }

    #[test]
    fn upsert_replaces_record_and_moves_to_end() {
        let state = ListState::default()
            .upserted(item("a", 1))
            .upserted(item("b", 1))
            .upserted(item("a", 2));

        assert_eq!(keys(&state), vec!["b", "a"]);
        // Whole-record replace, not a field merge.
        assert_eq!(state.by_key(&"a"), Some(&item("a", 2)));
    }

    #[test]
    fn remove_of_absent_key_is_a_noop() {
        let state = ListState::default().upserted(item("a", 1));
        let after = state.removed(&"zzz");
        assert_eq!(after, state);
    }

    #[test]
    fn remove_drops_matching_entry() {
        let state = ListState::default()
            .upserted(item("a", 1))
            .upserted(item("b", 1))
            .removed(&"a");
        assert_eq!(keys(&state), vec!["b"]);
    }

    #[test]
    fn clearing_load_start_then_failure_leaves_list_empty_and_idle() {
        let state = ListState::default()
            .upserted(item("a", 1))
            .load_started_clearing();
        assert!(state.loading);
        assert!(state.entries.is_empty());

        let after = state.load_failed();
        assert!(!after.loading);
        assert!(after.entries.is_empty());
    }

    #[test]
    fn incremental_load_start_then_failure_keeps_entries() {
        let before = ListState::default().upserted(item("a", 1));
        let after = before.load_started().load_failed();
        assert!(!after.loading);
        assert_eq!(after.entries, before.entries);
    }

    #[test]
    fn loaded_replaces_wholesale_and_clears_selection() {
        let state = ListState::default()
            .upserted(item("a", 1))
            .with_selected(["a"])
            .loaded(vec![item("x", 1), item("y", 1)], 10, 2);

        assert!(!state.loading);
        assert_eq!(keys(&state), vec!["x", "y"]);
        assert_eq!(state.total_count, 10);
        assert_eq!(state.filtered_count, 2);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn double_select_is_idempotent() {
        let state = ListState::default()
            .upserted(item("a", 1))
            .with_selected(["a"])
            .with_selected(["a"]);
        assert_eq!(state.selection.len(), 1);
    }

    #[test]
    fn deselect_of_unselected_is_a_noop() {
        let state = ListState::<Item>::default().with_selected(["a"]);
        let after = state.with_deselected(&["b"]);
        assert_eq!(after, state);
    }

    #[test]
    fn incremental_update_does_not_prune_selection() {
        // A removal via push leaves the selection untouched; only a full
        // reload prunes it.
        let state = ListState::default()
            .upserted(item("a", 1))
            .with_selected(["a"])
            .removed(&"a");
        assert!(state.selection.contains("a"));
    }

    #[test]
    fn default_is_the_documented_initial_state() {
        let state = ListState::<Item>::default();
        assert!(!state.loading);
        assert!(state.entries.is_empty());
        assert_eq!(state.total_count, 0);
        assert_eq!(state.filtered_count, 0);
        assert!(state.selection.is_empty());
    }
}
