//! Ordered collections of uniquely identified elements
//!
//! [`IdentifiedVec`] keeps elements in display order (order is meaningful and
//! can be rearranged) while guaranteeing that no two elements share an id.
//! Lookups by id are linear; the collections this backs are UI-sized.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;

/// A set of offsets into an ordered collection
///
/// Offsets are kept sorted and unique, mirroring the index sets list views
/// report for delete and move gestures.
pub type IndexSet = BTreeSet<usize>;

/// Types with a stable identity
pub trait Identifiable {
    /// The identifier type
    type Id: Clone + Eq + Hash + Debug;

    /// This element's identifier
    fn id(&self) -> &Self::Id;
}

/// An ordered vector of elements, unique by [`Identifiable::id`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentifiedVec<T: Identifiable> {
    items: Vec<T>,
}

impl<T: Identifiable> IdentifiedVec<T> {
    /// Create an empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate elements in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Elements as an ordered slice
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Identifiers in order
    pub fn ids(&self) -> impl Iterator<Item = &T::Id> {
        self.items.iter().map(Identifiable::id)
    }

    /// Offset of the element with `id`
    #[must_use]
    pub fn index_of(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Whether an element with `id` exists
    #[must_use]
    pub fn contains(&self, id: &T::Id) -> bool {
        self.index_of(id).is_some()
    }

    /// Element with `id`
    #[must_use]
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Mutable element with `id`
    pub fn get_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Insert `item` at `index` (clamped to the length)
    ///
    /// Returns `false` and leaves the collection untouched when an element
    /// with the same id is already present.
    pub fn insert(&mut self, item: T, index: usize) -> bool {
        if self.contains(item.id()) {
            return false;
        }
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        true
    }

    /// Append `item`; returns `false` if its id is already present
    pub fn push(&mut self, item: T) -> bool {
        let len = self.items.len();
        self.insert(item, len)
    }

    /// Remove and return the element with `id`
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let index = self.index_of(id)?;
        Some(self.items.remove(index))
    }

    /// Remove the elements at `offsets`
    ///
    /// Offsets past the end are ignored. Survivors keep their relative order.
    pub fn remove_at_offsets(&mut self, offsets: &IndexSet) {
        for &offset in offsets.iter().rev() {
            if offset < self.items.len() {
                self.items.remove(offset);
            }
        }
    }

    /// Move the elements at `source` so they sit before the element that
    /// was originally at `destination`
    ///
    /// Moved elements keep their relative order. A `destination` equal to
    /// (or beyond) the length appends them; source offsets past the end are
    /// ignored.
    pub fn move_offsets(&mut self, source: &IndexSet, destination: usize) {
        let len = self.items.len();
        let destination = destination.min(len);
        let offsets: Vec<usize> = source.iter().copied().filter(|&i| i < len).collect();
        if offsets.is_empty() {
            return;
        }

        let before_destination = offsets.iter().filter(|&&i| i < destination).count();

        let mut moved = Vec::with_capacity(offsets.len());
        for &offset in offsets.iter().rev() {
            moved.push(self.items.remove(offset));
        }
        moved.reverse();

        let insert_at = destination - before_destination;
        self.items.splice(insert_at..insert_at, moved);
    }

    /// Keep only the elements matching `keep`, preserving order
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.items.retain(keep);
    }

    /// Stable sort by `compare`
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        self.items.sort_by(compare);
    }

    /// Consume into the underlying vector
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Identifiable> Default for IdentifiedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects elements, keeping the first occurrence of each id
impl<T: Identifiable> FromIterator<T> for IdentifiedVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        for item in iter {
            collection.push(item);
        }
        collection
    }
}

impl<'a, T: Identifiable> IntoIterator for &'a IdentifiedVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Identifiable> IntoIterator for IdentifiedVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<T: Identifiable> std::ops::Index<usize> for IdentifiedVec<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T: Identifiable + Serialize> Serialize for IdentifiedVec<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T: Identifiable + Deserialize<'de>> Deserialize<'de> for IdentifiedVec<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from_iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Row {
        id: u32,
        label: char,
    }

    impl Identifiable for Row {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    fn rows(labels: &str) -> IdentifiedVec<Row> {
        labels
            .chars()
            .zip(0..)
            .map(|(label, id)| Row { id, label })
            .collect()
    }

    fn labels(rows: &IdentifiedVec<Row>) -> String {
        rows.iter().map(|r| r.label).collect()
    }

    fn offsets(values: &[usize]) -> IndexSet {
        values.iter().copied().collect()
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let mut list = rows("ab");
        assert!(!list.insert(Row { id: 0, label: 'z' }, 0));
        assert_eq!(labels(&list), "ab");

        assert!(list.insert(Row { id: 9, label: 'z' }, 0));
        assert_eq!(labels(&list), "zab");
    }

    #[test]
    fn from_iter_keeps_first_occurrence() {
        let list: IdentifiedVec<Row> = vec![
            Row { id: 1, label: 'a' },
            Row { id: 1, label: 'b' },
            Row { id: 2, label: 'c' },
        ]
        .into_iter()
        .collect();
        assert_eq!(labels(&list), "ac");
    }

    #[test]
    fn move_single_forward_lands_before_destination() {
        let mut list = rows("abcd");
        list.move_offsets(&offsets(&[0]), 2);
        assert_eq!(labels(&list), "bacd");
    }

    #[test]
    fn move_single_backward() {
        let mut list = rows("abcd");
        list.move_offsets(&offsets(&[3]), 0);
        assert_eq!(labels(&list), "dabc");
    }

    #[test]
    fn move_to_end_appends() {
        let mut list = rows("abcd");
        list.move_offsets(&offsets(&[1]), 4);
        assert_eq!(labels(&list), "acdb");
    }

    #[test]
    fn move_many_keeps_relative_order() {
        let mut list = rows("abcdef");
        list.move_offsets(&offsets(&[0, 2, 5]), 4);
        assert_eq!(labels(&list), "bdacfe");
    }

    #[test]
    fn move_ignores_out_of_range_offsets() {
        let mut list = rows("abc");
        list.move_offsets(&offsets(&[7]), 0);
        assert_eq!(labels(&list), "abc");
    }

    #[test]
    fn remove_at_offsets_preserves_survivor_order() {
        let mut list = rows("abcde");
        list.remove_at_offsets(&offsets(&[1, 3, 10]));
        assert_eq!(labels(&list), "ace");
    }

    #[test]
    fn lookup_by_id() {
        let mut list = rows("abc");
        assert_eq!(list.index_of(&2), Some(2));
        assert_eq!(list.get(&1).map(|r| r.label), Some('b'));
        if let Some(row) = list.get_mut(&1) {
            row.label = 'x';
        }
        assert_eq!(labels(&list), "axc");
        assert_eq!(list.remove(&0).map(|r| r.label), Some('a'));
        assert!(!list.contains(&0));
    }

    #[test]
    fn deserialize_drops_duplicates() {
        let json = r#"[{"id":1,"label":"a"},{"id":1,"label":"b"}]"#;
        let list: IdentifiedVec<Row> = serde_json::from_str(json).unwrap_or_default();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].label, 'a');
    }

    proptest! {
        #[test]
        fn move_is_a_permutation(
            len in 0usize..12,
            source in proptest::collection::btree_set(0usize..14, 0..5),
            destination in 0usize..14,
        ) {
            let mut list: IdentifiedVec<Row> = (0..len)
                .map(|i| Row { id: u32::try_from(i).unwrap_or(0), label: 'x' })
                .collect();
            list.move_offsets(&source, destination);

            let mut ids: Vec<u32> = list.ids().copied().collect();
            ids.sort_unstable();
            let expected: Vec<u32> = (0..len).map(|i| u32::try_from(i).unwrap_or(0)).collect();
            prop_assert_eq!(ids, expected);
        }

        #[test]
        fn remove_keeps_untouched_order(
            len in 0usize..12,
            removed in proptest::collection::btree_set(0usize..14, 0..6),
        ) {
            let mut list: IdentifiedVec<Row> = (0..len)
                .map(|i| Row { id: u32::try_from(i).unwrap_or(0), label: 'x' })
                .collect();
            list.remove_at_offsets(&removed);

            let ids: Vec<u32> = list.ids().copied().collect();
            let expected: Vec<u32> = (0..len)
                .filter(|i| !removed.contains(i))
                .map(|i| u32::try_from(i).unwrap_or(0))
                .collect();
            prop_assert_eq!(ids, expected);
        }
    }
}
