//! Slot arena for ID-indexed storage of netlist objects.
//!
//! Unlike an append-only arena, elaboration deletes signals and devices while
//! the netlist is still being built, so a slot can be vacated. Vacated slots
//! are never reused: a handle to a removed object stays stale forever instead
//! of silently aliasing a newer object.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Trait for opaque ID types used as arena keys.
///
/// Implementors must provide a bijection between `u32` indices and the ID type.
pub trait ArenaId: Copy {
    /// Creates an ID from a raw `u32` index.
    fn from_raw(index: u32) -> Self;

    /// Returns the raw `u32` index.
    fn as_raw(self) -> u32;
}

/// An ID-indexed container whose items can be removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena<I: ArenaId, T> {
    slots: Vec<Option<T>>,
    live: usize,
    #[serde(skip)]
    _marker: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates a new, empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the ID the next [`alloc`](Self::alloc) will hand out.
    pub fn next_id(&self) -> I {
        I::from_raw(self.slots.len() as u32)
    }

    /// Allocates a new item and returns its ID.
    pub fn alloc(&mut self, item: T) -> I {
        let id = self.next_id();
        self.slots.push(Some(item));
        self.live += 1;
        id
    }

    /// Removes the item, returning it. Returns `None` if it was already gone.
    pub fn remove(&mut self, id: I) -> Option<T> {
        let item = self.slots.get_mut(id.as_raw() as usize)?.take();
        if item.is_some() {
            self.live -= 1;
        }
        item
    }

    /// Returns `true` if `id` names a live item.
    pub fn contains(&self, id: I) -> bool {
        self.try_get(id).is_some()
    }

    /// Returns the item, or `None` if the ID is stale or out of range.
    pub fn try_get(&self, id: I) -> Option<&T> {
        self.slots.get(id.as_raw() as usize)?.as_ref()
    }

    /// Mutable variant of [`try_get`](Self::try_get).
    pub fn try_get_mut(&mut self, id: I) -> Option<&mut T> {
        self.slots.get_mut(id.as_raw() as usize)?.as_mut()
    }

    /// Returns a reference to the item with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds or was removed.
    pub fn get(&self, id: I) -> &T {
        match self.try_get(id) {
            Some(item) => item,
            None => panic!("stale arena handle {}", id.as_raw()),
        }
    }

    /// Returns a mutable reference to the item with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds or was removed.
    pub fn get_mut(&mut self, id: I) -> &mut T {
        match self.try_get_mut(id) {
            Some(item) => item,
            None => panic!("stale arena handle {}", id.as_raw()),
        }
    }

    /// Returns the number of live items.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if the arena holds no live items.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterates over live `(ID, &T)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|item| (I::from_raw(i as u32), item)))
    }

    /// Iterates over live `(ID, &mut T)` pairs in allocation order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (I, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|item| (I::from_raw(i as u32), item)))
    }

    /// Iterates over the IDs of live items.
    pub fn ids(&self) -> impl Iterator<Item = I> + '_ {
        self.iter().map(|(id, _)| id)
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        self.get(id)
    }
}

impl<I: ArenaId, T> IndexMut<I> for Arena<I, T> {
    fn index_mut(&mut self, id: I) -> &mut T {
        self.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::NodeId;

    #[test]
    fn alloc_and_get() {
        let mut arena: Arena<NodeId, String> = Arena::new();
        let id = arena.alloc("hello".to_string());
        assert_eq!(arena[id], "hello");
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn next_id_predicts_alloc() {
        let mut arena: Arena<NodeId, u32> = Arena::new();
        arena.alloc(1);
        let predicted = arena.next_id();
        assert_eq!(arena.alloc(2), predicted);
    }

    #[test]
    fn remove_leaves_stale_handle() {
        let mut arena: Arena<NodeId, u32> = Arena::new();
        let a = arena.alloc(10);
        let b = arena.alloc(20);
        assert_eq!(arena.remove(a), Some(10));
        assert_eq!(arena.remove(a), None);
        assert!(!arena.contains(a));
        assert!(arena.contains(b));
        assert_eq!(arena.len(), 1);
        let c = arena.alloc(30);
        assert_ne!(c, a);
    }

    #[test]
    fn iter_skips_removed() {
        let mut arena: Arena<NodeId, &str> = Arena::new();
        arena.alloc("a");
        let b = arena.alloc("b");
        arena.alloc("c");
        arena.remove(b);
        let collected: Vec<_> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(collected, vec!["a", "c"]);
        let ids: Vec<u32> = arena.ids().map(|id| id.as_raw()).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    #[should_panic(expected = "stale arena handle")]
    fn get_removed_panics() {
        let mut arena: Arena<NodeId, u32> = Arena::new();
        let a = arena.alloc(1);
        arena.remove(a);
        let _ = arena.get(a);
    }

    #[test]
    fn serde_roundtrip_keeps_holes() {
        let mut arena: Arena<NodeId, String> = Arena::new();
        let first = arena.alloc("first".to_string());
        arena.alloc("second".to_string());
        arena.remove(first);
        let json = serde_json::to_string(&arena).unwrap();
        let restored: Arena<NodeId, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.len(), 1);
        assert!(!restored.contains(NodeId::from_raw(0)));
        assert_eq!(restored[NodeId::from_raw(1)], "second");
    }
}
