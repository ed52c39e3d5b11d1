//! Mapping from external order handle to an arena index (§4.5), giving O(1)
//! cancel given only the caller's id.

use crate::error::{LobError, Result};
use crate::types::{OrderId, OrderIdx};
use std::collections::HashMap;

/// `external_id -> OrderIdx` index. Holds non-owning handles: entries must
/// be inserted synchronously with attachment and removed synchronously with
/// detachment (§5).
#[derive(Debug, Default)]
pub struct OrderIndex {
    by_id: HashMap<OrderId, OrderIdx>,
}

impl OrderIndex {
    /// An empty index pre-sized for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            by_id: HashMap::with_capacity(capacity),
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// No live entries.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// True if `id` is currently resting.
    pub fn contains(&self, id: OrderId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Record `id -> idx`. Fails with `DuplicateOrder` if `id` is already live.
    pub fn insert(&mut self, id: OrderId, idx: OrderIdx) -> Result<()> {
        if self.by_id.contains_key(&id) {
            return Err(LobError::DuplicateOrder(id));
        }
        self.by_id.insert(id, idx);
        Ok(())
    }

    /// Remove and return `id`'s arena index. Fails with `UnknownOrder` if absent.
    pub fn remove(&mut self, id: OrderId) -> Result<OrderIdx> {
        self.by_id.remove(&id).ok_or(LobError::UnknownOrder(id))
    }

    /// Read-only lookup.
    pub fn get(&self, id: OrderId) -> Option<OrderIdx> {
        self.by_id.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get_round_trips() {
        let mut index = OrderIndex::default();
        index.insert(7, 3).unwrap();
        assert_eq!(index.get(7), Some(3));
        assert!(index.contains(7));
    }

    #[test]
    fn insert_duplicate_is_rejected() {
        let mut index = OrderIndex::default();
        index.insert(7, 3).unwrap();
        assert_eq!(index.insert(7, 9), Err(LobError::DuplicateOrder(7)));
    }

    #[test]
    fn remove_unknown_is_rejected() {
        let mut index = OrderIndex::default();
        assert_eq!(index.remove(42), Err(LobError::UnknownOrder(42)));
    }

    #[test]
    fn remove_then_reinsert_is_allowed() {
        let mut index = OrderIndex::default();
        index.insert(1, 0).unwrap();
        index.remove(1).unwrap();
        assert!(!index.contains(1));
        index.insert(1, 5).unwrap();
        assert_eq!(index.get(1), Some(5));
    }
}
