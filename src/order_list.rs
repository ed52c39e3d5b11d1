//! Doubly linked FIFO of orders resting at one price level (§4.1).
//!
//! Orders live in a Book-owned arena (`Vec<Option<Order>>`); this type only
//! carries the head/tail indices into that arena plus the level's running
//! aggregates. `head` is the newest order, `tail` the oldest — matching
//! consumes from `tail` (§3 invariant 8).

use crate::error::{LobError, Result};
use crate::order::Order;
use crate::types::{LimitIdx, OrderIdx, Price, Quantity};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

type Arena = Vec<Option<Order>>;

fn order_mut(orders: &mut Arena, idx: OrderIdx) -> &mut Order {
    orders[idx].as_mut().expect("order arena slot must be occupied")
}

fn order_ref(orders: &Arena, idx: OrderIdx) -> &Order {
    orders[idx].as_ref().expect("order arena slot must be occupied")
}

/// Per-level FIFO list plus its running aggregates.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct OrderList {
    /// The level this list is attached to, used to validate `unlink` calls.
    owner: Option<LimitIdx>,
    head: Option<OrderIdx>,
    tail: Option<OrderIdx>,
    order_count: usize,
    aggregate_size: Quantity,
    aggregate_volume: u128,
}

impl OrderList {
    /// Create an empty list owned by the given level.
    pub fn new(owner: LimitIdx) -> Self {
        Self {
            owner: Some(owner),
            head: None,
            tail: None,
            order_count: 0,
            aggregate_size: 0,
            aggregate_volume: 0,
        }
    }

    /// `head ⇔ tail ⇔ order_count > 0` (invariant 4).
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Number of orders resting at this level.
    pub fn order_count(&self) -> usize {
        self.order_count
    }

    /// Sum of remaining shares across all orders at this level.
    pub fn aggregate_size(&self) -> Quantity {
        self.aggregate_size
    }

    /// `price × aggregate_size`, maintained incrementally (invariant 5).
    pub fn aggregate_volume(&self) -> u128 {
        self.aggregate_volume
    }

    /// The newest resting order, or none if the list is empty.
    pub fn head(&self) -> Option<OrderIdx> {
        self.head
    }

    /// The oldest resting order, or none if the list is empty.
    pub fn tail(&self) -> Option<OrderIdx> {
        self.tail
    }

    /// Splice `order_idx` in as the new head.
    ///
    /// Fails with `PriceMismatch` if the order's price does not equal the
    /// level's price (invariant 3) — a programmer error, debug-asserted.
    pub fn push_new(&mut self, orders: &mut Arena, level_price: Price, order_idx: OrderIdx) -> Result<()> {
        if order_ref(orders, order_idx).price != level_price {
            debug_assert!(false, "order price does not match level price on push");
            return Err(LobError::PriceMismatch);
        }

        let old_head = self.head;
        {
            let order = order_mut(orders, order_idx);
            order.next = old_head;
            order.prev = None;
            order.parent_limit = self.owner;
            order.mark_resting();
        }
        if let Some(head_idx) = old_head {
            order_mut(orders, head_idx).prev = Some(order_idx);
        } else {
            self.tail = Some(order_idx);
        }
        self.head = Some(order_idx);

        let shares = order_ref(orders, order_idx).shares;
        self.order_count += 1;
        self.aggregate_size += shares;
        self.aggregate_volume += level_price as u128 * shares as u128;
        Ok(())
    }

    /// Remove and return the oldest order, or none if the list is empty.
    pub fn pop_oldest(&mut self, orders: &mut Arena) -> Option<OrderIdx> {
        let tail_idx = self.tail?;
        self.unlink(orders, tail_idx)
            .expect("tail index must belong to this list");
        Some(tail_idx)
    }

    /// O(1) excision of `order_idx` given a direct handle.
    ///
    /// Fails with `NotInThisList` if the order's recorded parent level does
    /// not match this list's owner.
    pub fn unlink(&mut self, orders: &mut Arena, order_idx: OrderIdx) -> Result<()> {
        if order_ref(orders, order_idx).parent_limit != self.owner {
            debug_assert!(false, "order does not belong to this order list");
            return Err(LobError::NotInThisList);
        }

        let (prev_idx, next_idx, shares, price) = {
            let order = order_ref(orders, order_idx);
            (order.prev, order.next, order.shares, order.price)
        };

        match prev_idx {
            Some(prev) => order_mut(orders, prev).next = next_idx,
            None => self.head = next_idx,
        }
        match next_idx {
            Some(next) => order_mut(orders, next).prev = prev_idx,
            None => self.tail = prev_idx,
        }

        let order = order_mut(orders, order_idx);
        order.next = None;
        order.prev = None;
        order.parent_limit = None;

        self.order_count -= 1;
        self.aggregate_size -= shares;
        self.aggregate_volume -= price as u128 * shares as u128;
        Ok(())
    }
}
