//! A single resting order (§3).

use crate::types::{LimitIdx, OrderId, OrderIdx, OrderStatus, Price, Quantity, Side, Timestamp};
use std::fmt;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// A resting order.
///
/// `prev`/`next` link it into its parent level's FIFO list (head = newest,
/// tail = oldest, per §3 invariant 8); `parent_limit` points back at the
/// level whose price it shares (invariant 3).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Order {
    /// Opaque external handle.
    pub id: OrderId,
    /// Buy or sell.
    pub side: Side,
    /// Remaining quantity.
    pub shares: Quantity,
    /// Price this order rests at; must equal its parent level's price.
    pub price: Price,
    /// Time the order was first submitted.
    pub entry_time: Timestamp,
    /// Time of the most recent mutation (submission or partial execution).
    pub event_time: Timestamp,
    /// Current lifecycle state.
    pub status: OrderStatus,
    pub(crate) next: Option<OrderIdx>,
    pub(crate) prev: Option<OrderIdx>,
    pub(crate) parent_limit: Option<LimitIdx>,
}

impl Order {
    /// Construct a new order in the `Submitted` state, not yet attached to
    /// any level.
    pub fn new(id: OrderId, side: Side, shares: Quantity, price: Price, entry_time: Timestamp) -> Self {
        Self {
            id,
            side,
            shares,
            price,
            entry_time,
            event_time: entry_time,
            status: OrderStatus::Submitted,
            next: None,
            prev: None,
            parent_limit: None,
        }
    }

    /// True once the order has been attached to a level (§4.6).
    pub fn is_resting(&self) -> bool {
        self.status == OrderStatus::Resting
    }

    /// Total value (price × remaining shares).
    pub fn value(&self) -> u128 {
        self.price as u128 * self.shares as u128
    }

    pub(crate) fn mark_resting(&mut self) {
        self.status = OrderStatus::Resting;
    }

    pub(crate) fn mark_cancelled(&mut self, event_time: Timestamp) {
        self.status = OrderStatus::Cancelled;
        self.event_time = event_time;
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order[{}]: {} {} @ {} (status: {})",
            self.id, self.side, self.shares, self.price, self.status
        )
    }
}
