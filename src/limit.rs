//! A price level: an AVL tree node carrying a FIFO `OrderList` (§3, §4.2).

use crate::avl_tree::AvlNode;
use crate::order_list::OrderList;
use crate::types::{LimitIdx, Price, Quantity, Side};
use std::fmt;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// One price level on one side of the book.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Limit {
    /// The level's price. Unique within its side; never changes after the
    /// level is created (§4.2 remove uses position-swap, not value-copy, so
    /// a node's own price is stable across rebalancing).
    pub price: Price,
    /// Which side's tree this level belongs to.
    pub side: Side,
    pub(crate) avl_node: AvlNode,
    pub(crate) orders: OrderList,
}

impl Limit {
    /// Create a new, empty level at `price`, owned by the arena slot `self_index`.
    pub fn new(price: Price, side: Side, self_index: LimitIdx) -> Self {
        Self {
            price,
            side,
            avl_node: AvlNode::new(),
            orders: OrderList::new(self_index),
        }
    }

    /// No resting orders at this level.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of resting orders.
    pub fn order_count(&self) -> usize {
        self.orders.order_count()
    }

    /// Sum of remaining shares across resting orders.
    pub fn aggregate_size(&self) -> Quantity {
        self.orders.aggregate_size()
    }

    /// `price × aggregate_size`.
    pub fn aggregate_volume(&self) -> u128 {
        self.orders.aggregate_volume()
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Limit[{}]: {} orders, {} shares, volume {}",
            self.price,
            self.order_count(),
            self.aggregate_size(),
            self.aggregate_volume()
        )
    }
}
