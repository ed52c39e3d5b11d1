//! Core types used throughout the order book implementation.

use std::fmt;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Opaque external handle a caller uses to refer to a resting order.
pub type OrderId = u64;

/// Price expressed in integer ticks. Integer ticks give exact equality and a
/// total order, which is why they are chosen over a floating-point scheme.
pub type Price = i64;

/// Order size. Always positive for a live order.
pub type Quantity = u64;

/// Caller-supplied monotonic timestamp, opaque to the book. Never drawn from
/// a process-wide clock internally — there is no global mutable state here.
pub type Timestamp = u64;

/// Stable arena index for an `Order`.
pub type OrderIdx = usize;

/// Stable arena index for a `Limit`.
pub type LimitIdx = usize;

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Side {
    /// Resting buy order (bid).
    Buy,
    /// Resting sell order (ask).
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

impl Side {
    /// Returns true if this is a buy order.
    pub fn is_buy(&self) -> bool {
        matches!(self, Side::Buy)
    }

    /// Returns true if this is a sell order.
    pub fn is_sell(&self) -> bool {
        matches!(self, Side::Sell)
    }

    /// Returns the opposite side.
    pub fn opposite(&self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Lifecycle state of an order: `Submitted -> Resting -> {Cancelled, Filled}`.
///
/// `Submitted` is never observable outside the book — attachment to a level
/// and insertion into the index happen within one non-yielding call — but it
/// is the state a freshly constructed `Order` starts in before that call
/// completes, and the state it stays in if attachment is never attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum OrderStatus {
    /// Constructed, not yet attached to a level and index.
    Submitted,
    /// Live in a level's order list.
    Resting,
    /// Removed by a cancel request. Terminal.
    Cancelled,
    /// Removed by execution (future work; no execution semantics asserted here).
    Filled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Submitted => write!(f, "submitted"),
            OrderStatus::Resting => write!(f, "resting"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
            OrderStatus::Filled => write!(f, "filled"),
        }
    }
}
