//! Error taxonomy (§7): expected conditions are reported by value, never
//! trapped; contract violations are programmer errors guarded by a
//! `debug_assert!` ahead of the typed error so a debug build panics with a
//! precise message while a release build degrades to this enum.

use crate::types::{OrderId, Price, Quantity};
use thiserror::Error;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Result alias used by every fallible public operation in this crate.
pub type Result<T> = std::result::Result<T, LobError>;

/// Errors the order book can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum LobError {
    /// Price was zero or negative.
    #[error("invalid price: {0}")]
    BadPrice(Price),

    /// Quantity was zero.
    #[error("invalid quantity: {0}")]
    BadQuantity(Quantity),

    /// An order with this id is already resting.
    #[error("order {0} already exists")]
    DuplicateOrder(OrderId),

    /// No resting order with this id.
    #[error("order {0} not found")]
    UnknownOrder(OrderId),

    /// An order's price did not match its parent level's price at push time.
    #[error("order price does not match its level's price")]
    PriceMismatch,

    /// An order handle does not belong to the list it was unlinked from.
    #[error("order does not belong to this order list")]
    NotInThisList,

    /// A level handle does not belong to the tree it was removed from.
    #[error("level does not belong to this tree")]
    NotInTree,

    /// Release-mode fallback for a contract violation whose debug assertion
    /// was compiled out.
    #[error("internal order book error: {0}")]
    Internal(String),
}
