//! Two-sided order book (§4.4): the public entry point wiring `LimitTree`,
//! the shared order arena, and `OrderIndex` together.

use crate::error::{LobError, Result};
use crate::limit_tree::LimitTree;
use crate::order::Order;
use crate::order_index::OrderIndex;
use crate::types::{OrderId, OrderIdx, Price, Quantity, Side, Timestamp};

/// Snapshot of a price level's aggregates, returned by `Book::level_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelInfo {
    /// Sum of remaining shares resting at this level.
    pub size: Quantity,
    /// `price × size`.
    pub volume: u128,
    /// Number of resting orders.
    pub count: usize,
}

/// A price-time-priority limit order book: two `LimitTree`s (bids, asks)
/// sharing one order arena and one `OrderIndex` (§2).
#[derive(Debug)]
pub struct Book {
    orders: Vec<Option<Order>>,
    free_orders: Vec<OrderIdx>,
    bids: LimitTree,
    asks: LimitTree,
    index: OrderIndex,
}

impl Book {
    /// An empty book.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// An empty book pre-sized for `order_capacity` orders and
    /// `level_capacity` price levels per side.
    pub fn with_capacity(order_capacity: usize, level_capacity: usize) -> Self {
        Self {
            orders: Vec::with_capacity(order_capacity),
            free_orders: Vec::new(),
            bids: LimitTree::with_capacity(Side::Buy, level_capacity),
            asks: LimitTree::with_capacity(Side::Sell, level_capacity),
            index: OrderIndex::with_capacity(order_capacity),
        }
    }

    /// Highest resting buy price, or none.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best().map(|idx| self.bids.get(idx).price)
    }

    /// Lowest resting sell price, or none.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best().map(|idx| self.asks.get(idx).price)
    }

    /// Aggregates at `price` on `side`, or none if no level exists there.
    pub fn level_at(&self, side: Side, price: Price) -> Option<LevelInfo> {
        let tree = self.tree(side);
        let info = tree.find(price).map(|idx| {
            let limit = tree.get(idx);
            LevelInfo {
                size: limit.aggregate_size(),
                volume: limit.aggregate_volume(),
                count: limit.order_count(),
            }
        });

        tracing::debug!(op = "level_at", %side, price, found = info.is_some(), "queried");
        info
    }

    /// Up to `depth` `(price, size)` pairs on `side`, best price first.
    pub fn levels(&self, side: Side, depth: usize) -> Vec<(Price, Quantity)> {
        let tree = self.tree(side);
        tree.levels_best_first()
            .into_iter()
            .take(depth)
            .map(|(idx, price)| (price, tree.get(idx).aggregate_size()))
            .collect()
    }

    /// Whether `id` currently has a resting order.
    pub fn contains_order(&self, id: OrderId) -> bool {
        self.index.contains(id)
    }

    /// Borrow a resting order by id.
    pub fn get_order(&self, id: OrderId) -> Option<&Order> {
        let idx = self.index.get(id)?;
        self.orders[idx].as_ref()
    }

    /// Total resting orders across both sides.
    pub fn total_orders(&self) -> usize {
        self.index.len()
    }

    /// Total live price levels across both sides.
    pub fn total_levels(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    /// Submit a new order (§4.4): select the side, get-or-create its price
    /// level, append to that level's FIFO, and record it in the index.
    ///
    /// Rejects (no state mutation) on `BadPrice`, `BadQuantity`, or
    /// `DuplicateOrder`.
    pub fn submit(
        &mut self,
        side: Side,
        price: Price,
        shares: Quantity,
        id: OrderId,
        entry_time: Timestamp,
    ) -> Result<()> {
        if price <= 0 {
            tracing::warn!(op = "submit", %side, price, "rejected: bad price");
            return Err(LobError::BadPrice(price));
        }
        if shares == 0 {
            tracing::warn!(op = "submit", %side, shares, "rejected: bad quantity");
            return Err(LobError::BadQuantity(shares));
        }
        if self.index.contains(id) {
            tracing::warn!(op = "submit", id, "rejected: duplicate order");
            return Err(LobError::DuplicateOrder(id));
        }

        let order = Order::new(id, side, shares, price, entry_time);
        let order_idx = self.alloc_order(order);

        let (tree, orders) = match side {
            Side::Buy => (&mut self.bids, &mut self.orders),
            Side::Sell => (&mut self.asks, &mut self.orders),
        };
        let level_idx = tree.get_or_create(price);
        tree.get_mut(level_idx)
            .orders
            .push_new(orders, price, order_idx)?;
        self.index
            .insert(id, order_idx)
            .expect("duplicate check above guarantees this succeeds");

        tracing::debug!(op = "submit", id, %side, price, shares, "accepted");
        Ok(())
    }

    /// Cancel `id` (§4.4): unlink from its level, free the arena slot, and
    /// drop the level from the tree if it is now empty. Returns a snapshot
    /// of the cancelled order.
    ///
    /// Fails with `UnknownOrder` if `id` is not resting.
    pub fn cancel(&mut self, id: OrderId, event_time: Timestamp) -> Result<Order> {
        let order_idx = match self.index.remove(id) {
            Ok(idx) => idx,
            Err(e) => {
                tracing::warn!(op = "cancel", id, "rejected: unknown order");
                return Err(e);
            }
        };

        let (side, level_idx) = {
            let order = self.orders[order_idx]
                .as_ref()
                .expect("indexed order must be present in the arena");
            (
                order.side,
                order.parent_limit.expect("resting order must have a parent level"),
            )
        };

        let (tree, orders) = match side {
            Side::Buy => (&mut self.bids, &mut self.orders),
            Side::Sell => (&mut self.asks, &mut self.orders),
        };
        tree.get_mut(level_idx).orders.unlink(orders, order_idx)?;

        let mut cancelled = orders[order_idx]
            .take()
            .expect("order arena slot must be occupied before freeing");
        cancelled.mark_cancelled(event_time);
        self.free_orders.push(order_idx);

        if tree.get(level_idx).is_empty() {
            tree.remove(level_idx)?;
        }

        tracing::debug!(op = "cancel", id, %side, price = cancelled.price, "accepted");
        Ok(cancelled)
    }

    /// Borrow the raw tree for `side`, for cross-checks (e.g. the BFS height
    /// invariant in the property-test suite) that need the tree directly.
    pub(crate) fn tree(&self, side: Side) -> &LimitTree {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn tree_mut(&mut self, side: Side) -> &mut LimitTree {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    fn alloc_order(&mut self, order: Order) -> OrderIdx {
        if let Some(idx) = self.free_orders.pop() {
            self.orders[idx] = Some(order);
            idx
        } else {
            let idx = self.orders.len();
            self.orders.push(Some(order));
            idx
        }
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_best_bid_tracking() {
        let mut book = Book::new();
        book.submit(Side::Buy, 10, 100, 1, 0).unwrap();
        book.submit(Side::Buy, 12, 100, 2, 0).unwrap();
        book.submit(Side::Buy, 11, 100, 3, 0).unwrap();
        assert_eq!(book.best_bid(), Some(12));

        book.cancel(2, 0).unwrap();
        assert_eq!(book.best_bid(), Some(11));
    }

    #[test]
    fn scenario_fifo_consumption() {
        let mut book = Book::new();
        book.submit(Side::Buy, 1000, 10, 1, 0).unwrap();
        book.submit(Side::Buy, 1000, 20, 2, 0).unwrap();
        book.submit(Side::Buy, 1000, 30, 3, 0).unwrap();

        let level = book.level_at(Side::Buy, 1000).unwrap();
        assert_eq!(level.count, 3);
        assert_eq!(level.size, 60);
        assert_eq!(level.volume, 60_000);
    }

    #[test]
    fn scenario_cancel_middle_of_list() {
        let mut book = Book::new();
        book.submit(Side::Buy, 1000, 10, 1, 0).unwrap();
        book.submit(Side::Buy, 1000, 20, 2, 0).unwrap();
        book.submit(Side::Buy, 1000, 30, 3, 0).unwrap();

        book.cancel(2, 0).unwrap();

        let level = book.level_at(Side::Buy, 1000).unwrap();
        assert_eq!(level.count, 2);
        assert_eq!(level.size, 40);
        assert_eq!(level.volume, 40_000);
    }

    #[test]
    fn scenario_last_order_cancel_collapses_level() {
        let mut book = Book::new();
        book.submit(Side::Sell, 50, 5, 1, 0).unwrap();
        book.cancel(1, 0).unwrap();
        assert_eq!(book.best_ask(), None);
        assert!(book.level_at(Side::Sell, 50).is_none());
    }

    #[test]
    fn scenario_duplicate_rejected_leaves_book_unchanged() {
        let mut book = Book::new();
        book.submit(Side::Buy, 100, 10, 7, 0).unwrap();

        let err = book.submit(Side::Sell, 200, 20, 7, 0).unwrap_err();
        assert_eq!(err, LobError::DuplicateOrder(7));
        assert_eq!(book.total_orders(), 1);
        let resting = book.get_order(7).unwrap();
        assert_eq!(resting.price, 100);
        assert_eq!(resting.side, Side::Buy);
    }

    #[test]
    fn bad_price_and_quantity_are_rejected_without_mutation() {
        let mut book = Book::new();
        assert_eq!(book.submit(Side::Buy, 0, 10, 1, 0), Err(LobError::BadPrice(0)));
        assert_eq!(book.submit(Side::Buy, 100, 0, 1, 0), Err(LobError::BadQuantity(0)));
        assert_eq!(book.total_orders(), 0);
    }

    #[test]
    fn cancel_unknown_order_is_rejected() {
        let mut book = Book::new();
        assert_eq!(book.cancel(999, 0), Err(LobError::UnknownOrder(999)));
    }

    #[test]
    fn submit_then_cancel_round_trip_frees_level() {
        let mut book = Book::new();
        book.submit(Side::Buy, 4242, 10, 1, 0).unwrap();
        assert_eq!(book.total_levels(), 1);
        book.cancel(1, 0).unwrap();
        assert_eq!(book.total_levels(), 0);
        assert_eq!(book.total_orders(), 0);
    }

    #[test]
    fn levels_best_first_respects_depth() {
        let mut book = Book::new();
        book.submit(Side::Sell, 52, 1, 1, 0).unwrap();
        book.submit(Side::Sell, 50, 1, 2, 0).unwrap();
        book.submit(Side::Sell, 51, 1, 3, 0).unwrap();

        let top_two: Vec<Price> = book.levels(Side::Sell, 2).into_iter().map(|(p, _)| p).collect();
        assert_eq!(top_two, vec![50, 51]);
    }
}
