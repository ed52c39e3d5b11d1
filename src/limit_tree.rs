//! Self-balancing AVL tree of price levels (§4.2), the largest of the five
//! components.
//!
//! Levels live in a per-side arena (`Vec<Option<Limit>>`) addressed by
//! `LimitIdx`, with a free list for reuse (§9's recommended arena+indices
//! mapping). Index 0 of every tree is a sentinel: its `AvlNode` anchors the
//! tree exactly like any other node (so rotation code never special-cases
//! it), and the real tree always hangs off its *right* child.
//!
//! To make "hangs on the right" literally true for both sides without
//! duplicating the rotation/rebalance code path, comparisons are made on a
//! per-side `key(price)` rather than on price directly: ascending for bids,
//! descending for asks (§9 — "a symmetric convention where the real tree is
//! always the root's right subtree regardless of side"). The practical
//! effect: `best()` (rightmost by key) is always the best price for that
//! side — highest for bids, lowest for asks — and `worst()` (leftmost by
//! key) is always the other extreme. `Book` is the only caller that needs
//! to know this; `best_bid`/`best_ask` are simply `bids.best()`/`asks.best()`.

use crate::avl_tree::{AvlNode, AvlTree};
use crate::error::{LobError, Result};
use crate::limit::Limit;
use crate::traversal::{is_sentinel, max_limit, min_limit};
use crate::types::{LimitIdx, Price, Side};
use std::collections::HashMap;

/// One side's AVL tree of price levels.
#[derive(Debug)]
pub struct LimitTree {
    side: Side,
    arena: Vec<Option<Limit>>,
    free: Vec<LimitIdx>,
    sentinel: LimitIdx,
    price_index: HashMap<Price, LimitIdx>,
}

impl LimitTree {
    /// An empty tree for the given side, pre-sized for `capacity` levels.
    pub fn with_capacity(side: Side, capacity: usize) -> Self {
        let sentinel_price = match side {
            Side::Buy => Price::MIN,
            Side::Sell => Price::MAX,
        };
        let mut arena = Vec::with_capacity(capacity + 1);
        arena.push(Some(Limit::new(sentinel_price, side, 0)));
        Self {
            side,
            arena,
            free: Vec::new(),
            sentinel: 0,
            price_index: HashMap::with_capacity(capacity),
        }
    }

    /// An empty tree for the given side.
    pub fn new(side: Side) -> Self {
        Self::with_capacity(side, 0)
    }

    /// Number of live (non-sentinel) price levels.
    pub fn len(&self) -> usize {
        self.price_index.len()
    }

    /// True if no real price level exists.
    pub fn is_empty(&self) -> bool {
        self.price_index.is_empty()
    }

    /// Borrow a level by arena index.
    pub fn get(&self, idx: LimitIdx) -> &Limit {
        self.limit(idx)
    }

    /// Mutably borrow a level by arena index.
    pub fn get_mut(&mut self, idx: LimitIdx) -> &mut Limit {
        self.limit_mut(idx)
    }

    /// BST lookup by price; no side effects.
    pub fn find(&self, price: Price) -> Option<LimitIdx> {
        self.price_index.get(&price).copied()
    }

    /// Locate the level at `price`, creating and rebalancing it in if absent.
    /// Duplicate prices never produce two nodes: an existing level at `price`
    /// is returned unchanged.
    pub fn get_or_create(&mut self, price: Price) -> LimitIdx {
        if let Some(&idx) = self.price_index.get(&price) {
            return idx;
        }

        let idx = self.alloc(price);
        self.price_index.insert(price, idx);
        self.insert_node(idx);
        idx
    }

    /// Remove `limit_idx` from the tree and rebalance.
    ///
    /// Fails with `NotInTree` if `limit_idx` is not a live node of this tree
    /// (a programmer error — debug-asserted).
    pub fn remove(&mut self, limit_idx: LimitIdx) -> Result<()> {
        let price = match self.arena.get(limit_idx).and_then(Option::as_ref) {
            Some(limit) if self.price_index.get(&limit.price) == Some(&limit_idx) => limit.price,
            _ => {
                debug_assert!(false, "limit {limit_idx} does not belong to this tree");
                return Err(LobError::NotInTree);
            }
        };

        let rebalance_from = self.delete_node(limit_idx);
        self.price_index.remove(&price);
        self.free(limit_idx);
        self.rebalance_path(rebalance_from);
        Ok(())
    }

    /// The arena index of the real subtree's root, or none if the tree holds
    /// no live levels.
    pub fn root(&self) -> Option<LimitIdx> {
        self.get_node(self.sentinel).right_child
    }

    /// The best level for this side (highest bid / lowest ask): the
    /// rightmost node by internal key ordering.
    pub fn best(&self) -> Option<LimitIdx> {
        Some(max_limit(self, self.root()?))
    }

    /// The worst level for this side: the leftmost node by internal key
    /// ordering.
    pub fn worst(&self) -> Option<LimitIdx> {
        Some(min_limit(self, self.root()?))
    }

    /// Levels ordered from best to worst, paired with their arena index.
    pub fn levels_best_first(&self) -> Vec<(LimitIdx, Price)> {
        let mut out = Vec::with_capacity(self.len());
        if let Some(root) = self.root() {
            self.collect_best_first(root, &mut out);
        }
        out
    }

    fn collect_best_first(&self, idx: LimitIdx, out: &mut Vec<(LimitIdx, Price)>) {
        let node = self.get_node(idx);
        if let Some(right) = node.right_child {
            self.collect_best_first(right, out);
        }
        out.push((idx, self.limit(idx).price));
        if let Some(left) = node.left_child {
            self.collect_best_first(left, out);
        }
    }

    fn key(&self, price: Price) -> i128 {
        match self.side {
            Side::Buy => price as i128,
            Side::Sell => -(price as i128),
        }
    }

    fn limit(&self, idx: LimitIdx) -> &Limit {
        self.arena[idx].as_ref().expect("limit arena slot must be occupied")
    }

    fn limit_mut(&mut self, idx: LimitIdx) -> &mut Limit {
        self.arena[idx].as_mut().expect("limit arena slot must be occupied")
    }

    fn alloc(&mut self, price: Price) -> LimitIdx {
        if let Some(idx) = self.free.pop() {
            self.arena[idx] = Some(Limit::new(price, self.side, idx));
            idx
        } else {
            let idx = self.arena.len();
            self.arena.push(Some(Limit::new(price, self.side, idx)));
            idx
        }
    }

    fn free(&mut self, idx: LimitIdx) {
        self.arena[idx] = None;
        self.free.push(idx);
    }

    fn insert_node(&mut self, new_idx: LimitIdx) {
        let new_key = self.key(self.limit(new_idx).price);

        let mut parent = None;
        let mut cur = self.get_node(self.sentinel).right_child;
        while let Some(idx) = cur {
            parent = Some(idx);
            let cur_key = self.key(self.limit(idx).price);
            cur = if new_key < cur_key {
                self.get_node(idx).left_child
            } else {
                self.get_node(idx).right_child
            };
        }

        match parent {
            None => {
                self.get_node_mut(self.sentinel).right_child = Some(new_idx);
                self.get_node_mut(new_idx).parent = Some(self.sentinel);
            }
            Some(parent_idx) => {
                let parent_key = self.key(self.limit(parent_idx).price);
                if new_key < parent_key {
                    self.get_node_mut(parent_idx).left_child = Some(new_idx);
                } else {
                    self.get_node_mut(parent_idx).right_child = Some(new_idx);
                }
                self.get_node_mut(new_idx).parent = Some(parent_idx);
            }
        }

        self.rebalance_path(self.get_node(new_idx).parent);
    }

    /// Standard two-children BST delete via successor splice: the successor
    /// node is relinked into the deleted node's position, never value-copied
    /// (so any non-tree reference to the successor's own arena slot stays
    /// valid). Returns where to start rebalancing.
    fn delete_node(&mut self, idx: LimitIdx) -> Option<LimitIdx> {
        let node = *self.get_node(idx);

        match (node.left_child, node.right_child) {
            (None, None) => {
                self.replace_in_parent(idx, node.parent, None);
                node.parent
            }
            (Some(only), None) | (None, Some(only)) => {
                self.replace_in_parent(idx, node.parent, Some(only));
                self.get_node_mut(only).parent = node.parent;
                node.parent
            }
            (Some(left), Some(right)) => {
                let succ = self.find_min(right);
                let succ_parent = self.get_node(succ).parent.unwrap();
                let succ_right = self.get_node(succ).right_child;

                let rebalance_from = if succ_parent == idx {
                    Some(succ)
                } else {
                    self.replace_in_parent(succ, Some(succ_parent), succ_right);
                    if let Some(sr) = succ_right {
                        self.get_node_mut(sr).parent = Some(succ_parent);
                    }
                    self.get_node_mut(succ).right_child = Some(right);
                    self.get_node_mut(right).parent = Some(succ);
                    Some(succ_parent)
                };

                self.get_node_mut(succ).left_child = Some(left);
                self.get_node_mut(left).parent = Some(succ);

                self.replace_in_parent(idx, node.parent, Some(succ));
                self.get_node_mut(succ).parent = node.parent;

                rebalance_from
            }
        }
    }

    fn replace_in_parent(&mut self, idx: LimitIdx, parent: Option<LimitIdx>, replacement: Option<LimitIdx>) {
        if let Some(p) = parent {
            if self.get_node(p).left_child == Some(idx) {
                self.get_node_mut(p).left_child = replacement;
            } else {
                self.get_node_mut(p).right_child = replacement;
            }
        }
    }

    /// Walk from `start` up through (not including) the sentinel, balancing
    /// each ancestor (§4.2 Rebalance).
    fn rebalance_path(&mut self, start: Option<LimitIdx>) {
        let mut cur = start;
        while let Some(idx) = cur {
            if is_sentinel(idx, self.sentinel) {
                break;
            }
            let new_root = self.balance(idx);
            cur = self.get_node(new_root).parent;
        }
    }
}

impl AvlTree<Limit> for LimitTree {
    fn get_node(&self, index: usize) -> &AvlNode {
        &self.limit(index).avl_node
    }

    fn get_node_mut(&mut self, index: usize) -> &mut AvlNode {
        &mut self.limit_mut(index).avl_node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heights_ok(tree: &LimitTree, idx: LimitIdx) -> bool {
        let node = tree.get_node(idx);
        let diff = tree.height_of(node.left_child) - tree.height_of(node.right_child);
        let children_ok = node
            .left_child
            .map(|c| heights_ok(tree, c))
            .unwrap_or(true)
            && node.right_child.map(|c| heights_ok(tree, c)).unwrap_or(true);
        diff.abs() <= 1 && children_ok
    }

    #[test]
    fn get_or_create_returns_existing_node_for_duplicate_price() {
        let mut tree = LimitTree::new(Side::Buy);
        let a = tree.get_or_create(100);
        let b = tree.get_or_create(100);
        assert_eq!(a, b);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn three_inserts_rebalance_to_middle_root() {
        let mut tree = LimitTree::new(Side::Buy);
        tree.get_or_create(100);
        tree.get_or_create(200);
        tree.get_or_create(300);

        let root = tree.get_node(tree.sentinel).right_child.unwrap();
        assert_eq!(tree.limit(root).price, 200);
        let left = tree.limit(tree.get_node(root).left_child.unwrap()).price;
        let right = tree.limit(tree.get_node(root).right_child.unwrap()).price;
        assert_eq!(left, 100);
        assert_eq!(right, 300);
        assert_eq!(tree.balance_factor(root), 0);
        assert!(heights_ok(&tree, root));
    }

    #[test]
    fn best_bid_is_highest_price_best_ask_is_lowest() {
        let mut bids = LimitTree::new(Side::Buy);
        bids.get_or_create(10);
        bids.get_or_create(12);
        bids.get_or_create(11);
        assert_eq!(bids.limit(bids.best().unwrap()).price, 12);
        assert_eq!(bids.limit(bids.worst().unwrap()).price, 10);

        let mut asks = LimitTree::new(Side::Sell);
        asks.get_or_create(50);
        asks.get_or_create(48);
        asks.get_or_create(49);
        assert_eq!(asks.limit(asks.best().unwrap()).price, 48);
        assert_eq!(asks.limit(asks.worst().unwrap()).price, 50);
    }

    #[test]
    fn remove_collapses_single_level() {
        let mut tree = LimitTree::new(Side::Sell);
        let idx = tree.get_or_create(50);
        assert!(tree.find(50).is_some());
        tree.remove(idx).unwrap();
        assert!(tree.find(50).is_none());
        assert!(tree.best().is_none());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn remove_preserves_balance_across_many_levels() {
        let mut tree = LimitTree::new(Side::Buy);
        let mut idxs = Vec::new();
        for price in [50, 30, 70, 20, 40, 60, 80, 10, 90] {
            idxs.push(tree.get_or_create(price));
        }
        for idx in idxs {
            tree.remove(idx).unwrap();
            if let Some(root) = tree.get_node(tree.sentinel).right_child {
                assert!(heights_ok(&tree, root));
            }
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn remove_unknown_index_is_not_in_tree() {
        let mut tree = LimitTree::new(Side::Buy);
        let idx = tree.get_or_create(100);
        tree.remove(idx).unwrap();
        assert_eq!(tree.remove(idx), Err(LobError::NotInTree));
    }

    #[test]
    fn levels_best_first_orders_by_priority() {
        let mut bids = LimitTree::new(Side::Buy);
        bids.get_or_create(10);
        bids.get_or_create(30);
        bids.get_or_create(20);
        let prices: Vec<Price> = bids.levels_best_first().into_iter().map(|(_, p)| p).collect();
        assert_eq!(prices, vec![30, 20, 10]);
    }
}
