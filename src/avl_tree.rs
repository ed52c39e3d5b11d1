//! AVL rotation and balance mechanics shared by every `LimitTree` (§4.2).
//!
//! This trait operates purely on arena indices and the stored per-node
//! height; it knows nothing about prices or order lists. `LimitTree` wires
//! it to the `Limit` arena and additionally maps each side's ordering onto a
//! `key(price)` so that "heavier on the right" always means "better
//! priority" regardless of whether the tree is ordering bids or asks (§9).

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// AVL bookkeeping for one tree node: parent/child links by arena index and
/// the subtree height, updated incrementally rather than recomputed (§9 —
/// the recommended form; absent child height is −1, never conflated with a
/// present leaf's height of 0).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct AvlNode {
    /// Parent's arena index (`None` for the sentinel).
    pub parent: Option<usize>,
    /// Left child's arena index.
    pub left_child: Option<usize>,
    /// Right child's arena index.
    pub right_child: Option<usize>,
    /// Height of the subtree rooted here.
    pub height: i32,
}

impl AvlNode {
    /// A freshly inserted node: no children, height 0 (a leaf).
    pub fn new() -> Self {
        Self {
            parent: None,
            left_child: None,
            right_child: None,
            height: 0,
        }
    }

    /// No children.
    pub fn is_leaf(&self) -> bool {
        self.left_child.is_none() && self.right_child.is_none()
    }

    /// Exactly a left child.
    pub fn has_only_left_child(&self) -> bool {
        self.left_child.is_some() && self.right_child.is_none()
    }

    /// Exactly a right child.
    pub fn has_only_right_child(&self) -> bool {
        self.left_child.is_none() && self.right_child.is_some()
    }

    /// Both children present.
    pub fn has_both_children(&self) -> bool {
        self.left_child.is_some() && self.right_child.is_some()
    }
}

impl Default for AvlNode {
    fn default() -> Self {
        Self::new()
    }
}

/// Rotation and rebalancing mechanics over an arena of `AvlNode`-carrying
/// payloads, addressed by `usize` index.
pub trait AvlTree<T> {
    /// Borrow the AVL bookkeeping for a node.
    fn get_node(&self, index: usize) -> &AvlNode;

    /// Mutably borrow the AVL bookkeeping for a node.
    fn get_node_mut(&mut self, index: usize) -> &mut AvlNode;

    /// Height of a subtree; absent (`None`) is −1, a leaf is 0.
    fn height_of(&self, index: Option<usize>) -> i32 {
        match index {
            Some(idx) => self.get_node(idx).height,
            None => -1,
        }
    }

    /// Recompute `index`'s stored height from its children's stored heights.
    fn update_height(&mut self, index: usize) {
        let left = self.height_of(self.get_node(index).left_child);
        let right = self.height_of(self.get_node(index).right_child);
        self.get_node_mut(index).height = 1 + left.max(right);
    }

    /// `height(right) - height(left)`; must stay in {−1, 0, +1} post-rebalance.
    fn balance_factor(&self, index: usize) -> i32 {
        let node = self.get_node(index);
        self.height_of(node.right_child) - self.height_of(node.left_child)
    }

    /// Leftmost descendant of the subtree rooted at `index`.
    fn find_min(&self, mut index: usize) -> usize {
        while let Some(left) = self.get_node(index).left_child {
            index = left;
        }
        index
    }

    /// Rightmost descendant of the subtree rooted at `index`.
    fn find_max(&self, mut index: usize) -> usize {
        while let Some(right) = self.get_node(index).right_child {
            index = right;
        }
        index
    }

    /// Single left rotation (RR case). Returns the new subtree root.
    fn rotate_left(&mut self, x_index: usize) -> usize {
        let y_index = self.get_node(x_index).right_child.expect("right child must exist for left rotation");

        let x_parent = self.get_node(x_index).parent;
        let y_left = self.get_node(y_index).left_child;

        self.get_node_mut(x_index).right_child = y_left;
        self.get_node_mut(y_index).left_child = Some(x_index);

        if let Some(y_left_idx) = y_left {
            self.get_node_mut(y_left_idx).parent = Some(x_index);
        }
        self.get_node_mut(x_index).parent = Some(y_index);
        self.get_node_mut(y_index).parent = x_parent;

        if let Some(parent_idx) = x_parent {
            if self.get_node(parent_idx).left_child == Some(x_index) {
                self.get_node_mut(parent_idx).left_child = Some(y_index);
            } else {
                self.get_node_mut(parent_idx).right_child = Some(y_index);
            }
        }

        self.update_height(x_index);
        self.update_height(y_index);
        y_index
    }

    /// Single right rotation (LL case). Returns the new subtree root.
    fn rotate_right(&mut self, y_index: usize) -> usize {
        let x_index = self.get_node(y_index).left_child.expect("left child must exist for right rotation");

        let y_parent = self.get_node(y_index).parent;
        let x_right = self.get_node(x_index).right_child;

        self.get_node_mut(y_index).left_child = x_right;
        self.get_node_mut(x_index).right_child = Some(y_index);

        if let Some(x_right_idx) = x_right {
            self.get_node_mut(x_right_idx).parent = Some(y_index);
        }
        self.get_node_mut(y_index).parent = Some(x_index);
        self.get_node_mut(x_index).parent = y_parent;

        if let Some(parent_idx) = y_parent {
            if self.get_node(parent_idx).left_child == Some(y_index) {
                self.get_node_mut(parent_idx).left_child = Some(x_index);
            } else {
                self.get_node_mut(parent_idx).right_child = Some(x_index);
            }
        }

        self.update_height(y_index);
        self.update_height(x_index);
        x_index
    }

    /// Recompute `index`'s height and, if `|balance_factor| > 1`, apply the
    /// matching LL/LR/RR/RL rotation (§4.2). Returns the new root of this
    /// subtree (unchanged unless a rotation occurred).
    fn balance(&mut self, index: usize) -> usize {
        self.update_height(index);
        let balance = self.balance_factor(index);

        if balance > 1 {
            let right_child = self.get_node(index).right_child.unwrap();
            if self.balance_factor(right_child) < 0 {
                tracing::trace!(case = "RL", node = index, "rebalancing");
                self.rotate_right(right_child);
            } else {
                tracing::trace!(case = "RR", node = index, "rebalancing");
            }
            self.rotate_left(index)
        } else if balance < -1 {
            let left_child = self.get_node(index).left_child.unwrap();
            if self.balance_factor(left_child) > 0 {
                tracing::trace!(case = "LR", node = index, "rebalancing");
                self.rotate_left(left_child);
            } else {
                tracing::trace!(case = "LL", node = index, "rebalancing");
            }
            self.rotate_right(index)
        } else {
            index
        }
    }
}
