//! Traversal helpers (§4.3): an iterative BFS height used as an independent
//! cross-check against the incrementally maintained per-node height, the
//! leftmost/rightmost descent `LimitTree::best`/`worst` delegate to, and the
//! sentinel guard `rebalance_path` stops on.

use crate::avl_tree::AvlTree;
use std::collections::VecDeque;

/// Height of the subtree rooted at `root`, computed from scratch via
/// level-order traversal with an auxiliary FIFO queue — deliberately not the
/// incrementally stored height in `AvlNode`, so property tests can assert
/// the two agree after every mutation. `None` (absent) is −1, a leaf is 0.
pub fn bfs_height<A: AvlTree<T>, T>(tree: &A, root: Option<usize>) -> i32 {
    let Some(root_idx) = root else { return -1 };

    let mut frontier = VecDeque::new();
    frontier.push_back(root_idx);
    let mut height = -1;

    while !frontier.is_empty() {
        height += 1;
        let mut next = VecDeque::new();
        for idx in frontier {
            let node = tree.get_node(idx);
            if let Some(left) = node.left_child {
                next.push_back(left);
            }
            if let Some(right) = node.right_child {
                next.push_back(right);
            }
        }
        frontier = next;
    }

    height
}

/// Leftmost descendant of the subtree rooted at `root` (§4.3 min_limit).
pub fn min_limit<A: AvlTree<T>, T>(tree: &A, root: usize) -> usize {
    tree.find_min(root)
}

/// Rightmost descendant of the subtree rooted at `root` (§4.3 max_limit).
pub fn max_limit<A: AvlTree<T>, T>(tree: &A, root: usize) -> usize {
    tree.find_max(root)
}

/// Whether `index` is the distinguished sentinel root of its tree.
pub fn is_sentinel(index: usize, sentinel_index: usize) -> bool {
    index == sentinel_index
}
