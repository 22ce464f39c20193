//! The B*-tree placement representation.
//!
//! A B*-tree encodes an admissible packing order for a set of blocks: a
//! preorder traversal, where the left child of a node packs immediately to
//! the right of it and the right child packs above it at the same x offset,
//! yields non-overlapping positions under the contour packer.
//!
//! Nodes live in a dense arena addressed by [`NodeId`]; parent/child links
//! are `Option<NodeId>` rather than pointers, so `Clone` on the tree is a
//! full structural deep copy and relinking stays O(1) with no aliasing.
//!
//! Structural invariant: node payloads are a permutation of the block IDs —
//! mutations relink, swap, or reorient nodes but never create or drop one.
//! Violations of the mutation contracts below (deleting the root of a
//! single-node tree, inserting a node that is not fully detached) are bugs
//! in the caller and panic immediately.

use mosaic_model::BlockId;
use serde::{Deserialize, Serialize};

/// Opaque, copyable ID of a node in a [`BStarTree`] arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates an ID from a raw `u32` index.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw `u32` index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which child slot of a node an operation targets.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Side {
    /// The left child: packed immediately to the right of its parent.
    Left,
    /// The right child: packed above its parent at the same x offset.
    Right,
}

/// One node of the B*-tree: a block payload plus arena links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// The block this node places.
    pub block: BlockId,
    /// Orientation bit: `true` swaps the block's width and height.
    pub rotated: bool,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl TreeNode {
    /// Returns this node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns this node's left child, if any.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Returns this node's right child, if any.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    fn is_detached(&self) -> bool {
        self.parent.is_none() && self.left.is_none() && self.right.is_none()
    }
}

/// A candidate floorplan: one B*-tree over all blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BStarTree {
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
}

impl BStarTree {
    /// Builds the degenerate initial tree: a chain of right children, so the
    /// initial packing is a single column of blocks in input order.
    pub fn chain(block_count: usize) -> Self {
        let mut tree = Self::with_nodes(block_count);
        for i in 1..block_count {
            tree.nodes[i].parent = Some(NodeId::from_raw(i as u32 - 1));
            tree.nodes[i - 1].right = Some(NodeId::from_raw(i as u32));
        }
        tree
    }

    /// Builds a balanced initial tree: node `i` has children `2i+1` and
    /// `2i+2` in level order.
    pub fn balanced(block_count: usize) -> Self {
        let mut tree = Self::with_nodes(block_count);
        for i in 0..block_count {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            if left < block_count {
                tree.nodes[i].left = Some(NodeId::from_raw(left as u32));
                tree.nodes[left].parent = Some(NodeId::from_raw(i as u32));
            }
            if right < block_count {
                tree.nodes[i].right = Some(NodeId::from_raw(right as u32));
                tree.nodes[right].parent = Some(NodeId::from_raw(i as u32));
            }
        }
        tree
    }

    fn with_nodes(block_count: usize) -> Self {
        let nodes: Vec<TreeNode> = (0..block_count)
            .map(|i| TreeNode {
                block: BlockId::from_raw(i as u32),
                rotated: false,
                parent: None,
                left: None,
                right: None,
            })
            .collect();
        let root = if nodes.is_empty() {
            None
        } else {
            Some(NodeId::from_raw(0))
        };
        Self { nodes, root }
    }

    /// Returns the root node, or `None` for the empty tree.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns the number of nodes (always the block count).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.as_raw() as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.as_raw() as usize]
    }

    /// Flips the orientation bit of a node. No structural change.
    pub fn rotate_node(&mut self, id: NodeId) {
        let node = self.node_mut(id);
        node.rotated = !node.rotated;
    }

    /// Exchanges only the payloads (block identity and orientation) of two
    /// nodes. The tree shape is untouched, so this explores a different
    /// neighborhood than delete-and-reinsert.
    pub fn swap_payloads(&mut self, a: NodeId, b: NodeId) {
        let (ai, bi) = (a.as_raw() as usize, b.as_raw() as usize);
        if ai == bi {
            return;
        }
        let (block_a, rot_a) = (self.nodes[ai].block, self.nodes[ai].rotated);
        let (block_b, rot_b) = (self.nodes[bi].block, self.nodes[bi].rotated);
        self.nodes[ai].block = block_b;
        self.nodes[ai].rotated = rot_b;
        self.nodes[bi].block = block_a;
        self.nodes[bi].rotated = rot_a;
    }

    /// Removes a node from the tree, re-splicing its subtree into its
    /// parent's slot.
    ///
    /// A node with two children is first rotated down by repeatedly promoting
    /// its *left* child into its position (the left child inherits the parent
    /// slot, keeps the node's right subtree on its right, and hands its own
    /// former children to the demoted node). The tie-break is fixed: always
    /// the left child, for reproducible search behavior.
    ///
    /// Postcondition: the node is fully detached (no parent, no children),
    /// ready for [`insert_node`](Self::insert_node).
    ///
    /// # Panics
    ///
    /// Panics when deleting the root of a single-node tree; a lone-node tree
    /// is never subject to this call.
    pub fn delete_node(&mut self, id: NodeId) {
        while self.node(id).left.is_some() && self.node(id).right.is_some() {
            self.promote_left_child(id);
        }
        let parent = self.node(id).parent;
        let child = self.node(id).left.or(self.node(id).right);
        match parent {
            Some(p) => {
                let side = self.side_of(p, id);
                self.set_child(p, side, child);
            }
            None => {
                assert!(
                    child.is_some(),
                    "delete_node: cannot delete the root of a single-node tree"
                );
                self.root = child;
            }
        }
        if let Some(c) = child {
            self.node_mut(c).parent = parent;
        }
        let node = self.node_mut(id);
        node.parent = None;
        node.left = None;
        node.right = None;
    }

    /// Attaches the previously-detached node `id` as the `parent_side` child
    /// of `target`. The previous occupant of that slot, if any, becomes the
    /// `child_side` child of `id`.
    ///
    /// This is the structural dual of [`delete_node`](Self::delete_node); the
    /// two are always used together to relocate a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not fully detached or if `id == target`.
    pub fn insert_node(&mut self, id: NodeId, target: NodeId, parent_side: Side, child_side: Side) {
        assert_ne!(id, target, "insert_node: node cannot adopt itself");
        assert!(
            self.node(id).is_detached() && self.root != Some(id),
            "insert_node: node {id} still has live links"
        );
        let displaced = self.child(target, parent_side);
        self.set_child(target, parent_side, Some(id));
        self.node_mut(id).parent = Some(target);
        self.set_child(id, child_side, displaced);
        if let Some(d) = displaced {
            self.node_mut(d).parent = Some(id);
        }
    }

    /// Iterates node IDs in preorder (the packing order), using an explicit
    /// stack so arbitrarily unbalanced trees cannot overflow the call stack.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: self.root.into_iter().collect(),
        }
    }

    /// One step of the two-child deletion: the left child moves up into this
    /// node's position and this node moves down into the left child's,
    /// taking over the left child's former children.
    fn promote_left_child(&mut self, id: NodeId) {
        let left = self.node(id).left.expect("promote requires a left child");
        let right = self.node(id).right;
        let grand_left = self.node(left).left;
        let grand_right = self.node(left).right;
        let parent = self.node(id).parent;

        match parent {
            Some(p) => {
                let side = self.side_of(p, id);
                self.set_child(p, side, Some(left));
            }
            None => self.root = Some(left),
        }
        self.node_mut(left).parent = parent;
        self.node_mut(left).left = Some(id);
        self.node_mut(left).right = right;
        if let Some(r) = right {
            self.node_mut(r).parent = Some(left);
        }

        self.node_mut(id).parent = Some(left);
        self.node_mut(id).left = grand_left;
        self.node_mut(id).right = grand_right;
        if let Some(gl) = grand_left {
            self.node_mut(gl).parent = Some(id);
        }
        if let Some(gr) = grand_right {
            self.node_mut(gr).parent = Some(id);
        }
    }

    fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.node(id).left,
            Side::Right => self.node(id).right,
        }
    }

    fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.node_mut(id).left = child,
            Side::Right => self.node_mut(id).right = child,
        }
    }

    /// Returns which slot of `parent` holds `child`.
    ///
    /// # Panics
    ///
    /// Panics if `child` is not a child of `parent` — the links are corrupt.
    fn side_of(&self, parent: NodeId, child: NodeId) -> Side {
        if self.node(parent).left == Some(child) {
            Side::Left
        } else if self.node(parent).right == Some(child) {
            Side::Right
        } else {
            panic!("tree links corrupt: {child} is not a child of {parent}");
        }
    }
}

/// Explicit-stack preorder iterator over a [`BStarTree`].
pub struct Preorder<'a> {
    tree: &'a BStarTree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        if let Some(r) = node.right() {
            self.stack.push(r);
        }
        if let Some(l) = node.left() {
            self.stack.push(l);
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeSet;

    /// Asserts that node payloads are a permutation of the block IDs and
    /// that parent/child links agree in both directions.
    fn assert_well_formed(tree: &BStarTree) {
        let blocks: BTreeSet<u32> = tree
            .preorder()
            .map(|id| tree.node(id).block.as_raw())
            .collect();
        assert_eq!(blocks.len(), tree.len(), "block lost or duplicated");
        assert_eq!(tree.preorder().count(), tree.len(), "node unreachable");
        for i in 0..tree.len() {
            let id = NodeId::from_raw(i as u32);
            let node = tree.node(id);
            match node.parent() {
                Some(p) => {
                    let parent = tree.node(p);
                    assert!(
                        parent.left() == Some(id) || parent.right() == Some(id),
                        "parent link not mirrored"
                    );
                }
                None => assert_eq!(tree.root(), Some(id), "non-root node without parent"),
            }
            for child in [node.left(), node.right()].into_iter().flatten() {
                assert_eq!(tree.node(child).parent(), Some(id));
            }
        }
    }

    #[test]
    fn chain_shape() {
        let tree = BStarTree::chain(4);
        assert_well_formed(&tree);
        let order: Vec<u32> = tree.preorder().map(NodeId::as_raw).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert!(tree.node(NodeId::from_raw(0)).left().is_none());
        assert_eq!(
            tree.node(NodeId::from_raw(0)).right(),
            Some(NodeId::from_raw(1))
        );
    }

    #[test]
    fn balanced_shape() {
        let tree = BStarTree::balanced(7);
        assert_well_formed(&tree);
        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).left(), Some(NodeId::from_raw(1)));
        assert_eq!(tree.node(root).right(), Some(NodeId::from_raw(2)));
    }

    #[test]
    fn empty_tree() {
        let tree = BStarTree::chain(0);
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.preorder().count(), 0);
    }

    #[test]
    fn rotate_is_payload_only() {
        let mut tree = BStarTree::chain(3);
        let before: Vec<u32> = tree.preorder().map(NodeId::as_raw).collect();
        tree.rotate_node(NodeId::from_raw(1));
        let after: Vec<u32> = tree.preorder().map(NodeId::as_raw).collect();
        assert_eq!(before, after);
        assert!(tree.node(NodeId::from_raw(1)).rotated);
        tree.rotate_node(NodeId::from_raw(1));
        assert!(!tree.node(NodeId::from_raw(1)).rotated);
    }

    #[test]
    fn swap_exchanges_payloads_only() {
        let mut tree = BStarTree::chain(3);
        tree.rotate_node(NodeId::from_raw(0));
        tree.swap_payloads(NodeId::from_raw(0), NodeId::from_raw(2));
        assert_well_formed(&tree);
        assert_eq!(tree.node(NodeId::from_raw(0)).block.as_raw(), 2);
        assert_eq!(tree.node(NodeId::from_raw(2)).block.as_raw(), 0);
        assert!(tree.node(NodeId::from_raw(2)).rotated);
        assert!(!tree.node(NodeId::from_raw(0)).rotated);
    }

    #[test]
    fn delete_leaf() {
        let mut tree = BStarTree::chain(3);
        tree.delete_node(NodeId::from_raw(2));
        assert!(tree.node(NodeId::from_raw(2)).is_detached());
        assert_eq!(tree.node(NodeId::from_raw(1)).right(), None);
        assert_eq!(tree.preorder().count(), 2);
    }

    #[test]
    fn delete_one_child_splices() {
        let mut tree = BStarTree::chain(4);
        tree.delete_node(NodeId::from_raw(1));
        assert!(tree.node(NodeId::from_raw(1)).is_detached());
        assert_eq!(
            tree.node(NodeId::from_raw(0)).right(),
            Some(NodeId::from_raw(2))
        );
        assert_eq!(
            tree.node(NodeId::from_raw(2)).parent(),
            Some(NodeId::from_raw(0))
        );
    }

    #[test]
    fn delete_root_of_chain_promotes_child() {
        let mut tree = BStarTree::chain(3);
        tree.delete_node(NodeId::from_raw(0));
        assert_eq!(tree.root(), Some(NodeId::from_raw(1)));
        assert!(tree.node(NodeId::from_raw(1)).parent().is_none());
        assert!(tree.node(NodeId::from_raw(0)).is_detached());
    }

    #[test]
    fn delete_two_children_promotes_left() {
        let mut tree = BStarTree::balanced(7);
        tree.delete_node(NodeId::from_raw(0));
        // The left child takes the root slot.
        assert_eq!(tree.root(), Some(NodeId::from_raw(1)));
        assert!(tree.node(NodeId::from_raw(0)).is_detached());
        assert_eq!(tree.preorder().count(), 6);
        let blocks: std::collections::BTreeSet<u32> = tree
            .preorder()
            .map(|id| tree.node(id).block.as_raw())
            .collect();
        assert_eq!(blocks, (1..7).collect());
    }

    #[test]
    #[should_panic(expected = "single-node tree")]
    fn delete_childless_root_panics() {
        let mut tree = BStarTree::chain(1);
        tree.delete_node(NodeId::from_raw(0));
    }

    #[test]
    fn delete_then_insert_preserves_permutation() {
        for parent_side in [Side::Left, Side::Right] {
            for child_side in [Side::Left, Side::Right] {
                let mut tree = BStarTree::balanced(9);
                tree.delete_node(NodeId::from_raw(3));
                tree.insert_node(
                    NodeId::from_raw(3),
                    NodeId::from_raw(6),
                    parent_side,
                    child_side,
                );
                assert_well_formed(&tree);
                assert_eq!(tree.len(), 9);
            }
        }
    }

    #[test]
    fn insert_displaces_old_child() {
        let mut tree = BStarTree::chain(4);
        tree.delete_node(NodeId::from_raw(3));
        tree.insert_node(
            NodeId::from_raw(3),
            NodeId::from_raw(0),
            Side::Right,
            Side::Left,
        );
        // Node 1 was node 0's right child; it is now node 3's left child.
        assert_eq!(
            tree.node(NodeId::from_raw(0)).right(),
            Some(NodeId::from_raw(3))
        );
        assert_eq!(
            tree.node(NodeId::from_raw(3)).left(),
            Some(NodeId::from_raw(1))
        );
        assert_well_formed(&tree);
    }

    #[test]
    #[should_panic(expected = "live links")]
    fn insert_attached_node_panics() {
        let mut tree = BStarTree::chain(3);
        tree.insert_node(
            NodeId::from_raw(1),
            NodeId::from_raw(2),
            Side::Left,
            Side::Left,
        );
    }

    #[test]
    fn clone_is_deep() {
        let mut tree = BStarTree::chain(5);
        let copy = tree.clone();
        tree.rotate_node(NodeId::from_raw(2));
        tree.delete_node(NodeId::from_raw(4));
        assert!(!copy.node(NodeId::from_raw(2)).rotated);
        assert_eq!(copy.preorder().count(), 5);
    }

    #[test]
    fn deep_chain_preorder_does_not_overflow() {
        let tree = BStarTree::chain(200_000);
        assert_eq!(tree.preorder().count(), 200_000);
    }

    #[test]
    fn randomized_delete_insert_stays_well_formed() {
        // Deterministic pseudo-random walk over mutation pairs.
        let mut tree = BStarTree::balanced(17);
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let a = NodeId::from_raw(rng.gen_range(0..17));
            let mut b = NodeId::from_raw(rng.gen_range(0..17));
            while b == a {
                b = NodeId::from_raw(rng.gen_range(0..17));
            }
            tree.delete_node(a);
            let parent_side = if rng.gen::<bool>() { Side::Left } else { Side::Right };
            let child_side = if rng.gen::<bool>() { Side::Left } else { Side::Right };
            tree.insert_node(a, b, parent_side, child_side);
            assert_well_formed(&tree);
        }
    }
}
