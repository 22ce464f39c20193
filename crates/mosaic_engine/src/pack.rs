//! Contour-based packing: maps a B*-tree to absolute block coordinates.
//!
//! A preorder traversal places each block against a *contour* — the skyline
//! of everything already placed. The contour is an arena-backed singly
//! linked list of `(x, y)` segments rebuilt from two sentinels on every
//! call; it carries no state between packs. Each segment is created once
//! and unlinked at most once, so a full pass is amortized O(n).

use crate::tree::{BStarTree, NodeId};
use mosaic_model::{Netlist, Rect};
use serde::{Deserialize, Serialize};

/// The bounding extents of a packed placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackExtent {
    /// Maximum x reached by any placed block.
    pub width: u64,
    /// Maximum y reached by any placed block.
    pub height: u64,
}

impl PackExtent {
    /// Returns the packed chip area.
    pub fn area(&self) -> u64 {
        self.width * self.height
    }
}

/// One horizontal skyline segment: height `y` starting at `x`, ending where
/// the next linked segment begins.
struct ContourSeg {
    x: u64,
    y: u64,
    next: Option<usize>,
}

/// Packs the tree, writing every block's placed rectangle into the netlist
/// and returning the resulting chip extents.
///
/// The traversal is preorder with an explicit stack: a node's left child
/// packs at the contour segment immediately to its right, its right child
/// packs at the node's own segment (stacking above it), and the whole left
/// subtree is placed before the right child is visited.
pub fn pack(tree: &BStarTree, netlist: &mut Netlist) -> PackExtent {
    // Sentinels span [0, +inf) at height 0; the tail is never consumed.
    let mut segs = vec![
        ContourSeg {
            x: 0,
            y: 0,
            next: Some(1),
        },
        ContourSeg {
            x: u64::MAX,
            y: 0,
            next: None,
        },
    ];
    let mut extent = PackExtent::default();

    let mut stack: Vec<(NodeId, usize)> = Vec::with_capacity(tree.len());
    if let Some(root) = tree.root() {
        stack.push((root, 0));
    }

    while let Some((id, head)) = stack.pop() {
        let node = tree.node(id);
        let block = netlist.block(node.block);
        let width = block.width(node.rotated);
        let height = block.height(node.rotated);
        let x = segs[head].x;
        let right_edge = x + width;

        // Consume every segment fully covered by this block, tracking the
        // tallest consumed height (the block's resting y) and the height of
        // the last one (the residual skyline step past the right edge).
        let mut max_y = segs[head].y;
        let mut residual_y = segs[head].y;
        loop {
            let next = segs[head].next.expect("contour tail was consumed");
            if right_edge <= segs[next].x {
                break;
            }
            residual_y = segs[next].y;
            max_y = max_y.max(residual_y);
            segs[head].next = segs[next].next;
        }

        netlist.block_mut(node.block).rect = Rect::new(x, max_y, right_edge, max_y + height);
        extent.width = extent.width.max(right_edge);
        extent.height = extent.height.max(max_y + height);

        segs[head].y = max_y + height;
        let next = segs[head].next.expect("contour tail was consumed");
        if right_edge < segs[next].x {
            segs.push(ContourSeg {
                x: right_edge,
                y: residual_y,
                next: Some(next),
            });
            segs[head].next = Some(segs.len() - 1);
        }

        // Right sibling reuses this segment once the left subtree is done;
        // it is pushed first so the left child pops first.
        if let Some(r) = node.right() {
            stack.push((r, head));
        }
        if let Some(l) = node.left() {
            let above = segs[head].next.expect("contour tail was consumed");
            stack.push((l, above));
        }
    }

    extent
}
