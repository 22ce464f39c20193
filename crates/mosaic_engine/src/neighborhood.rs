//! Neighborhood generation: candidate trees one perturbation away.
//!
//! Each call picks one move family by weighted choice and returns a batch of
//! independent candidate trees. The input tree is never mutated; every
//! candidate is a full structural clone, so there is no aliasing between the
//! annealer's current tree and anything it is considering.

use crate::tree::{BStarTree, NodeId, Side};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Relative selection weights of the three move families.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveWeights {
    /// Weight of the single-node rotate move.
    pub rotate: u32,
    /// Weight of the payload-swap move.
    pub swap: u32,
    /// Weight of the delete-and-reinsert move.
    pub delete_insert: u32,
}

impl Default for MoveWeights {
    fn default() -> Self {
        Self {
            rotate: 1,
            swap: 1,
            delete_insert: 1,
        }
    }
}

impl MoveWeights {
    fn total(&self) -> u32 {
        self.rotate + self.swap + self.delete_insert
    }
}

/// Generates a batch of neighbor trees from one randomly chosen move family.
///
/// - Rotate: 1 candidate — one random node reoriented.
/// - Swap: 4 candidates — every rotate/no-rotate combination of two distinct
///   nodes, followed by a payload swap.
/// - Delete-and-reinsert: 8 candidates — {rotate victim or not} × {attach on
///   the target's left or right} × {displaced child goes left or right}.
///
/// A single-node tree only ever yields the rotate move (no two distinct
/// nodes exist); an empty tree yields nothing.
pub fn neighborhood(tree: &BStarTree, weights: &MoveWeights, rng: &mut impl Rng) -> Vec<BStarTree> {
    if tree.is_empty() {
        return Vec::new();
    }
    if tree.len() == 1 {
        return rotate_move(tree, rng);
    }
    debug_assert!(weights.total() > 0, "all move weights are zero");
    let roll = rng.gen_range(0..weights.total());
    if roll < weights.rotate {
        rotate_move(tree, rng)
    } else if roll < weights.rotate + weights.swap {
        swap_move(tree, rng)
    } else {
        delete_insert_move(tree, rng)
    }
}

fn random_node(tree: &BStarTree, rng: &mut impl Rng) -> NodeId {
    NodeId::from_raw(rng.gen_range(0..tree.len() as u32))
}

fn distinct_pair(tree: &BStarTree, rng: &mut impl Rng) -> (NodeId, NodeId) {
    let a = random_node(tree, rng);
    loop {
        let b = random_node(tree, rng);
        if b != a {
            return (a, b);
        }
    }
}

fn rotate_move(tree: &BStarTree, rng: &mut impl Rng) -> Vec<BStarTree> {
    let id = random_node(tree, rng);
    let mut candidate = tree.clone();
    candidate.rotate_node(id);
    vec![candidate]
}

fn swap_move(tree: &BStarTree, rng: &mut impl Rng) -> Vec<BStarTree> {
    let (a, b) = distinct_pair(tree, rng);
    let mut candidates = Vec::with_capacity(4);
    for rotate_a in [false, true] {
        for rotate_b in [false, true] {
            let mut candidate = tree.clone();
            if rotate_a {
                candidate.rotate_node(a);
            }
            if rotate_b {
                candidate.rotate_node(b);
            }
            candidate.swap_payloads(a, b);
            candidates.push(candidate);
        }
    }
    candidates
}

fn delete_insert_move(tree: &BStarTree, rng: &mut impl Rng) -> Vec<BStarTree> {
    let (victim, target) = distinct_pair(tree, rng);
    let mut candidates = Vec::with_capacity(8);
    for rotate_victim in [false, true] {
        for parent_side in [Side::Left, Side::Right] {
            for child_side in [Side::Left, Side::Right] {
                let mut candidate = tree.clone();
                if rotate_victim {
                    candidate.rotate_node(victim);
                }
                candidate.delete_node(victim);
                candidate.insert_node(victim, target, parent_side, child_side);
                candidates.push(candidate);
            }
        }
    }
    candidates
}
