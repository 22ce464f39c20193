//! Simulated-annealing search over B*-trees.
//!
//! Drives perturb → pack → cost → accept/reject across a geometric cooling
//! schedule. The initial temperature is self-calibrated from the cost deltas
//! observed on an uncontrolled random walk, candidate selection prefers
//! placements that satisfy the chip outline, and the globally best tree is
//! tracked independently of the current one. A placement that never fits is
//! a result (`fits = false` after the retry budget), never an error.

use crate::cost::{CostBreakdown, CostModel};
use crate::neighborhood::{neighborhood, MoveWeights};
use crate::tree::BStarTree;
use mosaic_model::Netlist;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Tunable parameters of the annealing search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Area/wirelength blend weight in `[0, 1]` (1 = area only).
    pub alpha: f64,
    /// Geometric cooling ratio per temperature level, in `(0, 1)`.
    pub cooling_rate: f64,
    /// Temperature threshold that terminates a schedule.
    pub min_temperature: f64,
    /// Trials per temperature level, as a multiplier of the block count.
    pub moves_per_block: usize,
    /// Steps of the uncontrolled calibration walk.
    pub calibration_moves: usize,
    /// Target probability of accepting a mean uphill move at the start of
    /// the schedule; sets the initial temperature.
    pub initial_acceptance: f64,
    /// Extra schedules to run from scratch while the best tree does not fit.
    pub max_restarts: usize,
    /// RNG seed; `None` draws one from the OS for a non-reproducible run.
    pub seed: Option<u64>,
    /// Move-family selection weights.
    pub weights: MoveWeights,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            cooling_rate: 0.95,
            min_temperature: 0.01,
            moves_per_block: 10,
            calibration_moves: 128,
            initial_acceptance: 0.9,
            max_restarts: 4,
            seed: None,
            weights: MoveWeights::default(),
        }
    }
}

/// Summary metrics of a finished search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorplanStats {
    /// Final raw cost: `alpha * area + (1 - alpha) * wirelength`.
    pub cost: f64,
    /// Total half-perimeter wirelength of the final placement.
    pub wirelength: f64,
    /// Packed chip area.
    pub area: u64,
    /// Packed chip width.
    pub width: u64,
    /// Packed chip height.
    pub height: u64,
    /// Whether the final placement fits the chip outline.
    pub fits: bool,
    /// Wall-clock search time.
    pub elapsed: Duration,
    /// Schedules re-run beyond the first because the best tree did not fit.
    pub restarts: usize,
}

/// The result of a search: the best tree found, repacked so the netlist's
/// block rectangles carry its final coordinates, plus summary metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floorplan {
    /// The best B*-tree found.
    pub tree: BStarTree,
    /// Summary metrics over the whole run.
    pub stats: FloorplanStats,
}

/// The Metropolis acceptance rule: downhill and flat moves are always
/// accepted, uphill moves with probability `exp(-delta / temperature)`.
pub fn accept(delta: f64, temperature: f64, rng: &mut impl Rng) -> bool {
    delta <= 0.0 || rng.gen::<f64>() < (-delta / temperature).exp()
}

/// Returns whether evaluation `a` is preferable to `b`: fitting beats
/// non-fitting, then lower cost wins within a class.
fn better(a: &CostBreakdown, b: &CostBreakdown) -> bool {
    if a.fits != b.fits {
        a.fits
    } else {
        a.total < b.total
    }
}

/// The annealing driver. Borrows the netlist for the duration of the search
/// and leaves the best placement's rectangles in it on completion.
pub struct Annealer<'a> {
    netlist: &'a mut Netlist,
    outline: (u64, u64),
    params: SearchParams,
    rng: StdRng,
}

impl<'a> Annealer<'a> {
    /// Creates an annealer over the given netlist and chip outline.
    pub fn new(
        netlist: &'a mut Netlist,
        outline: (u64, u64),
        params: SearchParams,
    ) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            netlist,
            outline,
            params,
            rng,
        }
    }

    /// Runs the full search: up to `1 + max_restarts` annealing schedules,
    /// stopping early as soon as a schedule's best tree fits the outline.
    pub fn run(&mut self) -> Floorplan {
        let started = Instant::now();
        let block_count = self.netlist.block_count();

        if block_count == 0 {
            let tree = BStarTree::chain(0);
            return self.finish(tree, started, 0);
        }

        let mut best: Option<(BStarTree, CostBreakdown)> = None;
        let mut restarts = 0;
        for attempt in 0..=self.params.max_restarts {
            restarts = attempt;
            let (tree, eval) = self.anneal_once(block_count);
            let replace = match &best {
                None => true,
                Some((_, incumbent)) => better(&eval, incumbent),
            };
            if replace {
                best = Some((tree, eval));
            }
            if best.as_ref().is_some_and(|(_, e)| e.fits) {
                break;
            }
        }

        let (tree, _) = best.expect("at least one schedule ran");
        self.finish(tree, started, restarts)
    }

    /// One full schedule: calibrate, then anneal until the temperature
    /// drops below the threshold. Returns the best tree of the schedule.
    fn anneal_once(&mut self, block_count: usize) -> (BStarTree, CostBreakdown) {
        let mut cost = CostModel::new(self.params.alpha, self.outline);
        let mut current = BStarTree::chain(block_count);
        let (initial_temperature, walked) = self.calibrate(&mut cost, current.clone());
        current = walked;

        let mut current_eval = cost.evaluate(&current, self.netlist);
        let mut best_tree = current.clone();
        let mut best_eval = current_eval;

        let trials = (self.params.moves_per_block * block_count).max(1);
        let mut temperature = initial_temperature;
        while temperature > self.params.min_temperature {
            for _ in 0..trials {
                let mut candidates = neighborhood(&current, &self.params.weights, &mut self.rng);
                if candidates.is_empty() {
                    break;
                }
                let (chosen, eval) = self.select_candidate(&cost, &candidates);
                let delta = eval.total - current_eval.total;
                if accept(delta, temperature, &mut self.rng) {
                    current = candidates.swap_remove(chosen);
                    current_eval = eval;
                    if better(&current_eval, &best_eval) {
                        best_tree = current.clone();
                        best_eval = current_eval;
                    }
                }
            }
            temperature *= self.params.cooling_rate;
        }

        (best_tree, best_eval)
    }

    /// The calibration walk: a fixed number of perturb-and-accept steps that
    /// sample typical packed extents and wirelengths. Installs the averages
    /// as normalization divisors, then derives the initial temperature from
    /// the mean uphill delta of the recorded walk re-costed at that scale:
    /// `|mean_positive_delta / ln(initial_acceptance)|`.
    fn calibrate(&mut self, cost: &mut CostModel, start: BStarTree) -> (f64, BStarTree) {
        let mut current = start;
        let mut walk = Vec::with_capacity(self.params.calibration_moves + 1);
        let eval = cost.evaluate(&current, self.netlist);
        walk.push((eval.extent, eval.wirelength));

        for _ in 0..self.params.calibration_moves {
            let mut candidates = neighborhood(&current, &self.params.weights, &mut self.rng);
            if candidates.is_empty() {
                break;
            }
            let (chosen, eval) = self.select_candidate(cost, &candidates);
            current = candidates.swap_remove(chosen);
            walk.push((eval.extent, eval.wirelength));
        }

        let steps = walk.len() as f64;
        let avg_area = walk.iter().map(|(e, _)| e.area() as f64).sum::<f64>() / steps;
        let avg_wire = walk.iter().map(|(_, w)| w).sum::<f64>() / steps;
        cost.set_normalization(avg_area, avg_wire);

        let costs: Vec<f64> = walk
            .iter()
            .map(|&(extent, wire)| cost.combine(extent, wire).total)
            .collect();
        let mut positive_sum = 0.0;
        let mut positive_count = 0u32;
        let mut abs_sum = 0.0;
        for pair in costs.windows(2) {
            let delta = pair[1] - pair[0];
            abs_sum += delta.abs();
            if delta > 0.0 {
                positive_sum += delta;
                positive_count += 1;
            }
        }
        let mean_delta = if positive_count > 0 {
            positive_sum / positive_count as f64
        } else if costs.len() > 1 {
            abs_sum / (costs.len() - 1) as f64
        } else {
            0.0
        };

        let temperature = (mean_delta / self.params.initial_acceptance.ln())
            .abs()
            .max(self.params.min_temperature);
        (temperature, current)
    }

    /// Evaluates every candidate in a batch and picks the preferred one:
    /// fitting over non-fitting, then lowest cost.
    fn select_candidate(
        &mut self,
        cost: &CostModel,
        candidates: &[BStarTree],
    ) -> (usize, CostBreakdown) {
        let mut selected: Option<(usize, CostBreakdown)> = None;
        for (i, candidate) in candidates.iter().enumerate() {
            let eval = cost.evaluate(candidate, self.netlist);
            let replace = match &selected {
                None => true,
                Some((_, incumbent)) => better(&eval, incumbent),
            };
            if replace {
                selected = Some((i, eval));
            }
        }
        selected.expect("candidate batch is never empty here")
    }

    /// Repacks the chosen tree so the netlist carries its final coordinates
    /// and assembles the summary metrics, with the raw (unnormalized) cost.
    fn finish(&mut self, tree: BStarTree, started: Instant, restarts: usize) -> Floorplan {
        let raw = CostModel::new(self.params.alpha, self.outline);
        let eval = raw.evaluate(&tree, self.netlist);
        let stats = FloorplanStats {
            cost: self.params.alpha * eval.area as f64
                + (1.0 - self.params.alpha) * eval.wirelength,
            wirelength: eval.wirelength,
            area: eval.area,
            width: eval.extent.width,
            height: eval.extent.height,
            fits: eval.fits,
            elapsed: started.elapsed(),
            restarts,
        };
        Floorplan { tree, stats }
    }
}
