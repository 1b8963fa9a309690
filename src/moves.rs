//! Pre-sampling of annealing moves.
//!
//! All randomness the annealing loop consumes is drawn up front, into dense arrays, so
//! the loop itself only reads pre-sampled data and the RNG state never changes mid-run.
//! This amortises RNG overhead and makes a run reproducible bit-for-bit under a fixed
//! seed (see `DESIGN.md` on carrying the RNG handle explicitly rather than through
//! process-global state).

use rand::Rng;

use crate::{machine::Machine, product::Assignment, swap_sites::SwapSiteSets};

/// A single proposed move: replace the block starting at `swap_index` on `machine` with
/// `product` (or idle it).
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub machine: u32,
    pub swap_index: usize,
    pub product: Assignment,
}

/// The pre-sampled moves for an entire annealing run, plus the Metropolis dice rolls.
///
/// A move is `None` when the randomly chosen machine has no legal swap sites at all
/// (e.g. a `null` shift pattern) — there is nothing to propose, so that iteration is a
/// guaranteed no-op.
pub struct PreSampledMoves {
    pub moves: Vec<Option<Move>>,
    pub dice: Vec<f64>,
}

/// Pre-samples `iterations` moves plus their acceptance dice rolls.
pub fn sample_moves(
    rng: &mut impl Rng,
    machines: &[Machine],
    swap_sites: &SwapSiteSets,
    turn_off_pct: f64,
    iterations: u64,
) -> PreSampledMoves {
    let mut moves = Vec::with_capacity(iterations as usize);
    let mut dice = Vec::with_capacity(iterations as usize);

    for _ in 0..iterations {
        let machine = &machines[rng.gen_range(0..machines.len())];
        let sites = &swap_sites[&machine.id];

        let candidate = if sites.is_empty() {
            None
        } else {
            let swap_index = sites[rng.gen_range(0..sites.len())];
            let product = if rng.gen::<f64>() < turn_off_pct {
                Assignment::Idle
            } else {
                let products = machine.products();
                Assignment::Product(products[rng.gen_range(0..products.len())])
            };
            Some(Move {
                machine: machine.id,
                swap_index,
                product,
            })
        };

        moves.push(candidate);
        dice.push(rng.gen::<f64>());
    }

    PreSampledMoves { moves, dice }
}
