//! The simulated-annealing solver: wires together envelope/swap-site construction, the
//! initial solution, and the annealing loop.

pub mod annealing;
pub mod delta;
pub mod initial;

use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::{config::SolverParams, moves, problem::SolverInputs, productivity, swap_sites};

pub use annealing::SolveResult;

/// Runs the full pipeline end to end: productivity envelopes, swap sites, a random
/// initial solution, pre-sampled moves, then the annealing loop, all seeded from `seed`.
pub fn solve(inputs: &SolverInputs, params: &SolverParams, seed: u64) -> SolveResult {
    let envelopes = productivity::build_envelopes(&inputs.machines);
    let swap_sites = swap_sites::build_swap_sites(&envelopes, params.min_swap_hours);

    let mut rng = Pcg64::seed_from_u64(seed);

    let initial = initial::build(
        &mut rng,
        &inputs.machines,
        &swap_sites,
        &envelopes,
        &inputs.demand,
        params.min_swap_hours,
        params.missed_production_penalty,
        params.overproduction_penalty,
    );

    let sampled = moves::sample_moves(
        &mut rng,
        &inputs.machines,
        &swap_sites,
        params.turn_off_pct,
        params.iterations,
    );

    annealing::run(initial, sampled, &envelopes, &inputs.demand, params)
}
