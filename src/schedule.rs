//! Schedules, production curves, and the per-product cost function.

use std::collections::HashMap;

use crate::{
    horizon::{ENVELOPE_LEN, H},
    product::{Assignment, ProductId},
    productivity::Envelopes,
};

/// `S[m]`, one machine's hour-by-hour assignment, length `H`.
#[derive(Debug, Clone)]
pub struct Schedule {
    assignments: HashMap<u32, Vec<Assignment>>,
}

impl Schedule {
    /// Builds an all-`IDLE` schedule for the given machine ids.
    pub fn idle(machine_ids: impl Iterator<Item = u32>) -> Self {
        Self {
            assignments: machine_ids.map(|id| (id, vec![Assignment::Idle; H])).collect(),
        }
    }

    pub fn get(&self, machine: u32, t: usize) -> Assignment {
        self.assignments[&machine][t]
    }

    pub fn machine(&self, machine: u32) -> &[Assignment] {
        &self.assignments[&machine]
    }

    /// Writes `assignment` into `[t0, t1)` on `machine`, clamping `t1` to the horizon.
    pub fn set_block(&mut self, machine: u32, t0: usize, t1: usize, assignment: Assignment) {
        let row = self.assignments.get_mut(&machine).expect("unknown machine");
        let t1 = t1.min(row.len());
        for slot in &mut row[t0..t1] {
            *slot = assignment;
        }
    }

    pub fn machine_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.assignments.keys().copied()
    }
}

/// `Q[p]`, cumulative units of product `p` produced by the end of each hour, length `H`.
pub type ProductionCurve = Vec<f64>;

/// `product id -> Q[p]` for every product currently produced.
pub type ProductionCurves = HashMap<ProductId, ProductionCurve>;

/// `C[p]`, the scalar cost contribution of product `p`.
pub type CostContributions = HashMap<ProductId, f64>;

/// `cost(p, Q_p) = missed_penalty * sum(max(D-Q, 0)) + over_penalty * sum(max(Q-D, 0))`.
pub fn cost(demand: &[f64], production: &[f64], missed_penalty: f64, over_penalty: f64) -> f64 {
    debug_assert_eq!(demand.len(), production.len());
    demand
        .iter()
        .zip(production)
        .map(|(&d, &q)| missed_penalty * (d - q).max(0.0) + over_penalty * (q - d).max(0.0))
        .sum()
}

/// Recomputes `Q` for every product from scratch, given `S` and `E`.
///
/// Used to build the initial solution and, in debug builds, as a sanity check that the
/// incrementally-maintained curves in the annealing loop still agree with a from-scratch
/// recomputation (see `solver::annealing`).
pub fn compute_production_curves(
    schedule: &Schedule,
    envelopes: &Envelopes,
    products: impl Iterator<Item = ProductId>,
) -> ProductionCurves {
    let mut hourly: HashMap<ProductId, Vec<f64>> =
        products.map(|p| (p, vec![0.0; H])).collect();

    for (&machine, row) in &schedule.assignments {
        let envelope = &envelopes[&machine];
        for t in 0..ENVELOPE_LEN {
            if let Assignment::Product(p) = row[t] {
                if let Some(bucket) = hourly.get_mut(&p) {
                    bucket[t] += envelope[t];
                }
            }
        }
    }

    hourly
        .into_iter()
        .map(|(p, raw)| {
            let mut curve = Vec::with_capacity(H);
            let mut running = 0.0;
            for v in raw {
                running += v;
                curve.push(running);
            }
            (p, curve)
        })
        .collect()
}

/// Computes `C[p]` for every product with a demand curve, given its production curve (or
/// an implicit all-zero production curve if the product has not been produced at all).
pub fn compute_cost_contributions(
    demand: &HashMap<ProductId, Vec<f64>>,
    production: &ProductionCurves,
    missed_penalty: f64,
    over_penalty: f64,
) -> CostContributions {
    let zero_curve = vec![0.0; H];
    demand
        .iter()
        .map(|(&p, d)| {
            let q = production.get(&p).unwrap_or(&zero_curve);
            (p, cost(d, q, missed_penalty, over_penalty))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cost_of_perfect_production_is_zero() {
        let demand = vec![0.0, 5.0, 10.0];
        assert_eq!(cost(&demand, &demand, 15.0, 1.0), 0.0);
    }

    #[test]
    fn cost_of_zero_production_is_missed_penalty_times_total_demand() {
        let demand = vec![0.0, 5.0, 10.0];
        let zero = vec![0.0; 3];
        let total: f64 = demand.iter().sum();
        assert_eq!(cost(&demand, &zero, 15.0, 1.0), 15.0 * total);
    }

    #[test]
    fn overproduction_uses_the_over_penalty() {
        let demand = vec![0.0, 0.0];
        let production = vec![1.0, 2.0];
        assert_eq!(cost(&demand, &production, 15.0, 3.0), 3.0 * 3.0);
    }

    #[test]
    fn set_block_clamps_to_the_horizon() {
        let mut schedule = Schedule::idle([1].into_iter());
        schedule.set_block(1, H - 2, H + 10, Assignment::Product(0));
        assert_eq!(schedule.get(1, H - 1), Assignment::Product(0));
        assert_eq!(schedule.machine(1).len(), H);
    }
}
