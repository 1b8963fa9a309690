//! Incremental cost recomputation for a single proposed block swap.

use crate::{
    forecast::DemandCurves,
    horizon::{ENVELOPE_LEN, H},
    moves::Move,
    product::{Assignment, ProductId},
    productivity::Envelopes,
    schedule::{cost, CostContributions, ProductionCurve, ProductionCurves, Schedule},
};

/// The candidate change a move would cause, or `None` if the move is a no-op
/// (`p_new == p_old`).
pub struct DeltaResult {
    pub delta_j: f64,
    pub machine: u32,
    pub t0: usize,
    pub t1: usize,
    pub product: Assignment,
    /// `(product, candidate Q[p], candidate C[p])` for every product touched by the move.
    pub product_updates: Vec<(ProductId, ProductionCurve, f64)>,
}

fn curve_or_zero(curves: &ProductionCurves, product: ProductId) -> ProductionCurve {
    curves.get(&product).cloned().unwrap_or_else(|| vec![0.0; H])
}

fn demand_or_zero(demand: &DemandCurves, product: ProductId) -> ProductionCurve {
    demand.get(&product).cloned().unwrap_or_else(|| vec![0.0; H])
}

/// Evaluates the cost delta of swapping the block `[t0, t0+min_swap_hours)` on `mv.machine`
/// from its current product to `mv.product`.
pub fn evaluate(
    schedule: &Schedule,
    envelopes: &Envelopes,
    demand: &DemandCurves,
    production: &ProductionCurves,
    cost_contributions: &CostContributions,
    mv: Move,
    min_swap_hours: usize,
    missed_penalty: f64,
    over_penalty: f64,
) -> Option<DeltaResult> {
    let t0 = mv.swap_index;
    let t1 = (t0 + min_swap_hours).min(H);
    let p_old = schedule.get(mv.machine, t0);

    if mv.product == p_old {
        return None;
    }

    let envelope = &envelopes[&mv.machine];
    let env_end = t1.min(ENVELOPE_LEN);

    // hourly_prod[i] is the partial sum of productivity up to offset i within the block.
    let mut hourly_prod = vec![0.0; t1 - t0];
    let mut running = 0.0;
    for (i, t) in (t0..env_end).enumerate() {
        running += envelope[t];
        hourly_prod[i] = running;
    }
    for i in (env_end - t0)..(t1 - t0) {
        hourly_prod[i] = running;
    }
    let total_prod = running;

    let mut product_updates = Vec::with_capacity(2);
    let mut delta_j = 0.0;

    if let Assignment::Product(p_old_id) = p_old {
        let mut q = curve_or_zero(production, p_old_id);
        for (i, slot) in q[t0..t1].iter_mut().enumerate() {
            *slot -= hourly_prod[i];
        }
        for slot in &mut q[t1..] {
            *slot -= total_prod;
        }
        let d = demand_or_zero(demand, p_old_id);
        let c_new = cost(&d, &q, missed_penalty, over_penalty);
        delta_j += c_new - cost_contributions.get(&p_old_id).copied().unwrap_or(0.0);
        product_updates.push((p_old_id, q, c_new));
    }

    if let Assignment::Product(p_new_id) = mv.product {
        let mut q = curve_or_zero(production, p_new_id);
        for (i, slot) in q[t0..t1].iter_mut().enumerate() {
            *slot += hourly_prod[i];
        }
        for slot in &mut q[t1..] {
            *slot += total_prod;
        }
        let d = demand_or_zero(demand, p_new_id);
        let c_new = cost(&d, &q, missed_penalty, over_penalty);
        delta_j += c_new - cost_contributions.get(&p_new_id).copied().unwrap_or(0.0);
        product_updates.push((p_new_id, q, c_new));
    }

    Some(DeltaResult {
        delta_j,
        machine: mv.machine,
        t0,
        t1,
        product: mv.product,
        product_updates,
    })
}
