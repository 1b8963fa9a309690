//! Construction of a random feasible initial schedule.

use rand::Rng;

use crate::{
    forecast::DemandCurves,
    machine::Machine,
    product::Assignment,
    productivity::Envelopes,
    schedule::{compute_cost_contributions, compute_production_curves, CostContributions, ProductionCurves, Schedule},
    swap_sites::SwapSiteSets,
};

pub struct InitialSolution {
    pub schedule: Schedule,
    pub production: ProductionCurves,
    pub cost: CostContributions,
}

/// For every machine and every legal swap site, writes a uniformly random product from
/// that machine's producible set over the site's block, then derives `Q` and `C` from
/// scratch.
pub fn build(
    rng: &mut impl Rng,
    machines: &[Machine],
    swap_sites: &SwapSiteSets,
    envelopes: &Envelopes,
    demand: &DemandCurves,
    min_swap_hours: usize,
    missed_penalty: f64,
    over_penalty: f64,
) -> InitialSolution {
    let mut schedule = Schedule::idle(machines.iter().map(|m| m.id));

    for machine in machines {
        let products = machine.products();
        if products.is_empty() {
            continue;
        }
        for &start in &swap_sites[&machine.id] {
            let product = products[rng.gen_range(0..products.len())];
            schedule.set_block(machine.id, start, start + min_swap_hours, Assignment::Product(product));
        }
    }

    let production = compute_production_curves(&schedule, envelopes, demand.keys().copied());
    let cost = compute_cost_contributions(demand, &production, missed_penalty, over_penalty);

    InitialSolution {
        schedule,
        production,
        cost,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{machine::ShiftMask, productivity::build_envelopes, swap_sites::build_swap_sites};
    use rand::SeedableRng;
    use rand_pcg::Pcg64;
    use std::collections::HashMap;

    #[test]
    fn initial_solution_only_assigns_producible_products() {
        let mut mask = ShiftMask::all_zero();
        for h in 0..168 {
            mask.0[h] = 1.0;
        }
        let mut machine = Machine::new(1, 10.0, mask);
        machine.add_product(0).unwrap();
        let machines = vec![machine];
        let envelopes = build_envelopes(&machines);
        let sites = build_swap_sites(&envelopes, 8);
        let mut demand = HashMap::new();
        demand.insert(0u32, vec![0.0; crate::horizon::H]);

        let mut rng = Pcg64::seed_from_u64(42);
        let solution = build(&mut rng, &machines, &sites, &envelopes, &demand, 8, 15.0, 1.0);

        for &t in &sites[&1] {
            assert_eq!(solution.schedule.get(1, t), Assignment::Product(0));
        }
    }
}
