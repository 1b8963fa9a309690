//! The problem-assembly layer: collects machines and a forecast, validates them, and
//! hands a ready-to-solve bundle to the rest of the pipeline.

use std::collections::HashSet;

use crate::{
    error::ScheduleError,
    forecast::{DemandCurves, SalesForecast},
    machine::Machine,
    product::ProductTable,
};

/// Everything the solver needs, validated and immutable for the run.
#[derive(Debug)]
pub struct SolverInputs {
    pub products: ProductTable,
    pub machines: Vec<Machine>,
    pub demand: DemandCurves,
}

/// Collects machines and a forecast, mirroring the original `Problem` class and its
/// `build()` validation step.
#[derive(Debug, Default)]
pub struct Problem {
    products: ProductTable,
    machines: Vec<Machine>,
    machine_ids: HashSet<u32>,
    forecast: Option<SalesForecast>,
}

impl Problem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a product name against this problem's product table. Use this to obtain
    /// the [`crate::product::ProductId`] to assign to a machine before calling
    /// [`Problem::add_machine`].
    pub fn intern_product(&mut self, name: &str) -> crate::product::ProductId {
        self.products.intern(name)
    }

    /// Direct access to the underlying product table, e.g. to hand to
    /// [`crate::forecast::interpolate`] so forecast rows intern against the same table
    /// the machines were built against.
    pub fn products_mut(&mut self) -> &mut ProductTable {
        &mut self.products
    }

    pub fn add_machine(&mut self, machine: Machine) -> Result<(), ScheduleError> {
        if !self.machine_ids.insert(machine.id) {
            return Err(ScheduleError::DuplicateMachineId(machine.id));
        }
        self.machines.push(machine);
        Ok(())
    }

    /// Attaches a forecast. The forecast must already be interpolated.
    pub fn add_forecast(&mut self, forecast: SalesForecast) -> Result<(), ScheduleError> {
        if matches!(forecast, SalesForecast::Raw(_)) {
            return Err(ScheduleError::ForecastNotInterpolated);
        }
        self.forecast = Some(forecast);
        Ok(())
    }

    /// Validates the accumulated machines and forecast, producing the immutable bundle
    /// the solver consumes.
    pub fn build(self) -> Result<SolverInputs, ScheduleError> {
        for machine in &self.machines {
            if machine.products().is_empty() {
                return Err(ScheduleError::EmptyProductSet(machine.id));
            }
        }

        let demand = match self.forecast {
            Some(forecast) => forecast.into_curves()?,
            None => DemandCurves::new(),
        };

        Ok(SolverInputs {
            products: self.products,
            machines: self.machines,
            demand,
        })
    }
}
