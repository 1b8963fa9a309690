//! Machines and shift patterns.

use std::collections::HashMap;

use crate::{error::ScheduleError, horizon::WEEK_HOURS, product::ProductId};

/// A weekly 7×24 run/idle grid, flattened row-major (day-major) into 168 hourly slots.
///
/// Values are typically `{0.0, 1.0}` but the model tolerates fractional utilisation in
/// `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftMask(pub [f64; WEEK_HOURS]);

impl ShiftMask {
    /// Builds a mask from a `day (0=Monday) -> 24 hourly values` map.
    ///
    /// Errs on any day key outside `0..=6`; a deserialized `HashMap<u8, [f64; 24]>` places
    /// no such bound on its keys.
    pub fn from_days(days: &HashMap<u8, [f64; 24]>) -> Result<Self, ScheduleError> {
        let mut flat = [0.0; WEEK_HOURS];
        for (&day, hours) in days {
            if day >= 7 {
                return Err(ScheduleError::InvalidShiftDay(day));
            }
            let base = day as usize * 24;
            flat[base..base + 24].copy_from_slice(hours);
        }
        Ok(ShiftMask(flat))
    }

    pub fn all_zero() -> Self {
        ShiftMask([0.0; WEEK_HOURS])
    }

    /// Hours `start..end` active on weekdays `0..=4` (Monday..Friday), zero elsewhere.
    fn weekday_window(start: usize, end: usize) -> Self {
        let mut flat = [0.0; WEEK_HOURS];
        for day in 0..5 {
            let base = day * 24;
            for h in start..end {
                flat[base + h] = 1.0;
            }
        }
        ShiftMask(flat)
    }
}

/// A named collection of shift masks, the `pattern_name -> mask` configuration table.
#[derive(Debug, Clone)]
pub struct ShiftPatternTable {
    patterns: HashMap<String, ShiftMask>,
}

impl ShiftPatternTable {
    pub fn new() -> Self {
        Self {
            patterns: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, mask: ShiftMask) {
        self.patterns.insert(name.into(), mask);
    }

    pub fn get(&self, name: &str) -> Result<&ShiftMask, ScheduleError> {
        self.patterns
            .get(name)
            .ok_or_else(|| ScheduleError::UnknownShiftPattern(name.to_string()))
    }

    /// The minimum recognised set of shift patterns: `null`, `6-2`, `2-10`, `6-2 and 2-10`.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.insert("null", ShiftMask::all_zero());
        table.insert("6-2", ShiftMask::weekday_window(6, 14));
        table.insert("2-10", ShiftMask::weekday_window(14, 22));

        let morning = ShiftMask::weekday_window(6, 14);
        let afternoon = ShiftMask::weekday_window(14, 22);
        let mut combined = [0.0; WEEK_HOURS];
        for i in 0..WEEK_HOURS {
            combined[i] = (morning.0[i] + afternoon.0[i]).min(1.0);
        }
        table.insert("6-2 and 2-10", ShiftMask(combined));

        table
    }
}

impl Default for ShiftPatternTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// A single production machine.
///
/// Only `ideal_run_rate` and `shift_mask` feed the productivity envelope; `stats` carries
/// the remaining machine-stats fields reserved for a future downtime simulation.
#[derive(Debug, Clone)]
pub struct Machine {
    pub id: u32,
    pub ideal_run_rate: f64,
    pub shift_mask: ShiftMask,
    products: Vec<ProductId>,
}

impl Machine {
    pub fn new(id: u32, ideal_run_rate: f64, shift_mask: ShiftMask) -> Self {
        Self {
            id,
            ideal_run_rate,
            shift_mask,
            products: Vec::new(),
        }
    }

    /// Assigns `product` to this machine. Errs on a repeated assignment of the same product.
    pub fn add_product(&mut self, product: ProductId) -> Result<(), ScheduleError> {
        if self.products.contains(&product) {
            return Err(ScheduleError::DuplicateProductAssignment(
                self.id,
                product.to_string(),
            ));
        }
        self.products.push(product);
        Ok(())
    }

    pub fn products(&self) -> &[ProductId] {
        &self.products
    }

    pub fn produces(&self, product: ProductId) -> bool {
        self.products.contains(&product)
    }
}

/// Reserved machine-stats fields not yet consumed by the core solver.
///
/// Carried for forward compatibility with a future downtime simulation; the solver reads
/// only `ideal_run_rate`.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct MachineStatsEntry {
    pub ideal_run_rate: f64,
    #[serde(default)]
    pub efficiency: f64,
    #[serde(default)]
    pub min_downtime_secs: u64,
    #[serde(default)]
    pub downtime_probability: f64,
    #[serde(default)]
    pub restart_probability: f64,
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn shift_pattern_6_2_covers_morning_weekdays_only() {
        let table = ShiftPatternTable::with_defaults();
        let mask = table.get("6-2").unwrap();
        // Monday 06:00 is active.
        assert_eq!(mask.0[6], 1.0);
        // Monday 05:00 is not.
        assert_eq!(mask.0[5], 0.0);
        // Saturday (day 5) is never active.
        assert_eq!(mask.0[5 * 24 + 6], 0.0);
    }

    #[test]
    fn combined_pattern_covers_both_windows() {
        let table = ShiftPatternTable::with_defaults();
        let morning = table.get("6-2").unwrap();
        let afternoon = table.get("2-10").unwrap();
        let combined = table.get("6-2 and 2-10").unwrap();
        for i in 0..WEEK_HOURS {
            let expected = if morning.0[i] > 0.0 || afternoon.0[i] > 0.0 {
                1.0
            } else {
                0.0
            };
            assert_eq!(combined.0[i], expected);
        }
    }

    #[test]
    fn null_pattern_is_all_zero() {
        let table = ShiftPatternTable::with_defaults();
        assert_eq!(*table.get("null").unwrap(), ShiftMask::all_zero());
    }

    #[test]
    fn unknown_pattern_is_an_error() {
        let table = ShiftPatternTable::with_defaults();
        assert!(matches!(
            table.get("nope"),
            Err(ScheduleError::UnknownShiftPattern(_))
        ));
    }

    #[test]
    fn duplicate_product_assignment_errs() {
        let mut machine = Machine::new(1, 100.0, ShiftMask::all_zero());
        machine.add_product(0).unwrap();
        assert!(matches!(
            machine.add_product(0),
            Err(ScheduleError::DuplicateProductAssignment(1, _))
        ));
    }

    #[test]
    fn from_days_rejects_a_day_outside_0_6() {
        let mut days = HashMap::new();
        days.insert(7u8, [1.0; 24]);
        assert!(matches!(
            ShiftMask::from_days(&days),
            Err(ScheduleError::InvalidShiftDay(7))
        ));
    }

    #[test]
    fn from_days_accepts_every_valid_weekday() {
        let mut days = HashMap::new();
        for day in 0..7u8 {
            days.insert(day, [1.0; 24]);
        }
        let mask = ShiftMask::from_days(&days).unwrap();
        assert!(mask.0.iter().all(|&v| v == 1.0));
    }

    #[rstest]
    #[case::null("null", 0)]
    #[case::six_to_two("6-2", 8 * 5)]
    #[case::two_to_ten("2-10", 8 * 5)]
    #[case::combined("6-2 and 2-10", 16 * 5)]
    fn default_pattern_has_expected_weekly_hours(#[case] name: &str, #[case] expected_hours: usize) {
        let table = ShiftPatternTable::with_defaults();
        let mask = table.get(name).unwrap();
        let active = mask.0.iter().filter(|&&v| v > 0.0).count();
        assert_eq!(active, expected_hours);
    }
}
