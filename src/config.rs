//! Static and per-run configuration.
//!
//! Machine stats and shift patterns are read as JSON (teacher's `io::json`); a small set
//! of built-in defaults mirrors the original system's baked-in `config.py` module for
//! quick experimentation without a config file on disk.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::ScheduleError,
    io,
    machine::{MachineStatsEntry, ShiftMask, ShiftPatternTable},
};

pub type MachineStatsConfig = HashMap<u32, MachineStatsEntry>;

pub fn load_machine_stats(path: &Path) -> Result<MachineStatsConfig, ScheduleError> {
    Ok(io::json::read_json_from_file(path)?)
}

pub fn default_machine_stats() -> MachineStatsConfig {
    let mut stats = HashMap::new();
    stats.insert(
        1,
        MachineStatsEntry {
            ideal_run_rate: 100.0,
            efficiency: 0.85,
            min_downtime_secs: 20,
            downtime_probability: 0.04,
            restart_probability: 0.3,
        },
    );
    stats.insert(
        2,
        MachineStatsEntry {
            ideal_run_rate: 100.0,
            efficiency: 0.9,
            min_downtime_secs: 120,
            downtime_probability: 0.02,
            restart_probability: 0.3,
        },
    );
    stats.insert(
        3,
        MachineStatsEntry {
            ideal_run_rate: 100.0,
            efficiency: 0.75,
            min_downtime_secs: 50,
            downtime_probability: 0.01,
            restart_probability: 0.3,
        },
    );
    stats.insert(
        4,
        MachineStatsEntry {
            ideal_run_rate: 100.0,
            efficiency: 0.6,
            min_downtime_secs: 10,
            downtime_probability: 0.06,
            restart_probability: 0.3,
        },
    );
    stats
}

/// Raw JSON shape for a shift-pattern table: `pattern_name -> {day -> [24 numbers]}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShiftPatternConfig(HashMap<String, HashMap<u8, [f64; 24]>>);

pub fn load_shift_patterns(path: &Path) -> Result<ShiftPatternTable, ScheduleError> {
    let raw: ShiftPatternConfig = io::json::read_json_from_file(path)?;
    let mut table = ShiftPatternTable::new();
    for (name, days) in raw.0 {
        table.insert(name, ShiftMask::from_days(&days)?);
    }
    Ok(table)
}

/// Per-run solver tunables (§6 of the system spec).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SolverParams {
    pub iterations: u64,
    pub temperature: f64,
    pub cooling_rate: f64,
    /// Percent chance of a proposed move being `IDLE`, already divided by 100.
    pub turn_off_pct: f64,
    pub min_swap_hours: usize,
    pub overproduction_penalty: f64,
    pub missed_production_penalty: f64,
}

impl SolverParams {
    /// Builds solver params from a raw `turn_off_pct` expressed as a percentage (0..=100).
    pub fn new(iterations: u64, temperature: f64, cooling_rate: f64, turn_off_pct_percent: f64) -> Self {
        Self {
            iterations,
            temperature,
            cooling_rate,
            turn_off_pct: turn_off_pct_percent / 100.0,
            min_swap_hours: 8,
            overproduction_penalty: 1.0,
            missed_production_penalty: 15.0,
        }
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        Self::new(10_000, 100.0, 0.995, 5.0)
    }
}
