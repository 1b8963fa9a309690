use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde::{Deserialize, Serialize};
use shift_anneal::{
    config::{self, SolverParams},
    error::ScheduleError,
    forecast::{self, RawForecast, SalesForecast},
    io::{self, csv::HeaderMode, csv::WriteMode},
    machine::{Machine, ShiftPatternTable},
    problem::{Problem, SolverInputs},
    product::Assignment,
    solver::{self, SolveResult},
};
use std::collections::HashMap;

#[derive(Parser, Debug)]
#[command(about = "Schedule production across a fleet of machines via simulated annealing.")]
#[command(next_line_help = true)]
struct Args {
    /// Weekly sales forecast: a header row of product names, 5 rows of weekly targets.
    forecast: PathBuf,

    /// Machine assignments: `machine_id -> {shift_pattern, products}`, as JSON.
    machines: PathBuf,

    /// Machine-stats JSON (`machine_id -> {ideal_run_rate, ...}`). Falls back to the
    /// built-in defaults when omitted.
    #[arg(long)]
    machine_stats: Option<PathBuf>,

    /// Shift-pattern JSON (`pattern_name -> {day -> [24 numbers]}`). Falls back to the
    /// built-in `null`/`6-2`/`2-10`/`6-2 and 2-10` patterns when omitted.
    #[arg(long)]
    shift_patterns: Option<PathBuf>,

    /// Directory the schedule and convergence trace are written to.
    #[arg(long, default_value = "./output")]
    out_dir: PathBuf,

    /// RNG seed; fixing it makes the run byte-reproducible.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value_t = 10_000)]
    iterations: u64,

    #[arg(long, default_value_t = 100.0)]
    temperature: f64,

    #[arg(long, default_value_t = 0.995)]
    cooling_rate: f64,

    /// Percent chance (0-100) a proposed move idles the block instead of swapping products.
    #[arg(long, default_value_t = 5.0)]
    turn_off_pct: f64,

    #[arg(long, default_value_t = 8)]
    min_swap_hours: usize,

    #[arg(long, default_value_t = 1.0)]
    overproduction_penalty: f64,

    #[arg(long, default_value_t = 15.0)]
    missed_production_penalty: f64,
}

/// One machine's assignment in the machines config file: its shift pattern and the
/// products it may produce.
#[derive(Debug, Deserialize)]
struct MachineAssignment {
    shift_pattern: String,
    products: Vec<String>,
}

type MachinesConfig = HashMap<u32, MachineAssignment>;

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .expect("logger can only be initialised once");

    let args = Args::parse();

    match run(&args) {
        Ok(()) => process::exit(shift_anneal::error::exit_code::SUCCESS),
        Err(why) => {
            log::error!("{why}");
            process::exit(why.exit_code());
        }
    }
}

fn run(args: &Args) -> Result<(), ScheduleError> {
    log::info!("Loading configuration.");
    let stats = match &args.machine_stats {
        Some(path) => config::load_machine_stats(path)?,
        None => config::default_machine_stats(),
    };
    let patterns = match &args.shift_patterns {
        Some(path) => config::load_shift_patterns(path)?,
        None => ShiftPatternTable::with_defaults(),
    };
    let machines_config: MachinesConfig = io::json::read_json_from_file(&args.machines)?;

    let mut problem = Problem::new();
    for (&id, assignment) in &machines_config {
        let ideal_run_rate = stats
            .get(&id)
            .map(|s| s.ideal_run_rate)
            .ok_or_else(|| ScheduleError::MalformedForecast(format!("no stats for machine {id}")))?;
        let mask = patterns.get(&assignment.shift_pattern)?.clone();

        let mut machine = Machine::new(id, ideal_run_rate, mask);
        for product_name in &assignment.products {
            let product_id = problem.intern_product(product_name);
            machine.add_product(product_id)?;
        }
        problem.add_machine(machine)?;
    }

    log::info!("Reading and interpolating forecast from {}.", args.forecast.display());
    let raw = RawForecast::read_from_csv(&args.forecast)?;
    let curves = forecast::interpolate(&raw, problem.products_mut());
    problem.add_forecast(SalesForecast::Interpolated(curves))?;

    let inputs = problem.build()?;
    log::info!(
        "Built problem with {} machines and {} products.",
        inputs.machines.len(),
        inputs.products.len()
    );

    let params = SolverParams {
        iterations: args.iterations,
        temperature: args.temperature,
        cooling_rate: args.cooling_rate,
        turn_off_pct: args.turn_off_pct / 100.0,
        min_swap_hours: args.min_swap_hours,
        overproduction_penalty: args.overproduction_penalty,
        missed_production_penalty: args.missed_production_penalty,
    };

    log::info!("Running annealing for {} iterations.", params.iterations);
    let result = solver::solve(&inputs, &params, args.seed);
    log::info!("Best cost: {:.2} (final: {:.2}).", result.best_cost, result.final_cost);

    write_outputs(&args.out_dir, &inputs, &result)?;
    Ok(())
}

#[derive(Serialize)]
struct ScheduleRow {
    machine_id: u32,
    hour: usize,
    product: String,
}

#[derive(Serialize)]
struct TraceRow {
    iteration: u64,
    cost: f64,
}

fn write_outputs(
    out_dir: &std::path::Path,
    inputs: &SolverInputs,
    result: &SolveResult,
) -> Result<(), ScheduleError> {
    let mut schedule_rows = Vec::new();
    for machine in &inputs.machines {
        for (hour, assignment) in result.best_schedule.machine(machine.id).iter().enumerate() {
            let product = match assignment {
                Assignment::Idle => "IDLE".to_string(),
                Assignment::Product(id) => inputs.products.name_of(*id).to_string(),
            };
            schedule_rows.push(ScheduleRow {
                machine_id: machine.id,
                hour,
                product,
            });
        }
    }
    io::csv::write_to_file(
        out_dir.join("schedule.csv"),
        &schedule_rows,
        WriteMode::Replace,
        HeaderMode::Auto,
    )?;
    log::info!("Wrote {} schedule rows.", schedule_rows.len());

    let trace_rows: Vec<TraceRow> = result
        .trace
        .iter()
        .map(|&(iteration, cost)| TraceRow { iteration, cost })
        .collect();
    io::csv::write_to_file(
        out_dir.join("trace.csv"),
        &trace_rows,
        WriteMode::Replace,
        HeaderMode::Auto,
    )?;
    log::info!("Wrote {} trace rows.", trace_rows.len());

    Ok(())
}
