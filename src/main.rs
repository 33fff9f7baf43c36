use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use orbit_sim::io::{csv, json, RunSummary};
use orbit_sim::physics::constants::AU;
use orbit_sim::{Scenario, SimResult, Simulation};

/// Run an N-body orbit simulation and report energies and orbital elements.
#[derive(Parser, Debug)]
#[command(name = "orbit-sim", version, about)]
struct Cli {
    /// Scenario JSON ({ "config": {...}, "bodies": [...] }); defaults to Mercury..Mars
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Number of steps to run
    #[arg(long, default_value_t = 24 * 365)]
    steps: usize,

    /// Override the integration time step (s)
    #[arg(long)]
    time_step: Option<f64>,

    /// Override the speed multiplier
    #[arg(long)]
    speed: Option<f64>,

    /// Write the step history as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the final report as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Print this body's trajectory window as CSV instead of the report
    #[arg(long, value_name = "BODY")]
    trajectory: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> SimResult<()> {
    let mut scenario = match &cli.scenario {
        Some(path) => Scenario::from_json_file(path)?,
        None => Scenario::inner_planets(),
    };
    if let Some(dt) = cli.time_step {
        scenario.config.time_step = dt;
    }
    if let Some(speed) = cli.speed {
        scenario.config.speed_multiplier = speed;
    }

    let mut sim = Simulation::from_scenario(&scenario)?;
    let e0 = sim.total_energy();

    sim.start();
    sim.advance(cli.steps);
    sim.stop();
    info!(steps = cli.steps, time = sim.time(), "run complete");

    if let Some(path) = &cli.csv {
        csv::write_history_file(path, sim.history())?;
        info!(path = %path.display(), rows = sim.history().len(), "history written");
    }

    if let Some(name) = &cli.trajectory {
        let report = sim.trajectory(name)?;
        csv::write_trajectory(&mut std::io::stdout().lock(), &report.trajectory)?;
        return Ok(());
    }

    let summary = RunSummary::from_simulation(&sim);
    if cli.json {
        json::write_pretty(&mut std::io::stdout().lock(), &summary)?;
    } else {
        print_report(&sim, &summary, e0);
    }
    Ok(())
}

fn print_report(sim: &Simulation, summary: &RunSummary, e0: f64) {
    let days = sim.time() / 86_400.0;

    println!();
    println!("====================================================================");
    println!("  ORBIT SIMULATION — {} bodies, {:.1} days", sim.bodies().len(), days);
    println!("====================================================================");
    println!();

    println!("  Orbital Elements");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:<10} {:>9} {:>9} {:>8} {:>8} {:>8} {:>10}",
        "body", "a (AU)", "e", "i (deg)", "w (deg)", "nu (deg)", "T (days)"
    );
    for (name, el) in &summary.orbital_elements {
        println!(
            "  {:<10} {:>9.4} {:>9.5} {:>8.3} {:>8.2} {:>8.2} {:>10.2}",
            name,
            el.semi_major_axis / AU,
            el.eccentricity,
            el.inclination,
            el.argument_of_periapsis,
            el.true_anomaly,
            el.period / 86_400.0,
        );
    }
    println!();

    println!("  Energy (J)");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  {:<10} {:>14} {:>14} {:>14}", "body", "kinetic", "potential", "total");
    for (name, e) in &summary.energy {
        println!(
            "  {:<10} {:>14.4e} {:>14.4e} {:>14.4e}",
            name, e.kinetic_energy, e.potential_energy, e.total_energy
        );
    }
    let e1 = sim.total_energy();
    println!();
    println!("  Total energy drift: {:.3e} (relative)", ((e1 - e0) / e0).abs());
    println!();
    println!(
        "  Simulation: {} steps kept in history, dt={} s",
        summary.history_len,
        sim.config().effective_dt()
    );
    println!("====================================================================");
    println!();
}
