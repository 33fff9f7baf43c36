use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::SimResult;
use crate::orbital::elements::ElementsReport;
use crate::sim::simulator::Simulation;
use crate::sim::snapshot::{EnergyBreakdown, SimulationState};

/// End-of-run report: final state plus the derived analytics.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub state: SimulationState,
    pub energy: BTreeMap<String, EnergyBreakdown>,
    pub orbital_elements: BTreeMap<String, ElementsReport>,
    pub history_len: usize,
}

impl RunSummary {
    pub fn from_simulation(sim: &Simulation) -> Self {
        let orbital_elements = sim.bodies()[1..]
            .iter()
            .filter_map(|b| {
                sim.orbital_elements(&b.name)
                    .ok()
                    .map(|el| (b.name.clone(), el.report()))
            })
            .collect();

        RunSummary {
            state: sim.state(),
            energy: sim.energy_analysis(),
            orbital_elements,
            history_len: sim.history().len(),
        }
    }
}

/// Write any payload as pretty-printed JSON followed by a newline.
pub fn write_pretty<W: Write, T: Serialize>(writer: &mut W, value: &T) -> SimResult<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_summary_file(path: impl AsRef<Path>, summary: &RunSummary) -> SimResult<()> {
    let mut file = std::fs::File::create(path)?;
    write_pretty(&mut file, summary)
}
