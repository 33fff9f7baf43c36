use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points};

use orbit_sim::physics::constants::AU;
use orbit_sim::{Scenario, Simulation};

const STEPS_PER_FRAME: usize = 24;

fn main() -> eframe::Result {
    let mut sim = match Simulation::from_scenario(&Scenario::inner_planets()) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("failed to build scenario: {e}");
            std::process::exit(1);
        }
    };
    sim.start();

    let app = OrbitViz { e0: sim.total_energy(), sim, energy: Vec::new() };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Orbit Simulator", options, Box::new(|_| Ok(Box::new(app))))
}

struct OrbitViz {
    sim: Simulation,
    e0: f64,
    energy: Vec<[f64; 2]>, // (days, relative drift)
}

impl eframe::App for OrbitViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.sim.is_running() {
            self.sim.advance(STEPS_PER_FRAME);
            let drift = (self.sim.total_energy() - self.e0) / self.e0;
            self.energy.push([self.sim.time() / 86_400.0, drift]);
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("t = {:.1} days", self.sim.time() / 86_400.0));
                let label = if self.sim.is_running() { "Stop" } else { "Start" };
                if ui.button(label).clicked() {
                    if self.sim.is_running() {
                        self.sim.stop();
                    } else {
                        self.sim.start();
                    }
                }
                if ui.button("Reset").clicked() {
                    if let Ok(sim) = Simulation::from_scenario(&Scenario::inner_planets()) {
                        self.sim = sim;
                        self.e0 = self.sim.total_energy();
                        self.energy.clear();
                    }
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;

            ui.horizontal(|ui| {
                // Orbits in the x/y plane
                ui.vertical(|ui| {
                    ui.label("Trajectories (AU)");
                    Plot::new("orbits")
                        .width(half_w)
                        .height(available.y - 24.0)
                        .data_aspect(1.0)
                        .show(ui, |plot_ui| {
                            for body in self.sim.bodies() {
                                let points: PlotPoints = body
                                    .trajectory()
                                    .iter()
                                    .map(|p| [p.x / AU, p.y / AU])
                                    .collect();
                                plot_ui.line(Line::new(body.name.clone(), points));
                                plot_ui.points(
                                    Points::new(
                                        body.name.clone(),
                                        vec![[body.position.x / AU, body.position.y / AU]],
                                    )
                                    .radius(4.0),
                                );
                            }
                        });
                });

                // Energy drift vs time
                ui.vertical(|ui| {
                    ui.label("Relative energy drift");
                    let points: PlotPoints = self.energy.iter().copied().collect();
                    Plot::new("energy")
                        .width(half_w)
                        .height(available.y - 24.0)
                        .x_axis_label("Time (days)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("dE/E0", points));
                        });
                });
            });
        });
    }
}
