//! Interactive viewer for OrbSim
//!
//! Draws a top-down (x, y) projection of the box with orbs painted back to
//! front by z. All input is turned into [`Command`]s so it lands on the next
//! tick boundary.
//!
//! Keys: `r` random orb, `d` default orb, `m` many mini orbs, `e` select
//! previous, `f` follow selected, `w` merge mode, `s` run/pause, `x` reset,
//! `c` remove all.

use eframe::egui;
use glam::DVec3;
use orbsim_core::spawn::MINI_COUNT;
use orbsim_core::{get_body_states, BodyEdit, BodyState, Command, Simulation};

const BOX_COLOR: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 64, 64, 128);

pub struct ViewerApp {
    sim: Simulation,
    speed_multiplier: f32,
}

impl ViewerApp {
    pub fn new(sim: Simulation, _cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            sim,
            speed_multiplier: 1.0,
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let bindings = [
            (egui::Key::R, Command::SpawnRandom),
            (egui::Key::D, Command::SpawnDefault),
            (egui::Key::M, Command::SpawnManyMini(MINI_COUNT)),
            (egui::Key::E, Command::SelectPrevious),
            (egui::Key::X, Command::Reset),
            (egui::Key::C, Command::Clear),
            (egui::Key::W, Command::SetMergeMode(!self.sim.merge_mode())),
            (egui::Key::S, Command::SetRunning(!self.sim.is_running())),
            (egui::Key::F, Command::SetFollowCamera(!self.sim.follow_camera())),
        ];
        for (key, command) in bindings {
            if ctx.input(|i| i.key_pressed(key)) {
                self.sim.enqueue(command);
            }
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let running = self.sim.is_running();
            if ui.button(if running { "⏸ Pause" } else { "▶ Play" }).clicked() {
                self.sim.enqueue(Command::SetRunning(!running));
            }

            if ui.button("⏮ Reset").clicked() {
                self.sim.enqueue(Command::Reset);
            }

            ui.separator();

            let mut merge = self.sim.merge_mode();
            if ui.checkbox(&mut merge, "Merge").changed() {
                self.sim.enqueue(Command::SetMergeMode(merge));
            }

            let mut follow = self.sim.follow_camera();
            if ui.checkbox(&mut follow, "Follow").changed() {
                self.sim.enqueue(Command::SetFollowCamera(follow));
            }

            ui.separator();

            ui.label("Speed:");
            ui.add(egui::Slider::new(&mut self.speed_multiplier, 1.0..=10.0));

            ui.separator();

            ui.label(format!(
                "Orbs: {}  Tick: {}  Mass: {:.1}",
                self.sim.len(),
                self.sim.ticks(),
                self.sim.total_mass()
            ));
        });
    }

    /// Slider panel for the selected orb
    fn sliders(&mut self, ui: &mut egui::Ui) {
        let Some(body) = self.sim.selected_body() else {
            ui.label("No orb selected (r: random, d: default, e: previous)");
            return;
        };
        let bounds = self.sim.config().bounds;
        let mut mass = body.mass;
        let mut radius = body.radius;
        let mut position = body.position;
        let mut velocity = body.velocity;
        let mut acceleration = body.acceleration;
        let mut changed = false;

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                changed |= ui
                    .add(
                        egui::Slider::new(&mut mass, 0.1..=10_000.0)
                            .logarithmic(true)
                            .clamp_to_range(false)
                            .text("Mass"),
                    )
                    .changed();
                changed |= ui
                    .add(
                        egui::Slider::new(&mut radius, 1.0..=100.0)
                            .clamp_to_range(false)
                            .text("Radius"),
                    )
                    .changed();
            });
            changed |= vector_sliders(ui, "Pos", &mut position, bounds);
            changed |= vector_sliders(ui, "Vel", &mut velocity, DVec3::splat(5.0));
            changed |= vector_sliders(ui, "Acc", &mut acceleration, DVec3::splat(1.0));
        });

        if changed {
            self.sim.enqueue(Command::EditSelected(BodyEdit {
                mass: Some(mass),
                radius: Some(radius),
                position: Some(position),
                velocity: Some(velocity),
                acceleration: Some(acceleration),
            }));
        }
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click());
        let rect = response.rect;
        let bounds = self.sim.config().bounds;

        // Map world (x, y) onto the panel; y grows downward like the canvas
        let fit_x = rect.width() as f64 / (2.0 * bounds.x);
        let fit_y = rect.height() as f64 / (2.0 * bounds.y);
        let scale = (fit_x.min(fit_y) * 0.9) as f32;
        let focus = self
            .sim
            .camera_target()
            .map(|camera| camera.target)
            .unwrap_or(DVec3::ZERO);
        let center = rect.center();
        let to_screen = |p: DVec3| {
            center + egui::vec2(((p.x - focus.x) as f32) * scale, ((p.y - focus.y) as f32) * scale)
        };

        let box_rect = egui::Rect::from_two_pos(
            to_screen(DVec3::new(-bounds.x, -bounds.y, 0.0)),
            to_screen(DVec3::new(bounds.x, bounds.y, 0.0)),
        );
        painter.rect_stroke(box_rect, 0.0, egui::Stroke::new(2.0, BOX_COLOR));

        let mut states = get_body_states(&self.sim);
        states.sort_by(|a, b| a.position.z.total_cmp(&b.position.z));
        for state in &states {
            let pos = to_screen(state.position);
            let radius = (state.radius as f32 * scale).max(1.5);
            painter.circle_filled(pos, radius, orb_color(state));
        }

        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                // Front-most orb under the pointer
                let hit = states.iter().rev().find(|state| {
                    let radius = (state.radius as f32 * scale).max(4.0);
                    to_screen(state.position).distance(pointer) <= radius
                });
                if let Some(state) = hit {
                    self.sim.enqueue(Command::Select(Some(state.id)));
                }
            }
        }
    }
}

fn orb_color(state: &BodyState) -> egui::Color32 {
    if state.selected {
        egui::Color32::WHITE
    } else {
        egui::Color32::from_rgb(state.color.r, state.color.g, state.color.b)
    }
}

fn vector_sliders(ui: &mut egui::Ui, label: &str, value: &mut DVec3, range: DVec3) -> bool {
    let mut changed = false;
    ui.vertical(|ui| {
        for (axis, name) in ["X", "Y", "Z"].iter().enumerate() {
            let limit = range[axis];
            changed |= ui
                .add(
                    egui::Slider::new(&mut value[axis], -limit..=limit)
                        .clamp_to_range(false)
                        .text(format!("{} {}", label, name)),
                )
                .changed();
        }
    });
    changed
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));
        egui::TopBottomPanel::bottom("sliders").show(ctx, |ui| self.sliders(ui));
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| self.canvas(ui));

        // Ticks run paused too, so queued input is always applied
        let steps_per_frame = self.speed_multiplier.max(1.0).round() as usize;
        for _ in 0..steps_per_frame {
            self.sim.tick();
        }

        ctx.request_repaint();
    }
}
