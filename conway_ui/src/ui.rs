// ui.rs - egui front end; reads a snapshot per frame and forwards input

use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};

use conway::{GridDimensions, PATTERNS, Simulation, Tool};

const TILE_SIZE: f32 = 20.0;
const SPACING: f32 = 1.0;

pub struct LifeApp {
    simulation: Simulation,
    selected_pattern: usize,
    hovered: Option<(usize, usize)>,
}

impl LifeApp {
    pub fn new(simulation: Simulation) -> Self {
        Self {
            simulation,
            selected_pattern: 0,
            hovered: None,
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut tool = self.simulation.tool();
            ui.selectable_value(&mut tool, Tool::Brush, "🖌 Brush");
            ui.selectable_value(&mut tool, Tool::Pen, "✏ Pen");
            self.simulation.set_tool(tool);

            ui.separator();

            let running = self.simulation.is_running();
            if ui.button(if running { "⏸ Stop" } else { "▶ Start" }).clicked() {
                self.simulation.toggle_running();
            }

            if ui.add_enabled(!running, egui::Button::new("⏭ Step")).clicked() {
                self.simulation.step();
            }

            let dims = self.simulation.dimensions();
            if ui.button("🎲 Random").clicked() {
                let threshold = self.simulation.threshold();
                if let Err(err) = self.simulation.randomize(dims, threshold) {
                    tracing::warn!(%err, "randomize failed");
                }
            }

            if ui.button("⏹ Clear").clicked() {
                self.simulation.clear(dims);
            }
        });

        ui.horizontal(|ui| {
            let current = self.simulation.dimensions();
            let mut selected = current;
            ui.label("Grid size:");
            egui::ComboBox::from_id_source("grid_size")
                .selected_text(current.to_string())
                .show_ui(ui, |ui| {
                    for preset in GridDimensions::PRESETS {
                        ui.selectable_value(&mut selected, preset, preset.to_string());
                    }
                });
            if selected != current {
                self.simulation.resize(selected);
            }

            ui.separator();

            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });
            if ui.button("Apply Pattern").clicked() {
                self.simulation.load_pattern(&PATTERNS[self.selected_pattern]);
            }

            ui.separator();
            ui.label(format!("Generation: {}", self.simulation.generation()));
        });
    }

    fn board(&mut self, ui: &mut egui::Ui) {
        let snapshot = self.simulation.snapshot();
        let dims = snapshot.grid.dimensions();
        let pitch = TILE_SIZE + SPACING;
        let size = Vec2::new(
            pitch * dims.columns() as f32 - SPACING,
            pitch * dims.rows() as f32 - SPACING,
        );

        let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 0.0, Color32::from_gray(200));

        for (r, row) in snapshot.grid.rows().iter().enumerate() {
            for (c, &alive) in row.iter().enumerate() {
                let rect = Rect::from_min_size(
                    origin + Vec2::new(c as f32 * pitch, r as f32 * pitch),
                    Vec2::splat(TILE_SIZE),
                );
                let fill = if alive { Color32::BLACK } else { Color32::WHITE };
                painter.rect_filled(rect, 0.0, fill);
                painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::BLACK));
            }
        }

        let cell_at = |pos: Pos2| -> Option<(usize, usize)> {
            let rel = pos - origin;
            if rel.x < 0.0 || rel.y < 0.0 {
                return None;
            }
            let (row, col) = ((rel.y / pitch) as usize, (rel.x / pitch) as usize);
            dims.contains(row, col).then_some((row, col))
        };

        if response.clicked() {
            if let Some((row, col)) = response.interact_pointer_pos().and_then(cell_at) {
                if let Err(err) = self.simulation.click_cell(row, col) {
                    tracing::warn!(%err, "edit rejected");
                }
            }
        }

        // Brush strokes paint each cell the pointer enters.
        let hovered = response.hover_pos().and_then(cell_at);
        if hovered != self.hovered {
            if let Some((row, col)) = hovered {
                if let Err(err) = self.simulation.hover_cell(row, col) {
                    tracing::warn!(%err, "edit rejected");
                }
            }
            self.hovered = hovered;
        }

        ui.separator();

        let live = snapshot.grid.population();
        let total = dims.cell_count();
        ui.horizontal(|ui| {
            ui.label(format!("Live cells: {}", live));
            ui.label(format!("Dead cells: {}", total - live));
            ui.label(format!("Population: {:.1}%", live as f32 / total as f32 * 100.0));
        });
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");
            self.controls(ui);
            ui.separator();

            let hint = match self.simulation.tool() {
                Tool::Brush if self.simulation.is_drawing() => "Drawing: move over cells to paint, click to stop.",
                Tool::Brush => "Brush: click a cell to start painting.",
                Tool::Pen => "Pen: click a cell to toggle it.",
            };
            ui.label(hint);
            ui.separator();

            self.board(ui);
        });
    }
}
