use egui::{CursorIcon, Key, Pos2, Sense, Slider, Vec2};
use log::{error, info};

use crate::engine::Engine;
use crate::export::ExportFormat;
use crate::surface::PainterSurface;

/// Scale factor used when exporting the drawing to PNG.
const EXPORT_SCALE: f32 = 2.0;

/// The eframe shell around the engine: panels, sliders and pointer routing.
/// Everything interesting happens inside [`Engine`]; this layer only
/// translates egui input into engine operations and paints the result.
pub struct DoodleApp {
    engine: Engine,
    sticker_input: String,
    canvas_size: Vec2,
    last_pointer_pos: Option<Pos2>,
}

impl Default for DoodleApp {
    fn default() -> Self {
        Self {
            engine: Engine::new(),
            sticker_input: String::new(),
            canvas_size: Vec2::new(256.0, 256.0),
            last_pointer_pos: None,
        }
    }
}

impl DoodleApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    fn tools_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Doodle Pad");
        ui.separator();

        let labels: Vec<(usize, String)> = self
            .engine
            .tools()
            .tools()
            .iter()
            .enumerate()
            .map(|(i, t)| (i, t.label()))
            .collect();
        let selected = self.engine.tools().selected_index();
        for (i, label) in labels {
            if ui.selectable_label(selected == i, label).clicked() {
                self.engine.select_tool(i);
            }
        }

        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.sticker_input);
            if ui.button("Add sticker").clicked() && !self.sticker_input.trim().is_empty() {
                let index = self.engine.add_user_sticker(self.sticker_input.trim());
                self.engine.select_tool(index);
                self.sticker_input.clear();
            }
        });

        ui.separator();

        let mut width = self.engine.style().line_width;
        ui.horizontal(|ui| {
            ui.label("Width:");
            if ui.add(Slider::new(&mut width, 1.0..=10.0)).changed() {
                self.engine.set_line_width(width);
            }
        });

        let sticker_mode = self.engine.tools().sticker_mode();
        if sticker_mode {
            let mut rotation = self.engine.style().rotation_deg;
            ui.horizontal(|ui| {
                ui.label("Rotation:");
                if ui.add(Slider::new(&mut rotation, 0.0..=360.0)).changed() {
                    self.engine.set_rotation(rotation);
                }
            });
        } else {
            let mut color = self.engine.style().color;
            ui.horizontal(|ui| {
                ui.label("Color:");
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    self.engine.set_color(color);
                }
            });
        }

        ui.separator();

        ui.horizontal(|ui| {
            let history = self.engine.history();
            let (can_undo, can_redo, can_clear) =
                (history.can_undo(), history.can_redo(), !history.is_empty());
            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                self.engine.undo();
            }
            if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                self.engine.redo();
            }
            if ui.add_enabled(can_clear, egui::Button::new("Clear")).clicked() {
                self.engine.clear();
            }
        });

        if ui.button("Export PNG").clicked() {
            self.export_png();
        }
    }

    fn export_png(&self) {
        match self
            .engine
            .export(self.canvas_size, EXPORT_SCALE, ExportFormat::Png)
        {
            Ok(bytes) => match std::fs::write("doodle.png", &bytes) {
                Ok(()) => info!("wrote doodle.png ({} bytes)", bytes.len()),
                Err(err) => error!("could not write doodle.png: {err}"),
            },
            Err(err) => error!("export failed: {err}"),
        }
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
        let rect = response.rect;
        self.canvas_size = rect.size();

        if response.hovered() {
            // The preview mark replaces the OS cursor over the canvas.
            ui.ctx().set_cursor_icon(CursorIcon::None);
        }

        let pointer = response
            .interact_pointer_pos()
            .or_else(|| response.hover_pos())
            .filter(|pos| rect.contains(*pos));
        match pointer {
            Some(screen_pos) => {
                let pos = (screen_pos - rect.min).to_pos2();
                if response.drag_started() {
                    self.engine.pointer_down(pos);
                }
                if self.last_pointer_pos != Some(pos) {
                    self.engine.pointer_move(pos);
                }
                if response.drag_stopped() {
                    self.engine.pointer_up();
                }
                self.last_pointer_pos = Some(pos);
            }
            None => {
                if self.last_pointer_pos.is_some() {
                    self.engine.pointer_leave();
                    self.last_pointer_pos = None;
                }
            }
        }

        // egui repaints the whole panel every frame, so the incremental
        // damage from pointer_move is ignored here; the overlay pass
        // replays everything.
        let mut surface = PainterSurface::new(&painter, rect);
        self.engine.preview_overlay(&mut surface);
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (undo, redo) = ctx.input(|i| {
            (
                i.modifiers.command && !i.modifiers.shift && i.key_pressed(Key::Z),
                i.modifiers.command && (i.key_pressed(Key::Y) || (i.modifiers.shift && i.key_pressed(Key::Z))),
            )
        });
        if undo {
            self.engine.undo();
        }
        if redo {
            self.engine.redo();
        }
    }
}

impl eframe::App for DoodleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        egui::SidePanel::left("tools_panel")
            .resizable(false)
            .show(ctx, |ui| self.tools_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.canvas(ui));
    }
}
