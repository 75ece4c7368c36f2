use crate::PaintApp;
use crate::color::parse_color;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.separator();

            // Palette
            ui.label("Color:");
            let palette = app.config().palette.clone();
            ui.horizontal_wrapped(|ui| {
                for spec in &palette {
                    let Ok(color) = parse_color(spec) else {
                        continue;
                    };
                    let stroke = if app.selected_color() == spec.as_str() {
                        egui::Stroke::new(2.0, ui.visuals().selection.stroke.color)
                    } else {
                        egui::Stroke::NONE
                    };
                    let button = egui::Button::new("")
                        .fill(color)
                        .stroke(stroke)
                        .min_size(egui::vec2(24.0, 24.0));
                    if ui.add(button).on_hover_text(spec).clicked() {
                        log::info!("Color selected from UI: {}", spec);
                        app.select_color(spec);
                    }
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Brush size:");
                let mut size = app.brush_size();
                if ui.add(egui::Slider::new(&mut size, 1.0..=50.0)).changed() {
                    app.set_brush_size(size);
                }
            });

            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.surface().can_undo();
                let can_redo = app.surface().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });

            ui.horizontal(|ui| {
                ui.label(format!("Strokes: {}", app.surface().committed_strokes().len()));
                ui.label(format!("Undone: {}", app.surface().undo_stack().len()));
            });

            ui.separator();

            ui.horizontal(|ui| {
                let exporting = app.is_exporting();
                if ui.add_enabled(!exporting, egui::Button::new("Export PNG")).clicked() {
                    app.start_export();
                }
                if exporting {
                    ui.spinner();
                }
            });
            ui.label("Drop an image file to use it as background.");

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
}
