use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let canvas_rect = response.rect;

            app.layout_canvas(canvas_rect, ctx.pixels_per_point());
            app.handle_input(ctx);

            // Render the canvas
            if let Some(texture_id) = app.refresh_texture(ctx) {
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(texture_id, canvas_rect, uv, egui::Color32::WHITE);
            }
        });
}
