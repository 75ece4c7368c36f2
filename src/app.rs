use std::path::Path;

use egui::{Key, KeyboardShortcut, Modifiers, Rect, TextureHandle, TextureId, TextureOptions};
use image::RgbaImage;

use crate::config::AppConfig;
use crate::error::BackgroundError;
use crate::export::{self, PendingExport};
use crate::file_handler::{self, FileHandler};
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::renderer;
use crate::surface::DrawingSurface;

const UNDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

/// Host around a single [`DrawingSurface`]. Nothing is persisted between runs.
pub struct PaintApp {
    surface: DrawingSurface,
    config: AppConfig,
    input: InputHandler,
    file_handler: FileHandler,
    texture: Option<TextureHandle>,

    /// Brush size in logical units, as shown on the slider
    brush_size: f32,
    selected_color: String,

    // Last loaded background; re-applied whenever the canvas size changes
    background_image: Option<RgbaImage>,
    pending_export: Option<PendingExport>,
    /// Last user-facing message (export result, bad input)
    status: Option<String>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        Self::with_config(config, cc.egui_ctx.pixels_per_point())
    }

    pub fn with_config(config: AppConfig, pixels_per_point: f32) -> Self {
        let mut surface = DrawingSurface::new(pixels_per_point);
        surface.set_brush_size(config.initial_brush_size);
        if let Err(err) = surface.set_color(&config.initial_color) {
            log::error!("{}, keeping default brush color", err);
        }

        Self {
            surface,
            input: InputHandler::new(Rect::NOTHING, pixels_per_point),
            file_handler: FileHandler::new(),
            texture: None,
            brush_size: config.initial_brush_size,
            selected_color: config.initial_color.clone(),
            background_image: None,
            pending_export: None,
            status: None,
            config,
        }
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DrawingSurface {
        &mut self.surface
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.brush_size = size;
        self.surface.set_brush_size(size);
    }

    pub fn selected_color(&self) -> &str {
        &self.selected_color
    }

    pub fn select_color(&mut self, spec: &str) {
        match self.surface.set_color(spec) {
            Ok(()) => self.selected_color = spec.to_owned(),
            Err(err) => {
                log::error!("{}", err);
                self.status = Some(err.to_string());
            }
        }
    }

    pub fn undo(&mut self) {
        self.surface.undo();
    }

    pub fn redo(&mut self) {
        self.surface.redo();
    }

    /// Places the canvas; `rect` is in points.
    pub fn layout_canvas(&mut self, rect: Rect, pixels_per_point: f32) {
        if pixels_per_point != self.surface.density() {
            self.surface.set_density(pixels_per_point);
            self.surface.set_brush_size(self.brush_size);
        }

        let width = (rect.width() * pixels_per_point).round().max(0.0) as u32;
        let height = (rect.height() * pixels_per_point).round().max(0.0) as u32;
        let previous_size = self.surface.size();
        self.surface.on_resize(width, height);
        self.input.set_canvas(rect, pixels_per_point);

        if self.surface.size() != previous_size {
            self.apply_background();
        }
    }

    pub fn handle_input(&mut self, ctx: &egui::Context) {
        for event in self.input.process_input(ctx) {
            event.apply(&mut self.surface);
        }
    }

    /// Re-uploads the composited canvas if the surface asked for a redraw.
    pub fn refresh_texture(&mut self, ctx: &egui::Context) -> Option<TextureId> {
        if self.surface.take_redraw_request() || self.texture.is_none() {
            let composite = match self.surface.composite_to_image() {
                Ok(composite) => composite,
                Err(err) => {
                    log::error!("{}", err);
                    return None;
                }
            };
            if composite.width() == 0 || composite.height() == 0 {
                return None;
            }
            let image = renderer::to_color_image(&composite);
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ctx.load_texture("canvas", image, TextureOptions::NEAREST))
                }
            }
        }
        self.texture.as_ref().map(TextureHandle::id)
    }

    /// Sets the background now, or after the first layout if the canvas has no size yet.
    /// The image is kept and stretched again after every resize.
    pub fn queue_background(&mut self, image: RgbaImage) {
        self.background_image = Some(image);
        if self.surface.has_background() {
            self.apply_background();
        }
    }

    pub fn load_background_path(&mut self, path: &Path) {
        match file_handler::load_image_path(path) {
            Ok(image) => self.queue_background(image),
            Err(err) => {
                log::error!("Failed to load background {}: {}", path.display(), err);
                self.status = Some(format!("Could not load image: {err}"));
            }
        }
    }

    fn apply_background(&mut self) {
        let Some(image) = &self.background_image else {
            return;
        };
        match self.surface.set_background(image) {
            Ok(()) | Err(BackgroundError::Unsized) => {}
            Err(err) => {
                log::error!("Failed to set background: {}", err);
                self.status = Some(format!("Could not set background: {err}"));
                self.background_image = None;
            }
        }
    }

    pub fn is_exporting(&self) -> bool {
        self.pending_export.is_some()
    }

    /// Composites the current drawing and writes it on a worker thread.
    pub fn start_export(&mut self) {
        if self.pending_export.is_some() {
            return;
        }
        let snapshot = match self.surface.composite_to_image() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::error!("Export failed: {}", err);
                self.status = Some(format!("Export failed: {err}"));
                return;
            }
        };
        self.pending_export = Some(export::spawn_export(snapshot, self.config.export.clone()));
        self.status = Some("Saving…".to_owned());
    }

    /// Returns true when an export finished during this call.
    pub fn poll_export(&mut self) -> bool {
        let Some(result) = self.pending_export.as_mut().and_then(PendingExport::try_take) else {
            return false;
        };
        self.pending_export = None;
        self.status = Some(match result {
            Ok(path) => format!("File saved at {}", path.display()),
            Err(err) => {
                log::error!("Export failed: {}", err);
                format!("Export failed: {err}")
            }
        });
        true
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input_mut(|i| i.consume_shortcut(&UNDO_SHORTCUT)) {
            self.undo();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&REDO_SHORTCUT)) {
            self.redo();
        }
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.file_handler.check_for_dropped_files(ctx) {
            match self.file_handler.take_background() {
                Some(Ok(image)) => self.queue_background(image),
                Some(Err(err)) => {
                    log::error!("Failed to load dropped image: {}", err);
                    self.status = Some(format!("Could not load image: {err}"));
                }
                None => {}
            }
        }

        if self.is_exporting() && !self.poll_export() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        self.handle_shortcuts(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);

        self.file_handler.preview_files_being_dropped(ctx);
    }
}
