use std::path::Path;

use eframe::egui;
use image::RgbaImage;

use crate::error::BackgroundError;

/// Picks up image files dropped onto the window for use as the canvas background
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl Default for FileHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHandler {
    pub fn new() -> Self {
        Self {
            dropped_files: Vec::new(),
        }
    }

    /// Process any newly dropped files from the UI context
    /// Returns true if any new files were dropped
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        let mut new_dropped_files = false;

        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files = i.raw.dropped_files.clone();
                new_dropped_files = true;
            }
        });

        new_dropped_files
    }

    /// Decodes the last dropped image file. Other dropped files are skipped.
    pub fn take_background(&mut self) -> Option<Result<RgbaImage, BackgroundError>> {
        let files = std::mem::take(&mut self.dropped_files);
        let Some(file) = files.iter().rev().find(|file| is_image_file(file)) else {
            for file in &files {
                log::warn!("Dropped file is not a supported type: {}", display_name(file));
            }
            return None;
        };

        log::info!("Loading background from {}", display_name(file));
        Some(load_dropped_file(file))
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Drop to set background:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else {
                    text += "\n(Path not available)";
                }
            }
            text
        });

        let painter =
            ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        let font = ctx
            .style()
            .text_styles
            .get(&TextStyle::Heading)
            .cloned()
            .unwrap_or_default();

        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            font,
            Color32::WHITE,
        );
    }
}

fn display_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        file.mime.starts_with("image/")
    } else if let Some(path) = &file.path {
        has_image_extension(path)
    } else {
        false
    }
}

pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp"))
}

fn load_dropped_file(file: &egui::DroppedFile) -> Result<RgbaImage, BackgroundError> {
    match (&file.bytes, &file.path) {
        (Some(bytes), _) => decode_image(bytes),
        (None, Some(path)) => load_image_path(path),
        (None, None) => Err(BackgroundError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "dropped file has no accessible data",
        ))),
    }
}

/// Decodes any format the `image` crate understands into RGBA8
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, BackgroundError> {
    let image = image::load_from_memory(bytes)?;
    log::debug!("Decoded image: {}x{}", image.width(), image.height());
    Ok(image.to_rgba8())
}

pub fn load_image_path(path: &Path) -> Result<RgbaImage, BackgroundError> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}
