use egui::{Color32, Pos2};
use image::RgbaImage;
use tiny_skia::Pixmap;

use crate::color::parse_color;
use crate::error::{BackgroundError, ColorParseError, CompositeError};
use crate::renderer;
use crate::stroke::{MutableStroke, Stroke};

/// Brush size in logical units applied to a fresh surface
pub const DEFAULT_BRUSH_SIZE: f32 = 20.0;

/// Pointer gesture phase. The active stroke only exists while drawing.
#[derive(Debug, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Drawing(MutableStroke),
}

/// Records freehand strokes and composites them over an optional background.
///
/// Coordinates are device pixels at capture time. A resize allocates a new
/// background buffer but leaves stroke coordinates untouched.
#[derive(Debug)]
pub struct DrawingSurface {
    committed: Vec<Stroke>,
    undone: Vec<Stroke>,
    gesture: Gesture,

    color: Color32,
    thickness: f32,
    /// Device pixels per logical unit
    density: f32,

    width: u32,
    height: u32,
    background: Option<Pixmap>,

    needs_redraw: bool,
}

impl DrawingSurface {
    /// Creates an unsized surface with a black brush of [`DEFAULT_BRUSH_SIZE`].
    /// A non-finite or non-positive `density` falls back to 1.0.
    pub fn new(density: f32) -> Self {
        let density = if density.is_finite() && density > 0.0 {
            density
        } else {
            log::warn!("Invalid density {}, using 1.0", density);
            1.0
        };

        Self {
            committed: Vec::new(),
            undone: Vec::new(),
            gesture: Gesture::Idle,
            color: Color32::BLACK,
            thickness: DEFAULT_BRUSH_SIZE * density,
            density,
            width: 0,
            height: 0,
            background: None,
            needs_redraw: true,
        }
    }

    pub fn on_pointer_down(&mut self, pos: Pos2) {
        if let Gesture::Drawing(previous) = &self.gesture {
            log::trace!("Dropping unfinished stroke with {} points", previous.points().len());
        }

        let mut stroke = MutableStroke::new(self.color, self.thickness);
        stroke.add_point(pos);
        self.gesture = Gesture::Drawing(stroke);
        self.needs_redraw = true;
    }

    pub fn on_pointer_move(&mut self, pos: Pos2) {
        match &mut self.gesture {
            Gesture::Drawing(stroke) => {
                stroke.add_point(pos);
                self.needs_redraw = true;
            }
            Gesture::Idle => log::trace!("Ignoring pointer move at {:?} while idle", pos),
        }
    }

    pub fn on_pointer_up(&mut self) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Drawing(stroke) => {
                let stroke = stroke.seal();
                log::debug!("Committed stroke {} ({} points)", stroke.id(), stroke.len());
                self.committed.push(stroke);
                self.needs_redraw = true;
            }
            Gesture::Idle => log::trace!("Ignoring pointer up while idle"),
        }
    }

    /// Moves the most recently committed stroke onto the undo stack.
    pub fn undo(&mut self) {
        if let Some(stroke) = self.committed.pop() {
            log::debug!("Undo stroke {}", stroke.id());
            self.undone.push(stroke);
            self.needs_redraw = true;
        }
    }

    /// Moves the most recently undone stroke back on top of the committed list.
    /// Redo stays available after new strokes are drawn.
    pub fn redo(&mut self) {
        if let Some(stroke) = self.undone.pop() {
            log::debug!("Redo stroke {}", stroke.id());
            self.committed.push(stroke);
            self.needs_redraw = true;
        }
    }

    /// Sets the thickness for the next stroke from a size in logical units.
    pub fn set_brush_size(&mut self, size: f32) {
        if !(size.is_finite() && size > 0.0) {
            log::warn!("Ignoring invalid brush size {}", size);
            return;
        }
        self.thickness = size * self.density;
    }

    /// Sets the color for the next stroke. On error the current color is kept.
    pub fn set_color(&mut self, spec: &str) -> Result<(), ColorParseError> {
        self.color = parse_color(spec)?;
        Ok(())
    }

    /// Only affects later calls to [`Self::set_brush_size`].
    pub fn set_density(&mut self, density: f32) {
        if !(density.is_finite() && density > 0.0) {
            log::warn!("Ignoring invalid density {}", density);
            return;
        }
        self.density = density;
    }

    /// Allocates a fresh, transparent background at the new size. Previous
    /// background content is discarded and strokes are not reprojected.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        log::debug!(
            "Surface resized from {}x{} to {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        self.width = width;
        self.height = height;
        self.background = Pixmap::new(width, height);
        self.needs_redraw = true;
    }

    /// Stretches `image` over the whole background buffer.
    pub fn set_background(&mut self, image: &RgbaImage) -> Result<(), BackgroundError> {
        let background = self.background.as_mut().ok_or(BackgroundError::Unsized)?;
        let source = renderer::image_to_pixmap(image).ok_or(BackgroundError::EmptyImage)?;

        background.fill(tiny_skia::Color::TRANSPARENT);
        renderer::draw_stretched(background, &source);
        self.needs_redraw = true;
        Ok(())
    }

    /// Paints white, the background, committed strokes in order and the active stroke on top.
    pub fn render(&self, target: &mut Pixmap) {
        target.fill(tiny_skia::Color::WHITE);

        if let Some(background) = &self.background {
            renderer::draw_layer(target, background);
        }

        for stroke in &self.committed {
            renderer::paint_stroke(target, stroke.points(), stroke.color(), stroke.thickness());
        }

        if let Gesture::Drawing(active) = &self.gesture {
            if !active.is_empty() {
                renderer::paint_stroke(target, active.points(), active.color(), active.thickness());
            }
        }
    }

    /// Flattens everything [`Self::render`] draws into an image of the surface size.
    ///
    /// An unsized surface yields an empty image. Sizes the rasterizer cannot
    /// allocate are reported as [`CompositeError::TooLarge`].
    pub fn composite_to_image(&self) -> Result<RgbaImage, CompositeError> {
        if self.width == 0 || self.height == 0 {
            return Ok(RgbaImage::new(self.width, self.height));
        }
        let mut pixmap =
            Pixmap::new(self.width, self.height).ok_or(CompositeError::TooLarge {
                width: self.width,
                height: self.height,
            })?;
        self.render(&mut pixmap);
        Ok(renderer::pixmap_to_image(&pixmap))
    }

    /// Returns true once after any state change, for repaint coalescing.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn committed_strokes(&self) -> &[Stroke] {
        &self.committed
    }

    pub fn undo_stack(&self) -> &[Stroke] {
        &self.undone
    }

    pub fn active_stroke(&self) -> Option<&MutableStroke> {
        match &self.gesture {
            Gesture::Drawing(stroke) => Some(stroke),
            Gesture::Idle => None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.gesture, Gesture::Drawing(_))
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn current_color(&self) -> Color32 {
        self.color
    }

    pub fn current_thickness(&self) -> f32 {
        self.thickness
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new(1.0)
    }
}
