use egui::{Context, Pos2, Rect};

use crate::surface::DrawingSurface;

/// Pointer events in canvas-relative device pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown { position: Pos2 },
    /// Pointer moved while a gesture is in progress
    PointerMove { position: Pos2 },
    /// Primary button released, ending the gesture
    PointerUp,
}

impl InputEvent {
    pub fn apply(&self, surface: &mut DrawingSurface) {
        match *self {
            InputEvent::PointerDown { position } => surface.on_pointer_down(position),
            InputEvent::PointerMove { position } => surface.on_pointer_move(position),
            InputEvent::PointerUp => surface.on_pointer_up(),
        }
    }
}

/// Primary pointer state for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSample {
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
    /// Screen position in points
    pub position: Option<Pos2>,
}

/// Converts egui pointer input over the canvas into [`InputEvent`]s
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
    pixels_per_point: f32,
    last_pointer_pos: Option<Pos2>,
    in_gesture: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect, pixels_per_point: f32) -> Self {
        Self {
            canvas_rect,
            pixels_per_point,
            last_pointer_pos: None,
            in_gesture: false,
        }
    }

    /// Update the canvas placement (e.g. if window is resized)
    pub fn set_canvas(&mut self, rect: Rect, pixels_per_point: f32) {
        self.canvas_rect = rect;
        self.pixels_per_point = pixels_per_point;
    }

    /// Screen points to canvas device pixels. Positions outside the canvas are kept as-is.
    pub fn to_canvas(&self, pos: Pos2) -> Pos2 {
        ((pos - self.canvas_rect.min) * self.pixels_per_point).to_pos2()
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let sample = ctx.input(|input| PointerSample {
            pressed: input.pointer.primary_pressed(),
            down: input.pointer.primary_down(),
            released: input.pointer.primary_released(),
            position: input.pointer.interact_pos(),
        });
        self.translate(sample)
    }

    pub fn translate(&mut self, sample: PointerSample) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if sample.pressed {
            if let Some(pos) = sample.position.filter(|pos| self.canvas_rect.contains(*pos)) {
                events.push(InputEvent::PointerDown {
                    position: self.to_canvas(pos),
                });
                self.in_gesture = true;
                self.last_pointer_pos = Some(pos);
            }
        }

        if self.in_gesture {
            if let Some(pos) = sample.position {
                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        position: self.to_canvas(pos),
                    });
                    self.last_pointer_pos = Some(pos);
                }
            }

            if sample.released || !sample.down {
                events.push(InputEvent::PointerUp);
                self.in_gesture = false;
                self.last_pointer_pos = None;
            }
        }

        events
    }
}
