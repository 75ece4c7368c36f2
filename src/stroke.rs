use egui::{Color32, Pos2, Rect};
use uuid::Uuid;

/// Identity of a sealed stroke, stable while it moves between the
/// committed list and the undo stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrokeId(Uuid);

impl StrokeId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for StrokeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Immutable stroke. Deliberately not Clone: a stroke lives in exactly one list.
#[derive(Debug, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

// Mutable stroke for the gesture in progress
#[derive(Debug, Clone)]
pub struct MutableStroke {
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

impl Stroke {
    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drawn line segments. The first point is only the origin, so a
    /// stroke with a single point has no segments.
    pub fn segments(&self) -> impl Iterator<Item = (Pos2, Pos2)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Bounding box padded by half the brush thickness, `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        if self.points.is_empty() {
            return None;
        }
        Some(Rect::from_points(&self.points).expand(self.thickness / 2.0))
    }
}

impl MutableStroke {
    // Create an empty stroke that will be drawn with the given style
    pub fn new(color: Color32, thickness: f32) -> Self {
        Self {
            points: Vec::new(),
            color,
            thickness,
        }
    }

    /// Add a point. The first call records the move-to origin.
    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    // Finish editing; the returned stroke has no mutators
    pub fn seal(self) -> Stroke {
        Stroke {
            id: StrokeId::new(),
            points: self.points,
            color: self.color,
            thickness: self.thickness,
        }
    }
}
