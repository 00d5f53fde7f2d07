use rand::Rng;
use std::fmt::Debug;
use std::hash::Hash;

// Anything the spatial index can track: a stable identity plus a center and
// extents that are read fresh on every call.
pub trait Boundable {
    type Id: Copy + Eq + Hash + Debug;

    fn id(&self) -> Self::Id;
    fn x(&self) -> f32;
    fn y(&self) -> f32;
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(self.x(), self.y(), self.width(), self.height())
    }
}

// Axis-aligned rectangle described by its center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    // Build from a top-left origin instead of a center.
    pub fn from_origin(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            x: left + width / 2.0,
            y: top + height / 2.0,
            width,
            height,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn top_left(&self) -> (f32, f32) {
        (self.left(), self.top())
    }

    pub fn bottom_right(&self) -> (f32, f32) {
        (self.right(), self.bottom())
    }

    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }

    // Same center, every edge pushed out by `padding`.
    pub fn inflate(&self, padding: f32) -> Rectangle {
        Rectangle {
            x: self.x,
            y: self.y,
            width: self.width + padding * 2.0,
            height: self.height + padding * 2.0,
        }
    }

    pub fn random_point_inside<R: Rng>(&self, rng: &mut R) -> (f32, f32) {
        (
            self._safe_randf32(rng, self.left(), self.right()),
            self._safe_randf32(rng, self.top(), self.bottom()),
        )
    }

    fn _safe_randf32<R: Rng>(&self, rng: &mut R, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        rng.gen_range(min..max)
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }
}
