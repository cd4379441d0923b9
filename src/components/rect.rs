//! Axis-aligned rectangle in world units.
//!
//! [`Rect`] stores its four edges (`left`, `top`, `right`, `bottom`) with the
//! y axis pointing down, so `top < bottom` for a non-empty rectangle. Storing
//! edges rather than origin + size keeps edge assignments exact, which the
//! resting-contact response relies on (`bottom == solid.top`).

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Create a rectangle from its four edges.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from its upper-left corner and size.
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Create a rectangle of the given size centered on `(cx, cy)`.
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self::new(cx - hw, cy - hh, cx + hw, cy + hh)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    pub fn upper_left(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// A rectangle is empty when it has no area.
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Translate by `(dx, dy)`.
    pub fn offset(&mut self, dx: f32, dy: f32) {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }

    /// Return a translated copy.
    pub fn offset_by(&self, delta: Vec2) -> Self {
        let mut moved = *self;
        moved.offset(delta.x, delta.y);
        moved
    }

    /// Move so the upper-left corner lands on `(x, y)`, keeping the size.
    pub fn offset_to(&mut self, x: f32, y: f32) {
        let w = self.width();
        let h = self.height();
        self.left = x;
        self.top = y;
        self.right = x + w;
        self.bottom = y + h;
    }

    /// Move so the center lands on `(x, y)`, keeping the size.
    ///
    /// `center()` reads back exactly `(x, y)` whenever `x ± width/2` and
    /// `y ± height/2` are representable, e.g. integer targets with integer
    /// sizes. Otherwise it is off by the rounding of the edges.
    pub fn center_on(&mut self, x: f32, y: f32) {
        let hw = self.width() / 2.0;
        let hh = self.height() / 2.0;
        self.left = x - hw;
        self.right = x + hw;
        self.top = y - hh;
        self.bottom = y + hh;
    }

    /// Point containment: left/top edges inclusive, right/bottom exclusive.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        !self.is_empty() && x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// True when `other` lies entirely inside this rectangle (shared edges allowed).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        !self.is_empty()
            && self.left <= other.left
            && self.top <= other.top
            && self.right >= other.right
            && self.bottom >= other.bottom
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}
