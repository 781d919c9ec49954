//=========================================================================
// Geometry
//=========================================================================
//
// Axis-aligned rectangles in screen space.
//
// Coordinate system:
//   (0,0) ──► +x
//     │
//     ▼ +y        top = y, bottom = y + h
//
// Overlap is strict: rectangles that only share an edge do not overlap.
// This is what lets a player rest exactly on a platform top.
//
//=========================================================================

//=== Rect ================================================================

/// Axis-aligned rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Returns `true` if the horizontal extents overlap (strict).
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    /// Returns `true` if the vertical extents overlap (strict).
    #[inline]
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        self.top() < other.bottom() && self.bottom() > other.top()
    }

    /// Returns `true` if the interiors intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
