//! View-space geometry for the rectangle overlay
//!
//! Coordinates are view pixels: one terminal column wide, half a terminal
//! row tall. They are signed because a drag may leave the view.

/// A point in view pixel coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Same point with its X coordinate replaced
    #[must_use]
    pub const fn with_x(self, x: i32) -> Self {
        Self { x, y: self.y }
    }
}

/// Rectangle spanned by two arbitrary corners.
///
/// The corners are kept exactly as the user placed them; `begin` may lie
/// to the right of or below `end`. Use [`Rectangle::bounds`] for drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rectangle {
    pub begin: Point,
    pub end: Point,
}

impl Rectangle {
    #[must_use]
    pub const fn new(begin: Point, end: Point) -> Self {
        Self { begin, end }
    }

    /// Rectangle collapsed to a single point
    #[must_use]
    pub const fn at(anchor: Point) -> Self {
        Self::new(anchor, anchor)
    }

    /// Sorted Y coordinates of the two corners
    #[must_use]
    pub fn y_span(&self) -> (i32, i32) {
        let (a, b) = (self.begin.y, self.end.y);
        if a <= b { (a, b) } else { (b, a) }
    }

    /// Normalised bounds, independent of corner order
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let (top, bottom) = self.y_span();
        Bounds {
            left: self.begin.x.min(self.end.x),
            top,
            right: self.begin.x.max(self.end.x),
            bottom,
        }
    }
}

/// Axis-aligned bounds with inclusive edges
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.right.abs_diff(self.left) + 1
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.bottom.abs_diff(self.top) + 1
    }

    /// Whether the point lies on the outline
    #[must_use]
    pub fn on_perimeter(&self, p: Point) -> bool {
        let inside_x = (self.left..=self.right).contains(&p.x);
        let inside_y = (self.top..=self.bottom).contains(&p.y);
        (inside_x && (p.y == self.top || p.y == self.bottom))
            || (inside_y && (p.x == self.left || p.x == self.right))
    }
}
