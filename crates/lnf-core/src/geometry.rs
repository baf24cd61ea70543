#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are signed pixels with the origin at the top-left of the
//! component. Signed values matter: tab runs stack away from the content
//! area and mirrored layouts can temporarily produce negative offsets.

/// A point in component coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// The zero size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }
}

/// A rectangle used for cell bounds, tab bounds, and pane bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Center point, rounded toward the origin.
    #[inline]
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Shift the rectangle by the given offsets.
    #[inline]
    pub const fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Create a new rectangle inside the current one with the given insets.
    pub fn inner(&self, insets: Insets) -> Rect {
        Rect {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: (self.width - insets.horizontal_sum()).max(0),
            height: (self.height - insets.vertical_sum()).max(0),
        }
    }

    /// Grow the rectangle outward by the given insets.
    pub fn outset(&self, insets: Insets) -> Rect {
        Rect {
            x: self.x - insets.left,
            y: self.y - insets.top,
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Rect {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Mirror the rectangle horizontally inside a container of `total_width`.
    ///
    /// `x' = total_width - x - width`. Applying it twice is the identity.
    #[inline]
    pub const fn mirror_x(&self, total_width: i32) -> Rect {
        Rect::new(
            total_width - self.x - self.width,
            self.y,
            self.width,
            self.height,
        )
    }
}

/// Insets (border/padding) around a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self::all(0);

    /// Create new insets with equal values.
    pub const fn all(val: i32) -> Self {
        Self {
            top: val,
            left: val,
            bottom: val,
            right: val,
        }
    }

    /// Create new insets with specific values (top, left, bottom, right).
    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub const fn horizontal_sum(&self) -> i32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub const fn vertical_sum(&self) -> i32 {
        self.top + self.bottom
    }
}

impl From<i32> for Insets {
    fn from(val: i32) -> Self {
        Self::all(val)
    }
}

#[cfg(test)]
mod tests {
    use super::{Insets, Point, Rect, Size};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2, 3, 4, 5);
        assert!(rect.contains(Point::new(2, 3)));
        assert!(rect.contains(Point::new(5, 7)));
        assert!(!rect.contains(Point::new(6, 3)));
        assert!(!rect.contains(Point::new(2, 8)));
        assert!(!rect.contains(Point::new(1, 3)));
    }

    #[test]
    fn rect_union_covers_both() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(2, 6, 4, 4);
        assert_eq!(a.union(&b), Rect::new(0, 0, 6, 10));
    }

    #[test]
    fn rect_intersection_no_overlap() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(3, 3, 2, 2);
        assert_eq!(a.intersection_opt(&b), None);
        assert_eq!(
            Rect::new(0, 0, 4, 4).intersection_opt(&Rect::new(2, 2, 4, 4)),
            Some(Rect::new(2, 2, 2, 2))
        );
    }

    #[test]
    fn rect_inner_and_outset() {
        let rect = Rect::new(0, 0, 10, 10);
        let insets = Insets::new(1, 4, 3, 2);
        let inner = rect.inner(insets);
        assert_eq!(inner, Rect::new(4, 1, 4, 6));
        assert_eq!(inner.outset(insets), rect);
        assert_eq!(Rect::new(0, 0, 2, 2).inner(Insets::all(3)).size(), Size::ZERO);
    }

    #[test]
    fn mirror_is_involution() {
        let rect = Rect::new(10, 3, 20, 5);
        let mirrored = rect.mirror_x(100);
        assert_eq!(mirrored, Rect::new(70, 3, 20, 5));
        assert_eq!(mirrored.mirror_x(100), rect);
    }

    #[test]
    fn negative_area_is_empty() {
        assert!(Rect::new(0, 0, -1, 5).is_empty());
        assert!(Rect::new(0, 0, 0, 5).is_empty());
        assert!(!Rect::new(-5, -5, 1, 1).is_empty());
    }

    #[test]
    fn size_max_is_componentwise() {
        assert_eq!(Size::new(3, 9).max(Size::new(7, 2)), Size::new(7, 9));
    }
}
