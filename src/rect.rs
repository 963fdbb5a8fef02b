use serde::{Deserialize, Serialize};

/// Axis-aligned integer rectangle in grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the rightmost column.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the bottom row.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Rooms are plain rectangles owned by their leaf.
pub type Room = Rect;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_exclusive() {
        let rect = Rect::new(1, 1, 30, 22);
        assert_eq!(rect.right(), 31);
        assert_eq!(rect.bottom(), 23);
        assert!(rect.contains_point(30, 22));
        assert!(!rect.contains_point(31, 22));
        assert!(!rect.contains_point(0, 5));
    }

    #[test]
    fn containment_and_overlap() {
        let outer = Rect::new(0, 0, 10, 10);
        let inner = Rect::new(2, 3, 4, 5);
        assert!(outer.contains_rect(&inner));
        assert!(!inner.contains_rect(&outer));

        let neighbour = Rect::new(10, 0, 5, 10);
        assert!(!outer.overlaps(&neighbour));
        assert!(outer.overlaps(&Rect::new(9, 9, 3, 3)));
    }
}
