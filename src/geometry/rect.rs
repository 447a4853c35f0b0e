use super::point::*;

use std::f64;

///
/// An axis-aligned rectangle, used for bounding boxes and damage regions
///
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64
}

impl Rect {
    ///
    /// Creates a new rectangle
    ///
    pub fn new(top_left: PathPoint, bottom_right: PathPoint) -> Rect {
        Rect {
            x1: top_left.position.0,
            y1: top_left.position.1,
            x2: bottom_right.position.0,
            y2: bottom_right.position.1
        }
    }

    ///
    /// Creates an empty rectangle
    ///
    pub fn empty() -> Rect {
        Rect {
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: 0.0
        }
    }

    ///
    /// Converts a rectangle into one where x2 and y2 are greater than x1 and y1
    ///
    #[inline]
    pub fn normalize(self) -> Rect {
        Rect {
            x1: f64::min(self.x1, self.x2),
            y1: f64::min(self.y1, self.y2),
            x2: f64::max(self.x1, self.x2),
            y2: f64::max(self.y1, self.y2),
        }
    }

    ///
    /// True if this rectangle has no size
    ///
    #[inline]
    pub fn is_zero_size(&self) -> bool {
        self.x1 == self.x2 && self.y1 == self.y2
    }

    #[inline]
    pub fn width(&self) -> f64 {
        (self.x2 - self.x1).abs()
    }

    #[inline]
    pub fn height(&self) -> f64 {
        (self.y2 - self.y1).abs()
    }

    ///
    /// Creates the union of two rectangles
    ///
    /// Zero-size rectangles represent 'nothing' and do not extend the result
    ///
    #[inline]
    pub fn union(self, rhs: Rect) -> Rect {
        if self.is_zero_size() {
            rhs
        } else if rhs.is_zero_size() {
            self
        } else {
            Rect {
                x1: f64::min(self.x1, f64::min(self.x2, f64::min(rhs.x1, rhs.x2))),
                y1: f64::min(self.y1, f64::min(self.y2, f64::min(rhs.y1, rhs.y2))),
                x2: f64::max(self.x1, f64::max(self.x2, f64::max(rhs.x1, rhs.x2))),
                y2: f64::max(self.y1, f64::max(self.y2, f64::max(rhs.y1, rhs.y2))),
            }
        }
    }

    ///
    /// True if the specified point is inside this rectangle
    ///
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let normalized = self.normalize();
        x >= normalized.x1 && x <= normalized.x2 && y >= normalized.y1 && y <= normalized.y2
    }
}

impl From<kurbo::Rect> for Rect {
    fn from(rect: kurbo::Rect) -> Rect {
        Rect {
            x1: rect.x0,
            y1: rect.y0,
            x2: rect.x1,
            y2: rect.y1
        }
    }
}
