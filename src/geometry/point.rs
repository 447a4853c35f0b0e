use std::ops::{Mul, Add, Sub};

///
/// A concrete point on a path
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PathPoint {
    /// X, Y coordinates of this point
    pub position: (f64, f64)
}

impl PathPoint {
    ///
    /// Creates a new path point
    ///
    pub fn new(x: f64, y: f64) -> PathPoint {
        PathPoint {
            position: (x, y)
        }
    }

    ///
    /// Creates the point at the origin
    ///
    pub fn origin() -> PathPoint {
        PathPoint {
            position: (0.0, 0.0)
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.position.0
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.position.1
    }
}

impl Add<PathPoint> for PathPoint {
    type Output=PathPoint;

    #[inline]
    fn add(self, rhs: PathPoint) -> PathPoint {
        PathPoint {
            position: (self.position.0 + rhs.position.0, self.position.1 + rhs.position.1)
        }
    }
}

impl Sub<PathPoint> for PathPoint {
    type Output=PathPoint;

    #[inline]
    fn sub(self, rhs: PathPoint) -> PathPoint {
        PathPoint {
            position: (self.position.0 - rhs.position.0, self.position.1 - rhs.position.1)
        }
    }
}

impl Mul<f64> for PathPoint {
    type Output=PathPoint;

    #[inline]
    fn mul(self, rhs: f64) -> PathPoint {
        PathPoint {
            position: (self.position.0 * rhs, self.position.1 * rhs)
        }
    }
}

impl From<(f64, f64)> for PathPoint {
    fn from((x, y): (f64, f64)) -> PathPoint {
        PathPoint::new(x, y)
    }
}

impl Into<kurbo::Point> for PathPoint {
    #[inline]
    fn into(self) -> kurbo::Point {
        kurbo::Point::new(self.position.0, self.position.1)
    }
}

impl From<kurbo::Point> for PathPoint {
    #[inline]
    fn from(point: kurbo::Point) -> PathPoint {
        PathPoint::new(point.x, point.y)
    }
}
