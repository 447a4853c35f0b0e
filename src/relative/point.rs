use super::coordinate::*;
use super::resolver::*;
use crate::geometry::*;

use log::warn;

use std::fmt;

///
/// A point whose X and Y coordinates may each be absolute or anchored to a
/// named point
///
#[derive(Clone, PartialEq, Debug)]
pub struct RelativePoint {
    pub x: RelativeCoordinate,
    pub y: RelativeCoordinate
}

impl RelativePoint {
    ///
    /// Creates an absolute relative point
    ///
    pub fn new(x: f64, y: f64) -> RelativePoint {
        RelativePoint {
            x: RelativeCoordinate::Absolute(x),
            y: RelativeCoordinate::Absolute(y)
        }
    }

    ///
    /// True if either coordinate depends on an anchor
    ///
    pub fn is_dynamic(&self) -> bool {
        self.x.is_dynamic() || self.y.is_dynamic()
    }

    ///
    /// Resolves this point to a concrete position using the supplied resolver
    ///
    pub fn resolve(&self, resolver: &dyn CoordinateResolver) -> PathPoint {
        PathPoint::new(
            self.x.resolve_with(|name| resolver.named_point(name).x()),
            self.y.resolve_with(|name| resolver.named_point(name).y()))
    }

    ///
    /// Parses a point of the form 'x, y' where each side is a coordinate
    /// expression. Like coordinate parsing this is lenient: a missing Y
    /// coordinate degrades to 0.
    ///
    pub fn parse(text: &str) -> RelativePoint {
        match text.find(',') {
            Some(comma) => RelativePoint {
                x: RelativeCoordinate::parse(&text[..comma]),
                y: RelativeCoordinate::parse(&text[comma+1..])
            },

            None        => {
                if !text.trim().is_empty() {
                    warn!("Point expression '{}' is missing a Y coordinate", text);
                }

                RelativePoint {
                    x: RelativeCoordinate::parse(text),
                    y: RelativeCoordinate::Absolute(0.0)
                }
            }
        }
    }
}

impl fmt::Display for RelativePoint {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}, {}", self.x, self.y)
    }
}

impl From<PathPoint> for RelativePoint {
    fn from(point: PathPoint) -> RelativePoint {
        RelativePoint::new(point.x(), point.y())
    }
}

impl From<(f64, f64)> for RelativePoint {
    fn from((x, y): (f64, f64)) -> RelativePoint {
        RelativePoint::new(x, y)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::collections::HashMap;

    #[test]
    fn parses_absolute_points() {
        assert!(RelativePoint::parse("3, 4") == RelativePoint::new(3.0, 4.0));
    }

    #[test]
    fn parses_mixed_points() {
        let point = RelativePoint::parse("handle + 1, 5");

        assert!(point.x == RelativeCoordinate::Anchored { anchor: "handle".to_string(), offset: 1.0 });
        assert!(point.y == RelativeCoordinate::Absolute(5.0));
        assert!(point.is_dynamic());
    }

    #[test]
    fn round_trips_through_display() {
        let point = RelativePoint::parse("handle - 2, 7.5");

        assert!(RelativePoint::parse(&point.to_string()) == point);
    }

    #[test]
    fn resolves_against_anchor_table() {
        let mut anchors = HashMap::new();
        anchors.insert("handle".to_string(), PathPoint::new(10.0, 20.0));

        let point       = RelativePoint::parse("handle + 1, handle - 5");
        let resolved    = point.resolve(&anchors);

        assert!(resolved == PathPoint::new(11.0, 15.0));
    }

    #[test]
    fn absolute_points_ignore_the_resolver() {
        let point = RelativePoint::new(1.0, 2.0);

        assert!(!point.is_dynamic());
        assert!(point.resolve(&()) == PathPoint::new(1.0, 2.0));
    }
}
