use crate::geometry::*;

use std::collections::HashMap;

///
/// Supplies the positions of named anchor points that relative coordinates can
/// reference. Resolvers are borrowed for the duration of a single call and
/// define for themselves what an unknown anchor name resolves to.
///
pub trait CoordinateResolver {
    ///
    /// Returns the current position of the named anchor
    ///
    fn named_point(&self, name: &str) -> PathPoint;
}

///
/// The unit resolver resolves every anchor to the origin (useful when a path
/// is known to contain no dynamic points)
///
impl CoordinateResolver for () {
    fn named_point(&self, _name: &str) -> PathPoint {
        PathPoint::origin()
    }
}

///
/// Hash maps act as a simple anchor table: unknown names resolve to the origin
///
impl CoordinateResolver for HashMap<String, PathPoint> {
    fn named_point(&self, name: &str) -> PathPoint {
        self.get(name)
            .copied()
            .unwrap_or_else(|| PathPoint::origin())
    }
}
