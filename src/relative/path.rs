use super::point::*;
use super::resolver::*;
use crate::geometry::*;
use crate::tree::*;

use log::warn;

///
/// A single path command whose control points are relative points
///
#[derive(Clone, PartialEq, Debug)]
pub enum RelativeSegment {
    /// Starts a new subpath
    StartNewSubPath(RelativePoint),

    /// Line to a point
    LineTo(RelativePoint),

    /// Quadratic curve (control point, end point)
    QuadraticTo(RelativePoint, RelativePoint),

    /// Cubic curve (two control points, end point, end point mode tag)
    CubicTo(RelativePoint, RelativePoint, RelativePoint, String),

    /// Closes the current subpath (its end point is the subpath's start point)
    CloseSubPath
}

///
/// A path whose control points may be relative to named anchors. A concrete
/// `GeometryPath` can be regenerated from it at any time by resolving every
/// point, and it knows whether any of its points are dynamic (anchor
/// dependent, so able to move without a direct edit).
///
#[derive(Clone, PartialEq, Debug)]
pub struct RelativePointPath {
    segments:               Vec<RelativeSegment>,
    uses_non_zero_winding:  bool
}

impl RelativePointPath {
    ///
    /// Creates an empty relative path
    ///
    pub fn new() -> RelativePointPath {
        RelativePointPath {
            segments:               vec![],
            uses_non_zero_winding:  true
        }
    }

    ///
    /// Creates a relative path from a concrete path, treating every control
    /// point as a constant
    ///
    pub fn from_geometry(path: &GeometryPath) -> RelativePointPath {
        let segments = path.components().iter()
            .map(|component| {
                match component {
                    PathComponent::Move(p)              => RelativeSegment::StartNewSubPath(RelativePoint::from(*p)),
                    PathComponent::Line(p)              => RelativeSegment::LineTo(RelativePoint::from(*p)),
                    PathComponent::Quad(cp, p)          => RelativeSegment::QuadraticTo(RelativePoint::from(*cp), RelativePoint::from(*p)),
                    PathComponent::Bezier(cp1, cp2, p)  => RelativeSegment::CubicTo(RelativePoint::from(*cp1), RelativePoint::from(*cp2), RelativePoint::from(*p), String::new()),
                    PathComponent::Close                => RelativeSegment::CloseSubPath
                }
            })
            .collect();

        RelativePointPath {
            segments:               segments,
            uses_non_zero_winding:  path.uses_non_zero_winding()
        }
    }

    ///
    /// Reads a relative path from a serialized path node. Segments of unknown
    /// type are skipped (with a warning) rather than failing the read.
    ///
    pub fn from_tree(state: &PathState) -> RelativePointPath {
        let segments = state.segments().into_iter()
            .filter_map(|segment| {
                match segment.tree().node_type().as_str() {
                    MOVE_SEGMENT    => Some(RelativeSegment::StartNewSubPath(segment.control_point(0))),
                    LINE_SEGMENT    => Some(RelativeSegment::LineTo(segment.control_point(0))),
                    CLOSE_SEGMENT   => Some(RelativeSegment::CloseSubPath),

                    QUAD_SEGMENT    => {
                        let points = segment.control_points();
                        Some(RelativeSegment::QuadraticTo(points[0].clone(), points[1].clone()))
                    }

                    CUBIC_SEGMENT   => {
                        let points = segment.control_points();
                        Some(RelativeSegment::CubicTo(points[0].clone(), points[1].clone(), points[2].clone(), segment.mode_of_end_point()))
                    }

                    unknown         => {
                        warn!("Skipping path segment of unknown type '{}'", unknown);
                        None
                    }
                }
            })
            .collect();

        RelativePointPath {
            segments:               segments,
            uses_non_zero_winding:  state.uses_non_zero_winding()
        }
    }

    ///
    /// Writes this path's winding rule and segments to a serialized path node,
    /// replacing any segments already stored there
    ///
    pub fn write_to_tree(&self, state: &PathState, undo: Option<&UndoManager>) {
        state.set_uses_non_zero_winding(self.uses_non_zero_winding, undo);

        let container = state.segments_state();
        for existing in container.children() {
            container.remove_child(&existing, undo);
        }

        for segment in self.segments.iter() {
            let node = match segment {
                RelativeSegment::StartNewSubPath(p) => {
                    let node = ValueTree::new(MOVE_SEGMENT);
                    node.set_attribute(ATTR_POINT1, p.to_string(), undo);
                    node
                }

                RelativeSegment::LineTo(p) => {
                    let node = ValueTree::new(LINE_SEGMENT);
                    node.set_attribute(ATTR_POINT1, p.to_string(), undo);
                    node
                }

                RelativeSegment::QuadraticTo(cp, p) => {
                    let node = ValueTree::new(QUAD_SEGMENT);
                    node.set_attribute(ATTR_POINT1, cp.to_string(), undo);
                    node.set_attribute(ATTR_POINT2, p.to_string(), undo);
                    node
                }

                RelativeSegment::CubicTo(cp1, cp2, p, mode) => {
                    let node = ValueTree::new(CUBIC_SEGMENT);
                    node.set_attribute(ATTR_POINT1, cp1.to_string(), undo);
                    node.set_attribute(ATTR_POINT2, cp2.to_string(), undo);
                    node.set_attribute(ATTR_POINT3, p.to_string(), undo);
                    if !mode.is_empty() {
                        node.set_attribute(ATTR_MODE, mode.as_str(), undo);
                    }
                    node
                }

                RelativeSegment::CloseSubPath => ValueTree::new(CLOSE_SEGMENT)
            };

            container.add_child(node, undo);
        }
    }

    pub fn segments(&self) -> &[RelativeSegment] {
        &self.segments
    }

    pub fn push(&mut self, segment: RelativeSegment) {
        self.segments.push(segment);
    }

    pub fn uses_non_zero_winding(&self) -> bool {
        self.uses_non_zero_winding
    }

    pub fn set_uses_non_zero_winding(&mut self, non_zero_winding: bool) {
        self.uses_non_zero_winding = non_zero_winding;
    }

    ///
    /// True if any control point in this path depends on a named anchor
    ///
    pub fn contains_any_dynamic_points(&self) -> bool {
        self.segments.iter()
            .any(|segment| {
                match segment {
                    RelativeSegment::StartNewSubPath(p)         => p.is_dynamic(),
                    RelativeSegment::LineTo(p)                  => p.is_dynamic(),
                    RelativeSegment::QuadraticTo(cp, p)         => cp.is_dynamic() || p.is_dynamic(),
                    RelativeSegment::CubicTo(cp1, cp2, p, _)    => cp1.is_dynamic() || cp2.is_dynamic() || p.is_dynamic(),
                    RelativeSegment::CloseSubPath               => false
                }
            })
    }

    ///
    /// Generates the concrete path described by this relative path, resolving
    /// every point against the supplied resolver
    ///
    pub fn create_path(&self, resolver: &dyn CoordinateResolver) -> GeometryPath {
        let mut path = GeometryPath::new();

        for segment in self.segments.iter() {
            match segment {
                RelativeSegment::StartNewSubPath(p)         => path.move_to(p.resolve(resolver)),
                RelativeSegment::LineTo(p)                  => path.line_to(p.resolve(resolver)),
                RelativeSegment::QuadraticTo(cp, p)         => path.quad_to(cp.resolve(resolver), p.resolve(resolver)),
                RelativeSegment::CubicTo(cp1, cp2, p, _)    => path.bezier_to(cp1.resolve(resolver), cp2.resolve(resolver), p.resolve(resolver)),
                RelativeSegment::CloseSubPath               => path.close()
            }
        }

        path.set_uses_non_zero_winding(self.uses_non_zero_winding);
        path
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::collections::HashMap;

    fn anchored_path() -> RelativePointPath {
        let mut path = RelativePointPath::new();

        path.push(RelativeSegment::StartNewSubPath(RelativePoint::new(0.0, 0.0)));
        path.push(RelativeSegment::LineTo(RelativePoint::parse("handle, handle")));
        path.push(RelativeSegment::CloseSubPath);

        path
    }

    #[test]
    fn detects_dynamic_points() {
        assert!(anchored_path().contains_any_dynamic_points());

        let constant = RelativePointPath::from_geometry(&GeometryPath::from_components(vec![
            PathComponent::Move(PathPoint::new(0.0, 0.0)),
            PathComponent::Line(PathPoint::new(1.0, 1.0))
        ]));
        assert!(!constant.contains_any_dynamic_points());
    }

    #[test]
    fn resolves_against_moving_anchors() {
        let path        = anchored_path();
        let mut anchors = HashMap::new();

        anchors.insert("handle".to_string(), PathPoint::new(5.0, 5.0));
        let before = path.create_path(&anchors);

        anchors.insert("handle".to_string(), PathPoint::new(9.0, 9.0));
        let after = path.create_path(&anchors);

        assert!(before.components()[1] == PathComponent::Line(PathPoint::new(5.0, 5.0)));
        assert!(after.components()[1] == PathComponent::Line(PathPoint::new(9.0, 9.0)));
    }

    #[test]
    fn from_geometry_preserves_every_component() {
        let mut geometry = GeometryPath::new();
        geometry.move_to(PathPoint::new(0.0, 0.0));
        geometry.quad_to(PathPoint::new(1.0, 2.0), PathPoint::new(3.0, 0.0));
        geometry.bezier_to(PathPoint::new(4.0, 1.0), PathPoint::new(5.0, -1.0), PathPoint::new(6.0, 0.0));
        geometry.close();

        let relative        = RelativePointPath::from_geometry(&geometry);
        let reconstructed   = relative.create_path(&());

        assert!(!relative.contains_any_dynamic_points());
        assert!(reconstructed == geometry);
    }

    #[test]
    fn round_trips_through_the_tree() {
        let mut path = anchored_path();
        path.push(RelativeSegment::CubicTo(
            RelativePoint::new(1.0, 1.0),
            RelativePoint::new(2.0, 2.0),
            RelativePoint::parse("end + 1, 4"),
            "symmetric".to_string()));

        let state = PathState::from(ValueTree::new(PATH_NODE));
        path.write_to_tree(&state, None);

        assert!(RelativePointPath::from_tree(&state) == path);
    }

    #[test]
    fn unknown_segment_types_are_skipped() {
        let state       = PathState::from(ValueTree::new(PATH_NODE));
        let container   = state.segments_state();

        let move_node = ValueTree::new(MOVE_SEGMENT);
        move_node.set_attribute(ATTR_POINT1, "1, 2", None);
        container.add_child(move_node, None);
        container.add_child(ValueTree::new("Wiggle"), None);
        container.add_child(ValueTree::new(CLOSE_SEGMENT), None);

        let path = RelativePointPath::from_tree(&state);
        assert!(path.segments().len() == 2);
        assert!(path.segments()[0] == RelativeSegment::StartNewSubPath(RelativePoint::new(1.0, 2.0)));
        assert!(path.segments()[1] == RelativeSegment::CloseSubPath);
    }

    #[test]
    fn rewriting_replaces_existing_segments() {
        let state = PathState::from(ValueTree::new(PATH_NODE));

        anchored_path().write_to_tree(&state, None);
        assert!(state.segments().len() == 3);

        let mut shorter = RelativePointPath::new();
        shorter.push(RelativeSegment::StartNewSubPath(RelativePoint::new(1.0, 1.0)));
        shorter.write_to_tree(&state, None);

        assert!(state.segments().len() == 1);
    }
}
