use super::value_tree::*;
use super::undo::*;
use super::path_state::*;
use crate::relative::*;

use log::warn;
use smallvec::SmallVec;

pub const MOVE_SEGMENT: &str    = "Move";
pub const CLOSE_SEGMENT: &str   = "Close";
pub const LINE_SEGMENT: &str    = "Line";
pub const QUAD_SEGMENT: &str    = "Quad";
pub const CUBIC_SEGMENT: &str   = "Cubic";

pub const ATTR_POINT1: &str     = "p1";
pub const ATTR_POINT2: &str     = "p2";
pub const ATTR_POINT3: &str     = "p3";
pub const ATTR_MODE: &str       = "mode";

const POINT_ATTRS: [&str; 3]    = [ATTR_POINT1, ATTR_POINT2, ATTR_POINT3];

///
/// Typed view over a single segment node within a path's segment container
///
pub struct SegmentState {
    state: ValueTree
}

impl SegmentState {
    pub fn from(state: ValueTree) -> SegmentState {
        SegmentState { state }
    }

    pub fn tree(&self) -> &ValueTree {
        &self.state
    }

    ///
    /// The path that owns this segment (the segment container's parent)
    ///
    pub fn parent_state(&self) -> Option<PathState> {
        let path_node = self.state.parent()?.parent()?;

        if path_node.has_type(PATH_NODE) {
            Some(PathState::from(path_node))
        } else {
            None
        }
    }

    ///
    /// The segment before this one in the path, if any
    ///
    pub fn previous_segment(&self) -> Option<SegmentState> {
        self.state.sibling(-1).map(SegmentState::from)
    }

    ///
    /// Number of control points this segment's kind stores
    ///
    pub fn control_point_count(&self) -> usize {
        match self.state.node_type().as_str() {
            MOVE_SEGMENT    => 1,
            LINE_SEGMENT    => 1,
            QUAD_SEGMENT    => 2,
            CUBIC_SEGMENT   => 3,
            CLOSE_SEGMENT   => 0,

            unknown         => {
                warn!("Unknown segment type '{}'", unknown);
                0
            }
        }
    }

    ///
    /// Reads a control point. The index must be within this segment's arity:
    /// an out-of-range index is a contract breach by the caller and reads as
    /// the origin in release builds.
    ///
    pub fn control_point(&self, index: usize) -> RelativePoint {
        debug_assert!(index < self.control_point_count());

        if index >= POINT_ATTRS.len() {
            return RelativePoint::new(0.0, 0.0);
        }

        self.state.attribute(POINT_ATTRS[index])
            .map(|value| RelativePoint::parse(&value.as_text()))
            .unwrap_or_else(|| {
                warn!("Segment '{}' is missing control point {}", self.state.node_type(), index+1);
                RelativePoint::new(0.0, 0.0)
            })
    }

    ///
    /// Writes a control point (same index contract as `control_point`)
    ///
    pub fn set_control_point(&self, index: usize, point: &RelativePoint, undo: Option<&UndoManager>) {
        debug_assert!(index < self.control_point_count());

        if index < POINT_ATTRS.len() {
            self.state.set_attribute(POINT_ATTRS[index], point.to_string(), undo);
        }
    }

    ///
    /// All of this segment's control points in order
    ///
    pub fn control_points(&self) -> SmallVec<[RelativePoint; 3]> {
        (0..self.control_point_count())
            .map(|index| self.control_point(index))
            .collect()
    }

    ///
    /// Where this segment starts: a move's own first point, or the previous
    /// segment's end point for every other kind
    ///
    pub fn start_point(&self) -> RelativePoint {
        if self.state.has_type(MOVE_SEGMENT) {
            return self.control_point(0);
        }

        match self.previous_segment() {
            Some(previous)  => previous.end_point(),
            None            => RelativePoint::new(0.0, 0.0)
        }
    }

    ///
    /// Where this segment ends. A close segment's end point is degenerate (the
    /// subpath start resolves it, so the stored coordinate is the origin).
    ///
    pub fn end_point(&self) -> RelativePoint {
        match self.state.node_type().as_str() {
            MOVE_SEGMENT    => self.control_point(0),
            LINE_SEGMENT    => self.control_point(0),
            QUAD_SEGMENT    => self.control_point(1),
            CUBIC_SEGMENT   => self.control_point(2),
            _               => RelativePoint::new(0.0, 0.0)
        }
    }

    ///
    /// The end point mode tag ('free', 'symmetric', 'mirrored': passed through
    /// opaquely, and only meaningful on cubic segments)
    ///
    pub fn mode_of_end_point(&self) -> String {
        self.state.attribute(ATTR_MODE)
            .map(|value| value.as_text())
            .unwrap_or_else(String::new)
    }

    pub fn set_mode_of_end_point(&self, mode: &str, undo: Option<&UndoManager>) {
        if self.state.has_type(CUBIC_SEGMENT) {
            self.state.set_attribute(ATTR_MODE, mode, undo);
        }
    }

    ///
    /// Converts a quad or cubic segment to a line ending at the same point
    ///
    pub fn convert_to_line(&mut self, undo: Option<&UndoManager>) {
        if self.state.has_type(QUAD_SEGMENT) || self.state.has_type(CUBIC_SEGMENT) {
            let converted = SegmentState::from(ValueTree::new(LINE_SEGMENT));
            converted.set_control_point(0, &self.end_point(), undo);

            self.replace_with(converted, undo);
        }
    }

    ///
    /// Converts a line or quad segment to a cubic with the same end points.
    /// The interior control points are placed 30% and 70% of the way along the
    /// resolved chord, so the curve starts out straight.
    ///
    pub fn convert_to_cubic(&mut self, resolver: &dyn CoordinateResolver, undo: Option<&UndoManager>) {
        if self.state.has_type(LINE_SEGMENT) || self.state.has_type(QUAD_SEGMENT) {
            let converted = SegmentState::from(ValueTree::new(CUBIC_SEGMENT));

            let start   = self.start_point();
            let end     = self.end_point();
            let start_resolved  = start.resolve(resolver);
            let end_resolved    = end.resolve(resolver);

            converted.set_control_point(0, &RelativePoint::from(start_resolved + (end_resolved - start_resolved) * 0.3), undo);
            converted.set_control_point(1, &RelativePoint::from(start_resolved + (end_resolved - start_resolved) * 0.7), undo);
            converted.set_control_point(2, &end, undo);

            self.replace_with(converted, undo);
        }
    }

    ///
    /// Converts any non-move segment into a subpath break (a move to its end
    /// point)
    ///
    pub fn convert_to_path_break(&mut self, undo: Option<&UndoManager>) {
        if !self.state.has_type(MOVE_SEGMENT) {
            let converted = SegmentState::from(ValueTree::new(MOVE_SEGMENT));
            converted.set_control_point(0, &self.end_point(), undo);

            self.replace_with(converted, undo);
        }
    }

    ///
    /// Structurally removes this segment from its path
    ///
    pub fn remove_point(&self, undo: Option<&UndoManager>) {
        if let Some(parent) = self.state.parent() {
            parent.remove_child(&self.state, undo);
        }
    }

    ///
    /// Swaps this segment's node for a replacement, keeping its position in
    /// the path. A detached segment just becomes the replacement.
    ///
    fn replace_with(&mut self, converted: SegmentState, undo: Option<&UndoManager>) {
        if let Some(parent) = self.state.parent() {
            parent.replace_child(&self.state, converted.state.clone(), undo);
        }

        self.state = converted.state;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn path_with_segments() -> (PathState, Vec<SegmentState>) {
        let state       = PathState::from(ValueTree::new(PATH_NODE));
        let container   = state.segments_state();

        let move_node = ValueTree::new(MOVE_SEGMENT);
        move_node.set_attribute(ATTR_POINT1, "0, 0", None);
        container.add_child(move_node, None);

        let line_node = ValueTree::new(LINE_SEGMENT);
        line_node.set_attribute(ATTR_POINT1, "10, 0", None);
        container.add_child(line_node, None);

        let quad_node = ValueTree::new(QUAD_SEGMENT);
        quad_node.set_attribute(ATTR_POINT1, "15, 5", None);
        quad_node.set_attribute(ATTR_POINT2, "20, 0", None);
        container.add_child(quad_node, None);

        let close_node = ValueTree::new(CLOSE_SEGMENT);
        container.add_child(close_node, None);

        let segments = state.segments();
        (state, segments)
    }

    #[test]
    fn control_point_counts_match_segment_kinds() {
        let (_state, segments) = path_with_segments();

        assert!(segments[0].control_point_count() == 1);
        assert!(segments[1].control_point_count() == 1);
        assert!(segments[2].control_point_count() == 2);
        assert!(segments[3].control_point_count() == 0);
    }

    #[test]
    fn start_points_chain_through_previous_segments() {
        let (_state, segments) = path_with_segments();

        assert!(segments[0].start_point() == RelativePoint::new(0.0, 0.0));
        assert!(segments[1].start_point() == RelativePoint::new(0.0, 0.0));
        assert!(segments[2].start_point() == RelativePoint::new(10.0, 0.0));
        assert!(segments[3].start_point() == RelativePoint::new(20.0, 0.0));
    }

    #[test]
    fn segments_know_their_parent_path() {
        let (state, segments) = path_with_segments();

        assert!(segments[1].parent_state().map(|parent| parent.tree().same_node(state.tree())) == Some(true));
    }

    #[test]
    fn convert_to_line_preserves_the_end_point() {
        let (state, mut segments) = path_with_segments();

        let end_before = segments[2].end_point();
        segments[2].convert_to_line(None);

        assert!(segments[2].tree().has_type(LINE_SEGMENT));
        assert!(segments[2].end_point() == end_before);

        // The converted node took the original's position in the path
        let refreshed = state.segments();
        assert!(refreshed[2].tree().has_type(LINE_SEGMENT));
        assert!(refreshed.len() == 4);
    }

    #[test]
    fn convert_to_cubic_interpolates_control_points() {
        let (_state, mut segments) = path_with_segments();

        let end_before = segments[1].end_point();
        segments[1].convert_to_cubic(&(), None);

        assert!(segments[1].tree().has_type(CUBIC_SEGMENT));
        assert!(segments[1].end_point() == end_before);

        let cp1 = segments[1].control_point(0).resolve(&());
        let cp2 = segments[1].control_point(1).resolve(&());
        assert!((cp1.x() - 3.0).abs() < 0.0001 && cp1.y() == 0.0);
        assert!((cp2.x() - 7.0).abs() < 0.0001 && cp2.y() == 0.0);
    }

    #[test]
    fn convert_to_path_break_starts_a_new_subpath() {
        let (_state, mut segments) = path_with_segments();

        let end_before = segments[1].end_point();
        segments[1].convert_to_path_break(None);

        assert!(segments[1].tree().has_type(MOVE_SEGMENT));
        assert!(segments[1].end_point() == end_before);
    }

    #[test]
    fn moves_are_not_converted_to_path_breaks() {
        let (_state, mut segments) = path_with_segments();

        segments[0].convert_to_path_break(None);
        assert!(segments[0].tree().has_type(MOVE_SEGMENT));
        assert!(segments[0].control_point(0) == RelativePoint::new(0.0, 0.0));
    }

    #[test]
    fn remove_point_deletes_the_node() {
        let (state, segments) = path_with_segments();

        segments[1].remove_point(None);

        let refreshed = state.segments();
        assert!(refreshed.len() == 3);
        assert!(refreshed[1].tree().has_type(QUAD_SEGMENT));
    }

    #[test]
    fn mode_only_applies_to_cubic_segments() {
        let (_state, mut segments) = path_with_segments();

        segments[1].set_mode_of_end_point("symmetric", None);
        assert!(segments[1].mode_of_end_point() == "");

        segments[1].convert_to_cubic(&(), None);
        segments[1].set_mode_of_end_point("symmetric", None);
        assert!(segments[1].mode_of_end_point() == "symmetric");
    }
}
