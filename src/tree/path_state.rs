use super::value_tree::*;
use super::undo::*;
use super::fill_state::*;
use super::image_provider::*;
use super::segment_state::*;
use crate::fill::*;
use crate::geometry::*;

/// Node type of a serialized drawable path
pub const PATH_NODE: &str           = "Path";

pub const FILL_NODE: &str           = "Fill";
pub const STROKE_NODE: &str         = "Stroke";
pub const SEGMENTS_NODE: &str       = "Path";

pub const ATTR_ID: &str             = "id";
pub const ATTR_JOINT_STYLE: &str    = "jointStyle";
pub const ATTR_CAP_STYLE: &str      = "capStyle";
pub const ATTR_STROKE_WIDTH: &str   = "strokeWidth";
pub const ATTR_NON_ZERO_WINDING: &str = "nonZeroWinding";

///
/// Typed view over the tree node that stores a drawable path
///
pub struct PathState {
    state: ValueTree
}

impl PathState {
    ///
    /// Wraps a path node (the node must have the `Path` type)
    ///
    pub fn from(state: ValueTree) -> PathState {
        debug_assert!(state.has_type(PATH_NODE));

        PathState { state }
    }

    pub fn tree(&self) -> &ValueTree {
        &self.state
    }

    pub fn id(&self) -> String {
        self.state.attribute(ATTR_ID)
            .map(|value| value.as_text())
            .unwrap_or_else(String::new)
    }

    pub fn set_id(&self, id: &str, undo: Option<&UndoManager>) {
        self.state.set_attribute(ATTR_ID, id, undo);
    }

    ///
    /// The node holding the main fill, created empty if absent
    ///
    pub fn main_fill_state(&self, undo: Option<&UndoManager>) -> FillState {
        let node = self.state.get_or_create_child_with_type(FILL_NODE, undo);
        FillState::from(node)
    }

    ///
    /// The node holding the stroke fill, created empty if absent
    ///
    pub fn stroke_fill_state(&self, undo: Option<&UndoManager>) -> FillState {
        let node = self.state.get_or_create_child_with_type(STROKE_NODE, undo);
        FillState::from(node)
    }

    ///
    /// Decodes the main fill (a missing fill node decodes as the default fill)
    ///
    pub fn main_fill(&self, images: &dyn ImageProvider) -> FillStyle {
        self.state.child_with_type(FILL_NODE)
            .map(|node| FillState::from(node).fill_style(images))
            .unwrap_or_else(FillStyle::default)
    }

    pub fn set_main_fill(&self, fill: &FillStyle, images: &dyn ImageProvider, undo: Option<&UndoManager>) {
        self.main_fill_state(undo).set_fill_style(fill, images, undo);
    }

    ///
    /// Decodes the stroke fill (a missing stroke node decodes as the default fill)
    ///
    pub fn stroke_fill(&self, images: &dyn ImageProvider) -> FillStyle {
        self.state.child_with_type(STROKE_NODE)
            .map(|node| FillState::from(node).fill_style(images))
            .unwrap_or_else(FillStyle::default)
    }

    pub fn set_stroke_fill(&self, fill: &FillStyle, images: &dyn ImageProvider, undo: Option<&UndoManager>) {
        self.stroke_fill_state(undo).set_fill_style(fill, images, undo);
    }

    ///
    /// Decodes the stroke descriptor. Unknown joint and cap strings take the
    /// default styles (mitered joints, butt caps).
    ///
    pub fn stroke_style(&self) -> StrokeStyle {
        let joint_style = self.state.attribute(ATTR_JOINT_STYLE).map(|value| value.as_text()).unwrap_or_else(String::new);
        let cap_style   = self.state.attribute(ATTR_CAP_STYLE).map(|value| value.as_text()).unwrap_or_else(String::new);
        let thickness   = self.state.attribute(ATTR_STROKE_WIDTH).map(|value| value.as_number()).unwrap_or(0.0);

        let joint_style = match joint_style.as_str() {
            "curved"    => JointStyle::Curved,
            "bevel"     => JointStyle::Beveled,
            _           => JointStyle::Mitered
        };

        let cap_style = match cap_style.as_str() {
            "square"    => CapStyle::Square,
            "round"     => CapStyle::Rounded,
            _           => CapStyle::Butt
        };

        StrokeStyle::new(thickness)
            .with_joint_style(joint_style)
            .with_cap_style(cap_style)
    }

    ///
    /// Encodes a stroke descriptor onto this node
    ///
    pub fn set_stroke_style(&self, stroke: &StrokeStyle, undo: Option<&UndoManager>) {
        let joint_style = match stroke.joint_style {
            JointStyle::Mitered => "miter",
            JointStyle::Curved  => "curved",
            JointStyle::Beveled => "bevel"
        };

        let cap_style = match stroke.cap_style {
            CapStyle::Butt      => "butt",
            CapStyle::Square    => "square",
            CapStyle::Rounded   => "round"
        };

        self.state.set_attribute(ATTR_STROKE_WIDTH, stroke.thickness, undo);
        self.state.set_attribute(ATTR_JOINT_STYLE, joint_style, undo);
        self.state.set_attribute(ATTR_CAP_STYLE, cap_style, undo);
    }

    pub fn uses_non_zero_winding(&self) -> bool {
        self.state.attribute(ATTR_NON_ZERO_WINDING)
            .map(|value| value.as_flag())
            .unwrap_or(false)
    }

    pub fn set_uses_non_zero_winding(&self, non_zero_winding: bool, undo: Option<&UndoManager>) {
        self.state.set_attribute(ATTR_NON_ZERO_WINDING, non_zero_winding, undo);
    }

    ///
    /// The node whose children are the path's segments, created empty if absent
    ///
    pub fn segments_state(&self) -> ValueTree {
        self.state.get_or_create_child_with_type(SEGMENTS_NODE, None)
    }

    ///
    /// The segments of this path, in order
    ///
    pub fn segments(&self) -> Vec<SegmentState> {
        self.state.child_with_type(SEGMENTS_NODE)
            .map(|container| {
                container.children().into_iter()
                    .map(SegmentState::from)
                    .collect()
            })
            .unwrap_or_else(Vec::new)
    }
}
