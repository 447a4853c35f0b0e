///
/// How two joined path segments are connected when stroked
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum JointStyle {
    Mitered,
    Curved,
    Beveled
}

///
/// How the ends of an open stroked path are finished
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum CapStyle {
    Butt,
    Square,
    Rounded
}

///
/// Describes how a path outline is converted into a fillable stroke outline
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct StrokeStyle {
    /// Width of the stroke (0 produces no visible stroke)
    pub thickness: f64,

    /// How segment joins are drawn
    pub joint_style: JointStyle,

    /// How the ends of open subpaths are drawn
    pub cap_style: CapStyle
}

impl StrokeStyle {
    ///
    /// Creates a stroke of the specified thickness with mitered joins and butt caps
    ///
    pub fn new(thickness: f64) -> StrokeStyle {
        StrokeStyle {
            thickness:      thickness,
            joint_style:    JointStyle::Mitered,
            cap_style:      CapStyle::Butt
        }
    }

    ///
    /// Returns this stroke with a different thickness
    ///
    pub fn with_thickness(self, thickness: f64) -> StrokeStyle {
        StrokeStyle { thickness, ..self }
    }

    ///
    /// Returns this stroke with a different joint style
    ///
    pub fn with_joint_style(self, joint_style: JointStyle) -> StrokeStyle {
        StrokeStyle { joint_style, ..self }
    }

    ///
    /// Returns this stroke with a different cap style
    ///
    pub fn with_cap_style(self, cap_style: CapStyle) -> StrokeStyle {
        StrokeStyle { cap_style, ..self }
    }

    ///
    /// Converts this stroke to the kurbo representation used while expanding outlines
    ///
    pub (crate) fn to_kurbo_stroke(&self) -> kurbo::Stroke {
        let join = match self.joint_style {
            JointStyle::Mitered => kurbo::Join::Miter,
            JointStyle::Curved  => kurbo::Join::Round,
            JointStyle::Beveled => kurbo::Join::Bevel
        };

        let cap = match self.cap_style {
            CapStyle::Butt      => kurbo::Cap::Butt,
            CapStyle::Square    => kurbo::Cap::Square,
            CapStyle::Rounded   => kurbo::Cap::Round
        };

        kurbo::Stroke::new(self.thickness)
            .with_join(join)
            .with_caps(cap)
    }
}

impl Default for StrokeStyle {
    fn default() -> StrokeStyle {
        StrokeStyle::new(0.0)
    }
}
