use super::rect::*;
use super::point::*;
use super::stroke::*;

use kurbo::Shape;

/// Tolerance used when flattening curves while expanding a stroke outline
const STROKE_FLATTENING_TOLERANCE: f64 = 4.0;

///
/// A single component of a geometry path
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PathComponent {
    /// Starts a new subpath at a point
    Move(PathPoint),

    /// Straight line to a point
    Line(PathPoint),

    /// Quadratic curve (control point, end point)
    Quad(PathPoint, PathPoint),

    /// Cubic bezier curve (first and second control points, end point)
    Bezier(PathPoint, PathPoint, PathPoint),

    /// Closes the current subpath
    Close
}

///
/// A concrete vector path: an ordered sequence of path components plus the
/// winding rule used to decide which regions are filled
///
#[derive(Clone, PartialEq, Debug)]
pub struct GeometryPath {
    components:         Vec<PathComponent>,
    non_zero_winding:   bool
}

impl GeometryPath {
    ///
    /// Creates a new, empty path
    ///
    pub fn new() -> GeometryPath {
        GeometryPath {
            components:         vec![],
            non_zero_winding:   true
        }
    }

    ///
    /// Creates a path from a components iterator
    ///
    pub fn from_components<Components: IntoIterator<Item=PathComponent>>(components: Components) -> GeometryPath {
        GeometryPath {
            components:         components.into_iter().collect(),
            non_zero_winding:   true
        }
    }

    ///
    /// Removes all components from this path
    ///
    pub fn clear(&mut self) {
        self.components.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[PathComponent] {
        &self.components
    }

    pub fn uses_non_zero_winding(&self) -> bool {
        self.non_zero_winding
    }

    pub fn set_uses_non_zero_winding(&mut self, non_zero_winding: bool) {
        self.non_zero_winding = non_zero_winding;
    }

    ///
    /// Starts a new subpath at a point
    ///
    pub fn move_to(&mut self, point: PathPoint) {
        self.components.push(PathComponent::Move(point));
    }

    ///
    /// Adds a line to a point
    ///
    pub fn line_to(&mut self, point: PathPoint) {
        self.components.push(PathComponent::Line(point));
    }

    ///
    /// Adds a quadratic curve with a single control point
    ///
    pub fn quad_to(&mut self, control_point: PathPoint, end_point: PathPoint) {
        self.components.push(PathComponent::Quad(control_point, end_point));
    }

    ///
    /// Adds a cubic bezier curve with two control points
    ///
    pub fn bezier_to(&mut self, control_point1: PathPoint, control_point2: PathPoint, end_point: PathPoint) {
        self.components.push(PathComponent::Bezier(control_point1, control_point2, end_point));
    }

    ///
    /// Closes the current subpath
    ///
    pub fn close(&mut self) {
        self.components.push(PathComponent::Close);
    }

    ///
    /// Converts this path into the kurbo representation used for geometric queries
    ///
    fn to_bez_path(&self) -> kurbo::BezPath {
        let mut bez_path = kurbo::BezPath::new();

        for component in self.components.iter() {
            match component {
                PathComponent::Move(p)              => bez_path.move_to(*p),
                PathComponent::Line(p)              => bez_path.line_to(*p),
                PathComponent::Quad(cp, p)          => bez_path.quad_to(*cp, *p),
                PathComponent::Bezier(cp1, cp2, p)  => bez_path.curve_to(*cp1, *cp2, *p),
                PathComponent::Close                => bez_path.close_path()
            }
        }

        bez_path
    }

    ///
    /// Computes the bounding box of this path (the empty rectangle for an empty path)
    ///
    pub fn bounds(&self) -> Rect {
        if self.components.is_empty() {
            Rect::empty()
        } else {
            Rect::from(self.to_bez_path().bounding_box())
        }
    }

    ///
    /// True if the specified point is inside the filled region of this path,
    /// honouring the path's winding rule
    ///
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if self.components.is_empty() {
            return false;
        }

        let winding = self.to_bez_path().winding(kurbo::Point::new(x, y));

        if self.non_zero_winding {
            winding != 0
        } else {
            winding % 2 != 0
        }
    }

    ///
    /// Generates the outline that results from stroking this path with the
    /// specified stroke style (the result is filled with non-zero winding)
    ///
    pub fn stroke_outline(&self, stroke_style: &StrokeStyle) -> GeometryPath {
        if self.components.is_empty() || stroke_style.thickness <= 0.0 {
            return GeometryPath::new();
        }

        let stroked = kurbo::stroke(
            self.to_bez_path(),
            &stroke_style.to_kurbo_stroke(),
            &kurbo::StrokeOpts::default(),
            STROKE_FLATTENING_TOLERANCE);

        let mut outline = GeometryPath::new();

        for element in stroked.elements().iter() {
            match element {
                kurbo::PathEl::MoveTo(p)            => outline.move_to(PathPoint::from(*p)),
                kurbo::PathEl::LineTo(p)            => outline.line_to(PathPoint::from(*p)),
                kurbo::PathEl::QuadTo(cp, p)        => outline.quad_to(PathPoint::from(*cp), PathPoint::from(*p)),
                kurbo::PathEl::CurveTo(cp1, cp2, p) => outline.bezier_to(PathPoint::from(*cp1), PathPoint::from(*cp2), PathPoint::from(*p)),
                kurbo::PathEl::ClosePath            => outline.close()
            }
        }

        outline
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn triangle() -> GeometryPath {
        let mut path = GeometryPath::new();

        path.move_to(PathPoint::new(0.0, 0.0));
        path.line_to(PathPoint::new(10.0, 0.0));
        path.line_to(PathPoint::new(10.0, 10.0));
        path.close();

        path
    }

    #[test]
    fn empty_path_has_empty_bounds() {
        assert!(GeometryPath::new().bounds() == Rect::empty());
    }

    #[test]
    fn bounds_cover_all_points() {
        let bounds = triangle().bounds();

        assert!(bounds == Rect { x1: 0.0, y1: 0.0, x2: 10.0, y2: 10.0 });
    }

    #[test]
    fn contains_point_inside_triangle() {
        let path = triangle();

        assert!(path.contains(8.0, 5.0));
        assert!(!path.contains(2.0, 8.0));
        assert!(!path.contains(20.0, 5.0));
    }

    #[test]
    fn even_odd_winding_excludes_double_wound_regions() {
        // Two concentric clockwise squares: the inner region is wound twice
        let mut path = GeometryPath::new();

        path.move_to(PathPoint::new(0.0, 0.0));
        path.line_to(PathPoint::new(0.0, 10.0));
        path.line_to(PathPoint::new(10.0, 10.0));
        path.line_to(PathPoint::new(10.0, 0.0));
        path.close();

        path.move_to(PathPoint::new(2.0, 2.0));
        path.line_to(PathPoint::new(2.0, 8.0));
        path.line_to(PathPoint::new(8.0, 8.0));
        path.line_to(PathPoint::new(8.0, 2.0));
        path.close();

        assert!(path.contains(5.0, 5.0));

        path.set_uses_non_zero_winding(false);
        assert!(!path.contains(5.0, 5.0));
        assert!(path.contains(1.0, 5.0));
    }

    #[test]
    fn stroke_outline_surrounds_a_line() {
        let mut path = GeometryPath::new();
        path.move_to(PathPoint::new(0.0, 0.0));
        path.line_to(PathPoint::new(10.0, 0.0));

        let outline = path.stroke_outline(&StrokeStyle::new(2.0));
        let bounds  = outline.bounds();

        // Butt caps: the outline extends ~1 unit either side of the line
        assert!(!outline.is_empty());
        assert!((bounds.height() - 2.0).abs() < 0.1);
        assert!(bounds.contains(5.0, 0.9));
        assert!(outline.contains(5.0, 0.9));
        assert!(!outline.contains(5.0, 1.5));
    }

    #[test]
    fn zero_thickness_stroke_is_empty() {
        assert!(triangle().stroke_outline(&StrokeStyle::new(0.0)).is_empty());
    }
}
