use crate::fill::*;
use crate::geometry::*;

use flo_canvas::*;

///
/// The narrow interface a rasterizer backend supplies for filling paths.
/// Drawables select a fill style and then fill path outlines through it;
/// everything else about rendering belongs to the backend.
///
pub trait FillRenderer {
    ///
    /// Chooses the fill style for subsequent fill operations
    ///
    fn set_fill_style(&mut self, fill: &FillStyle);

    ///
    /// Fills a path outline, transformed by the supplied transform
    ///
    fn fill_path(&mut self, path: &GeometryPath, transform: &Transform2D);
}

///
/// The context a drawable is rendered in: the backend to draw through, plus
/// the opacity and transform inherited from the drawable's surroundings
///
pub struct RenderingContext<'a> {
    pub renderer:   &'a mut dyn FillRenderer,
    pub opacity:    f32,
    pub transform:  Transform2D
}

impl<'a> RenderingContext<'a> {
    ///
    /// Creates a context that renders at full opacity with no transform
    ///
    pub fn new(renderer: &'a mut dyn FillRenderer) -> RenderingContext<'a> {
        RenderingContext {
            renderer:   renderer,
            opacity:    1.0,
            transform:  Transform2D::identity()
        }
    }
}
