use super::gradient::*;

use flo_canvas::*;

///
/// A reference to an image used as a fill, identified by the string issued by
/// the image provider that persisted it
///
#[derive(Clone, PartialEq, Debug)]
pub struct ImageReference {
    /// Identifier used to locate the image
    pub identifier: String,

    /// Opacity the image is drawn with
    pub opacity: f32
}

///
/// The paint a fill style applies
///
#[derive(Clone, PartialEq, Debug)]
pub enum Paint {
    Solid(Color),
    Gradient(Gradient),
    Image(ImageReference)
}

///
/// A paint description: solid colour, gradient or image, with an overall
/// opacity and a coordinate transform
///
#[derive(Clone, PartialEq, Debug)]
pub struct FillStyle {
    /// The paint that is applied
    pub paint: Paint,

    /// Opacity the paint is applied with, on top of any alpha it carries itself
    pub opacity: f32,

    /// Transform applied to the paint coordinates when filling
    pub transform: Transform2D
}

impl FillStyle {
    ///
    /// Creates a solid colour fill
    ///
    pub fn solid(color: Color) -> FillStyle {
        FillStyle {
            paint:      Paint::Solid(color),
            opacity:    1.0,
            transform:  Transform2D::identity()
        }
    }

    ///
    /// Creates a gradient fill
    ///
    pub fn gradient(gradient: Gradient) -> FillStyle {
        FillStyle {
            paint:      Paint::Gradient(gradient),
            opacity:    1.0,
            transform:  Transform2D::identity()
        }
    }

    ///
    /// Creates an image fill
    ///
    pub fn image(image: ImageReference) -> FillStyle {
        FillStyle {
            paint:      Paint::Image(image),
            opacity:    1.0,
            transform:  Transform2D::identity()
        }
    }

    ///
    /// Returns this style with a different overall opacity
    ///
    pub fn with_opacity(self, opacity: f32) -> FillStyle {
        FillStyle { opacity, ..self }
    }

    ///
    /// True if filling with this style would produce no visible output
    ///
    pub fn is_invisible(&self) -> bool {
        if self.opacity <= 0.0 {
            return true;
        }

        match &self.paint {
            Paint::Solid(color)     => {
                let (_, _, _, alpha) = color.to_rgba_components();
                alpha <= 0.0
            }
            Paint::Gradient(grad)   => grad.is_invisible(),
            Paint::Image(image)     => image.opacity <= 0.0
        }
    }

    ///
    /// Returns the fill used to render this style at a given overall opacity
    /// (the paint itself is left alone: opacity composes multiplicatively on
    /// top of it for every paint type)
    ///
    pub fn with_multiplied_opacity(&self, opacity: f32) -> FillStyle {
        FillStyle {
            paint:      self.paint.clone(),
            opacity:    self.opacity * opacity,
            transform:  self.transform
        }
    }

    ///
    /// Returns this style with its transform composed so that the fill's own
    /// transform applies first, followed by the supplied transform
    ///
    pub fn transformed_by(&self, transform: &Transform2D) -> FillStyle {
        FillStyle {
            paint:      self.paint.clone(),
            opacity:    self.opacity,
            transform:  *transform * self.transform
        }
    }
}

impl Default for FillStyle {
    ///
    /// The default fill is solid black
    ///
    fn default() -> FillStyle {
        FillStyle::solid(Color::Rgba(0.0, 0.0, 0.0, 1.0))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::*;

    #[test]
    fn opacity_multiplication_composes_without_touching_the_paint() {
        let fill    = FillStyle::solid(Color::Rgba(1.0, 0.0, 0.0, 1.0)).with_opacity(0.5);
        let faded   = fill.with_multiplied_opacity(0.5);

        assert!(faded.opacity == 0.25);
        assert!(faded.paint == fill.paint);
    }

    #[test]
    fn gradient_fills_scale_opacity_like_any_other_paint() {
        let fill = FillStyle::gradient(Gradient::linear(
            PathPoint::new(0.0, 0.0), Color::Rgba(1.0, 0.0, 0.0, 1.0),
            PathPoint::new(1.0, 0.0), Color::Rgba(0.0, 0.0, 1.0, 1.0)));
        let faded = fill.with_multiplied_opacity(0.25);

        assert!(faded.opacity == 0.25);
        match faded.paint {
            Paint::Gradient(grad)   => assert!(grad.stops[0].color == Color::Rgba(1.0, 0.0, 0.0, 1.0)),
            _                       => assert!(false)
        }
    }

    #[test]
    fn transparent_solid_fill_is_invisible() {
        assert!(FillStyle::solid(Color::Rgba(0.5, 0.5, 0.5, 0.0)).is_invisible());
        assert!(!FillStyle::default().is_invisible());
    }

    #[test]
    fn zero_opacity_makes_any_fill_invisible() {
        assert!(FillStyle::default().with_opacity(0.0).is_invisible());
        assert!(!FillStyle::default().with_opacity(0.5).is_invisible());
    }

    #[test]
    fn transform_composition_applies_own_transform_first() {
        let fill        = FillStyle::default().transformed_by(&Transform2D::translate(2.0, 0.0));
        let composed    = fill.transformed_by(&Transform2D::scale(2.0, 2.0));
        let (x, y)      = composed.transform.transform_point(1.0, 1.0);

        assert!((x - 6.0).abs() < 0.001);
        assert!((y - 2.0).abs() < 0.001);
    }
}
