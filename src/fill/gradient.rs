use crate::geometry::*;

use flo_canvas::*;

///
/// A single colour stop in a gradient
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GradientStop {
    /// Position of this stop along the gradient, from 0.0 to 1.0
    pub position: f32,

    /// Colour at this position
    pub color: Color
}

///
/// A linear or radial gradient between two points
///
#[derive(Clone, PartialEq, Debug)]
pub struct Gradient {
    /// Where the gradient starts
    pub start: PathPoint,

    /// Where the gradient ends
    pub end: PathPoint,

    /// True for a radial gradient centred on the start point, false for a linear gradient
    pub radial: bool,

    /// Colour stops in position order (always at least two)
    pub stops: Vec<GradientStop>
}

impl Gradient {
    ///
    /// Creates a two-stop gradient between two points
    ///
    pub fn linear(start: PathPoint, start_color: Color, end: PathPoint, end_color: Color) -> Gradient {
        Gradient {
            start:  start,
            end:    end,
            radial: false,
            stops:  vec![
                GradientStop { position: 0.0, color: start_color },
                GradientStop { position: 1.0, color: end_color }
            ]
        }
    }

    ///
    /// True if no stop in this gradient would produce any visible output
    ///
    pub fn is_invisible(&self) -> bool {
        self.stops.iter()
            .all(|stop| {
                let (_, _, _, alpha) = stop.color.to_rgba_components();
                alpha <= 0.0
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fully_transparent_gradient_is_invisible() {
        let gradient = Gradient::linear(
            PathPoint::new(0.0, 0.0), Color::Rgba(1.0, 0.0, 0.0, 0.0),
            PathPoint::new(10.0, 0.0), Color::Rgba(0.0, 1.0, 0.0, 0.0));

        assert!(gradient.is_invisible());
    }

    #[test]
    fn any_visible_stop_makes_the_gradient_visible() {
        let gradient = Gradient::linear(
            PathPoint::new(0.0, 0.0), Color::Rgba(1.0, 0.0, 0.0, 0.0),
            PathPoint::new(10.0, 0.0), Color::Rgba(0.0, 1.0, 0.0, 0.5));

        assert!(!gradient.is_invisible());
    }
}
