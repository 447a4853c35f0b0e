use super::value_tree::*;
use super::undo::*;
use super::image_provider::*;
use crate::fill::*;
use crate::relative::*;

use flo_canvas::*;
use itertools::Itertools;
use log::warn;

use std::cmp::Ordering;

pub const FILL_TYPE: &str           = "type";
pub const FILL_TYPE_SOLID: &str     = "solid";
pub const FILL_TYPE_GRADIENT: &str  = "gradient";
pub const FILL_TYPE_IMAGE: &str     = "image";

pub const ATTR_OPACITY: &str            = "opacity";
pub const ATTR_COLOUR: &str             = "colour";
pub const ATTR_COLOUR1: &str            = "colour1";
pub const ATTR_COLOUR2: &str            = "colour2";
pub const ATTR_STOP_AT1: &str           = "at1";
pub const ATTR_STOP_AT2: &str           = "at2";
pub const ATTR_GRADIENT_POINT1: &str    = "point1";
pub const ATTR_GRADIENT_POINT2: &str    = "point2";
pub const ATTR_RADIAL: &str             = "radial";
pub const ATTR_IMAGE_ID: &str           = "imageId";
pub const ATTR_IMAGE_OPACITY: &str      = "imageOpacity";

pub const STOP_NODE: &str           = "Stop";
pub const ATTR_STOP_AT: &str        = "at";

///
/// Formats a colour as an 8-digit RGBA hex string
///
pub fn format_color(color: &Color) -> String {
    let (r, g, b, a) = color.to_rgba_components();

    format!("{:02x}{:02x}{:02x}{:02x}",
        (r.max(0.0).min(1.0) * 255.0).round() as u8,
        (g.max(0.0).min(1.0) * 255.0).round() as u8,
        (b.max(0.0).min(1.0) * 255.0).round() as u8,
        (a.max(0.0).min(1.0) * 255.0).round() as u8)
}

///
/// Parses an 8-digit RGBA hex string (malformed text degrades to opaque black)
///
pub fn parse_color(text: &str) -> Color {
    let text = text.trim();

    let components = if text.len() == 8 {
        (0..4)
            .map(|component| u8::from_str_radix(&text[component*2..component*2+2], 16).ok())
            .collect::<Option<Vec<_>>>()
    } else {
        None
    };

    match components {
        Some(components)    => Color::Rgba(
            components[0] as f32 / 255.0,
            components[1] as f32 / 255.0,
            components[2] as f32 / 255.0,
            components[3] as f32 / 255.0),

        None                => {
            warn!("Could not parse colour '{}'", text);
            Color::Rgba(0.0, 0.0, 0.0, 1.0)
        }
    }
}

///
/// Typed view over a fill node (the `Fill` or `Stroke` child of a path node)
///
pub struct FillState {
    state: ValueTree
}

impl FillState {
    pub fn from(state: ValueTree) -> FillState {
        FillState { state }
    }

    pub fn tree(&self) -> &ValueTree {
        &self.state
    }

    ///
    /// Decodes the fill style stored on this node. Unknown fill types decode
    /// as the default solid black fill.
    ///
    pub fn fill_style(&self, images: &dyn ImageProvider) -> FillStyle {
        let fill_type = self.state.attribute(FILL_TYPE)
            .map(|value| value.as_text())
            .unwrap_or_else(|| FILL_TYPE_SOLID.to_string());

        // Overall opacity applies to every fill type
        let opacity = self.state.attribute(ATTR_OPACITY)
            .map(|value| value.as_number() as f32)
            .unwrap_or(1.0);

        let style = match fill_type.as_str() {
            FILL_TYPE_SOLID     => {
                let color = self.state.attribute(ATTR_COLOUR)
                    .map(|value| parse_color(&value.as_text()))
                    .unwrap_or(Color::Rgba(0.0, 0.0, 0.0, 1.0));

                FillStyle::solid(color)
            }

            FILL_TYPE_GRADIENT  => FillStyle::gradient(self.gradient()),

            FILL_TYPE_IMAGE     => {
                let identifier  = self.state.attribute(ATTR_IMAGE_ID).map(|value| value.as_text()).unwrap_or_else(String::new);
                let opacity     = self.state.attribute(ATTR_IMAGE_OPACITY).map(|value| value.as_number() as f32).unwrap_or(1.0);

                match images.image_for_identifier(&identifier) {
                    Some(image) => FillStyle::image(ImageReference { opacity, ..image }),
                    None        => {
                        warn!("Unknown image '{}' in fill, substituting solid black", identifier);
                        FillStyle::default()
                    }
                }
            }

            unknown             => {
                warn!("Unknown fill type '{}', substituting solid black", unknown);
                FillStyle::default()
            }
        };

        style.with_opacity(opacity)
    }

    ///
    /// Decodes the gradient stored on this node: `colour1`/`colour2` are the
    /// end stops (at `at1`/`at2`, defaulting to 0 and 1), interior stops are
    /// `Stop` children ordered by position
    ///
    fn gradient(&self) -> Gradient {
        let start   = RelativePoint::parse(&self.state.attribute(ATTR_GRADIENT_POINT1).map(|value| value.as_text()).unwrap_or_else(String::new)).resolve(&());
        let end     = RelativePoint::parse(&self.state.attribute(ATTR_GRADIENT_POINT2).map(|value| value.as_text()).unwrap_or_else(String::new)).resolve(&());
        let radial  = self.state.attribute(ATTR_RADIAL).map(|value| value.as_flag()).unwrap_or(false);

        let colour1 = self.state.attribute(ATTR_COLOUR1).map(|value| parse_color(&value.as_text())).unwrap_or(Color::Rgba(0.0, 0.0, 0.0, 1.0));
        let colour2 = self.state.attribute(ATTR_COLOUR2).map(|value| parse_color(&value.as_text())).unwrap_or(Color::Rgba(0.0, 0.0, 0.0, 1.0));
        let at1     = self.state.attribute(ATTR_STOP_AT1).map(|value| value.as_number() as f32).unwrap_or(0.0);
        let at2     = self.state.attribute(ATTR_STOP_AT2).map(|value| value.as_number() as f32).unwrap_or(1.0);

        let interior = self.state.children().into_iter()
            .filter(|child| child.has_type(STOP_NODE))
            .map(|stop| GradientStop {
                position:   stop.attribute(ATTR_STOP_AT).map(|value| value.as_number() as f32).unwrap_or(0.5),
                color:      stop.attribute(ATTR_COLOUR).map(|value| parse_color(&value.as_text())).unwrap_or(Color::Rgba(0.0, 0.0, 0.0, 1.0))
            })
            .sorted_by(|a, b| a.position.partial_cmp(&b.position).unwrap_or(Ordering::Equal));

        let mut stops = vec![GradientStop { position: at1, color: colour1 }];
        stops.extend(interior);
        stops.push(GradientStop { position: at2, color: colour2 });

        Gradient {
            start:  start,
            end:    end,
            radial: radial,
            stops:  stops
        }
    }

    ///
    /// Encodes a fill style onto this node, replacing whatever was stored
    /// before
    ///
    pub fn set_fill_style(&self, fill: &FillStyle, images: &dyn ImageProvider, undo: Option<&UndoManager>) {
        // Clear out attributes belonging to other fill types
        for name in [ATTR_OPACITY, ATTR_COLOUR, ATTR_COLOUR1, ATTR_COLOUR2, ATTR_STOP_AT1, ATTR_STOP_AT2, ATTR_GRADIENT_POINT1, ATTR_GRADIENT_POINT2, ATTR_RADIAL, ATTR_IMAGE_ID, ATTR_IMAGE_OPACITY].iter() {
            self.state.remove_attribute(name, undo);
        }

        for stop in self.state.children().into_iter().filter(|child| child.has_type(STOP_NODE)) {
            self.state.remove_child(&stop, undo);
        }

        if fill.opacity != 1.0 {
            self.state.set_attribute(ATTR_OPACITY, fill.opacity as f64, undo);
        }

        match &fill.paint {
            Paint::Solid(color)     => {
                self.state.set_attribute(FILL_TYPE, FILL_TYPE_SOLID, undo);
                self.state.set_attribute(ATTR_COLOUR, format_color(color), undo);
            }

            Paint::Gradient(grad)   => {
                self.state.set_attribute(FILL_TYPE, FILL_TYPE_GRADIENT, undo);
                self.state.set_attribute(ATTR_GRADIENT_POINT1, RelativePoint::from(grad.start).to_string(), undo);
                self.state.set_attribute(ATTR_GRADIENT_POINT2, RelativePoint::from(grad.end).to_string(), undo);

                if grad.radial {
                    self.state.set_attribute(ATTR_RADIAL, true, undo);
                }

                let first   = grad.stops.first();
                let last    = grad.stops.last();

                self.state.set_attribute(ATTR_COLOUR1, first.map(|stop| format_color(&stop.color)).unwrap_or_else(|| format_color(&Color::Rgba(0.0, 0.0, 0.0, 1.0))), undo);
                self.state.set_attribute(ATTR_COLOUR2, last.map(|stop| format_color(&stop.color)).unwrap_or_else(|| format_color(&Color::Rgba(0.0, 0.0, 0.0, 1.0))), undo);

                // End stops away from 0 and 1 keep their positions
                if let Some(first) = first {
                    if first.position != 0.0 {
                        self.state.set_attribute(ATTR_STOP_AT1, first.position as f64, undo);
                    }
                }
                if let Some(last) = last {
                    if last.position != 1.0 {
                        self.state.set_attribute(ATTR_STOP_AT2, last.position as f64, undo);
                    }
                }

                if grad.stops.len() > 2 {
                    for stop in &grad.stops[1..grad.stops.len()-1] {
                        let stop_node = ValueTree::new(STOP_NODE);
                        stop_node.set_attribute(ATTR_STOP_AT, stop.position as f64, None);
                        stop_node.set_attribute(ATTR_COLOUR, format_color(&stop.color), None);
                        self.state.add_child(stop_node, undo);
                    }
                }
            }

            Paint::Image(image)     => {
                self.state.set_attribute(FILL_TYPE, FILL_TYPE_IMAGE, undo);
                self.state.set_attribute(ATTR_IMAGE_ID, images.identifier_for_image(image), undo);
                self.state.set_attribute(ATTR_IMAGE_OPACITY, image.opacity as f64, undo);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::*;

    #[test]
    fn colours_round_trip_through_hex() {
        let color = Color::Rgba(1.0, 0.5, 0.25, 1.0);
        let text  = format_color(&color);

        assert!(text == "ff8040ff");

        let (r, g, b, a) = parse_color(&text).to_rgba_components();
        assert!((r - 1.0).abs() < 0.01 && (g - 0.5).abs() < 0.01 && (b - 0.25).abs() < 0.01 && (a - 1.0).abs() < 0.01);
    }

    #[test]
    fn malformed_colours_degrade_to_black() {
        assert!(parse_color("chartreuse") == Color::Rgba(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn solid_fill_round_trips() {
        let node = FillState::from(ValueTree::new("Fill"));
        let fill = FillStyle::solid(Color::Rgba(1.0, 0.0, 0.0, 1.0));

        node.set_fill_style(&fill, &NoImages, None);
        assert!(node.fill_style(&NoImages) == fill);
    }

    #[test]
    fn gradient_fill_round_trips() {
        let node        = FillState::from(ValueTree::new("Fill"));
        let mut grad    = Gradient::linear(
            PathPoint::new(0.0, 0.0), Color::Rgba(1.0, 0.0, 0.0, 1.0),
            PathPoint::new(10.0, 10.0), Color::Rgba(0.0, 0.0, 1.0, 1.0));
        grad.stops.insert(1, GradientStop { position: 0.5, color: Color::Rgba(0.0, 1.0, 0.0, 1.0) });

        let fill = FillStyle::gradient(grad);
        node.set_fill_style(&fill, &NoImages, None);

        assert!(node.fill_style(&NoImages) == fill);
    }

    #[test]
    fn gradient_end_stops_keep_their_positions() {
        let node        = FillState::from(ValueTree::new("Fill"));
        let mut grad    = Gradient::linear(
            PathPoint::new(0.0, 0.0), Color::Rgba(1.0, 0.0, 0.0, 1.0),
            PathPoint::new(10.0, 10.0), Color::Rgba(0.0, 0.0, 1.0, 1.0));
        grad.stops[0].position = 0.25;
        grad.stops[1].position = 0.9;
        grad.stops.insert(1, GradientStop { position: 0.5, color: Color::Rgba(0.0, 1.0, 0.0, 1.0) });

        let fill = FillStyle::gradient(grad);
        node.set_fill_style(&fill, &NoImages, None);

        assert!(node.fill_style(&NoImages) == fill);
    }

    #[test]
    fn fill_opacity_round_trips() {
        let node = FillState::from(ValueTree::new("Fill"));
        let fill = FillStyle::solid(Color::Rgba(1.0, 0.0, 0.0, 1.0)).with_opacity(0.5);

        node.set_fill_style(&fill, &NoImages, None);
        assert!(node.fill_style(&NoImages) == fill);

        // Full opacity is the default and is not stored
        node.set_fill_style(&FillStyle::default(), &NoImages, None);
        assert!(node.tree().attribute(ATTR_OPACITY) == None);
        assert!(node.fill_style(&NoImages) == FillStyle::default());
    }

    #[test]
    fn empty_fill_node_decodes_as_black() {
        let node = FillState::from(ValueTree::new("Fill"));

        assert!(node.fill_style(&NoImages) == FillStyle::default());
    }

    #[test]
    fn unknown_fill_type_decodes_as_black() {
        let node = FillState::from(ValueTree::new("Fill"));
        node.tree().set_attribute(FILL_TYPE, "plasma", None);

        assert!(node.fill_style(&NoImages) == FillStyle::default());
    }

    #[test]
    fn image_fill_resolves_through_the_provider() {
        struct OneImage;
        impl ImageProvider for OneImage {
            fn image_for_identifier(&self, identifier: &str) -> Option<ImageReference> {
                if identifier == "img-1" {
                    Some(ImageReference { identifier: identifier.to_string(), opacity: 1.0 })
                } else {
                    None
                }
            }

            fn identifier_for_image(&self, image: &ImageReference) -> String {
                image.identifier.clone()
            }
        }

        let node = FillState::from(ValueTree::new("Fill"));
        let fill = FillStyle::image(ImageReference { identifier: "img-1".to_string(), opacity: 0.5 });

        node.set_fill_style(&fill, &OneImage, None);
        assert!(node.fill_style(&OneImage) == fill);

        // An unknown image degrades to the default fill
        node.tree().set_attribute(ATTR_IMAGE_ID, "img-2", None);
        assert!(node.fill_style(&OneImage) == FillStyle::default());
    }
}
