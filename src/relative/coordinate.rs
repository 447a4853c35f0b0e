use log::warn;

use std::fmt;

///
/// A single axis of a relative point: either an absolute value or an offset
/// from one axis of a named anchor point
///
#[derive(Clone, PartialEq, Debug)]
pub enum RelativeCoordinate {
    /// A fixed value
    Absolute(f64),

    /// An offset from a named anchor
    Anchored { anchor: String, offset: f64 }
}

impl RelativeCoordinate {
    ///
    /// Creates a coordinate anchored to a named point with no offset
    ///
    pub fn anchored(anchor: &str) -> RelativeCoordinate {
        RelativeCoordinate::Anchored { anchor: anchor.to_string(), offset: 0.0 }
    }

    ///
    /// True if this coordinate depends on an anchor and can change without a
    /// direct edit
    ///
    pub fn is_dynamic(&self) -> bool {
        match self {
            RelativeCoordinate::Absolute(_)     => false,
            RelativeCoordinate::Anchored { .. } => true
        }
    }

    ///
    /// Resolves this coordinate to a concrete value, looking up anchors
    /// through the supplied function (which picks the relevant axis of the
    /// anchor point)
    ///
    pub fn resolve_with<AnchorFn: Fn(&str) -> f64>(&self, anchor_value: AnchorFn) -> f64 {
        match self {
            RelativeCoordinate::Absolute(value)             => *value,
            RelativeCoordinate::Anchored { anchor, offset } => anchor_value(anchor) + offset
        }
    }

    ///
    /// Parses a coordinate expression: a plain number, an anchor name, or an
    /// anchor name followed by `+ offset` or `- offset`.
    ///
    /// Parsing is deliberately lenient: text that cannot be understood
    /// degrades to 0 rather than failing, as content in the tree is edited by
    /// other tools and must never abort a redraw.
    ///
    pub fn parse(text: &str) -> RelativeCoordinate {
        let text = text.trim();

        if text.is_empty() {
            return RelativeCoordinate::Absolute(0.0);
        }

        if let Ok(value) = text.parse::<f64>() {
            return RelativeCoordinate::Absolute(value);
        }

        // Anchor expression: name, optionally followed by '+ n' or '- n'
        for (split_at, sign) in text.char_indices().skip(1).filter_map(|(pos, chr)| {
            match chr {
                '+' => Some((pos, 1.0)),
                '-' => Some((pos, -1.0)),
                _   => None
            }
        }) {
            let anchor = text[..split_at].trim();
            let offset = text[split_at+1..].trim();

            if let Ok(offset) = offset.parse::<f64>() {
                return RelativeCoordinate::Anchored {
                    anchor: anchor.to_string(),
                    offset: offset * sign
                };
            }
        }

        if text.contains('+') || text.contains('-') {
            warn!("Could not parse offset in coordinate expression '{}'", text);
        }

        RelativeCoordinate::Anchored { anchor: text.to_string(), offset: 0.0 }
    }
}

impl fmt::Display for RelativeCoordinate {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RelativeCoordinate::Absolute(value)             => write!(formatter, "{}", value),
            RelativeCoordinate::Anchored { anchor, offset } => {
                if *offset == 0.0 {
                    write!(formatter, "{}", anchor)
                } else if *offset > 0.0 {
                    write!(formatter, "{} + {}", anchor, offset)
                } else {
                    write!(formatter, "{} - {}", anchor, -offset)
                }
            }
        }
    }
}

impl From<f64> for RelativeCoordinate {
    fn from(value: f64) -> RelativeCoordinate {
        RelativeCoordinate::Absolute(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_absolute_values() {
        assert!(RelativeCoordinate::parse("12.5") == RelativeCoordinate::Absolute(12.5));
        assert!(RelativeCoordinate::parse(" -3 ") == RelativeCoordinate::Absolute(-3.0));
    }

    #[test]
    fn parses_anchor_names() {
        assert!(RelativeCoordinate::parse("handle.left") == RelativeCoordinate::anchored("handle.left"));
    }

    #[test]
    fn parses_anchor_offsets() {
        assert!(RelativeCoordinate::parse("handle + 4") == RelativeCoordinate::Anchored { anchor: "handle".to_string(), offset: 4.0 });
        assert!(RelativeCoordinate::parse("handle - 2.5") == RelativeCoordinate::Anchored { anchor: "handle".to_string(), offset: -2.5 });
    }

    #[test]
    fn empty_text_degrades_to_zero() {
        assert!(RelativeCoordinate::parse("") == RelativeCoordinate::Absolute(0.0));
    }

    #[test]
    fn round_trips_through_display() {
        for text in ["12.5", "handle", "handle + 4", "handle - 2.5"].iter() {
            let parsed = RelativeCoordinate::parse(text);
            assert!(RelativeCoordinate::parse(&parsed.to_string()) == parsed);
        }
    }

    #[test]
    fn resolves_against_anchor_values() {
        let coord = RelativeCoordinate::Anchored { anchor: "a".to_string(), offset: 2.0 };

        assert!(coord.resolve_with(|_| 10.0) == 12.0);
        assert!(RelativeCoordinate::Absolute(5.0).resolve_with(|_| 10.0) == 5.0);
    }
}
