//! Custom anchor markers
//!
//! An anchor is a small right triangle the router uses as its origin: the
//! right-angle corner is the origin, the short leg lies along the X axis and
//! the long leg (twice as long) along the Y axis.

use crate::error::{CamToolResult, ParameterError};
use crate::shape::Point;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fill colour the router recognises as an anchor.
pub const ANCHOR_FILL: &str = "#ff0000";

/// Direction of the anchor's axes: X towards right (R) or left (L),
/// Y towards top (T) or bottom (B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrientation {
    RT,
    RB,
    LT,
    LB,
}

impl FromStr for AxisOrientation {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RT" => Ok(Self::RT),
            "RB" => Ok(Self::RB),
            "LT" => Ok(Self::LT),
            "LB" => Ok(Self::LB),
            _ => Err(ParameterError::InvalidValue {
                name: "axis_orientation".to_string(),
                reason: format!("expected RT, RB, LT or LB, got '{}'", s),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorMarker {
    pub orientation: AxisOrientation,
    /// Origin, end of the Y leg, end of the X leg (order depends on orientation)
    pub points: [Point; 3],
}

impl AnchorMarker {
    pub fn new(orientation: AxisOrientation, x: f64, y: f64, x_size: f64) -> Self {
        let y_size = 2.0 * x_size;
        let origin = Point::new(x, y);
        let (p1, p2) = match orientation {
            AxisOrientation::RT => (Point::new(x, y - y_size), Point::new(x + x_size, y)),
            AxisOrientation::RB => (Point::new(x + x_size, y), Point::new(x, y + y_size)),
            AxisOrientation::LT => (Point::new(x - x_size, y), Point::new(x, y - y_size)),
            AxisOrientation::LB => (Point::new(x - x_size, y), Point::new(x, y + y_size)),
        };
        Self {
            orientation,
            points: [origin, p1, p2],
        }
    }

    pub fn origin(&self) -> Point {
        self.points[0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalPlacement {
    #[default]
    Left,
    Middle,
    Right,
}

impl FromStr for HorizontalPlacement {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "l" | "left" => Ok(Self::Left),
            "m" | "middle" => Ok(Self::Middle),
            "r" | "right" => Ok(Self::Right),
            _ => Err(ParameterError::InvalidValue {
                name: "x_placement".to_string(),
                reason: format!("expected l, m or r, got '{}'", s),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalPlacement {
    Top,
    Middle,
    #[default]
    Bottom,
}

impl FromStr for VerticalPlacement {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "t" | "top" => Ok(Self::Top),
            "m" | "middle" => Ok(Self::Middle),
            "b" | "bottom" => Ok(Self::Bottom),
            _ => Err(ParameterError::InvalidValue {
                name: "y_placement".to_string(),
                reason: format!("expected t, m or b, got '{}'", s),
            }),
        }
    }
}

/// Where to put a free-standing anchor on a document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPlacement {
    pub orientation: AxisOrientation,
    /// Length of the X leg in mm; the Y leg is twice as long
    pub x_size: f64,
    pub horizontal: HorizontalPlacement,
    pub vertical: VerticalPlacement,
}

impl Default for AnchorPlacement {
    fn default() -> Self {
        Self {
            orientation: AxisOrientation::RT,
            x_size: 10.0,
            horizontal: HorizontalPlacement::Left,
            vertical: VerticalPlacement::Bottom,
        }
    }
}

/// Place an anchor at a corner, edge midpoint or center of a document.
pub fn place_anchor(
    placement: &AnchorPlacement,
    doc_width: f64,
    doc_height: f64,
) -> CamToolResult<AnchorMarker> {
    if !(placement.x_size.is_finite() && placement.x_size > 0.0) {
        return Err(ParameterError::InvalidDimensions(format!(
            "anchor size must be positive, got {}",
            placement.x_size
        ))
        .into());
    }
    for (name, value) in [("doc_width", doc_width), ("doc_height", doc_height)] {
        if !(value.is_finite() && value >= 0.0) {
            return Err(ParameterError::InvalidDimensions(format!(
                "{} must be a non-negative length, got {}",
                name, value
            ))
            .into());
        }
    }

    let x = match placement.horizontal {
        HorizontalPlacement::Left => 0.0,
        HorizontalPlacement::Middle => doc_width / 2.0,
        HorizontalPlacement::Right => doc_width,
    };
    let y = match placement.vertical {
        VerticalPlacement::Top => 0.0,
        VerticalPlacement::Middle => doc_height / 2.0,
        VerticalPlacement::Bottom => doc_height,
    };

    Ok(AnchorMarker::new(placement.orientation, x, y, placement.x_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CamToolError;

    #[test]
    fn test_anchor_orientations() {
        let rt = AnchorMarker::new(AxisOrientation::RT, 0.0, 15.0, 7.5);
        assert_eq!(
            rt.points,
            [
                Point::new(0.0, 15.0),
                Point::new(0.0, 0.0),
                Point::new(7.5, 15.0)
            ]
        );

        let rb = AnchorMarker::new(AxisOrientation::RB, 1.0, 1.0, 2.0);
        assert_eq!(rb.points[1], Point::new(3.0, 1.0));
        assert_eq!(rb.points[2], Point::new(1.0, 5.0));

        let lt = AnchorMarker::new(AxisOrientation::LT, 1.0, 1.0, 2.0);
        assert_eq!(lt.points[1], Point::new(-1.0, 1.0));
        assert_eq!(lt.points[2], Point::new(1.0, -3.0));

        let lb = AnchorMarker::new(AxisOrientation::LB, 1.0, 1.0, 2.0);
        assert_eq!(lb.points[1], Point::new(-1.0, 1.0));
        assert_eq!(lb.points[2], Point::new(1.0, 5.0));
    }

    #[test]
    fn test_default_placement_is_bottom_left() {
        let marker = place_anchor(&AnchorPlacement::default(), 200.0, 100.0).unwrap();
        assert_eq!(marker.origin(), Point::new(0.0, 100.0));
        assert_eq!(marker.orientation, AxisOrientation::RT);
    }

    #[test]
    fn test_centered_placement() {
        let placement = AnchorPlacement {
            orientation: AxisOrientation::LB,
            x_size: 5.0,
            horizontal: "m".parse().unwrap(),
            vertical: "middle".parse().unwrap(),
        };
        let marker = place_anchor(&placement, 200.0, 100.0).unwrap();
        assert_eq!(marker.origin(), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!("XY".parse::<AxisOrientation>().is_err());
        assert!("q".parse::<HorizontalPlacement>().is_err());
        assert!("q".parse::<VerticalPlacement>().is_err());

        let placement = AnchorPlacement {
            x_size: 0.0,
            ..AnchorPlacement::default()
        };
        assert!(matches!(
            place_anchor(&placement, 10.0, 10.0),
            Err(CamToolError::Parameter(ParameterError::InvalidDimensions(_)))
        ));
    }

    #[test]
    fn test_document_size_must_be_a_length() {
        let placement = AnchorPlacement::default();
        for (width, height) in [(f64::NAN, 10.0), (10.0, -1.0), (f64::INFINITY, 10.0)] {
            assert!(
                matches!(
                    place_anchor(&placement, width, height),
                    Err(CamToolError::Parameter(_))
                ),
                "accepted {width} x {height}"
            );
        }

        // An empty document still has a corner to anchor to
        let marker = place_anchor(&placement, 0.0, 0.0).unwrap();
        assert_eq!(marker.origin(), Point::new(0.0, 0.0));
    }
}
