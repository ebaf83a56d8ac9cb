//! Cut shapes handed to the drawing host.

use crate::routing::RoutingClassification;
use dovetailkit_core::units::{format_length, get_unit_label, MeasurementSystem};
use serde::{Deserialize, Serialize};

/// A 2-D point in millimeters. The y axis points down into the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Depth a shape is cut to, tagged with the unit the router should display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutDepth {
    pub value_mm: f64,
    #[serde(default)]
    pub units: MeasurementSystem,
}

impl CutDepth {
    pub fn new(value_mm: f64, units: MeasurementSystem) -> Self {
        Self { value_mm, units }
    }

    pub fn mm(value_mm: f64) -> Self {
        Self::new(value_mm, MeasurementSystem::Metric)
    }

    /// Encoded attribute value, e.g. `15.000mm` or `0.591in`.
    pub fn encode(&self) -> String {
        format!(
            "{}{}",
            format_length(self.value_mm, self.units),
            get_unit_label(self.units)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeGeometry {
    /// Closed polygon, points in drawing order
    Polygon { points: Vec<Point> },
    /// Axis-aligned rectangle, `min` is the top-left corner
    Rectangle { min: Point, max: Point },
}

/// A region to cut (or a guide to draw) with its routing tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutShape {
    pub geometry: ShapeGeometry,
    pub classification: RoutingClassification,
    pub depth: Option<CutDepth>,
}

impl CutShape {
    /// Rectangle spanning two opposite corners given in any order.
    pub fn rectangle(
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        classification: RoutingClassification,
    ) -> Self {
        Self {
            geometry: ShapeGeometry::Rectangle {
                min: Point::new(x0.min(x1), y0.min(y1)),
                max: Point::new(x0.max(x1), y0.max(y1)),
            },
            classification,
            depth: None,
        }
    }

    pub fn polygon(points: Vec<Point>, classification: RoutingClassification) -> Self {
        debug_assert!(points.len() >= 3, "a polygon needs at least three points");
        Self {
            geometry: ShapeGeometry::Polygon { points },
            classification,
            depth: None,
        }
    }

    pub fn with_depth(mut self, depth: CutDepth) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_classification(mut self, classification: RoutingClassification) -> Self {
        self.classification = classification;
        self
    }

    pub fn is_rectangle(&self) -> bool {
        matches!(self.geometry, ShapeGeometry::Rectangle { .. })
    }

    /// Outline points. Rectangles are expanded clockwise from the top-left corner.
    pub fn points(&self) -> Vec<Point> {
        match &self.geometry {
            ShapeGeometry::Polygon { points } => points.clone(),
            ShapeGeometry::Rectangle { min, max } => vec![
                *min,
                Point::new(max.x, min.y),
                *max,
                Point::new(min.x, max.y),
            ],
        }
    }

    /// Axis-aligned bounding box as `(min, max)`.
    pub fn bounds(&self) -> (Point, Point) {
        match &self.geometry {
            ShapeGeometry::Rectangle { min, max } => (*min, *max),
            ShapeGeometry::Polygon { points } => points.iter().fold(
                (
                    Point::new(f64::INFINITY, f64::INFINITY),
                    Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
                ),
                |(lo, hi), p| {
                    (
                        Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                        Point::new(hi.x.max(p.x), hi.y.max(p.y)),
                    )
                },
            ),
        }
    }
}
