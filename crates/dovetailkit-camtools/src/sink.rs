//! Shape insertion seam between the layout and a drawing host.

use crate::anchor::{AnchorMarker, ANCHOR_FILL};
use crate::dovetail::Annotation;
use crate::error::CamToolResult;
use crate::routing::{style_for, RoutingClassification};
use crate::shape::{CutShape, Point};
use dovetailkit_core::units::UnitConverter;
use serde::Serialize;
use tracing::trace;

/// Accepts finished layout elements. Coordinates arrive in millimeters; the
/// sink converts them to whatever its document uses.
pub trait ShapeSink {
    /// Opaque reference to an inserted element
    type Handle;

    fn insert_shape(&mut self, shape: &CutShape) -> Self::Handle;
    fn insert_anchor(&mut self, anchor: &AnchorMarker) -> Self::Handle;
    fn insert_annotation(&mut self, annotation: &Annotation) -> Self::Handle;
}

/// An element as a host would store it, in user units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SinkRecord {
    Shape {
        points: Vec<(f64, f64)>,
        rectangle: bool,
        classification: RoutingClassification,
        fill: Option<&'static str>,
        stroke: Option<&'static str>,
        cut_depth: Option<String>,
    },
    Anchor {
        points: Vec<(f64, f64)>,
        fill: &'static str,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
        bold: bool,
        fill: Option<&'static str>,
    },
}

/// Sink that keeps every inserted element in memory. The handle is the
/// element's index.
#[derive(Debug, Clone)]
pub struct RecordingSink<C> {
    converter: C,
    records: Vec<SinkRecord>,
}

impl<C: UnitConverter> RecordingSink<C> {
    pub fn new(converter: C) -> Self {
        Self {
            converter,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[SinkRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<SinkRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_json(&self) -> CamToolResult<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    fn convert(&self, points: &[Point]) -> Vec<(f64, f64)> {
        points
            .iter()
            .map(|p| self.converter.point_to_user_units(p.x, p.y))
            .collect()
    }

    fn push(&mut self, record: SinkRecord) -> usize {
        trace!(index = self.records.len(), ?record, "inserted element");
        self.records.push(record);
        self.records.len() - 1
    }
}

impl<C: UnitConverter> ShapeSink for RecordingSink<C> {
    type Handle = usize;

    fn insert_shape(&mut self, shape: &CutShape) -> usize {
        let style = style_for(shape.classification);
        let record = SinkRecord::Shape {
            points: self.convert(&shape.points()),
            rectangle: shape.is_rectangle(),
            classification: shape.classification,
            fill: style.fill,
            stroke: style.stroke,
            cut_depth: shape.depth.map(|d| d.encode()),
        };
        self.push(record)
    }

    fn insert_anchor(&mut self, anchor: &AnchorMarker) -> usize {
        let record = SinkRecord::Anchor {
            points: self.convert(&anchor.points),
            fill: ANCHOR_FILL,
        };
        self.push(record)
    }

    fn insert_annotation(&mut self, annotation: &Annotation) -> usize {
        let (x, y) = self
            .converter
            .point_to_user_units(annotation.x, annotation.y);
        let record = SinkRecord::Text {
            x,
            y,
            text: annotation.text.clone(),
            font_size: self.converter.to_user_units(annotation.font_size),
            bold: annotation.bold,
            fill: style_for(RoutingClassification::Guide).fill,
        };
        self.push(record)
    }
}
