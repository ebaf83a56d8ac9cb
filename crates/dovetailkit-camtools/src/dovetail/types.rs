//! Type definitions for the Dovetail Joint Maker

use crate::anchor::AnchorMarker;
use crate::error::{ParameterError, ParameterResult};
use crate::shape::CutShape;
use crate::sink::ShapeSink;
use dovetailkit_core::units::MeasurementSystem;
use serde::{Deserialize, Serialize};

/// Physical description of the joint. All lengths are in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JointParameters {
    /// Taper angle of the dovetail bit in degrees
    pub cut_angle: f64,
    /// Widest (bottom) diameter of the dovetail bit
    pub tail_bit_diameter: f64,
    /// Diameter of the straight bit
    pub pin_bit_diameter: f64,
    pub tail_thickness: f64,
    /// Also the plunge depth of the dovetail bit
    pub pin_thickness: f64,
    #[serde(alias = "width")]
    pub board_width: f64,
    /// Width of a tail at its wide end
    #[serde(alias = "width_tails")]
    pub tail_width: f64,
    pub num_tails: u32,
}

impl Default for JointParameters {
    fn default() -> Self {
        Self {
            cut_angle: 15.0,
            tail_bit_diameter: 13.8,
            pin_bit_diameter: 8.0,
            tail_thickness: 15.0,
            pin_thickness: 15.0,
            board_width: 150.0,
            tail_width: 20.0,
            num_tails: 2,
        }
    }
}

impl JointParameters {
    /// Check every value against its basic domain.
    ///
    /// This does not check whether the joint can be cut; see
    /// [`resolve`](super::resolve) for that.
    pub fn validate(&self) -> ParameterResult<()> {
        if !(self.cut_angle > 0.0 && self.cut_angle < 90.0) {
            return Err(ParameterError::OutOfRange {
                name: "cut_angle".to_string(),
                value: self.cut_angle,
                min: 0.0,
                max: 90.0,
            });
        }

        let lengths = [
            ("tail_bit_diameter", self.tail_bit_diameter),
            ("pin_bit_diameter", self.pin_bit_diameter),
            ("tail_thickness", self.tail_thickness),
            ("pin_thickness", self.pin_thickness),
            ("board_width", self.board_width),
            ("tail_width", self.tail_width),
        ];
        for (name, value) in lengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParameterError::InvalidDimensions(format!(
                    "{} must be a positive length, got {}",
                    name, value
                )));
            }
        }

        if self.num_tails == 0 {
            return Err(ParameterError::InvalidValue {
                name: "num_tails".to_string(),
                reason: "at least one tail is required".to_string(),
            });
        }

        Ok(())
    }
}

/// Derived quantities of a joint that passed validation.
///
/// Only [`resolve`](super::resolve) creates these, so every instance satisfies
/// `upper_tail_diameter > 0`, `smaller_tail_width >= pin_bit_diameter`,
/// `inter_tail_cut_width >= upper_tail_diameter` and
/// `cumulative_tail_width < board_width`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedGeometry {
    pub(super) params: JointParameters,
    pub(super) tan_cut_angle: f64,
    pub(super) is_odd_tail_count: bool,
    pub(super) upper_tail_diameter: f64,
    pub(super) smaller_tail_width: f64,
    pub(super) num_tail_cuts: u64,
    pub(super) inter_tail_cut_width: f64,
}

impl ResolvedGeometry {
    pub fn params(&self) -> &JointParameters {
        &self.params
    }

    pub fn tan_cut_angle(&self) -> f64 {
        self.tan_cut_angle
    }

    pub fn is_odd_tail_count(&self) -> bool {
        self.is_odd_tail_count
    }

    /// Cutting width of the dovetail bit at the top of the pin board
    pub fn upper_tail_diameter(&self) -> f64 {
        self.upper_tail_diameter
    }

    /// Width of a tail at its narrow end
    pub fn smaller_tail_width(&self) -> f64 {
        self.smaller_tail_width
    }

    /// Number of gaps cut between tails; odd counts get one extra
    pub fn num_tail_cuts(&self) -> u64 {
        self.num_tail_cuts
    }

    pub fn cumulative_tail_width(&self) -> f64 {
        self.num_tail_cuts as f64 * self.params.tail_width
    }

    /// Width of each gap cut with the dovetail bit
    pub fn inter_tail_cut_width(&self) -> f64 {
        self.inter_tail_cut_width
    }

    /// Center-to-center distance of neighbouring tails
    pub fn tail_pitch(&self) -> f64 {
        self.inter_tail_cut_width + self.params.tail_width
    }
}

/// Layout tunables. Lengths are in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Cuts run past both board faces by bit diameter times this factor
    pub overcut_buffer_factor: f64,
    /// Dovetail bit cuts run past the lower face by its full diameter times this factor
    pub lower_dovetail_buffer_factor: f64,
    /// Fixed overrun past the left and right board edges
    pub horizontal_buffer: f64,
    pub font_size: f64,
    /// Line height as a multiple of the font size
    pub line_height_factor: f64,
    /// Vertical gap between the pin board drawing and the tail board drawing
    pub board_separation: f64,
    /// Unit written into depth tags and instruction text
    pub depth_units: MeasurementSystem,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            overcut_buffer_factor: 0.55,
            lower_dovetail_buffer_factor: 1.0,
            horizontal_buffer: 2.0,
            font_size: 4.0,
            line_height_factor: 1.6,
            board_separation: 50.0,
            depth_units: MeasurementSystem::Metric,
        }
    }
}

impl LayoutSettings {
    pub fn line_height(&self) -> f64 {
        self.font_size * self.line_height_factor
    }

    pub fn validate(&self) -> ParameterResult<()> {
        let values = [
            ("overcut_buffer_factor", self.overcut_buffer_factor),
            ("lower_dovetail_buffer_factor", self.lower_dovetail_buffer_factor),
            ("horizontal_buffer", self.horizontal_buffer),
            ("font_size", self.font_size),
            ("line_height_factor", self.line_height_factor),
            ("board_separation", self.board_separation),
        ];
        for (name, value) in values {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParameterError::InvalidValue {
                    name: name.to_string(),
                    reason: format!("must be positive, got {}", value),
                });
            }
        }
        Ok(())
    }
}

/// Operator instruction placed below a board drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font_size: f64,
    pub bold: bool,
}

/// Everything drawn for one board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardLayout {
    /// Outline of the board, never cut
    pub guide: CutShape,
    pub cuts: Vec<CutShape>,
    pub anchor: AnchorMarker,
    pub annotations: Vec<Annotation>,
    /// y coordinate of the board's top face
    pub origin_y: f64,
    /// Lowest y reached by any cut (annotations excluded)
    pub lower_end: f64,
}

impl BoardLayout {
    /// Push guide, cuts, anchor and annotations into `sink`, in that order.
    pub fn emit<S: ShapeSink>(&self, sink: &mut S) -> Vec<S::Handle> {
        let mut handles = Vec::with_capacity(self.cuts.len() + self.annotations.len() + 2);
        handles.push(sink.insert_shape(&self.guide));
        handles.extend(self.cuts.iter().map(|cut| sink.insert_shape(cut)));
        handles.push(sink.insert_anchor(&self.anchor));
        handles.extend(self.annotations.iter().map(|a| sink.insert_annotation(a)));
        handles
    }
}

/// Both boards of a joint in one coordinate space; the tail board sits below
/// the pin board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JointLayout {
    pub pin_board: BoardLayout,
    pub tail_board: BoardLayout,
}

impl JointLayout {
    /// Cut shapes in emission order: pin guide, pin cuts, tail guide, tail cuts.
    pub fn shapes(&self) -> impl Iterator<Item = &CutShape> {
        std::iter::once(&self.pin_board.guide)
            .chain(self.pin_board.cuts.iter())
            .chain(std::iter::once(&self.tail_board.guide))
            .chain(self.tail_board.cuts.iter())
    }

    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.pin_board
            .annotations
            .iter()
            .chain(self.tail_board.annotations.iter())
    }

    pub fn emit<S: ShapeSink>(&self, sink: &mut S) -> Vec<S::Handle> {
        let mut handles = self.pin_board.emit(sink);
        handles.extend(self.tail_board.emit(sink));
        handles
    }
}
