//! Unit helpers
//!
//! All geometry is computed in millimeters. The drawing host decides how a
//! millimeter maps onto its own user units through [`UnitConverter`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MM_PER_INCH: f64 = 25.4;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Format a length to three decimals in the target system
///
/// * `value_mm` - Value in millimeters
/// * `system` - Target measurement system
pub fn format_length(value_mm: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.3}", value_mm),
        MeasurementSystem::Imperial => format!("{:.3}", value_mm / MM_PER_INCH),
    }
}

/// Get the unit label for the given system ("mm" or "in")
pub fn get_unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "mm",
        MeasurementSystem::Imperial => "in",
    }
}

/// Maps a physical length onto the drawing host's user units.
pub trait UnitConverter {
    /// Convert a length in millimeters to user units.
    fn to_user_units(&self, length_mm: f64) -> f64;

    /// Convert a point given in millimeters.
    fn point_to_user_units(&self, x_mm: f64, y_mm: f64) -> (f64, f64) {
        (self.to_user_units(x_mm), self.to_user_units(y_mm))
    }
}

/// Uniform document scale: `user_units = mm / scale`.
///
/// A scale of 1.0 means the document's user unit is one millimeter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentScale {
    pub scale: f64,
}

impl DocumentScale {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

impl Default for DocumentScale {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl UnitConverter for DocumentScale {
    fn to_user_units(&self, length_mm: f64) -> f64 {
        length_mm / self.scale
    }
}
