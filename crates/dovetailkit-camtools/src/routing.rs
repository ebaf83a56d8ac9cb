//! Routing classifications
//!
//! Handheld routers read the cut type of a path from its fill and stroke
//! colours. The classification is a semantic tag on every [`CutShape`]; the
//! renderer looks the colours up with [`style_for`].
//!
//! [`CutShape`]: crate::shape::CutShape

use crate::error::ParameterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the router treats a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingClassification {
    /// Reference line, never cut
    Guide = 0,
    /// Inside cut; inside corners come out rounded
    Interior = 1,
    /// Outline cut
    Exterior = 2,
    /// Cut centered on the line
    OnLine = 3,
    /// Clear the whole enclosed area
    Pocket = 4,
}

impl RoutingClassification {
    pub const ALL: [RoutingClassification; 5] = [
        Self::Guide,
        Self::Interior,
        Self::Exterior,
        Self::OnLine,
        Self::Pocket,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guide => "GUIDE",
            Self::Interior => "INTERIOR",
            Self::Exterior => "EXTERIOR",
            Self::OnLine => "ON_LINE",
            Self::Pocket => "POCKET",
        }
    }
}

impl fmt::Display for RoutingClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoutingClassification {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| ParameterError::InvalidValue {
                name: "routing_type".to_string(),
                reason: format!("unknown routing type '{}'", s),
            })
    }
}

/// Fill and stroke colours of a classification. `None` means no paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShapeStyle {
    pub fill: Option<&'static str>,
    pub stroke: Option<&'static str>,
}

// Indexed by the enum discriminant.
const STYLES: [ShapeStyle; 5] = [
    ShapeStyle {
        fill: Some("#0068ff"),
        stroke: Some("#0068ff"),
    },
    ShapeStyle {
        fill: Some("#ffffff"),
        stroke: Some("#000000"),
    },
    ShapeStyle {
        fill: Some("#000000"),
        stroke: Some("#000000"),
    },
    ShapeStyle {
        fill: None,
        stroke: Some("#7f7f7f"),
    },
    ShapeStyle {
        fill: Some("#7f7f7f"),
        stroke: None,
    },
];

/// Look up the presentation colours for a classification.
pub fn style_for(classification: RoutingClassification) -> ShapeStyle {
    STYLES[classification as usize]
}
