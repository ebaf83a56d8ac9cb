//! # DovetailKit CAM Tools
//!
//! Cut-path generation for dovetail joints milled with a CNC router.
//!
//! ## Modules
//!
//! - **Dovetail Joint Maker**: validates joint parameters and lays out the
//!   pin board pockets and tail board gap cuts
//! - **Routing**: cut type classification and its colour table
//! - **Anchor**: custom origin markers for the router
//! - **Shape / Sink**: the cut shapes and the seam a drawing host implements

pub mod anchor;
pub mod dovetail;
pub mod error;
pub mod routing;
pub mod shape;
pub mod sink;

// Re-export commonly used items
pub use anchor::{
    place_anchor, AnchorMarker, AnchorPlacement, AxisOrientation, HorizontalPlacement,
    VerticalPlacement,
};
pub use dovetail::{
    generate, generate_with, resolve, Annotation, BoardLayout, JointLayout, JointParameters,
    LayoutSettings, ResolvedGeometry,
};
pub use error::{CamToolError, CamToolResult, ParameterError, ValidationFailure};
pub use routing::{style_for, RoutingClassification, ShapeStyle};
pub use shape::{CutDepth, CutShape, Point, ShapeGeometry};
pub use sink::{RecordingSink, ShapeSink, SinkRecord};
