//! Dovetail Joint Maker
//!
//! Computes the cut regions for a through-dovetail joint cut with two bits:
//! a straight bit pockets the pin board, a tapered dovetail bit cuts the
//! gaps between the tails of the tail board.
//!
//! [`resolve`] turns the physical inputs into a [`ResolvedGeometry`] or a
//! [`ValidationFailure`](crate::error::ValidationFailure). [`generate`] lays
//! out both boards from a resolved geometry.

mod layout;
mod resolve;
mod types;

pub use layout::{generate, generate_with};
pub use resolve::{resolve, upper_tail_diameter};
pub use types::{
    Annotation, BoardLayout, JointLayout, JointParameters, LayoutSettings, ResolvedGeometry,
};
