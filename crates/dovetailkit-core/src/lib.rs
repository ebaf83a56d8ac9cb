//! # DovetailKit Core
//!
//! Unit helpers shared by the other DovetailKit crates.

pub mod units;

pub use units::{DocumentScale, MeasurementSystem, UnitConverter};
