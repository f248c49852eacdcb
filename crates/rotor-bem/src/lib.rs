//! Blade element momentum solver for horizontal-axis rotors.
//!
//! Polar tables, blade element loads, Glauert and Prandtl corrections,
//! the per-annulus streamtube balance, and the spanwise rotor sweep.

pub mod blade_element;
pub mod design;
pub mod geometry;
pub mod glauert;
pub mod polar;
pub mod prandtl;
pub mod rotor;
pub mod streamtube;
