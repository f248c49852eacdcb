//! Mathematical primitives for the rotor BEM solver.

pub mod interp;
