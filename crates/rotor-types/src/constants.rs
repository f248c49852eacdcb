// ─────────────────────────────────────────────────────────────────────
// SCPN Rotor BEM — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Glauert heavy-loading anchor thrust coefficient.
pub const GLAUERT_CT1: f64 = 1.816;

/// Sea-level air density (kg/m³).
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225;

/// Upper edge (inclusive) of the root airfoil band, in r/R.
pub const ROOT_BAND_BOUNDARY: f64 = 0.4;

/// Upper edge (inclusive) of the mid-span airfoil band, in r/R.
pub const MID_BAND_BOUNDARY: f64 = 0.75;

/// Streamtube iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Convergence limit on |a - a_new|.
pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 1e-5;

/// Weight of the new axial induction estimate in the under-relaxed update
/// `a = (1 - w) a + w a_new`.
pub const DEFAULT_RELAXATION_FACTOR: f64 = 0.25;

/// Radial width of one annulus, in r/R.
pub const DEFAULT_ANNULUS_WIDTH: f64 = 0.01;

/// Lower bound applied to the combined Prandtl factor before dividing by it.
pub const PRANDTL_FLOOR: f64 = 1e-4;

/// Axial induction is clamped to [0, this] inside the Prandtl correction.
pub const PRANDTL_INDUCTION_CAP: f64 = 0.999;

/// Momentum theory applicability limit on the converged axial induction.
pub const BEM_VALIDITY_LIMIT: f64 = 0.4;

/// Radius sizing: outer iteration cap.
pub const DEFAULT_SIZING_MAX_ITERATIONS: usize = 1000;

/// Radius sizing: convergence limit on |ΔR| in metres.
pub const DEFAULT_SIZING_RADIUS_TOLERANCE: f64 = 0.01;
