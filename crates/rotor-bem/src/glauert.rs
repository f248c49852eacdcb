// ─────────────────────────────────────────────────────────────────────
// SCPN Rotor BEM — Glauert Correction
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Thrust coefficient ↔ axial induction with Glauert's heavy-loading branch.
//!
//! Momentum theory gives CT = 4a(1 - a), which peaks at a = 0.5 and is
//! unphysical beyond. Above a1 = 1 - √CT1/2 it is replaced by the straight
//! line through (1, CT1) tangent to the parabola at a1.

use ndarray::{Array1, ArrayView1};
use rotor_types::constants::GLAUERT_CT1;

/// Induction where the heavy-loading line takes over, 1 - √CT1/2.
pub fn glauert_transition_induction() -> f64 {
    1.0 - GLAUERT_CT1.sqrt() / 2.0
}

/// Thrust coefficient where the heavy-loading line takes over,
/// 2√CT1 - CT1.
pub fn glauert_transition_thrust() -> f64 {
    2.0 * GLAUERT_CT1.sqrt() - GLAUERT_CT1
}

/// CT(a). With `use_glauert`, the heavy-loading line replaces the
/// parabola above the transition induction.
pub fn thrust_coefficient(a: f64, use_glauert: bool) -> f64 {
    if use_glauert && a > glauert_transition_induction() {
        GLAUERT_CT1 - 4.0 * (GLAUERT_CT1.sqrt() - 1.0) * (1.0 - a)
    } else {
        4.0 * a * (1.0 - a)
    }
}

/// a(CT), inverse of [`thrust_coefficient`] with the Glauert branch.
///
/// The momentum branch only runs for CT below 2√CT1 - CT1 ≈ 0.879, so
/// `1 - CT` is positive for every finite input. Non-finite CT propagates.
pub fn induction_from_thrust(ct: f64) -> f64 {
    if ct >= glauert_transition_thrust() {
        1.0 + (ct - GLAUERT_CT1) / (4.0 * (GLAUERT_CT1.sqrt() - 1.0))
    } else {
        0.5 - 0.5 * (1.0 - ct).sqrt()
    }
}

/// Elementwise [`thrust_coefficient`].
pub fn thrust_coefficient_array(a: ArrayView1<f64>, use_glauert: bool) -> Array1<f64> {
    a.mapv(|ai| thrust_coefficient(ai, use_glauert))
}

/// Elementwise [`induction_from_thrust`].
pub fn induction_from_thrust_array(ct: ArrayView1<f64>) -> Array1<f64> {
    ct.mapv(induction_from_thrust)
}
