// ─────────────────────────────────────────────────────────────────────
// SCPN Rotor BEM — Prandtl Tip/Root Loss
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Prandtl tip and root loss factors for a finite number of blades.

use rotor_types::constants::PRANDTL_INDUCTION_CAP;
use std::f64::consts::PI;

/// Tip, root and combined (product) loss factors, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrandtlCorrection {
    pub combined: f64,
    pub tip: f64,
    pub root: f64,
}

/// F = (2/π)·acos(e^x).
///
/// e^x > 1 happens when the station lies outside [root, tip]; the loss
/// factor there is zero.
fn loss_factor(exponent: f64) -> f64 {
    let e = exponent.exp();
    if e > 1.0 {
        return 0.0;
    }
    2.0 / PI * e.clamp(-1.0, 1.0).acos()
}

/// Combined Prandtl tip/root correction at `r_over_r`.
///
/// `axial_induction` is clamped to [0, 0.999] before use.
pub fn tip_root_correction(
    r_over_r: f64,
    root_r_over_r: f64,
    tip_r_over_r: f64,
    tip_speed_ratio: f64,
    n_blades: u32,
    axial_induction: f64,
) -> PrandtlCorrection {
    let a = axial_induction.clamp(0.0, PRANDTL_INDUCTION_CAP);
    let b_half = f64::from(n_blades) / 2.0;
    let stretch = (1.0 + (tip_speed_ratio * r_over_r).powi(2) / (1.0 - a).powi(2)).sqrt();

    let tip = loss_factor(-b_half * (tip_r_over_r - r_over_r) / r_over_r * stretch);
    let root = loss_factor(b_half * (root_r_over_r - r_over_r) / r_over_r * stretch);

    PrandtlCorrection {
        combined: root * tip,
        tip,
        root,
    }
}
