// ─────────────────────────────────────────────────────────────────────
// SCPN Rotor BEM — Blade Element
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! 2D blade element loads from local inflow and airfoil polars.

use crate::polar::PolarProvider;

/// Loads per unit span (per unit density) on one blade element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeElementLoads {
    /// Force normal to the rotor plane
    pub f_normal: f64,
    /// Force in the rotor plane, positive driving the rotor
    pub f_tangential: f64,
    /// Bound circulation Γ
    pub circulation: f64,
    /// Inflow angle φ [rad]
    pub inflow_angle: f64,
    /// Angle of attack [deg]
    pub alpha_deg: f64,
    pub cl: f64,
    pub cd: f64,
}

/// Blade element loads for axial velocity `v_normal` and in-plane
/// velocity `v_tangential` at radius `r_over_r`.
///
/// φ = atan2(v_n, v_t), α = twist + φ. Lift and drag are projected onto
/// the rotor axis and plane.
pub fn compute_loads(
    polars: &dyn PolarProvider,
    v_normal: f64,
    v_tangential: f64,
    r_over_r: f64,
    chord: f64,
    twist_deg: f64,
) -> BladeElementLoads {
    let v_mag2 = v_normal * v_normal + v_tangential * v_tangential;
    let inflow_angle = v_normal.atan2(v_tangential);
    let alpha_deg = twist_deg + inflow_angle.to_degrees();

    let coeffs = polars.coefficients(r_over_r, alpha_deg);
    let lift = 0.5 * v_mag2 * coeffs.cl * chord;
    let drag = 0.5 * v_mag2 * coeffs.cd * chord;

    let (sin_phi, cos_phi) = inflow_angle.sin_cos();

    BladeElementLoads {
        f_normal: lift * cos_phi + drag * sin_phi,
        f_tangential: lift * sin_phi - drag * cos_phi,
        circulation: 0.5 * v_mag2.sqrt() * coeffs.cl * chord,
        inflow_angle,
        alpha_deg,
        cl: coeffs.cl,
        cd: coeffs.cd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar::PolarTable;
    use std::f64::consts::PI;

    fn flat_plate() -> PolarTable {
        // cl = 2π α, no drag
        let rows: Vec<(f64, f64, f64)> = (-20..=20)
            .map(|a| {
                let a = f64::from(a);
                (a, 2.0 * PI * a.to_radians(), 0.0)
            })
            .collect();
        PolarTable::new("flat", &rows).unwrap()
    }

    fn constant(cl: f64, cd: f64) -> PolarTable {
        PolarTable::new("const", &[(-90.0, cl, cd), (90.0, cl, cd)]).unwrap()
    }

    #[test]
    fn test_pure_tangential_inflow() {
        // v_n = 0 → φ = 0: lift is all normal, drag opposes rotation
        let loads = compute_loads(&constant(1.0, 0.1), 0.0, 10.0, 0.5, 2.0, 0.0);
        assert!(loads.inflow_angle.abs() < 1e-15);
        assert!((loads.f_normal - 100.0).abs() < 1e-10);
        assert!((loads.f_tangential - (-10.0)).abs() < 1e-10);
        assert!((loads.circulation - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_angle_of_attack_includes_twist() {
        let loads = compute_loads(&flat_plate(), 1.0, 1.0, 0.5, 1.0, -40.0);
        assert!((loads.inflow_angle - PI / 4.0).abs() < 1e-12);
        assert!((loads.alpha_deg - 5.0).abs() < 1e-10);
        assert!((loads.cl - 2.0 * PI * 5.0_f64.to_radians()).abs() < 1e-10);
    }

    #[test]
    fn test_force_magnitude_matches_lift_drag() {
        let loads = compute_loads(&constant(0.8, 0.05), 3.0, 7.0, 0.5, 1.5, 2.0);
        let v2: f64 = 9.0 + 49.0;
        let lift = 0.5 * v2 * 0.8 * 1.5;
        let drag = 0.5 * v2 * 0.05 * 1.5;
        let mag = (loads.f_normal.powi(2) + loads.f_tangential.powi(2)).sqrt();
        assert!((mag - (lift * lift + drag * drag).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_zero_lift_gives_zero_circulation() {
        let loads = compute_loads(&flat_plate(), 0.0, 10.0, 0.5, 1.0, 0.0);
        assert!(loads.cl.abs() < 1e-15);
        assert!(loads.circulation.abs() < 1e-15);
        assert!(loads.f_normal.abs() < 1e-12);
    }
}
