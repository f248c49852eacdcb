// ─────────────────────────────────────────────────────────────────────
// SCPN Rotor BEM — Streamtube Solver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Momentum balance for one annular streamtube.
//!
//! Fixed-point iteration on the axial induction a and tangential induction
//! a' of one annulus:
//! 1. Inflow at the blade: U∞(1 - a) axially, (1 + a')Ωr tangentially
//! 2. Blade element loads from the polars
//! 3. Annulus CT from the B-blade axial load over the streamtube area
//! 4. New a from CT (Glauert), divided by the Prandtl tip/root factor
//! 5. Relax: a = (1 - w)·a + w·a_new
//! 6. a' from the tangential load, divided by the same Prandtl factor
//! 7. Stop when |a - a_new| < tol, or return the last iterate at the cap
//!
//! A heavily overloaded annulus can run away to non-finite thrust. The loop
//! then stops with [`SolveStatus::Diverged`], keeping the last finite loads
//! and the non-finite CT for the caller to report.

use crate::blade_element::{compute_loads, BladeElementLoads};
use crate::glauert::induction_from_thrust;
use crate::polar::PolarProvider;
use crate::prandtl::tip_root_correction;
use rotor_types::config::SolverConfig;
use rotor_types::constants::PRANDTL_FLOOR;
use rotor_types::state::{AnnulusResult, InductionState, OperatingPoint, SolveStatus};
use std::f64::consts::PI;

/// One radial slice of the rotor disc with its local blade section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annulus {
    pub r1_over_r: f64,
    pub r2_over_r: f64,
    /// Chord at the centroid [m]
    pub chord: f64,
    /// Twist at the centroid [deg]
    pub twist_deg: f64,
}

impl Annulus {
    /// Centroid r/R (midpoint).
    pub fn centroid(&self) -> f64 {
        0.5 * (self.r1_over_r + self.r2_over_r)
    }

    /// Streamtube area π((r2R)² - (r1R)²) [m²].
    pub fn area(&self, radius: f64) -> f64 {
        PI * ((self.r2_over_r * radius).powi(2) - (self.r1_over_r * radius).powi(2))
    }

    /// Dimensional width (r2 - r1)R [m].
    pub fn width(&self, radius: f64) -> f64 {
        (self.r2_over_r - self.r1_over_r) * radius
    }
}

/// Solve the momentum balance of one annulus.
///
/// Both inductions start from zero; no state survives between calls, so
/// identical inputs give identical results.
pub fn solve_streamtube(
    op: &OperatingPoint,
    annulus: &Annulus,
    polars: &dyn PolarProvider,
    settings: &SolverConfig,
) -> AnnulusResult {
    let u_inf = op.wind_speed;
    let radius = op.radius;
    let omega = op.omega;
    let n_blades = f64::from(op.n_blades);
    let tsr = op.tip_speed_ratio();
    let relax = settings.relaxation_factor;
    let tol = settings.convergence_threshold;
    let max_iter = settings.max_iterations.max(1);

    let r_over_r = annulus.centroid();
    let r_dim = r_over_r * radius;
    let area = annulus.area(radius);

    let mut induction = InductionState::default();
    let mut loads = BladeElementLoads {
        f_normal: 0.0,
        f_tangential: 0.0,
        circulation: 0.0,
        inflow_angle: 0.0,
        alpha_deg: 0.0,
        cl: 0.0,
        cd: 0.0,
    };
    let mut status = SolveStatus::IterationLimitReached;
    let mut iterations = 0;
    let mut residual = f64::INFINITY;
    let mut prandtl = 1.0;
    let mut ct = 0.0;

    for k in 0..max_iter {
        iterations = k + 1;

        let u_rotor = u_inf * (1.0 - induction.axial);
        let u_tan = (1.0 + induction.tangential) * omega * r_dim;
        let step = compute_loads(
            polars,
            u_rotor,
            u_tan,
            r_over_r,
            annulus.chord,
            annulus.twist_deg,
        );

        let load_axial = step.f_normal * annulus.width(radius) * n_blades;
        ct = load_axial / (0.5 * area * u_inf * u_inf);
        let mut a_new = induction_from_thrust(ct);
        if !ct.is_finite() || !a_new.is_finite() {
            status = SolveStatus::Diverged;
            break;
        }
        loads = step;

        prandtl = tip_root_correction(
            r_over_r,
            op.root_location,
            op.tip_location,
            tsr,
            op.n_blades,
            a_new,
        )
        .combined;
        if prandtl < PRANDTL_FLOOR {
            prandtl = PRANDTL_FLOOR;
        }
        a_new /= prandtl;

        induction.axial = (1.0 - relax) * induction.axial + relax * a_new;

        induction.tangential = loads.f_tangential * n_blades
            / (2.0 * PI * u_inf * (1.0 - induction.axial) * omega * 2.0 * r_dim * r_dim);
        induction.tangential /= prandtl;

        residual = (induction.axial - a_new).abs();
        if residual < tol {
            status = SolveStatus::Converged;
            break;
        }
    }

    AnnulusResult {
        axial_induction: induction.axial,
        tangential_induction: induction.tangential,
        r_over_r,
        f_normal: loads.f_normal,
        f_tangential: loads.f_tangential,
        circulation: loads.circulation,
        r1_over_r: annulus.r1_over_r,
        r2_over_r: annulus.r2_over_r,
        status,
        iterations,
        residual,
        prandtl,
        thrust_coefficient: ct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar::PolarTable;

    /// Thin-airfoil polar: cl = 2π α, no drag.
    fn thin_airfoil() -> PolarTable {
        let rows: Vec<(f64, f64, f64)> = (-20..=20)
            .map(|a| {
                let a = f64::from(a);
                (a, 2.0 * PI * a.to_radians(), 0.0)
            })
            .collect();
        PolarTable::new("thin", &rows).unwrap()
    }

    fn operating_point() -> OperatingPoint {
        OperatingPoint::from_tip_speed_ratio(9.0, 8.0, 50.0, 3, 0.2, 1.0)
    }

    fn annulus(twist_deg: f64) -> Annulus {
        Annulus {
            r1_over_r: 0.5,
            r2_over_r: 0.51,
            chord: 3.0,
            twist_deg,
        }
    }

    #[test]
    fn test_annulus_geometry() {
        let a = annulus(0.0);
        assert!((a.centroid() - 0.505).abs() < 1e-15);
        assert!((a.width(50.0) - 0.5).abs() < 1e-12);
        let expected = PI * (25.5_f64.powi(2) - 25.0_f64.powi(2));
        assert!((a.area(50.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_representative_annulus_converges() {
        let polars = thin_airfoil();
        let settings = SolverConfig::default();
        for twist in [-2.0, 0.0, 2.0] {
            let result = solve_streamtube(&operating_point(), &annulus(twist), &polars, &settings);
            assert_eq!(result.status, SolveStatus::Converged, "twist {twist}");
            assert!(result.iterations <= 100);
            assert!(result.residual < 1e-5);
            assert!(result.axial_induction > 0.0 && result.axial_induction < 1.0);
            assert!(result.tangential_induction > 0.0);
            assert!(result.f_normal > 0.0);
            assert!(result.f_tangential > 0.0);
            assert!((result.r_over_r - 0.505).abs() < 1e-15);
        }
    }

    #[test]
    fn test_idempotent() {
        let polars = thin_airfoil();
        let settings = SolverConfig::default();
        let a = solve_streamtube(&operating_point(), &annulus(1.0), &polars, &settings);
        let b = solve_streamtube(&operating_point(), &annulus(1.0), &polars, &settings);
        assert_eq!(a, b);
        assert_eq!(a.axial_induction.to_bits(), b.axial_induction.to_bits());
    }

    #[test]
    fn test_iteration_cap_returns_last_iterate() {
        let polars = thin_airfoil();
        let settings = SolverConfig {
            max_iterations: 3,
            ..SolverConfig::default()
        };
        let result = solve_streamtube(&operating_point(), &annulus(0.0), &polars, &settings);
        assert_eq!(result.status, SolveStatus::IterationLimitReached);
        assert_eq!(result.iterations, 3);
        assert!(result.residual >= 1e-5);
        assert!(result.axial_induction.is_finite());
    }

    #[test]
    fn test_unloaded_blade_has_no_induction() {
        // Zero lift and drag everywhere
        let polars = PolarTable::new("none", &[(-90.0, 0.0, 0.0), (90.0, 0.0, 0.0)]).unwrap();
        let result = solve_streamtube(
            &operating_point(),
            &annulus(0.0),
            &polars,
            &SolverConfig::default(),
        );
        assert_eq!(result.status, SolveStatus::Converged);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.axial_induction, 0.0);
        assert_eq!(result.tangential_induction, 0.0);
    }

    #[test]
    fn test_more_twist_more_loading() {
        let polars = thin_airfoil();
        let settings = SolverConfig::default();
        let low = solve_streamtube(&operating_point(), &annulus(-2.0), &polars, &settings);
        let high = solve_streamtube(&operating_point(), &annulus(2.0), &polars, &settings);
        // Twist adds to the angle of attack, so more twist loads the annulus more
        assert!(high.axial_induction > low.axial_induction);
        assert!(high.f_normal > low.f_normal);
    }

    #[test]
    fn test_overloaded_root_annulus_diverges_without_panic() {
        // High solidity, high lift and drag at the root cut-out
        let polars = PolarTable::new("slab", &[(-90.0, 2.0, 0.5), (90.0, 2.0, 0.5)]).unwrap();
        let root = Annulus {
            r1_over_r: 0.2,
            r2_over_r: 0.21,
            chord: 20.0,
            twist_deg: 0.0,
        };
        let result = solve_streamtube(&operating_point(), &root, &polars, &SolverConfig::default());
        assert_eq!(result.status, SolveStatus::Diverged);
        assert!(!result.thrust_coefficient.is_finite());
        assert!(result.iterations < 100);
        assert!(result.f_normal.is_finite());
        assert!(result.f_tangential.is_finite());
    }

    #[test]
    fn test_prandtl_floor_at_tip_annulus() {
        // Annulus straddling the tip: combined factor is near zero
        let polars = thin_airfoil();
        let tip = Annulus {
            r1_over_r: 0.995,
            r2_over_r: 1.0,
            chord: 1.0,
            twist_deg: 2.0,
        };
        let result = solve_streamtube(&operating_point(), &tip, &polars, &SolverConfig::default());
        assert!(result.prandtl >= PRANDTL_FLOOR);
        assert!(result.prandtl < 0.5);
        assert!(result.axial_induction.is_finite());
    }
}
