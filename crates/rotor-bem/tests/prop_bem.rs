// ─────────────────────────────────────────────────────────────────────
// SCPN Rotor BEM — Property-Based Tests (proptest) for rotor-bem
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for rotor-bem using proptest.
//!
//! Covers: Glauert inversion, Prandtl factor bounds, polar clamping,
//! streamtube determinism, band selection.

use proptest::prelude::*;
use rotor_bem::glauert::{glauert_transition_induction, induction_from_thrust, thrust_coefficient};
use rotor_bem::polar::{AirfoilBand, BandBoundaries, PolarTable};
use rotor_bem::prandtl::tip_root_correction;
use rotor_bem::rotor::collect_diagnostics;
use rotor_bem::streamtube::{solve_streamtube, Annulus};
use rotor_types::config::SolverConfig;
use rotor_types::state::{Degeneracy, OperatingPoint, SolveStatus};
use std::f64::consts::PI;

fn thin_airfoil() -> PolarTable {
    let rows: Vec<(f64, f64, f64)> = (-20..=20)
        .map(|a| {
            let a = f64::from(a);
            (a, 2.0 * PI * a.to_radians(), 0.002 + 0.0001 * a * a)
        })
        .collect();
    PolarTable::new("thin", &rows).unwrap()
}

// ── Glauert ──────────────────────────────────────────────────────────

proptest! {
    /// a(CT(a)) = a on the momentum branch.
    #[test]
    fn glauert_inverse_momentum_branch(t in 0.0f64..1.0) {
        let a = t * glauert_transition_induction() * 0.999;
        let back = induction_from_thrust(thrust_coefficient(a, false));
        prop_assert!((back - a).abs() < 1e-9, "a={}, back={}", a, back);
    }

    /// a(CT(a)) = a on the heavy-loading branch.
    #[test]
    fn glauert_inverse_heavy_branch(a in 0.33f64..1.0) {
        let back = induction_from_thrust(thrust_coefficient(a, true));
        prop_assert!((back - a).abs() < 1e-9, "a={}, back={}", a, back);
    }

    /// Over the operating range [0, 0.4] the momentum forward model and
    /// the Glauert inverse agree to within the branch gap at a = 0.4.
    #[test]
    fn glauert_inverse_operating_range(a in 0.0f64..=0.4) {
        let back = induction_from_thrust(thrust_coefficient(a, false));
        prop_assert!((back - a).abs() < 0.02, "a={}, back={}", a, back);
    }

    /// The inverse is monotone in CT.
    #[test]
    fn glauert_inverse_monotone(ct in 0.0f64..2.0, dct in 1e-6f64..0.5) {
        prop_assert!(induction_from_thrust(ct + dct) >= induction_from_thrust(ct));
    }
}

// ── Prandtl ──────────────────────────────────────────────────────────

proptest! {
    /// Every factor lies in [0, 1] and is never NaN, even off the blade.
    #[test]
    fn prandtl_bounded(
        r in 0.05f64..1.2,
        tsr in 1.0f64..12.0,
        n_blades in 1u32..6,
        a in -1.0f64..2.0,
    ) {
        let c = tip_root_correction(r, 0.2, 1.0, tsr, n_blades, a);
        for f in [c.combined, c.tip, c.root] {
            prop_assert!(!f.is_nan());
            prop_assert!((0.0..=1.0).contains(&f), "factor {}", f);
        }
    }
}

// ── Polars ───────────────────────────────────────────────────────────

proptest! {
    /// Lookups outside the table return the end rows.
    #[test]
    fn polar_lookup_clamps(alpha in 20.0f64..180.0) {
        let polar = thin_airfoil();
        let hi = polar.lookup(alpha);
        let lo = polar.lookup(-alpha);
        prop_assert_eq!(hi, polar.lookup(20.0));
        prop_assert_eq!(lo, polar.lookup(-20.0));
    }

    /// Lookups stay within the min/max of the tabulated values.
    #[test]
    fn polar_lookup_within_table_range(alpha in -20.0f64..20.0) {
        let polar = thin_airfoil();
        let c = polar.lookup(alpha);
        let cl_max = 2.0 * PI * 20.0f64.to_radians();
        prop_assert!(c.cl.abs() <= cl_max + 1e-12);
        prop_assert!(c.cd >= 0.002 - 1e-15 && c.cd <= 0.042 + 1e-12);
    }

    /// Band selection follows the boundaries inclusively.
    #[test]
    fn band_selection_consistent(r in 0.0f64..1.0) {
        let b = BandBoundaries::default();
        let band = AirfoilBand::select(r, &b);
        let expected = if r <= 0.4 {
            AirfoilBand::Root
        } else if r <= 0.75 {
            AirfoilBand::Mid
        } else {
            AirfoilBand::Tip
        };
        prop_assert_eq!(band, expected);
    }
}

// ── Streamtube ───────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Identical inputs give bit-identical results, with finite inductions.
    #[test]
    fn streamtube_deterministic(
        r1 in 0.25f64..0.9,
        chord in 0.5f64..4.0,
        twist in -4.0f64..4.0,
    ) {
        let op = OperatingPoint::from_tip_speed_ratio(9.0, 8.0, 50.0, 3, 0.2, 1.0);
        let annulus = Annulus { r1_over_r: r1, r2_over_r: r1 + 0.01, chord, twist_deg: twist };
        let polars = thin_airfoil();
        let settings = SolverConfig::default();
        let a = solve_streamtube(&op, &annulus, &polars, &settings);
        let b = solve_streamtube(&op, &annulus, &polars, &settings);
        prop_assert_eq!(&a, &b);
        prop_assert!(a.axial_induction.is_finite());
        prop_assert!(a.tangential_induction.is_finite());
        prop_assert!(a.iterations >= 1 && a.iterations <= settings.max_iterations);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// High-solidity, high-lift annuli never panic: the result is either
    /// finite or flagged as non-finite thrust.
    #[test]
    fn streamtube_overload_finite_or_flagged(
        r1 in 0.2f64..0.98,
        chord in 0.5f64..25.0,
        cl in 0.5f64..2.0,
        cd in 0.0f64..0.5,
        twist in -5.0f64..10.0,
    ) {
        let op = OperatingPoint::from_tip_speed_ratio(9.0, 8.0, 50.0, 3, 0.2, 1.0);
        let annulus = Annulus { r1_over_r: r1, r2_over_r: r1 + 0.01, chord, twist_deg: twist };
        let polars = PolarTable::new("slab", &[(-90.0, cl, cd), (90.0, cl, cd)]).unwrap();
        let result = solve_streamtube(&op, &annulus, &polars, &SolverConfig::default());
        let flagged = collect_diagnostics(std::slice::from_ref(&result))
            .iter()
            .any(|d| matches!(d, Degeneracy::NonFiniteThrust { .. }));
        if result.thrust_coefficient.is_finite() {
            prop_assert!(result.status != SolveStatus::Diverged);
            prop_assert!(!flagged);
        } else {
            prop_assert_eq!(result.status, SolveStatus::Diverged);
            prop_assert!(flagged);
        }
        prop_assert!(result.f_normal.is_finite());
    }
}
