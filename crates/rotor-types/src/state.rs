// ─────────────────────────────────────────────────────────────────────
// SCPN Rotor BEM — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::BEM_VALIDITY_LIMIT;
use ndarray::Array1;

/// Rotor operating point, constant for one sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    pub wind_speed: f64,    // U∞ [m/s]
    pub omega: f64,         // Ω [rad/s]
    pub radius: f64,        // R [m]
    pub n_blades: u32,      // B
    pub root_location: f64, // r/R
    pub tip_location: f64,  // r/R
}

impl OperatingPoint {
    /// Build with Ω = TSR·U∞/R.
    pub fn from_tip_speed_ratio(
        wind_speed: f64,
        tip_speed_ratio: f64,
        radius: f64,
        n_blades: u32,
        root_location: f64,
        tip_location: f64,
    ) -> Self {
        OperatingPoint {
            wind_speed,
            omega: tip_speed_ratio * wind_speed / radius,
            radius,
            n_blades,
            root_location,
            tip_location,
        }
    }

    /// λ = ΩR/U∞
    pub fn tip_speed_ratio(&self) -> f64 {
        self.omega * self.radius / self.wind_speed
    }

    /// Same rotor at a different radius, Ω unchanged.
    pub fn with_radius(&self, radius: f64) -> Self {
        OperatingPoint { radius, ..*self }
    }

    /// Same rotor at a different rotational speed.
    pub fn with_omega(&self, omega: f64) -> Self {
        OperatingPoint { omega, ..*self }
    }
}

/// Axial and tangential induction of one annulus during iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InductionState {
    pub axial: f64,      // a
    pub tangential: f64, // a'
}

/// Terminal state of a streamtube solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Converged,
    /// Cap reached; the last iterate is returned.
    IterationLimitReached,
    /// Annulus thrust went non-finite; the last finite loads are returned.
    Diverged,
}

/// Converged (or capped) state of one annulus.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnulusResult {
    pub axial_induction: f64,
    pub tangential_induction: f64,
    /// Centroid r/R
    pub r_over_r: f64,
    /// Normal (axial) force per unit span [N/m per unit density]
    pub f_normal: f64,
    /// Tangential force per unit span
    pub f_tangential: f64,
    pub circulation: f64,
    pub r1_over_r: f64,
    pub r2_over_r: f64,
    pub status: SolveStatus,
    pub iterations: usize,
    /// |a - a_new| on the last iteration
    pub residual: f64,
    /// Combined Prandtl factor on the last iteration, after flooring
    pub prandtl: f64,
    /// Annulus thrust coefficient on the last iteration
    pub thrust_coefficient: f64,
}

impl AnnulusResult {
    pub fn converged(&self) -> bool {
        self.status == SolveStatus::Converged
    }
}

/// Rotor-level thrust and power coefficients.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotorCoefficients {
    pub ct: f64,
    pub cp: f64,
}

/// Reportable numeric conditions that do not abort a sweep.
#[derive(Debug, Clone, PartialEq)]
pub enum Degeneracy {
    /// Streamtube iteration cap reached without convergence.
    IterationLimit { r_over_r: f64, residual: f64 },
    /// Combined Prandtl factor hit the floor on the last iteration.
    PrandtlFloored { r_over_r: f64 },
    /// Annulus thrust coefficient was not finite.
    NonFiniteThrust { r_over_r: f64, ct: f64 },
    /// Converged axial induction above the momentum theory limit.
    InductionAboveValidity { r_over_r: f64, axial_induction: f64 },
}

/// One full rotor sweep.
#[derive(Debug, Clone)]
pub struct SweepResult {
    /// Ordered root to tip.
    pub annuli: Vec<AnnulusResult>,
    pub coefficients: RotorCoefficients,
    pub diagnostics: Vec<Degeneracy>,
    /// False when any annulus has a > 0.4.
    pub valid: bool,
}

impl SweepResult {
    pub fn radial_positions(&self) -> Array1<f64> {
        self.annuli.iter().map(|r| r.r_over_r).collect()
    }

    pub fn axial_induction(&self) -> Array1<f64> {
        self.annuli.iter().map(|r| r.axial_induction).collect()
    }

    pub fn tangential_induction(&self) -> Array1<f64> {
        self.annuli.iter().map(|r| r.tangential_induction).collect()
    }

    pub fn normal_loads(&self) -> Array1<f64> {
        self.annuli.iter().map(|r| r.f_normal).collect()
    }

    pub fn tangential_loads(&self) -> Array1<f64> {
        self.annuli.iter().map(|r| r.f_tangential).collect()
    }

    pub fn mean_axial_induction(&self) -> f64 {
        self.axial_induction().mean().unwrap_or(0.0)
    }

    pub fn max_axial_induction(&self) -> f64 {
        self.annuli
            .iter()
            .map(|r| r.axial_induction)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn all_converged(&self) -> bool {
        self.annuli.iter().all(AnnulusResult::converged)
    }
}

/// True when no annulus exceeds the momentum theory limit.
pub fn within_validity_limit(annuli: &[AnnulusResult]) -> bool {
    annuli
        .iter()
        .all(|r| r.axial_induction <= BEM_VALIDITY_LIMIT)
}
