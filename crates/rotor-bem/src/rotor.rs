// ─────────────────────────────────────────────────────────────────────
// SCPN Rotor BEM — Rotor Sweep
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Spanwise sweep of streamtube solves and rotor CT/CP integration.
//!
//! The span [root, tip] is cut into fixed-width annuli. Chord and twist
//! are interpolated at each annulus midpoint and the annulus is solved
//! independently. Loads are then integrated with the midpoint rule:
//!
//!   CT = Σ dr·f_n·B / (½U∞²πR²)
//!   CP = Σ dr·f_t·(r/R)·B·R·Ω / (½U∞³πR²)

use crate::geometry::{BladeDistribution, BladeGeometry};
use crate::polar::{BandedPolars, PolarProvider};
use crate::streamtube::{solve_streamtube, Annulus};
use ndarray::Array1;
use rayon::prelude::*;
use rotor_math::interp::radial_edges;
use rotor_types::config::{RotorConfig, SolverConfig};
use rotor_types::constants::{BEM_VALIDITY_LIMIT, PRANDTL_FLOOR};
use rotor_types::error::{BemError, BemResult};
use rotor_types::state::{
    within_validity_limit, AnnulusResult, Degeneracy, OperatingPoint, RotorCoefficients,
    SolveStatus, SweepResult,
};
use std::f64::consts::PI;
use std::path::Path;

/// Polars, operating point and solver settings for repeated sweeps.
#[derive(Debug, Clone)]
pub struct RotorModel<P: PolarProvider> {
    polars: P,
    operating_point: OperatingPoint,
    settings: SolverConfig,
}

impl RotorModel<BandedPolars> {
    /// Build from a rotor config; polar paths resolve against `base_dir`.
    pub fn from_config(config: &RotorConfig, base_dir: &Path) -> BemResult<Self> {
        config.validate()?;
        let polars = BandedPolars::from_config(&config.airfoils, base_dir)?;
        Self::new(polars, config.operating_point(), config.solver.clone())
    }

    /// Load and validate a JSON config file, then its polars.
    pub fn from_file(path: &str) -> BemResult<Self> {
        let config = RotorConfig::from_file(path)?;
        let base_dir = Path::new(path).parent().unwrap_or_else(|| Path::new("."));
        Self::from_config(&config, base_dir)
    }
}

impl<P: PolarProvider> RotorModel<P> {
    pub fn new(polars: P, operating_point: OperatingPoint, settings: SolverConfig) -> BemResult<Self> {
        settings.validate()?;
        validate_operating_point(&operating_point)?;
        Ok(RotorModel {
            polars,
            operating_point,
            settings,
        })
    }

    pub fn polars(&self) -> &P {
        &self.polars
    }

    pub fn operating_point(&self) -> &OperatingPoint {
        &self.operating_point
    }

    pub fn settings(&self) -> &SolverConfig {
        &self.settings
    }

    /// Annulus edges in r/R, root to tip.
    pub fn radial_edges(&self) -> Array1<f64> {
        radial_edges(
            self.operating_point.root_location,
            self.operating_point.tip_location,
            self.settings.annulus_width,
        )
    }

    /// Sample a geometry at the annulus edges.
    pub fn distribution<G: BladeGeometry + ?Sized>(&self, geometry: &G) -> BemResult<BladeDistribution> {
        BladeDistribution::sample(geometry, &self.radial_edges())
    }

    /// Annuli with chord and twist interpolated at each midpoint.
    pub fn annuli<G: BladeGeometry + ?Sized>(&self, geometry: &G) -> Vec<Annulus> {
        let edges = self.radial_edges().to_vec();
        edges
            .windows(2)
            .map(|w| {
                let station = geometry.station(0.5 * (w[0] + w[1]));
                Annulus {
                    r1_over_r: w[0],
                    r2_over_r: w[1],
                    chord: station.chord,
                    twist_deg: station.twist_deg,
                }
            })
            .collect()
    }

    /// Solve every annulus at `radius` and `omega` and integrate CT, CP.
    ///
    /// Chord and twist come from `distribution`, interpolated at annulus
    /// midpoints. Annuli are solved on the rayon pool when
    /// `settings.parallel` is set; results are in radial order either way.
    pub fn sweep(&self, radius: f64, distribution: &BladeDistribution, omega: f64) -> BemResult<SweepResult> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(BemError::ConfigError(format!(
                "sweep radius must be finite and > 0, got {radius}"
            )));
        }
        if !omega.is_finite() || omega <= 0.0 {
            return Err(BemError::ConfigError(format!(
                "sweep omega must be finite and > 0, got {omega}"
            )));
        }

        let op = OperatingPoint {
            radius,
            omega,
            ..self.operating_point
        };
        let annuli = self.annuli(distribution);
        let polars: &dyn PolarProvider = &self.polars;

        let results: Vec<AnnulusResult> = if self.settings.parallel {
            annuli
                .par_iter()
                .map(|annulus| solve_streamtube(&op, annulus, polars, &self.settings))
                .collect()
        } else {
            annuli
                .iter()
                .map(|annulus| solve_streamtube(&op, annulus, polars, &self.settings))
                .collect()
        };

        let coefficients = rotor_coefficients(&results, &op);
        let diagnostics = collect_diagnostics(&results);
        let valid = within_validity_limit(&results);

        Ok(SweepResult {
            annuli: results,
            coefficients,
            diagnostics,
            valid,
        })
    }

    /// Sweep a geometry at the model's own radius and Ω.
    pub fn sweep_geometry<G: BladeGeometry + ?Sized>(&self, geometry: &G) -> BemResult<SweepResult> {
        let distribution = self.distribution(geometry)?;
        self.sweep(
            self.operating_point.radius,
            &distribution,
            self.operating_point.omega,
        )
    }
}

fn validate_operating_point(op: &OperatingPoint) -> BemResult<()> {
    for (name, value) in [
        ("wind_speed", op.wind_speed),
        ("omega", op.omega),
        ("radius", op.radius),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(BemError::ConfigError(format!(
                "operating point {name} must be finite and > 0, got {value}"
            )));
        }
    }
    if op.n_blades == 0 {
        return Err(BemError::ConfigError("n_blades must be >= 1".to_string()));
    }
    if !(op.root_location > 0.0 && op.root_location < op.tip_location && op.tip_location <= 1.0) {
        return Err(BemError::ConfigError(format!(
            "require 0 < root_location < tip_location <= 1, got {} / {}",
            op.root_location, op.tip_location
        )));
    }
    Ok(())
}

/// Midpoint-rule integration of annulus loads into rotor CT and CP.
pub fn rotor_coefficients(annuli: &[AnnulusResult], op: &OperatingPoint) -> RotorCoefficients {
    let n_blades = f64::from(op.n_blades);
    let u = op.wind_speed;
    let disc = PI * op.radius * op.radius;
    let thrust_norm = 0.5 * u * u * disc;
    let power_norm = 0.5 * u * u * u * disc;

    let mut ct = 0.0;
    let mut cp = 0.0;
    for a in annuli {
        let dr = (a.r2_over_r - a.r1_over_r) * op.radius;
        ct += dr * a.f_normal * n_blades / thrust_norm;
        cp += dr * a.f_tangential * a.r_over_r * n_blades * op.radius * op.omega / power_norm;
    }

    RotorCoefficients { ct, cp }
}

/// Numeric conditions worth reporting, in radial order.
pub fn collect_diagnostics(annuli: &[AnnulusResult]) -> Vec<Degeneracy> {
    let mut out = Vec::new();
    for a in annuli {
        if !a.thrust_coefficient.is_finite() {
            out.push(Degeneracy::NonFiniteThrust {
                r_over_r: a.r_over_r,
                ct: a.thrust_coefficient,
            });
        }
        if a.status == SolveStatus::IterationLimitReached {
            out.push(Degeneracy::IterationLimit {
                r_over_r: a.r_over_r,
                residual: a.residual,
            });
        }
        if a.prandtl <= PRANDTL_FLOOR {
            out.push(Degeneracy::PrandtlFloored {
                r_over_r: a.r_over_r,
            });
        }
        if a.axial_induction > BEM_VALIDITY_LIMIT {
            out.push(Degeneracy::InductionAboveValidity {
                r_over_r: a.r_over_r,
                axial_induction: a.axial_induction,
            });
        }
    }
    out
}
