// ─────────────────────────────────────────────────────────────────────
// SCPN Rotor BEM — Design Utilities
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Rotor-level design scans built on the spanwise sweep.
//!
//! Radius sizing for a rated power, pitch and TSR scans, solidity and
//! rated loads, and the blade-shape objective used by external optimizers.

use crate::geometry::{BladeGeometry, LinearTaper};
use crate::glauert::induction_from_thrust;
use crate::polar::PolarProvider;
use crate::rotor::RotorModel;
use ndarray::{Array1, Array2};
use rotor_types::config::SizingConfig;
use rotor_types::error::{BemError, BemResult};
use rotor_types::state::RotorCoefficients;
use std::f64::consts::PI;

/// Search bounds for [`DesignVariables`], in field order:
/// root chord [m], tip chord [m], root twist [deg], pitch [deg].
pub const DESIGN_BOUNDS: [(f64, f64); 4] = [(2.0, 6.0), (1.0, 3.0), (-25.0, 25.0), (-10.0, 25.0)];

/// Fraction of the radius spanned by the blade in the solidity estimate.
const SOLIDITY_SPAN_FRACTION: f64 = 0.8;

/// Rotor-averaged axial induction from the rotor CT.
pub fn rotor_induction(ct: f64) -> f64 {
    induction_from_thrust(ct)
}

/// Outcome of [`size_radius_for_power`].
#[derive(Debug, Clone)]
pub struct SizingResult {
    pub radius: f64,
    /// Coefficients of the last sweep, at the radius before the final update
    pub coefficients: RotorCoefficients,
    pub iterations: usize,
    pub converged: bool,
}

/// Fixed-point rotor radius that delivers `sizing.rated_power`.
///
/// Each pass sweeps at the current radius with Ω and the blade geometry
/// held fixed, then sets R = sqrt(P / (CP·½ρV³) / (π·n_rotors)). Stops when
/// |ΔR| < `sizing.radius_tolerance` or after `sizing.max_iterations` passes.
pub fn size_radius_for_power<P, G>(
    model: &RotorModel<P>,
    geometry: &G,
    sizing: &SizingConfig,
    air_density: f64,
) -> BemResult<SizingResult>
where
    P: PolarProvider,
    G: BladeGeometry + ?Sized,
{
    if !(sizing.rated_power.is_finite() && sizing.rated_power > 0.0) {
        return Err(BemError::ConfigError(format!(
            "rated_power must be finite and > 0, got {}",
            sizing.rated_power
        )));
    }
    if sizing.n_rotors == 0 {
        return Err(BemError::ConfigError("n_rotors must be >= 1".to_string()));
    }
    if !(air_density.is_finite() && air_density > 0.0) {
        return Err(BemError::ConfigError(format!(
            "air_density must be finite and > 0, got {air_density}"
        )));
    }

    let op = model.operating_point();
    let v = op.wind_speed;
    let distribution = model.distribution(geometry)?;
    let n_rotors = f64::from(sizing.n_rotors);

    let mut radius = op.radius;
    let mut coefficients = RotorCoefficients::default();
    let mut iterations = 0;
    let mut converged = false;

    for k in 0..sizing.max_iterations.max(1) {
        iterations = k + 1;
        let sweep = model.sweep(radius, &distribution, op.omega)?;
        coefficients = sweep.coefficients;

        if !(coefficients.cp.is_finite() && coefficients.cp > 0.0) {
            return Err(BemError::NumericDegeneracy(format!(
                "radius sizing needs CP > 0, got {} at R = {radius} m",
                coefficients.cp
            )));
        }

        let area = sizing.rated_power / (coefficients.cp * 0.5 * air_density * v.powi(3));
        let new_radius = (area / (PI * n_rotors)).sqrt();
        let delta = (new_radius - radius).abs();
        radius = new_radius;
        if delta < sizing.radius_tolerance {
            converged = true;
            break;
        }
    }

    Ok(SizingResult {
        radius,
        coefficients,
        iterations,
        converged,
    })
}

/// Rotor CT for each pitch angle, everything else fixed.
pub fn pitch_sweep<P: PolarProvider>(
    model: &RotorModel<P>,
    base: &LinearTaper,
    pitches: &[f64],
) -> BemResult<Array1<f64>> {
    let op = model.operating_point();
    let mut ct = Array1::zeros(pitches.len());
    for (i, &pitch) in pitches.iter().enumerate() {
        let distribution = model.distribution(&base.with_pitch(pitch))?;
        ct[i] = model.sweep(op.radius, &distribution, op.omega)?.coefficients.ct;
    }
    Ok(ct)
}

/// Rotor CT over a pitch × tip-speed-ratio grid. Rows are pitch angles.
pub fn thrust_map<P: PolarProvider>(
    model: &RotorModel<P>,
    base: &LinearTaper,
    pitches: &[f64],
    tip_speed_ratios: &[f64],
) -> BemResult<Array2<f64>> {
    let op = model.operating_point();
    let mut map = Array2::zeros((pitches.len(), tip_speed_ratios.len()));
    for (i, &pitch) in pitches.iter().enumerate() {
        let distribution = model.distribution(&base.with_pitch(pitch))?;
        for (j, &tsr) in tip_speed_ratios.iter().enumerate() {
            let omega = tsr * op.wind_speed / op.radius;
            map[[i, j]] = model.sweep(op.radius, &distribution, omega)?.coefficients.ct;
        }
    }
    Ok(map)
}

/// Solidity estimate B·c̄·0.8R / (πR² - π(r_root·R)²), c̄ the mean of the
/// smallest and largest chord.
pub fn rotor_solidity(
    n_blades: u32,
    min_chord: f64,
    max_chord: f64,
    radius: f64,
    root_r_over_r: f64,
) -> f64 {
    let mean_chord = 0.5 * (min_chord + max_chord);
    let blade_area = f64::from(n_blades) * mean_chord * SOLIDITY_SPAN_FRACTION * radius;
    let swept = PI * radius * radius - PI * (root_r_over_r * radius).powi(2);
    blade_area / swept
}

/// Rated thrust [N] and shaft torque [N·m].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatedLoads {
    pub thrust: f64,
    pub torque: f64,
}

/// Thrust CT·½ρU²·πR²·n_rotors and torque P/Ω.
pub fn rated_loads(
    ct: f64,
    air_density: f64,
    wind_speed: f64,
    radius: f64,
    n_rotors: u32,
    power: f64,
    omega: f64,
) -> RatedLoads {
    RatedLoads {
        thrust: ct * 0.5 * air_density * wind_speed * wind_speed * PI * radius * radius
            * f64::from(n_rotors),
        torque: power / omega,
    }
}

/// Blade shape parameters searched by the design objective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignVariables {
    pub root_chord: f64,
    pub tip_chord: f64,
    pub root_twist: f64,
    pub pitch: f64,
}

impl DesignVariables {
    pub fn to_array(&self) -> [f64; 4] {
        [self.root_chord, self.tip_chord, self.root_twist, self.pitch]
    }

    pub fn from_array(x: [f64; 4]) -> Self {
        DesignVariables {
            root_chord: x[0],
            tip_chord: x[1],
            root_twist: x[2],
            pitch: x[3],
        }
    }

    pub fn within_bounds(&self) -> bool {
        self.to_array()
            .iter()
            .zip(DESIGN_BOUNDS.iter())
            .all(|(&x, &(lo, hi))| (lo..=hi).contains(&x))
    }

    /// Unscaled linear taper; chords are in metres.
    pub fn taper(&self) -> LinearTaper {
        LinearTaper {
            root_chord: self.root_chord,
            tip_chord: self.tip_chord,
            root_twist: self.root_twist,
            pitch: self.pitch,
            chord_scale: 1.0,
        }
    }
}

/// Rotor coefficients of a candidate blade and its objective value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignEvaluation {
    pub coefficients: RotorCoefficients,
    /// -CP + CT, lower is better
    pub objective: f64,
}

/// Evaluate a candidate blade at fixed radius and Ω.
pub fn design_objective<P: PolarProvider>(
    model: &RotorModel<P>,
    radius: f64,
    omega: f64,
    variables: &DesignVariables,
) -> BemResult<DesignEvaluation> {
    let distribution = model.distribution(&variables.taper())?;
    let coefficients = model.sweep(radius, &distribution, omega)?.coefficients;
    Ok(DesignEvaluation {
        coefficients,
        objective: -coefficients.cp + coefficients.ct,
    })
}
