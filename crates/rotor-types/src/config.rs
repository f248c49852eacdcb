// ─────────────────────────────────────────────────────────────────────
// SCPN Rotor BEM — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{
    AIR_DENSITY_SEA_LEVEL, DEFAULT_ANNULUS_WIDTH, DEFAULT_CONVERGENCE_THRESHOLD,
    DEFAULT_MAX_ITERATIONS, DEFAULT_RELAXATION_FACTOR, DEFAULT_SIZING_MAX_ITERATIONS,
    DEFAULT_SIZING_RADIUS_TOLERANCE, MID_BAND_BOUNDARY, ROOT_BAND_BOUNDARY,
};
use crate::error::{BemError, BemResult};
use crate::state::OperatingPoint;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level rotor configuration.
/// Maps 1:1 to configs/reference_rotor.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotorConfig {
    pub rotor_name: String,
    pub operating_point: OperatingPointConfig,
    pub blade: BladeConfig,
    pub airfoils: AirfoilConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    /// Optional rated-power sizing target. When absent, the radius in
    /// `operating_point` is used as given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing: Option<SizingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatingPointConfig {
    /// Freestream wind speed [m/s]
    pub wind_speed: f64,
    pub tip_speed_ratio: f64,
    /// Rotor radius [m]
    pub radius: f64,
    pub n_blades: u32,
    /// Blade root location, r/R
    pub root_location: f64,
    /// Blade tip location, r/R
    pub tip_location: f64,
    /// Air density [kg/m³] (default: 1.225)
    #[serde(default = "default_air_density")]
    pub air_density: f64,
}

/// Linear root-to-tip blade taper.
///
/// chord(r) = (root_chord·(1 - r) + tip_chord)·chord_scale
/// twist(r) = root_twist·(1 - r) + pitch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BladeConfig {
    pub root_chord: f64,
    pub tip_chord: f64,
    /// Twist at r/R = 0 relative to the tip, degrees
    pub root_twist: f64,
    /// Collective pitch, degrees
    pub pitch: f64,
    #[serde(default = "default_chord_scale")]
    pub chord_scale: f64,
}

/// Polar files per radial band. Relative paths resolve against the
/// directory holding the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirfoilConfig {
    pub root_polar: String,
    pub mid_polar: String,
    pub tip_polar: String,
    #[serde(default = "default_root_boundary")]
    pub root_boundary: f64,
    #[serde(default = "default_mid_boundary")]
    pub mid_boundary: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_convergence_threshold")]
    pub convergence_threshold: f64,
    #[serde(default = "default_relaxation_factor")]
    pub relaxation_factor: f64,
    #[serde(default = "default_annulus_width")]
    pub annulus_width: f64,
    /// Solve annuli on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizingConfig {
    /// Rated electrical power target [W]
    pub rated_power: f64,
    #[serde(default = "default_n_rotors")]
    pub n_rotors: u32,
    #[serde(default = "default_sizing_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_radius_tolerance")]
    pub radius_tolerance: f64,
}

fn default_air_density() -> f64 {
    AIR_DENSITY_SEA_LEVEL
}
fn default_chord_scale() -> f64 {
    1.0
}
fn default_root_boundary() -> f64 {
    ROOT_BAND_BOUNDARY
}
fn default_mid_boundary() -> f64 {
    MID_BAND_BOUNDARY
}
fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}
fn default_convergence_threshold() -> f64 {
    DEFAULT_CONVERGENCE_THRESHOLD
}
fn default_relaxation_factor() -> f64 {
    DEFAULT_RELAXATION_FACTOR
}
fn default_annulus_width() -> f64 {
    DEFAULT_ANNULUS_WIDTH
}
fn default_n_rotors() -> u32 {
    1
}
fn default_sizing_max_iterations() -> usize {
    DEFAULT_SIZING_MAX_ITERATIONS
}
fn default_radius_tolerance() -> f64 {
    DEFAULT_SIZING_RADIUS_TOLERANCE
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_iterations: default_max_iterations(),
            convergence_threshold: default_convergence_threshold(),
            relaxation_factor: default_relaxation_factor(),
            annulus_width: default_annulus_width(),
            parallel: false,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> BemResult<()> {
        if self.max_iterations == 0 {
            return Err(BemError::ConfigError(
                "solver.max_iterations must be >= 1".to_string(),
            ));
        }
        if !self.convergence_threshold.is_finite() || self.convergence_threshold <= 0.0 {
            return Err(BemError::ConfigError(format!(
                "solver.convergence_threshold must be finite and > 0, got {}",
                self.convergence_threshold
            )));
        }
        if !self.relaxation_factor.is_finite()
            || self.relaxation_factor <= 0.0
            || self.relaxation_factor > 1.0
        {
            return Err(BemError::ConfigError(format!(
                "solver.relaxation_factor must be in (0, 1], got {}",
                self.relaxation_factor
            )));
        }
        if !self.annulus_width.is_finite() || self.annulus_width <= 0.0 {
            return Err(BemError::ConfigError(format!(
                "solver.annulus_width must be finite and > 0, got {}",
                self.annulus_width
            )));
        }
        Ok(())
    }
}

impl RotorConfig {
    /// Load from JSON file and validate.
    pub fn from_file(path: &str) -> BemResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BemResult<()> {
        let op = &self.operating_point;
        for (name, value) in [
            ("wind_speed", op.wind_speed),
            ("tip_speed_ratio", op.tip_speed_ratio),
            ("radius", op.radius),
            ("air_density", op.air_density),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(BemError::ConfigError(format!(
                    "operating_point.{name} must be finite and > 0, got {value}"
                )));
            }
        }
        if op.n_blades == 0 {
            return Err(BemError::ConfigError(
                "operating_point.n_blades must be >= 1".to_string(),
            ));
        }
        if !(op.root_location > 0.0 && op.root_location < op.tip_location && op.tip_location <= 1.0)
        {
            return Err(BemError::ConfigError(format!(
                "require 0 < root_location < tip_location <= 1, got {} / {}",
                op.root_location, op.tip_location
            )));
        }

        let af = &self.airfoils;
        if af.root_boundary.is_nan()
            || af.mid_boundary.is_nan()
            || af.root_boundary >= af.mid_boundary
        {
            return Err(BemError::ConfigError(format!(
                "airfoils.root_boundary ({}) must be below mid_boundary ({})",
                af.root_boundary, af.mid_boundary
            )));
        }

        if !self.blade.chord_scale.is_finite() || self.blade.chord_scale <= 0.0 {
            return Err(BemError::ConfigError(format!(
                "blade.chord_scale must be finite and > 0, got {}",
                self.blade.chord_scale
            )));
        }

        self.solver.validate()?;

        if let Some(sizing) = &self.sizing {
            if !sizing.rated_power.is_finite() || sizing.rated_power <= 0.0 {
                return Err(BemError::ConfigError(format!(
                    "sizing.rated_power must be finite and > 0, got {}",
                    sizing.rated_power
                )));
            }
            if sizing.n_rotors == 0 || sizing.max_iterations == 0 {
                return Err(BemError::ConfigError(
                    "sizing.n_rotors and sizing.max_iterations must be >= 1".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Operating point with Ω = TSR·U∞/R.
    pub fn operating_point(&self) -> OperatingPoint {
        let op = &self.operating_point;
        OperatingPoint::from_tip_speed_ratio(
            op.wind_speed,
            op.tip_speed_ratio,
            op.radius,
            op.n_blades,
            op.root_location,
            op.tip_location,
        )
    }

    /// Root, mid and tip polar paths resolved against `base_dir`.
    pub fn polar_paths(&self, base_dir: &Path) -> [PathBuf; 3] {
        let resolve = |p: &str| {
            let path = Path::new(p);
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                base_dir.join(path)
            }
        };
        [
            resolve(&self.airfoils.root_polar),
            resolve(&self.airfoils.mid_polar),
            resolve(&self.airfoils.tip_polar),
        ]
    }
}
