// ─────────────────────────────────────────────────────────────────────
// SCPN Rotor BEM — Blade Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Blade chord and twist along the span.

use ndarray::Array1;
use rotor_math::interp::{interp1d_view, is_strictly_increasing};
use rotor_types::config::BladeConfig;
use rotor_types::error::{BemError, BemResult};

/// Local blade section at one radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeStation {
    pub r_over_r: f64,
    /// Chord [m]
    pub chord: f64,
    /// Twist [deg]
    pub twist_deg: f64,
}

/// Maps normalized radius to local chord and twist.
pub trait BladeGeometry {
    fn station(&self, r_over_r: f64) -> BladeStation;
}

/// Linear root-to-tip taper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTaper {
    pub root_chord: f64,
    pub tip_chord: f64,
    pub root_twist: f64,
    pub pitch: f64,
    pub chord_scale: f64,
}

impl LinearTaper {
    pub fn from_config(blade: &BladeConfig) -> Self {
        LinearTaper {
            root_chord: blade.root_chord,
            tip_chord: blade.tip_chord,
            root_twist: blade.root_twist,
            pitch: blade.pitch,
            chord_scale: blade.chord_scale,
        }
    }

    pub fn with_pitch(&self, pitch: f64) -> Self {
        LinearTaper { pitch, ..*self }
    }
}

impl BladeGeometry for LinearTaper {
    fn station(&self, r_over_r: f64) -> BladeStation {
        BladeStation {
            r_over_r,
            chord: (self.root_chord * (1.0 - r_over_r) + self.tip_chord) * self.chord_scale,
            twist_deg: self.root_twist * (1.0 - r_over_r) + self.pitch,
        }
    }
}

/// Chord and twist tabulated at radial nodes, interpolated linearly
/// between them and held constant beyond the end nodes.
#[derive(Debug, Clone)]
pub struct BladeDistribution {
    pub r_over_r: Array1<f64>,
    pub chord: Array1<f64>,
    pub twist_deg: Array1<f64>,
}

impl BladeDistribution {
    pub fn new(r_over_r: Array1<f64>, chord: Array1<f64>, twist_deg: Array1<f64>) -> BemResult<Self> {
        let n = r_over_r.len();
        if n < 2 || chord.len() != n || twist_deg.len() != n {
            return Err(BemError::ConfigError(format!(
                "blade distribution needs >= 2 nodes of equal length, got r={n}, chord={}, twist={}",
                chord.len(),
                twist_deg.len()
            )));
        }
        if !is_strictly_increasing(&r_over_r.to_vec()) {
            return Err(BemError::ConfigError(
                "blade distribution radii must be strictly increasing".to_string(),
            ));
        }
        if chord.iter().any(|c| !c.is_finite() || *c <= 0.0) {
            return Err(BemError::ConfigError(
                "blade distribution chord must be finite and > 0".to_string(),
            ));
        }
        if twist_deg.iter().any(|t| !t.is_finite()) {
            return Err(BemError::ConfigError(
                "blade distribution twist must be finite".to_string(),
            ));
        }
        Ok(BladeDistribution {
            r_over_r,
            chord,
            twist_deg,
        })
    }

    /// Sample any geometry at the given nodes.
    pub fn sample<G: BladeGeometry + ?Sized>(geometry: &G, nodes: &Array1<f64>) -> BemResult<Self> {
        let stations: Vec<BladeStation> = nodes.iter().map(|&r| geometry.station(r)).collect();
        Self::new(
            nodes.clone(),
            stations.iter().map(|s| s.chord).collect(),
            stations.iter().map(|s| s.twist_deg).collect(),
        )
    }
}

impl BladeGeometry for BladeDistribution {
    fn station(&self, r_over_r: f64) -> BladeStation {
        BladeStation {
            r_over_r,
            chord: interp1d_view(r_over_r, self.r_over_r.view(), self.chord.view()),
            twist_deg: interp1d_view(r_over_r, self.r_over_r.view(), self.twist_deg.view()),
        }
    }
}
