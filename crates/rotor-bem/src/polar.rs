// ─────────────────────────────────────────────────────────────────────
// SCPN Rotor BEM — Polar
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Airfoil polar tables and radial band selection.
//!
//! A polar maps angle of attack (deg) to lift and drag coefficients by
//! piecewise-linear interpolation, clamped at the table ends. Blades use one
//! polar per radial band (root / mid / tip).

use csv::{ReaderBuilder, Trim};
use ndarray::ArrayView1;
use rotor_math::interp::{interp1d, is_strictly_increasing};
use rotor_types::config::AirfoilConfig;
use rotor_types::constants::{MID_BAND_BOUNDARY, ROOT_BAND_BOUNDARY};
use rotor_types::error::{BemError, BemResult};
use std::path::Path;

/// Lift and drag coefficients at one angle of attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarCoefficients {
    pub cl: f64,
    pub cd: f64,
}

/// Anything that can supply (cl, cd) for a blade station.
///
/// Providers are immutable and shared read-only between annulus solves.
pub trait PolarProvider: Send + Sync {
    fn coefficients(&self, r_over_r: f64, alpha_deg: f64) -> PolarCoefficients;
}

/// Tabulated polar of a single airfoil.
#[derive(Debug, Clone)]
pub struct PolarTable {
    name: String,
    alpha: Vec<f64>,
    cl: Vec<f64>,
    cd: Vec<f64>,
}

impl PolarTable {
    /// Build from `(alpha_deg, cl, cd)` rows sorted by alpha.
    pub fn new(name: impl Into<String>, rows: &[(f64, f64, f64)]) -> BemResult<Self> {
        let name = name.into();
        if rows.len() < 2 {
            return Err(BemError::DataError(format!(
                "polar '{name}' has {} rows, need at least 2",
                rows.len()
            )));
        }
        if let Some(i) = rows
            .iter()
            .position(|(a, l, d)| !a.is_finite() || !l.is_finite() || !d.is_finite())
        {
            return Err(BemError::DataError(format!(
                "polar '{name}' row {i} contains a non-finite value"
            )));
        }

        let alpha: Vec<f64> = rows.iter().map(|r| r.0).collect();
        if !is_strictly_increasing(&alpha) {
            return Err(BemError::DataError(format!(
                "polar '{name}': alpha must be strictly increasing"
            )));
        }

        Ok(PolarTable {
            name,
            alpha,
            cl: rows.iter().map(|r| r.1).collect(),
            cd: rows.iter().map(|r| r.2).collect(),
        })
    }

    /// Load a comma-separated polar with a header row
    /// (`alpha, cl, cd, cm`). Columns are read by position; the moment
    /// column is ignored. The table is named after the file stem.
    pub fn from_csv(path: impl AsRef<Path>) -> BemResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_path(path)
            .map_err(|e| {
                BemError::DataError(format!("failed to open polar '{}': {e}", path.display()))
            })?;

        let mut rows = Vec::new();
        for (line, record) in rdr.records().enumerate() {
            let record = record.map_err(|e| {
                BemError::DataError(format!("polar '{}': {e}", path.display()))
            })?;
            if record.len() < 3 {
                return Err(BemError::DataError(format!(
                    "polar '{}' data row {}: expected at least 3 columns, got {}",
                    path.display(),
                    line + 1,
                    record.len()
                )));
            }
            let mut values = [0.0_f64; 3];
            for (k, value) in values.iter_mut().enumerate() {
                *value = record[k].parse().map_err(|e| {
                    BemError::DataError(format!(
                        "polar '{}' data row {}, column {}: {e}",
                        path.display(),
                        line + 1,
                        k + 1
                    ))
                })?;
            }
            rows.push((values[0], values[1], values[2]));
        }

        Self::new(name, &rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.alpha.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alpha.is_empty()
    }

    pub fn alpha(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(&self.alpha[..])
    }

    /// Tabulated alpha range in degrees.
    pub fn alpha_range(&self) -> (f64, f64) {
        (self.alpha[0], self.alpha[self.alpha.len() - 1])
    }

    /// Interpolated (cl, cd) at `alpha_deg`; flat beyond the table ends.
    pub fn lookup(&self, alpha_deg: f64) -> PolarCoefficients {
        PolarCoefficients {
            cl: interp1d(alpha_deg, &self.alpha, &self.cl),
            cd: interp1d(alpha_deg, &self.alpha, &self.cd),
        }
    }
}

/// A single table used for every radius.
impl PolarProvider for PolarTable {
    fn coefficients(&self, _r_over_r: f64, alpha_deg: f64) -> PolarCoefficients {
        self.lookup(alpha_deg)
    }
}

/// Radial airfoil bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirfoilBand {
    Root,
    Mid,
    Tip,
}

/// Upper edges (inclusive) of the root and mid bands, in r/R.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandBoundaries {
    pub root: f64,
    pub mid: f64,
}

impl Default for BandBoundaries {
    fn default() -> Self {
        BandBoundaries {
            root: ROOT_BAND_BOUNDARY,
            mid: MID_BAND_BOUNDARY,
        }
    }
}

impl AirfoilBand {
    /// r ≤ root → Root, root < r ≤ mid → Mid, otherwise Tip.
    pub fn select(r_over_r: f64, boundaries: &BandBoundaries) -> Self {
        if r_over_r <= boundaries.root {
            AirfoilBand::Root
        } else if r_over_r <= boundaries.mid {
            AirfoilBand::Mid
        } else {
            AirfoilBand::Tip
        }
    }
}

/// Root, mid and tip polars with their band edges.
#[derive(Debug, Clone)]
pub struct BandedPolars {
    pub root: PolarTable,
    pub mid: PolarTable,
    pub tip: PolarTable,
    pub boundaries: BandBoundaries,
}

impl BandedPolars {
    pub fn new(
        root: PolarTable,
        mid: PolarTable,
        tip: PolarTable,
        boundaries: BandBoundaries,
    ) -> BemResult<Self> {
        if boundaries.root.is_nan()
            || boundaries.mid.is_nan()
            || boundaries.root >= boundaries.mid
        {
            return Err(BemError::ConfigError(format!(
                "band boundaries out of order: root {} >= mid {}",
                boundaries.root, boundaries.mid
            )));
        }
        Ok(BandedPolars {
            root,
            mid,
            tip,
            boundaries,
        })
    }

    /// Load all three polar files. Any failure aborts before a solve.
    pub fn load(
        root_path: impl AsRef<Path>,
        mid_path: impl AsRef<Path>,
        tip_path: impl AsRef<Path>,
        boundaries: BandBoundaries,
    ) -> BemResult<Self> {
        Self::new(
            PolarTable::from_csv(root_path)?,
            PolarTable::from_csv(mid_path)?,
            PolarTable::from_csv(tip_path)?,
            boundaries,
        )
    }

    /// Load the polars named by an airfoil config, relative to `base_dir`.
    pub fn from_config(airfoils: &AirfoilConfig, base_dir: &Path) -> BemResult<Self> {
        let resolve = |p: &str| {
            let path = Path::new(p);
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                base_dir.join(path)
            }
        };
        Self::load(
            resolve(&airfoils.root_polar),
            resolve(&airfoils.mid_polar),
            resolve(&airfoils.tip_polar),
            BandBoundaries {
                root: airfoils.root_boundary,
                mid: airfoils.mid_boundary,
            },
        )
    }

    pub fn table(&self, band: AirfoilBand) -> &PolarTable {
        match band {
            AirfoilBand::Root => &self.root,
            AirfoilBand::Mid => &self.mid,
            AirfoilBand::Tip => &self.tip,
        }
    }
}

impl PolarProvider for BandedPolars {
    fn coefficients(&self, r_over_r: f64, alpha_deg: f64) -> PolarCoefficients {
        self.table(AirfoilBand::select(r_over_r, &self.boundaries))
            .lookup(alpha_deg)
    }
}
