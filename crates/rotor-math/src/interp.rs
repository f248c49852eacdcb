// ─────────────────────────────────────────────────────────────────────
// SCPN Rotor BEM — Interp
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Piecewise-linear 1D interpolation and radial grid helpers.
//!
//! Used by polar lookup (alpha → cl, cd) and blade geometry (r/R → chord, twist).

use ndarray::{Array1, ArrayView1};

/// Piecewise-linear interpolation of `fp(xp)` at `x`.
///
/// `xp` must be strictly increasing and the same length as `fp` (≥ 1).
/// Outside `[xp[0], xp[n-1]]` the boundary value is returned unchanged,
/// so there is no extrapolation. NaN `x` gives NaN.
pub fn interp1d(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let n = xp.len();
    assert!(n > 0, "interp1d needs at least one sample");
    assert_eq!(n, fp.len(), "xp and fp length mismatch");

    if x.is_nan() {
        return f64::NAN;
    }

    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[n - 1] {
        return fp[n - 1];
    }

    // First index with xp[i] > x; 1 <= hi <= n-1 here
    let hi = xp.partition_point(|&v| v <= x);
    let lo = hi - 1;
    let t = (x - xp[lo]) / (xp[hi] - xp[lo]);
    fp[lo] + t * (fp[hi] - fp[lo])
}

/// [`interp1d`] over ndarray views. Falls back to a copy for
/// non-contiguous views.
pub fn interp1d_view(x: f64, xp: ArrayView1<f64>, fp: ArrayView1<f64>) -> f64 {
    match (xp.as_slice(), fp.as_slice()) {
        (Some(xs), Some(fs)) => interp1d(x, xs, fs),
        _ => interp1d(x, &xp.to_vec(), &fp.to_vec()),
    }
}

/// True if `xp` is strictly increasing.
pub fn is_strictly_increasing(xp: &[f64]) -> bool {
    xp.windows(2).all(|w| w[1] > w[0])
}

/// Annulus edges from `start` to `end` inclusive.
///
/// The span is divided into `round((end - start) / width)` equal annuli
/// (at least one), so the last edge lands exactly on `end`.
pub fn radial_edges(start: f64, end: f64, width: f64) -> Array1<f64> {
    assert!(end > start, "radial_edges: end must exceed start");
    assert!(width > 0.0, "radial_edges: width must be > 0");
    let n = (((end - start) / width).round() as usize).max(1);
    let mut edges = Array1::linspace(start, end, n + 1);
    edges[n] = end;
    edges
}

/// Midpoints of consecutive edges.
pub fn midpoints(edges: &Array1<f64>) -> Array1<f64> {
    let n = edges.len().saturating_sub(1);
    Array1::from_shape_fn(n, |i| 0.5 * (edges[i] + edges[i + 1]))
}
