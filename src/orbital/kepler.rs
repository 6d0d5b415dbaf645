//! Kepler's equation and anomaly conversions.

use anyhow::{Result, bail};
use std::f64::consts::PI;

/// Convergence tolerance for the Newton-Raphson iteration (radians).
const TOLERANCE_RAD: f64 = 1e-8;

/// Iteration cap; pathological inputs return their best estimate instead of looping.
const MAX_ITERATIONS: u32 = 50;

/// Outcome of a Kepler-equation solve.
///
/// Always carries the best available eccentric anomaly. `converged` is false
/// when the iteration cap was reached, so callers can decide whether to log,
/// retry with a relaxed tolerance, or ignore it.
#[derive(Copy, Clone, Debug)]
pub struct KeplerSolution {
    /// Eccentric anomaly (radians).
    pub eccentric_anomaly: f64,
    /// Newton-Raphson iterations used.
    pub iterations: u32,
    /// |E - e sin E - M| at the returned estimate (radians).
    pub residual: f64,
    /// Whether the last step shrank below tolerance.
    pub converged: bool,
}

/// Solve Kepler's equation `M = E - e sin E` for the eccentric anomaly.
///
/// Only elliptical orbits are supported; parabolic and hyperbolic inputs
/// (`e >= 1`) are rejected.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> Result<KeplerSolution> {
    if !mean_anomaly.is_finite() {
        bail!("mean anomaly must be finite, got {mean_anomaly}");
    }
    if !(0.0..1.0).contains(&eccentricity) {
        bail!("eccentricity must be in [0, 1) for an elliptical orbit, got {eccentricity}");
    }

    // Danby's starting point: the naive E0 = M diverges for highly eccentric orbits.
    let mut eccentric_anomaly = if eccentricity < 0.8 {
        mean_anomaly
    } else {
        PI * mean_anomaly.sin().signum()
    };

    let mut iterations = 0;
    let mut converged = false;
    while iterations < MAX_ITERATIONS {
        let f = eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly;
        let f_prime = 1.0 - eccentricity * eccentric_anomaly.cos();
        let delta = f / f_prime;
        eccentric_anomaly -= delta;
        iterations += 1;
        if delta.abs() < TOLERANCE_RAD {
            converged = true;
            break;
        }
    }

    let residual =
        (eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly).abs();
    Ok(KeplerSolution {
        eccentric_anomaly,
        iterations,
        residual,
        converged,
    })
}

/// True anomaly from eccentric anomaly.
/// Uses the half-angle atan2 form, which stays stable near `E = pi`.
pub fn eccentric_to_true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half = eccentric_anomaly / 2.0;
    2.0 * f64::atan2(
        (1.0 + eccentricity).sqrt() * half.sin(),
        (1.0 - eccentricity).sqrt() * half.cos(),
    )
}

/// Eccentric anomaly from true anomaly (inverse of [`eccentric_to_true_anomaly`]).
pub fn true_to_eccentric_anomaly(true_anomaly: f64, eccentricity: f64) -> f64 {
    let half = true_anomaly / 2.0;
    2.0 * f64::atan2(
        (1.0 - eccentricity).sqrt() * half.sin(),
        (1.0 + eccentricity).sqrt() * half.cos(),
    )
}

/// Distance from the focus at eccentric anomaly `E`: `a (1 - e cos E)`.
pub fn orbital_radius(semi_major_axis: f64, eccentricity: f64, eccentric_anomaly: f64) -> f64 {
    semi_major_axis * (1.0 - eccentricity * eccentric_anomaly.cos())
}

/// Wrap an angle in degrees to `[0, 360)`.
pub fn normalize_deg(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Mean anomaly (degrees, `[0, 360)`) from mean longitude and longitude of
/// perihelion: `M = L - (node + argument of periapsis)`.
pub fn mean_anomaly_from_mean_longitude(
    mean_longitude_deg: f64,
    perihelion_longitude_deg: f64,
) -> f64 {
    normalize_deg(mean_longitude_deg - perihelion_longitude_deg)
}
