//! Keplerian element sets and circular-orbit descriptors.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Keplerian orbital elements in the shape the JPL approximate-ephemeris
/// tables publish: lengths in astronomical units, angles in degrees, all
/// referenced to the J2000.0 epoch.
///
/// Element sets are immutable reference data; secular correction produces a
/// derived transient copy via [`OrbitalElements::at_centuries`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis (AU).
    pub semi_major_axis_au: f64,
    /// Eccentricity (dimensionless, 0 <= e < 1).
    pub eccentricity: f64,
    /// Inclination to the ecliptic (degrees).
    pub inclination_deg: f64,
    /// Mean longitude L at J2000.0 (degrees).
    pub mean_longitude_deg: f64,
    /// Longitude of perihelion, ascending node + argument of periapsis (degrees).
    pub perihelion_longitude_deg: f64,
    /// Longitude of the ascending node (degrees).
    pub ascending_node_deg: f64,
    /// Secular drift rates per Julian century, if modeled.
    pub rates: Option<ElementRates>,
}

/// Linear element drift per Julian century.
///
/// For the planets the mean-longitude rate carries the mean motion, so
/// propagation is meaningless without applying it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementRates {
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub mean_longitude_deg: f64,
    pub perihelion_longitude_deg: f64,
    pub ascending_node_deg: f64,
}

impl OrbitalElements {
    /// Argument of periapsis (degrees): longitude of perihelion minus node.
    pub fn arg_periapsis_deg(&self) -> f64 {
        self.perihelion_longitude_deg - self.ascending_node_deg
    }

    /// Perihelion distance `a (1 - e)` (AU).
    pub fn perihelion_au(&self) -> f64 {
        self.semi_major_axis_au * (1.0 - self.eccentricity)
    }

    /// Aphelion distance `a (1 + e)` (AU).
    pub fn aphelion_au(&self) -> f64 {
        self.semi_major_axis_au * (1.0 + self.eccentricity)
    }

    /// Orbital period from Kepler's third law (days); valid for orbits around
    /// the reference origin (the Sun).
    pub fn period_days(&self) -> f64 {
        self.semi_major_axis_au.powf(1.5) * 365.25
    }

    /// Elements advanced by `centuries` of secular drift. The stored reference
    /// set is left untouched; propagation works on the returned copy.
    pub fn at_centuries(&self, centuries: f64) -> OrbitalElements {
        let Some(rates) = self.rates else {
            return *self;
        };
        OrbitalElements {
            semi_major_axis_au: self.semi_major_axis_au + rates.semi_major_axis_au * centuries,
            eccentricity: self.eccentricity + rates.eccentricity * centuries,
            inclination_deg: self.inclination_deg + rates.inclination_deg * centuries,
            mean_longitude_deg: self.mean_longitude_deg + rates.mean_longitude_deg * centuries,
            perihelion_longitude_deg: self.perihelion_longitude_deg
                + rates.perihelion_longitude_deg * centuries,
            ascending_node_deg: self.ascending_node_deg + rates.ascending_node_deg * centuries,
            rates: self.rates,
        }
    }

    /// Check physical plausibility, naming the offending field.
    /// Out-of-range values are rejected, never clamped; clamping would mask
    /// data-entry mistakes in the reference tables.
    pub fn validate(&self) -> Result<()> {
        if !self.semi_major_axis_au.is_finite() || self.semi_major_axis_au <= 0.0 {
            bail!(
                "semi-major axis must be positive and finite, got {} AU",
                self.semi_major_axis_au
            );
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            bail!(
                "eccentricity must be in [0, 1), got {}",
                self.eccentricity
            );
        }
        for (field, value) in [
            ("inclination", self.inclination_deg),
            ("mean longitude", self.mean_longitude_deg),
            ("perihelion longitude", self.perihelion_longitude_deg),
            ("ascending node", self.ascending_node_deg),
        ] {
            if !value.is_finite() {
                bail!("{field} must be finite, got {value} degrees");
            }
        }
        Ok(())
    }
}

/// Circular-orbit descriptor for bodies whose orbit shape is visually
/// unimportant (moons, stations) but whose dependency on a moving parent is
/// the essential correctness property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircularOrbit {
    /// Body this orbit is centered on. Its position must be computed earlier
    /// in the same frame; a stale parent shifts the child by the same offset.
    pub parent: String,
    /// Orbit radius (scene units; display-scaled, not physical).
    pub radius: f64,
    /// Orbital period (simulated milliseconds).
    pub period_ms: f64,
    /// Phase angle at simulation time zero (degrees).
    pub phase_deg: f64,
}

impl CircularOrbit {
    /// Check physical plausibility, naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.parent.is_empty() {
            bail!("circular orbit needs a parent body name");
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            bail!("orbit radius must be positive and finite, got {}", self.radius);
        }
        if !self.period_ms.is_finite() || self.period_ms <= 0.0 {
            bail!(
                "orbital period must be positive and finite, got {} ms",
                self.period_ms
            );
        }
        if !self.phase_deg.is_finite() {
            bail!("phase angle must be finite, got {} degrees", self.phase_deg);
        }
        Ok(())
    }
}
