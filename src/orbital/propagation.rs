//! Position propagation: full Keplerian ellipses and the circular fast path.

use anyhow::{Context, Result, bail};
use bevy::math::DVec3;
use bevy::prelude::*;
use chrono::{DateTime, Utc};
use std::f64::consts::TAU;

use crate::orbital::elements::{CircularOrbit, OrbitalElements};
use crate::orbital::epoch::julian_centuries_since_j2000;
use crate::orbital::frame::{SCENE_UNITS_PER_AU, ecliptic_to_render, orbital_to_ecliptic};
use crate::orbital::kepler::{
    KeplerSolution, eccentric_to_true_anomaly, mean_anomaly_from_mean_longitude, orbital_radius,
    solve_kepler,
};

/// One propagated body state.
#[derive(Copy, Clone, Debug)]
pub struct PropagatedBody {
    /// Position in the render frame (scene units).
    pub position: DVec3,
    /// Heliocentric ecliptic position (AU).
    pub ecliptic_au: DVec3,
    /// Distance from the focus (AU).
    pub radius_au: f64,
    /// True anomaly (radians).
    pub true_anomaly_rad: f64,
    /// Kepler-equation solve diagnostics.
    pub kepler: KeplerSolution,
}

/// Position state for one element set and mean anomaly, after secular
/// correction has already been applied.
fn state_at_mean_anomaly(
    current: &OrbitalElements,
    mean_anomaly_rad: f64,
) -> Result<PropagatedBody> {
    let kepler = solve_kepler(mean_anomaly_rad, current.eccentricity)?;
    let true_anomaly_rad = eccentric_to_true_anomaly(kepler.eccentric_anomaly, current.eccentricity);
    let radius_au = orbital_radius(
        current.semi_major_axis_au,
        current.eccentricity,
        kepler.eccentric_anomaly,
    );

    let x_orbit = radius_au * true_anomaly_rad.cos();
    let y_orbit = radius_au * true_anomaly_rad.sin();
    let ecliptic_au = orbital_to_ecliptic(
        x_orbit,
        y_orbit,
        current.arg_periapsis_deg().to_radians(),
        current.inclination_deg.to_radians(),
        current.ascending_node_deg.to_radians(),
    );

    Ok(PropagatedBody {
        position: ecliptic_to_render(ecliptic_au) * SCENE_UNITS_PER_AU,
        ecliptic_au,
        radius_au,
        true_anomaly_rad,
        kepler,
    })
}

/// Propagate a full element set to `date`.
///
/// With `apply_rates` the elements are first advanced by their secular rates
/// times the Julian centuries since J2000.0; for the planets the mean-longitude
/// rate carries the mean motion, so this is what makes them move at all.
pub fn propagate_elliptical(
    elements: &OrbitalElements,
    date: DateTime<Utc>,
    apply_rates: bool,
) -> Result<PropagatedBody> {
    elements.validate()?;

    let current = if apply_rates {
        elements.at_centuries(julian_centuries_since_j2000(date))
    } else {
        *elements
    };

    let mean_anomaly_deg = mean_anomaly_from_mean_longitude(
        current.mean_longitude_deg,
        current.perihelion_longitude_deg,
    );
    let state = state_at_mean_anomaly(&current, mean_anomaly_deg.to_radians())?;
    if !state.kepler.converged {
        // A slightly-off angle is visually imperceptible; a crash is not.
        warn!(
            "kepler iteration hit its cap for M={:.6} rad, e={:.6} (residual {:.3e}); using best estimate",
            mean_anomaly_deg.to_radians(),
            current.eccentricity,
            state.kepler.residual
        );
    }
    Ok(state)
}

/// Circular fast path for moons and stations: phase angle from simulation
/// time, flat-plane offset added to the parent's position.
///
/// The parent position must have been computed for the same simulation time
/// earlier in the frame; a stale parent shifts the child by the same offset.
pub fn propagate_circular(
    orbit: &CircularOrbit,
    sim_time_ms: f64,
    parent_position: DVec3,
) -> DVec3 {
    let revolutions = sim_time_ms.rem_euclid(orbit.period_ms) / orbit.period_ms;
    let theta = orbit.phase_deg.to_radians() + TAU * revolutions;
    parent_position + DVec3::new(orbit.radius * theta.cos(), 0.0, orbit.radius * theta.sin())
}

/// Structured diagnostic snapshot for one body at one instant.
#[derive(Clone, Debug)]
pub struct OrbitalInfo {
    pub body: String,
    pub date: DateTime<Utc>,
    /// Render-frame position (scene units).
    pub position: DVec3,
    /// Current distance from the focus (AU).
    pub distance_au: f64,
    pub eccentricity: f64,
    pub perihelion_au: f64,
    pub aphelion_au: f64,
}

/// Snapshot of `body` at `date`, for HUD display and validation.
pub fn orbital_info(
    body: &str,
    elements: &OrbitalElements,
    date: DateTime<Utc>,
) -> Result<OrbitalInfo> {
    let state = propagate_elliptical(elements, date, true)
        .with_context(|| format!("propagating {body}"))?;
    Ok(OrbitalInfo {
        body: body.to_string(),
        date,
        position: state.position,
        distance_au: state.radius_au,
        eccentricity: elements.eccentricity,
        perihelion_au: elements.perihelion_au(),
        aphelion_au: elements.aphelion_au(),
    })
}

/// Evenly spaced positions around one revolution at `date`, for renderers
/// that draw orbit lines. The sweep is in mean anomaly, so point spacing
/// reflects time along the orbit, not arc length.
pub fn sample_orbit_path(
    elements: &OrbitalElements,
    date: DateTime<Utc>,
    segments: usize,
) -> Result<Vec<DVec3>> {
    if segments == 0 {
        bail!("orbit path needs at least one segment");
    }
    elements.validate()?;

    let current = elements.at_centuries(julian_centuries_since_j2000(date));
    let mut points = Vec::with_capacity(segments + 1);
    for step in 0..=segments {
        let mean_anomaly = TAU * step as f64 / segments as f64;
        points.push(state_at_mean_anomaly(&current, mean_anomaly)?.position);
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbital::epoch::j2000_epoch;
    use crate::orbital::frame::au_to_scene;
    use chrono::TimeZone;

    fn flat_circular(a: f64) -> OrbitalElements {
        OrbitalElements {
            semi_major_axis_au: a,
            eccentricity: 0.0,
            inclination_deg: 0.0,
            mean_longitude_deg: 0.0,
            perihelion_longitude_deg: 0.0,
            ascending_node_deg: 0.0,
            rates: None,
        }
    }

    #[test]
    fn test_circular_orbit_at_epoch_lies_in_reference_plane() {
        let state = propagate_elliptical(&flat_circular(1.0), j2000_epoch(), true).unwrap();
        // On a circle of radius a, with the up coordinate exactly zero.
        assert!((state.position.length() - au_to_scene(1.0)).abs() < 1e-9);
        assert_eq!(state.position.y, 0.0);
        assert!((state.radius_au - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_circular_orbit_distance_invariant_over_time() {
        let mut elements = flat_circular(2.0);
        elements.rates = Some(crate::orbital::elements::ElementRates {
            mean_longitude_deg: 35999.37,
            ..Default::default()
        });
        for month in 1..=12 {
            let date = Utc.with_ymd_and_hms(2013, month, 15, 0, 0, 0).unwrap();
            let state = propagate_elliptical(&elements, date, true).unwrap();
            assert!(
                (state.position.length() - au_to_scene(2.0)).abs() < 1e-6,
                "distance drifted in month {}: {}",
                month,
                state.position.length()
            );
        }
    }

    #[test]
    fn test_perihelion_and_aphelion_distances() {
        let mut elements = flat_circular(1.0);
        elements.eccentricity = 0.2;

        // L = perihelion longitude puts the body at M = 0 (perihelion).
        let perihelion = propagate_elliptical(&elements, j2000_epoch(), true).unwrap();
        elements.mean_longitude_deg = 180.0;
        let aphelion = propagate_elliptical(&elements, j2000_epoch(), true).unwrap();

        assert!(perihelion.radius_au < aphelion.radius_au);
        assert!((perihelion.radius_au - 0.8).abs() < 1e-9);
        assert!((aphelion.radius_au - 1.2).abs() < 1e-9);
        assert!((perihelion.position.length() - au_to_scene(0.8)).abs() < 1e-6);
        assert!((aphelion.position.length() - au_to_scene(1.2)).abs() < 1e-6);
    }

    #[test]
    fn test_secular_rates_move_the_body() {
        let mut elements = flat_circular(1.0);
        elements.rates = Some(crate::orbital::elements::ElementRates {
            mean_longitude_deg: 35999.37,
            ..Default::default()
        });
        let date = Utc.with_ymd_and_hms(2000, 7, 1, 12, 0, 0).unwrap();

        let moved = propagate_elliptical(&elements, date, true).unwrap();
        let frozen = propagate_elliptical(&elements, date, false).unwrap();
        assert!(
            (moved.position - frozen.position).length() > 1.0,
            "rates had no effect: {:?} vs {:?}",
            moved.position,
            frozen.position
        );
        // Half a year of mean motion lands roughly on the opposite side.
        let at_epoch = propagate_elliptical(&elements, j2000_epoch(), true).unwrap();
        assert!(moved.position.dot(at_epoch.position) < 0.0);
    }

    #[test]
    fn test_propagation_rejects_invalid_elements() {
        let mut elements = flat_circular(1.0);
        elements.eccentricity = 1.5;
        let err = propagate_elliptical(&elements, j2000_epoch(), true).unwrap_err();
        assert!(err.to_string().contains("eccentricity"));
    }

    #[test]
    fn test_circular_fast_path_phase_and_wrap() {
        let orbit = CircularOrbit {
            parent: "earth".to_string(),
            radius: 6.0,
            period_ms: 1_000.0,
            phase_deg: 0.0,
        };
        let parent = DVec3::new(10.0, 0.0, 0.0);

        let start = propagate_circular(&orbit, 0.0, parent);
        assert!((start - (parent + DVec3::new(6.0, 0.0, 0.0))).length() < 1e-9);

        let quarter = propagate_circular(&orbit, 250.0, parent);
        assert!((quarter - (parent + DVec3::new(0.0, 0.0, 6.0))).length() < 1e-9);

        let wrapped = propagate_circular(&orbit, 1_000.0, parent);
        assert!((wrapped - start).length() < 1e-9);

        // Offset stays in the flat plane and at the configured radius.
        for t in [0.0, 125.0, 333.0, 900.0] {
            let position = propagate_circular(&orbit, t, parent);
            assert_eq!(position.y, parent.y);
            assert!(((position - parent).length() - orbit.radius).abs() < 1e-9);
        }
    }

    #[test]
    fn test_circular_fast_path_tracks_parent() {
        // Same simulation time, different parent positions: the dependency is
        // live, not cached.
        let orbit = CircularOrbit {
            parent: "earth".to_string(),
            radius: 2.0,
            period_ms: 1_000.0,
            phase_deg: 45.0,
        };
        let a = propagate_circular(&orbit, 500.0, DVec3::new(0.0, 0.0, 0.0));
        let b = propagate_circular(&orbit, 500.0, DVec3::new(7.0, 0.0, -3.0));
        assert!((b - a - DVec3::new(7.0, 0.0, -3.0)).length() < 1e-12);
        assert!((a - b).length() > 1.0);
    }

    #[test]
    fn test_orbital_info_snapshot() {
        let mut elements = flat_circular(1.0);
        elements.eccentricity = 0.2;
        let info = orbital_info("test", &elements, j2000_epoch()).unwrap();
        assert_eq!(info.body, "test");
        assert_eq!(info.eccentricity, 0.2);
        assert!((info.perihelion_au - 0.8).abs() < 1e-12);
        assert!((info.aphelion_au - 1.2).abs() < 1e-12);
        assert!((info.distance_au - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_sample_orbit_path_closes_and_bounds() {
        let mut elements = flat_circular(1.0);
        elements.eccentricity = 0.3;
        let points = sample_orbit_path(&elements, j2000_epoch(), 64).unwrap();
        assert_eq!(points.len(), 65);
        assert!((points[0] - points[64]).length() < 1e-6);
        for point in &points {
            let r = point.length();
            assert!(r >= au_to_scene(0.7) - 1e-6 && r <= au_to_scene(1.3) + 1e-6);
        }
        assert!(sample_orbit_path(&elements, j2000_epoch(), 0).is_err());
    }
}
