//! Orbital-plane to render-frame rotations and scene scaling.

use bevy::math::DVec3;

/// Scene units per astronomical unit (display scale).
pub const SCENE_UNITS_PER_AU: f64 = 100.0;

/// Convert a length in AU to scene units.
pub fn au_to_scene(au: f64) -> f64 {
    au * SCENE_UNITS_PER_AU
}

/// Rotate a position in the orbital plane into the heliocentric ecliptic frame.
///
/// The rotation order is significant: argument of periapsis within the orbital
/// plane, inclination about the ascending-node axis, then ascending node about
/// the ecliptic pole. Reversing the sequence produces a different frame.
pub fn orbital_to_ecliptic(
    x_orbit: f64,
    y_orbit: f64,
    arg_periapsis_rad: f64,
    inclination_rad: f64,
    ascending_node_rad: f64,
) -> DVec3 {
    let (sin_w, cos_w) = arg_periapsis_rad.sin_cos();
    let (sin_i, cos_i) = inclination_rad.sin_cos();
    let (sin_o, cos_o) = ascending_node_rad.sin_cos();

    // Periapsis rotation within the orbital plane.
    let x_plane = cos_w * x_orbit - sin_w * y_orbit;
    let y_plane = sin_w * x_orbit + cos_w * y_orbit;

    // Tilt about the ascending-node axis.
    let y_tilted = cos_i * y_plane;
    let z_tilted = sin_i * y_plane;

    // Node rotation about the ecliptic pole.
    DVec3::new(
        cos_o * x_plane - sin_o * y_tilted,
        sin_o * x_plane + cos_o * y_tilted,
        z_tilted,
    )
}

/// Remap ecliptic axes to the render frame.
/// Mapping: render (x,y,z) = (ecliptic.y, ecliptic.z, ecliptic.x), so the
/// ecliptic north pole (+z) becomes the renderer's up axis (+y).
pub fn ecliptic_to_render(ecliptic: DVec3) -> DVec3 {
    DVec3::new(ecliptic.y, ecliptic.z, ecliptic.x)
}
