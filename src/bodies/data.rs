//! Built-in reference data: approximate planetary elements with secular
//! rates, and display-scaled circular descriptors for moons and the station.

use crate::bodies::resources::OrbitKind;
use crate::orbital::elements::{CircularOrbit, ElementRates, OrbitalElements};
use crate::orbital::epoch::MS_PER_DAY;

fn planet(elements: [f64; 6], rates: [f64; 6]) -> OrbitKind {
    let [a, e, i, l, peri, node] = elements;
    let [da, de, di, dl, dperi, dnode] = rates;
    OrbitKind::Elliptical(OrbitalElements {
        semi_major_axis_au: a,
        eccentricity: e,
        inclination_deg: i,
        mean_longitude_deg: l,
        perihelion_longitude_deg: peri,
        ascending_node_deg: node,
        rates: Some(ElementRates {
            semi_major_axis_au: da,
            eccentricity: de,
            inclination_deg: di,
            mean_longitude_deg: dl,
            perihelion_longitude_deg: dperi,
            ascending_node_deg: dnode,
        }),
    })
}

fn satellite(parent: &str, radius: f64, period_days: f64, phase_deg: f64) -> OrbitKind {
    OrbitKind::Circular(CircularOrbit {
        parent: parent.to_string(),
        radius,
        period_ms: period_days * MS_PER_DAY,
        phase_deg,
    })
}

/// Every body the engine tracks out of the box.
///
/// Planetary elements and per-century rates are the JPL approximate-position
/// values for 1800 AD - 2050 AD (a, e, I, L, longitude of perihelion,
/// longitude of ascending node; degrees and AU). Moon/station orbit radii are
/// display-scaled, not physical; their periods are the real ones.
pub fn solar_system() -> Vec<(&'static str, OrbitKind)> {
    vec![
        (
            "mercury",
            planet(
                [
                    0.38709927,
                    0.20563593,
                    7.00497902,
                    252.25032350,
                    77.45779628,
                    48.33076593,
                ],
                [
                    0.00000037,
                    0.00001906,
                    -0.00594749,
                    149472.67411175,
                    0.16047689,
                    -0.12534081,
                ],
            ),
        ),
        (
            "venus",
            planet(
                [
                    0.72333566,
                    0.00677672,
                    3.39467605,
                    181.97909950,
                    131.60246718,
                    76.67984255,
                ],
                [
                    0.00000390,
                    -0.00004107,
                    -0.00078890,
                    58517.81538729,
                    0.00268329,
                    -0.27769418,
                ],
            ),
        ),
        (
            "earth",
            planet(
                [
                    1.00000261,
                    0.01671123,
                    -0.00001531,
                    100.46457166,
                    102.93768193,
                    0.0,
                ],
                [
                    0.00000562,
                    -0.00004392,
                    -0.01294668,
                    35999.37244981,
                    0.32327364,
                    0.0,
                ],
            ),
        ),
        (
            "mars",
            planet(
                [
                    1.52371034,
                    0.09339410,
                    1.84969142,
                    -4.55343205,
                    -23.94362959,
                    49.55953891,
                ],
                [
                    0.00001847,
                    0.00007882,
                    -0.00813131,
                    19140.30268499,
                    0.44441088,
                    -0.29257343,
                ],
            ),
        ),
        (
            "jupiter",
            planet(
                [
                    5.20288700,
                    0.04838624,
                    1.30439695,
                    34.39644051,
                    14.72847983,
                    100.47390909,
                ],
                [
                    -0.00011607,
                    -0.00013253,
                    -0.00183714,
                    3034.74612775,
                    0.21252668,
                    0.20469106,
                ],
            ),
        ),
        (
            "saturn",
            planet(
                [
                    9.53667594,
                    0.05386179,
                    2.48599187,
                    49.95424423,
                    92.59887831,
                    113.66242448,
                ],
                [
                    -0.00125060,
                    -0.00050991,
                    0.00193609,
                    1222.49362201,
                    -0.41897216,
                    -0.28867794,
                ],
            ),
        ),
        (
            "uranus",
            planet(
                [
                    19.18916464,
                    0.04725744,
                    0.77263783,
                    313.23810451,
                    170.95427630,
                    74.01692503,
                ],
                [
                    -0.00196176,
                    -0.00004397,
                    -0.00242939,
                    428.48202785,
                    0.40805281,
                    0.04240589,
                ],
            ),
        ),
        (
            "neptune",
            planet(
                [
                    30.06992276,
                    0.00859048,
                    1.77004347,
                    -55.12002969,
                    44.96476227,
                    131.78422574,
                ],
                [
                    0.00026291,
                    0.00005105,
                    0.00035372,
                    218.45945325,
                    -0.32241464,
                    -0.00508664,
                ],
            ),
        ),
        ("moon", satellite("earth", 6.0, 27.321661, 0.0)),
        ("io", satellite("jupiter", 4.0, 1.769138, 0.0)),
        ("europa", satellite("jupiter", 5.5, 3.551181, 120.0)),
        // Lunar orbiter; the only body three levels deep in the parent chain.
        ("station", satellite("moon", 1.2, 0.25, 0.0)),
    ]
}
