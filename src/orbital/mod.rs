//! Orbital mechanics module
//!
//! This module owns the simulation clock, epoch arithmetic, the Kepler
//! equation solver, orbital-frame rotations, and position propagation.

use bevy::prelude::*;

pub mod elements;
pub mod epoch;
pub mod frame;
pub mod kepler;
pub mod propagation;
pub mod time;

pub use elements::{CircularOrbit, ElementRates, OrbitalElements};
pub use epoch::{julian_centuries_since_j2000, julian_date_utc};
pub use kepler::{KeplerSolution, solve_kepler};
pub use propagation::{
    OrbitalInfo, PropagatedBody, orbital_info, propagate_circular, propagate_elliptical,
};
pub use time::{SimulationClock, format_elapsed, format_speed, tick_simulation_clock};

/// Plugin owning the simulation clock and its per-frame tick.
pub struct OrbitalPlugin;

impl Plugin for OrbitalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationClock>()
            .add_systems(Update, tick_simulation_clock);
    }
}
