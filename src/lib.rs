//! Orbital-mechanics and simulation-clock engine for a real-time,
//! time-accelerated solar-system visualization.
//!
//! The engine owns two things: a pausable, speed-scaled [`SimulationClock`],
//! and the per-frame propagation of every tracked body. Planets follow full
//! Keplerian elements with secular rates; moons and stations follow a
//! circular fast path around their moving parent, evaluated in an explicit
//! parent-before-child order. Rendering, input, and camera control belong to
//! the downstream application, which consumes per-body `Transform`s (or
//! [`BodyStore`] positions) and the clock's current date.

use bevy::prelude::*;

pub mod bodies;
pub mod orbital;

pub use bodies::{BodiesPlugin, BodyStore, UpdateOrder};
pub use orbital::{OrbitalPlugin, SimulationClock};

/// Convenience plugin adding the simulation clock and body orchestration together.
pub struct OrreryPlugin;

impl Plugin for OrreryPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((OrbitalPlugin, BodiesPlugin));
    }
}
