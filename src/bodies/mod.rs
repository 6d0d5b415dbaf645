//! Celestial-body orchestration
//!
//! This module holds the built-in reference data, the body store the render
//! layer reads positions from, and the systems that propagate every body in
//! explicit parent-before-child order each frame.

use bevy::prelude::*;

pub mod components;
pub mod data;
pub mod resources;
pub mod systems;

pub use components::{BodyName, CelestialBody};
pub use resources::{BodyEntry, BodyStore, OrbitKind, UpdateOrder, dependency_order};
pub use systems::{propagate_bodies, spawn_bodies, sync_body_transforms};

use crate::orbital::time::tick_simulation_clock;

/// Plugin wiring body spawning and the ordered per-frame update chain.
pub struct BodiesPlugin;

impl Plugin for BodiesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BodyStore>()
            .init_resource::<UpdateOrder>()
            .add_systems(Startup, spawn_bodies)
            .add_systems(
                Update,
                (
                    propagate_bodies.after(tick_simulation_clock),
                    sync_body_transforms.after(propagate_bodies),
                ),
            );
    }
}
