//! Body systems: startup spawning and per-frame propagation in
//! parent-before-child order.

use anyhow::anyhow;
use bevy::prelude::*;

use crate::bodies::components::{BodyName, CelestialBody};
use crate::bodies::data::solar_system;
use crate::bodies::resources::{BodyEntry, BodyStore, OrbitKind, UpdateOrder, dependency_order};
use crate::orbital::propagation::{propagate_circular, propagate_elliptical};
use crate::orbital::time::SimulationClock;

/// Load the built-in reference tables, validate every body, compute the
/// parent-before-child order, and spawn one entity per body.
///
/// Invalid reference data aborts startup loudly; silently skipping a body
/// would hide data-entry mistakes behind an empty patch of sky.
pub fn spawn_bodies(
    mut commands: Commands,
    mut store: ResMut<BodyStore>,
    mut order: ResMut<UpdateOrder>,
) {
    for (name, orbit) in solar_system() {
        let validation = match &orbit {
            OrbitKind::Elliptical(elements) => elements.validate(),
            OrbitKind::Circular(circular) => circular.validate(),
        };
        if let Err(err) = validation {
            panic!("reference data for {name:?} is invalid: {err:#}");
        }

        let entity = commands
            .spawn((
                CelestialBody,
                BodyName(name.to_string()),
                Name::new(name),
                Transform::default(),
            ))
            .id();

        let mut entry = BodyEntry::new(name, orbit);
        entry.entity = Some(entity);
        store.items.insert(name.to_string(), entry);
    }

    match dependency_order(&store.items) {
        Ok(sorted) => {
            info!("tracking {} bodies: {}", sorted.len(), sorted.join(", "));
            order.0 = sorted;
        }
        Err(err) => panic!("body dependency graph is invalid: {err:#}"),
    }
}

/// Propagate every body for the clock's current instant, parents first.
///
/// A failing body keeps its last good position and records the error instead
/// of halting the loop: one frozen body is recoverable, a dead frame is not.
pub fn propagate_bodies(
    clock: Res<SimulationClock>,
    order: Res<UpdateOrder>,
    mut store: ResMut<BodyStore>,
) {
    let date = clock.current_date();
    let sim_ms = clock.sim_time_ms();

    for name in &order.0 {
        let Some(entry) = store.items.get(name) else {
            continue;
        };
        let outcome = match &entry.orbit {
            OrbitKind::Elliptical(elements) => {
                propagate_elliptical(elements, date, true).map(|state| state.position)
            }
            OrbitKind::Circular(orbit) => match store.position(&orbit.parent) {
                Some(parent_position) => Ok(propagate_circular(orbit, sim_ms, parent_position)),
                None => Err(anyhow!("parent body {:?} missing from store", orbit.parent)),
            },
        };

        let Some(entry) = store.items.get_mut(name) else {
            continue;
        };
        match outcome {
            Ok(position) => {
                entry.position = position;
                entry.error = None;
            }
            Err(err) => {
                if entry.error.is_none() {
                    warn!("propagation failed for {name}: {err:#}; keeping last position");
                }
                entry.error = Some(format!("{err:#}"));
            }
        }
    }
}

/// Mirror store positions into entity transforms for the render layer.
pub fn sync_body_transforms(
    store: Res<BodyStore>,
    mut query: Query<(&BodyName, &mut Transform), With<CelestialBody>>,
) {
    for (name, mut transform) in query.iter_mut() {
        if let Some(position) = store.position(&name.0) {
            transform.translation = position.as_vec3();
        }
    }
}
