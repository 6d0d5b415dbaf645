//! Marker components for celestial-body entities.

use bevy::prelude::*;

/// Marker for any body whose position the engine drives.
#[derive(Component)]
pub struct CelestialBody;

/// Store key of the body this entity represents.
#[derive(Component, Clone, Debug)]
pub struct BodyName(pub String);
