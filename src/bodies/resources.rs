//! Body store and the dependency-ordered update list.

use anyhow::{Result, bail};
use bevy::math::DVec3;
use bevy::prelude::*;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

use crate::orbital::elements::{CircularOrbit, OrbitalElements};
use crate::orbital::propagation::{OrbitalInfo, orbital_info};

/// How one body's position is computed each frame.
#[derive(Clone, Debug)]
pub enum OrbitKind {
    /// Full Keplerian elements around the reference origin.
    Elliptical(OrbitalElements),
    /// Circular fast path around a parent body.
    Circular(CircularOrbit),
}

/// One tracked body.
#[derive(Debug)]
pub struct BodyEntry {
    pub name: String,
    pub orbit: OrbitKind,
    pub entity: Option<Entity>,
    /// Render-frame position (scene units) for the current frame. Doubles as
    /// the last good position when this frame's propagation failed.
    pub position: DVec3,
    /// Most recent propagation error, if any.
    pub error: Option<String>,
}

impl BodyEntry {
    pub fn new(name: impl Into<String>, orbit: OrbitKind) -> Self {
        Self {
            name: name.into(),
            orbit,
            entity: None,
            position: DVec3::ZERO,
            error: None,
        }
    }
}

/// Resource holding every tracked body keyed by name.
#[derive(Resource, Default)]
pub struct BodyStore {
    pub items: HashMap<String, BodyEntry>,
}

impl BodyStore {
    /// Current render-frame position of `name` (scene units).
    pub fn position(&self, name: &str) -> Option<DVec3> {
        self.items.get(name).map(|entry| entry.position)
    }

    /// Distance of `name` from the reference origin (scene units).
    pub fn distance_from_origin(&self, name: &str) -> Option<f64> {
        self.position(name).map(|position| position.length())
    }

    /// Diagnostic snapshot for an elliptically propagated body.
    pub fn orbital_info(&self, name: &str, date: DateTime<Utc>) -> Result<OrbitalInfo> {
        let Some(entry) = self.items.get(name) else {
            bail!("unknown body {name:?}");
        };
        match &entry.orbit {
            OrbitKind::Elliptical(elements) => orbital_info(name, elements, date),
            OrbitKind::Circular(_) => {
                bail!("{name:?} uses the circular fast path and has no element set")
            }
        }
    }
}

/// Parent-before-child evaluation order, fixed at startup.
#[derive(Resource, Default, Debug)]
pub struct UpdateOrder(pub Vec<String>);

/// Topologically sort bodies so every parent precedes its children.
///
/// Elliptical bodies are independent; circular bodies depend on their parent.
/// Missing parents and reference cycles are startup data errors.
pub fn dependency_order(items: &HashMap<String, BodyEntry>) -> Result<Vec<String>> {
    let mut names: Vec<&String> = items.keys().collect();
    names.sort();

    for entry in items.values() {
        if let OrbitKind::Circular(orbit) = &entry.orbit
            && !items.contains_key(&orbit.parent)
        {
            bail!(
                "{}: parent body {:?} is not in the store",
                entry.name,
                orbit.parent
            );
        }
    }

    let mut order: Vec<String> = Vec::with_capacity(names.len());
    let mut placed: HashSet<&str> = HashSet::new();
    while order.len() < names.len() {
        let before = order.len();
        for name in &names {
            if placed.contains(name.as_str()) {
                continue;
            }
            let ready = match &items[name.as_str()].orbit {
                OrbitKind::Elliptical(_) => true,
                OrbitKind::Circular(orbit) => placed.contains(orbit.parent.as_str()),
            };
            if ready {
                placed.insert(name.as_str());
                order.push((*name).clone());
            }
        }
        if order.len() == before {
            let stuck: Vec<&str> = names
                .iter()
                .filter(|name| !placed.contains(name.as_str()))
                .map(|name| name.as_str())
                .collect();
            bail!("parent references form a cycle among: {}", stuck.join(", "));
        }
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elliptical_stub() -> OrbitKind {
        OrbitKind::Elliptical(OrbitalElements {
            semi_major_axis_au: 1.0,
            eccentricity: 0.0,
            inclination_deg: 0.0,
            mean_longitude_deg: 0.0,
            perihelion_longitude_deg: 0.0,
            ascending_node_deg: 0.0,
            rates: None,
        })
    }

    fn circular_stub(parent: &str) -> OrbitKind {
        OrbitKind::Circular(CircularOrbit {
            parent: parent.to_string(),
            radius: 1.0,
            period_ms: 1_000.0,
            phase_deg: 0.0,
        })
    }

    fn store_of(entries: Vec<(&str, OrbitKind)>) -> HashMap<String, BodyEntry> {
        entries
            .into_iter()
            .map(|(name, orbit)| (name.to_string(), BodyEntry::new(name, orbit)))
            .collect()
    }

    #[test]
    fn test_dependency_order_three_deep_chain() {
        let items = store_of(vec![
            ("station", circular_stub("moon")),
            ("moon", circular_stub("earth")),
            ("earth", elliptical_stub()),
            ("mars", elliptical_stub()),
        ]);
        let order = dependency_order(&items).unwrap();

        let index = |name: &str| order.iter().position(|n| n == name).unwrap();
        assert!(index("earth") < index("moon"));
        assert!(index("moon") < index("station"));
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn test_dependency_order_rejects_missing_parent() {
        let items = store_of(vec![("moon", circular_stub("earth"))]);
        let err = dependency_order(&items).unwrap_err().to_string();
        assert!(err.contains("earth"), "message: {err}");
    }

    #[test]
    fn test_dependency_order_rejects_cycles() {
        let items = store_of(vec![
            ("a", circular_stub("b")),
            ("b", circular_stub("a")),
        ]);
        let err = dependency_order(&items).unwrap_err().to_string();
        assert!(err.contains("cycle"), "message: {err}");
    }

    #[test]
    fn test_store_lookups() {
        let mut store = BodyStore::default();
        store
            .items
            .insert("earth".to_string(), BodyEntry::new("earth", elliptical_stub()));
        store.items.get_mut("earth").unwrap().position = DVec3::new(3.0, 0.0, 4.0);

        assert_eq!(store.position("earth"), Some(DVec3::new(3.0, 0.0, 4.0)));
        assert_eq!(store.distance_from_origin("earth"), Some(5.0));
        assert_eq!(store.position("pluto"), None);
    }

    #[test]
    fn test_orbital_info_only_for_elliptical_bodies() {
        let mut store = BodyStore::default();
        store
            .items
            .insert("earth".to_string(), BodyEntry::new("earth", elliptical_stub()));
        store
            .items
            .insert("moon".to_string(), BodyEntry::new("moon", circular_stub("earth")));

        let date = crate::orbital::epoch::j2000_epoch();
        assert!(store.orbital_info("earth", date).is_ok());
        assert!(store.orbital_info("moon", date).is_err());
        assert!(store.orbital_info("pluto", date).is_err());
    }
}
