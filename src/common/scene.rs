//! Scene loading, parsing, and validation logic.
//!
//! A scene describes a network snapshot and the vessels attached to it:
//!
//! ```json
//! {
//!   "nodes": [
//!     { "name": "KSC", "position": { "x": 0, "y": 0, "z": 0 }, "home": true, "relay": true },
//!     { "name": "Relay 1", "position": { "x": 400, "y": 300, "z": 50 }, "relay": true }
//!   ],
//!   "links": [ { "a": "Relay 1", "b": "KSC", "strength": 0.8 } ],
//!   "vessels": [ { "name": "Relay 1", "node": "Relay 1", "control_state": "Normal" } ]
//! }
//! ```
//!
//! Vessels without a `node` have no connection (flags and the like).

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;

use super::error::SceneLoadError;
use crate::commnet::{CommNetVessel, ControlState, Link, Network, Position};

/// Network endpoint as written in the scene file.
#[derive(Debug, Deserialize, Clone)]
pub struct SceneNode {
    pub name: String,
    pub position: Position,
    /// Control station.
    #[serde(default)]
    pub home: bool,
    #[serde(default)]
    pub relay: bool,
}

/// Link as written in the scene file. Directional strengths default to
/// `strength`.
#[derive(Debug, Deserialize, Clone)]
pub struct SceneLink {
    pub a: String,
    pub b: String,
    pub strength: f64,
    #[serde(default)]
    pub strength_rr: Option<f64>,
    #[serde(default)]
    pub strength_ar: Option<f64>,
    #[serde(default)]
    pub strength_br: Option<f64>,
}

/// Vessel as written in the scene file.
#[derive(Debug, Deserialize, Clone)]
pub struct SceneVessel {
    pub name: String,
    #[serde(default)]
    pub node: Option<String>,
    #[serde(default)]
    pub control_state: ControlState,
}

/// Root structure representing the entire scene.
#[derive(Debug, Deserialize)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    #[serde(default)]
    pub links: Vec<SceneLink>,
    #[serde(default)]
    pub vessels: Vec<SceneVessel>,
}

impl Scene {
    /// Parse and validate a scene from JSON text.
    pub fn from_json(data: &str) -> Result<Self, SceneLoadError> {
        let scene: Scene = serde_json::from_str(data)
            .context("Invalid JSON format")
            .map_err(|e| SceneLoadError::Parse(format!("{:#}", e)))?;
        validate_scene(&scene).map_err(SceneLoadError::Validation)?;
        Ok(scene)
    }

    /// Build the network snapshot and the vessel list.
    ///
    /// Vessel control paths are left uncomputed; the owner decides which
    /// vessels are loaded and recomputes their paths.
    pub fn build(&self) -> (Network, Vec<CommNetVessel>) {
        let mut network = Network::new();
        for node in &self.nodes {
            network.add_node(node.name.clone(), node.position, node.home, node.relay);
        }
        for link in &self.links {
            let (Some(a), Some(b)) = (network.find_node(&link.a), network.find_node(&link.b)) else {
                continue;
            };
            let mut built = Link::new(a, b, link.strength);
            built.strength_rr = link.strength_rr.unwrap_or(link.strength);
            built.strength_ar = link.strength_ar.unwrap_or(link.strength);
            built.strength_br = link.strength_br.unwrap_or(link.strength);
            network.connect(built);
        }

        let vessels = self
            .vessels
            .iter()
            .map(|vessel| match vessel.node.as_deref().and_then(|name| network.find_node(name)) {
                Some(node) => CommNetVessel::new(vessel.name.clone(), node, vessel.control_state),
                None => CommNetVessel::without_connection(vessel.name.clone()),
            })
            .collect();

        (network, vessels)
    }
}

/// Load and parse a scene from a file.
///
/// # Parameters
///
/// * `path` - Path to the scene JSON file
///
/// # Returns
///
/// Parsed and validated Scene or an error.
pub fn load_scene(path: &str) -> Result<Scene, SceneLoadError> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path))
        .map_err(|e| SceneLoadError::FileRead(format!("{:#}", e)))?;
    Scene::from_json(&data)
}

/// Validate scene consistency.
///
/// # Returns
///
/// `Ok(())` if validation passes, `Err(String)` with error description otherwise.
pub fn validate_scene(scene: &Scene) -> Result<(), String> {
    const MAX_NODES: usize = 10000;

    if scene.nodes.is_empty() {
        return Err("Scene must contain at least one node".to_string());
    }
    if scene.nodes.len() > MAX_NODES {
        return Err(format!("Node count {} exceeds maximum of {}", scene.nodes.len(), MAX_NODES));
    }

    let mut names = HashSet::new();
    for node in &scene.nodes {
        if !names.insert(node.name.as_str()) {
            return Err(format!("Duplicate node name found: {}", node.name));
        }
        let p = node.position;
        if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
            return Err(format!("Node {} has a non-finite position", node.name));
        }
    }

    for (idx, link) in scene.links.iter().enumerate() {
        for end in [&link.a, &link.b] {
            if !names.contains(end.as_str()) {
                return Err(format!("Link {} references unknown node '{}'", idx, end));
            }
        }
        if link.a == link.b {
            return Err(format!("Link {} connects node '{}' to itself", idx, link.a));
        }
        let strengths = [Some(link.strength), link.strength_rr, link.strength_ar, link.strength_br];
        for value in strengths.into_iter().flatten() {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("Link {} ({} - {}) strength {} outside 0-1", idx, link.a, link.b, value));
            }
        }
    }

    for vessel in &scene.vessels {
        if let Some(node) = &vessel.node {
            if !names.contains(node.as_str()) {
                return Err(format!("Vessel {} references unknown node '{}'", vessel.name, node));
            }
        }
    }

    Ok(())
}
