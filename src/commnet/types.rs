//! Type definitions for the communication network snapshot.
//!
//! Contains:
//! - `Position`: exact 3D endpoint position (identity for deduplication)
//! - `Node` and `Link`: network endpoints and the connections between them
//! - `Path`: ordered chain of links (a vessel's route)
//! - `Network`: all active nodes and links in discovery order

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// 3D position in world space.
///
/// Two endpoints are the same endpoint iff their positions compare exactly
/// equal. No tolerance is applied anywhere in the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Index of a node inside its [`Network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Index of a link inside its [`Network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub usize);

/// How a vessel is currently controlled.
///
/// `Probe` and `Kerbal` mean control is held on board (probe core or crew)
/// without a route to a control station, so the vessel has no control path
/// worth drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlState {
    #[default]
    Normal,
    Partial,
    Probe,
    Kerbal,
    Uncontrolled,
}

impl ControlState {
    /// True when the control path of a vessel in this state is never displayed.
    pub fn hides_control_path(self) -> bool {
        matches!(self, ControlState::Probe | ControlState::Kerbal)
    }
}

/// Network endpoint: a vessel antenna or a ground station.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub position: Position,
    /// Control station (destination of control paths).
    pub is_home: bool,
    /// Whether traffic may be relayed through this node.
    pub can_relay: bool,
    links: Vec<LinkId>,
}

impl Node {
    /// Links incident to this node, in the order they were attached.
    pub fn links(&self) -> &[LinkId] {
        &self.links
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

/// Point-to-point connection between two nodes.
///
/// `signal_strength` is the strength along the link as used by control
/// paths. The directional strengths describe the link when either end acts
/// as a relay:
/// - `strength_rr`: both ends relay
/// - `strength_ar`: only `a` relays
/// - `strength_br`: only `b` relays
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub a: NodeId,
    pub b: NodeId,
    pub signal_strength: f64,
    pub strength_rr: f64,
    pub strength_ar: f64,
    pub strength_br: f64,
}

impl Link {
    /// Link whose strength is the same in every direction.
    pub fn new(a: NodeId, b: NodeId, signal_strength: f64) -> Self {
        Self {
            a,
            b,
            signal_strength,
            strength_rr: signal_strength,
            strength_ar: signal_strength,
            strength_br: signal_strength,
        }
    }

    /// Strength for the given relay roles of the two ends.
    ///
    /// With neither end relaying the plain `signal_strength` applies.
    pub fn signal_strength_for(&self, a_relays: bool, b_relays: bool) -> f64 {
        match (a_relays, b_relays) {
            (true, true) => self.strength_rr,
            (true, false) => self.strength_ar,
            (false, true) => self.strength_br,
            (false, false) => self.signal_strength,
        }
    }

    /// Strongest signal obtainable on this link irrespective of direction.
    pub fn best_signal(&self) -> f64 {
        self.strength_rr.max(self.strength_ar).max(self.strength_br)
    }

    /// The far end of the link as seen from `node`.
    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        if self.a == node {
            Some(self.b)
        } else if self.b == node {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Ordered chain of links; index 0 is the first hop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    links: Vec<LinkId>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, link: LinkId) {
        self.links.push(link);
    }

    pub fn first(&self) -> Option<LinkId> {
        self.links.first().copied()
    }

    pub fn get(&self, index: usize) -> Option<LinkId> {
        self.links.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = LinkId> + '_ {
        self.links.iter().copied()
    }
}

impl Index<usize> for Path {
    type Output = LinkId;

    fn index(&self, index: usize) -> &LinkId {
        &self.links[index]
    }
}

impl FromIterator<LinkId> for Path {
    fn from_iter<T: IntoIterator<Item = LinkId>>(iter: T) -> Self {
        Self {
            links: iter.into_iter().collect(),
        }
    }
}

/// All currently active nodes and links.
///
/// Link order is discovery order and is preserved by every accessor.
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Vec<Node>,
    links: Vec<Link>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its id.
    pub fn add_node(&mut self, name: impl Into<String>, position: Position, is_home: bool, can_relay: bool) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            name: name.into(),
            position,
            is_home,
            can_relay,
            links: Vec::new(),
        });
        id
    }

    /// Register a link and attach it to both endpoint nodes.
    ///
    /// Returns `None` when either endpoint is not part of this network.
    pub fn connect(&mut self, link: Link) -> Option<LinkId> {
        if link.a.0 >= self.nodes.len() || link.b.0 >= self.nodes.len() {
            return None;
        }
        let id = LinkId(self.links.len());
        self.nodes[link.a.0].links.push(id);
        if link.b != link.a {
            self.nodes[link.b.0].links.push(id);
        }
        self.links.push(link);
        Some(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.0)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn link_ids(&self) -> impl Iterator<Item = LinkId> + '_ {
        (0..self.links.len()).map(LinkId)
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
    }

    /// Endpoint positions `(a, b)` of a link.
    pub fn endpoints(&self, id: LinkId) -> Option<(Position, Position)> {
        let link = self.link(id)?;
        let a = self.node(link.a)?;
        let b = self.node(link.b)?;
        Some((a.position, b.position))
    }
}
