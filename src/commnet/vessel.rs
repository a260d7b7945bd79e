//! Vessel-side view of the communication network.

use super::routing;
use super::types::{ControlState, Network, NodeId, Path};

/// A vessel-like entity as seen by the overlay.
///
/// Entities without a connection (flags, debris) report
/// `has_connection() == false` and are skipped everywhere.
pub trait CommVessel {
    fn name(&self) -> &str;

    /// Whether the entity carries a communication connection at all.
    fn has_connection(&self) -> bool;

    /// The entity's endpoint, `None` while it is not attached to a network.
    fn comm_node(&self) -> Option<NodeId>;

    fn control_state(&self) -> ControlState;

    fn control_path(&self) -> Option<&Path>;

    /// Whether the entity is simulated at full fidelity this tick. Control
    /// paths of unloaded entities are computed once and may be stale.
    fn is_loaded(&self) -> bool;

    /// Recompute the control path now against `network`.
    ///
    /// Synchronous and idempotent: calling it twice on the same network
    /// leaves the same path.
    fn force_recompute(&mut self, network: &Network);

    /// Connection present and attached to a network.
    fn is_connected(&self) -> bool {
        self.has_connection() && self.comm_node().is_some()
    }

    /// The control path if it should be displayed: the vessel is not under
    /// probe or crew control and the path is non-empty.
    fn displayable_control_path(&self) -> Option<&Path> {
        if self.control_state().hides_control_path() {
            return None;
        }
        self.control_path().filter(|path| !path.is_empty())
    }
}

/// Concrete vessel entity backed by a [`Network`] node.
#[derive(Debug, Clone)]
pub struct CommNetVessel {
    pub name: String,
    pub node: Option<NodeId>,
    pub has_connection: bool,
    pub control_state: ControlState,
    pub control_path: Option<Path>,
    pub loaded: bool,
}

impl CommNetVessel {
    /// Connected vessel attached to `node`, path not yet computed.
    pub fn new(name: impl Into<String>, node: NodeId, control_state: ControlState) -> Self {
        Self {
            name: name.into(),
            node: Some(node),
            has_connection: true,
            control_state,
            control_path: None,
            loaded: false,
        }
    }

    /// Entity with no connection (e.g. a planted flag).
    pub fn without_connection(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node: None,
            has_connection: false,
            control_state: ControlState::Uncontrolled,
            control_path: None,
            loaded: false,
        }
    }
}

impl CommVessel for CommNetVessel {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_connection(&self) -> bool {
        self.has_connection
    }

    fn comm_node(&self) -> Option<NodeId> {
        self.node
    }

    fn control_state(&self) -> ControlState {
        self.control_state
    }

    fn control_path(&self) -> Option<&Path> {
        self.control_path.as_ref()
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn force_recompute(&mut self, network: &Network) {
        if !self.has_connection {
            return;
        }
        if let Some(node) = self.node {
            let path = routing::control_path(network, node);
            log::trace!("Recomputed control path of {}: {} links", self.name, path.len());
            self.control_path = Some(path);
        }
    }
}
