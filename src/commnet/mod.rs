//! Communication network snapshot model.
//!
//! This module holds the data the overlay reads every refresh tick. It is
//! produced and mutated by the network simulation that owns the nodes and
//! links; the overlay only reads it, with one exception: stale control paths
//! of unloaded vessels are recomputed on demand through
//! [`CommVessel::force_recompute`].
//!
//! ## Module Organization
//!
//! - `types`: Positions, nodes, links, paths and the network container
//! - `vessel`: Vessel-side view of the network (control state, control path)
//! - `routing`: Control path search used when a vessel recomputes its path

pub mod routing;
pub mod types;
pub mod vessel;

pub use types::{ControlState, Link, LinkId, Network, Node, NodeId, Path, Position};
pub use vessel::{CommNetVessel, CommVessel};
