//! Per-mode link selection.
//!
//! Turns a network snapshot and the focal vessel into the ordered list of
//! links to draw. Anything missing along the way (no network, no focal
//! vessel, no node, no path) yields an empty selection.

use super::display_mode::DisplayMode;
use super::path_aggregator::PathAggregator;
use super::signal_color::strength_for;
use crate::commnet::{CommVessel, LinkId, Network, NodeId, Path, Position};

/// One link chosen for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedLink {
    pub id: LinkId,
    pub a: Position,
    pub b: Position,
    /// Strength used for coloring in the selection's mode.
    pub strength: f64,
}

/// Ordered links for one mode. Points are the link endpoints, two per link.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkSelection {
    pub mode: DisplayMode,
    pub links: Vec<SelectedLink>,
}

impl LinkSelection {
    pub fn empty(mode: DisplayMode) -> Self {
        Self { mode, links: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = LinkId> + '_ {
        self.links.iter().map(|link| link.id)
    }

    /// Replace the contents of `points` with `a, b` for each link in order.
    pub fn write_points(&self, points: &mut Vec<Position>) {
        points.clear();
        points.reserve(self.links.len() * 2);
        for link in &self.links {
            points.push(link.a);
            points.push(link.b);
        }
    }
}

/// Whether the vessel can be the focus of the flight-map modes.
pub fn has_valid_connection<V: CommVessel>(vessel: Option<&V>) -> bool {
    vessel.is_some_and(|v| v.is_connected())
}

/// Chooses links per display mode.
#[derive(Debug, Default)]
pub struct LinkSelector {
    aggregator: PathAggregator,
}

impl LinkSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the links to draw for `mode`.
    ///
    /// # Parameters
    ///
    /// * `network` - Current snapshot, `None` before the network exists
    /// * `vessels` - All vessel-like entities; only the multi-path view
    ///   looks beyond the focal one
    /// * `focal` - Index of the focal vessel in `vessels`
    pub fn select<V: CommVessel>(
        &mut self,
        mode: DisplayMode,
        network: Option<&Network>,
        vessels: &mut [V],
        focal: Option<usize>,
    ) -> LinkSelection {
        let Some(network) = network else {
            return LinkSelection::empty(mode);
        };
        let focal_vessel = focal.and_then(|index| vessels.get(index));
        let focal_node = focal_vessel.filter(|v| v.has_connection()).and_then(|v| v.comm_node());

        let ids: Vec<LinkId> = match mode {
            DisplayMode::None => Vec::new(),
            DisplayMode::FirstHop => Self::focal_path(focal_vessel).and_then(Path::first).into_iter().collect(),
            DisplayMode::Path => Self::focal_path(focal_vessel).map(|path| path.iter().collect()).unwrap_or_default(),
            DisplayMode::VesselLinks => focal_node
                .and_then(|node| network.node(node))
                .map(|node| node.links().to_vec())
                .unwrap_or_default(),
            DisplayMode::Network => network.link_ids().collect(),
            DisplayMode::MultiPaths => {
                if network.link_count() == 0 {
                    Vec::new()
                } else {
                    self.aggregator.aggregate(network, vessels).iter().collect()
                }
            }
        };

        Self::resolve(mode, network, &ids, focal_node)
    }

    fn focal_path<V: CommVessel>(vessel: Option<&V>) -> Option<&Path> {
        vessel.filter(|v| v.is_connected())?.displayable_control_path()
    }

    fn resolve(mode: DisplayMode, network: &Network, ids: &[LinkId], focal: Option<NodeId>) -> LinkSelection {
        let links = ids
            .iter()
            .filter_map(|&id| {
                let link = network.link(id)?;
                let (a, b) = network.endpoints(id)?;
                Some(SelectedLink {
                    id,
                    a,
                    b,
                    strength: strength_for(mode, link, focal),
                })
            })
            .collect();
        LinkSelection { mode, links }
    }
}
