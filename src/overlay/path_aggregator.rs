//! Union of every vessel's control path, used by the multi-path view.

use crate::commnet::{CommVessel, LinkId, Network, Path, Position};

/// Unordered pair of endpoint positions identifying a physical link.
#[derive(Debug, Clone, Copy)]
struct EndpointKey {
    a: Position,
    b: Position,
}

impl EndpointKey {
    fn matches(&self, other: &EndpointKey) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

/// Merges control paths into one path without duplicate physical links.
///
/// Two links are duplicates when their endpoint positions are exactly equal
/// in either orientation. The first occurrence wins, so the result follows
/// vessel order and then path order. The merged path is generally not
/// contiguous.
#[derive(Debug, Default)]
pub struct PathAggregator {
    seen: Vec<EndpointKey>,
}

impl PathAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the displayable control paths of all connected vessels.
    ///
    /// Vessels that are not loaded have their path recomputed against
    /// `network` right before it is read.
    pub fn aggregate<V: CommVessel>(&mut self, network: &Network, vessels: &mut [V]) -> Path {
        self.seen.clear();
        let mut merged = Path::with_capacity(network.link_count());

        for vessel in vessels.iter_mut() {
            if !vessel.has_connection() {
                continue;
            }
            if !vessel.is_loaded() {
                vessel.force_recompute(network);
            }
            let Some(path) = vessel.displayable_control_path() else {
                continue;
            };
            for link in path.iter() {
                self.push_unique(network, &mut merged, link);
            }
        }

        log::debug!("Merged control paths of {} vessels into {} links", vessels.len(), merged.len());
        merged
    }

    fn push_unique(&mut self, network: &Network, merged: &mut Path, link: LinkId) {
        let Some((a, b)) = network.endpoints(link) else {
            return;
        };
        let key = EndpointKey { a, b };
        if self.seen.iter().any(|seen| seen.matches(&key)) {
            return;
        }
        self.seen.push(key);
        merged.push(link);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commnet::{CommNetVessel, ControlState, Link, NodeId};

    fn p(x: f64, y: f64) -> Position {
        Position::new(x, y, 0.0)
    }

    fn vessel_with_path(name: &str, node: NodeId, links: &[LinkId]) -> CommNetVessel {
        let mut vessel = CommNetVessel::new(name, node, ControlState::Normal);
        vessel.loaded = true;
        vessel.control_path = Some(links.iter().copied().collect());
        vessel
    }

    /// Two vessels whose nodes sit on the same coordinates P1 and P2, plus a
    /// third point P3 that only vessel A routes through.
    fn shared_link_network() -> (Network, [LinkId; 3], [NodeId; 2]) {
        let mut net = Network::new();
        let a1 = net.add_node("A1", p(1.0, 0.0), false, true);
        let a2 = net.add_node("A2", p(2.0, 0.0), false, true);
        let a3 = net.add_node("A3", p(3.0, 0.0), true, true);
        let b1 = net.add_node("B1", p(1.0, 0.0), false, true);
        let b2 = net.add_node("B2", p(2.0, 0.0), false, true);
        let l12 = net.connect(Link::new(a1, a2, 0.5)).unwrap();
        let l23 = net.connect(Link::new(a2, a3, 0.5)).unwrap();
        // Same physical link as `l12`, reported in the opposite orientation.
        let l21 = net.connect(Link::new(b2, b1, 0.5)).unwrap();
        (net, [l12, l23, l21], [a1, b2])
    }

    #[test]
    fn shared_physical_link_is_kept_once() {
        let (net, [l12, l23, l21], [a, b]) = shared_link_network();
        let mut vessels = vec![vessel_with_path("A", a, &[l12, l23]), vessel_with_path("B", b, &[l21])];
        let merged = PathAggregator::new().aggregate(&net, &mut vessels);
        assert_eq!(merged.iter().collect::<Vec<_>>(), vec![l12, l23]);
    }

    #[test]
    fn first_seen_link_wins() {
        let (net, [l12, l23, l21], [a, b]) = shared_link_network();
        let mut vessels = vec![vessel_with_path("B", b, &[l21]), vessel_with_path("A", a, &[l12, l23])];
        let merged = PathAggregator::new().aggregate(&net, &mut vessels);
        assert_eq!(merged.iter().collect::<Vec<_>>(), vec![l21, l23]);
    }

    #[test]
    fn output_never_repeats_an_endpoint_pair() {
        let (net, [l12, l23, l21], [a, b]) = shared_link_network();
        let mut vessels = vec![
            vessel_with_path("A", a, &[l12, l23, l12]),
            vessel_with_path("B", b, &[l21, l23]),
            vessel_with_path("C", a, &[l23, l21, l12]),
        ];
        let merged = PathAggregator::new().aggregate(&net, &mut vessels);
        let keys: Vec<_> = merged.iter().filter_map(|id| net.endpoints(id)).collect();
        for (i, x) in keys.iter().enumerate() {
            for y in &keys[i + 1..] {
                let same = (x.0 == y.0 && x.1 == y.1) || (x.0 == y.1 && x.1 == y.0);
                assert!(!same);
            }
        }
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn hidden_and_disconnected_vessels_contribute_nothing() {
        let (net, [l12, l23, _], [a, _]) = shared_link_network();
        let mut probe = vessel_with_path("Probe", a, &[l12]);
        probe.control_state = ControlState::Probe;
        let mut kerbal = vessel_with_path("Kerbal", a, &[l23]);
        kerbal.control_state = ControlState::Kerbal;
        let mut flag = CommNetVessel::without_connection("Flag");
        flag.control_path = Some([l12].into_iter().collect());
        let empty = vessel_with_path("Empty", a, &[]);

        let mut vessels = vec![probe, kerbal, flag, empty];
        assert!(PathAggregator::new().aggregate(&net, &mut vessels).is_empty());
    }

    #[test]
    fn unloaded_vessels_are_recomputed_before_reading() {
        let mut net = Network::new();
        let home = net.add_node("KSC", p(0.0, 0.0), true, true);
        let probe = net.add_node("Probe", p(5.0, 0.0), false, false);
        let link = net.connect(Link::new(probe, home, 0.7)).unwrap();

        let mut stale = CommNetVessel::new("Probe", probe, ControlState::Normal);
        stale.control_path = Some(Path::new());
        let mut vessels = vec![stale];
        let merged = PathAggregator::new().aggregate(&net, &mut vessels);
        assert_eq!(merged.iter().collect::<Vec<_>>(), vec![link]);
        assert_eq!(vessels[0].control_path().map(|p| p.len()), Some(1));
    }

    #[test]
    fn aggregator_is_reusable() {
        let (net, [l12, l23, _], [a, _]) = shared_link_network();
        let mut aggregator = PathAggregator::new();
        let mut vessels = vec![vessel_with_path("A", a, &[l12, l23])];
        assert_eq!(aggregator.aggregate(&net, &mut vessels).len(), 2);
        assert_eq!(aggregator.aggregate(&net, &mut vessels).len(), 2);
    }
}
