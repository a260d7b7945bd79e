//! Control path search.
//!
//! A vessel is controlled through the cheapest route to any control station.
//! The cost of a hop is the inverse of its signal strength, so a chain of
//! strong links beats a single weak one. Only relay-capable nodes may appear
//! in the middle of a route; links with no signal are unusable.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::types::{LinkId, Network, NodeId, Path};

#[derive(Clone, Copy)]
struct Frontier {
    cost: f64,
    node: NodeId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cost.total_cmp(&other.cost) == Ordering::Equal && self.node == other.node
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    // Reversed so the BinaryHeap pops the cheapest entry first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost).then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cost of traversing a link with the given strength.
fn hop_cost(strength: f64) -> Option<f64> {
    if strength > 0.0 && strength.is_finite() { Some(1.0 / strength) } else { None }
}

/// Cheapest route from `origin` to the nearest control station.
///
/// Returns an empty path when `origin` is itself a station or when no
/// station is reachable.
pub fn control_path(network: &Network, origin: NodeId) -> Path {
    let node_count = network.nodes().len();
    if origin.0 >= node_count {
        return Path::new();
    }

    let mut best = vec![f64::INFINITY; node_count];
    let mut via: Vec<Option<(NodeId, LinkId)>> = vec![None; node_count];
    let mut heap = BinaryHeap::new();

    best[origin.0] = 0.0;
    heap.push(Frontier { cost: 0.0, node: origin });

    while let Some(Frontier { cost, node }) = heap.pop() {
        if cost > best[node.0] {
            continue;
        }
        let Some(current) = network.node(node) else {
            continue;
        };
        if current.is_home {
            return trace_back(&via, origin, node);
        }
        if node != origin && !current.can_relay {
            continue;
        }

        for &link_id in current.links() {
            let Some(link) = network.link(link_id) else {
                continue;
            };
            let Some(next) = link.other_end(node) else {
                continue;
            };
            let Some(step) = hop_cost(link.signal_strength) else {
                continue;
            };
            let next_cost = cost + step;
            if next_cost < best[next.0] {
                best[next.0] = next_cost;
                via[next.0] = Some((node, link_id));
                heap.push(Frontier { cost: next_cost, node: next });
            }
        }
    }

    Path::new()
}

fn trace_back(via: &[Option<(NodeId, LinkId)>], origin: NodeId, station: NodeId) -> Path {
    let mut reversed = Vec::new();
    let mut node = station;
    while node != origin {
        match via[node.0] {
            Some((previous, link)) => {
                reversed.push(link);
                node = previous;
            }
            None => break,
        }
    }
    reversed.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commnet::types::{Link, Position};

    fn p(x: f64) -> Position {
        Position::new(x, 0.0, 0.0)
    }

    #[test]
    fn prefers_strong_relay_chain_over_weak_direct_link() {
        let mut net = Network::new();
        let home = net.add_node("KSC", p(0.0), true, true);
        let relay = net.add_node("Relay", p(5.0), false, true);
        let probe = net.add_node("Probe", p(10.0), false, false);
        let direct = net.connect(Link::new(probe, home, 0.1)).unwrap();
        let hop1 = net.connect(Link::new(probe, relay, 0.9)).unwrap();
        let hop2 = net.connect(Link::new(relay, home, 0.9)).unwrap();

        let path = control_path(&net, probe);
        assert_eq!(path.iter().collect::<Vec<_>>(), vec![hop1, hop2]);
        assert_ne!(path.first(), Some(direct));
    }

    #[test]
    fn non_relay_nodes_are_not_traversed() {
        let mut net = Network::new();
        let home = net.add_node("KSC", p(0.0), true, true);
        let middle = net.add_node("Lander", p(5.0), false, false);
        let probe = net.add_node("Probe", p(10.0), false, false);
        net.connect(Link::new(probe, middle, 1.0)).unwrap();
        net.connect(Link::new(middle, home, 1.0)).unwrap();

        assert!(control_path(&net, probe).is_empty());
        assert_eq!(control_path(&net, middle).len(), 1);
    }

    #[test]
    fn zero_strength_links_are_unusable() {
        let mut net = Network::new();
        let home = net.add_node("KSC", p(0.0), true, true);
        let probe = net.add_node("Probe", p(10.0), false, false);
        net.connect(Link::new(probe, home, 0.0)).unwrap();
        assert!(control_path(&net, probe).is_empty());
    }

    #[test]
    fn station_has_empty_path() {
        let mut net = Network::new();
        let home = net.add_node("KSC", p(0.0), true, true);
        assert!(control_path(&net, home).is_empty());
        assert!(control_path(&net, NodeId(9)).is_empty());
    }
}
