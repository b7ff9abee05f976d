use super::{Network, NodeId, WEIGHT_RANGE};
use crate::{
    error::{HarmonyError, Result},
    geometry::{distance, Point},
    random,
};
use rand::RngCore;
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Parameters for growing a [Network] node by node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Total nodes, including the root
    pub num_nodes: usize,
    /// An existing node stops taking new connections once its out-degree reaches this
    pub v_max: usize,
    /// Nodes at most this far apart are connected
    pub r_harmony: f64,
    /// Nodes after the root are placed uniformly in `[-extent, extent]²`
    pub extent: f64,
    /// Range of freshly drawn connection weights
    pub weight_range: (f64, f64),
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            num_nodes: 50,
            v_max: 5,
            r_harmony: 0.5,
            extent: 1.,
            weight_range: (*WEIGHT_RANGE.start(), *WEIGHT_RANGE.end()),
        }
    }
}

impl BuildConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_nodes < 1 {
            return Err(HarmonyError::NoNodes);
        }
        if self.v_max < 1 {
            return Err(HarmonyError::DegreeCap(self.v_max));
        }
        if !self.r_harmony.is_finite() || self.r_harmony < 0. {
            return Err(HarmonyError::Radius(self.r_harmony));
        }
        if !self.extent.is_finite() || self.extent <= 0. {
            return Err(HarmonyError::Extent(self.extent));
        }
        random::uniform(self.weight_range.0..=self.weight_range.1)?;
        Ok(())
    }

    /// Grow a network: the root sits at the origin, and every later node is connected both ways
    /// to each earlier node within [Self::r_harmony] that has fewer than [Self::v_max]
    /// connections. Earlier nodes are never rewired to later ones.
    pub fn build(&self, rng: &mut impl RngCore) -> Result<Network> {
        self.validate()?;
        let placement = random::uniform(-self.extent..=self.extent)?;
        let mut network = Network::new(self.weight_range.0..=self.weight_range.1)?;
        network.push_node((0., 0.));

        for _ in 1..self.num_nodes {
            let x = placement.sample(rng);
            let y = placement.sample(rng);
            self.attach(&mut network, (x, y), rng)?;
        }

        debug!(
            nodes = network.len(),
            connections = network.connection_count(),
            isolated = network.nodes.iter().filter(|n| n.is_isolated()).count(),
            "network grown"
        );
        Ok(network)
    }

    /// Place a node at `position` and connect it both ways to each earlier node within
    /// [Self::r_harmony], oldest first, skipping those already at [Self::v_max]. The newcomer
    /// itself is not capped.
    pub fn attach(
        &self,
        network: &mut Network,
        position: Point,
        rng: &mut impl RngCore,
    ) -> Result<NodeId> {
        let id = network.push_node(position);
        for existing in (0..id.idx()).map(NodeId) {
            let node = &network.nodes[existing.idx()];
            if distance(node.position, position) <= self.r_harmony && node.degree() < self.v_max {
                network.connect(existing, id, rng)?;
            }
        }
        Ok(id)
    }
}

/// Grow a network of `num_nodes` with the default placement extent and weight range
pub fn initialize_network(
    num_nodes: usize,
    v_max: usize,
    r_harmony: f64,
    rng: &mut impl RngCore,
) -> Result<Network> {
    BuildConfig {
        num_nodes,
        v_max,
        r_harmony,
        ..BuildConfig::default()
    }
    .build(rng)
}

/// Connect every node without connections to its nearest other node, both ways. The first of
/// several equidistant candidates wins. Nodes that already have a connection are left alone, so
/// running this again changes nothing. Returns how many nodes were repaired.
pub fn connect_isolated_nodes(network: &mut Network, rng: &mut impl RngCore) -> Result<usize> {
    let mut repaired = 0;
    for id in network.ids().collect::<Vec<_>>() {
        if !network.nodes[id.idx()].is_isolated() {
            continue;
        }
        let Some(nearest) = nearest_other(network, id) else {
            warn!(node = %id, "no other node to connect to");
            continue;
        };
        network.connect(id, nearest, rng)?;
        debug!(node = %id, nearest = %nearest, "connected isolated node");
        repaired += 1;
    }
    Ok(repaired)
}

fn nearest_other(network: &Network, id: NodeId) -> Option<NodeId> {
    let from = network.nodes[id.idx()].position;
    let mut best: Option<(NodeId, f64)> = None;
    for (other, node) in network.ids().zip(network.nodes.iter()) {
        if other == id {
            continue;
        }
        let d = distance(from, node.position);
        if best.map_or(true, |(_, b)| d < b) {
            best = Some((other, d));
        }
    }
    best.map(|(other, _)| other)
}

impl Network {
    /// See [connect_isolated_nodes]
    pub fn connect_isolated(&mut self, rng: &mut impl RngCore) -> Result<usize> {
        connect_isolated_nodes(self, rng)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::random::WyRng;

    fn grown(seed: u64, config: &BuildConfig) -> Network {
        config.build(&mut WyRng::seeded(seed)).unwrap()
    }

    #[test]
    fn test_root_at_origin() {
        let net = initialize_network(20, 5, 0.5, &mut WyRng::seeded(1)).unwrap();
        assert_eq!(net.len(), 20);
        assert_eq!(net.nodes[0].position, (0., 0.));
        assert!(net
            .nodes
            .iter()
            .all(|n| n.position.0.abs() <= 1. && n.position.1.abs() <= 1.));
    }

    #[test]
    fn test_single_node() {
        let mut rng = WyRng::seeded(2);
        let mut net = initialize_network(1, 5, 0.5, &mut rng).unwrap();
        assert_eq!(net.len(), 1);
        assert_eq!(net.connection_count(), 0);

        assert_eq!(connect_isolated_nodes(&mut net, &mut rng).unwrap(), 0);
        assert_eq!(net.connection_count(), 0);
    }

    #[test]
    fn test_invalid_input() {
        let mut rng = WyRng::seeded(3);
        assert!(matches!(
            initialize_network(0, 5, 0.5, &mut rng),
            Err(HarmonyError::NoNodes)
        ));
        assert!(matches!(
            initialize_network(10, 0, 0.5, &mut rng),
            Err(HarmonyError::DegreeCap(0))
        ));
        assert!(matches!(
            initialize_network(10, 5, -0.1, &mut rng),
            Err(HarmonyError::Radius(_))
        ));
        assert!(initialize_network(10, 5, f64::NAN, &mut rng).is_err());

        let config = BuildConfig {
            weight_range: (1., 0.1),
            ..BuildConfig::default()
        };
        assert!(config.build(&mut rng).is_err());
    }

    #[test]
    fn test_close_pair_connected() {
        let mut rng = WyRng::seeded(4);
        let config = BuildConfig {
            v_max: 1,
            ..BuildConfig::default()
        };
        let mut net = Network::default();
        let root = config.attach(&mut net, (0., 0.), &mut rng).unwrap();
        let other = config.attach(&mut net, (0.3, 0.), &mut rng).unwrap();
        assert_eq!(net.nodes[root.idx()].connections[0].target, other);
        assert_eq!(net.nodes[other.idx()].connections[0].target, root);

        // root is capped, so a third close node stays unconnected
        let third = config.attach(&mut net, (0., 0.2), &mut rng).unwrap();
        assert!(net.nodes[third.idx()].is_isolated());
        assert_eq!(net.connection_count(), 2);
    }

    #[test]
    fn test_attach_outside_radius() {
        let mut rng = WyRng::seeded(5);
        let config = BuildConfig::default();
        let mut net = Network::default();
        config.attach(&mut net, (0., 0.), &mut rng).unwrap();
        let far = config.attach(&mut net, (0.5, 0.5), &mut rng).unwrap();
        assert!(net.nodes[far.idx()].is_isolated());

        // exactly on the radius still counts
        let edge = config.attach(&mut net, (0.5, 0.), &mut rng).unwrap();
        assert_eq!(net.nodes[edge.idx()].connections[0].target, NodeId(0));
    }

    #[test]
    fn test_newcomer_takes_every_open_neighbour() {
        let mut rng = WyRng::seeded(6);
        let config = BuildConfig {
            v_max: 2,
            ..BuildConfig::default()
        };
        let mut net = Network::default();
        for p in [(0.4, 0.), (-0.4, 0.), (0., 0.4)] {
            config.attach(&mut net, p, &mut rng).unwrap();
        }
        assert_eq!(net.connection_count(), 0);
        // all three are within reach and below the cap, so the hub ends up above it
        let hub = config.attach(&mut net, (0., 0.), &mut rng).unwrap();
        let targets = net.nodes[hub.idx()]
            .connections()
            .iter()
            .map(|c| c.target)
            .collect::<Vec<_>>();
        assert_eq!(targets, vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert_eq!(net.nodes[hub.idx()].degree(), 3);
        assert!(net.nodes[..3].iter().all(|n| n.degree() == 1));
    }

    #[test]
    fn test_two_nodes_within_radius() {
        // a radius covering the whole placement square makes the second node always close enough
        let config = BuildConfig {
            num_nodes: 2,
            v_max: 1,
            r_harmony: 3.,
            ..BuildConfig::default()
        };
        for seed in 0..50 {
            let net = grown(seed, &config);
            assert_eq!(net.nodes[0].connections[0].target, NodeId(1));
            assert_eq!(net.nodes[1].connections[0].target, NodeId(0));
            assert_eq!(net.connection_count(), 2);
        }
    }

    #[test]
    fn test_zero_radius_isolates() {
        let config = BuildConfig {
            num_nodes: 30,
            r_harmony: 0.,
            ..BuildConfig::default()
        };
        let net = grown(5, &config);
        assert_eq!(net.connection_count(), 0);
    }

    #[test]
    fn test_degree_cap() {
        for (seed, v_max) in (0..40).zip([1, 2, 3, 5, 8].into_iter().cycle()) {
            let config = BuildConfig {
                v_max,
                r_harmony: 0.6,
                ..BuildConfig::default()
            };
            let mut rng = WyRng::seeded(seed);
            let placement = random::uniform(-1. ..=1.).unwrap();
            let mut net = Network::default();
            for _ in 0..80 {
                let before = net.nodes.iter().map(|n| n.degree()).collect::<Vec<_>>();
                let position = (placement.sample(&mut rng), placement.sample(&mut rng));
                config.attach(&mut net, position, &mut rng).unwrap();

                for (node, &degree) in net.nodes.iter().zip(before.iter()) {
                    if degree >= v_max {
                        assert_eq!(node.degree(), degree, "full node gained a connection");
                    } else {
                        assert!(node.degree() <= degree + 1);
                    }
                }
            }
        }
    }

    #[test]
    fn test_full_neighbour_skipped() {
        let mut rng = WyRng::seeded(10);
        let config = BuildConfig {
            v_max: 1,
            ..BuildConfig::default()
        };
        let mut net = Network::default();
        let a = config.attach(&mut net, (0., 0.), &mut rng).unwrap();
        let b = config.attach(&mut net, (0.1, 0.), &mut rng).unwrap();
        let c = config.attach(&mut net, (0.9, 0.), &mut rng).unwrap();
        // a and b are full, c is open and within reach of the newcomer
        let d = config.attach(&mut net, (0.5, 0.), &mut rng).unwrap();

        let targets = net.nodes[d.idx()]
            .connections()
            .iter()
            .map(|c| c.target)
            .collect::<Vec<_>>();
        assert_eq!(targets, vec![c]);
        assert_eq!(net.nodes[a.idx()].degree(), 1);
        assert_eq!(net.nodes[b.idx()].degree(), 1);
    }

    #[test]
    fn test_edges_within_radius_and_symmetric() {
        let config = BuildConfig {
            num_nodes: 60,
            r_harmony: 0.4,
            ..BuildConfig::default()
        };
        let net = grown(6, &config);
        for (id, node) in net.ids().zip(net.nodes()) {
            for c in node.connections() {
                let target = &net.nodes[c.target.idx()];
                assert!(super::distance(node.position, target.position) <= 0.4);
                assert!(target.connections.iter().any(|back| back.target == id));
                assert_ne!(c.target, id);
            }
        }
    }

    #[test]
    fn test_same_seed_same_network() {
        let config = BuildConfig::default();
        let (l, r) = (grown(7, &config), grown(7, &config));
        assert_eq!(l.nodes, r.nodes);
    }

    #[test]
    fn test_repair_leaves_none_isolated() {
        for seed in 0..30 {
            let mut rng = WyRng::seeded(seed);
            let mut net = initialize_network(40, 3, 0.15, &mut rng).unwrap();
            let isolated = net.nodes.iter().filter(|n| n.is_isolated()).count();
            let repaired = connect_isolated_nodes(&mut net, &mut rng).unwrap();
            assert!(repaired <= isolated);
            assert!(net.nodes.iter().all(|n| !n.is_isolated()));
        }
    }

    #[test]
    fn test_repair_idempotent() {
        let mut rng = WyRng::seeded(8);
        let mut net = initialize_network(40, 3, 0.1, &mut rng).unwrap();
        net.connect_isolated(&mut rng).unwrap();
        let before = net.nodes.clone();

        assert_eq!(net.connect_isolated(&mut rng).unwrap(), 0);
        assert_eq!(net.nodes, before);
    }

    #[test]
    fn test_repair_picks_nearest_first_on_tie() {
        let mut rng = WyRng::seeded(9);
        let mut net = Network::default();
        let a = net.push_node((0., 0.));
        let b = net.push_node((1., 0.));
        let c = net.push_node((-1., 0.));
        let d = net.push_node((0., 5.));

        assert_eq!(connect_isolated_nodes(&mut net, &mut rng).unwrap(), 3);
        // a ties between b and c, b comes first
        let from_a = net.nodes[a.idx()]
            .connections()
            .iter()
            .map(|c| c.target)
            .collect::<Vec<_>>();
        assert_eq!(from_a, vec![b, c, d]);
        assert_eq!(net.nodes[b.idx()].connections[0].target, a);
        assert_eq!(net.nodes[c.idx()].connections[0].target, a);
        assert_eq!(net.nodes[d.idx()].connections[0].target, a);
    }
}
