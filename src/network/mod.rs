//! A spatial graph of [Node]s, wired by proximity, through which a signal spreads from the root.
//! Nodes live in a flat arena and refer to each other by [NodeId], so cycles in the graph never
//! become cycles in ownership.

pub mod build;
pub mod hebbian;
pub mod node;
pub mod propagate;

pub use build::{connect_isolated_nodes, initialize_network, BuildConfig};
pub use node::{Connection, Node};

use crate::{
    error::{HarmonyError, Result},
    geometry::Point,
    random,
};
use core::{fmt, ops::RangeInclusive};
use rand::RngCore;
use rand_distr::{Distribution, Uniform};
use serde::Serialize;

pub mod activate {
    /// Logistic squashing. Outputs that round to exactly 0 or 1 are nudged to the nearest f64
    /// inside (0, 1), everything else is left untouched.
    pub fn sigmoid(x: f64) -> f64 {
        let y = 1. / (1. + (-x).exp());
        if y == 0. {
            f64::from_bits(1)
        } else if y == 1. {
            1. - f64::EPSILON / 2.
        } else {
            y
        }
    }
}

/// Default range of freshly drawn connection weights
pub const WEIGHT_RANGE: RangeInclusive<f64> = 0.1..=1.;

/// Handle of a node within its [Network]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn idx(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Network {
    pub(crate) nodes: Vec<Node>,
    #[serde(skip_serializing)]
    weight_init: Uniform<f64>,
}

impl Network {
    /// The node every propagation starts from
    pub const ROOT: NodeId = NodeId(0);

    /// An empty network whose omitted connection weights are drawn from `weight_range`
    pub fn new(weight_range: RangeInclusive<f64>) -> Result<Self> {
        Ok(Self {
            nodes: Vec::new(),
            weight_init: random::uniform(weight_range)?,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.idx()).ok_or(HarmonyError::NodeOutOfBounds {
            id: id.idx(),
            len: self.nodes.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Total number of directed connections
    pub fn connection_count(&self) -> usize {
        self.nodes.iter().map(Node::degree).sum()
    }

    /// Every connection weight, flattened by node and then by connection order
    pub fn weights(&self) -> Vec<f64> {
        self.nodes
            .iter()
            .flat_map(|n| n.connections.iter().map(Connection::weight))
            .collect()
    }

    /// Forget the activations of the last propagation pass
    pub fn flush(&mut self) {
        for node in self.nodes.iter_mut() {
            node.activation = 0.;
        }
    }

    /// Place a new, unconnected node
    pub fn push_node(&mut self, position: Point) -> NodeId {
        self.nodes.push(Node::new(position));
        NodeId(self.nodes.len() - 1)
    }

    /// Append a connection `from -> to`. Without an explicit weight, one is drawn from this
    /// network's weight range. Only `from` is modified.
    pub fn add_connection(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: Option<f64>,
        rng: &mut impl RngCore,
    ) -> Result<()> {
        self.check(to)?;
        self.check(from)?;
        let weight = weight.unwrap_or_else(|| self.weight_init.sample(rng));
        self.nodes[from.idx()].push_connection(Connection::new(to, weight));
        Ok(())
    }

    /// Connect `a` and `b` both ways, `a -> b` first, each with its own random weight
    pub fn connect(&mut self, a: NodeId, b: NodeId, rng: &mut impl RngCore) -> Result<()> {
        self.add_connection(a, b, None, rng)?;
        self.add_connection(b, a, None, rng)
    }

    pub(crate) fn check(&self, id: NodeId) -> Result<()> {
        if id.idx() < self.nodes.len() {
            Ok(())
        } else {
            Err(HarmonyError::NodeOutOfBounds {
                id: id.idx(),
                len: self.nodes.len(),
            })
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            weight_init: Uniform::new_inclusive(*WEIGHT_RANGE.start(), *WEIGHT_RANGE.end())
                .unwrap_or_else(|_| unreachable!("default weight range is valid")),
        }
    }
}
