use super::NodeId;
use crate::geometry::Point;
use serde::Serialize;

/// A single directed, weighted path to another node of the same [super::Network]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub target: NodeId,
    pub weight: f64,
}

impl Connection {
    pub fn new(target: NodeId, weight: f64) -> Self {
        Self { target, weight }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// A point on the plane holding the activation of the latest propagation pass which reached it,
/// and the connections leaving it in the order they were made
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub(crate) position: Point,
    pub(crate) activation: f64,
    pub(crate) connections: Vec<Connection>,
}

impl Node {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            activation: 0.,
            connections: Vec::new(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Only meaningful directly after a propagation pass which reached this node
    pub fn activation(&self) -> f64 {
        self.activation
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Out-degree
    pub fn degree(&self) -> usize {
        self.connections.len()
    }

    pub fn is_isolated(&self) -> bool {
        self.connections.is_empty()
    }

    pub(crate) fn push_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }
}
