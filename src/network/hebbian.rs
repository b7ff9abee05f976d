use super::{Network, NodeId};
use crate::error::Result;

impl Network {
    /// Strengthen each connection leaving `id` by `rate * activation(id) * activation(target)`.
    /// Weights are neither normalized nor bounded, so repeated updates may grow them without limit.
    /// Activations are read as they are, which before any propagation means zero.
    pub fn hebbian_update(&mut self, id: NodeId, rate: f64) -> Result<()> {
        self.check(id)?;
        let pre = self.nodes[id.idx()].activation;
        for i in 0..self.nodes[id.idx()].connections.len() {
            let post = self.nodes[self.nodes[id.idx()].connections[i].target.idx()].activation;
            self.nodes[id.idx()].connections[i].weight += rate * pre * post;
        }
        Ok(())
    }

    /// [Network::hebbian_update] on every node, reached by the last pass or not
    pub fn hebbian_update_all(&mut self, rate: f64) {
        let activations = self.nodes.iter().map(|n| n.activation).collect::<Vec<_>>();
        for (node, pre) in self.nodes.iter_mut().zip(activations.iter()) {
            for c in node.connections.iter_mut() {
                c.weight += rate * pre * activations[c.target.idx()];
            }
        }
    }
}
