use super::{activate::sigmoid, Network, NodeId};
use crate::{error::Result, signal::Signal};
use tracing::trace;

impl Network {
    /// Spread `signal` from `start` through the network, squashing with [sigmoid].
    /// See [Network::propagate_with].
    pub fn propagate<S: Signal + ?Sized>(&mut self, start: NodeId, signal: &S) -> Result<usize> {
        self.propagate_with(start, signal, sigmoid)
    }

    /// Depth first spread of `signal` from `start`. The first time a node is reached it takes on
    /// `σ(incoming)` as its activation, and then passes `activation * weight` down each of its
    /// connections in the order they were made. Nodes already reached during this pass ignore any
    /// later arrivals. Returns how many nodes were reached.
    pub fn propagate_with<S, F>(&mut self, start: NodeId, signal: &S, σ: F) -> Result<usize>
    where
        S: Signal + ?Sized,
        F: Fn(f64) -> f64,
    {
        self.check(start)?;
        let input = signal.reduce()?;

        let mut visited = vec![false; self.nodes.len()];
        let mut stack = vec![(start, input)];
        let mut reached = 0;

        while let Some((id, incoming)) = stack.pop() {
            if visited[id.idx()] {
                continue;
            }
            visited[id.idx()] = true;
            reached += 1;

            let node = &mut self.nodes[id.idx()];
            node.activation = σ(incoming);
            let activation = node.activation;
            // reversed, so the oldest connection is explored first
            stack.extend(
                node.connections
                    .iter()
                    .rev()
                    .filter(|c| !visited[c.target.idx()])
                    .map(|c| (c.target, activation * c.weight)),
            );
        }

        trace!(input, reached, "propagated");
        Ok(reached)
    }
}
