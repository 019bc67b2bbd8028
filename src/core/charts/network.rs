//! Topic co-occurrence network

use super::stats::{CoOccurrence, Frequency};
use std::collections::HashMap;

/// A topic node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkNode {
    /// Topic name
    pub topic: String,
    /// Total number of exercises listing the topic (at least 1)
    pub frequency: usize,
}

/// A weighted edge between two node indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkEdge {
    /// Index of the first node
    pub source: usize,
    /// Index of the second node
    pub target: usize,
    /// Number of exercises in which both topics appear
    pub weight: usize,
}

/// Undirected graph of topics joined by positive co-occurrence weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicNetwork {
    nodes: Vec<NetworkNode>,
    edges: Vec<NetworkEdge>,
}

impl TopicNetwork {
    /// Build the network from pair weights and topic frequencies.
    ///
    /// Nodes appear in the order their first edge is added (pairs are visited
    /// in sorted order). Returns `None` when there is no pair with positive weight.
    #[must_use]
    pub fn build(pairs: &CoOccurrence, frequencies: &[Frequency]) -> Option<Self> {
        let lookup: HashMap<&str, usize> = frequencies
            .iter()
            .map(|f| (f.label.as_str(), f.count))
            .collect();

        let mut network = Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        let mut index: HashMap<String, usize> = HashMap::new();

        for (pair, &weight) in pairs {
            if weight == 0 {
                continue;
            }
            let source = network.intern(&mut index, pair.first(), &lookup);
            let target = network.intern(&mut index, pair.second(), &lookup);
            network.edges.push(NetworkEdge {
                source,
                target,
                weight,
            });
        }

        if network.edges.is_empty() {
            None
        } else {
            Some(network)
        }
    }

    fn intern(
        &mut self,
        index: &mut HashMap<String, usize>,
        topic: &str,
        lookup: &HashMap<&str, usize>,
    ) -> usize {
        if let Some(&idx) = index.get(topic) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(NetworkNode {
            topic: topic.to_string(),
            frequency: lookup.get(topic).copied().unwrap_or(1),
        });
        index.insert(topic.to_string(), idx);
        idx
    }

    /// Nodes in insertion order
    #[must_use]
    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    /// Edges in insertion order
    #[must_use]
    pub fn edges(&self) -> &[NetworkEdge] {
        &self.edges
    }

    /// Number of nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Index of the node for `topic`
    #[must_use]
    pub fn node_index(&self, topic: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.topic == topic)
    }

    /// Weight of the edge between two topics, 0 if absent
    #[must_use]
    pub fn weight_between(&self, a: &str, b: &str) -> usize {
        let (Some(ia), Some(ib)) = (self.node_index(a), self.node_index(b)) else {
            return 0;
        };
        self.edges
            .iter()
            .find(|e| (e.source == ia && e.target == ib) || (e.source == ib && e.target == ia))
            .map_or(0, |e| e.weight)
    }
}
