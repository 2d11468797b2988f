use crate::types::TraversalEdge;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;

/// Node in the reachability graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraversalNode {
    /// `dispatch:<n>`, `includes` or `standalone`
    Origin(String),
    /// A physical rule file
    File(String),
}

/// Directed graph of origins -> rule files, used to find files nothing reaches.
///
/// Edge weights carry the function or include name that produced the link.
pub struct ReachabilityGraph {
    graph: DiGraph<TraversalNode, Option<String>>,
    origin_index: HashMap<String, NodeIndex>,
    file_index: HashMap<String, NodeIndex>,
    /// Files in discovery order, for stable output
    files: Vec<String>,
}

impl ReachabilityGraph {
    /// Build from traversal edges; every discovered rule file gets a node even if unreached
    pub fn build(edges: &[TraversalEdge], rule_files: &[String]) -> Self {
        let mut this = Self {
            graph: DiGraph::new(),
            origin_index: HashMap::new(),
            file_index: HashMap::new(),
            files: Vec::new(),
        };

        for file in rule_files {
            this.file_node(file);
        }

        for edge in edges {
            let from = this.origin_node(&edge.from);
            for target in &edge.to_files {
                let to = this.file_node(target);
                this.graph.add_edge(from, to, edge.function.clone());
            }
        }

        log::debug!(
            "Reachability graph: {} nodes, {} edges",
            this.graph.node_count(),
            this.graph.edge_count()
        );
        this
    }

    fn origin_node(&mut self, origin: &str) -> NodeIndex {
        if let Some(&idx) = self.origin_index.get(origin) {
            return idx;
        }
        let idx = self
            .graph
            .add_node(TraversalNode::Origin(origin.to_string()));
        self.origin_index.insert(origin.to_string(), idx);
        idx
    }

    fn file_node(&mut self, file: &str) -> NodeIndex {
        if let Some(&idx) = self.file_index.get(file) {
            return idx;
        }
        let idx = self.graph.add_node(TraversalNode::File(file.to_string()));
        self.file_index.insert(file.to_string(), idx);
        self.files.push(file.to_string());
        idx
    }

    /// Files with no incoming edge, in discovery order
    pub fn unreached_files(&self) -> Vec<String> {
        self.files
            .iter()
            .filter(|file| {
                self.file_index.get(file.as_str()).is_some_and(|&idx| {
                    self.graph
                        .neighbors_directed(idx, Direction::Incoming)
                        .next()
                        .is_none()
                })
            })
            .cloned()
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn edge(from: &str, function: Option<&str>, to: &[&str]) -> TraversalEdge {
        TraversalEdge {
            from: from.to_string(),
            function: function.map(str::to_string),
            to_files: to.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn files_linked_twice_get_one_node() {
        let files = vec!["/r/a.rules".to_string()];
        let edges = vec![
            edge("includes", Some("a"), &["/r/a.rules"]),
            edge("includes", Some("a_alias"), &["/r/a.rules", "/r/elsewhere.rules"]),
        ];

        let graph = ReachabilityGraph::build(&edges, &files);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.unreached_files().is_empty());
    }

    #[test]
    fn unreached_files_have_no_incoming_edges() {
        let files: Vec<String> = ["/r/a.rules", "/r/b.rules", "/r/c.rules"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let edges = vec![
            edge("dispatch:1", Some("a"), &["/r/a.rules"]),
            edge("dispatch:2", Some("c"), &["/r/c.rules"]),
            edge("dispatch:2", Some("missing"), &[]),
        ];

        let graph = ReachabilityGraph::build(&edges, &files);
        assert_eq!(graph.unreached_files(), vec!["/r/b.rules"]);
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 2);
    }
}
