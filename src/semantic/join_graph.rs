//! Join path resolution over the definition's join edges.
//!
//! The table graph is rebuilt per compilation call and walked
//! breadth-first from the anchor table. Only the edges needed to reach a
//! required table are kept, so definitions may declare more joins than
//! any one query uses.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::model::definition::Definition;
use crate::semantic::error::{CompileError, CompileResult};

/// One emitted JOIN clause: the newly joined table and its ON predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinStep {
    pub table: String,
    pub on: String,
}

/// Parent pointer for path reconstruction.
struct ParentInfo {
    parent: NodeIndex,
    edge: EdgeIndex,
}

/// Undirected table graph built from a definition's join edges.
pub struct JoinGraphResolver {
    graph: UnGraph<String, String>,
    node_indices: HashMap<String, NodeIndex>,
}

impl JoinGraphResolver {
    pub fn new(definition: &Definition) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut node_indices = HashMap::new();
        for edge in &definition.joins {
            let one = Self::intern(&mut graph, &mut node_indices, &edge.one);
            let many = Self::intern(&mut graph, &mut node_indices, &edge.many);
            graph.add_edge(one, many, edge.on.clone());
        }
        Self {
            graph,
            node_indices,
        }
    }

    fn intern(
        graph: &mut UnGraph<String, String>,
        indices: &mut HashMap<String, NodeIndex>,
        table: &str,
    ) -> NodeIndex {
        *indices
            .entry(table.to_string())
            .or_insert_with(|| graph.add_node(table.to_string()))
    }

    /// Resolve the minimal ordered join sequence connecting the anchor
    /// table to every required table.
    ///
    /// Neighbors are visited in table-name order (parallel edges broken
    /// by predicate text), so the emitted sequence is a pure function of
    /// the graph's connectivity and the anchor, independent of the
    /// declaration order of the joins list. Identical logical queries
    /// therefore always compile to identical SQL text.
    pub fn resolve(
        &self,
        anchor: &str,
        required: &HashSet<String>,
    ) -> CompileResult<Vec<JoinStep>> {
        let mut missing: HashSet<&str> = required
            .iter()
            .map(String::as_str)
            .filter(|table| *table != anchor)
            .collect();
        if missing.is_empty() {
            return Ok(Vec::new());
        }

        let anchor_idx = match self.node_indices.get(anchor) {
            Some(idx) => *idx,
            None => return Err(self.unreachable(anchor, &missing)),
        };

        // BFS with parent pointers; each node gets a discovery sequence
        // number so pruned edges can be re-emitted in traversal order.
        let mut parents: HashMap<NodeIndex, ParentInfo> = HashMap::new();
        let mut discovered: HashMap<NodeIndex, usize> = HashMap::new();
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        discovered.insert(anchor_idx, 0);
        queue.push_back(anchor_idx);

        'bfs: while let Some(current) = queue.pop_front() {
            let mut neighbors: Vec<(NodeIndex, EdgeIndex)> = self
                .graph
                .edges(current)
                .map(|edge| {
                    let other = if edge.source() == current {
                        edge.target()
                    } else {
                        edge.source()
                    };
                    (other, edge.id())
                })
                .collect();
            neighbors.sort_by(|a, b| {
                self.graph[a.0]
                    .cmp(&self.graph[b.0])
                    .then_with(|| self.graph[a.1].cmp(&self.graph[b.1]))
            });

            for (neighbor, edge) in neighbors {
                if discovered.contains_key(&neighbor) {
                    continue;
                }
                discovered.insert(neighbor, discovered.len());
                parents.insert(neighbor, ParentInfo {
                    parent: current,
                    edge,
                });
                missing.remove(self.graph[neighbor].as_str());
                if missing.is_empty() {
                    break 'bfs;
                }
                queue.push_back(neighbor);
            }
        }

        if !missing.is_empty() {
            return Err(self.unreachable(anchor, &missing));
        }

        // Keep only the edges on a path from the anchor to a required
        // table; each kept node contributes its parent edge.
        let mut kept: HashSet<NodeIndex> = HashSet::new();
        for table in required {
            if table == anchor {
                continue;
            }
            let mut current = self.node_indices[table.as_str()];
            while current != anchor_idx && kept.insert(current) {
                current = parents[&current].parent;
            }
        }

        let mut joined: Vec<NodeIndex> = kept.into_iter().collect();
        joined.sort_by_key(|idx| discovered[idx]);
        Ok(joined
            .into_iter()
            .map(|idx| JoinStep {
                table: self.graph[idx].clone(),
                on: self.graph[parents[&idx].edge].clone(),
            })
            .collect())
    }

    fn unreachable(&self, anchor: &str, missing: &HashSet<&str>) -> CompileError {
        let mut unreachable: Vec<String> = missing.iter().map(|t| t.to_string()).collect();
        unreachable.sort();
        CompileError::JoinResolution {
            anchor: anchor.to_string(),
            unreachable,
        }
    }
}
