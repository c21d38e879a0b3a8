use std::collections::{HashMap, HashSet};
use std::fmt;

use slotmap::SlotMap;

use crate::error::GraphError;

slotmap::new_key_type! {
    /// Unique identifier for a node in a [`MeshGraph`].
    pub struct NodeId;
}

/// Declared kind of a geometry node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Pin,
    Assembly,
    Core,
    /// Any other mesh generator; carries its type label for diagnostics.
    Other(String),
}

impl NodeKind {
    /// Parses a kind label.
    ///
    /// Accepts the short names (`pin`, `assembly`, `core`) and the
    /// mesh-generator type names (`PinMeshGenerator`, ...). Anything else is
    /// [`NodeKind::Other`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "pin" | "Pin" | "PinMeshGenerator" => Self::Pin,
            "assembly" | "Assembly" | "AssemblyMeshGenerator" => Self::Assembly,
            "core" | "Core" | "CoreMeshGenerator" => Self::Core,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns `true` for the kinds that contribute units to a catalog.
    #[must_use]
    pub fn is_geometry(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pin => f.write_str("Pin"),
            Self::Assembly => f.write_str("Assembly"),
            Self::Core => f.write_str("Core"),
            Self::Other(label) => f.write_str(label),
        }
    }
}

/// Read-only view of the geometry DAG consumed by the catalog builder.
pub trait GeometryGraph {
    /// Returns the declared kind of the named node, if it exists.
    fn kind_of(&self, name: &str) -> Option<&NodeKind>;

    /// Returns `true` if `candidate` feeds geometry, directly or transitively,
    /// into `root`. A node is not its own ancestor.
    fn is_ancestor_of(&self, candidate: &str, root: &str) -> bool;

    /// Returns the names of every node feeding geometry into `root`,
    /// excluding `root` itself. Empty for an unknown root.
    fn ancestors_of(&self, root: &str) -> HashSet<String>;

    /// Returns every node name, inputs before the nodes that consume them.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Unordered`] if some nodes cannot be ordered
    /// because they lie on a cycle.
    fn topological_order(&self) -> Result<Vec<String>, GraphError>;
}

#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    kind: NodeKind,
    inputs: Vec<NodeId>,
    consumers: Vec<NodeId>,
}

/// In-memory geometry DAG.
///
/// Nodes live in an arena and reference each other by [`NodeId`]; an edge
/// `input -> consumer` means the consumer builds on the input's geometry.
#[derive(Debug, Default)]
pub struct MeshGraph {
    nodes: SlotMap<NodeId, NodeData>,
    by_name: HashMap<String, NodeId>,
    order: Vec<NodeId>,
}

impl MeshGraph {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if the name is taken.
    pub fn add_node(&mut self, name: &str, kind: NodeKind) -> Result<NodeId, GraphError> {
        if self.by_name.contains_key(name) {
            return Err(GraphError::DuplicateNode(name.into()));
        }
        let id = self.nodes.insert(NodeData {
            name: name.into(),
            kind,
            inputs: Vec::new(),
            consumers: Vec::new(),
        });
        self.by_name.insert(name.into(), id);
        self.order.push(id);
        Ok(id)
    }

    /// Records that `consumer` is built from `input`.
    ///
    /// # Errors
    ///
    /// Returns an error if either node is unknown or the edge would close a cycle.
    pub fn connect(&mut self, input: &str, consumer: &str) -> Result<(), GraphError> {
        let input_id = self.id(input)?;
        let consumer_id = self.id(consumer)?;
        if input_id == consumer_id || self.reaches(input_id, consumer_id) {
            return Err(GraphError::Cycle {
                input: input.into(),
                consumer: consumer.into(),
            });
        }
        if let Some(node) = self.nodes.get_mut(consumer_id) {
            if !node.inputs.contains(&input_id) {
                node.inputs.push(input_id);
            }
        }
        if let Some(node) = self.nodes.get_mut(input_id) {
            if !node.consumers.contains(&consumer_id) {
                node.consumers.push(consumer_id);
            }
        }
        Ok(())
    }

    /// Returns the ID of the named node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if no node has that name.
    pub fn id(&self, name: &str) -> Result<NodeId, GraphError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(name.into()))
    }

    /// Returns the names of the direct inputs of a node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if no node has that name.
    pub fn inputs(&self, name: &str) -> Result<Vec<&str>, GraphError> {
        let id = self.id(name)?;
        Ok(self.nodes[id]
            .inputs
            .iter()
            .map(|&i| self.nodes[i].name.as_str())
            .collect())
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `target` is reachable from `from` by following inputs.
    fn reaches(&self, from: NodeId, target: NodeId) -> bool {
        self.upstream(from).contains(&target)
    }

    /// Collects every node reachable from `from` by following inputs.
    fn upstream(&self, from: NodeId) -> HashSet<NodeId> {
        let mut stack = vec![from];
        let mut seen = HashSet::new();
        while let Some(id) = stack.pop() {
            for &input in &self.nodes[id].inputs {
                if seen.insert(input) {
                    stack.push(input);
                }
            }
        }
        seen
    }
}

impl GeometryGraph for MeshGraph {
    fn kind_of(&self, name: &str) -> Option<&NodeKind> {
        self.by_name.get(name).map(|&id| &self.nodes[id].kind)
    }

    fn is_ancestor_of(&self, candidate: &str, root: &str) -> bool {
        match (self.by_name.get(candidate), self.by_name.get(root)) {
            (Some(&c), Some(&r)) => c != r && self.reaches(r, c),
            _ => false,
        }
    }

    fn ancestors_of(&self, root: &str) -> HashSet<String> {
        let Some(&r) = self.by_name.get(root) else {
            return HashSet::new();
        };
        self.upstream(r)
            .into_iter()
            .filter(|&id| id != r)
            .map(|id| self.nodes[id].name.clone())
            .collect()
    }

    fn topological_order(&self) -> Result<Vec<String>, GraphError> {
        // Kahn's algorithm; ties resolved by insertion order.
        let mut pending: HashMap<NodeId, usize> = self
            .order
            .iter()
            .map(|&id| (id, self.nodes[id].inputs.len()))
            .collect();
        let mut sorted = Vec::with_capacity(self.order.len());
        while sorted.len() < self.order.len() {
            let Some(&next) = self
                .order
                .iter()
                .find(|&id| pending.get(id) == Some(&0))
            else {
                break;
            };
            pending.remove(&next);
            for consumer in &self.nodes[next].consumers {
                if let Some(count) = pending.get_mut(consumer) {
                    *count -= 1;
                }
            }
            sorted.push(self.nodes[next].name.clone());
        }
        if sorted.len() < self.order.len() {
            let mut stuck: Vec<String> = self
                .order
                .iter()
                .filter(|&&id| pending.contains_key(&id))
                .map(|&id| self.nodes[id].name.clone())
                .collect();
            stuck.sort();
            return Err(GraphError::Unordered(stuck));
        }
        Ok(sorted)
    }
}
