//! Flowchart model
//!
//! Stores nodes, subgraphs, edges and styles for one flowchart. Nodes and
//! subgraphs live in arenas owned by the [`Flowchart`] and are addressed by
//! copyable handles; the nesting structure is kept as ordered child lists so
//! that rendering follows insertion order.
//!
//! Node and subgraph IDs share one namespace for the whole chart, no matter
//! how deeply the element is nested. Adding a subgraph's child goes through
//! [`SubgraphMut`], which borrows the owning chart so the check always sees
//! every ID.

use std::collections::{BTreeMap, HashMap};
use std::ops::{Index, IndexMut};

use tracing::{debug, trace};

use crate::core::ids::next_chart_tag;
use crate::core::{next_id, Direction, EdgeType, NodeShape, Style};

/// Handle to a node of a specific [`Flowchart`]
///
/// Handles remember the chart that issued them; another chart rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    chart: u64,
    index: usize,
}

/// Handle to a subgraph of a specific [`Flowchart`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubgraphId {
    chart: u64,
    index: usize,
}

/// Handle to an edge; its index is the position the edge was appended at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    chart: u64,
    index: usize,
}

impl EdgeId {
    /// Append position of the edge, as used by `linkStyle`
    pub fn index(self) -> usize {
        self.index
    }
}

/// A renderable child of the chart or of a subgraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Item {
    Node(NodeId),
    Subgraph(SubgraphId),
}

/// Target of a node's `click` directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLink {
    pub url: String,
    pub tooltip: Option<String>,
}

/// A leaf vertex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: String,
    /// Display text, defaults to the ID
    pub title: String,
    /// Visual shape of the node
    pub shape: NodeShape,
    /// ID of a node style in the owning chart; ignored if no such style exists
    pub style: Option<String>,
    /// Optional hyperlink rendered as a `click` line
    pub link: Option<NodeLink>,
}

impl Node {
    fn new(id: String) -> Self {
        Self {
            title: id.clone(),
            id,
            shape: NodeShape::Rectangle,
            style: None,
            link: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn set_shape(&mut self, shape: NodeShape) -> &mut Self {
        self.shape = shape;
        self
    }

    pub fn set_style(&mut self, style_id: impl Into<String>) -> &mut Self {
        self.style = Some(style_id.into());
        self
    }

    pub fn set_link(&mut self, url: impl Into<String>, tooltip: Option<String>) -> &mut Self {
        self.link = Some(NodeLink {
            url: url.into(),
            tooltip,
        });
        self
    }
}

/// A titled container of nodes and nested subgraphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subgraph {
    id: String,
    /// Display text after the `subgraph` keyword, defaults to the ID
    pub title: String,
    parent: Option<SubgraphId>,
    items: Vec<Item>,
}

impl Subgraph {
    fn new(id: String, parent: Option<SubgraphId>) -> Self {
        Self {
            title: id.clone(),
            id,
            parent,
            items: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The enclosing subgraph, or `None` for a top-level subgraph
    pub fn parent(&self) -> Option<SubgraphId> {
        self.parent
    }

    /// Children in insertion order
    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

/// A connector between two nodes of the same chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    index: usize,
    from: NodeId,
    to: NodeId,
    /// Link glyph
    pub shape: EdgeType,
    /// Optional text placed on the link
    pub label: Option<String>,
    /// ID of an edge style in the owning chart; ignored if no such style exists
    pub style: Option<String>,
}

impl Edge {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn set_shape(&mut self, shape: EdgeType) -> &mut Self {
        self.shape = shape;
        self
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    pub fn set_style(&mut self, style_id: impl Into<String>) -> &mut Self {
        self.style = Some(style_id.into());
        self
    }
}

/// Root container of a flowchart diagram
///
/// # Example
/// ```
/// use mermaidgen::prelude::*;
///
/// let mut chart = Flowchart::new();
/// let a = chart.add_node("A").unwrap();
/// let b = chart.add_node("B").unwrap();
/// chart.add_edge(a, b).unwrap();
/// assert_eq!(chart.render(), "graph TB\nA[A]\nB[B]\nA-->B\n");
/// ```
///
/// A clone keeps the tag of the original, so handles issued before the clone
/// work on both copies.
#[derive(Debug, Clone)]
pub struct Flowchart {
    tag: u64,
    direction: Direction,
    nodes: Vec<Node>,
    node_index: HashMap<String, NodeId>,
    subgraphs: Vec<Subgraph>,
    subgraph_index: HashMap<String, SubgraphId>,
    /// Top-level items in insertion order
    items: Vec<Item>,
    /// Edges in append order
    edges: Vec<Edge>,
    node_styles: BTreeMap<String, Style>,
    edge_styles: BTreeMap<String, Style>,
}

impl Default for Flowchart {
    fn default() -> Self {
        Self {
            tag: next_chart_tag(),
            direction: Direction::default(),
            nodes: Vec::new(),
            node_index: HashMap::new(),
            subgraphs: Vec::new(),
            subgraph_index: HashMap::new(),
            items: Vec::new(),
            edges: Vec::new(),
            node_styles: BTreeMap::new(),
            edge_styles: BTreeMap::new(),
        }
    }
}

impl Flowchart {
    /// Create an empty chart with top-down direction
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty chart with a specific direction
    pub fn with_direction(direction: Direction) -> Self {
        Self {
            direction,
            ..Default::default()
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Returns true if a node or subgraph already uses `id`
    pub fn contains_id(&self, id: &str) -> bool {
        self.node_index.contains_key(id) || self.subgraph_index.contains_key(id)
    }

    fn children_mut(&mut self, parent: Option<SubgraphId>) -> &mut Vec<Item> {
        match parent {
            Some(sg) => &mut self.subgraphs[sg.index].items,
            None => &mut self.items,
        }
    }

    fn insert_node(&mut self, parent: Option<SubgraphId>, id: String) -> Option<NodeId> {
        if self.contains_id(&id) {
            debug!(node_id = %id, "Rejected node with duplicate id");
            return None;
        }
        trace!(node_id = %id, parent = ?parent, "Adding node to flowchart");

        let handle = NodeId {
            chart: self.tag,
            index: self.nodes.len(),
        };
        self.nodes.push(Node::new(id.clone()));
        self.node_index.insert(id, handle);
        self.children_mut(parent).push(Item::Node(handle));
        Some(handle)
    }

    fn insert_anonymous_node(&mut self, parent: Option<SubgraphId>) -> NodeId {
        loop {
            let id = next_id();
            // Minted IDs can still clash with a caller who picked `idN` by hand
            if let Some(handle) = self.insert_node(parent, id) {
                return handle;
            }
        }
    }

    fn insert_subgraph(&mut self, parent: Option<SubgraphId>, id: String) -> Option<SubgraphId> {
        if self.contains_id(&id) {
            debug!(subgraph_id = %id, "Rejected subgraph with duplicate id");
            return None;
        }
        trace!(subgraph_id = %id, parent = ?parent, "Adding subgraph to flowchart");

        let handle = SubgraphId {
            chart: self.tag,
            index: self.subgraphs.len(),
        };
        self.subgraphs.push(Subgraph::new(id.clone(), parent));
        self.subgraph_index.insert(id, handle);
        self.children_mut(parent).push(Item::Subgraph(handle));
        Some(handle)
    }

    /// Add a top-level node with rectangle shape
    ///
    /// Returns `None` and leaves the chart untouched if `id` is already used
    /// by any node or subgraph of this chart.
    pub fn add_node(&mut self, id: impl Into<String>) -> Option<NodeId> {
        self.insert_node(None, id.into())
    }

    /// Add a top-level node with a minted `idN` identifier
    pub fn add_anonymous_node(&mut self) -> NodeId {
        self.insert_anonymous_node(None)
    }

    /// Add a top-level subgraph
    ///
    /// Returns `None` if `id` is already used anywhere in this chart.
    pub fn add_subgraph(&mut self, id: impl Into<String>) -> Option<SubgraphId> {
        self.insert_subgraph(None, id.into())
    }

    /// Append an edge; its index is fixed to the current edge count
    ///
    /// Returns `None` and leaves the chart untouched if either endpoint was
    /// issued by another chart.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.add_typed_edge(from, to, EdgeType::Arrow)
    }

    /// Append an edge with a specific link glyph
    pub fn add_typed_edge(&mut self, from: NodeId, to: NodeId, shape: EdgeType) -> Option<EdgeId> {
        if self.node(from).is_none() || self.node(to).is_none() {
            debug!(from = ?from, to = ?to, "Rejected edge with an endpoint from another chart");
            return None;
        }
        let index = self.edges.len();
        trace!(edge_index = index, from = ?from, to = ?to, edge_type = ?shape, "Adding edge");
        self.edges.push(Edge {
            index,
            from,
            to,
            shape,
            label: None,
            style: None,
        });
        Some(EdgeId {
            chart: self.tag,
            index,
        })
    }

    /// Mutable view of a subgraph, used to add children to it
    ///
    /// # Panics
    /// If `id` was not issued by this chart.
    pub fn subgraph_mut(&mut self, id: SubgraphId) -> SubgraphMut<'_> {
        assert!(self.subgraph(id).is_some(), "subgraph handle belongs to another chart");
        SubgraphMut { chart: self, id }
    }

    /// Look up a node handle by ID
    pub fn get_node(&self, id: &str) -> Option<NodeId> {
        self.node_index.get(id).copied()
    }

    /// Look up a subgraph handle by ID
    pub fn get_subgraph(&self, id: &str) -> Option<SubgraphId> {
        self.subgraph_index.get(id).copied()
    }

    /// Look up an edge handle by its append index
    pub fn get_edge(&self, index: usize) -> Option<EdgeId> {
        (index < self.edges.len()).then_some(EdgeId {
            chart: self.tag,
            index,
        })
    }

    /// Returns `None` for a handle issued by another chart
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        if id.chart != self.tag {
            return None;
        }
        self.nodes.get(id.index)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.chart != self.tag {
            return None;
        }
        self.nodes.get_mut(id.index)
    }

    pub fn subgraph(&self, id: SubgraphId) -> Option<&Subgraph> {
        if id.chart != self.tag {
            return None;
        }
        self.subgraphs.get(id.index)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        if id.chart != self.tag {
            return None;
        }
        self.edges.get(id.index)
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        if id.chart != self.tag {
            return None;
        }
        self.edges.get_mut(id.index)
    }

    /// All nodes of the chart, in no particular order
    ///
    /// This is not rendering order; use [`Flowchart::items`] for that.
    pub fn list_nodes(&self) -> Vec<NodeId> {
        self.node_index.values().copied().collect()
    }

    /// All subgraphs of the chart, in no particular order
    pub fn list_subgraphs(&self) -> Vec<SubgraphId> {
        self.subgraph_index.values().copied().collect()
    }

    /// All edges, in the order they were added
    pub fn list_edges(&self) -> Vec<EdgeId> {
        let chart = self.tag;
        (0..self.edges.len()).map(|index| EdgeId { chart, index }).collect()
    }

    /// Top-level items in insertion order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Edges in append order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Get or create the node style with the given ID
    ///
    /// The first call creates the style with stroke width 1; later calls
    /// return the same instance.
    pub fn node_style(&mut self, id: impl Into<String>) -> &mut Style {
        let id = id.into();
        self.node_styles.entry(id).or_insert_with_key(|id| {
            trace!(style_id = %id, "Creating node style");
            Style::new(id.clone())
        })
    }

    /// Get or create the edge style with the given ID
    pub fn edge_style(&mut self, id: impl Into<String>) -> &mut Style {
        let id = id.into();
        self.edge_styles.entry(id).or_insert_with_key(|id| {
            trace!(style_id = %id, "Creating edge style");
            Style::new(id.clone())
        })
    }

    /// Look up a node style without creating it
    pub fn get_node_style(&self, id: &str) -> Option<&Style> {
        self.node_styles.get(id)
    }

    /// Look up an edge style without creating it
    pub fn get_edge_style(&self, id: &str) -> Option<&Style> {
        self.edge_styles.get(id)
    }

    /// Node styles ordered by ID
    pub fn node_styles(&self) -> impl Iterator<Item = &Style> {
        self.node_styles.values()
    }

    /// Edge styles ordered by ID
    pub fn edge_styles(&self) -> impl Iterator<Item = &Style> {
        self.edge_styles.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn subgraph_count(&self) -> usize {
        self.subgraphs.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Indexing panics on a handle issued by another chart
impl Index<NodeId> for Flowchart {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        assert_eq!(id.chart, self.tag, "node handle belongs to another chart");
        &self.nodes[id.index]
    }
}

impl IndexMut<NodeId> for Flowchart {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        assert_eq!(id.chart, self.tag, "node handle belongs to another chart");
        &mut self.nodes[id.index]
    }
}

impl Index<SubgraphId> for Flowchart {
    type Output = Subgraph;

    fn index(&self, id: SubgraphId) -> &Subgraph {
        assert_eq!(id.chart, self.tag, "subgraph handle belongs to another chart");
        &self.subgraphs[id.index]
    }
}

impl Index<EdgeId> for Flowchart {
    type Output = Edge;

    fn index(&self, id: EdgeId) -> &Edge {
        assert_eq!(id.chart, self.tag, "edge handle belongs to another chart");
        &self.edges[id.index]
    }
}

impl IndexMut<EdgeId> for Flowchart {
    fn index_mut(&mut self, id: EdgeId) -> &mut Edge {
        assert_eq!(id.chart, self.tag, "edge handle belongs to another chart");
        &mut self.edges[id.index]
    }
}

/// Mutable view of one subgraph together with its owning chart
///
/// Children added through this view are appended to the subgraph, while
/// their IDs are checked against the whole chart.
pub struct SubgraphMut<'a> {
    chart: &'a mut Flowchart,
    id: SubgraphId,
}

impl SubgraphMut<'_> {
    pub fn id(&self) -> SubgraphId {
        self.id
    }

    pub fn subgraph(&self) -> &Subgraph {
        &self.chart.subgraphs[self.id.index]
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.chart.subgraphs[self.id.index].title = title.into();
        self
    }

    /// Add a node inside this subgraph
    ///
    /// Returns `None` if `id` is already used anywhere in the chart.
    pub fn add_node(&mut self, id: impl Into<String>) -> Option<NodeId> {
        self.chart.insert_node(Some(self.id), id.into())
    }

    /// Add a node with a minted `idN` identifier inside this subgraph
    pub fn add_anonymous_node(&mut self) -> NodeId {
        self.chart.insert_anonymous_node(Some(self.id))
    }

    /// Add a nested subgraph
    ///
    /// Returns `None` if `id` is already used anywhere in the chart.
    pub fn add_subgraph(&mut self, id: impl Into<String>) -> Option<SubgraphId> {
        self.chart.insert_subgraph(Some(self.id), id.into())
    }
}
