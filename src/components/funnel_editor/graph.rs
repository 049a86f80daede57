use log::debug;

use super::catalog;
use super::metric;
use super::types::{Edge, EdgeId, GraphSnapshot, MetricData, Node, NodeId, NodeType, Point};

/// Nodes and edges of one editing session.
///
/// Every operation is total: unknown ids, self-loops and duplicate edges are
/// no-ops rather than errors. Ids come from monotonic counters and are never
/// handed out twice, even after the item they named is gone.
#[derive(Clone, Debug, Default)]
pub struct GraphModel {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	next_node: u64,
	next_edge: u64,
}

impl GraphModel {
	/// An empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Rebuild a model from starter content. Edges that would break an
	/// invariant are dropped, and counters resume past the largest id seen.
	pub fn from_snapshot(snapshot: &GraphSnapshot) -> Self {
		let mut model = Self::new();
		for node in &snapshot.nodes {
			if model.node(node.id).is_some() {
				continue;
			}
			let mut node = node.clone();
			node.computed = catalog::describe(node.node_type)
				.has_computed_data
				.then(|| {
					let data = node.computed.unwrap_or_default();
					MetricData {
						derived: metric::recompute(data.input_a, data.input_b),
						..data
					}
				});
			model.next_node = model.next_node.max(node.id.0 + 1);
			model.nodes.push(node);
		}
		for edge in &snapshot.edges {
			if model.edge_allowed(edge.source, edge.target) && model.edge(edge.id).is_none() {
				model.next_edge = model.next_edge.max(edge.id.0 + 1);
				model.edges.push(*edge);
			}
		}
		model
	}

	/// Nodes in paint order, bottom first.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Edges in creation order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Look up a node by id.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Look up an edge by id.
	pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
		self.edges.iter().find(|e| e.id == id)
	}

	/// Whether an edge `source -> target` exists. Direction matters.
	pub fn contains_edge(&self, source: NodeId, target: NodeId) -> bool {
		self.edges
			.iter()
			.any(|e| e.source == source && e.target == target)
	}

	/// Copy of the current nodes and edges.
	pub fn snapshot(&self) -> GraphSnapshot {
		GraphSnapshot {
			nodes: self.nodes.clone(),
			edges: self.edges.clone(),
		}
	}

	/// Place a new node with its catalog label. Metric nodes start with
	/// zeroed inputs.
	pub fn add_node(&mut self, node_type: NodeType, position: Point) -> Node {
		let visual = catalog::describe(node_type);
		let id = NodeId(self.next_node);
		self.next_node += 1;

		let node = Node {
			id,
			node_type,
			position,
			label: visual.default_label.to_owned(),
			computed: visual.has_computed_data.then(MetricData::default),
		};
		debug!("add {id} ({node_type}) at ({}, {})", position.x, position.y);
		self.nodes.push(node.clone());
		node
	}

	/// Set a node's top-left corner. Unknown ids are ignored.
	pub fn move_node(&mut self, id: NodeId, position: Point) {
		if let Some(node) = self.node_mut(id) {
			node.position = position;
		}
	}

	/// Replace a node's display label.
	pub fn rename_node(&mut self, id: NodeId, label: impl Into<String>) {
		if let Some(node) = self.node_mut(id) {
			node.label = label.into();
		}
	}

	/// Remove a node together with every edge that touches it.
	pub fn remove_node(&mut self, id: NodeId) {
		let before = self.nodes.len();
		self.nodes.retain(|n| n.id != id);
		if self.nodes.len() == before {
			return;
		}
		let edges_before = self.edges.len();
		self.edges.retain(|e| e.source != id && e.target != id);
		debug!(
			"remove {id} and {} attached edge(s)",
			edges_before - self.edges.len()
		);
	}

	/// Connect `source` to `target`. Returns `None`, leaving the graph as
	/// it was, for self-loops, missing endpoints and duplicate pairs.
	pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Option<Edge> {
		if !self.edge_allowed(source, target) {
			return None;
		}
		let edge = Edge {
			id: EdgeId(self.next_edge),
			source,
			target,
		};
		self.next_edge += 1;
		debug!("add {} from {source} to {target}", edge.id);
		self.edges.push(edge);
		Some(edge)
	}

	/// Remove one edge. Its endpoints stay.
	pub fn remove_edge(&mut self, id: EdgeId) {
		let before = self.edges.len();
		self.edges.retain(|e| e.id != id);
		if self.edges.len() != before {
			debug!("remove {id}");
		}
	}

	/// Store new inputs on a metric node and refresh its derived value in
	/// the same step. Returns `false` for absent or non-metric nodes.
	pub fn update_metric_inputs(&mut self, id: NodeId, input_a: f64, input_b: f64) -> bool {
		let Some(data) = self.node_mut(id).and_then(|n| n.computed.as_mut()) else {
			return false;
		};
		*data = MetricData {
			input_a,
			input_b,
			derived: metric::recompute(input_a, input_b),
		};
		debug!("{id} inputs ({input_a}, {input_b}) -> {}", data.derived);
		true
	}

	fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		self.nodes.iter_mut().find(|n| n.id == id)
	}

	fn edge_allowed(&self, source: NodeId, target: NodeId) -> bool {
		source != target
			&& self.node(source).is_some()
			&& self.node(target).is_some()
			&& !self.contains_edge(source, target)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use float_cmp::approx_eq;
	use strum::IntoEnumIterator;

	fn chain() -> (GraphModel, NodeId, NodeId, NodeId) {
		let mut graph = GraphModel::new();
		let a = graph.add_node(NodeType::Traffic, Point::new(0.0, 0.0)).id;
		let b = graph.add_node(NodeType::Page, Point::new(250.0, 0.0)).id;
		let c = graph.add_node(NodeType::Checkout, Point::new(500.0, 0.0)).id;
		(graph, a, b, c)
	}

	#[test]
	fn added_nodes_keep_type_position_and_unique_ids() {
		let mut graph = GraphModel::new();
		let mut seen = Vec::new();
		for (i, ty) in NodeType::iter().enumerate() {
			let at = Point::new(i as f64 * 17.5, -(i as f64) * 3.0);
			let node = graph.add_node(ty, at);
			let stored = graph.node(node.id).expect("node was just added");
			assert_eq!(stored.node_type, ty);
			assert_eq!(stored.position, at);
			assert_eq!(stored.label, catalog::describe(ty).default_label);
			assert!(!seen.contains(&node.id));
			seen.push(node.id);
		}
	}

	#[test]
	fn ids_are_not_reused_after_removal() {
		let mut graph = GraphModel::new();
		let first = graph.add_node(NodeType::Email, Point::default()).id;
		graph.remove_node(first);
		let second = graph.add_node(NodeType::Email, Point::default()).id;
		assert_ne!(first, second);
	}

	#[test]
	fn metric_nodes_start_zeroed_and_others_have_no_data() {
		let mut graph = GraphModel::new();
		let metric = graph.add_node(NodeType::Metric, Point::default());
		let page = graph.add_node(NodeType::Page, Point::default());
		assert_eq!(metric.computed, Some(MetricData::default()));
		assert_eq!(page.computed, None);
	}

	#[test]
	fn duplicate_edges_are_rejected() {
		let (mut graph, a, b, _) = chain();
		assert!(graph.add_edge(a, b).is_some());
		assert!(graph.add_edge(a, b).is_none());
		assert_eq!(graph.edges().len(), 1);
		// the reverse direction is a different ordered pair
		assert!(graph.add_edge(b, a).is_some());
		assert_eq!(graph.edges().len(), 2);
	}

	#[test]
	fn self_loops_are_rejected() {
		let (mut graph, a, b, c) = chain();
		for id in [a, b, c] {
			assert!(graph.add_edge(id, id).is_none());
		}
		assert!(graph.edges().is_empty());
	}

	#[test]
	fn edges_to_missing_nodes_are_rejected() {
		let (mut graph, a, b, _) = chain();
		graph.remove_node(b);
		assert!(graph.add_edge(a, b).is_none());
		assert!(graph.add_edge(NodeId(99), a).is_none());
		assert!(graph.edges().is_empty());
	}

	#[test]
	fn cycles_are_allowed() {
		let (mut graph, a, b, c) = chain();
		assert!(graph.add_edge(a, b).is_some());
		assert!(graph.add_edge(b, c).is_some());
		assert!(graph.add_edge(c, a).is_some());
		assert_eq!(graph.edges().len(), 3);
	}

	#[test]
	fn removing_a_node_cascades_only_to_its_edges() {
		let (mut graph, a, b, c) = chain();
		let d = graph.add_node(NodeType::Purchase, Point::default()).id;
		graph.add_edge(a, b);
		graph.add_edge(c, b);
		graph.add_edge(b, d);
		let kept = graph.add_edge(c, d).expect("valid edge");

		graph.remove_node(b);
		assert!(graph.node(b).is_none());
		assert_eq!(graph.edges(), &[kept]);
	}

	#[test]
	fn remove_edge_leaves_nodes() {
		let (mut graph, a, b, _) = chain();
		let edge = graph.add_edge(a, b).expect("valid edge");
		graph.remove_edge(edge.id);
		graph.remove_edge(edge.id);
		assert!(graph.edges().is_empty());
		assert_eq!(graph.nodes().len(), 3);
	}

	#[test]
	fn moving_an_absent_node_changes_nothing() {
		let (mut graph, a, b, _) = chain();
		graph.add_edge(a, b);
		let before = graph.snapshot();
		graph.move_node(NodeId(1234), Point::new(9.0, 9.0));
		assert_eq!(graph.snapshot(), before);

		graph.move_node(a, Point::new(-400.0, 1e6));
		assert_eq!(graph.node(a).map(|n| n.position), Some(Point::new(-400.0, 1e6)));
	}

	#[test]
	fn rename_updates_label() {
		let (mut graph, a, _, _) = chain();
		graph.rename_node(a, "Facebook Ads");
		assert_eq!(graph.node(a).map(|n| n.label.as_str()), Some("Facebook Ads"));
		graph.rename_node(NodeId(77), "ignored");
	}

	#[test]
	fn metric_inputs_refresh_derived_value() {
		let mut graph = GraphModel::new();
		let id = graph.add_node(NodeType::Metric, Point::default()).id;

		assert!(graph.update_metric_inputs(id, 500.0, 25_000.0));
		let data = graph.node(id).and_then(|n| n.computed).expect("metric data");
		assert_eq!((data.input_a, data.input_b), (500.0, 25_000.0));
		assert!(approx_eq!(f64, data.derived, 20.0, ulps = 2));

		assert!(graph.update_metric_inputs(id, 500.0, 0.0));
		let data = graph.node(id).and_then(|n| n.computed).expect("metric data");
		assert_eq!(data.derived, 0.0);
	}

	#[test]
	fn metric_inputs_ignore_other_node_types() {
		let (mut graph, a, _, _) = chain();
		let before = graph.snapshot();
		assert!(!graph.update_metric_inputs(a, 1.0, 1.0));
		assert!(!graph.update_metric_inputs(NodeId(500), 1.0, 1.0));
		assert_eq!(graph.snapshot(), before);
	}

	#[test]
	fn snapshot_import_repairs_invariants() {
		let snapshot = GraphSnapshot {
			nodes: vec![
				Node {
					id: NodeId(3),
					node_type: NodeType::Metric,
					position: Point::default(),
					label: "CPM".into(),
					computed: Some(MetricData {
						input_a: 500.0,
						input_b: 25_000.0,
						derived: -1.0,
					}),
				},
				Node {
					id: NodeId(7),
					node_type: NodeType::Page,
					position: Point::default(),
					label: "LP".into(),
					computed: Some(MetricData::default()),
				},
			],
			edges: vec![
				Edge { id: EdgeId(0), source: NodeId(7), target: NodeId(3) },
				Edge { id: EdgeId(1), source: NodeId(7), target: NodeId(3) },
				Edge { id: EdgeId(2), source: NodeId(3), target: NodeId(3) },
				Edge { id: EdgeId(4), source: NodeId(3), target: NodeId(9) },
			],
		};
		let mut graph = GraphModel::from_snapshot(&snapshot);

		let metric = graph.node(NodeId(3)).and_then(|n| n.computed).expect("metric data");
		assert!(approx_eq!(f64, metric.derived, 20.0, ulps = 2));
		assert_eq!(graph.node(NodeId(7)).map(|n| n.computed), Some(None));
		assert_eq!(graph.edges().len(), 1);

		let fresh = graph.add_node(NodeType::Email, Point::default());
		assert_eq!(fresh.id, NodeId(8));
	}
}
