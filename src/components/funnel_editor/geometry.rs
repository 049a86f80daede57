use super::graph::GraphModel;
use super::router;
use super::types::{CanvasRect, MetricField, Node, NodeId, NodeType, Point, PointerTarget};

pub const NODE_WIDTH: f64 = 180.0;
pub const NODE_HEIGHT: f64 = 64.0;
/// Metric nodes are wider and taller to fit two input fields and a result.
pub const METRIC_NODE_WIDTH: f64 = 240.0;
pub const METRIC_NODE_HEIGHT: f64 = 124.0;
/// Vertical distance from the node's top edge to both anchors.
pub const ANCHOR_Y_OFFSET: f64 = 32.0;
pub const ANCHOR_RADIUS: f64 = 6.0;
/// Anchors are small; accept presses slightly outside the drawn circle.
pub const ANCHOR_HIT_RADIUS: f64 = 11.0;
pub const DELETE_SIZE: f64 = 16.0;
pub const EDGE_DELETE_RADIUS: f64 = 8.0;

const DELETE_INSET: f64 = 6.0;
const FIELD_TOP: f64 = 58.0;
const FIELD_HEIGHT: f64 = 26.0;
const FIELD_INSET: f64 = 12.0;
const FIELD_GAP: f64 = 12.0;

pub fn node_size(node_type: NodeType) -> (f64, f64) {
	match node_type {
		NodeType::Metric => (METRIC_NODE_WIDTH, METRIC_NODE_HEIGHT),
		_ => (NODE_WIDTH, NODE_HEIGHT),
	}
}

pub fn bounds(node: &Node) -> CanvasRect {
	let (w, h) = node_size(node.node_type);
	CanvasRect::new(node.position.x, node.position.y, w, h)
}

pub fn output_anchor(node: &Node) -> Point {
	let (w, _) = node_size(node.node_type);
	node.position + Point::new(w, ANCHOR_Y_OFFSET)
}

pub fn input_anchor(node: &Node) -> Point {
	node.position + Point::new(0.0, ANCHOR_Y_OFFSET)
}

pub fn delete_control(node: &Node) -> CanvasRect {
	let (w, _) = node_size(node.node_type);
	CanvasRect::new(
		node.position.x + w - DELETE_INSET - DELETE_SIZE,
		node.position.y + DELETE_INSET,
		DELETE_SIZE,
		DELETE_SIZE,
	)
}

/// Region of an embedded numeric input. Only metric nodes have these.
pub fn input_field(node: &Node, field: MetricField) -> Option<CanvasRect> {
	if node.computed.is_none() {
		return None;
	}
	let (w, _) = node_size(node.node_type);
	let field_width = (w - 2.0 * FIELD_INSET - FIELD_GAP) / 2.0;
	let left = match field {
		MetricField::Spend => FIELD_INSET,
		MetricField::Impressions => FIELD_INSET + field_width + FIELD_GAP,
	};
	Some(CanvasRect::new(
		node.position.x + left,
		node.position.y + FIELD_TOP,
		field_width,
		FIELD_HEIGHT,
	))
}

/// Node whose input anchor is under `p`, ignoring everything else. Used
/// when a connection is released, where an input anchor must win over an
/// abutting node's output anchor.
pub fn input_anchor_at(graph: &GraphModel, p: Point) -> Option<NodeId> {
	graph
		.nodes()
		.iter()
		.rev()
		.find(|node| input_anchor(node).distance(p) <= ANCHOR_HIT_RADIUS)
		.map(|node| node.id)
}

/// Resolve what sits under a canvas point.
///
/// Nodes drawn later are on top, so they are searched last-to-first. Within a
/// node, controls win over the body. Edge delete controls are checked after
/// nodes since nodes are painted over edges.
pub fn target_at(graph: &GraphModel, p: Point) -> PointerTarget {
	for node in graph.nodes().iter().rev() {
		if output_anchor(node).distance(p) <= ANCHOR_HIT_RADIUS {
			return PointerTarget::OutputAnchor(node.id);
		}
		if input_anchor(node).distance(p) <= ANCHOR_HIT_RADIUS {
			return PointerTarget::InputAnchor(node.id);
		}
		if !bounds(node).contains(p) {
			continue;
		}
		if delete_control(node).contains(p) {
			return PointerTarget::DeleteNode(node.id);
		}
		for field in [MetricField::Spend, MetricField::Impressions] {
			if input_field(node, field).is_some_and(|r| r.contains(p)) {
				return PointerTarget::InputField(node.id, field);
			}
		}
		return PointerTarget::Body(node.id);
	}

	for edge in graph.edges().iter().rev() {
		if let Some(path) = router::edge_path(graph, edge) {
			if path.midpoint().distance(p) <= EDGE_DELETE_RADIUS {
				return PointerTarget::DeleteEdge(edge.id);
			}
		}
	}
	PointerTarget::Canvas
}
