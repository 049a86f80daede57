use super::geometry;
use super::graph::GraphModel;
use super::types::{Edge, Point};

/// Horizontal reach of each control point from its anchor.
pub const CONTROL_OFFSET: f64 = 80.0;

/// A cubic bezier connector in canvas space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierPath {
	pub from: Point,
	pub c1: Point,
	pub c2: Point,
	pub to: Point,
}

impl BezierPath {
	pub fn at(&self, t: f64) -> Point {
		let u = 1.0 - t;
		let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
		Point::new(
			a * self.from.x + b * self.c1.x + c * self.c2.x + d * self.to.x,
			a * self.from.y + b * self.c1.y + c * self.c2.y + d * self.to.y,
		)
	}

	pub fn midpoint(&self) -> Point {
		self.at(0.5)
	}
}

/// S-curve for left-to-right flow: leave the source heading right, enter
/// the target heading right.
pub fn path(source_anchor: Point, target_anchor: Point) -> BezierPath {
	BezierPath {
		from: source_anchor,
		c1: source_anchor + Point::new(CONTROL_OFFSET, 0.0),
		c2: target_anchor - Point::new(CONTROL_OFFSET, 0.0),
		to: target_anchor,
	}
}

/// Connector for a committed edge, or `None` if an endpoint is missing.
pub fn edge_path(graph: &GraphModel, edge: &Edge) -> Option<BezierPath> {
	let source = graph.node(edge.source)?;
	let target = graph.node(edge.target)?;
	Some(path(
		geometry::output_anchor(source),
		geometry::input_anchor(target),
	))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::funnel_editor::types::NodeType;

	#[test]
	fn control_points_extend_horizontally() {
		let p = path(Point::new(230.0, 182.0), Point::new(350.0, 260.0));
		assert_eq!(p.c1, Point::new(310.0, 182.0));
		assert_eq!(p.c2, Point::new(270.0, 260.0));
		assert_eq!(p.at(0.0), p.from);
		assert_eq!(p.at(1.0), p.to);
	}

	#[test]
	fn midpoint_of_symmetric_curve_is_centre() {
		let p = path(Point::new(0.0, 0.0), Point::new(200.0, 100.0));
		assert_eq!(p.midpoint(), Point::new(100.0, 50.0));
	}

	#[test]
	fn edge_path_uses_node_anchors() {
		let mut graph = GraphModel::new();
		let a = graph.add_node(NodeType::Traffic, Point::new(50.0, 150.0));
		let b = graph.add_node(NodeType::Metric, Point::new(350.0, 150.0));
		let edge = graph.add_edge(a.id, b.id).expect("valid edge");

		let p = edge_path(&graph, &edge).expect("both ends exist");
		assert_eq!(p.from, geometry::output_anchor(&a));
		assert_eq!(p.to, geometry::input_anchor(&b));

		graph.remove_node(b.id);
		assert!(edge_path(&graph, &edge).is_none());
	}
}
