use std::fmt;
use std::ops::{Add, Sub};

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A 2D point or offset. Canvas-local unless stated otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Rightward.
	pub x: f64,
	/// Downward.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

/// Axis-aligned rectangle. Used both for the canvas bounding box in client
/// space and for hit regions in canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasRect {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl CanvasRect {
	pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
		Self {
			left,
			top,
			width,
			height,
		}
	}

	pub fn origin(&self) -> Point {
		Point::new(self.left, self.top)
	}

	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.left
			&& p.x <= self.left + self.width
			&& p.y >= self.top
			&& p.y <= self.top + self.height
	}
}

/// Session-unique node identifier. Shown as `node-N`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "node-{}", self.0)
	}
}

/// Session-unique edge identifier. Shown as `edge-N`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) u64);

impl fmt::Display for EdgeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "edge-{}", self.0)
	}
}

/// The closed set of funnel steps. The lowercase tag doubles as the
/// drag-and-drop payload of the node palette.
#[derive(
	Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum NodeType {
	/// Ad or referral source feeding the funnel.
	Traffic,
	/// Landing or sales page.
	Page,
	/// Video content step.
	Video,
	/// Email sequence step.
	Email,
	/// Order form.
	Checkout,
	/// Booking step.
	Calendar,
	/// Completed order.
	Purchase,
	/// CPM calculator, the only type with computed data.
	Metric,
}

impl NodeType {
	/// Lowercase tag, e.g. `"checkout"`.
	pub fn tag(self) -> &'static str {
		self.into()
	}
}

/// Error for a drop payload that names no known node type.
pub type ParseNodeTypeError = strum::ParseError;

/// Inputs and output of a computed node. `derived` is kept in sync by
/// [`GraphModel::update_metric_inputs`](super::graph::GraphModel::update_metric_inputs).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MetricData {
	/// Spend.
	pub input_a: f64,
	/// Impressions.
	pub input_b: f64,
	/// Cost per thousand impressions.
	pub derived: f64,
}

/// One funnel step on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Never reused within a session.
	pub id: NodeId,
	/// Fixed at creation.
	pub node_type: NodeType,
	/// Top-left corner in canvas space.
	pub position: Point,
	/// Display label, the catalog default until renamed.
	pub label: String,
	/// Present exactly when the node type computes a metric.
	pub computed: Option<MetricData>,
}

/// Directed connection from one node's output to another's input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	/// Never reused within a session.
	pub id: EdgeId,
	/// Node whose output anchor the edge leaves.
	pub source: NodeId,
	/// Node whose input anchor the edge enters.
	pub target: NodeId,
}

/// Which numeric field of a metric node an input region belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricField {
	Spend,
	Impressions,
}

/// The element a pointer event landed on, resolved by hit testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
	Canvas,
	Body(NodeId),
	OutputAnchor(NodeId),
	InputAnchor(NodeId),
	DeleteNode(NodeId),
	DeleteEdge(EdgeId),
	InputField(NodeId, MetricField),
}

impl PointerTarget {
	pub fn node(&self) -> Option<NodeId> {
		match *self {
			PointerTarget::Body(id)
			| PointerTarget::OutputAnchor(id)
			| PointerTarget::InputAnchor(id)
			| PointerTarget::DeleteNode(id)
			| PointerTarget::InputField(id, _) => Some(id),
			PointerTarget::Canvas | PointerTarget::DeleteEdge(_) => None,
		}
	}
}

/// Plain `{nodes, edges}` view handed to rendering and to whoever seeds the
/// editor with starter content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphSnapshot {
	/// Nodes in paint order, bottom first.
	pub nodes: Vec<Node>,
	/// Edges in creation order.
	pub edges: Vec<Edge>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use strum::IntoEnumIterator;

	#[test]
	fn node_type_tags_round_trip_through_parse() {
		for ty in NodeType::iter() {
			assert_eq!(ty.tag().parse::<NodeType>(), Ok(ty));
		}
		assert_eq!(NodeType::Checkout.tag(), "checkout");
		assert_eq!(NodeType::Metric.to_string(), "metric");
		assert!("webinar".parse::<NodeType>().is_err());
	}

	#[test]
	fn rect_contains_its_edges() {
		let rect = CanvasRect::new(10.0, 20.0, 100.0, 50.0);
		assert!(rect.contains(Point::new(10.0, 20.0)));
		assert!(rect.contains(Point::new(110.0, 70.0)));
		assert!(!rect.contains(Point::new(9.9, 40.0)));
		assert!(!rect.contains(Point::new(50.0, 70.1)));
	}
}
