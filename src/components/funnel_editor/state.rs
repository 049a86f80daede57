use log::{debug, trace};

use super::geometry;
use super::graph::GraphModel;
use super::router::{self, BezierPath};
use super::types::{
	Edge, EdgeId, GraphSnapshot, MetricField, Node, NodeId, NodeType, ParseNodeTypeError,
	Point, PointerTarget,
};

/// The single pointer gesture in progress, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
	#[default]
	Idle,
	DraggingNode {
		node: NodeId,
		/// Pointer position relative to the node's top-left when grabbed.
		pointer_offset: Point,
	},
	ConnectingEdge {
		source: NodeId,
		pointer: Point,
	},
}

/// What a pointer event did to the session.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
	Ignored,
	DragStarted(NodeId),
	ConnectStarted(NodeId),
	Moved,
	Released,
	Connected(Edge),
	ConnectionDiscarded,
	NodeAdded(Node),
	NodeDeleted(NodeId),
	EdgeDeleted(EdgeId),
}

impl Outcome {
	/// Whether the view should capture the pointer so the release is
	/// delivered even if it happens off the canvas.
	pub fn begins_gesture(&self) -> bool {
		matches!(self, Outcome::DragStarted(_) | Outcome::ConnectStarted(_))
	}

	pub fn changed_graph(&self) -> bool {
		matches!(
			self,
			Outcome::Moved
				| Outcome::Connected(_)
				| Outcome::NodeAdded(_)
				| Outcome::NodeDeleted(_)
				| Outcome::EdgeDeleted(_)
		)
	}
}

/// Gesture state machine. The only thing that mutates a [`GraphModel`] in
/// response to pointer input; the model is passed in rather than owned so
/// both can be inspected independently.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
	gesture: Gesture,
}

impl InteractionController {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn gesture(&self) -> Gesture {
		self.gesture
	}

	pub fn is_idle(&self) -> bool {
		self.gesture == Gesture::Idle
	}

	pub fn pointer_down(
		&mut self,
		graph: &mut GraphModel,
		target: PointerTarget,
		at: Point,
	) -> Outcome {
		if !self.is_idle() {
			trace!("pointer down on {target:?} ignored during {:?}", self.gesture);
			return Outcome::Ignored;
		}
		match target {
			PointerTarget::DeleteNode(id) => {
				graph.remove_node(id);
				Outcome::NodeDeleted(id)
			}
			PointerTarget::DeleteEdge(id) => {
				graph.remove_edge(id);
				Outcome::EdgeDeleted(id)
			}
			PointerTarget::OutputAnchor(source) if graph.node(source).is_some() => {
				self.gesture = Gesture::ConnectingEdge {
					source,
					pointer: at,
				};
				debug!("connect from {source}");
				Outcome::ConnectStarted(source)
			}
			PointerTarget::Body(id) => {
				let Some(node) = graph.node(id) else {
					return Outcome::Ignored;
				};
				self.gesture = Gesture::DraggingNode {
					node: id,
					pointer_offset: at - node.position,
				};
				Outcome::DragStarted(id)
			}
			PointerTarget::InputField(..)
			| PointerTarget::InputAnchor(_)
			| PointerTarget::OutputAnchor(_)
			| PointerTarget::Canvas => Outcome::Ignored,
		}
	}

	pub fn pointer_move(&mut self, graph: &mut GraphModel, at: Point) -> Outcome {
		match &mut self.gesture {
			Gesture::Idle => Outcome::Ignored,
			Gesture::DraggingNode {
				node,
				pointer_offset,
			} => {
				graph.move_node(*node, at - *pointer_offset);
				Outcome::Moved
			}
			Gesture::ConnectingEdge { pointer, .. } => {
				*pointer = at;
				Outcome::Ignored
			}
		}
	}

	pub fn pointer_up(&mut self, graph: &mut GraphModel, target: PointerTarget) -> Outcome {
		match std::mem::take(&mut self.gesture) {
			Gesture::Idle => Outcome::Ignored,
			Gesture::DraggingNode { .. } => Outcome::Released,
			Gesture::ConnectingEdge { source, .. } => {
				let edge = match target {
					PointerTarget::InputAnchor(target) => graph.add_edge(source, target),
					_ => None,
				};
				match edge {
					Some(edge) => Outcome::Connected(edge),
					None => {
						debug!("connection from {source} discarded on {target:?}");
						Outcome::ConnectionDiscarded
					}
				}
			}
		}
	}

	/// Place a palette item dropped at a canvas point. Only honoured while
	/// no gesture is active.
	pub fn drop_node(&mut self, graph: &mut GraphModel, node_type: NodeType, at: Point) -> Outcome {
		if !self.is_idle() {
			return Outcome::Ignored;
		}
		Outcome::NodeAdded(graph.add_node(node_type, at))
	}

	/// The uncommitted connector that follows the pointer while connecting.
	pub fn preview(&self, graph: &GraphModel) -> Option<BezierPath> {
		let Gesture::ConnectingEdge { source, pointer } = self.gesture else {
			return None;
		};
		let node = graph.node(source)?;
		Some(router::path(geometry::output_anchor(node), pointer))
	}
}

/// One editor session: the graph, the gesture in progress and the view
/// state the canvas needs between frames.
pub struct EditorState {
	pub graph: GraphModel,
	pub controller: InteractionController,
	pub hover: Option<PointerTarget>,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

impl EditorState {
	pub fn new(initial: &GraphSnapshot, width: f64, height: f64) -> Self {
		Self {
			graph: GraphModel::from_snapshot(initial),
			controller: InteractionController::new(),
			hover: None,
			width,
			height,
			flow_time: 0.0,
		}
	}

	pub fn target_at(&self, at: Point) -> PointerTarget {
		geometry::target_at(&self.graph, at)
	}

	pub fn pointer_down(&mut self, at: Point) -> Outcome {
		let target = self.target_at(at);
		let outcome = self.controller.pointer_down(&mut self.graph, target, at);
		if outcome.changed_graph() {
			self.hover = None;
		}
		outcome
	}

	pub fn pointer_move(&mut self, at: Point) -> Outcome {
		if self.controller.is_idle() {
			let target = self.target_at(at);
			self.set_hover(Some(target).filter(|t| *t != PointerTarget::Canvas));
		}
		self.controller.pointer_move(&mut self.graph, at)
	}

	pub fn pointer_up(&mut self, at: Point) -> Outcome {
		let target = match self.controller.gesture() {
			Gesture::ConnectingEdge { .. } => geometry::input_anchor_at(&self.graph, at)
				.map_or(PointerTarget::Canvas, PointerTarget::InputAnchor),
			_ => self.target_at(at),
		};
		self.controller.pointer_up(&mut self.graph, target)
	}

	/// The browser took the pointer away (touch pan, pen leaving range).
	/// Ends the gesture as a release over empty canvas.
	pub fn pointer_cancel(&mut self) -> Outcome {
		self.controller.pointer_up(&mut self.graph, PointerTarget::Canvas)
	}

	/// Handle a palette drop carrying a node type tag.
	pub fn drop_tag(&mut self, tag: &str, at: Point) -> Result<Outcome, ParseNodeTypeError> {
		let node_type = tag.parse::<NodeType>()?;
		Ok(self.controller.drop_node(&mut self.graph, node_type, at))
	}

	/// Apply an edit from one of a metric node's input fields, keeping the
	/// other input as it was.
	pub fn set_metric_field(&mut self, id: NodeId, field: MetricField, value: f64) -> bool {
		let Some(data) = self.graph.node(id).and_then(|n| n.computed) else {
			return false;
		};
		let (spend, impressions) = match field {
			MetricField::Spend => (value, data.input_b),
			MetricField::Impressions => (data.input_a, value),
		};
		self.graph.update_metric_inputs(id, spend, impressions)
	}

	pub fn metric_nodes(&self) -> Vec<NodeId> {
		self.graph
			.nodes()
			.iter()
			.filter(|n| n.computed.is_some())
			.map(|n| n.id)
			.collect()
	}

	/// Returns whether the hovered target changed.
	pub fn set_hover(&mut self, target: Option<PointerTarget>) -> bool {
		if self.hover == target {
			return false;
		}
		self.hover = target;
		true
	}

	pub fn hovered_node(&self) -> Option<NodeId> {
		self.hover.and_then(|t| t.node())
	}

	/// Edges touching the hovered node are drawn emphasised.
	pub fn is_highlighted(&self, edge: &Edge) -> bool {
		self.hovered_node()
			.is_some_and(|id| edge.source == id || edge.target == id)
	}

	pub fn cursor(&self) -> &'static str {
		match (self.controller.gesture(), self.hover) {
			(Gesture::DraggingNode { .. }, _) => "grabbing",
			(Gesture::ConnectingEdge { .. }, _) => "crosshair",
			(_, Some(PointerTarget::Body(_))) => "grab",
			(_, Some(PointerTarget::OutputAnchor(_) | PointerTarget::InputAnchor(_))) => {
				"crosshair"
			}
			(_, Some(PointerTarget::DeleteNode(_) | PointerTarget::DeleteEdge(_))) => "pointer",
			(_, Some(PointerTarget::InputField(..))) => "text",
			_ => "default",
		}
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
