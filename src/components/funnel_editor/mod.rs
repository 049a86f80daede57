//! Canvas editor for marketing funnels.
//!
//! Pointer input is resolved to a [`types::PointerTarget`] by
//! [`geometry::target_at`], fed through [`state::InteractionController`], and
//! only then applied to the [`graph::GraphModel`]. Rendering reads the
//! resulting [`state::EditorState`] once per animation frame.

mod catalog;
mod component;
mod coords;
mod geometry;
mod graph;
mod metric;
mod palette;
mod render;
mod router;
mod state;
mod types;

pub use component::FunnelEditor;
pub use graph::GraphModel;
pub use palette::NodePalette;
pub use types::{Edge, EdgeId, GraphSnapshot, MetricData, Node, NodeId, NodeType, Point};
