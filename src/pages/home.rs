use leptos::prelude::*;

use crate::components::funnel_editor::{
	FunnelEditor, GraphModel, GraphSnapshot, NodePalette, NodeType, Point,
};

/// A small lead-gen funnel so the canvas does not open empty.
fn starter_funnel() -> GraphSnapshot {
	let mut graph = GraphModel::new();
	let traffic = graph.add_node(NodeType::Traffic, Point::new(40.0, 120.0)).id;
	let page = graph.add_node(NodeType::Page, Point::new(320.0, 120.0)).id;
	let checkout = graph.add_node(NodeType::Checkout, Point::new(600.0, 120.0)).id;
	let cpm = graph.add_node(NodeType::Metric, Point::new(320.0, 280.0)).id;
	graph.update_metric_inputs(cpm, 500.0, 25_000.0);

	graph.add_edge(traffic, page);
	graph.add_edge(page, checkout);
	graph.add_edge(traffic, cpm);
	graph.snapshot()
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="funnel-builder" style="display: flex; height: 100vh;">
				<NodePalette />
				<main class="funnel-builder-canvas" style="flex: 1; position: relative; overflow: hidden;">
					<FunnelEditor initial=starter_funnel() />
					<div class="graph-overlay" style="position: absolute; top: 12px; right: 16px; pointer-events: none;">
						<h1>"Funnel Builder"</h1>
						<p class="subtitle">
							"Drop steps from the sidebar. Drag a node to move it, drag from its right anchor to a left anchor to connect. Double-click to rename."
						</p>
					</div>
				</main>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use float_cmp::approx_eq;

	#[test]
	fn starter_funnel_is_connected_and_priced() {
		let snapshot = starter_funnel();
		assert_eq!(snapshot.nodes.len(), 4);
		assert_eq!(snapshot.edges.len(), 3);
		let cpm = snapshot
			.nodes
			.iter()
			.find_map(|n| n.computed)
			.expect("starter funnel has a metric node");
		assert!(approx_eq!(f64, cpm.derived, 20.0, ulps = 2));
	}
}
