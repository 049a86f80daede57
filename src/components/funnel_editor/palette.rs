use leptos::prelude::*;
use log::warn;
use strum::IntoEnumIterator;
use web_sys::DragEvent;

use super::catalog;
use super::types::NodeType;

/// Data-transfer type carrying a [`NodeType`] tag from the palette to the
/// canvas.
pub(crate) const DRAG_MIME: &str = "application/x-funnel-node";

/// Sidebar listing every node type; items are dragged onto the editor canvas.
#[component]
pub fn NodePalette() -> impl IntoView {
	let items = NodeType::iter()
		.map(|node_type| {
			let visual = catalog::describe(node_type);
			let on_dragstart = move |ev: DragEvent| {
				let Some(transfer) = ev.data_transfer() else {
					return;
				};
				if transfer.set_data(DRAG_MIME, node_type.tag()).is_err() {
					warn!("could not start drag for {node_type}");
					return;
				}
				transfer.set_effect_allowed("copy");
			};
			let style = format!(
				"border-left: 4px solid {}; background: {};",
				visual.primary_color, visual.background_tint
			);

			view! {
				<li class="node-palette-item" draggable="true" style=style on:dragstart=on_dragstart>
					<span class="node-palette-icon">{visual.icon}</span>
					<span class="node-palette-label">{visual.default_label}</span>
				</li>
			}
		})
		.collect_view();

	view! {
		<aside class="node-palette">
			<h2>"Funnel steps"</h2>
			<ul>{items}</ul>
		</aside>
	}
}
