use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, trace, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, DragEvent, HtmlCanvasElement, MouseEvent, PointerEvent, Window,
};

use super::coords;
use super::geometry;
use super::palette::DRAG_MIME;
use super::render;
use super::state::EditorState;
use super::types::{CanvasRect, GraphSnapshot, MetricField, NodeId, Point, PointerTarget};

const FRAME_DT: f64 = 0.016;

type Session = RwSignal<EditorState, LocalStorage>;

/// Pointer position in canvas space. The bounding rect is read on every
/// call since scrolling and resizing move it between events.
fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	let rect = canvas.get_bounding_client_rect();
	coords::to_canvas_point(
		Point::new(ev.client_x() as f64, ev.client_y() as f64),
		&CanvasRect::new(rect.left(), rect.top(), rect.width(), rect.height()),
	)
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Canvas editor for one funnel. Accepts node drops from a [`NodePalette`](super::NodePalette).
#[component]
pub fn FunnelEditor(
	/// Starter content, repaired on import.
	#[prop(optional)]
	initial: GraphSnapshot,
	/// Size the canvas to the window instead of its container.
	#[prop(default = false)]
	fullscreen: bool,
	/// Fixed canvas width in CSS pixels.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed canvas height in CSS pixels.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let session: Session = RwSignal::new_local(EditorState::new(&initial, 0.0, 0.0));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("funnel editor mounted without a window");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		session.update_untracked(|s| s.resize(w, h));

		let Some(ctx) = context_2d(&canvas) else {
			error!("canvas has no 2d context");
			return;
		};

		if fullscreen {
			let canvas_resize = canvas.clone();
			*resize_cb.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				session.update_untracked(|s| s.resize(nw, nh));
			}));
			if let Some(ref cb) = *resize_cb.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let animate_inner = animate.clone();
		*animate.borrow_mut() = Some(Closure::new(move || {
			session.update_untracked(|s| s.tick(FRAME_DT));
			session.with_untracked(|s| render::render(s, &ctx));
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let on_pointerdown = move |ev: PointerEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let at = canvas_point(&canvas, &ev);
		let Some(outcome) = session.try_update(|s| s.pointer_down(at)) else {
			return;
		};
		trace!("pointer down at ({}, {}): {outcome:?}", at.x, at.y);
		if outcome.begins_gesture() {
			ev.prevent_default();
			// keep receiving moves and the release even off the canvas
			let _ = canvas.set_pointer_capture(ev.pointer_id());
		}
	};

	let on_pointermove = move |ev: PointerEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let at = canvas_point(&canvas, &ev);
		session.update(|s| {
			s.pointer_move(at);
		});
	};

	let on_pointerup = move |ev: PointerEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let at = canvas_point(&canvas, &ev);
		if let Some(outcome) = session.try_update(|s| s.pointer_up(at)) {
			trace!("pointer up at ({}, {}): {outcome:?}", at.x, at.y);
		}
	};

	let on_pointercancel = move |_: PointerEvent| {
		if let Some(outcome) = session.try_update(|s| s.pointer_cancel()) {
			trace!("pointer cancelled: {outcome:?}");
		}
	};

	let on_pointerleave = move |_: PointerEvent| {
		session.update(|s| {
			if s.controller.is_idle() {
				s.set_hover(None);
			}
		});
	};

	let on_dblclick = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let at = canvas_point(&canvas, &ev);
		let Some((id, label)) = session.with_untracked(|s| match s.target_at(at) {
			PointerTarget::Body(id) => s.graph.node(id).map(|n| (id, n.label.clone())),
			_ => None,
		}) else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Ok(Some(renamed)) = window.prompt_with_message_and_default("Rename step", &label) {
			let renamed = renamed.trim();
			if !renamed.is_empty() {
				session.update(|s| s.graph.rename_node(id, renamed));
			}
		}
	};

	let on_dragover = move |ev: DragEvent| {
		// required for the canvas to accept drops
		ev.prevent_default();
	};

	let on_drop = move |ev: DragEvent| {
		ev.prevent_default();
		let Some(tag) = ev
			.data_transfer()
			.and_then(|transfer| transfer.get_data(DRAG_MIME).ok())
		else {
			return;
		};
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let at = canvas_point(&canvas, &ev);
		if let Some(Err(err)) = session.try_update(|s| s.drop_tag(&tag, at)) {
			warn!("ignoring drop of {tag:?}: {err}");
		}
	};

	let metric_nodes = move || session.with(|s| s.metric_nodes());
	// touch-action: none keeps touch drags from turning into page pans
	let canvas_style = move || {
		format!(
			"display: block; touch-action: none; cursor: {};",
			session.with(|s| s.cursor())
		)
	};

	view! {
		<div class="funnel-editor" style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="funnel-editor-canvas"
				on:pointerdown=on_pointerdown
				on:pointermove=on_pointermove
				on:pointerup=on_pointerup
				on:pointercancel=on_pointercancel
				on:pointerleave=on_pointerleave
				on:dblclick=on_dblclick
				on:dragover=on_dragover
				on:drop=on_drop
				style=canvas_style
			/>
			<For
				each=metric_nodes
				key=|id| *id
				children=move |id| {
					(
						metric_input(session, id, MetricField::Spend),
						metric_input(session, id, MetricField::Impressions),
					)
				}
			/>
		</div>
	}
}

/// Numeric field laid over the region the canvas reserves for it. Edits
/// recompute the node's CPM on every keystroke.
fn metric_input(session: Session, id: NodeId, field: MetricField) -> impl IntoView {
	let initial = session
		.with_untracked(|s| s.graph.node(id).and_then(|n| n.computed))
		.map(|data| match field {
			MetricField::Spend => data.input_a,
			MetricField::Impressions => data.input_b,
		})
		.unwrap_or_default();

	let style = move || {
		session
			.with(|s| s.graph.node(id).and_then(|n| geometry::input_field(n, field)))
			.map(|r| {
				format!(
					"position: absolute; left: {}px; top: {}px; width: {}px; height: {}px;",
					r.left, r.top, r.width, r.height
				)
			})
			.unwrap_or_else(|| "display: none;".to_owned())
	};

	view! {
		<input
			type="number"
			min="0"
			step="any"
			class="funnel-metric-input"
			value=initial.to_string()
			style=style
			on:input=move |ev| {
				let value = event_target_value(&ev).trim().parse::<f64>().unwrap_or(0.0);
				session.update(|s| {
					s.set_metric_field(id, field, value);
				});
			}
			on:pointerdown=|ev: PointerEvent| ev.stop_propagation()
		/>
	}
}
