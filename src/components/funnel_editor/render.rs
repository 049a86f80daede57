use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::catalog;
use super::geometry::{self, ANCHOR_RADIUS, EDGE_DELETE_RADIUS};
use super::metric;
use super::router::{self, BezierPath};
use super::state::EditorState;
use super::types::{Edge, MetricField, Node, PointerTarget};

const BACKGROUND: &str = "#0f172a";
const GRID_DOT: &str = "rgba(148, 163, 184, 0.15)";
const GRID_SPACING: f64 = 24.0;
const EDGE_RGB: &str = "100, 180, 255";

pub fn render(state: &EditorState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_grid(state, ctx);
	for edge in state.graph.edges() {
		draw_edge(state, edge, ctx);
	}
	if let Some(preview) = state.controller.preview(&state.graph) {
		draw_preview(&preview, ctx);
	}
	for node in state.graph.nodes() {
		draw_node(state, node, ctx);
	}
}

fn draw_grid(state: &EditorState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(GRID_DOT);
	let mut x = GRID_SPACING;
	while x < state.width {
		let mut y = GRID_SPACING;
		while y < state.height {
			ctx.fill_rect(x - 1.0, y - 1.0, 2.0, 2.0);
			y += GRID_SPACING;
		}
		x += GRID_SPACING;
	}
}

fn trace_curve(path: &BezierPath, ctx: &CanvasRenderingContext2d) {
	ctx.begin_path();
	ctx.move_to(path.from.x, path.from.y);
	ctx.bezier_curve_to(
		path.c1.x, path.c1.y, path.c2.x, path.c2.y, path.to.x, path.to.y,
	);
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: f64, gap: f64) {
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(dash),
		&JsValue::from_f64(gap),
	));
}

fn clear_dash(ctx: &CanvasRenderingContext2d) {
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_edge(state: &EditorState, edge: &Edge, ctx: &CanvasRenderingContext2d) {
	let Some(path) = router::edge_path(&state.graph, edge) else {
		return;
	};
	let (dash, gap) = (8.0, 4.0);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);

	// Edges touching the hovered node brighten, the rest keep base alpha.
	let (alpha, width) = if state.is_highlighted(edge) {
		(0.95, 2.5)
	} else {
		(0.6, 1.75)
	};

	ctx.set_stroke_style_str(&format!("rgba({EDGE_RGB}, {alpha})"));
	ctx.set_line_width(width);
	set_dash(ctx, dash, gap);
	ctx.set_line_dash_offset(dash_offset);
	trace_curve(&path, ctx);
	ctx.stroke();
	clear_dash(ctx);

	let mid = path.midpoint();
	let hovered = state.hover == Some(PointerTarget::DeleteEdge(edge.id));
	ctx.begin_path();
	let _ = ctx.arc(mid.x, mid.y, EDGE_DELETE_RADIUS, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(if hovered { "#ef4444" } else { "#1e293b" });
	ctx.fill();
	ctx.set_stroke_style_str(&format!("rgba({EDGE_RGB}, {alpha})"));
	ctx.set_line_width(1.0);
	ctx.stroke();
	draw_cross(ctx, mid.x, mid.y, EDGE_DELETE_RADIUS * 0.45, "white");
}

fn draw_preview(path: &BezierPath, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(&format!("rgba({EDGE_RGB}, 0.9)"));
	ctx.set_line_width(2.0);
	set_dash(ctx, 6.0, 6.0);
	ctx.set_line_dash_offset(0.0);
	trace_curve(path, ctx);
	ctx.stroke();
	clear_dash(ctx);

	ctx.begin_path();
	let _ = ctx.arc(path.to.x, path.to.y, ANCHOR_RADIUS, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&format!("rgba({EDGE_RGB}, 0.9)"));
	ctx.fill();
}

fn draw_cross(ctx: &CanvasRenderingContext2d, cx: f64, cy: f64, r: f64, color: &str) {
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(1.5);
	ctx.begin_path();
	ctx.move_to(cx - r, cy - r);
	ctx.line_to(cx + r, cy + r);
	ctx.move_to(cx + r, cy - r);
	ctx.line_to(cx - r, cy + r);
	ctx.stroke();
}

fn draw_node(state: &EditorState, node: &Node, ctx: &CanvasRenderingContext2d) {
	let visual = catalog::describe(node.node_type);
	let rect = geometry::bounds(node);
	let hovered = state.hovered_node() == Some(node.id);

	ctx.set_fill_style_str("#111827");
	ctx.fill_rect(rect.left, rect.top, rect.width, rect.height);
	ctx.set_fill_style_str(visual.background_tint);
	ctx.fill_rect(rect.left, rect.top, rect.width, rect.height);
	ctx.set_fill_style_str(visual.primary_color);
	ctx.fill_rect(rect.left, rect.top, 4.0, rect.height);
	ctx.set_stroke_style_str(visual.primary_color);
	ctx.set_line_width(if hovered { 2.0 } else { 1.0 });
	ctx.stroke_rect(rect.left, rect.top, rect.width, rect.height);

	ctx.set_text_baseline("middle");
	ctx.set_text_align("left");
	ctx.set_font("16px sans-serif");
	ctx.set_fill_style_str("white");
	let _ = ctx.fill_text(visual.icon, rect.left + 14.0, rect.top + 22.0);
	ctx.set_font("600 13px sans-serif");
	let _ = ctx.fill_text(&node.label, rect.left + 40.0, rect.top + 22.0);
	ctx.set_font("11px sans-serif");
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.55)");
	let _ = ctx.fill_text(node.node_type.tag(), rect.left + 40.0, rect.top + 42.0);

	if let Some(data) = node.computed {
		for (field, caption) in [
			(MetricField::Spend, "Spend ($)"),
			(MetricField::Impressions, "Impressions"),
		] {
			if let Some(r) = geometry::input_field(node, field) {
				ctx.set_stroke_style_str("rgba(255, 255, 255, 0.25)");
				ctx.set_line_width(1.0);
				ctx.stroke_rect(r.left, r.top, r.width, r.height);
				ctx.set_font("10px sans-serif");
				ctx.set_fill_style_str("rgba(255, 255, 255, 0.55)");
				let _ = ctx.fill_text(caption, r.left, r.top - 7.0);
			}
		}
		ctx.set_font("600 14px sans-serif");
		ctx.set_fill_style_str(visual.primary_color);
		let _ = ctx.fill_text(
			&format!("CPM {}", metric::format_cpm(data.derived)),
			rect.left + 14.0,
			rect.top + rect.height - 18.0,
		);
	}

	let delete = geometry::delete_control(node);
	let delete_hovered = state.hover == Some(PointerTarget::DeleteNode(node.id));
	if hovered {
		if delete_hovered {
			ctx.set_fill_style_str("#ef4444");
			ctx.fill_rect(delete.left, delete.top, delete.width, delete.height);
		}
		draw_cross(
			ctx,
			delete.left + delete.width / 2.0,
			delete.top + delete.height / 2.0,
			delete.width * 0.25,
			"white",
		);
	}

	for (anchor, target) in [
		(
			geometry::input_anchor(node),
			PointerTarget::InputAnchor(node.id),
		),
		(
			geometry::output_anchor(node),
			PointerTarget::OutputAnchor(node.id),
		),
	] {
		let radius = if state.hover == Some(target) {
			ANCHOR_RADIUS * 1.4
		} else {
			ANCHOR_RADIUS
		};
		ctx.begin_path();
		let _ = ctx.arc(anchor.x, anchor.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(BACKGROUND);
		ctx.fill();
		ctx.set_stroke_style_str(visual.primary_color);
		ctx.set_line_width(2.0);
		ctx.stroke();
	}
}
