use super::types::NodeType;

/// Everything the view needs to draw a node of a given type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeVisual {
	pub icon: &'static str,
	pub primary_color: &'static str,
	pub background_tint: &'static str,
	pub default_label: &'static str,
	pub has_computed_data: bool,
}

const fn plain(
	icon: &'static str,
	primary_color: &'static str,
	background_tint: &'static str,
	default_label: &'static str,
) -> NodeVisual {
	NodeVisual {
		icon,
		primary_color,
		background_tint,
		default_label,
		has_computed_data: false,
	}
}

pub fn describe(node_type: NodeType) -> NodeVisual {
	match node_type {
		NodeType::Traffic => plain("📣", "#3b82f6", "rgba(59, 130, 246, 0.12)", "Traffic Source"),
		NodeType::Page => plain("📄", "#8b5cf6", "rgba(139, 92, 246, 0.12)", "Landing Page"),
		NodeType::Video => plain("🎬", "#ec4899", "rgba(236, 72, 153, 0.12)", "Video Sales Letter"),
		NodeType::Email => plain("✉", "#f59e0b", "rgba(245, 158, 11, 0.12)", "Email Sequence"),
		NodeType::Checkout => plain("🛒", "#10b981", "rgba(16, 185, 129, 0.12)", "Checkout"),
		NodeType::Calendar => plain("📅", "#06b6d4", "rgba(6, 182, 212, 0.12)", "Booking Calendar"),
		NodeType::Purchase => plain("💳", "#22c55e", "rgba(34, 197, 94, 0.12)", "Purchase"),
		NodeType::Metric => NodeVisual {
			has_computed_data: true,
			..plain("🧮", "#f97316", "rgba(249, 115, 22, 0.12)", "CPM Calculator")
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use strum::IntoEnumIterator;

	#[test]
	fn only_metric_nodes_carry_computed_data() {
		for ty in NodeType::iter() {
			assert_eq!(describe(ty).has_computed_data, ty == NodeType::Metric, "{ty}");
		}
	}

	#[test]
	fn every_type_has_a_label_and_colors() {
		for ty in NodeType::iter() {
			let visual = describe(ty);
			assert!(!visual.default_label.is_empty());
			assert!(visual.primary_color.starts_with('#'));
			assert!(visual.background_tint.starts_with("rgba("));
		}
	}
}
