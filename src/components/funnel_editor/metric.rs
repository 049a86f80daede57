/// Impressions are quoted per thousand.
const PER_MILLE: f64 = 1000.0;

/// Cost per thousand impressions. Zero (or otherwise unusable) impressions
/// yield `0.0` so the node always has something to display.
pub fn recompute(spend: f64, impressions: f64) -> f64 {
	if impressions > 0.0 && impressions.is_finite() {
		spend / impressions * PER_MILLE
	} else {
		0.0
	}
}

pub fn format_cpm(derived: f64) -> String {
	format!("${:.2}", derived)
}

#[cfg(test)]
mod tests {
	use super::*;
	use float_cmp::approx_eq;

	#[test]
	fn cpm_of_known_campaign() {
		assert!(approx_eq!(f64, recompute(500.0, 25_000.0), 20.0, ulps = 2));
		assert_eq!(format_cpm(recompute(500.0, 25_000.0)), "$20.00");
	}

	#[test]
	fn zero_impressions_is_zero_not_infinite() {
		assert_eq!(recompute(500.0, 0.0), 0.0);
		assert_eq!(recompute(0.0, 0.0), 0.0);
		assert_eq!(recompute(10.0, -5.0), 0.0);
		assert_eq!(recompute(10.0, f64::NAN), 0.0);
	}

	#[test]
	fn only_impressions_are_guarded() {
		assert!(approx_eq!(f64, recompute(-50.0, 10_000.0), -5.0, ulps = 2));
		assert!(recompute(f64::INFINITY, 1_000.0).is_infinite());
	}

	#[test]
	fn fractional_cpm_rounds_for_display() {
		assert_eq!(format_cpm(recompute(1.0, 3.0)), "$333.33");
	}
}
