use super::types::{CanvasRect, Point};

/// Map a client-space pointer position into canvas-local space.
///
/// `canvas_rect` must be the bounding rectangle read during the same event;
/// scrolling or resizing moves it between frames.
pub fn to_canvas_point(client: Point, canvas_rect: &CanvasRect) -> Point {
	client - canvas_rect.origin()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn subtracts_canvas_origin() {
		let rect = CanvasRect::new(240.0, 64.0, 800.0, 600.0);
		assert_eq!(
			to_canvas_point(Point::new(290.0, 214.0), &rect),
			Point::new(50.0, 150.0)
		);
	}

	#[test]
	fn follows_the_rect_after_a_scroll() {
		let client = Point::new(300.0, 300.0);
		let before = CanvasRect::new(0.0, 100.0, 800.0, 600.0);
		let after = CanvasRect::new(0.0, -50.0, 800.0, 600.0);
		assert_eq!(to_canvas_point(client, &before), Point::new(300.0, 200.0));
		assert_eq!(to_canvas_point(client, &after), Point::new(300.0, 350.0));
	}

	#[test]
	fn points_left_of_the_canvas_go_negative() {
		let rect = CanvasRect::new(100.0, 100.0, 10.0, 10.0);
		assert_eq!(to_canvas_point(Point::new(20.0, 30.0), &rect), Point::new(-80.0, -70.0));
	}
}
