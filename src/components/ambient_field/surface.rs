//! Abstract drawing capability and its canvas implementation.
//!
//! The renderer only talks to [`DrawSurface`], which keeps it independent of
//! web-sys and lets host tests record the calls instead of rasterizing.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::theme::Color;

/// A straight line segment in buffer space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

impl Segment {
	pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
		Self { x1, y1, x2, y2 }
	}

	/// Point at fraction `t` along the segment.
	pub fn lerp(&self, t: f64) -> (f64, f64) {
		(
			self.x1 + (self.x2 - self.x1) * t,
			self.y1 + (self.y2 - self.y1) * t,
		)
	}

	/// Shortest distance from `(px, py)` to any point on the segment.
	pub fn distance_to(&self, px: f64, py: f64) -> f64 {
		let (abx, aby) = (self.x2 - self.x1, self.y2 - self.y1);
		let (apx, apy) = (px - self.x1, py - self.y1);
		let len2 = abx * abx + aby * aby + 1e-9;
		let t = ((apx * abx + apy * aby) / len2).clamp(0.0, 1.0);
		let (cx, cy) = self.lerp(t);
		let (dx, dy) = (px - cx, py - cy);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Compositing mode for subsequent fills and strokes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
	Normal,
	Screen,
	Lighter,
}

impl BlendMode {
	fn as_css(self) -> &'static str {
		match self {
			BlendMode::Normal => "source-over",
			BlendMode::Screen => "screen",
			BlendMode::Lighter => "lighter",
		}
	}
}

/// Drawing primitives used by the renderer.
pub trait DrawSurface {
	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color);

	/// Stroke all segments as one path with round caps.
	fn stroke_segments(&mut self, segments: &[Segment], color: Color, width: f64);

	fn fill_circle(&mut self, x: f64, y: f64, r: f64, color: Color);

	/// Fill a disc of radius `r` with a radial gradient from its centre.
	/// `stops` are `(offset, color)` pairs with offsets in `[0, 1]`.
	fn fill_radial_glow(&mut self, x: f64, y: f64, r: f64, stops: &[(f64, Color)]);

	fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: Color);

	fn set_blend(&mut self, mode: BlendMode);

	fn stroke_line(&mut self, segment: Segment, color: Color, width: f64) {
		self.stroke_segments(&[segment], color, width);
	}
}

impl DrawSurface for CanvasRenderingContext2d {
	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
	}

	fn stroke_segments(&mut self, segments: &[Segment], color: Color, width: f64) {
		if segments.is_empty() {
			return;
		}
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.set_line_cap("round");
		self.set_line_join("round");
		self.begin_path();
		for s in segments {
			self.move_to(s.x1, s.y1);
			self.line_to(s.x2, s.y2);
		}
		self.stroke();
	}

	fn fill_circle(&mut self, x: f64, y: f64, r: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.begin_path();
		let _ = self.arc(x, y, r, 0.0, TAU);
		self.fill();
	}

	fn fill_radial_glow(&mut self, x: f64, y: f64, r: f64, stops: &[(f64, Color)]) {
		let Ok(gradient) = self.create_radial_gradient(x, y, 0.0, x, y, r) else {
			return;
		};
		for &(offset, color) in stops {
			let _ = gradient.add_color_stop(offset as f32, &color.to_css());
		}

		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.begin_path();
		let _ = self.arc(x, y, r, 0.0, TAU);
		self.fill();
	}

	fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: Color) {
		self.set_font(font);
		self.set_fill_style_str(&color.to_css());
		let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
	}

	fn set_blend(&mut self, mode: BlendMode) {
		let _ = self.set_global_composite_operation(mode.as_css());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn distance_to_segment_projects_and_clamps() {
		let s = Segment::new(0.0, 0.0, 10.0, 0.0);
		assert!((s.distance_to(5.0, 3.0) - 3.0).abs() < 1e-6);
		assert!((s.distance_to(-4.0, 3.0) - 5.0).abs() < 1e-6);
		assert!((s.distance_to(13.0, 4.0) - 5.0).abs() < 1e-6);
	}

	#[test]
	fn degenerate_segment_is_a_point() {
		let s = Segment::new(2.0, 2.0, 2.0, 2.0);
		assert!((s.distance_to(5.0, 6.0) - 5.0).abs() < 1e-6);
	}
}
