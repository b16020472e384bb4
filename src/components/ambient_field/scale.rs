//! Device-pixel-ratio aware surface sizing.
//!
//! # Coordinate Spaces
//!
//! - **Logical space**: CSS pixels, as reported by the window and pointer events.
//! - **Buffer space**: pixels of the canvas backing store. Logical sizes are
//!   multiplied by the (capped) device pixel ratio.
//!
//! All simulation state lives in buffer space. Visual constants are authored in
//! logical pixels and converted with [`SurfaceMetrics::px`].

/// Sizes of the drawing surface in both coordinate spaces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMetrics {
	pub logical_width: f64,
	pub logical_height: f64,
	/// Device pixel ratio after applying the quality cap.
	pub device_pixel_ratio: f64,
	pub buffer_width: u32,
	pub buffer_height: u32,
}

impl SurfaceMetrics {
	/// Compute metrics for a viewport of `css_width` x `css_height` logical pixels.
	///
	/// Degenerate sizes are floored to one pixel, and a missing or non-finite
	/// ratio is treated as 1.
	pub fn new(css_width: f64, css_height: f64, raw_ratio: f64, ratio_cap: f64) -> Self {
		let logical_width = sanitize(css_width, 1.0).max(1.0);
		let logical_height = sanitize(css_height, 1.0).max(1.0);
		let raw = if raw_ratio.is_finite() && raw_ratio > 0.0 {
			raw_ratio
		} else {
			1.0
		};
		let cap = if ratio_cap > 0.0 { ratio_cap } else { raw };
		let device_pixel_ratio = raw.min(cap);

		Self {
			logical_width,
			logical_height,
			device_pixel_ratio,
			buffer_width: (logical_width * device_pixel_ratio).floor() as u32,
			buffer_height: (logical_height * device_pixel_ratio).floor() as u32,
		}
	}

	/// Convert a logical-pixel length into buffer space.
	pub fn px(&self, logical: f64) -> f64 {
		logical * self.device_pixel_ratio
	}

	/// Buffer width as a float, for simulation math.
	pub fn width(&self) -> f64 {
		self.buffer_width as f64
	}

	/// Buffer height as a float, for simulation math.
	pub fn height(&self) -> f64 {
		self.buffer_height as f64
	}
}

fn sanitize(v: f64, fallback: f64) -> f64 {
	if v.is_finite() { v } else { fallback }
}
