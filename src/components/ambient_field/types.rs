//! Input data for the ambient field: device signals and page configuration.

use serde::Deserialize;

/// Capabilities of the host device, read once at startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceSignals {
	/// Phone/tablet class device.
	pub is_mobile: bool,
	/// The user asked for reduced motion.
	pub reduced_motion: bool,
	/// Logical processor count. Zero means unknown.
	pub core_count: u32,
	/// Raw device pixel ratio, before the quality cap.
	pub device_pixel_ratio: f64,
}

impl Default for DeviceSignals {
	fn default() -> Self {
		Self {
			is_mobile: false,
			reduced_motion: false,
			core_count: 4,
			device_pixel_ratio: 1.0,
		}
	}
}

/// What happens when a particle reaches the edge of the surface.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
	/// Re-enter from the opposite edge.
	#[default]
	Wrap,
	/// Reflect the velocity and stay inside.
	Bounce,
}

/// Optional overrides read from the page.
///
/// Expected format: a JSON object in a `<script id="field-config">` element,
/// e.g. `{ "particleCount": 400, "theme": "matrix", "boundary": "bounce" }`.
/// Every field is optional; absent fields keep the computed profile value.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
	pub pixel_ratio_cap: Option<f64>,
	pub particle_count: Option<usize>,
	pub base_speed: Option<f64>,
	pub connect_distance: Option<f64>,
	pub max_links_per_particle: Option<usize>,
	pub pulse_interval_seconds: Option<f64>,
	pub pulse_duration_seconds: Option<f64>,
	pub noise_strength: Option<f64>,
	pub zone_effects: Option<bool>,
	pub boundary: Option<BoundaryPolicy>,
	pub theme: Option<String>,
}
