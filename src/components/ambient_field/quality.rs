//! Session-wide tuning constants derived from device signals.
//!
//! The profile is the single point of variation for the animation: mobile,
//! desktop and reduced-motion renditions share one implementation and only
//! differ in the numbers chosen here.

use super::types::{BoundaryPolicy, DeviceSignals, FieldConfig};

/// Assumed core count when the host reports none.
const FALLBACK_CORES: u32 = 4;
/// Desktop particles contributed by each core.
const PARTICLES_PER_CORE: usize = 220;
/// Desktop particle ceiling, independent of core count.
const MAX_DESKTOP_PARTICLES: usize = 900;

/// Immutable tuning constants for one session.
///
/// All lengths are in logical pixels and all times in seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct QualityProfile {
	pub pixel_ratio_cap: f64,
	pub particle_count: usize,
	/// Drift speed in logical pixels per 60 Hz frame.
	pub base_speed: f64,
	pub connect_distance: f64,
	pub max_links_per_particle: usize,
	/// Start-to-start pulse spacing. Infinite disables the pulse.
	pub pulse_interval_seconds: f64,
	pub pulse_duration_seconds: f64,
	/// Dither overlay strength. Zero disables the overlay.
	pub noise_strength: f64,
	/// Half-size of the X relative to the shorter surface side.
	pub x_scale: f64,
	/// Zone sparks and tags around the X.
	pub zone_effects: bool,
	/// In-zone particle count at which the zone starts pushing particles out.
	pub zone_saturation: usize,
	pub boundary: BoundaryPolicy,
	/// Copied from the device signals; the frame loop stops after one frame.
	pub reduced_motion: bool,
}

impl QualityProfile {
	/// Compute the profile for the given device.
	pub fn compute(signals: &DeviceSignals) -> Self {
		let DeviceSignals {
			is_mobile,
			reduced_motion,
			..
		} = *signals;
		let cores = if signals.core_count == 0 {
			FALLBACK_CORES
		} else {
			signals.core_count
		};

		let particle_count = if reduced_motion {
			120
		} else if is_mobile {
			220
		} else {
			MAX_DESKTOP_PARTICLES.min(cores as usize * PARTICLES_PER_CORE)
		};

		// (reduced, mobile, desktop)
		fn pick<T>(signals: &DeviceSignals, r: T, m: T, d: T) -> T {
			if signals.reduced_motion {
				r
			} else if signals.is_mobile {
				m
			} else {
				d
			}
		}

		Self {
			pixel_ratio_cap: if is_mobile { 1.6 } else { 2.2 },
			particle_count,
			base_speed: pick(signals, 0.18, 0.30, 0.36),
			connect_distance: pick(signals, 85.0, 110.0, 140.0),
			max_links_per_particle: pick(signals, 1, 2, 3),
			pulse_interval_seconds: if reduced_motion { f64::INFINITY } else { 8.5 },
			pulse_duration_seconds: 2.1,
			noise_strength: if reduced_motion { 0.0 } else { 0.020 },
			x_scale: if is_mobile { 0.22 } else { 0.26 },
			zone_effects: false,
			zone_saturation: if is_mobile { 30 } else { 80 },
			boundary: BoundaryPolicy::Wrap,
			reduced_motion,
		}
	}

	/// Apply page overrides on top of the computed profile.
	///
	/// Numeric overrides are clamped to be non-negative. Reduced motion keeps
	/// the overlay, pulse and zone effects off regardless of overrides.
	pub fn with_overrides(mut self, config: &FieldConfig) -> Self {
		let non_neg = |v: f64| if v.is_nan() { 0.0 } else { v.max(0.0) };

		if let Some(v) = config.pixel_ratio_cap {
			self.pixel_ratio_cap = non_neg(v);
		}
		if let Some(v) = config.particle_count {
			self.particle_count = v;
		}
		if let Some(v) = config.base_speed {
			self.base_speed = non_neg(v);
		}
		if let Some(v) = config.connect_distance {
			self.connect_distance = non_neg(v);
		}
		if let Some(v) = config.max_links_per_particle {
			self.max_links_per_particle = v;
		}
		if let Some(v) = config.pulse_interval_seconds {
			self.pulse_interval_seconds = non_neg(v);
		}
		if let Some(v) = config.pulse_duration_seconds {
			self.pulse_duration_seconds = non_neg(v);
		}
		if let Some(v) = config.noise_strength {
			self.noise_strength = non_neg(v);
		}
		if let Some(v) = config.zone_effects {
			self.zone_effects = v;
		}
		if let Some(v) = config.boundary {
			self.boundary = v;
		}

		if self.reduced_motion {
			self.noise_strength = 0.0;
			self.pulse_interval_seconds = f64::INFINITY;
			self.zone_effects = false;
		}
		self
	}

	/// Whether the pulse can ever fire.
	pub fn pulse_enabled(&self) -> bool {
		self.pulse_interval_seconds.is_finite()
	}
}
