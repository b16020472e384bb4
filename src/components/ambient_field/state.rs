//! Field simulation state.
//!
//! [`FieldState`] is the single context object shared by the frame loop, the
//! pointer handlers and the resize handler. It owns every piece of mutable
//! animation state; nothing lives in globals.

use rand::rngs::StdRng;

use super::links::LinkBuilder;
use super::particles::{Bounds, ParticlePool, PulseInfluence};
use super::pointer::{PointerState, PointerTracker};
use super::pulse::{PulseScheduler, XPath};
use super::quality::QualityProfile;
use super::scale::SurfaceMetrics;
use super::sparks::{ZONE_MARGIN, ZoneBand, ZoneEffects};

/// Simulation time of the first pulse, in seconds.
pub const FIRST_PULSE_AT: f64 = 1.8;
/// Reach of the pulse head's push, in logical pixels.
const PULSE_RADIUS: f64 = 120.0;
/// Pulse strength relative to its envelope.
pub const PULSE_STRENGTH: f64 = 0.85;

/// Core field state, created once at startup and mutated by the frame loop
/// and event handlers.
pub struct FieldState {
	pub profile: QualityProfile,
	pub metrics: SurfaceMetrics,
	pub pool: ParticlePool,
	pub links: LinkBuilder,
	pub pulse: PulseScheduler,
	pub x_path: XPath,
	pub zone: ZoneEffects,
	/// Simulation clock in seconds.
	pub time: f64,
	pointer: PointerTracker,
	rng: StdRng,
}

impl FieldState {
	pub fn new(profile: QualityProfile, metrics: SurfaceMetrics, rng: StdRng) -> Self {
		let mut state = Self {
			pool: ParticlePool::new(profile.base_speed),
			links: LinkBuilder::default(),
			pulse: PulseScheduler::new(
				FIRST_PULSE_AT,
				profile.pulse_interval_seconds,
				profile.pulse_duration_seconds,
			),
			x_path: XPath::new(
				metrics.width(),
				metrics.height(),
				profile.x_scale,
				metrics.device_pixel_ratio,
			),
			zone: ZoneEffects::default(),
			time: 0.0,
			pointer: PointerTracker::default(),
			profile,
			metrics,
			rng,
		};
		state.reseed();
		state
	}

	/// Particle bounds for the current surface.
	pub fn bounds(&self) -> Bounds {
		Bounds::from_metrics(&self.metrics, self.profile.boundary)
	}

	/// Link threshold in buffer pixels.
	pub fn connect_distance(&self) -> f64 {
		self.metrics.px(self.profile.connect_distance)
	}

	pub fn pointer(&self) -> &PointerState {
		self.pointer.state()
	}

	/// Rebuild surface-dependent state for a new viewport.
	pub fn resize(&mut self, css_width: f64, css_height: f64, raw_ratio: f64) {
		self.metrics = SurfaceMetrics::new(
			css_width,
			css_height,
			raw_ratio,
			self.profile.pixel_ratio_cap,
		);
		self.x_path = XPath::new(
			self.metrics.width(),
			self.metrics.height(),
			self.profile.x_scale,
			self.metrics.device_pixel_ratio,
		);
		self.reseed();
	}

	fn reseed(&mut self) {
		let bounds = self.bounds();
		self.pool
			.resize(self.profile.particle_count, bounds, &mut self.rng);
	}

	/// Pointer moved to `(client_x, client_y)` in logical pixels.
	pub fn pointer_moved(&mut self, client_x: f64, client_y: f64, is_touch: bool) {
		let (x, y) = (self.metrics.px(client_x), self.metrics.px(client_y));
		self.pointer.on_pointer_move(x, y, is_touch);
	}

	/// Pointer went away; it stops influencing particles.
	pub fn pointer_released(&mut self) {
		self.pointer.release();
	}

	/// Current push from the pulse head, if a pulse is in flight.
	pub fn pulse_influence(&self) -> Option<PulseInfluence> {
		if !self.pulse.in_flight() {
			return None;
		}
		let (x, y) = self.x_path.point_at(self.pulse.head());
		Some(PulseInfluence {
			x,
			y,
			radius: self.metrics.px(PULSE_RADIUS),
			strength: self.pulse.intensity() * PULSE_STRENGTH,
		})
	}

	/// Advance the whole simulation by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		self.time += dt;
		let bounds = self.bounds();
		let pulse = self.pulse_influence();

		self.pool
			.advance(dt, self.time, self.pointer.state(), pulse, &bounds);

		if self.profile.zone_effects {
			let band = ZoneBand {
				margin: self.metrics.px(ZONE_MARGIN),
				pixel_ratio: self.metrics.device_pixel_ratio,
				saturation: self.profile.zone_saturation,
			};
			self.zone.update(
				&mut self.pool.particles,
				&self.x_path,
				&band,
				dt,
				&mut self.rng,
			);
		}

		let connect_distance = self.connect_distance();
		self.links.rebuild(
			&self.pool.particles,
			connect_distance,
			self.profile.max_links_per_particle,
		);

		self.pulse.advance(self.time, dt);
	}
}
