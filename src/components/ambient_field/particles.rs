//! The particle pool and its motion integration.
//!
//! Velocities are expressed in buffer pixels per 60 Hz frame; every step is
//! scaled by `dt * 60` so motion does not depend on the display refresh rate.

use rand::Rng;

use super::pointer::PointerState;
use super::scale::SurfaceMetrics;
use super::types::BoundaryPolicy;

/// Frames per second the per-frame constants are authored against.
const REFERENCE_FPS: f64 = 60.0;
/// Wrap margin in logical pixels.
const EDGE_MARGIN: f64 = 20.0;
const WOBBLE_AMPLITUDE: f64 = 0.12;
const WOBBLE_RATE: f64 = 0.6;
/// Pointer repulsion radius in logical pixels.
const POINTER_RADIUS: f64 = 170.0;
const POINTER_BASE_FORCE: f64 = 0.18;
const POINTER_SPEED_FORCE: f64 = 0.25;
const PULSE_FORCE: f64 = 0.35;
/// Per-frame pull toward the seed anchor, as a fraction of the offset.
const COHESION: f64 = 0.002;
const DISTANCE_EPSILON: f64 = 1e-6;

/// A single drifting point.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	/// Oscillator offset for wobble and breathing, fixed for the particle's life.
	pub phase: f64,
	/// Within the zone band around the X on the last zone update.
	pub in_zone: bool,
	/// 24-bit tag shown while in the zone.
	pub tag: u32,
	/// Seed position the particle is pulled back toward when contained.
	pub ox: f64,
	pub oy: f64,
}

impl Particle {
	/// A motionless particle anchored at `(x, y)`.
	pub fn at(x: f64, y: f64) -> Self {
		Self {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius: 1.0,
			phase: 0.0,
			in_zone: false,
			tag: 0,
			ox: x,
			oy: y,
		}
	}
}

/// Region particles live in, in buffer space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
	/// Slack outside the surface before a particle wraps.
	pub margin: f64,
	/// Scale from logical to buffer pixels for per-frame lengths.
	pub pixel_ratio: f64,
	pub policy: BoundaryPolicy,
}

impl Bounds {
	pub fn from_metrics(metrics: &SurfaceMetrics, policy: BoundaryPolicy) -> Self {
		Self {
			width: metrics.width(),
			height: metrics.height(),
			margin: metrics.px(EDGE_MARGIN),
			pixel_ratio: metrics.device_pixel_ratio,
			policy,
		}
	}
}

/// Outward push from the travelling pulse head.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseInfluence {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	/// Current pulse strength in `[0, 1]`.
	pub strength: f64,
}

/// Owns every particle. Re-seeded, not rebuilt, on resize.
#[derive(Clone, Debug)]
pub struct ParticlePool {
	pub particles: Vec<Particle>,
	base_speed: f64,
	bounds: Option<Bounds>,
}

impl ParticlePool {
	pub fn new(base_speed: f64) -> Self {
		Self {
			particles: Vec::new(),
			base_speed,
			bounds: None,
		}
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Adjust the pool to exactly `count` particles inside `bounds`.
	///
	/// Surviving particles are rescaled into the new bounds; the deficit is
	/// filled with freshly seeded particles and any excess is dropped from the end.
	/// Survivors sitting in the wrap margin are wrapped back onto the old surface
	/// first, so a collapsed viewport does not leave them piled on the edges.
	pub fn resize(&mut self, count: usize, bounds: Bounds, rng: &mut impl Rng) {
		if let Some(old) = self.bounds {
			let sr = ratio(bounds.pixel_ratio, old.pixel_ratio);
			for p in &mut self.particles {
				p.x = rescale(p.x, old.width, bounds.width);
				p.y = rescale(p.y, old.height, bounds.height);
				p.ox = rescale(p.ox, old.width, bounds.width);
				p.oy = rescale(p.oy, old.height, bounds.height);
				p.vx *= sr;
				p.vy *= sr;
				p.radius *= sr;
			}
		}

		self.particles.truncate(count);
		while self.particles.len() < count {
			let p = self.seed(&bounds, rng);
			self.particles.push(p);
		}
		self.bounds = Some(bounds);
	}

	fn seed(&self, bounds: &Bounds, rng: &mut impl Rng) -> Particle {
		let angle = rng.gen_range(0.0..std::f64::consts::TAU);
		let speed = rng.gen_range(0.3..=1.0) * self.base_speed * bounds.pixel_ratio;
		let (x, y) = (
			rng.r#gen::<f64>() * bounds.width,
			rng.r#gen::<f64>() * bounds.height,
		);
		Particle {
			x,
			y,
			vx: angle.cos() * speed,
			vy: angle.sin() * speed,
			radius: (0.8 + rng.r#gen::<f64>() * 1.6) * bounds.pixel_ratio,
			phase: rng.r#gen::<f64>() * 10.0,
			in_zone: false,
			tag: rng.gen_range(0..=0xff_ffff),
			ox: x,
			oy: y,
		}
	}

	/// Advance every particle by `dt` seconds at simulation time `time`.
	pub fn advance(
		&mut self,
		dt: f64,
		time: f64,
		pointer: &PointerState,
		pulse: Option<PulseInfluence>,
		bounds: &Bounds,
	) {
		let frames = dt * REFERENCE_FPS;
		let dpr = bounds.pixel_ratio;
		let influence = pointer.influence(dpr);

		for p in &mut self.particles {
			let (wx, wy) = wobble(p, time, dpr);
			let (rx, ry) = pointer_push(p.x, p.y, pointer, influence, dpr);
			let (qx, qy) = pulse.map_or((0.0, 0.0), |q| pulse_push(p.x, p.y, &q, dpr));
			let (cx, cy) = match bounds.policy {
				BoundaryPolicy::Bounce => cohesion(p),
				BoundaryPolicy::Wrap => (0.0, 0.0),
			};

			p.x += (p.vx + wx + rx + qx + cx) * frames;
			p.y += (p.vy + wy + ry + qy + cy) * frames;

			confine(p, bounds);
		}
	}
}

fn ratio(new: f64, old: f64) -> f64 {
	if old > 0.0 { new / old } else { 1.0 }
}

/// Map a coordinate on an `old` extent onto a `new` one.
fn rescale(v: f64, old: f64, new: f64) -> f64 {
	if v.is_nan() {
		return 0.0;
	}
	if old <= 0.0 || v.is_infinite() {
		return v.clamp(0.0, new.max(0.0));
	}
	let on_surface = if (0.0..=old).contains(&v) {
		v
	} else {
		v.rem_euclid(old)
	};
	on_surface * new / old
}

/// Pull toward the seed anchor. Only the contained field uses it; under wrap
/// the anchor would drag particles back across the whole surface.
fn cohesion(p: &Particle) -> (f64, f64) {
	((p.ox - p.x) * COHESION, (p.oy - p.y) * COHESION)
}

/// Oscillating drift perpendicular to the particle's heading.
fn wobble(p: &Particle, time: f64, pixel_ratio: f64) -> (f64, f64) {
	let amount = (time * WOBBLE_RATE + p.phase).sin() * WOBBLE_AMPLITUDE * pixel_ratio;
	let speed = (p.vx * p.vx + p.vy * p.vy).sqrt();
	if speed > DISTANCE_EPSILON {
		(-p.vy / speed * amount, p.vx / speed * amount)
	} else {
		(amount, -amount)
	}
}

/// Per-frame displacement pushing `(x, y)` away from the pointer.
///
/// Strength falls off linearly to zero at the repulsion radius and grows with
/// the pointer's `influence` (its normalized speed).
pub fn pointer_push(
	x: f64,
	y: f64,
	pointer: &PointerState,
	influence: f64,
	pixel_ratio: f64,
) -> (f64, f64) {
	let (dx, dy) = (x - pointer.x, y - pointer.y);
	let dist2 = dx * dx + dy * dy;
	let radius = POINTER_RADIUS * pixel_ratio;
	if dist2 >= radius * radius {
		return (0.0, 0.0);
	}

	let dist = dist2.sqrt() + DISTANCE_EPSILON;
	let force = (1.0 - dist / radius).max(0.0)
		* (POINTER_BASE_FORCE + POINTER_SPEED_FORCE * influence);
	(dx / dist * force * pixel_ratio, dy / dist * force * pixel_ratio)
}

fn pulse_push(x: f64, y: f64, pulse: &PulseInfluence, pixel_ratio: f64) -> (f64, f64) {
	let (dx, dy) = (x - pulse.x, y - pulse.y);
	let dist2 = dx * dx + dy * dy;
	if dist2 >= pulse.radius * pulse.radius {
		return (0.0, 0.0);
	}

	let dist = dist2.sqrt() + DISTANCE_EPSILON;
	let force = (1.0 - dist / pulse.radius).max(0.0) * PULSE_FORCE * pulse.strength;
	(dx / dist * force * pixel_ratio, dy / dist * force * pixel_ratio)
}

fn confine(p: &mut Particle, b: &Bounds) {
	match b.policy {
		BoundaryPolicy::Wrap => {
			p.x = wrap(p.x, b.width, b.margin);
			p.y = wrap(p.y, b.height, b.margin);
		}
		BoundaryPolicy::Bounce => {
			(p.x, p.vx) = bounce(p.x, p.vx, b.width);
			(p.y, p.vy) = bounce(p.y, p.vy, b.height);
		}
	}
}

fn wrap(v: f64, extent: f64, margin: f64) -> f64 {
	if v < -margin {
		extent + margin
	} else if v > extent + margin {
		-margin
	} else {
		v
	}
}

fn bounce(v: f64, vel: f64, extent: f64) -> (f64, f64) {
	if v < 0.0 {
		(0.0, vel.abs())
	} else if v > extent {
		(extent, -vel.abs())
	} else {
		(v, vel)
	}
}
