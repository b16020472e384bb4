//! Zone effects around the X: entry sparks, flickering hex tags, swelling
//! radii and an outward push once the zone gets crowded.

use std::f64::consts::TAU;

use rand::Rng;

use super::particles::Particle;
use super::pulse::XPath;

/// Seconds a spark stays visible.
pub const SPARK_LIFETIME: f64 = 0.65;
/// Rays per spark.
pub const SPARK_RAYS: usize = 4;
/// Zone half-width around the X, in logical pixels.
pub const ZONE_MARGIN: f64 = 42.0;
/// Chance per frame that an in-zone particle re-rolls its tag.
const TAG_FLICKER: f64 = 0.4;
/// Outward push from the crossing when saturated, logical pixels per 60 Hz frame.
const SATURATION_PUSH: f64 = 1.2;
/// In-zone radius oscillates around this, in logical pixels.
const SWELL_BASE: f64 = 3.3;
const SWELL_DEPTH: f64 = 1.4;
/// Radians per second.
const SWELL_RATE: f64 = 50.0;

/// A short-lived burst left where a particle crossed into the zone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spark {
	pub x: f64,
	pub y: f64,
	/// Seconds since the spark was spawned.
	pub age: f64,
	/// Rotation of the first ray.
	pub angle: f64,
}

impl Spark {
	/// Fraction of the lifetime already spent, in `[0, 1]`.
	pub fn life(&self) -> f64 {
		(self.age / SPARK_LIFETIME).clamp(0.0, 1.0)
	}
}

/// Zone shape for one update, in buffer pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneBand {
	/// Half-width of the band around the X.
	pub margin: f64,
	pub pixel_ratio: f64,
	/// In-zone count at which particles start getting pushed out.
	pub saturation: usize,
}

/// Tracks zone membership transitions and the sparks they spawn.
#[derive(Clone, Debug, Default)]
pub struct ZoneEffects {
	pub sparks: Vec<Spark>,
	/// Particles inside the band on the last update.
	pub occupancy: usize,
}

impl ZoneEffects {
	/// Age existing sparks, refresh zone membership for every particle, then
	/// push in-zone particles away from the crossing if the zone is saturated.
	pub fn update(
		&mut self,
		particles: &mut [Particle],
		path: &XPath,
		band: &ZoneBand,
		dt: f64,
		rng: &mut impl Rng,
	) {
		for s in &mut self.sparks {
			s.age += dt;
		}
		self.sparks.retain(|s| s.age <= SPARK_LIFETIME);

		self.occupancy = 0;
		for p in particles.iter_mut() {
			let was_in = p.in_zone;
			p.in_zone = path.distance_to(p.x, p.y) < band.margin;
			if !p.in_zone {
				continue;
			}
			self.occupancy += 1;

			if !was_in {
				self.sparks.push(Spark {
					x: p.x,
					y: p.y,
					age: 0.0,
					angle: rng.gen_range(0.0..TAU),
				});
			}
			if rng.gen_bool(TAG_FLICKER) {
				p.tag = rng.gen_range(0..=0xff_ffff);
			}
		}

		if self.occupancy >= band.saturation {
			let (cx, cy) = path.center();
			let push = SATURATION_PUSH * band.pixel_ratio * dt * 60.0;
			for p in particles.iter_mut().filter(|p| p.in_zone) {
				let (dx, dy) = (p.x - cx, p.y - cy);
				let d = (dx * dx + dy * dy).sqrt();
				if d > 1e-6 {
					p.x += dx / d * push;
					p.y += dy / d * push;
				}
			}
		}
	}
}

/// Drawn radius of `p` at simulation time `time`: in-zone particles swell.
pub fn zone_radius(p: &Particle, time: f64, pixel_ratio: f64) -> f64 {
	if p.in_zone {
		(SWELL_BASE + (time * SWELL_RATE + p.x + p.y).sin() * SWELL_DEPTH) * pixel_ratio
	} else {
		p.radius
	}
}
