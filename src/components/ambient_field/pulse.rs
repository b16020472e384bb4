//! Recurring energy pulse travelling along a fixed X.
//!
//! The scheduler is an explicit state machine:
//!
//! ```text
//! Disabled                      (reduced motion, never leaves)
//! Idle { next_at } --now >= next_at--> InFlight { progress: 0, next_at: now + interval }
//! InFlight { progress } --progress == 1--> Idle { next_at }
//! ```
//!
//! The interval is measured start-to-start. The visual envelope and the
//! travelling head use different easing so the head trails the fade-in and
//! lands before the fade-out completes.

use std::f64::consts::PI;

use super::surface::Segment;

/// Head easing window inside the pulse lifetime.
const HEAD_START: f64 = 0.10;
const HEAD_END: f64 = 0.95;

/// Hermite smoothing of `x` between two edges, clamped to `[0, 1]`.
pub fn smooth_step(edge0: f64, edge1: f64, x: f64) -> f64 {
	let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
	t * t * (3.0 - 2.0 * t)
}

/// Rise-peak-fall envelope, exactly zero at both ends.
pub fn envelope(progress: f64) -> f64 {
	if progress <= 0.0 || progress >= 1.0 {
		0.0
	} else {
		(PI * progress).sin()
	}
}

/// Scheduler state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PulsePhase {
	Disabled,
	Idle { next_at: f64 },
	InFlight { progress: f64, next_at: f64 },
}

/// Advances the pulse on the simulation clock.
#[derive(Clone, Debug)]
pub struct PulseScheduler {
	phase: PulsePhase,
	interval: f64,
	duration: f64,
}

impl PulseScheduler {
	/// A scheduler whose first pulse starts at `first_at`. A non-finite
	/// `interval` yields a permanently disabled scheduler.
	pub fn new(first_at: f64, interval: f64, duration: f64) -> Self {
		let phase = if interval.is_finite() {
			PulsePhase::Idle { next_at: first_at }
		} else {
			PulsePhase::Disabled
		};
		Self {
			phase,
			interval,
			duration,
		}
	}

	pub fn phase(&self) -> PulsePhase {
		self.phase
	}

	/// Advance to simulation time `now`, `dt` seconds after the previous call.
	pub fn advance(&mut self, now: f64, dt: f64) {
		if let PulsePhase::Idle { next_at } = self.phase {
			if now >= next_at {
				self.phase = PulsePhase::InFlight {
					progress: 0.0,
					next_at: now + self.interval,
				};
			}
		}

		if let PulsePhase::InFlight { progress, next_at } = self.phase {
			let step = if self.duration > 0.0 {
				dt / self.duration
			} else {
				1.0
			};
			let progress = (progress + step).clamp(0.0, 1.0);
			self.phase = if progress >= 1.0 {
				PulsePhase::Idle { next_at }
			} else {
				PulsePhase::InFlight { progress, next_at }
			};
		}
	}

	/// Pulse progress in `[0, 1]`; 1 whenever no pulse is in flight.
	pub fn progress(&self) -> f64 {
		match self.phase {
			PulsePhase::InFlight { progress, .. } => progress,
			_ => 1.0,
		}
	}

	pub fn in_flight(&self) -> bool {
		matches!(self.phase, PulsePhase::InFlight { .. })
	}

	/// Visual intensity of the current pulse.
	pub fn intensity(&self) -> f64 {
		envelope(self.progress())
	}

	/// Eased position of the travelling head along the path, in `[0, 1]`.
	pub fn head(&self) -> f64 {
		smooth_step(HEAD_START, HEAD_END, self.progress())
	}
}

/// The X: two diagonals through a point just below the surface centre, each
/// split at the crossing so the head visits four segments in order.
#[derive(Clone, Debug, PartialEq)]
pub struct XPath {
	pub segments: [Segment; 4],
	/// Baseline stroke thickness in buffer pixels.
	pub thickness: f64,
}

impl XPath {
	pub fn new(width: f64, height: f64, x_scale: f64, pixel_ratio: f64) -> Self {
		let (cx, cy) = (width * 0.50, height * 0.52);
		let size = width.min(height) * x_scale;

		let (p1, p2) = ((cx - size, cy - size), (cx + size, cy + size));
		let (p3, p4) = ((cx + size, cy - size), (cx - size, cy + size));
		let mid12 = ((p1.0 + p2.0) * 0.5, (p1.1 + p2.1) * 0.5);
		let mid34 = ((p3.0 + p4.0) * 0.5, (p3.1 + p4.1) * 0.5);

		let seg = |a: (f64, f64), b: (f64, f64)| Segment::new(a.0, a.1, b.0, b.1);
		Self {
			segments: [seg(p1, mid12), seg(mid12, p2), seg(p3, mid34), seg(mid34, p4)],
			thickness: 1.5 * pixel_ratio,
		}
	}

	/// Where the two diagonals cross.
	pub fn center(&self) -> (f64, f64) {
		(self.segments[0].x2, self.segments[0].y2)
	}

	/// Point at fractional position `head` along the ordered segment list.
	pub fn point_at(&self, head: f64) -> (f64, f64) {
		let count = self.segments.len();
		let pos = head.clamp(0.0, 1.0) * count as f64;
		let index = (pos.floor() as usize).min(count - 1);
		self.segments[index].lerp(pos - index as f64)
	}

	/// Distance from `(x, y)` to the nearest point of the X.
	pub fn distance_to(&self, x: f64, y: f64) -> f64 {
		self.segments
			.iter()
			.map(|s| s.distance_to(x, y))
			.fold(f64::INFINITY, f64::min)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn envelope_is_zero_at_ends_and_peaks_mid_flight() {
		assert_eq!(envelope(0.0), 0.0);
		assert_eq!(envelope(1.0), 0.0);
		assert!((envelope(0.5) - 1.0).abs() < 1e-12);
		assert!(envelope(0.25) < envelope(0.5));
	}

	#[test]
	fn fires_at_first_deadline_and_reschedules_from_start() {
		let mut s = PulseScheduler::new(1.8, 8.5, 2.1);
		s.advance(1.0, 0.016);
		assert_eq!(s.phase(), PulsePhase::Idle { next_at: 1.8 });

		s.advance(1.81, 0.016);
		match s.phase() {
			PulsePhase::InFlight { progress, next_at } => {
				assert!((next_at - 10.31).abs() < 1e-9);
				assert!((progress - 0.016 / 2.1).abs() < 1e-9);
			}
			other => panic!("expected in flight, got {other:?}"),
		}
	}

	#[test]
	fn progress_is_monotonic_and_returns_to_idle() {
		let mut s = PulseScheduler::new(0.0, 8.5, 2.1);
		let mut now = 0.0;
		let mut last = 0.0;
		s.advance(now, 0.033);
		while s.in_flight() {
			assert!(s.progress() >= last);
			last = s.progress();
			now += 0.033;
			s.advance(now, 0.033);
		}
		assert_eq!(s.progress(), 1.0);
		assert_eq!(s.intensity(), 0.0);
		assert!(matches!(s.phase(), PulsePhase::Idle { next_at } if (next_at - 8.5).abs() < 1e-9));
	}

	#[test]
	fn interval_shorter_than_duration_never_restarts_mid_flight() {
		let mut s = PulseScheduler::new(0.0, 0.5, 2.1);
		let (mut now, dt) = (0.0, 0.033);
		let mut last = 0.0;
		let mut completed = 0;
		for _ in 0..400 {
			s.advance(now, dt);
			if s.in_flight() {
				assert!(s.progress() >= last, "progress went back at {now}");
				last = s.progress();
			} else {
				if last > 0.0 {
					completed += 1;
				}
				last = 0.0;
			}
			now += dt;
		}
		// Each flight runs its full 2.1s even though the deadline passes first.
		assert!(completed >= 4);
	}

	#[test]
	fn disabled_never_fires() {
		let mut s = PulseScheduler::new(1.8, f64::INFINITY, 2.1);
		for i in 0..10_000 {
			s.advance(i as f64, 1.0);
			assert!(!s.in_flight());
		}
		assert_eq!(s.phase(), PulsePhase::Disabled);
	}

	#[test]
	fn zero_duration_completes_in_one_tick() {
		let mut s = PulseScheduler::new(0.0, 5.0, 0.0);
		s.advance(0.0, 0.016);
		assert!(!s.in_flight());
		assert_eq!(s.phase(), PulsePhase::Idle { next_at: 5.0 });
	}

	#[test]
	fn head_trails_envelope() {
		let mut s = PulseScheduler::new(0.0, 8.5, 1.0);
		s.advance(0.0, 0.05);
		assert_eq!(s.head(), 0.0);
		assert!(s.intensity() > 0.0);
		s.advance(0.96, 0.91);
		assert_eq!(s.head(), 1.0);
		assert!(s.intensity() > 0.0);
	}

	#[test]
	fn x_path_crosses_below_centre() {
		let x = XPath::new(1000.0, 500.0, 0.26, 2.0);
		let (mx, my) = x.point_at(0.25);
		assert!((mx - 500.0).abs() < 1e-9);
		assert!((my - 260.0).abs() < 1e-9);
		let close = |(ax, ay): (f64, f64), (bx, by): (f64, f64)| {
			(ax - bx).abs() < 1e-9 && (ay - by).abs() < 1e-9
		};
		assert!(close(x.point_at(0.0), (370.0, 130.0)));
		assert!(close(x.point_at(1.0), (370.0, 390.0)));
		assert_eq!(x.thickness, 3.0);
		assert!(x.distance_to(500.0, 260.0) < 1e-6);
		assert!(x.distance_to(0.0, 0.0) > 100.0);
	}
}
