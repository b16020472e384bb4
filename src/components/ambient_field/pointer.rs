//! Smoothed pointer tracking.
//!
//! An idle pointer sits at a sentinel far outside any surface, so distance
//! checks against it always fail and no separate "active" flag is needed.

/// Coordinate used for both axes while no pointer is present.
pub const IDLE_SENTINEL: f64 = -1e9;

/// Exponential smoothing factor for the velocity estimate.
const VELOCITY_SMOOTHING: f64 = 0.25;
/// Velocity attenuation for touch input, which arrives in coarse jumps.
const TOUCH_ATTENUATION: f64 = 0.35;
/// Pointer speed (logical px per event) that counts as full influence.
const FULL_INFLUENCE_SPEED: f64 = 60.0;

/// Pointer position and smoothed velocity, in buffer space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
}

impl Default for PointerState {
	fn default() -> Self {
		Self {
			x: IDLE_SENTINEL,
			y: IDLE_SENTINEL,
			vx: 0.0,
			vy: 0.0,
		}
	}
}

impl PointerState {
	pub fn is_idle(&self) -> bool {
		self.x <= IDLE_SENTINEL && self.y <= IDLE_SENTINEL
	}

	/// Speed-derived influence in `[0, 1]` for a given pixel ratio.
	pub fn influence(&self, pixel_ratio: f64) -> f64 {
		let speed = (self.vx * self.vx + self.vy * self.vy).sqrt();
		(speed / (FULL_INFLUENCE_SPEED * pixel_ratio.max(f64::EPSILON))).clamp(0.0, 1.0)
	}
}

/// Owns the [`PointerState`] and folds raw move events into it.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
	state: PointerState,
}

impl PointerTracker {
	pub fn state(&self) -> &PointerState {
		&self.state
	}

	/// Record a move to `(x, y)` in buffer space.
	pub fn on_pointer_move(&mut self, x: f64, y: f64, is_touch: bool) {
		let s = &mut self.state;
		if s.is_idle() {
			// Coming back from the sentinel is not a real displacement.
			s.vx = 0.0;
			s.vy = 0.0;
		} else {
			s.vx = lerp(s.vx, x - s.x, VELOCITY_SMOOTHING);
			s.vy = lerp(s.vy, y - s.y, VELOCITY_SMOOTHING);
		}
		s.x = x;
		s.y = y;

		if is_touch {
			s.vx *= TOUCH_ATTENUATION;
			s.vy *= TOUCH_ATTENUATION;
		}
	}

	/// Return to the idle sentinel (touch lifted, pointer left the page).
	pub fn release(&mut self) {
		self.state = PointerState::default();
	}
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
	a + (b - a) * t
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starts_idle_with_no_influence() {
		let tracker = PointerTracker::default();
		assert!(tracker.state().is_idle());
		assert_eq!(tracker.state().influence(1.0), 0.0);
	}

	#[test]
	fn first_move_after_idle_has_zero_velocity() {
		let mut tracker = PointerTracker::default();
		tracker.on_pointer_move(100.0, 50.0, false);
		let s = tracker.state();
		assert_eq!((s.x, s.y), (100.0, 50.0));
		assert_eq!((s.vx, s.vy), (0.0, 0.0));
	}

	#[test]
	fn velocity_is_exponentially_smoothed() {
		let mut tracker = PointerTracker::default();
		tracker.on_pointer_move(0.0, 0.0, false);
		tracker.on_pointer_move(40.0, 0.0, false);
		assert!((tracker.state().vx - 10.0).abs() < 1e-9);
		tracker.on_pointer_move(80.0, 0.0, false);
		assert!((tracker.state().vx - 17.5).abs() < 1e-9);
	}

	#[test]
	fn touch_dampens_velocity() {
		let mut mouse = PointerTracker::default();
		let mut touch = PointerTracker::default();
		mouse.on_pointer_move(0.0, 0.0, false);
		touch.on_pointer_move(0.0, 0.0, false);
		mouse.on_pointer_move(40.0, 0.0, false);
		touch.on_pointer_move(40.0, 0.0, true);
		assert!((touch.state().vx - mouse.state().vx * 0.35).abs() < 1e-9);
	}

	#[test]
	fn influence_saturates() {
		let s = PointerState {
			x: 0.0,
			y: 0.0,
			vx: 300.0,
			vy: 0.0,
		};
		assert_eq!(s.influence(2.0), 1.0);
		let slow = PointerState { vx: 30.0, ..s };
		assert!((slow.influence(1.0) - 0.5).abs() < 1e-9);
	}

	#[test]
	fn release_returns_to_sentinel() {
		let mut tracker = PointerTracker::default();
		tracker.on_pointer_move(10.0, 10.0, true);
		tracker.release();
		assert!(tracker.state().is_idle());
	}
}
