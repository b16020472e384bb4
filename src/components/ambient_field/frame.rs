//! Per-frame driver: time-step clamping and the simulate-then-draw sequence.

use log::debug;

use super::render;
use super::state::FieldState;
use super::surface::DrawSurface;
use super::theme::FieldTheme;

/// Smallest simulated step, in seconds.
pub const MIN_STEP: f64 = 0.001;
/// Largest simulated step: one 30 fps frame, however long the tab slept.
pub const MAX_STEP: f64 = 0.033;

/// Clamp a wall-clock gap (seconds) to a simulation step.
pub fn clamp_step(elapsed: f64) -> f64 {
	if elapsed.is_nan() {
		return MIN_STEP;
	}
	elapsed.clamp(MIN_STEP, MAX_STEP)
}

/// Drives the field from the host's animation clock.
#[derive(Clone, Debug)]
pub struct FrameDriver {
	last_timestamp: Option<f64>,
	reduced_motion: bool,
	frames: u64,
}

impl FrameDriver {
	pub fn new(reduced_motion: bool) -> Self {
		Self {
			last_timestamp: None,
			reduced_motion,
			frames: 0,
		}
	}

	/// Frames rendered so far.
	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// Whether the host should schedule another frame.
	///
	/// With reduced motion a single static frame is drawn and the loop stops.
	pub fn keeps_running(&self) -> bool {
		!(self.reduced_motion && self.frames > 0)
	}

	/// Handle one animation callback at `now_ms` (milliseconds, monotonic).
	///
	/// Advances the simulation, draws the frame and returns the step used.
	pub fn on_frame(
		&mut self,
		now_ms: f64,
		state: &mut FieldState,
		surface: &mut impl DrawSurface,
		theme: &FieldTheme,
	) -> f64 {
		let dt = match self.last_timestamp {
			Some(last) => clamp_step((now_ms - last) / 1000.0),
			None => MIN_STEP,
		};
		self.last_timestamp = Some(now_ms);

		state.tick(dt);
		render::render(state, surface, theme);

		self.frames += 1;
		if self.frames == 1 {
			debug!(
				"ambient-field: first frame, {} particles, {} links",
				state.pool.len(),
				state.links.links().len()
			);
		}
		dt
	}
}
