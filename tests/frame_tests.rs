// Host-side tests driving whole frames through a recording draw surface.

use ambient_field::components::ambient_field::frame::{FrameDriver, MAX_STEP};
use ambient_field::components::ambient_field::render::render;
use ambient_field::components::ambient_field::scale::SurfaceMetrics;
use ambient_field::components::ambient_field::{BlendMode, Color, DrawSurface, Segment};
use ambient_field::{DeviceSignals, FieldConfig, FieldState, FieldTheme, QualityProfile};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Clone, Debug, PartialEq)]
enum Call {
	Rect { w: f64, h: f64, color: Color },
	Segments { count: usize, color: Color },
	Circle,
	Glow { stops: usize },
	Text(String),
	Blend(BlendMode),
}

#[derive(Default)]
struct Recorder {
	calls: Vec<Call>,
}

impl DrawSurface for Recorder {
	fn fill_rect(&mut self, _x: f64, _y: f64, w: f64, h: f64, color: Color) {
		self.calls.push(Call::Rect { w, h, color });
	}

	fn stroke_segments(&mut self, segments: &[Segment], color: Color, _width: f64) {
		self.calls.push(Call::Segments {
			count: segments.len(),
			color,
		});
	}

	fn fill_circle(&mut self, _x: f64, _y: f64, _r: f64, _color: Color) {
		self.calls.push(Call::Circle);
	}

	fn fill_radial_glow(&mut self, _x: f64, _y: f64, _r: f64, stops: &[(f64, Color)]) {
		self.calls.push(Call::Glow { stops: stops.len() });
	}

	fn fill_text(&mut self, text: &str, _x: f64, _y: f64, _font: &str, _color: Color) {
		self.calls.push(Call::Text(text.to_string()));
	}

	fn set_blend(&mut self, mode: BlendMode) {
		self.calls.push(Call::Blend(mode));
	}
}

fn field(reduced_motion: bool, config: &FieldConfig) -> FieldState {
	let signals = DeviceSignals {
		reduced_motion,
		core_count: 1,
		device_pixel_ratio: 1.0,
		..Default::default()
	};
	let profile = QualityProfile::compute(&signals).with_overrides(config);
	let metrics = SurfaceMetrics::new(320.0, 200.0, 1.0, profile.pixel_ratio_cap);
	FieldState::new(profile, metrics, StdRng::seed_from_u64(42))
}

/// Run `frames` callbacks 33ms apart, starting at `start_ms`.
fn run(driver: &mut FrameDriver, state: &mut FieldState, start_ms: f64, frames: usize) -> f64 {
	let theme = FieldTheme::default();
	let mut now = start_ms;
	for _ in 0..frames {
		driver.on_frame(now, state, &mut Recorder::default(), &theme);
		now += 33.0;
	}
	now
}

#[test]
fn frame_draws_back_to_front_with_pulse_on_top() {
	let mut state = field(false, &FieldConfig::default());
	let mut driver = FrameDriver::new(false);
	// First pulse starts at 1.8s and peaks about a second later.
	let now = run(&mut driver, &mut state, 0.0, 88);
	assert!(state.pulse.in_flight());

	let mut surface = Recorder::default();
	driver.on_frame(now, &mut state, &mut surface, &FieldTheme::default());
	let calls = &surface.calls;

	assert_eq!(
		calls[0],
		Call::Rect {
			w: 320.0,
			h: 200.0,
			color: Color::rgb(0, 0, 0)
		}
	);

	let first_circle = calls.iter().position(|c| *c == Call::Circle).expect("particles");
	let last_circle = calls.iter().rposition(|c| *c == Call::Circle).expect("particles");
	let screen = calls
		.iter()
		.position(|c| *c == Call::Blend(BlendMode::Screen))
		.expect("noise overlay");
	let normal = screen
		+ calls[screen..]
			.iter()
			.position(|c| *c == Call::Blend(BlendMode::Normal))
			.expect("blend reset");
	let glow = calls
		.iter()
		.position(|c| matches!(c, Call::Glow { .. }))
		.expect("pulse head");
	assert!(first_circle < last_circle && last_circle < screen && normal < glow);

	// Links only, then particles only, then noise tiles and the wash.
	assert!(calls[1..first_circle]
		.iter()
		.all(|c| matches!(c, Call::Segments { count: 1, .. })));
	assert_eq!(first_circle - 1, state.links.links().len());
	assert!(calls[first_circle..=last_circle].iter().all(|c| *c == Call::Circle));
	assert_eq!(last_circle - first_circle + 1, state.pool.len());
	assert!(normal - screen > 2);
	assert!(calls[screen + 1..normal]
		.iter()
		.all(|c| matches!(c, Call::Rect { .. })));

	let tail = &calls[calls.len() - 6..];
	assert!(matches!(tail[0], Call::Segments { count: 4, .. }));
	assert!(matches!(tail[1], Call::Segments { count: 4, .. }));
	assert_eq!(tail[2], Call::Glow { stops: 3 });
	assert_eq!(tail[3], Call::Blend(BlendMode::Lighter));
	assert!(matches!(tail[4], Call::Segments { count: 4, .. }));
	assert_eq!(tail[5], Call::Blend(BlendMode::Normal));
}

#[test]
fn idle_frames_have_no_pulse() {
	let mut state = field(false, &FieldConfig::default());
	let mut driver = FrameDriver::new(false);
	let mut surface = Recorder::default();
	driver.on_frame(0.0, &mut state, &mut surface, &FieldTheme::default());

	assert!(!state.pulse.in_flight());
	assert!(!surface.calls.iter().any(|c| matches!(c, Call::Glow { .. })));
}

#[test]
fn reduced_motion_renders_one_static_frame() {
	let mut state = field(true, &FieldConfig::default());
	let mut driver = FrameDriver::new(true);
	let mut surface = Recorder::default();

	assert!(driver.keeps_running());
	driver.on_frame(16.0, &mut state, &mut surface, &FieldTheme::default());
	assert!(!driver.keeps_running());
	assert_eq!(driver.frames(), 1);

	// Background only: no noise tiles, no wash, no pulse.
	let rects = surface
		.calls
		.iter()
		.filter(|c| matches!(c, Call::Rect { .. }))
		.count();
	assert_eq!(rects, 1);
	assert!(!surface.calls.iter().any(|c| matches!(c, Call::Blend(_))));
	assert_eq!(state.pool.len(), 120);
}

#[test]
fn reduced_motion_never_pulses_even_when_rendered_repeatedly() {
	let mut state = field(true, &FieldConfig::default());
	let theme = FieldTheme::default();
	for i in 0..400 {
		state.tick(MAX_STEP);
		let mut surface = Recorder::default();
		render(&state, &mut surface, &theme);
		assert!(!state.pulse.in_flight(), "pulse started at tick {i}");
		assert!(!surface.calls.iter().any(|c| matches!(c, Call::Glow { .. })));
	}
}

#[test]
fn backgrounded_tab_is_clamped_to_one_step() {
	let mut state = field(false, &FieldConfig::default());
	let mut driver = FrameDriver::new(false);
	let theme = FieldTheme::default();

	driver.on_frame(0.0, &mut state, &mut Recorder::default(), &theme);
	let before = state.pool.particles.clone();
	let t0 = state.time;

	let dt = driver.on_frame(5000.0, &mut state, &mut Recorder::default(), &theme);
	assert_eq!(dt, MAX_STEP);
	assert!((state.time - t0 - MAX_STEP).abs() < 1e-12);

	// At most a couple of pixels per particle, plus wraps at the edges.
	let bounds = state.bounds();
	for (a, b) in before.iter().zip(&state.pool.particles) {
		let moved = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
		let wrapped = (a.x - b.x).abs() > bounds.width / 2.0 || (a.y - b.y).abs() > bounds.height / 2.0;
		assert!(moved < 5.0 || wrapped);
	}
}

#[test]
fn zone_effects_draw_sparks_and_tags() {
	let config = FieldConfig {
		zone_effects: Some(true),
		noise_strength: Some(0.0),
		..Default::default()
	};
	let mut state = field(false, &config);
	// Park one particle right on the crossing of the X.
	let (cx, cy) = state.x_path.point_at(0.25);
	state.pool.particles[0].x = cx;
	state.pool.particles[0].y = cy;
	state.pool.particles[0].vx = 0.0;
	state.pool.particles[0].vy = 0.0;

	let mut surface = Recorder::default();
	let mut driver = FrameDriver::new(false);
	driver.on_frame(0.0, &mut state, &mut surface, &FieldTheme::matrix());

	assert!(state.pool.particles[0].in_zone);
	assert!(!state.zone.sparks.is_empty());
	let tags: Vec<_> = surface
		.calls
		.iter()
		.filter_map(|c| match c {
			Call::Text(t) => Some(t.clone()),
			_ => None,
		})
		.collect();
	assert!(!tags.is_empty());
	assert!(tags.iter().all(|t| t.len() == 7 && t.starts_with('#')));
}

#[test]
fn fast_pointer_pushes_nearby_particles_harder_than_idle() {
	let mut pushed = field(false, &FieldConfig::default());
	let mut calm = field(false, &FieldConfig::default());
	for s in [&mut pushed, &mut calm] {
		s.pool.particles.truncate(1);
		let p = &mut s.pool.particles[0];
		(p.x, p.y, p.vx, p.vy) = (160.0, 100.0, 0.0, 0.0);
	}

	pushed.pointer_moved(100.0, 100.0, false);
	pushed.pointer_moved(150.0, 100.0, false);
	pushed.tick(MAX_STEP);
	calm.tick(MAX_STEP);

	assert!(pushed.pool.particles[0].x > calm.pool.particles[0].x);
}

#[test]
fn released_pointer_stops_pushing() {
	let mut released = field(false, &FieldConfig::default());
	let mut calm = field(false, &FieldConfig::default());
	for s in [&mut released, &mut calm] {
		s.pool.particles.truncate(1);
		let p = &mut s.pool.particles[0];
		(p.x, p.y, p.vx, p.vy) = (160.0, 100.0, 0.0, 0.0);
	}

	released.pointer_moved(150.0, 100.0, false);
	released.pointer_released();
	released.tick(MAX_STEP);
	calm.tick(MAX_STEP);

	assert!(released.pointer().is_idle());
	assert_eq!(released.pool.particles[0], calm.pool.particles[0]);
}
