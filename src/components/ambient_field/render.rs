//! Rendering for the ambient field.
//!
//! Everything is drawn back-to-front in buffer space:
//! 1. Opaque background
//! 2. Proximity links, then particles
//! 3. The dither/noise overlay, screen-blended so it only lifts the blacks
//! 4. Zone sparks and tags (when enabled)
//! 5. The X pulse: two stroke passes, the travelling head glow, a lighter mask

use std::f64::consts::TAU;

use super::pulse::XPath;
use super::sparks::{SPARK_RAYS, zone_radius};
use super::state::{FieldState, PULSE_STRENGTH};
use super::surface::{BlendMode, DrawSurface, Segment};
use super::theme::{Color, FieldTheme};

/// Pulses weaker than this are not drawn at all.
const PULSE_VISIBLE: f64 = 0.02;

/// Simple pseudo-random function (deterministic) over tile coordinates and time.
pub fn pseudo_random(x: f64, y: f64, t: f64) -> f64 {
	let v = (x * 12.9898 + y * 78.233 + t * 37.719).sin() * 43758.5453;
	v - v.floor()
}

/// Renders one complete frame of the field.
pub fn render(state: &FieldState, surface: &mut impl DrawSurface, theme: &FieldTheme) {
	let (w, h) = (state.metrics.width(), state.metrics.height());

	surface.fill_rect(0.0, 0.0, w, h, theme.background);

	draw_links(state, surface, theme);
	draw_particles(state, surface, theme);

	if state.profile.noise_strength > 0.0 {
		draw_noise(state, surface);
	}

	if state.profile.zone_effects {
		draw_zone(state, surface, theme);
	}

	if state.profile.pulse_enabled() {
		draw_pulse(state, surface, theme);
	}
}

fn draw_noise(state: &FieldState, surface: &mut impl DrawSurface) {
	let (w, h) = (state.metrics.width(), state.metrics.height());
	let strength = state.profile.noise_strength;
	// Coarse enough to read as grain, not as a pattern.
	let step = (state.metrics.px(6.0).floor()).max(3.0);

	surface.set_blend(BlendMode::Screen);
	let mut y = 0.0;
	while y < h {
		let mut x = 0.0;
		while x < w {
			let v = (pseudo_random(x, y, state.time) - 0.5) * strength;
			let level = ((v + 0.5) * 8.0).floor().clamp(0.0, 255.0) as u8;
			surface.fill_rect(x, y, step, step, Color::grey(level));
			x += step;
		}
		y += step;
	}

	surface.fill_rect(0.0, 0.0, w, h, Color::rgba(255, 255, 255, 0.03 * 0.12));
	surface.set_blend(BlendMode::Normal);
}

fn draw_links(state: &FieldState, surface: &mut impl DrawSurface, theme: &FieldTheme) {
	let max_d = state.connect_distance();
	if max_d <= 0.0 {
		return;
	}
	let width = state.metrics.px(1.0);
	let particles = &state.pool.particles;

	for link in state.links.links() {
		let (a, b) = (&particles[link.a], &particles[link.b]);
		let fade = 1.0 - link.squared_distance.sqrt() / max_d;
		let alpha = 0.06 * fade;

		surface.stroke_line(
			Segment::new(a.x, a.y, b.x, b.y),
			theme.link.with_alpha(alpha * theme.link.a),
			width,
		);
	}
}

fn draw_particles(state: &FieldState, surface: &mut impl DrawSurface, theme: &FieldTheme) {
	let dpr = state.metrics.device_pixel_ratio;
	for p in &state.pool.particles {
		// Slow breathing so the field never looks frozen.
		let breathe = 0.85 + 0.15 * (state.time * 0.8 + p.phase).sin();
		let alpha = 0.22 * breathe * theme.particle.a;
		let radius = zone_radius(p, state.time, dpr);
		surface.fill_circle(p.x, p.y, radius, theme.particle.with_alpha(alpha));
	}
}

fn draw_zone(state: &FieldState, surface: &mut impl DrawSurface, theme: &FieldTheme) {
	let m = &state.metrics;

	let ray_width = m.px(0.8);
	for spark in &state.zone.sparks {
		let t = spark.life();
		let len = m.px(2.0 + 8.0 * t);
		let rays: Vec<Segment> = (0..SPARK_RAYS)
			.map(|k| {
				let a = spark.angle + TAU * k as f64 / SPARK_RAYS as f64;
				Segment::new(
					spark.x,
					spark.y,
					spark.x + a.cos() * len,
					spark.y + a.sin() * len,
				)
			})
			.collect();
		surface.stroke_segments(&rays, theme.zone.with_alpha(0.4 * (1.0 - t)), ray_width);
	}

	let font = format!("{}px monospace", m.px(12.0));
	let color = theme.zone.with_alpha(0.5);
	for p in state.pool.particles.iter().filter(|p| p.in_zone) {
		surface.fill_text(
			&format!("#{:06x}", p.tag),
			p.x + m.px(10.0),
			p.y + m.px(6.0),
			&font,
			color,
		);
	}
}

fn draw_pulse(state: &FieldState, surface: &mut impl DrawSurface, theme: &FieldTheme) {
	let strength = state.pulse.intensity() * PULSE_STRENGTH;
	if strength <= PULSE_VISIBLE {
		return;
	}
	let path: &XPath = &state.x_path;
	let thick = path.thickness;
	let color = theme.pulse;

	// Soft glow first, then the core line.
	surface.stroke_segments(&path.segments, color.with_alpha(0.035 * strength), thick * 4.2);
	surface.stroke_segments(&path.segments, color.with_alpha(0.12 * strength), thick * 1.6);

	let (hx, hy) = path.point_at(state.pulse.head());
	let radius = state.metrics.px(10.0 + 16.0 * strength);
	surface.fill_radial_glow(
		hx,
		hy,
		radius,
		&[
			(0.0, color.with_alpha(0.30 * strength)),
			(0.35, color.with_alpha(0.10 * strength)),
			(1.0, color.with_alpha(0.0)),
		],
	);

	let mask = 0.10 * strength;
	if mask > 0.01 {
		surface.set_blend(BlendMode::Lighter);
		surface.stroke_segments(&path.segments, color.with_alpha(0.10 * mask), thick * 6.5);
		surface.set_blend(BlendMode::Normal);
	}
}
