//! Proximity links between nearby particles.
//!
//! A plain O(n²) scan bounded by a per-particle cap. At the particle counts the
//! quality profile allows (n ≤ 900) this stays well inside a frame budget.

use super::particles::Particle;

/// A visible connection between two particles, valid for one frame only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	/// Index of the first endpoint in the pool.
	pub a: usize,
	/// Index of the second endpoint; always greater than `a`.
	pub b: usize,
	pub squared_distance: f64,
}

/// Build all links for one frame.
///
/// For each particle `i` only particles `j > i` are scanned, and scanning for
/// `i` stops once it has accepted `max_links_per_particle` links.
pub fn build_links(
	particles: &[Particle],
	connect_distance: f64,
	max_links_per_particle: usize,
) -> Vec<Link> {
	let mut links = Vec::new();
	collect_links(particles, connect_distance, max_links_per_particle, &mut links);
	links
}

fn collect_links(
	particles: &[Particle],
	connect_distance: f64,
	max_links_per_particle: usize,
	out: &mut Vec<Link>,
) {
	if max_links_per_particle == 0 {
		return;
	}
	let max_d2 = connect_distance * connect_distance;

	for (i, a) in particles.iter().enumerate() {
		let mut made = 0;
		for (j, b) in particles.iter().enumerate().skip(i + 1) {
			let (dx, dy) = (a.x - b.x, a.y - b.y);
			let d2 = dx * dx + dy * dy;
			if d2 > max_d2 {
				continue;
			}
			out.push(Link {
				a: i,
				b: j,
				squared_distance: d2,
			});
			made += 1;
			if made >= max_links_per_particle {
				break;
			}
		}
	}
}

/// Owns the per-frame link buffer so its allocation is reused across frames.
#[derive(Clone, Debug, Default)]
pub struct LinkBuilder {
	links: Vec<Link>,
}

impl LinkBuilder {
	/// Clear and rebuild the buffer for the current particle positions.
	pub fn rebuild(
		&mut self,
		particles: &[Particle],
		connect_distance: f64,
		max_links_per_particle: usize,
	) -> &[Link] {
		self.links.clear();
		collect_links(
			particles,
			connect_distance,
			max_links_per_particle,
			&mut self.links,
		);
		&self.links
	}

	pub fn links(&self) -> &[Link] {
		&self.links
	}
}
