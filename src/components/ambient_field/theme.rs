//! Visual theming for the ambient field.
//!
//! Colors are plain 0-255 channels plus a 0-1 alpha. Every draw call derives
//! its final alpha from the theme color and a per-element intensity.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Grey level with full alpha, used by the noise overlay.
	pub const fn grey(v: u8) -> Self {
		Self::rgb(v, v, v)
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct FieldTheme {
	pub name: &'static str,
	/// Opaque background fill
	pub background: Color,
	/// Particle dots
	pub particle: Color,
	/// Proximity links
	pub link: Color,
	/// Pulse strokes and head glow
	pub pulse: Color,
	/// Zone sparks and hex tags
	pub zone: Color,
}

impl FieldTheme {
	/// White on black (default)
	pub fn mono() -> Self {
		Self {
			name: "mono",
			background: Color::rgb(0, 0, 0),
			particle: Color::rgb(255, 255, 255),
			link: Color::rgb(255, 255, 255),
			pulse: Color::rgb(255, 255, 255),
			zone: Color::rgb(255, 255, 255),
		}
	}

	/// Phosphor green links and X on black
	pub fn matrix() -> Self {
		Self {
			name: "matrix",
			background: Color::rgb(0, 0, 0),
			particle: Color::rgb(255, 255, 255),
			link: Color::rgb(0, 255, 102),
			pulse: Color::rgb(0, 255, 102),
			zone: Color::rgb(255, 255, 255),
		}
	}

	/// Look up a theme by name, falling back to [`FieldTheme::mono`].
	pub fn by_name(name: &str) -> Self {
		match name {
			"matrix" => Self::matrix(),
			_ => Self::mono(),
		}
	}
}

impl Default for FieldTheme {
	fn default() -> Self {
		Self::mono()
	}
}
