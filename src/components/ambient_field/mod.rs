//! Ambient particle field component.
//!
//! Renders a decorative, full-viewport particle field on an HTML canvas:
//! - Drifting points with a per-particle wobble, wrapped at the edges
//! - Faint links between nearby points, capped per particle
//! - Gentle repulsion from the pointer, stronger when it moves fast
//! - A recurring energy pulse travelling along a fixed X
//!
//! All tuning comes from a [`QualityProfile`] computed from device signals, so
//! mobile, desktop and reduced-motion renditions share one implementation.
//!
//! # Example
//!
//! ```ignore
//! view! { <AmbientFieldCanvas config=FieldConfig::default() /> }
//! ```

mod component;
pub mod frame;
pub mod links;
pub mod particles;
pub mod pointer;
pub mod pulse;
pub mod quality;
pub mod render;
pub mod scale;
pub mod sparks;
pub mod state;
pub mod surface;
pub mod theme;
mod types;

pub use component::AmbientFieldCanvas;
pub use frame::FrameDriver;
pub use quality::QualityProfile;
pub use state::FieldState;
pub use surface::{BlendMode, DrawSurface, Segment};
pub use theme::{Color, FieldTheme};
pub use types::{BoundaryPolicy, DeviceSignals, FieldConfig};

use thiserror::Error;

/// Reasons the field cannot start.
#[derive(Debug, Error)]
pub enum FieldError {
	/// No browser window (not running in a page).
	#[error("window unavailable")]
	WindowUnavailable,
	/// The canvas or its 2d context could not be obtained.
	#[error("drawing surface unavailable: {0}")]
	SurfaceUnavailable(&'static str),
}
