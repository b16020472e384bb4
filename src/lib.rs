//! ambient-field: decorative particle field for web pages.
//!
//! This crate provides a WASM-based canvas component that renders an animated
//! field of drifting, faintly linked particles with a recurring pulse along an X,
//! meant to sit behind page content.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// Enables the `js` entropy backend that `rand` needs on wasm.
use getrandom as _;

pub mod components;

pub use components::ambient_field::{
	AmbientFieldCanvas, BoundaryPolicy, DeviceSignals, FieldConfig, FieldError, FieldState,
	FieldTheme, QualityProfile,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("ambient-field: logging initialized");
}

/// Load overrides from a script element with id="field-config".
/// Expected format: a JSON object, see [`FieldConfig`].
fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<FieldConfig>(&json_text) {
		Ok(config) => {
			info!("ambient-field: loaded config overrides");
			Some(config)
		}
		Err(e) => {
			warn!("ambient-field: failed to parse field config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads configuration from the DOM and renders the field behind the page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Ambient Field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<AmbientFieldCanvas config=config />
	}
}
