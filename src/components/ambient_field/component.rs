//! Leptos component wrapping the ambient field canvas.
//!
//! The component creates a fixed, full-viewport canvas, reads device signals,
//! and wires window-level pointer, touch and resize listeners into a shared
//! [`FieldState`]. An animation loop runs via `requestAnimationFrame`, handing
//! each timestamp to the [`FrameDriver`].

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;
use web_sys::{
	AddEventListenerOptions, CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent,
	TouchEvent, Window,
};

use super::FieldError;
use super::frame::FrameDriver;
use super::quality::QualityProfile;
use super::render;
use super::scale::SurfaceMetrics;
use super::state::FieldState;
use super::theme::FieldTheme;
use super::types::{DeviceSignals, FieldConfig};

type SharedContext = Rc<RefCell<Option<FieldContext>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Bundles field state with the frame driver and the canvas it draws to.
struct FieldContext {
	state: FieldState,
	driver: FrameDriver,
	theme: FieldTheme,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

/// Renders the ambient particle field behind page content.
///
/// The canvas covers the viewport and ignores pointer events; pointer motion
/// is observed on the window so page content stays interactive. `config`
/// overrides individual quality settings and the theme.
#[component]
pub fn AmbientFieldCanvas(#[prop(optional)] config: FieldConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();

		if let Err(e) = start(canvas, &config, &context) {
			error!("ambient-field: not starting: {}", e);
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="ambient-field-canvas"
			aria-hidden="true"
			style="display: block; position: fixed; inset: 0; z-index: -1; pointer-events: none;"
		/>
	}
}

/// Build the field context and start the listeners and the frame loop.
fn start(
	canvas: HtmlCanvasElement,
	config: &FieldConfig,
	context: &SharedContext,
) -> Result<(), FieldError> {
	let window = web_sys::window().ok_or(FieldError::WindowUnavailable)?;
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.map_err(|_| FieldError::SurfaceUnavailable("2d context request failed"))?
		.ok_or(FieldError::SurfaceUnavailable("no 2d context"))?
		.dyn_into()
		.map_err(|_| FieldError::SurfaceUnavailable("unexpected context type"))?;

	let signals = read_device_signals(&window);
	let profile = QualityProfile::compute(&signals).with_overrides(config);
	let theme = config
		.theme
		.as_deref()
		.map(FieldTheme::by_name)
		.unwrap_or_default();
	info!(
		"ambient-field: {} particles, links {}px x{}, theme {}, reduced motion {}",
		profile.particle_count,
		profile.connect_distance,
		profile.max_links_per_particle,
		theme.name,
		profile.reduced_motion
	);

	let (w, h) = viewport_size(&window);
	let metrics = SurfaceMetrics::new(w, h, signals.device_pixel_ratio, profile.pixel_ratio_cap);
	apply_size(&canvas, &metrics);

	*context.borrow_mut() = Some(FieldContext {
		driver: FrameDriver::new(profile.reduced_motion),
		state: FieldState::new(profile, metrics, StdRng::from_entropy()),
		theme,
		canvas,
		ctx,
	});

	add_listeners(&window, context);

	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let (context_anim, animate_inner) = (context.clone(), animate.clone());
	*animate.borrow_mut() = Some(Closure::new(move |now: f64| {
		let keep_going = match *context_anim.borrow_mut() {
			Some(ref mut c) => {
				c.driver.on_frame(now, &mut c.state, &mut c.ctx, &c.theme);
				c.driver.keeps_running()
			}
			None => false,
		};
		if keep_going {
			request_frame(&animate_inner);
		}
	}));
	request_frame(&animate);

	Ok(())
}

fn request_frame(callback: &FrameCallback) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Some(ref cb) = *callback.borrow() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Pointer, touch and resize listeners. They live as long as the page.
fn add_listeners(window: &Window, context: &SharedContext) {
	let options = AddEventListenerOptions::new();
	options.set_passive(true);
	let listen = |event: &str, cb: &JsValue| {
		let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
			event,
			cb.unchecked_ref(),
			&options,
		);
	};

	let context_mm = context.clone();
	let on_mousemove = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state
				.pointer_moved(ev.client_x() as f64, ev.client_y() as f64, false);
		}
	});
	listen("mousemove", on_mousemove.as_ref());
	on_mousemove.forget();

	// A null related target means the mouse left the window.
	let context_mo = context.clone();
	let on_mouseout = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
		if ev.related_target().is_some() {
			return;
		}
		if let Some(ref mut c) = *context_mo.borrow_mut() {
			c.state.pointer_released();
		}
	});
	listen("mouseout", on_mouseout.as_ref());
	on_mouseout.forget();

	let context_tm = context.clone();
	let on_touchmove = Closure::<dyn FnMut(TouchEvent)>::new(move |ev: TouchEvent| {
		let Some(touch) = ev.touches().get(0) else {
			return;
		};
		if let Some(ref mut c) = *context_tm.borrow_mut() {
			c.state
				.pointer_moved(touch.client_x() as f64, touch.client_y() as f64, true);
		}
	});
	listen("touchmove", on_touchmove.as_ref());
	on_touchmove.forget();

	let context_te = context.clone();
	let on_touchend = Closure::<dyn FnMut(TouchEvent)>::new(move |ev: TouchEvent| {
		if ev.touches().length() > 0 {
			return;
		}
		if let Some(ref mut c) = *context_te.borrow_mut() {
			c.state.pointer_released();
		}
	});
	listen("touchend", on_touchend.as_ref());
	on_touchend.forget();

	let context_rs = context.clone();
	let on_resize = Closure::<dyn FnMut()>::new(move || {
		let Some(win) = web_sys::window() else {
			return;
		};
		if let Some(ref mut c) = *context_rs.borrow_mut() {
			let (w, h) = viewport_size(&win);
			c.state.resize(w, h, win.device_pixel_ratio());
			apply_size(&c.canvas, &c.state.metrics);
			debug!(
				"ambient-field: resized to {}x{} (buffer {}x{})",
				w, h, c.state.metrics.buffer_width, c.state.metrics.buffer_height
			);
			// Resizing clears the canvas; a stopped loop would leave it blank.
			if !c.driver.keeps_running() {
				render::render(&c.state, &mut c.ctx, &c.theme);
			}
		}
	});
	listen("resize", on_resize.as_ref());
	on_resize.forget();
}

fn read_device_signals(window: &Window) -> DeviceSignals {
	let navigator = window.navigator();
	let user_agent = navigator.user_agent().unwrap_or_default();
	let is_mobile = ["Mobi", "Android", "iPhone", "iPad"]
		.iter()
		.any(|m| user_agent.contains(m));
	let reduced_motion = window
		.match_media("(prefers-reduced-motion: reduce)")
		.ok()
		.flatten()
		.is_some_and(|q| q.matches());

	DeviceSignals {
		is_mobile,
		reduced_motion,
		core_count: navigator.hardware_concurrency() as u32,
		device_pixel_ratio: window.device_pixel_ratio(),
	}
}

fn viewport_size(window: &Window) -> (f64, f64) {
	let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
	(read(window.inner_width()), read(window.inner_height()))
}

fn apply_size(canvas: &HtmlCanvasElement, metrics: &SurfaceMetrics) {
	canvas.set_width(metrics.buffer_width);
	canvas.set_height(metrics.buffer_height);
	// Spelled out: leptos' `ElementExt::style` shadows the web-sys getter.
	let style = HtmlElement::style(canvas);
	let _ = style.set_property("width", &format!("{}px", metrics.logical_width));
	let _ = style.set_property("height", &format!("{}px", metrics.logical_height));
}
