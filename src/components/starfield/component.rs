//! Leptos component wrapping the star field canvas.
//!
//! The component creates a full-viewport canvas layered behind the page
//! content and wires the browser up to the engine: `mousemove` and `scroll`
//! listeners feed pointer and scroll state, a `resize` listener re-derives
//! the population, and a `requestAnimationFrame` chain drives one engine
//! frame per display frame. The engine itself never touches the DOM.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use super::config::StarfieldConfig;
use super::engine::Starfield;
use super::rng::XorShift64;
use super::surface::CanvasSurface;
use super::theme::Theme;

/// Shared engine + surface pair the event closures mutate between frames.
struct FieldContext {
	engine: Starfield,
	surface: CanvasSurface,
}

/// Renders an animated star field on a background canvas.
///
/// By default the canvas fills the viewport, sits behind the page content,
/// and ignores pointer events; set `fullscreen = false` with explicit
/// `width`/`height` to embed it in a container instead. `config` overrides
/// the default tuning; if the canvas or its 2D context is unavailable the
/// effect is silently absent.
#[component]
pub fn StarfieldCanvas(
	#[prop(default = None)] config: Option<StarfieldConfig>,
	#[prop(default = true)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<FieldContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let scroll_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let mouse_cb: Rc<RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>> =
		Rc::new(RefCell::new(None));
	let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let (context_init, animate_init) = (context.clone(), animate.clone());
	let (resize_cb_init, scroll_cb_init, mouse_cb_init) =
		(resize_cb.clone(), scroll_cb.clone(), mouse_cb.clone());
	let raf_id_init = raf_id.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(surface) = CanvasSurface::new(canvas.clone()) else {
			warn!("starfield: no 2d canvas context, effect disabled");
			return;
		};

		let mut engine = Starfield::new(
			config.clone().unwrap_or_default(),
			Theme::default(),
			w,
			h,
			Box::new(XorShift64::new(js_sys::Date::now() as u64)),
		);
		engine.set_scroll(window.scroll_y().unwrap_or(0.0));
		engine.start();
		*context_init.borrow_mut() = Some(FieldContext { engine, surface });

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.engine.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let context_scroll = context_init.clone();
		*scroll_cb_init.borrow_mut() = Some(Closure::new(move || {
			let win: Window = web_sys::window().unwrap();
			if let Some(ref mut c) = *context_scroll.borrow_mut() {
				c.engine.set_scroll(win.scroll_y().unwrap_or(0.0));
			}
		}));
		if let Some(ref cb) = *scroll_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("scroll", cb.as_ref().unchecked_ref());
		}

		let (context_mouse, canvas_mouse) = (context_init.clone(), canvas.clone());
		*mouse_cb_init.borrow_mut() = Some(Closure::new(move |ev: MouseEvent| {
			let rect = canvas_mouse.get_bounding_client_rect();
			if let Some(ref mut c) = *context_mouse.borrow_mut() {
				c.engine.set_pointer(
					ev.client_x() as f64 - rect.left(),
					ev.client_y() as f64 - rect.top(),
				);
			}
		}));
		if let Some(ref cb) = *mouse_cb_init.borrow() {
			let _ =
				window.add_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		let raf_id_anim = raf_id_init.clone();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			raf_id_anim.set(None);
			let keep_going = match *context_anim.borrow_mut() {
				Some(ref mut c) => c.engine.frame(&mut c.surface),
				None => false,
			};
			// Reschedule only while the engine reports Running; once
			// stopped the chain ends here.
			if keep_going {
				if let Some(ref cb) = *animate_inner.borrow() {
					if let Ok(id) = web_sys::window()
						.unwrap()
						.request_animation_frame(cb.as_ref().unchecked_ref())
					{
						raf_id_anim.set(Some(id));
					}
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				raf_id_init.set(Some(id));
			}
		}
	});

	let (context_cleanup, raf_cleanup) = (context.clone(), raf_id.clone());
	// `on_cleanup` requires `Send + Sync`, but the captured `Rc` handles are
	// neither; in this CSR (single-thread) context wrapping them in a
	// `SendWrapper` satisfies the bound without changing behavior.
	let cleanup_handles =
		leptos::__reexports::send_wrapper::SendWrapper::new((context_cleanup, raf_cleanup));
	on_cleanup(move || {
		let (context_cleanup, raf_cleanup) = &*cleanup_handles;
		if let Some(ref mut c) = *context_cleanup.borrow_mut() {
			c.engine.stop();
		}
		// Cancel the pending callback as well so no queued frame runs.
		if let Some(id) = raf_cleanup.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="starfield-canvas"
			style="display: block; position: fixed; inset: 0; z-index: -1; pointer-events: none;"
		/>
	}
}
