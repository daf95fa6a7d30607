//! starfield: an animated parallax star field behind page content.
//!
//! This crate provides a WASM canvas component that renders a decorative
//! field of drifting, twinkling stars with scroll parallax, pointer
//! attraction, and occasional lightning flashes. The simulation engine is
//! self-contained and deterministic under a seeded random source; the
//! browser glue lives in a single Leptos component.

use leptos::prelude::*;
use leptos_meta::*;
use log::{info, warn, Level};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::starfield::{StarfieldCanvas, StarfieldConfig, Theme};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("starfield: logging initialized");
}

/// Load tuning overrides from a script element with id="starfield-config".
/// Expected format: a JSON object with any subset of the config fields.
fn load_config() -> Option<StarfieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("starfield-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<StarfieldConfig>(&json_text) {
		Ok(config) => {
			info!(
				"starfield: loaded config overrides (max {} stars)",
				config.max_stars
			);
			Some(config)
		}
		Err(e) => {
			warn!("starfield: failed to parse config overrides: {}", e);
			None
		}
	}
}

/// Main application component.
/// Mounts the star field behind the page and leaves the foreground to the
/// host document's own content.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Starfield" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<StarfieldCanvas config=config fullscreen=true />
		<div class="starfield-overlay">
			<h1>"Night Sky"</h1>
			<p class="subtitle">"Scroll for parallax. Move the pointer to gather nearby stars."</p>
		</div>
	}
}
