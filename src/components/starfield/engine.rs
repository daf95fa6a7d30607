//! Star field engine: particle store, external inputs, and the frame loop
//! state machine.
//!
//! A [`Starfield`] owns the full simulation context (the star population,
//! the last-known scroll offset and pointer position, and the flash timer),
//! so multiple independent instances can coexist and tests can drive the
//! loop deterministically. The engine registers no event listeners and never
//! schedules its own frames; the host calls [`Starfield::frame`] once per
//! display frame and feeds inputs through the setters as they arrive.
//!
//! Everything runs on one cooperative loop: the update step is the only
//! writer of the store and the render step the only reader, in that order,
//! within a single `frame` call. Inputs are sampled read-latest-wins at the
//! start of the update step. `resize` replaces the whole population in one
//! assignment, so an in-flight frame never observes a half-rebuilt store.

use log::debug;

use super::config::StarfieldConfig;
use super::particle::{spawn_field, Star};
use super::render;
use super::rng::RandomSource;
use super::surface::Surface;
use super::theme::Theme;

/// Frame-loop lifecycle. Transitions: `Idle → Running` on `start`,
/// `Running → Stopped` on `stop`. All other calls are no-ops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	Idle,
	Running,
	Stopped,
}

/// A transient lightning streak. At most one is alive at a time; the spawn
/// interval is far longer than any flash's life.
#[derive(Clone, Debug)]
pub struct Flash {
	/// Horizontal center of the streak.
	pub x: f64,
	pub width: f64,
	pub height: f64,
	pub peak_opacity: f64,
	/// Frames lived so far.
	pub age: f64,
	/// Frames until the flash disappears.
	pub lifetime: f64,
}

impl Flash {
	/// Remaining brightness in [0, 1], ramping down over the flash's life.
	pub fn intensity(&self) -> f64 {
		(1.0 - self.age / self.lifetime).max(0.0)
	}
}

/// The animated star field behind the page.
pub struct Starfield {
	config: StarfieldConfig,
	theme: Theme,
	stars: Vec<Star>,
	width: f64,
	height: f64,
	scroll: f64,
	pointer: Option<(f64, f64)>,
	phase: Phase,
	rng: Box<dyn RandomSource>,
	flash: Option<Flash>,
	frames_until_flash: u64,
}

impl Starfield {
	/// Creates an idle engine for a surface of the given size. No stars
	/// exist until [`start`](Self::start).
	pub fn new(
		config: StarfieldConfig,
		theme: Theme,
		width: f64,
		height: f64,
		rng: Box<dyn RandomSource>,
	) -> Self {
		Self {
			config,
			theme,
			stars: Vec::new(),
			width,
			height,
			scroll: 0.0,
			pointer: None,
			phase: Phase::Idle,
			rng,
			flash: None,
			// First flash fires on the first frame, matching the page's
			// immediate strike before the interval kicks in.
			frames_until_flash: 0,
		}
	}

	/// Begins the frame loop: derives the initial population and moves to
	/// `Running`. A no-op while already running. A stopped engine may be
	/// started again; it gets a fresh population.
	pub fn start(&mut self) {
		if self.phase == Phase::Running {
			return;
		}
		self.stars = spawn_field(&self.config, self.width, self.height, self.rng.as_mut());
		self.phase = Phase::Running;
		debug!("starfield: started with {} stars", self.stars.len());
	}

	/// Halts the frame loop. After this returns, [`frame`](Self::frame)
	/// performs no work, so no queued callback can render. A no-op unless
	/// running.
	pub fn stop(&mut self) {
		if self.phase == Phase::Running {
			self.phase = Phase::Stopped;
			debug!("starfield: stopped");
		}
	}

	/// Whether the engine is in the `Running` phase.
	pub fn is_running(&self) -> bool {
		self.phase == Phase::Running
	}

	/// Adopts new surface dimensions and replaces the entire population to
	/// match, sized by the population law. Does not change the phase.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.stars = spawn_field(&self.config, width, height, self.rng.as_mut());
	}

	/// Records the current vertical scroll offset.
	pub fn set_scroll(&mut self, scroll: f64) {
		self.scroll = scroll.max(0.0);
	}

	/// Records the last known pointer position in surface coordinates.
	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer = Some((x, y));
	}

	/// Runs one frame, update step then render step, and reports whether
	/// the host should schedule another. Returns `false` without touching
	/// the surface unless the engine is running.
	pub fn frame(&mut self, surface: &mut dyn Surface) -> bool {
		if self.phase != Phase::Running {
			return false;
		}
		self.tick();
		render::draw_frame(self, surface);
		true
	}

	/// Update step: advances every star and the flash lifecycle by one
	/// frame. Stars are mutually independent; iteration order is
	/// irrelevant.
	fn tick(&mut self) {
		let (width, height) = (self.width, self.height);
		let (scroll, pointer) = (self.scroll, self.pointer);
		for star in &mut self.stars {
			star.step(&self.config, width, height, scroll, pointer, self.rng.as_mut());
		}
		self.tick_flash();
	}

	fn tick_flash(&mut self) {
		if let Some(flash) = &mut self.flash {
			flash.age += 1.0;
			if flash.age >= flash.lifetime {
				self.flash = None;
			}
		}
		if self.width <= 0.0 || self.height <= 0.0 {
			return;
		}
		if self.frames_until_flash == 0 {
			self.flash = Some(Flash {
				x: self.rng.range(0.0, self.width),
				width: self.config.flash_width.sample(self.rng.as_mut()),
				height: self.config.flash_height.sample(self.rng.as_mut()),
				peak_opacity: self.config.flash_opacity.sample(self.rng.as_mut()),
				age: 0.0,
				lifetime: self.config.flash_lifetime.sample(self.rng.as_mut()),
			});
			self.frames_until_flash = self.config.flash_interval;
		} else {
			self.frames_until_flash -= 1;
		}
	}

	/// The tuning supplied at construction.
	pub fn config(&self) -> &StarfieldConfig {
		&self.config
	}

	/// The colors supplied at construction.
	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	/// The current population.
	pub fn stars(&self) -> &[Star] {
		&self.stars
	}

	/// The last recorded scroll offset.
	pub fn scroll(&self) -> f64 {
		self.scroll
	}

	/// The live flash, if one is mid-strike.
	pub fn flash(&self) -> Option<&Flash> {
		self.flash.as_ref()
	}

	/// Current surface dimensions as `(width, height)`.
	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}
}
