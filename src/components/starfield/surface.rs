//! Drawing-surface abstraction.
//!
//! The engine paints through this trait rather than talking to the canvas
//! directly, so rendering logic is testable off-browser and the host decides
//! what actually backs the surface. [`CanvasSurface`] is the production
//! implementation over a 2D canvas context.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::theme::Color;

/// Gradient color stops as `(offset in [0, 1], color)` pairs.
pub type GradientStops<'a> = &'a [(f64, Color)];

/// Minimal set of paint primitives the star field needs.
pub trait Surface {
	/// Current pixel width of the backing buffer.
	fn width(&self) -> f64;

	/// Current pixel height of the backing buffer.
	fn height(&self) -> f64;

	/// Fills an axis-aligned rectangle with a solid color.
	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color);

	/// Fills a circle with a solid color.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);

	/// Fills a circle of `radius` with a radial gradient centered on it and
	/// extending out to `glow_radius`.
	fn fill_glow(&mut self, x: f64, y: f64, radius: f64, glow_radius: f64, stops: GradientStops);

	/// Strokes a straight line segment.
	fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Color);

	/// Fills a vertical streak of `w`×`h` centered on `x`, shaded by a
	/// top-to-bottom linear gradient.
	fn fill_streak(&mut self, x: f64, y: f64, w: f64, h: f64, stops: GradientStops);
}

/// [`Surface`] backed by a `CanvasRenderingContext2d`. Dimensions are read
/// from the canvas element so a host-side resize is picked up without
/// notifying the surface.
pub struct CanvasSurface {
	ctx: CanvasRenderingContext2d,
	canvas: HtmlCanvasElement,
}

impl CanvasSurface {
	/// Wraps the 2D context of `canvas`. Returns `None` if the context is
	/// unavailable, in which case the whole effect must be treated as
	/// absent.
	pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.ok()
			.flatten()?
			.dyn_into()
			.ok()?;
		Some(Self { ctx, canvas })
	}
}

impl Surface for CanvasSurface {
	fn width(&self) -> f64 {
		f64::from(self.canvas.width())
	}

	fn height(&self) -> f64 {
		f64::from(self.canvas.height())
	}

	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.fill_rect(x, y, w, h);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.begin_path();
		let _ = self
			.ctx
			.arc(x, y, radius, 0.0, std::f64::consts::TAU);
		self.ctx.fill();
	}

	fn fill_glow(&mut self, x: f64, y: f64, radius: f64, glow_radius: f64, stops: GradientStops) {
		let Ok(gradient) = self
			.ctx
			.create_radial_gradient(x, y, 0.0, x, y, glow_radius)
		else {
			return;
		};
		for (offset, color) in stops {
			let _ = gradient.add_color_stop(*offset as f32, &color.to_css());
		}
		#[allow(deprecated)]
		self.ctx.set_fill_style(&gradient);
		self.ctx.begin_path();
		let _ = self
			.ctx
			.arc(x, y, radius, 0.0, std::f64::consts::TAU);
		self.ctx.fill();
	}

	fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Color) {
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(x1, y1);
		self.ctx.line_to(x2, y2);
		self.ctx.stroke();
	}

	fn fill_streak(&mut self, x: f64, y: f64, w: f64, h: f64, stops: GradientStops) {
		let gradient = self.ctx.create_linear_gradient(x, y, x, y + h);
		for (offset, color) in stops {
			let _ = gradient.add_color_stop(*offset as f32, &color.to_css());
		}
		#[allow(deprecated)]
		self.ctx.set_fill_style(&gradient);
		self.ctx.fill_rect(x - w / 2.0, y, w, h);
	}
}
