//! Frame painting for the star field.
//!
//! Drawing reads the engine state and never mutates it. Each frame paints a
//! translucent background wash over the previous frame (so motion leaves
//! fading trails), then the active flash streak, then every star: a radial
//! glow, and for large stars the recorded trail plus decorative rays. Draw
//! order across stars carries no meaning.

use std::f64::consts::TAU;

use super::engine::{Flash, Starfield};
use super::particle::Star;
use super::surface::Surface;
use super::theme::Theme;

/// Glow gradient extent as a multiple of the star's drawn radius.
const GLOW_EXTENT: f64 = 3.0;
/// Ray span, in multiples of the drawn radius.
const RAY_INNER: f64 = 2.0;
const RAY_OUTER: f64 = 4.0;
/// Stroke opacity of rays relative to the star's current opacity.
const RAY_ALPHA: f64 = 0.3;
/// Peak opacity of trail dots relative to the star's current opacity.
const TRAIL_ALPHA: f64 = 0.25;

/// Paints one frame of `field` onto `surface`.
pub fn draw_frame(field: &Starfield, surface: &mut dyn Surface) {
	let theme = field.theme();
	let (width, height) = (surface.width(), surface.height());

	// Translucent wash instead of a hard clear; prior frames linger.
	surface.fill_rect(
		0.0,
		0.0,
		width,
		height,
		theme.background.with_alpha(theme.fade_alpha),
	);

	if let Some(flash) = field.flash() {
		draw_flash(flash, theme, surface);
	}

	for star in field.stars() {
		draw_star(field, star, surface);
	}
}

fn draw_flash(flash: &Flash, theme: &Theme, surface: &mut dyn Surface) {
	let opacity = flash.peak_opacity * flash.intensity();
	if opacity <= 0.0 {
		return;
	}
	let color = theme.flash;
	surface.fill_streak(
		flash.x,
		0.0,
		flash.width,
		flash.height,
		&[
			(0.0, color.with_alpha(opacity)),
			(0.5, color.with_alpha(opacity * 0.5)),
			(1.0, color.transparent()),
		],
	);
}

fn draw_star(field: &Starfield, star: &Star, surface: &mut dyn Surface) {
	let config = field.config();
	let theme = field.theme();
	let radius = star.effective_radius(config);
	let (x, y) = (star.x, star.y + star.parallax_offset(config, field.scroll()));
	let color = theme.tint(star.tint);

	surface.fill_glow(
		x,
		y,
		radius,
		radius * GLOW_EXTENT,
		&[
			(0.0, color.with_alpha(star.opacity)),
			(0.5, color.with_alpha(star.opacity * 0.5)),
			(1.0, color.transparent()),
		],
	);

	if radius <= config.ray_threshold {
		return;
	}

	// Trail dots fade toward the older end of the buffer.
	let len = star.trail.len();
	for (i, &(tx, ty)) in star.trail.iter().enumerate() {
		let fade = (i + 1) as f64 / len as f64;
		surface.fill_circle(
			tx,
			ty,
			radius * 0.4,
			color.with_alpha(star.opacity * TRAIL_ALPHA * fade),
		);
	}

	let rays = star.tint.ray_count();
	let ray_color = color.with_alpha(star.opacity * RAY_ALPHA);
	for i in 0..rays {
		let angle = TAU * i as f64 / rays as f64;
		let (dx, dy) = (angle.cos(), angle.sin());
		surface.stroke_line(
			x + dx * radius * RAY_INNER,
			y + dy * radius * RAY_INNER,
			x + dx * radius * RAY_OUTER,
			y + dy * radius * RAY_OUTER,
			1.0,
			ray_color,
		);
	}
}
