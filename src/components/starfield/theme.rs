//! Visual theming for the star field.

use super::particle::StarTint;

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

	/// Same hue at zero alpha. Used as the outer stop of glow gradients so
	/// the falloff fades in color space rather than jumping to black.
	pub fn transparent(self) -> Self {
		Self { a: 0.0, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Colors for the backdrop and the two star tints.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Page background. Painted translucently each frame so prior frames
	/// linger as motion trails.
	pub background: Color,
	/// Alpha of the per-frame background fill. Lower values leave longer
	/// trails.
	pub fade_alpha: f64,
	/// Common star color.
	pub white: Color,
	/// Rare warm accent color.
	pub gold: Color,
	/// Lightning streak color.
	pub flash: Color,
}

impl Theme {
	/// Night-sky theme matching the page's dark palette.
	pub fn night() -> Self {
		Self {
			background: Color::rgb(10, 14, 23),
			fade_alpha: 0.05,
			white: Color::rgb(255, 255, 255),
			gold: Color::rgb(255, 195, 0),
			flash: Color::rgb(255, 255, 255),
		}
	}

	/// Color for a star tint.
	pub fn tint(&self, tint: StarTint) -> Color {
		match tint {
			StarTint::White => self.white,
			StarTint::Gold => self.gold,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::night()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn opaque_colors_render_as_hex() {
		assert_eq!(Color::rgb(10, 14, 23).to_css(), "#0a0e17");
	}

	#[test]
	fn translucent_colors_render_as_rgba() {
		assert_eq!(
			Color::rgba(255, 195, 0, 0.5).to_css(),
			"rgba(255, 195, 0, 0.5)"
		);
	}

	#[test]
	fn transparent_keeps_hue() {
		let c = Color::rgb(255, 195, 0).transparent();
		assert_eq!((c.r, c.g, c.b), (255, 195, 0));
		assert_eq!(c.a, 0.0);
	}

	#[test]
	fn tints_resolve_per_class() {
		let theme = Theme::default();
		assert_eq!(theme.tint(StarTint::White), theme.white);
		assert_eq!(theme.tint(StarTint::Gold), theme.gold);
	}
}
