//! Engine configuration.
//!
//! Every numeric knob of the simulation lives here: population sizing,
//! sampling ranges for the per-star fields, parallax and attraction
//! strengths, and flash timing. A config value is supplied once at engine
//! construction and never mutated afterwards, so a page can run several
//! independent fields with different settings.
//!
//! All fields deserialize from JSON with missing fields falling back to the
//! defaults, which lets the host page override individual values from an
//! embedded `<script type="application/json">` block.

use serde::Deserialize;

use super::rng::RandomSource;

/// Half-open sampling interval `[min, max)`.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct SampleRange {
	pub min: f64,
	pub max: f64,
}

impl SampleRange {
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Draws a uniform value from the interval.
	pub fn sample(&self, rng: &mut dyn RandomSource) -> f64 {
		rng.range(self.min, self.max)
	}

	pub fn contains(&self, v: f64) -> bool {
		(self.min..self.max).contains(&v)
	}
}

/// Tuning parameters for the star field.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
	/// Hard cap on the number of stars regardless of surface area.
	pub max_stars: usize,
	/// One star per this many square pixels of surface area.
	pub density_divisor: f64,
	/// Base radius of a star, fixed at creation.
	pub radius: SampleRange,
	/// Downward drift per frame.
	pub fall_speed: SampleRange,
	/// Opacity at creation.
	pub initial_opacity: SampleRange,
	/// Per-frame opacity oscillation step.
	pub twinkle_rate: SampleRange,
	/// Lower opacity bound; the oscillation direction reflects here.
	pub opacity_floor: f64,
	/// Upper opacity bound.
	pub opacity_ceil: f64,
	/// Per-star scroll coupling, sampled from (0, 1].
	pub parallax_factor: SampleRange,
	/// Global scroll coupling applied on top of the per-star factor.
	pub parallax_strength: f64,
	/// Per-frame pulse phase advance.
	pub pulse_rate: SampleRange,
	/// Radius swing of the pulse sinusoid.
	pub pulse_amplitude: f64,
	/// Radius multiplier around which the pulse oscillates.
	pub pulse_baseline: f64,
	/// Probability that a star gets the warm gold tint.
	pub gold_chance: f64,
	/// Pointer distance inside which attraction applies.
	pub attraction_radius: f64,
	/// Fraction of the pointer offset applied per frame at zero distance.
	pub attraction_strength: f64,
	/// Effective radius above which a star records a trail.
	pub trail_threshold: f64,
	/// Maximum recorded trail positions per star.
	pub trail_capacity: usize,
	/// Effective radius above which rays are drawn.
	pub ray_threshold: f64,
	/// Frames between lightning flashes.
	pub flash_interval: u64,
	/// Flash streak width in pixels.
	pub flash_width: SampleRange,
	/// Flash streak height in pixels.
	pub flash_height: SampleRange,
	/// Flash peak opacity.
	pub flash_opacity: SampleRange,
	/// Flash lifetime in frames.
	pub flash_lifetime: SampleRange,
}

impl Default for StarfieldConfig {
	fn default() -> Self {
		Self {
			max_stars: 200,
			density_divisor: 2000.0,
			radius: SampleRange::new(0.5, 2.0),
			fall_speed: SampleRange::new(0.1, 0.4),
			initial_opacity: SampleRange::new(0.3, 1.0),
			twinkle_rate: SampleRange::new(0.01, 0.06),
			opacity_floor: 0.2,
			opacity_ceil: 1.0,
			parallax_factor: SampleRange::new(0.5, 1.0),
			parallax_strength: 0.05,
			pulse_rate: SampleRange::new(0.005, 0.03),
			pulse_amplitude: 0.15,
			pulse_baseline: 1.0,
			gold_chance: 0.15,
			attraction_radius: 120.0,
			attraction_strength: 0.02,
			trail_threshold: 1.6,
			trail_capacity: 8,
			ray_threshold: 1.2,
			flash_interval: 720,
			flash_width: SampleRange::new(1.0, 4.0),
			flash_height: SampleRange::new(100.0, 250.0),
			flash_opacity: SampleRange::new(0.1, 0.4),
			flash_lifetime: SampleRange::new(6.0, 24.0),
		}
	}
}

impl StarfieldConfig {
	/// Number of stars for a surface of the given size: area-proportional,
	/// capped at `max_stars`. Zero for a degenerate surface.
	pub fn star_count(&self, width: f64, height: f64) -> usize {
		if width <= 0.0 || height <= 0.0 {
			return 0;
		}
		let by_area = (width * height / self.density_divisor).floor() as usize;
		by_area.min(self.max_stars)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn star_count_is_min_of_cap_and_density() {
		let config = StarfieldConfig {
			max_stars: 400,
			density_divisor: 1000.0,
			..StarfieldConfig::default()
		};
		// floor(480000 / 1000) = 480, capped at 400.
		assert_eq!(config.star_count(800.0, 600.0), 400);

		let sparse = StarfieldConfig {
			max_stars: 400,
			density_divisor: 10_000.0,
			..StarfieldConfig::default()
		};
		assert_eq!(sparse.star_count(800.0, 600.0), 48);
	}

	#[test]
	fn star_count_zero_for_degenerate_surface() {
		let config = StarfieldConfig::default();
		assert_eq!(config.star_count(0.0, 600.0), 0);
		assert_eq!(config.star_count(800.0, 0.0), 0);
	}

	#[test]
	fn sample_range_draws_within_bounds() {
		let mut rng = super::super::rng::XorShift64::new(11);
		let range = SampleRange::new(0.5, 2.0);
		for _ in 0..500 {
			assert!(range.contains(range.sample(&mut rng)));
		}
	}

	#[test]
	fn partial_json_overrides_fall_back_to_defaults() {
		let config: StarfieldConfig =
			serde_json::from_str(r#"{"max_stars": 50, "gold_chance": 0.5}"#).unwrap();
		assert_eq!(config.max_stars, 50);
		assert_eq!(config.gold_chance, 0.5);
		// Untouched fields keep their defaults.
		assert_eq!(config.density_divisor, 2000.0);
		assert_eq!(config.trail_capacity, 8);
	}
}
