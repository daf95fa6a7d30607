//! Star records, population sampling, and the per-star update step.
//!
//! A star is a point with independent stochastic motion: it drifts downward,
//! oscillates its opacity between bounds (twinkle), scales its radius on a
//! sinusoid (pulse), couples to the page scroll through a per-star parallax
//! factor, and is nudged toward the pointer when close to it. Stars are
//! created in bulk by [`spawn_field`] and live until the whole population is
//! replaced on resize; reaching the bottom edge respawns the star in place
//! at the top.

use std::collections::VecDeque;
use std::f64::consts::TAU;

use super::config::StarfieldConfig;
use super::rng::RandomSource;

/// Color class of a star, fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StarTint {
	White,
	Gold,
}

impl StarTint {
	/// Number of decorative rays drawn around a large star.
	pub fn ray_count(self) -> usize {
		match self {
			StarTint::White => 4,
			StarTint::Gold => 6,
		}
	}
}

/// One simulated star.
#[derive(Clone, Debug)]
pub struct Star {
	pub x: f64,
	pub y: f64,
	/// Base radius; the rendered radius is this times the pulse multiplier.
	pub radius: f64,
	pub fall_speed: f64,
	pub opacity: f64,
	pub twinkle_rate: f64,
	/// +1.0 or -1.0; reflects when opacity reaches a bound.
	pub twinkle_dir: f64,
	pub parallax_factor: f64,
	pub pulse_phase: f64,
	pub pulse_rate: f64,
	pub tint: StarTint,
	/// Recent post-parallax positions, newest at the back. Only populated
	/// while the star is large enough to trail.
	pub trail: VecDeque<(f64, f64)>,
}

impl Star {
	/// Samples a fresh star uniformly over the surface and the configured
	/// field ranges.
	pub fn sample(
		config: &StarfieldConfig,
		width: f64,
		height: f64,
		rng: &mut dyn RandomSource,
	) -> Self {
		Self {
			x: rng.range(0.0, width),
			y: rng.range(0.0, height),
			radius: config.radius.sample(rng),
			fall_speed: config.fall_speed.sample(rng),
			opacity: config.initial_opacity.sample(rng),
			twinkle_rate: config.twinkle_rate.sample(rng),
			twinkle_dir: if rng.chance(0.5) { 1.0 } else { -1.0 },
			parallax_factor: config.parallax_factor.sample(rng),
			pulse_phase: rng.range(0.0, TAU),
			pulse_rate: config.pulse_rate.sample(rng),
			tint: if rng.chance(config.gold_chance) {
				StarTint::Gold
			} else {
				StarTint::White
			},
			trail: VecDeque::new(),
		}
	}

	/// Rendered radius for the current pulse phase.
	pub fn effective_radius(&self, config: &StarfieldConfig) -> f64 {
		self.radius * (self.pulse_phase.sin() * config.pulse_amplitude + config.pulse_baseline)
	}

	/// Vertical displacement of the star's apparent position for the given
	/// scroll offset. Applied at render time and when recording trail
	/// points, never baked into the stored position.
	pub fn parallax_offset(&self, config: &StarfieldConfig, scroll: f64) -> f64 {
		scroll * config.parallax_strength * self.parallax_factor
	}

	/// Advances the star by one frame: pulse, twinkle, pointer attraction,
	/// downward drift with top-edge respawn, and trail capture.
	pub fn step(
		&mut self,
		config: &StarfieldConfig,
		width: f64,
		height: f64,
		scroll: f64,
		pointer: Option<(f64, f64)>,
		rng: &mut dyn RandomSource,
	) {
		self.pulse_phase += self.pulse_rate;

		self.opacity += self.twinkle_rate * self.twinkle_dir;
		if self.opacity > config.opacity_ceil || self.opacity < config.opacity_floor {
			self.twinkle_dir = -self.twinkle_dir;
			self.opacity = self.opacity.clamp(config.opacity_floor, config.opacity_ceil);
		}

		let parallax = self.parallax_offset(config, scroll);

		if let Some((px, py)) = pointer {
			let (dx, dy) = (px - self.x, py - (self.y + parallax));
			let distance = (dx * dx + dy * dy).sqrt();
			if distance < config.attraction_radius {
				let pull = (config.attraction_radius - distance) / config.attraction_radius
					* config.attraction_strength;
				self.x += dx * pull;
				self.y += dy * pull;
			}
		}

		self.y += self.fall_speed;
		if self.y > height {
			self.y = 0.0;
			self.x = rng.range(0.0, width);
			self.trail.clear();
		}

		if self.effective_radius(config) > config.trail_threshold {
			self.trail.push_back((self.x, self.y + parallax));
			while self.trail.len() > config.trail_capacity {
				self.trail.pop_front();
			}
		}
	}
}

/// Derives a full population for a surface of the given size. An empty
/// surface yields an empty population.
pub fn spawn_field(
	config: &StarfieldConfig,
	width: f64,
	height: f64,
	rng: &mut dyn RandomSource,
) -> Vec<Star> {
	let count = config.star_count(width, height);
	let mut stars = Vec::with_capacity(count);
	for _ in 0..count {
		stars.push(Star::sample(config, width, height, rng));
	}
	stars
}

#[cfg(test)]
mod tests {
	use super::super::rng::XorShift64;
	use super::*;

	fn test_star(config: &StarfieldConfig) -> Star {
		Star::sample(config, 800.0, 600.0, &mut XorShift64::new(42))
	}

	#[test]
	fn sampled_fields_respect_ranges() {
		let config = StarfieldConfig::default();
		let mut rng = XorShift64::new(1);
		for _ in 0..200 {
			let star = Star::sample(&config, 800.0, 600.0, &mut rng);
			assert!((0.0..800.0).contains(&star.x));
			assert!((0.0..600.0).contains(&star.y));
			assert!(config.radius.contains(star.radius));
			assert!(config.fall_speed.contains(star.fall_speed));
			assert!(config.initial_opacity.contains(star.opacity));
			assert!(config.twinkle_rate.contains(star.twinkle_rate));
			assert!(config.parallax_factor.contains(star.parallax_factor));
			assert!(star.twinkle_dir == 1.0 || star.twinkle_dir == -1.0);
			assert!((0.0..TAU).contains(&star.pulse_phase));
			assert!(star.trail.is_empty());
		}
	}

	#[test]
	fn population_matches_count_law() {
		let config = StarfieldConfig::default();
		let mut rng = XorShift64::new(2);
		let stars = spawn_field(&config, 800.0, 600.0, &mut rng);
		assert_eq!(stars.len(), config.star_count(800.0, 600.0));

		let empty = spawn_field(&config, 0.0, 600.0, &mut rng);
		assert!(empty.is_empty());
	}

	#[test]
	fn opacity_never_escapes_bounds() {
		let config = StarfieldConfig::default();
		let mut rng = XorShift64::new(3);
		let mut star = test_star(&config);
		for _ in 0..10_000 {
			star.step(&config, 800.0, 600.0, 0.0, None, &mut rng);
			assert!(star.opacity >= config.opacity_floor);
			assert!(star.opacity <= config.opacity_ceil);
		}
	}

	#[test]
	fn twinkle_direction_reflects_at_bounds() {
		let config = StarfieldConfig::default();
		let mut rng = XorShift64::new(4);
		let mut star = test_star(&config);
		star.opacity = config.opacity_ceil - 0.001;
		star.twinkle_rate = 0.05;
		star.twinkle_dir = 1.0;
		star.fall_speed = 0.0;
		star.step(&config, 800.0, 600.0, 0.0, None, &mut rng);
		assert_eq!(star.twinkle_dir, -1.0);
	}

	#[test]
	fn bottom_edge_wraps_to_top_with_fresh_x() {
		let config = StarfieldConfig::default();
		let mut rng = XorShift64::new(5);
		let mut star = test_star(&config);
		star.y = 599.0;
		star.fall_speed = 2.0;
		star.trail.push_back((star.x, star.y));
		star.step(&config, 800.0, 600.0, 0.0, None, &mut rng);
		// 599 + 2 = 601 > 600: respawn at the top edge.
		assert_eq!(star.y, 0.0);
		assert!((0.0..800.0).contains(&star.x));
		assert!(star.trail.is_empty());
	}

	#[test]
	fn degenerate_surface_steps_without_error() {
		let config = StarfieldConfig::default();
		let mut rng = XorShift64::new(6);
		let mut star = test_star(&config);
		// A zero-area surface must not divide or panic; the wrap check just
		// pins anything below the (zero-height) bottom edge back to the top.
		for _ in 0..10 {
			star.step(&config, 0.0, 0.0, 0.0, None, &mut rng);
		}
		assert!(star.y <= 1.0);
	}

	#[test]
	fn attraction_ignores_distant_pointer() {
		let config = StarfieldConfig::default();
		let mut rng = XorShift64::new(7);
		let mut star = test_star(&config);
		star.x = 100.0;
		star.y = 100.0;
		star.fall_speed = 0.0;
		let pointer = Some((100.0 + config.attraction_radius + 1.0, 100.0));
		star.step(&config, 800.0, 600.0, 0.0, pointer, &mut rng);
		// Beyond the attraction radius only drift applies, and drift is off.
		assert_eq!(star.x, 100.0);
		assert_eq!(star.y, 100.0);
	}

	#[test]
	fn attraction_pulls_nearby_star_toward_pointer() {
		let config = StarfieldConfig::default();
		let mut rng = XorShift64::new(8);
		let mut star = test_star(&config);
		star.x = 100.0;
		star.y = 100.0;
		star.fall_speed = 0.0;
		let pointer = Some((110.0, 100.0));
		star.step(&config, 800.0, 600.0, 0.0, pointer, &mut rng);
		assert!(star.x > 100.0 && star.x < 110.0);
		assert_eq!(star.y, 100.0);
	}

	#[test]
	fn attraction_factor_is_maximal_at_zero_distance() {
		let config = StarfieldConfig::default();
		let mut rng = XorShift64::new(9);
		let mut star = test_star(&config);
		star.x = 100.0;
		star.y = 100.0;
		star.fall_speed = 0.0;
		// Pointer exactly on the (unscrolled) star: full pull factor, zero
		// offset vector, so the position is unchanged.
		star.step(&config, 800.0, 600.0, 0.0, Some((100.0, 100.0)), &mut rng);
		assert_eq!((star.x, star.y), (100.0, 100.0));
	}

	#[test]
	fn trail_is_bounded_and_post_parallax() {
		let config = StarfieldConfig {
			trail_threshold: 0.0,
			trail_capacity: 4,
			..StarfieldConfig::default()
		};
		let mut rng = XorShift64::new(10);
		let mut star = test_star(&config);
		star.y = 10.0;
		let scroll = 200.0;
		for _ in 0..20 {
			star.step(&config, 800.0, 600.0, scroll, None, &mut rng);
			assert!(star.trail.len() <= config.trail_capacity);
		}
		let (_, trail_y) = *star.trail.back().unwrap();
		let expected = star.y + star.parallax_offset(&config, scroll);
		assert!((trail_y - expected).abs() < 1e-9);
	}

	#[test]
	fn small_stars_record_no_trail() {
		let config = StarfieldConfig {
			trail_threshold: 100.0,
			..StarfieldConfig::default()
		};
		let mut rng = XorShift64::new(11);
		let mut star = test_star(&config);
		for _ in 0..50 {
			star.step(&config, 800.0, 600.0, 0.0, None, &mut rng);
		}
		assert!(star.trail.is_empty());
	}

	#[test]
	fn effective_radius_oscillates_around_baseline() {
		let config = StarfieldConfig::default();
		let star = test_star(&config);
		let lo = star.radius * (config.pulse_baseline - config.pulse_amplitude);
		let hi = star.radius * (config.pulse_baseline + config.pulse_amplitude);
		let mut probe = star.clone();
		for _ in 0..1000 {
			probe.pulse_phase += probe.pulse_rate;
			let r = probe.effective_radius(&config);
			assert!(r >= lo - 1e-9 && r <= hi + 1e-9);
		}
	}
}
