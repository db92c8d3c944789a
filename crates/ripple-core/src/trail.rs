//! The touch trail: pointer samples in, a velocity/intensity field out.

use glam::{DVec2, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::{TrailConfig, MAX_FIELD_SIZE};
use crate::easing::envelope;
use crate::error::ConfigError;
use crate::field::Field;

/// One decaying disturbance left by the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    /// Normalized position, origin bottom-left.
    pub pos: Vec2,
    /// Unit direction of travel, zero for the first point of a trail.
    pub vel: Vec2,
    /// Saturated movement strength in [0, 1].
    pub force: f32,
    pub age: u32,
}

impl TrailPoint {
    /// Packed signal color: direction in red/green, intensity in blue.
    fn signal_color(&self, intensity: f32) -> Vec3 {
        Vec3::new(
            (self.vel.x + 1.0) / 2.0,
            (self.vel.y + 1.0) / 2.0,
            intensity,
        ) * 255.0
    }
}

pub struct TouchTrail {
    config: TrailConfig,
    trail: Vec<TrailPoint>,
    last: Option<Vec2>,
    field: Field,
}

impl Default for TouchTrail {
    fn default() -> Self {
        let config = TrailConfig::default();
        let field = Field::new(config.field_size);
        Self {
            config,
            trail: Vec::new(),
            last: None,
            field,
        }
    }
}

impl TouchTrail {
    pub fn new(config: TrailConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            field_size = config.field_size,
            max_age = config.max_age,
            radius = config.radius(),
            "touch trail created"
        );
        let field = Field::new(config.field_size);
        Ok(Self {
            config,
            trail: Vec::new(),
            last: None,
            field,
        })
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn trail(&self) -> &[TrailPoint] {
        &self.trail
    }

    /// Most recent accepted pointer sample.
    pub fn last_sample(&self) -> Option<Vec2> {
        self.last
    }

    /// The field as of the last [`update`](Self::update).
    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn radius(&self) -> f32 {
        self.config.radius()
    }

    pub fn decay_speed(&self) -> f32 {
        self.config.decay_speed()
    }

    /// Record a pointer sample. Returns `false` when the sample repeats the
    /// previous one exactly and was skipped.
    pub fn add_touch(&mut self, point: Vec2) -> bool {
        let (vel, force) = match self.last {
            Some(last) => {
                // f64 keeps tiny deltas from squaring to zero and huge ones
                // from overflowing.
                let delta = point.as_dvec2() - last.as_dvec2();
                if delta == DVec2::ZERO {
                    return false;
                }
                let d = delta.length();
                let force = (d * d * self.config.force_gain as f64).min(1.0);
                ((delta / d).as_vec2(), force as f32)
            }
            None => (Vec2::ZERO, 0.0),
        };
        self.last = Some(point);
        self.trail.push(TrailPoint {
            pos: point,
            vel,
            force,
            age: 0,
        });
        true
    }

    /// Advance the trail by one tick and redraw the field.
    ///
    /// Motion is per call, not per second: `_delta_time` is accepted so the
    /// engine can sit behind a frame clock, but it does not scale anything.
    pub fn update(&mut self, _delta_time: f32) {
        self.field.clear();

        let max_age = self.config.max_age;
        let speed = self.config.decay_speed();
        let before = self.trail.len();
        self.trail = std::mem::take(&mut self.trail)
            .into_iter()
            .filter_map(|mut point| {
                let f = point.force * speed * (1.0 - point.age as f32 / max_age as f32);
                point.pos += point.vel * f;
                point.age += 1;
                (point.age <= max_age).then_some(point)
            })
            .collect();

        let radius = self.config.radius();
        let glow = self.config.glow_alpha;
        for point in &self.trail {
            let intensity = self.intensity(point);
            let center = self.to_pixels(point.pos);
            self.field
                .splat(center, radius, point.signal_color(intensity), glow * intensity);
        }
        self.field.resolve();

        trace!(
            live = self.trail.len(),
            expired = before - self.trail.len(),
            generation = self.field.generation(),
            "trail tick"
        );
    }

    /// Brightness of `point` at its current age, scaled by its force.
    pub fn intensity(&self, point: &TrailPoint) -> f32 {
        envelope(point.age, self.config.max_age, self.config.attack_fraction) * point.force
    }

    /// Reallocate the field at a new side length. Trail points are kept.
    pub fn resize(&mut self, field_size: u32) {
        if field_size == 0 || field_size > MAX_FIELD_SIZE {
            warn!(field_size, "ignoring resize outside 1..={MAX_FIELD_SIZE}");
            return;
        }
        self.config.field_size = field_size;
        self.field = Field::new(field_size);
        debug!(field_size, radius = self.config.radius(), "touch field resized");
    }

    /// Apply a new configuration, keeping trail points and the last sample.
    pub fn reconfigure(&mut self, config: TrailConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config.field_size != self.field.size() {
            self.field = Field::new(config.field_size);
        }
        self.config = config;
        debug!(config = ?self.config, "touch trail reconfigured");
        Ok(())
    }

    /// Forget every point and the last sample, e.g. when the pointer leaves.
    pub fn clear_trail(&mut self) {
        self.trail.clear();
        self.last = None;
    }

    fn to_pixels(&self, pos: Vec2) -> Vec2 {
        let size = self.config.field_size as f32;
        Vec2::new(pos.x * size, (1.0 - pos.y) * size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_touch_has_no_direction_or_force() {
        let mut trail = TouchTrail::default();
        assert!(trail.add_touch(Vec2::new(0.5, 0.5)));
        let point = trail.trail()[0];
        assert_eq!(point.vel, Vec2::ZERO);
        assert_eq!(point.force, 0.0);
        assert_eq!(point.age, 0);
    }

    #[test]
    fn direction_is_unit_length_and_force_scales_with_distance() {
        let mut trail = TouchTrail::default();
        trail.add_touch(Vec2::new(0.5, 0.5));
        trail.add_touch(Vec2::new(0.503, 0.504));
        let point = trail.trail()[1];
        assert!((point.vel.length() - 1.0).abs() < 1e-5);
        assert!((point.vel.x - 0.6).abs() < 1e-3);
        assert!((point.vel.y - 0.8).abs() < 1e-3);
        // d² = 0.000025, so force = 0.25.
        assert!((point.force - 0.25).abs() < 1e-3);
    }

    #[test]
    fn points_drift_along_their_direction() {
        let mut trail = TouchTrail::default();
        trail.add_touch(Vec2::new(0.5, 0.5));
        trail.add_touch(Vec2::new(0.6, 0.5));
        trail.update(0.016);
        let moved = trail.trail()[1];
        // force 1, age 0: f = 1/64.
        assert!((moved.pos.x - (0.6 + 1.0 / 64.0)).abs() < 1e-6);
        assert_eq!(moved.pos.y, 0.5);
        // The first point has no force and stays put.
        assert_eq!(trail.trail()[0].pos, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn delta_time_does_not_change_the_result() {
        let mut fast = TouchTrail::default();
        let mut slow = TouchTrail::default();
        for trail in [&mut fast, &mut slow] {
            trail.add_touch(Vec2::new(0.2, 0.2));
            trail.add_touch(Vec2::new(0.3, 0.25));
        }
        fast.update(0.001);
        slow.update(1.0);
        assert_eq!(fast.trail(), slow.trail());
        assert_eq!(fast.field().pixels(), slow.field().pixels());
    }

    #[test]
    fn signal_color_packs_direction_and_intensity() {
        let point = TrailPoint {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -1.0),
            force: 1.0,
            age: 0,
        };
        assert_eq!(point.signal_color(0.5), Vec3::new(255.0, 0.0, 127.5));
    }

    #[test]
    fn rendered_point_encodes_its_direction() {
        let mut trail = TouchTrail::default();
        trail.add_touch(Vec2::new(0.5, 0.5));
        trail.add_touch(Vec2::new(0.6, 0.5));
        for _ in 0..19 {
            trail.update(0.016);
        }
        let center = trail.trail()[1].pos;
        let pixel = trail.field().sample_uv(center);
        // Moving right: red above green, blue lit.
        assert!(pixel.r > pixel.g, "{pixel:?}");
        assert!(pixel.b > 0, "{pixel:?}");
    }

    #[test]
    fn reconfigure_keeps_points_and_validates() {
        let mut trail = TouchTrail::default();
        trail.add_touch(Vec2::new(0.1, 0.1));
        trail.add_touch(Vec2::new(0.2, 0.2));

        let bad = TrailConfig { max_age: 0, ..Default::default() };
        assert!(trail.reconfigure(bad).is_err());
        assert_eq!(trail.config().max_age, 64);

        let config = TrailConfig { field_size: 32, max_age: 8, ..Default::default() };
        trail.reconfigure(config).unwrap();
        assert_eq!(trail.trail().len(), 2);
        assert_eq!(trail.field().size(), 32);
        assert!((trail.decay_speed() - 0.125).abs() < 1e-7);
        assert!((trail.radius() - 3.2).abs() < 1e-5);
    }

    #[test]
    fn resize_out_of_range_is_ignored() {
        let mut trail = TouchTrail::default();
        trail.resize(0);
        trail.resize(MAX_FIELD_SIZE + 1);
        assert_eq!(trail.field().size(), 64);
        assert_eq!(trail.config().field_size, 64);
    }

    #[test]
    fn tiny_movement_still_yields_a_unit_direction() {
        let mut trail = TouchTrail::default();
        trail.add_touch(Vec2::ZERO);
        assert!(trail.add_touch(Vec2::new(1e-30, 0.0)));
        let point = trail.trail()[1];
        assert_eq!(point.vel, Vec2::X);
        assert_eq!(point.force, 0.0);

        trail.update(0.016);
        assert!(trail.trail().iter().all(|p| p.pos.is_finite()));
        assert_eq!(trail.trail()[1].pos, Vec2::new(1e-30, 0.0));
    }

    #[test]
    fn huge_jump_does_not_overflow_the_direction() {
        let mut trail = TouchTrail::default();
        trail.add_touch(Vec2::new(-3.0e38, 0.0));
        trail.add_touch(Vec2::new(3.0e38, 0.0));
        let point = trail.trail()[1];
        assert_eq!(point.vel, Vec2::X);
        assert_eq!(point.force, 1.0);
    }

    #[test]
    fn clear_trail_starts_a_fresh_stroke() {
        let mut trail = TouchTrail::default();
        trail.add_touch(Vec2::new(0.1, 0.1));
        trail.add_touch(Vec2::new(0.2, 0.1));
        trail.clear_trail();
        assert!(trail.trail().is_empty());
        assert_eq!(trail.last_sample(), None);

        trail.add_touch(Vec2::new(0.9, 0.9));
        assert_eq!(trail.trail()[0].force, 0.0);
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = TrailConfig { field_size: 0, ..Default::default() };
        assert!(matches!(TouchTrail::new(config), Err(ConfigError::ZeroFieldSize)));
    }
}
