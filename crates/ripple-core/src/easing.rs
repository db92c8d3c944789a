//! Easing curves for a trail point's attack and release.

use std::f32::consts::FRAC_PI_2;

/// Sine ease-out over `t` in [0, 1].
pub fn ease_out_sine(t: f32) -> f32 {
    (t * FRAC_PI_2).sin()
}

/// Quadratic ease-out over `t` in [0, 1].
pub fn ease_out_quad(t: f32) -> f32 {
    -t * (t - 2.0)
}

/// Two-phase brightness envelope over a point's lifetime, in [0, 1].
///
/// Rises with [`ease_out_sine`] until `attack_fraction * max_age`, then falls
/// back to zero at `max_age` with [`ease_out_quad`] run in reverse.
pub fn envelope(age: u32, max_age: u32, attack_fraction: f32) -> f32 {
    let age = age as f32;
    let max_age = max_age as f32;
    let attack = max_age * attack_fraction;
    if age < attack {
        ease_out_sine(age / attack)
    } else {
        let remaining = 1.0 - (age - attack) / (max_age - attack);
        ease_out_quad(remaining)
    }
}
