//! Ripple core engine: platform-agnostic touch trail simulation.
//!
//! Pointer samples go in through [`TouchTrail::add_touch`]; once per frame
//! [`TouchTrail::update`] ages the trail and redraws a small square
//! [`Field`] that a distortion shader samples as a velocity/intensity map.

mod config;
pub mod easing;
mod error;
mod field;
mod trail;

pub use config::{TrailConfig, MAX_FIELD_SIZE};
pub use error::ConfigError;
pub use field::{Field, Rgba8};
pub use trail::{TouchTrail, TrailPoint};

pub use glam::Vec2;
