use std::path::PathBuf;

use thiserror::Error;

/// Reasons a [`TrailConfig`](crate::TrailConfig) can be rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("field size must be at least one pixel")]
    ZeroFieldSize,
    #[error("field size {0} exceeds the maximum of {max}", max = crate::config::MAX_FIELD_SIZE)]
    FieldTooLarge(u32),
    #[error("max age must be at least one tick")]
    ZeroMaxAge,
    #[error("radius fraction must be finite and non-negative, got {0}")]
    InvalidRadius(f32),
    #[error("attack fraction must lie strictly between 0 and 1, got {0}")]
    InvalidAttack(f32),
    #[error("force gain must be finite and non-negative, got {0}")]
    InvalidForceGain(f32),
    #[error("glow alpha must be finite and non-negative, got {0}")]
    InvalidGlowAlpha(f32),
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format for {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),
}
