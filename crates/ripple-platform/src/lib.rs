//! Host-side traits so `ripple-core` stays free of windowing and GPU concerns.

use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Pointer position normalized to the render surface, origin bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    /// Normalize a surface-space position (origin top-left, in pixels).
    pub fn from_surface(px: f32, py: f32, width: f32, height: f32) -> Self {
        Self {
            x: px / width,
            y: 1.0 - py / height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameInfo {
    pub index: u64,
    /// Seconds since the previous frame.
    pub delta: f32,
}

/// Source of pointer-move events.
pub trait PointerSource {
    /// Samples that arrived since the previous frame, oldest first.
    fn poll(&mut self, frame: FrameInfo) -> Result<Vec<PointerSample>>;
}

/// Consumer of rendered fields, typically a texture upload.
pub trait FieldSink {
    /// `rgba` is `size * size` RGBA8 pixels, row 0 at the top.
    fn upload(&mut self, frame: FrameInfo, rgba: &[u8], size: u32) -> Result<()>;
    fn resize(&mut self, _size: u32) -> Result<()> { Ok(()) }
}
