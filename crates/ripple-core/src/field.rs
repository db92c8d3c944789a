//! The square signal buffer trail points are rasterized into.
//!
//! Pixels are not an image: red and green carry a direction remapped from
//! [-1, 1] to [0, 255], blue carries intensity. Alpha is always opaque and
//! carries nothing.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };

    fn from_accumulated(color: Vec3) -> Self {
        let channel = |v: f32| v.clamp(0.0, 255.0).round() as u8;
        Self {
            r: channel(color.x),
            g: channel(color.y),
            b: channel(color.z),
            a: 255,
        }
    }
}

/// Square RGBA8 field owned by [`TouchTrail`](crate::TouchTrail).
///
/// Consumers only ever see `&Field`; writes go through the engine.
#[derive(Debug, Clone)]
pub struct Field {
    size: u32,
    pixels: Vec<Rgba8>,
    // Unclamped per-pixel sums, resolved into `pixels` once per tick.
    accum: Vec<Vec3>,
    generation: u64,
}

impl Field {
    pub(crate) fn new(size: u32) -> Self {
        let len = (size as usize) * (size as usize);
        Self {
            size,
            pixels: vec![Rgba8::BLACK; len],
            accum: vec![Vec3::ZERO; len],
            generation: 0,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Raw RGBA bytes, row 0 at the top, ready for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Incremented every time the engine redraws the field.
    ///
    /// A consumer that remembers the last generation it uploaded knows
    /// whether its texture is stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(self.pixels[self.index(x as usize, y as usize)])
    }

    /// Nearest-pixel lookup in texture coordinates (origin bottom-left).
    ///
    /// Coordinates outside [0, 1] clamp to the edge, like a shader sampler
    /// with clamp-to-edge wrapping.
    pub fn sample_uv(&self, uv: Vec2) -> Rgba8 {
        let max = (self.size - 1) as f32;
        let scale = self.size as f32;
        let x = (uv.x * scale).floor().clamp(0.0, max) as usize;
        let y = ((1.0 - uv.y) * scale).floor().clamp(0.0, max) as usize;
        self.pixels[self.index(x, y)]
    }

    pub(crate) fn clear(&mut self) {
        self.accum.fill(Vec3::ZERO);
    }

    /// Add a soft disk of `color` around `center` (pixel units).
    ///
    /// The disk has a blur band as wide as its radius, so the falloff reaches
    /// zero at `2 * radius`. Weights follow an inverted smoothstep, scaled by
    /// `alpha`, and sum onto whatever is already in the accumulator.
    pub(crate) fn splat(&mut self, center: Vec2, radius: f32, color: Vec3, alpha: f32) {
        let extent = radius * 2.0;
        if !(extent > 0.0 && alpha > 0.0) || !center.is_finite() {
            return;
        }
        let size = self.size as f32;
        let x0 = (center.x - extent).floor().clamp(0.0, size) as usize;
        let x1 = (center.x + extent).ceil().clamp(0.0, size) as usize;
        let y0 = (center.y - extent).floor().clamp(0.0, size) as usize;
        let y1 = (center.y + extent).ceil().clamp(0.0, size) as usize;

        for y in y0..y1 {
            for x in x0..x1 {
                let pixel_center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let distance = pixel_center.distance(center);
                if distance >= extent {
                    continue;
                }
                let s = distance / extent;
                let weight = 1.0 - s * s * (3.0 - 2.0 * s);
                let index = self.index(x, y);
                self.accum[index] += color * (alpha * weight);
            }
        }
    }

    /// Quantize the accumulator into the visible pixels and bump the generation.
    pub(crate) fn resolve(&mut self) {
        for (pixel, sum) in self.pixels.iter_mut().zip(&self.accum) {
            *pixel = Rgba8::from_accumulated(*sum);
        }
        self.generation += 1;
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.size as usize + x
    }
}
