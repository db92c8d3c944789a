//! Deterministic pointer that traces a Lissajous curve.

use std::f32::consts::TAU;

use ripple_platform::{FrameInfo, PointerSample, PointerSource, Result};

/// Repeat the previous sample this often, like a mouse that reports without moving.
const DUPLICATE_EVERY: u64 = 7;

pub struct ScriptedPointer {
    samples_per_frame: u32,
    /// Full loops of the curve per this many samples.
    period: f32,
    last: Option<PointerSample>,
}

impl ScriptedPointer {
    pub fn new(samples_per_frame: u32) -> Self {
        Self {
            samples_per_frame,
            period: 480.0,
            last: None,
        }
    }

    fn at(&self, step: u64) -> PointerSample {
        let t = step as f32 / self.period * TAU;
        PointerSample {
            x: 0.5 + 0.35 * (3.0 * t).sin(),
            y: 0.5 + 0.35 * (2.0 * t + 0.5).sin(),
        }
    }
}

impl PointerSource for ScriptedPointer {
    fn poll(&mut self, frame: FrameInfo) -> Result<Vec<PointerSample>> {
        let per_frame = self.samples_per_frame as u64;
        let mut samples = Vec::with_capacity(self.samples_per_frame as usize + 1);
        for i in 0..per_frame {
            let sample = self.at(frame.index * per_frame + i);
            samples.push(sample);
            self.last = Some(sample);
        }
        if frame.index % DUPLICATE_EVERY == DUPLICATE_EVERY - 1 {
            if let Some(last) = self.last {
                samples.push(last);
            }
        }
        Ok(samples)
    }
}
