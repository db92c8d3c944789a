//! Field consumers for the headless driver.

use std::path::PathBuf;

use image::RgbaImage;
use ripple_platform::{FieldSink, FrameInfo, Result};
use tracing::{debug, info};

/// Writes every `every`-th field to `<dir>/field_<frame>.png`.
pub struct PngSink {
    dir: PathBuf,
    every: u64,
    written: usize,
}

impl PngSink {
    pub fn new(dir: PathBuf, every: u64) -> Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, every: every.max(1), written: 0 })
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl FieldSink for PngSink {
    fn upload(&mut self, frame: FrameInfo, rgba: &[u8], size: u32) -> Result<()> {
        if frame.index % self.every != 0 {
            return Ok(());
        }
        let image = RgbaImage::from_raw(size, size, rgba.to_vec())
            .ok_or("field buffer does not match its size")?;
        let path = self.dir.join(format!("field_{:05}.png", frame.index));
        image.save(&path)?;
        self.written += 1;
        debug!(path = %path.display(), "wrote field snapshot");
        Ok(())
    }

    fn resize(&mut self, size: u32) -> Result<()> {
        info!(size, "png sink: field resized");
        Ok(())
    }
}

/// Logs how much of the field is lit instead of writing files.
pub struct SummarySink {
    every: u64,
    peak_lit: usize,
}

impl SummarySink {
    pub fn new(every: u64) -> Self {
        Self { every: every.max(1), peak_lit: 0 }
    }

    pub fn peak_lit(&self) -> usize {
        self.peak_lit
    }
}

impl FieldSink for SummarySink {
    fn upload(&mut self, frame: FrameInfo, rgba: &[u8], size: u32) -> Result<()> {
        let lit = rgba.chunks_exact(4).filter(|px| px[2] > 0).count();
        self.peak_lit = self.peak_lit.max(lit);
        if frame.index % self.every == 0 {
            debug!(frame = frame.index, size, lit, "field summary");
        }
        Ok(())
    }
}
