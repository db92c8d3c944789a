use std::path::PathBuf;

use clap::Parser;

/// Drive the touch trail headlessly with a scripted pointer.
#[derive(Debug, Parser)]
#[command(name = "ripple", version)]
pub struct Args {
    /// Engine config (.toml or .json); defaults are used when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 240)]
    pub frames: u64,

    /// Pointer-move events delivered per frame.
    #[arg(long, default_value_t = 2)]
    pub samples_per_frame: u32,

    /// Write PNG snapshots of the field into this directory.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Snapshot every k-th frame.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub every: u64,

    /// Resize the field mid-run, as `<frame>:<size>`.
    #[arg(long, value_parser = parse_resize)]
    pub resize_at: Option<ResizeAt>,

    /// Write the trail left after the last frame as JSON.
    #[arg(long)]
    pub dump_trail: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeAt {
    pub frame: u64,
    pub size: u32,
}

fn parse_resize(value: &str) -> Result<ResizeAt, String> {
    let (frame, size) = value
        .split_once(':')
        .ok_or_else(|| format!("expected <frame>:<size>, got {value:?}"))?;
    let frame = frame
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("bad frame {frame:?}: {e}"))?;
    let size = size
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("bad size {size:?}: {e}"))?;
    if size == 0 {
        return Err("field size must be at least 1".into());
    }
    Ok(ResizeAt { frame, size })
}
