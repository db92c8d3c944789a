use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ripple_core::{TouchTrail, TrailConfig, Vec2};
use ripple_platform::{FieldSink, FrameInfo, PointerSource, Result};

mod cli;
mod script;
mod sink;

use cli::Args;
use script::ScriptedPointer;
use sink::{PngSink, SummarySink};

const FRAME_DELTA: f32 = 1.0 / 60.0;

fn main() -> ExitCode {
    // Init logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let args = Args::parse();
    info!("Ripple starting");
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Ripple error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => TrailConfig::load(path)?,
        None => TrailConfig::default(),
    };
    let mut trail = TouchTrail::new(config)?;
    let mut pointer = ScriptedPointer::new(args.samples_per_frame);
    let stats = match &args.out {
        Some(dir) => {
            let mut sink = PngSink::new(dir.clone(), args.every)?;
            let stats = drive(&mut trail, &mut pointer, &mut sink, args)?;
            info!(written = sink.written(), dir = %dir.display(), "field snapshots written");
            stats
        }
        None => {
            let mut sink = SummarySink::new(args.every);
            let stats = drive(&mut trail, &mut pointer, &mut sink, args)?;
            info!(peak_lit = sink.peak_lit(), "field summary");
            stats
        }
    };
    info!(
        frames = args.frames,
        accepted = stats.accepted,
        duplicates = stats.duplicates,
        uploads = stats.uploads,
        live = trail.trail().len(),
        field_size = trail.field().size(),
        "run finished"
    );

    if let Some(path) = &args.dump_trail {
        let json = serde_json::to_string_pretty(trail.trail())?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), points = trail.trail().len(), "trail dumped");
    }
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct RunStats {
    accepted: u64,
    duplicates: u64,
    uploads: u64,
}

/// Feed pointer events and pull one field per frame, the way a render loop would.
fn drive(
    trail: &mut TouchTrail,
    pointer: &mut dyn PointerSource,
    sink: &mut dyn FieldSink,
    args: &Args,
) -> Result<RunStats> {
    let mut stats = RunStats::default();
    let mut uploaded = None;
    for index in 0..args.frames {
        let frame = FrameInfo { index, delta: FRAME_DELTA };

        if let Some(resize) = args.resize_at {
            if resize.frame == index {
                trail.resize(resize.size);
                sink.resize(resize.size)?;
            }
        }

        for sample in pointer.poll(frame)? {
            if trail.add_touch(Vec2::new(sample.x, sample.y)) {
                stats.accepted += 1;
            } else {
                stats.duplicates += 1;
            }
        }

        trail.update(frame.delta);
        let field = trail.field();
        if uploaded != Some(field.generation()) {
            sink.upload(frame, field.as_bytes(), field.size())?;
            uploaded = Some(field.generation());
            stats.uploads += 1;
        }
    }
    Ok(stats)
}
