//! demo - drive the stub the way a camera host would

use anyhow::{anyhow, Result};
use clap::Parser;
use std::sync::Arc;

use qhy_stub::{CameraHandle, FrameOutputs, FrameProvider, LogSink, StatusCode, StubConfig};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Opaque handle value to pass through.
    #[arg(long, env = "QHY_STUB_HANDLE", default_value_t = 1)]
    handle: usize,
    /// Omit the frame buffer to exercise the failure path.
    #[arg(long)]
    no_buffer: bool,
    /// Number of pattern bytes to print.
    #[arg(long, default_value_t = 32)]
    show: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    let args = Args::parse();

    let cfg = StubConfig::load()?;
    let frame_bytes = cfg.shape.frame_bytes();
    let provider = FrameProvider::with_sink(cfg.shape, Arc::new(LogSink));

    let (mut width, mut height, mut bits_per_pixel, mut channels) = (0u32, 0u32, 0u32, 0u32);
    let mut buffer = vec![0u8; frame_bytes];

    let status = provider.single_frame(
        CameraHandle::from_raw(args.handle),
        FrameOutputs {
            width: Some(&mut width),
            height: Some(&mut height),
            bits_per_pixel: Some(&mut bits_per_pixel),
            channels: Some(&mut channels),
            buffer: if args.no_buffer {
                None
            } else {
                Some(&mut buffer)
            },
        },
    );

    println!("status = {} ({:?})", status.code(), status);
    println!(
        "descriptor: {width}x{height}, {bits_per_pixel} bpp, {channels} channel(s), {frame_bytes} bytes/frame"
    );
    if status == StatusCode::Success {
        let shown = args.show.min(buffer.len());
        println!("pattern[..{shown}] = {:?}", &buffer[..shown]);
    }
    println!(
        "buffer address = {:#x}",
        provider.buffer_address(Some(&buffer))
    );

    if !args.no_buffer && status != StatusCode::Success {
        return Err(anyhow!("grab failed with a buffer present"));
    }
    Ok(())
}
