// famicore - headless CLI entry point
//
// Loads an iNES ROM and runs the machine at the configured frame rate
// against a null display sink. Real display and input arrive when a host
// embeds the library and provides a `PixelSink` / feeds the keyboard
// queue; this binary exists to boot ROMs and exercise the core.

use famicore::Emulator;
use famicore::NullSink;
use std::env;
use std::process;
use std::time::{Duration, Instant};

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let rom_path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("usage: famicore <rom.nes> [--frames N]");
            process::exit(2);
        }
    };
    let frame_limit = parse_frame_limit(args);

    let mut emulator = Emulator::new();
    if let Err(e) = emulator.load_rom(&rom_path) {
        log::error!("failed to load {}: {}", rom_path, e);
        eprintln!("Invalid or unsupported rom.");
        process::exit(1);
    }
    log::info!("loaded {}", rom_path);

    let fps = emulator.config().video.fps.max(1);
    let frame_duration = Duration::from_secs(1) / fps;
    let mut sink = NullSink;
    let mut frames: u64 = 0;
    let started = Instant::now();

    loop {
        let frame_started = Instant::now();
        emulator.run_frame(&mut sink);
        frames += 1;

        if let Some(limit) = frame_limit {
            if frames >= limit {
                break;
            }
        }
        if frames % 600 == 0 {
            let rate = frames as f64 / started.elapsed().as_secs_f64();
            log::info!("{} frames, {:.1} fps", frames, rate);
        }

        if let Some(remaining) = frame_duration.checked_sub(frame_started.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    let elapsed = started.elapsed().as_secs_f64();
    println!(
        "{} frames in {:.2}s ({:.1} fps)",
        frames,
        elapsed,
        frames as f64 / elapsed
    );
}

/// Parse a trailing `--frames N` argument
fn parse_frame_limit(mut args: impl Iterator<Item = String>) -> Option<u64> {
    while let Some(arg) = args.next() {
        if arg == "--frames" {
            return args.next().and_then(|n| n.parse().ok());
        }
    }
    None
}
