// PPU benchmarks - scanline rendering and frame composition throughput

use criterion::{criterion_group, criterion_main, Criterion};
use famicore::cartridge::{Cartridge, CHR_BLOCK_SIZE, INES_HEADER_SIZE, PRG_BLOCK_SIZE};
use famicore::display::{Compositor, NullSink};
use famicore::Emulator;
use std::hint::black_box;

/// iNES image with a busy CHR block and an idle program
fn busy_rom_bytes() -> Vec<u8> {
    let mut image = vec![0u8; INES_HEADER_SIZE];
    image[0..4].copy_from_slice(b"NES\x1A");
    image[4] = 1;
    image[5] = 1;

    let mut prg = vec![0xEAu8; PRG_BLOCK_SIZE];
    prg[0x3FFC] = 0x00; // reset vector -> $8000
    prg[0x3FFD] = 0x80;
    image.extend_from_slice(&prg);

    let mut chr = vec![0u8; CHR_BLOCK_SIZE];
    for (i, byte) in chr.iter_mut().enumerate() {
        *byte = (i % 251) as u8;
    }
    image.extend_from_slice(&chr);
    image
}

/// Emulator past warm-up with rendering fully enabled and a populated
/// nametable and OAM
fn rendering_emulator() -> Emulator {
    let cartridge = Cartridge::from_ines_bytes(&busy_rom_bytes()).unwrap();
    let mut emulator = Emulator::new();
    emulator.attach_cartridge(cartridge).unwrap();

    while !emulator.bus().ppu().is_ready() {
        emulator.step_scanline();
    }

    let bus = emulator.bus_mut();
    bus.read(0x2002);
    bus.write(0x2006, 0x20);
    bus.write(0x2006, 0x00);
    for i in 0..960u16 {
        bus.write(0x2007, (i % 256) as u8);
    }
    bus.write(0x2003, 0x00);
    for sprite in 0..64u16 {
        for byte in [(sprite * 3 % 200) as u8, sprite as u8, 0x00, (sprite * 4) as u8] {
            bus.write(0x2004, byte);
        }
    }
    bus.write(0x2001, 0x1E);
    emulator
}

fn bench_scanlines(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppu_scanlines");

    group.bench_function("scanline_step", |b| {
        let mut emulator = rendering_emulator();
        b.iter(|| {
            black_box(emulator.step_scanline());
        });
    });

    group.bench_function("full_frame", |b| {
        let mut emulator = rendering_emulator();
        let mut sink = NullSink;
        b.iter(|| {
            emulator.run_frame(black_box(&mut sink));
        });
    });

    group.finish();
}

fn bench_composition(c: &mut Criterion) {
    c.bench_function("compositor_flip", |b| {
        let mut emulator = rendering_emulator();
        // One rendered frame's worth of layers, recomposed repeatedly
        while !emulator.step_scanline() {}

        let mut compositor = Compositor::new();
        let mut sink = NullSink;
        b.iter(|| {
            let backdrop = emulator.bus().ppu().backdrop_color();
            compositor.flip_display(
                emulator.bus_mut().ppu_mut().layers_mut(),
                backdrop,
                &mut sink,
            );
        });
    });
}

criterion_group!(benches, bench_scanlines, bench_composition);
criterion_main!(benches);
