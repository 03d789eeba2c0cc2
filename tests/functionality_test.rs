// End-to-end machine scenarios: reset, instruction semantics through the
// bus, DMA, joypad protocol, and NMI delivery.

mod common;

use common::{warm_up, TestRom};
use famicore::cpu::flags;
use famicore::{Bus, Cpu, NullSink};

/// Boot a bare CPU+bus pair from a test ROM
fn boot_cpu(rom: &TestRom) -> (Cpu, Bus) {
    let mut bus = Bus::new();
    bus.attach_cartridge(rom.build_cartridge()).unwrap();
    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    (cpu, bus)
}

// ========================================
// Reset
// ========================================

#[test]
fn test_reset_state_from_vector() {
    let rom = TestRom::new().with_program(0x8000, &[0xEA]);
    let (cpu, _bus) = boot_cpu(&rom);

    assert_eq!(cpu.pc, 0x8000);
    assert_eq!(cpu.sp, 0xFD);
    assert_eq!(cpu.status, 0x24);
}

// ========================================
// Instruction semantics through the bus
// ========================================

#[test]
fn test_lda_sta_roundtrip() {
    // LDA #$42; STA $00; LDA $00
    let rom = TestRom::new().with_program(0x8000, &[0xA9, 0x42, 0x85, 0x00, 0xA5, 0x00]);
    let (mut cpu, mut bus) = boot_cpu(&rom);

    for _ in 0..3 {
        cpu.step(&mut bus);
    }

    assert_eq!(cpu.a, 0x42);
    assert!(!cpu.get_zero());
    assert!(!cpu.get_negative());
    assert_eq!(bus.read(0x0000), 0x42);
}

#[test]
fn test_sec_lda_sbc_wrap() {
    // SEC; LDA #$50; SBC #$F0: borrow clears C, no signed overflow
    let rom = TestRom::new().with_program(0x8000, &[0x38, 0xA9, 0x50, 0xE9, 0xF0]);
    let (mut cpu, mut bus) = boot_cpu(&rom);

    for _ in 0..3 {
        cpu.step(&mut bus);
    }

    assert_eq!(cpu.a, 0x60, "0x50 - 0xF0 wraps to 0x60");
    assert!(!cpu.get_carry());
    assert!(!cpu.get_overflow());
}

#[test]
fn test_branch_taken_and_not_taken() {
    // BNE +2 at $C080 (the $8080 block mirrored into the upper bank)
    let rom = TestRom::new()
        .with_program(0x8080, &[0xD0, 0x02])
        .set_vector(0xFFFC, 0xC080);
    let (mut cpu, mut bus) = boot_cpu(&rom);
    assert_eq!(cpu.pc, 0xC080);

    cpu.set_zero(false);
    cpu.step(&mut bus);
    assert_eq!(cpu.pc, 0xC084, "taken branch lands past the displacement");

    let (mut cpu, mut bus) = boot_cpu(&rom);
    cpu.set_zero(true);
    cpu.step(&mut bus);
    assert_eq!(cpu.pc, 0xC082, "fall through to the next instruction");
}

#[test]
fn test_stack_roundtrip_program() {
    // LDA #$5A; PHA; LDA #$00; PLA
    let rom = TestRom::new().with_program(0x8000, &[0xA9, 0x5A, 0x48, 0xA9, 0x00, 0x68]);
    let (mut cpu, mut bus) = boot_cpu(&rom);

    for _ in 0..4 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.a, 0x5A);
    assert_eq!(cpu.sp, 0xFD);
}

#[test]
fn test_php_plp_preserves_flags() {
    // SEC; SED; PHP; CLC; CLD; PLP
    let rom = TestRom::new().with_program(0x8000, &[0x38, 0xF8, 0x08, 0x18, 0xD8, 0x28]);
    let (mut cpu, mut bus) = boot_cpu(&rom);

    for _ in 0..6 {
        cpu.step(&mut bus);
    }
    assert!(cpu.get_carry());
    assert!(cpu.get_flag(flags::DECIMAL));
    assert_eq!(cpu.status & flags::BREAK, 0, "B never lands in live P");
}

#[test]
fn test_zero_page_pointer_wrap() {
    // LDA ($FF),Y with the pointer high byte at $00
    let rom = TestRom::new().with_program(0x8000, &[0xB1, 0xFF]);
    let (mut cpu, mut bus) = boot_cpu(&rom);

    bus.write(0x00FF, 0x20); // pointer low
    bus.write(0x0000, 0x03); // pointer high comes from $00, not $100
    bus.write(0x0100, 0x99); // a decoy if the wrap were wrong
    bus.write(0x0320, 0x77);
    cpu.y = 0;

    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x77);
}

// ========================================
// OAM DMA
// ========================================

#[test]
fn test_oam_dma_copies_source_page() {
    let rom = TestRom::new();
    let (_cpu, mut bus) = boot_cpu(&rom);

    for i in 0..256u16 {
        bus.write(0x0200 + i, (i as u8).wrapping_mul(3));
    }
    bus.write(0x2003, 0x00);
    bus.write(0x4014, 0x02);

    for i in 0..256u16 {
        bus.write(0x2003, i as u8);
        assert_eq!(bus.read(0x2004), (i as u8).wrapping_mul(3));
    }
}

#[test]
fn test_oam_dma_stalls_cpu() {
    // STA $4014 with A = 2, then NOPs
    let rom = TestRom::new().with_program(0x8000, &[0xA9, 0x02, 0x8D, 0x14, 0x40]);
    let mut emulator = rom.boot();

    let before = emulator.cpu().cycles;
    emulator.step_scanline();
    let spent = emulator.cpu().cycles - before;
    assert!(
        spent >= 513,
        "the DMA stall is billed to the CPU (spent {})",
        spent
    );
}

// ========================================
// Joypad
// ========================================

#[test]
fn test_joypad_strobe_and_order() {
    use famicore::Controller;

    let rom = TestRom::new();
    let (_cpu, mut bus) = boot_cpu(&rom);

    bus.controllers_mut().set_joypad1(Controller {
        button_a: true,
        down: true,
        right: true,
        ..Controller::default()
    });

    bus.write(0x4016, 1);
    bus.write(0x4016, 0);

    let bits: Vec<u8> = (0..10).map(|_| bus.read(0x4016) & 1).collect();
    //              A  B  Se St Up Dn Lf Rt  then 1s
    assert_eq!(bits, [1, 0, 0, 0, 0, 1, 0, 1, 1, 1]);
}

#[test]
fn test_joypad2_reads_idle() {
    let rom = TestRom::new();
    let (_cpu, mut bus) = boot_cpu(&rom);

    bus.write(0x4016, 1);
    bus.write(0x4016, 0);
    for _ in 0..8 {
        assert_eq!(bus.read(0x4017) & 1, 0);
    }
}

#[test]
fn test_keyboard_drives_joypad() {
    use famicore::input::scancodes;

    // Loop forever; we only care about input plumbing
    let rom = TestRom::new().with_program(0x8000, &[0x4C, 0x00, 0x80]);
    let mut emulator = rom.boot();

    emulator.keyboard_queue().push_key(scancodes::K); // button A
    emulator.run_frame(&mut NullSink);

    // After the frame refresh the latched press is visible at $4016
    let bus = emulator.bus_mut();
    bus.write(0x4016, 1);
    bus.write(0x4016, 0);
    assert_eq!(bus.read(0x4016) & 1, 1, "A held by the key latch");
}

// ========================================
// NMI delivery
// ========================================

#[test]
fn test_nmi_enters_handler_with_clean_frame() {
    // Handler at $9000: infinite loop. Main program enables NMI once the
    // PPU is warm, then idles.
    let rom = TestRom::new()
        .with_program(0x8000, &[0xEA, 0xEA, 0x4C, 0x00, 0x80])
        .set_vector(0xFFFA, 0x9000);
    let mut emulator = rom.boot();
    warm_up(&mut emulator);

    // Enable NMI from the test side (the PPU is warm now)
    emulator.bus_mut().write(0x2000, 0x80);

    // Run until VBlank delivers the interrupt
    for _ in 0..263 {
        emulator.step_scanline();
        if emulator.cpu().pc >= 0x9000 && emulator.cpu().pc < 0x9100 {
            break;
        }
    }

    let pc = emulator.cpu().pc;
    assert!(
        (0x9000..0x9100).contains(&pc),
        "PC in the NMI handler, got {:04X}",
        pc
    );

    // The interrupt frame holds the pushed P with B clear and unused set
    let sp = emulator.cpu().sp;
    let pushed_status = emulator.bus_mut().read(0x0100 | sp.wrapping_add(1) as u16);
    assert_eq!(pushed_status & flags::BREAK, 0);
    assert_ne!(pushed_status & flags::UNUSED, 0);
    assert!(emulator.cpu().get_interrupt_disable());
}

#[test]
fn test_single_nmi_per_vblank() {
    // Count NMI entries by incrementing $10 in the handler:
    //   handler: INC $10; RTI
    let rom = TestRom::new()
        .with_program(0x8000, &[0x4C, 0x00, 0x80])
        .set_vector(0xFFFA, 0x9000);
    let mut bytes = rom.build_bytes();
    // INC $10; RTI at $9000 (offset $1000 into PRG, after the header)
    bytes[16 + 0x1000] = 0xE6;
    bytes[16 + 0x1001] = 0x10;
    bytes[16 + 0x1002] = 0x40;

    let mut emulator = famicore::Emulator::new();
    emulator
        .attach_cartridge(famicore::Cartridge::from_ines_bytes(&bytes).unwrap())
        .unwrap();
    warm_up(&mut emulator);
    emulator.bus_mut().write(0x2000, 0x80);

    // Two full frames -> exactly two handler entries
    emulator.run_frame(&mut NullSink);
    emulator.run_frame(&mut NullSink);
    assert_eq!(emulator.bus_mut().read(0x0010), 2);
}

// ========================================
// PPU port plumbing end to end
// ========================================

#[test]
fn test_palette_mirror_through_ports() {
    let rom = TestRom::new();
    let (_cpu, mut bus) = boot_cpu(&rom);

    // Write $3F10 through $2006/$2007
    bus.read(0x2002);
    bus.write(0x2006, 0x3F);
    bus.write(0x2006, 0x10);
    bus.write(0x2007, 0x2C);

    // Read back through $3F00 (palette reads are unbuffered)
    bus.read(0x2002);
    bus.write(0x2006, 0x3F);
    bus.write(0x2006, 0x00);
    assert_eq!(bus.read(0x2007), 0x2C);
}

#[test]
fn test_vblank_flag_reads_once() {
    let rom = TestRom::new().with_program(0x8000, &[0x4C, 0x00, 0x80]);
    let mut emulator = rom.boot();

    // Run to just past VBlank entry
    while emulator.bus().ppu().scanline() != 241 {
        emulator.step_scanline();
    }

    let status = emulator.bus_mut().read(0x2002);
    assert_ne!(status & 0x80, 0, "VBlank set at scanline 241");

    let status = emulator.bus_mut().read(0x2002);
    assert_eq!(status & 0x80, 0, "cleared by the first read");
}
