//! The Tomy Tutor (1983): TMS9995 CPU, TMS9918A-NL video, SN76489AN sound,
//! an 8x8 keyboard matrix on the CRU, an on-chip decrementer, and a
//! cassette interface.
//!
//! Memory map (as the hardware wires it, with the 16 KiB extension ROM
//! sitting directly above the BIOS):
//!
//!   0x0000-0x7FFF  ROM1 (BIOS + tables)
//!   0x8000-0xBFFF  ROM2 extension
//!   0xC000-0xDFFF  open bus (reads 0x0000 as words, 0xFF as bytes)
//!   0xE000-0xE001  VDP data port
//!   0xE002-0xE003  VDP register/address port
//!   0xE200         DCSG write port
//!   0xEE00/0xEE20  cassette: clock out a 0 / 1 bit
//!   0xEE40/0xEE60  cassette interrupt enable / disable
//!   0xF000-0xF0FF  on-chip scratchpad RAM
//!   0xFFFA-0xFFFB  decrementer latch
//!   0xFFFC-0xFFFF  NMI vector

pub mod keyboard;
pub mod tape;

use tutor_core::core::bus::InterruptState;
use tutor_core::core::machine::{InputButton, Machine};
use tutor_core::core::Bus;
use tutor_core::cpu::state::Tms9995State;
use tutor_core::cpu::{CpuStateTrait, Tms9995};
use tutor_core::device::sn76489::{self, Sn76489};
use tutor_core::device::tms9918a::{SCREEN_HEIGHT, SCREEN_WIDTH, Tms9918a};

use crate::config::TutorConfig;
use crate::registry::MachineEntry;
use crate::rom_loader::{RomLoadError, RomSet, TUTOR_ROM1, TUTOR_ROM2, crc32};
use keyboard::{KeyMatrix, TUTOR_INPUT_MAP};
use tape::{TapeDeck, TapeMode};

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------
// CPU clock:  2.7 MHz
// Frame:      2700000 / 60 = 45000 CPU cycles
// Composite:  every `composite_divisor` frames (redraws are expensive and
//             the Tomy OS repaints rarely)

const CPU_CLOCK_HZ: u64 = 2_700_000;
const FRAME_RATE_HZ: f64 = 60.0;
const CYCLES_PER_FRAME: u64 = CPU_CLOCK_HZ / 60;

// MMIO addresses.
const VDP_DATA: u16 = 0xE000;
const VDP_CTRL: u16 = 0xE002;
const PSG_PORT: u16 = 0xE200;
const TAPE_BIT0: u16 = 0xEE00;
const TAPE_BIT1: u16 = 0xEE20;
const TAPE_IRQ_ON: u16 = 0xEE40;
const TAPE_IRQ_OFF: u16 = 0xEE60;
const DECREMENTER_LATCH: u16 = 0xFFFA;

/// Decrementer interrupt level.
const IRQ_DECREMENTER: u8 = 3;
/// Cassette interrupt level (configuration-gated).
const IRQ_TAPE: u8 = 4;

/// ROM PC the paste pacer watches: the keyboard-probe loop, reached once
/// per scan.
const PASTE_WATCH_PC: u16 = 0x18B2;

/// Snapshot layout: memory, VRAM, CPU registers (WP/PC/ST/IR), VDP MP,
/// VDP status, eight 16-bit VDP register slots.
const SNAPSHOT_LEN: usize = 0x10000 + 0x4000 + 8 + 2 + 1 + 16;

/// Snapshot image of the wrong size.
#[derive(Debug)]
pub struct SnapshotSizeError {
    pub expected: usize,
    pub actual: usize,
}

impl std::fmt::Display for SnapshotSizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "snapshot: expected {} bytes, got {}",
            self.expected, self.actual
        )
    }
}

impl std::error::Error for SnapshotSizeError {}

// ---------------------------------------------------------------------------
// Bus
// ---------------------------------------------------------------------------

/// Everything on the Tutor's bus except the CPU itself. The CPU borrows
/// this for one instruction at a time.
pub struct TutorBus {
    memory: Box<[u8; 0x10000]>,
    rom1: Box<[u8; 0x8000]>,
    rom2: Box<[u8; 0x4000]>,
    /// CRC-32 of (ROM1, ROM2), for hosts that gate the tape traps on
    /// known stock images.
    rom_checksums: (u32, u32),

    pub vdp: Tms9918a,
    pub psg: Sn76489,
    pub keyboard: KeyMatrix,
    pub tape: TapeDeck,

    /// Decrementer reload value; zero disables the decrementer.
    decrementer_base: u16,
    /// Fractional clocks carried between batched updates (the counter
    /// drops once per four CPU clocks).
    decrementer_extra: u32,
    /// CRU flags 0 and 1. Latched but not consulted: liveness is
    /// `decrementer_base != 0`, and event-counter mode is unimplemented.
    decrementer_event_mode: bool,
    decrementer_enabled: bool,

    /// Latched interrupt request lines, one bit per level.
    pending_interrupts: u16,

    /// The Tomy OS emits one spurious 1-bit write on startup.
    absorbed_first_tape_write: bool,

    /// Paste pacing counter, decremented at the keyboard-probe PC.
    paste_wait: u32,

    config: TutorConfig,
}

impl TutorBus {
    fn new(config: TutorConfig) -> Self {
        Self {
            memory: Box::new([0xF0; 0x10000]),
            rom1: Box::new([0; 0x8000]),
            rom2: Box::new([0; 0x4000]),
            rom_checksums: (0, 0),
            vdp: Tms9918a::new(),
            psg: Sn76489::new(),
            keyboard: KeyMatrix::new(),
            tape: TapeDeck::new(),
            decrementer_base: 0,
            decrementer_extra: 0,
            decrementer_event_mode: false,
            decrementer_enabled: false,
            pending_interrupts: 0,
            absorbed_first_tape_write: false,
            paste_wait: 0,
            config,
        }
    }

    fn reset(&mut self) {
        self.memory.fill(0xF0);
        self.memory[..0x8000].copy_from_slice(&self.rom1[..]);
        self.memory[0x8000..0xC000].copy_from_slice(&self.rom2[..]);
        self.vdp.reset();
        self.psg.reset();
        self.keyboard.clear();
        // The Tutor's init turns interrupts off, which closes a running
        // load; saves are flushed explicitly.
        self.tape.finish();
        self.decrementer_base = 0;
        self.decrementer_extra = 0;
        self.decrementer_event_mode = false;
        self.decrementer_enabled = false;
        self.pending_interrupts = 0;
        self.absorbed_first_tape_write = false;
        self.paste_wait = 0;
    }

    /// Raw big-endian word in the memory array, no MMIO.
    pub fn peek_word(&self, addr: u16) -> u16 {
        let index = usize::from(addr & 0xFFFE);
        u16::from_be_bytes([self.memory[index], self.memory[index + 1]])
    }

    fn poke_word(&mut self, addr: u16, value: u16) {
        let index = usize::from(addr & 0xFFFE);
        self.memory[index..index + 2].copy_from_slice(&value.to_be_bytes());
    }

    /// Load bytes straight into the memory array (test scaffolding and
    /// snapshot restore; ROM suppression does not apply).
    pub fn load(&mut self, addr: u16, data: &[u8]) {
        let start = usize::from(addr);
        self.memory[start..start + data.len()].copy_from_slice(data);
    }

    pub fn rom_checksums(&self) -> (u32, u32) {
        self.rom_checksums
    }

    /// Latched CRU flags 0 and 1: (event-counter mode, enable).
    pub fn decrementer_flags(&self) -> (bool, bool) {
        (self.decrementer_event_mode, self.decrementer_enabled)
    }

    pub fn set_paste_wait(&mut self, ticks: u32) {
        self.paste_wait = ticks;
    }

    pub fn paste_wait(&self) -> u32 {
        self.paste_wait
    }

    /// Workspace register store for the ROM traps (direct, like every
    /// other workspace access).
    fn set_reg(&mut self, wp: u16, r: u16, value: u16) {
        self.poke_word(wp.wrapping_add(r + r), value);
    }

    fn reg(&self, wp: u16, r: u16) -> u16 {
        self.peek_word(wp.wrapping_add(r + r))
    }

    /// Count the consumed cycles against the decrementer. It drops once
    /// per four clocks; leftovers carry into the next batch so pulses are
    /// never lost. Underflow reloads (keeping the deficit) and raises
    /// level 3.
    fn tick_decrementer(&mut self, cycles: u32) {
        if self.decrementer_base == 0 {
            return;
        }

        let effective = cycles + self.decrementer_extra;
        self.decrementer_extra = effective & 3;

        let mut value = i32::from(self.peek_word(DECREMENTER_LATCH)) - (effective >> 2) as i32;
        if value <= 0 {
            value += i32::from(self.decrementer_base);
            self.poke_word(DECREMENTER_LATCH, value as u16);
            self.pending_interrupts |= 1 << IRQ_DECREMENTER;
        } else {
            self.poke_word(DECREMENTER_LATCH, value as u16);
        }
    }

    /// Zero the live counter so the next batch underflows ("sync IRQ3 to
    /// the system clock").
    fn force_decrementer_sync(&mut self) {
        if self.decrementer_base != 0 {
            self.poke_word(DECREMENTER_LATCH, 0);
        }
    }

    /// A physical bit arriving at the cassette output. The first bit ever
    /// written opens a SAVE; a sync violation at a group boundary ends it.
    fn tape_output(&mut self, bit: u8) {
        if self.tape.mode() == TapeMode::Idle {
            self.tape.open_save();
        }
        if !self.tape.write_bit(bit) {
            match self.tape.mode() {
                TapeMode::Saving => self.tape.finish_save(),
                _ => self.tape.finish_load(),
            }
        }
    }

    /// Cassette interrupt arm (0xEE40). Stock firmware has not been seen
    /// using this; behind the configuration flag each pulse clocks in a
    /// bit and a 1 raises level 4.
    fn tape_irq_arm(&mut self) {
        if !self.config.tape_interrupt {
            return;
        }
        if self.tape.mode() == TapeMode::Idle {
            self.tape.open_load();
        }
        let bit = self.tape.read_bit().unwrap_or(0);
        self.tape.bit_waiting = bit != 0;
        if self.tape.bit_waiting {
            self.pending_interrupts |= 1 << IRQ_TAPE;
        }
    }

    /// Cassette interrupt disarm (0xEE60), fired by the ROM on reset and
    /// at end of tape activity. Mid-load with a bit still waiting the
    /// deck stays open; otherwise the running transport is closed.
    fn tape_irq_disarm(&mut self) {
        if self.tape.bit_waiting {
            return;
        }
        match self.tape.mode() {
            TapeMode::Saving => self.tape.finish_save(),
            _ => self.tape.finish_load(),
        }
    }

    /// Stock-ROM entry-point traps for the cassette LOAD paths, plus the
    /// tape-ready busy-wait shortcut and the paste pacer. Returns the PC
    /// to resume at when a routine was bypassed.
    fn rom_traps(&mut self, pc: u16, wp: u16) -> Option<u16> {
        // Paste support: hold further keystrokes until the Tutor has
        // finished probing the keyboard lines.
        if pc == PASTE_WATCH_PC && self.paste_wait > 0 {
            self.paste_wait -= 1;
        }

        // C @>F0D8,R13 / JNE -3: the tape-ready busy-wait. The tape is
        // always ready here, so step straight over it.
        if self.peek_word(pc) == 0x8360
            && self.peek_word(pc.wrapping_add(2)) == 0xF0D8
            && self.peek_word(pc.wrapping_add(4)) == 0x16FD
        {
            return Some(pc.wrapping_add(6));
        }

        if !self.config.tape_traps {
            return None;
        }

        match pc {
            // GRAPHIC LOAD entry from <MON>. IRQ mask, R7 and R9 are
            // already set by the time the ROM gets here.
            0x2788 => {
                if self.tape.mode() != TapeMode::Loading {
                    self.tape.open_load();
                }
                self.tape.skip_sync();
                self.set_reg(wp, 12, 0xED00);
                // Next stop: read a byte from tape.
                Some(0x27BE)
            }
            // GRAPHIC LOAD byte fetch: a tape byte lands in the upper
            // byte of R8 (and R5); R1/R6/R12 leave as the routine would.
            0x27BE => match self.tape.read_byte() {
                Some(byte) => {
                    let value = u16::from(byte) << 8;
                    self.set_reg(wp, 8, value);
                    self.set_reg(wp, 5, value);
                    self.set_reg(wp, 1, 0x0000);
                    self.set_reg(wp, 6, 0x0000);
                    self.set_reg(wp, 12, 0x1EE0);
                    Some(0x27E8)
                }
                // Out of tape: FORM ERR.
                None => Some(0x284C),
            },
            // Short-circuit the continuation test so loads keep going.
            0x2848 => Some(0x27BE),

            // BASIC LOAD primary sync detector.
            0x8E40 => {
                if self.tape.mode() != TapeMode::Loading {
                    self.tape.open_load();
                }
                self.tape.skip_sync();
                self.set_reg(wp, 12, 0xED00);
                self.set_reg(wp, 1, 0x0065);
                Some(0x8E7C)
            }
            // BASIC LOAD secondary sync detector; returns through *R11.
            0x8FCA => {
                self.tape.skip_sync();
                self.set_reg(wp, 12, 0xED00);
                self.set_reg(wp, 1, 0x0065);
                Some(self.reg(wp, 11))
            }
            // BASIC LOAD byte fetch; returns through *R11, or takes the
            // ERR 19 exit at end of tape.
            0x8FE4 => match self.tape.read_byte() {
                Some(byte) => {
                    let value = u16::from(byte) << 8;
                    self.set_reg(wp, 8, value);
                    self.set_reg(wp, 5, value);
                    self.set_reg(wp, 1, 0x0000);
                    Some(self.reg(wp, 11))
                }
                None => Some(0x8F30),
            },
            _ => None,
        }
    }
}

impl Bus for TutorBus {
    fn read_word(&mut self, addr: u16) -> u16 {
        let addr = addr & 0xFFFE;

        match addr {
            VDP_DATA => {
                let byte = self.vdp.read_data();
                self.memory[usize::from(VDP_DATA)] = byte;
                self.peek_word(VDP_DATA)
            }
            VDP_CTRL => {
                let byte = self.vdp.read_status();
                self.memory[usize::from(VDP_CTRL)] = byte;
                self.peek_word(VDP_CTRL)
            }
            // Open bus: reads come back as zero words (and leave zeros
            // behind, as the hardware's bus capacitance never did).
            0xC000..=0xDFFE | 0xE004..=0xEFFE => {
                self.poke_word(addr, 0x0000);
                0x0000
            }
            _ => self.peek_word(addr),
        }
    }

    fn write_word(&mut self, addr: u16, data: u16) {
        let addr = addr & 0xFFFE;

        // ROM is write-protected; everything else mirrors into the
        // memory array before MMIO dispatch.
        if addr >= 0xC000 {
            self.poke_word(addr, data);
        }

        match addr {
            VDP_CTRL => self.vdp.write_control(data as u8),
            VDP_DATA => self.vdp.write_data(data as u8),
            PSG_PORT => self.psg.write_port(data as u8),
            TAPE_BIT0 => self.tape_output(0),
            TAPE_BIT1 => {
                // On startup, a single spurious write is emitted.
                if !self.absorbed_first_tape_write {
                    self.absorbed_first_tape_write = true;
                    return;
                }
                self.tape_output(1);
            }
            TAPE_IRQ_ON => self.tape_irq_arm(),
            TAPE_IRQ_OFF => self.tape_irq_disarm(),
            DECREMENTER_LATCH => {
                // No byte access exists for this latch. Writing seeds the
                // live counter and clears the fractional carry.
                self.decrementer_base = data;
                self.decrementer_extra = 0;
            }
            _ => {}
        }
    }

    fn read_byte(&mut self, addr: u16) -> u8 {
        match addr {
            VDP_DATA => {
                let byte = self.vdp.read_data();
                self.memory[usize::from(VDP_DATA)] = byte;
                byte
            }
            VDP_CTRL => {
                let byte = self.vdp.read_status();
                self.memory[usize::from(VDP_CTRL)] = byte;
                byte
            }
            // Open bus reads 0xFF on the byte path.
            0xC000..=0xDFFF | 0xE003..=0xEFFF => {
                self.memory[usize::from(addr)] = 0xFF;
                0xFF
            }
            _ => self.memory[usize::from(addr)],
        }
    }

    fn write_byte(&mut self, addr: u16, data: u8) {
        if addr >= 0xC000 {
            self.memory[usize::from(addr)] = data;
        }

        match addr {
            VDP_CTRL => self.vdp.write_control(data),
            VDP_DATA => self.vdp.write_data(data),
            PSG_PORT => self.psg.write_port(data),
            _ => {}
        }
    }

    fn cru_write_bit(&mut self, addr: u16, bit: bool) {
        // Internal CRU flags 0 and 1; the Tutor uses nothing else.
        match addr {
            0x1EE0 => self.decrementer_event_mode = bit,
            0x1EE2 => self.decrementer_enabled = bit,
            _ => {}
        }
    }

    fn cru_read(&mut self, base: u16, count: u16) -> u16 {
        if count > 8 {
            return 0;
        }
        match self.keyboard.cru_row(base) {
            Some(row) => u16::from(row),
            // Unscanned bases float high for the requested width.
            None => (1u16 << count) - 1,
        }
    }

    fn check_interrupts(&self) -> InterruptState {
        InterruptState {
            levels: self.pending_interrupts,
        }
    }

    fn acknowledge_interrupt(&mut self, level: u8) {
        self.pending_interrupts &= !(1u16 << level);
    }

    fn instruction_hook(&mut self, pc: u16, wp: u16) -> Option<u16> {
        self.rom_traps(pc, wp)
    }
}

// ---------------------------------------------------------------------------
// Machine
// ---------------------------------------------------------------------------

/// The Tomy Tutor. All emulated state lives here, created once at reset
/// and owned for the lifetime of the machine.
pub struct TutorSystem {
    cpu: Tms9995,
    bus: TutorBus,
    frame_counter: u32,
    reset_pending: bool,
}

impl Default for TutorSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl TutorSystem {
    pub fn new() -> Self {
        Self::with_config(TutorConfig::default())
    }

    pub fn with_config(config: TutorConfig) -> Self {
        Self {
            cpu: Tms9995::new(),
            bus: TutorBus::new(config),
            frame_counter: 0,
            reset_pending: false,
        }
    }

    /// Load both ROM images, validating sizes. A bad set refuses the
    /// machine. Resets on success.
    pub fn load_rom_set(&mut self, rom_set: &RomSet) -> Result<(), RomLoadError> {
        let rom1 = TUTOR_ROM1.load(rom_set)?;
        let rom2 = TUTOR_ROM2.load(rom_set)?;
        self.bus.rom_checksums = (crc32(&rom1), crc32(&rom2));
        self.bus.rom1.copy_from_slice(&rom1);
        self.bus.rom2.copy_from_slice(&rom2);
        self.reset();
        Ok(())
    }

    pub fn cpu(&self) -> &Tms9995 {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Tms9995 {
        &mut self.cpu
    }

    pub fn bus(&self) -> &TutorBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut TutorBus {
        &mut self.bus
    }

    pub fn cpu_state(&self) -> Tms9995State {
        self.cpu.snapshot()
    }

    /// Execute one instruction, charge the decrementer, and take any
    /// newly allowed interrupt. Returns the cycles consumed. Works while
    /// halted, so it doubles as the debugger's single-step.
    pub fn step(&mut self) -> u32 {
        let cycles = self.cpu.execute_next(&mut self.bus);
        self.bus.tick_decrementer(cycles);
        cycles + self.cpu.service_interrupts(&mut self.bus)
    }

    /// True while the debugger signal is raised (illegal or stubbed
    /// opcode). `run_frame` idles until `resume` or `step`.
    pub fn halted(&self) -> bool {
        self.cpu.debug_trip
    }

    pub fn resume(&mut self) {
        self.cpu.debug_trip = false;
    }

    /// Request a reset at the next instruction boundary.
    pub fn request_reset(&mut self) {
        self.reset_pending = true;
    }

    /// Supply an ASCII-bit tape image for the next LOAD.
    pub fn insert_tape(&mut self, bits: Vec<u8>) {
        self.bus.tape.insert(bits);
    }

    /// Collect the output of a completed SAVE.
    pub fn take_tape(&mut self) -> Option<Vec<u8>> {
        self.bus.tape.take_saved()
    }

    /// Paste pacing: the host parks a tick count here and feeds the next
    /// keystroke when it drains to zero.
    pub fn set_paste_wait(&mut self, ticks: u32) {
        self.bus.paste_wait = ticks;
    }

    pub fn paste_wait(&self) -> u32 {
        self.bus.paste_wait
    }

    /// Serialize the machine: memory, VRAM, CPU registers, VDP registers.
    /// Register fields are in host byte order; the format is not portable
    /// across endianness.
    pub fn save_state(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SNAPSHOT_LEN);
        out.extend_from_slice(&self.bus.memory[..]);
        out.extend_from_slice(self.bus.vdp.vram());
        for value in [self.cpu.wp, self.cpu.pc, self.cpu.st, self.cpu.ir] {
            out.extend_from_slice(&value.to_ne_bytes());
        }
        out.extend_from_slice(&self.bus.vdp.mp.to_ne_bytes());
        out.push(self.bus.vdp.status);
        for register in self.bus.vdp.registers {
            out.extend_from_slice(&u16::from(register).to_ne_bytes());
        }
        out
    }

    /// Restore a snapshot produced by `save_state`. The only validation
    /// is the total length.
    pub fn load_state(&mut self, data: &[u8]) -> Result<(), SnapshotSizeError> {
        if data.len() != SNAPSHOT_LEN {
            return Err(SnapshotSizeError {
                expected: SNAPSHOT_LEN,
                actual: data.len(),
            });
        }

        let (memory, rest) = data.split_at(0x10000);
        let (vram, rest) = rest.split_at(0x4000);
        self.bus.memory.copy_from_slice(memory);
        self.bus.vdp.load_vram(vram);

        let word = |offset: usize| u16::from_ne_bytes([rest[offset], rest[offset + 1]]);
        self.cpu.wp = word(0);
        self.cpu.pc = word(2);
        self.cpu.st = word(4);
        self.cpu.ir = word(6);
        self.bus.vdp.mp = word(8);
        self.bus.vdp.status = rest[10];
        for (i, register) in self.bus.vdp.registers.iter_mut().enumerate() {
            *register = u16::from_ne_bytes([rest[11 + i * 2], rest[12 + i * 2]]) as u8;
        }
        self.bus.vdp.mark_dirty();
        Ok(())
    }
}

impl Machine for TutorSystem {
    fn display_size(&self) -> (u32, u32) {
        (SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
    }

    fn run_frame(&mut self) {
        let mut budget = CYCLES_PER_FRAME as i64;
        while budget > 0 {
            if self.reset_pending {
                self.reset_pending = false;
                self.reset();
            }
            if self.cpu.debug_trip {
                break;
            }
            // Trap-bypassed instructions are free; keep the loop bounded.
            budget -= i64::from(self.step().max(1));
        }

        self.frame_counter += 1;
        if self.bus.config.sync_irq3 {
            self.bus.force_decrementer_sync();
        }
        if self.frame_counter % self.bus.config.composite_divisor.max(1) == 0 {
            self.bus.vdp.composite();
            self.bus.vdp.clear_frame_flag();
        }
    }

    fn render_frame(&self, buffer: &mut [u8]) {
        self.bus.vdp.render_frame(buffer);
    }

    fn set_input(&mut self, button: u8, pressed: bool) {
        self.bus.keyboard.set(button, pressed);
    }

    fn input_map(&self) -> &[InputButton] {
        TUTOR_INPUT_MAP
    }

    fn reset(&mut self) {
        self.bus.reset();
        self.cpu.reset(&mut self.bus);
        self.frame_counter = 0;
        self.reset_pending = false;
    }

    fn fill_audio(&mut self, buffer: &mut [i16]) -> usize {
        self.bus.psg.generate(buffer);
        buffer.len()
    }

    fn audio_sample_rate(&self) -> u32 {
        sn76489::SAMPLE_RATE
    }

    fn frame_rate_hz(&self) -> f64 {
        FRAME_RATE_HZ
    }
}

// ---------------------------------------------------------------------------
// Machine registry
// ---------------------------------------------------------------------------

fn create_machine(rom_set: &RomSet) -> Result<Box<dyn Machine>, RomLoadError> {
    let mut sys = TutorSystem::new();
    sys.load_rom_set(rom_set)?;
    Ok(Box::new(sys))
}

inventory::submit! {
    MachineEntry::new("tutor", "tutor", create_machine)
}
