mod common;

use common::TestBus;
use tutor_core::cpu::Tms9995;
use tutor_core::cpu::tms9995::StFlag;

const WP: u16 = 0xF000;
const PC: u16 = 0x0100;

fn setup(regs: &[(u16, u16)]) -> (Tms9995, TestBus) {
    let mut cpu = Tms9995::new();
    let mut bus = TestBus::new();
    cpu.wp = WP;
    cpu.pc = PC;
    for &(r, value) in regs {
        bus.load_words(WP + r * 2, &[value]);
    }
    (cpu, bus)
}

fn reg(bus: &TestBus, r: u16) -> u16 {
    bus.word(WP + r * 2)
}

// Opcode builders: SRA 0x08, SRL 0x09, SLA 0x0A, SRC 0x0B.
fn sra(count: u16, r: u16) -> u16 {
    0x0800 | (count << 4) | r
}
fn srl(count: u16, r: u16) -> u16 {
    0x0900 | (count << 4) | r
}
fn sla(count: u16, r: u16) -> u16 {
    0x0A00 | (count << 4) | r
}
fn src(count: u16, r: u16) -> u16 {
    0x0B00 | (count << 4) | r
}

#[test]
fn sra_copies_sign_and_carries_last_bit_out() {
    let (mut cpu, mut bus) = setup(&[(1, 0x8000)]);
    bus.load_words(PC, &[sra(4, 1)]);
    cpu.execute_next(&mut bus);
    assert_eq!(reg(&bus, 1), 0xF800);
    assert!(!cpu.flag(StFlag::C));
    assert!(cpu.flag(StFlag::Lgt));
    assert!(!cpu.flag(StFlag::Agt));

    let (mut cpu, mut bus) = setup(&[(1, 0x0003)]);
    bus.load_words(PC, &[sra(1, 1)]);
    cpu.execute_next(&mut bus);
    assert_eq!(reg(&bus, 1), 0x0001);
    assert!(cpu.flag(StFlag::C));
}

#[test]
fn srl_zero_fills() {
    let (mut cpu, mut bus) = setup(&[(1, 0x8420)]);
    bus.load_words(PC, &[srl(4, 1)]);
    cpu.execute_next(&mut bus);
    assert_eq!(reg(&bus, 1), 0x0842);
    assert!(!cpu.flag(StFlag::C));

    let (mut cpu, mut bus) = setup(&[(1, 0x0010)]);
    bus.load_words(PC, &[srl(5, 1)]);
    cpu.execute_next(&mut bus);
    assert_eq!(reg(&bus, 1), 0x0000);
    assert!(cpu.flag(StFlag::C));
    assert!(cpu.flag(StFlag::Eq));
}

#[test]
fn sla_overflow_on_sign_change() {
    let (mut cpu, mut bus) = setup(&[(1, 0x4000)]);
    bus.load_words(PC, &[sla(1, 1)]);
    cpu.execute_next(&mut bus);
    assert_eq!(reg(&bus, 1), 0x8000);
    assert!(cpu.flag(StFlag::Ov));
    assert!(!cpu.flag(StFlag::C));

    let (mut cpu, mut bus) = setup(&[(1, 0x0001)]);
    bus.load_words(PC, &[sla(1, 1)]);
    cpu.execute_next(&mut bus);
    assert_eq!(reg(&bus, 1), 0x0002);
    assert!(!cpu.flag(StFlag::Ov));
}

#[test]
fn src_rotates_right() {
    let (mut cpu, mut bus) = setup(&[(1, 0x1234)]);
    bus.load_words(PC, &[src(4, 1)]);
    cpu.execute_next(&mut bus);
    assert_eq!(reg(&bus, 1), 0x4123);
    assert!(!cpu.flag(StFlag::C));

    // Full rotation is the identity.
    let (mut cpu, mut bus) = setup(&[(0, 0x0000), (1, 0xBEEF)]);
    bus.load_words(PC, &[src(0, 1)]); // count from R0 low nibble: 0 -> 16
    cpu.execute_next(&mut bus);
    assert_eq!(reg(&bus, 1), 0xBEEF);
}

#[test]
fn count_zero_reads_r0_and_zero_there_means_sixteen() {
    let (mut cpu, mut bus) = setup(&[(0, 0x0000), (1, 0x0001)]);
    bus.load_words(PC, &[sla(0, 1)]);
    let cycles = cpu.execute_next(&mut bus);

    assert_eq!(reg(&bus, 1), 0x0000);
    assert!(cpu.flag(StFlag::Eq));
    assert!(cpu.flag(StFlag::C), "bit 0 was the last one out");
    // 5 + 2 + 16 machine states, two clocks each.
    assert_eq!(cycles, 46);
}

#[test]
fn count_zero_uses_low_nibble_of_r0() {
    let (mut cpu, mut bus) = setup(&[(0, 0x0013), (1, 0x0001)]);
    bus.load_words(PC, &[sla(0, 1)]);
    cpu.execute_next(&mut bus);
    assert_eq!(reg(&bus, 1), 0x0008);
}

#[test]
fn sla_then_srl_is_identity_for_narrow_values() {
    // Any value at most 16-n bits wide survives SLA n / SRL n.
    for value in [0x0001u16, 0x0155, 0x1FFF] {
        let (mut cpu, mut bus) = setup(&[(1, value)]);
        bus.load_words(PC, &[sla(3, 1), srl(3, 1)]);
        cpu.execute_next(&mut bus);
        cpu.execute_next(&mut bus);
        assert_eq!(reg(&bus, 1), value);
    }
}
