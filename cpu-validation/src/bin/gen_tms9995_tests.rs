//! Randomized single-instruction vector generator for the TMS9995.
//!
//! For each requested family this runs the interpreter over randomized
//! CPU state and memory and records (initial, final, cycles) triples.
//! The vectors pin today's behavior so interpreter refactors can be
//! checked instruction by instruction:
//!
//!   cargo run -p tutor-cpu-validation --bin gen_tms9995_tests -- all

use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use rand::Rng;
use tutor_core::cpu::Tms9995;
use tutor_cpu_validation::{CpuState, TestCase, TracingBus};

const NUM_TESTS: usize = 500;

/// Instruction families with a random encoder each. Families whose only
/// behavior is the debugger trip (illegal blocks, XOP, LDCR, TB) are not
/// vectorized.
const FAMILIES: &[(&str, fn(&mut dyn FnMut(u16) -> u16) -> u16)] = &[
    ("immediate", |rng| 0x0200 | (rng(9) << 5) | rng(16)),
    // X is left out: chained random execution can loop on itself.
    ("single_op", |rng| {
        let op = [0u16, 1, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13][rng(13) as usize];
        0x0400 | (op << 6) | rng(64)
    }),
    ("shift", |rng| 0x0800 | (rng(4) << 8) | rng(256)),
    ("jump", |rng| 0x1000 | (rng(13) << 8) | rng(256)),
    ("coc_czc_xor", |rng| 0x2000 | (rng(3) << 10) | rng(1024)),
    ("mpy_div", |rng| 0x3800 | (rng(2) << 10) | rng(1024)),
    ("divs_mpys", |rng| 0x0100 | (rng(2) << 6) | 0x80 | rng(64)),
    ("two_op_word", |rng| {
        let block = [0x4000u16, 0x6000, 0x8000, 0xA000, 0xC000, 0xE000];
        block[rng(6) as usize] | rng(4096)
    }),
    ("two_op_byte", |rng| {
        let block = [0x5000u16, 0x7000, 0x9000, 0xB000, 0xD000, 0xF000];
        block[rng(6) as usize] | rng(4096)
    }),
];

fn snapshot(cpu: &Tms9995, bus: &TracingBus, touched: &BTreeSet<u16>) -> CpuState {
    CpuState {
        pc: cpu.pc,
        wp: cpu.wp,
        st: cpu.st,
        ram: touched
            .iter()
            .map(|&addr| {
                let index = usize::from(addr);
                (addr, u16::from_be_bytes([bus.memory[index], bus.memory[index + 1]]))
            })
            .collect(),
    }
}

fn generate_family(
    rng: &mut impl Rng,
    name: &str,
    encode: fn(&mut dyn FnMut(u16) -> u16) -> u16,
) -> Vec<TestCase> {
    let mut tests = Vec::with_capacity(NUM_TESTS);
    let mut serial = 0usize;

    while tests.len() < NUM_TESTS {
        let mut cpu = Tms9995::new();
        let mut bus = TracingBus::new();

        rng.fill(&mut bus.memory[..]);

        // Keep PC and WP even and clear of the address-space top so
        // immediate operands and workspaces stay in bounds.
        cpu.pc = rng.gen_range(0x0100..0x7F00) & !1;
        cpu.wp = rng.gen_range(0x8000..0xFF00) & !1;
        cpu.st = rng.r#gen::<u16>();

        let opcode = {
            let mut pick = |bound: u16| rng.gen_range(0..bound);
            encode(&mut pick)
        };
        bus.load(cpu.pc, &opcode.to_be_bytes());

        let before_memory = bus.memory;
        let before = (cpu.pc, cpu.wp, cpu.st);

        let cycles = cpu.execute_next(&mut bus);
        if cpu.debug_trip {
            // Landed on an illegal or stubbed encoding; reroll.
            continue;
        }

        // Record every even address the instruction touched.
        let touched: BTreeSet<u16> = bus
            .accesses
            .iter()
            .map(|access| access.addr & 0xFFFE)
            .collect();

        let initial = CpuState {
            pc: before.0,
            wp: before.1,
            st: before.2,
            ram: touched
                .iter()
                .map(|&addr| {
                    let index = usize::from(addr);
                    (
                        addr,
                        u16::from_be_bytes([before_memory[index], before_memory[index + 1]]),
                    )
                })
                .collect(),
        };

        serial += 1;
        tests.push(TestCase {
            name: format!("{name} {serial:04} >{opcode:04x}"),
            initial,
            final_state: snapshot(&cpu, &bus, &touched),
            cycles,
        });
    }

    tests
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let wanted: Vec<&str> = if args.is_empty() || args.iter().any(|a| a == "all") {
        FAMILIES.iter().map(|(name, _)| *name).collect()
    } else {
        args.iter().map(String::as_str).collect()
    };

    let out_dir = Path::new("test_data/tms9995");
    fs::create_dir_all(out_dir).expect("create test_data directory");

    let mut rng = rand::thread_rng();
    for (name, encode) in FAMILIES {
        if !wanted.contains(name) {
            continue;
        }
        let tests = generate_family(&mut rng, name, *encode);
        let json = serde_json::to_string(&tests).expect("serialize vectors");

        let path = out_dir.join(format!("{name}.json.gz"));
        let file = fs::File::create(&path).expect("create vector file");
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(json.as_bytes()).expect("write vectors");
        encoder.finish().expect("finish gzip stream");
        println!("{}: {} cases", path.display(), tests.len());
    }
}
