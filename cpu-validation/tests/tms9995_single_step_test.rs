//! Replay generated single-instruction vectors against the interpreter.
//!
//! Vectors are produced by the `gen_tms9995_tests` binary and are not
//! checked in; families without data are skipped with a notice so a
//! fresh checkout still passes.

use std::io::Read;

use flate2::read::GzDecoder;
use tutor_core::cpu::Tms9995;
use tutor_cpu_validation::{TestCase, TracingBus};

fn run_test_case(tc: &TestCase) {
    let mut cpu = Tms9995::new();
    let mut bus = TracingBus::new();

    cpu.pc = tc.initial.pc;
    cpu.wp = tc.initial.wp;
    cpu.st = tc.initial.st;
    for &(addr, value) in &tc.initial.ram {
        let index = usize::from(addr);
        bus.memory[index..index + 2].copy_from_slice(&value.to_be_bytes());
    }

    let cycles = cpu.execute_next(&mut bus);

    assert_eq!(cpu.pc, tc.final_state.pc, "{}: PC", tc.name);
    assert_eq!(cpu.wp, tc.final_state.wp, "{}: WP", tc.name);
    assert_eq!(cpu.st, tc.final_state.st, "{}: ST", tc.name);
    assert_eq!(cycles, tc.cycles, "{}: cycles", tc.name);

    for &(addr, expected) in &tc.final_state.ram {
        let index = usize::from(addr);
        let actual = u16::from_be_bytes([bus.memory[index], bus.memory[index + 1]]);
        assert_eq!(actual, expected, "{}: memory at >{addr:04X}", tc.name);
    }
}

fn run_family(name: &str) {
    let path = format!("test_data/tms9995/{name}.json.gz");
    let Ok(file) = std::fs::File::open(&path) else {
        eprintln!(
            "skipping {name}: no vectors at {path} \
             (cargo run -p tutor-cpu-validation --bin gen_tms9995_tests -- {name})"
        );
        return;
    };

    let mut json = String::new();
    GzDecoder::new(file)
        .read_to_string(&mut json)
        .expect("decompress vectors");
    let tests: Vec<TestCase> = serde_json::from_str(&json).expect("parse vectors");
    assert!(!tests.is_empty(), "vector file is empty");
    for tc in &tests {
        run_test_case(tc);
    }
}

#[test]
fn immediate_vectors() {
    run_family("immediate");
}

#[test]
fn single_op_vectors() {
    run_family("single_op");
}

#[test]
fn shift_vectors() {
    run_family("shift");
}

#[test]
fn jump_vectors() {
    run_family("jump");
}

#[test]
fn coc_czc_xor_vectors() {
    run_family("coc_czc_xor");
}

#[test]
fn mpy_div_vectors() {
    run_family("mpy_div");
}

#[test]
fn divs_mpys_vectors() {
    run_family("divs_mpys");
}

#[test]
fn two_op_word_vectors() {
    run_family("two_op_word");
}

#[test]
fn two_op_byte_vectors() {
    run_family("two_op_byte");
}
