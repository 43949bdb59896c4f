use tutor_core::core::bus::InterruptState;
use tutor_core::core::Bus;

use serde::{Deserialize, Serialize};

// --- TracingBus: flat 64KB memory with bus-operation recording ---

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BusOp {
    Read,
    Write,
}

#[derive(Clone, Debug)]
pub struct BusCycle {
    pub addr: u16,
    pub data: u16,
    pub op: BusOp,
}

/// Flat 64 KiB word bus that records every access. No MMIO, no
/// interrupts: pure memory, for exercising the CPU in isolation.
pub struct TracingBus {
    pub memory: [u8; 0x10000],
    pub accesses: Vec<BusCycle>,
}

impl TracingBus {
    pub fn new() -> Self {
        Self {
            memory: [0; 0x10000],
            accesses: Vec::new(),
        }
    }

    pub fn load(&mut self, addr: u16, data: &[u8]) {
        let start = usize::from(addr);
        self.memory[start..start + data.len()].copy_from_slice(data);
    }

    pub fn clear_accesses(&mut self) {
        self.accesses.clear();
    }

    fn word(&self, addr: u16) -> u16 {
        let index = usize::from(addr & 0xFFFE);
        u16::from_be_bytes([self.memory[index], self.memory[index + 1]])
    }
}

impl Default for TracingBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for TracingBus {
    fn read_word(&mut self, addr: u16) -> u16 {
        let data = self.word(addr);
        self.accesses.push(BusCycle {
            addr: addr & 0xFFFE,
            data,
            op: BusOp::Read,
        });
        data
    }

    fn write_word(&mut self, addr: u16, data: u16) {
        let index = usize::from(addr & 0xFFFE);
        self.memory[index..index + 2].copy_from_slice(&data.to_be_bytes());
        self.accesses.push(BusCycle {
            addr: addr & 0xFFFE,
            data,
            op: BusOp::Write,
        });
    }

    fn write_byte(&mut self, addr: u16, data: u8) {
        self.memory[usize::from(addr)] = data;
        self.accesses.push(BusCycle {
            addr,
            data: u16::from(data),
            op: BusOp::Write,
        });
    }

    fn cru_write_bit(&mut self, _addr: u16, _bit: bool) {}

    fn cru_read(&mut self, _base: u16, count: u16) -> u16 {
        (1u16 << count.min(15)) - 1
    }

    fn check_interrupts(&self) -> InterruptState {
        InterruptState::default()
    }

    fn acknowledge_interrupt(&mut self, _level: u8) {}
}

// --- JSON test vector types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub initial: CpuState,
    #[serde(rename = "final")]
    pub final_state: CpuState,
    pub cycles: u32,
}

/// Architectural state plus the touched memory words. `ram` holds
/// (address, word) pairs, the workspace included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuState {
    pub pc: u16,
    pub wp: u16,
    pub st: u16,
    pub ram: Vec<(u16, u16)>,
}
