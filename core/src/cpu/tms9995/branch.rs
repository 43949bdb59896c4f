//! Jump and CRU bit instructions (>1000->1FFF): the thirteen conditional
//! jumps plus SBO, SBZ and TB.

use crate::core::Bus;

use super::{StFlag, Tms9995};

impl Tms9995 {
    pub(crate) fn op_jump_cru<B: Bus + ?Sized>(&mut self, bus: &mut B, opcode: u16) {
        // 8-bit signed word offset, applied to PC in bytes.
        let offset = (opcode as i8 as i16).wrapping_mul(2) as u16;

        let taken = match (opcode & 0xF00) >> 8 {
            0 => true,                                            // JMP
            1 => !self.flag(StFlag::Agt) && !self.flag(StFlag::Eq), // JLT
            2 => !self.flag(StFlag::Lgt) || self.flag(StFlag::Eq),  // JLE
            3 => self.flag(StFlag::Eq),                             // JEQ
            4 => self.flag(StFlag::Lgt) || self.flag(StFlag::Eq),   // JHE
            5 => self.flag(StFlag::Agt),                            // JGT
            6 => !self.flag(StFlag::Eq),                            // JNE
            7 => !self.flag(StFlag::C),                             // JNC
            8 => self.flag(StFlag::C),                              // JOC
            9 => !self.flag(StFlag::Ov),                            // JNO
            10 => !self.flag(StFlag::Lgt) && !self.flag(StFlag::Eq), // JL
            11 => self.flag(StFlag::Lgt) && !self.flag(StFlag::Eq),  // JH
            12 => {
                // JOP: parity comes straight from lastparity, not ST.
                self.lastparity.count_ones() & 1 != 0
            }
            13 => {
                // SBO
                let addr = self.cru_bit_addr(bus, opcode);
                bus.cru_write_bit(addr, true);
                self.charge(8);
                return;
            }
            14 => {
                // SBZ
                let addr = self.cru_bit_addr(bus, opcode);
                bus.cru_write_bit(addr, false);
                self.charge(8);
                return;
            }
            _ => {
                // TB: the Tutor software never tests single CRU bits; flag
                // it for the debugger and leave EQ clear.
                self.debug_trip = true;
                self.set_eq(0, 1);
                self.charge(8);
                return;
            }
        };

        if taken {
            self.pc = self.pc.wrapping_add(offset);
        }
        self.charge(3);
    }

    /// CRU bit address: R12 plus twice the signed displacement.
    fn cru_bit_addr<B: Bus + ?Sized>(&mut self, bus: &mut B, opcode: u16) -> u16 {
        let displacement = (opcode as i8 as i16).wrapping_mul(2) as u16;
        self.read_reg(bus, 12).wrapping_add(displacement)
    }
}
