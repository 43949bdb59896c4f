//! Single-operand instructions (>0400->07FF): BLWP, B, X, CLR, NEG, INV,
//! INC, INCT, DEC, DECT, BL, SWPB, SETO, ABS.

use crate::core::Bus;

use super::{StFlag, Tms9995};

impl Tms9995 {
    pub(crate) fn op_single<B: Bus + ?Sized>(&mut self, bus: &mut B, opcode: u16) {
        let addr = self.operand_addr(bus, opcode, false) & !1;

        match (opcode & 0x3C0) >> 6 {
            0 => {
                // BLWP: vector through *S; old WP/PC/ST land in new R13-R15.
                self.context_switch(bus, addr);
                self.charge(11);
            }
            1 => {
                // B
                self.pc = addr;
                self.charge(3);
            }
            2 => {
                // X: execute the instruction at *S in place.
                let inner = bus.read_word(addr);
                self.execute(bus, inner);
                self.charge(2);
            }
            3 => {
                // CLR
                bus.write_word(addr, 0);
                self.charge(3);
            }
            4 => {
                // NEG: carry set only when the operand was zero.
                let value = (bus.read_word(addr) as i16).wrapping_neg() as u16;
                self.set_flag(StFlag::C, value == 0);
                self.set_lae_neg(value);
                bus.write_word(addr, value);
                self.charge(3);
            }
            5 => {
                // INV
                let value = !bus.read_word(addr);
                bus.write_word(addr, value);
                self.set_lae(value);
                self.charge(3);
            }
            6 => {
                // INC
                let value = bus.read_word(addr);
                let sum = self.add_word(value, 1);
                bus.write_word(addr, sum);
                self.charge(3);
            }
            7 => {
                // INCT
                let value = bus.read_word(addr);
                let sum = self.add_word(value, 2);
                bus.write_word(addr, sum);
                self.charge(3);
            }
            8 => {
                // DEC
                let value = bus.read_word(addr);
                let diff = self.sub_word(value, 1);
                bus.write_word(addr, diff);
                self.charge(3);
            }
            9 => {
                // DECT
                let value = bus.read_word(addr);
                let diff = self.sub_word(value, 2);
                bus.write_word(addr, diff);
                self.charge(3);
            }
            10 => {
                // BL: R11 = return address
                let pc = self.pc;
                self.write_reg(bus, 11, pc);
                self.pc = addr;
                self.charge(5);
            }
            11 => {
                // SWPB
                let value = bus.read_word(addr).rotate_left(8);
                bus.write_word(addr, value);
                self.charge(13);
            }
            12 => {
                // SETO
                bus.write_word(addr, 0xFFFF);
                self.charge(3);
            }
            13 => {
                // ABS: flags from the original value; the TMS9995 always
                // writes the result back, and 0x8000 stays 0x8000 with OV.
                self.st &= !(StFlag::Lgt as u16
                    | StFlag::Agt as u16
                    | StFlag::Eq as u16
                    | StFlag::C as u16
                    | StFlag::Ov as u16);
                let mut value = bus.read_word(addr);
                self.charge(3);

                if (value as i16) > 0 {
                    self.st |= StFlag::Lgt as u16 | StFlag::Agt as u16;
                } else if (value as i16) < 0 {
                    self.st |= StFlag::Lgt as u16;
                    if value == 0x8000 {
                        self.st |= StFlag::Ov as u16;
                    }
                    value = (value as i16).wrapping_neg() as u16;
                } else {
                    self.st |= StFlag::Eq as u16;
                }

                bus.write_word(addr, value);
            }
            _ => self.illegal(opcode),
        }
    }
}
