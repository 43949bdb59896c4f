//! Immediate and control instructions (opcode families 0x00xx-0x03xx):
//! LST/LWP, DIVS/MPYS, and the LI/AI/ANDI/ORI/CI/STWP/STST/LWPI/LIMI/
//! RSET/RTWP/CKON/CKOF/LREX block.

use crate::core::Bus;

use super::{StFlag, ST_IMASK, Tms9995};

impl Tms9995 {
    /// >0040->00FF: single-register extensions. Only LST and LWP exist on
    /// the TMS9995; the rest of the block is illegal.
    pub(crate) fn op_lst_lwp<B: Bus + ?Sized>(&mut self, bus: &mut B, opcode: u16) {
        let addr = self.wp.wrapping_add((opcode & 0xF) << 1) & !1;

        match (opcode & 0xF0) >> 4 {
            8 => {
                // LST: ST = *Reg
                self.st = bus.read_word(addr);
                self.parity_from_st();
            }
            9 => {
                // LWP: WP = *Reg
                self.wp = bus.read_word(addr) & !1;
            }
            _ => self.illegal(opcode),
        }
    }

    /// >0100->01FF: DIVS and MPYS (signed 32/16 divide and 16x16 multiply
    /// over the R0:R1 pair).
    pub(crate) fn op_divs_mpys<B: Bus + ?Sized>(&mut self, bus: &mut B, opcode: u16) {
        let src = self.operand_addr(bus, opcode, false) & !1;

        match (opcode & 0xC0) >> 6 {
            2 => {
                // DIVS: R0 = (R0:R1)/S, R1 = (R0:R1)%S
                let d = bus.read_word(src) as i16;
                let dividend = ((u32::from(self.read_reg(bus, 0)) << 16)
                    | u32::from(self.read_reg(bus, 1))) as i32;
                let quotient = if d == 0 {
                    i64::from(i32::MAX)
                } else {
                    i64::from(dividend) / i64::from(d)
                };

                if !(-32768..=32767).contains(&quotient) {
                    self.st |= StFlag::Ov as u16;
                    self.charge(10);
                } else {
                    self.st &= !(StFlag::Ov as u16);
                    self.set_lae(quotient as u16);
                    self.write_reg(bus, 0, quotient as u16);
                    let remainder = (i64::from(dividend) % i64::from(d)) as u16;
                    self.write_reg(bus, 1, remainder);
                    // 33 machine states is the worst case
                    self.charge(33);
                }
            }
            3 => {
                // MPYS: R0:R1 = R0 * S
                let product = i32::from(self.read_reg(bus, 0) as i16)
                    * i32::from(bus.read_word(src) as i16);

                self.st &= !(StFlag::Lgt as u16 | StFlag::Agt as u16 | StFlag::Eq as u16);
                if product > 0 {
                    self.st |= StFlag::Lgt as u16 | StFlag::Agt as u16;
                } else if product < 0 {
                    self.st |= StFlag::Lgt as u16;
                } else {
                    self.st |= StFlag::Eq as u16;
                }

                self.write_reg(bus, 0, (product >> 16) as u16);
                self.write_reg(bus, 1, product as u16);
                self.charge(25);
            }
            _ => self.illegal(opcode),
        }
    }

    /// >0200->03FF: immediate and control instructions.
    pub(crate) fn op_immediate<B: Bus + ?Sized>(&mut self, bus: &mut B, opcode: u16) {
        let addr = self.wp.wrapping_add((opcode & 0xF) << 1) & !1;

        // The TMS9995 decodes this block more strictly than the TMS9900.
        if ((opcode < 0x2E0) && (opcode & 0x10 != 0)) || ((opcode >= 0x2E0) && (opcode & 0x1F != 0))
        {
            self.illegal(opcode);
            return;
        }

        match (opcode & 0x1E0) >> 5 {
            0 => {
                // LI: *Reg = *PC+
                let value = self.fetch(bus);
                bus.write_word(addr, value);
                self.set_lae(value);
                self.charge(3);
            }
            1 => {
                // AI: *Reg += *PC+
                let value = self.fetch(bus);
                let sum = {
                    let current = bus.read_word(addr);
                    self.add_word(current, value)
                };
                bus.write_word(addr, sum);
                self.charge(4);
            }
            2 => {
                // ANDI
                let value = self.fetch(bus) & bus.read_word(addr);
                bus.write_word(addr, value);
                self.set_lae(value);
                self.charge(4);
            }
            3 => {
                // ORI
                let value = self.fetch(bus) | bus.read_word(addr);
                bus.write_word(addr, value);
                self.set_lae(value);
                self.charge(4);
            }
            4 => {
                // CI: status = *Reg - imm
                let imm = self.fetch(bus);
                let reg = bus.read_word(addr);
                self.set_compare(imm, reg);
                self.charge(4);
            }
            5 => {
                // STWP
                let wp = self.wp;
                bus.write_word(addr, wp);
                self.charge(3);
            }
            6 => {
                // STST: ST is observed, so fold the parity in first.
                self.reconcile_parity();
                let st = self.st;
                bus.write_word(addr, st);
                self.charge(3);
            }
            7 => {
                // LWPI
                self.wp = self.fetch(bus) & !1;
                self.charge(4);
            }
            8 => {
                // LIMI: interrupt mask from the immediate's low nibble.
                // Pending interrupts are re-evaluated at the next boundary.
                let value = self.fetch(bus);
                self.st = (self.st & !ST_IMASK) | (value & ST_IMASK);
                self.charge(5);
            }
            10 => {
                // IDLE is not implemented (the Tutor never sleeps).
                self.illegal(opcode);
                self.charge(7);
            }
            11 => {
                // RSET: clear the interrupt mask.
                self.st &= !ST_IMASK;
                self.charge(7);
            }
            12 => {
                // RTWP: ST = R15, PC = R14, WP = R13
                self.st = self.read_reg(bus, 15);
                self.parity_from_st();
                self.pc = self.read_reg(bus, 14) & !1;
                self.wp = self.read_reg(bus, 13) & !1;
                self.charge(6);
            }
            13 | 14 | 15 => {
                // CKON/CKOF/LREX: external-instruction strobes with no
                // circuitry attached on the Tutor.
                self.charge(7);
            }
            _ => self.illegal(opcode),
        }
    }
}
