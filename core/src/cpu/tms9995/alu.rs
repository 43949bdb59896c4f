//! General (>2000->3FFF) and two-operand (>4000->FFFF) instructions:
//! COC, CZC, XOR, XOP, LDCR, STCR, MPY, DIV, and the word/byte pairs
//! SZC(B), S(B), C(B), A(B), MOV(B), SOC(B).

use crate::core::Bus;

use super::{StFlag, Tms9995};

impl Tms9995 {
    /// COC, CZC, XOR, MPY, DIV: one general source, one register dest.
    pub(crate) fn op_general<B: Bus + ?Sized>(&mut self, bus: &mut B, opcode: u16) {
        let dest_reg = (opcode & 0x3C0) >> 6;
        let src = self.operand_addr(bus, opcode, false);

        match (opcode & 0x1C00) >> 10 {
            0 => {
                // COC: EQ = (S & D == S)
                let dest = self.wp.wrapping_add(dest_reg << 1) & !1;
                let value = bus.read_word(src & !1);
                let masked = value & bus.read_word(dest);
                self.set_eq(masked, value);
                self.charge(4);
            }
            1 => {
                // CZC: EQ = (S & ~D == S)
                let dest = self.wp.wrapping_add(dest_reg << 1) & !1;
                let value = bus.read_word(src & !1);
                let masked = value & !bus.read_word(dest);
                self.set_eq(masked, value);
                self.charge(4);
            }
            2 => {
                // XOR: D ^= S
                let dest = self.wp.wrapping_add(dest_reg << 1) & !1;
                let value = bus.read_word(dest) ^ bus.read_word(src & !1);
                self.set_lae(value);
                bus.write_word(dest, value);
                self.charge(4);
            }
            6 => {
                // MPY (unsigned): D:D+1 = D * S
                let dest = self.wp.wrapping_add(dest_reg << 1) & !1;
                let product =
                    u32::from(bus.read_word(dest)) * u32::from(bus.read_word(src & !1));
                bus.write_word(dest, (product >> 16) as u16);
                bus.write_word(dest.wrapping_add(2), product as u16);
                self.charge(23);
            }
            7 => {
                // DIV (unsigned): D = D/S, D+1 = D%S; overflow when the
                // quotient cannot fit (divisor <= high word covers /0).
                let dest = self.wp.wrapping_add(dest_reg << 1) & !1;
                let divisor = bus.read_word(src & !1);
                let hi = bus.read_word(dest);

                if divisor <= hi {
                    self.st |= StFlag::Ov as u16;
                    self.charge(6);
                } else {
                    self.st &= !(StFlag::Ov as u16);
                    let lo = bus.read_word(dest.wrapping_add(2));
                    let dividend = (u32::from(hi) << 16) | u32::from(lo);
                    bus.write_word(dest, (dividend / u32::from(divisor)) as u16);
                    bus.write_word(dest.wrapping_add(2), (dividend % u32::from(divisor)) as u16);
                    // 28 machine states is the worst case
                    self.charge(28);
                }
            }
            _ => self.illegal(opcode),
        }
    }

    /// XOP: not exercised by the Tutor ROMs; stubbed with the debugger
    /// signal after consuming the operand field.
    pub(crate) fn op_xop<B: Bus + ?Sized>(&mut self, bus: &mut B, opcode: u16) {
        let _operand = self.operand_addr(bus, opcode, false);
        self.debug_trip = true;
        self.charge(15);
    }

    /// LDCR and STCR. The Tutor pulls its CRU data eight bits at a pop
    /// through STCR; LDCR and the 16-bit STCR form are structurally decoded
    /// but flagged for the debugger.
    pub(crate) fn op_ldcr_stcr<B: Bus + ?Sized>(&mut self, bus: &mut B, opcode: u16) {
        let mut count = (opcode & 0x3C0) >> 6;
        if count == 0 {
            count = 16;
        }

        let addr = if count <= 8 {
            self.operand_addr(bus, opcode, true)
        } else {
            self.operand_addr(bus, opcode, false) & !1
        };

        if opcode < 0x3400 {
            // LDCR: serial CRU output, unused by the Tutor software.
            self.debug_trip = true;
            self.charge(9 + 2 * u32::from(count));
            return;
        }

        let base = self.read_reg(bus, 12);

        if count <= 8 {
            // Byte-wide STCR merges into the addressed half of the word,
            // like the earlier 8-bit 99xx parts.
            let word = bus.read_word(addr & !1);
            let value = bus.cru_read(base, count);
            self.set_lae_byte(value as u8);

            let merged = if addr & 1 != 0 {
                (word & 0xFF00) | (value & 0x00FF)
            } else {
                (word & 0x00FF) | ((value << 8) & 0xFF00)
            };
            bus.write_word(addr & !1, merged);
            self.charge(19 + u32::from(count));
        } else {
            let value = bus.cru_read(base, count);
            self.set_lae(value);
            bus.write_word(addr, value);
            self.charge(27 + u32::from(count));
        }
    }

    /// Word two-operand block: SZC, S, C, A, MOV, SOC.
    pub(crate) fn op_two_word<B: Bus + ?Sized>(&mut self, bus: &mut B, opcode: u16) {
        let src = self.operand_addr(bus, opcode, false) & !1;
        let dest = self.operand_addr(bus, opcode >> 6, false) & !1;

        match (opcode >> 13) & 7 {
            2 => {
                // SZC: D &= ~S
                let value = bus.read_word(dest) & !bus.read_word(src);
                self.set_lae(value);
                bus.write_word(dest, value);
                self.charge(4);
            }
            3 => {
                // S: D -= S
                let (d, s) = (bus.read_word(dest), bus.read_word(src));
                let value = self.sub_word(d, s);
                bus.write_word(dest, value);
                self.charge(4);
            }
            4 => {
                // C: status only
                let (d, s) = (bus.read_word(dest), bus.read_word(src));
                self.set_compare(d, s);
                self.charge(4);
            }
            5 => {
                // A: D += S
                let (d, s) = (bus.read_word(dest), bus.read_word(src));
                let value = self.add_word(d, s);
                bus.write_word(dest, value);
                self.charge(4);
            }
            6 => {
                // MOV
                let value = bus.read_word(src);
                self.set_lae(value);
                bus.write_word(dest, value);
                self.charge(3);
            }
            _ => {
                // SOC: D |= S
                let value = bus.read_word(dest) | bus.read_word(src);
                self.set_lae(value);
                bus.write_word(dest, value);
                self.charge(4);
            }
        }
    }

    /// Byte two-operand block: SZCB, SB, CB, AB, MOVB, SOCB.
    pub(crate) fn op_two_byte<B: Bus + ?Sized>(&mut self, bus: &mut B, opcode: u16) {
        let src = self.operand_addr(bus, opcode, true);
        let dest = self.operand_addr(bus, opcode >> 6, true);

        match (opcode >> 13) & 7 {
            2 => {
                // SZCB
                let value = self.read_byte(bus, dest) & !self.read_byte(bus, src);
                self.set_lae_byte(value);
                bus.write_byte(dest, value);
                self.charge(4);
            }
            3 => {
                // SB
                let (d, s) = (self.read_byte(bus, dest), self.read_byte(bus, src));
                let value = self.sub_byte(d, s);
                bus.write_byte(dest, value);
                self.charge(4);
            }
            4 => {
                // CB: compare in the high byte; parity follows the source.
                let s = self.read_byte(bus, src);
                let d = self.read_byte(bus, dest);
                self.set_compare(u16::from(d) << 8, u16::from(s) << 8);
                self.lastparity = s;
                self.charge(4);
            }
            5 => {
                // AB
                let (d, s) = (self.read_byte(bus, dest), self.read_byte(bus, src));
                let value = self.add_byte(d, s);
                bus.write_byte(dest, value);
                self.charge(4);
            }
            6 => {
                // MOVB
                let value = self.read_byte(bus, src);
                self.set_lae_byte(value);
                bus.write_byte(dest, value);
                self.charge(3);
            }
            _ => {
                // SOCB
                let value = self.read_byte(bus, dest) | self.read_byte(bus, src);
                self.set_lae_byte(value);
                bus.write_byte(dest, value);
                self.charge(4);
            }
        }
    }
}
