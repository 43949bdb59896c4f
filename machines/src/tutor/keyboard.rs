//! Tutor keyboard matrix.
//!
//! The keyboard is an 8x8 matrix scanned through the CRU: R12 bases
//! 0xEC00/0xEC10/0xEC20/0xEC30 decode the four alphanumeric rows,
//! 0xEC40/0xEC50 combine the number row punctuation with the two virtual
//! joysticks, 0xEC60 carries the modifier cluster, and 0xEC70 the arrow
//! keys. A set bit means the key is currently down.

use tutor_core::core::machine::InputButton;

/// Button IDs encode the matrix position: (row << 3) | bit.
const fn button(row: u8, bit: u8) -> u8 {
    (row << 3) | bit
}

// Modifier cluster (row 6) and arrows (row 7), named for front-end use.
pub const INPUT_ALPHA_LOCK: u8 = button(6, 1);
pub const INPUT_SHIFT: u8 = button(6, 2);
pub const INPUT_MON: u8 = button(6, 3);
pub const INPUT_RETURN: u8 = button(6, 4);
pub const INPUT_MOD: u8 = button(6, 6);
pub const INPUT_SPACE: u8 = button(6, 7);
pub const INPUT_LEFT: u8 = button(7, 0);
pub const INPUT_UP: u8 = button(7, 1);
pub const INPUT_DOWN: u8 = button(7, 2);
pub const INPUT_RIGHT: u8 = button(7, 3);

pub const TUTOR_INPUT_MAP: &[InputButton] = &[
    // Row 0 (0xEC00)
    InputButton { id: button(0, 0), name: "1" },
    InputButton { id: button(0, 1), name: "2" },
    InputButton { id: button(0, 2), name: "Q" },
    InputButton { id: button(0, 3), name: "W" },
    InputButton { id: button(0, 4), name: "A" },
    InputButton { id: button(0, 5), name: "S" },
    InputButton { id: button(0, 6), name: "Z" },
    InputButton { id: button(0, 7), name: "X" },
    // Row 1 (0xEC10)
    InputButton { id: button(1, 0), name: "3" },
    InputButton { id: button(1, 1), name: "4" },
    InputButton { id: button(1, 2), name: "E" },
    InputButton { id: button(1, 3), name: "R" },
    InputButton { id: button(1, 4), name: "D" },
    InputButton { id: button(1, 5), name: "F" },
    InputButton { id: button(1, 6), name: "C" },
    InputButton { id: button(1, 7), name: "V" },
    // Row 2 (0xEC20)
    InputButton { id: button(2, 0), name: "5" },
    InputButton { id: button(2, 1), name: "6" },
    InputButton { id: button(2, 2), name: "T" },
    InputButton { id: button(2, 3), name: "Y" },
    InputButton { id: button(2, 4), name: "G" },
    InputButton { id: button(2, 5), name: "H" },
    InputButton { id: button(2, 6), name: "B" },
    InputButton { id: button(2, 7), name: "N" },
    // Row 3 (0xEC30)
    InputButton { id: button(3, 0), name: "7" },
    InputButton { id: button(3, 1), name: "8" },
    InputButton { id: button(3, 2), name: "9" },
    InputButton { id: button(3, 3), name: "U" },
    InputButton { id: button(3, 4), name: "I" },
    InputButton { id: button(3, 5), name: "J" },
    InputButton { id: button(3, 6), name: "K" },
    InputButton { id: button(3, 7), name: "M" },
    // Row 4 (0xEC40), shared with controller 1
    InputButton { id: button(4, 0), name: "0" },
    InputButton { id: button(4, 1), name: "-" },
    InputButton { id: button(4, 2), name: "O / P1 SL" },
    InputButton { id: button(4, 3), name: "P / P1 SR" },
    InputButton { id: button(4, 4), name: "L / P1 Down" },
    InputButton { id: button(4, 5), name: "; / P1 Left" },
    InputButton { id: button(4, 6), name: ", / P1 Up" },
    InputButton { id: button(4, 7), name: ". / P1 Right" },
    // Row 5 (0xEC50), shared with controller 2
    InputButton { id: button(5, 2), name: "Handaku / P2 SL" },
    InputButton { id: button(5, 3), name: "_ / P2 SR" },
    InputButton { id: button(5, 4), name: ": / P2 Down" },
    InputButton { id: button(5, 5), name: "[ / P2 Left" },
    InputButton { id: button(5, 6), name: "/ / P2 Up" },
    InputButton { id: button(5, 7), name: "] / P2 Right" },
    // Row 6 (0xEC60)
    InputButton { id: INPUT_ALPHA_LOCK, name: "Alpha Lock" },
    InputButton { id: INPUT_SHIFT, name: "Shift" },
    InputButton { id: INPUT_MON, name: "MON" },
    InputButton { id: INPUT_RETURN, name: "Return" },
    InputButton { id: INPUT_MOD, name: "MOD" },
    InputButton { id: INPUT_SPACE, name: "Space" },
    // Row 7 (0xEC70)
    InputButton { id: INPUT_LEFT, name: "Left" },
    InputButton { id: INPUT_UP, name: "Up" },
    InputButton { id: INPUT_DOWN, name: "Down" },
    InputButton { id: INPUT_RIGHT, name: "Right" },
];

/// Latched matrix state, one byte per CRU row.
pub struct KeyMatrix {
    rows: [u8; 8],
}

impl Default for KeyMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMatrix {
    pub fn new() -> Self {
        Self { rows: [0; 8] }
    }

    pub fn clear(&mut self) {
        self.rows = [0; 8];
    }

    pub fn set(&mut self, button: u8, pressed: bool) {
        let row = usize::from(button >> 3) & 7;
        let mask = 1u8 << (button & 7);
        if pressed {
            self.rows[row] |= mask;
        } else {
            self.rows[row] &= !mask;
        }
    }

    /// Decode a CRU read base to a matrix row. Only the eight scan
    /// addresses respond.
    pub fn cru_row(&self, base: u16) -> Option<u8> {
        match base {
            0xEC00 | 0xEC10 | 0xEC20 | 0xEC30 | 0xEC40 | 0xEC50 | 0xEC60 | 0xEC70 => {
                Some(self.rows[usize::from((base >> 4) & 7)])
            }
            _ => None,
        }
    }
}
