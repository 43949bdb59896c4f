//! Cassette deck.
//!
//! The Tutor clocks physical bits out one at a time; on the wire a logical
//! 1 is the sequence 0,1,0,1,0 and a logical 0 is 0,1,0. The deck decodes
//! those groups with a five-state machine and stores one ASCII '0'/'1'
//! per logical bit, the same format the loader consumes. A sync failure at
//! the start of a group marks the end of the transmission.
//!
//! Loading does not run the encoder in reverse: the ROM's bit-banged LOAD
//! is far too slow to emulate faithfully, so the machine layer traps the
//! ROM's sync-mark and byte-read routines and pulls whole bytes from the
//! deck (see `TRAPS` below and the dispatch in `tutor::TutorBus`).

/// Deck transport state.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TapeMode {
    Idle,
    Loading,
    Saving,
}

pub struct TapeDeck {
    mode: TapeMode,
    /// Phase within the current physical bit group (0..=4).
    clocked_bits: u8,
    /// Logical bit the current group is carrying.
    current_bit: u8,
    /// Inserted image waiting for the next LOAD.
    pending: Option<Vec<u8>>,
    /// Open image and read cursor while loading.
    reader: Option<(Vec<u8>, usize)>,
    /// Accumulated SAVE output.
    writer: Vec<u8>,
    /// Completed SAVE output, ready for the host.
    finished: Option<Vec<u8>>,
    /// A 1 bit has been clocked in and not yet consumed; keeps the deck
    /// open across the interrupt-disarm write mid-load.
    pub bit_waiting: bool,
}

impl Default for TapeDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl TapeDeck {
    pub fn new() -> Self {
        Self {
            mode: TapeMode::Idle,
            clocked_bits: 0,
            current_bit: 0,
            pending: None,
            reader: None,
            writer: Vec::new(),
            finished: None,
            bit_waiting: false,
        }
    }

    pub fn mode(&self) -> TapeMode {
        self.mode
    }

    /// Supply an ASCII-bit image for the next LOAD.
    pub fn insert(&mut self, bits: Vec<u8>) {
        self.pending = Some(bits);
    }

    /// Collect the output of a completed SAVE.
    pub fn take_saved(&mut self) -> Option<Vec<u8>> {
        self.finished.take()
    }

    /// Open the inserted image for reading. With nothing inserted the deck
    /// still enters loading mode; every read then hits EOF and the ROM
    /// sees the same error a blank cassette would produce.
    pub fn open_load(&mut self) {
        if self.mode == TapeMode::Saving {
            self.finish_save();
        }
        self.clocked_bits = 0;
        self.reader = self.pending.take().map(|bits| (bits, 0));
        self.mode = TapeMode::Loading;
    }

    /// Begin a SAVE; the leading '1' marks file start.
    pub fn open_save(&mut self) {
        if self.mode == TapeMode::Saving {
            self.finish_save();
        }
        self.clocked_bits = 0;
        self.writer.clear();
        self.writer.push(b'1');
        self.mode = TapeMode::Saving;
    }

    pub fn finish_load(&mut self) {
        self.reader = None;
        self.mode = TapeMode::Idle;
    }

    pub fn finish_save(&mut self) {
        if self.mode != TapeMode::Saving {
            return;
        }
        self.finished = Some(std::mem::take(&mut self.writer));
        self.mode = TapeMode::Idle;
    }

    /// Close whatever transport is running (reset, cancellation).
    pub fn finish(&mut self) {
        match self.mode {
            TapeMode::Saving => self.finish_save(),
            _ => self.finish_load(),
        }
        self.bit_waiting = false;
    }

    fn next_logical_bit(&mut self) -> Option<u8> {
        let (bits, cursor) = self.reader.as_mut()?;
        let byte = *bits.get(*cursor)?;
        *cursor += 1;
        Some(if byte == b'0' { 0 } else { 1 })
    }

    /// Clock one physical bit off the tape, expanding each logical bit
    /// into its wire group. Returns None at end of tape.
    pub fn read_bit(&mut self) -> Option<u8> {
        self.reader.as_ref()?;
        if self.clocked_bits == 0 {
            self.current_bit = self.next_logical_bit()?;
        }
        let bit = self.clocked_bits & 1;
        self.clocked_bits = if self.clocked_bits == 2 && self.current_bit == 0 {
            0
        } else if self.clocked_bits == 4 {
            0
        } else {
            self.clocked_bits + 1
        };
        Some(bit)
    }

    /// Consume logical bits up to and including the next '0' (the sync
    /// mark terminator). Stops quietly at end of tape.
    pub fn skip_sync(&mut self) {
        while let Some(bit) = self.next_logical_bit() {
            if bit == 0 {
                return;
            }
        }
    }

    /// Read eight logical bits as one byte, MSB first. None at EOF.
    pub fn read_byte(&mut self) -> Option<u8> {
        self.reader.as_ref()?;
        let mut result = 0u8;
        for _ in 0..8 {
            let bit = self.next_logical_bit()?;
            result = (result << 1) | bit;
        }
        Some(result)
    }

    /// Accept one physical bit from the machine and decode it back to
    /// logical bits. Returns false when the group violated sync at phase
    /// zero: that is the end of the transmission and the caller closes
    /// the deck (a pending group is flushed as the '1' it must have been).
    pub fn write_bit(&mut self, bit: u8) -> bool {
        match self.clocked_bits {
            0 => {
                if bit != 0 {
                    if self.mode == TapeMode::Saving {
                        self.writer.push(b'1');
                    }
                    return false;
                }
                self.clocked_bits = 1;
            }
            1 | 2 => {
                if (self.clocked_bits & 1) != bit {
                    // Sync lost mid-group; resynchronize.
                    self.clocked_bits = 0;
                    return true;
                }
                self.clocked_bits += 1;
            }
            3 => {
                self.current_bit = bit;
                if bit == 0 {
                    if self.mode == TapeMode::Saving {
                        self.writer.push(b'0');
                    }
                    self.clocked_bits = 1;
                } else {
                    self.clocked_bits = 4;
                }
            }
            _ => {
                if bit == 1 {
                    self.clocked_bits = 0;
                    return true;
                }
                if self.mode == TapeMode::Saving {
                    self.writer.push(b'1');
                }
                self.clocked_bits = 0;
            }
        }
        true
    }
}
