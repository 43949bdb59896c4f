//! Emulation configuration.
//!
//! Everything here has a sensible default; front-ends can deserialize a
//! `[tutor]`-style TOML table or build the struct directly.

use serde::{Deserialize, Serialize};

/// Tunable emulation behavior for the Tutor machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorConfig {
    /// Bypass the ROM's bit-by-bit cassette LOAD with high-level traps at
    /// the stock ROM entry points. Turn off when running a custom ROM
    /// whose entry points do not match (loads will then hit EOF and take
    /// the ROM's own error path).
    pub tape_traps: bool,

    /// Wire the speculative level-4 tape interrupt path (a write to
    /// 0xEE40 clocks a bit and a 1 raises level 4). Stock firmware has
    /// not been observed enabling this; off by default.
    pub tape_interrupt: bool,

    /// Zero the live decrementer once per frame so IRQ3 tracks the host
    /// frame clock instead of emulated time.
    pub sync_irq3: bool,

    /// Composite one VDP frame for every N calls to `run_frame`, to bound
    /// redraw cost. 1 composites every frame.
    pub composite_divisor: u32,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            tape_traps: true,
            tape_interrupt: false,
            sync_irq3: false,
            composite_divisor: 3,
        }
    }
}

impl TutorConfig {
    /// Parse a TOML document holding (a subset of) the config fields.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_trap_tape_and_skip_level4() {
        let config = TutorConfig::default();
        assert!(config.tape_traps);
        assert!(!config.tape_interrupt);
        assert_eq!(config.composite_divisor, 3);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = TutorConfig::from_toml("tape_traps = false\n").unwrap();
        assert!(!config.tape_traps);
        assert!(!config.sync_irq3);
        assert_eq!(config.composite_divisor, 3);
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(TutorConfig::from_toml("tape_traps = \"maybe\"").is_err());
    }
}
