// Re-export state types
pub mod state;
pub use state::{CpuStateTrait, Tms9995State};

// TMS9995 CPU
pub mod tms9995;
pub use tms9995::Tms9995;
