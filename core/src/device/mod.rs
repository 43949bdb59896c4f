pub mod sn76489;
pub mod tms9918a;

pub use sn76489::Sn76489;
pub use tms9918a::Tms9918a;
