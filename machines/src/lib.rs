pub mod config;
pub mod registry;
pub mod rom_loader;
pub mod tutor;

pub use config::TutorConfig;
pub use tutor::TutorSystem;
