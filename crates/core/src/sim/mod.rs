//! Image loading and the run/step control loop.

/// ELF image loading.
pub mod loader;
/// The step/run control loop.
pub mod simulator;

pub use self::loader::{Image, load_elf};
pub use self::simulator::{RunState, Simulator};
