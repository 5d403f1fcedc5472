//! Core types: sides, configuration, deterministic RNG.

mod config;
mod rng;
mod side;

pub use config::EngineConfig;
pub use rng::GameRng;
pub use side::{Side, SideMap};
