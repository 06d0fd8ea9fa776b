//! Core engine types: players, RNG, configuration.
//!
//! These are the building blocks the rest of the engine is keyed against.

pub mod config;
pub mod player;
pub mod rng;

pub use config::{GameConfig, TaxRule};
pub use player::{Controller, Player, PlayerId, Roster};
pub use rng::GameRng;
