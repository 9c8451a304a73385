// Pocket Battle Schema - Shared type definitions
// This crate holds the plain data types that the engine and its RON data
// files agree on: elemental types, base stats and trainer configuration.

pub use creature_types::*;
pub use move_types::*;
pub use species_data::*;
pub use trainer_data::*;

pub mod creature_types;
pub mod move_types;
pub mod species_data;
pub mod trainer_data;
