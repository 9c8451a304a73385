//! Pocket Battle Engine
//!
//! A turn-based creature battle engine: an elemental effectiveness chart,
//! a damage formula, strategy-driven opponent team generation, a heuristic
//! opponent AI and a battle state machine that resolves one player action
//! per call. All randomness is injected, so battles can be replayed.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod moves;
pub mod participant;
pub mod team;
pub mod teams;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BaseStats, CreatureType, Difficulty, MoveCategory, SpeciesStats, TeamStrategy,
    TrainerProfile,
};

// --- From this crate's modules (`src/`) ---

// Core battle engine and state.
pub use battle::ai::{Behavior, HeuristicAI};
pub use battle::calculators::{calculate_damage, DamageRoll};
pub use battle::engine::BattleEngine;
pub use battle::rng::{RandomSource, SeededRng, SystemRng};
pub use battle::runner::BattleRunner;
pub use battle::state::{is_over, Battle, BattleEvent, BattleOutcome, BattleStatus, Turn};
pub use battle::type_chart::TypeChart;

// Core runtime types for a battle.
pub use moves::{generate_moves, BattleMove};
pub use participant::{instantiate_roster, BattleParticipant, StatusCondition};
pub use team::{Action, Side, Team};

// Data, configuration and team generation.
pub use catalog::Catalog;
pub use config::EngineConfig;
pub use errors::{ActionError, BattleEngineError, BattleResult};
pub use teams::{generate_team, generate_team_from_trainer};
