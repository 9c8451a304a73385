use crate::battle::engine::BattleEngine;
use crate::battle::rng::TurnRng;
use crate::battle::state::Battle;
use crate::config::EngineConfig;
use crate::errors::ActionResult;
use crate::participant::BattleParticipant;
use crate::team::Team;
use schema::{BaseStats, CreatureType, SpeciesStats};
use std::sync::Arc;

/// A builder for creating test participants with common defaults.
///
/// # Example
/// ```ignore
/// let pikachu = TestCreatureBuilder::new("Pikachu", &[CreatureType::Electric])
///     .with_speed(90)
///     .with_hp(20)
///     .build();
/// ```
pub struct TestCreatureBuilder {
    name: String,
    types: Vec<CreatureType>,
    max_hp: u16,
    stat: u16,
    speed: Option<u16>,
    current_hp: Option<u16>,
}

impl TestCreatureBuilder {
    /// 100 max HP, every other stat 50.
    pub fn new(name: &str, types: &[CreatureType]) -> Self {
        Self {
            name: name.to_string(),
            types: types.to_vec(),
            max_hp: 100,
            stat: 50,
            speed: None,
            current_hp: None,
        }
    }

    pub fn with_max_hp(mut self, max_hp: u16) -> Self {
        self.max_hp = max_hp;
        self
    }

    /// Sets attack, defense, both special stats and speed at once.
    pub fn with_stat(mut self, stat: u16) -> Self {
        self.stat = stat;
        self
    }

    pub fn with_speed(mut self, speed: u16) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> BattleParticipant {
        let species = SpeciesStats {
            id: 0,
            name: self.name,
            types: self.types,
            base_stats: BaseStats {
                hp: self.max_hp,
                attack: self.stat,
                defense: self.stat,
                sp_attack: self.stat,
                sp_defense: self.stat,
                speed: self.speed.unwrap_or(self.stat),
            },
        };
        let mut participant = BattleParticipant::new(Arc::new(species));
        if let Some(hp) = self.current_hp {
            participant.set_hp(hp);
        }
        participant
    }
}

/// Shorthand for a full-HP participant with flat stats.
pub fn species(name: &str, types: &[CreatureType], max_hp: u16, stat: u16) -> BattleParticipant {
    TestCreatureBuilder::new(name, types)
        .with_max_hp(max_hp)
        .with_stat(stat)
        .build()
}

pub fn team_of(trainer: &str, participants: Vec<BattleParticipant>) -> Team {
    Team::new(trainer, participants)
}

/// A 1v1 battle between the given participants.
pub fn create_test_battle(player: BattleParticipant, opponent: BattleParticipant) -> Battle {
    Battle::new(team_of("Player", vec![player]), team_of("Rival", vec![opponent]))
}

/// Engine with accuracy rolls disabled, so only damage rolls consume rng values.
pub fn sure_hit_engine() -> BattleEngine {
    let config = EngineConfig {
        roll_accuracy: false,
        ..EngineConfig::default()
    };
    BattleEngine::new(Default::default(), config)
}

/// Every roll lands at the bottom of its range: accuracy checks hit and
/// the damage factor is the configured minimum.
pub fn predictable_rng() -> TurnRng {
    TurnRng::constant(0.0)
}

/// Helper function to assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: ActionResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
