use crate::moves::{generate_moves, BattleMove};
use schema::{CreatureType, SpeciesStats};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Battle status of a single participant. `Fainted` holds exactly when HP is 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCondition {
    Normal,
    Fainted,
}

impl fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCondition::Normal => write!(f, "normal"),
            StatusCondition::Fainted => write!(f, "fainted"),
        }
    }
}

/// A species instance entered into battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleParticipant {
    pub species: Arc<SpeciesStats>,
    current_hp: u16,
    max_hp: u16,
    status: StatusCondition,
    /// Turns spent active since the current status began. Ticked by the
    /// engine once per resolved turn, reset whenever the status changes.
    pub status_turns: u8,
    pub moves: Vec<BattleMove>,
}

impl BattleParticipant {
    /// Enters a species into battle at full HP with its generated moves.
    pub fn new(species: Arc<SpeciesStats>) -> Self {
        let max_hp = species.base_stats.hp;
        let moves = generate_moves(&species);
        let mut participant = BattleParticipant {
            species,
            current_hp: max_hp,
            max_hp,
            status: StatusCondition::Normal,
            status_turns: 0,
            moves,
        };
        participant.sync_status();
        participant
    }

    pub fn name(&self) -> &str {
        &self.species.name
    }

    pub fn types(&self) -> &[CreatureType] {
        &self.species.types
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.max_hp
    }

    pub fn status(&self) -> StatusCondition {
        self.status
    }

    pub fn is_fainted(&self) -> bool {
        self.status == StatusCondition::Fainted
    }

    /// Current HP as a fraction of max HP. A 0-HP species counts as empty.
    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.current_hp as f64 / self.max_hp as f64
        }
    }

    pub fn speed(&self) -> u16 {
        self.species.base_stats.speed
    }

    /// Sets HP (clamped to max) and updates fainted status to match.
    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp);
        self.sync_status();
    }

    /// Counts one more turn under the current status.
    pub fn tick_status(&mut self) {
        self.status_turns = self.status_turns.saturating_add(1);
    }

    /// Applies damage, clamping at 0. Returns true if this hit caused a faint.
    pub fn take_damage(&mut self, damage: u16) -> bool {
        let was_fainted = self.is_fainted();
        self.current_hp = self.current_hp.saturating_sub(damage);
        self.sync_status();
        !was_fainted && self.is_fainted()
    }

    fn sync_status(&mut self) {
        let next = if self.current_hp == 0 {
            StatusCondition::Fainted
        } else {
            StatusCondition::Normal
        };
        if next != self.status {
            self.status = next;
            self.status_turns = 0;
        }
    }
}

/// Instantiates a roster of species as battle participants.
pub fn instantiate_roster(roster: &[Arc<SpeciesStats>]) -> Vec<BattleParticipant> {
    roster
        .iter()
        .map(|species| BattleParticipant::new(Arc::clone(species)))
        .collect()
}
