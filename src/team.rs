use crate::errors::ActionError;
use crate::participant::BattleParticipant;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The only mutation requests a battle accepts.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // The index refers to the move's position in the active participant's move list.
    Attack { move_index: usize },

    // The index refers to the participant's position in the team.
    Switch { team_index: usize },

    Forfeit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Attack { move_index } => write!(f, "Attack(move {})", move_index),
            Action::Switch { team_index } => write!(f, "Switch(slot {})", team_index),
            Action::Forfeit => write!(f, "Forfeit"),
        }
    }
}

/// Which side of the battle a team is on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// An ordered, fixed-size roster plus the index of the active participant.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Team {
    pub trainer_name: String,
    participants: Vec<BattleParticipant>,
    active_index: usize,
}

impl Team {
    /// The lead is slot 0, unless it entered with 0 HP; then the first
    /// conscious member leads.
    pub fn new(trainer_name: impl Into<String>, participants: Vec<BattleParticipant>) -> Self {
        let active_index = participants
            .iter()
            .position(|p| !p.is_fainted())
            .unwrap_or(0);
        Team {
            trainer_name: trainer_name.into(),
            participants,
            active_index,
        }
    }

    pub fn participants(&self) -> &[BattleParticipant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Get the currently active participant
    pub fn active(&self) -> Option<&BattleParticipant> {
        self.participants.get(self.active_index)
    }

    /// Get the currently active participant mutably
    pub fn active_mut(&mut self) -> Option<&mut BattleParticipant> {
        self.participants.get_mut(self.active_index)
    }

    pub fn get(&self, index: usize) -> Option<&BattleParticipant> {
        self.participants.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut BattleParticipant> {
        self.participants.get_mut(index)
    }

    /// True when the active slot is empty or fainted.
    pub fn active_is_fainted(&self) -> bool {
        self.active().map_or(true, |p| p.is_fainted())
    }

    /// Every participant has fainted. An empty team counts as defeated.
    pub fn is_defeated(&self) -> bool {
        self.participants.iter().all(|p| p.is_fainted())
    }

    pub fn fainted_count(&self) -> usize {
        self.participants.iter().filter(|p| p.is_fainted()).count()
    }

    /// Active participant has fainted but a replacement exists.
    pub fn needs_replacement(&self) -> bool {
        self.active_is_fainted() && !self.is_defeated()
    }

    /// Indices of participants that could be switched in right now.
    pub fn valid_switches(&self) -> Vec<usize> {
        self.participants
            .iter()
            .enumerate()
            .filter(|(index, p)| *index != self.active_index && !p.is_fainted())
            .map(|(index, _)| index)
            .collect()
    }

    /// Checks that `index` is a legal switch target without changing anything.
    pub fn validate_switch(&self, index: usize) -> Result<(), ActionError> {
        let target = self
            .participants
            .get(index)
            .ok_or(ActionError::InvalidTeamIndex(index))?;
        if index == self.active_index {
            return Err(ActionError::AlreadyActive(index));
        }
        if target.is_fainted() {
            return Err(ActionError::TargetFainted(index));
        }
        Ok(())
    }

    /// Switch the active participant
    pub fn switch_to(&mut self, index: usize) -> Result<(), ActionError> {
        self.validate_switch(index)?;
        self.active_index = index;
        Ok(())
    }
}
