use serde::{Deserialize, Serialize};
use std::fmt;

/// How a trainer's roster is picked from the candidate pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamStrategy {
    Random,
    TypeFocused,
    Balanced,
    Offensive,
    Defensive,
    Legendary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl fmt::Display for TeamStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            TeamStrategy::Random => "random",
            TeamStrategy::TypeFocused => "type-focused",
            TeamStrategy::Balanced => "balanced",
            TeamStrategy::Offensive => "offensive",
            TeamStrategy::Defensive => "defensive",
            TeamStrategy::Legendary => "legendary",
        };
        write!(f, "{}", display_name)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };
        write!(f, "{}", display_name)
    }
}

/// Opponent configuration. Consumed once by the team generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerProfile {
    pub name: String,
    pub title: String,
    pub strategy: TeamStrategy,
    pub difficulty: Difficulty,
    pub team_size: usize,
}

impl TrainerProfile {
    /// "Title Name", e.g. "Gym Leader Brock".
    pub fn display_name(&self) -> String {
        if self.title.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.title, self.name)
        }
    }
}
