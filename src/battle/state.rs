use crate::battle::type_chart::describe_effectiveness;
use crate::team::{Side, Team};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle of a battle. Every state except `Ongoing` is terminal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleStatus {
    Ongoing,
    /// The player won.
    Won,
    /// The player lost.
    Lost,
    /// The player forfeited.
    Forfeit,
}

impl BattleStatus {
    pub fn is_terminal(self) -> bool {
        self != BattleStatus::Ongoing
    }
}

impl fmt::Display for BattleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            BattleStatus::Ongoing => "ongoing",
            BattleStatus::Won => "won",
            BattleStatus::Lost => "lost",
            BattleStatus::Forfeit => "forfeit",
        };
        write!(f, "{}", display_name)
    }
}

/// Answer of the standalone "is the battle over" query.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    None,
    PlayerWon,
    OpponentWon,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    Switched {
        trainer: String,
        old_creature: String,
        new_creature: String,
    },
    AttackResolved {
        attacker: String,
        move_name: String,
        defender: String,
        damage: u16,
        effectiveness: f64,
        remaining_hp: u16,
        max_hp: u16,
    },
    MoveMissed {
        attacker: String,
        move_name: String,
    },
    NoEffect {
        attacker: String,
        move_name: String,
        defender: String,
    },
    Fainted {
        side: Side,
        creature: String,
    },
    Forfeited {
        trainer: String,
    },
    BattleEnded {
        status: BattleStatus,
    },
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::Switched {
                trainer,
                old_creature,
                new_creature,
            } => write!(
                f,
                "{} recalled {} and sent out {}!",
                trainer, old_creature, new_creature
            ),
            BattleEvent::AttackResolved {
                attacker,
                move_name,
                defender,
                damage,
                effectiveness,
                remaining_hp,
                max_hp,
            } => {
                write!(f, "{} used {}!", attacker, move_name)?;
                if let Some(sentence) = effectiveness_sentence(*effectiveness) {
                    write!(f, " {}", sentence)?;
                }
                write!(
                    f,
                    " {} took {} damage ({}/{} HP).",
                    defender, damage, remaining_hp, max_hp
                )
            }
            BattleEvent::MoveMissed {
                attacker,
                move_name,
            } => write!(f, "{} used {}! The attack missed!", attacker, move_name),
            BattleEvent::NoEffect {
                attacker,
                move_name,
                defender,
            } => write!(
                f,
                "{} used {}! It had no effect on {}!",
                attacker, move_name, defender
            ),
            BattleEvent::Fainted { creature, .. } => write!(f, "{} fainted!", creature),
            BattleEvent::Forfeited { trainer } => write!(f, "{} forfeited the battle.", trainer),
            BattleEvent::BattleEnded { status } => match status {
                BattleStatus::Won => write!(f, "You won the battle!"),
                BattleStatus::Lost => write!(f, "You are out of usable creatures! You lost."),
                BattleStatus::Forfeit => write!(f, "The battle ended by forfeit."),
                BattleStatus::Ongoing => write!(f, "The battle continues."),
            },
        }
    }
}

fn effectiveness_sentence(multiplier: f64) -> Option<String> {
    describe_effectiveness(multiplier).map(|description| match description {
        "no effect" => "It had no effect!".to_string(),
        "not very effective" => "It's not very effective...".to_string(),
        other => format!("It's {}!", other),
    })
}

/// One resolved action and everything that happened because of it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Turn {
    pub number: u32,
    pub events: Vec<BattleEvent>,
}

impl Turn {
    pub fn descriptions(&self) -> Vec<String> {
        self.events.iter().map(|event| event.to_string()).collect()
    }
}

/// A battle between the player's team and an opponent's team. Only the
/// engine's action entry point mutates it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Battle {
    pub id: Uuid,
    pub(crate) player: Team,
    pub(crate) opponent: Team,
    pub(crate) turns: Vec<Turn>,
    pub(crate) status: BattleStatus,
}

impl Battle {
    /// Starts a battle. Both teams lead with their first conscious member.
    pub fn new(player: Team, opponent: Team) -> Self {
        let mut battle = Battle {
            id: Uuid::new_v4(),
            player,
            opponent,
            turns: Vec::new(),
            status: BattleStatus::Ongoing,
        };
        // Only an empty or all-fainted roster can start decided.
        battle.status = battle.evaluate_status();
        battle
    }

    pub fn player(&self) -> &Team {
        &self.player
    }

    pub fn opponent(&self) -> &Team {
        &self.opponent
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub(crate) fn team_mut(&mut self, side: Side) -> &mut Team {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// (acting side's team, other side's team)
    pub(crate) fn teams_mut(&mut self, acting: Side) -> (&mut Team, &mut Team) {
        match acting {
            Side::Player => (&mut self.player, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.player),
        }
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// The number the next resolved turn will carry.
    pub fn turn_number(&self) -> u32 {
        self.turns.len() as u32 + 1
    }

    /// Every event description, oldest first.
    pub fn log(&self) -> Vec<String> {
        self.turns.iter().flat_map(|turn| turn.descriptions()).collect()
    }

    /// Status implied by the teams: a defeated player loses first.
    pub(crate) fn evaluate_status(&self) -> BattleStatus {
        if self.player.is_defeated() {
            BattleStatus::Lost
        } else if self.opponent.is_defeated() {
            BattleStatus::Won
        } else {
            BattleStatus::Ongoing
        }
    }

    pub fn outcome(&self) -> BattleOutcome {
        is_over(self)
    }
}

/// Whether the battle is decided, judged from team state alone. A forfeit
/// counts as an opponent win.
pub fn is_over(battle: &Battle) -> BattleOutcome {
    if battle.status == BattleStatus::Forfeit || battle.player.is_defeated() {
        BattleOutcome::OpponentWon
    } else if battle.opponent.is_defeated() {
        BattleOutcome::PlayerWon
    } else {
        BattleOutcome::None
    }
}
