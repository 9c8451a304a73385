//! A module for defining AI behaviors for battle opponents.

use crate::battle::state::Battle;
use crate::battle::type_chart::TypeChart;
use crate::config::AiConfig;
use crate::team::{Action, Side};
use ordered_float::OrderedFloat;
use tracing::trace;

/// A trait for any system that can decide on a battle action.
/// This provides a common interface for different AI difficulties or strategies.
pub trait Behavior {
    /// Inspects the battle and decides on the next action for `side`.
    /// Always returns exactly one action.
    fn decide_action(&self, side: Side, battle: &Battle, chart: &TypeChart) -> Action;

    /// Picks who to send in after `side`'s active creature fainted.
    /// `None` when nobody is left.
    fn choose_replacement(&self, side: Side, battle: &Battle) -> Option<usize>;
}

/// Switches out of low-HP situations, otherwise attacks with the move
/// whose type hits the foe hardest.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicAI {
    low_hp_threshold: f64,
    healthy_threshold: f64,
}

impl Default for HeuristicAI {
    fn default() -> Self {
        Self::new(&AiConfig::default())
    }
}

impl HeuristicAI {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            low_hp_threshold: config.low_hp_threshold,
            healthy_threshold: config.healthy_threshold,
        }
    }

    /// The first healthy teammate, if the active creature is in trouble.
    fn defensive_switch(&self, side: Side, battle: &Battle) -> Option<usize> {
        let team = battle.team(side);
        let active = team.active()?;
        if active.hp_fraction() >= self.low_hp_threshold {
            return None;
        }
        team.participants()
            .iter()
            .enumerate()
            .find(|(index, p)| {
                *index != team.active_index()
                    && !p.is_fainted()
                    && p.hp_fraction() > self.healthy_threshold
            })
            .map(|(index, _)| index)
    }

    /// Index of the move with the highest type multiplier against the
    /// opposing active creature. Ties go to the earliest move.
    fn best_move(&self, side: Side, battle: &Battle, chart: &TypeChart) -> usize {
        let Some(attacker) = battle.team(side).active() else {
            return 0;
        };
        let defender_types = battle
            .team(side.opposite())
            .active()
            .map(|p| p.types())
            .unwrap_or(&[]);

        attacker
            .moves
            .iter()
            .enumerate()
            .map(|(index, move_)| {
                let score = chart.effectiveness(move_.move_type, defender_types);
                trace!(move_name = %move_.name, score, "Scored move");
                (index, OrderedFloat(score))
            })
            // max_by_key keeps the last maximum, so walk backwards.
            .rev()
            .max_by_key(|(_, score)| *score)
            .map(|(index, _)| index)
            .unwrap_or(0)
    }
}

impl Behavior for HeuristicAI {
    fn decide_action(&self, side: Side, battle: &Battle, chart: &TypeChart) -> Action {
        let team = battle.team(side);

        // Forced replacement: the only useful action is a switch.
        if team.needs_replacement() {
            if let Some(team_index) = self.choose_replacement(side, battle) {
                return Action::Switch { team_index };
            }
        }

        if let Some(team_index) = self.defensive_switch(side, battle) {
            return Action::Switch { team_index };
        }

        Action::Attack {
            move_index: self.best_move(side, battle, chart),
        }
    }

    fn choose_replacement(&self, side: Side, battle: &Battle) -> Option<usize> {
        let team = battle.team(side);
        team.valid_switches()
            .into_iter()
            .rev()
            .max_by_key(|&index| {
                OrderedFloat(team.get(index).map_or(0.0, |p| p.hp_fraction()))
            })
    }
}
