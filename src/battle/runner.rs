use crate::battle::ai::Behavior;
use crate::battle::engine::BattleEngine;
use crate::battle::rng::{rng_for_seed, RandomSource};
use crate::battle::state::{Battle, BattleEvent, BattleOutcome, BattleStatus, Turn};
use crate::errors::ActionResult;
use crate::participant::{BattleParticipant, StatusCondition};
use crate::team::{Action, Side, Team};
use serde::Serialize;
use tracing::{debug, info};

/// High-level battle management interface: owns the engine, the battle and
/// the rng so callers only deal in actions and summaries.
pub struct BattleRunner {
    engine: BattleEngine,
    battle: Battle,
    rng: Box<dyn RandomSource>,
}

/// Information about the current battle state for API queries
#[derive(Debug, Clone, Serialize)]
pub struct BattleInfo {
    pub battle_id: String,
    pub turn_number: u32,
    pub status: BattleStatus,
    pub outcome: BattleOutcome,
    pub player: TeamInfo,
    pub opponent: TeamInfo,
}

/// Information about one side's team
#[derive(Debug, Clone, Serialize)]
pub struct TeamInfo {
    pub trainer_name: String,
    pub active_index: usize,
    pub team: Vec<CreatureInfo>,
    pub fainted_count: usize,
}

/// Information about a creature for API queries
#[derive(Debug, Clone, Serialize)]
pub struct CreatureInfo {
    pub name: String,
    pub current_hp: u16,
    pub max_hp: u16,
    pub status: StatusCondition,
}

impl From<&BattleParticipant> for CreatureInfo {
    fn from(participant: &BattleParticipant) -> Self {
        CreatureInfo {
            name: participant.name().to_string(),
            current_hp: participant.current_hp(),
            max_hp: participant.max_hp(),
            status: participant.status(),
        }
    }
}

impl From<&Team> for TeamInfo {
    fn from(team: &Team) -> Self {
        TeamInfo {
            trainer_name: team.trainer_name.clone(),
            active_index: team.active_index(),
            team: team.participants().iter().map(CreatureInfo::from).collect(),
            fainted_count: team.fainted_count(),
        }
    }
}

impl BattleRunner {
    /// Starts a battle. The rng is seeded when the engine config names a seed.
    pub fn new(engine: BattleEngine, player: Team, opponent: Team) -> Self {
        let rng = rng_for_seed(engine.config().seed);
        Self::with_rng(engine, player, opponent, rng)
    }

    pub fn with_rng(
        engine: BattleEngine,
        player: Team,
        opponent: Team,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let battle = engine.start(player, opponent);
        Self { engine, battle, rng }
    }

    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    pub fn engine(&self) -> &BattleEngine {
        &self.engine
    }

    /// Get current battle information for API queries
    pub fn battle_info(&self) -> BattleInfo {
        BattleInfo {
            battle_id: self.battle.id.to_string(),
            turn_number: self.battle.turn_number(),
            status: self.battle.status(),
            outcome: self.battle.outcome(),
            player: TeamInfo::from(self.battle.player()),
            opponent: TeamInfo::from(self.battle.opponent()),
        }
    }

    /// Check if the battle has ended
    pub fn is_battle_ended(&self) -> bool {
        self.battle.status().is_terminal()
    }

    /// Submit the player's action and resolve the turn it starts.
    pub fn submit(&mut self, action: Action) -> ActionResult<&Turn> {
        self.engine.submit_action(&mut self.battle, action, &mut self.rng)
    }

    /// Lets the engine's AI play the player side too, until the battle
    /// ends or `max_turns` turns have resolved. Returns the number of
    /// turns played.
    pub fn autoplay(&mut self, max_turns: u32) -> ActionResult<u32> {
        let mut played = 0;
        while played < max_turns && !self.is_battle_ended() {
            let action =
                self.engine
                    .ai()
                    .decide_action(Side::Player, &self.battle, self.engine.chart());
            debug!(%action, "Autopilot chose");
            self.submit(action)?;
            played += 1;
        }
        if !self.is_battle_ended() {
            info!(played, "Autoplay stopped before the battle ended");
        }
        Ok(played)
    }

    /// Get all events that have occurred in the battle so far
    pub fn all_events(&self) -> Vec<&BattleEvent> {
        self.battle.turns().iter().flat_map(|turn| &turn.events).collect()
    }

    /// Get turns since a certain index (for incremental updates)
    pub fn turns_since(&self, index: usize) -> &[Turn] {
        self.battle.turns().get(index..).unwrap_or(&[])
    }
}
