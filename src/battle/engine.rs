use crate::battle::ai::{Behavior, HeuristicAI};
use crate::battle::calculators::calculate_damage;
use crate::battle::rng::RandomSource;
use crate::battle::state::{Battle, BattleEvent, BattleStatus, Turn};
use crate::battle::type_chart::TypeChart;
use crate::config::EngineConfig;
use crate::errors::{ActionError, ActionResult};
use crate::participant::BattleParticipant;
use crate::team::{Action, Side, Team};
use tracing::{debug, info, info_span, warn};

/// Owns the rules a battle is played under: the type chart, the tunable
/// constants and the opponent's decision maker.
#[derive(Debug, Clone)]
pub struct BattleEngine<B: Behavior = HeuristicAI> {
    chart: TypeChart,
    config: EngineConfig,
    ai: B,
}

impl BattleEngine<HeuristicAI> {
    pub fn new(chart: TypeChart, config: EngineConfig) -> Self {
        let ai = HeuristicAI::new(&config.ai);
        Self { chart, config, ai }
    }
}

impl Default for BattleEngine<HeuristicAI> {
    fn default() -> Self {
        Self::new(TypeChart::standard(), EngineConfig::default())
    }
}

impl<B: Behavior> BattleEngine<B> {
    pub fn with_behavior(chart: TypeChart, config: EngineConfig, ai: B) -> Self {
        Self { chart, config, ai }
    }

    pub fn chart(&self) -> &TypeChart {
        &self.chart
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn ai(&self) -> &B {
        &self.ai
    }

    /// Starts a battle between two instantiated rosters.
    pub fn initialize_battle(
        &self,
        player_roster: Vec<BattleParticipant>,
        opponent_roster: Vec<BattleParticipant>,
    ) -> Battle {
        self.start(Team::new("Player", player_roster), Team::new("Opponent", opponent_roster))
    }

    /// Starts a battle between two named teams.
    pub fn start(&self, player: Team, opponent: Team) -> Battle {
        let battle = Battle::new(player, opponent);
        info!(
            battle_id = %battle.id,
            player = %battle.player.trainer_name,
            opponent = %battle.opponent.trainer_name,
            player_team = battle.player.len(),
            opponent_team = battle.opponent.len(),
            "Battle started"
        );
        battle
    }

    /// Validates a player action without touching the battle.
    pub fn validate_action(&self, battle: &Battle, action: Action) -> ActionResult<()> {
        if battle.status.is_terminal() {
            return Err(ActionError::BattleOver(battle.status));
        }

        let team = &battle.player;
        match action {
            Action::Attack { move_index } => {
                let active = team
                    .active()
                    .filter(|p| !p.is_fainted())
                    .ok_or(ActionError::ActiveFainted)?;
                if move_index >= active.moves.len() {
                    return Err(ActionError::InvalidMoveIndex(move_index));
                }
            }
            Action::Switch { team_index } => team.validate_switch(team_index)?,
            Action::Forfeit => {
                // Forfeit is always valid while the battle is ongoing
            }
        }
        Ok(())
    }

    /// Resolves one player action. Rejected actions leave the battle
    /// untouched; accepted ones append exactly one turn to the log.
    pub fn submit_action<'b>(
        &self,
        battle: &'b mut Battle,
        action: Action,
        rng: &mut impl RandomSource,
    ) -> ActionResult<&'b Turn> {
        let span = info_span!("turn", battle_id = %battle.id, turn = battle.turn_number());
        let _enter = span.enter();

        if let Err(err) = self.validate_action(battle, action) {
            warn!(%action, %err, "Rejected action");
            return Err(err);
        }
        debug!(%action, "Resolving player action");

        let mut events = Vec::new();
        match action {
            Action::Forfeit => {
                battle.status = BattleStatus::Forfeit;
                events.push(BattleEvent::Forfeited {
                    trainer: battle.player.trainer_name.clone(),
                });
                events.push(BattleEvent::BattleEnded {
                    status: BattleStatus::Forfeit,
                });
            }
            Action::Switch { team_index } => {
                perform_switch(battle, Side::Player, team_index, &mut events)?;
            }
            Action::Attack { move_index } => {
                self.resolve_attack_turn(battle, move_index, rng, &mut events);
            }
        }

        for team in [&mut battle.player, &mut battle.opponent] {
            if let Some(active) = team.active_mut() {
                active.tick_status();
            }
        }

        if battle.status == BattleStatus::Ongoing {
            let status = battle.evaluate_status();
            if status.is_terminal() {
                battle.status = status;
                events.push(BattleEvent::BattleEnded { status });
            } else if battle.opponent.needs_replacement() {
                self.replace_opponent(battle, &mut events);
            }
        }

        if battle.status.is_terminal() {
            info!(status = %battle.status, turns = battle.turns.len() + 1, "Battle over");
        }

        let index = battle.turns.len();
        battle.turns.push(Turn {
            number: battle.turn_number(),
            events,
        });
        Ok(&battle.turns[index])
    }

    fn resolve_attack_turn(
        &self,
        battle: &mut Battle,
        move_index: usize,
        rng: &mut impl RandomSource,
        events: &mut Vec<BattleEvent>,
    ) {
        // Decided once, before either side moves.
        let opponent_action = self.ai.decide_action(Side::Opponent, battle, &self.chart);
        debug!(%opponent_action, "Opponent decided");

        let mut attacks = vec![(Side::Player, move_index)];
        match opponent_action {
            Action::Attack { move_index } => attacks.push((Side::Opponent, move_index)),
            Action::Switch { team_index } => {
                // Switches happen before anyone attacks.
                if let Err(err) = perform_switch(battle, Side::Opponent, team_index, events) {
                    warn!(%err, "Opponent chose an invalid switch");
                }
            }
            Action::Forfeit => {}
        }

        if attacks.len() == 2 && self.opponent_moves_first(battle) {
            attacks.swap(0, 1);
        }

        for (side, move_index) in attacks {
            self.execute_attack(battle, side, move_index, rng, events);
        }
    }

    /// Faster creature acts first; the player wins speed ties.
    fn opponent_moves_first(&self, battle: &Battle) -> bool {
        let player_speed = battle.player.active().map_or(0, |p| p.speed());
        let opponent_speed = battle.opponent.active().map_or(0, |p| p.speed());
        opponent_speed > player_speed
    }

    fn execute_attack(
        &self,
        battle: &mut Battle,
        side: Side,
        move_index: usize,
        rng: &mut impl RandomSource,
        events: &mut Vec<BattleEvent>,
    ) {
        let (attacking_team, defending_team) = battle.teams_mut(side);

        let Some(attacker) = attacking_team.active_mut() else {
            return;
        };
        if attacker.is_fainted() {
            debug!(creature = attacker.name(), "Fainted before acting; action skipped");
            return;
        }
        let Some(move_) = attacker.moves.get_mut(move_index) else {
            warn!(?side, move_index, "Move slot is empty");
            return;
        };
        move_.use_move();
        let move_ = move_.clone();
        let attacker: &BattleParticipant = attacker;

        let Some(defender) = defending_team.active_mut() else {
            return;
        };
        if defender.is_fainted() {
            return;
        }

        if self.config.roll_accuracy
            && move_.accuracy < 100
            && rng.uniform(0.0, 100.0) >= move_.accuracy as f64
        {
            debug!(attacker = attacker.name(), move_name = %move_.name, "Missed");
            events.push(BattleEvent::MoveMissed {
                attacker: attacker.name().to_string(),
                move_name: move_.name,
            });
            return;
        }

        if self.chart.effectiveness(move_.move_type, defender.types()) == 0.0 {
            events.push(BattleEvent::NoEffect {
                attacker: attacker.name().to_string(),
                move_name: move_.name,
                defender: defender.name().to_string(),
            });
            return;
        }

        let roll = calculate_damage(attacker, defender, &move_, &self.chart, &self.config.damage, rng);
        let fainted = defender.take_damage(roll.damage);

        events.push(BattleEvent::AttackResolved {
            attacker: attacker.name().to_string(),
            move_name: move_.name,
            defender: defender.name().to_string(),
            damage: roll.damage,
            effectiveness: roll.effectiveness,
            remaining_hp: defender.current_hp(),
            max_hp: defender.max_hp(),
        });

        if fainted {
            debug!(creature = defender.name(), "Fainted");
            events.push(BattleEvent::Fainted {
                side: side.opposite(),
                creature: defender.name().to_string(),
            });
        }
    }

    fn replace_opponent(&self, battle: &mut Battle, events: &mut Vec<BattleEvent>) {
        match self.ai.choose_replacement(Side::Opponent, battle) {
            Some(team_index) => {
                if let Err(err) = perform_switch(battle, Side::Opponent, team_index, events) {
                    warn!(%err, "Opponent chose an invalid replacement");
                }
            }
            None => warn!("Opponent needs a replacement but has none"),
        }
    }
}

/// Swaps `side`'s active creature and records the switch.
fn perform_switch(
    battle: &mut Battle,
    side: Side,
    team_index: usize,
    events: &mut Vec<BattleEvent>,
) -> ActionResult<()> {
    let team = battle.team_mut(side);
    let old_creature = team.active().map(|p| p.name().to_string()).unwrap_or_default();
    team.switch_to(team_index)?;
    let new_creature = team.active().map(|p| p.name().to_string()).unwrap_or_default();

    debug!(?side, %old_creature, %new_creature, "Switched");
    events.push(BattleEvent::Switched {
        trainer: team.trainer_name.clone(),
        old_creature,
        new_creature,
    });
    Ok(())
}
