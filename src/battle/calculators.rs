use crate::battle::rng::RandomSource;
use crate::battle::type_chart::TypeChart;
use crate::config::DamageConfig;
use crate::moves::BattleMove;
use crate::participant::BattleParticipant;
use schema::MoveCategory;
use tracing::debug;

/// The outcome of one damage calculation, with the modifiers that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRoll {
    pub damage: u16,
    pub effectiveness: f64,
    pub stab: f64,
    pub random_factor: f64,
}

/// Attack and defense stats selected by the move's category.
fn attack_and_defense(
    attacker: &BattleParticipant,
    defender: &BattleParticipant,
    move_: &BattleMove,
) -> (u16, u16) {
    let attacking = &attacker.species.base_stats;
    let defending = &defender.species.base_stats;
    match move_.category {
        MoveCategory::Physical => (attacking.attack, defending.defense),
        MoveCategory::Special => (attacking.sp_attack, defending.sp_defense),
    }
}

/// `((2*level/5 + 2) * power * A / D) / 50 + 2`, before any modifier.
pub fn base_damage(
    attacker: &BattleParticipant,
    defender: &BattleParticipant,
    move_: &BattleMove,
    config: &DamageConfig,
) -> f64 {
    let (attack, defense) = attack_and_defense(attacker, defender, move_);
    let level = config.level as f64;
    ((2.0 * level / 5.0 + 2.0) * move_.power as f64 * attack as f64 / defense as f64) / 50.0 + 2.0
}

/// Same-type attack bonus: applies when the move shares a type with its user.
pub fn stab_multiplier(
    attacker: &BattleParticipant,
    move_: &BattleMove,
    config: &DamageConfig,
) -> f64 {
    if attacker.types().contains(&move_.move_type) {
        config.stab_multiplier
    } else {
        1.0
    }
}

fn finalize(raw: f64, config: &DamageConfig) -> u16 {
    raw.floor().max(config.min_damage as f64).min(u16::MAX as f64) as u16
}

/// Damage a connecting move inflicts. Accuracy is the caller's concern;
/// this always returns at least `min_damage`.
pub fn calculate_damage(
    attacker: &BattleParticipant,
    defender: &BattleParticipant,
    move_: &BattleMove,
    chart: &TypeChart,
    config: &DamageConfig,
    rng: &mut impl RandomSource,
) -> DamageRoll {
    let effectiveness = chart.effectiveness(move_.move_type, defender.types());
    let stab = stab_multiplier(attacker, move_, config);
    let base = base_damage(attacker, defender, move_, config);
    let random_factor = rng.uniform(config.random_min, config.random_max);

    let damage = finalize(base * stab * effectiveness * random_factor, config);

    debug!(
        attacker = attacker.name(),
        defender = defender.name(),
        move_name = %move_.name,
        base,
        stab,
        effectiveness,
        random_factor,
        damage,
        "Damage calculated"
    );

    DamageRoll {
        damage,
        effectiveness,
        stab,
        random_factor,
    }
}

/// The lowest and highest damage `calculate_damage` can return for these inputs.
pub fn damage_bounds(
    attacker: &BattleParticipant,
    defender: &BattleParticipant,
    move_: &BattleMove,
    chart: &TypeChart,
    config: &DamageConfig,
) -> (u16, u16) {
    let effectiveness = chart.effectiveness(move_.move_type, defender.types());
    let modified = base_damage(attacker, defender, move_, config)
        * stab_multiplier(attacker, move_, config)
        * effectiveness;
    (
        finalize(modified * config.random_min, config),
        finalize(modified * config.random_max, config),
    )
}
