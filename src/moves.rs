//! Moves synthesized from a creature's types, in place of a stored move list.

use schema::{CreatureType, MoveCategory, SpeciesStats};
use serde::{Deserialize, Serialize};

/// A move as carried by a battle participant, with its remaining PP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleMove {
    pub name: String,
    pub move_type: CreatureType,
    /// 0 for pure status moves.
    pub power: u16,
    /// Hit chance in percent.
    pub accuracy: u8,
    pub pp: u8,
    pub max_pp: u8,
    pub category: MoveCategory,
}

impl BattleMove {
    pub fn new(
        name: &str,
        move_type: CreatureType,
        power: u16,
        accuracy: u8,
        max_pp: u8,
        category: MoveCategory,
    ) -> Self {
        BattleMove {
            name: name.to_string(),
            move_type,
            power,
            accuracy,
            pp: max_pp,
            max_pp,
            category,
        }
    }

    /// Use the move (decrease PP)
    pub fn use_move(&mut self) -> bool {
        if self.pp > 0 {
            self.pp -= 1;
            true
        } else {
            false
        }
    }
}

/// The two signature move names of each type: (weaker physical, stronger special).
fn move_names(move_type: CreatureType) -> (&'static str, &'static str) {
    use CreatureType::*;
    match move_type {
        Normal => ("Quick Attack", "Hyper Voice"),
        Fire => ("Ember", "Flamethrower"),
        Water => ("Water Gun", "Surf"),
        Electric => ("Thunder Shock", "Thunderbolt"),
        Grass => ("Vine Whip", "Energy Ball"),
        Ice => ("Ice Shard", "Ice Beam"),
        Fighting => ("Karate Chop", "Aura Sphere"),
        Poison => ("Poison Sting", "Sludge Bomb"),
        Ground => ("Mud Slap", "Earth Power"),
        Flying => ("Wing Attack", "Air Slash"),
        Psychic => ("Confusion", "Psychic"),
        Bug => ("Bug Bite", "Bug Buzz"),
        Rock => ("Rock Throw", "Power Gem"),
        Ghost => ("Lick", "Shadow Ball"),
        Dragon => ("Dragon Tail", "Dragon Pulse"),
        Dark => ("Bite", "Dark Pulse"),
        Steel => ("Metal Claw", "Flash Cannon"),
        Fairy => ("Fairy Wind", "Moonblast"),
    }
}

/// Builds a species' moves: two from its primary type, one from its
/// secondary type if it has one, and a neutral Tackle last.
pub fn generate_moves(species: &SpeciesStats) -> Vec<BattleMove> {
    let mut moves = Vec::with_capacity(4);

    if let Some(primary) = species.primary_type() {
        let (weak_name, strong_name) = move_names(primary);
        moves.push(BattleMove::new(
            weak_name,
            primary,
            60,
            100,
            25,
            MoveCategory::Physical,
        ));
        moves.push(BattleMove::new(
            strong_name,
            primary,
            90,
            85,
            10,
            MoveCategory::Special,
        ));
    }

    if let Some(secondary) = species.secondary_type() {
        let stats = &species.base_stats;
        // Secondary coverage follows whichever attacking stat is stronger.
        let (name, category) = if stats.attack >= stats.sp_attack {
            (move_names(secondary).0, MoveCategory::Physical)
        } else {
            (move_names(secondary).1, MoveCategory::Special)
        };
        moves.push(BattleMove::new(name, secondary, 70, 95, 15, category));
    }

    moves.push(BattleMove::new(
        "Tackle",
        CreatureType::Normal,
        40,
        100,
        35,
        MoveCategory::Physical,
    ));

    moves
}
