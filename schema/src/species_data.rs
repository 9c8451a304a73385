use crate::CreatureType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl BaseStats {
    /// Sum of all six stats. Used as the "power level" ranking score.
    pub fn total(&self) -> u32 {
        self.as_array().iter().map(|&s| s as u32).sum()
    }

    /// The single highest stat.
    pub fn peak(&self) -> u16 {
        self.as_array().into_iter().max().unwrap_or(0)
    }

    /// HP, ATK, DEF, SP.ATK, SP.DEF, SPD
    pub fn as_array(&self) -> [u16; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
    }
}

/// Immutable per-species reference data, owned by the creature catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesStats {
    pub id: u16,
    pub name: String,
    /// Primary type first. One or two entries.
    pub types: Vec<CreatureType>,
    pub base_stats: BaseStats,
}

impl SpeciesStats {
    pub fn primary_type(&self) -> Option<CreatureType> {
        self.types.first().copied()
    }

    pub fn secondary_type(&self) -> Option<CreatureType> {
        self.types.get(1).copied()
    }

    pub fn has_type(&self, creature_type: CreatureType) -> bool {
        self.types.contains(&creature_type)
    }

    pub fn power_level(&self) -> u32 {
        self.base_stats.total()
    }
}
