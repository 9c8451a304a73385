use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Tunable constants of the damage formula, the AI and the turn engine.
/// The defaults are the engine's reference rules; a RON file only needs to
/// name the fields it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub damage: DamageConfig,
    pub ai: AiConfig,
    /// Roll each move's accuracy before damage is calculated.
    pub roll_accuracy: bool,
    /// Seed for reproducible battles. `None` draws from the thread rng.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageConfig {
    /// Notional level applied to every participant.
    pub level: u32,
    pub stab_multiplier: f64,
    pub random_min: f64,
    pub random_max: f64,
    pub min_damage: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Below this HP fraction the active creature looks for a replacement.
    pub low_hp_threshold: f64,
    /// A replacement must be above this HP fraction.
    pub healthy_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            damage: DamageConfig::default(),
            ai: AiConfig::default(),
            roll_accuracy: true,
            seed: None,
        }
    }
}

impl Default for DamageConfig {
    fn default() -> Self {
        DamageConfig {
            level: 50,
            stab_multiplier: 1.5,
            random_min: 0.85,
            random_max: 1.0,
            min_damage: 1,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            low_hp_threshold: 0.30,
            healthy_threshold: 0.50,
        }
    }
}

impl EngineConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_ron_str(&content)?;
        info!(path = %path.display(), "Loaded engine config");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let damage = &self.damage;
        if !(damage.random_min > 0.0 && damage.random_min <= damage.random_max) {
            return Err(ConfigError::Invalid(format!(
                "damage roll range {}..={} is empty or non-positive",
                damage.random_min, damage.random_max
            )));
        }
        if damage.level == 0 {
            return Err(ConfigError::Invalid("level must be at least 1".to_string()));
        }
        for (name, value) in [
            ("low_hp_threshold", self.ai.low_hp_threshold),
            ("healthy_threshold", self.ai.healthy_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within 0.0..=1.0, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
