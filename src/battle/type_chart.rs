//! Type effectiveness lookup.

use schema::CreatureType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One attacking type's non-neutral matchups. Anything not listed is ×1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub attacking: CreatureType,
    #[serde(default)]
    pub super_effective: Vec<CreatureType>,
    #[serde(default)]
    pub not_very_effective: Vec<CreatureType>,
    #[serde(default)]
    pub no_effect: Vec<CreatureType>,
}

/// Immutable attacking-type → defending-type multiplier table.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeChart {
    multipliers: HashMap<(CreatureType, CreatureType), f64>,
}

impl Default for TypeChart {
    fn default() -> Self {
        Self::standard()
    }
}

impl TypeChart {
    pub fn from_matchups(matchups: &[Matchup]) -> Self {
        let mut multipliers = HashMap::new();
        for matchup in matchups {
            let groups = [
                (&matchup.super_effective, 2.0),
                (&matchup.not_very_effective, 0.5),
                (&matchup.no_effect, 0.0),
            ];
            for (defenders, multiplier) in groups {
                for &defending in defenders {
                    multipliers.insert((matchup.attacking, defending), multiplier);
                }
            }
        }
        Self { multipliers }
    }

    /// Parses a list of `Matchup`s from RON.
    pub fn from_ron_str(source: &str) -> Result<Self, ron::error::SpannedError> {
        let matchups: Vec<Matchup> = ron::from_str(source)?;
        Ok(Self::from_matchups(&matchups))
    }

    /// The reference eighteen-type chart.
    pub fn standard() -> Self {
        use CreatureType::*;

        let table: [(CreatureType, &[CreatureType], &[CreatureType], &[CreatureType]); 18] = [
            // (attacking, super effective, not very effective, no effect)
            (Normal, &[], &[Rock, Steel], &[Ghost]),
            (Fire, &[Grass, Ice, Bug, Steel], &[Fire, Water, Rock, Dragon], &[]),
            (Water, &[Fire, Ground, Rock], &[Water, Grass, Dragon], &[]),
            (Electric, &[Water, Flying], &[Electric, Grass, Dragon], &[Ground]),
            (
                Grass,
                &[Water, Ground, Rock],
                &[Fire, Grass, Poison, Flying, Bug, Dragon, Steel],
                &[],
            ),
            (Ice, &[Grass, Ground, Flying, Dragon], &[Fire, Water, Ice, Steel], &[]),
            (
                Fighting,
                &[Normal, Ice, Rock, Dark, Steel],
                &[Poison, Flying, Psychic, Bug, Fairy],
                &[Ghost],
            ),
            (Poison, &[Grass, Fairy], &[Poison, Ground, Rock, Ghost], &[Steel]),
            (Ground, &[Fire, Electric, Poison, Rock, Steel], &[Grass, Bug], &[Flying]),
            (Flying, &[Grass, Fighting, Bug], &[Electric, Rock, Steel], &[]),
            (Psychic, &[Fighting, Poison], &[Psychic, Steel], &[Dark]),
            (
                Bug,
                &[Grass, Psychic, Dark],
                &[Fire, Fighting, Poison, Flying, Ghost, Steel, Fairy],
                &[],
            ),
            (Rock, &[Fire, Ice, Flying, Bug], &[Fighting, Ground, Steel], &[]),
            (Ghost, &[Psychic, Ghost], &[Dark], &[Normal]),
            (Dragon, &[Dragon], &[Steel], &[Fairy]),
            (Dark, &[Psychic, Ghost], &[Fighting, Dark, Fairy], &[]),
            (Steel, &[Ice, Rock, Fairy], &[Fire, Water, Electric, Steel], &[]),
            (Fairy, &[Fighting, Dragon, Dark], &[Fire, Poison, Steel], &[]),
        ];

        let matchups: Vec<Matchup> = table
            .iter()
            .map(|(attacking, strong, weak, immune)| Matchup {
                attacking: *attacking,
                super_effective: strong.to_vec(),
                not_very_effective: weak.to_vec(),
                no_effect: immune.to_vec(),
            })
            .collect();

        Self::from_matchups(&matchups)
    }

    /// Multiplier for a single attacking/defending pair. Pairs missing from
    /// the table are neutral.
    pub fn single(&self, attacking: CreatureType, defending: CreatureType) -> f64 {
        self.multipliers
            .get(&(attacking, defending))
            .copied()
            .unwrap_or(1.0)
    }

    /// Product of the per-type factors across all defending types.
    pub fn effectiveness(&self, attacking: CreatureType, defending: &[CreatureType]) -> f64 {
        defending
            .iter()
            .map(|&defending| self.single(attacking, defending))
            .product()
    }
}

/// Human-readable effect description. Neutral hits have none.
pub fn describe_effectiveness(multiplier: f64) -> Option<&'static str> {
    match multiplier {
        m if m == 0.0 => Some("no effect"),
        m if m < 1.0 => Some("not very effective"),
        m if m > 1.0 => Some("super effective"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;
    use CreatureType::*;

    #[rstest]
    #[case(Electric, &[Water], 2.0)]
    #[case(Electric, &[Ground], 0.0)]
    #[case(Electric, &[Normal], 1.0)]
    #[case(Fire, &[Water], 0.5)]
    #[case(Ice, &[Grass, Flying], 4.0)]
    #[case(Fire, &[Water, Dragon], 0.25)]
    #[case(Ground, &[Fire, Flying], 0.0)]
    #[case(Grass, &[Water, Ground], 4.0)]
    fn test_effectiveness_cases(
        #[case] attacking: CreatureType,
        #[case] defending: &[CreatureType],
        #[case] expected: f64,
    ) {
        let chart = TypeChart::standard();
        assert_eq!(chart.effectiveness(attacking, defending), expected);
    }

    #[test]
    fn test_missing_pair_defaults_to_neutral() {
        let chart = TypeChart::from_matchups(&[]);
        assert_eq!(chart.effectiveness(Dragon, &[Dragon]), 1.0);
    }

    #[test]
    fn test_only_allowed_multipliers_are_produced() {
        let chart = TypeChart::standard();
        let allowed = [0.0, 0.25, 0.5, 1.0, 2.0, 4.0];
        for attacking in CreatureType::iter() {
            for x in CreatureType::iter() {
                for y in CreatureType::iter() {
                    let m = chart.effectiveness(attacking, &[x, y]);
                    assert!(allowed.contains(&m), "{attacking} vs {x}/{y} gave {m}");
                }
            }
        }
    }

    #[test]
    fn test_custom_chart_from_ron() {
        let chart = TypeChart::from_ron_str(
            "[(attacking: fire, super_effective: [water]), (attacking: water, no_effect: [fire])]",
        )
        .unwrap();
        assert_eq!(chart.single(Fire, Water), 2.0);
        assert_eq!(chart.single(Water, Fire), 0.0);
        assert_eq!(chart.single(Grass, Fire), 1.0);
    }

    #[rstest]
    #[case(0.0, Some("no effect"))]
    #[case(0.25, Some("not very effective"))]
    #[case(0.5, Some("not very effective"))]
    #[case(1.0, None)]
    #[case(2.0, Some("super effective"))]
    #[case(4.0, Some("super effective"))]
    fn test_describe_effectiveness(#[case] multiplier: f64, #[case] expected: Option<&str>) {
        assert_eq!(describe_effectiveness(multiplier), expected);
    }

    fn any_type() -> impl Strategy<Value = CreatureType> {
        proptest::sample::select(CreatureType::iter().collect::<Vec<_>>())
    }

    proptest! {
        #[test]
        fn prop_dual_type_is_product_of_singles(a in any_type(), x in any_type(), y in any_type()) {
            let chart = TypeChart::standard();
            prop_assert_eq!(
                chart.effectiveness(a, &[x, y]),
                chart.effectiveness(a, &[x]) * chart.effectiveness(a, &[y])
            );
        }

        #[test]
        fn prop_immunity_dominates(a in any_type(), x in any_type(), y in any_type()) {
            let chart = TypeChart::standard();
            if chart.effectiveness(a, &[x]) == 0.0 {
                prop_assert_eq!(chart.effectiveness(a, &[x, y]), 0.0);
                prop_assert_eq!(chart.effectiveness(a, &[y, x]), 0.0);
            }
        }
    }
}
