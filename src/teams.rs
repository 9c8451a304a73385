//! Opponent roster generation from a candidate pool.

use crate::battle::rng::RandomSource;
use rand::seq::{IndexedRandom, SliceRandom};
use schema::{CreatureType, Difficulty, SpeciesStats, TeamStrategy, TrainerProfile};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Types a type-focused trainer may specialise in.
pub const FOCUS_TYPES: [CreatureType; 10] = [
    CreatureType::Fire,
    CreatureType::Water,
    CreatureType::Grass,
    CreatureType::Electric,
    CreatureType::Psychic,
    CreatureType::Fighting,
    CreatureType::Ghost,
    CreatureType::Dragon,
    CreatureType::Rock,
    CreatureType::Ice,
];

/// Where the selection window starts, as a fraction of the ranked list.
/// Lists are ranked strongest first, so easier trainers start deeper.
fn start_fraction(strategy: TeamStrategy, difficulty: Difficulty) -> f64 {
    use Difficulty::*;
    use TeamStrategy::*;
    match (strategy, difficulty) {
        (Random, _) => 0.0,
        (TypeFocused, Easy) => 0.75,
        (TypeFocused, Medium) => 0.35,
        (TypeFocused, Hard) => 0.10,
        (Balanced, Easy) => 0.70,
        (Balanced, Medium) => 0.30,
        (Balanced, Hard) => 0.05,
        (Offensive | Defensive, Easy) => 0.80,
        (Offensive | Defensive, Medium) => 0.40,
        (Offensive | Defensive, Hard) => 0.10,
        (Legendary, Easy) => 0.70,
        (Legendary, Medium) => 0.30,
        (Legendary, Hard) => 0.0,
        (_, Expert) => 0.0,
    }
}

/// Ranking score for strategies that sort the pool.
fn score(strategy: TeamStrategy, species: &SpeciesStats) -> u32 {
    let stats = &species.base_stats;
    match strategy {
        TeamStrategy::Offensive => stats.attack as u32 + stats.sp_attack as u32 + stats.speed as u32,
        TeamStrategy::Defensive => stats.hp as u32 + stats.defense as u32 + stats.sp_defense as u32,
        TeamStrategy::Legendary => species.power_level() + stats.peak() as u32,
        TeamStrategy::Random | TeamStrategy::TypeFocused | TeamStrategy::Balanced => {
            species.power_level()
        }
    }
}

/// Highest score first; equal scores keep pool order.
fn ranked<'a>(
    pool: impl IntoIterator<Item = &'a Arc<SpeciesStats>>,
    key: impl Fn(&SpeciesStats) -> u32,
) -> Vec<Arc<SpeciesStats>> {
    let mut ranked: Vec<Arc<SpeciesStats>> = pool.into_iter().cloned().collect();
    ranked.sort_by_key(|species| Reverse(key(species.as_ref())));
    ranked
}

/// First index of a `size`-long window, kept inside the list.
fn window_start(fraction: f64, len: usize, size: usize) -> usize {
    let start = (fraction * len as f64).floor() as usize;
    start.min(len.saturating_sub(size))
}

fn window(ranked: &[Arc<SpeciesStats>], size: usize, fraction: f64) -> Vec<Arc<SpeciesStats>> {
    let size = size.min(ranked.len());
    let start = window_start(fraction, ranked.len(), size);
    ranked[start..start + size].to_vec()
}

/// Builds a roster of `min(team_size, pool.len())` distinct species.
pub fn generate_team(
    pool: &[Arc<SpeciesStats>],
    team_size: usize,
    strategy: TeamStrategy,
    difficulty: Difficulty,
    rng: &mut impl RandomSource,
) -> Vec<Arc<SpeciesStats>> {
    let team = match strategy {
        TeamStrategy::Random => {
            let mut shuffled = pool.to_vec();
            shuffled.shuffle(rng);
            shuffled.truncate(team_size);
            shuffled
        }
        TeamStrategy::TypeFocused => {
            let focus = FOCUS_TYPES.choose(rng).copied().unwrap_or(CreatureType::Fire);
            type_focused_team(pool, focus, team_size, difficulty)
        }
        TeamStrategy::Balanced => balanced_team(pool, team_size, difficulty),
        TeamStrategy::Offensive | TeamStrategy::Defensive | TeamStrategy::Legendary => {
            let ranked = ranked(pool, |species| score(strategy, species));
            window(&ranked, team_size, start_fraction(strategy, difficulty))
        }
    };

    debug!(
        %strategy,
        %difficulty,
        requested = team_size,
        pool = pool.len(),
        team = ?team.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        "Generated team"
    );
    team
}

/// Derives strategy, difficulty and size from a trainer profile.
pub fn generate_team_from_trainer(
    pool: &[Arc<SpeciesStats>],
    trainer: &TrainerProfile,
    rng: &mut impl RandomSource,
) -> Vec<Arc<SpeciesStats>> {
    generate_team(pool, trainer.team_size, trainer.strategy, trainer.difficulty, rng)
}

/// A team drawn from species of the `focus` type. If too few exist, the
/// remaining slots come from the same difficulty window over the rest.
pub fn type_focused_team(
    pool: &[Arc<SpeciesStats>],
    focus: CreatureType,
    team_size: usize,
    difficulty: Difficulty,
) -> Vec<Arc<SpeciesStats>> {
    let (focused, rest): (Vec<&Arc<SpeciesStats>>, Vec<&Arc<SpeciesStats>>) =
        pool.iter().partition(|species| species.has_type(focus));

    let focused = ranked(focused, SpeciesStats::power_level);
    let mut team = window(
        &focused,
        team_size,
        start_fraction(TeamStrategy::TypeFocused, difficulty),
    );

    let shortfall = team_size.min(pool.len()) - team.len();
    if shortfall > 0 {
        debug!(%focus, shortfall, "Not enough focused species; filling from the rest");
        let rest = ranked(rest, SpeciesStats::power_level);
        team.extend(window(
            &rest,
            shortfall,
            start_fraction(TeamStrategy::TypeFocused, difficulty),
        ));
    }
    team
}

/// Strongest-first within the difficulty window, preferring members that
/// bring a type the team does not have yet.
fn balanced_team(
    pool: &[Arc<SpeciesStats>],
    team_size: usize,
    difficulty: Difficulty,
) -> Vec<Arc<SpeciesStats>> {
    let ranked = ranked(pool, SpeciesStats::power_level);
    let size = team_size.min(ranked.len());
    let start = window_start(
        start_fraction(TeamStrategy::Balanced, difficulty),
        ranked.len(),
        size,
    );
    // Never reach above the window start; `window_start` leaves room for `size`.
    let order: Vec<usize> = (start..ranked.len()).collect();

    let mut chosen = vec![false; ranked.len()];
    let mut covered: HashSet<CreatureType> = HashSet::new();
    let mut team = Vec::with_capacity(size);

    for &index in &order {
        if team.len() == size {
            break;
        }
        let candidate = &ranked[index];
        if candidate.types.iter().any(|t| !covered.contains(t)) {
            covered.extend(candidate.types.iter().copied());
            chosen[index] = true;
            team.push(Arc::clone(candidate));
        }
    }

    for &index in &order {
        if team.len() == size {
            break;
        }
        if !chosen[index] {
            chosen[index] = true;
            team.push(Arc::clone(&ranked[index]));
        }
    }
    team
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::rng::{SeededRng, SystemRng, TurnRng};
    use crate::catalog::Catalog;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use schema::BaseStats;

    fn names(team: &[Arc<SpeciesStats>]) -> Vec<&str> {
        team.iter().map(|s| s.name.as_str()).collect()
    }

    fn assert_unique(team: &[Arc<SpeciesStats>]) {
        let unique: HashSet<&str> = names(team).into_iter().collect();
        assert_eq!(unique.len(), team.len(), "duplicate in {:?}", names(team));
    }

    fn synthetic(id: u16, types: Vec<CreatureType>, stat: u16) -> Arc<SpeciesStats> {
        Arc::new(SpeciesStats {
            id,
            name: format!("Mon{}", id),
            types,
            base_stats: BaseStats {
                hp: stat,
                attack: stat,
                defense: stat,
                sp_attack: stat,
                sp_defense: stat,
                speed: stat,
            },
        })
    }

    fn pool() -> Vec<Arc<SpeciesStats>> {
        Catalog::builtin().unwrap().species().to_vec()
    }

    #[rstest]
    fn test_size_and_uniqueness_for_every_combination(
        #[values(
            TeamStrategy::Random,
            TeamStrategy::TypeFocused,
            TeamStrategy::Balanced,
            TeamStrategy::Offensive,
            TeamStrategy::Defensive,
            TeamStrategy::Legendary
        )]
        strategy: TeamStrategy,
        #[values(Difficulty::Easy, Difficulty::Medium, Difficulty::Hard, Difficulty::Expert)]
        difficulty: Difficulty,
        #[values(0, 1, 4, 6)] size: usize,
    ) {
        let pool = pool();
        let team = generate_team(&pool, size, strategy, difficulty, &mut SystemRng::new());
        assert_eq!(team.len(), size);
        assert_unique(&team);
    }

    #[test]
    fn test_oversized_random_request_clamps_to_pool() {
        let pool: Vec<_> = (0..6)
            .map(|id| synthetic(id, vec![CreatureType::Normal], 50))
            .collect();
        let team = generate_team(
            &pool,
            8,
            TeamStrategy::Random,
            Difficulty::Easy,
            &mut SystemRng::new(),
        );
        assert_eq!(team.len(), 6);
        assert_unique(&team);
    }

    #[test]
    fn test_empty_pool_yields_empty_team() {
        let team = generate_team(
            &[],
            3,
            TeamStrategy::Balanced,
            Difficulty::Hard,
            &mut SystemRng::new(),
        );
        assert!(team.is_empty());
    }

    #[test]
    fn test_expert_offensive_takes_the_top_scores() {
        let pool: Vec<_> = (1..=10)
            .map(|id| synthetic(id, vec![CreatureType::Normal], id * 10))
            .collect();
        let team = generate_team(
            &pool,
            3,
            TeamStrategy::Offensive,
            Difficulty::Expert,
            &mut SystemRng::new(),
        );
        assert_eq!(names(&team), vec!["Mon10", "Mon9", "Mon8"]);
    }

    #[test]
    fn test_easy_window_starts_deep_in_the_ranking() {
        let pool: Vec<_> = (1..=10)
            .map(|id| synthetic(id, vec![CreatureType::Normal], id * 10))
            .collect();
        // start = floor(0.8 * 10) = 8, clamped to 10 - 3 = 7
        let team = generate_team(
            &pool,
            3,
            TeamStrategy::Defensive,
            Difficulty::Easy,
            &mut SystemRng::new(),
        );
        assert_eq!(names(&team), vec!["Mon3", "Mon2", "Mon1"]);
    }

    #[test]
    fn test_legendary_expert_leads_with_mewtwo() {
        let team = generate_team(
            &pool(),
            6,
            TeamStrategy::Legendary,
            Difficulty::Expert,
            &mut SystemRng::new(),
        );
        assert_eq!(team[0].name, "Mewtwo");
    }

    #[test]
    fn test_type_focused_prefers_the_focus_type() {
        let team = type_focused_team(&pool(), CreatureType::Fire, 3, Difficulty::Expert);
        assert_eq!(team.len(), 3);
        assert!(team.iter().all(|s| s.has_type(CreatureType::Fire)));
        // Moltres and Charizard outrank the other fire types.
        assert_eq!(&names(&team)[..2], &["Moltres", "Charizard"]);
    }

    #[test]
    fn test_type_focused_fills_shortfall_from_rest() {
        let pool = vec![
            synthetic(1, vec![CreatureType::Ghost], 60),
            synthetic(2, vec![CreatureType::Normal], 90),
            synthetic(3, vec![CreatureType::Water], 80),
            synthetic(4, vec![CreatureType::Water], 70),
        ];
        // rest ranks Mon2, Mon3, Mon4; easy starts at floor(0.75 * 3) clamped to 1
        let team = type_focused_team(&pool, CreatureType::Ghost, 3, Difficulty::Easy);
        assert_eq!(names(&team), vec!["Mon1", "Mon3", "Mon4"]);
    }

    #[test]
    fn test_easy_focused_shortfall_skips_the_strongest() {
        // Only two grass species exist in the catalog.
        let team = type_focused_team(&pool(), CreatureType::Grass, 3, Difficulty::Easy);
        assert_eq!(team.len(), 3);
        assert_eq!(&names(&team)[..2], &["Venusaur", "Bulbasaur"]);
        assert!(!names(&team).contains(&"Mewtwo"), "got {:?}", names(&team));
    }

    #[test]
    fn test_type_focused_draws_focus_from_rng() {
        // 0.0 picks the first focus type.
        let team = generate_team(
            &pool(),
            2,
            TeamStrategy::TypeFocused,
            Difficulty::Expert,
            &mut TurnRng::constant(0.0),
        );
        assert!(team.iter().all(|s| s.has_type(FOCUS_TYPES[0])));
    }

    #[test]
    fn test_balanced_prefers_type_diversity() {
        let pool = vec![
            synthetic(1, vec![CreatureType::Water], 100),
            synthetic(2, vec![CreatureType::Water], 95),
            synthetic(3, vec![CreatureType::Water], 90),
            synthetic(4, vec![CreatureType::Fire], 60),
            synthetic(5, vec![CreatureType::Grass], 50),
        ];
        let team = balanced_team(&pool, 3, Difficulty::Expert);
        assert_eq!(names(&team), vec!["Mon1", "Mon4", "Mon5"]);
    }

    #[test]
    fn test_easy_balanced_stays_at_the_weak_end() {
        let mut pool = vec![
            synthetic(1, vec![CreatureType::Fire], 250),
            synthetic(2, vec![CreatureType::Fire], 240),
            synthetic(3, vec![CreatureType::Fire], 230),
        ];
        pool.extend((4..=10).map(|id| synthetic(id, vec![CreatureType::Water], 100 - id)));
        // start = floor(0.7 * 10) = 7
        let team = generate_team(
            &pool,
            3,
            TeamStrategy::Balanced,
            Difficulty::Easy,
            &mut SystemRng::new(),
        );
        assert_eq!(names(&team), vec!["Mon8", "Mon9", "Mon10"]);
    }

    #[test]
    fn test_balanced_fills_when_diversity_runs_out() {
        let pool: Vec<_> = (1..=4)
            .map(|id| synthetic(id, vec![CreatureType::Rock], 100 - id))
            .collect();
        let team = balanced_team(&pool, 3, Difficulty::Expert);
        assert_eq!(names(&team), vec!["Mon1", "Mon2", "Mon3"]);
    }

    #[test]
    fn test_trainer_profile_drives_generation() {
        let catalog = Catalog::builtin().unwrap();
        let blue = catalog.trainer("Blue").unwrap();
        let team = generate_team_from_trainer(catalog.species(), blue, &mut SeededRng::new(1));
        assert_eq!(team.len(), blue.team_size);
        assert_unique(&team);
    }

    fn any_strategy() -> impl Strategy<Value = TeamStrategy> {
        prop::sample::select(vec![
            TeamStrategy::Random,
            TeamStrategy::TypeFocused,
            TeamStrategy::Balanced,
            TeamStrategy::Offensive,
            TeamStrategy::Defensive,
            TeamStrategy::Legendary,
        ])
    }

    fn any_difficulty() -> impl Strategy<Value = Difficulty> {
        prop::sample::select(vec![
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Expert,
        ])
    }

    proptest! {
        #[test]
        fn prop_team_size_is_min_of_request_and_pool(
            stats in prop::collection::vec(1u16..=255, 0..12),
            n in 0usize..16,
            strategy in any_strategy(),
            difficulty in any_difficulty(),
            seed in any::<u64>(),
        ) {
            let types = [CreatureType::Fire, CreatureType::Water, CreatureType::Dragon, CreatureType::Normal];
            let pool: Vec<_> = stats
                .iter()
                .enumerate()
                .map(|(i, &stat)| synthetic(i as u16, vec![types[i % types.len()]], stat))
                .collect();
            let team = generate_team(&pool, n, strategy, difficulty, &mut SeededRng::new(seed));
            prop_assert_eq!(team.len(), n.min(pool.len()));
            let unique: HashSet<u16> = team.iter().map(|s| s.id).collect();
            prop_assert_eq!(unique.len(), team.len());
        }
    }
}
