//! Pocket Battle - demo entry point
//!
//! Builds a player team and a trainer's team from the built-in catalog and
//! lets the AI play both sides until the battle ends.

use clap::Parser;
use pocket_battle::battle::rng::rng_for_seed;
use pocket_battle::errors::CatalogError;
use pocket_battle::{
    generate_team, generate_team_from_trainer, instantiate_roster, BattleEngine, BattleResult,
    BattleRunner, Catalog, Difficulty, EngineConfig, Team, TeamStrategy, TypeChart,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pocket-battle", about = "Run an AI-vs-AI creature battle")]
struct Args {
    /// RON engine config; every field is optional
    #[arg(long)]
    config: Option<PathBuf>,

    /// Opponent trainer from the catalog
    #[arg(long, default_value = "Brock")]
    trainer: String,

    /// Comma-separated species for the player; generated when omitted
    #[arg(long, value_delimiter = ',')]
    team: Vec<String>,

    /// Seed for a reproducible battle (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many turns even if nobody has won
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    /// Print the final battle as JSON instead of the turn log
    #[arg(long)]
    json: bool,
}

fn main() -> BattleResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let catalog = Catalog::builtin()?;
    let trainer = catalog.trainer(&args.trainer)?;
    let mut rng = rng_for_seed(config.seed);

    let player_species = if args.team.is_empty() {
        generate_team(
            catalog.species(),
            3,
            TeamStrategy::Balanced,
            Difficulty::Medium,
            &mut rng,
        )
    } else {
        args.team
            .iter()
            .map(|name| {
                catalog
                    .find_species(name.trim())
                    .ok_or_else(|| CatalogError::MalformedData(format!("unknown species: {}", name)))
            })
            .collect::<Result<Vec<Arc<_>>, _>>()?
    };
    let opponent_species = generate_team_from_trainer(catalog.species(), trainer, &mut rng);

    let engine = BattleEngine::new(TypeChart::standard(), config);
    let mut runner = BattleRunner::new(
        engine,
        Team::new("Player", instantiate_roster(&player_species)),
        Team::new(trainer.display_name(), instantiate_roster(&opponent_species)),
    );
    runner.autoplay(args.max_turns)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(runner.battle())?);
        return Ok(());
    }

    for turn in runner.battle().turns() {
        println!("Turn {}", turn.number);
        for line in turn.descriptions() {
            println!("  {}", line);
        }
    }
    let info = runner.battle_info();
    println!(
        "Result: {} ({} fainted on your side, {} on theirs)",
        info.status, info.player.fainted_count, info.opponent.fainted_count
    );
    Ok(())
}
