//! career_sim
//!
//! Drives the career engine from the command line: whole seasons, single
//! matches and tactic rankings, all reproducible from a seed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use rand::Rng;

use career_core::board::Difficulty;
use career_core::career::fixture_setup;
use career_core::models::{
    Club, Formation, FormationCode, LeagueClub, MatchSetup, Player, PlayerAttributes, Position, TeamSetup,
};
use career_core::tactics::recommend_tactics;
use career_core::{
    advance_matchday, encode_snapshot, end_season, initialize_career_with_config, play_match, seeded,
    simulate_other_fixtures, simulate_with_config, BalanceConfig, CareerGameState,
};

#[derive(Parser)]
#[command(name = "career_sim")]
#[command(about = "Deterministic football career simulator", long_about = None)]
struct Cli {
    /// Seed for every random roll
    #[arg(long, global = true, default_value_t = 2025)]
    seed: u64,

    /// Balance preset
    #[arg(long, global = true, value_enum, default_value_t = Preset::Realistic)]
    preset: Preset,

    /// YAML or JSON balance file, overrides --preset
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Realistic,
    Arcade,
    Hardcore,
}

#[derive(Subcommand)]
enum Commands {
    /// Play whole seasons and print the final table
    Season {
        /// Clubs in the league, the managed club included
        #[arg(long, default_value_t = 20)]
        clubs: u32,

        #[arg(long, default_value_t = 1)]
        seasons: u32,

        /// e.g. "4-3-3"
        #[arg(long, default_value = "4-3-3")]
        formation: String,

        /// easy, medium or hard
        #[arg(long, default_value = "medium")]
        difficulty: String,

        /// Write the final state as a snapshot
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Simulate one match between two rating-only sides and print it as JSON
    Match {
        #[arg(long, default_value_t = 75.0)]
        home_rating: f32,

        #[arg(long, default_value_t = 75.0)]
        away_rating: f32,

        #[arg(long, default_value = "4-3-3")]
        formation: String,
    },

    /// Rank the advanced tactical systems for a generated squad
    Tactics {
        #[arg(long, default_value_t = 22)]
        squad_size: usize,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(cli.preset, cli.config.as_deref())?;

    match cli.command {
        Commands::Season { clubs, seasons, formation, difficulty, save } => {
            let formation = Formation::preset(formation.parse::<FormationCode>()?);
            let difficulty: Difficulty = difficulty.parse()?;
            let state = run_seasons(clubs, seasons, formation, difficulty, config, cli.seed)?;

            if let Some(path) = save {
                let bytes = encode_snapshot(&state)?;
                std::fs::write(&path, &bytes).with_context(|| format!("writing {}", path.display()))?;
                println!("Snapshot saved to {} ({} bytes)", path.display(), bytes.len());
            }
        }

        Commands::Match { home_rating, away_rating, formation } => {
            let formation = Formation::preset(formation.parse::<FormationCode>()?);
            let setup = MatchSetup::new(
                rated_side(1, "Home", home_rating, formation),
                rated_side(2, "Away", away_rating, formation),
            )
            .with_home_advantage(config.match_sim.home_field_advantage);
            let result = simulate_with_config(&setup, &config.match_sim, &mut seeded(cli.seed));
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Tactics { squad_size } => {
            let mut rng = seeded(cli.seed);
            let squad = random_squad(squad_size, 2030, &mut rng);

            println!("{:<22} {:>5}  suitable", "system", "score");
            for rec in recommend_tactics(&squad) {
                println!("{:<22} {:>5}  {}", rec.display_name, rec.score, if rec.suitable { "yes" } else { "no" });
            }
        }
    }

    Ok(())
}

fn load_config(preset: Preset, path: Option<&Path>) -> Result<BalanceConfig> {
    let Some(path) = path else {
        return Ok(match preset {
            Preset::Realistic => BalanceConfig::realistic(),
            Preset::Arcade => BalanceConfig::arcade(),
            Preset::Hardcore => BalanceConfig::hardcore(),
        });
    };

    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => BalanceConfig::from_json_str(&text)?,
        _ => BalanceConfig::from_yaml_str(&text)?,
    };
    log::info!("Loaded balance config from {}", path.display());
    Ok(config)
}

/// Eleven players rated `rating`, shaped like the formation.
fn rated_side(club_id: u32, name: &str, rating: f32, formation: Formation) -> TeamSetup {
    let lines = [
        (1, Position::GK),
        (formation.defenders, Position::CB),
        (formation.midfielders, Position::CM),
        (formation.forwards, Position::ST),
    ];
    let attributes = PlayerAttributes::uniform(rating.round().clamp(0.0, 99.0) as u8);
    let squad: Vec<Player> = lines
        .iter()
        .flat_map(|&(count, pos)| std::iter::repeat(pos).take(usize::from(count)))
        .enumerate()
        .map(|(i, pos)| {
            Player::new(club_id * 100 + i as u32, name, format!("#{}", i + 1), pos, 26, attributes).with_overall(rating)
        })
        .collect();
    TeamSetup::from_squad(club_id, name, &squad, formation)
}

/// Squad cycling through every position with attributes in 45..90 and
/// contracts running one to four seasons past `season`.
fn random_squad(size: usize, season: u16, rng: &mut impl Rng) -> Vec<Player> {
    Position::ALL
        .iter()
        .cycle()
        .take(size)
        .enumerate()
        .map(|(i, &pos)| {
            let mut roll = || rng.gen_range(45..90);
            let attributes = PlayerAttributes::new(roll(), roll(), roll(), roll(), roll(), roll());
            let age = rng.gen_range(18..=33);
            let potential_gap = f32::from(33 - age) * 0.8;
            let player = Player::new(i as u32 + 1, "Squad", format!("Player{}", i + 1), pos, age, attributes);
            let potential = player.overall_rating + potential_gap;
            player.with_potential(potential).with_contract_end(season + rng.gen_range(1..=4))
        })
        .collect()
}

fn run_seasons(
    clubs: u32,
    seasons: u32,
    formation: Formation,
    difficulty: Difficulty,
    config: BalanceConfig,
    seed: u64,
) -> Result<CareerGameState> {
    anyhow::ensure!(clubs >= 2, "a league needs at least two clubs, got {clubs}");
    let mut rng = seeded(seed);

    let squad = random_squad(22, 2025, &mut rng);
    let club = Club::new(1, "Career City", 60_000_000.0, squad);
    let league = (2..=clubs)
        .map(|id| LeagueClub::new(id, format!("Club {id}"), rng.gen_range(62.0..80.0)))
        .collect();
    let mut state = initialize_career_with_config(club, league, 2025, difficulty, config)?;

    for _ in 0..seasons {
        while let Some(fixture) = state.next_fixture() {
            let (fixture_id, matchday) = (fixture.id, fixture.matchday);
            let setup = fixture_setup(&state, fixture_id, formation)?;
            let (played, _) = play_match(&state, fixture_id, &setup, &mut rng)?;
            state = simulate_other_fixtures(&played, matchday, &mut rng)?;
            state = advance_matchday(state);
        }
        print_table(&state);
        state = end_season(state, &mut rng);
    }
    Ok(state)
}

fn print_table(state: &CareerGameState) {
    println!("\nSeason {} final table", state.current_season);
    println!("{:>3}  {:<16} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4}", "#", "club", "P", "W", "D", "L", "GD", "Pts");
    for row in &state.standings {
        let marker = if row.club_id == state.club.id { "*" } else { " " };
        println!(
            "{:>3}{} {:<16} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4}",
            row.position,
            marker,
            row.club_name,
            row.played,
            row.won,
            row.drawn,
            row.lost,
            row.goal_difference(),
            row.points
        );
    }

    let stats = &state.season_stats;
    println!(
        "Top scorer: {} ({} goals) | Best player: {} ({:.1}) | Board: {}",
        stats.top_scorer.name,
        stats.top_scorer.goals,
        stats.best_player.name,
        stats.best_player.rating,
        state.board.job_status()
    );
}
