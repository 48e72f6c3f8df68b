//! Statistical match engine.
//!
//! A match is resolved in one pass: possession from relative strength and
//! style, expected goals from the attacking lines, a score from xG plus a
//! single bonus-goal coin flip per side, then an event timeline and
//! per-team statistics. No ball or player movement is simulated.
//!
//! The engine is a pure function of its input and the injected random
//! source; callers validate lineups with [`MatchSetup::validate`] first.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::models::formation::{Formation, FormationCode, FormationStyle};
use crate::models::match_result::{
    CardCount, ManOfTheMatch, MatchDuration, MatchEvent, MatchEventType, MatchResult,
    MatchStatistics, TeamStats,
};
use crate::models::match_setup::{LineupPlayer, MatchSetup, TeamSetup, TeamSide};
use crate::models::player::Player;

const MIN_POSSESSION: f32 = 20.0;
const MAX_POSSESSION: f32 = 80.0;

/// Home possession share before clamping.
fn home_possession(setup: &MatchSetup, config: &MatchConfig) -> f32 {
    let mut home_strength = setup.home.mean_rating();
    if !setup.neutral_venue {
        home_strength *= setup.home_field_advantage;
    }
    let away_strength = setup.away.mean_rating();
    let total = home_strength + away_strength;

    let mut possession = if total > 0.0 { home_strength / total * 100.0 } else { 50.0 };

    let swing = config.style_possession_swing;
    possession += match setup.home.formation.style {
        FormationStyle::Attacking => swing,
        FormationStyle::Defensive => -swing,
        FormationStyle::Balanced => 0.0,
    };
    possession += match setup.away.formation.style {
        FormationStyle::Attacking => -swing,
        FormationStyle::Defensive => swing,
        FormationStyle::Balanced => 0.0,
    };

    possession.clamp(MIN_POSSESSION, MAX_POSSESSION)
}

/// Expected goals for one side, rounded to two decimals.
///
/// Forwards contribute `shooting/100 * 0.3`, midfielders `shooting/100 * 0.1`,
/// both scaled by `possession/50`; the total is multiplied by the style factor.
pub fn expected_goals(
    players: &[LineupPlayer],
    style: FormationStyle,
    possession: f32,
    config: &MatchConfig,
) -> f32 {
    let possession_factor = possession / 50.0;
    let mut xg: f32 = players
        .iter()
        .map(|p| {
            let line_factor = if p.position.is_forward() {
                0.3
            } else if p.position.is_midfielder() {
                0.1
            } else {
                0.0
            };
            p.shooting_or_estimate() / 100.0 * line_factor * possession_factor
        })
        .sum();

    xg *= match style {
        FormationStyle::Attacking => config.attacking_xg_factor,
        FormationStyle::Defensive => config.defensive_xg_factor,
        FormationStyle::Balanced => 1.0,
    };
    (xg * 100.0).round() / 100.0
}

fn score_from_xg(xg: f32, config: &MatchConfig, rng: &mut impl Rng) -> u8 {
    let bonus = if rng.gen_bool(config.bonus_goal_chance) { 1 } else { 0 };
    (xg.round() as u8).saturating_add(bonus)
}

/// Flattened view of both lineups for uniform picks.
struct Roster<'a> {
    home: &'a [LineupPlayer],
    away: &'a [LineupPlayer],
}

impl<'a> Roster<'a> {
    fn len(&self) -> usize {
        self.home.len() + self.away.len()
    }

    fn pick(&self, rng: &mut impl Rng) -> (TeamSide, &'a LineupPlayer) {
        let idx = rng.gen_range(0..self.len());
        if idx < self.home.len() {
            (TeamSide::Home, &self.home[idx])
        } else {
            (TeamSide::Away, &self.away[idx - self.home.len()])
        }
    }
}

fn event(
    minute: u8,
    event_type: MatchEventType,
    team: TeamSide,
    player: &LineupPlayer,
    description: String,
) -> MatchEvent {
    MatchEvent {
        minute,
        event_type,
        team,
        player_id: player.id,
        player_name: player.name.clone(),
        position: player.position,
        description,
        impact: event_type.impact(),
    }
}

fn goal_events(
    team: &TeamSetup,
    side: TeamSide,
    goals: u8,
    rng: &mut impl Rng,
    events: &mut Vec<MatchEvent>,
) {
    let players = &team.players;
    for _ in 0..goals {
        let minute = rng.gen_range(15..=90);
        let scorer_idx = rng.gen_range(0..players.len());
        let scorer = &players[scorer_idx];
        events.push(event(
            minute,
            MatchEventType::Goal,
            side,
            scorer,
            format!("{} scores!", scorer.name),
        ));

        if players.len() > 1 {
            // Pick among the other players by skipping the scorer's slot
            let mut assist_idx = rng.gen_range(0..players.len() - 1);
            if assist_idx >= scorer_idx {
                assist_idx += 1;
            }
            let assister = &players[assist_idx];
            events.push(event(
                minute,
                MatchEventType::Assist,
                side,
                assister,
                format!("{} provides the assist", assister.name),
            ));
        }
    }
}

fn discipline_events(
    roster: &Roster<'_>,
    config: &MatchConfig,
    rng: &mut impl Rng,
    events: &mut Vec<MatchEvent>,
) {
    let yellow_cards = rng.gen_range(config.min_yellow_cards..=config.max_yellow_cards);
    for _ in 0..yellow_cards {
        let (side, player) = roster.pick(rng);
        let minute = rng.gen_range(0..90);
        events.push(event(
            minute,
            MatchEventType::YellowCard,
            side,
            player,
            format!("{} receives yellow card", player.name),
        ));
    }

    if rng.gen_bool(config.red_card_chance) {
        let (side, player) = roster.pick(rng);
        let minute = rng.gen_range(0..90);
        events.push(event(
            minute,
            MatchEventType::RedCard,
            side,
            player,
            format!("{} receives red card", player.name),
        ));
    }

    if rng.gen_bool(config.injury_event_chance) {
        let (side, player) = roster.pick(rng);
        let minute = rng.gen_range(0..90);
        events.push(event(
            minute,
            MatchEventType::Injury,
            side,
            player,
            format!("{} is injured", player.name),
        ));
    }
}

fn team_statistics(
    side: TeamSide,
    possession: f32,
    xg: f32,
    events: &[MatchEvent],
    rng: &mut impl Rng,
) -> MatchStatistics {
    let shots = (xg * 2.5 + rng.gen_range(0.0f32..4.0)).round() as u16;
    let shots_on_target = ((xg * 1.5 + rng.gen_range(0.0f32..2.0)).round() as u16).min(shots);
    let passes = (possession / 100.0 * 600.0 + rng.gen_range(0.0f32..100.0)).round() as u16;
    let pass_accuracy = 75.0 + rng.gen_range(0.0f32..15.0);
    let tackles = rng.gen_range(15..=22);
    let interceptions = rng.gen_range(5..=10);
    let fouls = rng.gen_range(8..=13);

    let count = |kind: MatchEventType| {
        events.iter().filter(|e| e.team == side && e.event_type == kind).count() as u8
    };

    MatchStatistics {
        team: side,
        possession,
        expected_goals: xg,
        shots,
        shots_on_target,
        passes,
        pass_accuracy,
        tackles,
        interceptions,
        fouls,
        cards: CardCount {
            yellow: count(MatchEventType::YellowCard),
            red: count(MatchEventType::RedCard),
        },
        injuries: count(MatchEventType::Injury),
    }
}

/// Simulate a match with the default balance.
pub fn simulate(setup: &MatchSetup, rng: &mut impl Rng) -> MatchResult {
    simulate_with_config(setup, &MatchConfig::default(), rng)
}

/// Simulate a match.
///
/// Precondition: both lineups are non-empty.
pub fn simulate_with_config(
    setup: &MatchSetup,
    config: &MatchConfig,
    rng: &mut impl Rng,
) -> MatchResult {
    let home_possession = home_possession(setup, config);
    let away_possession = 100.0 - home_possession;

    let home_xg = expected_goals(&setup.home.players, setup.home.formation.style, home_possession, config);
    let away_xg = expected_goals(&setup.away.players, setup.away.formation.style, away_possession, config);

    let home_score = score_from_xg(home_xg, config, rng);
    let away_score = score_from_xg(away_xg, config, rng);

    let mut events = Vec::new();
    goal_events(&setup.home, TeamSide::Home, home_score, rng, &mut events);
    goal_events(&setup.away, TeamSide::Away, away_score, rng, &mut events);

    let roster = Roster { home: &setup.home.players, away: &setup.away.players };
    discipline_events(&roster, config, rng, &mut events);

    // sort_by_key is stable
    events.sort_by_key(|e| e.minute);

    let (motm_side, motm) = roster.pick(rng);
    let man_of_the_match = ManOfTheMatch {
        player_id: motm.id,
        name: motm.name.clone(),
        team: motm_side,
        rating: rng.gen_range(7.5f32..=10.0),
    };

    let home_stats = team_statistics(TeamSide::Home, home_possession, home_xg, &events, rng);
    let away_stats = team_statistics(TeamSide::Away, away_possession, away_xg, &events, rng);

    log::debug!(
        "{} {}-{} {} (xG {:.2}-{:.2})",
        setup.home.club_name,
        home_score,
        away_score,
        setup.away.club_name,
        home_xg,
        away_xg
    );

    MatchResult {
        home_club_id: setup.home.club_id,
        away_club_id: setup.away.club_id,
        home_score,
        away_score,
        events,
        stats: TeamStats { home: home_stats, away: away_stats },
        man_of_the_match,
        duration: MatchDuration::FullTime,
    }
}

/// League points for (home, away).
pub fn points_awarded(home_score: u8, away_score: u8) -> (u32, u32) {
    match home_score.cmp(&away_score) {
        std::cmp::Ordering::Greater => (3, 0),
        std::cmp::Ordering::Less => (0, 3),
        std::cmp::Ordering::Equal => (1, 1),
    }
}

/// Team morale swing after a result, clamped to +-30.
///
/// Win +15, draw +5, loss -15; beating a side rated 5+ higher adds 10,
/// losing to one rated 5+ lower costs 15 more; a home win adds 5.
pub fn morale_impact(
    is_home: bool,
    own_score: u8,
    opponent_score: u8,
    own_rating: f32,
    opponent_rating: f32,
) -> i32 {
    let mut impact = match own_score.cmp(&opponent_score) {
        std::cmp::Ordering::Greater => 15,
        std::cmp::Ordering::Equal => 5,
        std::cmp::Ordering::Less => -15,
    };

    let rating_gap = own_rating - opponent_rating;
    if own_score > opponent_score && rating_gap < -5.0 {
        impact += 10;
    } else if own_score < opponent_score && rating_gap > 5.0 {
        impact -= 15;
    }

    if is_home && own_score > opponent_score {
        impact += 5;
    }

    impact.clamp(-30, 30)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationRecommendation {
    pub formation: Formation,
    pub rationale: String,
}

/// Random pick among the formations compatible with the play style.
///
/// Defensive play allows defensive or balanced shapes, attacking play
/// allows attacking or balanced ones, balanced allows all four candidates.
pub fn recommend_formation(
    _players: &[Player],
    play_style: FormationStyle,
    rng: &mut impl Rng,
) -> FormationRecommendation {
    let candidates = [
        (FormationCode::F433, "Balanced formation - versatile and reliable"),
        (FormationCode::F4231, "Defensive formation - solid protection"),
        (FormationCode::F352, "Wing-back formation - width and flexibility"),
        (FormationCode::F4141, "Advanced formation - creative midfield"),
    ];

    let allowed: Vec<(Formation, &str)> = candidates
        .iter()
        .map(|(code, why)| (Formation::preset(*code), *why))
        .filter(|(f, _)| match play_style {
            FormationStyle::Defensive => f.style != FormationStyle::Attacking,
            FormationStyle::Attacking => f.style != FormationStyle::Defensive,
            FormationStyle::Balanced => true,
        })
        .collect();

    let (formation, rationale) = allowed[rng.gen_range(0..allowed.len())];
    FormationRecommendation { formation, rationale: rationale.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::Position;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn lineup(base_id: u32, rating: f32, shooting: u8) -> Vec<LineupPlayer> {
        let positions = [
            Position::GK,
            Position::LB,
            Position::CB,
            Position::CB,
            Position::RB,
            Position::CM,
            Position::CDM,
            Position::CAM,
            Position::LW,
            Position::ST,
            Position::RW,
        ];
        positions
            .iter()
            .enumerate()
            .map(|(i, pos)| LineupPlayer {
                id: base_id + i as u32,
                name: format!("Player {}", base_id + i as u32),
                position: *pos,
                overall_rating: rating,
                shooting: Some(shooting),
            })
            .collect()
    }

    fn team(club_id: u32, rating: f32, style: FormationStyle) -> TeamSetup {
        TeamSetup {
            club_id,
            club_name: format!("Club {club_id}"),
            players: lineup(club_id * 100, rating, 70),
            formation: Formation::default().with_style(style),
            morale: 60.0,
        }
    }

    fn setup() -> MatchSetup {
        MatchSetup::new(team(1, 75.0, FormationStyle::Balanced), team(2, 72.0, FormationStyle::Balanced))
    }

    #[test]
    fn test_possession_uses_home_advantage_and_styles() {
        let cfg = MatchConfig::default();
        let neutral = MatchSetup::new(team(1, 70.0, FormationStyle::Balanced), team(2, 70.0, FormationStyle::Balanced)).neutral();
        assert!((home_possession(&neutral, &cfg) - 50.0).abs() < 1e-4);

        let home = MatchSetup::new(team(1, 70.0, FormationStyle::Balanced), team(2, 70.0, FormationStyle::Balanced));
        // 77 / 147
        assert!((home_possession(&home, &cfg) - 52.380_95).abs() < 1e-3);

        let skewed = MatchSetup::new(team(1, 70.0, FormationStyle::Attacking), team(2, 70.0, FormationStyle::Defensive)).neutral();
        assert!((home_possession(&skewed, &cfg) - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_possession_clamped() {
        let cfg = MatchConfig::default();
        let lopsided = MatchSetup::new(team(1, 99.0, FormationStyle::Attacking), team(2, 10.0, FormationStyle::Defensive));
        assert_eq!(home_possession(&lopsided, &cfg), 80.0);
        let reverse = MatchSetup::new(team(1, 10.0, FormationStyle::Defensive), team(2, 99.0, FormationStyle::Attacking)).neutral();
        assert_eq!(home_possession(&reverse, &cfg), 20.0);
    }

    #[test]
    fn test_expected_goals_formula() {
        let cfg = MatchConfig::default();
        let players = lineup(1, 70.0, 80);
        // 3 forwards * 0.8 * 0.3 + 3 midfielders * 0.8 * 0.1 = 0.96 at 50% possession
        assert!((expected_goals(&players, FormationStyle::Balanced, 50.0, &cfg) - 0.96).abs() < 1e-4);
        assert!((expected_goals(&players, FormationStyle::Attacking, 50.0, &cfg) - 1.25).abs() < 1e-4);
        assert!((expected_goals(&players, FormationStyle::Defensive, 50.0, &cfg) - 0.58).abs() < 1e-4);
        assert!((expected_goals(&players, FormationStyle::Balanced, 75.0, &cfg) - 1.44).abs() < 1e-4);
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let s = setup();
        let a = simulate(&s, &mut ChaCha8Rng::seed_from_u64(2024));
        let b = simulate(&s, &mut ChaCha8Rng::seed_from_u64(2024));
        assert_eq!(a, b);
        assert_eq!(serde_json::to_vec(&a).unwrap(), serde_json::to_vec(&b).unwrap());
    }

    #[test]
    fn test_result_invariants_over_many_seeds() {
        let s = setup();
        for seed in 0..200 {
            let r = simulate(&s, &mut ChaCha8Rng::seed_from_u64(seed));

            let home_goals = r.events.iter().filter(|e| e.event_type == MatchEventType::Goal && e.team == TeamSide::Home).count();
            let away_goals = r.events.iter().filter(|e| e.event_type == MatchEventType::Goal && e.team == TeamSide::Away).count();
            assert_eq!(home_goals, r.home_score as usize);
            assert_eq!(away_goals, r.away_score as usize);

            assert!(r.events.windows(2).all(|w| w[0].minute <= w[1].minute));
            for e in &r.events {
                match e.event_type {
                    MatchEventType::Goal | MatchEventType::Assist => assert!((15..=90).contains(&e.minute)),
                    _ => assert!(e.minute < 90),
                }
            }

            let yellows = r.stats.home.cards.yellow + r.stats.away.cards.yellow;
            assert!((2..=5).contains(&yellows));
            assert!(r.stats.home.cards.red + r.stats.away.cards.red <= 1);
            assert!(r.stats.home.injuries + r.stats.away.injuries <= 1);

            assert!((r.stats.home.possession + r.stats.away.possession - 100.0).abs() < 1e-3);
            assert!(r.stats.home.shots_on_target <= r.stats.home.shots);
            assert!((15..=22).contains(&r.stats.away.tackles));
            assert!((75.0..90.0).contains(&r.stats.home.pass_accuracy));
            assert!((7.5..=10.0).contains(&r.man_of_the_match.rating));
        }
    }

    #[test]
    fn test_assist_is_a_different_teammate() {
        let s = setup();
        for seed in 0..100 {
            let r = simulate(&s, &mut ChaCha8Rng::seed_from_u64(seed));
            let goals: Vec<&MatchEvent> = r.events.iter().filter(|e| e.event_type == MatchEventType::Goal).collect();
            let assists: Vec<&MatchEvent> = r.events.iter().filter(|e| e.event_type == MatchEventType::Assist).collect();
            assert_eq!(goals.len(), assists.len());
            for a in assists {
                assert!(goals.iter().any(|g| g.minute == a.minute && g.team == a.team && g.player_id != a.player_id));
            }
        }
    }

    #[test]
    fn test_single_player_lineup_has_no_assists() {
        let mut home = team(1, 80.0, FormationStyle::Attacking);
        home.players.truncate(1);
        let s = MatchSetup::new(home, team(2, 60.0, FormationStyle::Balanced));
        for seed in 0..50 {
            let r = simulate(&s, &mut ChaCha8Rng::seed_from_u64(seed));
            assert!(r.events.iter().all(|e| !(e.event_type == MatchEventType::Assist && e.team == TeamSide::Home)));
        }
    }

    #[test]
    fn test_overlapping_lineups_allowed() {
        let home = team(1, 70.0, FormationStyle::Balanced);
        let away = TeamSetup { club_id: 2, ..home.clone() };
        let r = simulate(&MatchSetup::new(home, away), &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(r.away_club_id, 2);
    }

    #[test]
    fn test_points_awarded() {
        assert_eq!(points_awarded(2, 0), (3, 0));
        assert_eq!(points_awarded(1, 1), (1, 1));
        assert_eq!(points_awarded(0, 4), (0, 3));
    }

    #[test]
    fn test_morale_impact() {
        // home upset win: 15 + 10 + 5
        assert_eq!(morale_impact(true, 2, 1, 65.0, 75.0), 30);
        // surprising loss: -15 - 15
        assert_eq!(morale_impact(false, 0, 1, 80.0, 70.0), -30);
        assert_eq!(morale_impact(false, 1, 1, 70.0, 70.0), 5);
        assert_eq!(morale_impact(false, 1, 0, 70.0, 70.0), 15);
    }

    #[test]
    fn test_recommend_formation_respects_style() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..30 {
            let rec = recommend_formation(&[], FormationStyle::Defensive, &mut rng);
            assert_ne!(rec.formation.style, FormationStyle::Attacking);
            let rec = recommend_formation(&[], FormationStyle::Attacking, &mut rng);
            assert_ne!(rec.formation.style, FormationStyle::Defensive);
            assert!(!rec.rationale.is_empty());
        }
    }
}
