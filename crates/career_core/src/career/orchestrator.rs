//! Career state machine.
//!
//! Phases run `PreSeason -> InSeason -> SeasonEnd -> PreSeason`. Fallible
//! operations borrow the state and return a new one, so a rejected call
//! leaves the caller's state as it was.

use std::collections::HashSet;

use rand::Rng;

use crate::board::{BoardExpectation, Difficulty, ObjectiveType};
use crate::config::BalanceConfig;
use crate::engine::match_engine::simulate_with_config;
use crate::error::{CareerError, Result};
use crate::finance::{prize_money, season_budget, ClubFinances, MonthContext};
use crate::models::club::{Club, LeagueClub};
use crate::models::fixture::Fixture;
use crate::models::formation::{Formation, FormationCode};
use crate::models::match_result::{MatchEventType, MatchOutcome, MatchResult};
use crate::models::match_setup::{LineupPlayer, MatchSetup, TeamSetup, TeamSide};
use crate::models::player::{Player, Position, MIN_RATING};
use crate::models::season_stats::{BestPlayer, SeasonStats, TopScorer};
use crate::player::development::{advance_week, apply_match_outcome, develop_for_new_season};
use crate::season::{circle_schedule, initial_standings, update_standings};
use crate::staff::{
    apply_injury_recovery, coaching_effects, development_bonus, injury_prevention_chance,
    medical_effectiveness, total_staff_costs,
};

use super::state::{CareerGameState, RecentResult, SeasonPhase};
use super::transfers::{negotiate, IncomingBid, OfferStatus, TransferOffer, TransferTarget};
use super::youth::{generate_youth_intake, YouthAcademy};

/// Players joining from the academy at each season rollover, before the
/// facility bonus.
const BASE_YOUTH_INTAKE: usize = 2;

/// Outfield shape used for rating-only lineups.
const AI_LINEUP: [Position; 11] = [
    Position::GK,
    Position::LB,
    Position::CB,
    Position::CB,
    Position::RB,
    Position::CDM,
    Position::CM,
    Position::CM,
    Position::LW,
    Position::RW,
    Position::ST,
];

// ============================================================================
// Setup
// ============================================================================

pub fn initialize_career(
    club: Club,
    league_clubs: Vec<LeagueClub>,
    start_season: u16,
    difficulty: Difficulty,
) -> Result<CareerGameState> {
    initialize_career_with_config(club, league_clubs, start_season, difficulty, BalanceConfig::default())
}

/// Build a new career.
///
/// Youth-flagged players move to the academy. The managed club's league
/// entry is refreshed from its squad, or added when missing.
pub fn initialize_career_with_config(
    mut club: Club,
    mut league_clubs: Vec<LeagueClub>,
    start_season: u16,
    difficulty: Difficulty,
    config: BalanceConfig,
) -> Result<CareerGameState> {
    config.validate()?;

    let (youth, senior): (Vec<Player>, Vec<Player>) =
        std::mem::take(&mut club.players).into_iter().partition(|p| p.is_youth_player);
    if senior.is_empty() {
        return Err(CareerError::EmptySquad);
    }
    club.players = senior;

    let entry = club.league_entry();
    match league_clubs.iter_mut().find(|c| c.id == club.id) {
        Some(existing) => *existing = entry,
        None => league_clubs.insert(0, entry),
    }
    if league_clubs.len() < 2 {
        return Err(CareerError::InvalidParameter("a league needs at least two clubs".to_string()));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = league_clubs.iter().find(|c| !seen.insert(c.id)) {
        return Err(CareerError::InvalidParameter(format!("duplicate club id {}", dup.id)));
    }

    let fixtures = schedule_fixtures(&league_clubs);
    let season_matches = fixtures.iter().filter(|f| f.involves(club.id)).count() as u32;

    log::info!(
        "New career: {} in {} ({} clubs, {} matches, {} difficulty)",
        club.name,
        start_season,
        league_clubs.len(),
        season_matches,
        difficulty.as_str()
    );

    Ok(CareerGameState {
        current_season: start_season,
        current_matchday: 1,
        phase: SeasonPhase::PreSeason,
        standings: initial_standings(&league_clubs),
        fixtures,
        season_stats: SeasonStats::new(start_season),
        recent_results: Default::default(),
        season_goals: Default::default(),
        youth: YouthAcademy::new(youth, club.facilities.youth_academy),
        staff: Vec::new(),
        transfer_market: Vec::new(),
        transfer_offers: Vec::new(),
        finances: ClubFinances::new(&club),
        board: BoardExpectation::new(start_season, difficulty, 0, season_matches),
        difficulty,
        config,
        club,
        league_clubs,
    })
}

fn schedule_fixtures(clubs: &[LeagueClub]) -> Vec<Fixture> {
    circle_schedule(clubs).into_iter().flat_map(|week| week.fixtures).collect()
}

// ============================================================================
// Matches
// ============================================================================

/// Play one of the managed club's fixtures with the given lineups.
///
/// `setup.home` and `setup.away` must be the fixture's home and away clubs.
pub fn play_match(
    state: &CareerGameState,
    fixture_id: u32,
    setup: &MatchSetup,
    rng: &mut impl Rng,
) -> Result<(CareerGameState, MatchResult)> {
    let idx = state
        .fixtures
        .iter()
        .position(|f| f.id == fixture_id)
        .ok_or(CareerError::FixtureNotFound(fixture_id))?;
    let fixture = &state.fixtures[idx];
    if fixture.played {
        return Err(CareerError::FixtureAlreadyPlayed(fixture_id));
    }
    if !fixture.involves(state.club.id) {
        return Err(CareerError::ClubNotInFixture { fixture_id, club_id: state.club.id });
    }
    if setup.home.club_id != fixture.home_club_id || setup.away.club_id != fixture.away_club_id {
        return Err(CareerError::SetupMismatch {
            fixture_id,
            home: setup.home.club_id,
            away: setup.away.club_id,
            expected_home: fixture.home_club_id,
            expected_away: fixture.away_club_id,
        });
    }
    setup.validate()?;

    let side = if fixture.home_club_id == state.club.id { TeamSide::Home } else { TeamSide::Away };
    let (home_id, away_id) = (fixture.home_club_id, fixture.away_club_id);
    let matchday = fixture.matchday;
    let opponent = match side {
        TeamSide::Home => fixture.away_club_name.clone(),
        TeamSide::Away => fixture.home_club_name.clone(),
    };

    let mut next = state.clone();
    let result = simulate_with_config(setup, &next.config.match_sim, rng);

    next.standings = update_standings(&next.standings, home_id, away_id, result.home_score, result.away_score)?;
    {
        let fixture = &mut next.fixtures[idx];
        fixture.record_result(result.home_score, result.away_score);
        fixture.home_formation = Some(setup.home.formation.code);
        fixture.away_formation = Some(setup.away.formation.code);
    }

    let (goals_for, goals_against) = result.score_for(side);
    let outcome = result.outcome_for(side);

    develop_squad_after_match(&mut next, &result, side, outcome, rng);
    record_season_stats(&mut next, &result, side);

    let capacity = next.config.season.recent_results_len;
    next.push_recent(
        RecentResult {
            fixture_id,
            matchday,
            opponent: opponent.clone(),
            home: side == TeamSide::Home,
            goals_for,
            goals_against,
            outcome,
        },
        capacity,
    );
    next.season_stats.current_form =
        next.recent_results.iter().filter(|r| r.outcome == MatchOutcome::Win).count() as u32;

    update_in_season_objectives(&mut next)?;
    let season_matches = next.season_matches();
    next.board.refresh(&next.season_stats, season_matches);
    next.phase = SeasonPhase::InSeason;

    log::info!(
        "{} {}-{} {} (matchday {}, {:?})",
        next.club.name,
        goals_for,
        goals_against,
        opponent,
        matchday,
        outcome
    );
    Ok((next, result))
}

/// Form, morale and injuries for every squad player.
///
/// Medical staff scale the per-player injury roll. Injury events from the
/// engine on the managed side also sideline the player.
fn develop_squad_after_match(
    state: &mut CareerGameState,
    result: &MatchResult,
    side: TeamSide,
    outcome: MatchOutcome,
    rng: &mut impl Rng,
) {
    let medical = medical_effectiveness(&state.staff);
    let mut dev_config = state.config.development.clone();
    dev_config.injury_chance = injury_prevention_chance(dev_config.injury_chance, medical.prevention_rate);

    let own_events: Vec<_> = result.events.iter().filter(|e| e.team == side).cloned().collect();
    for player in state.club.players.iter_mut() {
        apply_match_outcome(player, &own_events, outcome, &dev_config, rng);
        let hurt_in_match = own_events
            .iter()
            .any(|e| e.player_id == player.id && e.event_type == MatchEventType::Injury);
        if hurt_in_match {
            let weeks = rng.gen_range(1..=dev_config.max_injury_weeks);
            player.injury_weeks = player.injury_weeks.max(weeks);
            log::debug!("{} injured in play, out {} week(s)", player.full_name(), player.injury_weeks);
        }
    }
}

fn record_season_stats(state: &mut CareerGameState, result: &MatchResult, side: TeamSide) {
    let (goals_for, goals_against) = result.score_for(side);
    state.season_stats.record(goals_for, goals_against);
    state.season_stats.league_position = state.league_position().unwrap_or(0);

    let squad_ids: HashSet<u32> = state.club.players.iter().map(|p| p.id).collect();
    for event in result.events.iter().filter(|e| e.team == side && e.event_type == MatchEventType::Goal) {
        if squad_ids.contains(&event.player_id) {
            *state.season_goals.entry(event.player_id).or_insert(0) += 1;
        }
    }
    if let Some((&player_id, &goals)) =
        state.season_goals.iter().max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
    {
        let name = state
            .club
            .players
            .iter()
            .find(|p| p.id == player_id)
            .map(|p| p.full_name())
            .unwrap_or_default();
        state.season_stats.top_scorer = TopScorer { player_id, name, goals };
    }

    let motm = &result.man_of_the_match;
    if motm.team == side && motm.rating > state.season_stats.best_player.rating {
        state.season_stats.best_player = BestPlayer { name: motm.name.clone(), rating: motm.rating };
    }
}

fn objective_id(board: &BoardExpectation, objective_type: ObjectiveType) -> Option<String> {
    board.objectives.iter().find(|o| o.objective_type == objective_type).map(|o| o.id.clone())
}

/// Squad players under 23 rated 80 or more.
fn developed_youngsters(players: &[Player]) -> u32 {
    players.iter().filter(|p| p.age < 23 && p.overall_rating >= 80.0).count() as u32
}

/// Objectives that move match by match. League position is only judged
/// at the end of the season.
fn update_in_season_objectives(state: &mut CareerGameState) -> Result<()> {
    if let Some(id) = objective_id(&state.board, ObjectiveType::PointsTarget) {
        state.board.update_progress(&id, state.season_stats.points_total)?;
    }
    if let Some(id) = objective_id(&state.board, ObjectiveType::PlayerDevelopment) {
        state.board.update_progress(&id, developed_youngsters(&state.club.players))?;
    }
    if let Some(id) = objective_id(&state.board, ObjectiveType::Financial) {
        if state.finances.available_funds >= 0.0 {
            let solvent = state.board.objective(&id).map_or(0, |o| o.current) + 1;
            state.board.update_progress(&id, solvent)?;
        }
    }
    Ok(())
}

/// Lineup ids for rating-only sides: the club id in the high bits, the
/// shirt slot in the low byte. Wraps for very large club ids.
fn ai_player_id(club_id: u32, slot: usize) -> u32 {
    club_id.wrapping_shl(8) | (slot as u32 & 0xff)
}

/// Rating-only lineup for a league club.
fn ai_team(club: &LeagueClub) -> TeamSetup {
    let players = AI_LINEUP
        .iter()
        .enumerate()
        .map(|(i, &position)| LineupPlayer {
            id: ai_player_id(club.id, i),
            name: format!("{} #{}", club.name, i + 1),
            position,
            overall_rating: club.overall_rating,
            shooting: None,
        })
        .collect();
    TeamSetup {
        club_id: club.id,
        club_name: club.name.clone(),
        players,
        formation: Formation::preset(FormationCode::F433),
        morale: 50.0,
    }
}

/// Play every unplayed fixture of `matchday` that does not involve the
/// managed club, so the table keeps pace.
pub fn simulate_other_fixtures(
    state: &CareerGameState,
    matchday: u32,
    rng: &mut impl Rng,
) -> Result<CareerGameState> {
    let mut next = state.clone();
    let club_id = next.club.id;

    for idx in 0..next.fixtures.len() {
        let fixture = &next.fixtures[idx];
        if fixture.matchday != matchday || fixture.played || fixture.involves(club_id) {
            continue;
        }
        let (home_id, away_id) = (fixture.home_club_id, fixture.away_club_id);
        let home = next
            .league_clubs
            .iter()
            .find(|c| c.id == home_id)
            .ok_or(CareerError::UnknownClub(home_id))?;
        let away = next
            .league_clubs
            .iter()
            .find(|c| c.id == away_id)
            .ok_or(CareerError::UnknownClub(away_id))?;

        let setup = MatchSetup::new(ai_team(home), ai_team(away));
        let result = simulate_with_config(&setup, &next.config.match_sim, rng);
        next.standings = update_standings(&next.standings, home_id, away_id, result.home_score, result.away_score)?;
        next.fixtures[idx].record_result(result.home_score, result.away_score);
        log::debug!("{} {}-{} {}", home.name, result.home_score, result.away_score, away.name);
    }

    next.season_stats.league_position = next.league_position().unwrap_or(0);
    Ok(next)
}

// ============================================================================
// Calendar
// ============================================================================

/// Weekly tick: injury recovery (medical staff speed it up), form decay,
/// and the monthly finance run every `matchdays_per_month` matchdays.
pub fn advance_matchday(mut state: CareerGameState) -> CareerGameState {
    let recovery_rate = medical_effectiveness(&state.staff).injury_recovery_rate;
    let decay = state.config.development.weekly_form_decay;
    for player in state.club.players.iter_mut() {
        player.injury_weeks = apply_injury_recovery(player.injury_weeks, recovery_rate);
        player.form = (player.form - decay).max(0.0);
    }
    for player in state.youth.players.iter_mut() {
        advance_week(player, &state.config.development);
    }

    let per_month = state.config.season.matchdays_per_month;
    if state.current_matchday % per_month == 0 {
        let ctx = MonthContext {
            league_position: state.league_position().unwrap_or(state.league_clubs.len() as u32),
            matches_this_month: per_month / 2,
            television_deal: state.config.season.television_deal,
            staff_salaries: total_staff_costs(&state.staff),
        };
        state.finances.recalculate(&state.club, &ctx);
    }

    state.current_matchday += 1;
    if state.is_season_complete() {
        state.phase = SeasonPhase::SeasonEnd;
    }
    state
}

/// Close the season and open the next one.
///
/// Players age and develop (plus the coaching bonus), expired contracts
/// either leave or extend, the budget rolls over, the academy takes an
/// intake, and fixtures, table, objectives and season stats start fresh.
pub fn end_season(mut state: CareerGameState, rng: &mut impl Rng) -> CareerGameState {
    let season = state.current_season;
    let final_position = state.league_position().unwrap_or(state.league_clubs.len() as u32);
    state.season_stats.league_position = final_position;

    if let Some(objective) =
        state.board.objectives.iter_mut().find(|o| o.objective_type == ObjectiveType::LeaguePosition)
    {
        objective.set_current(final_position);
    }
    let season_matches = state.season_matches();
    state.board.refresh(&state.season_stats, season_matches);
    let bonus = state.board.total_season_bonus();

    log::info!(
        "Season {} over: {} finished {} with {} points ({})",
        season,
        state.club.name,
        final_position,
        state.season_stats.points_total,
        state.board.job_status()
    );

    develop_squad_for_new_season(&mut state, rng);
    resolve_expired_contracts(&mut state, rng);

    let new_budget = season_budget(state.finances.total_budget, final_position, state.config.season.television_deal);
    state.finances.start_new_season(new_budget, prize_money(final_position));
    state.finances.available_funds += bonus;
    state.club.budget = new_budget;

    let next_season = season + 1;
    let intake_size = BASE_YOUTH_INTAKE + usize::from(state.youth.facilities / 2);
    let first_id = state.next_player_id();
    let intake = generate_youth_intake(state.youth.facilities, intake_size, first_id, next_season, rng);
    state.youth.players.extend(intake);

    let entry = state.club.league_entry();
    if let Some(existing) = state.league_clubs.iter_mut().find(|c| c.id == entry.id) {
        *existing = entry;
    }
    state.fixtures = schedule_fixtures(&state.league_clubs);
    state.standings = initial_standings(&state.league_clubs);
    let season_matches = state.season_matches();
    state.board = BoardExpectation::new(next_season, state.difficulty, final_position, season_matches);
    state.season_stats = SeasonStats::new(next_season);
    state.season_goals.clear();
    state.recent_results.clear();
    state.transfer_offers.retain(|o| o.is_open());
    state.current_season = next_season;
    state.current_matchday = 1;
    state.phase = SeasonPhase::PreSeason;
    state
}

fn develop_squad_for_new_season(state: &mut CareerGameState, rng: &mut impl Rng) {
    let effects = coaching_effects(&state.staff);
    for player in state.club.players.iter_mut() {
        develop_for_new_season(player, rng);
        let delta = development_bonus(player.position, &effects, player.age, player.potential).rating_delta();
        apply_rating_delta(player, delta);
    }

    let boost = state.youth.development_boost();
    for player in state.youth.players.iter_mut() {
        let gain = develop_for_new_season(player, rng);
        if gain > 0.0 {
            apply_rating_delta(player, gain * (boost - 1.0));
        }
    }
}

/// Gains stop at potential, losses at the rating floor.
fn apply_rating_delta(player: &mut Player, delta: f32) {
    if delta > 0.0 {
        let target = (player.overall_rating + delta).min(player.potential);
        player.overall_rating = target.max(player.overall_rating);
    } else if delta < 0.0 {
        let floor = MIN_RATING.min(player.overall_rating);
        player.overall_rating = (player.overall_rating + delta).max(floor);
    }
}

fn resolve_expired_contracts(state: &mut CareerGameState, rng: &mut impl Rng) {
    let season = state.current_season;
    let departure_chance = state.config.development.contract_departure_chance;
    let extension = state.config.development.contract_extension_years;

    let mut kept = Vec::with_capacity(state.club.players.len());
    for mut player in std::mem::take(&mut state.club.players) {
        if player.contract_end_year > season {
            kept.push(player);
        } else if rng.gen_bool(departure_chance) {
            log::info!("{} leaves {} on contract expiry", player.full_name(), state.club.name);
        } else {
            player.contract_end_year = season + extension;
            log::debug!("{} extends to {}", player.full_name(), player.contract_end_year);
            kept.push(player);
        }
    }
    state.club.players = kept;
}

// ============================================================================
// Transfers
// ============================================================================

/// Replace the market with `count` fresh listings.
pub fn refresh_transfer_market(mut state: CareerGameState, count: usize, rng: &mut impl Rng) -> CareerGameState {
    let first_id = state.next_player_id().max(10_000);
    state.transfer_market = super::transfers::generate_transfer_market(count, first_id, rng);
    state
}

/// Open a bid for a listed player. Returns the new offer's id.
pub fn submit_transfer_offer(
    state: &CareerGameState,
    target_id: u32,
    amount: f64,
) -> Result<(CareerGameState, u32)> {
    let target = find_listing(state, target_id)?;
    if amount <= 0.0 {
        return Err(CareerError::InvalidParameter(format!("offer must be positive, got {amount}")));
    }
    if amount > state.finances.available_funds {
        return Err(CareerError::InvalidParameter(format!(
            "offer {:.0} exceeds available funds {:.0}",
            amount, state.finances.available_funds
        )));
    }

    let mut next = state.clone();
    let id = next.next_offer_id();
    next.transfer_offers.push(TransferOffer::new(id, target, next.club.name.clone(), amount.round()));
    Ok((next, id))
}

/// One round of negotiation on an open offer.
pub fn negotiate_transfer(
    state: &CareerGameState,
    offer_id: u32,
    rng: &mut impl Rng,
) -> Result<(CareerGameState, OfferStatus)> {
    let idx = find_offer(state, offer_id)?;
    if !state.transfer_offers[idx].is_open() {
        return Err(CareerError::InvalidParameter(format!("offer {offer_id} is closed")));
    }
    let mut next = state.clone();
    let updated = negotiate(&next.transfer_offers[idx], rng);
    let status = updated.status;
    next.transfer_offers[idx] = updated;
    Ok((next, status))
}

/// Pay for an accepted offer and add the player to the squad.
pub fn complete_transfer(
    state: &CareerGameState,
    offer_id: u32,
    contract_years: u16,
) -> Result<CareerGameState> {
    let idx = find_offer(state, offer_id)?;
    let offer = &state.transfer_offers[idx];
    if offer.status != OfferStatus::Accepted {
        return Err(CareerError::InvalidParameter(format!("offer {offer_id} has not been accepted")));
    }
    if offer.offer_price > state.finances.available_funds {
        return Err(CareerError::InvalidParameter(format!(
            "fee {:.0} exceeds available funds {:.0}",
            offer.offer_price, state.finances.available_funds
        )));
    }
    let target = find_listing(state, offer.player_id)?;

    let mut next = state.clone();
    let mut player = target.to_player(next.current_season + contract_years.max(1));
    player.id = next.next_player_id();
    let fee = offer.offer_price;
    next.finances.available_funds -= fee;
    next.finances.debt_level = (-next.finances.available_funds).max(0.0);
    log::info!("{} signs {} for {:.0}", next.club.name, player.full_name(), fee);
    next.club.players.push(player);
    next.transfer_market.retain(|t| t.id != offer.player_id);
    next.transfer_offers.remove(idx);
    Ok(next)
}

/// Sell a squad player to the bidding club.
pub fn accept_incoming_bid(state: &CareerGameState, bid: &IncomingBid) -> Result<CareerGameState> {
    let idx = state
        .club
        .players
        .iter()
        .position(|p| p.id == bid.player_id)
        .ok_or_else(|| CareerError::InvalidParameter(format!("no squad player with id {}", bid.player_id)))?;
    if state.club.players.len() <= 1 {
        return Err(CareerError::EmptySquad);
    }

    let mut next = state.clone();
    let player = next.club.players.remove(idx);
    next.finances.available_funds += bid.bid_amount;
    next.finances.debt_level = (-next.finances.available_funds).max(0.0);
    next.season_goals.remove(&player.id);
    log::info!("{} sold {} for {:.0}", next.club.name, player.full_name(), bid.bid_amount);
    Ok(next)
}

fn find_listing(state: &CareerGameState, target_id: u32) -> Result<&TransferTarget> {
    state
        .transfer_market
        .iter()
        .find(|t| t.id == target_id)
        .ok_or_else(|| CareerError::InvalidParameter(format!("player {target_id} is not on the market")))
}

fn find_offer(state: &CareerGameState, offer_id: u32) -> Result<usize> {
    state
        .transfer_offers
        .iter()
        .position(|o| o.id == offer_id)
        .ok_or_else(|| CareerError::InvalidParameter(format!("no transfer offer with id {offer_id}")))
}

/// Lineup from the managed club's available players.
pub fn club_team_setup(state: &CareerGameState, formation: Formation) -> TeamSetup {
    TeamSetup::from_squad(state.club.id, state.club.name.clone(), &state.club.players, formation)
}

/// Match setup for one of the managed club's fixtures, the opponent
/// fielding a rating-only lineup.
pub fn fixture_setup(state: &CareerGameState, fixture_id: u32, formation: Formation) -> Result<MatchSetup> {
    let fixture = state.fixture(fixture_id).ok_or(CareerError::FixtureNotFound(fixture_id))?;
    if !fixture.involves(state.club.id) {
        return Err(CareerError::ClubNotInFixture { fixture_id, club_id: state.club.id });
    }
    let opponent_id = if fixture.home_club_id == state.club.id { fixture.away_club_id } else { fixture.home_club_id };
    let opponent = state
        .league_clubs
        .iter()
        .find(|c| c.id == opponent_id)
        .ok_or(CareerError::UnknownClub(opponent_id))?;

    let own = club_team_setup(state, formation);
    let setup = if fixture.home_club_id == state.club.id {
        MatchSetup::new(own, ai_team(opponent))
    } else {
        MatchSetup::new(ai_team(opponent), own)
    };
    Ok(setup.with_home_advantage(state.config.match_sim.home_field_advantage))
}
