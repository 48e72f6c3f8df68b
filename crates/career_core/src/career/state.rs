use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::board::{BoardExpectation, Difficulty};
use crate::config::BalanceConfig;
use crate::finance::ClubFinances;
use crate::models::club::{Club, LeagueClub};
use crate::models::fixture::{Fixture, LeagueStanding};
use crate::models::match_result::MatchOutcome;
use crate::models::season_stats::SeasonStats;
use crate::staff::StaffMember;

use super::transfers::{TransferOffer, TransferTarget};
use super::youth::YouthAcademy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeasonPhase {
    #[default]
    PreSeason,
    InSeason,
    SeasonEnd,
}

impl SeasonPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonPhase::PreSeason => "pre_season",
            SeasonPhase::InSeason => "in_season",
            SeasonPhase::SeasonEnd => "season_end",
        }
    }
}

/// One of the managed club's recent matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentResult {
    pub fixture_id: u32,
    pub matchday: u32,
    pub opponent: String,
    pub home: bool,
    pub goals_for: u8,
    pub goals_against: u8,
    pub outcome: MatchOutcome,
}

/// Everything the career engine reads and writes.
///
/// The engine keeps nothing between calls: every operation takes this (or
/// a borrow of it) and hands back the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerGameState {
    pub current_season: u16,
    /// 1-based
    pub current_matchday: u32,
    pub phase: SeasonPhase,
    pub club: Club,
    /// Every league member, the managed club included
    pub league_clubs: Vec<LeagueClub>,
    pub fixtures: Vec<Fixture>,
    pub standings: Vec<LeagueStanding>,
    pub season_stats: SeasonStats,
    /// Newest last
    pub recent_results: VecDeque<RecentResult>,
    /// Season goals per squad player id
    #[serde(default)]
    pub season_goals: BTreeMap<u32, u32>,
    pub youth: YouthAcademy,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    #[serde(default)]
    pub transfer_market: Vec<TransferTarget>,
    #[serde(default)]
    pub transfer_offers: Vec<TransferOffer>,
    pub finances: ClubFinances,
    pub board: BoardExpectation,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub config: BalanceConfig,
}

impl CareerGameState {
    pub fn fixture(&self, fixture_id: u32) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.id == fixture_id)
    }

    /// The managed club's fixtures in calendar order.
    pub fn club_fixtures(&self) -> impl Iterator<Item = &Fixture> {
        let club_id = self.club.id;
        self.fixtures.iter().filter(move |f| f.involves(club_id))
    }

    /// First unplayed fixture of the managed club.
    pub fn next_fixture(&self) -> Option<&Fixture> {
        self.club_fixtures().find(|f| !f.played)
    }

    pub fn fixtures_for_matchday(&self, matchday: u32) -> impl Iterator<Item = &Fixture> {
        self.fixtures.iter().filter(move |f| f.matchday == matchday)
    }

    /// League matches the managed club plays this season.
    pub fn season_matches(&self) -> u32 {
        self.club_fixtures().count() as u32
    }

    pub fn total_matchdays(&self) -> u32 {
        self.fixtures.iter().map(|f| f.matchday).max().unwrap_or(0)
    }

    pub fn is_season_complete(&self) -> bool {
        self.club_fixtures().all(|f| f.played)
    }

    pub fn league_position(&self) -> Option<u32> {
        crate::season::position_of(&self.standings, self.club.id)
    }

    /// A fresh id above every player the club owns, academy included.
    pub fn next_player_id(&self) -> u32 {
        self.club
            .players
            .iter()
            .chain(self.youth.players.iter())
            .map(|p| p.id)
            .max()
            .map_or(1, |id| id + 1)
    }

    pub fn next_offer_id(&self) -> u32 {
        self.transfer_offers.iter().map(|o| o.id).max().map_or(1, |id| id + 1)
    }

    /// Push onto the recent-results ring, dropping the oldest past `capacity`.
    pub fn push_recent(&mut self, result: RecentResult, capacity: usize) {
        self.recent_results.push_back(result);
        while self.recent_results.len() > capacity {
            self.recent_results.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_names() {
        assert_eq!(SeasonPhase::default(), SeasonPhase::PreSeason);
        assert_eq!(SeasonPhase::SeasonEnd.as_str(), "season_end");
        assert_eq!(serde_json::to_string(&SeasonPhase::InSeason).unwrap(), "\"in_season\"");
    }
}
