use serde::{Deserialize, Serialize};

use crate::models::club::LeagueClub;
use crate::models::fixture::{Fixture, LeagueStanding};

use super::standings::initial_standings;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonWeek {
    /// 1-based
    pub week: u32,
    pub fixtures: Vec<Fixture>,
    #[serde(default)]
    pub completed: bool,
}

fn fixture(id: u32, matchday: u32, home: &LeagueClub, away: &LeagueClub) -> Fixture {
    Fixture {
        id,
        matchday,
        home_club_id: home.id,
        home_club_name: home.name.clone(),
        away_club_id: away.id,
        away_club_name: away.name.clone(),
        played: false,
        result: None,
        home_formation: None,
        away_formation: None,
    }
}

/// Double round-robin: every ordered pair once, `n(n-1)` fixtures with ids from 1.
///
/// Fixtures come out pair by pair (home leg then return leg) with matchday 0;
/// [`organize_by_week`] or [`circle_schedule`] assign the calendar.
pub fn generate_fixtures(clubs: &[LeagueClub]) -> Vec<Fixture> {
    let mut fixtures = Vec::with_capacity(clubs.len() * clubs.len().saturating_sub(1));
    let mut next_id = 1;

    for (i, home) in clubs.iter().enumerate() {
        for away in &clubs[i + 1..] {
            fixtures.push(fixture(next_id, 0, home, away));
            fixtures.push(fixture(next_id + 1, 0, away, home));
            next_id += 2;
        }
    }
    fixtures
}

/// Split fixtures into `weeks` contiguous chunks of `ceil(len / weeks)`.
///
/// Trailing weeks may be empty and a club may appear twice in one week.
/// Concatenating the weeks gives back the input order.
pub fn organize_by_week(fixtures: &[Fixture], weeks: u32) -> Vec<SeasonWeek> {
    if weeks == 0 {
        return Vec::new();
    }
    let per_week = fixtures.len().div_ceil(weeks as usize);

    (0..weeks as usize)
        .map(|w| {
            let start = (w * per_week).min(fixtures.len());
            let end = ((w + 1) * per_week).min(fixtures.len());
            SeasonWeek { week: w as u32 + 1, fixtures: fixtures[start..end].to_vec(), completed: false }
        })
        .collect()
}

/// Circle-method double round-robin.
///
/// Each club plays at most once per week across `2(n-1)` weeks (odd `n`
/// gets a bye slot, so `2n` weeks). The second half mirrors the first with
/// venues swapped. Fixture ids run from 1 in calendar order and each
/// fixture's `matchday` is its week.
pub fn circle_schedule(clubs: &[LeagueClub]) -> Vec<SeasonWeek> {
    if clubs.len() < 2 {
        return Vec::new();
    }

    let mut slots: Vec<Option<&LeagueClub>> = clubs.iter().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let n = slots.len();
    let rounds = n - 1;

    let mut first_half: Vec<Vec<(&LeagueClub, &LeagueClub)>> = Vec::with_capacity(rounds);
    for round in 0..rounds {
        let mut pairs = Vec::with_capacity(n / 2);
        for i in 0..n / 2 {
            if let (Some(a), Some(b)) = (slots[i], slots[n - 1 - i]) {
                // Alternate venues so nobody sits at home all of the first half
                if (round + i) % 2 == 0 {
                    pairs.push((a, b));
                } else {
                    pairs.push((b, a));
                }
            }
        }
        first_half.push(pairs);
        // Keep slot 0 fixed and rotate the rest clockwise
        slots[1..].rotate_right(1);
    }

    let mut weeks = Vec::with_capacity(rounds * 2);
    let mut next_id = 1;
    let mirrored = first_half.iter().map(|pairs| pairs.iter().map(|&(h, a)| (a, h)).collect::<Vec<_>>());
    let all_rounds: Vec<Vec<(&LeagueClub, &LeagueClub)>> = first_half.iter().cloned().chain(mirrored).collect();

    for (idx, pairs) in all_rounds.iter().enumerate() {
        let week = idx as u32 + 1;
        let fixtures = pairs
            .iter()
            .map(|(home, away)| {
                let f = fixture(next_id, week, home, away);
                next_id += 1;
                f
            })
            .collect();
        weeks.push(SeasonWeek { week, fixtures, completed: false });
    }
    weeks
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Season {
    pub year: u16,
    /// 1-based
    pub current_week: u32,
    pub total_weeks: u32,
    pub standings: Vec<LeagueStanding>,
    pub weeks: Vec<SeasonWeek>,
}

impl Season {
    /// Mark the current week completed and move on; stays put on the last week.
    pub fn advance_week(&mut self) {
        if self.current_week >= self.total_weeks {
            return;
        }
        if let Some(week) = self.weeks.get_mut(self.current_week as usize - 1) {
            week.completed = true;
        }
        self.current_week += 1;
    }

    pub fn is_finished(&self) -> bool {
        self.current_week >= self.total_weeks
            && self.weeks.last().map_or(true, |w| w.fixtures.iter().all(|f| f.played))
    }

    pub fn fixtures(&self) -> impl Iterator<Item = &Fixture> {
        self.weeks.iter().flat_map(|w| w.fixtures.iter())
    }
}

/// Fresh season for `clubs`: circle-method calendar and an all-zero table.
pub fn initialize_season(year: u16, clubs: &[LeagueClub]) -> Season {
    let weeks = circle_schedule(clubs);
    Season {
        year,
        current_week: 1,
        total_weeks: weeks.len() as u32,
        standings: initial_standings(clubs),
        weeks,
    }
}
