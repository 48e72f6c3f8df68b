use std::cmp::Ordering;

use crate::error::{CareerError, Result};
use crate::models::club::LeagueClub;
use crate::models::fixture::LeagueStanding;

/// All-zero table in club order.
pub fn initial_standings(clubs: &[LeagueClub]) -> Vec<LeagueStanding> {
    clubs
        .iter()
        .enumerate()
        .map(|(i, c)| LeagueStanding::new(i as u32 + 1, c.id, c.name.clone()))
        .collect()
}

/// Points, then goal difference, then goals for, then lower club id.
fn table_order(a: &LeagueStanding, b: &LeagueStanding) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.club_id.cmp(&b.club_id))
}

/// Sort and reassign 1-based positions.
pub fn sort_standings(standings: &mut [LeagueStanding]) {
    standings.sort_by(table_order);
    for (i, row) in standings.iter_mut().enumerate() {
        row.position = i as u32 + 1;
    }
}

fn record(row: &mut LeagueStanding, scored: u8, conceded: u8) {
    row.played += 1;
    row.goals_for += u32::from(scored);
    row.goals_against += u32::from(conceded);
    match scored.cmp(&conceded) {
        Ordering::Greater => {
            row.won += 1;
            row.points += 3;
        }
        Ordering::Equal => {
            row.drawn += 1;
            row.points += 1;
        }
        Ordering::Less => row.lost += 1,
    }
}

/// Apply one result and return the re-sorted table.
///
/// Fails with [`CareerError::UnknownClub`] if either club has no row and
/// with [`CareerError::InvalidParameter`] if a club meets itself; the
/// input is left untouched in that case.
pub fn update_standings(
    standings: &[LeagueStanding],
    home_club_id: u32,
    away_club_id: u32,
    home_goals: u8,
    away_goals: u8,
) -> Result<Vec<LeagueStanding>> {
    if home_club_id == away_club_id {
        return Err(CareerError::InvalidParameter(format!("club {home_club_id} cannot play itself")));
    }
    let home_idx = standings
        .iter()
        .position(|s| s.club_id == home_club_id)
        .ok_or(CareerError::UnknownClub(home_club_id))?;
    let away_idx = standings
        .iter()
        .position(|s| s.club_id == away_club_id)
        .ok_or(CareerError::UnknownClub(away_club_id))?;

    let mut table = standings.to_vec();
    record(&mut table[home_idx], home_goals, away_goals);
    record(&mut table[away_idx], away_goals, home_goals);
    sort_standings(&mut table);
    Ok(table)
}

pub fn position_of(standings: &[LeagueStanding], club_id: u32) -> Option<u32> {
    standings.iter().find(|s| s.club_id == club_id).map(|s| s.position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clubs(n: u32) -> Vec<LeagueClub> {
        (1..=n).map(|id| LeagueClub::new(id, format!("Team {id}"), 70.0)).collect()
    }

    #[test]
    fn test_initial_standings() {
        let table = initial_standings(&clubs(4));
        assert_eq!(table.len(), 4);
        assert_eq!(table[2].position, 3);
        assert_eq!(table[2].club_id, 3);
        assert!(table.iter().all(|s| s.points == 0 && s.played == 0));
    }

    #[test]
    fn test_home_win_updates_both_rows() {
        let table = update_standings(&initial_standings(&clubs(4)), 3, 2, 2, 1).unwrap();
        let home = table.iter().find(|s| s.club_id == 3).unwrap();
        let away = table.iter().find(|s| s.club_id == 2).unwrap();

        assert_eq!((home.played, home.won, home.points, home.goals_for, home.goals_against), (1, 1, 3, 2, 1));
        assert_eq!((away.played, away.lost, away.points), (1, 1, 0));
        assert_eq!(home.position, 1);
        assert_eq!(position_of(&table, 2), Some(4));
    }

    #[test]
    fn test_club_cannot_play_itself() {
        let table = initial_standings(&clubs(3));
        assert!(matches!(update_standings(&table, 2, 2, 1, 0), Err(CareerError::InvalidParameter(_))));
    }

    #[test]
    fn test_draw_gives_one_point_each() {
        let table = update_standings(&initial_standings(&clubs(2)), 1, 2, 1, 1).unwrap();
        assert!(table.iter().all(|s| s.drawn == 1 && s.points == 1));
    }

    #[test]
    fn test_tie_breakers() {
        let mut table = initial_standings(&clubs(4));
        table = update_standings(&table, 1, 2, 3, 0).unwrap();
        table = update_standings(&table, 3, 4, 4, 1).unwrap();
        // Same points and goal difference, club 3 scored more
        assert_eq!(table[0].club_id, 3);
        assert_eq!(table[1].club_id, 1);
        // Both losers on -3, club 2 scored fewer so sits below club 4
        assert_eq!(table[2].club_id, 4);
        assert_eq!(table[3].club_id, 2);
        let positions: Vec<u32> = table.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_full_tie_falls_back_to_club_id() {
        let mut table = initial_standings(&clubs(4));
        table = update_standings(&table, 4, 3, 1, 1).unwrap();
        let ids: Vec<u32> = table.iter().map(|s| s.club_id).collect();
        assert_eq!(ids, vec![3, 4, 1, 2]);
    }

    #[test]
    fn test_unknown_club_rejected() {
        let table = initial_standings(&clubs(2));
        let err = update_standings(&table, 1, 99, 1, 0).unwrap_err();
        assert!(matches!(err, CareerError::UnknownClub(99)));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_disjoint_results_commute(
                scores in prop::collection::vec((0u8..6, 0u8..6), 5)
            ) {
                // Fixtures (1v2), (3v4), ... never share a club
                let table = initial_standings(&clubs(10));
                let results: Vec<(u32, u32, u8, u8)> = scores
                    .iter()
                    .enumerate()
                    .map(|(i, &(h, a))| (2 * i as u32 + 1, 2 * i as u32 + 2, h, a))
                    .collect();

                let mut forward = table.clone();
                for &(h, a, hg, ag) in &results {
                    forward = update_standings(&forward, h, a, hg, ag).unwrap();
                }
                let mut backward = table;
                for &(h, a, hg, ag) in results.iter().rev() {
                    backward = update_standings(&backward, h, a, hg, ag).unwrap();
                }
                prop_assert_eq!(forward, backward);
            }

            #[test]
            fn prop_points_total_matches_results(
                scores in prop::collection::vec((1u32..7, 1u32..7, 0u8..5, 0u8..5), 1..30)
            ) {
                let mut table = initial_standings(&clubs(6));
                let mut expected = 0;
                for &(h, a, hg, ag) in &scores {
                    if h == a {
                        continue;
                    }
                    expected += if hg == ag { 2 } else { 3 };
                    table = update_standings(&table, h, a, hg, ag).unwrap();
                }
                prop_assert_eq!(table.iter().map(|s| s.points).sum::<u32>(), expected);
            }
        }
    }
}
