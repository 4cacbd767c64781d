//! League table computed from finished match results.
//!
//! Nothing here is stored: every call folds the finished matches into
//! per-team counters. Teams without a finished match still get a zeroed row.

use std::collections::HashMap;

use crate::models::{FinishedMatch, Standing, Team};

pub const POINTS_PER_WIN: i64 = 3;

/// Build the table for `teams` from `matches`.
///
/// Output is ordered by points descending. The sort is stable, so teams on
/// equal points keep the order they were passed in.
pub fn compute_standings(teams: &[Team], matches: &[FinishedMatch]) -> Vec<Standing> {
    let mut table: Vec<Standing> = teams
        .iter()
        .map(|team| Standing {
            id: team.id,
            name: team.name.clone(),
            games: 0,
            wins: 0,
            losses: 0,
            points: 0,
            goals_for: 0,
            goals_against: 0,
        })
        .collect();

    let index: HashMap<i64, usize> = table
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id, i))
        .collect();

    for m in matches {
        if let Some(&i) = index.get(&m.home_team_id) {
            record(&mut table[i], m.home_score, m.away_score);
        }
        // A team on both sides of one match is credited once, as home.
        if m.away_team_id == m.home_team_id {
            continue;
        }
        if let Some(&i) = index.get(&m.away_team_id) {
            record(&mut table[i], m.away_score, m.home_score);
        }
    }

    for row in &mut table {
        row.points = POINTS_PER_WIN * row.wins;
    }

    table.sort_by(|a, b| b.points.cmp(&a.points));
    table
}

/// Credit one finished game to a team. A missing score adds no goals and
/// decides nothing; a draw counts as neither win nor loss.
fn record(row: &mut Standing, own: Option<i64>, opponent: Option<i64>) {
    row.games += 1;
    row.goals_for += own.unwrap_or(0);
    row.goals_against += opponent.unwrap_or(0);

    if let (Some(own), Some(opponent)) = (own, opponent) {
        if own > opponent {
            row.wins += 1;
        } else if own < opponent {
            row.losses += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: i64, name: &str) -> Team {
        Team { id, name: name.to_string() }
    }

    fn game(home: i64, away: i64, home_score: i64, away_score: i64) -> FinishedMatch {
        FinishedMatch {
            home_team_id: home,
            away_team_id: away,
            home_score: Some(home_score),
            away_score: Some(away_score),
        }
    }

    #[test]
    fn teams_without_games_are_zeroed() {
        let table = compute_standings(&[team(1, "Falcons"), team(2, "Bears")], &[]);
        assert_eq!(table.len(), 2);
        for row in &table {
            assert_eq!(
                (row.games, row.wins, row.losses, row.goals_for, row.goals_against, row.points),
                (0, 0, 0, 0, 0, 0)
            );
        }
    }

    #[test]
    fn win_and_loss_are_credited_to_opposite_sides() {
        let table = compute_standings(&[team(1, "Falcons"), team(2, "Bears")], &[game(1, 2, 3, 1)]);

        let falcons = &table[0];
        assert_eq!(falcons.name, "Falcons");
        assert_eq!((falcons.games, falcons.wins, falcons.losses), (1, 1, 0));
        assert_eq!((falcons.goals_for, falcons.goals_against, falcons.points), (3, 1, 3));

        let bears = &table[1];
        assert_eq!((bears.games, bears.wins, bears.losses), (1, 0, 1));
        assert_eq!((bears.goals_for, bears.goals_against, bears.points), (1, 3, 0));
    }

    #[test]
    fn draw_credits_neither_side() {
        let table = compute_standings(&[team(1, "Falcons"), team(2, "Bears")], &[game(1, 2, 2, 2)]);
        for row in &table {
            assert_eq!((row.games, row.wins, row.losses, row.points), (1, 0, 0, 0));
            assert_eq!((row.goals_for, row.goals_against), (2, 2));
        }
    }

    #[test]
    fn missing_score_counts_a_game_without_a_result() {
        let unscored = FinishedMatch {
            home_team_id: 1,
            away_team_id: 2,
            home_score: Some(4),
            away_score: None,
        };
        let table = compute_standings(&[team(1, "Falcons"), team(2, "Bears")], &[unscored]);
        let falcons = table.iter().find(|s| s.id == 1).unwrap();
        assert_eq!((falcons.games, falcons.wins, falcons.goals_for, falcons.goals_against), (1, 0, 4, 0));
    }

    #[test]
    fn team_on_both_sides_is_credited_once() {
        let table = compute_standings(&[team(1, "Falcons")], &[game(1, 1, 3, 1)]);
        let falcons = &table[0];
        assert_eq!((falcons.games, falcons.wins, falcons.losses), (1, 1, 0));
        assert_eq!((falcons.goals_for, falcons.goals_against, falcons.points), (3, 1, 3));
    }

    #[test]
    fn ordered_by_points_with_stable_ties() {
        let teams = [team(1, "A"), team(2, "B"), team(3, "C"), team(4, "D")];
        let games = [game(3, 1, 5, 0), game(4, 2, 1, 0), game(3, 4, 2, 1)];
        let table = compute_standings(&teams, &games);

        let ids: Vec<i64> = table.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 4, 1, 2]);
    }

    #[test]
    fn points_always_three_per_win() {
        let teams = [team(1, "A"), team(2, "B"), team(3, "C")];
        let games = [
            game(1, 2, 3, 1),
            game(2, 3, 0, 0),
            game(3, 1, 4, 2),
            game(1, 3, 1, 1),
            game(2, 1, 6, 5),
        ];
        let table = compute_standings(&teams, &games);

        for row in &table {
            assert_eq!(row.points, 3 * row.wins);
            assert!(row.wins + row.losses <= row.games);
        }
        let total_wins: i64 = table.iter().map(|s| s.wins).sum();
        let total_losses: i64 = table.iter().map(|s| s.losses).sum();
        assert_eq!(total_wins, total_losses);
    }
}
