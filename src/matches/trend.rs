use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Match, Player};
use crate::ranking::{Direction, sort_stable_by_key};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: DateTime<Utc>,
    pub rating: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub first: f64,
    pub latest: f64,
    pub peak: f64,
    pub lowest: f64,
    pub net_change: f64,
}

/// Chronological series of the player's rating snapshots, oldest first.
///
/// Participation is matched on player id. A match with no snapshot for the
/// player's side contributes no point.
pub fn trend(matches: &[Match], player: &Player) -> Vec<TrendPoint> {
    let mut played: Vec<&Match> = matches.iter().filter(|m| m.involves(&player.id)).collect();
    sort_stable_by_key(&mut played, Direction::Ascending, |m| m.date);

    played
        .into_iter()
        .filter_map(|m| {
            m.rating_snapshot_for(&player.id)
                .map(|rating| TrendPoint { date: m.date, rating })
        })
        .collect()
}

pub fn summarize(series: &[TrendPoint]) -> Option<TrendSummary> {
    let first = series.first()?.rating;
    let latest = series.last()?.rating;

    let (peak, lowest) = series.iter().fold((first, first), |(peak, lowest), point| {
        (peak.max(point.rating), lowest.min(point.rating))
    });

    Some(TrendSummary {
        first,
        latest,
        peak,
        lowest,
        net_change: latest - first,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn player(id: &str) -> Player {
        Player {
            id: id.to_string(),
            name: format!("Player {}", id),
            wins: 1,
            losses: 1,
            draws: 0,
            rating: Some(1500.0),
            last_match_date: None,
            active: true,
        }
    }

    fn game(id: &str, winner: &str, loser: &str, ratings: (Option<f64>, Option<f64>), day: u32) -> Match {
        Match {
            id: id.to_string(),
            winner_id: winner.to_string(),
            winner_name: None,
            loser_id: loser.to_string(),
            loser_name: None,
            winner_rating: ratings.0,
            loser_rating: ratings.1,
            probability: None,
            date: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            draw: false,
        }
    }

    #[test]
    fn test_reference_scenario() {
        let matches = vec![
            game("1", "1", "2", (Some(1500.0), Some(1490.0)), 2),
            game("2", "2", "1", (Some(1510.0), Some(1480.0)), 1),
        ];

        let series = trend(&matches, &player("1"));

        assert_eq!(
            series,
            vec![
                TrendPoint {
                    date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                    rating: 1480.0
                },
                TrendPoint {
                    date: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
                    rating: 1500.0
                },
            ]
        );
    }

    #[test]
    fn test_ignores_other_players_matches() {
        let matches = vec![
            game("1", "3", "4", (Some(1.0), Some(2.0)), 1),
            game("2", "4", "1", (Some(3.0), Some(4.0)), 2),
        ];

        let series = trend(&matches, &player("1"));
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].rating, 4.0);
    }

    #[test]
    fn test_side_selection_and_ordering() {
        let matches = vec![
            game("a", "1", "2", (Some(10.0), Some(20.0)), 5),
            game("b", "2", "1", (Some(30.0), Some(40.0)), 3),
            game("c", "1", "3", (Some(50.0), Some(60.0)), 4),
            game("d", "3", "1", (Some(70.0), Some(80.0)), 4),
        ];

        let series = trend(&matches, &player("1"));

        let ratings: Vec<f64> = series.iter().map(|p| p.rating).collect();
        assert_eq!(ratings, vec![40.0, 50.0, 80.0, 10.0]);
        assert!(series.windows(2).all(|w| w[0].date <= w[1].date));

        for point in &series {
            let source = matches
                .iter()
                .find(|m| m.date == point.date && m.rating_snapshot_for("1") == Some(point.rating))
                .unwrap();
            let expected = if source.is_winner("1") {
                source.winner_rating
            } else {
                source.loser_rating
            };
            assert_eq!(Some(point.rating), expected);
        }
    }

    #[test]
    fn test_missing_snapshot_is_skipped() {
        let matches = vec![
            game("1", "1", "2", (None, Some(1490.0)), 1),
            game("2", "2", "1", (Some(1510.0), Some(1480.0)), 2),
        ];

        let series = trend(&matches, &player("1"));
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].rating, 1480.0);
    }

    #[test]
    fn test_no_matches_is_empty_series() {
        let series = trend(&[], &player("1"));
        assert!(series.is_empty());
        assert_eq!(summarize(&series), None);
    }

    #[test]
    fn test_recomputed_each_call() {
        let matches = vec![game("1", "1", "2", (Some(1500.0), Some(1490.0)), 1)];
        assert_eq!(trend(&matches, &player("1")), trend(&matches, &player("1")));
    }

    #[test]
    fn test_summary() {
        let matches = vec![
            game("1", "1", "2", (Some(1500.0), None), 1),
            game("2", "1", "2", (Some(1560.0), None), 2),
            game("3", "2", "1", (None, Some(1440.0)), 3),
            game("4", "1", "2", (Some(1520.0), None), 4),
        ];

        let summary = summarize(&trend(&matches, &player("1"))).unwrap();

        assert_eq!(summary.first, 1500.0);
        assert_eq!(summary.latest, 1520.0);
        assert_eq!(summary.peak, 1560.0);
        assert_eq!(summary.lowest, 1440.0);
        assert_eq!(summary.net_change, 20.0);
    }
}
