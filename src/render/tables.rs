use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};

use crate::coordinator::ProfileView;
use crate::matches::{Cell, HeadToHead, MatchRow, TrendPoint};
use crate::ranking::{RankedPlayer, Tier};

const DATE_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r.is_finite() => format!("{:.0}", r),
        _ => "-".to_string(),
    }
}

pub fn format_probability(probability: Option<f64>) -> String {
    match probability {
        Some(p) => format!("{:.0}%", p * 100.0),
        None => "-".to_string(),
    }
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn tier_label(tier: Tier) -> ColoredString {
    match tier {
        Tier::Active => tier.as_str().green(),
        Tier::Inactive => tier.as_str().yellow(),
        Tier::New => tier.as_str().blue(),
    }
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|c| c.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

pub fn ranking_table(entries: &[RankedPlayer<'_>]) -> String {
    if entries.is_empty() {
        return "No players yet.\n".to_string();
    }

    let name_width = column_width("Name", entries.iter().map(|e| e.player.name.as_str()));
    let mut output = String::new();

    let header = format!(
        "{:>4}  {:<name_width$}  {:>4}  {:>6}  {:>5}  {:>6}  {}",
        "Rank", "Name", "Wins", "Losses", "Draws", "Rating", "Tier"
    );
    output.push_str(&format!("{}\n", header.bold()));

    for entry in entries {
        let player = entry.player;
        output.push_str(&format!(
            "{:>4}  {:<name_width$}  {:>4}  {:>6}  {:>5}  {:>6}  {}\n",
            entry.rank.to_string(),
            player.name,
            player.wins,
            player.losses,
            player.draws,
            format_rating(player.rating),
            tier_label(entry.tier)
        ));
    }

    output
}

pub fn match_table(rows: &[MatchRow<'_>]) -> String {
    if rows.is_empty() {
        return "No matches recorded.\n".to_string();
    }

    let winners: Vec<String> = rows
        .iter()
        .map(|r| format!("{} ({})", r.record.winner_label(), format_rating(r.record.winner_rating)))
        .collect();
    let losers: Vec<String> = rows
        .iter()
        .map(|r| format!("{} ({})", r.record.loser_label(), format_rating(r.record.loser_rating)))
        .collect();

    let winner_width = column_width("Winner", winners.iter().map(String::as_str));
    let loser_width = column_width("Loser", losers.iter().map(String::as_str));
    let show_ids = rows.iter().any(|r| r.deletable);

    let mut output = String::new();
    let mut header = format!(
        "{:<winner_width$}  {:<loser_width$}  {:>11}  {:<20}",
        "Winner", "Loser", "Probability", "Date"
    );
    if show_ids {
        header.push_str("  Id");
    }
    output.push_str(&format!("{}\n", header.trim_end().bold()));

    for ((row, winner), loser) in rows.iter().zip(&winners).zip(&losers) {
        let mut line = format!(
            "{:<winner_width$}  {:<loser_width$}  {:>11}  {:<20}",
            winner,
            loser,
            format_probability(row.record.probability),
            format_date(row.record.date)
        );
        if row.record.draw {
            line.push_str(" (draw)");
        }
        if row.deletable {
            line.push_str(&format!("  {}", row.record.id));
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

pub fn trend_lines(series: &[TrendPoint]) -> String {
    if series.is_empty() {
        return "No rating history yet.\n".to_string();
    }

    series
        .iter()
        .map(|point| format!("  {}  {}\n", format_date(point.date), format_rating(Some(point.rating))))
        .collect()
}

pub fn profile_page(view: &ProfileView<'_>) -> String {
    let player = view.player;
    let mut output = String::new();

    output.push_str(&format!("{}\n", player.name.bold()));
    output.push_str(&format!("Current Rating: {}\n", format_rating(player.rating)));
    output.push_str(&format!("Games played: {}\n", player.games_played()));
    output.push_str(&format!("Wins: {}\n", player.wins));
    output.push_str(&format!("Losses: {}\n", player.losses));
    output.push_str(&format!("Draws: {}\n", player.draws));
    if !player.active {
        output.push_str(&format!("{}\n", "Retired".yellow()));
    }

    output.push_str(&format!("\n{}\n", "Rating trend".bold()));
    output.push_str(&trend_lines(&view.trend));

    if let Some(summary) = view.summary {
        output.push_str(&format!(
            "  peak {}, lowest {}, change {:+.0}\n",
            format_rating(Some(summary.peak)),
            format_rating(Some(summary.lowest)),
            summary.net_change
        ));
    }

    output.push('\n');
    output.push_str(&match_table(&view.rows));
    output
}

fn format_cell(cell: Cell) -> String {
    match cell {
        Cell::Own => "X".to_string(),
        Cell::Score(s) if s.fract() == 0.0 => format!("{:.0}", s),
        Cell::Score(s) => format!("{:.1}", s),
    }
}

/// Row player's results against each column player
pub fn head_to_head_table(matrix: &HeadToHead<'_>) -> String {
    if matrix.is_empty() {
        return "No head-to-head results yet.\n".to_string();
    }

    let names: Vec<&str> = matrix.players.iter().map(|p| p.name.as_str()).collect();
    let name_width = column_width("", names.iter().copied());
    let cell_width = names.iter().map(|n| n.chars().count()).max().unwrap_or(1).max(3);

    let mut header = format!("{:<name_width$}", "");
    for name in &names {
        header.push_str(&format!("  {:>cell_width$}", name));
    }

    let mut output = format!("{}\n", header.bold());
    for (name, row) in names.iter().zip(&matrix.cells) {
        let mut line = format!("{:<name_width$}", name);
        for cell in row {
            line.push_str(&format!("  {:>cell_width$}", format_cell(*cell)));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

pub fn skipped_notice(kind: &str, skipped: usize) -> Option<String> {
    (skipped > 0).then(|| {
        format!("{} {} record(s) could not be read and were left out", skipped, kind)
            .yellow()
            .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Match, Player};
    use crate::matches::present;
    use crate::ranking::rank;
    use chrono::{Duration, TimeZone};

    fn player(id: &str, name: &str, rating: Option<f64>, games: u32) -> Player {
        Player {
            id: id.to_string(),
            name: name.to_string(),
            wins: games,
            losses: 0,
            draws: 1,
            rating,
            last_match_date: Some(Utc::now() - Duration::days(1)),
            active: true,
        }
    }

    fn sample_match() -> Match {
        Match {
            id: "m-17".to_string(),
            winner_id: "1".to_string(),
            winner_name: Some("Ann".to_string()),
            loser_id: "2".to_string(),
            loser_name: Some("Bob".to_string()),
            winner_rating: Some(1512.4),
            loser_rating: Some(1487.6),
            probability: Some(0.637),
            date: Utc.with_ymd_and_hms(2024, 1, 2, 18, 5, 9).unwrap(),
            draw: false,
        }
    }

    #[test]
    fn test_formatting_helpers() {
        assert_eq!(format_rating(Some(1499.6)), "1500");
        assert_eq!(format_rating(None), "-");
        assert_eq!(format_rating(Some(f64::NEG_INFINITY)), "-");
        assert_eq!(format_probability(Some(0.637)), "64%");
        assert_eq!(format_probability(None), "-");
        assert_eq!(
            format_date(Utc.with_ymd_and_hms(2024, 1, 2, 18, 5, 9).unwrap()),
            "02/01/2024, 18:05:09"
        );
    }

    #[test]
    fn test_ranking_table_rows() {
        let players = vec![player("1", "Ann", Some(1500.2), 5), player("2", "Bob", None, 0)];
        let table = ranking_table(&rank(&players, Utc::now()));

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].trim_start().starts_with("1  Ann"));
        assert!(lines[1].contains("1500"));
        assert!(lines[2].trim_start().starts_with("-  Bob"));
    }

    #[test]
    fn test_empty_tables() {
        assert_eq!(ranking_table(&[]), "No players yet.\n");
        assert_eq!(match_table(&[]), "No matches recorded.\n");
        assert_eq!(trend_lines(&[]), "No rating history yet.\n");
    }

    #[test]
    fn test_match_table_rows() {
        let matches = vec![sample_match()];

        let plain = match_table(&present(&matches, false));
        assert!(plain.contains("Ann (1512)"));
        assert!(plain.contains("Bob (1488)"));
        assert!(plain.contains("64%"));
        assert!(plain.contains("02/01/2024, 18:05:09"));
        assert!(!plain.contains("m-17"));

        let deletable = match_table(&present(&matches, true));
        assert!(deletable.lines().nth(1).unwrap().ends_with("m-17"));
    }

    #[test]
    fn test_head_to_head_table() {
        let players = vec![player("1", "Ann", None, 2), player("2", "Bob", None, 2)];
        let mut draw = sample_match();
        draw.draw = true;
        let matches = vec![sample_match(), sample_match(), draw];

        let table = head_to_head_table(&crate::matches::head_to_head(&matches, &players));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Ann    X  2.5");
        assert_eq!(lines[2], "Bob  0.5    X");
        assert_eq!(
            head_to_head_table(&crate::matches::head_to_head(&[], &players)),
            "No head-to-head results yet.\n"
        );
    }

    #[test]
    fn test_skipped_notice() {
        assert_eq!(skipped_notice("player", 0), None);
        assert!(skipped_notice("player", 2).unwrap().contains("2 player record(s)"));
    }
}
