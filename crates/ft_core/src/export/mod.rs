//! Playing-time table export and clock formatting.
//!
//! Pure reads over the roster and configuration: build `[name, total,
//! period1..periodN]` rows with `mm:ss` cells, or stream them through a CSV
//! writer. Nothing here mutates engine state.

use std::io::Write;

use thiserror::Error;

use crate::models::{AccrualTable, GameFormat};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Render a duration as `mm:ss`, floor-truncated to whole seconds and
/// zero-padded to two digits each.
pub fn format_clock_ms(ms: u64) -> String {
    let total_seconds = ms / 1000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Column headers: player, total, then one label per period.
pub fn header_row(format: GameFormat) -> Vec<String> {
    let mut row = vec!["Player".to_string(), "Total".to_string()];
    for index in 0..format.period_count() {
        row.push(format.period_label(index));
    }
    row
}

/// One row per player: `[name, total, period1..periodN]`.
pub fn player_rows(roster: &AccrualTable) -> Vec<Vec<String>> {
    roster
        .players()
        .iter()
        .map(|player| {
            let mut row = vec![player.name().to_string(), format_clock_ms(player.total_ms())];
            row.extend(player.period_ms().iter().map(|&ms| format_clock_ms(ms)));
            row
        })
        .collect()
}

/// Write the header and player rows as CSV.
pub fn write_csv<W: Write>(
    writer: W,
    format: GameFormat,
    roster: &AccrualTable,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(header_row(format))?;
    for row in player_rows(roster) {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock_pads_and_truncates() {
        assert_eq!(format_clock_ms(0), "00:00");
        assert_eq!(format_clock_ms(999), "00:00"); // floor, not round
        assert_eq!(format_clock_ms(61_000), "01:01");
        assert_eq!(format_clock_ms(480_000), "08:00");
        assert_eq!(format_clock_ms(960_000), "16:00");
    }

    #[test]
    fn test_header_matches_format() {
        assert_eq!(header_row(GameFormat::Quarters), vec![
            "Player", "Total", "Q1", "Q2", "Q3", "Q4"
        ]);
        assert_eq!(header_row(GameFormat::Halves), vec!["Player", "Total", "H1", "H2"]);
    }

    #[test]
    fn test_player_rows_carry_per_period_clocks() {
        let mut roster = AccrualTable::with_shape(2, 4, 2);
        roster.rename(0, "Alex");
        roster.force_accrual(0, vec![480_000, 120_000, 0, 0]);

        let rows = player_rows(&roster);
        assert_eq!(rows[0], vec!["Alex", "10:00", "08:00", "02:00", "00:00", "00:00"]);
        assert_eq!(rows[1][1], "00:00");
    }

    #[test]
    fn test_csv_output_shape() {
        let mut roster = AccrualTable::with_shape(2, 2, 2);
        roster.rename(0, "Alex");
        roster.rename(1, "Bo");

        let mut buffer = Vec::new();
        write_csv(&mut buffer, GameFormat::Halves, &roster).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Player,Total,H1,H2");
        assert_eq!(lines[1], "Alex,00:00,00:00,00:00");
        assert_eq!(lines[2], "Bo,00:00,00:00,00:00");
    }
}
