//! Month-grid view model for the habit calendar.
//!
//! Produces week rows of day cells with per-day habit markers. This is
//! data for a presentation layer to render, not layout: weeks start on
//! Sunday and leading/trailing cells from adjacent months are flagged
//! `in_month = false`.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::ledger::{date_key, HabitKey, HabitLedger};

#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    pub date_key: String,
    /// Day-of-month number for display.
    pub day: u32,
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    /// Habits completed on this day, in fixed order.
    pub habits: Vec<HabitKey>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<DayCell>>,
}

/// Build the grid for one month. Returns None for an invalid year/month.
pub fn month_grid(
    year: i32,
    month: u32,
    ledger: &HabitLedger,
    selected_key: &str,
    today_key: &str,
) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let days_in_month = (next_month - first).num_days();
    let lead = first.weekday().num_days_from_sunday() as i64;
    let rows = (lead + days_in_month + 6) / 7;

    let mut cursor = first - Duration::days(lead);
    let mut weeks = Vec::with_capacity(rows as usize);
    for _ in 0..rows {
        let mut week = Vec::with_capacity(7);
        for _ in 0..7 {
            let key = date_key(cursor);
            week.push(DayCell {
                day: cursor.day(),
                in_month: cursor.month() == month && cursor.year() == year,
                is_today: key == today_key,
                is_selected: key == selected_key,
                habits: ledger.completed(&key),
                date_key: key,
            });
            cursor += Duration::days(1);
        }
        weeks.push(week);
    }

    Some(MonthGrid { year, month, weeks })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_covers_whole_month_in_full_weeks() {
        let ledger = HabitLedger::default();
        // May 2024 starts on a Wednesday and has 31 days: 5 rows.
        let grid = month_grid(2024, 5, &ledger, "", "").unwrap();
        assert_eq!(grid.weeks.len(), 5);
        assert!(grid.weeks.iter().all(|w| w.len() == 7));

        let in_month: usize = grid
            .weeks
            .iter()
            .flatten()
            .filter(|cell| cell.in_month)
            .count();
        assert_eq!(in_month, 31);
        // Leading cells belong to April.
        assert!(!grid.weeks[0][0].in_month);
        assert_eq!(grid.weeks[0][3].date_key, "2024-05-01");
    }

    #[test]
    fn markers_today_and_selection_land_on_their_cells() {
        let mut ledger = HabitLedger::default();
        ledger.record("2024-05-15", HabitKey::Estudo);
        let grid = month_grid(2024, 5, &ledger, "2024-05-15", "2024-05-20").unwrap();
        let cells: Vec<&DayCell> = grid.weeks.iter().flatten().collect();
        let fifteenth = cells.iter().find(|c| c.date_key == "2024-05-15").unwrap();
        assert!(fifteenth.is_selected);
        assert_eq!(fifteenth.habits, vec![HabitKey::Estudo]);
        let twentieth = cells.iter().find(|c| c.date_key == "2024-05-20").unwrap();
        assert!(twentieth.is_today);
        assert!(!twentieth.is_selected);
    }

    #[test]
    fn invalid_month_yields_none() {
        let ledger = HabitLedger::default();
        assert!(month_grid(2024, 13, &ledger, "", "").is_none());
    }

    #[test]
    fn december_wraps_into_next_year() {
        let ledger = HabitLedger::default();
        let grid = month_grid(2023, 12, &ledger, "", "").unwrap();
        let in_month: usize = grid
            .weeks
            .iter()
            .flatten()
            .filter(|cell| cell.in_month)
            .count();
        assert_eq!(in_month, 31);
    }
}
