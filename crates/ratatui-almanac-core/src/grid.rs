//! Month-grid construction: the fixed 6×7 block of dates behind a rendered
//! calendar month, including the leading/trailing days of adjacent months.

use crate::date;
use chrono::NaiveDate;
use std::fmt;

pub const GRID_ROWS: usize = 6;
pub const GRID_COLS: usize = 7;

/// Which weekday begins each grid row, as a Sunday-based offset `0..=6`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WeekStart(u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeekStartError(u8);

impl fmt::Display for WeekStartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week start offset {} is outside 0..=6", self.0)
    }
}

impl std::error::Error for WeekStartError {}

impl WeekStart {
    pub const SUNDAY: WeekStart = WeekStart(0);
    pub const MONDAY: WeekStart = WeekStart(1);
    pub const SATURDAY: WeekStart = WeekStart(6);

    pub fn new(offset: u8) -> Result<Self, WeekStartError> {
        if offset > 6 {
            return Err(WeekStartError(offset));
        }
        Ok(Self(offset))
    }

    /// Like [`WeekStart::new`] but saturates out-of-range offsets into `0..=6`
    /// instead of failing, so a bad value can never skew the grid shape.
    pub fn clamped(offset: u8) -> Self {
        if offset > 6 {
            log::warn!("week start offset {offset} outside 0..=6, clamping to 6");
            return Self(6);
        }
        Self(offset)
    }

    pub fn offset(self) -> u8 {
        self.0
    }

    /// Number of previous-month days padding the first row for a month whose
    /// 1st falls on `first_weekday` (Sunday-based). Zero when the 1st already
    /// sits on the week-start column or earlier in the cycle.
    pub fn leading_days(self, first_weekday: u32) -> u32 {
        let delta = first_weekday as i32 - self.0 as i32;
        delta.max(0) as u32
    }

    /// The Sunday-based weekday index shown in column `col`.
    pub fn weekday_at(self, col: usize) -> u32 {
        (self.0 as usize + col) as u32 % 7
    }
}

/// A 6×7 grid of consecutive dates covering one calendar month.
///
/// Invariants: exactly 42 cells, each exactly one day after the previous,
/// and every day of `(year, month)` is contained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    week_start: WeekStart,
    weeks: [[NaiveDate; GRID_COLS]; GRID_ROWS],
}

impl MonthGrid {
    pub fn build(year: i32, month: u32, week_start: WeekStart) -> Self {
        let first = date::first_day_of_month(year, month);
        let lead = week_start.leading_days(date::weekday_index(first));
        let start = date::sub_days(first, lead as i64);

        let mut weeks = [[start; GRID_COLS]; GRID_ROWS];
        for (i, slot) in weeks.iter_mut().flatten().enumerate() {
            *slot = date::add_days(start, i as i64);
        }

        Self {
            year,
            month,
            week_start,
            weeks,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn weeks(&self) -> &[[NaiveDate; GRID_COLS]; GRID_ROWS] {
        &self.weeks
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.weeks.iter().flatten().copied()
    }

    pub fn first(&self) -> NaiveDate {
        self.weeks[0][0]
    }

    pub fn last(&self) -> NaiveDate {
        self.weeks[GRID_ROWS - 1][GRID_COLS - 1]
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.position_of(date).is_some()
    }

    /// `(row, col)` of `date` in the grid, if the grid covers it.
    pub fn position_of(&self, date: NaiveDate) -> Option<(usize, usize)> {
        let idx = date::diff_days(self.first(), date);
        if (0..(GRID_ROWS * GRID_COLS) as i64).contains(&idx) {
            Some((idx as usize / GRID_COLS, idx as usize % GRID_COLS))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn grid_is_always_42_consecutive_days() {
        for year in [1999, 2023, 2024] {
            for month in 1..=12 {
                for offset in 0..=6 {
                    let grid = MonthGrid::build(year, month, WeekStart::new(offset).unwrap());
                    let days: Vec<_> = grid.days().collect();
                    assert_eq!(days.len(), 42);
                    for pair in days.windows(2) {
                        assert_eq!(crate::date::diff_days(pair[0], pair[1]), 1);
                    }
                }
            }
        }
    }

    #[test]
    fn grid_contains_the_entire_month() {
        for offset in 0..=6 {
            let grid = MonthGrid::build(2024, 2, WeekStart::new(offset).unwrap());
            for day in 1..=29 {
                assert!(grid.contains(d(2024, 2, day)), "offset {offset} day {day}");
            }
        }
    }

    #[test]
    fn leading_days_pad_only_when_first_weekday_is_past_week_start() {
        // June 2024 starts on a Saturday (index 6)
        let sunday_grid = MonthGrid::build(2024, 6, WeekStart::SUNDAY);
        assert_eq!(sunday_grid.first(), d(2024, 5, 26));

        // September 2024 starts on a Sunday; a Monday week start gets no padding
        let monday_grid = MonthGrid::build(2024, 9, WeekStart::MONDAY);
        assert_eq!(monday_grid.first(), d(2024, 9, 1));
    }

    #[test]
    fn position_of_maps_rows_and_columns() {
        let grid = MonthGrid::build(2024, 6, WeekStart::SUNDAY);
        assert_eq!(grid.position_of(d(2024, 5, 26)), Some((0, 0)));
        assert_eq!(grid.position_of(d(2024, 6, 1)), Some((0, 6)));
        assert_eq!(grid.position_of(d(2024, 6, 2)), Some((1, 0)));
        assert_eq!(grid.position_of(grid.last()), Some((5, 6)));
        assert_eq!(grid.position_of(d(2024, 5, 25)), None);
    }

    #[test]
    fn adjacent_month_cells_roll_over_year_boundaries() {
        let grid = MonthGrid::build(2024, 1, WeekStart::SUNDAY);
        // January 2024 starts on a Monday, so row 0 opens with Dec 31 2023
        assert_eq!(grid.first(), d(2023, 12, 31));
        assert_eq!(grid.last().month(), 2);

        let grid = MonthGrid::build(2024, 12, WeekStart::SUNDAY);
        assert_eq!(grid.last(), d(2025, 1, 11));
    }

    #[test]
    fn week_start_rejects_or_clamps_out_of_range_offsets() {
        assert!(WeekStart::new(7).is_err());
        assert_eq!(WeekStart::clamped(9), WeekStart::SATURDAY);
        assert_eq!(WeekStart::clamped(3).offset(), 3);
        assert_eq!(WeekStart::MONDAY.weekday_at(6), 0);
        assert_eq!(WeekStart::SUNDAY.leading_days(0), 0);
        assert_eq!(WeekStart::MONDAY.leading_days(0), 0);
        assert_eq!(WeekStart::SUNDAY.leading_days(6), 6);
    }
}
