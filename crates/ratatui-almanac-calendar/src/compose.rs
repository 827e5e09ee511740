//! Pure calendar-state composition.
//!
//! Everything a rendered month needs to know about a cell is derived here,
//! fresh on every call, from the grid dates plus the caller's context. Cells
//! carry no identity beyond their date; there is nothing to invalidate.

use chrono::NaiveDate;
use ratatui_almanac_core::date;
use ratatui_almanac_core::grid::GRID_COLS;
use ratatui_almanac_core::grid::GRID_ROWS;
use ratatui_almanac_core::grid::MonthGrid;
use ratatui_almanac_core::grid::WeekStart;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_disabled: bool,
    pub is_outside_month: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeekRow {
    pub cells: [DayCell; GRID_COLS],
    pub week_number: u32,
    pub is_highlighted: bool,
}

/// The fully derived state of one rendered month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthPlan {
    pub year: i32,
    pub month: u32,
    pub weeks: [WeekRow; GRID_ROWS],
}

/// Caller-supplied inputs for composition.
///
/// `disabled` is consulted before the `disable_today_ago` cutoff and
/// short-circuits it.
pub struct ComposeContext<'a> {
    pub today: NaiveDate,
    pub selected: Option<NaiveDate>,
    pub highlight_today: bool,
    pub highlight_row: bool,
    pub disable_today_ago: bool,
    pub disabled: Option<&'a dyn Fn(NaiveDate) -> bool>,
}

impl<'a> ComposeContext<'a> {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            selected: None,
            highlight_today: false,
            highlight_row: false,
            disable_today_ago: false,
            disabled: None,
        }
    }
}

pub fn compose_month(
    year: i32,
    month: u32,
    week_start: WeekStart,
    ctx: &ComposeContext<'_>,
) -> MonthPlan {
    compose_grid(&MonthGrid::build(year, month, week_start), ctx)
}

pub fn compose_grid(grid: &MonthGrid, ctx: &ComposeContext<'_>) -> MonthPlan {
    let weeks = grid.weeks().map(|dates| compose_week(&dates, grid.month(), ctx));
    MonthPlan {
        year: grid.year(),
        month: grid.month(),
        weeks,
    }
}

fn compose_week(dates: &[NaiveDate; GRID_COLS], month: u32, ctx: &ComposeContext<'_>) -> WeekRow {
    let cells = dates.map(|date| compose_cell(date, month, ctx));
    let is_highlighted = ctx.highlight_row
        && cells
            .iter()
            .any(|c| date::same_day(Some(c.date), ctx.selected));

    WeekRow {
        cells,
        week_number: date::week_number(row_label_date(dates)),
        is_highlighted,
    }
}

fn compose_cell(date: NaiveDate, month: u32, ctx: &ComposeContext<'_>) -> DayCell {
    let is_today = date == ctx.today;
    let is_selected = if ctx.selected.is_none() && ctx.highlight_today {
        is_today
    } else {
        date::same_day(Some(date), ctx.selected)
    };
    let is_disabled = ctx.disabled.is_some_and(|disabled| disabled(date))
        || (ctx.disable_today_ago && date < ctx.today);
    let is_outside_month =
        date::is_previous_month(date, month) || date::is_next_month(date, month);

    DayCell {
        date,
        is_today,
        is_selected,
        is_disabled,
        is_outside_month,
    }
}

/// The date whose week number labels a row: the row's Wednesday, so a row
/// spanning two months (or years) gets a stable label, falling back to the
/// first cell.
fn row_label_date(dates: &[NaiveDate; GRID_COLS]) -> NaiveDate {
    dates
        .iter()
        .copied()
        .find(|d| date::weekday_index(*d) == 3)
        .unwrap_or(dates[0])
}
