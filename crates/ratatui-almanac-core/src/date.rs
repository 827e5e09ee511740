//! Pure calendar-date functions.
//!
//! Everything here operates on [`chrono::NaiveDate`] (or [`NaiveDateTime`]
//! for pattern formatting) and is total over chrono's supported year range.
//! Months are chrono's `1..=12`; weekday indices are Sunday-based `0..=6` to
//! match the week-start offsets the calendar widgets take.

use chrono::Datelike;
use chrono::Duration;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Timelike;

/// Sunday-based weekday index (`0` = Sunday .. `6` = Saturday).
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Builds a date from possibly out-of-range month/day parts by rolling the
/// excess into the neighboring month or year, never clamping.
///
/// Month `13` rolls into January of `year + 1`, month `0` into December of
/// `year - 1`. Day `0` is the last day of the previous month, day `32` of a
/// 31-day month is the 1st of the next. This mirrors how the rest of this
/// module does its arithmetic: `add_months` keeps the day-of-month and lets
/// it roll, so Jan 31 plus one month lands on Mar 2 (or Mar 3 in a common
/// year), not on Feb 28.
pub fn ymd_rolled(year: i32, month: i32, day: i64) -> NaiveDate {
    let rolled_year = year + (month - 1).div_euclid(12);
    let rolled_month = (month - 1).rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(rolled_year, rolled_month, 1)
        .expect("year outside chrono's supported range");
    first
        .checked_add_signed(Duration::days(day - 1))
        .expect("date outside chrono's supported range")
}

pub fn first_day_of_month(year: i32, month: u32) -> NaiveDate {
    ymd_rolled(year, month as i32, 1)
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    // day 0 of the next month
    ymd_rolled(year, month as i32 + 1, 0)
}

pub fn first_day_of_year(year: i32) -> NaiveDate {
    ymd_rolled(year, 1, 1)
}

pub fn last_day_of_year(year: i32) -> NaiveDate {
    ymd_rolled(year, 13, 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    last_day_of_month(year, month).day()
}

/// Week-of-year label: `ceil((days_since_jan1 + weekday_of_jan1 + 1) / 7)`.
///
/// This is an approximation of ISO week numbering that never reassigns a week
/// across the year boundary; the first partial week is always week 1 and the
/// count runs to 53 or 54. Kept as-is because the calendar widgets label rows
/// with it and consumers may rely on the numbering.
pub fn week_number(date: NaiveDate) -> u32 {
    let jan1 = first_day_of_year(date.year());
    let past = date.ordinal0() as i64;
    let shift = weekday_index(jan1) as i64;
    ((past + shift + 1 + 6) / 7) as u32
}

/// Normalizes a date to month granularity: the first day of its month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    first_day_of_month(date.year(), date.month())
}

/// Null-safe day equality: both `None` compare equal, one `None` does not.
pub fn same_day(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Null-safe year+month equality, ignoring the day.
pub fn same_month(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.year() == b.year() && a.month() == b.month(),
        _ => false,
    }
}

/// Whether `date` falls in a month before `month` (`1..=12`).
///
/// Compares month indices only and ignores the year, so a December date is
/// "next" relative to a January reference even across a year boundary.
/// Callers that need cross-year correctness must compare years themselves;
/// within one rendered month grid the combined previous-or-next test still
/// classifies every cell correctly.
pub fn is_previous_month(date: NaiveDate, month: u32) -> bool {
    date.month() < month
}

/// Month-index-only counterpart of [`is_previous_month`].
pub fn is_next_month(date: NaiveDate, month: u32) -> bool {
    date.month() > month
}

pub fn is_current_month(date: NaiveDate, month: u32) -> bool {
    date.month() == month
}

pub fn is_previous_year(date: NaiveDate, year: i32) -> bool {
    date.year() < year
}

pub fn is_next_year(date: NaiveDate, year: i32) -> bool {
    date.year() > year
}

pub fn is_current_year(date: NaiveDate, year: i32) -> bool {
    date.year() == year
}

/// The decade containing `year`, e.g. `2024` → `2020..=2029`.
pub fn decade(year: i32) -> std::ops::RangeInclusive<i32> {
    let start = year.div_euclid(10) * 10;
    start..=start + 9
}

/// The century containing `year`, e.g. `2024` → `2000..=2099`.
pub fn century(year: i32) -> std::ops::RangeInclusive<i32> {
    let start = year.div_euclid(100) * 100;
    start..=start + 99
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .expect("date outside chrono's supported range")
}

pub fn sub_days(date: NaiveDate, days: i64) -> NaiveDate {
    add_days(date, -days)
}

/// Month arithmetic with day rollover (see [`ymd_rolled`]).
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    ymd_rolled(date.year(), date.month() as i32 + months, date.day() as i64)
}

pub fn sub_months(date: NaiveDate, months: i32) -> NaiveDate {
    add_months(date, -months)
}

/// Signed day delta `b - a`.
pub fn diff_days(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}

/// Signed month delta `b - a`, scaled by 12 across years. Days are ignored.
pub fn diff_months(a: NaiveDate, b: NaiveDate) -> i32 {
    (b.year() - a.year()) * 12 + (b.month() as i32 - a.month() as i32)
}

/// Renders `date` through a pattern, with all time-of-day fields zero.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    format_parts(
        &FieldValues {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
            week: week_number(date),
        },
        pattern,
    )
}

/// Token-substitution date formatting.
///
/// Tokens: `y` year, `M` month, `d` day, `h` hour, `m` minute, `s` second,
/// `q` quarter, `S` millisecond, `w` week of year ([`week_number`]). A token
/// run of length 1 renders the bare value; a run of 2 or more renders the
/// value zero-padded (and truncated) to its last two digits. `y` runs render
/// the year truncated or zero-padded to the run length, counted from the
/// right, so `yy` gives `"24"` for 2024. Characters outside the token set
/// pass through literally; there is no escaping and no error case.
pub fn format_datetime(dt: NaiveDateTime, pattern: &str) -> String {
    format_parts(
        &FieldValues {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            millisecond: dt.nanosecond() / 1_000_000,
            week: week_number(dt.date()),
        },
        pattern,
    )
}

struct FieldValues {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: u32,
    week: u32,
}

fn format_parts(fields: &FieldValues, pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        match c {
            'y' => out.push_str(&year_token(fields.year, run)),
            'M' => out.push_str(&two_digit_token(fields.month, run)),
            'd' => out.push_str(&two_digit_token(fields.day, run)),
            'h' => out.push_str(&two_digit_token(fields.hour, run)),
            'm' => out.push_str(&two_digit_token(fields.minute, run)),
            's' => out.push_str(&two_digit_token(fields.second, run)),
            'q' => out.push_str(&two_digit_token((fields.month + 2) / 3, run)),
            'S' => out.push_str(&two_digit_token(fields.millisecond, run)),
            'w' => out.push_str(&two_digit_token(fields.week, run)),
            _ => {
                for _ in 0..run {
                    out.push(c);
                }
            }
        }
        i += run;
    }

    out
}

fn two_digit_token(value: u32, run: usize) -> String {
    if run == 1 {
        return value.to_string();
    }
    let padded = format!("{value:02}");
    padded[padded.len() - 2..].to_string()
}

fn year_token(year: i32, run: usize) -> String {
    let digits = year.to_string();
    if run >= digits.len() {
        format!("{:0>width$}", digits, width = run)
    } else {
        digits[digits.len() - run..].to_string()
    }
}
