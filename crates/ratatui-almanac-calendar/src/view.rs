use crate::bindings::CalendarBindings;
use crate::bindings::CalendarNav;
use crate::compose;
use crate::compose::ComposeContext;
use crate::compose::DayCell;
use crate::compose::MonthPlan;
use chrono::Datelike;
use chrono::NaiveDate;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui_almanac_core::date;
use ratatui_almanac_core::grid::GRID_COLS;
use ratatui_almanac_core::grid::GRID_ROWS;
use ratatui_almanac_core::grid::MonthGrid;
use ratatui_almanac_core::grid::WeekStart;
use ratatui_almanac_core::input::InputEvent;
use ratatui_almanac_core::input::KeyEvent;
use ratatui_almanac_core::input::MouseButton;
use ratatui_almanac_core::input::MouseEvent;
use ratatui_almanac_core::input::MouseEventKind;
use ratatui_almanac_core::render;
use ratatui_almanac_core::theme::Theme;

const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalendarAction {
    None,
    Redraw,
    Selected(NaiveDate),
    MonthChanged { year: i32, month: u32 },
}

/// Options for [`CalendarView`].
///
/// Style fields left at `Style::default()` pick up the matching [`Theme`]
/// token at render time.
#[derive(Clone, Debug)]
pub struct CalendarViewOptions {
    pub week_start: WeekStart,
    pub show_weekday_header: bool,
    pub show_week_numbers: bool,
    pub highlight_today: bool,
    pub highlight_row: bool,
    pub disable_today_ago: bool,
    /// Replaces the day number on today's cell, e.g. `"now"`.
    pub today_text: Option<String>,
    pub cell_width: u16,
    pub style: Style,
    pub header_style: Style,
    pub week_number_style: Style,
    pub today_style: Style,
    pub selected_style: Style,
    pub cursor_style: Style,
    pub disabled_style: Style,
    pub outside_style: Style,
    pub row_highlight_style: Style,
}

impl Default for CalendarViewOptions {
    fn default() -> Self {
        Self {
            week_start: WeekStart::SUNDAY,
            show_weekday_header: true,
            show_week_numbers: false,
            highlight_today: false,
            highlight_row: false,
            disable_today_ago: false,
            today_text: None,
            cell_width: 4,
            style: Style::default(),
            header_style: Style::default().add_modifier(Modifier::BOLD),
            week_number_style: Style::default(),
            today_style: Style::default().add_modifier(Modifier::BOLD),
            selected_style: Style::default().add_modifier(Modifier::BOLD),
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            disabled_style: Style::default().add_modifier(Modifier::DIM),
            outside_style: Style::default(),
            row_highlight_style: Style::default().add_modifier(Modifier::BOLD),
        }
    }
}

/// Context passed to the `render_cell` callback in [`CalendarView::render_with`].
#[derive(Clone, Debug)]
pub struct CalendarCellContext {
    pub date: NaiveDate,
    pub row: usize,
    pub col: usize,
    pub week_number: u32,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_disabled: bool,
    pub is_outside_month: bool,
    pub is_cursor: bool,
    pub is_row_highlighted: bool,
}

#[derive(Clone, Copy, Debug)]
struct CellLayout {
    origin_x: u16,
    origin_y: u16,
    cell_w: u16,
}

#[derive(Clone, Copy)]
struct CellStyles {
    base: Style,
    today: Style,
    selected: Style,
    cursor: Style,
    disabled: Style,
    outside: Style,
    row_highlight: Style,
}

/// A month calendar with keyboard navigation and click selection.
///
/// The widget is UI-agnostic the way the rest of this library is: you drive
/// it from your app loop with `handle_event` and `render`, and selection is
/// reported back as [`CalendarAction::Selected`] rather than through a stored
/// callback. "Today" is plain data injected by the caller, never read from
/// the environment.
pub struct CalendarView {
    options: CalendarViewOptions,
    bindings: CalendarBindings,
    year: i32,
    month: u32,
    today: NaiveDate,
    cursor: NaiveDate,
    selected: Option<NaiveDate>,
    disabled: Option<Box<dyn Fn(NaiveDate) -> bool>>,
    date_formatter: Option<Box<dyn Fn(NaiveDate) -> String>>,
    layout: Option<CellLayout>,
}

impl CalendarView {
    pub fn new(today: NaiveDate) -> Self {
        Self::with_options(today, CalendarViewOptions::default())
    }

    pub fn with_options(today: NaiveDate, options: CalendarViewOptions) -> Self {
        Self {
            options,
            bindings: CalendarBindings::default(),
            year: today.year(),
            month: today.month(),
            today,
            cursor: today,
            selected: None,
            disabled: None,
            date_formatter: None,
            layout: None,
        }
    }

    pub fn options(&self) -> &CalendarViewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: CalendarViewOptions) {
        self.options = options;
    }

    pub fn set_bindings(&mut self, bindings: CalendarBindings) {
        self.bindings = bindings;
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Moves the visible month, normalizing out-of-range month indices by
    /// rolling and clamping the cursor's day into the target month.
    pub fn set_month(&mut self, year: i32, month: u32) {
        let first = date::ymd_rolled(year, month as i32, 1);
        self.year = first.year();
        self.month = first.month();
        let day = self.cursor.day().min(date::days_in_month(self.year, self.month));
        self.cursor = date::add_days(first, day as i64 - 1);
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn set_selected(&mut self, selected: Option<NaiveDate>) {
        self.selected = selected;
    }

    /// Installs the disabled-date predicate. It is consulted before the
    /// `disable_today_ago` cutoff and short-circuits it.
    pub fn set_disabled_dates(&mut self, disabled: Option<Box<dyn Fn(NaiveDate) -> bool>>) {
        self.disabled = disabled;
    }

    /// Installs a custom cell label formatter. `today_text` still wins on
    /// today's cell.
    pub fn set_date_formatter(&mut self, formatter: Option<Box<dyn Fn(NaiveDate) -> String>>) {
        self.date_formatter = formatter;
    }

    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        self.disabled.as_ref().is_some_and(|disabled| disabled(date))
            || (self.options.disable_today_ago && date < self.today)
    }

    /// Derives the current [`MonthPlan`] from the widget state.
    pub fn plan(&self) -> MonthPlan {
        let ctx = ComposeContext {
            today: self.today,
            selected: self.selected,
            highlight_today: self.options.highlight_today,
            highlight_row: self.options.highlight_row,
            disable_today_ago: self.options.disable_today_ago,
            disabled: self.disabled.as_deref(),
        };
        compose::compose_month(self.year, self.month, self.options.week_start, &ctx)
    }

    pub fn handle_event(&mut self, event: InputEvent) -> CalendarAction {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> CalendarAction {
        let Some(nav) = self.bindings.action_for(&key) else {
            return CalendarAction::None;
        };
        match nav {
            CalendarNav::PrevDay => self.move_cursor_days(-1),
            CalendarNav::NextDay => self.move_cursor_days(1),
            CalendarNav::PrevWeek => self.move_cursor_days(-7),
            CalendarNav::NextWeek => self.move_cursor_days(7),
            CalendarNav::PrevMonth => self.step_month(-1),
            CalendarNav::NextMonth => self.step_month(1),
            CalendarNav::MonthStart => {
                self.move_cursor_to(date::first_day_of_month(self.year, self.month))
            }
            CalendarNav::MonthEnd => {
                self.move_cursor_to(date::last_day_of_month(self.year, self.month))
            }
            CalendarNav::Today => self.move_cursor_to(self.today),
            CalendarNav::Select => self.select_cursor(),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> CalendarAction {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(date) = self.date_at(mouse.x, mouse.y) else {
                    return CalendarAction::None;
                };
                if self.is_disabled(date) {
                    return CalendarAction::None;
                }
                self.cursor = date;
                self.selected = Some(date);
                if !date::is_current_month(date, self.month) || date.year() != self.year {
                    self.year = date.year();
                    self.month = date.month();
                }
                CalendarAction::Selected(date)
            }
            MouseEventKind::ScrollUp => self.step_month(-1),
            MouseEventKind::ScrollDown => self.step_month(1),
            _ => CalendarAction::None,
        }
    }

    /// The date under screen position `(x, y)`, based on the last render.
    pub fn date_at(&self, x: u16, y: u16) -> Option<NaiveDate> {
        let layout = self.layout?;
        if x < layout.origin_x || y < layout.origin_y {
            return None;
        }
        let col = ((x - layout.origin_x) / layout.cell_w.max(1)) as usize;
        let row = (y - layout.origin_y) as usize;
        if row >= GRID_ROWS || col >= GRID_COLS {
            return None;
        }
        let grid = MonthGrid::build(self.year, self.month, self.options.week_start);
        Some(grid.weeks()[row][col])
    }

    fn move_cursor_days(&mut self, days: i64) -> CalendarAction {
        self.move_cursor_to(date::add_days(self.cursor, days))
    }

    fn move_cursor_to(&mut self, target: NaiveDate) -> CalendarAction {
        self.cursor = target;
        if target.year() == self.year && target.month() == self.month {
            CalendarAction::Redraw
        } else {
            self.year = target.year();
            self.month = target.month();
            CalendarAction::MonthChanged {
                year: self.year,
                month: self.month,
            }
        }
    }

    fn step_month(&mut self, months: i32) -> CalendarAction {
        let first = date::add_months(date::first_day_of_month(self.year, self.month), months);
        self.year = first.year();
        self.month = first.month();
        let day = self.cursor.day().min(date::days_in_month(self.year, self.month));
        self.cursor = date::add_days(first, day as i64 - 1);
        CalendarAction::MonthChanged {
            year: self.year,
            month: self.month,
        }
    }

    fn select_cursor(&mut self) -> CalendarAction {
        if self.is_disabled(self.cursor) {
            return CalendarAction::None;
        }
        self.selected = Some(self.cursor);
        CalendarAction::Selected(self.cursor)
    }

    /// Renders with the default cell painter: the day number right-aligned,
    /// or `today_text`/the custom formatter where configured.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.render_impl(area, buf, theme, None);
    }

    /// Renders the frame and delegates every cell to `render_cell`.
    pub fn render_with<F>(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme, mut render_cell: F)
    where
        F: FnMut(Rect, CalendarCellContext, &mut Buffer, &Theme),
    {
        self.render_impl(area, buf, theme, Some(&mut render_cell));
    }

    fn render_impl(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        mut painter: Option<&mut dyn FnMut(Rect, CalendarCellContext, &mut Buffer, &Theme)>,
    ) {
        self.layout = None;
        if area.width == 0 || area.height == 0 {
            return;
        }

        let styles = self.resolve_styles(theme);
        let header_style = self.options.header_style.patch(theme.accent);
        let week_number_style = if self.options.week_number_style == Style::default() {
            theme.text_muted
        } else {
            self.options.week_number_style
        };

        buf.set_style(area, styles.base);

        let cell_w = self.options.cell_width.max(2);
        let wn_w: u16 = if self.options.show_week_numbers { 3 } else { 0 };
        let header_h: u16 = if self.options.show_weekday_header { 1 } else { 0 };

        let plan = self.plan();

        if header_h > 0 {
            for col in 0..GRID_COLS {
                let Some((x, w)) = cell_span(area, wn_w, cell_w, col) else {
                    break;
                };
                let label = WEEKDAY_LABELS[self.options.week_start.weekday_at(col) as usize];
                render::render_str_right(x, area.y, w.saturating_sub(1), buf, label, header_style);
            }
        }

        let origin_y = area.y + header_h;
        self.layout = Some(CellLayout {
            origin_x: area.x + wn_w,
            origin_y,
            cell_w,
        });

        for (row, week) in plan.weeks.iter().enumerate() {
            let y = origin_y + row as u16;
            if y >= area.y + area.height {
                break;
            }
            if week.is_highlighted {
                render::fill_row(area, y, buf, styles.row_highlight);
            }
            if wn_w > 0 {
                render::render_str_right(
                    area.x,
                    y,
                    wn_w - 1,
                    buf,
                    &week.week_number.to_string(),
                    week_number_style,
                );
            }
            for (col, cell) in week.cells.iter().enumerate() {
                let Some((x, w)) = cell_span(area, wn_w, cell_w, col) else {
                    break;
                };
                let is_cursor = cell.date == self.cursor;
                let style = cell_style(cell, is_cursor, week.is_highlighted, &styles);
                let cell_area = Rect::new(x, y, w, 1);
                buf.set_style(cell_area, style);

                if let Some(render_cell) = &mut painter {
                    let ctx = CalendarCellContext {
                        date: cell.date,
                        row,
                        col,
                        week_number: week.week_number,
                        is_today: cell.is_today,
                        is_selected: cell.is_selected,
                        is_disabled: cell.is_disabled,
                        is_outside_month: cell.is_outside_month,
                        is_cursor,
                        is_row_highlighted: week.is_highlighted,
                    };
                    render_cell(cell_area, ctx, buf, theme);
                } else {
                    let label = self.cell_label(cell);
                    render::render_str_right(x, y, w.saturating_sub(1), buf, &label, style);
                }
            }
        }
    }

    fn resolve_styles(&self, theme: &Theme) -> CellStyles {
        let o = &self.options;
        CellStyles {
            base: if o.style == Style::default() {
                theme.text_primary
            } else {
                o.style
            },
            today: o.today_style.patch(theme.accent),
            selected: o.selected_style.patch(theme.accent),
            cursor: o.cursor_style.patch(theme.accent),
            disabled: o.disabled_style.patch(theme.text_muted),
            outside: o.outside_style.patch(theme.text_muted),
            row_highlight: o.row_highlight_style.patch(theme.accent),
        }
    }

    fn cell_label(&self, cell: &DayCell) -> String {
        if cell.is_today
            && let Some(text) = &self.options.today_text
        {
            return text.clone();
        }
        if let Some(formatter) = &self.date_formatter {
            return formatter(cell.date);
        }
        cell.date.day().to_string()
    }
}

fn cell_span(area: Rect, wn_w: u16, cell_w: u16, col: usize) -> Option<(u16, u16)> {
    let x = area.x + wn_w + col as u16 * cell_w;
    let right = area.x + area.width;
    if x >= right {
        return None;
    }
    Some((x, cell_w.min(right - x)))
}

fn cell_style(cell: &DayCell, is_cursor: bool, row_highlighted: bool, styles: &CellStyles) -> Style {
    let mut style = styles.base;
    if row_highlighted {
        style = style.patch(styles.row_highlight);
    }
    if cell.is_outside_month {
        style = style.patch(styles.outside);
    }
    if cell.is_disabled {
        style = style.patch(styles.disabled);
    }
    if cell.is_today {
        style = style.patch(styles.today);
    }
    if cell.is_selected {
        style = style.patch(styles.selected);
    }
    if is_cursor {
        style = style.patch(styles.cursor);
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui_almanac_core::input::KeyCode;
    use ratatui_almanac_core::input::KeyModifiers;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code))
    }

    fn buffer_row(buf: &Buffer, area: Rect, y: u16) -> String {
        (area.x..area.x + area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn renders_header_and_first_week() {
        let mut view = CalendarView::new(d(2024, 6, 15));
        let area = Rect::new(0, 0, 28, 7);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf, &Theme::default());

        assert_eq!(buffer_row(&buf, area, 0), " Su  Mo  Tu  We  Th  Fr  Sa ");
        // June 2024 starts on a Saturday; row 0 runs May 26 .. June 1
        assert_eq!(buffer_row(&buf, area, 1), " 26  27  28  29  30  31   1 ");
        assert_eq!(buffer_row(&buf, area, 2), "  2   3   4   5   6   7   8 ");
    }

    #[test]
    fn week_start_rotates_the_header() {
        let mut view = CalendarView::with_options(
            d(2024, 6, 15),
            CalendarViewOptions {
                week_start: WeekStart::MONDAY,
                ..Default::default()
            },
        );
        let area = Rect::new(0, 0, 28, 7);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf, &Theme::default());

        assert_eq!(buffer_row(&buf, area, 0), " Mo  Tu  We  Th  Fr  Sa  Su ");
        // Monday-started June 2024 pads 6 days back to May 27
        assert_eq!(buffer_row(&buf, area, 1), " 27  28  29  30  31   1   2 ");
    }

    #[test]
    fn week_number_column_renders_when_enabled() {
        let mut view = CalendarView::with_options(
            d(2024, 1, 15),
            CalendarViewOptions {
                show_week_numbers: true,
                ..Default::default()
            },
        );
        let area = Rect::new(0, 0, 31, 7);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf, &Theme::default());

        // row 0 of January 2024 is labeled by its Wednesday, Jan 3
        let expected = date::week_number(d(2024, 1, 3)).to_string();
        let row = buffer_row(&buf, area, 1);
        assert!(row.trim_start().starts_with(&expected), "row = {row:?}");
    }

    #[test]
    fn today_text_replaces_the_day_number() {
        let mut view = CalendarView::with_options(
            d(2024, 6, 1),
            CalendarViewOptions {
                today_text: Some("now".to_string()),
                ..Default::default()
            },
        );
        let area = Rect::new(0, 0, 28, 7);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf, &Theme::default());
        assert_eq!(buffer_row(&buf, area, 1), " 26  27  28  29  30  31 now ");
    }

    #[test]
    fn arrow_keys_move_the_cursor_and_cross_months() {
        let mut view = CalendarView::new(d(2024, 6, 15));
        assert_eq!(view.handle_event(key(KeyCode::Right)), CalendarAction::Redraw);
        assert_eq!(view.cursor(), d(2024, 6, 16));

        assert_eq!(view.handle_event(key(KeyCode::Up)), CalendarAction::Redraw);
        assert_eq!(view.cursor(), d(2024, 6, 9));

        view.move_cursor_to(d(2024, 6, 30));
        assert_eq!(
            view.handle_event(key(KeyCode::Down)),
            CalendarAction::MonthChanged {
                year: 2024,
                month: 7
            }
        );
        assert_eq!(view.cursor(), d(2024, 7, 7));
        assert_eq!(view.month(), 7);
    }

    #[test]
    fn month_paging_clamps_the_cursor_day() {
        let mut view = CalendarView::new(d(2024, 1, 31));
        assert_eq!(
            view.handle_event(key(KeyCode::PageDown)),
            CalendarAction::MonthChanged {
                year: 2024,
                month: 2
            }
        );
        assert_eq!(view.cursor(), d(2024, 2, 29));

        assert_eq!(
            view.handle_event(key(KeyCode::PageUp)),
            CalendarAction::MonthChanged {
                year: 2024,
                month: 1
            }
        );
        assert_eq!(view.cursor(), d(2024, 1, 29));
    }

    #[test]
    fn enter_selects_the_cursor_date() {
        let mut view = CalendarView::new(d(2024, 6, 15));
        assert_eq!(
            view.handle_event(key(KeyCode::Enter)),
            CalendarAction::Selected(d(2024, 6, 15))
        );
        assert_eq!(view.selected(), Some(d(2024, 6, 15)));
    }

    #[test]
    fn disabled_dates_cannot_be_selected() {
        let mut view = CalendarView::new(d(2024, 6, 15));
        view.set_disabled_dates(Some(Box::new(|date: NaiveDate| date.day() == 15)));
        assert_eq!(view.handle_event(key(KeyCode::Enter)), CalendarAction::None);
        assert_eq!(view.selected(), None);

        view.handle_event(key(KeyCode::Right));
        assert_eq!(
            view.handle_event(key(KeyCode::Enter)),
            CalendarAction::Selected(d(2024, 6, 16))
        );
    }

    #[test]
    fn disable_today_ago_blocks_past_dates() {
        let mut view = CalendarView::with_options(
            d(2024, 6, 15),
            CalendarViewOptions {
                disable_today_ago: true,
                ..Default::default()
            },
        );
        view.handle_event(key(KeyCode::Left));
        assert_eq!(view.cursor(), d(2024, 6, 14));
        assert_eq!(view.handle_event(key(KeyCode::Enter)), CalendarAction::None);
    }

    #[test]
    fn click_selects_the_cell_under_the_pointer() {
        let mut view = CalendarView::new(d(2024, 6, 15));
        let area = Rect::new(2, 1, 28, 7);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf, &Theme::default());

        // row 1 col 0 is June 2 (grid starts May 26, header takes one line)
        let click = InputEvent::Mouse(MouseEvent {
            x: 3,
            y: 3,
            kind: MouseEventKind::Down(MouseButton::Left),
            modifiers: KeyModifiers::none(),
        });
        assert_eq!(view.handle_event(click), CalendarAction::Selected(d(2024, 6, 2)));
        assert_eq!(view.cursor(), d(2024, 6, 2));
    }

    #[test]
    fn click_on_an_outside_cell_follows_it_into_its_month() {
        let mut view = CalendarView::new(d(2024, 6, 15));
        let area = Rect::new(0, 0, 28, 7);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf, &Theme::default());

        // row 0 col 0 is May 26
        let click = InputEvent::Mouse(MouseEvent {
            x: 1,
            y: 1,
            kind: MouseEventKind::Down(MouseButton::Left),
            modifiers: KeyModifiers::none(),
        });
        assert_eq!(view.handle_event(click), CalendarAction::Selected(d(2024, 5, 26)));
        assert_eq!(view.month(), 5);
    }

    #[test]
    fn render_with_delegates_every_cell() {
        let mut view = CalendarView::new(d(2024, 6, 15));
        let area = Rect::new(0, 0, 28, 7);
        let mut buf = Buffer::empty(area);
        let mut seen = 0usize;
        view.render_with(area, &mut buf, &Theme::default(), |_, ctx, _, _| {
            seen += 1;
            if ctx.date == d(2024, 6, 15) {
                assert!(ctx.is_today);
                assert!(ctx.is_cursor);
            }
        });
        assert_eq!(seen, 42);
    }
}
