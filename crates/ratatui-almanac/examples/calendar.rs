use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_almanac::calendar::view::CalendarAction;
use ratatui_almanac::calendar::view::CalendarView;
use ratatui_almanac::calendar::view::CalendarViewOptions;
use ratatui_almanac::clock::Clock;
use ratatui_almanac::clock::SystemClock;
use ratatui_almanac::crossterm_input;
use ratatui_almanac::date;
use ratatui_almanac::grid::WeekStart;
use ratatui_almanac::theme::Theme;
use ratatui_almanac::toast::lifecycle::ToastKind;
use ratatui_almanac::toast::lifecycle::ToastOptions;
use ratatui_almanac::toast::lifecycle::ToastStack;
use ratatui_almanac::toast::view::ToastStackView;
use std::io;
use std::time::Duration;
use std::time::Instant;

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();

    let mut calendar = CalendarView::with_options(
        SystemClock.today(),
        CalendarViewOptions {
            week_start: WeekStart::MONDAY,
            show_week_numbers: true,
            highlight_today: true,
            ..Default::default()
        },
    );
    let mut toasts = ToastStack::new();
    let toast_view = ToastStackView::new();

    let res = run(&mut terminal, &theme, &mut calendar, &mut toasts, &toast_view);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    calendar: &mut CalendarView,
    toasts: &mut ToastStack,
    toast_view: &ToastStackView,
) -> io::Result<()> {
    loop {
        toasts.tick(Instant::now());

        terminal.draw(|f| {
            let area = f.area();
            let title = format!(
                "CalendarView {} (hjkl/arrows, [ ] months, t today, Enter/click select, q quits)",
                date::format_date(date::first_day_of_month(calendar.year(), calendar.month()), "yyyy-MM")
            );
            let block = Block::default().title(title).borders(Borders::ALL);
            let inner = block.inner(area);
            f.render_widget(block, area);

            let buf = f.buffer_mut();
            let cal_w = inner.width.min(32);
            let cal_area = Rect::new(inner.x, inner.y, cal_w, inner.height.saturating_sub(1));
            calendar.render(cal_area, buf, theme);

            if inner.width > cal_w + 2 {
                let toast_area = Rect::new(
                    inner.x + cal_w + 2,
                    inner.y,
                    inner.width - cal_w - 2,
                    inner.height,
                );
                toast_view.render(toast_area, buf, theme, toasts);
            }

            let status_y = inner.y + inner.height.saturating_sub(1);
            let status = match calendar.selected() {
                Some(date) => format!("selected {}", date::format_date(date, "yyyy-MM-dd")),
                None => "nothing selected".to_string(),
            };
            buf.set_span(inner.x, status_y, &Span::styled(status, theme.text_muted), inner.width);
        })?;

        if crossterm::event::poll(Duration::from_millis(50))? {
            let ev = crossterm::event::read()?;
            if let crossterm::event::Event::Key(key) = &ev
                && matches!(key.code, crossterm::event::KeyCode::Char('q'))
            {
                return Ok(());
            }

            if let Some(ev) = crossterm_input::input_event_from_crossterm(ev) {
                match calendar.handle_event(ev) {
                    CalendarAction::Selected(date) => {
                        let message = format!(
                            "{}, week {}",
                            date::format_date(date, "yyyy-MM-dd"),
                            date::week_number(date)
                        );
                        toasts.open(
                            ToastOptions::new("Date selected", message)
                                .kind(ToastKind::Success)
                                .duration(Duration::from_millis(2500)),
                        );
                    }
                    CalendarAction::MonthChanged { .. }
                    | CalendarAction::Redraw
                    | CalendarAction::None => {}
                }
            }
        }
    }
}
