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
    crossterm::execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal);

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>) -> io::Result<()> {
    let theme = Theme::default();
    let mut stack = ToastStack::new();
    let view = ToastStackView::new();
    let mut opened = 0u32;

    loop {
        stack.tick(Instant::now());

        terminal.draw(|f| {
            let area = f.area();
            let block = Block::default()
                .title("ToastStack (i/s/w/e open a toast, p opens a sticky one, c closes the oldest, q quits)")
                .borders(Borders::ALL);
            let inner = block.inner(area);
            f.render_widget(block, area);

            let buf = f.buffer_mut();
            let toast_area = Rect::new(
                inner.x + inner.width.saturating_sub(34),
                inner.y,
                inner.width.min(34),
                inner.height,
            );
            view.render(toast_area, buf, &theme, &stack);

            let status = format!("{} live toasts", stack.iter_live().count());
            buf.set_span(
                inner.x,
                inner.y + inner.height.saturating_sub(1),
                &Span::styled(status, theme.text_muted),
                inner.width,
            );
        })?;

        if crossterm::event::poll(Duration::from_millis(50))?
            && let crossterm::event::Event::Key(key) = crossterm::event::read()?
        {
            if key.kind != crossterm::event::KeyEventKind::Press {
                continue;
            }
            let kind = match key.code {
                crossterm::event::KeyCode::Char('q') => return Ok(()),
                crossterm::event::KeyCode::Char('i') => Some((ToastKind::Info, 4500)),
                crossterm::event::KeyCode::Char('s') => Some((ToastKind::Success, 2500)),
                crossterm::event::KeyCode::Char('w') => Some((ToastKind::Warning, 6000)),
                crossterm::event::KeyCode::Char('e') => Some((ToastKind::Error, 8000)),
                crossterm::event::KeyCode::Char('p') => Some((ToastKind::Plain, 0)),
                crossterm::event::KeyCode::Char('c') => {
                    let oldest = stack.iter_live().next().map(|(id, _)| id);
                    if let Some(id) = oldest {
                        stack.close(id);
                    }
                    None
                }
                _ => None,
            };

            if let Some((kind, duration_ms)) = kind {
                opened += 1;
                let message = if duration_ms == 0 {
                    "no auto-dismiss; close me with c".to_string()
                } else {
                    format!("auto-dismisses after {duration_ms} ms")
                };
                stack.open(
                    ToastOptions::new(format!("Toast #{opened}"), message)
                        .kind(kind)
                        .duration(Duration::from_millis(duration_ms)),
                );
            }
        }
    }
}
