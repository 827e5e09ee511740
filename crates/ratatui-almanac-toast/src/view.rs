use crate::lifecycle::Toast;
use crate::lifecycle::ToastKind;
use crate::lifecycle::ToastStack;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui_almanac_core::render;
use ratatui_almanac_core::theme::Theme;

/// Options for [`ToastStackView`].
#[derive(Clone, Debug)]
pub struct ToastStackViewOptions {
    pub max_visible: usize,
    /// Blank lines between stacked toasts.
    pub gap: u16,
    pub show_close_hint: bool,
    pub title_style: Style,
    pub message_style: Style,
    pub close_hint_style: Style,
    /// Patched over a toast while it is animating out.
    pub closing_style: Style,
}

impl Default for ToastStackViewOptions {
    fn default() -> Self {
        Self {
            max_visible: 4,
            gap: 1,
            show_close_hint: true,
            title_style: Style::default().add_modifier(Modifier::BOLD),
            message_style: Style::default(),
            close_hint_style: Style::default(),
            closing_style: Style::default().add_modifier(Modifier::DIM),
        }
    }
}

/// Paints the live toasts of a [`ToastStack`] top-down into an area.
///
/// Purely presentational: the view never advances lifecycle state. Toasts in
/// the `Closing` phase are drawn with `closing_style` patched in, which is
/// this library's stand-in for an exit animation; apps that animate for real
/// call [`ToastStack::finish_exit`] when their animation ends.
#[derive(Clone, Debug, Default)]
pub struct ToastStackView {
    options: ToastStackViewOptions,
}

impl ToastStackView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ToastStackViewOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ToastStackViewOptions {
        &self.options
    }

    /// Number of rows needed to show `stack`'s live toasts at `width` columns.
    pub fn required_height(&self, stack: &ToastStack, width: u16) -> u16 {
        let mut total = 0u16;
        for (i, (_, toast)) in self
            .iter_capped(stack)
            .enumerate()
        {
            if i > 0 {
                total = total.saturating_add(self.options.gap);
            }
            total = total.saturating_add(toast_height(toast, width));
        }
        total
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme, stack: &ToastStack) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let mut y = area.y;
        for (i, (_, toast)) in self.iter_capped(stack).enumerate() {
            if i > 0 {
                y = y.saturating_add(self.options.gap);
            }
            if y >= area.y + area.height {
                break;
            }
            y = self.render_toast(area, y, buf, theme, toast);
        }
    }

    fn iter_capped<'a>(
        &self,
        stack: &'a ToastStack,
    ) -> impl Iterator<Item = (crate::lifecycle::ToastId, &'a Toast)> {
        stack.iter_live().take(self.options.max_visible.max(1))
    }

    /// Renders one toast starting at row `y`; returns the row after it.
    fn render_toast(&self, area: Rect, y: u16, buf: &mut Buffer, theme: &Theme, toast: &Toast) -> u16 {
        let o = &self.options;
        let kind_style = kind_style(toast.options().kind, theme);
        let closing = toast.is_closing();

        let patch_closing = |style: Style| {
            if closing { style.patch(o.closing_style) } else { style }
        };

        let title_style = patch_closing(o.title_style.patch(kind_style));
        let message_style = patch_closing(if o.message_style == Style::default() {
            theme.text_muted
        } else {
            o.message_style
        });

        let mut line = String::new();
        line.push(toast.options().icon.unwrap_or_else(|| kind_icon(toast.options().kind)));
        line.push(' ');
        line.push_str(&toast.options().title);

        render::fill_row(area, y, buf, patch_closing(Style::default()));
        let hint_w: u16 = if o.show_close_hint && toast.options().closable {
            2
        } else {
            0
        };
        render::render_str(
            area.x,
            y,
            area.width.saturating_sub(hint_w),
            buf,
            &line,
            title_style,
        );
        if hint_w > 0 && area.width >= hint_w {
            let hint_style = patch_closing(if o.close_hint_style == Style::default() {
                theme.text_muted
            } else {
                o.close_hint_style
            });
            render::render_str_right(area.x, y, area.width, buf, "×", hint_style);
        }

        let mut next_y = y + 1;
        if toast.options().message.is_empty() {
            return next_y;
        }
        for message_line in render::wrap_text(&toast.options().message, area.width) {
            if next_y >= area.y + area.height {
                return next_y;
            }
            render::render_str(area.x, next_y, area.width, buf, &message_line, message_style);
            next_y += 1;
        }
        next_y
    }
}

fn kind_style(kind: ToastKind, theme: &Theme) -> Style {
    match kind {
        ToastKind::Plain => theme.text_primary,
        ToastKind::Info => theme.accent,
        ToastKind::Success => theme.success,
        ToastKind::Warning => theme.warning,
        ToastKind::Error => theme.danger,
    }
}

fn kind_icon(kind: ToastKind) -> char {
    match kind {
        ToastKind::Plain => '•',
        ToastKind::Info => 'i',
        ToastKind::Success => '✓',
        ToastKind::Warning => '!',
        ToastKind::Error => '✗',
    }
}

fn toast_height(toast: &Toast, width: u16) -> u16 {
    let message = &toast.options().message;
    let message_lines = if message.is_empty() {
        0
    } else {
        render::wrap_text(message, width).len()
    };
    1 + message_lines as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::ToastOptions;
    use std::time::Duration;
    use std::time::Instant;

    fn buffer_row(buf: &Buffer, area: Rect, y: u16) -> String {
        (area.x..area.x + area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn title_row(title: &str, width: usize) -> String {
        // title at the left, close hint in the last column
        format!("{title}{}×", " ".repeat(width - title.chars().count() - 1))
    }

    #[test]
    fn stacks_toasts_with_a_gap() {
        let mut stack = ToastStack::new();
        stack.open(ToastOptions::new("first", "hello there"));
        stack.open(ToastOptions::new("second", ""));

        let view = ToastStackView::new();
        let area = Rect::new(0, 0, 20, 6);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf, &Theme::default(), &stack);

        assert_eq!(buffer_row(&buf, area, 0), title_row("• first", 20));
        assert_eq!(buffer_row(&buf, area, 1), "hello there");
        assert_eq!(buffer_row(&buf, area, 2), "");
        assert_eq!(buffer_row(&buf, area, 3), title_row("• second", 20));
    }

    #[test]
    fn long_messages_wrap_to_the_area_width() {
        let mut stack = ToastStack::new();
        stack.open(ToastOptions::new("t", "alpha beta gamma"));

        let view = ToastStackView::new();
        let area = Rect::new(0, 0, 6, 5);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf, &Theme::default(), &stack);

        assert_eq!(buffer_row(&buf, area, 1), "alpha");
        assert_eq!(buffer_row(&buf, area, 2), "beta");
        assert_eq!(buffer_row(&buf, area, 3), "gamma");
        assert_eq!(view.required_height(&stack, area.width), 4);
    }

    #[test]
    fn non_closable_toasts_render_no_close_hint() {
        let mut stack = ToastStack::new();
        stack.open(ToastOptions::new("quiet", "").closable(false));

        let view = ToastStackView::new();
        let area = Rect::new(0, 0, 12, 2);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf, &Theme::default(), &stack);
        assert_eq!(buffer_row(&buf, area, 0), "• quiet");
    }

    #[test]
    fn closing_toasts_still_occupy_their_rows() {
        let mut stack = ToastStack::new();
        let id = stack.open(ToastOptions::new("bye", "").duration(Duration::ZERO));
        stack.close(id);
        assert!(stack.get(id).unwrap().is_closing());

        let view = ToastStackView::new();
        let area = Rect::new(0, 0, 12, 2);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf, &Theme::default(), &stack);
        assert_eq!(buffer_row(&buf, area, 0), title_row("• bye", 12));

        // once the exit completes the row frees up
        let t0 = Instant::now();
        stack.tick(t0);
        stack.tick(t0 + Duration::from_secs(1));
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf, &Theme::default(), &stack);
        assert_eq!(buffer_row(&buf, area, 0), "");
    }

    #[test]
    fn max_visible_caps_the_stack() {
        let mut stack = ToastStack::new();
        for i in 0..6 {
            stack.open(ToastOptions::new(format!("t{i}"), ""));
        }
        let view = ToastStackView::with_options(ToastStackViewOptions {
            max_visible: 2,
            ..Default::default()
        });
        let area = Rect::new(0, 0, 10, 10);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf, &Theme::default(), &stack);
        assert_eq!(buffer_row(&buf, area, 0), "• t0");
        assert_eq!(buffer_row(&buf, area, 2), "• t1");
        assert_eq!(buffer_row(&buf, area, 4), "");
    }
}
