use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

pub fn render_str(x: u16, y: u16, max_cols: u16, buf: &mut Buffer, input: &str, style: Style) {
    if max_cols == 0 {
        return;
    }
    buf.set_stringn(x, y, input, max_cols as usize, style);
}

/// Right-aligns `input` inside `max_cols` columns starting at `x`.
pub fn render_str_right(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) {
    if max_cols == 0 {
        return;
    }
    let w = UnicodeWidthStr::width(input).min(max_cols as usize) as u16;
    buf.set_stringn(x + (max_cols - w), y, input, max_cols as usize, style);
}

pub fn render_str_centered(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) {
    if max_cols == 0 {
        return;
    }
    let w = UnicodeWidthStr::width(input).min(max_cols as usize) as u16;
    buf.set_stringn(x + (max_cols - w) / 2, y, input, max_cols as usize, style);
}

pub fn fill_row(area: Rect, y: u16, buf: &mut Buffer, style: Style) {
    if y >= area.y + area.height {
        return;
    }
    buf.set_style(Rect::new(area.x, y, area.width, 1), style);
}

/// Greedy display-width word wrap. Words wider than `max_cols` are
/// hard-broken; embedded newlines are respected.
pub fn wrap_text(input: &str, max_cols: u16) -> Vec<String> {
    let max = max_cols as usize;
    let mut out = Vec::new();
    if max == 0 {
        return out;
    }

    for raw in input.split('\n') {
        let mut line = String::new();
        let mut cols = 0usize;

        for word in raw.split_whitespace() {
            let w = UnicodeWidthStr::width(word);
            if cols > 0 && cols + 1 + w > max {
                out.push(std::mem::take(&mut line));
                cols = 0;
            }
            if cols > 0 {
                line.push(' ');
                cols += 1;
            }
            if w <= max - cols {
                line.push_str(word);
                cols += w;
            } else {
                for ch in word.chars() {
                    let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
                    if cols > 0 && cols + cw > max {
                        out.push(std::mem::take(&mut line));
                        cols = 0;
                    }
                    line.push(ch);
                    cols += cw;
                }
            }
        }

        out.push(std::mem::take(&mut line));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_text_splits_on_word_boundaries() {
        assert_eq!(wrap_text("hello world", 5), vec!["hello", "world"]);
        assert_eq!(wrap_text("a bb ccc", 4), vec!["a bb", "ccc"]);
        assert_eq!(wrap_text("one\n\ntwo", 10), vec!["one", "", "two"]);
    }

    #[test]
    fn wrap_text_hard_breaks_overlong_words() {
        assert_eq!(wrap_text("abcdef", 3), vec!["abc", "def"]);
        assert_eq!(wrap_text("你好世界", 4), vec!["你好", "世界"]);
    }

    #[test]
    fn wrap_text_zero_width_yields_nothing() {
        assert!(wrap_text("anything", 0).is_empty());
    }

    #[test]
    fn right_alignment_pads_narrow_input() {
        use ratatui::buffer::Buffer;

        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        render_str_right(0, 0, 4, &mut buf, "7", Style::default());
        let row: String = (0..4)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect();
        assert_eq!(row, "   7");
    }
}
