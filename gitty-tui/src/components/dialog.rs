use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::{centered_fixed_rect, dialog_width};
use crate::theme::Theme;

/// A centered popup with an optional row of key hints under its body.
pub struct Dialog<'a> {
    lines: Vec<Line<'a>>,
    hints: Vec<(&'a str, &'a str)>,
    border_color: Color,
    hint_color: Color,
    title: Option<String>,
    padding: Padding,
    alignment: Alignment,
}

impl<'a> Dialog<'a> {
    #[must_use]
    pub fn new(lines: Vec<Line<'a>>) -> Self {
        Self {
            lines,
            hints: Vec::new(),
            border_color: Color::White,
            hint_color: Color::Blue,
            title: None,
            padding: Padding::uniform(1),
            alignment: Alignment::Left,
        }
    }

    /// A dialog with the theme's border and hint colors already applied.
    #[must_use]
    pub fn themed(lines: Vec<Line<'a>>, theme: &Theme) -> Self {
        Self::new(lines)
            .border_color(theme.secondary)
            .hint_color(theme.hint)
    }

    #[must_use]
    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    #[must_use]
    pub fn hint_color(mut self, color: Color) -> Self {
        self.hint_color = color;
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(format!(" {} ", title.into()));
        self
    }

    #[must_use]
    pub fn hint(mut self, key: &'a str, label: &'a str) -> Self {
        self.hints.push((key, label));
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    fn body(&self) -> Vec<Line<'a>> {
        let mut lines = self.lines.clone();
        if !self.hints.is_empty() {
            let key_style = Style::default()
                .fg(self.hint_color)
                .add_modifier(Modifier::BOLD);
            let mut spans = Vec::new();
            for (i, (key, label)) in self.hints.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw("  "));
                }
                spans.push(Span::styled(*key, key_style));
                spans.push(Span::raw(format!(" {label}")));
            }
            lines.push(Line::raw(""));
            lines.push(Line::from(spans));
        }
        lines
    }

    /// Compute `(width, height)` for this dialog given the terminal width.
    pub fn size(&self, terminal_width: u16) -> (u16, u16) {
        let width = dialog_width(terminal_width);
        let h_chrome = 2 + self.padding.left + self.padding.right;
        let v_chrome = 2 + self.padding.top + self.padding.bottom;
        let text_width = width.saturating_sub(h_chrome).max(1);

        let content_height: u16 = self
            .body()
            .iter()
            .map(|line| wrapped_height(line, text_width))
            .sum();

        (width, content_height + v_chrome)
    }

    /// Render centered on `area`, clearing whatever is underneath.
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let (width, height) = self.size(area.width);
        let popup = centered_fixed_rect(width, height, area);

        f.render_widget(Clear, popup);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.border_color))
            .padding(self.padding);
        if let Some(title) = &self.title {
            block = block.title(title.as_str());
        }

        let paragraph = Paragraph::new(self.body())
            .block(block)
            .wrap(Wrap { trim: false })
            .alignment(self.alignment);
        f.render_widget(paragraph, popup);
    }
}

/// Clear and frame a centered form `content_height` rows tall, returning the
/// area inside the border and padding.
pub fn form_frame(f: &mut Frame, area: Rect, title: &str, content_height: u16, theme: &Theme) -> Rect {
    let width = dialog_width(area.width);
    let popup = centered_fixed_rect(width, content_height + 4, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.secondary))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::uniform(1));
    let inner = block.inner(popup);
    f.render_widget(block, popup);
    inner
}

/// Key hints in the same look as a dialog's hint row.
pub fn hint_line<'a>(hints: &[(&'a str, &'a str)], theme: &Theme) -> Line<'a> {
    let key_style = Style::default().fg(theme.hint).add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(" {label}"), Style::default().fg(theme.muted)));
    }
    Line::from(spans)
}

/// Rows a line occupies once word-wrapped to `max_width` display columns.
fn wrapped_height(line: &Line, max_width: u16) -> u16 {
    let max_w = usize::from(max_width);
    if max_w == 0 {
        return 1;
    }
    let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();

    let mut rows: u16 = 1;
    let mut col = 0;
    for word in text.split(' ') {
        let w = word.width();
        let needed = if col == 0 { w } else { w + 1 };
        if col + needed <= max_w {
            col += needed;
        } else if w <= max_w {
            rows += 1;
            col = w;
        } else {
            if col > 0 {
                rows += 1;
            }
            col = w;
            while col > max_w {
                rows += 1;
                col -= max_w;
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(dialog: &Dialog, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| dialog.render(f, f.area())).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut output = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                output.push_str(buffer[(x, y)].symbol());
            }
            output.push('\n');
        }
        output
    }

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height(&Line::raw("hello world"), 11), 1);
        assert_eq!(wrapped_height(&Line::raw("hello world"), 10), 2);
        assert_eq!(wrapped_height(&Line::raw("abcdefghij"), 4), 3);
        assert_eq!(wrapped_height(&Line::raw(""), 20), 1);
        assert_eq!(wrapped_height(&Line::raw("hello"), 0), 1);
    }

    #[test]
    fn test_wrapped_height_uses_display_width() {
        // Each of these is two columns wide
        assert_eq!(wrapped_height(&Line::raw("日本語"), 4), 2);
    }

    #[test]
    fn test_size_counts_hint_row() {
        let plain = Dialog::new(vec![Line::raw("hello")]);
        assert_eq!(plain.size(100), (72, 5));

        let hinted = Dialog::new(vec![Line::raw("hello")]).hint("y", "confirm");
        assert_eq!(hinted.size(100), (72, 7));
    }

    #[test]
    fn test_render_shows_title_body_and_hints() {
        let dialog = Dialog::new(vec![Line::raw("Discard everything?")])
            .title("Reset")
            .hint("y", "confirm")
            .hint("n", "cancel");
        let output = render(&dialog, 80, 20);
        assert!(output.contains(" Reset "), "{output}");
        assert!(output.contains("Discard everything?"), "{output}");
        assert!(output.contains("y confirm  n cancel"), "{output}");
    }
}
