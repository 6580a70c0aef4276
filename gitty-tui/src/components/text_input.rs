use gitty_core::input::TextField;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

pub struct FieldStyle<'a> {
    pub label: &'a str,
    pub placeholder: &'a str,
    pub focused: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct VisibleSlice {
    start: usize,
    end: usize,
    cursor_col: u16,
}

/// The window of `text` that fits in `max_width` columns and keeps the cursor
/// in view.
fn visible_slice(text: &str, cursor_pos: usize, max_width: u16) -> VisibleSlice {
    if max_width == 0 || text.is_empty() {
        return VisibleSlice {
            start: 0,
            end: 0,
            cursor_col: 0,
        };
    }

    let graphemes: Vec<(usize, &str)> = text.grapheme_indices(true).collect();
    let mut boundaries: Vec<usize> = graphemes.iter().map(|(i, _)| *i).collect();
    boundaries.push(text.len());

    let cursor_idx = match boundaries.binary_search(&cursor_pos.min(text.len())) {
        Ok(idx) => idx,
        Err(idx) => idx.saturating_sub(1),
    };

    let mut prefix_widths = Vec::with_capacity(boundaries.len());
    prefix_widths.push(0);
    let mut width = 0;
    for (_, grapheme) in &graphemes {
        width += grapheme.width();
        prefix_widths.push(width);
    }

    let max_width = usize::from(max_width);
    let max_cursor_col = max_width.saturating_sub(1);
    let scroll_col = prefix_widths[cursor_idx].saturating_sub(max_cursor_col);

    let start_idx = prefix_widths
        .iter()
        .take_while(|&&col| col <= scroll_col)
        .count()
        .saturating_sub(1)
        .min(graphemes.len().saturating_sub(1));

    let mut end_idx = start_idx;
    let mut used = 0;
    while let Some((_, grapheme)) = graphemes.get(end_idx) {
        if used + grapheme.width() > max_width {
            break;
        }
        used += grapheme.width();
        end_idx += 1;
    }

    let cursor_col = (prefix_widths[cursor_idx] - prefix_widths[start_idx]).min(max_cursor_col);
    VisibleSlice {
        start: boundaries[start_idx],
        end: boundaries[end_idx],
        cursor_col: u16::try_from(cursor_col).unwrap_or(u16::MAX),
    }
}

/// Line index and display column of `cursor` within multi-line `text`.
fn cursor_line_col(text: &str, cursor: usize) -> (usize, usize) {
    let before = &text[..cursor.min(text.len())];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, before[line_start..].width())
}

fn field_block<'a>(style: &FieldStyle<'a>, theme: &Theme) -> Block<'a> {
    let (border, title) = if style.focused {
        (
            theme.accent,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (theme.border, Style::default().fg(theme.muted))
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Span::styled(format!(" {} ", style.label), title))
}

/// A bordered single-line field. Places the terminal cursor when focused.
pub fn draw(f: &mut Frame, area: Rect, field: &TextField, style: &FieldStyle<'_>, theme: &Theme) {
    let block = field_block(style, theme);
    let inner = block.inner(area);

    let (content, cursor_col) = if field.value().is_empty() {
        (
            Line::from(Span::styled(
                style.placeholder.to_string(),
                Style::default().fg(theme.muted),
            )),
            0,
        )
    } else {
        let slice = visible_slice(field.value(), field.cursor, inner.width);
        (
            Line::raw(field.value()[slice.start..slice.end].to_string()),
            slice.cursor_col,
        )
    };
    f.render_widget(Paragraph::new(content).block(block), area);

    if style.focused && inner.width > 0 && inner.height > 0 {
        f.set_cursor_position((inner.x.saturating_add(cursor_col), inner.y));
    }
}

/// A bordered multi-line field that scrolls to keep the cursor row visible.
pub fn draw_multiline(
    f: &mut Frame,
    area: Rect,
    field: &TextField,
    style: &FieldStyle<'_>,
    theme: &Theme,
) {
    let block = field_block(style, theme);
    let inner = block.inner(area);
    let (row, col) = cursor_line_col(field.value(), field.cursor);
    let scroll = row.saturating_sub(usize::from(inner.height.saturating_sub(1)));

    let lines: Vec<Line> = if field.value().is_empty() {
        vec![Line::from(Span::styled(
            style.placeholder.to_string(),
            Style::default().fg(theme.muted),
        ))]
    } else {
        field
            .value()
            .split('\n')
            .skip(scroll)
            .map(|l| Line::raw(l.to_string()))
            .collect()
    };
    f.render_widget(Paragraph::new(lines).block(block), area);

    if style.focused && inner.width > 0 && inner.height > 0 {
        let x = u16::try_from(col)
            .unwrap_or(u16::MAX)
            .min(inner.width.saturating_sub(1));
        let y = u16::try_from(row - scroll).unwrap_or(0);
        f.set_cursor_position((inner.x.saturating_add(x), inner.y.saturating_add(y)));
    }
}
