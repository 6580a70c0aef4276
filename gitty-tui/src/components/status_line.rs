use gitty_core::state::{Severity, StatusMessage};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::theme::Theme;

pub fn draw(f: &mut Frame, area: Rect, message: Option<&StatusMessage>, theme: &Theme) {
    let Some(message) = message else {
        return;
    };
    let color = match message.severity {
        Severity::Info => theme.info,
        Severity::Success => theme.success,
        Severity::Error => theme.error,
    };
    let mut style = Style::default().fg(color);
    if message.severity == Severity::Error {
        style = style.add_modifier(Modifier::BOLD);
    }
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {}", message.text), style))),
        area,
    );
}

/// A spinner frame followed by what is in progress.
pub fn draw_progress(f: &mut Frame, area: Rect, spinner: &str, label: &str, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {spinner} "),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(label.to_string(), Style::default().fg(theme.muted)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
