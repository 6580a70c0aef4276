//! Small popups shared by every sub-flow: yes/no confirmation, progress,
//! errors and notices. Also renders the reset and rollback flows, which are
//! nothing but a confirmation.

use gitty_core::flow::{DiscardFlow, DiscardPhase};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::dialog::Dialog;
use crate::theme::Theme;

pub fn draw_confirm(
    f: &mut Frame,
    area: Rect,
    title: &str,
    lines: Vec<Line<'_>>,
    editable: bool,
    theme: &Theme,
) {
    let mut dialog = Dialog::themed(lines, theme)
        .title(title)
        .hint("y", "confirm");
    if editable {
        dialog = dialog.hint("e", "edit");
    }
    dialog.hint("n", "cancel").render(f, area);
}

pub fn draw_busy(f: &mut Frame, area: Rect, title: &str, label: &str, spinner: &str, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            format!("{spinner} "),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(label.to_string()),
    ]);
    Dialog::themed(vec![line], theme)
        .title(title)
        .alignment(Alignment::Center)
        .render(f, area);
}

pub fn draw_error(f: &mut Frame, area: Rect, title: &str, error: &str, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            "Error: ",
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(error.to_string()),
    ]);
    Dialog::themed(vec![line], theme)
        .border_color(theme.error)
        .title(title)
        .hint("enter", "back")
        .render(f, area);
}

pub fn draw_notice(f: &mut Frame, area: Rect, title: &str, text: &str, theme: &Theme) {
    let line = Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(theme.warning),
    ));
    Dialog::themed(vec![line], theme)
        .title(title)
        .hint("enter", "back")
        .render(f, area);
}

pub fn draw(f: &mut Frame, area: Rect, flow: &DiscardFlow, spinner: &str, theme: &Theme) {
    let title = flow.kind.title();
    match &flow.phase {
        DiscardPhase::Confirm => {
            let lines = vec![
                Line::from(Span::styled(
                    flow.kind.warning(),
                    Style::default()
                        .fg(theme.warning)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::raw("This cannot be undone. Continue?"),
            ];
            draw_confirm(f, area, title, lines, false, theme);
        }
        DiscardPhase::Working => draw_busy(f, area, title, "Working...", spinner, theme),
        DiscardPhase::Error(error) => draw_error(f, area, title, error, theme),
    }
}
