use gitty_core::flow::{CommitField, CommitFlow, CommitPhase};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{
    confirm,
    dialog::{form_frame, hint_line},
    text_input::{self, FieldStyle},
};
use crate::theme::Theme;

pub fn draw(f: &mut Frame, area: Rect, flow: &CommitFlow, spinner: &str, theme: &Theme) {
    let title = if flow.ai { "AI Commit" } else { "Commit" };
    match &flow.phase {
        CommitPhase::Checking => {
            confirm::draw_busy(f, area, title, "Checking staged changes...", spinner, theme);
        }
        CommitPhase::Generating => {
            confirm::draw_busy(f, area, title, "Generating commit message...", spinner, theme);
        }
        CommitPhase::Working => confirm::draw_busy(f, area, title, "Committing...", spinner, theme),
        CommitPhase::NoChanges => confirm::draw_notice(
            f,
            area,
            title,
            "No staged changes. Stage files first.",
            theme,
        ),
        CommitPhase::Error(error) => confirm::draw_error(f, area, title, error, theme),
        CommitPhase::Confirm => {
            let mut lines = vec![
                Line::from(Span::styled(
                    "Generated commit message:",
                    Style::default().fg(theme.muted),
                )),
                Line::raw(""),
            ];
            lines.extend(flow.generated.lines().map(|l| {
                Line::from(Span::styled(
                    l.to_string(),
                    Style::default().fg(theme.accent),
                ))
            }));
            lines.push(Line::raw(""));
            lines.push(Line::raw("Use this message?"));
            confirm::draw_confirm(f, area, title, lines, true, theme);
        }
        CommitPhase::Input => draw_form(f, area, title, flow, theme),
    }
}

fn draw_form(f: &mut Frame, area: Rect, title: &str, flow: &CommitFlow, theme: &Theme) {
    let inner = form_frame(f, area, title, 12, theme);
    let [title_area, body_area, validation_area, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(7),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    text_input::draw(
        f,
        title_area,
        &flow.title,
        &FieldStyle {
            label: "Title",
            placeholder: "Short summary of the change",
            focused: flow.focus == CommitField::Title,
        },
        theme,
    );
    text_input::draw_multiline(
        f,
        body_area,
        &flow.body,
        &FieldStyle {
            label: "Body (optional)",
            placeholder: "Longer description",
            focused: flow.focus == CommitField::Body,
        },
        theme,
    );

    if let Some(validation) = &flow.validation {
        f.render_widget(
            Paragraph::new(Span::styled(
                validation.clone(),
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            )),
            validation_area,
        );
    }

    f.render_widget(
        Paragraph::new(hint_line(
            &[
                ("enter", "commit"),
                ("alt+enter", "newline"),
                ("tab", "switch field"),
                ("esc", "cancel"),
            ],
            theme,
        )),
        hint_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(flow: &CommitFlow) -> String {
        let theme = Theme::default();
        let backend = TestBackend::new(90, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| draw(f, f.area(), flow, "⠋", &theme))
            .unwrap();
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
    fn test_checking_shows_spinner() {
        let (flow, _) = CommitFlow::start(false);
        let output = render(&flow);
        assert!(output.contains("⠋ Checking staged changes..."), "{output}");
    }

    #[test]
    fn test_form_shows_fields_and_validation() {
        let (mut flow, _) = CommitFlow::start(false);
        flow.phase = CommitPhase::Input;
        flow.validation = Some("Title is required".into());
        let output = render(&flow);
        assert!(output.contains(" Commit "), "{output}");
        assert!(output.contains(" Title "), "{output}");
        assert!(output.contains("Body (optional)"), "{output}");
        assert!(output.contains("Title is required"), "{output}");
    }

    #[test]
    fn test_generated_message_review() {
        let (mut flow, _) = CommitFlow::start(true);
        flow.generated = "feat: add release flow\n\nTags and pushes".into();
        flow.phase = CommitPhase::Confirm;
        let output = render(&flow);
        assert!(output.contains(" AI Commit "), "{output}");
        assert!(output.contains("feat: add release flow"), "{output}");
        assert!(output.contains("Tags and pushes"), "{output}");
        assert!(output.contains("y confirm  e edit  n cancel"), "{output}");
    }

    #[test]
    fn test_no_changes_notice() {
        let (mut flow, _) = CommitFlow::start(false);
        flow.phase = CommitPhase::NoChanges;
        assert!(render(&flow).contains("No staged changes"));
    }
}
