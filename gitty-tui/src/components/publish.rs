use gitty_core::{
    config::Visibility,
    flow::{PublishField, PublishFlow, PublishPhase},
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::{
    confirm,
    dialog::{form_frame, hint_line},
    text_input::{self, FieldStyle},
};
use crate::theme::Theme;

const TITLE: &str = "Publish to GitHub";

pub fn draw(f: &mut Frame, area: Rect, flow: &PublishFlow, spinner: &str, theme: &Theme) {
    match &flow.phase {
        PublishPhase::Inspecting => {
            confirm::draw_busy(f, area, TITLE, "Checking repository...", spinner, theme);
        }
        PublishPhase::Working => {
            let label = if flow.has_remote {
                format!("Pushing {} to origin...", flow.branch)
            } else {
                "Creating repository and pushing...".to_string()
            };
            confirm::draw_busy(f, area, TITLE, &label, spinner, theme);
        }
        PublishPhase::Input => draw_form(f, area, flow, theme),
        PublishPhase::Confirm => draw_summary(f, area, flow, theme),
        PublishPhase::Error(error) => confirm::draw_error(f, area, TITLE, error, theme),
    }
}

fn draw_summary(f: &mut Frame, area: Rect, flow: &PublishFlow, theme: &Theme) {
    let request = flow.request();
    let key = Style::default().fg(theme.muted);
    let value = Style::default().fg(theme.accent);
    let row = |label: &str, text: String| {
        Line::from(vec![
            Span::styled(format!("{label:<16}"), key),
            Span::styled(text, value),
        ])
    };

    let mut lines = vec![
        row("Repository", request.name.clone()),
        row("Visibility", request.visibility.as_str().to_string()),
    ];
    if !request.description.is_empty() {
        lines.push(row("Description", request.description.clone()));
    }
    lines.push(row("Commit message", request.commit_message.clone()));
    if let Some(tag) = &request.tag {
        lines.push(row("Tag", tag.clone()));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw("Create the GitHub repository and push?"));
    confirm::draw_confirm(f, area, TITLE, lines, true, theme);
}

fn draw_form(f: &mut Frame, area: Rect, flow: &PublishFlow, theme: &Theme) {
    let inner = form_frame(f, area, TITLE, 17, theme);
    let mut constraints = vec![Constraint::Length(3); PublishField::ALL.len()];
    constraints.extend([Constraint::Length(1), Constraint::Length(1)]);
    let rows = Layout::vertical(constraints).split(inner);

    for (field, &field_area) in PublishField::ALL.iter().zip(rows.iter()) {
        let style = FieldStyle {
            label: field.label(),
            placeholder: "",
            focused: flow.focus == *field,
        };
        match field {
            PublishField::Name => text_input::draw(f, field_area, &flow.name, &style, theme),
            PublishField::Description => {
                text_input::draw(f, field_area, &flow.description, &style, theme);
            }
            PublishField::Message => text_input::draw(f, field_area, &flow.message, &style, theme),
            PublishField::Tag => text_input::draw(
                f,
                field_area,
                &flow.tag,
                &FieldStyle {
                    placeholder: "v0.1.0",
                    ..style
                },
                theme,
            ),
            PublishField::Visibility => draw_visibility(f, field_area, flow, &style, theme),
        }
    }

    let count = PublishField::ALL.len();
    if let Some(validation) = &flow.validation {
        f.render_widget(
            Paragraph::new(Span::styled(
                validation.clone(),
                Style::default().fg(theme.error),
            )),
            rows[count],
        );
    }
    let hints: &[(&str, &str)] = if flow.focus == PublishField::Visibility {
        &[("space", "toggle"), ("tab", "next field"), ("enter", "continue"), ("esc", "cancel")]
    } else {
        &[("tab", "next field"), ("enter", "continue"), ("esc", "cancel")]
    };
    f.render_widget(Paragraph::new(hint_line(hints, theme)), rows[count + 1]);
}

fn draw_visibility(
    f: &mut Frame,
    area: Rect,
    flow: &PublishFlow,
    style: &FieldStyle<'_>,
    theme: &Theme,
) {
    let border = if style.focused { theme.accent } else { theme.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", style.label));

    let option = |visibility: Visibility| {
        let chosen = flow.visibility == visibility;
        let marker = if chosen { "●" } else { "○" };
        let style = if chosen {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        Span::styled(format!("{marker} {}", visibility.as_str()), style)
    };

    let line = Line::from(vec![
        option(Visibility::Public),
        Span::raw("   "),
        option(Visibility::Private),
    ]);
    f.render_widget(Paragraph::new(line).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitty_core::{action::Action, flow::PublishDefaults, task::TaskOutcome};
    use ratatui::{Terminal, backend::TestBackend};

    fn render(flow: &PublishFlow) -> String {
        let theme = Theme::default();
        let backend = TestBackend::new(100, 30);
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

    fn form() -> PublishFlow {
        let defaults = PublishDefaults {
            name: "my-tool".into(),
            visibility: Visibility::Private,
        };
        let (mut flow, _) = PublishFlow::start(&defaults);
        flow.handle_outcome(TaskOutcome::RepositoryInspected {
            branch: "main".into(),
            has_remote: false,
        });
        flow
    }

    #[test]
    fn test_form_prefills_defaults() {
        let output = render(&form());
        assert!(output.contains("Repository name"), "{output}");
        assert!(output.contains("my-tool"), "{output}");
        assert!(output.contains("○ public   ● private"), "{output}");
        assert!(output.contains("Initial commit"), "{output}");
    }

    #[test]
    fn test_summary_lists_choices() {
        let mut flow = form();
        flow.handle_action(Action::Submit);
        assert_eq!(flow.phase, PublishPhase::Confirm);
        let output = render(&flow);
        assert!(output.contains("my-tool"), "{output}");
        assert!(output.contains("private"), "{output}");
        assert!(output.contains("y confirm  e edit  n cancel"), "{output}");
    }

    #[test]
    fn test_existing_remote_progress() {
        let (mut flow, _) = PublishFlow::start(&PublishDefaults::default());
        flow.handle_outcome(TaskOutcome::RepositoryInspected {
            branch: "dev".into(),
            has_remote: true,
        });
        assert!(render(&flow).contains("Pushing dev to origin..."));
    }
}
