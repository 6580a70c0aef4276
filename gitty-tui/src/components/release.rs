use gitty_core::flow::{ReleaseField, ReleaseFlow, ReleasePhase};
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

const TITLE: &str = "Release";

pub fn draw(f: &mut Frame, area: Rect, flow: &ReleaseFlow, spinner: &str, theme: &Theme) {
    match &flow.phase {
        ReleasePhase::Input => draw_form(f, area, flow, theme),
        ReleasePhase::Confirm => {
            let mut lines = vec![Line::from(vec![
                Span::raw("Create tag "),
                Span::styled(
                    flow.tag_name().to_string(),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" and push it to the remote?"),
            ])];
            if let Some(annotation) = flow.annotation() {
                lines.push(Line::from(Span::styled(
                    annotation,
                    Style::default().fg(theme.muted),
                )));
            }
            confirm::draw_confirm(f, area, TITLE, lines, false, theme);
        }
        ReleasePhase::Working => {
            confirm::draw_busy(f, area, TITLE, "Creating and pushing tag...", spinner, theme);
        }
        ReleasePhase::Error(error) => confirm::draw_error(f, area, TITLE, error, theme),
    }
}

fn draw_form(f: &mut Frame, area: Rect, flow: &ReleaseFlow, theme: &Theme) {
    let inner = form_frame(f, area, TITLE, 8, theme);
    let [tag_area, message_area, validation_area, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    text_input::draw(
        f,
        tag_area,
        &flow.tag,
        &FieldStyle {
            label: "Tag",
            placeholder: "v1.0.0",
            focused: flow.focus == ReleaseField::Tag,
        },
        theme,
    );
    text_input::draw(
        f,
        message_area,
        &flow.message,
        &FieldStyle {
            label: "Message (optional)",
            placeholder: "Annotated tag message",
            focused: flow.focus == ReleaseField::Message,
        },
        theme,
    );

    if let Some(validation) = &flow.validation {
        f.render_widget(
            Paragraph::new(Span::styled(
                validation.clone(),
                Style::default().fg(theme.error),
            )),
            validation_area,
        );
    }
    f.render_widget(
        Paragraph::new(hint_line(
            &[("enter", "continue"), ("tab", "switch field"), ("esc", "cancel")],
            theme,
        )),
        hint_area,
    );
}
