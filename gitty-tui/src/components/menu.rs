use gitty_core::{
    git::RepositoryStatus,
    menu::{MENU_ENTRIES, MenuEntry},
    state::{AppState, Mode},
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::status_line;
use crate::theme::Theme;

const CHECK_ICON: &str = "\u{f00c}";
const WARNING_ICON: &str = "\u{f071}";
const ARROW_ICON: &str = "\u{f054}";

/// Draw the header, the action list, the status line and the key help.
pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme, spinner: &str) {
    let rows = u16::try_from(MENU_ENTRIES.len()).unwrap_or(u16::MAX);
    let [header, _, list, _, status, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(rows),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .areas(area);

    f.render_widget(
        Paragraph::new(header_line(&state.status, state.status_loaded, theme)),
        header,
    );

    let lines: Vec<Line> = MENU_ENTRIES
        .iter()
        .enumerate()
        .map(|(i, entry)| entry_line(entry, i == state.selected, theme))
        .collect();
    f.render_widget(Paragraph::new(lines), list);

    if let Mode::Loading(action) = &state.mode {
        let label = MENU_ENTRIES
            .iter()
            .find(|e| e.action == *action)
            .map_or("Working", |e| e.label);
        status_line::draw_progress(f, status, spinner, &format!("{label}..."), theme);
    } else {
        status_line::draw(f, status, state.message.as_ref(), theme);
    }

    f.render_widget(Paragraph::new(help_line(theme)), help);
}

fn header_line<'a>(status: &RepositoryStatus, loaded: bool, theme: &Theme) -> Line<'a> {
    let mut spans = vec![
        Span::styled(
            "gitty",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(theme.muted)),
    ];

    if !loaded {
        spans.push(Span::styled("...", Style::default().fg(theme.muted)));
        return Line::from(spans);
    }

    if !status.is_repository {
        let text = if theme.show_icons {
            format!("{WARNING_ICON} Not a git repo")
        } else {
            "Not a git repo".to_string()
        };
        spans.push(Span::styled(text, Style::default().fg(theme.warning)));
        return Line::from(spans);
    }

    spans.push(Span::styled(
        status.branch.clone(),
        Style::default().fg(theme.info).add_modifier(Modifier::BOLD),
    ));

    let mut parts = Vec::new();
    if !status.staged_files.is_empty() {
        parts.push((format!("+{}", status.staged_files.len()), theme.success));
    }
    if !status.modified_files.is_empty() {
        parts.push((format!("~{}", status.modified_files.len()), theme.warning));
    }
    if !status.untracked_files.is_empty() {
        parts.push((format!("?{}", status.untracked_files.len()), theme.info));
    }
    if status.ahead > 0 {
        parts.push((format!("↑{}", status.ahead), theme.hint));
    }
    if status.behind > 0 {
        parts.push((format!("↓{}", status.behind), theme.warning));
    }
    if status.is_clean() {
        let check = if theme.show_icons { CHECK_ICON } else { "✓" };
        parts.push((check.to_string(), theme.success));
    }

    for (i, (text, color)) in parts.into_iter().enumerate() {
        spans.push(Span::raw(if i == 0 { "  " } else { " " }));
        spans.push(Span::styled(text, Style::default().fg(color)));
    }
    Line::from(spans)
}

fn entry_line<'a>(entry: &'a MenuEntry, selected: bool, theme: &Theme) -> Line<'a> {
    let (marker, icon_color, label_style, shortcut_color) = if selected {
        (
            if theme.show_icons { ARROW_ICON } else { ">" },
            theme.secondary,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
            theme.hint,
        )
    } else {
        (" ", theme.muted, Style::default(), theme.muted)
    };

    let mut spans = vec![Span::styled(
        format!("  {marker} "),
        Style::default().fg(theme.accent),
    )];
    if theme.show_icons {
        spans.push(Span::styled(
            format!("{} ", entry.icon),
            Style::default().fg(icon_color),
        ));
    }
    spans.push(Span::styled(entry.label, label_style));
    spans.push(Span::styled(
        format!(" [{}]", entry.shortcut),
        Style::default().fg(shortcut_color),
    ));
    if selected {
        spans.push(Span::styled(
            format!("  {}", entry.description),
            Style::default().fg(theme.muted),
        ));
    }
    Line::from(spans)
}

fn help_line<'a>(theme: &Theme) -> Line<'a> {
    let key = Style::default().fg(theme.secondary);
    let desc = Style::default().fg(theme.muted);
    Line::from(vec![
        Span::styled("↑↓", key),
        Span::styled(" navigate  ", desc),
        Span::styled("enter", key),
        Span::styled(" select  ", desc),
        Span::styled("q", key),
        Span::styled(" quit", desc),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitty_core::{flow::PublishDefaults, menu::MenuAction, state::Severity};
    use ratatui::{Terminal, backend::TestBackend};

    fn plain_theme() -> Theme {
        Theme {
            show_icons: false,
            ..Theme::default()
        }
    }

    fn render(state: &AppState) -> String {
        let theme = plain_theme();
        let backend = TestBackend::new(90, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| draw(f, f.area(), state, &theme, "⠋"))
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

    fn repo_state(status: RepositoryStatus) -> AppState {
        let mut state = AppState::new(PublishDefaults::default());
        state.status = status;
        state.status_loaded = true;
        state
    }

    #[test]
    fn test_header_shows_counts() {
        let state = repo_state(RepositoryStatus {
            is_repository: true,
            branch: "feature/x".into(),
            staged_files: vec!["a".into(), "b".into()],
            modified_files: vec!["c".into()],
            untracked_files: vec!["d".into()],
            ahead: 2,
            behind: 1,
        });
        let output = render(&state);
        let header = output.lines().next().unwrap();
        assert!(header.contains("gitty | feature/x"), "{header}");
        assert!(header.contains("+2 ~1 ?1 ↑2 ↓1"), "{header}");
        assert!(!header.contains('✓'), "{header}");
    }

    #[test]
    fn test_header_clean_repo() {
        let state = repo_state(RepositoryStatus {
            is_repository: true,
            branch: "main".into(),
            ..RepositoryStatus::default()
        });
        let header = render(&state).lines().next().unwrap().to_string();
        assert!(header.contains("main  ✓"), "{header}");
    }

    #[test]
    fn test_header_outside_repository() {
        let state = repo_state(RepositoryStatus::default());
        let output = render(&state);
        assert!(output.contains("Not a git repo"), "{output}");
    }

    #[test]
    fn test_menu_lists_every_entry_in_order() {
        let output = render(&repo_state(RepositoryStatus::default()));
        let mut last = 0;
        for entry in MENU_ENTRIES {
            let label = format!("{} [{}]", entry.label, entry.shortcut);
            let pos = output.find(&label).unwrap_or_else(|| panic!("{label} missing"));
            assert!(pos > last, "{label} out of order");
            last = pos;
        }
    }

    #[test]
    fn test_selected_entry_shows_description() {
        let mut state = repo_state(RepositoryStatus::default());
        state.select_action(MenuAction::Push);
        let output = render(&state);
        assert!(output.contains("> Push [p]  Push to remote"), "{output}");
        assert!(!output.contains("Pull from remote"), "{output}");
    }

    #[test]
    fn test_status_message_and_progress() {
        let mut state = repo_state(RepositoryStatus::default());
        state.set_message(Severity::Success, "Pushed to remote");
        assert!(render(&state).contains("Pushed to remote"));

        state.mode = Mode::Loading(MenuAction::Pull);
        let output = render(&state);
        assert!(output.contains("⠋ Pull..."), "{output}");
    }
}
