use ratatui::layout::{Constraint, Layout, Rect};

pub mod commit;
pub mod confirm;
pub mod dialog;
pub mod menu;
pub mod publish;
pub mod release;
pub mod status_line;
pub mod text_input;

/// Helper function to center a rect within another rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Percentage(percent_y.min(100)),
        Constraint::Fill(1),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Percentage(percent_x.min(100)),
        Constraint::Fill(1),
    ])
    .split(popup_layout[1])[1]
}

/// Center a `width` x `height` rect in `r`, shrinking it to fit.
pub fn centered_fixed_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

/// Dialogs take most of a narrow terminal but stop growing at 72 columns.
pub fn dialog_width(terminal_width: u16) -> u16 {
    (terminal_width.saturating_mul(4) / 5)
        .clamp(terminal_width.min(30), 72)
        .min(terminal_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fixed_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_fixed_rect(20, 10, area), Rect::new(40, 15, 20, 10));
        assert_eq!(centered_fixed_rect(200, 50, area), area);
    }

    #[test]
    fn test_dialog_width() {
        assert_eq!(dialog_width(200), 72);
        assert_eq!(dialog_width(50), 40);
        assert_eq!(dialog_width(20), 20);
    }
}
