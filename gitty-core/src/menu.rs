/// Something the top-level menu can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    StageAll,
    Commit,
    AiCommit,
    Push,
    Pull,
    Reset,
    Rollback,
    Release,
    Publish,
    OpenInBrowser,
    Lazygit,
    Branches,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub icon: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub shortcut: char,
    pub action: MenuAction,
}

pub const MENU_ENTRIES: &[MenuEntry] = &[
    MenuEntry {
        icon: "\u{f055}",
        label: "Stage All",
        description: "git add .",
        shortcut: 'a',
        action: MenuAction::StageAll,
    },
    MenuEntry {
        icon: "\u{f417}",
        label: "Commit",
        description: "Commit with message",
        shortcut: 'c',
        action: MenuAction::Commit,
    },
    MenuEntry {
        icon: "\u{f0e7}",
        label: "AI Commit",
        description: "Generate commit message with AI",
        shortcut: 'i',
        action: MenuAction::AiCommit,
    },
    MenuEntry {
        icon: "\u{f403}",
        label: "Push",
        description: "Push to remote",
        shortcut: 'p',
        action: MenuAction::Push,
    },
    MenuEntry {
        icon: "\u{f404}",
        label: "Pull",
        description: "Pull from remote",
        shortcut: 'l',
        action: MenuAction::Pull,
    },
    MenuEntry {
        icon: "\u{f0e2}",
        label: "Reset",
        description: "Reset changes (hard)",
        shortcut: 'r',
        action: MenuAction::Reset,
    },
    MenuEntry {
        icon: "\u{f112}",
        label: "Rollback",
        description: "Undo the last commit (hard)",
        shortcut: 'z',
        action: MenuAction::Rollback,
    },
    MenuEntry {
        icon: "\u{f02b}",
        label: "Release",
        description: "Tag and push a release",
        shortcut: 't',
        action: MenuAction::Release,
    },
    MenuEntry {
        icon: "\u{f0ee}",
        label: "Publish",
        description: "Publish to GitHub",
        shortcut: 'u',
        action: MenuAction::Publish,
    },
    MenuEntry {
        icon: "\u{f08e}",
        label: "Open Repo",
        description: "Open repo in browser",
        shortcut: 'o',
        action: MenuAction::OpenInBrowser,
    },
    MenuEntry {
        icon: "\u{f1d3}",
        label: "Lazygit",
        description: "Open lazygit",
        shortcut: 'g',
        action: MenuAction::Lazygit,
    },
    MenuEntry {
        icon: "\u{f126}",
        label: "Branches",
        description: "View branches",
        shortcut: 'b',
        action: MenuAction::Branches,
    },
    MenuEntry {
        icon: "\u{f011}",
        label: "Quit",
        description: "Exit gitty",
        shortcut: 'q',
        action: MenuAction::Quit,
    },
];

pub fn entry_for_shortcut(c: char) -> Option<&'static MenuEntry> {
    MENU_ENTRIES.iter().find(|entry| entry.shortcut == c)
}

pub fn entry_for_action(action: MenuAction) -> &'static MenuEntry {
    MENU_ENTRIES
        .iter()
        .find(|entry| entry.action == action)
        .unwrap_or(&MENU_ENTRIES[MENU_ENTRIES.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_shortcuts_are_unique() {
        let shortcuts: HashSet<char> = MENU_ENTRIES.iter().map(|e| e.shortcut).collect();
        assert_eq!(shortcuts.len(), MENU_ENTRIES.len());
    }

    #[test]
    fn test_every_action_has_one_entry() {
        let actions: HashSet<MenuAction> = MENU_ENTRIES.iter().map(|e| e.action).collect();
        assert_eq!(actions.len(), MENU_ENTRIES.len());
    }

    #[test]
    fn test_lookup_by_shortcut() {
        assert_eq!(entry_for_shortcut('i').unwrap().action, MenuAction::AiCommit);
        assert_eq!(entry_for_shortcut('q').unwrap().label, "Quit");
        assert!(entry_for_shortcut('x').is_none());
    }

    #[test]
    fn test_quit_is_last() {
        assert_eq!(MENU_ENTRIES.last().unwrap().action, MenuAction::Quit);
        assert_eq!(entry_for_action(MenuAction::Push).label, "Push");
    }
}
