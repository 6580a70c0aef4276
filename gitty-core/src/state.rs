use crate::{
    flow::{KeyContext, PublishDefaults, SubFlow},
    git::RepositoryStatus,
    menu::{MENU_ENTRIES, MenuAction, MenuEntry},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Header message. `seq` ties it to the timer that will clear it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
    pub seq: u64,
}

/// What the app is doing. Exactly one of these at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Menu,
    /// A direct menu action is running in the background
    Loading(MenuAction),
    Flow(SubFlow),
    Quitting,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub mode: Mode,
    pub status: RepositoryStatus,
    /// False until the first status read lands
    pub status_loaded: bool,
    pub selected: usize,
    pub message: Option<StatusMessage>,
    pub publish_defaults: PublishDefaults,
    /// A status read is in flight. Menu actions wait for it so that only one
    /// git process touches the index at a time.
    pub refreshing: bool,
    /// Menu action chosen while a status read was in flight
    pub deferred: Option<MenuAction>,
    next_seq: u64,
    status_seq: u64,
}

impl AppState {
    pub fn new(publish_defaults: PublishDefaults) -> Self {
        Self {
            mode: Mode::Menu,
            status: RepositoryStatus::default(),
            status_loaded: false,
            selected: 0,
            message: None,
            publish_defaults,
            refreshing: false,
            deferred: None,
            next_seq: 0,
            status_seq: 0,
        }
    }

    pub fn flow(&self) -> Option<&SubFlow> {
        match &self.mode {
            Mode::Flow(flow) => Some(flow),
            _ => None,
        }
    }

    pub fn is_quitting(&self) -> bool {
        self.mode == Mode::Quitting
    }

    pub fn key_context(&self) -> KeyContext {
        match &self.mode {
            Mode::Menu => KeyContext::Menu,
            Mode::Loading(_) => KeyContext::Loading,
            Mode::Flow(flow) => flow.key_context(),
            Mode::Quitting => KeyContext::Busy,
        }
    }

    pub fn selected_entry(&self) -> &'static MenuEntry {
        &MENU_ENTRIES[self.selected.min(MENU_ENTRIES.len() - 1)]
    }

    pub fn move_selection(&mut self, delta: i32) {
        let max = MENU_ENTRIES.len() - 1;
        let magnitude = delta.unsigned_abs() as usize;
        self.selected = if delta < 0 {
            self.selected.saturating_sub(magnitude)
        } else {
            (self.selected + magnitude).min(max)
        };
    }

    pub fn select_action(&mut self, action: MenuAction) {
        if let Some(idx) = MENU_ENTRIES.iter().position(|e| e.action == action) {
            self.selected = idx;
        }
    }

    /// Mark a status read as started and return the sequence number its
    /// snapshot must carry.
    pub fn begin_refresh(&mut self) -> u64 {
        self.status_seq += 1;
        self.refreshing = true;
        self.status_seq
    }

    /// Store a snapshot if it answers the latest read. Older snapshots are
    /// dropped so a slow read never overwrites a newer one.
    pub fn finish_refresh(&mut self, seq: u64, status: RepositoryStatus) -> bool {
        if seq != self.status_seq {
            return false;
        }
        self.status = status;
        self.status_loaded = true;
        self.refreshing = false;
        true
    }

    /// Replace the current message and return the sequence number its
    /// expiry timer must carry.
    pub fn set_message(&mut self, severity: Severity, text: impl Into<String>) -> u64 {
        self.next_seq += 1;
        self.message = Some(StatusMessage {
            text: text.into(),
            severity,
            seq: self.next_seq,
        });
        self.next_seq
    }

    /// Clear the message only if it is still the one `seq` was issued for.
    pub fn clear_message(&mut self, seq: u64) -> bool {
        if self.message.as_ref().is_some_and(|m| m.seq == seq) {
            self.message = None;
            true
        } else {
            false
        }
    }
}
