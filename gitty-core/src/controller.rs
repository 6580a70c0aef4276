//! The menu controller: pure transitions from `(state, input)` to effects.
//! Nothing here touches git, threads or the terminal.

use crate::{
    action::Action,
    constants::MESSAGE_TTL,
    effect::{Effect, ExternalTool},
    event::AppEvent,
    flow::{FlowStep, SubFlow},
    menu::MenuAction,
    state::{AppState, Mode, Severity},
    task::{Task, TaskOutcome},
};

/// Effects to run once at startup.
pub fn init(state: &mut AppState) -> Vec<Effect> {
    vec![refresh_status(state)]
}

fn refresh_status(state: &mut AppState) -> Effect {
    Effect::RefreshStatus {
        seq: state.begin_refresh(),
    }
}

pub fn process_action(state: &mut AppState, action: Action) -> Vec<Effect> {
    match &mut state.mode {
        Mode::Flow(flow) => {
            let step = flow.handle_action(action);
            apply_step(state, step)
        }
        Mode::Loading(_) => {
            if action == Action::Quit {
                quit(state)
            } else {
                Vec::new()
            }
        }
        Mode::Quitting => Vec::new(),
        Mode::Menu => process_menu_action(state, action),
    }
}

fn process_menu_action(state: &mut AppState, action: Action) -> Vec<Effect> {
    match action {
        Action::Quit => quit(state),
        Action::MoveSelection(delta) => {
            state.move_selection(delta);
            Vec::new()
        }
        Action::Select => trigger_or_defer(state, state.selected_entry().action),
        Action::Trigger(menu_action) => {
            state.select_action(menu_action);
            trigger_or_defer(state, menu_action)
        }
        _ => Vec::new(),
    }
}

/// Hold the action back while a status read is still running; it fires
/// once the snapshot lands.
fn trigger_or_defer(state: &mut AppState, action: MenuAction) -> Vec<Effect> {
    if state.refreshing && action != MenuAction::Quit {
        log::debug!("deferring {action:?} until the status read lands");
        state.deferred = Some(action);
        return Vec::new();
    }
    trigger(state, action)
}

fn trigger(state: &mut AppState, action: MenuAction) -> Vec<Effect> {
    log::debug!("menu action {action:?}");
    if let Some(task) = direct_task(action) {
        state.mode = Mode::Loading(action);
        return vec![Effect::Spawn(task)];
    }
    match action {
        MenuAction::Quit => quit(state),
        MenuAction::Lazygit => {
            state.mode = Mode::Loading(action);
            vec![Effect::RunExternal(ExternalTool::Lazygit)]
        }
        _ => match SubFlow::start(action, &state.publish_defaults) {
            Some((flow, step)) => {
                state.mode = Mode::Flow(flow);
                apply_step(state, step)
            }
            None => Vec::new(),
        },
    }
}

/// Menu actions that are a single background task with no UI of their own.
fn direct_task(action: MenuAction) -> Option<Task> {
    match action {
        MenuAction::StageAll => Some(Task::StageAll),
        MenuAction::Push => Some(Task::Push),
        MenuAction::Pull => Some(Task::Pull),
        MenuAction::OpenInBrowser => Some(Task::OpenInBrowser),
        MenuAction::Branches => Some(Task::ListBranches),
        _ => None,
    }
}

fn quit(state: &mut AppState) -> Vec<Effect> {
    state.mode = Mode::Quitting;
    vec![Effect::Quit]
}

fn apply_step(state: &mut AppState, step: FlowStep) -> Vec<Effect> {
    match step {
        FlowStep::Stay => Vec::new(),
        FlowStep::Run(task) => vec![Effect::Spawn(task)],
        FlowStep::Exit(message) => {
            // Dropping the flow here is what makes the hand-back happen once.
            state.mode = Mode::Menu;
            return_to_menu(state, message)
        }
    }
}

fn return_to_menu(state: &mut AppState, message: Option<(Severity, String)>) -> Vec<Effect> {
    let mut effects = vec![refresh_status(state)];
    if let Some((severity, text)) = message {
        let seq = state.set_message(severity, text);
        effects.push(Effect::ScheduleMessageClear {
            seq,
            after: MESSAGE_TTL,
        });
    }
    effects
}

pub fn process_event(state: &mut AppState, event: AppEvent) -> Vec<Effect> {
    match event {
        AppEvent::StatusLoaded { seq, status } => {
            if !state.finish_refresh(seq, status) {
                log::debug!("dropping stale status snapshot {seq}");
                return Vec::new();
            }
            match state.deferred.take() {
                Some(action) if state.mode == Mode::Menu => trigger(state, action),
                _ => Vec::new(),
            }
        }
        AppEvent::TaskFinished(outcome) => match &mut state.mode {
            Mode::Flow(flow) => {
                let step = flow.handle_outcome(outcome);
                apply_step(state, step)
            }
            Mode::Loading(action) if *action != MenuAction::Lazygit => {
                let message = direct_message(*action, outcome);
                state.mode = Mode::Menu;
                return_to_menu(state, Some(message))
            }
            _ => {
                log::warn!("dropping task outcome with no owner: {outcome:?}");
                Vec::new()
            }
        },
        AppEvent::ClearMessage { seq } => {
            state.clear_message(seq);
            Vec::new()
        }
        AppEvent::ExternalToolExited(result) => {
            if state.mode == Mode::Loading(MenuAction::Lazygit) {
                state.mode = Mode::Menu;
            }
            let message = result
                .err()
                .map(|e| (Severity::Error, format!("Lazygit error: {e}")));
            return_to_menu(state, message)
        }
    }
}

fn direct_message(action: MenuAction, outcome: TaskOutcome) -> (Severity, String) {
    let error = match outcome {
        TaskOutcome::Failed { error } => error,
        TaskOutcome::Completed { detail } => {
            let text = match action {
                MenuAction::StageAll => "All files staged".to_string(),
                MenuAction::Push => "Pushed to remote".to_string(),
                MenuAction::Pull => "Pulled from remote".to_string(),
                MenuAction::OpenInBrowser => "Opened in browser".to_string(),
                MenuAction::Branches => {
                    return (
                        Severity::Info,
                        format!("Branches: {}", detail.unwrap_or_default()),
                    );
                }
                _ => "Done".to_string(),
            };
            return (Severity::Success, text);
        }
        other => {
            log::warn!("unexpected outcome for {action:?}: {other:?}");
            return (Severity::Info, "Done".to_string());
        }
    };

    let text = match action {
        MenuAction::StageAll => format!("Failed to add: {error}"),
        MenuAction::Push => format!("Push failed: {error}"),
        MenuAction::Pull => format!("Pull failed: {error}"),
        MenuAction::OpenInBrowser => format!("Not a GitHub repo: {error}"),
        MenuAction::Branches => format!("Failed to list branches: {error}"),
        _ => format!("Error: {error}"),
    };
    (Severity::Error, text)
}
