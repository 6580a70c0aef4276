mod spawn;

use crate::{components, keymap, theme::Theme};
use crossterm::event::{self, Event, KeyEventKind};
use gitty_core::{
    controller,
    effect::{Effect, ExternalTool},
    event::AppEvent,
    flow::SubFlow,
    state::{AppState, Mode},
    task::TaskContext,
};
use ratatui::{DefaultTerminal, Frame};
use spawn::{spawn_message_clear, spawn_status_refresh, spawn_task};
use std::{
    sync::mpsc,
    time::{Duration, Instant},
};

/// Handle for dispatching background work
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSender {
    /// Send an event from a background thread to the main loop
    pub fn send(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn run(
    terminal: &mut DefaultTerminal,
    state: &mut AppState,
    ctx: &TaskContext,
    theme: &Theme,
) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel::<AppEvent>();
    let sender = EventSender { tx };
    let spinner_start = Instant::now();

    let effects = controller::init(state);
    apply_effects(terminal, effects, ctx, &sender);

    loop {
        if state.is_quitting() {
            return Ok(());
        }

        terminal.draw(|f| draw(f, state, theme, spinner_frame(&spinner_start)))?;

        // Check background channel (non-blocking)
        if let Ok(app_event) = rx.try_recv() {
            let effects = controller::process_event(state, app_event);
            apply_effects(terminal, effects, ctx, &sender);
            continue;
        }

        // Poll terminal events with a timeout so we can update spinner + check channel
        if event::poll(Duration::from_millis(80))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = keymap::resolve_action(key, &state.key_context()) {
                let effects = controller::process_action(state, action);
                apply_effects(terminal, effects, ctx, &sender);
            }
        }
    }
}

fn apply_effects(
    terminal: &mut DefaultTerminal,
    effects: Vec<Effect>,
    ctx: &TaskContext,
    sender: &EventSender,
) {
    for effect in effects {
        if let Some(tool) = dispatch(effect, ctx, sender) {
            run_external(terminal, tool, ctx, sender);
        }
    }
}

/// Start background work for an effect. Returns the tool to run if the
/// effect needs the terminal itself.
fn dispatch(effect: Effect, ctx: &TaskContext, sender: &EventSender) -> Option<ExternalTool> {
    match effect {
        Effect::Spawn(task) => spawn_task(ctx, sender, task),
        Effect::RefreshStatus { seq } => spawn_status_refresh(ctx, sender, seq),
        Effect::ScheduleMessageClear { seq, after } => spawn_message_clear(sender, seq, after),
        Effect::RunExternal(tool) => return Some(tool),
        Effect::Quit => log::debug!("quit requested"),
    }
    None
}

/// Hand the terminal to `tool` and take it back once it exits.
fn run_external(
    terminal: &mut DefaultTerminal,
    tool: ExternalTool,
    ctx: &TaskContext,
    sender: &EventSender,
) {
    ratatui::restore();
    let result = ctx.git.runner().run_interactive(tool.program(), &[]);
    *terminal = ratatui::init();
    if let Err(e) = &result {
        log::warn!("{} failed: {e:#}", tool.program());
    }
    sender.send(AppEvent::ExternalToolExited(
        result.map_err(|e| format!("{e:#}")),
    ));
}

fn spinner_frame(start: &Instant) -> &'static str {
    let elapsed = start.elapsed().as_millis() as usize;
    SPINNER_FRAMES[(elapsed / 80) % SPINNER_FRAMES.len()]
}

fn draw(f: &mut Frame, state: &AppState, theme: &Theme, spinner: &str) {
    let area = f.area();
    components::menu::draw(f, area, state, theme, spinner);

    if let Mode::Flow(flow) = &state.mode {
        match flow {
            SubFlow::Commit(flow) => components::commit::draw(f, area, flow, spinner, theme),
            SubFlow::Discard(flow) => components::confirm::draw(f, area, flow, spinner, theme),
            SubFlow::Release(flow) => components::release::draw(f, area, flow, spinner, theme),
            SubFlow::Publish(flow) => components::publish::draw(f, area, flow, spinner, theme),
        }
    }
}
