use gitty_core::{
    event::AppEvent,
    task::{self, Task, TaskContext},
};
use std::{thread, time::Duration};

use super::EventSender;

pub(super) fn spawn_task(ctx: &TaskContext, sender: &EventSender, task: Task) {
    let ctx = ctx.clone();
    let sender = sender.clone();
    thread::spawn(move || {
        let outcome = task::execute(&ctx, task);
        sender.send(AppEvent::TaskFinished(outcome));
    });
}

pub(super) fn spawn_status_refresh(ctx: &TaskContext, sender: &EventSender, seq: u64) {
    let ctx = ctx.clone();
    let sender = sender.clone();
    thread::spawn(move || {
        let status = task::read_status(&ctx);
        sender.send(AppEvent::StatusLoaded { seq, status });
    });
}

pub(super) fn spawn_message_clear(sender: &EventSender, seq: u64, after: Duration) {
    let sender = sender.clone();
    thread::spawn(move || {
        thread::sleep(after);
        sender.send(AppEvent::ClearMessage { seq });
    });
}
