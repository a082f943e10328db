use std::cell::RefCell;
use std::rc::Rc;

const APP_NAME: &str = "Markup Desk";

/// Surface for warnings the user has to see.
pub trait Notifier {
    fn notify(&self, body: &str);
}

pub fn send(body: impl Into<String>) {
    let body = body.into();
    if let Err(err) = notify_rust::Notification::new()
        .appname(APP_NAME)
        .summary(APP_NAME)
        .body(&body)
        .show()
    {
        tracing::warn!("system notification failed: {err}");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, body: &str) {
        send(body);
    }
}

/// Leaves warnings in the log only; used when desktop notifications are off.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, body: &str) {
        tracing::warn!(target: "markup_desk::notification", "{body}");
    }
}

/// Keeps every message; clones share the same list.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    messages: Rc<RefCell<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, body: &str) {
        self.messages.borrow_mut().push(body.to_string());
    }
}

pub fn notifier_for(desktop_enabled: bool) -> Rc<dyn Notifier> {
    if desktop_enabled {
        Rc::new(DesktopNotifier)
    } else {
        Rc::new(LogNotifier)
    }
}
