use super::{Component, Notification, Region, Surface};
use crate::models::chat::{Message, Origin};
use std::io::{self, Write};
use std::sync::Mutex;

/// Paints widgets as plain text lines.
pub struct TerminalSurface {
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalSurface {
    pub fn stdout() -> Self {
        Self::to_writer(io::stdout())
    }

    pub fn to_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }

    fn emit(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", text);
            let _ = out.flush();
        }
    }
}

impl Surface for TerminalSurface {
    fn set_visible(&self, component: Component, visible: bool) {
        let state = if visible { "opened" } else { "closed" };
        match component {
            Component::Panel => self.emit(&format!("── 🤖 AI Shopping Assistant {} ──", state)),
            Component::Chat => self.emit(&format!("── 💬 AI Assistant chat {} ──", state)),
        }
    }

    fn render(&self, region: Region, view: &str) {
        if region == Region::Content {
            self.emit("");
        }
        for line in view.lines() {
            self.emit(&format!("  {}", line));
        }
    }

    fn notify(&self, notification: Notification) {
        self.emit(&format!("[{}]", notification.message));
    }

    fn append_message(&self, message: &Message) {
        match message.origin {
            Origin::User => self.emit(&format!("you > {}", message.content)),
            Origin::Assistant => self.emit(&format!(" ai > {}", message.content)),
        }
    }

    fn clear(&self, component: Component) {
        match component {
            Component::Panel => self.emit("── 🤖 AI Shopping Assistant unmounted ──"),
            Component::Chat => self.emit("── 💬 AI Assistant chat unmounted ──"),
        }
    }
}
