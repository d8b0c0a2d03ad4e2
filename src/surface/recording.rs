use super::{Component, Notification, Region, Surface};
use crate::models::chat::Message;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Visible(Component, bool),
    Rendered(Region, String),
    Notified(Notification),
    Appended(Message),
    Cleared(Component),
}

#[derive(Default)]
struct State {
    events: Vec<SurfaceEvent>,
    regions: HashMap<Region, String>,
    visible: HashMap<Component, bool>,
}

/// Keeps everything painted in memory so it can be inspected afterwards.
#[derive(Default)]
pub struct RecordingSurface {
    state: Mutex<State>,
    changed: Notify,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, apply: impl FnOnce(&mut State)) {
        if let Ok(mut state) = self.state.lock() {
            apply(&mut state);
        }
        self.changed.notify_waiters();
    }

    fn read<T>(&self, f: impl FnOnce(&State) -> T) -> T {
        match self.state.lock() {
            Ok(state) => f(&state),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.read(|s| s.events.clone())
    }

    /// Current contents of a region, if it is on screen.
    pub fn region(&self, region: Region) -> Option<String> {
        self.read(|s| s.regions.get(&region).cloned())
    }

    pub fn is_visible(&self, component: Component) -> bool {
        self.read(|s| s.visible.get(&component).copied().unwrap_or(false))
    }

    pub fn notifications(&self) -> Vec<String> {
        self.read(|s| {
            s.events
                .iter()
                .filter_map(|e| match e {
                    SurfaceEvent::Notified(n) => Some(n.message.clone()),
                    _ => None,
                })
                .collect()
        })
    }

    pub fn messages(&self) -> Vec<Message> {
        self.read(|s| {
            s.events
                .iter()
                .filter_map(|e| match e {
                    SurfaceEvent::Appended(m) => Some(m.clone()),
                    _ => None,
                })
                .collect()
        })
    }

    /// Waits until `predicate` holds or `timeout` elapses. Returns whether it held.
    pub async fn wait_for(&self, timeout: Duration, predicate: impl Fn(&Self) -> bool) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let changed = self.changed.notified();
            if predicate(self) {
                return true;
            }
            if tokio::time::timeout_at(deadline, changed).await.is_err() {
                return predicate(self);
            }
        }
    }
}

impl Surface for RecordingSurface {
    fn set_visible(&self, component: Component, visible: bool) {
        self.record(|s| {
            s.visible.insert(component, visible);
            s.events.push(SurfaceEvent::Visible(component, visible));
        });
    }

    fn render(&self, region: Region, view: &str) {
        self.record(|s| {
            if region == Region::Content {
                s.regions.clear();
            } else {
                s.regions.remove(&Region::Content);
            }
            s.regions.insert(region, view.to_string());
            s.events.push(SurfaceEvent::Rendered(region, view.to_string()));
        });
    }

    fn notify(&self, notification: Notification) {
        self.record(|s| s.events.push(SurfaceEvent::Notified(notification)));
    }

    fn append_message(&self, message: &Message) {
        self.record(|s| s.events.push(SurfaceEvent::Appended(message.clone())));
    }

    fn clear(&self, component: Component) {
        self.record(|s| {
            if component == Component::Panel {
                s.regions.clear();
            }
            s.visible.insert(component, false);
            s.events.push(SurfaceEvent::Cleared(component));
        });
    }
}
