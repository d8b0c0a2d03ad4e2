mod recording;
mod terminal;

pub use recording::{RecordingSurface, SurfaceEvent};
pub use terminal::TerminalSurface;

use crate::models::chat::Message;
use std::time::Duration;

/// How long a banner stays up before the surface may drop it.
pub const BANNER_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Panel,
    Chat,
}

/// Regions of the assistant panel. `Content` is the container holding the
/// other three; rendering into it replaces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Content,
    Insights,
    Recommendations,
    Metrics,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub ttl: Duration,
}

impl Notification {
    pub fn banner(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ttl: BANNER_TTL,
        }
    }
}

/// The subtree a widget paints into.
///
/// Calls come from whichever task finished the work, so implementations
/// must be callable from several tasks at once.
pub trait Surface: Send + Sync {
    fn set_visible(&self, component: Component, visible: bool);
    fn render(&self, region: Region, view: &str);
    fn notify(&self, notification: Notification);
    fn append_message(&self, message: &Message);
    /// Drops everything the component painted.
    fn clear(&self, component: Component);
}
