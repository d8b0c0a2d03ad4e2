use crate::api::ApiClient;
use crate::config::WidgetConfig;
use crate::error::WidgetResult;
use crate::identity::generate_conversation_id;
use crate::models::chat::{ChatReply, ChatRequest, Message};
use crate::surface::{Component, Surface};
use log::{info, error};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const GREETING: &str = "Hi! I'm your AI shopping assistant. How can I help you today?";
pub const APOLOGY: &str = "Sorry, I had trouble processing that.";

/// Toggleable chat window bound to one conversation id.
///
/// `send` takes `&self`, so several sends may be in flight at once; replies
/// land in the transcript in whatever order the network completes them.
pub struct ChatWidget {
    api: ApiClient,
    endpoint: url::Url,
    conversation_id: String,
    surface: Arc<dyn Surface>,
    open: AtomicBool,
    transcript: Mutex<Vec<Message>>,
}

impl ChatWidget {
    pub fn new(config: &WidgetConfig, surface: Arc<dyn Surface>) -> WidgetResult<Self> {
        let conversation_id = generate_conversation_id();
        info!("Chat widget started conversation {}", conversation_id);
        surface.set_visible(Component::Chat, false);

        let widget = Self {
            api: ApiClient::new()?,
            endpoint: config.chat_endpoint.clone(),
            conversation_id,
            surface,
            open: AtomicBool::new(false),
            transcript: Mutex::new(Vec::new()),
        };
        widget.add_message(Message::assistant(GREETING));
        Ok(widget)
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn toggle(&self) -> bool {
        let now_open = !self.open.fetch_xor(true, Ordering::SeqCst);
        self.surface.set_visible(Component::Chat, now_open);
        now_open
    }

    pub fn transcript(&self) -> Vec<Message> {
        match self.transcript.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Key handler for the input box: Enter sends, anything else is ignored.
    pub async fn submit_key(&self, key: &str, input: &mut String) -> Option<Message> {
        if key != "Enter" {
            return None;
        }
        self.send(input).await
    }

    /// Sends the trimmed input. Blank input is ignored; otherwise the input is
    /// cleared, the user's text is echoed right away, and the reply (or an
    /// apology) is appended once the request finishes. Returns that reply.
    pub async fn send(&self, input: &mut String) -> Option<Message> {
        let text = input.trim().to_string();
        if text.is_empty() {
            return None;
        }
        input.clear();
        self.add_message(Message::user(text.as_str()));

        let reply = match self.request_reply(text).await {
            Ok(reply) => Message::assistant(reply.response),
            Err(e) => {
                error!("Chat request for {} failed: {}", self.conversation_id, e);
                Message::assistant(APOLOGY)
            }
        };
        self.add_message(reply.clone());
        Some(reply)
    }

    async fn request_reply(&self, message: String) -> WidgetResult<ChatReply> {
        let body = ChatRequest {
            message,
            conversation_id: self.conversation_id.clone(),
        };
        self.api.post_json("ai-chat", self.endpoint.clone(), &body).await
    }

    fn add_message(&self, message: Message) {
        self.surface.append_message(&message);
        match self.transcript.lock() {
            Ok(mut messages) => messages.push(message),
            Err(poisoned) => poisoned.into_inner().push(message),
        }
    }

    /// Hides the window and wipes what it painted. The transcript is kept.
    pub fn unmount(&self) {
        self.open.store(false, Ordering::SeqCst);
        self.surface.clear(Component::Chat);
        info!("Unmounted chat widget for conversation {}", self.conversation_id);
    }
}
