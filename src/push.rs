use crate::error::WidgetError;
use crate::models::push::PushEvent;
use crate::surface::{Notification, Surface};
use futures::{SinkExt, StreamExt};
use log::{info, warn, error, debug};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message;
use url::Url;

/// Frames larger than this are dropped without parsing.
const MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Listener for server-pushed shop events on `/ws/{userId}`.
///
/// Connects once. Connection failures are logged and the channel simply
/// goes quiet; there is no reconnect.
pub struct PushChannel {
    task: JoinHandle<()>,
}

impl PushChannel {
    pub fn spawn(url: Url, surface: Arc<dyn Surface>) -> Self {
        let task = tokio::spawn(async move {
            if let Err(e) = listen(&url, surface).await {
                error!("Push channel {} failed: {}", url, e);
            }
        });
        Self { task }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn close(self) {
        self.task.abort();
    }
}

async fn listen(url: &Url, surface: Arc<dyn Surface>) -> Result<(), WidgetError> {
    let (websocket, _) = connect_async(url.as_str()).await?;
    info!("Push channel connected: {}", url);
    let (mut tx, mut rx) = websocket.split();

    while let Some(msg) = rx.next().await {
        let message = match msg {
            Ok(message) => message,
            Err(e) => {
                match e {
                    | tokio_tungstenite::tungstenite::Error::ConnectionClosed
                    | tokio_tungstenite::tungstenite::Error::AlreadyClosed => {
                        info!("Push channel {} closed", url);
                    }
                    tokio_tungstenite::tungstenite::Error::Io(ref io_err) if
                        io_err.kind() == std::io::ErrorKind::ConnectionReset
                    => {
                        info!("Push channel {} reset by server", url);
                    }
                    _ => {
                        error!("Error receiving push message from {}: {}", url, e);
                    }
                }
                break;
            }
        };

        if message.len() > MAX_MESSAGE_SIZE {
            warn!(
                "Push message from {} exceeds size limit ({} > {}), ignoring",
                url,
                message.len(),
                MAX_MESSAGE_SIZE
            );
            continue;
        }

        match message {
            Message::Text(text) => handle_text(&text, surface.as_ref()),
            Message::Ping(data) => {
                if tx.send(Message::Pong(data)).await.is_err() {
                    warn!("Failed to answer ping on {}", url);
                    break;
                }
            }
            Message::Close(_) => {
                info!("Received close frame on {}", url);
                break;
            }
            Message::Binary(_) => {
                warn!("Ignoring binary push message from {}", url);
            }
            Message::Pong(_) | Message::Frame(_) => {}
        }
    }
    Ok(())
}

/// Surfaces one push frame. Unknown event types are ignored silently.
pub fn handle_text(text: &str, surface: &dyn Surface) {
    match serde_json::from_str::<PushEvent>(text) {
        Ok(event) =>
            match event.banner() {
                Some(banner) => surface.notify(Notification::banner(banner)),
                None => debug!("Ignoring unrecognized push event: {}", text),
            }
        Err(e) => warn!("Failed to parse push message: {}", e),
    }
}
