use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    // --- Host Args ---
    /// Hostname of the shop backend; every endpoint below is derived from it unless overridden.
    #[arg(long, env = "WIDGET_HOST", default_value = "localhost", global = true)]
    pub host: String,

    /// URL scheme for the HTTP endpoints (http, https)
    #[arg(long, env = "WIDGET_SCHEME", default_value = "http", global = true)]
    pub scheme: String,

    // --- Assistant Panel Args ---
    /// Port of the AI API (insights, recommendations, metrics, analyze-cart)
    #[arg(long, env = "AI_API_PORT", default_value = "8080", global = true)]
    pub ai_api_port: u16,

    /// Port of the agent-to-agent API (workflow triggers)
    #[arg(long, env = "A2A_API_PORT", default_value = "8081", global = true)]
    pub a2a_api_port: u16,

    /// Port of the push notification WebSocket
    #[arg(long, env = "WS_PORT", default_value = "8081", global = true)]
    pub ws_port: u16,

    /// Full base URL of the AI API. Overrides --scheme/--host/--ai-api-port.
    #[arg(long, env = "AI_API_BASE", global = true)]
    pub ai_api_base: Option<String>,

    /// Full base URL of the agent-to-agent API. Overrides --scheme/--host/--a2a-api-port.
    #[arg(long, env = "A2A_API_BASE", global = true)]
    pub a2a_api_base: Option<String>,

    /// Where the persisted user id lives.
    #[arg(long, env = "WIDGET_STATE_FILE", default_value = ".assistant-widgets.json", global = true)]
    pub state_file: String,

    /// Delay before the "assistant ready" banner, in milliseconds. 0 disables it.
    #[arg(long, env = "READY_DELAY_MS", default_value = "2000", global = true)]
    pub ready_delay_ms: u64,

    // --- Chat Widget Args ---
    /// Base URL the chat path is resolved against. Defaults to the AI API base.
    #[arg(long, env = "CHAT_BASE", global = true)]
    pub chat_base: Option<String>,

    /// Path of the chat endpoint
    #[arg(long, env = "CHAT_PATH", default_value = "/api/ai-chat", global = true)]
    pub chat_path: String,

    // --- General App Args ---
    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false", global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Mount the assistant panel (insights, recommendations, cart optimization, push banners)
    Panel,
    /// Mount the chat widget
    Chat,
    /// Mount both widgets side by side
    Both,
}
