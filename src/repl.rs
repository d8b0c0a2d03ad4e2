use crate::chat::ChatWidget;
use crate::cli::Command;
use crate::panel::AssistantPanel;
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// One line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    TogglePanel,
    Optimize,
    ToggleChat,
    Say(String),
    Help,
    Quit,
    Nothing,
    Unknown(String),
}

/// In chat-only mode plain text is a chat message; commands then need a
/// leading `/`. In the other modes chat text goes after `say`.
pub fn parse(line: &str, mode: Command) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Nothing;
    }

    let command_text = match mode {
        Command::Chat => {
            match line.strip_prefix('/') {
                Some(rest) => rest,
                None => return ReplCommand::Say(line.to_string()),
            }
        }
        Command::Panel | Command::Both => line.strip_prefix('/').unwrap_or(line),
    };

    let (word, rest) = match command_text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (command_text, ""),
    };

    match word.to_lowercase().as_str() {
        "open" | "close" | "panel" | "toggle" => ReplCommand::TogglePanel,
        "optimize" => ReplCommand::Optimize,
        "chat" => ReplCommand::ToggleChat,
        "say" => ReplCommand::Say(rest.to_string()),
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        other => ReplCommand::Unknown(other.to_string()),
    }
}

pub fn help(mode: Command) -> &'static str {
    match mode {
        Command::Panel =>
            "Commands: toggle (open/close the panel), optimize, help, quit",
        Command::Chat =>
            "Type a message and press Enter. Commands: /chat (open/close), /help, /quit",
        Command::Both =>
            "Commands: toggle, optimize, chat (open/close chat), say <message>, help, quit",
    }
}

/// The widgets mounted for this session.
#[derive(Default, Clone)]
pub struct Widgets {
    pub panel: Option<Arc<AssistantPanel>>,
    pub chat: Option<Arc<ChatWidget>>,
}

/// Reads commands until `quit` or end of input.
///
/// Widget actions run on their own tasks, so a slow or hung request never
/// stops the prompt from reading the next line.
pub async fn drive<R>(input: R, mode: Command, widgets: &Widgets) -> io::Result<()>
    where R: AsyncBufRead + Unpin
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match (parse(&line, mode), widgets.panel.as_ref(), widgets.chat.as_ref()) {
            (ReplCommand::TogglePanel, Some(panel), _) => {
                let panel = Arc::clone(panel);
                tokio::spawn(async move {
                    panel.toggle().await;
                });
            }
            (ReplCommand::Optimize, Some(panel), _) => {
                let panel = Arc::clone(panel);
                tokio::spawn(async move {
                    panel.optimize_cart().await;
                });
            }
            (ReplCommand::ToggleChat, _, Some(chat)) => {
                chat.toggle();
            }
            (ReplCommand::Say(text), _, Some(chat)) => {
                let chat = Arc::clone(chat);
                tokio::spawn(async move {
                    let mut input = text;
                    chat.send(&mut input).await;
                });
            }
            (ReplCommand::Help, _, _) => println!("{}", help(mode)),
            (ReplCommand::Quit, _, _) => break,
            (ReplCommand::Nothing, _, _) => {}
            (ReplCommand::Unknown(word), _, _) => {
                println!("Unknown command '{}'. Type 'help' for the list.", word);
            }
            _ => println!("That widget is not mounted in this mode."),
        }
    }
    Ok(())
}
