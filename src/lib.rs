pub mod api;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod panel;
pub mod push;
pub mod repl;
pub mod surface;
pub mod tasks;

use chat::ChatWidget;
use cli::{Args, Command};
use config::WidgetConfig;
use identity::FileUserIdStore;
use log::info;
use panel::AssistantPanel;
use repl::Widgets;
use std::error::Error;
use std::sync::Arc;
use surface::{Surface, TerminalSurface};
use tokio::io::BufReader;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = WidgetConfig::from_args(&args)?;
    config.log_summary();

    let surface: Arc<dyn Surface> = Arc::new(TerminalSurface::stdout());
    let store = FileUserIdStore::new(&config.state_file);

    let panel = match args.command {
        Command::Panel | Command::Both => {
            Some(Arc::new(AssistantPanel::mount(config.clone(), Arc::clone(&surface), &store)?))
        }
        Command::Chat => None,
    };
    let chat = match args.command {
        Command::Chat | Command::Both => Some(Arc::new(ChatWidget::new(&config, Arc::clone(&surface))?)),
        Command::Panel => None,
    };

    println!("{}", repl::help(args.command));
    let widgets = Widgets { panel, chat };
    repl::drive(BufReader::new(tokio::io::stdin()), args.command, &widgets).await?;

    if let Some(panel) = &widgets.panel {
        panel.unmount();
    }
    if let Some(chat) = &widgets.chat {
        chat.unmount();
    }
    info!("Widgets unmounted, bye");
    Ok(())
}
