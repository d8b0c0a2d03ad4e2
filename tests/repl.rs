mod support;

use assistant_widgets::chat::ChatWidget;
use assistant_widgets::cli::Command;
use assistant_widgets::config::WidgetConfig;
use assistant_widgets::identity::MemoryUserIdStore;
use assistant_widgets::models::chat::Origin;
use assistant_widgets::panel::AssistantPanel;
use assistant_widgets::repl::{drive, Widgets};
use assistant_widgets::surface::{Component, RecordingSurface};
use std::sync::Arc;
use std::time::Duration;
use support::{start_silent_backend, Behaviour, MockBackend, DEAD_WS, WAIT};

#[tokio::test]
async fn quit_is_read_while_chat_request_hangs() {
    let base = start_silent_backend().await;
    let config = WidgetConfig::single_origin(&base, DEAD_WS).unwrap();
    let surface = Arc::new(RecordingSurface::new());
    let widgets = Widgets {
        panel: None,
        chat: Some(Arc::new(ChatWidget::new(&config, surface.clone()).unwrap())),
    };

    let input: &[u8] = b"hello\n/quit\n";
    let finished = tokio::time::timeout(WAIT, drive(input, Command::Chat, &widgets)).await;
    assert!(matches!(finished, Ok(Ok(()))));

    let echoed = surface.wait_for(WAIT, |s| s.messages().len() == 2).await;
    assert!(echoed);
    let transcript = widgets.chat.as_ref().unwrap().transcript();
    assert_eq!(transcript[1].content, "hello");
    assert_eq!(transcript[1].origin, Origin::User);
}

#[tokio::test]
async fn quit_is_read_while_panel_load_hangs() {
    let base = start_silent_backend().await;
    let config = WidgetConfig::single_origin(&base, DEAD_WS).unwrap();
    let surface = Arc::new(RecordingSurface::new());
    let panel = AssistantPanel::mount(config, surface.clone(), &MemoryUserIdStore::default()).unwrap();
    let widgets = Widgets {
        panel: Some(Arc::new(panel)),
        chat: None,
    };

    let input: &[u8] = b"toggle\noptimize\nquit\n";
    let finished = tokio::time::timeout(WAIT, drive(input, Command::Panel, &widgets)).await;
    assert!(matches!(finished, Ok(Ok(()))));

    let opened = surface.wait_for(WAIT, |s| s.is_visible(Component::Panel)).await;
    assert!(opened);
}

#[tokio::test]
async fn sends_from_the_prompt_run_concurrently() {
    let backend = MockBackend::start(Behaviour {
        chat_delay: Duration::from_millis(200),
        ..Behaviour::default()
    }).await;
    let surface = Arc::new(RecordingSurface::new());
    let widgets = Widgets {
        panel: None,
        chat: Some(Arc::new(ChatWidget::new(&backend.config(DEAD_WS), surface.clone()).unwrap())),
    };

    let input: &[u8] = b"one\ntwo\n";
    drive(input, Command::Chat, &widgets).await.unwrap();

    // both user messages are echoed before either reply lands
    let both_sent = surface.wait_for(WAIT, |s| s.messages().len() >= 3).await;
    assert!(both_sent);
    let early: Vec<_> = surface
        .messages()
        .into_iter()
        .take(3)
        .map(|m| m.origin)
        .collect();
    assert_eq!(early, vec![Origin::Assistant, Origin::User, Origin::User]);

    let replied = surface.wait_for(WAIT, |s| s.messages().len() == 5).await;
    assert!(replied);
}
