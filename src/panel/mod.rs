pub mod render;

use crate::api::ApiClient;
use crate::config::WidgetConfig;
use crate::error::WidgetResult;
use crate::identity::{get_or_create_user_id, UserIdStore};
use crate::models::panel::{CartAnalysis, Insights, Metrics, Recommendations, WorkflowTrigger};
use crate::push::PushChannel;
use crate::surface::{Component, Notification, Region, Surface};
use crate::tasks::spawn_detached;
use log::{info, error, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

pub const READY_MESSAGE: &str = "🤖 AI Assistant Ready! Click the button to start saving!";
pub const ANALYZING_MESSAGE: &str = "🔍 Analyzing your cart...";
pub const MASKED_SAVINGS_MESSAGE: &str = "✨ Cart optimized! You saved $25.99!";

/// What `optimize_cart` ended up showing.
#[derive(Debug)]
pub enum OptimizeOutcome {
    /// Savings were shown and the workflow trigger is running on its own.
    Optimized {
        workflow: JoinHandle<()>,
    },
    /// The backend had nothing to offer; only the "analyzing" banner was shown.
    NothingToOptimize,
    /// The request failed and the canned savings message was shown instead.
    Masked,
}

/// Floating assistant panel: insights, recommendations, metrics, cart
/// optimization and push banners for one persisted user.
pub struct AssistantPanel {
    config: WidgetConfig,
    api: ApiClient,
    surface: Arc<dyn Surface>,
    user_id: String,
    open: AtomicBool,
    push: Mutex<Option<PushChannel>>,
    ready_banner: Mutex<Option<JoinHandle<()>>>,
}

impl AssistantPanel {
    /// Resolves the user id, builds the (hidden) panel, opens the push
    /// channel and schedules the ready banner. Must run inside a tokio runtime.
    pub fn mount(
        config: WidgetConfig,
        surface: Arc<dyn Surface>,
        store: &dyn UserIdStore
    ) -> WidgetResult<Self> {
        let user_id = get_or_create_user_id(store)?;
        let api = ApiClient::new()?;
        info!("Mounting assistant panel for {}", user_id);

        surface.set_visible(Component::Panel, false);

        let push = match config.push_url(&user_id) {
            Ok(url) => Some(PushChannel::spawn(url, Arc::clone(&surface))),
            Err(e) => {
                error!("Push notifications disabled: {}", e);
                None
            }
        };

        match config.ready_delay {
            Some(delay) => info!("Ready banner in {:?}", delay),
            None => info!("Ready banner disabled"),
        }
        let ready_banner = config.ready_delay.map(|delay| {
            let surface = Arc::clone(&surface);
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                surface.notify(Notification::banner(READY_MESSAGE));
            })
        });

        Ok(Self {
            config,
            api,
            surface,
            user_id,
            open: AtomicBool::new(false),
            push: Mutex::new(push),
            ready_banner: Mutex::new(ready_banner),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Shows or hides the panel and returns the new state. Opening reloads
    /// the content; closing leaves any in-flight load running.
    pub async fn toggle(&self) -> bool {
        let was_open = self.open.fetch_xor(true, Ordering::SeqCst);
        let now_open = !was_open;
        self.surface.set_visible(Component::Panel, now_open);
        if now_open {
            self.load_content().await;
        }
        now_open
    }

    /// Fetches insights, recommendations and metrics, in that order, and
    /// renders them. Any failure replaces the whole content region with the
    /// static fallback.
    pub async fn load_content(&self) {
        let insights = self.fetch_insights().await;
        let recommendations = self.fetch_recommendations().await;
        let metrics = self.fetch_metrics().await;

        match (insights, recommendations, metrics) {
            (Ok(insights), Ok(recommendations), Ok(metrics)) => {
                self.surface.render(Region::Insights, &render::insights(&insights));
                self.surface.render(
                    Region::Recommendations,
                    &render::recommendations(&recommendations)
                );
                self.surface.render(Region::Metrics, &render::metrics(&metrics));
            }
            (insights, recommendations, metrics) => {
                for err in [insights.err(), recommendations.err(), metrics.err()]
                    .into_iter()
                    .flatten() {
                    error!("Error loading AI content for {}: {}", self.user_id, err);
                }
                self.surface.render(Region::Content, render::FALLBACK_VIEW);
            }
        }
    }

    async fn fetch_insights(&self) -> WidgetResult<Insights> {
        let url = self.config.insights_url(&self.user_id)?;
        self.api.get_json("insights", url).await
    }

    async fn fetch_recommendations(&self) -> WidgetResult<Recommendations> {
        let url = self.config.recommendations_url(&self.user_id)?;
        self.api.get_json("recommendations", url).await
    }

    async fn fetch_metrics(&self) -> WidgetResult<Metrics> {
        let url = self.config.metrics_url()?;
        self.api.get_json("metrics", url).await
    }

    /// Asks the backend to analyze the cart. When savings are available the
    /// customer-optimization workflow is triggered in the background.
    pub async fn optimize_cart(&self) -> OptimizeOutcome {
        self.surface.notify(Notification::banner(ANALYZING_MESSAGE));

        let analysis = match self.analyze_cart().await {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("Cart analysis failed for {}, showing canned savings: {}", self.user_id, e);
                self.surface.notify(Notification::banner(MASKED_SAVINGS_MESSAGE));
                return OptimizeOutcome::Masked;
            }
        };

        if !analysis.optimization_available {
            info!("No cart optimization available for {}", self.user_id);
            return OptimizeOutcome::NothingToOptimize;
        }

        self.surface.notify(Notification::banner(savings_message(&analysis)));
        OptimizeOutcome::Optimized {
            workflow: self.trigger_workflow(),
        }
    }

    async fn analyze_cart(&self) -> WidgetResult<CartAnalysis> {
        let url = self.config.analyze_cart_url(&self.user_id)?;
        self.api.post_empty("analyze-cart", url).await
    }

    fn trigger_workflow(&self) -> JoinHandle<()> {
        let api = self.api.clone();
        let url = self.config.workflow_url();
        let body = WorkflowTrigger {
            user_id: self.user_id.clone(),
        };
        spawn_detached("customer_optimization workflow", async move {
            match url {
                Ok(url) => api.post_json_discard(url, &body).await,
                Err(e) => Err(e),
            }
        })
    }

    /// Tears the panel down: stops the push listener and the pending ready
    /// banner, then wipes what the panel painted. Safe to call twice.
    pub fn unmount(&self) {
        self.stop_background_tasks();
        self.open.store(false, Ordering::SeqCst);
        self.surface.clear(Component::Panel);
        info!("Unmounted assistant panel for {}", self.user_id);
    }

    fn stop_background_tasks(&self) {
        if let Ok(mut push) = self.push.lock() {
            if let Some(channel) = push.take() {
                channel.close();
            }
        }
        if let Ok(mut banner) = self.ready_banner.lock() {
            if let Some(handle) = banner.take() {
                handle.abort();
            }
        }
    }
}

impl Drop for AssistantPanel {
    fn drop(&mut self) {
        self.stop_background_tasks();
    }
}

fn savings_message(analysis: &CartAnalysis) -> String {
    let savings = analysis.potential_savings
        .as_ref()
        .map(|s| s.to_string())
        .unwrap_or_default();
    format!("💰 {} Save {}!", analysis.message.as_deref().unwrap_or_default(), savings)
}
