use crate::cli::Args;
use crate::error::{WidgetError, WidgetResult};
use log::info;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Resolved endpoints and knobs shared by both widgets.
///
/// Built once from [`Args`] in the binary, or by hand in tests. Components
/// receive it by value and never look at the command line themselves.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub ai_api_base: Url,
    pub a2a_api_base: Url,
    pub ws_base: Url,
    pub chat_endpoint: Url,
    pub state_file: PathBuf,
    pub ready_delay: Option<Duration>,
}

impl WidgetConfig {
    pub fn from_args(args: &Args) -> WidgetResult<Self> {
        let ai_api_base = match &args.ai_api_base {
            Some(base) => parse_base(base)?,
            None => parse_base(&format!("{}://{}:{}", args.scheme, args.host, args.ai_api_port))?,
        };
        let a2a_api_base = match &args.a2a_api_base {
            Some(base) => parse_base(base)?,
            None => parse_base(&format!("{}://{}:{}", args.scheme, args.host, args.a2a_api_port))?,
        };
        let ws_base = parse_base(&format!("ws://{}:{}", args.host, args.ws_port))?;
        let chat_base = match &args.chat_base {
            Some(base) => parse_base(base)?,
            None => ai_api_base.clone(),
        };
        let chat_endpoint = chat_base.join(&args.chat_path)?;

        Ok(Self {
            ai_api_base,
            a2a_api_base,
            ws_base,
            chat_endpoint,
            state_file: PathBuf::from(&args.state_file),
            ready_delay: match args.ready_delay_ms {
                0 => None,
                ms => Some(Duration::from_millis(ms)),
            },
        })
    }

    /// Config pointing every endpoint at a single origin, as used by a local
    /// backend that serves HTTP and the push socket on one port.
    pub fn single_origin(http_base: &str, ws_base: &str) -> WidgetResult<Self> {
        let base = parse_base(http_base)?;
        Ok(Self {
            ai_api_base: base.clone(),
            a2a_api_base: base.clone(),
            ws_base: parse_base(ws_base)?,
            chat_endpoint: base.join("/api/ai-chat")?,
            state_file: PathBuf::from(".assistant-widgets.json"),
            ready_delay: None,
        })
    }

    pub fn insights_url(&self, user_id: &str) -> WidgetResult<Url> {
        endpoint(&self.ai_api_base, &["insights", user_id])
    }

    pub fn recommendations_url(&self, user_id: &str) -> WidgetResult<Url> {
        endpoint(&self.ai_api_base, &["recommendations", user_id])
    }

    pub fn metrics_url(&self) -> WidgetResult<Url> {
        endpoint(&self.ai_api_base, &["metrics"])
    }

    pub fn analyze_cart_url(&self, user_id: &str) -> WidgetResult<Url> {
        endpoint(&self.ai_api_base, &["analyze-cart", user_id])
    }

    pub fn workflow_url(&self) -> WidgetResult<Url> {
        endpoint(&self.a2a_api_base, &["workflow", "customer_optimization"])
    }

    pub fn push_url(&self, user_id: &str) -> WidgetResult<Url> {
        endpoint(&self.ws_base, &["ws", user_id])
    }

    pub fn log_summary(&self) {
        for line in self.summary_lines() {
            info!("{}", line);
        }
    }

    fn summary_lines(&self) -> Vec<String> {
        vec![
            "--- Widget Configuration ---".to_string(),
            format!("AI API Base: {}", self.ai_api_base),
            format!("A2A API Base: {}", self.a2a_api_base),
            format!("Push Socket Base: {}", self.ws_base),
            format!("Chat Endpoint: {}", self.chat_endpoint),
            format!("State File: {}", self.state_file.display()),
            "----------------------------".to_string()
        ]
    }
}

fn parse_base(raw: &str) -> WidgetResult<Url> {
    let url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(WidgetError::Config(format!("'{}' cannot be used as a base URL", raw)));
    }
    Ok(url)
}

/// Appends path segments to a base, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> WidgetResult<Url> {
    let mut url = base.clone();
    url
        .path_segments_mut()
        .map_err(|_| WidgetError::Config(format!("'{}' cannot be used as a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
