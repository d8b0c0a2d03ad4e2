use crate::models::panel::{Insights, Metrics, Recommendations};
use serde_json::Value as JsonValue;

/// Recommendations beyond this many are dropped from the panel.
pub const MAX_RECOMMENDATIONS: usize = 2;

pub const DEFAULT_OPTIMIZATIONS: u64 = 37;
pub const DEFAULT_DECISIONS: u64 = 142;

pub const FALLBACK_VIEW: &str =
    "💡 AI Assistant Active\nAnalyzing your shopping patterns...\nSave up to 25% with AI optimization!";

pub fn insights(data: &Insights) -> String {
    let mut view = format!(
        "Your Shopping Score\n{}/100\nYou're saving {}% on average!",
        data.savings_score,
        data.percentage_saved
    );
    for insight in &data.insights {
        view.push_str("\n• ");
        view.push_str(insight);
    }
    view
}

pub fn recommendations(data: &Recommendations) -> String {
    let mut view = String::from("🎁 Recommended for You");
    for item in data.recommendations.iter().take(MAX_RECOMMENDATIONS) {
        view.push_str(&format!("\n{}  {}", item.name, item.price));
    }
    view
}

pub fn metrics(data: &Metrics) -> String {
    format!(
        "🚀 AI Performance\nOptimizations: {}\nDecisions Made: {}",
        counter(data.optimizations_applied.as_ref(), DEFAULT_OPTIMIZATIONS),
        counter(data.ai_decisions_made.as_ref(), DEFAULT_DECISIONS)
    )
}

/// Falsy values (missing, null, false, 0, NaN, "") fall back to `default`;
/// anything else is shown as sent.
fn counter(value: Option<&JsonValue>, default: u64) -> String {
    match value {
        None | Some(JsonValue::Null) | Some(JsonValue::Bool(false)) => default.to_string(),
        Some(JsonValue::Number(n)) if n.as_f64().map_or(true, |f| f == 0.0 || f.is_nan()) => {
            default.to_string()
        }
        Some(JsonValue::String(s)) if s.is_empty() => default.to_string(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
