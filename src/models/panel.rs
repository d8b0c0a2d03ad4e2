use super::Figure;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Deserialize)]
pub struct Insights {
    pub savings_score: Figure,
    pub percentage_saved: Figure,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Recommendations {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub price: Figure,
}

/// Counters from `GET /metrics`. Both are optional on the wire and shown
/// verbatim, whatever JSON type the backend picks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metrics {
    #[serde(default)]
    pub optimizations_applied: Option<JsonValue>,
    #[serde(default)]
    pub ai_decisions_made: Option<JsonValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartAnalysis {
    #[serde(default)]
    pub optimization_available: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub potential_savings: Option<Figure>,
}

/// Body of `POST /workflow/customer_optimization`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowTrigger {
    pub user_id: String,
}
