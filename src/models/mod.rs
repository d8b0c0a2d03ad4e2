pub mod chat;
pub mod panel;
pub mod push;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A number the backend may send either as a JSON number or as a string
/// (`12.5` or `"$12.50"`). Rendered verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Figure {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Figure::Number(n) => write!(f, "{}", n),
            Figure::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Figure {
    fn from(s: &str) -> Self {
        Figure::Text(s.to_string())
    }
}

impl From<u64> for Figure {
    fn from(n: u64) -> Self {
        Figure::Number(n.into())
    }
}
