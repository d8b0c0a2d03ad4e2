use super::Figure;
use serde::{Serialize, Deserialize};

/// Frames pushed by the server on `/ws/{userId}`, keyed by `type`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum PushEvent {
    #[serde(rename = "price_drop")] PriceDrop {
        product_name: String,
    },
    #[serde(rename = "low_stock")] LowStock {
        product_name: String,
        #[serde(default)]
        quantity: Option<Figure>,
    },
    #[serde(other)]
    Unrecognized,
}

impl PushEvent {
    /// Banner text for the event, `None` for types the widget does not know.
    pub fn banner(&self) -> Option<String> {
        match self {
            PushEvent::PriceDrop { product_name } => {
                Some(format!("📉 Price dropped on {}!", product_name))
            }
            PushEvent::LowStock { product_name, quantity: Some(quantity) } => {
                Some(format!("⚠️ Only {} left of {}!", quantity, product_name))
            }
            PushEvent::LowStock { product_name, quantity: None } => {
                Some(format!("⚠️ Only a few left of {}!", product_name))
            }
            PushEvent::Unrecognized => None,
        }
    }
}
