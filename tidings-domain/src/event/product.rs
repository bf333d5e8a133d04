use crate::entity::Product;
use serde::{Deserialize, Serialize};
use tidings_events::{DomainEvent, EventPayload};

/// Payload published after a product is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl EventPayload for ProductCreated {
    const NAME: &'static str = "ProductCreatedEvent";
}

impl From<&Product> for ProductCreated {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name().to_string(),
            description: product.description().to_string(),
            price: product.price(),
        }
    }
}

pub type ProductCreatedEvent = DomainEvent<ProductCreated>;
