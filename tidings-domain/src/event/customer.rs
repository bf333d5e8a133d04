use crate::entity::{Address, Customer};
use serde::{Deserialize, Serialize};
use tidings_events::{DomainEvent, EventPayload};

/// Payload published after a customer is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCreated {
    pub id: String,
    pub name: String,
}

impl EventPayload for CustomerCreated {
    const NAME: &'static str = "CustomerCreatedEvent";
}

impl From<&Customer> for CustomerCreated {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id().to_string(),
            name: customer.name().to_string(),
        }
    }
}

/// Payload published after a customer's address changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAddressChanged {
    pub id: String,
    pub name: String,
    pub street: String,
    pub number: u32,
    pub zip: String,
    pub city: String,
}

impl EventPayload for CustomerAddressChanged {
    const NAME: &'static str = "CustomerChangeAddressEvent";
}

impl CustomerAddressChanged {
    pub fn new(customer: &Customer, address: &Address) -> Self {
        Self {
            id: customer.id().to_string(),
            name: customer.name().to_string(),
            street: address.street().to_string(),
            number: address.number(),
            zip: address.zip().to_string(),
            city: address.city().to_string(),
        }
    }
}

pub type CustomerCreatedEvent = DomainEvent<CustomerCreated>;
pub type CustomerChangeAddressEvent = DomainEvent<CustomerAddressChanged>;
