use super::Address;
use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Customer entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: String,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: u32,
}

impl Customer {
    /// Create an inactive customer without address
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address: None,
            active: false,
            reward_points: 0,
        };
        customer.validate()?;
        Ok(customer)
    }

    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(DomainError::validation("Customer", "id", "Id is required"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Customer", "name", "Name is required"));
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reward_points(&self) -> u32 {
        self.reward_points
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Customer", "name", "Name is required"));
        }
        self.name = name;
        Ok(())
    }

    pub fn change_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    /// Activate the customer. An address must be set first.
    pub fn activate(&mut self) -> Result<()> {
        if self.address.is_none() {
            return Err(DomainError::validation(
                "Customer",
                "address",
                "Address is mandatory to activate a customer",
            ));
        }
        self.active = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn add_reward_points(&mut self, points: u32) {
        self.reward_points = self.reward_points.saturating_add(points);
    }

    /// Remove points; the balance never drops below zero.
    pub fn remove_reward_points(&mut self, points: u32) {
        self.reward_points = self.reward_points.saturating_sub(points);
    }
}
