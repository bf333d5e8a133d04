//! Customer repository

use crate::entity::Customer;
use crate::error::{DomainError, Result};
use crate::event::{
    CustomerAddressChanged, CustomerChangeAddressEvent, CustomerCreated, CustomerCreatedEvent,
};
use dashmap::DashMap;
use std::sync::Arc;
use tidings_events::SharedEventDispatcher;
use tidings_log::debug;

const TARGET: &str = "tidings::repository";

/// Customer storage
pub trait CustomerRepository: Send + Sync {
    /// Store a new customer
    fn create(&self, customer: &Customer) -> Result<()>;

    /// Replace a stored customer
    fn update(&self, customer: &Customer) -> Result<()>;

    /// Load a customer by ID
    fn find(&self, id: &str) -> Result<Customer>;

    /// Load every customer, ordered by ID
    fn find_all(&self) -> Vec<Customer>;

    /// Credit reward points to a stored customer
    fn add_reward_points(&self, id: &str, points: u32) -> Result<()>;

    /// Debit reward points from a stored customer, stopping at zero
    fn remove_reward_points(&self, id: &str, points: u32) -> Result<()>;
}

/// In-memory customer repository that publishes domain events
///
/// `create` publishes one `CustomerCreatedEvent`; `update` publishes one
/// `CustomerChangeAddressEvent` when the address differs from the stored one.
/// Events are published after the change is stored. A dispatch failure is
/// returned to the caller but does not roll the change back.
#[derive(Clone)]
pub struct InMemoryCustomerRepository {
    customers: Arc<DashMap<String, Customer>>,
    dispatcher: SharedEventDispatcher,
}

impl InMemoryCustomerRepository {
    /// Create new repository publishing through `dispatcher`
    pub fn new(dispatcher: SharedEventDispatcher) -> Self {
        Self {
            customers: Arc::new(DashMap::new()),
            dispatcher,
        }
    }

    /// Dispatcher used for publishing
    pub fn dispatcher(&self) -> &SharedEventDispatcher {
        &self.dispatcher
    }

    fn modify<F>(&self, id: &str, change: F) -> Result<()>
    where
        F: FnOnce(&mut Customer),
    {
        let mut entry = self
            .customers
            .get_mut(id)
            .ok_or_else(|| DomainError::CustomerNotFound(id.to_string()))?;
        change(entry.value_mut());
        Ok(())
    }
}

impl CustomerRepository for InMemoryCustomerRepository {
    fn create(&self, customer: &Customer) -> Result<()> {
        match self.customers.entry(customer.id().to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                return Err(DomainError::CustomerAlreadyExists(customer.id().to_string()));
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(customer.clone());
            }
        }

        debug!(target: TARGET, "Created customer {}", customer.id());

        let event = CustomerCreatedEvent::new(CustomerCreated::from(customer));
        self.dispatcher.notify(&event)?;
        Ok(())
    }

    fn update(&self, customer: &Customer) -> Result<()> {
        let previous = {
            let mut entry = self
                .customers
                .get_mut(customer.id())
                .ok_or_else(|| DomainError::CustomerNotFound(customer.id().to_string()))?;
            std::mem::replace(entry.value_mut(), customer.clone())
        };

        debug!(target: TARGET, "Updated customer {}", customer.id());

        if let Some(address) = customer.address()
            && previous.address() != Some(address)
        {
            let event =
                CustomerChangeAddressEvent::new(CustomerAddressChanged::new(customer, address));
            self.dispatcher.notify(&event)?;
        }

        Ok(())
    }

    fn find(&self, id: &str) -> Result<Customer> {
        self.customers
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DomainError::CustomerNotFound(id.to_string()))
    }

    fn find_all(&self) -> Vec<Customer> {
        let mut customers: Vec<Customer> = self
            .customers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        customers.sort_by(|a, b| a.id().cmp(b.id()));
        customers
    }

    fn add_reward_points(&self, id: &str, points: u32) -> Result<()> {
        self.modify(id, |customer| customer.add_reward_points(points))
    }

    fn remove_reward_points(&self, id: &str, points: u32) -> Result<()> {
        self.modify(id, |customer| customer.remove_reward_points(points))
    }
}
