//! The repository publishes one event per logical occurrence.

use std::sync::{Arc, Mutex};
use tidings_domain::*;
use tidings_events::{
    DispatcherConfigBuilder, EventHandler, EventHandlerError, FailurePolicy, SharedEventDispatcher,
};

#[derive(Clone, Default)]
struct AddressSpy {
    calls: Arc<Mutex<Vec<CustomerAddressChanged>>>,
}

impl EventHandler<CustomerAddressChanged> for AddressSpy {
    fn handle(
        &self,
        event: &CustomerChangeAddressEvent,
    ) -> std::result::Result<(), EventHandlerError> {
        self.calls.lock().unwrap().push(event.payload().clone());
        Ok(())
    }
}

fn customer_with_address(id: &str, name: &str) -> Customer {
    let mut customer = Customer::new(id, name).unwrap();
    customer.change_address(Address::new("Rua tal", 123, "99.999-999", "Raio Q Parta").unwrap());
    customer
}

#[test]
fn test_create_runs_created_handlers_in_order() {
    let dispatcher = SharedEventDispatcher::new();
    let log = MessageLog::new();
    dispatcher.subscribe::<CustomerCreated, _>(FirstConsoleLogHandler::with_sink(log.clone()));
    dispatcher.subscribe::<CustomerCreated, _>(SecondConsoleLogHandler::with_sink(log.clone()));

    assert_eq!(dispatcher.handler_count("CustomerCreatedEvent"), 2);

    let repository = InMemoryCustomerRepository::new(dispatcher);
    repository.create(&customer_with_address("123", "Fulano")).unwrap();

    assert_eq!(
        log.lines(),
        vec![
            "First log line for CustomerCreated: 123",
            "Second log line for CustomerCreated: 123",
        ]
    );
}

#[test]
fn test_address_change_publishes_exact_payload_once() {
    let dispatcher = SharedEventDispatcher::new();
    let spy = AddressSpy::default();
    dispatcher.subscribe::<CustomerAddressChanged, _>(spy.clone());

    let repository = InMemoryCustomerRepository::new(dispatcher);
    let mut customer = customer_with_address("123", "Fulano");
    repository.create(&customer).unwrap();
    assert!(spy.calls.lock().unwrap().is_empty());

    customer.change_address(Address::new("Rua dos Bobos", 7, "88.888-888", "Valfenda").unwrap());
    repository.update(&customer).unwrap();

    assert_eq!(
        *spy.calls.lock().unwrap(),
        vec![CustomerAddressChanged {
            id: "123".to_string(),
            name: "Fulano".to_string(),
            street: "Rua dos Bobos".to_string(),
            number: 7,
            zip: "88.888-888".to_string(),
            city: "Valfenda".to_string(),
        }]
    );

    let stored = repository.find("123").unwrap();
    assert_eq!(stored.address().map(|a| a.city()), Some("Valfenda"));
}

#[test]
fn test_update_without_address_change_is_quiet() {
    let dispatcher = SharedEventDispatcher::new();
    let spy = AddressSpy::default();
    dispatcher.subscribe::<CustomerAddressChanged, _>(spy.clone());

    let repository = InMemoryCustomerRepository::new(dispatcher);
    let mut customer = customer_with_address("123", "Fulano");
    repository.create(&customer).unwrap();

    customer.change_name("Siclano").unwrap();
    repository.update(&customer).unwrap();

    assert!(spy.calls.lock().unwrap().is_empty());
}

#[test]
fn test_create_without_subscribers_succeeds() {
    let repository = InMemoryCustomerRepository::new(SharedEventDispatcher::new());
    repository.create(&customer_with_address("123", "Fulano")).unwrap();
    assert_eq!(repository.find_all().len(), 1);
}

struct Unreachable;

impl EventHandler<CustomerCreated> for Unreachable {
    fn handle(&self, _event: &CustomerCreatedEvent) -> std::result::Result<(), EventHandlerError> {
        Err(EventHandlerError::HandlerFailed("mail server down".to_string()))
    }
}

#[test]
fn test_dispatch_failure_surfaces_after_store() {
    let dispatcher = SharedEventDispatcher::with_config(
        DispatcherConfigBuilder::new()
            .failure_policy(FailurePolicy::AbortOnFirstError)
            .build(),
    );
    let log = MessageLog::new();
    dispatcher.subscribe::<CustomerCreated, _>(Unreachable);
    dispatcher.subscribe::<CustomerCreated, _>(SecondConsoleLogHandler::with_sink(log.clone()));

    let repository = InMemoryCustomerRepository::new(dispatcher);
    let err = repository
        .create(&customer_with_address("123", "Fulano"))
        .unwrap_err();

    assert!(matches!(err, DomainError::Dispatch(_)));
    assert!(log.lines().is_empty());
    assert!(repository.find("123").is_ok());
}

#[test]
fn test_product_created_handler() {
    let dispatcher = SharedEventDispatcher::new();
    let log = MessageLog::new();
    dispatcher.subscribe::<ProductCreated, _>(SendEmailWhenProductIsCreatedHandler::with_sink(
        log.clone(),
    ));

    let product = Product::new("p1", "Product 1", "Description product", 50.0).unwrap();
    dispatcher
        .notify(&ProductCreatedEvent::new(ProductCreated::from(&product)))
        .unwrap();

    assert_eq!(
        log.lines(),
        vec!["Sending email: product Product 1 created at 50.00"]
    );
}
