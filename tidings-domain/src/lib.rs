//! Customer and product domain for Tidings
//!
//! Entities, the event kinds they give rise to, the handlers that react to
//! those events, and an in-memory customer repository acting as producer.
//!
//! ```rust
//! use tidings_domain::{
//!     Customer, CustomerCreated, CustomerRepository, DomainError, FirstConsoleLogHandler,
//!     InMemoryCustomerRepository, MessageLog,
//! };
//! use tidings_events::SharedEventDispatcher;
//!
//! let dispatcher = SharedEventDispatcher::new();
//! let log = MessageLog::new();
//! dispatcher.subscribe::<CustomerCreated, _>(FirstConsoleLogHandler::with_sink(log.clone()));
//!
//! let repository = InMemoryCustomerRepository::new(dispatcher);
//! repository.create(&Customer::new("123", "Fulano")?)?;
//!
//! assert_eq!(log.lines(), vec!["First log line for CustomerCreated: 123"]);
//! # Ok::<(), DomainError>(())
//! ```

pub mod entity;
pub mod error;
pub mod event;
pub mod handler;
pub mod repository;

pub use entity::{Address, Customer, Product};
pub use error::{DomainError, Result};
pub use event::{
    CustomerAddressChanged, CustomerChangeAddressEvent, CustomerCreated, CustomerCreatedEvent,
    ProductCreated, ProductCreatedEvent,
};
pub use handler::{
    ConsoleLogAddressHandler, FirstConsoleLogHandler, MessageLog, SecondConsoleLogHandler,
    SendEmailWhenProductIsCreatedHandler,
};
pub use repository::{CustomerRepository, InMemoryCustomerRepository};
