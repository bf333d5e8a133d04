//! In-process event dispatching for Tidings
//!
//! This crate lets independent parts of an application subscribe to named
//! occurrences and be invoked, synchronously, when those occurrences are
//! published.
//!
//! ## Features
//!
//! - **Dispatcher** - Ordered handler lists per event name
//! - **Typed handlers** - Compile-time event names through [`EventPayload::NAME`]
//! - **Identity-based removal** - Handlers are unregistered by instance
//! - **Failure policy** - Continue-and-collect or abort-on-first-error
//! - **Shared dispatcher** - Lock-guarded variant for multi-threaded use
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Serialize;
//! use tidings_events::*;
//!
//! // Define an event kind
//! #[derive(Debug, Clone, Serialize)]
//! struct UserCreated {
//!     email: String,
//! }
//!
//! impl EventPayload for UserCreated {
//!     const NAME: &'static str = "UserCreatedEvent";
//! }
//!
//! // Define a handler
//! struct WelcomeEmail;
//!
//! impl EventHandler<UserCreated> for WelcomeEmail {
//!     fn handle(&self, event: &DomainEvent<UserCreated>) -> Result<(), EventHandlerError> {
//!         println!("Sending welcome email to {}", event.payload().email);
//!         Ok(())
//!     }
//! }
//!
//! let mut dispatcher = EventDispatcher::new();
//! let handle = dispatcher.subscribe::<UserCreated, _>(WelcomeEmail);
//!
//! let event = DomainEvent::new(UserCreated {
//!     email: "alice@example.com".to_string(),
//! });
//! dispatcher.notify(&event).unwrap();
//!
//! dispatcher.unregister(UserCreated::NAME, &handle);
//! ```
//!
//! ## Registering by name
//!
//! ```rust,ignore
//! // Same instance registered twice is invoked twice
//! let handler = handler_ref::<UserCreated, _>(AuditHandler::new());
//! dispatcher.register("UserCreatedEvent", handler.clone());
//! dispatcher.register("UserCreatedEvent", handler.clone());
//!
//! // Removes only the first registration
//! dispatcher.unregister("UserCreatedEvent", &handler);
//! ```
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! let config = DispatcherConfigBuilder::new()
//!     .failure_policy(FailurePolicy::AbortOnFirstError)
//!     .build();
//! let dispatcher = EventDispatcher::with_config(config);
//!
//! match dispatcher.notify(&event) {
//!     Ok(()) => println!("All handlers succeeded"),
//!     Err(e) => {
//!         for failure in e.failures() {
//!             eprintln!("{} failed: {}", failure.handler, failure.error);
//!         }
//!     }
//! }
//! ```

pub mod config;
pub mod dispatcher;
pub mod event;
pub mod handler;

pub use config::{ConfigError, DispatcherConfig, DispatcherConfigBuilder, FailurePolicy};
pub use dispatcher::{
    DispatchError, EventDispatcher, HandlerFailure, HandlerRegistry, SharedEventDispatcher,
};
pub use event::{DomainEvent, Event, EventMetadata, EventPayload};
pub use handler::{
    DynEventHandler, EventHandler, EventHandlerError, HandlerRef, TypedEventHandler, handler_ref,
};
