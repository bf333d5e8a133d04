// Tidings - synchronous in-process event dispatching
//
// The dispatcher lives in `tidings-events`; this crate re-exports it together
// with the optional logging and domain crates.

// Re-export core functionality
pub use tidings_events::*;

// Re-export optional crates
#[cfg(feature = "log")]
pub use tidings_log;

#[cfg(feature = "domain")]
pub use tidings_domain;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        DispatchError, DispatcherConfig, DispatcherConfigBuilder, DomainEvent, Event,
        EventDispatcher, EventHandler, EventHandlerError, EventPayload, FailurePolicy, HandlerRef,
        SharedEventDispatcher, handler_ref,
    };
}
