//! Event handler capability

use crate::event::{DomainEvent, Event, EventPayload};
use std::marker::PhantomData;
use std::sync::Arc;

/// Event handler trait
///
/// A handler performs a side effect for one event kind. Handlers must not
/// rely on mutating the event: every handler in a broadcast sees the same
/// instance.
pub trait EventHandler<P: EventPayload>: Send + Sync {
    /// Handle the event
    fn handle(&self, event: &DomainEvent<P>) -> Result<(), EventHandlerError>;
}

/// Event handler error
#[derive(Debug, thiserror::Error)]
pub enum EventHandlerError {
    #[error("Handler failed: {0}")]
    HandlerFailed(String),

    #[error("Event processing error: {0}")]
    ProcessingError(String),

    #[error("Handler expects `{expected}` events but received `{received}`")]
    TypeMismatch {
        expected: &'static str,
        received: &'static str,
    },
}

/// Type-erased event handler
///
/// This is what the dispatcher stores. The identity of a registration is the
/// `Arc` allocation holding it, see [`HandlerRef`].
pub trait DynEventHandler: Send + Sync {
    /// Handle event (type-erased)
    fn handle_dyn(&self, event: &dyn Event) -> Result<(), EventHandlerError>;

    /// Name used in logs and failure reports
    fn handler_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle to a registered handler.
///
/// Two handles refer to the same handler instance when they point to the same
/// allocation (`Arc::ptr_eq`); value equality plays no part.
pub type HandlerRef = Arc<dyn DynEventHandler>;

/// Wrapper for typed event handlers
pub struct TypedEventHandler<P: EventPayload, H: EventHandler<P>> {
    handler: H,
    _phantom: PhantomData<fn(P)>,
}

impl<P: EventPayload, H: EventHandler<P>> TypedEventHandler<P, H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }

    /// Access the wrapped handler
    pub fn inner(&self) -> &H {
        &self.handler
    }
}

impl<P: EventPayload, H: EventHandler<P> + 'static> DynEventHandler for TypedEventHandler<P, H> {
    fn handle_dyn(&self, event: &dyn Event) -> Result<(), EventHandlerError> {
        match event.as_any().downcast_ref::<DomainEvent<P>>() {
            Some(typed_event) => self.handler.handle(typed_event),
            None => Err(EventHandlerError::TypeMismatch {
                expected: P::NAME,
                received: event.event_name(),
            }),
        }
    }

    fn handler_name(&self) -> &'static str {
        std::any::type_name::<H>()
    }
}

/// Wrap a typed handler into a [`HandlerRef`] ready for registration.
pub fn handler_ref<P, H>(handler: H) -> HandlerRef
where
    P: EventPayload,
    H: EventHandler<P> + 'static,
{
    Arc::new(TypedEventHandler::<P, H>::new(handler))
}
