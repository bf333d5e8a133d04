//! Event dispatcher implementation

use crate::config::{DispatcherConfig, FailurePolicy};
use crate::event::{Event, EventPayload};
use crate::handler::{EventHandler, EventHandlerError, HandlerRef, handler_ref};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, error, info, warn};

/// Registry of handlers, keyed by event name, in registration order.
pub type HandlerRegistry = HashMap<String, Vec<HandlerRef>>;

/// Synchronous in-process event dispatcher
///
/// Holds an ordered list of handlers per event name. `notify` invokes every
/// handler registered under the event's name, in registration order, and
/// returns once the last one has run.
pub struct EventDispatcher {
    handlers: HandlerRegistry,
    config: DispatcherConfig,
}

impl EventDispatcher {
    /// Create new dispatcher
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    /// Create dispatcher with custom config
    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            handlers: HashMap::new(),
            config,
        }
    }

    /// Dispatcher configuration
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Register a handler under an event name
    ///
    /// Registering the same handler twice yields two invocations per notify.
    pub fn register(&mut self, event_name: impl Into<String>, handler: HandlerRef) {
        let event_name = event_name.into();

        if self.config.enable_logging {
            debug!(
                "Registered handler {} for event: {}",
                handler.handler_name(),
                event_name
            );
        }

        self.handlers.entry(event_name).or_default().push(handler);
    }

    /// Subscribe a typed handler to the event kind `P`
    ///
    /// Returns the registered handle, which is what [`EventDispatcher::unregister`]
    /// needs to detach this instance later.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let mut dispatcher = EventDispatcher::new();
    /// let handle = dispatcher.subscribe::<OrderShipped, _>(NotifyWarehouse);
    /// dispatcher.unregister(OrderShipped::NAME, &handle);
    /// ```
    pub fn subscribe<P, H>(&mut self, handler: H) -> HandlerRef
    where
        P: EventPayload,
        H: EventHandler<P> + 'static,
    {
        let handler = handler_ref::<P, H>(handler);
        self.register(P::NAME, Arc::clone(&handler));
        handler
    }

    /// Remove the first registration of `handler` under `event_name`
    ///
    /// Handlers are compared by identity. Unknown names and handlers that are
    /// not registered are ignored.
    pub fn unregister(&mut self, event_name: &str, handler: &HandlerRef) {
        let Some(handlers) = self.handlers.get_mut(event_name) else {
            return;
        };

        if let Some(index) = handlers.iter().position(|h| Arc::ptr_eq(h, handler)) {
            handlers.remove(index);

            if self.config.enable_logging {
                debug!(
                    "Unregistered handler {} for event: {}",
                    handler.handler_name(),
                    event_name
                );
            }
        }
    }

    /// Clear all handlers
    pub fn unregister_all(&mut self) {
        self.handlers.clear();

        if self.config.enable_logging {
            info!("Cleared all event handlers");
        }
    }

    /// Notify every handler registered for the event's kind
    ///
    /// Publishing an event nobody listens to is not an error.
    pub fn notify(&self, event: &dyn Event) -> Result<(), DispatchError> {
        let handlers = self
            .handlers
            .get(event.event_name())
            .map(Vec::as_slice)
            .unwrap_or_default();

        broadcast(&self.config, handlers, event)
    }

    /// Copy of the current registry
    pub fn handlers(&self) -> HandlerRegistry {
        self.handlers.clone()
    }

    /// Copy of the handlers registered under `event_name`, if the name is known
    pub fn handlers_for(&self, event_name: &str) -> Option<Vec<HandlerRef>> {
        self.handlers.get(event_name).cloned()
    }

    /// Whether `event_name` has an entry in the registry (possibly empty)
    pub fn contains(&self, event_name: &str) -> bool {
        self.handlers.contains_key(event_name)
    }

    /// Get handler count for an event name
    pub fn handler_count(&self, event_name: &str) -> usize {
        self.handlers.get(event_name).map(|h| h.len()).unwrap_or(0)
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe event dispatcher
///
/// Same contract as [`EventDispatcher`] behind a read/write lock. `notify`
/// snapshots the handler list and releases the lock before running handlers,
/// so a handler may register, unregister or notify on the same dispatcher.
#[derive(Clone, Default)]
pub struct SharedEventDispatcher {
    inner: Arc<RwLock<EventDispatcher>>,
}

impl SharedEventDispatcher {
    /// Create new shared dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Create shared dispatcher with custom config
    pub fn with_config(config: DispatcherConfig) -> Self {
        Self::from(EventDispatcher::with_config(config))
    }

    /// Register a handler under an event name
    pub fn register(&self, event_name: impl Into<String>, handler: HandlerRef) {
        self.write().register(event_name, handler);
    }

    /// Subscribe a typed handler to the event kind `P`
    pub fn subscribe<P, H>(&self, handler: H) -> HandlerRef
    where
        P: EventPayload,
        H: EventHandler<P> + 'static,
    {
        self.write().subscribe::<P, H>(handler)
    }

    /// Remove the first registration of `handler` under `event_name`
    pub fn unregister(&self, event_name: &str, handler: &HandlerRef) {
        self.write().unregister(event_name, handler);
    }

    /// Clear all handlers
    pub fn unregister_all(&self) {
        self.write().unregister_all();
    }

    /// Notify every handler registered for the event's kind
    pub fn notify(&self, event: &dyn Event) -> Result<(), DispatchError> {
        let (config, handlers) = {
            let dispatcher = self.read();
            (
                dispatcher.config.clone(),
                dispatcher.handlers_for(event.event_name()),
            )
        };

        broadcast(&config, handlers.as_deref().unwrap_or_default(), event)
    }

    /// Copy of the current registry
    pub fn handlers(&self) -> HandlerRegistry {
        self.read().handlers()
    }

    /// Copy of the handlers registered under `event_name`, if the name is known
    pub fn handlers_for(&self, event_name: &str) -> Option<Vec<HandlerRef>> {
        self.read().handlers_for(event_name)
    }

    /// Whether `event_name` has an entry in the registry (possibly empty)
    pub fn contains(&self, event_name: &str) -> bool {
        self.read().contains(event_name)
    }

    /// Get handler count for an event name
    pub fn handler_count(&self, event_name: &str) -> usize {
        self.read().handler_count(event_name)
    }

    // Handlers never run while a guard is held, so a poisoned lock still
    // guards a consistent registry.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, EventDispatcher> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, EventDispatcher> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<EventDispatcher> for SharedEventDispatcher {
    fn from(dispatcher: EventDispatcher) -> Self {
        Self {
            inner: Arc::new(RwLock::new(dispatcher)),
        }
    }
}

fn broadcast(
    config: &DispatcherConfig,
    handlers: &[HandlerRef],
    event: &dyn Event,
) -> Result<(), DispatchError> {
    if handlers.is_empty() {
        if config.enable_logging {
            warn!("No handlers registered for event: {}", event.event_name());
        }
        return Ok(());
    }

    if config.enable_logging {
        info!(
            "Notifying {} handler(s) of event: {} (id: {})",
            handlers.len(),
            event.event_name(),
            event.event_id()
        );
    }

    let mut failures = Vec::new();

    for (position, handler) in handlers.iter().enumerate() {
        if let Err(e) = handler.handle_dyn(event) {
            if config.enable_logging {
                error!(
                    "Handler {} failed on event {}: {}",
                    handler.handler_name(),
                    event.event_name(),
                    e
                );
            }

            failures.push(HandlerFailure {
                position,
                handler: handler.handler_name(),
                error: e,
            });

            if config.failure_policy == FailurePolicy::AbortOnFirstError {
                break;
            }
        }
    }

    if !failures.is_empty() {
        return Err(DispatchError::HandlersFailed {
            event: event.event_name(),
            failures,
        });
    }

    if config.enable_logging {
        debug!("Event dispatched successfully: {}", event.event_name());
    }

    Ok(())
}

/// One handler failure during a broadcast
#[derive(Debug)]
pub struct HandlerFailure {
    /// Position of the handler in the registration list
    pub position: usize,
    /// Handler name
    pub handler: &'static str,
    /// Error returned by the handler
    pub error: EventHandlerError,
}

/// Dispatch errors
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{} handler(s) failed for event {event}", .failures.len())]
    HandlersFailed {
        event: &'static str,
        failures: Vec<HandlerFailure>,
    },
}

impl DispatchError {
    /// Failures recorded during the broadcast
    pub fn failures(&self) -> &[HandlerFailure] {
        match self {
            DispatchError::HandlersFailed { failures, .. } => failures,
        }
    }
}
