use super::{MessageLog, emit};
use crate::event::{ProductCreated, ProductCreatedEvent};
use tidings_events::{EventHandler, EventHandlerError};

/// Announces newly created products by e-mail.
///
/// Delivery itself is outside the domain; the handler logs the message it
/// would send.
#[derive(Debug, Clone, Default)]
pub struct SendEmailWhenProductIsCreatedHandler {
    sink: Option<MessageLog>,
}

impl SendEmailWhenProductIsCreatedHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(sink: MessageLog) -> Self {
        Self { sink: Some(sink) }
    }
}

impl EventHandler<ProductCreated> for SendEmailWhenProductIsCreatedHandler {
    fn handle(&self, event: &ProductCreatedEvent) -> Result<(), EventHandlerError> {
        let product = event.payload();
        emit(
            "tidings::product",
            self.sink.as_ref(),
            format!(
                "Sending email: product {} created at {:.2}",
                product.name, product.price
            ),
        );
        Ok(())
    }
}
