use super::{MessageLog, emit};
use crate::event::{
    CustomerAddressChanged, CustomerChangeAddressEvent, CustomerCreated, CustomerCreatedEvent,
};
use tidings_events::{EventHandler, EventHandlerError};

const TARGET: &str = "tidings::customer";

/// Logs the new address of a customer
#[derive(Debug, Clone, Default)]
pub struct ConsoleLogAddressHandler {
    sink: Option<MessageLog>,
}

impl ConsoleLogAddressHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(sink: MessageLog) -> Self {
        Self { sink: Some(sink) }
    }
}

impl EventHandler<CustomerAddressChanged> for ConsoleLogAddressHandler {
    fn handle(&self, event: &CustomerChangeAddressEvent) -> Result<(), EventHandlerError> {
        let CustomerAddressChanged {
            id,
            name,
            street,
            number,
            zip,
            city,
        } = event.payload();

        emit(
            TARGET,
            self.sink.as_ref(),
            format!(
                "Address of customer {}, {} changed to: {} number {} - city: {} - zip: {}",
                id, name, street, number, city, zip
            ),
        );
        Ok(())
    }
}

/// First of the two loggers attached to customer creation
#[derive(Debug, Clone, Default)]
pub struct FirstConsoleLogHandler {
    sink: Option<MessageLog>,
}

impl FirstConsoleLogHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(sink: MessageLog) -> Self {
        Self { sink: Some(sink) }
    }
}

impl EventHandler<CustomerCreated> for FirstConsoleLogHandler {
    fn handle(&self, event: &CustomerCreatedEvent) -> Result<(), EventHandlerError> {
        emit(
            TARGET,
            self.sink.as_ref(),
            format!("First log line for CustomerCreated: {}", event.payload().id),
        );
        Ok(())
    }
}

/// Second of the two loggers attached to customer creation
#[derive(Debug, Clone, Default)]
pub struct SecondConsoleLogHandler {
    sink: Option<MessageLog>,
}

impl SecondConsoleLogHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(sink: MessageLog) -> Self {
        Self { sink: Some(sink) }
    }
}

impl EventHandler<CustomerCreated> for SecondConsoleLogHandler {
    fn handle(&self, event: &CustomerCreatedEvent) -> Result<(), EventHandlerError> {
        emit(
            TARGET,
            self.sink.as_ref(),
            format!("Second log line for CustomerCreated: {}", event.payload().id),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_handler_line() {
        let sink = MessageLog::new();
        let handler = ConsoleLogAddressHandler::with_sink(sink.clone());

        let event = CustomerChangeAddressEvent::new(CustomerAddressChanged {
            id: "123".to_string(),
            name: "Fulano".to_string(),
            street: "Rua dos Bobos".to_string(),
            number: 7,
            zip: "88.888-888".to_string(),
            city: "Valfenda".to_string(),
        });
        handler.handle(&event).unwrap();

        assert_eq!(
            sink.lines(),
            vec![
                "Address of customer 123, Fulano changed to: Rua dos Bobos number 7 - city: Valfenda - zip: 88.888-888"
            ]
        );
    }

    #[test]
    fn test_created_handlers_without_sink() {
        let event = CustomerCreatedEvent::new(CustomerCreated {
            id: "123".to_string(),
            name: "Fulano".to_string(),
        });

        assert!(FirstConsoleLogHandler::new().handle(&event).is_ok());
        assert!(SecondConsoleLogHandler::new().handle(&event).is_ok());
    }
}
