use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Postal address value object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    street: String,
    number: u32,
    zip: String,
    city: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        number: u32,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self> {
        let address = Self {
            street: street.into(),
            number,
            zip: zip.into(),
            city: city.into(),
        };
        address.validate()?;
        Ok(address)
    }

    fn validate(&self) -> Result<()> {
        if self.street.trim().is_empty() {
            return Err(DomainError::validation("Address", "street", "Street is required"));
        }
        if self.number == 0 {
            return Err(DomainError::validation("Address", "number", "Number is required"));
        }
        if self.zip.trim().is_empty() {
            return Err(DomainError::validation("Address", "zip", "Zip is required"));
        }
        if self.city.trim().is_empty() {
            return Err(DomainError::validation("Address", "city", "City is required"));
        }
        Ok(())
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {} {}", self.street, self.number, self.zip, self.city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_address() {
        let address = Address::new("Rua dos Bobos", 7, "88.888-888", "Valfenda").unwrap();
        assert_eq!(address.to_string(), "Rua dos Bobos, 7, 88.888-888 Valfenda");
    }

    #[test]
    fn test_rejects_missing_fields() {
        let cases = [
            Address::new("", 7, "88.888-888", "Valfenda"),
            Address::new("Rua", 0, "88.888-888", "Valfenda"),
            Address::new("Rua", 7, " ", "Valfenda"),
            Address::new("Rua", 7, "88.888-888", ""),
        ];
        let fields: Vec<&str> = cases
            .iter()
            .map(|r| match r {
                Err(DomainError::Validation { field, .. }) => *field,
                other => panic!("expected validation error, got {:?}", other),
            })
            .collect();

        assert_eq!(fields, vec!["street", "number", "zip", "city"]);
    }
}
