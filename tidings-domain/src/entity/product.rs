use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: String,
    name: String,
    description: String,
    price: f64,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> Result<Self> {
        let product = Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
        };
        product.validate()?;
        Ok(product)
    }

    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(DomainError::validation("Product", "id", "Id is required"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Product", "name", "Name is required"));
        }
        check_price(self.price)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Product", "name", "Name is required"));
        }
        self.name = name;
        Ok(())
    }

    pub fn change_price(&mut self, price: f64) -> Result<()> {
        check_price(price)?;
        self.price = price;
        Ok(())
    }
}

fn check_price(price: f64) -> Result<()> {
    if price.is_nan() || price < 0.0 {
        return Err(DomainError::validation(
            "Product",
            "price",
            "Price must be greater than or equal to zero",
        ));
    }
    Ok(())
}
