//! Event kinds published by the domain

mod customer;
mod product;

pub use customer::{
    CustomerAddressChanged, CustomerChangeAddressEvent, CustomerCreated, CustomerCreatedEvent,
};
pub use product::{ProductCreated, ProductCreatedEvent};
