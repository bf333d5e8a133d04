//! Domain entities and value objects

mod address;
mod customer;
mod product;

pub use address::Address;
pub use customer::Customer;
pub use product::Product;
