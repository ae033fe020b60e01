//! `depot-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no configuration loading).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use value_object::ValueObject;
