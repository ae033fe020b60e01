//! Warehouse inventory domain.
//!
//! A fixed grid of storage cells addressed by zone, rack, section and shelf. Each cell
//! holds a bounded quantity of products. This crate contains the business rules only
//! (no IO, no line protocol).

pub mod address;
pub mod cell;
pub mod error;
pub mod report;
pub mod topology;
pub mod warehouse;

pub use address::{Address, AddressFormat, AddressSpace};
pub use cell::Cell;
pub use error::InventoryError;
pub use report::{CellListing, Load, WarehouseReport, ZoneLoad};
pub use topology::Topology;
pub use warehouse::{
    AddStock, RemoveStock, StockAdded, StockRemoved, Warehouse, WarehouseCommand, WarehouseEvent,
    WarehouseId,
};
