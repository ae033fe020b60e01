use thiserror::Error;

/// Why a stock movement was rejected.
///
/// The `Display` strings are the reasons shown to the operator after `ERROR: `.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Quantity was not a positive base-10 integer.
    #[error("Invalid quantity")]
    InvalidQuantity,

    /// Address is not part of the warehouse.
    #[error("Invalid address")]
    InvalidAddress,

    /// The cell would hold more than its capacity.
    #[error("Exceeds cell capacity (max {capacity})")]
    CapacityExceeded { capacity: u32 },

    /// The product is absent or held in a smaller quantity than requested.
    #[error("Not enough products")]
    InsufficientStock,
}
