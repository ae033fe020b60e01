use std::collections::BTreeMap;

use depot_core::Entity;

use crate::address::Address;

/// One storage cell: products held and their running total.
///
/// Quantities in `products` are always strictly positive; a product that runs out is
/// removed from the map. `total` always equals the sum of the map's values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    address: Address,
    products: BTreeMap<String, u32>,
    total: u32,
}

impl Entity for Cell {
    type Id = Address;

    fn id(&self) -> &Self::Id {
        &self.address
    }
}

impl Cell {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            products: BTreeMap::new(),
            total: 0,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Products in this cell, alphabetically by name.
    pub fn products(&self) -> &BTreeMap<String, u32> {
        &self.products
    }

    /// Quantity of `product` held here (0 when absent).
    pub fn quantity(&self, product: &str) -> u32 {
        self.products.get(product).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    // `put`/`take` are only reached through `Warehouse::apply` with events that
    // `handle` already validated against capacity and stock.

    pub(crate) fn put(&mut self, product: &str, quantity: u32) {
        *self.products.entry(product.to_string()).or_insert(0) += quantity;
        self.total += quantity;
    }

    /// Panics if the cell holds less than `quantity` of `product`.
    pub(crate) fn take(&mut self, product: &str, quantity: u32) {
        let held = self.quantity(product);
        let Some(remaining) = held.checked_sub(quantity) else {
            panic!(
                "cell {:?}: cannot take {quantity} of {product:?}, only {held} held",
                self.address
            );
        };
        self.total -= quantity;
        if remaining == 0 {
            self.products.remove(product);
        } else {
            self.products.insert(product.to_string(), remaining);
        }
    }
}
