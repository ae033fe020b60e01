use std::collections::BTreeMap;
use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

use depot_core::{Aggregate, AggregateRoot, DomainError, DomainResult};
use depot_events::{Command, Event, execute};

use crate::address::{Address, AddressSpace};
use crate::cell::Cell;
use crate::error::InventoryError;
use crate::report::WarehouseReport;
use crate::topology::Topology;

/// Warehouse identifier (one warehouse per running process).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarehouseId(String);

impl WarehouseId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl core::fmt::Display for WarehouseId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Aggregate root: Warehouse.
///
/// Owns exactly one [`Cell`] per address of its [`AddressSpace`]. The set of cells is
/// fixed at construction; stock movements only change cell contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warehouse {
    id: WarehouseId,
    space: AddressSpace,
    cells: BTreeMap<Address, Cell>,
    version: u64,
}

impl Warehouse {
    /// Materialize every cell of `space`, all empty.
    pub fn new(id: WarehouseId, space: AddressSpace) -> Self {
        let cells = space
            .addresses()
            .map(|address| (address, Cell::new(address)))
            .collect();
        Self {
            id,
            space,
            cells,
            version: 0,
        }
    }

    /// Build a warehouse straight from a topology.
    pub fn with_topology(id: WarehouseId, topology: Topology) -> DomainResult<Self> {
        Ok(Self::new(id, AddressSpace::new(topology)?))
    }

    pub fn address_space(&self) -> &AddressSpace {
        &self.space
    }

    pub fn topology(&self) -> &Topology {
        self.space.topology()
    }

    pub fn cell_capacity(&self) -> u32 {
        self.space.topology().cell_capacity
    }

    pub fn cell(&self, address: &Address) -> Option<&Cell> {
        self.cells.get(address)
    }

    /// Look up a cell by its wire token.
    pub fn cell_at(&self, token: &str) -> Option<&Cell> {
        self.space.parse(token).and_then(|address| self.cells.get(&address))
    }

    /// All cells in ascending address order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.values()
    }

    pub fn total_products(&self) -> u64 {
        self.cells.values().map(|c| u64::from(c.total())).sum()
    }

    /// Add `quantity` of `product` to the cell at `address` (all raw tokens).
    pub fn add(&mut self, product: &str, quantity: &str, address: &str) -> Result<(), InventoryError> {
        let cmd = WarehouseCommand::AddStock(AddStock {
            product: product.to_string(),
            quantity: quantity.to_string(),
            address: address.to_string(),
        });
        execute(self, &cmd).map(drop)
    }

    /// Remove `quantity` of `product` from the cell at `address` (all raw tokens).
    pub fn remove(&mut self, product: &str, quantity: &str, address: &str) -> Result<(), InventoryError> {
        let cmd = WarehouseCommand::RemoveStock(RemoveStock {
            product: product.to_string(),
            quantity: quantity.to_string(),
            address: address.to_string(),
        });
        execute(self, &cmd).map(drop)
    }

    /// Snapshot of current occupancy.
    pub fn report(&self) -> WarehouseReport {
        WarehouseReport::generate(self)
    }

    /// Check every cell invariant. Used by tests and debug tooling.
    pub fn verify(&self) -> DomainResult<()> {
        if self.cells.len() != self.space.len() {
            return Err(DomainError::invariant(format!(
                "warehouse has {} cells, address space has {}",
                self.cells.len(),
                self.space.len()
            )));
        }
        let capacity = self.cell_capacity();
        for (address, cell) in &self.cells {
            let label = self.space.render(address);
            if cell.address() != *address {
                return Err(DomainError::invariant(format!("cell stored under wrong key {label}")));
            }
            if cell.total() > capacity {
                return Err(DomainError::invariant(format!(
                    "cell {label} holds {} (capacity {capacity})",
                    cell.total()
                )));
            }
            if cell.products().values().any(|&q| q == 0) {
                return Err(DomainError::invariant(format!("cell {label} keeps a zero quantity")));
            }
            let sum: u64 = cell.products().values().map(|&q| u64::from(q)).sum();
            if sum != u64::from(cell.total()) {
                return Err(DomainError::invariant(format!(
                    "cell {label} total {} does not match product sum {sum}",
                    cell.total()
                )));
            }
        }
        Ok(())
    }
}

impl AggregateRoot for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddStock. Fields are raw tokens as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddStock {
    pub product: String,
    pub quantity: String,
    pub address: String,
}

/// Command: RemoveStock. Fields are raw tokens as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveStock {
    pub product: String,
    pub quantity: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarehouseCommand {
    AddStock(AddStock),
    RemoveStock(RemoveStock),
}

impl Command for WarehouseCommand {
    fn command_type(&self) -> &'static str {
        match self {
            WarehouseCommand::AddStock(_) => "inventory.stock.add",
            WarehouseCommand::RemoveStock(_) => "inventory.stock.remove",
        }
    }

    fn target(&self) -> &str {
        match self {
            WarehouseCommand::AddStock(c) => &c.address,
            WarehouseCommand::RemoveStock(c) => &c.address,
        }
    }
}

/// Event: StockAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdded {
    pub address: Address,
    pub product: String,
    pub quantity: u32,
}

/// Event: StockRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRemoved {
    pub address: Address,
    pub product: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarehouseEvent {
    StockAdded(StockAdded),
    StockRemoved(StockRemoved),
}

impl Event for WarehouseEvent {
    fn event_type(&self) -> &'static str {
        match self {
            WarehouseEvent::StockAdded(_) => "inventory.stock.added",
            WarehouseEvent::StockRemoved(_) => "inventory.stock.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

impl Aggregate for Warehouse {
    type Command = WarehouseCommand;
    type Event = WarehouseEvent;
    type Error = InventoryError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            WarehouseEvent::StockAdded(e) => {
                if let Some(cell) = self.cells.get_mut(&e.address) {
                    cell.put(&e.product, e.quantity);
                }
            }
            WarehouseEvent::StockRemoved(e) => {
                if let Some(cell) = self.cells.get_mut(&e.address) {
                    cell.take(&e.product, e.quantity);
                }
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            WarehouseCommand::AddStock(cmd) => self.handle_add(cmd),
            WarehouseCommand::RemoveStock(cmd) => self.handle_remove(cmd),
        }
    }
}

/// A positive base-10 literal. Literals past `u64::MAX` saturate, so an oversized
/// quantity still reaches the address, capacity and stock checks.
fn parse_quantity(raw: &str) -> Result<u64, InventoryError> {
    match raw.parse::<u64>() {
        Ok(q) if q > 0 => Ok(q),
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => Ok(u64::MAX),
        _ => Err(InventoryError::InvalidQuantity),
    }
}

impl Warehouse {
    fn resolve(&self, token: &str) -> Result<(Address, &Cell), InventoryError> {
        let address = self.space.parse(token).ok_or(InventoryError::InvalidAddress)?;
        let cell = self.cells.get(&address).ok_or(InventoryError::InvalidAddress)?;
        Ok((address, cell))
    }

    fn handle_add(&self, cmd: &AddStock) -> Result<Vec<WarehouseEvent>, InventoryError> {
        let quantity = parse_quantity(&cmd.quantity)?;
        let (address, cell) = self.resolve(&cmd.address)?;

        let capacity = self.cell_capacity();
        if u64::from(cell.total()).saturating_add(quantity) > u64::from(capacity) {
            return Err(InventoryError::CapacityExceeded { capacity });
        }
        let quantity =
            u32::try_from(quantity).map_err(|_| InventoryError::CapacityExceeded { capacity })?;

        Ok(vec![WarehouseEvent::StockAdded(StockAdded {
            address,
            product: cmd.product.clone(),
            quantity,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveStock) -> Result<Vec<WarehouseEvent>, InventoryError> {
        let quantity = parse_quantity(&cmd.quantity)?;
        let (address, cell) = self.resolve(&cmd.address)?;

        if u64::from(cell.quantity(&cmd.product)) < quantity {
            return Err(InventoryError::InsufficientStock);
        }
        let quantity = u32::try_from(quantity).map_err(|_| InventoryError::InsufficientStock)?;

        Ok(vec![WarehouseEvent::StockRemoved(StockRemoved {
            address,
            product: cmd.product.clone(),
            quantity,
        })])
    }
}
