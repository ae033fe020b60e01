//! Command routing for the line protocol.
//!
//! ```text
//! tokens
//!   ↓
//! 1. Route on the first token (ADD / REMOVE / INFO)
//!   ↓
//! 2. Check the token count for stock commands
//!   ↓
//! 3. Decide + apply against the warehouse (all-or-nothing), or build a report
//!   ↓
//! Outcome (silent success, report, or rejection)
//! ```
//!
//! Every line is independent: nothing about one command affects how a later one is
//! parsed, and a rejected command never ends the session.

use thiserror::Error;

use depot_core::AggregateRoot;
use depot_events::{Command, Event, execute};
use depot_inventory::{
    AddStock, InventoryError, RemoveStock, Warehouse, WarehouseCommand, WarehouseEvent,
    WarehouseReport,
};

/// Stock-moving protocol verbs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Add,
    Remove,
}

impl CommandKind {
    pub fn keyword(self) -> &'static str {
        match self {
            CommandKind::Add => "ADD",
            CommandKind::Remove => "REMOVE",
        }
    }
}

impl core::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Why a line was rejected. `Display` is the text after `ERROR: `.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Too few tokens for ADD/REMOVE.
    #[error("Invalid {0} format")]
    InvalidFormat(CommandKind),

    /// First token is not a known verb.
    #[error("Unknown command")]
    UnknownCommand,

    /// The warehouse refused the stock movement.
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Result of dispatching one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Stock movement applied; produces no output.
    Applied(Vec<WarehouseEvent>),
    /// INFO snapshot.
    Report(WarehouseReport),
    Rejected(DispatchError),
}

impl Outcome {
    /// Text to show the operator, if any.
    pub fn render(&self) -> Option<String> {
        match self {
            Outcome::Applied(_) => None,
            Outcome::Report(report) => Some(report.to_string()),
            Outcome::Rejected(err) => Some(format!("ERROR: {err}")),
        }
    }
}

/// Owns the warehouse and routes tokenized lines to it.
#[derive(Debug)]
pub struct CommandDispatcher {
    warehouse: Warehouse,
}

impl CommandDispatcher {
    pub fn new(warehouse: Warehouse) -> Self {
        Self { warehouse }
    }

    pub fn warehouse(&self) -> &Warehouse {
        &self.warehouse
    }

    pub fn into_inner(self) -> Warehouse {
        self.warehouse
    }

    /// Dispatch one already-tokenized line.
    ///
    /// Extra tokens after a complete ADD/REMOVE/INFO are ignored. An empty token list
    /// is an unknown command.
    pub fn dispatch<S: AsRef<str>>(&mut self, tokens: &[S]) -> Outcome {
        match tokens.first().map(|t| t.as_ref()) {
            Some("ADD") => self.dispatch_stock(CommandKind::Add, tokens),
            Some("REMOVE") => self.dispatch_stock(CommandKind::Remove, tokens),
            Some("INFO") => {
                let report = self.warehouse.report();
                tracing::trace!(
                    warehouse = %self.warehouse.id(),
                    occupied = report.overall.occupied,
                    "report generated"
                );
                Outcome::Report(report)
            }
            other => {
                tracing::debug!(command = ?other, "unknown command");
                Outcome::Rejected(DispatchError::UnknownCommand)
            }
        }
    }

    fn dispatch_stock<S: AsRef<str>>(&mut self, kind: CommandKind, tokens: &[S]) -> Outcome {
        let [_, product, quantity, address, ..] = tokens else {
            tracing::debug!(command = %kind, tokens = tokens.len(), "malformed stock command");
            return Outcome::Rejected(DispatchError::InvalidFormat(kind));
        };

        let (product, quantity, address) = (
            product.as_ref().to_string(),
            quantity.as_ref().to_string(),
            address.as_ref().to_string(),
        );
        let command = match kind {
            CommandKind::Add => WarehouseCommand::AddStock(AddStock {
                product,
                quantity,
                address,
            }),
            CommandKind::Remove => WarehouseCommand::RemoveStock(RemoveStock {
                product,
                quantity,
                address,
            }),
        };

        match execute(&mut self.warehouse, &command) {
            Ok(events) => {
                for ev in &events {
                    tracing::debug!(
                        warehouse = %self.warehouse.id(),
                        event_type = ev.event_type(),
                        version = self.warehouse.version(),
                        "stock movement applied"
                    );
                }
                Outcome::Applied(events)
            }
            Err(err) => {
                tracing::debug!(
                    command_type = command.command_type(),
                    target = command.target(),
                    error = %err,
                    "stock movement rejected"
                );
                Outcome::Rejected(err.into())
            }
        }
    }
}
