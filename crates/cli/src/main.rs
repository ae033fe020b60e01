//! `depot`: warehouse inventory over stdin/stdout.
//!
//! One command per line (`ADD`, `REMOVE`, `INFO`); runs until end of input.

use std::io;

use anyhow::Context;

use depot_core::AggregateRoot;
use depot_infra::{CommandDispatcher, DepotConfig, session};

fn main() -> anyhow::Result<()> {
    depot_observability::init();

    let config = DepotConfig::from_env().context("failed to load warehouse configuration")?;
    let warehouse = config
        .build_warehouse()
        .context("failed to build warehouse")?;

    tracing::info!(
        warehouse = %warehouse.id(),
        zones = %config.topology.zones.iter().collect::<String>(),
        cells = warehouse.address_space().len(),
        capacity = config.topology.total_capacity(),
        "warehouse ready"
    );

    let mut dispatcher = CommandDispatcher::new(warehouse);
    let stats = session::run(&mut dispatcher, io::stdin().lock(), io::stdout().lock())
        .context("session I/O failed")?;

    tracing::info!(
        commands = stats.commands,
        rejected = stats.rejected,
        "session finished"
    );
    Ok(())
}
