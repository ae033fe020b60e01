//! Storage topology: how many zones, racks, sections and shelves exist, and how much
//! a single cell can hold.

use serde::{Deserialize, Serialize};

use depot_core::{DomainError, DomainResult};

/// Fixed shape of the warehouse, decided once at start-up.
///
/// Zones are reported in the order they are listed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Topology {
    pub zones: Vec<char>,
    pub racks_per_zone: u16,
    pub sections_per_rack: u16,
    pub shelves_per_section: u16,
    pub cell_capacity: u32,
}

impl Default for Topology {
    /// Four zones `A`-`D`, 8 racks, 2 sections, 1 shelf, 10 units per cell (640 total).
    fn default() -> Self {
        Self {
            zones: vec!['A', 'B', 'C', 'D'],
            racks_per_zone: 8,
            sections_per_rack: 2,
            shelves_per_section: 1,
            cell_capacity: 10,
        }
    }
}

impl Topology {
    pub fn validate(&self) -> DomainResult<()> {
        if self.zones.is_empty() {
            return Err(DomainError::validation("zones cannot be empty"));
        }
        for (idx, zone) in self.zones.iter().enumerate() {
            if !zone.is_ascii_uppercase() {
                return Err(DomainError::validation(format!(
                    "zone {zone:?} must be an ASCII uppercase letter"
                )));
            }
            if self.zones[..idx].contains(zone) {
                return Err(DomainError::validation(format!("zone {zone} listed twice")));
            }
        }
        if self.racks_per_zone == 0 {
            return Err(DomainError::validation("racks_per_zone must be at least 1"));
        }
        if self.sections_per_rack == 0 {
            return Err(DomainError::validation("sections_per_rack must be at least 1"));
        }
        if self.shelves_per_section == 0 {
            return Err(DomainError::validation("shelves_per_section must be at least 1"));
        }
        if self.cell_capacity == 0 {
            return Err(DomainError::validation("cell_capacity must be at least 1"));
        }
        Ok(())
    }

    pub fn cells_per_zone(&self) -> usize {
        usize::from(self.racks_per_zone)
            * usize::from(self.sections_per_rack)
            * usize::from(self.shelves_per_section)
    }

    pub fn cell_count(&self) -> usize {
        self.zones.len() * self.cells_per_zone()
    }

    pub fn zone_capacity(&self) -> u64 {
        self.cells_per_zone() as u64 * u64::from(self.cell_capacity)
    }

    pub fn total_capacity(&self) -> u64 {
        self.cell_count() as u64 * u64::from(self.cell_capacity)
    }
}
