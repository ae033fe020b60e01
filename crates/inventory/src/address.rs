//! Cell addresses and the address space they live in.
//!
//! An [`Address`] is structured: zone letter, then rack, section and shelf numbers.
//! Text is only the wire and display form. Each numeric component is zero-padded to
//! the digit width of its configured maximum, so the rendering stays unambiguous for
//! any topology and sorts lexically in the same order as the structured value.
//!
//! With the default topology every width is 1: zone `A`, rack 1, section 1, shelf 2
//! renders as `A112`. With 15 shelves per section the same cell renders as `A1102`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use depot_core::{DomainResult, ValueObject};

use crate::topology::Topology;

/// Identifies one storage cell.
///
/// Ordering is zone letter, then rack, section and shelf numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address {
    zone: char,
    rack: u16,
    section: u16,
    shelf: u16,
}

impl ValueObject for Address {}

impl Address {
    pub const fn new(zone: char, rack: u16, section: u16, shelf: u16) -> Self {
        Self {
            zone,
            rack,
            section,
            shelf,
        }
    }

    pub fn zone(&self) -> char {
        self.zone
    }

    pub fn rack(&self) -> u16 {
        self.rack
    }

    pub fn section(&self) -> u16 {
        self.section
    }

    pub fn shelf(&self) -> u16 {
        self.shelf
    }
}

/// Fixed-width text rendering of addresses for one topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressFormat {
    rack_width: usize,
    section_width: usize,
    shelf_width: usize,
}

impl AddressFormat {
    pub fn for_topology(topology: &Topology) -> Self {
        Self {
            rack_width: digits(topology.racks_per_zone),
            section_width: digits(topology.sections_per_rack),
            shelf_width: digits(topology.shelves_per_section),
        }
    }

    /// Number of digits following the zone letter.
    pub fn digit_count(&self) -> usize {
        self.rack_width + self.section_width + self.shelf_width
    }

    pub fn render(&self, address: &Address) -> String {
        format!(
            "{}{:0rw$}{:0sw$}{:0hw$}",
            address.zone,
            address.rack,
            address.section,
            address.shelf,
            rw = self.rack_width,
            sw = self.section_width,
            hw = self.shelf_width,
        )
    }

    /// Split a token into its components without checking ranges.
    fn split(&self, token: &str) -> Option<Address> {
        let mut chars = token.chars();
        let zone = chars.next()?;
        let digits = chars.as_str();
        if digits.len() != self.digit_count() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let (rack, rest) = digits.split_at(self.rack_width);
        let (section, shelf) = rest.split_at(self.section_width);
        Some(Address::new(
            zone,
            rack.parse().ok()?,
            section.parse().ok()?,
            shelf.parse().ok()?,
        ))
    }
}

fn digits(max: u16) -> usize {
    max.max(1).ilog10() as usize + 1
}

/// The fixed set of valid cell addresses for a topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSpace {
    topology: Topology,
    format: AddressFormat,
}

impl AddressSpace {
    /// Build the address space, rejecting malformed topologies.
    pub fn new(topology: Topology) -> DomainResult<Self> {
        topology.validate()?;
        let format = AddressFormat::for_topology(&topology);
        Ok(Self { topology, format })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn len(&self) -> usize {
        self.topology.cell_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every valid address, zones in configured order, then rack, section, shelf.
    pub fn addresses(&self) -> impl Iterator<Item = Address> + '_ {
        let t = &self.topology;
        t.zones.iter().flat_map(move |&zone| {
            (1..=t.racks_per_zone).flat_map(move |rack| {
                (1..=t.sections_per_rack).flat_map(move |section| {
                    (1..=t.shelves_per_section)
                        .map(move |shelf| Address::new(zone, rack, section, shelf))
                })
            })
        })
    }

    /// Materialize the full address set.
    pub fn generate(&self) -> BTreeSet<Address> {
        self.addresses().collect()
    }

    /// Membership test, answered from the topology ranges without a lookup.
    pub fn is_valid(&self, address: &Address) -> bool {
        let t = &self.topology;
        t.zones.contains(&address.zone)
            && (1..=t.racks_per_zone).contains(&address.rack)
            && (1..=t.sections_per_rack).contains(&address.section)
            && (1..=t.shelves_per_section).contains(&address.shelf)
    }

    /// Resolve a wire token to an address of this space.
    pub fn parse(&self, token: &str) -> Option<Address> {
        self.format
            .split(token)
            .filter(|address| self.is_valid(address))
    }

    pub fn render(&self, address: &Address) -> String {
        self.format.render(address)
    }
}
