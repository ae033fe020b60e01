//! Occupancy report: overall and per-zone load, plus cell listings.
//!
//! The report is computed from a shared borrow of the warehouse, so it always
//! reflects one consistent state. Everything is listed in address order (cells) or
//! configured order (zones); nothing depends on hash iteration.

use std::collections::BTreeMap;
use std::fmt;

use crate::warehouse::Warehouse;

/// Occupied quantity over capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Load {
    pub occupied: u64,
    pub capacity: u64,
}

impl Load {
    pub fn new(occupied: u64, capacity: u64) -> Self {
        Self { occupied, capacity }
    }

    /// Load as a percentage, computed in `f64`. An empty capacity reads as zero.
    pub fn percent(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.occupied as f64 / self.capacity as f64 * 100.0
    }
}

impl fmt::Display for Load {
    /// Percentage with one decimal, without the `%` sign.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.percent())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneLoad {
    pub zone: char,
    pub load: Load,
}

/// A non-empty cell and its products, alphabetically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellListing {
    pub address: String,
    pub products: Vec<(String, u32)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseReport {
    pub overall: Load,
    pub zones: Vec<ZoneLoad>,
    pub non_empty: Vec<CellListing>,
    pub empty: Vec<String>,
}

impl WarehouseReport {
    pub fn generate(warehouse: &Warehouse) -> Self {
        let topology = warehouse.topology();
        let space = warehouse.address_space();

        let mut per_zone: BTreeMap<char, u64> = BTreeMap::new();
        let mut non_empty = Vec::new();
        let mut empty = Vec::new();

        // `cells()` walks addresses in ascending order.
        for cell in warehouse.cells() {
            *per_zone.entry(cell.address().zone()).or_insert(0) += u64::from(cell.total());

            let address = space.render(&cell.address());
            if cell.is_empty() {
                empty.push(address);
            } else {
                non_empty.push(CellListing {
                    address,
                    products: cell
                        .products()
                        .iter()
                        .map(|(name, &qty)| (name.clone(), qty))
                        .collect(),
                });
            }
        }

        let zones = topology
            .zones
            .iter()
            .map(|&zone| ZoneLoad {
                zone,
                load: Load::new(
                    per_zone.get(&zone).copied().unwrap_or(0),
                    topology.zone_capacity(),
                ),
            })
            .collect();

        Self {
            overall: Load::new(per_zone.values().sum(), topology.total_capacity()),
            zones,
            non_empty,
            empty,
        }
    }
}

impl fmt::Display for CellListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.address)?;
        for (idx, (name, qty)) in self.products.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} ({qty})")?;
        }
        Ok(())
    }
}

impl fmt::Display for WarehouseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Warehouse load: {}%", self.overall)?;
        for zone in &self.zones {
            writeln!(f, "Zone {} load: {}%", zone.zone, zone.load)?;
        }

        writeln!(f)?;
        writeln!(f, "Non-empty cells:")?;
        for listing in &self.non_empty {
            writeln!(f, "{listing}")?;
        }

        writeln!(f)?;
        write!(f, "Empty cells: {}", self.empty.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Topology;
    use crate::warehouse::WarehouseId;
    use proptest::prelude::*;

    fn warehouse() -> Warehouse {
        Warehouse::with_topology(WarehouseId::new("test"), Topology::default()).unwrap()
    }

    #[test]
    fn load_rounds_to_one_decimal() {
        assert_eq!(Load::new(5, 640).to_string(), "0.8");
        assert_eq!(Load::new(5, 160).to_string(), "3.1");
        assert_eq!(Load::new(0, 640).to_string(), "0.0");
        assert_eq!(Load::new(640, 640).to_string(), "100.0");
        assert_eq!(Load::new(1, 3).to_string(), "33.3");
        assert_eq!(Load::new(2, 3).to_string(), "66.7");
        // The double nearest each ratio sits just off the decimal midpoint.
        assert_eq!(Load::new(46, 160).to_string(), "28.7");
        assert_eq!(Load::new(98, 160).to_string(), "61.3");
        assert_eq!(Load::new(102, 160).to_string(), "63.7");
        assert_eq!(Load::new(184, 640).to_string(), "28.7");
        assert_eq!(Load::new(392, 640).to_string(), "61.3");
        assert_eq!(Load::new(408, 640).to_string(), "63.7");
    }

    #[test]
    fn exact_midpoints_round_to_even() {
        // 6.25%, 18.75% and 1.25% are exact in binary.
        assert_eq!(Load::new(1, 16).to_string(), "6.2");
        assert_eq!(Load::new(3, 16).to_string(), "18.8");
        assert_eq!(Load::new(2, 160).to_string(), "1.2");
    }

    #[test]
    fn zero_capacity_reads_as_zero() {
        assert_eq!(Load::new(0, 0).to_string(), "0.0");
    }

    #[test]
    fn empty_warehouse_report() {
        let report = warehouse().report();
        assert_eq!(report.overall, Load::new(0, 640));
        assert_eq!(report.zones.len(), 4);
        assert!(report.non_empty.is_empty());
        assert_eq!(report.empty.len(), 64);
        assert_eq!(report.empty.first().map(String::as_str), Some("A111"));
        assert_eq!(report.empty.last().map(String::as_str), Some("D821"));
    }

    #[test]
    fn oranges_scenario() {
        let mut w = warehouse();
        w.add("Oranges", "5", "A112").unwrap();
        w.remove("Oranges", "3", "A112").unwrap();

        let report = w.report();
        assert_eq!(report.overall, Load::new(2, 640));
        assert_eq!(report.zones[0], ZoneLoad { zone: 'A', load: Load::new(2, 160) });
        assert_eq!(
            report.non_empty,
            vec![CellListing {
                address: "A112".to_string(),
                products: vec![("Oranges".to_string(), 2)],
            }]
        );
        assert!(!report.empty.contains(&"A112".to_string()));
        assert_eq!(report.empty.len(), 63);
    }

    #[test]
    fn renders_in_protocol_layout() {
        let mut w = Warehouse::with_topology(
            WarehouseId::new("small"),
            Topology {
                zones: vec!['A', 'B'],
                racks_per_zone: 1,
                sections_per_rack: 2,
                shelves_per_section: 1,
                cell_capacity: 10,
            },
        )
        .unwrap();
        w.add("Pears", "2", "B111").unwrap();
        w.add("Apples", "3", "B111").unwrap();

        let expected = "\
Warehouse load: 12.5%
Zone A load: 0.0%
Zone B load: 25.0%

Non-empty cells:
B111: Apples (3), Pears (2)

Empty cells: A111 A121 B121";
        assert_eq!(w.report().to_string(), expected);
    }

    #[test]
    fn zones_follow_configured_order() {
        let w = Warehouse::with_topology(
            WarehouseId::new("reversed"),
            Topology {
                zones: vec!['D', 'C', 'B', 'A'],
                ..Topology::default()
            },
        )
        .unwrap();

        let report = w.report();
        let zones: Vec<char> = report.zones.iter().map(|z| z.zone).collect();
        assert_eq!(zones, vec!['D', 'C', 'B', 'A']);
        // Cell listings stay in address order.
        assert_eq!(report.empty.first().map(String::as_str), Some("A111"));
    }

    #[test]
    fn report_does_not_touch_state() {
        let mut w = warehouse();
        w.add("Oranges", "5", "A112").unwrap();
        let before = w.clone();
        let first = w.report();
        let second = w.report();
        assert_eq!(first, second);
        assert_eq!(w, before);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: zone totals add up to the overall total, and every cell appears in
        /// exactly one of the two listings.
        #[test]
        fn report_is_consistent_with_cells(
            adds in prop::collection::vec((0usize..64, 1u32..=10), 0..40)
        ) {
            let mut w = warehouse();
            let addresses: Vec<String> = w
                .address_space()
                .addresses()
                .map(|a| w.address_space().render(&a))
                .collect();
            for (idx, qty) in adds {
                let _ = w.add("Widgets", &qty.to_string(), &addresses[idx]);
            }

            let report = w.report();
            let zone_sum: u64 = report.zones.iter().map(|z| z.load.occupied).sum();
            prop_assert_eq!(zone_sum, report.overall.occupied);
            prop_assert_eq!(report.overall.occupied, w.total_products());
            prop_assert_eq!(report.non_empty.len() + report.empty.len(), 64);

            let mut listed: Vec<&String> = report.non_empty.iter().map(|l| &l.address).collect();
            let mut sorted = listed.clone();
            sorted.sort();
            prop_assert_eq!(&listed, &sorted);
            listed.extend(report.empty.iter());
            listed.sort();
            listed.dedup();
            prop_assert_eq!(listed.len(), 64);
        }
    }
}
