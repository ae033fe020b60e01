//! Black-box scenarios: feed protocol text in, compare protocol text out.

use depot_infra::config::DepotConfig;
use depot_infra::session;
use depot_infra::CommandDispatcher;
use depot_inventory::Topology;

fn run_with(config: &DepotConfig, script: &str) -> String {
    let mut dispatcher = CommandDispatcher::new(config.build_warehouse().expect("valid topology"));
    let mut out = Vec::new();
    session::run(&mut dispatcher, script.as_bytes(), &mut out).expect("in-memory I/O");
    String::from_utf8(out).expect("utf-8 output")
}

fn run(script: &str) -> String {
    run_with(&DepotConfig::default(), script)
}

/// Default-topology addresses in ascending order, excluding `skip`.
fn default_addresses_except(skip: &[&str]) -> Vec<String> {
    let mut all = Vec::new();
    for zone in ['A', 'B', 'C', 'D'] {
        for rack in 1..=8 {
            for section in 1..=2 {
                all.push(format!("{zone}{rack}{section}1"));
            }
        }
    }
    all.retain(|a| !skip.contains(&a.as_str()));
    all
}

#[test]
fn add_remove_info_scenario() {
    let out = run("ADD Oranges 5 A112\nREMOVE Oranges 3 A112\nINFO\n");

    let expected = format!(
        "Warehouse load: 0.3%\n\
         Zone A load: 1.2%\n\
         Zone B load: 0.0%\n\
         Zone C load: 0.0%\n\
         Zone D load: 0.0%\n\
         \n\
         Non-empty cells:\n\
         A112: Oranges (2)\n\
         \n\
         Empty cells: {}\n",
        default_addresses_except(&["A112"]).join(" ")
    );
    assert_eq!(out, expected);
}

#[test]
fn five_oranges_load_figures() {
    let out = run("ADD Oranges 5 A112\nINFO\n");
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("Warehouse load: 0.8%"));
    assert_eq!(lines.next(), Some("Zone A load: 3.1%"));
    assert!(out.contains("\nA112: Oranges (5)\n"));
}

#[test]
fn load_figures_follow_double_precision_formatting() {
    let out = run("ADD Crates 10 A111\n\
         ADD Crates 10 A121\n\
         ADD Crates 10 A211\n\
         ADD Crates 10 A221\n\
         ADD Crates 6 A311\n\
         INFO\n");
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("Warehouse load: 7.2%"));
    assert_eq!(lines.next(), Some("Zone A load: 28.7%"));
}

#[test]
fn quantities_beyond_integer_range_reach_the_stock_checks() {
    let out = run("ADD X 5000000000 A111\nREMOVE X 5000000000 A111\nADD X 5000000000 Z999\n");
    assert_eq!(
        out,
        "ERROR: Exceeds cell capacity (max 10)\n\
         ERROR: Not enough products\n\
         ERROR: Invalid address\n"
    );
}

#[test]
fn oversized_add_is_rejected_and_cell_stays_empty() {
    let out = run("ADD Apples 11 A111\nINFO\n");
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("ERROR: Exceeds cell capacity (max 10)"));
    assert_eq!(lines.next(), Some("Warehouse load: 0.0%"));
    assert!(out.contains("Empty cells: A111 A121 "));
    assert!(out.contains("Non-empty cells:\n\nEmpty cells:"));
}

#[test]
fn invalid_address_on_remove() {
    assert_eq!(run("REMOVE Bananas 1 Z999\n"), "ERROR: Invalid address\n");
}

#[test]
fn every_error_reason() {
    let out = run("\
ADD Apples 3
REMOVE Apples
ADD Apples 0 A111
ADD Apples 2 A999
ADD Apples 10 A111
ADD Pears 1 A111
REMOVE Pears 1 A111
REMOVE Apples 11 A111
SHIP Apples 1 A111
");
    assert_eq!(
        out,
        "ERROR: Invalid ADD format\n\
         ERROR: Invalid REMOVE format\n\
         ERROR: Invalid quantity\n\
         ERROR: Invalid address\n\
         ERROR: Exceeds cell capacity (max 10)\n\
         ERROR: Not enough products\n\
         ERROR: Not enough products\n\
         ERROR: Unknown command\n"
    );
}

#[test]
fn products_listed_alphabetically_and_cells_in_address_order() {
    let out = run("\
ADD Pears 2 B211
ADD Apples 1 B211
ADD Kiwis 4 A821
ADD Figs 3 B211
INFO
");
    let listing: Vec<&str> = out
        .lines()
        .skip_while(|l| *l != "Non-empty cells:")
        .skip(1)
        .take_while(|l| !l.is_empty())
        .collect();
    assert_eq!(listing, vec!["A821: Kiwis (4)", "B211: Apples (1), Figs (3), Pears (2)"]);
}

#[test]
fn full_warehouse_reads_one_hundred_percent() {
    let script: String = default_addresses_except(&[])
        .iter()
        .map(|a| format!("ADD Crates 10 {a}\n"))
        .chain(std::iter::once("INFO\n".to_string()))
        .collect();
    let out = run(&script);
    assert!(out.starts_with("Warehouse load: 100.0%\nZone A load: 100.0%\n"));
    assert!(out.ends_with("Empty cells: \n"));
}

#[test]
fn wide_topology_uses_padded_addresses() {
    let config = DepotConfig {
        name: "variant-9".to_string(),
        topology: Topology {
            zones: vec!['A'],
            racks_per_zone: 5,
            sections_per_rack: 5,
            shelves_per_section: 15,
            cell_capacity: 10,
        },
    };
    let out = run_with(&config, "ADD Oranges 10 A1101\nADD Oranges 1 A112\nINFO\n");
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("ERROR: Invalid address"));
    // 10 / 3750
    assert_eq!(lines.next(), Some("Warehouse load: 0.3%"));
    assert!(out.contains("\nA1101: Oranges (10)\n"));
    assert!(out.contains("Empty cells: A1102 A1103 "));
}
