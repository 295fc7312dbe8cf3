//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use lineage::dataset::Dataset;
use lineage::domain::{Component, ComponentType, Edge, EdgeType, Environment};
use lineage::GraphIndex;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path of a file under `tests/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The billing platform sample dataset
pub fn billing_index() -> GraphIndex {
    let json = std::fs::read_to_string(fixture_path("billing.json"))
        .expect("Failed to read billing fixture");
    Dataset::from_json(&json)
        .expect("Billing fixture should parse")
        .into_index()
}

/// Build an index of tables from `(source, target)` pairs.
///
/// Edge ids are `e1`, `e2`, ... in the order given. Every id mentioned in
/// `ids` becomes a component; endpoints not in `ids` stay dangling.
pub fn table_graph(ids: &[&str], links: &[(&str, &str)]) -> GraphIndex {
    let components = ids
        .iter()
        .map(|id| Component::new(*id, ComponentType::Table, Environment::Production));
    let edges = links
        .iter()
        .enumerate()
        .map(|(i, (source, target))| {
            Edge::new(format!("e{}", i + 1), *source, *target, EdgeType::Reads)
        });
    GraphIndex::build(components, edges)
}

/// Run the lineage binary in `dir` with colors disabled
pub fn run_lineage_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lineage"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute lineage binary")
}
