use crate::output::print_json;
use anyhow::Context;
use dora_core::metrics;
use dora_core::store::{FileStore, Store};
use std::path::Path;

pub fn run(db: &Path, json: bool) -> anyhow::Result<()> {
    let store = FileStore::new(db);
    let dataset = store
        .load()
        .with_context(|| format!("failed to load {}", store.path().display()))?;
    let report = metrics::compute(&dataset);

    if json {
        return print_json(&report);
    }

    match report {
        None => println!("{}", metrics::NO_DEPLOYMENTS),
        Some(r) => {
            for line in r.lines() {
                println!("{line}");
            }
        }
    }
    Ok(())
}
