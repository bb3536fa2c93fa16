use crate::output::{deployments_table, print_json};
use anyhow::Context;
use dora_core::metrics::NO_DEPLOYMENTS;
use dora_core::store::{FileStore, Store};
use std::path::Path;

pub fn run(db: &Path, json: bool) -> anyhow::Result<()> {
    let store = FileStore::new(db);
    let dataset = store
        .load()
        .with_context(|| format!("failed to load {}", store.path().display()))?;

    if json {
        return print_json(&dataset.deployments);
    }
    if dataset.is_empty() {
        println!("{NO_DEPLOYMENTS}");
        return Ok(());
    }
    println!("{}", deployments_table(&dataset.deployments));
    Ok(())
}
