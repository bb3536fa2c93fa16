use crate::output::print_json;
use anyhow::Context;
use dora_core::deployment::{EventStatus, EventType, TrackedEvent};
use dora_core::store::FileStore;
use dora_core::tracker;
use std::path::Path;

pub fn run(
    db: &Path,
    event_type: EventType,
    status: EventStatus,
    commit: &str,
    json: bool,
) -> anyhow::Result<()> {
    let event = TrackedEvent::now(event_type, status, commit);

    let store = FileStore::new(db);
    let outcome = tracker::record(&store, &event)
        .with_context(|| format!("failed to record event in {}", store.path().display()))?;

    if json {
        let value = serde_json::json!({
            "event": event,
            "outcome": outcome,
        });
        print_json(&value)?;
    } else {
        println!("{}", tracker::confirmation(&event));
    }
    Ok(())
}
