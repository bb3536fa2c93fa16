use dora_core::deployment::{format_epoch, Deployment};
use serde::Serialize;

const COLUMNS: [&str; 5] = ["COMMIT", "STATUS", "STARTED", "FINISHED", "LEAD TIME"];
const MISSING: &str = "-";

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn deployment_row(d: &Deployment) -> [String; 5] {
    let time = |t: Option<f64>| t.map(format_epoch).unwrap_or_else(|| MISSING.to_string());
    [
        d.commit_hash.clone(),
        d.status.to_string(),
        time(d.start_time),
        time(d.end_time),
        d.lead_time()
            .map(|secs| format!("{secs:.2}s"))
            .unwrap_or_else(|| MISSING.to_string()),
    ]
}

/// Render deployments as an aligned table, header and rule first.
pub fn deployments_table(deployments: &[Deployment]) -> String {
    let rows: Vec<[String; 5]> = deployments.iter().map(deployment_row).collect();

    let mut widths = COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 5]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{cell:w$}"))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let rule = widths.map(|w| "-".repeat(w));
    let mut out = vec![line(COLUMNS), line(rule.each_ref().map(|s| s.as_str()))];
    out.extend(rows.iter().map(|row| line(row.each_ref().map(|s| s.as_str()))));
    out.join("\n")
}
