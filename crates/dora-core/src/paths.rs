use std::path::{Path, PathBuf};

pub const METRICS_FILE: &str = "dora_metrics.json";
pub const GIT_DIR: &str = ".git";

pub fn metrics_path(root: &Path) -> PathBuf {
    root.join(METRICS_FILE)
}
