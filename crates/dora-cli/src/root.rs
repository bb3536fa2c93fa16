use dora_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the metrics file location.
///
/// Priority:
/// 1. `--db` flag / `DORA_DB` env var
/// 2. `--root` flag / `DORA_ROOT` env var, joined with the default file name
/// 3. Walk upward from `cwd` looking for an existing metrics file
/// 4. Walk upward from `cwd` looking for `.git/`
/// 5. Fall back to `cwd`
pub fn resolve_db(db: Option<&Path>, root: Option<&Path>) -> PathBuf {
    if let Some(p) = db {
        return p.to_path_buf();
    }
    paths::metrics_path(&resolve_root(root))
}

pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_upward(&cwd, |dir| paths::metrics_path(dir).is_file())
        .or_else(|| find_upward(&cwd, |dir| dir.join(paths::GIT_DIR).is_dir()))
        .unwrap_or(cwd)
}

fn find_upward(start: &Path, matches: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| matches(dir))
        .map(Path::to_path_buf)
}
