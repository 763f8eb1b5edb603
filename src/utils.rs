use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Returns true when the file's final extension, with its leading dot, is in `extensions`.
///
/// Comparison is exact, so `.TS` does not match `.ts`.
pub fn has_admitted_extension(path: &Path, extensions: &HashSet<String>) -> bool {
    match path.extension().and_then(OsStr::to_str) {
        Some(ext) => extensions.contains(&format!(".{ext}")),
        None => false,
    }
}

/// Sorts paths by their raw string (byte order) and drops exact duplicates.
pub fn sort_unique(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    paths.dedup_by(|a, b| a.as_os_str() == b.as_os_str());
    paths
}

/// Folds `.` and `..` out of `path` without touching the filesystem.
///
/// A `..` directly under the root is dropped, so `/..` becomes `/`.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }
    parts.iter().collect()
}

/// The deepest directory that contains every path in `paths`.
pub fn common_parent(paths: &[&Path]) -> PathBuf {
    let mut iter = paths.iter();
    let Some(first) = iter.next() else {
        return PathBuf::new();
    };

    let mut common: Vec<Component> = first
        .parent()
        .map(|p| p.components().collect())
        .unwrap_or_default();

    for path in iter {
        let dir: Vec<Component> = path
            .parent()
            .map(|p| p.components().collect())
            .unwrap_or_default();
        let shared = common
            .iter()
            .zip(dir.iter())
            .take_while(|(a, b)| a == b)
            .count();
        common.truncate(shared);
    }

    common.iter().collect()
}
