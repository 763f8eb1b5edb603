use crate::utils::{has_admitted_extension, normalize_lexically, sort_unique};
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use log::{debug, info};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Files that are always considered for backup, relative to the project root.
pub const MANIFEST: &[&str] = &[
    "components/gallery-page.tsx",
    "components/gallery/bulk-action-bar.tsx",
    "components/gallery/settings-panel.tsx",
    "components/gallery/ui-components.tsx",
    "components/gallery/viewer-components.tsx",
];

/// Directories searched recursively for source files.
pub const SCAN_ROOTS: &[&str] = &["hooks", "types", "lib"];

/// Extensions admitted during the directory scan. Matching is case-sensitive.
pub const EXTENSIONS: &[&str] = &[".tsx", ".ts", ".js", ".jsx", ".mjs"];

/// What to pick up from a project tree.
///
/// `Selection::default()` is the compiled-in set used by the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub manifest: Vec<PathBuf>,
    pub scan_roots: Vec<PathBuf>,
    pub extensions: HashSet<String>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            manifest: MANIFEST.iter().map(PathBuf::from).collect(),
            scan_roots: SCAN_ROOTS.iter().map(PathBuf::from).collect(),
            extensions: EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Collects the files to back up under `project_root`.
///
/// Manifest entries that do not exist and scan roots that are absent are
/// skipped silently. The result holds absolute paths, sorted by their path
/// string and free of duplicates. `.` and `..` are folded out of the root
/// without resolving symlinks; an empty root means the current directory.
pub fn collect_files(project_root: &Path, selection: &Selection) -> Result<Vec<PathBuf>> {
    let project_root = if project_root.as_os_str().is_empty() {
        Path::new(".")
    } else {
        project_root
    };
    let root = std::path::absolute(project_root)
        .map(|abs| normalize_lexically(&abs))
        .with_context(|| format!("Failed to resolve project root: {}", project_root.display()))?;

    let mut files = Vec::new();

    for entry in &selection.manifest {
        let path = normalize_lexically(&root.join(entry));
        if path.is_file() {
            files.push(path);
        } else {
            debug!("Manifest entry not found, skipping: {}", path.display());
        }
    }

    for dir in &selection.scan_roots {
        let before = files.len();
        scan_dir(&root.join(dir), &selection.extensions, &mut files);
        debug!("{}: {} matching files", dir.display(), files.len() - before);
    }

    let files = sort_unique(files);
    info!("Collected {} files under {}", files.len(), root.display());
    Ok(files)
}

/// Walks `dir` and pushes every file with an admitted extension.
fn scan_dir(dir: &Path, extensions: &HashSet<String>, files: &mut Vec<PathBuf>) {
    if !dir.is_dir() {
        debug!("Scan root not present: {}", dir.display());
        return;
    }

    // Plain recursive walk: hidden and ignored files are included too.
    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .follow_links(false)
        .build();

    for result in walker {
        match result {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() && has_admitted_extension(path, extensions) {
                    files.push(entry.into_path());
                }
            }
            Err(err) => {
                debug!("Error walking path: {err}");
            }
        }
    }
}
