//! Reading a backup document back into files.
//!
//! A record starts with a marker line `=== <path> ===` followed by a blank
//! line. Markers are only recognised at the very start of the document or
//! right after the blank-line separator that ends the previous record, so a
//! marker-looking line inside a file body is usually left alone. A body that
//! itself contains a blank line followed by a marker line cannot be told
//! apart from a record boundary.

use crate::utils::common_parent;
use anyhow::{Context, Result, bail};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Component, Path, PathBuf};

static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^=== (.+) ===\n\n").expect("valid marker regex"));

/// One file recovered from a backup document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub path: PathBuf,
    pub content: String,
}

/// Splits a backup document into its records.
pub fn parse_backup(text: &str) -> Vec<Record> {
    let markers: Vec<_> = MARKER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let at_boundary = whole.start() == 0 || text[..whole.start()].ends_with("\n\n");
            at_boundary.then(|| (whole.start(), whole.end(), caps[1].to_string()))
        })
        .collect();

    let mut records = Vec::with_capacity(markers.len());
    for (i, (_, body_start, path)) in markers.iter().enumerate() {
        let body_end = markers.get(i + 1).map_or(text.len(), |next| next.0);
        let body = &text[*body_start..body_end];
        let content = body.strip_suffix("\n\n").unwrap_or(body);

        records.push(Record {
            path: PathBuf::from(path),
            content: content.to_string(),
        });
    }

    debug!("Parsed {} records", records.len());
    records
}

/// Restores every record in the backup at `input` beneath `target`.
///
/// Paths are made relative to the deepest directory shared by all records.
/// Defaults to the current directory when `target` is `None`. Returns the
/// number of files written.
pub async fn restore_backup(input: &Path, target: Option<&Path>) -> Result<usize> {
    let text = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read backup: {}", input.display()))?;

    let target = match target {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };

    let records = parse_backup(&text);
    let paths: Vec<&Path> = records.iter().map(|r| r.path.as_path()).collect();
    let base = common_parent(&paths);

    for record in &records {
        let rel = relative_to(&record.path, &base)?;
        let dest = target.join(rel);

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        tokio::fs::write(&dest, &record.content)
            .await
            .with_context(|| format!("Failed to write file: {}", dest.display()))?;
        debug!("Restored {}", dest.display());
    }

    info!("Restored {} files into {}", records.len(), target.display());
    Ok(records.len())
}

/// Strips `base` from `path`, refusing anything that would climb out of the target.
fn relative_to<'a>(path: &'a Path, base: &Path) -> Result<&'a Path> {
    let rel = path.strip_prefix(base).unwrap_or(path);
    for component in rel.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => bail!("Refusing to restore outside target: {}", path.display()),
        }
    }
    Ok(rel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_records() {
        let doc = "=== /p/hooks/a.ts ===\n\nconst a = 1;\n\n\n=== /p/lib/b.ts ===\n\nb\n\n";
        let records = parse_backup(doc);
        assert_eq!(
            records,
            vec![
                Record {
                    path: PathBuf::from("/p/hooks/a.ts"),
                    content: "const a = 1;\n".to_string(),
                },
                Record {
                    path: PathBuf::from("/p/lib/b.ts"),
                    content: "b".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse_backup("").is_empty());
    }

    #[test]
    fn test_marker_inside_body_is_kept() {
        let doc = "=== /p/a.ts ===\n\n// header\n=== not a marker ===\n\nrest\n\n";
        let records = parse_backup(doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content, "// header\n=== not a marker ===\n\nrest");
    }

    #[test]
    fn test_blank_line_then_marker_in_body_splits() {
        let doc = "=== /p/a.ts ===\n\nintro\n\n=== /p/fake.ts ===\n\ntail\n\n";
        let records = parse_backup(doc);
        assert_eq!(
            records,
            vec![
                Record {
                    path: PathBuf::from("/p/a.ts"),
                    content: "intro".to_string(),
                },
                Record {
                    path: PathBuf::from("/p/fake.ts"),
                    content: "tail".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_relative_to_rejects_parent_dirs() {
        assert!(relative_to(Path::new("/p/../etc/passwd"), Path::new("/p")).is_err());
        assert_eq!(
            relative_to(Path::new("/p/lib/a.ts"), Path::new("/p")).unwrap(),
            Path::new("lib/a.ts")
        );
    }

    #[tokio::test]
    async fn test_restore_writes_relative_tree() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let backup = dir.path().join("backup.txt");
        tokio::fs::write(
            &backup,
            "=== /p/hooks/a.ts ===\n\nA\n\n=== /p/lib/x/b.ts ===\n\nB\n\n",
        )
        .await?;

        let out = dir.path().join("out");
        let count = restore_backup(&backup, Some(out.as_path())).await?;

        assert_eq!(count, 2);
        assert_eq!(std::fs::read_to_string(out.join("hooks/a.ts"))?, "A");
        assert_eq!(std::fs::read_to_string(out.join("lib/x/b.ts"))?, "B");
        Ok(())
    }
}
