use std::fs;
use std::path::{Path, PathBuf};

fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn relative_path(path: &Path) -> String {
    path.strip_prefix(root())
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn collect_rs_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = fs::read_dir(dir).unwrap_or_else(|e| {
        panic!("failed to read dir {}: {e}", dir.display());
    });

    for entry in entries {
        let path = entry
            .unwrap_or_else(|e| panic!("failed to read dir entry: {e}"))
            .path();

        if path.is_dir() {
            collect_rs_files_recursive(&path, files);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
}

pub fn collect_rs_files(relative_dir: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect_rs_files_recursive(&root().join(relative_dir), &mut files);
    files.sort();
    files
}

/// Lines under `relative_dir` containing any of `patterns`, as (file, line, text).
pub fn find_lines_containing(
    relative_dir: &str,
    patterns: &[&str],
) -> Vec<(String, usize, String)> {
    let mut hits = Vec::new();

    for file in collect_rs_files(relative_dir) {
        let content = fs::read_to_string(&file).unwrap_or_else(|e| {
            panic!("failed to read {}: {e}", file.display());
        });

        for (idx, line) in content.lines().enumerate() {
            if patterns.iter().any(|p| line.contains(p)) {
                hits.push((relative_path(&file), idx + 1, line.to_string()));
            }
        }
    }

    hits
}

/// Item definitions found in `mod.rs` files; those should only declare and
/// re-export modules.
pub fn find_definitions_in_mod_files(relative_dir: &str) -> Vec<(String, usize, String)> {
    const DEFINITIONS: &[&str] = &[
        "fn ", "pub fn ", "async fn ", "pub async fn ", "struct ", "pub struct ", "enum ",
        "pub enum ", "impl ", "impl<", "trait ", "pub trait ", "const ", "pub const ",
        "static ", "pub static ",
    ];

    let mut violations = Vec::new();

    for file in collect_rs_files(relative_dir) {
        if file.file_name().and_then(|s| s.to_str()) != Some("mod.rs") {
            continue;
        }

        let content = fs::read_to_string(&file).unwrap_or_else(|e| {
            panic!("failed to read {}: {e}", file.display());
        });

        for (idx, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim_start();
            if DEFINITIONS.iter().any(|d| line.starts_with(d)) {
                violations.push((relative_path(&file), idx + 1, raw_line.to_string()));
            }
        }
    }

    violations
}

/// Sort rank of one path segment, in rustfmt's order: modules, then types,
/// then constants, then `{..}` groups.
fn segment_key(segment: &str) -> (u8, &str) {
    let rank = if segment.starts_with('{') {
        3
    } else if segment.starts_with(char::is_uppercase)
        && segment
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
    {
        2
    } else if segment.starts_with(char::is_uppercase) {
        1
    } else {
        0
    };
    (rank, segment)
}

fn import_key(line: &str) -> Vec<(u8, &str)> {
    line.trim_start_matches("use ")
        .trim_end_matches(';')
        .split("::")
        .map(segment_key)
        .collect()
}

/// Adjacent single-line `use crate::` imports that are out of order.
pub fn find_unsorted_crate_imports(relative_dir: &str) -> Vec<(String, usize, String)> {
    let mut violations = Vec::new();

    for file in collect_rs_files(relative_dir) {
        let content = fs::read_to_string(&file).unwrap_or_else(|e| {
            panic!("failed to read {}: {e}", file.display());
        });

        let mut previous: Option<&str> = None;
        for (idx, line) in content.lines().enumerate() {
            let is_import = line.starts_with("use crate::") && line.ends_with(';');
            if !is_import {
                previous = None;
                continue;
            }
            if let Some(prev) = previous {
                if import_key(prev) > import_key(line) {
                    violations.push((relative_path(&file), idx + 1, line.to_string()));
                }
            }
            previous = Some(line);
        }
    }

    violations
}
