//! Formatting utilities

use std::path::Path;
use std::time::Duration;

/// Label used when no directory name can be determined
pub const UNKNOWN_DIR: &str = "unknown";

/// Format elapsed time as seconds with one decimal place (e.g. "12.3s")
pub fn seconds(elapsed: Duration) -> String {
    format!("{:.1}s", elapsed.as_secs_f64())
}

/// Final component of a slash-separated path.
///
/// Trailing slashes are ignored, so `envs/prod/` yields `prod`. A path with
/// no usable component (such as `/`) is returned unchanged.
pub fn last_component(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => path,
    }
}

/// Final component of a directory, or "unknown"
pub fn dir_label(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNKNOWN_DIR.to_string())
}

/// Take the last `n` non-empty lines of `s`, joined with newlines
pub fn tail_lines(s: &str, n: usize) -> String {
    let lines: Vec<&str> = s
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}
