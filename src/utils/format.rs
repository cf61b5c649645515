//! Formatting utilities for file sizes, paths, and UI templates.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Units used by [`format_size`], each 1024x the previous.
const SIZE_UNITS: [&str; 7] = ["bytes", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Decimal places kept by [`format_size`] before trailing zeros are trimmed.
const SIZE_DECIMALS: usize = 2;

/// Pick the unit index for a byte count: the largest `i` with `bytes / 1024^i >= 1`.
pub fn size_unit_index(bytes: u64) -> usize {
    let mut index = 0;
    let mut threshold: u128 = 1024;
    while index + 1 < SIZE_UNITS.len() && u128::from(bytes) >= threshold {
        index += 1;
        threshold *= 1024;
    }
    index
}

/// Format file size for display (e.g., "512 bytes", "2 KB", "1.5 MB").
pub fn format_size(bytes: u64) -> String {
    let mut index = size_unit_index(bytes);
    if index == 0 {
        return format!("{} {}", bytes, SIZE_UNITS[0]);
    }

    let mut scaled = bytes as f64 / 1024f64.powi(index as i32);
    // Rounding can carry into the next unit, e.g. 1_048_575 bytes.
    let precision = 10f64.powi(SIZE_DECIMALS as i32);
    if (scaled * precision).round() / precision >= 1024.0 && index + 1 < SIZE_UNITS.len() {
        index += 1;
        scaled /= 1024.0;
    }
    let fixed = format!("{:.*}", SIZE_DECIMALS, scaled);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[index])
}

/// Every prefix of `path` from the root down, e.g. `/a/b` -> `["/", "/a", "/a/b"]`.
///
/// Empty segments (leading, trailing or doubled slashes) are skipped.
pub fn path_prefixes(path: &str) -> Vec<String> {
    let mut prefixes = vec!["/".to_string()];
    let mut current = String::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        current.push('/');
        current.push_str(segment);
        prefixes.push(current.clone());
    }
    prefixes
}

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([^}]+)\}\}").expect("placeholder pattern is valid")
});

/// Replace `{{ key }}` placeholders with values from `data`.
///
/// Keys are trimmed before lookup. Missing keys become the empty string.
pub fn substitute(template: &str, data: &HashMap<&str, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| {
            data.get(caps[1].trim()).cloned().unwrap_or_default()
        })
        .into_owned()
}
