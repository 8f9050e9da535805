// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared terminal output helpers.

use std::io::IsTerminal;

use colored::Colorize;
use serde::Serialize;

/// Colors are used unless `--plain` was passed or stdout is not a TTY.
pub fn use_color(plain: bool) -> bool {
    !plain && std::io::stdout().is_terminal()
}

/// Print `value` as pretty JSON for scripting.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

/// Section heading followed by a rule.
pub fn heading(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(&format!("  {title}\n"));
    out.push_str(&format!("  {}\n", "-".repeat(35)));
}

/// `[OK]`/`[FAIL]` marker, or a colored check/cross.
pub fn marker(ok: bool, use_color: bool) -> String {
    match (ok, use_color) {
        (true, true) => "✓".green().to_string(),
        (false, true) => "✗".red().to_string(),
        (true, false) => "[OK]".to_string(),
        (false, false) => "[FAIL]".to_string(),
    }
}

/// Capacity label, green while places remain and red when full.
pub fn capacity(label: &str, available: u32, use_color: bool) -> String {
    if !use_color {
        return label.to_string();
    }
    if available == 0 {
        label.red().to_string()
    } else {
        label.green().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_markers() {
        assert_eq!(marker(true, false), "[OK]");
        assert_eq!(marker(false, false), "[FAIL]");
    }

    #[test]
    fn plain_capacity_is_unchanged() {
        assert_eq!(capacity("0/6", 0, false), "0/6");
    }

    #[test]
    fn heading_has_rule() {
        let mut out = String::new();
        heading(&mut out, "tutoria grid");
        assert!(out.contains("  tutoria grid\n"));
        assert!(out.contains(&"-".repeat(35)));
    }
}
