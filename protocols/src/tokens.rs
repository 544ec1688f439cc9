use std::sync::LazyLock;

use regex::Regex;

/// Dotted quad, optionally followed by a `/0`..`/32` prefix.
///
/// Octet values are not range-checked here; `999.1.1.1` is a token and gets
/// dropped later by address validation.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}(?:/(?:3[0-2]|[1-2]?[0-9]))?\b")
        .expect("token pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Address,
    Cidr,
}

/// Every address or CIDR token in `text`, in document order, duplicates kept.
pub fn scan(text: &str) -> Vec<&str> {
    TOKEN_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

pub fn classify(token: &str) -> TokenKind {
    if token.contains('/') {
        TokenKind::Cidr
    } else {
        TokenKind::Address
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
