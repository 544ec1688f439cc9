/// Extracts the location code from a trace-identifier header value.
///
/// The code is the last dash-delimited segment (`"8f1c2a3b4d5e6f70-LAX"` gives
/// `"LAX"`). A value without dashes is returned whole; blank values give `None`.
pub fn location_code(header_value: &str) -> Option<&str> {
    header_value
        .rsplit('-')
        .next()
        .map(str::trim)
        .filter(|code| !code.is_empty())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
