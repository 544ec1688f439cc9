use std::net::Ipv4Addr;

/// Returns `true` for exactly four dot-separated decimal octets in `0..=255`.
///
/// Stricter about shape than it is about style: `"010.1.1.1"` is accepted
/// (octets of up to three digits), `" 1.2.3.4"` and `"1.2.3.4."` are not.
pub fn is_valid_address(token: &str) -> bool {
    parse_address(token).is_some()
}

/// Parses a dotted quad into an [`Ipv4Addr`], applying [`is_valid_address`] rules.
pub fn parse_address(token: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = token.split('.');

    for slot in octets.iter_mut() {
        *slot = parse_octet(parts.next()?)?;
    }

    if parts.next().is_some() {
        return None;
    }

    Some(Ipv4Addr::from(octets))
}

fn parse_octet(part: &str) -> Option<u8> {
    if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse::<u16>().ok().and_then(|v| u8::try_from(v).ok())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
