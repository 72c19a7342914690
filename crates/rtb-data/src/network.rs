//! Network text helpers
//!
//! IPv4 validation and ordering, MAC address normalization.

use once_cell::sync::Lazy;
use regex::Regex;

static IPV4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((\d|1?\d{2}|2[0-4]\d|25[0-5])\.){3}(\d|1?\d{2}|2[0-4]\d|25[0-5])$")
        .expect("valid IPv4 regex")
});

static MAC_COLON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9a-fA-F]{2}:){5}[0-9a-fA-F]{2}$").expect("valid MAC regex"));

static MAC_DASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9a-fA-F]{2}-){5}[0-9a-fA-F]{2}$").expect("valid MAC regex"));

static MAC_BARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{12}$").expect("valid MAC regex"));

/// Separator style for rendered MAC addresses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MacFormat {
    /// `aa:bb:cc:dd:ee:ff`
    #[default]
    Colon,
    /// `aa-bb-cc-dd-ee-ff`
    Dash,
}

impl MacFormat {
    fn separator(self) -> &'static str {
        match self {
            Self::Colon => ":",
            Self::Dash => "-",
        }
    }
}

/// Dotted-quad IPv4 check
///
/// Octets may carry one leading zero (`01`), as the toolbox always accepted.
#[must_use]
pub fn is_ipv4_address(ip: &str) -> bool {
    IPV4.is_match(ip)
}

fn octets(ip: &str) -> Option<[u8; 4]> {
    if !is_ipv4_address(ip) {
        return None;
    }
    let mut out = [0u8; 4];
    for (slot, part) in out.iter_mut().zip(ip.split('.')) {
        *slot = part.parse().ok()?;
    }
    Some(out)
}

/// Sort IPv4 addresses numerically, first octet most significant
///
/// With `verify`, entries that are not IPv4 addresses are dropped; without
/// it they are kept, in input order, after the valid ones.
#[must_use]
pub fn sort_ipv4_addresses<S: AsRef<str>>(ips: &[S], verify: bool) -> Vec<String> {
    let (mut valid, invalid): (Vec<_>, Vec<_>) = ips
        .iter()
        .map(|ip| (octets(ip.as_ref()), ip.as_ref().to_string()))
        .partition(|(key, _)| key.is_some());
    valid.sort_by_key(|(key, _)| *key);

    let mut sorted: Vec<String> = valid.into_iter().map(|(_, ip)| ip).collect();
    if verify {
        if !invalid.is_empty() {
            tracing::debug!("Dropped {} invalid IPv4 entries", invalid.len());
        }
    } else {
        sorted.extend(invalid.into_iter().map(|(_, ip)| ip));
    }
    sorted
}

/// Normalize a MAC address to `format`
///
/// Accepts colon-separated, dash-separated or bare 12-hex-digit input.
/// Returns `None` for anything else.
#[must_use]
pub fn convert_mac(mac: &str, format: MacFormat, upper: bool) -> Option<String> {
    let digits: String = if MAC_COLON.is_match(mac) || MAC_DASH.is_match(mac) {
        mac.chars().filter(char::is_ascii_hexdigit).collect()
    } else if MAC_BARE.is_match(mac) {
        mac.to_string()
    } else {
        return None;
    };

    let pairs: Vec<&str> = (0..6).map(|i| &digits[i * 2..i * 2 + 2]).collect();
    let joined = pairs.join(format.separator());
    Some(if upper { joined.to_uppercase() } else { joined })
}
