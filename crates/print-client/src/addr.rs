//! Printer address resolution.
//!
//! Accepts `IP`, `IP:PORT`, `hostname` and `hostname:PORT`, falling back to
//! the raw printing port when no port is given.

use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

use crate::PrintError;

/// Raw TCP printing port used by TSC and most label printers.
pub const DEFAULT_PORT: u16 = 9100;

/// Resolve a user-provided printer address to a `SocketAddr`, defaulting to
/// [`DEFAULT_PORT`].
///
/// For hostnames that resolve to several addresses the first one wins.
///
/// # Errors
///
/// Returns [`PrintError::NoAddressFound`] when the input is neither an IP
/// address nor a resolvable hostname.
pub fn resolve_printer_addr(input: &str) -> Result<SocketAddr, PrintError> {
    resolve_with_port(input, DEFAULT_PORT)
}

pub(crate) fn resolve_with_port(input: &str, default_port: u16) -> Result<SocketAddr, PrintError> {
    let input = input.trim();

    if let Ok(addr) = input.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = input.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, default_port));
    }

    // host:port first, then bare host with the default port.
    let resolved = input
        .to_socket_addrs()
        .ok()
        .and_then(|mut a| a.next())
        .or_else(|| {
            (input, default_port)
                .to_socket_addrs()
                .ok()
                .and_then(|mut a| a.next())
        });

    resolved.ok_or_else(|| PrintError::NoAddressFound(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_with_port() {
        let addr = resolve_printer_addr("192.168.1.40:6101").unwrap();
        assert_eq!(addr.ip().to_string(), "192.168.1.40");
        assert_eq!(addr.port(), 6101);
    }

    #[test]
    fn ip_without_port_uses_default() {
        let addr = resolve_printer_addr("192.168.1.40").unwrap();
        assert_eq!(addr.port(), DEFAULT_PORT);
    }

    #[test]
    fn ipv6_forms() {
        assert_eq!(resolve_printer_addr("[::1]:9101").unwrap().port(), 9101);
        let bare = resolve_printer_addr("::1").unwrap();
        assert!(bare.ip().is_loopback());
        assert_eq!(bare.port(), DEFAULT_PORT);
    }

    #[test]
    fn localhost_forms() {
        let with_port = resolve_printer_addr("localhost:9100").unwrap();
        assert!(with_port.ip().is_loopback());
        let bare = resolve_printer_addr("localhost").unwrap();
        assert_eq!(bare.port(), DEFAULT_PORT);
    }

    #[test]
    fn surrounding_whitespace_ignored() {
        let addr = resolve_printer_addr("  10.0.0.7 ").unwrap();
        assert_eq!(addr.ip().to_string(), "10.0.0.7");
    }

    #[test]
    fn custom_default_port() {
        let addr = resolve_with_port("10.0.0.7", 4000).unwrap();
        assert_eq!(addr.port(), 4000);
    }

    #[test]
    fn unresolvable_input() {
        match resolve_printer_addr("no-such-host.invalid") {
            Err(PrintError::NoAddressFound(s)) => assert_eq!(s, "no-such-host.invalid"),
            other => panic!("expected NoAddressFound, got {:?}", other),
        }
    }
}
