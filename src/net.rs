//! Network helpers
//!
//! Best-effort LAN address discovery, shown at startup so the operator
//! can hand out a reachable address.

use std::net::{IpAddr, UdpSocket};

/// Find the local (LAN) IP address of this machine
///
/// Opens a UDP socket towards a public address and reads back which
/// local address the OS picked for the route. No packet is sent.
/// Returns `None` when there is no usable route (offline, firewalled).
pub fn local_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    socket.local_addr().ok().map(|a| a.ip())
}
