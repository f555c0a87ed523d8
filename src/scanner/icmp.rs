//! ICMP echo (ping) probing over a raw socket.
//!
//! # Privileges Required
//!
//! Opening a raw ICMP socket needs root or `CAP_NET_RAW`. [`IcmpPinger::new`]
//! checks this once; without it the pinger reports itself unavailable and
//! host probing goes straight to the TCP fallback.
//!
//! # Packet Layout
//!
//! ```text
//! type (8) | code (0) | checksum | identifier | sequence (1) | timestamp (8 bytes)
//! ```
//!
//! The checksum is the RFC 1071 one's-complement sum over header and payload,
//! computed by `pnet`.

use crate::error::{ScanError, ScanResult};
use crate::scanner::traits::Pinger;
use async_trait::async_trait;
use chrono::Utc;
use pnet::packet::icmp::echo_reply::EchoReplyPacket;
use pnet::packet::icmp::echo_request::MutableEchoRequestPacket;
use pnet::packet::icmp::{checksum, IcmpCode, IcmpPacket, IcmpTypes};
use pnet::packet::ipv4::Ipv4Packet;
use pnet::packet::Packet;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io::{self, Read};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::{Duration, Instant};
use tracing::debug;

const HEADER_LEN: usize = 8;
const PAYLOAD_LEN: usize = 8;
const SEQUENCE: u16 = 1;

/// Build an echo request carrying an 8-byte big-endian timestamp.
pub fn echo_request(identifier: u16, sequence: u16, timestamp: i64) -> ScanResult<Vec<u8>> {
    let mut buf = vec![0u8; HEADER_LEN + PAYLOAD_LEN];
    let mut pkt = MutableEchoRequestPacket::new(&mut buf)
        .ok_or_else(|| ScanError::RawSocket("echo request buffer too small".to_string()))?;
    pkt.set_icmp_type(IcmpTypes::EchoRequest);
    pkt.set_icmp_code(IcmpCode::new(0));
    pkt.set_identifier(identifier);
    pkt.set_sequence_number(sequence);
    pkt.set_payload(&timestamp.to_be_bytes());
    let icmp_packet = IcmpPacket::new(pkt.packet())
        .ok_or_else(|| ScanError::RawSocket("echo request parse failed".to_string()))?;
    let csum = checksum(&icmp_packet);
    pkt.set_checksum(csum);
    Ok(buf)
}

/// Check whether an IPv4 datagram read from the raw socket is the echo reply
/// from `host` to our request.
fn is_echo_reply(datagram: &[u8], host: Ipv4Addr, identifier: u16) -> bool {
    let Some(ipv4) = Ipv4Packet::new(datagram) else {
        return false;
    };
    if ipv4.get_source() != host {
        return false;
    }
    let header_len = usize::from(ipv4.get_header_length()) * 4;
    if header_len < Ipv4Packet::minimum_packet_size() {
        return false;
    }
    let Some(icmp) = datagram.get(header_len..).and_then(EchoReplyPacket::new) else {
        return false;
    };
    icmp.get_icmp_type() == IcmpTypes::EchoReply && icmp.get_identifier() == identifier
}

fn open_socket() -> ScanResult<Socket> {
    Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4)).map_err(|e| {
        if e.kind() == io::ErrorKind::PermissionDenied {
            ScanError::PermissionDenied(format!("raw ICMP socket: {}", e))
        } else {
            ScanError::RawSocket(e.to_string())
        }
    })
}

/// Send one echo request and block until the matching reply or the timeout.
fn echo_blocking(host: Ipv4Addr, timeout: Duration) -> ScanResult<()> {
    let socket = open_socket()?;
    let identifier: u16 = rand::random();
    let packet = echo_request(identifier, SEQUENCE, Utc::now().timestamp_micros())?;
    socket.send_to(&packet, &SockAddr::from(SocketAddrV4::new(host, 0)))?;

    let deadline = Instant::now() + timeout;
    let mut buf = [0u8; 1024];
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(ScanError::Timeout);
        }
        socket.set_read_timeout(Some(remaining))?;

        match (&socket).read(&mut buf) {
            Ok(n) if is_echo_reply(&buf[..n], host, identifier) => return Ok(()),
            Ok(_) => continue,
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                return Err(ScanError::Timeout)
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Raw-socket ICMP echo prober. Each echo opens and closes its own socket.
#[derive(Debug)]
pub struct IcmpPinger {
    available: bool,
}

impl IcmpPinger {
    /// Create a pinger, checking once whether raw ICMP sockets can be opened.
    pub fn new() -> Self {
        let available = match open_socket() {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "ICMP echo unavailable");
                false
            }
        };
        Self { available }
    }
}

impl Default for IcmpPinger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Pinger for IcmpPinger {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn echo(&self, host: Ipv4Addr, timeout: Duration) -> ScanResult<()> {
        tokio::task::spawn_blocking(move || echo_blocking(host, timeout))
            .await
            .map_err(|e| ScanError::TaskFailed(e.to_string()))?
    }
}
