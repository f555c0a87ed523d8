//! Local network information: interface addresses and reverse DNS.
//!
//! Neither is used by the sweep itself; they back the `interfaces`
//! subcommand and the optional hostname column in scan output.

use pnet::datalink;
use serde::Serialize;
use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// IPv4 address and netmask of a local interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InterfaceAddr {
    pub ip: Ipv4Addr,
    pub netmask: Ipv4Addr,
}

/// Interfaces that carry an IPv4 address, keyed by name.
///
/// When an interface has several IPv4 addresses the first one is reported.
pub fn list_interfaces() -> BTreeMap<String, InterfaceAddr> {
    datalink::interfaces()
        .into_iter()
        .filter_map(|iface| {
            let addr = iface.ips.iter().find_map(|net| match (net.ip(), net.mask()) {
                (IpAddr::V4(ip), IpAddr::V4(netmask)) => Some(InterfaceAddr { ip, netmask }),
                _ => None,
            })?;
            Some((iface.name, addr))
        })
        .collect()
}

/// Reverse DNS lookups through the default upstream resolvers.
pub struct HostnameResolver {
    resolver: TokioAsyncResolver,
}

impl HostnameResolver {
    pub fn new() -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default()),
        }
    }

    /// The PTR name for `ip`, without the trailing root dot, if there is one.
    pub async fn resolve(&self, ip: Ipv4Addr) -> Option<String> {
        match self.resolver.reverse_lookup(IpAddr::V4(ip)).await {
            Ok(lookup) => lookup.iter().next().map(|name| strip_root(name.to_string())),
            Err(e) => {
                debug!(%ip, error = %e, "reverse lookup failed");
                None
            }
        }
    }
}

impl Default for HostnameResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_root(mut name: String) -> String {
    if name.len() > 1 && name.ends_with('.') {
        name.pop();
    }
    name
}
