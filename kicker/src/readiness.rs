//! Readiness evaluation.
//!
//! One evaluation resolves the configured interface names to indices, then
//! collects the addresses bound to those indices, and compares both counts
//! against the number of configured names. Any listing failure or shortfall
//! means "not ready this cycle".
//!
//! Only cardinalities are compared: two addresses on one interface can cover
//! for a missing address on another.

use std::net::IpAddr;

use kicker_netlink::NetworkEnumerator;
use tracing::{debug, error, warn};

/// Decides whether every configured interface carries an address.
#[derive(Debug)]
pub struct ReadinessEvaluator<N> {
    enumerator: N,
}

impl<N: NetworkEnumerator> ReadinessEvaluator<N> {
    pub fn new(enumerator: N) -> Self {
        Self { enumerator }
    }

    /// Returns true when each name resolved and the resolved interfaces hold
    /// exactly as many addresses as there are names.
    pub fn evaluate(&self, interface_names: &[String]) -> bool {
        let indices = self.resolve_interfaces(interface_names);
        if indices.len() != interface_names.len() {
            warn!(
                count = indices.len(),
                expected = interface_names.len(),
                "insufficient interfaces found"
            );
            return false;
        }

        let addresses = self.collect_addresses(&indices);
        if addresses.len() != interface_names.len() {
            warn!(
                count = addresses.len(),
                expected = interface_names.len(),
                "unexpected number of IP addresses found"
            );
            return false;
        }

        true
    }

    /// Indices of the links whose name is in `interface_names`.
    ///
    /// A failed listing yields no indices.
    pub fn resolve_interfaces(&self, interface_names: &[String]) -> Vec<u32> {
        let links = match self.enumerator.list_links() {
            Ok(links) => links,
            Err(e) => {
                error!(error = %e, "failed to get list of interfaces");
                return Vec::new();
            }
        };

        let mut indices = Vec::new();
        for link in links {
            let Some(name) = link.name else {
                debug!(interface = link.index, "ignoring interface with no name");
                continue;
            };

            if interface_names.iter().any(|n| *n == name) {
                indices.push(link.index);
            }
        }
        indices
    }

    /// Every address bound to one of `indices`.
    ///
    /// A failed listing yields no addresses.
    pub fn collect_addresses(&self, indices: &[u32]) -> Vec<IpAddr> {
        let entries = match self.enumerator.list_addresses() {
            Ok(entries) => entries,
            Err(e) => {
                error!(error = %e, "failed to list IP addresses");
                return Vec::new();
            }
        };

        let mut addresses = Vec::new();
        for entry in entries {
            let Some(address) = entry.address else {
                debug!(interface = entry.index, "ignoring address with no attributes");
                continue;
            };

            if indices.contains(&entry.index) {
                debug!(%address, interface = entry.index, "found address for interface");
                addresses.push(address);
            } else {
                debug!(%address, "ignoring address of unmonitored interface");
            }
        }
        addresses
    }
}
