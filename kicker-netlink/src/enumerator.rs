//! Link and address enumeration abstraction.
//!
//! This module provides:
//! - `LinkInfo` and `AddressInfo`, one entry per link / bound address
//! - `NetworkEnumerator` trait for dumping both tables
//! - `MockEnumerator`, a scriptable in-memory implementation

use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// A link as reported by the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    /// Kernel interface index.
    pub index: u32,
    /// Interface name, if the dump carried an `IFLA_IFNAME` attribute.
    pub name: Option<String>,
}

impl LinkInfo {
    /// A link with a name.
    pub fn named(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: Some(name.into()),
        }
    }

    /// A link whose dump carried no name.
    pub fn unnamed(index: u32) -> Self {
        Self { index, name: None }
    }
}

/// An address as reported by the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressInfo {
    /// Index of the interface owning the address.
    pub index: u32,
    /// The address, if the dump carried an `IFA_ADDRESS` attribute.
    pub address: Option<IpAddr>,
}

impl AddressInfo {
    /// An address bound to the interface at `index`.
    pub fn bound(index: u32, address: IpAddr) -> Self {
        Self {
            index,
            address: Some(address),
        }
    }

    /// An address entry without address data.
    pub fn without_address(index: u32) -> Self {
        Self {
            index,
            address: None,
        }
    }
}

/// Errors from enumeration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetlinkError {
    #[error("failed to open netlink connection: {0}")]
    Connection(String),

    #[error("netlink request failed: {0}")]
    Request(String),
}

/// Trait for listing links and addresses in the current network namespace.
///
/// Each call is a separate round-trip; nothing ties the two dumps together.
pub trait NetworkEnumerator: Send + Sync {
    /// List every link.
    fn list_links(&self) -> Result<Vec<LinkInfo>, NetlinkError>;

    /// List every bound address.
    fn list_addresses(&self) -> Result<Vec<AddressInfo>, NetlinkError>;
}

impl<T: NetworkEnumerator + ?Sized> NetworkEnumerator for &T {
    fn list_links(&self) -> Result<Vec<LinkInfo>, NetlinkError> {
        (**self).list_links()
    }

    fn list_addresses(&self) -> Result<Vec<AddressInfo>, NetlinkError> {
        (**self).list_addresses()
    }
}

/// Mock enumerator for testing.
///
/// Contents can be swapped between calls to simulate interfaces and
/// addresses appearing, and each listing can be made to fail.
#[derive(Debug)]
pub struct MockEnumerator {
    links: Mutex<Result<Vec<LinkInfo>, NetlinkError>>,
    addresses: Mutex<Result<Vec<AddressInfo>, NetlinkError>>,
    link_calls: AtomicUsize,
    address_calls: AtomicUsize,
}

impl Default for MockEnumerator {
    fn default() -> Self {
        Self {
            links: Mutex::new(Ok(Vec::new())),
            addresses: Mutex::new(Ok(Vec::new())),
            link_calls: AtomicUsize::new(0),
            address_calls: AtomicUsize::new(0),
        }
    }
}

impl MockEnumerator {
    /// Create an enumerator with no links and no addresses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an enumerator with predefined links and addresses.
    pub fn with_state(links: Vec<LinkInfo>, addresses: Vec<AddressInfo>) -> Self {
        Self {
            links: Mutex::new(Ok(links)),
            addresses: Mutex::new(Ok(addresses)),
            ..Self::default()
        }
    }

    /// Create an enumerator whose every listing fails.
    pub fn failing(message: &str) -> Self {
        let enumerator = Self::new();
        enumerator.fail_links(message);
        enumerator.fail_addresses(message);
        enumerator
    }

    /// Replace the link table.
    pub fn set_links(&self, links: Vec<LinkInfo>) {
        *self.links.lock().unwrap_or_else(PoisonError::into_inner) = Ok(links);
    }

    /// Replace the address table.
    pub fn set_addresses(&self, addresses: Vec<AddressInfo>) {
        *self.addresses.lock().unwrap_or_else(PoisonError::into_inner) = Ok(addresses);
    }

    /// Make `list_links` fail until `set_links` is called.
    pub fn fail_links(&self, message: &str) {
        *self.links.lock().unwrap_or_else(PoisonError::into_inner) =
            Err(NetlinkError::Request(message.to_string()));
    }

    /// Make `list_addresses` fail until `set_addresses` is called.
    pub fn fail_addresses(&self, message: &str) {
        *self.addresses.lock().unwrap_or_else(PoisonError::into_inner) =
            Err(NetlinkError::Request(message.to_string()));
    }

    /// Number of `list_links` calls so far.
    pub fn link_calls(&self) -> usize {
        self.link_calls.load(Ordering::SeqCst)
    }

    /// Number of `list_addresses` calls so far.
    pub fn address_calls(&self) -> usize {
        self.address_calls.load(Ordering::SeqCst)
    }
}

impl NetworkEnumerator for MockEnumerator {
    fn list_links(&self) -> Result<Vec<LinkInfo>, NetlinkError> {
        self.link_calls.fetch_add(1, Ordering::SeqCst);
        self.links
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn list_addresses(&self) -> Result<Vec<AddressInfo>, NetlinkError> {
        self.address_calls.fetch_add(1, Ordering::SeqCst);
        self.addresses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
