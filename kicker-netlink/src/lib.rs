//! Network enumeration for calico-kicker.
//!
//! This crate provides:
//! - `LinkInfo` / `AddressInfo`, the parts of link and address dumps the
//!   readiness check looks at
//! - `NetworkEnumerator` trait (with a mock implementation for testing)
//! - `RtnetlinkEnumerator`, the real rtnetlink-backed implementation
//!   (`netlink` feature, on by default)

pub mod enumerator;
#[cfg(feature = "netlink")]
pub mod rtnetlink_enumerator;

pub use enumerator::{AddressInfo, LinkInfo, MockEnumerator, NetlinkError, NetworkEnumerator};
#[cfg(feature = "netlink")]
pub use rtnetlink_enumerator::RtnetlinkEnumerator;
