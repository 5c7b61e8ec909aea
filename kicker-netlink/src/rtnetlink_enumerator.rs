//! Real rtnetlink enumerator.
//!
//! `RtnetlinkEnumerator` owns one rtnetlink session for the life of the
//! process. Requests are driven to completion on a shared tokio runtime, so
//! callers see plain blocking calls.

use std::sync::Arc;

use futures::TryStreamExt;
use netlink_packet_route::address::{AddressAttribute, AddressMessage};
use netlink_packet_route::link::{LinkAttribute, LinkMessage};
use rtnetlink::Handle;
use tokio::runtime::Runtime;

use crate::enumerator::{AddressInfo, LinkInfo, NetlinkError, NetworkEnumerator};

/// Enumerator backed by an rtnetlink route socket.
pub struct RtnetlinkEnumerator {
    handle: Handle,
    runtime: Arc<Runtime>,
}

impl RtnetlinkEnumerator {
    /// Open the netlink session and spawn its connection task on `runtime`.
    ///
    /// The connection task only makes progress while a request is being
    /// driven through `block_on`, which is all this enumerator needs.
    ///
    /// # Errors
    /// Returns `NetlinkError::Connection` if the route socket cannot be opened.
    pub fn connect(runtime: Arc<Runtime>) -> Result<Self, NetlinkError> {
        let _guard = runtime.enter();
        let (connection, handle, _) =
            rtnetlink::new_connection().map_err(|e| NetlinkError::Connection(e.to_string()))?;
        runtime.spawn(connection);

        Ok(Self { handle, runtime })
    }
}

impl NetworkEnumerator for RtnetlinkEnumerator {
    fn list_links(&self) -> Result<Vec<LinkInfo>, NetlinkError> {
        let messages: Vec<LinkMessage> = self
            .runtime
            .block_on(self.handle.link().get().execute().try_collect())
            .map_err(|e| NetlinkError::Request(e.to_string()))?;

        Ok(messages.into_iter().map(link_info).collect())
    }

    fn list_addresses(&self) -> Result<Vec<AddressInfo>, NetlinkError> {
        let messages: Vec<AddressMessage> = self
            .runtime
            .block_on(self.handle.address().get().execute().try_collect())
            .map_err(|e| NetlinkError::Request(e.to_string()))?;

        Ok(messages.into_iter().map(address_info).collect())
    }
}

fn link_info(message: LinkMessage) -> LinkInfo {
    let name = message.attributes.into_iter().find_map(|attr| match attr {
        LinkAttribute::IfName(name) => Some(name),
        _ => None,
    });

    LinkInfo {
        index: message.header.index,
        name,
    }
}

fn address_info(message: AddressMessage) -> AddressInfo {
    let address = message.attributes.into_iter().find_map(|attr| match attr {
        AddressAttribute::Address(address) => Some(address),
        _ => None,
    });

    AddressInfo {
        index: message.header.index,
        address,
    }
}
