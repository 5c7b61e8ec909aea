//! Pod self-termination for calico-kicker.
//!
//! This crate provides:
//! - `PodTerminator` trait (with a recording mock for testing)
//! - `KubePodTerminator`, which deletes a Pod through the Kubernetes API
//!   using the in-cluster service account

pub mod kube_terminator;
pub mod terminator;

pub use kube_terminator::KubePodTerminator;
pub use terminator::{DeleteRequest, MockTerminator, PodTerminator, TerminateError};
