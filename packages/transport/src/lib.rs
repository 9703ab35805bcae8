//! # etcd2-transport
//!
//! Blocking HTTP transport layer for the etcd2 client.
//!
//! The protocol layer (`etcd2-client`) builds fully-formed [`HttpRequest`]
//! values and hands them to an [`HttpExecutor`]. This crate provides the
//! production executor ([`ReqwestExecutor`], built on `reqwest::blocking`)
//! and the value types that cross the seam. Keeping the executor behind a
//! trait lets tests drive the protocol layer with scripted responses and
//! no network.
//!
//! Timeouts live here: the executor decides how long a request may block.
//! Long-polling callers should use [`ReqwestExecutor::no_timeout`] so the
//! server, not the client, decides when a watch returns.

pub mod error;
pub mod executor;
pub mod types;

pub use error::Error;
pub use executor::{HttpExecutor, ReqwestExecutor};
pub use types::{HttpRequest, HttpResponse, Method};
