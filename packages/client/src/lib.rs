//! # etcd2-client
//!
//! Blocking client for the etcd v2 key-value API.
//!
//! Keys form a filesystem-like tree: a [`Node`] is either a leaf carrying a
//! value or a directory carrying ordered children. A [`Session`] turns typed
//! method calls into HTTP requests against a round-robin pool of backend
//! hosts, decodes the JSON node/error schema, and exposes long-polling
//! `wait` plus an infinite [`watch`](Session::watch) iterator for change
//! notification. In-order queue operations are layered on the same
//! primitives.
//!
//! ## Result shape
//!
//! Every operation returns a nested result: the outer `Result` carries
//! transport and decode failures ([`Error`]), the inner one carries errors
//! the store itself reported ([`ResponseError`], e.g. key not found).
//!
//! ```ignore
//! use etcd2_client::{Host, Session};
//!
//! let mut session = Session::new(vec![Host::new("localhost", 4001)])?;
//!
//! session.put("/message", "test message")?;
//! match session.get("/message")? {
//!     Ok(node) => println!("{}", node),
//!     Err(e) => println!("store error {}: {}", e.error_code, e.message),
//! }
//!
//! // Watch a subtree until something interesting happens
//! for change in session.watch("/dir", Default::default()) {
//!     let response = change?;
//!     // ...
//! }
//! ```

pub mod decode;
pub mod error;
pub mod hosts;
pub mod queue;
pub mod session;
pub mod types;
pub mod watch;

mod request;

#[cfg(test)]
mod testing;

pub use decode::DecodeError;
pub use error::Error;
pub use hosts::{Host, HostPool};
pub use queue::values_in_order;
pub use session::{Session, WaitOptions, WatchOptions};
pub use types::{GetResponse, Node, PutResponse, PutSuccess, ResponseError, ERR_KEY_NOT_FOUND};
pub use watch::{WatchHandle, Watcher};
