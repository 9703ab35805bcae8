//! The session façade: typed operations over the keyspace HTTP API.

use etcd2_transport::{HttpExecutor, ReqwestExecutor};
use tracing::debug;

use crate::decode::{decode_get, decode_put};
use crate::error::Error;
use crate::hosts::{Host, HostPool};
use crate::queue::values_in_order;
use crate::request::RequestSpec;
use crate::types::{GetResponse, PutResponse};
use crate::watch::Watcher;

/// Options for a single [`Session::wait_with`] call.
#[derive(Debug, Clone, Default)]
pub struct WaitOptions {
    recursive: bool,
    wait_index: Option<u64>,
}

impl WaitOptions {
    /// Watch the whole subtree below the key.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Wait for the change at or after this index. A change that already
    /// happened makes the wait return immediately.
    pub fn wait_index(mut self, index: u64) -> Self {
        self.wait_index = Some(index);
        self
    }
}

/// Options for [`Session::watch`].
#[derive(Debug, Clone, Default)]
pub struct WatchOptions {
    recursive: bool,
}

impl WatchOptions {
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }
}

/// A client session against a pool of backend hosts.
///
/// Each operation takes the next host in round-robin order, builds the
/// request, hands it to the transport executor, and decodes the JSON
/// response. There is no automatic retry or failover within a call: a
/// transport failure surfaces immediately, and the failing host simply
/// comes up again on its next turn.
///
/// Operations take `&mut self` (the round-robin cursor advances), which
/// also makes the single-threaded contract explicit: share a session across
/// threads only behind external synchronization.
pub struct Session<E = ReqwestExecutor> {
    hosts: HostPool,
    executor: E,
}

impl Session<ReqwestExecutor> {
    /// Create a session over the given hosts with the default transport.
    ///
    /// The default executor has no request timeout: `wait` and `watch`
    /// block until the server responds, and any bound on that belongs to
    /// the transport. Use [`Session::with_executor`] to supply an executor
    /// with a timeout.
    pub fn new(hosts: Vec<Host>) -> Result<Self, Error> {
        let executor = ReqwestExecutor::no_timeout()?;
        Self::with_executor(hosts, executor)
    }
}

impl<E: HttpExecutor> Session<E> {
    /// Create a session with a custom transport executor.
    ///
    /// Fails with [`Error::NoHosts`] on an empty host list.
    pub fn with_executor(hosts: Vec<Host>, executor: E) -> Result<Self, Error> {
        Ok(Self {
            hosts: HostPool::new(hosts)?,
            executor,
        })
    }

    /// Retrieve the node at `key`.
    pub fn get(&mut self, key: &str) -> Result<GetResponse, Error> {
        self.execute_get(RequestSpec::get(key))
    }

    /// Retrieve the node at `key` with its whole subtree.
    pub fn get_recursive(&mut self, key: &str) -> Result<GetResponse, Error> {
        self.execute_get(RequestSpec::get(key).recursive(true))
    }

    /// Set or update the value at `key`.
    pub fn put(&mut self, key: &str, value: &str) -> Result<PutResponse, Error> {
        self.execute_put(RequestSpec::put(key).value(value))
    }

    /// Set or update the value at `key` with a time-to-live in seconds.
    ///
    /// A non-positive ttl is not transmitted, matching the sentinel
    /// convention: absent means no expiration.
    pub fn put_with_ttl(&mut self, key: &str, value: &str, ttl: i64) -> Result<PutResponse, Error> {
        self.execute_put(RequestSpec::put(key).value(value).ttl(Some(ttl)))
    }

    /// Create or update `key` as a directory.
    pub fn put_directory(&mut self, key: &str) -> Result<PutResponse, Error> {
        self.execute_put(RequestSpec::put(key).directory())
    }

    /// Create or update `key` as a directory with a time-to-live.
    pub fn put_directory_with_ttl(&mut self, key: &str, ttl: i64) -> Result<PutResponse, Error> {
        self.execute_put(RequestSpec::put(key).directory().ttl(Some(ttl)))
    }

    /// Delete the leaf at `key`. The response carries the deleted node's
    /// prior state as `prev_node`.
    pub fn delete_key(&mut self, key: &str) -> Result<PutResponse, Error> {
        self.execute_put(RequestSpec::delete(key))
    }

    /// Delete the directory at `key` and everything below it.
    pub fn delete_directory(&mut self, key: &str) -> Result<PutResponse, Error> {
        self.execute_put(RequestSpec::delete(key).recursive(true).directory())
    }

    /// Delete a queue directory. Same semantics as [`delete_directory`]:
    /// queues are ordinary directories.
    ///
    /// [`delete_directory`]: Session::delete_directory
    pub fn delete_queue(&mut self, key: &str) -> Result<PutResponse, Error> {
        self.delete_directory(key)
    }

    /// Block until the next change of `key`, then return it.
    pub fn wait(&mut self, key: &str) -> Result<GetResponse, Error> {
        self.wait_with(key, WaitOptions::default())
    }

    /// Block until a change of `key` (or its subtree, when recursive).
    ///
    /// With a `wait_index` at or below an already-occurred change, the
    /// server responds immediately with that change.
    pub fn wait_with(&mut self, key: &str, options: WaitOptions) -> Result<GetResponse, Error> {
        self.execute_get(
            RequestSpec::get(key)
                .recursive(options.recursive)
                .wait()
                .wait_index(options.wait_index),
        )
    }

    /// Watch `key` as an infinite iterator of wait results.
    ///
    /// See [`Watcher`] for the cancellation and error-policy contract.
    pub fn watch(&mut self, key: &str, options: WatchOptions) -> Watcher<'_, E> {
        Watcher::new(self, key, options.recursive)
    }

    /// Append a value to the in-order queue directory at `key`.
    ///
    /// The server assigns the child key, lexicographically after every
    /// existing child, so listings come back in creation order.
    pub fn add_to_queue(&mut self, key: &str, value: &str) -> Result<PutResponse, Error> {
        self.execute_put(RequestSpec::post(key).value(value))
    }

    /// Append a value to the queue with a time-to-live in seconds.
    pub fn add_to_queue_with_ttl(
        &mut self,
        key: &str,
        value: &str,
        ttl: i64,
    ) -> Result<PutResponse, Error> {
        self.execute_put(RequestSpec::post(key).value(value).ttl(Some(ttl)))
    }

    /// List the queue directory at `key`, children in creation order.
    pub fn list_queue(&mut self, key: &str) -> Result<GetResponse, Error> {
        self.get_recursive(key)
    }

    /// The queued values at `key`, in creation order.
    ///
    /// A missing queue directory is not an error: it yields an empty list.
    /// Any other store error is flattened into [`Error::Store`].
    pub fn queue_values(&mut self, key: &str) -> Result<Vec<String>, Error> {
        match self.list_queue(key)? {
            Ok(node) => Ok(values_in_order(&node)),
            Err(error) if error.is_key_not_found() => Ok(Vec::new()),
            Err(error) => Err(Error::Store(error)),
        }
    }

    fn execute_get(&mut self, spec: RequestSpec<'_>) -> Result<GetResponse, Error> {
        let request = spec.build(self.hosts.next_host())?;
        debug!(method = %request.method, url = %request.url);
        let response = self.executor.execute(&request)?;
        Ok(decode_get(&response.body)?)
    }

    fn execute_put(&mut self, spec: RequestSpec<'_>) -> Result<PutResponse, Error> {
        let request = spec.build(self.hosts.next_host())?;
        debug!(method = %request.method, url = %request.url);
        let response = self.executor.execute(&request)?;
        Ok(decode_put(&response.body)?)
    }

    #[cfg(test)]
    pub(crate) fn executor(&self) -> &E {
        &self.executor
    }
}
