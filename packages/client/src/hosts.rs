//! Backend host list and round-robin selection.

use std::fmt;

use crate::error::Error;

/// One backend endpoint: hostname (or address) and port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    host: String,
    port: u16,
}

impl Host {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// The configured backend hosts, handed out in round-robin order.
///
/// No health tracking: a failing host simply comes up again on its next
/// turn in the cycle. The cursor is plain per-pool state; a pool (and the
/// session owning it) is meant for single-threaded use.
#[derive(Debug, Clone)]
pub struct HostPool {
    hosts: Vec<Host>,
    cursor: usize,
}

impl HostPool {
    /// Create a pool from an ordered, non-empty host list.
    pub fn new(hosts: Vec<Host>) -> Result<Self, Error> {
        if hosts.is_empty() {
            return Err(Error::NoHosts);
        }
        Ok(Self { hosts, cursor: 0 })
    }

    /// Return the next host in configured order, advancing the cursor.
    ///
    /// N consecutive calls over N hosts visit each exactly once; call N+1
    /// starts the cycle over. The cursor wraps rather than overflowing.
    pub fn next_host(&mut self) -> &Host {
        let host = &self.hosts[self.cursor % self.hosts.len()];
        self.cursor = self.cursor.wrapping_add(1);
        host
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}
