//! Typed views of the store's node and error schema.

use std::fmt;

use serde::Deserialize;

/// Error code the store reports for a missing key.
pub const ERR_KEY_NOT_FOUND: u64 = 100;

/// One entry in the store's key tree.
///
/// A node is exactly one of two variants: a leaf carrying a value, or a
/// directory carrying ordered children (server order, which reflects key
/// ordering within the directory). The shared metadata lives on both
/// variants so the exclusivity invariant is structural: a leaf cannot have
/// children, a directory cannot have a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        /// Absolute key path (leading `/`).
        key: String,
        value: String,
        /// Expiration timestamp as reported by the server, if the key
        /// carries a TTL.
        expiration: Option<String>,
        /// Seconds until expiry; `None` means no expiration.
        ttl: Option<i64>,
        modified_index: u64,
        created_index: u64,
    },
    Directory {
        /// Absolute key path (leading `/`).
        key: String,
        /// Children in server-returned order.
        nodes: Vec<Node>,
        expiration: Option<String>,
        ttl: Option<i64>,
        modified_index: u64,
        created_index: u64,
    },
}

impl Node {
    pub fn key(&self) -> &str {
        match self {
            Node::Leaf { key, .. } | Node::Directory { key, .. } => key,
        }
    }

    /// The leaf value, or `None` for a directory.
    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Leaf { value, .. } => Some(value),
            Node::Directory { .. } => None,
        }
    }

    /// Children in server order; empty for a leaf.
    pub fn nodes(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Directory { nodes, .. } => nodes,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Node::Directory { .. })
    }

    pub fn expiration(&self) -> Option<&str> {
        match self {
            Node::Leaf { expiration, .. } | Node::Directory { expiration, .. } => {
                expiration.as_deref()
            }
        }
    }

    pub fn ttl(&self) -> Option<i64> {
        match self {
            Node::Leaf { ttl, .. } | Node::Directory { ttl, .. } => *ttl,
        }
    }

    pub fn modified_index(&self) -> u64 {
        match self {
            Node::Leaf { modified_index, .. } | Node::Directory { modified_index, .. } => {
                *modified_index
            }
        }
    }

    pub fn created_index(&self) -> u64 {
        match self {
            Node::Leaf { created_index, .. } | Node::Directory { created_index, .. } => {
                *created_index
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node(key=\"{}\"", self.key())?;

        match self {
            Node::Leaf { value, .. } => write!(f, ", value=\"{}\"", value)?,
            Node::Directory { nodes, .. } => {
                write!(f, ", nodes=[")?;
                for (i, node) in nodes.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", node)?;
                }
                write!(f, "]")?;
            }
        }

        write!(
            f,
            ", modifiedIndex={}, createdIndex={}",
            self.modified_index(),
            self.created_index()
        )?;

        if let Some(expiration) = self.expiration() {
            write!(f, ", expiration=\"{}\"", expiration)?;
        }
        if let Some(ttl) = self.ttl() {
            write!(f, ", ttl={}", ttl)?;
        }

        write!(f, ")")
    }
}

/// An application-level failure reported by the store, e.g. key not found
/// or a failed compare-and-swap. Distinct from transport and decode
/// failures, which surface as [`crate::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseError {
    #[serde(rename = "errorCode")]
    pub error_code: u64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub cause: String,
    /// Raft index at the time of the error.
    #[serde(default)]
    pub index: u64,
}

impl ResponseError {
    pub fn is_key_not_found(&self) -> bool {
        self.error_code == ERR_KEY_NOT_FOUND
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.error_code, self.cause, self.message)
    }
}

impl std::error::Error for ResponseError {}

/// Result of a GET-shaped operation: the retrieved node, or the error the
/// store reported.
pub type GetResponse = Result<Node, ResponseError>;

/// Success payload of a PUT-shaped operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutSuccess {
    /// The node as created or updated.
    pub node: Node,
    /// The node's prior state, when the operation replaced or removed one.
    pub prev_node: Option<Node>,
}

/// Result of a PUT/POST/DELETE operation.
pub type PutResponse = Result<PutSuccess, ResponseError>;
