use crate::decode::DecodeError;
use crate::types::ResponseError;

/// Failures in the client itself, as opposed to errors the store reported.
///
/// Store-level errors ([`ResponseError`]) normally travel in the inner
/// result of an operation; the `Store` variant exists for operations that
/// flatten the two layers (e.g. `Session::queue_values`).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no hosts configured")]
    NoHosts,

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("transport error: {0}")]
    Transport(#[from] etcd2_transport::Error),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("store error: {0}")]
    Store(ResponseError),
}
