//! Error types for the cm-server crate.
//!
//! [`ServerError`] covers failures of the transport itself. Problems with a
//! single request never surface here; they become JSON-RPC error responses
//! (see [`RpcError`](crate::protocol::RpcError)) or plain-text tool results.

/// Errors that stop the server loop.
///
/// # Examples
///
/// ```
/// use cm_server::ServerError;
/// use std::io;
///
/// let err = ServerError::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
/// assert!(err.is_disconnect());
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Reading from or writing to the transport failed.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A response could not be serialized.
    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The built-in catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] cm_catalog::CatalogError),
}

impl ServerError {
    /// Returns `true` if the client went away mid-write.
    ///
    /// The loop treats this like end of input.
    #[must_use]
    pub fn is_disconnect(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}
