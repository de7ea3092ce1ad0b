//! Categorised transfer error type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned by every fallible operation in this crate. The message
/// always names the failing step and carries the underlying cause verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferError {
    pub kind: TransferErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransferErrorKind {
    /// Protocol string is not one of the supported tags.
    UnsupportedProtocol,
    /// TCP dial / DNS resolution / control-channel setup failure.
    ConnectionFailed,
    /// Wrong username/password, or the server rejected authentication.
    AuthFailed,
    /// No known_hosts entry matched the target host.
    HostKeyMissing,
    /// The presented host key differs from the known_hosts entry.
    HostKeyMismatch,
    /// Operation invoked before a successful connect.
    NotConnected,
    /// An I/O error on the local side (file open/create/read/write).
    IoError,
    /// A remote operation failed (mkdir, cwd, store, retrieve, list).
    RemoteFailed,
}

pub type TransferResult<T> = Result<T, TransferError>;

// ── Construction helpers ─────────────────────────────────────────────────────

impl TransferError {
    pub fn new(kind: TransferErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
        }
    }

    pub fn unsupported_protocol(value: &str) -> Self {
        Self::new(
            TransferErrorKind::UnsupportedProtocol,
            format!("protocol '{}' not supported", value),
        )
    }

    pub fn connection_failed(msg: impl Into<String>) -> Self {
        Self::new(TransferErrorKind::ConnectionFailed, msg)
    }

    pub fn auth_failed(msg: impl Into<String>) -> Self {
        Self::new(TransferErrorKind::AuthFailed, msg)
    }

    pub fn host_key_missing(host: &str) -> Self {
        Self::new(
            TransferErrorKind::HostKeyMissing,
            format!("no hostkey found for {}", host),
        )
    }

    pub fn host_key_mismatch(msg: impl Into<String>) -> Self {
        Self::new(TransferErrorKind::HostKeyMismatch, msg)
    }

    pub fn not_connected(protocol: &str) -> Self {
        Self::new(
            TransferErrorKind::NotConnected,
            format!("{} instance is not connected — call connect() first", protocol),
        )
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(TransferErrorKind::IoError, msg)
    }

    pub fn remote_failed(msg: impl Into<String>) -> Self {
        Self::new(TransferErrorKind::RemoteFailed, msg)
    }
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)
    }
}

impl std::error::Error for TransferError {}

impl From<std::io::Error> for TransferError {
    fn from(e: std::io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_message() {
        let e = TransferError::remote_failed("failed to create folder 'x': denied");
        assert_eq!(
            e.to_string(),
            "[RemoteFailed] failed to create folder 'x': denied"
        );
    }

    #[test]
    fn test_host_key_missing_message() {
        let e = TransferError::host_key_missing("example.com");
        assert_eq!(e.kind, TransferErrorKind::HostKeyMissing);
        assert_eq!(e.message, "no hostkey found for example.com");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let e: TransferError = io.into();
        assert_eq!(e.kind, TransferErrorKind::IoError);
        assert!(e.message.contains("missing"));
    }
}
