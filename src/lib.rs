// ── uniftp ────────────────────────────────────────────────────────────────────
//
// Uniform FTP/SFTP file-transfer client:
//   • One `RemoteTransfer` trait over both protocols
//   • FTP via suppaftp (control channel, streamed transfers, LIST parsing)
//   • SFTP via ssh2 (password auth, known_hosts host-key verification)
//   • Recursive remote-directory provisioning for uploads
//   • Explicit connect/close lifecycle; operations fail fast when offline
//
// All operations are synchronous and blocking. A single adapter instance is
// not safe for concurrent use; independent instances are.

pub mod error;
pub mod ftp;
pub mod instance;
pub mod sftp;
pub mod types;

pub use error::{TransferError, TransferErrorKind, TransferResult};
pub use ftp::FtpRemote;
pub use instance::{new_instance, RemoteTransfer};
pub use sftp::{KnownHostKey, SftpRemote};
pub use types::{ConnectionConfig, FileUpload, Protocol, RemoteEntry, TransferStats};
