// ── RemoteTransfer trait and factory ─────────────────────────────────────────

use crate::error::TransferResult;
use crate::ftp::FtpRemote;
use crate::sftp::SftpRemote;
use crate::types::{ConnectionConfig, FileUpload, Protocol, RemoteEntry, TransferStats};

/// Uniform contract over FTP and SFTP transfer.
///
/// Lifecycle: explicit `connect` / `close`. Every operation except `ping`
/// fails fast with a `NotConnected` error when no transport is open. `close`
/// on an unconnected instance is a no-op. `ping` opens and politely closes
/// its own scoped transport and never leaves a handle behind, regardless of
/// outcome.
///
/// Instances are `Send` but carry no internal synchronisation; do not share
/// one instance across threads.
pub trait RemoteTransfer: Send {
    /// The protocol this adapter speaks.
    fn protocol(&self) -> Protocol;

    /// Open a transport, authenticate, and immediately release it.
    fn ping(&mut self) -> TransferResult<()>;

    /// Open and retain the transport for subsequent operations.
    fn connect(&mut self) -> TransferResult<()>;

    /// Release the transport. No-op when not connected.
    fn close(&mut self) -> TransferResult<()>;

    /// Upload a local file into a remote folder, creating the folder chain
    /// if it does not exist yet.
    fn upload_file(&mut self, upload: &FileUpload) -> TransferResult<()>;

    /// Download a remote file into a newly created local file.
    fn download_file(&mut self, remote_path: &str, local_path: &str) -> TransferResult<()>;

    /// List the entries at a remote path as (name, size) pairs.
    fn read_dir(&mut self, remote_path: &str) -> TransferResult<Vec<RemoteEntry>>;

    /// Per-instance transfer statistics.
    fn stats(&self) -> TransferStats;
}

/// Construct the adapter matching `config.protocol`.
///
/// Dispatch is over the closed `Protocol` tag, so this cannot fail:
/// unsupported protocol strings are already rejected when the tag is parsed
/// (see [`Protocol`]).
pub fn new_instance(config: ConnectionConfig) -> Box<dyn RemoteTransfer> {
    match config.protocol {
        Protocol::Ftp => Box::new(FtpRemote::new(config)),
        Protocol::Sftp => Box::new(SftpRemote::new(config)),
    }
}
