// ── SftpRemote – SFTP adapter over ssh2 ──────────────────────────────────────

use std::fs::File;
use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::path::Path;

use chrono::Utc;
use log::info;
use ssh2::Session;

use crate::error::{TransferError, TransferResult};
use crate::instance::RemoteTransfer;
use crate::sftp::dir_ops::mkdir_all;
use crate::sftp::known_hosts::{find_host_key, KnownHostKey};
use crate::types::{ConnectionConfig, FileUpload, Protocol, RemoteEntry, TransferStats};

/// SFTP adapter. The transport is a two-layer construction: an
/// authenticated SSH session over TCP, with SFTP channels opened on top per
/// operation. Operations other than `ping` require a prior successful
/// `connect`.
pub struct SftpRemote {
    config: ConnectionConfig,
    session: Option<Session>,
    stats: TransferStats,
}

impl SftpRemote {
    pub fn new(config: ConnectionConfig) -> Self {
        SftpRemote {
            config,
            session: None,
            stats: TransferStats::default(),
        }
    }

    /// Dial, handshake, verify the host key and authenticate.
    fn open_session(&self) -> TransferResult<Session> {
        let addr = self.config.addr();

        // Resolve the expected host key before anything touches the
        // network: with verification on, a missing known_hosts entry must
        // fail the connect before any SSH handshake is attempted.
        let expected: Option<KnownHostKey> = if self.config.ignore_host_key {
            None
        } else {
            Some(find_host_key(&self.config.host)?)
        };

        let sock = addr
            .to_socket_addrs()
            .map_err(|e| TransferError::connection_failed(format!("failed to resolve '{}': {}", addr, e)))?
            .next()
            .ok_or_else(|| {
                TransferError::connection_failed(format!("no address found for '{}'", addr))
            })?;

        let tcp = TcpStream::connect_timeout(&sock, self.config.timeout())
            .map_err(|e| TransferError::connection_failed(format!("TCP connection to {} failed: {}", addr, e)))?;

        let mut session = Session::new()
            .map_err(|e| TransferError::connection_failed(format!("failed to create SSH session: {}", e)))?;
        session.set_tcp_stream(tcp);
        session
            .handshake()
            .map_err(|e| TransferError::connection_failed(format!("SSH handshake with {} failed: {}", addr, e)))?;

        if let Some(expected) = expected {
            let (remote_key, _) = session.host_key().ok_or_else(|| {
                TransferError::host_key_mismatch(format!("{} presented no host key", addr))
            })?;
            if remote_key != expected.key.as_slice() {
                return Err(TransferError::host_key_mismatch(format!(
                    "host key for {} does not match the known_hosts entry ({})",
                    self.config.host, expected.key_type
                )));
            }
        }

        session
            .userauth_password(&self.config.username, &self.config.password)
            .map_err(|e| TransferError::auth_failed(format!("password auth for '{}' failed: {}", self.config.username, e)))?;
        if !session.authenticated() {
            return Err(TransferError::auth_failed(
                "not authenticated after password auth",
            ));
        }

        info!("SFTP authenticated to {} as {}", addr, self.config.username);
        Ok(session)
    }

    fn sftp_channel(&self) -> TransferResult<ssh2::Sftp> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| TransferError::not_connected("sftp"))?;
        session
            .sftp()
            .map_err(|e| TransferError::remote_failed(format!("failed to open SFTP channel: {}", e)))
    }
}

impl RemoteTransfer for SftpRemote {
    fn protocol(&self) -> Protocol {
        Protocol::Sftp
    }

    fn ping(&mut self) -> TransferResult<()> {
        info!("SFTP ping {}", self.config.addr());
        let session = self.open_session()?;
        let _ = session.disconnect(None, "ping complete", None);
        Ok(())
    }

    fn connect(&mut self) -> TransferResult<()> {
        let session = self.open_session()?;
        self.session = Some(session);
        self.stats.connected_at = Some(Utc::now());
        Ok(())
    }

    fn close(&mut self) -> TransferResult<()> {
        if let Some(session) = self.session.take() {
            let _ = session.disconnect(None, "client disconnecting", None);
            info!("SFTP disconnected from {}", self.config.addr());
        }
        Ok(())
    }

    fn upload_file(&mut self, upload: &FileUpload) -> TransferResult<()> {
        let sftp = self.sftp_channel()?;

        mkdir_all(&sftp, &upload.remote_folder)?;

        let mut local = File::open(&upload.local_path).map_err(|e| {
            TransferError::io_error(format!("failed to open file '{}': {}", upload.local_path, e))
        })?;

        let remote_path = upload.remote_path();
        let mut remote = sftp.create(Path::new(&remote_path)).map_err(|e| {
            TransferError::remote_failed(format!("failed to create '{}': {}", remote_path, e))
        })?;

        let bytes = io::copy(&mut local, &mut remote).map_err(|e| {
            TransferError::remote_failed(format!("failed to write '{}': {}", remote_path, e))
        })?;

        self.stats.bytes_uploaded += bytes;
        info!("SFTP uploaded {} bytes to '{}'", bytes, remote_path);
        Ok(())
    }

    fn download_file(&mut self, remote_path: &str, local_path: &str) -> TransferResult<()> {
        let sftp = self.sftp_channel()?;

        let mut remote = sftp.open(Path::new(remote_path)).map_err(|e| {
            TransferError::remote_failed(format!("failed to open '{}': {}", remote_path, e))
        })?;

        let mut local = File::create(local_path).map_err(|e| {
            TransferError::io_error(format!("failed to create file '{}': {}", local_path, e))
        })?;

        let bytes = io::copy(&mut remote, &mut local).map_err(|e| {
            TransferError::io_error(format!("failed to write '{}': {}", local_path, e))
        })?;

        self.stats.bytes_downloaded += bytes;
        info!("SFTP downloaded {} bytes from '{}'", bytes, remote_path);
        Ok(())
    }

    fn read_dir(&mut self, remote_path: &str) -> TransferResult<Vec<RemoteEntry>> {
        let sftp = self.sftp_channel()?;

        let raw = sftp.readdir(Path::new(remote_path)).map_err(|e| {
            TransferError::remote_failed(format!("failed to list '{}': {}", remote_path, e))
        })?;

        let entries = raw
            .into_iter()
            .filter_map(|(entry_path, stat)| {
                let name = entry_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                if name.is_empty() || name == "." || name == ".." {
                    return None;
                }
                Some(RemoteEntry {
                    name,
                    size: stat.size.unwrap_or(0),
                })
            })
            .collect();

        Ok(entries)
    }

    fn stats(&self) -> TransferStats {
        self.stats.clone()
    }
}
