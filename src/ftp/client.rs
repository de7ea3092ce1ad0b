// ── FtpRemote – FTP adapter over suppaftp ────────────────────────────────────

use std::fs::File;
use std::io;
use std::net::ToSocketAddrs;

use chrono::Utc;
use log::{info, warn};
use suppaftp::list::File as ListEntry;
use suppaftp::FtpStream;

use crate::error::{TransferError, TransferResult};
use crate::ftp::directory::ensure_remote_folders;
use crate::instance::RemoteTransfer;
use crate::types::{ConnectionConfig, FileUpload, Protocol, RemoteEntry, TransferStats};

/// FTP adapter. Holds at most one live control connection; operations other
/// than `ping` require a prior successful `connect`.
pub struct FtpRemote {
    config: ConnectionConfig,
    stream: Option<FtpStream>,
    stats: TransferStats,
}

impl FtpRemote {
    pub fn new(config: ConnectionConfig) -> Self {
        FtpRemote {
            config,
            stream: None,
            stats: TransferStats::default(),
        }
    }

    /// Dial the control channel and authenticate.
    fn open_stream(&self) -> TransferResult<FtpStream> {
        let addr = self.config.addr();
        let sock = addr
            .to_socket_addrs()
            .map_err(|e| TransferError::connection_failed(format!("failed to resolve '{}': {}", addr, e)))?
            .next()
            .ok_or_else(|| {
                TransferError::connection_failed(format!("no address found for '{}'", addr))
            })?;

        let mut stream = FtpStream::connect_timeout(sock, self.config.timeout())
            .map_err(|e| TransferError::connection_failed(format!("failed to connect to {}: {}", addr, e)))?;

        stream
            .login(&self.config.username, &self.config.password)
            .map_err(|e| TransferError::auth_failed(format!("login to {} failed: {}", addr, e)))?;

        Ok(stream)
    }
}

impl RemoteTransfer for FtpRemote {
    fn protocol(&self) -> Protocol {
        Protocol::Ftp
    }

    fn ping(&mut self) -> TransferResult<()> {
        info!("FTP ping {}", self.config.addr());
        let mut stream = self.open_stream()?;
        if let Err(e) = stream.quit() {
            warn!("FTP quit after ping failed: {}", e);
        }
        Ok(())
    }

    fn connect(&mut self) -> TransferResult<()> {
        let stream = self.open_stream()?;
        info!("FTP connected to {}", self.config.addr());
        self.stream = Some(stream);
        self.stats.connected_at = Some(Utc::now());
        Ok(())
    }

    fn close(&mut self) -> TransferResult<()> {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.quit() {
                warn!("FTP quit failed: {}", e);
            }
            info!("FTP disconnected from {}", self.config.addr());
        }
        Ok(())
    }

    fn upload_file(&mut self, upload: &FileUpload) -> TransferResult<()> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| TransferError::not_connected("ftp"))?;

        ensure_remote_folders(stream, &upload.remote_folder)?;

        let mut local = File::open(&upload.local_path).map_err(|e| {
            TransferError::io_error(format!("failed to open file '{}': {}", upload.local_path, e))
        })?;

        let remote_path = upload.remote_path();
        let bytes = stream.put_file(&remote_path, &mut local).map_err(|e| {
            TransferError::remote_failed(format!("failed to store '{}': {}", remote_path, e))
        })?;

        self.stats.bytes_uploaded += bytes;
        info!("FTP uploaded {} bytes to '{}'", bytes, remote_path);
        Ok(())
    }

    fn download_file(&mut self, remote_path: &str, local_path: &str) -> TransferResult<()> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| TransferError::not_connected("ftp"))?;

        let mut local = File::create(local_path).map_err(|e| {
            TransferError::io_error(format!("failed to create file '{}': {}", local_path, e))
        })?;

        let mut reader = stream.retr_as_stream(remote_path).map_err(|e| {
            TransferError::remote_failed(format!("failed to retrieve '{}': {}", remote_path, e))
        })?;

        let bytes = io::copy(&mut reader, &mut local).map_err(|e| {
            TransferError::io_error(format!("failed to write '{}': {}", local_path, e))
        })?;

        stream.finalize_retr_stream(reader).map_err(|e| {
            TransferError::remote_failed(format!("failed to finalize retrieval of '{}': {}", remote_path, e))
        })?;

        self.stats.bytes_downloaded += bytes;
        info!("FTP downloaded {} bytes from '{}'", bytes, remote_path);
        Ok(())
    }

    fn read_dir(&mut self, remote_path: &str) -> TransferResult<Vec<RemoteEntry>> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| TransferError::not_connected("ftp"))?;

        let lines = stream.list(Some(remote_path)).map_err(|e| {
            TransferError::remote_failed(format!("failed to list '{}': {}", remote_path, e))
        })?;

        // Lines the parser cannot make sense of (server banners, oddball
        // formats) are skipped rather than failing the whole listing.
        let entries = lines
            .iter()
            .filter_map(|line| ListEntry::try_from(line.as_str()).ok())
            .filter(|f| f.name() != "." && f.name() != "..")
            .map(|f| RemoteEntry {
                name: f.name().to_string(),
                size: f.size() as u64,
            })
            .collect();

        Ok(entries)
    }

    fn stats(&self) -> TransferStats {
        self.stats.clone()
    }
}
